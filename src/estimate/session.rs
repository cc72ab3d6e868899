use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ledger::FeatureLedger;
use super::store::ProjectStore;
use crate::error::{EstimateError, Result};
use crate::models::*;
use crate::suggest::SizeSuggester;

/// One project's estimate: metadata, cost model and feature ledger.
///
/// The session owns its cost model and ledger. Every mutating method ends by
/// recomputing the total, so [`total_effort_hours`](Self::total_effort_hours)
/// is always current when read. Mutations take `&mut self`, which keeps a
/// session to one in-flight change at a time.
#[derive(Debug, Clone)]
pub struct EstimationSession {
    project_id: Option<Uuid>,
    metadata: ProjectMetadata,
    cost_model: CostModel,
    ledger: FeatureLedger,
    inclusions: EstimationInclusions,
    comments: InclusionComments,
    notes: TechnicalNotes,
    total_effort_hours: f64,
}

impl EstimationSession {
    /// Start an unsaved project with a default cost model and no features.
    pub fn create(metadata: ProjectMetadata) -> Self {
        Self {
            project_id: None,
            metadata,
            cost_model: CostModel::default(),
            ledger: FeatureLedger::new(),
            inclusions: EstimationInclusions::default(),
            comments: InclusionComments::default(),
            notes: TechnicalNotes::default(),
            total_effort_hours: 0.0,
        }
    }

    /// Load a stored project. Feature hours are taken as stored, not re-priced.
    pub fn load(store: &impl ProjectStore, project_id: Uuid) -> Result<Self> {
        let record = store
            .get_record(project_id)?
            .ok_or(EstimateError::ProjectNotFound(project_id))?;

        let mut session = Self::from_record(record)?;
        session.project_id = Some(project_id);
        tracing::debug!(
            "Loaded project {} with {} features",
            project_id,
            session.ledger.len()
        );
        Ok(session)
    }

    fn from_record(record: ProjectRecord) -> Result<Self> {
        let mut session = Self {
            project_id: None,
            metadata: record.metadata,
            cost_model: record.cost_model,
            ledger: FeatureLedger::from_entries(record.features)?,
            inclusions: record.inclusions,
            comments: record.comments,
            notes: record.notes,
            total_effort_hours: 0.0,
        };
        session.recompute_total();
        Ok(session)
    }

    /// Snapshot of everything persisted for this project.
    pub fn to_record(&self) -> ProjectRecord {
        ProjectRecord {
            metadata: self.metadata.clone(),
            cost_model: self.cost_model.clone(),
            features: self.ledger.entries().to_vec(),
            inclusions: self.inclusions.clone(),
            comments: self.comments.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Create the project's record in `store` and adopt the new id.
    pub fn register(&mut self, store: &impl ProjectStore) -> Result<Uuid> {
        if let Some(id) = self.project_id {
            return Ok(id);
        }
        let id = store.create_record(&self.to_record())?;
        self.project_id = Some(id);
        tracing::info!("Registered project '{}' as {}", self.metadata.name, id);
        Ok(id)
    }

    /// Overwrite the stored record with the session's current state.
    pub fn save(&self, store: &impl ProjectStore) -> Result<()> {
        let id = self.project_id.ok_or(EstimateError::NoProjectId)?;
        if !store.update_record(id, &self.to_record())? {
            return Err(EstimateError::ProjectNotFound(id));
        }
        tracing::info!(
            "Saved project {} ({} features, {} hours)",
            id,
            self.ledger.len(),
            self.total_effort_hours
        );
        Ok(())
    }

    pub fn recompute_total(&mut self) -> f64 {
        self.total_effort_hours = self.ledger.total_hours();
        self.total_effort_hours
    }

    // ============================================================
    // Accessors
    // ============================================================

    pub fn project_id(&self) -> Option<Uuid> {
        self.project_id
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    pub fn ledger(&self) -> &FeatureLedger {
        &self.ledger
    }

    pub fn inclusions(&self) -> &EstimationInclusions {
        &self.inclusions
    }

    pub fn comments(&self) -> &InclusionComments {
        &self.comments
    }

    pub fn notes(&self) -> &TechnicalNotes {
        &self.notes
    }

    pub fn total_effort_hours(&self) -> f64 {
        self.total_effort_hours
    }

    // ============================================================
    // Ledger mutations
    // ============================================================

    pub fn add_feature(&mut self, input: CreateFeatureInput) -> Result<Feature> {
        let feature = self.ledger.add(&self.cost_model, input)?;
        self.recompute_total();
        Ok(feature)
    }

    pub fn update_feature(&mut self, id: Uuid, input: UpdateFeatureInput) -> Result<Feature> {
        let feature = self.ledger.update(&self.cost_model, id, input)?;
        self.recompute_total();
        Ok(feature)
    }

    pub fn remove_feature(&mut self, id: Uuid) -> Result<Feature> {
        let feature = self.ledger.remove(id)?;
        self.recompute_total();
        Ok(feature)
    }

    // ============================================================
    // Cost model mutations
    // ============================================================

    /// Existing features keep their hours until [`reprice_features`](Self::reprice_features).
    pub fn set_base_hours(&mut self, size: Size, value: f64) -> Result<()> {
        self.cost_model.set_base_hours(size, value)?;
        self.recompute_total();
        Ok(())
    }

    /// Existing features keep their hours until [`reprice_features`](Self::reprice_features).
    pub fn set_multiplier(&mut self, size: Size, value: f64) -> Result<()> {
        self.cost_model.set_multiplier(size, value)?;
        self.recompute_total();
        Ok(())
    }

    /// Apply a cost model change atomically: either every value is accepted or
    /// the model is left as it was.
    pub fn update_cost_model(&mut self, input: UpdateCostModelInput) -> Result<()> {
        let mut model = self.cost_model.clone();
        for (&size, &value) in &input.base_hours {
            model.set_base_hours(size, value)?;
        }
        for (&size, &value) in &input.size_multipliers {
            model.set_multiplier(size, value)?;
        }
        if input.reprice {
            self.ledger.reprice(&model)?;
        }
        self.cost_model = model;
        self.recompute_total();
        Ok(())
    }

    /// Re-price every feature against the current cost model.
    /// Returns the new total; on error no feature is changed.
    pub fn reprice_features(&mut self) -> Result<f64> {
        self.ledger.reprice(&self.cost_model)?;
        Ok(self.recompute_total())
    }

    // ============================================================
    // Project fields
    // ============================================================

    pub fn set_metadata(&mut self, metadata: ProjectMetadata) {
        self.metadata = metadata;
    }

    pub fn set_inclusions(&mut self, inclusions: EstimationInclusions) {
        self.inclusions = inclusions;
    }

    pub fn set_comments(&mut self, comments: InclusionComments) {
        self.comments = comments;
    }

    pub fn set_notes(&mut self, notes: TechnicalNotes) {
        self.notes = notes;
    }

    /// Apply a partial project update.
    pub fn update_project(&mut self, input: UpdateProjectInput) {
        if let Some(name) = input.name {
            self.metadata.name = name;
        }
        if let Some(owner) = input.owner {
            self.metadata.owner = owner;
        }
        if let Some(description) = input.description {
            self.metadata.description = description;
        }
        if let Some(industry) = input.industry {
            self.metadata.industry = industry;
        }
        if let Some(inclusions) = input.inclusions {
            self.inclusions = inclusions;
        }
        if let Some(comments) = input.comments {
            self.comments = comments;
        }
        if let Some(notes) = input.notes {
            self.notes = notes;
        }
    }

    // ============================================================
    // Size suggestions
    // ============================================================

    /// Ask `suggester` to size a feature description.
    ///
    /// A blank description is answered locally without calling the provider.
    /// Provider failures come back as a suggestion with no size whose
    /// reasoning carries the error message.
    pub async fn request_size_suggestion(
        suggester: &dyn SizeSuggester,
        feature_name: &str,
    ) -> SizeSuggestion {
        if feature_name.trim().is_empty() {
            return SizeSuggestion::unavailable(EMPTY_DESCRIPTION_REASONING);
        }

        match suggester.suggest(feature_name).await {
            Ok(output) => {
                tracing::debug!(
                    "{} suggested {} for '{}'",
                    suggester.name(),
                    output.suggested_size,
                    feature_name
                );
                output.into()
            }
            Err(e) => {
                tracing::warn!("Size suggestion from {} failed: {}", suggester.name(), e);
                SizeSuggestion::unavailable(e.to_string())
            }
        }
    }

    /// Set a suggested size on a feature and re-price it.
    ///
    /// Returns `None` without touching the ledger when the suggestion carries
    /// no size or the feature was removed while the suggestion was pending.
    pub fn apply_suggestion(
        &mut self,
        feature_id: Uuid,
        suggestion: &SizeSuggestion,
    ) -> Result<Option<Feature>> {
        let Some(size) = suggestion.size else {
            return Ok(None);
        };
        if !self.ledger.contains(feature_id) {
            tracing::warn!("Discarding suggestion for removed feature {}", feature_id);
            return Ok(None);
        }

        let feature = self.update_feature(
            feature_id,
            UpdateFeatureInput {
                size: Some(size),
                ..Default::default()
            },
        )?;
        Ok(Some(feature))
    }

    /// Read-only view for clients.
    pub fn view(&self) -> EstimateView {
        let groups = self.ledger.classify();
        let group_view = |group: FeatureGroup| GroupView {
            group,
            title: group.title().to_string(),
            hours: groups.hours(group),
            features: groups.get(group).iter().map(|&f| f.clone()).collect(),
        };

        EstimateView {
            id: self.project_id,
            metadata: self.metadata.clone(),
            cost_model: self.cost_model.clone(),
            inclusions: self.inclusions.clone(),
            comments: self.comments.clone(),
            notes: self.notes.clone(),
            setup: group_view(FeatureGroup::Setup),
            features: group_view(FeatureGroup::Features),
            overhead: group_view(FeatureGroup::Overhead),
            total_effort_hours: self.total_effort_hours,
        }
    }
}

/// A session rendered for API responses and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateView {
    pub id: Option<Uuid>,
    pub metadata: ProjectMetadata,
    pub cost_model: CostModel,
    pub inclusions: EstimationInclusions,
    pub comments: InclusionComments,
    pub notes: TechnicalNotes,
    pub setup: GroupView,
    pub features: GroupView,
    pub overhead: GroupView,
    pub total_effort_hours: f64,
}

impl EstimateView {
    pub fn groups(&self) -> [&GroupView; 3] {
        [&self.setup, &self.features, &self.overhead]
    }
}

/// One classification group with its subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupView {
    pub group: FeatureGroup,
    pub title: String,
    pub hours: f64,
    pub features: Vec<Feature>,
}
