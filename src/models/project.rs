use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cost_model::CostModel;
use super::feature::Feature;

/// Descriptive fields of a project. Free text, no invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub owner: String,
    pub description: String,
    pub industry: String,
}

/// Which estimation areas the project covers.
///
/// Stored with the project and handed back to clients; the effort model does
/// not read these flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationInclusions {
    pub include_design: bool,
    pub include_frontend: bool,
    pub include_backend: bool,
    pub include_qa: bool,
    pub include_database: bool,
}

impl Default for EstimationInclusions {
    fn default() -> Self {
        Self {
            include_design: true,
            include_frontend: true,
            include_backend: false,
            include_qa: false,
            include_database: false,
        }
    }
}

/// Free-text comments per estimation area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusionComments {
    pub design: String,
    pub frontend: String,
    pub backend: String,
    pub qa: String,
    pub database: String,
}

/// Technical context captured alongside the cost model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalNotes {
    pub user_setup: String,
    /// Target code coverage in percent.
    pub code_coverage: Option<f64>,
    pub css_preprocessor: String,
    pub accessibility: String,
    pub performance_targets: String,
    pub security: String,
    pub tech_stack: String,
    pub comments: String,
}

/// Everything persisted for one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub metadata: ProjectMetadata,
    #[serde(default)]
    pub cost_model: CostModel,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub inclusions: EstimationInclusions,
    #[serde(default)]
    pub comments: InclusionComments,
    #[serde(default)]
    pub notes: TechnicalNotes,
}

impl ProjectRecord {
    pub fn new(metadata: ProjectMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    pub fn total_effort_hours(&self) -> f64 {
        self.features.iter().map(|f| f.hours).sum()
    }
}

/// Project row for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub industry: String,
    pub feature_count: usize,
    pub total_effort_hours: f64,
}

impl ProjectSummary {
    pub fn from_record(id: Uuid, record: &ProjectRecord) -> Self {
        Self {
            id,
            name: record.metadata.name.clone(),
            owner: record.metadata.owner.clone(),
            industry: record.metadata.industry.clone(),
            feature_count: record.features.len(),
            total_effort_hours: record.total_effort_hours(),
        }
    }
}

/// Input for creating a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub industry: String,
}

impl From<CreateProjectInput> for ProjectMetadata {
    fn from(input: CreateProjectInput) -> Self {
        Self {
            name: input.name,
            owner: input.owner,
            description: input.description,
            industry: input.industry,
        }
    }
}

/// Input for updating a project. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub inclusions: Option<EstimationInclusions>,
    pub comments: Option<InclusionComments>,
    pub notes: Option<TechnicalNotes>,
}
