use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{EstimateError, Result};
use crate::models::{
    CostModel, CreateFeatureInput, Feature, FeatureGroup, FeatureGroups, Size,
    UpdateFeatureInput,
};

/// Ordered collection of a project's features.
///
/// Entries keep insertion order and have unique ids. Hours are priced against
/// the cost model passed into each mutating call; the ledger holds no
/// reference to a model of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureLedger {
    entries: Vec<Feature>,
}

impl FeatureLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from stored entries, keeping their hours as stored.
    pub fn from_entries(entries: Vec<Feature>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for feature in &entries {
            if !seen.insert(feature.id) {
                return Err(EstimateError::DuplicateFeature(feature.id));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Feature] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Feature> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Feature> {
        self.entries.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Append a new feature priced against `cost_model`.
    pub fn add(&mut self, cost_model: &CostModel, input: CreateFeatureInput) -> Result<Feature> {
        validate_name(&input.name)?;
        validate_quantity(input.quantity_multiplier)?;
        let hours = price(cost_model, input.size, input.quantity_multiplier)?;
        validate_total(self.total_hours() + hours)?;

        let feature = Feature {
            id: Uuid::new_v4(),
            hours,
            module: input.module,
            name: input.name,
            quantity_multiplier: input.quantity_multiplier,
            size: input.size,
        };
        tracing::debug!(
            "Added feature {} ({} x{}) = {} hours",
            feature.id,
            feature.size,
            feature.quantity_multiplier,
            feature.hours
        );
        self.entries.push(feature.clone());
        Ok(feature)
    }

    /// Apply a partial update in place and re-price the entry against `cost_model`.
    pub fn update(
        &mut self,
        cost_model: &CostModel,
        id: Uuid,
        input: UpdateFeatureInput,
    ) -> Result<Feature> {
        if let Some(ref name) = input.name {
            validate_name(name)?;
        }
        if let Some(quantity) = input.quantity_multiplier {
            validate_quantity(quantity)?;
        }

        let index = self
            .entries
            .iter()
            .position(|f| f.id == id)
            .ok_or(EstimateError::FeatureNotFound(id))?;

        let current = &self.entries[index];
        let size = input.size.unwrap_or(current.size);
        let quantity = input.quantity_multiplier.unwrap_or(current.quantity_multiplier);
        let hours = price(cost_model, size, quantity)?;
        let others: f64 = self
            .entries
            .iter()
            .filter(|f| f.id != id)
            .map(|f| f.hours)
            .sum();
        validate_total(others + hours)?;

        let feature = &mut self.entries[index];
        if let Some(module) = input.module {
            feature.module = module;
        }
        if let Some(name) = input.name {
            feature.name = name;
        }
        feature.size = size;
        feature.quantity_multiplier = quantity;
        feature.hours = hours;

        tracing::debug!("Updated feature {} = {} hours", feature.id, feature.hours);
        Ok(feature.clone())
    }

    /// Remove a feature. Unknown ids are an error.
    pub fn remove(&mut self, id: Uuid) -> Result<Feature> {
        let index = self
            .entries
            .iter()
            .position(|f| f.id == id)
            .ok_or(EstimateError::FeatureNotFound(id))?;
        let removed = self.entries.remove(index);
        tracing::debug!("Removed feature {}", removed.id);
        Ok(removed)
    }

    /// Re-price every entry against `cost_model`.
    ///
    /// All-or-nothing: if any entry or the total would leave the finite range,
    /// no entry is changed.
    pub fn reprice(&mut self, cost_model: &CostModel) -> Result<()> {
        let repriced = self
            .entries
            .iter()
            .map(|f| price(cost_model, f.size, f.quantity_multiplier))
            .collect::<Result<Vec<f64>>>()?;
        validate_total(repriced.iter().sum())?;

        for (feature, hours) in self.entries.iter_mut().zip(repriced) {
            feature.hours = hours;
        }
        Ok(())
    }

    /// Partition entries into setup, feature and overhead groups.
    pub fn classify(&self) -> FeatureGroups<'_> {
        let mut groups = FeatureGroups {
            setup: Vec::new(),
            features: Vec::new(),
            overhead: Vec::new(),
        };
        for feature in &self.entries {
            match feature.group() {
                FeatureGroup::Setup => groups.setup.push(feature),
                FeatureGroup::Features => groups.features.push(feature),
                FeatureGroup::Overhead => groups.overhead.push(feature),
            }
        }
        groups
    }

    pub fn total_hours(&self) -> f64 {
        self.entries.iter().map(|f| f.hours).sum()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(EstimateError::InvalidInput(
            "feature name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Hours for one entry; a product that overflows is rejected.
fn price(cost_model: &CostModel, size: Size, quantity: f64) -> Result<f64> {
    let hours = cost_model.hours_for(size, quantity);
    if !hours.is_finite() {
        return Err(EstimateError::InvalidInput(format!(
            "{} x{} is out of range for the cost model ({} base hours, multiplier {})",
            size,
            quantity,
            cost_model.base_hours(size),
            cost_model.multiplier(size)
        )));
    }
    Ok(hours)
}

fn validate_total(total: f64) -> Result<()> {
    if !total.is_finite() {
        return Err(EstimateError::InvalidInput(
            "total effort is out of range".to_string(),
        ));
    }
    Ok(())
}

fn validate_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(EstimateError::InvalidInput(format!(
            "quantity multiplier must be a finite number > 0, got {}",
            quantity
        )));
    }
    Ok(())
}
