use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::size::Size;
use crate::error::{EstimateError, Result};

const DEFAULT_BASE_HOURS: [(Size, f64); 5] = [
    (Size::XS, 10.0),
    (Size::S, 20.0),
    (Size::M, 30.0),
    (Size::L, 40.0),
    (Size::XL, 50.0),
];

const DEFAULT_MULTIPLIERS: [(Size, f64); 5] = [
    (Size::XS, 0.5),
    (Size::S, 1.0),
    (Size::M, 2.0),
    (Size::L, 3.0),
    (Size::XL, 5.0),
];

/// Converts a feature's size and quantity into effort hours.
///
/// Hours for a feature are `base_hours[size] * quantity * size_multiplier[size]`.
/// Every size always has a base-hours entry; multipliers are strictly positive.
/// A size without a multiplier entry is priced with a multiplier of 1.
///
/// The model is owned by a single estimation session and passed explicitly to
/// ledger operations that need to price features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredCostModel")]
pub struct CostModel {
    base_hours: BTreeMap<Size, f64>,
    size_multipliers: BTreeMap<Size, f64>,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            base_hours: DEFAULT_BASE_HOURS.into_iter().collect(),
            size_multipliers: DEFAULT_MULTIPLIERS.into_iter().collect(),
        }
    }
}

impl CostModel {
    /// Rebuild a model from stored tables.
    ///
    /// Sizes missing from either table take the default value; stored values
    /// that violate the model's constraints are rejected.
    pub fn from_tables(
        base_hours: &BTreeMap<Size, f64>,
        size_multipliers: &BTreeMap<Size, f64>,
    ) -> Result<Self> {
        let mut model = Self::default();
        for (&size, &value) in base_hours {
            model.set_base_hours(size, value)?;
        }
        for (&size, &value) in size_multipliers {
            model.set_multiplier(size, value)?;
        }
        Ok(model)
    }

    pub fn base_hours(&self, size: Size) -> f64 {
        self.base_hours.get(&size).copied().unwrap_or(0.0)
    }

    pub fn multiplier(&self, size: Size) -> f64 {
        self.size_multipliers.get(&size).copied().unwrap_or(1.0)
    }

    pub fn base_hours_table(&self) -> &BTreeMap<Size, f64> {
        &self.base_hours
    }

    pub fn multiplier_table(&self) -> &BTreeMap<Size, f64> {
        &self.size_multipliers
    }

    pub fn set_base_hours(&mut self, size: Size, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(EstimateError::InvalidConfiguration(format!(
                "base hours for {} must be a finite number >= 0, got {}",
                size, value
            )));
        }
        self.base_hours.insert(size, value);
        Ok(())
    }

    pub fn set_multiplier(&mut self, size: Size, value: f64) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(EstimateError::InvalidConfiguration(format!(
                "multiplier for {} must be a finite number > 0, got {}",
                size, value
            )));
        }
        self.size_multipliers.insert(size, value);
        Ok(())
    }

    /// Effort hours for `quantity` units of a feature of the given size.
    pub fn hours_for(&self, size: Size, quantity: f64) -> f64 {
        self.base_hours(size) * quantity * self.multiplier(size)
    }

    /// Like [`hours_for`](Self::hours_for) for a textual size label.
    /// Unrecognized labels price at zero.
    pub fn hours_for_label(&self, label: &str, quantity: f64) -> f64 {
        match Size::from_str(label) {
            Some(size) => self.hours_for(size, quantity),
            None => 0.0,
        }
    }
}

/// Stored shape of a cost model; either table may be partial or absent.
#[derive(Debug, Clone, Default, Deserialize)]
struct StoredCostModel {
    #[serde(default)]
    base_hours: BTreeMap<Size, f64>,
    #[serde(default)]
    size_multipliers: BTreeMap<Size, f64>,
}

impl TryFrom<StoredCostModel> for CostModel {
    type Error = EstimateError;

    fn try_from(stored: StoredCostModel) -> Result<Self> {
        Self::from_tables(&stored.base_hours, &stored.size_multipliers)
    }
}

/// Input for changing a project's cost model. Only listed sizes are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCostModelInput {
    #[serde(default)]
    pub base_hours: BTreeMap<Size, f64>,
    #[serde(default)]
    pub size_multipliers: BTreeMap<Size, f64>,
    /// Re-price every existing feature against the updated model.
    #[serde(default)]
    pub reprice: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let model = CostModel::default();
        assert_eq!(model.base_hours(Size::XS), 10.0);
        assert_eq!(model.base_hours(Size::XL), 50.0);
        assert_eq!(model.multiplier(Size::XS), 0.5);
        assert_eq!(model.multiplier(Size::XL), 5.0);
    }

    #[test]
    fn test_hours_for_matches_formula_for_every_size() {
        let model = CostModel::default();
        for size in Size::ALL {
            for quantity in [0.5, 1.0, 2.0, 3.5] {
                assert_eq!(
                    model.hours_for(size, quantity),
                    model.base_hours(size) * quantity * model.multiplier(size)
                );
            }
        }
    }

    #[test]
    fn test_hours_for_small_feature() {
        assert_eq!(CostModel::default().hours_for(Size::S, 2.0), 40.0);
    }

    #[test]
    fn test_unknown_label_prices_at_zero() {
        let model = CostModel::default();
        assert_eq!(model.hours_for_label("XXL", 3.0), 0.0);
        assert_eq!(model.hours_for_label("M", 1.0), 60.0);
    }

    #[test]
    fn test_rejects_negative_base_hours() {
        let mut model = CostModel::default();
        assert!(matches!(
            model.set_base_hours(Size::M, -1.0),
            Err(EstimateError::InvalidConfiguration(_))
        ));
        assert!(model.set_base_hours(Size::M, f64::NAN).is_err());
        assert_eq!(model.base_hours(Size::M), 30.0);
    }

    #[test]
    fn test_zero_base_hours_is_allowed() {
        let mut model = CostModel::default();
        model.set_base_hours(Size::XS, 0.0).unwrap();
        assert_eq!(model.hours_for(Size::XS, 4.0), 0.0);
    }

    #[test]
    fn test_rejects_non_positive_multiplier() {
        let mut model = CostModel::default();
        assert!(model.set_multiplier(Size::L, 0.0).is_err());
        assert!(model.set_multiplier(Size::L, -2.0).is_err());
        assert!(model.set_multiplier(Size::L, f64::INFINITY).is_err());
        assert_eq!(model.multiplier(Size::L), 3.0);
    }

    #[test]
    fn test_partial_stored_tables_fall_back_to_defaults() {
        let model: CostModel =
            serde_json::from_str(r#"{"base_hours":{"M":35.0}}"#).unwrap();
        assert_eq!(model.base_hours(Size::M), 35.0);
        assert_eq!(model.base_hours(Size::S), 20.0);
        assert_eq!(model.multiplier(Size::M), 2.0);
    }

    #[test]
    fn test_invalid_stored_multiplier_is_rejected() {
        let result: std::result::Result<CostModel, _> =
            serde_json::from_str(r#"{"size_multipliers":{"S":0.0}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialized_form_reloads_identically() {
        let mut model = CostModel::default();
        model.set_base_hours(Size::L, 44.0).unwrap();
        model.set_multiplier(Size::XS, 0.75).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let reloaded: CostModel = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, model);
    }
}
