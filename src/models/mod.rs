//! Domain models for the effort estimator.
//!
//! # Core Concepts
//!
//! - [`Size`]: T-shirt size of a feature (XS through XL).
//! - [`CostModel`]: Base hours and multiplier per size; prices features.
//! - [`Feature`]: One sized, weighted entry in a project's ledger.
//! - [`FeatureGroup`]: Setup / feature / overhead grouping by module name.
//! - [`ProjectRecord`]: Everything persisted for one project, including
//!   passthrough fields ([`EstimationInclusions`], [`InclusionComments`],
//!   [`TechnicalNotes`]) that the effort model stores but never interprets.
//! - [`SizeSuggestion`]: Result of asking a provider to size a feature.

mod cost_model;
mod feature;
mod project;
mod size;
mod suggestion;

pub use cost_model::*;
pub use feature::*;
pub use project::*;
pub use size::*;
pub use suggestion::*;
