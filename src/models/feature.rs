use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::size::Size;

/// Modules whose features count as project setup work.
pub const SETUP_MODULES: [&str; 4] = [
    "Setup Technology Stack Selection",
    "Develop Processes",
    "Code Setup",
    "DevOps Setup",
];

/// Modules whose features count as overhead on top of feature work.
pub const OVERHEAD_MODULES: [&str; 2] = ["Buffer", "PMO Activities"];

/// A sized, weighted unit of work in a project's estimate.
///
/// `hours` is derived from the cost model at the moment the entry was last
/// priced. It is stored verbatim and does not follow later cost model changes
/// until the entry is explicitly re-priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: Uuid,
    /// Free-text grouping label; decides the [`FeatureGroup`].
    pub module: String,
    pub name: String,
    /// Repetition or extra-complexity count for this feature instance.
    pub quantity_multiplier: f64,
    pub size: Size,
    pub hours: f64,
}

impl Feature {
    pub fn group(&self) -> FeatureGroup {
        FeatureGroup::for_module(&self.module)
    }
}

/// Presentation grouping of ledger entries, decided by module name.
///
/// - `Setup`: technology selection, process and environment setup
/// - `Features`: everything that is not setup or overhead
/// - `Overhead`: buffer and project management activities
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeatureGroup {
    Setup,
    Features,
    Overhead,
}

impl FeatureGroup {
    pub fn for_module(module: &str) -> Self {
        if SETUP_MODULES.contains(&module) {
            Self::Setup
        } else if OVERHEAD_MODULES.contains(&module) {
            Self::Overhead
        } else {
            Self::Features
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Features => "features",
            Self::Overhead => "overhead",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Setup => "Basic Setup",
            Self::Features => "Features",
            Self::Overhead => "Additional Activities",
        }
    }
}

/// Input for adding a feature to a ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeatureInput {
    pub module: String,
    pub name: String,
    pub size: Size,
    /// Defaults to 1 when not specified.
    #[serde(default = "default_quantity")]
    pub quantity_multiplier: f64,
}

fn default_quantity() -> f64 {
    1.0
}

/// Input for updating a feature. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFeatureInput {
    pub module: Option<String>,
    pub name: Option<String>,
    pub size: Option<Size>,
    pub quantity_multiplier: Option<f64>,
}

/// Ledger entries partitioned by [`FeatureGroup`], each group in ledger order.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureGroups<'a> {
    pub setup: Vec<&'a Feature>,
    pub features: Vec<&'a Feature>,
    pub overhead: Vec<&'a Feature>,
}

impl<'a> FeatureGroups<'a> {
    pub fn get(&self, group: FeatureGroup) -> &[&'a Feature] {
        match group {
            FeatureGroup::Setup => &self.setup,
            FeatureGroup::Features => &self.features,
            FeatureGroup::Overhead => &self.overhead,
        }
    }

    /// Sum of hours within one group.
    pub fn hours(&self, group: FeatureGroup) -> f64 {
        self.get(group).iter().map(|f| f.hours).sum()
    }

    /// Groups in display order, paired with their entries.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureGroup, &[&'a Feature])> {
        [FeatureGroup::Setup, FeatureGroup::Features, FeatureGroup::Overhead]
            .into_iter()
            .map(move |g| (g, self.get(g)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_for_module() {
        assert_eq!(FeatureGroup::for_module("Code Setup"), FeatureGroup::Setup);
        assert_eq!(FeatureGroup::for_module("DevOps Setup"), FeatureGroup::Setup);
        assert_eq!(FeatureGroup::for_module("Buffer"), FeatureGroup::Overhead);
        assert_eq!(FeatureGroup::for_module("PMO Activities"), FeatureGroup::Overhead);
        assert_eq!(FeatureGroup::for_module("Custom Login"), FeatureGroup::Features);
    }

    #[test]
    fn test_module_match_is_exact() {
        assert_eq!(FeatureGroup::for_module("buffer"), FeatureGroup::Features);
        assert_eq!(FeatureGroup::for_module(" Code Setup"), FeatureGroup::Features);
    }

    #[test]
    fn test_create_input_defaults_quantity() {
        let input: CreateFeatureInput =
            serde_json::from_str(r#"{"module":"UI","name":"Button","size":"S"}"#).unwrap();
        assert_eq!(input.quantity_multiplier, 1.0);
        assert_eq!(input.size, Size::S);
    }
}
