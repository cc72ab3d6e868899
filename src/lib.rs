//! T-shirt size effort estimation.
//!
//! Features are sized XS through XL, priced by a per-project [`models::CostModel`],
//! collected in a [`estimate::FeatureLedger`] and totalled by an
//! [`estimate::EstimationSession`] that persists through a
//! [`estimate::ProjectStore`] such as the SQLite [`db::Database`].

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod estimate;
pub mod models;
pub mod report;
pub mod suggest;
