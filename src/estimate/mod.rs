//! The effort aggregation model.
//!
//! - [`FeatureLedger`]: ordered features, priced against a [`CostModel`](crate::models::CostModel).
//! - [`EstimationSession`]: binds a cost model and ledger to a project and
//!   keeps the project total current.
//! - [`ProjectStore`]: where sessions are loaded from and saved to.

mod ledger;
mod session;
mod store;

pub use ledger::FeatureLedger;
pub use session::{EstimateView, EstimationSession, GroupView};
pub use store::ProjectStore;
