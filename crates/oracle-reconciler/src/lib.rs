pub mod candidate;
pub mod condition;
pub mod constants;
pub mod counter;
pub mod error;
pub mod participant;
pub mod reconcile;

pub use error::ReconcileError;
pub use reconcile::run_reconcile;
