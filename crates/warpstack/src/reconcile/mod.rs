//! The diff-and-converge core: topology split, metadata derivation, router
//! and gas map reconciliation, and transaction dispatch.

pub mod engine;
pub mod error;
pub mod gas;
pub mod merge;
pub mod metadata;
pub mod submit;
pub mod topology;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{ReconcilePlan, WarpApplyEngine};
pub use error::{ChainFailure, ReconcileError};
pub use submit::{DispatchOutcome, TransactionDispatcher};
