use thiserror::Error;
use warpstack_cli_config::ConfigValidationError;

/// Fatal reconciliation errors. All three variants abort before any chain
/// is touched; failures scoped to a single chain are captured as
/// [`ChainFailure`] records instead and never raised through this type.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    ConfigValidation(#[from] ConfigValidationError),

    #[error("cannot derive token metadata: {0}")]
    MissingTokenMetadata(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single chain's update computation or submission failed after retries.
/// Recovered locally: logged, counted, and surfaced in the final summary.
#[derive(Debug)]
pub struct ChainFailure {
    pub chain: String,
    pub error: anyhow::Error,
}

impl ChainFailure {
    pub fn new(chain: impl Into<String>, error: anyhow::Error) -> Self {
        Self {
            chain: chain.into(),
            error,
        }
    }
}
