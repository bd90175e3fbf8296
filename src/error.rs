// src/error.rs
// Error taxonomy for the ad pipeline

use thiserror::Error;

/// Errors surfaced to callers of the pipeline.
///
/// Provider lookup failures are deliberately absent: the resolution
/// engine recovers them locally and reports them to the failure
/// observer, so they never reach the caller or the render sink.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed configuration or mutator input. Fatal to the failing
    /// call only; pipeline state is left untouched.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A required collaborator could not be resolved at startup. The
    /// pipeline does not start.
    #[error("Init failed: {0}")]
    Init(#[source] anyhow::Error),
}
