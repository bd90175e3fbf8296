//! Ad provider abstraction
//!
//! Providers are queried by the resolution engine in declared priority
//! order. A provider either returns a creative, declines, or fails;
//! failures are isolated by the engine and reported through
//! [`ProviderFailureObserver`].

mod engine;
mod table;

pub use engine::ResolutionEngine;
pub use table::{KeywordTableProvider, LineItem};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Provider-supplied ad markup.
///
/// Untrusted passthrough: the pipeline never parses it, only hands it
/// to the render sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCreative {
    pub html: String,
}

/// A single ad source.
#[async_trait]
pub trait AdProvider: Send + Sync {
    /// Stable identifier used in outcomes and failure reports.
    fn id(&self) -> &str;

    /// Look up a creative for the keyword pool. `Ok(None)` means the
    /// provider declined, which is not an error. Must settle; must not
    /// mutate the pool.
    async fn lookup(&self, pool: &[String]) -> Result<Option<AdCreative>>;
}

/// Observability collaborator for provider failures. Failures never
/// surface to the render sink or the pipeline's caller.
pub trait ProviderFailureObserver: Send + Sync {
    fn provider_failed(&self, provider_id: &str, error: &anyhow::Error);
}

/// Default observer: a structured warning log, nothing else.
pub struct LogFailureObserver;

impl ProviderFailureObserver for LogFailureObserver {
    fn provider_failed(&self, provider_id: &str, error: &anyhow::Error) {
        tracing::warn!(provider = provider_id, "provider lookup failed: {:#}", error);
    }
}
