// src/provider/engine.rs
// Sequential provider fallback: first non-empty match wins

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;

use super::{AdProvider, LogFailureObserver, ProviderFailureObserver};
use crate::render::{AdOutcome, NoAdReason};

/// Resolves one [`AdOutcome`] per keyword pool by walking a prioritized
/// provider list.
///
/// Providers are tried strictly sequentially, never in parallel, so an
/// identical pool with identical provider responses always produces the
/// same call sequence and the same outcome.
pub struct ResolutionEngine {
    providers: Vec<Arc<dyn AdProvider>>,
    observer: Arc<dyn ProviderFailureObserver>,
    lookup_timeout: Option<Duration>,
}

impl ResolutionEngine {
    pub fn new(providers: Vec<Arc<dyn AdProvider>>) -> Self {
        Self {
            providers,
            observer: Arc::new(LogFailureObserver),
            lookup_timeout: None,
        }
    }

    /// Replace the default failure observer.
    pub fn with_observer(mut self, observer: Arc<dyn ProviderFailureObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Bound each provider lookup. Off by default; a timed-out lookup
    /// is reported like a failure and the next provider is tried.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.lookup_timeout = Some(limit);
        self
    }

    pub async fn resolve(&self, pool: &[String]) -> AdOutcome {
        if pool.is_empty() {
            // Short-circuit: no keywords means no provider can match.
            return AdOutcome::NoAd {
                reason: NoAdReason::EmptyPool,
            };
        }

        for provider in &self.providers {
            let looked_up = match self.lookup_timeout {
                Some(limit) => match tokio::time::timeout(limit, provider.lookup(pool)).await {
                    Ok(result) => result,
                    Err(_) => Err(anyhow!("lookup timed out after {:?}", limit)),
                },
                None => provider.lookup(pool).await,
            };

            match looked_up {
                Ok(Some(creative)) if !creative.html.is_empty() => {
                    tracing::debug!(provider = provider.id(), "provider matched");
                    return AdOutcome::Rendered {
                        provider_id: provider.id().to_string(),
                        html: creative.html,
                    };
                }
                Ok(_) => {
                    // Declined, or matched with empty markup. Not an error.
                    tracing::debug!(provider = provider.id(), "provider declined");
                }
                Err(e) => {
                    // Isolated: behaviorally a decline, separately reportable.
                    self.observer.provider_failed(provider.id(), &e);
                }
            }
        }

        AdOutcome::NoAd {
            reason: NoAdReason::NoMatch,
        }
    }
}
