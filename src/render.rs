// src/render.rs
// Render sink boundary and resolution outcomes

use async_trait::async_trait;
use serde::Serialize;

/// Why a resolution run produced no ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoAdReason {
    /// No visible tags, so no keywords to match against.
    EmptyPool,
    /// Every provider declined.
    NoMatch,
}

/// Final result of one resolution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AdOutcome {
    Rendered { provider_id: String, html: String },
    #[serde(rename = "none")]
    NoAd { reason: NoAdReason },
}

/// Paints an outcome. Fire-and-forget: the pipeline consumes no return
/// value and never retries a render.
///
/// Provider html reaches this boundary as untrusted passthrough; any
/// sanitization is the sink's responsibility, not silently assumed.
#[async_trait]
pub trait RenderSink: Send + Sync {
    async fn render(&self, outcome: AdOutcome);

    /// Spacing passthrough from `update_spacing`. Has no effect on
    /// selection or resolution.
    fn set_spacing(&self, _px: f64) {}
}

/// Sink that logs outcomes instead of painting them. Used by the
/// scenario binary.
pub struct LogSink;

#[async_trait]
impl RenderSink for LogSink {
    async fn render(&self, outcome: AdOutcome) {
        match serde_json::to_string(&outcome) {
            Ok(json) => tracing::info!(outcome = %json, "render"),
            Err(e) => tracing::error!("failed to serialize outcome: {}", e),
        }
    }

    fn set_spacing(&self, px: f64) {
        tracing::info!(px, "spacing updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization_shape() {
        let rendered = AdOutcome::Rendered {
            provider_id: "P2".into(),
            html: "<div>ad</div>".into(),
        };
        let json = serde_json::to_value(&rendered).expect("serialize");
        assert_eq!(json["kind"], "rendered");
        assert_eq!(json["provider_id"], "P2");

        let none = AdOutcome::NoAd {
            reason: NoAdReason::EmptyPool,
        };
        let json = serde_json::to_value(&none).expect("serialize");
        assert_eq!(json["kind"], "none");
        assert_eq!(json["reason"], "empty-pool");
    }
}
