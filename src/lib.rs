// src/lib.rs

pub mod config;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod tracker;
pub mod visibility;

// Export the pipeline surface
pub use config::{FeedConfig, Tag, TagId};
pub use error::PipelineError;
pub use pipeline::AdPipeline;
pub use provider::{
    AdCreative, AdProvider, KeywordTableProvider, LogFailureObserver, ProviderFailureObserver,
    ResolutionEngine,
};
pub use render::{AdOutcome, LogSink, NoAdReason, RenderSink};
pub use tracker::{ChannelTracker, TrackerHandle, ViewportTracker, VisibilityEvent};
