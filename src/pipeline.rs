// src/pipeline.rs
// Pipeline assembly: visibility events in, generation-guarded outcomes out

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::{FeedConfig, TagId};
use crate::error::PipelineError;
use crate::keywords;
use crate::provider::ResolutionEngine;
use crate::render::RenderSink;
use crate::tracker::{ViewportTracker, VisibilityEvent};
use crate::visibility::VisibleSet;

/// One owned pipeline instance: configuration, membership set, and the
/// resolution generation counter live here, never in module-level state.
///
/// Mutating operations take `&mut self`, which pins event processing to
/// one caller at a time. Resolution runs are spawned so a slow provider
/// chain never blocks the event stream; the generation guard ensures
/// only the latest-started run reaches the render sink.
pub struct AdPipeline {
    config: FeedConfig,
    visible: VisibleSet,
    engine: Arc<ResolutionEngine>,
    sink: Arc<dyn RenderSink>,
    /// Generation of the most recently started resolution run.
    generation: Arc<AtomicU64>,
    inflight: JoinSet<()>,
}

impl AdPipeline {
    pub fn new(
        config: FeedConfig,
        engine: ResolutionEngine,
        sink: Arc<dyn RenderSink>,
    ) -> Result<Self, PipelineError> {
        if config.visible_count == 0 {
            return Err(PipelineError::InvalidConfig(
                "visible_count must be at least 1".into(),
            ));
        }

        sink.set_spacing(config.spacing);
        let visible = VisibleSet::new(config.tags().iter().map(|t| t.id).collect());

        Ok(Self {
            config,
            visible,
            engine: Arc::new(engine),
            sink,
            generation: Arc::new(AtomicU64::new(0)),
            inflight: JoinSet::new(),
        })
    }

    /// Register every tag with the tracker and take its event stream.
    /// Any collaborator failure aborts startup with [`PipelineError::Init`].
    pub fn start<T: ViewportTracker>(
        &mut self,
        tracker: &mut T,
    ) -> Result<mpsc::Receiver<VisibilityEvent>, PipelineError> {
        for tag in self.config.tags() {
            tracker.observe(tag.id).map_err(PipelineError::Init)?;
        }
        tracker.events().map_err(PipelineError::Init)
    }

    /// Convenience loop: start, consume the tracker's events to
    /// completion, then wait for in-flight resolutions.
    pub async fn run<T: ViewportTracker>(mut self, mut tracker: T) -> Result<(), PipelineError> {
        let mut events = self.start(&mut tracker)?;
        while let Some(event) = events.recv().await {
            self.on_visibility_event(event);
        }
        self.drain().await;
        Ok(())
    }

    /// Process one tracker event, in arrival order. A membership change
    /// dispatches exactly one resolution run; redundant events (and
    /// events for unknown tags) dispatch nothing.
    pub fn on_visibility_event(&mut self, event: VisibilityEvent) {
        if self.visible.apply(event) {
            self.dispatch();
        }
    }

    /// Replace the selection cap and immediately recompute from current
    /// membership, without waiting for a new visibility event.
    pub fn update_visible_count(&mut self, n: usize) -> Result<(), PipelineError> {
        if n == 0 {
            return Err(PipelineError::InvalidConfig(
                "visible_count must be at least 1".into(),
            ));
        }
        self.config.visible_count = n;
        self.dispatch();
        Ok(())
    }

    /// Spacing is rendering plumbing: stored, forwarded to the sink,
    /// never consulted by selection or resolution.
    pub fn update_spacing(&mut self, px: f64) {
        self.config.spacing = px;
        self.sink.set_spacing(px);
    }

    /// The current capped selection, in original feed order.
    pub fn selection(&self) -> Vec<TagId> {
        self.visible.selection(self.config.visible_count)
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    fn dispatch(&mut self) {
        // Reap finished runs so the in-flight set stays bounded.
        while self.inflight.try_join_next().is_some() {}

        let selection = self.selection();
        let pool = keywords::aggregate(&selection, &self.config);
        let run = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(
            run,
            visible = selection.len(),
            keywords = pool.len(),
            "dispatching resolution"
        );

        let latest = Arc::clone(&self.generation);
        let engine = Arc::clone(&self.engine);
        let sink = Arc::clone(&self.sink);
        self.inflight.spawn(async move {
            let outcome = engine.resolve(&pool).await;
            // Latest-started run wins; completion order is irrelevant.
            if latest.load(Ordering::SeqCst) == run {
                sink.render(outcome).await;
            } else {
                tracing::debug!(run, "discarding superseded resolution");
            }
        });
    }

    /// Wait for every in-flight resolution run. Superseded runs still
    /// complete here; the generation guard keeps their outcomes away
    /// from the sink.
    pub async fn drain(&mut self) {
        while self.inflight.join_next().await.is_some() {}
    }
}
