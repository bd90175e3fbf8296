// src/tracker.rs
// Viewport tracker boundary: per-tag enter/exit events

use std::collections::HashSet;

use anyhow::{Result, bail};
use tokio::sync::mpsc;

use crate::config::TagId;

/// A single enter/exit report for a tracked tag. Transient: produced by
/// the tracker, consumed once by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEvent {
    pub tag_id: TagId,
    pub is_visible: bool,
}

/// Boundary to the visibility-detection primitive.
///
/// The pipeline registers every tag at startup and then consumes the
/// event stream; it never does intersection math itself. Events must be
/// delivered in the order they were detected.
pub trait ViewportTracker: Send {
    /// Start tracking a tag. Failures here abort pipeline startup.
    fn observe(&mut self, tag_id: TagId) -> Result<()>;

    /// Stop tracking a tag.
    fn unobserve(&mut self, tag_id: TagId);

    /// Hand over the event stream. Yields each event exactly once;
    /// callable exactly once.
    fn events(&mut self) -> Result<mpsc::Receiver<VisibilityEvent>>;
}

/// Channel-backed tracker for tests and scenario playback.
///
/// Visibility is injected through a [`TrackerHandle`] instead of being
/// detected; the stream ends once every handle has been dropped.
pub struct ChannelTracker {
    tx: Option<mpsc::Sender<VisibilityEvent>>,
    rx: Option<mpsc::Receiver<VisibilityEvent>>,
    observed: HashSet<TagId>,
}

impl ChannelTracker {
    pub fn new(capacity: usize) -> (Self, TrackerHandle) {
        let (tx, rx) = mpsc::channel(capacity);
        let tracker = Self {
            tx: Some(tx.clone()),
            rx: Some(rx),
            observed: HashSet::new(),
        };
        (tracker, TrackerHandle { tx })
    }

    pub fn is_observed(&self, tag_id: TagId) -> bool {
        self.observed.contains(&tag_id)
    }
}

impl ViewportTracker for ChannelTracker {
    fn observe(&mut self, tag_id: TagId) -> Result<()> {
        self.observed.insert(tag_id);
        Ok(())
    }

    fn unobserve(&mut self, tag_id: TagId) {
        self.observed.remove(&tag_id);
    }

    fn events(&mut self) -> Result<mpsc::Receiver<VisibilityEvent>> {
        // Drop our own sender so the stream closes with the last handle.
        self.tx = None;
        match self.rx.take() {
            Some(rx) => Ok(rx),
            None => bail!("tracker event stream was already taken"),
        }
    }
}

/// Injection side of a [`ChannelTracker`].
#[derive(Clone)]
pub struct TrackerHandle {
    tx: mpsc::Sender<VisibilityEvent>,
}

impl TrackerHandle {
    pub async fn emit(&self, tag_id: TagId, is_visible: bool) -> Result<()> {
        self.tx
            .send(VisibilityEvent { tag_id, is_visible })
            .await
            .map_err(|_| anyhow::anyhow!("tracker event stream is closed"))
    }
}
