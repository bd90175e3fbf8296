// src/config.rs
// Feed configuration: tag data model, JSON loading, validation

use serde::Deserialize;
use std::path::Path;

use crate::error::PipelineError;

/// Stable identifier of a tag, assigned at load time.
pub type TagId = u64;

/// Cap applied to the visible selection when none is configured.
pub const DEFAULT_VISIBLE_COUNT: usize = 5;

/// A feed item carrying display text and targeting keywords.
///
/// Ids are assigned by the loader from the tag's position in the feed
/// (0-based), so ascending id order is original feed order. Tags are
/// immutable after load; the pipeline never removes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub text: String,
    pub keywords: Vec<String>,
}

/// On-disk shape of a tag. Ids are not part of the input.
#[derive(Debug, Clone, Deserialize)]
struct TagSpec {
    text: String,
    #[serde(default)]
    keywords: Vec<String>,
}

/// On-disk shape of the feed configuration.
#[derive(Debug, Clone, Deserialize)]
struct FeedConfigSpec {
    #[serde(default = "default_visible_count")]
    visible_count: usize,
    #[serde(default)]
    spacing: f64,
    tags: Vec<TagSpec>,
}

fn default_visible_count() -> usize {
    DEFAULT_VISIBLE_COUNT
}

/// Validated feed configuration, owned exclusively by the pipeline.
///
/// `spacing` is opaque to the selection and resolution logic; it is
/// stored and forwarded to the render sink unchanged.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub visible_count: usize,
    pub spacing: f64,
    tags: Vec<Tag>,
}

impl FeedConfig {
    /// Build a config from in-memory `(text, keywords)` pairs.
    /// Ids are assigned by position.
    pub fn from_items(items: Vec<(String, Vec<String>)>) -> Self {
        let tags = items
            .into_iter()
            .enumerate()
            .map(|(position, (text, keywords))| Tag {
                id: position as TagId,
                text,
                keywords,
            })
            .collect();

        Self {
            visible_count: DEFAULT_VISIBLE_COUNT,
            spacing: 0.0,
            tags,
        }
    }

    /// Parse and validate a feed configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let spec: FeedConfigSpec = serde_json::from_str(json)
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;
        Self::from_spec(spec)
    }

    /// Parse and validate a feed configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, PipelineError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    fn from_spec(spec: FeedConfigSpec) -> Result<Self, PipelineError> {
        if spec.visible_count == 0 {
            return Err(PipelineError::InvalidConfig(
                "visible_count must be at least 1".into(),
            ));
        }

        let tags = spec
            .tags
            .into_iter()
            .enumerate()
            .map(|(position, tag)| Tag {
                id: position as TagId,
                text: tag.text,
                keywords: tag.keywords,
            })
            .collect();

        Ok(Self {
            visible_count: spec.visible_count,
            spacing: spec.spacing,
            tags,
        })
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Look up a tag by id. Ids are positional, so this is O(1).
    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(id as usize)
    }
}
