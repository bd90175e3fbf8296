// src/main.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use adrail::{
    AdPipeline, ChannelTracker, FeedConfig, KeywordTableProvider, LogSink, ResolutionEngine, TagId,
};

/// Drive the tag-feed ad pipeline from a scenario file.
///
/// Plays back a scripted sequence of visibility events and runtime
/// mutations against a feed config and one keyword-table provider per
/// inventory file (priority follows argument order), logging every
/// resolved outcome.
#[derive(Parser)]
#[command(name = "adrail", version)]
struct Args {
    /// Feed configuration JSON (tags, visible_count, spacing)
    #[arg(long, env = "ADRAIL_FEED")]
    feed: PathBuf,

    /// Ad inventory JSON files, one provider each, in priority order
    #[arg(long = "inventory", env = "ADRAIL_INVENTORY", required = true)]
    inventories: Vec<PathBuf>,

    /// Scenario JSON: an array of steps applied in order
    #[arg(long, env = "ADRAIL_SCENARIO")]
    scenario: PathBuf,

    /// Per-provider lookup timeout in milliseconds (0 = unbounded)
    #[arg(long, env = "ADRAIL_LOOKUP_TIMEOUT_MS", default_value_t = 0)]
    lookup_timeout_ms: u64,
}

/// One scripted step.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Show { tag_id: TagId },
    Hide { tag_id: TagId },
    SetVisibleCount { value: usize },
    SetSpacing { px: f64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = FeedConfig::from_json_file(&args.feed)?;
    info!(
        tags = config.tags().len(),
        visible_count = config.visible_count,
        "feed loaded"
    );

    let mut providers: Vec<Arc<dyn adrail::AdProvider>> = Vec::new();
    for path in &args.inventories {
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("inventory-{}", providers.len()));
        providers.push(Arc::new(KeywordTableProvider::from_json_file(id, path)?));
    }
    info!(providers = providers.len(), "inventories loaded");

    let mut engine = ResolutionEngine::new(providers);
    if args.lookup_timeout_ms > 0 {
        engine = engine.with_timeout(Duration::from_millis(args.lookup_timeout_ms));
    }

    let mut pipeline = AdPipeline::new(config, engine, Arc::new(LogSink))?;

    let steps: Vec<Step> = serde_json::from_str(&std::fs::read_to_string(&args.scenario)?)?;

    let (mut tracker, handle) = ChannelTracker::new(64);
    let mut events = pipeline.start(&mut tracker)?;

    for step in steps {
        match step {
            Step::Show { tag_id } => {
                handle.emit(tag_id, true).await?;
                if let Some(event) = events.recv().await {
                    pipeline.on_visibility_event(event);
                }
            }
            Step::Hide { tag_id } => {
                handle.emit(tag_id, false).await?;
                if let Some(event) = events.recv().await {
                    pipeline.on_visibility_event(event);
                }
            }
            Step::SetVisibleCount { value } => pipeline.update_visible_count(value)?,
            Step::SetSpacing { px } => pipeline.update_spacing(px),
        }
    }

    pipeline.drain().await;
    info!("scenario complete");
    Ok(())
}
