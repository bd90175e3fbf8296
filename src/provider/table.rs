// src/provider/table.rs
// Inventory-backed reference provider

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{AdCreative, AdProvider};

/// One sellable creative, keyed by a single targeting keyword.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    pub keyword: String,
    pub html: String,
}

/// Provider backed by a static keyword → creative table.
///
/// Scores each line item by how often its keyword occurs in the pool
/// (duplicates count, which is why the aggregator preserves them) and
/// returns the best-scoring creative. Ties go to the line item
/// configured first. Keyword comparison is ASCII case-insensitive.
pub struct KeywordTableProvider {
    id: String,
    inventory: Vec<LineItem>,
}

impl KeywordTableProvider {
    pub fn new(id: impl Into<String>, inventory: Vec<LineItem>) -> Self {
        Self {
            id: id.into(),
            inventory,
        }
    }

    /// Load an inventory from a JSON array of line items.
    pub fn from_json_str(id: impl Into<String>, json: &str) -> Result<Self> {
        let inventory: Vec<LineItem> =
            serde_json::from_str(json).context("malformed inventory JSON")?;
        Ok(Self::new(id, inventory))
    }

    pub fn from_json_file(id: impl Into<String>, path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read inventory {}", path.display()))?;
        Self::from_json_str(id, &json)
    }
}

#[async_trait]
impl AdProvider for KeywordTableProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn lookup(&self, pool: &[String]) -> Result<Option<AdCreative>> {
        let mut best: Option<(usize, &LineItem)> = None;
        for item in &self.inventory {
            let hits = pool
                .iter()
                .filter(|keyword| keyword.eq_ignore_ascii_case(&item.keyword))
                .count();
            if hits == 0 {
                continue;
            }
            match best {
                Some((top, _)) if top >= hits => {}
                _ => best = Some((hits, item)),
            }
        }

        Ok(best.map(|(_, item)| AdCreative {
            html: item.html.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> KeywordTableProvider {
        KeywordTableProvider::from_json_str(
            "house",
            r#"[
                {"keyword": "ai", "html": "<div>ai ad</div>"},
                {"keyword": "travel", "html": "<div>travel ad</div>"}
            ]"#,
        )
        .expect("valid inventory")
    }

    fn pool(keywords: &[&str]) -> Vec<String> {
        keywords.iter().map(|k| k.to_string()).collect()
    }

    #[tokio::test]
    async fn test_highest_keyword_count_wins() {
        let result = provider()
            .lookup(&pool(&["travel", "ai", "travel"]))
            .await
            .expect("lookup");
        assert_eq!(result.unwrap().html, "<div>travel ad</div>");
    }

    #[tokio::test]
    async fn test_tie_goes_to_earliest_line_item() {
        let result = provider()
            .lookup(&pool(&["travel", "ai"]))
            .await
            .expect("lookup");
        assert_eq!(result.unwrap().html, "<div>ai ad</div>");
    }

    #[tokio::test]
    async fn test_no_overlap_declines() {
        let result = provider().lookup(&pool(&["cooking"])).await.expect("lookup");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_matching_is_case_insensitive() {
        let result = provider().lookup(&pool(&["AI"])).await.expect("lookup");
        assert_eq!(result.unwrap().html, "<div>ai ad</div>");
    }
}
