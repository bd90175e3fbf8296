// src/keywords.rs
// Keyword pool derivation from the visible selection

use crate::config::{FeedConfig, TagId};

/// Flatten the selected tags' keyword sequences, in selection order.
///
/// Duplicates are preserved: downstream matching may treat keyword
/// count as a relevance signal. An empty selection yields an empty
/// pool, which is a meaningful state (no visible tags), not an error.
pub fn aggregate(selection: &[TagId], config: &FeedConfig) -> Vec<String> {
    let mut pool = Vec::new();
    for id in selection {
        if let Some(tag) = config.tag(*id) {
            pool.extend(tag.keywords.iter().cloned());
        }
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FeedConfig {
        FeedConfig::from_items(vec![
            ("AI".into(), vec!["ai".into(), "ml".into()]),
            ("Travel".into(), vec!["travel".into()]),
            ("More AI".into(), vec!["ai".into()]),
        ])
    }

    #[test]
    fn test_pool_follows_selection_order() {
        let pool = aggregate(&[1, 0], &config());
        assert_eq!(pool, vec!["travel", "ai", "ml"]);
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let pool = aggregate(&[0, 2], &config());
        assert_eq!(pool, vec!["ai", "ml", "ai"]);
    }

    #[test]
    fn test_empty_selection_yields_empty_pool() {
        assert!(aggregate(&[], &config()).is_empty());
    }
}
