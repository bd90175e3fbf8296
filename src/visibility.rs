// src/visibility.rs
// Visible-set resolver: membership tracking and deterministic capped selection

use std::collections::HashSet;

use crate::config::TagId;
use crate::tracker::VisibilityEvent;

/// The set of tags currently reported inside the viewing region.
///
/// Membership updates are idempotent; selection is derived by walking
/// the feed in its configured order, so identical membership always
/// yields an identical selection regardless of detection order.
#[derive(Debug)]
pub struct VisibleSet {
    /// Tag ids in original feed order.
    order: Vec<TagId>,
    known: HashSet<TagId>,
    members: HashSet<TagId>,
}

impl VisibleSet {
    pub fn new(order: Vec<TagId>) -> Self {
        let known = order.iter().copied().collect();
        Self {
            order,
            known,
            members: HashSet::new(),
        }
    }

    /// Apply one enter/exit event. Returns whether membership actually
    /// changed; re-applying the same event is a no-op.
    pub fn apply(&mut self, event: VisibilityEvent) -> bool {
        if !self.known.contains(&event.tag_id) {
            tracing::debug!(tag_id = event.tag_id, "ignoring event for unknown tag");
            return false;
        }

        if event.is_visible {
            self.members.insert(event.tag_id)
        } else {
            self.members.remove(&event.tag_id)
        }
    }

    /// The capped selection: members in original feed order, truncated
    /// to the first `visible_count` entries. Positions are unique, so
    /// no tie-break is needed.
    pub fn selection(&self, visible_count: usize) -> Vec<TagId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.members.contains(id))
            .take(visible_count)
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(tag_id: TagId) -> VisibilityEvent {
        VisibilityEvent {
            tag_id,
            is_visible: true,
        }
    }

    fn hidden(tag_id: TagId) -> VisibilityEvent {
        VisibilityEvent {
            tag_id,
            is_visible: false,
        }
    }

    #[test]
    fn test_selection_sorted_by_feed_order_and_capped() {
        let mut set = VisibleSet::new(vec![0, 1, 2, 3, 4]);
        // Detection order deliberately scrambled.
        for id in [4, 1, 3, 0, 2] {
            assert!(set.apply(shown(id)));
        }

        assert_eq!(set.selection(5), vec![0, 1, 2, 3, 4]);
        assert_eq!(set.selection(3), vec![0, 1, 2]);
        assert_eq!(set.selection(100), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut set = VisibleSet::new(vec![0, 1]);
        assert!(set.apply(shown(1)));
        assert!(!set.apply(shown(1)));
        assert_eq!(set.selection(5), vec![1]);

        assert!(set.apply(hidden(1)));
        assert!(!set.apply(hidden(1)));
        assert!(set.selection(5).is_empty());
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut set = VisibleSet::new(vec![0, 1]);
        assert!(!set.apply(shown(7)));
        assert!(set.selection(5).is_empty());
    }

    #[test]
    fn test_cap_prefers_earliest_positions() {
        let mut set = VisibleSet::new(vec![0, 1, 2, 3]);
        set.apply(shown(3));
        set.apply(shown(1));
        set.apply(shown(2));
        assert_eq!(set.selection(2), vec![1, 2]);

        // Hiding an early member pulls the next position into the cap.
        set.apply(hidden(1));
        assert_eq!(set.selection(2), vec![2, 3]);
    }
}
