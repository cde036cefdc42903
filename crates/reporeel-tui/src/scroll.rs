// Infinite scroll trigger
//
// The terminal has no intersection observer, so the "sentinel" is the slot
// just past the last card. It counts as visible once the selection is within
// `margin` cards of the end.

/// Identifies what the feed currently holds: `(generation, next page)`.
/// Only a reset or a successful page changes it; a failed fetch does not.
pub type FeedRevision = (u64, u32);

/// Fires "load more" at most once per time the sentinel comes into view.
///
/// The trigger re-arms when the sentinel leaves view, or when new content
/// lands while it stays in view (a short page that doesn't fill the margin).
/// A failed fetch changes neither, so it is never retried without user input.
#[derive(Debug, Clone)]
pub struct InfiniteScroll {
    margin: usize,
    armed: bool,
    seen: Option<FeedRevision>,
}

impl InfiniteScroll {
    pub fn new(margin: usize) -> Self {
        Self {
            margin,
            armed: false,
            seen: None,
        }
    }

    pub fn margin(&self) -> usize {
        self.margin
    }

    pub fn sentinel_visible(&self, selected: usize, len: usize) -> bool {
        len.saturating_sub(selected + 1) <= self.margin
    }

    /// True when the caller should request the next page
    pub fn should_load(
        &mut self,
        selected: usize,
        len: usize,
        loading: bool,
        has_more: bool,
        revision: FeedRevision,
    ) -> bool {
        let visible = self.sentinel_visible(selected, len);
        if !visible {
            self.armed = true;
        }

        if self.seen != Some(revision) {
            self.seen = Some(revision);
            // A revision seen mid-flight is a reset; its own result arms us on success
            if !loading {
                self.armed = true;
            }
        }

        if visible && self.armed && !loading && has_more {
            self.armed = false;
            return true;
        }
        false
    }
}

impl Default for InfiniteScroll {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_margin() {
        let scroll = InfiniteScroll::new(3);
        assert!(!scroll.sentinel_visible(0, 10));
        assert!(!scroll.sentinel_visible(5, 10));
        assert!(scroll.sentinel_visible(6, 10));
        assert!(scroll.sentinel_visible(9, 10));
        assert!(scroll.sentinel_visible(0, 0));
    }

    #[test]
    fn test_fires_once_per_visibility_edge() {
        let mut scroll = InfiniteScroll::new(2);
        assert!(!scroll.should_load(0, 10, false, true, (1, 2)));
        assert!(scroll.should_load(7, 10, false, true, (1, 2)));
        // Still visible, no repeat
        assert!(!scroll.should_load(8, 10, false, true, (1, 2)));
        assert!(!scroll.should_load(9, 10, false, true, (1, 2)));
    }

    #[test]
    fn test_never_fires_while_loading_or_exhausted() {
        let mut scroll = InfiniteScroll::new(2);
        assert!(!scroll.should_load(9, 10, true, true, (1, 2)));
        assert!(!scroll.should_load(9, 10, false, false, (1, 2)));
    }

    #[test]
    fn test_failed_page_does_not_refire() {
        let mut scroll = InfiniteScroll::new(2);
        assert!(scroll.should_load(9, 10, false, true, (1, 2)));
        assert!(!scroll.should_load(9, 10, true, true, (1, 2)));
        // Page 2 failed: nothing changed, sentinel never left view
        for _ in 0..5 {
            assert!(!scroll.should_load(9, 10, false, true, (1, 2)));
        }

        // Scrolling away and back is a new edge
        assert!(!scroll.should_load(4, 10, false, true, (1, 2)));
        assert!(scroll.should_load(9, 10, false, true, (1, 2)));
    }

    #[test]
    fn test_new_page_rearms() {
        let mut scroll = InfiniteScroll::new(2);
        assert!(scroll.should_load(9, 10, false, true, (1, 2)));
        assert!(!scroll.should_load(9, 10, true, true, (1, 2)));
        // Short page landed, sentinel still in view
        assert!(scroll.should_load(9, 11, false, true, (1, 3)));

        // Long page pushed the sentinel away, then back
        assert!(!scroll.should_load(9, 20, false, true, (1, 4)));
        assert!(scroll.should_load(18, 20, false, true, (1, 4)));
    }

    #[test]
    fn test_failed_first_page_waits_for_user() {
        let mut scroll = InfiniteScroll::new(3);
        // Reset seen while the page 1 request is in flight
        assert!(!scroll.should_load(0, 0, true, true, (2, 1)));
        // It failed: empty list, loadable, but no new edge
        assert!(!scroll.should_load(0, 0, false, true, (2, 1)));
        assert!(!scroll.should_load(0, 0, false, true, (2, 1)));

        // A filter change that succeeds brings content and re-arms
        assert!(!scroll.should_load(0, 0, true, true, (3, 1)));
        assert!(scroll.should_load(0, 2, false, true, (3, 2)));
    }
}
