//! Current-page selection over a page sequence.
//!
//! The page sequence is recomputed whenever products or toggles change, and
//! it can shrink (e.g. turning dividers off). Any stored page index must then
//! be pulled back into range instead of pointing past the end.

/// Clamp `index` into `[0, page_count - 1]`. Returns 0 for an empty sequence.
pub fn clamp_page_index(index: usize, page_count: usize) -> usize {
    index.min(page_count.saturating_sub(1))
}

/// A page selection that stays valid as the sequence changes size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    index: usize,
    page_count: usize,
}

impl PageCursor {
    pub fn new(page_count: usize) -> Self {
        Self {
            index: 0,
            page_count,
        }
    }

    /// Cursor positioned at `index`, clamped.
    pub fn at(index: usize, page_count: usize) -> Self {
        Self {
            index: clamp_page_index(index, page_count),
            page_count,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Adopt a recomputed page count, re-clamping the selection.
    pub fn sync(&mut self, page_count: usize) {
        self.page_count = page_count;
        self.index = clamp_page_index(self.index, page_count);
    }

    pub fn go_to(&mut self, index: usize) {
        self.index = clamp_page_index(index, self.page_count);
    }

    pub fn next(&mut self) {
        self.go_to(self.index.saturating_add(1));
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.page_count
    }

    /// Index of the previous page, if any.
    pub fn prev_index(&self) -> Option<usize> {
        (!self.is_first()).then(|| self.index - 1)
    }

    /// Index of the next page, if any.
    pub fn next_index(&self) -> Option<usize> {
        (!self.is_last()).then(|| self.index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_in_range_is_identity() {
        assert_eq!(clamp_page_index(2, 5), 2);
        assert_eq!(clamp_page_index(0, 1), 0);
    }

    #[test]
    fn clamp_past_end_goes_to_last() {
        assert_eq!(clamp_page_index(7, 5), 4);
        assert_eq!(clamp_page_index(usize::MAX, 3), 2);
    }

    #[test]
    fn clamp_empty_sequence_is_zero() {
        assert_eq!(clamp_page_index(3, 0), 0);
    }

    #[test]
    fn sync_after_shrink_moves_to_last_page() {
        let mut cursor = PageCursor::at(6, 8);
        cursor.sync(3);
        assert_eq!(cursor.index(), 2);
        assert!(cursor.is_last());
    }

    #[test]
    fn sync_after_grow_keeps_selection() {
        let mut cursor = PageCursor::at(1, 3);
        cursor.sync(10);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn next_stops_at_last_page() {
        let mut cursor = PageCursor::at(1, 2);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn prev_stops_at_first_page() {
        let mut cursor = PageCursor::new(4);
        cursor.prev();
        assert_eq!(cursor.index(), 0);
        assert!(cursor.is_first());
    }

    #[test]
    fn neighbour_indices() {
        let cursor = PageCursor::at(0, 3);
        assert_eq!(cursor.prev_index(), None);
        assert_eq!(cursor.next_index(), Some(1));

        let cursor = PageCursor::at(2, 3);
        assert_eq!(cursor.prev_index(), Some(1));
        assert_eq!(cursor.next_index(), None);
    }

    #[test]
    fn go_to_clamps() {
        let mut cursor = PageCursor::new(3);
        cursor.go_to(42);
        assert_eq!(cursor.index(), 2);
    }
}
