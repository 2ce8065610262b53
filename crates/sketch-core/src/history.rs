//! Bounded undo history.
//!
//! Holds "before" snapshots. Pushing onto a full history evicts the oldest
//! entry; undo pops the newest.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct UndoHistory<T> {
    entries: VecDeque<T>,
    /// Maximum number of retained entries. Zero disables history.
    depth: usize,
}

impl<T> UndoHistory<T> {
    pub fn new(depth: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(depth),
            depth,
        }
    }

    /// Append an entry, returning the evicted oldest entry if the history
    /// was already full.
    pub fn push(&mut self, entry: T) -> Option<T> {
        if self.depth == 0 {
            return Some(entry);
        }
        let evicted = if self.entries.len() >= self.depth {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Remove and return the most recent entry.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn never_exceeds_depth() {
        let mut history = UndoHistory::new(5);
        for i in 0..20 {
            history.push(i);
            assert!(history.len() <= 5);
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn sixth_push_evicts_first() {
        let mut history = UndoHistory::new(5);
        for i in 1..=5 {
            assert_eq!(history.push(i), None);
        }
        assert_eq!(history.push(6), Some(1));
        let drained: Vec<_> = std::iter::from_fn(|| history.pop()).collect();
        assert_eq!(drained, vec![6, 5, 4, 3, 2]);
    }

    #[test]
    fn pop_is_last_in_first_out() {
        let mut history = UndoHistory::new(5);
        history.push("a");
        history.push("b");
        assert_eq!(history.pop(), Some("b"));
        assert_eq!(history.pop(), Some("a"));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn zero_depth_keeps_nothing() {
        let mut history = UndoHistory::new(0);
        assert_eq!(history.push(1), Some(1));
        assert!(history.is_empty());
    }
}
