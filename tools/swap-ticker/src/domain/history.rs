//! Fixed-capacity rolling sample window.

use std::collections::VecDeque;

/// Ordered window of the most recent samples, oldest first.
///
/// Pushing into a full window evicts the oldest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryWindow<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryWindow<T> {
    /// Create an empty window. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, returning the evicted one if the window was full.
    pub fn push(&mut self, sample: T) -> Option<T> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.samples.iter()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.samples.front()
    }

    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }
}

impl<T: Clone> HistoryWindow<T> {
    /// Copy the samples out, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.samples.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_below_capacity() {
        let mut window = HistoryWindow::new(3);
        assert!(window.is_empty());

        assert_eq!(window.push(1), None);
        assert_eq!(window.push(2), None);

        assert_eq!(window.len(), 2);
        assert!(!window.is_full());
        assert_eq!(window.oldest(), Some(&1));
        assert_eq!(window.latest(), Some(&2));
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut window = HistoryWindow::new(3);
        for i in 1..=3 {
            window.push(i);
        }
        assert!(window.is_full());

        // Next push drops the first sample
        assert_eq!(window.push(4), Some(1));
        assert_eq!(window.to_vec(), vec![2, 3, 4]);
        assert_eq!(window.push(5), Some(2));
        assert_eq!(window.to_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut window = HistoryWindow::new(20);
        for i in 0..25 {
            window.push(i);
            assert!(window.len() <= 20);
        }

        // Exactly the 20 most recent, oldest first
        assert_eq!(window.to_vec(), (5..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_capacity_raised_to_one() {
        let mut window = HistoryWindow::new(0);
        assert_eq!(window.capacity(), 1);

        window.push("a");
        assert_eq!(window.push("b"), Some("a"));
        assert_eq!(window.to_vec(), vec!["b"]);
    }
}
