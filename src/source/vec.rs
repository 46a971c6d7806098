//! In-Memory Item Source
//!
//! Backs unit tests and small fixed datasets. Also demonstrates the
//! efficient-skip override: the cursor jumps directly instead of rereading.

use crate::source::{ItemSource, SourceError};

/// In-memory ordered source over a vector of items.
///
/// Reopening rewinds to the start, so one instance can serve repeated
/// open/close cycles over the same data.
#[derive(Debug, Clone)]
pub struct VecSource<T: Clone> {
    items: Vec<T>,
    position: usize,
    opened: bool,
}

impl<T: Clone> VecSource<T> {
    /// Create a source over the given items
    pub fn new(items: Vec<T>) -> Self {
        VecSource {
            items,
            position: 0,
            opened: false,
        }
    }

    /// Current cursor position (for testing)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the source holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> ItemSource for VecSource<T> {
    type Item = T;

    fn open(&mut self) -> Result<(), SourceError> {
        self.position = 0;
        self.opened = true;
        Ok(())
    }

    fn next_item(&mut self) -> Result<Option<T>, SourceError> {
        match self.items.get(self.position) {
            Some(item) => {
                self.position += 1;
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) -> Result<(), SourceError> {
        self.opened = false;
        Ok(())
    }

    /// Jump the cursor directly: O(1) instead of the default reread
    fn advance(&mut self, n: u64) -> Result<(), SourceError> {
        let target = self.position as u64 + n;
        if target > self.items.len() as u64 {
            return Err(SourceError::ShortInput {
                requested: n,
                available: self.items.len() as u64 - self.position as u64,
            });
        }
        self.position = target as usize;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads() {
        let mut source = VecSource::new(vec!["a", "b", "c"]);
        source.open().unwrap();

        assert_eq!(source.next_item().unwrap(), Some("a"));
        assert_eq!(source.next_item().unwrap(), Some("b"));
        assert_eq!(source.next_item().unwrap(), Some("c"));
        assert_eq!(source.next_item().unwrap(), None);
        // Stays at end
        assert_eq!(source.next_item().unwrap(), None);
    }

    #[test]
    fn test_reopen_rewinds() {
        let mut source = VecSource::new(vec![1, 2]);
        source.open().unwrap();
        source.next_item().unwrap();
        source.close().unwrap();

        source.open().unwrap();
        assert_eq!(source.next_item().unwrap(), Some(1));
    }

    #[test]
    fn test_advance_jumps_cursor() {
        let mut source = VecSource::new(vec![10, 20, 30, 40]);
        source.open().unwrap();
        source.advance(2).unwrap();
        assert_eq!(source.position(), 2);
        assert_eq!(source.next_item().unwrap(), Some(30));
    }

    #[test]
    fn test_advance_to_exact_end() {
        let mut source = VecSource::new(vec![1, 2, 3]);
        source.open().unwrap();
        source.advance(3).unwrap();
        assert_eq!(source.next_item().unwrap(), None);
    }

    #[test]
    fn test_advance_past_end() {
        let mut source = VecSource::new(vec![1, 2, 3]);
        source.open().unwrap();
        let err = source.advance(5).unwrap_err();
        match err {
            SourceError::ShortInput {
                requested,
                available,
            } => {
                assert_eq!(requested, 5);
                assert_eq!(available, 3);
            }
            other => panic!("expected ShortInput, got {}", other),
        }
    }

    #[test]
    fn test_empty_source() {
        let mut source: VecSource<u32> = VecSource::new(vec![]);
        source.open().unwrap();
        assert_eq!(source.next_item().unwrap(), None);
        source.advance(0).unwrap();
        assert!(source.advance(1).is_err());
    }
}
