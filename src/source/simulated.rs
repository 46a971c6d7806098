//! Simulated Item Source with Fault Injection
//!
//! Wraps any source and injects scripted faults so lifecycle error paths
//! can be exercised deterministically: the tests assert exact positions,
//! so faults fire at planned item indices rather than by probability.

use crate::source::{ItemSource, SourceError};
use std::io::{Error as IoError, ErrorKind};

/// Scripted faults for a [`SimulatedSource`].
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    /// Fail `open` with an I/O error
    pub fail_open: bool,
    /// Fail `close` with an I/O error
    pub fail_close: bool,
    /// Fail the Nth `next_item` call (1-based) with an I/O error
    pub io_fault_at: Option<u64>,
    /// Fail the Nth `next_item` call (1-based) with a format error
    pub format_fault_at: Option<u64>,
}

impl FaultPlan {
    /// No faults - the wrapper is transparent
    pub fn none() -> Self {
        FaultPlan::default()
    }

    /// Fail the Nth item fetch (1-based) with an I/O error
    pub fn io_fault_at(n: u64) -> Self {
        FaultPlan {
            io_fault_at: Some(n),
            ..FaultPlan::default()
        }
    }

    /// Fail the Nth item fetch (1-based) with a format error
    pub fn format_fault_at(n: u64) -> Self {
        FaultPlan {
            format_fault_at: Some(n),
            ..FaultPlan::default()
        }
    }
}

/// Fault-injecting wrapper around any [`ItemSource`].
///
/// Faults on `next_item` fire once and are then spent, so a caller that
/// skips the poisoned position reads on normally, the way a transient
/// fault behaves across a restart.
#[derive(Debug)]
pub struct SimulatedSource<S> {
    inner: S,
    plan: FaultPlan,
    fetches: u64,
}

impl<S: ItemSource> SimulatedSource<S> {
    /// Wrap a source with the given fault plan
    pub fn new(inner: S, plan: FaultPlan) -> Self {
        SimulatedSource {
            inner,
            plan,
            fetches: 0,
        }
    }

    /// Number of `next_item` calls seen so far (for testing)
    pub fn fetches(&self) -> u64 {
        self.fetches
    }

    /// The wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ItemSource> ItemSource for SimulatedSource<S> {
    type Item = S::Item;

    fn open(&mut self) -> Result<(), SourceError> {
        self.fetches = 0;
        if self.plan.fail_open {
            return Err(SourceError::Io(IoError::new(
                ErrorKind::ConnectionRefused,
                "simulated open failure",
            )));
        }
        self.inner.open()
    }

    fn next_item(&mut self) -> Result<Option<S::Item>, SourceError> {
        self.fetches += 1;

        if self.plan.io_fault_at == Some(self.fetches) {
            self.plan.io_fault_at = None;
            return Err(SourceError::Io(IoError::new(
                ErrorKind::UnexpectedEof,
                "simulated read failure",
            )));
        }
        if self.plan.format_fault_at == Some(self.fetches) {
            self.plan.format_fault_at = None;
            return Err(SourceError::Format("simulated malformed item".to_string()));
        }

        self.inner.next_item()
    }

    fn close(&mut self) -> Result<(), SourceError> {
        if self.plan.fail_close {
            return Err(SourceError::Io(IoError::new(
                ErrorKind::BrokenPipe,
                "simulated close failure",
            )));
        }
        self.inner.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::VecSource;

    #[test]
    fn test_transparent_without_faults() {
        let mut source = SimulatedSource::new(VecSource::new(vec![1, 2, 3]), FaultPlan::none());
        source.open().unwrap();

        assert_eq!(source.next_item().unwrap(), Some(1));
        assert_eq!(source.next_item().unwrap(), Some(2));
        assert_eq!(source.next_item().unwrap(), Some(3));
        assert_eq!(source.next_item().unwrap(), None);
        source.close().unwrap();
    }

    #[test]
    fn test_open_fault() {
        let plan = FaultPlan {
            fail_open: true,
            ..FaultPlan::default()
        };
        let mut source = SimulatedSource::new(VecSource::new(vec![1]), plan);
        assert!(matches!(source.open(), Err(SourceError::Io(_))));
    }

    #[test]
    fn test_io_fault_fires_once() {
        let mut source =
            SimulatedSource::new(VecSource::new(vec![1, 2, 3]), FaultPlan::io_fault_at(2));
        source.open().unwrap();

        assert_eq!(source.next_item().unwrap(), Some(1));
        assert!(matches!(source.next_item(), Err(SourceError::Io(_))));
        // Fault is spent; the wrapped cursor never moved past item 1
        assert_eq!(source.next_item().unwrap(), Some(2));
    }

    #[test]
    fn test_format_fault() {
        let mut source =
            SimulatedSource::new(VecSource::new(vec!["a", "b"]), FaultPlan::format_fault_at(1));
        source.open().unwrap();
        assert!(matches!(source.next_item(), Err(SourceError::Format(_))));
        assert_eq!(source.next_item().unwrap(), Some("a"));
    }

    #[test]
    fn test_close_fault() {
        let plan = FaultPlan {
            fail_close: true,
            ..FaultPlan::default()
        };
        let mut source = SimulatedSource::new(VecSource::new(vec![1]), plan);
        source.open().unwrap();
        assert!(matches!(source.close(), Err(SourceError::Io(_))));
    }

    #[test]
    fn test_fault_during_default_advance() {
        // The default advance goes through next_item, so planned faults hit it
        let mut source =
            SimulatedSource::new(VecSource::new(vec![1, 2, 3]), FaultPlan::io_fault_at(2));
        source.open().unwrap();
        assert!(matches!(
            ItemSource::advance(&mut source, 3),
            Err(SourceError::Io(_))
        ));
    }
}
