//! Item Source Abstraction
//!
//! Provides a trait-based abstraction over ordered item inputs, so the
//! checkpointed reader can resume any source the same way.
//!
//! Implementations:
//! - `VecSource`: in-memory, for unit tests and small datasets
//! - `FileLineSource` / `JsonLineSource`: local filesystem inputs
//! - `SimulatedSource`: fault-injecting wrapper for deterministic tests
//!
//! End of input is `Ok(None)` from [`ItemSource::next_item`], a normal
//! termination condition, never an error.

pub mod fs;
pub mod simulated;
pub mod vec;

pub use fs::{FileLineSource, JsonLineSource};
pub use simulated::{FaultPlan, SimulatedSource};
pub use vec::VecSource;

use std::io::Error as IoError;

/// Error type for source operations
#[derive(Debug)]
pub enum SourceError {
    /// I/O-level failure in the underlying input
    Io(IoError),
    /// Raw data could not be parsed into an item
    Format(String),
    /// The input ended before an advance reached its target position
    ShortInput {
        /// Items the advance was asked to skip
        requested: u64,
        /// Items the source actually produced before ending
        available: u64,
    },
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Io(e) => write!(f, "I/O error: {}", e),
            SourceError::Format(msg) => write!(f, "Format error: {}", msg),
            SourceError::ShortInput {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Input exhausted after {} of {} items",
                    available, requested
                )
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IoError> for SourceError {
    fn from(e: IoError) -> Self {
        SourceError::Io(e)
    }
}

/// Ordered item input with an open/close lifecycle.
///
/// The checkpointed reader drives exactly one open/close cycle at a time and
/// calls `next_item` strictly sequentially. Implementations are single-cursor
/// and need no internal synchronization.
pub trait ItemSource {
    /// The item type this source produces
    type Item;

    /// Acquire the resources needed to start producing items.
    ///
    /// The reader never retries a failed open; it is surfaced to the caller
    /// as a fatal initialization failure.
    fn open(&mut self) -> Result<(), SourceError>;

    /// Produce the next item, or `Ok(None)` at end of input.
    fn next_item(&mut self) -> Result<Option<Self::Item>, SourceError>;

    /// Release the resources acquired in `open`.
    fn close(&mut self) -> Result<(), SourceError>;

    /// Skip ahead `n` items without handing them to the caller.
    ///
    /// The default rereads the input item by item and discards the results:
    /// correct for any source, but O(n) in resume cost. Sources whose input
    /// supports efficient positioning (indexed files, offset cursors) should
    /// override this.
    ///
    /// Ends with [`SourceError::ShortInput`] if the input runs out before
    /// `n` items were skipped; any other error propagates unchanged.
    fn advance(&mut self, n: u64) -> Result<(), SourceError> {
        for skipped in 0..n {
            if self.next_item()?.is_none() {
                return Err(SourceError::ShortInput {
                    requested: n,
                    available: skipped,
                });
            }
        }
        Ok(())
    }
}
