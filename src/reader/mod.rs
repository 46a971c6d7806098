//! Checkpointed Sequential Reader
//!
//! Wraps an [`ItemSource`], counts the items it hands out, and externalizes
//! that count into an [`ExecutionContext`] so the read sequence can resume
//! after a restart. Restore never asks the source to seek: on open the
//! reader replays the stored count through [`ItemSource::advance`], which
//! defaults to rereading and discarding.
//!
//! ## Lifecycle
//!
//! ```text
//! open(ctx) → [source.open(); advance(stored count)] → read()* → checkpoint(ctx)* → close(ctx)
//! ```
//!
//! The cycle may repeat on one instance; each open re-runs restore from
//! whatever the context then contains.
//!
//! Not thread-safe: exactly one caller drives the lifecycle in strict
//! sequence. The counter is an unguarded integer and sources are
//! single-cursor.

use crate::context::{scoped_key, ExecutionContext, READ_COUNT_KEY};
use crate::source::{ItemSource, SourceError};
use tracing::debug;

/// Configuration surface for a [`CheckpointedReader`].
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Name used to namespace this stream's keys in the shared context.
    /// Required before the first open whenever `save_state` is true.
    pub name: String,
    /// When false, `checkpoint` is a no-op and no resume state is written
    pub save_state: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            name: String::new(),
            save_state: true,
        }
    }
}

impl ReaderConfig {
    /// Create a config with the given stream name
    pub fn new(name: impl Into<String>) -> Self {
        ReaderConfig {
            name: name.into(),
            save_state: true,
        }
    }

    /// Configuration for tests
    pub fn test() -> Self {
        ReaderConfig::new("test")
    }
}

/// Error type for reader lifecycle operations.
///
/// Wrapping marks the lifecycle phase a source failure occurred in, since
/// that determines whether the caller retries the whole stream, retries one
/// item, or treats the run as unrecoverable. Per-item errors during `read`
/// are never wrapped.
#[derive(Debug)]
pub enum StreamError {
    /// The source failed to open - fatal, the reader does not retry
    Init(SourceError),
    /// The stored position could not be replayed - the persisted checkpoint
    /// no longer matches the input (shrunk file, changed dataset)
    Restore(SourceError),
    /// Contract violation writing or keying the checkpoint
    Persist(String),
    /// The source failed to release its resources; the item counter was
    /// already reset before this surfaced
    Close(SourceError),
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamError::Init(e) => write!(f, "Failed to initialize the reader: {}", e),
            StreamError::Restore(e) => {
                write!(f, "Could not move to stored position on restart: {}", e)
            }
            StreamError::Persist(msg) => write!(f, "Checkpoint persist error: {}", msg),
            StreamError::Close(e) => write!(f, "Error while closing item reader: {}", e),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Init(e)
            | StreamError::Restore(e)
            | StreamError::Close(e) => Some(e),
            StreamError::Persist(_) => None,
        }
    }
}

/// Sequential reader that checkpoints its position as an item count.
///
/// `items_read` equals the number of `read` calls since the most recent
/// open, plus the restored count. The increment happens *before* the source
/// is asked for the item, so a read that fails still advances the counter
/// and a resume after a mid-read crash skips the failed item rather than
/// retrying it. Callers that need retry-the-failed-item semantics must
/// arrange it outside this reader.
#[derive(Debug)]
pub struct CheckpointedReader<S: ItemSource> {
    source: S,
    config: ReaderConfig,
    items_read: u64,
}

impl<S: ItemSource> CheckpointedReader<S> {
    /// Create a reader over the given source
    pub fn new(config: ReaderConfig, source: S) -> Self {
        CheckpointedReader {
            source,
            config,
            items_read: 0,
        }
    }

    /// Items counted since the most recent open (restored count included)
    pub fn items_read(&self) -> u64 {
        self.items_read
    }

    /// The stream name used to namespace context keys
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the wrapped source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn read_count_key(&self) -> String {
        scoped_key(&self.config.name, READ_COUNT_KEY)
    }

    /// Open the source and, if the context holds a stored count for this
    /// stream, advance the source to it.
    ///
    /// Must be called before any `read`. A source open failure is
    /// [`StreamError::Init`]; a replay failure is [`StreamError::Restore`],
    /// including the case where the input got shorter than the stored count.
    pub fn open(&mut self, context: &ExecutionContext) -> Result<(), StreamError> {
        if self.config.save_state && self.config.name.is_empty() {
            return Err(StreamError::Persist(
                "stream name must be set when save_state is enabled".to_string(),
            ));
        }

        self.source.open().map_err(StreamError::Init)?;

        let key = self.read_count_key();
        match context.get_long(&key) {
            Some(stored) => {
                let count = u64::try_from(stored).map_err(|_| {
                    StreamError::Restore(SourceError::Format(format!(
                        "stored count {} is negative",
                        stored
                    )))
                })?;
                self.source.advance(count).map_err(StreamError::Restore)?;
                self.items_read = count;
                debug!(stream = %self.config.name, count, "restored read position");
            }
            None => {
                self.items_read = 0;
                debug!(stream = %self.config.name, "no stored position, starting fresh");
            }
        }
        Ok(())
    }

    /// Produce the next item, or `Ok(None)` at end of input.
    ///
    /// The item counter advances before the source is consulted; source
    /// errors propagate unchanged.
    pub fn read(&mut self) -> Result<Option<S::Item>, SourceError> {
        self.items_read += 1;
        self.source.next_item()
    }

    /// Record the current item count in the context under
    /// `"<name>.read.count"`. A no-op when `save_state` is false.
    pub fn checkpoint(&self, context: &mut ExecutionContext) -> Result<(), StreamError> {
        if !self.config.save_state {
            return Ok(());
        }
        if self.config.name.is_empty() {
            return Err(StreamError::Persist(
                "stream name must be set when save_state is enabled".to_string(),
            ));
        }
        let count = i64::try_from(self.items_read).map_err(|_| {
            StreamError::Persist(format!("item count {} overflows i64", self.items_read))
        })?;
        context.put_long(&self.read_count_key(), count);
        debug!(stream = %self.config.name, count, "checkpointed read position");
        Ok(())
    }

    /// Reset the item counter and close the source.
    ///
    /// The counter reset happens unconditionally first, so a failed close
    /// never leaves a stale count behind for the next open. The context is
    /// part of the lifecycle contract but is not touched on close.
    pub fn close(&mut self, _context: &mut ExecutionContext) -> Result<(), StreamError> {
        self.items_read = 0;
        self.source.close().map_err(StreamError::Close)?;
        debug!(stream = %self.config.name, "reader closed");
        Ok(())
    }

    /// Extension point for a surrounding transactional-retry layer.
    ///
    /// A no-op here: the reader holds a single position counter and cannot
    /// roll back to an intermediate mark. Real mark/reset needs a buffer of
    /// items since the last mark, composed around this reader.
    pub fn mark(&mut self) {}

    /// Extension point for a surrounding transactional-retry layer. See
    /// [`CheckpointedReader::mark`].
    pub fn reset(&mut self) {}
}
