//! # item-stream
//!
//! Checkpointed sequential reading over arbitrary ordered inputs.
//!
//! A [`CheckpointedReader`] wraps an [`ItemSource`] (file, queue, cursor),
//! counts the items it produces, and periodically records that count in a
//! caller-owned [`ExecutionContext`]. After a restart, opening the reader
//! against the same context fast-forwards the source to the recorded
//! position, by rereading and discarding by default, or via the source's
//! own efficient `advance` when it has one.
//!
//! ```
//! use item_stream::{CheckpointedReader, ExecutionContext, ReaderConfig, VecSource};
//!
//! let mut context = ExecutionContext::new();
//!
//! // First run: read two items, checkpoint, stop.
//! let mut reader = CheckpointedReader::new(
//!     ReaderConfig::new("letters"),
//!     VecSource::new(vec!["a", "b", "c", "d"]),
//! );
//! reader.open(&context).unwrap();
//! reader.read().unwrap();
//! reader.read().unwrap();
//! reader.checkpoint(&mut context).unwrap();
//! reader.close(&mut context).unwrap();
//!
//! // Restart: a fresh reader over the same context resumes at item 3.
//! let mut reader = CheckpointedReader::new(
//!     ReaderConfig::new("letters"),
//!     VecSource::new(vec!["a", "b", "c", "d"]),
//! );
//! reader.open(&context).unwrap();
//! assert_eq!(reader.read().unwrap(), Some("c"));
//! ```
//!
//! Readers are single-threaded by design: one caller drives
//! open/read/checkpoint/close in strict sequence, and the position counter
//! is an unguarded integer.

pub mod context;
pub mod reader;
pub mod source;

pub use context::{scoped_key, ContextValue, ExecutionContext, READ_COUNT_KEY};
pub use reader::{CheckpointedReader, ReaderConfig, StreamError};
pub use source::{
    FaultPlan, FileLineSource, ItemSource, JsonLineSource, SimulatedSource, SourceError, VecSource,
};
