//! Filesystem Item Sources
//!
//! Line-oriented sources over local files. `FileLineSource` yields raw lines;
//! `JsonLineSource` decodes one JSON document per line. Neither supports
//! native positioning, so resume goes through the default reread `advance`.

use crate::source::{ItemSource, SourceError};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::marker::PhantomData;
use std::path::PathBuf;

/// One `String` item per line of a file.
///
/// Trailing `\n` / `\r\n` is stripped. Invalid UTF-8 surfaces as
/// [`SourceError::Format`] rather than an I/O error, since the bytes were
/// read fine but could not be turned into an item.
#[derive(Debug)]
pub struct FileLineSource {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    line: u64,
}

impl FileLineSource {
    /// Create a source over the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLineSource {
            path: path.into(),
            reader: None,
            line: 0,
        }
    }

    /// The file this source reads
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_line(&mut self) -> Result<Option<String>, SourceError> {
        let reader = self.reader.as_mut().ok_or_else(|| {
            SourceError::Io(std::io::Error::new(
                ErrorKind::NotConnected,
                "source not opened",
            ))
        })?;

        let mut buf = String::new();
        let bytes = match reader.read_line(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(SourceError::Format(format!(
                    "{}:{}: invalid UTF-8",
                    self.path.display(),
                    self.line + 1
                )));
            }
            Err(e) => return Err(SourceError::Io(e)),
        };
        if bytes == 0 {
            return Ok(None);
        }

        self.line += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }
}

impl ItemSource for FileLineSource {
    type Item = String;

    fn open(&mut self) -> Result<(), SourceError> {
        let file = File::open(&self.path)?;
        self.reader = Some(BufReader::new(file));
        self.line = 0;
        Ok(())
    }

    fn next_item(&mut self) -> Result<Option<String>, SourceError> {
        self.read_line()
    }

    fn close(&mut self) -> Result<(), SourceError> {
        self.reader = None;
        Ok(())
    }
}

/// One JSON document per line of a file, decoded into `T`.
///
/// A line that fails to parse is a [`SourceError::Format`] carrying the line
/// number and cause. The failing line is consumed, so a surrounding skip
/// policy can simply keep reading.
#[derive(Debug)]
pub struct JsonLineSource<T> {
    inner: FileLineSource,
    _item: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> JsonLineSource<T> {
    /// Create a source over the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonLineSource {
            inner: FileLineSource::new(path),
            _item: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> ItemSource for JsonLineSource<T> {
    type Item = T;

    fn open(&mut self) -> Result<(), SourceError> {
        self.inner.open()
    }

    fn next_item(&mut self) -> Result<Option<T>, SourceError> {
        match self.inner.read_line()? {
            None => Ok(None),
            Some(line) => serde_json::from_str(&line).map(Some).map_err(|e| {
                SourceError::Format(format!(
                    "{}:{}: {}",
                    self.inner.path.display(),
                    self.inner.line,
                    e
                ))
            }),
        }
    }

    fn close(&mut self) -> Result<(), SourceError> {
        self.inner.close()
    }
}
