use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const DEFAULT_DELIMITER: &[u8] = b"\n";
const DEFAULT_CHUNK_SIZE: usize = 10;

/// Reads a byte source record by record, splitting on a configurable
/// delimiter.
///
/// The source is consumed in fixed-size chunks and buffered until a delimiter
/// shows up, so arbitrarily large inputs are fine as long as individual records
/// fit in memory. A final record without a trailing delimiter is still
/// returned.
pub struct LinewiseReader<R> {
    delimiter: Vec<u8>,
    chunk_size: usize,
    buffer: Vec<u8>,
    at_eof: bool,
    inner: R,
}

impl LinewiseReader<File> {
    /// Opens the file at `path` for linewise reading.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> LinewiseReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_vec(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            buffer: Vec::new(),
            at_eof: false,
            inner,
        }
    }

    /// Replaces the record delimiter. Defaults to `\n`.
    pub fn with_delimiter(mut self, delimiter: impl Into<Vec<u8>>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Number of bytes requested from the source at once. Defaults to 10.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Reads the next record as raw bytes, without the delimiter.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    pub fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.at_eof {
            return Ok(None);
        }

        loop {
            if let Some(at) = find(&self.buffer, &self.delimiter) {
                let rest = self.buffer.split_off(at + self.delimiter.len());
                let mut line = std::mem::replace(&mut self.buffer, rest);
                line.truncate(at);
                return Ok(Some(line));
            }

            let mut chunk = vec![0u8; self.chunk_size];
            let read = self.inner.read(&mut chunk)?;
            if read == 0 {
                self.at_eof = true;
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(std::mem::take(&mut self.buffer)));
            }
            self.buffer.extend_from_slice(&chunk[..read]);
        }
    }

    /// Reads the next record as UTF-8 text.
    ///
    /// Non-UTF-8 records surface as [`io::ErrorKind::InvalidData`].
    pub fn read_line_string(&mut self) -> io::Result<Option<String>> {
        match self.read_line()? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            None => Ok(None),
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
