use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::LoadError;

/// Opens a config file for buffered line reading.
///
/// The handle is closed when the returned reader is dropped.
pub(crate) fn open_file(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| LoadError::SourceNotFound {
            path: path.to_path_buf(),
            source: e,
        })
}

/// One line of input with its terminator removed.
#[derive(Debug)]
pub(crate) struct RawLine {
    pub number: usize,
    pub text: String,
    pub truncated: bool,
}

/// Initial line buffer size; the buffer grows up to the line limit.
const INITIAL_CAPACITY: usize = 256;

/// Reads numbered, length-limited lines from a buffered source.
///
/// At most `max_len` bytes of a line (plus one for a trailing `\r`) are ever
/// held in memory; the rest of an overlong line is skipped.
pub(crate) struct Lines<R> {
    inner: R,
    max_len: usize,
    number: usize,
}

impl<R: BufRead> Lines<R> {
    pub fn new(inner: R, max_len: usize) -> Self {
        Self {
            inner,
            max_len,
            number: 0,
        }
    }

    /// Returns `Ok(None)` at end of input. A last line without a newline is still returned.
    pub fn next_line(&mut self) -> io::Result<Option<RawLine>> {
        let limit = self.max_len.saturating_add(1);
        let mut buf = Vec::with_capacity(limit.min(INITIAL_CAPACITY));
        let mut truncated = false;
        let mut read_any = false;

        loop {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            read_any = true;

            let newline = available.iter().position(|&b| b == b'\n');
            let content = newline.unwrap_or(available.len());
            let keep = content.min(limit - buf.len());
            buf.extend_from_slice(&available[..keep]);
            truncated |= keep < content;

            let used = newline.map_or(content, |i| i + 1);
            self.inner.consume(used);
            if newline.is_some() {
                break;
            }
        }

        if !read_any {
            return Ok(None);
        }
        self.number += 1;

        if !truncated && buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.len() > self.max_len {
            buf.truncate(self.max_len);
            truncated = true;
        }
        if truncated {
            // drop a multi-byte character cut in half by the limit
            if let Err(e) = std::str::from_utf8(&buf) {
                if e.error_len().is_none() {
                    buf.truncate(e.valid_up_to());
                }
            }
        }

        let text =
            String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(Some(RawLine {
            number: self.number,
            text,
            truncated,
        }))
    }
}
