//! Newline framing over any byte stream
//!
//! Reads until `\n`, strips the terminator (and a preceding `\r`), and
//! refuses lines longer than the configured limit.

use std::io::{self, BufRead, BufReader, Read};

/// Reads single newline-terminated lines from a byte stream
pub struct LineReader<R: Read> {
    inner: BufReader<R>,
    max_len: usize,
}

impl<R: Read> LineReader<R> {
    /// Create a line reader
    ///
    /// # Arguments
    ///
    /// * `inner` - byte stream to read from
    /// * `max_len` - longest accepted line, terminator excluded
    pub fn new(inner: R, max_len: usize) -> Self {
        Self {
            inner: BufReader::new(inner),
            max_len,
        }
    }

    /// Read the next line.
    ///
    /// End of stream before any byte is `UnexpectedEof`; end of stream after
    /// a partial line returns what was read.
    pub fn read_line(&mut self) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        // room for a `\r\n` terminator
        let limit = self.max_len as u64 + 2;
        let n = (&mut self.inner).take(limit).read_until(b'\n', &mut line)?;

        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "device closed the connection",
            ));
        }

        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        if line.len() > self.max_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line exceeds {} bytes", self.max_len),
            ));
        }

        Ok(line)
    }
}
