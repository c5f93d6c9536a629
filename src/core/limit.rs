// Byte-ceiling reader adapter for request bodies.
// Reading past the ceiling fails with `SizeLimitExceeded` instead of truncating.
// The inner reader is asked for at most `limit + 1` bytes in total.
use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Read};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SizeLimitExceeded {
    pub limit: usize,
}

impl fmt::Display for SizeLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body exceeds {} bytes", self.limit)
    }
}

impl StdError for SizeLimitExceeded {}

impl SizeLimitExceeded {
    /// Recover the marker from an `io::Error` produced by `LimitedReader`.
    pub fn from_io(err: &io::Error) -> Option<Self> {
        err.get_ref()
            .and_then(|inner| inner.downcast_ref::<SizeLimitExceeded>())
            .copied()
    }
}

#[derive(Debug)]
pub struct LimitedReader<R> {
    inner: R,
    limit: usize,
    consumed: usize,
    exceeded: bool,
}

impl<R: Read> LimitedReader<R> {
    pub fn new(inner: R, limit: usize) -> Self {
        Self {
            inner,
            limit,
            consumed: 0,
            exceeded: false,
        }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn exceeded(&self) -> bool {
        self.exceeded
    }

    fn overflow(&mut self) -> io::Error {
        self.exceeded = true;
        io::Error::other(SizeLimitExceeded { limit: self.limit })
    }
}

impl<R: Read> Read for LimitedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.exceeded {
            return Err(self.overflow());
        }
        if buf.is_empty() {
            return Ok(0);
        }
        let remaining = self.limit - self.consumed;
        if remaining == 0 {
            // Read one more byte: EOF here means the body sat exactly at the ceiling.
            let mut extra = [0u8; 1];
            return match self.inner.read(&mut extra)? {
                0 => Ok(0),
                _ => Err(self.overflow()),
            };
        }
        let want = buf.len().min(remaining);
        let read = self.inner.read(&mut buf[..want])?;
        self.consumed += read;
        Ok(read)
    }
}
