use std::io::Write;

use super::{OutputSink, SinkResult};

/// Wraps a writer such as a [`std::fs::File`] or a pipe.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

impl<W: Write + Send> IoSink<W> {
    /// Takes ownership of `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> OutputSink for IoSink<W> {
    fn write(&mut self, bytes: &[u8]) -> SinkResult<usize> {
        self.inner.write(bytes)
    }

    fn flush(&mut self) -> SinkResult<()> {
        self.inner.flush()
    }
}
