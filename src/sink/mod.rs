//! Output sinks behind the serializing gate.

/// In-memory buffer sink.
pub mod buffer;
/// Standard output sink.
pub mod console;
/// Adapter for any [`std::io::Write`].
pub mod io;

pub use buffer::BufferSink;
pub use console::ConsoleSink;
pub use io::IoSink;

/// Error surfaced by an underlying sink write.
pub type SinkError = std::io::Error;

/// Result alias for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Minimal write capability the gate depends on.
///
/// `write` may accept fewer bytes than offered; the caller holds the gate and
/// keeps writing until the line is complete.
pub trait OutputSink: Send {
    /// Writes some prefix of `bytes`, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> SinkResult<usize>;

    /// Pushes buffered bytes to the underlying device.
    fn flush(&mut self) -> SinkResult<()> {
        Ok(())
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn write(&mut self, bytes: &[u8]) -> SinkResult<usize> {
        (**self).write(bytes)
    }

    fn flush(&mut self) -> SinkResult<()> {
        (**self).flush()
    }
}
