use std::io::{self, Write};

use super::{OutputSink, SinkResult};

/// Process standard output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn write(&mut self, bytes: &[u8]) -> SinkResult<usize> {
        io::stdout().lock().write(bytes)
    }

    fn flush(&mut self) -> SinkResult<()> {
        io::stdout().lock().flush()
    }
}
