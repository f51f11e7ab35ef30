use std::sync::Arc;

use parking_lot::Mutex;

use super::{OutputSink, SinkResult};

/// Shared in-memory buffer.
///
/// Clones share the same bytes, so a test can hand one clone to the gate and
/// keep another to read the captured output back.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl BufferSink {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.bytes.lock().clone()
    }

    /// Captured output decoded lossily as UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Captured output split on `\n`, without the terminators.
    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }

    /// Number of bytes captured.
    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OutputSink for BufferSink {
    fn write(&mut self, bytes: &[u8]) -> SinkResult<usize> {
        self.bytes.lock().extend_from_slice(bytes);
        Ok(bytes.len())
    }
}
