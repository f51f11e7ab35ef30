use std::{
    fmt::{self, Display},
    io::ErrorKind,
};

use parking_lot::Mutex;

use crate::{
    format::LineFormat,
    sink::{OutputSink, SinkError},
    types::{Message, WorkerId},
};

/// Failure of a single `emit` call.
///
/// The gate is always released before this is returned, so the sink stays
/// usable for every other caller.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The underlying sink rejected the write.
    #[error("write failed: {0}")]
    Write(#[from] SinkError),
    /// The sink stopped accepting bytes before the line was complete.
    #[error("incomplete write: {written} of {expected} bytes")]
    Incomplete {
        /// Bytes accepted before the sink returned zero.
        written: usize,
        /// Length of the rendered line.
        expected: usize,
    },
    /// The line was fully written but the follow-up flush failed.
    ///
    /// Retrying the emit would write the line a second time.
    #[error("flush failed after write: {0}")]
    Flush(SinkError),
    /// The line could not be rendered.
    #[error("format failed: {0}")]
    Format(#[from] serde_json::Error),
}

impl EmitError {
    /// True when the full line reached the underlying sink despite the error.
    pub fn line_written(&self) -> bool {
        matches!(self, Self::Flush(_))
    }
}

/// Tunables for [`SerializedSink`].
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Line shape.
    pub format: LineFormat,
    /// Flush the underlying sink after every line, still under the gate.
    pub flush_each_line: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            format: LineFormat::Text,
            flush_each_line: true,
        }
    }
}

/// One output channel shared by any number of concurrent producers.
///
/// Each `emit` renders its line outside the gate, then writes it as one unit
/// while holding the gate. Lines from different callers never interleave.
/// Order across callers is whatever order they acquire the gate in.
pub struct SerializedSink {
    gate: Mutex<Box<dyn OutputSink>>,
    config: SinkConfig,
}

impl fmt::Debug for SerializedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializedSink")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SerializedSink {
    /// Wraps `sink` with the default text format.
    pub fn new(sink: impl OutputSink + 'static) -> Self {
        Self::with_config(sink, SinkConfig::default())
    }

    /// Wraps `sink` with an explicit config.
    pub fn with_config(sink: impl OutputSink + 'static, config: SinkConfig) -> Self {
        Self::from_boxed(Box::new(sink), config)
    }

    /// Wraps an already boxed sink.
    pub fn from_boxed(sink: Box<dyn OutputSink>, config: SinkConfig) -> Self {
        Self {
            gate: Mutex::new(sink),
            config,
        }
    }

    /// Active config.
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Writes one line for `identity`, blocking until it is fully written.
    pub fn emit(&self, text: &str, identity: impl Display) -> Result<(), EmitError> {
        let line = self.config.format.render(text, &identity)?;
        self.write_line(line.as_bytes())
    }

    /// Writes `message` as one line.
    pub fn emit_message(&self, message: &Message) -> Result<(), EmitError> {
        self.emit(&message.text, &message.worker)
    }

    /// Writes one line tagged with the calling thread's id.
    pub fn emit_from_current_thread(&self, text: &str) -> Result<(), EmitError> {
        self.emit(text, WorkerId::current_thread())
    }

    /// Releases the underlying sink. Only possible once no worker borrows `self`.
    pub fn into_inner(self) -> Box<dyn OutputSink> {
        self.gate.into_inner()
    }

    fn write_line(&self, line: &[u8]) -> Result<(), EmitError> {
        // Guard drops on every return and on unwind; parking_lot never poisons.
        let mut out = self.gate.lock();
        write_all(&mut **out, line)?;
        if self.config.flush_each_line {
            out.flush().map_err(EmitError::Flush)?;
        }
        Ok(())
    }
}

fn write_all(out: &mut dyn OutputSink, line: &[u8]) -> Result<(), EmitError> {
    let expected = line.len();
    let mut rest = line;
    while !rest.is_empty() {
        match out.write(rest) {
            Ok(0) => {
                return Err(EmitError::Incomplete {
                    written: expected - rest.len(),
                    expected,
                });
            }
            Ok(n) => rest = &rest[n.min(rest.len())..],
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(EmitError::Write(err)),
        }
    }
    Ok(())
}
