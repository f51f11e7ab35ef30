//! Line rendering for emitted messages.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Shape of one emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// `Message: "<text>" from thread: <identity>`
    ///
    /// Text is written verbatim. An embedded `\n` still goes out in the same
    /// single write, but a reader splitting on newlines sees several lines;
    /// use [`LineFormat::Json`] when one record per line matters.
    #[default]
    Text,
    /// One JSON object per line with `message` and `worker` fields.
    Json,
}

/// JSON line payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonLine {
    /// Emitted text.
    pub message: String,
    /// Rendered worker identity.
    pub worker: String,
}

#[derive(Serialize)]
struct JsonLineRef<'a> {
    message: &'a str,
    worker: String,
}

impl LineFormat {
    /// Renders a complete line, terminator included.
    pub fn render(self, text: &str, identity: &dyn Display) -> Result<String, serde_json::Error> {
        let mut line = match self {
            Self::Text => format!("Message: \"{text}\" from thread: {identity}"),
            Self::Json => serde_json::to_string(&JsonLineRef {
                message: text,
                worker: identity.to_string(),
            })?,
        };
        line.push('\n');
        Ok(line)
    }
}
