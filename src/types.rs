//! Worker identities and message values.

use std::{
    fmt,
    thread::{self, ThreadId},
};

/// Identity token attached to every emitted line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorkerId {
    /// Position assigned by the launcher.
    Index(usize),
    /// Caller-chosen name.
    Name(String),
    /// OS thread the message was produced on.
    Thread(ThreadId),
}

impl WorkerId {
    /// Identity of the calling OS thread.
    pub fn current_thread() -> Self {
        Self::Thread(thread::current().id())
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "{idx}"),
            Self::Name(name) => f.write_str(name),
            // ThreadId only exposes Debug.
            Self::Thread(id) => write!(f, "{id:?}"),
        }
    }
}

impl From<usize> for WorkerId {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

impl From<&str> for WorkerId {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for WorkerId {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<ThreadId> for WorkerId {
    fn from(value: ThreadId) -> Self {
        Self::Thread(value)
    }
}

/// Text plus the identity of the worker that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Free-form text, possibly empty.
    pub text: String,
    /// Producer identity.
    pub worker: WorkerId,
}

impl Message {
    /// Builds a message for `worker`.
    pub fn new(text: impl Into<String>, worker: impl Into<WorkerId>) -> Self {
        Self {
            text: text.into(),
            worker: worker.into(),
        }
    }

    /// Builds a message tagged with the calling thread's id.
    pub fn from_current_thread(text: impl Into<String>) -> Self {
        Self::new(text, WorkerId::current_thread())
    }
}
