//! Worker launch harness around a shared [`crate::core::serialized::SerializedSink`].

/// Async launcher on the tokio blocking pool.
pub mod blocking;
/// Scoped-thread launcher and its config/errors.
pub mod launcher;
/// Per-worker outcomes collected after join.
pub mod report;
/// Worker handle passed to each task.
pub mod worker;
