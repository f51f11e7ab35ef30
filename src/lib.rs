//! Serialized line output shared by many concurrent producers.
//!
//! A [`core::serialized::SerializedSink`] owns one output channel behind a
//! gate. Any number of threads may call `emit` at once; each call's line is
//! written as one unit, never torn or interleaved with another, and is fully
//! written before `emit` returns.
//!
//! # Examples
//!
//! Two workers printing through one sink:
//! ```
//! use linegate::{
//!     core::serialized::SerializedSink,
//!     runtime::launcher::{launch_workers, LaunchConfig},
//!     sink::BufferSink,
//! };
//!
//! let buf = BufferSink::new();
//! let sink = SerializedSink::new(buf.clone());
//! let report = launch_workers(&sink, 2, &LaunchConfig::default(), |worker| {
//!     worker.emit("hello")
//! })
//! .expect("launch");
//!
//! assert!(report.is_clean());
//! assert_eq!(buf.lines().len(), 2);
//! ```
//!
//! Async launch on the tokio blocking pool, writing to stdout:
//! ```no_run
//! use std::sync::Arc;
//!
//! use linegate::{
//!     core::serialized::SerializedSink,
//!     runtime::{blocking::launch_blocking, launcher::LaunchConfig},
//!     sink::ConsoleSink,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let sink = Arc::new(SerializedSink::new(ConsoleSink));
//! let cfg = LaunchConfig { join_timeout_ms: Some(5_000), ..LaunchConfig::default() };
//! launch_blocking(sink, 4, &cfg, |worker| worker.emit("Hello from a worker!"))
//!     .await
//!     .expect("launch");
//! # }
//! ```
#![deny(missing_docs)]

/// Serializing gate and emit path.
pub mod core;
/// Line rendering.
pub mod format;
/// Worker launch harness.
pub mod runtime;
/// Output sink trait and implementations.
pub mod sink;
/// Worker identities and messages.
pub mod types;
