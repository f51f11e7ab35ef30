//! Serializing gate in front of a single output sink.

/// The shared sink and its emit path.
pub mod serialized;
