use std::cell::Cell;

use crate::{
    core::serialized::{EmitError, SerializedSink},
    types::WorkerId,
};

use super::report::WorkerOutcome;

/// Boxed task, for launching heterogeneous closures in one call.
pub type WorkerTask<'a> = Box<dyn FnOnce(&Worker<'_>) -> Result<(), EmitError> + Send + 'a>;

/// Boxes `f` as a [`WorkerTask`].
pub fn task<'a, F>(f: F) -> WorkerTask<'a>
where
    F: FnOnce(&Worker<'_>) -> Result<(), EmitError> + Send + 'a,
{
    Box::new(f)
}

/// A running worker's view of the shared sink.
///
/// Borrows the sink; the launcher guarantees the sink outlives every worker.
pub struct Worker<'a> {
    id: WorkerId,
    sink: &'a SerializedSink,
    emitted: Cell<usize>,
}

impl<'a> Worker<'a> {
    /// Binds `id` to `sink`.
    pub fn new(id: WorkerId, sink: &'a SerializedSink) -> Self {
        Self {
            id,
            sink,
            emitted: Cell::new(0),
        }
    }

    /// This worker's identity.
    pub fn id(&self) -> &WorkerId {
        &self.id
    }

    /// Emits `text` tagged with this worker's identity.
    ///
    /// A line whose flush failed is still counted; it is in the output.
    pub fn emit(&self, text: &str) -> Result<(), EmitError> {
        let res = self.sink.emit(text, &self.id);
        if res.as_ref().map_or_else(EmitError::line_written, |_| true) {
            self.emitted.set(self.emitted.get() + 1);
        }
        res
    }

    /// Lines written to the sink so far.
    pub fn emitted(&self) -> usize {
        self.emitted.get()
    }
}

pub(crate) fn run_task<F>(worker: &Worker<'_>, task: F) -> WorkerOutcome
where
    F: FnOnce(&Worker<'_>) -> Result<(), EmitError>,
{
    match task(worker) {
        Ok(()) => WorkerOutcome::Completed {
            emitted: worker.emitted(),
        },
        Err(error) => WorkerOutcome::Failed {
            emitted: worker.emitted(),
            error,
        },
    }
}
