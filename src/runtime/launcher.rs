use std::{io, thread};

use hashbrown::HashSet;
use tracing::debug;

use crate::{
    core::serialized::{EmitError, SerializedSink},
    types::WorkerId,
};

use super::{
    report::{panic_message, LaunchReport, WorkerOutcome},
    worker::{run_task, Worker},
};

/// Harness-level failures. Worker failures land in [`LaunchReport`] instead.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker {worker}: {source}")]
    Spawn {
        /// Worker that could not be started.
        worker: WorkerId,
        /// Underlying spawn error.
        source: io::Error,
    },
    /// Two tasks were given the same identity.
    #[error("duplicate worker identity {0}")]
    DuplicateWorker(WorkerId),
    /// Workers were still running when the join timeout expired.
    #[error("workers still running after {waited_ms} ms")]
    TimedOut {
        /// Configured timeout.
        waited_ms: u64,
    },
    /// A blocking-pool task was cancelled before it finished.
    #[error("worker task failed to join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Harness tunables.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Worker threads are named `<prefix>-<index>`.
    pub thread_name_prefix: String,
    /// Worker stack size in bytes; platform default when `None`.
    pub stack_size: Option<usize>,
    /// Only honoured by [`super::blocking::launch_blocking`].
    pub join_timeout_ms: Option<u64>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "worker".to_string(),
            stack_size: None,
            join_timeout_ms: None,
        }
    }
}

/// Runs every `(id, task)` pair on its own OS thread and joins them all.
///
/// Tasks borrow `sink` through a [`Worker`]; scoped threads guarantee every
/// task has returned before this function does. Identities must be distinct.
///
/// If a thread fails to spawn, the workers already started are still joined
/// before [`LaunchError::Spawn`] is returned.
pub fn launch<T, F>(
    sink: &SerializedSink,
    tasks: T,
    config: &LaunchConfig,
) -> Result<LaunchReport, LaunchError>
where
    T: IntoIterator<Item = (WorkerId, F)>,
    F: FnOnce(&Worker<'_>) -> Result<(), EmitError> + Send,
{
    let tasks: Vec<(WorkerId, F)> = tasks.into_iter().collect();
    ensure_distinct(tasks.iter().map(|(id, _)| id))?;
    debug!(workers = tasks.len(), "launching workers");

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(tasks.len());
        let mut spawn_err = None;

        for (idx, (id, task)) in tasks.into_iter().enumerate() {
            let mut builder =
                thread::Builder::new().name(format!("{}-{idx}", config.thread_name_prefix));
            if let Some(size) = config.stack_size {
                builder = builder.stack_size(size);
            }

            let worker_id = id.clone();
            let spawned = builder.spawn_scoped(scope, move || {
                let worker = Worker::new(worker_id, sink);
                run_task(&worker, task)
            });
            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(source) => {
                    spawn_err = Some(LaunchError::Spawn { worker: id, source });
                    break;
                }
            }
        }

        let mut report = LaunchReport::default();
        for (id, handle) in handles {
            let outcome = handle.join().unwrap_or_else(|payload| WorkerOutcome::Panicked {
                message: panic_message(payload),
            });
            report.record(id, outcome);
        }

        if let Some(err) = spawn_err {
            return Err(err);
        }
        debug!(
            workers = report.len(),
            emitted = report.total_emitted(),
            "all workers joined"
        );
        Ok(report)
    })
}

/// Starts `count` workers identified `0..count`, each running `work`.
pub fn launch_workers<F>(
    sink: &SerializedSink,
    count: usize,
    config: &LaunchConfig,
    work: F,
) -> Result<LaunchReport, LaunchError>
where
    F: Fn(&Worker<'_>) -> Result<(), EmitError> + Sync,
{
    let tasks = (0..count).map(|idx| (WorkerId::Index(idx), shared(&work)));
    launch(sink, tasks, config)
}

fn shared<'w, F>(work: &'w F) -> impl FnOnce(&Worker<'_>) -> Result<(), EmitError> + Send + 'w
where
    F: Fn(&Worker<'_>) -> Result<(), EmitError> + Sync,
{
    move |worker| work(worker)
}

pub(crate) fn ensure_distinct<'a>(
    ids: impl IntoIterator<Item = &'a WorkerId>,
) -> Result<(), LaunchError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LaunchError::DuplicateWorker(id.clone()));
        }
    }
    Ok(())
}
