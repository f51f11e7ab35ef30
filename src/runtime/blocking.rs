use std::sync::Arc;

use tokio::time::Duration;
use tracing::debug;

use crate::{
    core::serialized::{EmitError, SerializedSink},
    types::WorkerId,
};

use super::{
    launcher::{LaunchConfig, LaunchError},
    report::{panic_message, LaunchReport, WorkerOutcome},
    worker::{run_task, Worker},
};

/// Runs `count` workers on the tokio blocking pool and awaits all of them.
///
/// The sink is shared by `Arc`, so workers keep it alive even when the join
/// times out. A timeout returns [`LaunchError::TimedOut`] and leaves the
/// stragglers running; blocking-pool tasks cannot be aborted.
///
/// `thread_name_prefix` and `stack_size` are ignored here; the runtime's
/// blocking pool owns its threads.
pub async fn launch_blocking<F>(
    sink: Arc<SerializedSink>,
    count: usize,
    config: &LaunchConfig,
    work: F,
) -> Result<LaunchReport, LaunchError>
where
    F: Fn(&Worker<'_>) -> Result<(), EmitError> + Send + Sync + 'static,
{
    let work = Arc::new(work);
    debug!(workers = count, "launching blocking workers");

    let mut handles = Vec::with_capacity(count);
    for idx in 0..count {
        let id = WorkerId::Index(idx);
        let worker_id = id.clone();
        let sink = Arc::clone(&sink);
        let work = Arc::clone(&work);
        let handle = tokio::task::spawn_blocking(move || {
            let worker = Worker::new(worker_id, &sink);
            run_task(&worker, |w| (*work)(w))
        });
        handles.push((id, handle));
    }

    let join_all = async move {
        let mut report = LaunchReport::default();
        for (id, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) if err.is_panic() => WorkerOutcome::Panicked {
                    message: panic_message(err.into_panic()),
                },
                Err(err) => return Err(LaunchError::from(err)),
            };
            report.record(id, outcome);
        }
        Ok(report)
    };

    let report = match config.join_timeout_ms {
        Some(waited_ms) => tokio::time::timeout(Duration::from_millis(waited_ms), join_all)
            .await
            .map_err(|_| LaunchError::TimedOut { waited_ms })??,
        None => join_all.await?,
    };
    debug!(
        workers = report.len(),
        emitted = report.total_emitted(),
        "all blocking workers joined"
    );
    Ok(report)
}
