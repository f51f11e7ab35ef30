use std::any::Any;

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::{core::serialized::EmitError, types::WorkerId};

/// How a single worker ended.
#[derive(Debug)]
pub enum WorkerOutcome {
    /// The task returned `Ok`.
    Completed {
        /// Lines emitted.
        emitted: usize,
    },
    /// The task returned an emit error.
    Failed {
        /// Lines emitted before the failure.
        emitted: usize,
        /// Error the task returned.
        error: EmitError,
    },
    /// The task panicked.
    Panicked {
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl WorkerOutcome {
    /// Lines emitted, zero for a panicked worker.
    pub fn emitted(&self) -> usize {
        match self {
            Self::Completed { emitted } | Self::Failed { emitted, .. } => *emitted,
            Self::Panicked { .. } => 0,
        }
    }

    /// True for [`WorkerOutcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Outcomes of every launched worker, keyed by identity.
#[derive(Debug, Default)]
pub struct LaunchReport {
    outcomes: HashMap<WorkerId, WorkerOutcome>,
}

impl LaunchReport {
    pub(crate) fn record(&mut self, id: WorkerId, outcome: WorkerOutcome) {
        match &outcome {
            WorkerOutcome::Completed { emitted } => {
                debug!(worker = %id, emitted, "worker completed");
            }
            WorkerOutcome::Failed { emitted, error } => {
                warn!(worker = %id, emitted, %error, "worker stopped on emit failure");
            }
            WorkerOutcome::Panicked { message } => {
                warn!(worker = %id, %message, "worker panicked");
            }
        }
        self.outcomes.insert(id, outcome);
    }

    /// Outcome for `id`, if it was launched.
    pub fn get(&self, id: &WorkerId) -> Option<&WorkerOutcome> {
        self.outcomes.get(id)
    }

    /// Number of workers joined.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no worker was launched.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// All outcomes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&WorkerId, &WorkerOutcome)> {
        self.outcomes.iter()
    }

    /// Outcomes other than [`WorkerOutcome::Completed`].
    pub fn failures(&self) -> impl Iterator<Item = (&WorkerId, &WorkerOutcome)> {
        self.outcomes.iter().filter(|(_, outcome)| !outcome.is_completed())
    }

    /// True when every worker completed.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Sum of lines emitted across workers.
    pub fn total_emitted(&self) -> usize {
        self.outcomes.values().map(WorkerOutcome::emitted).sum()
    }
}

pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast_ref::<&'static str>() {
            Some(message) => (*message).to_string(),
            None => "non-string panic payload".to_string(),
        },
    }
}
