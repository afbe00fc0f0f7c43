//! Task identity and cooperative cancellation for spawned commands.
//!
//! Every dispatch gets a fresh `TaskId` (command type + generation) and a
//! `CancellationToken` from `tokio_util`. The token is shared by the command's
//! future and by its `Updater`, so cancelling a task both stops the work at
//! its next checkpoint and discards anything it would still have written.

use std::any::TypeId;

use tokio_util::sync::{CancellationToken, DropGuard};

/// Identifies one spawned command run.
///
/// The generation grows monotonically across the whole context, so two runs of
/// the same command never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle kept by the context for a running command.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
    finished: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self {
            id,
            cancel_token,
            finished: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Clone of the token, for work that needs to watch for cancellation.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Requests cooperative cancellation. The task is not aborted; it is
    /// expected to notice via `cancelled()` and return without writing.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Moved into the task's future; dropping it marks the task finished.
    pub fn finish_guard(&self) -> DropGuard {
        self.finished.clone().drop_guard()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_cancelled()
    }
}
