use std::{
    any::{Any, TypeId, type_name},
    fmt::{Debug, Formatter},
};

use flume::{Receiver, Sender};
use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::State;

pub(crate) struct Update {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) value: Box<dyn Any + Send>,
}

/// Channel pair carrying updates from commands back to the owning `StateCtx`.
pub struct StateRuntime {
    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl Debug for StateRuntime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateRuntime")
            .field("pending", &self.recv.len())
            .finish()
    }
}

impl Default for StateRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRuntime {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self { send, recv }
    }

    pub fn updater(&self) -> Updater {
        Updater {
            send: self.send.clone(),
            cancel: None,
        }
    }

    pub(crate) fn drain(&self) -> Vec<Update> {
        self.recv.try_iter().collect()
    }
}

/// Posts new values for states and computes.
///
/// Updaters handed to a command are bound to that command's cancellation token:
/// once the task is cancelled every further `set` is dropped, so a response that
/// arrives after the page went away never reaches the context.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
    cancel: Option<CancellationToken>,
}

impl Debug for Updater {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("bound", &self.cancel.is_some())
            .finish()
    }
}

impl Updater {
    pub(crate) fn bound_to(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub fn set<T: State>(&self, value: T) {
        if self.is_cancelled() {
            debug!(
                "Updater: task cancelled, dropping update for {}",
                type_name::<T>()
            );
            return;
        }

        let update = Update {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            value: Box::new(value),
        };

        if self.send.send(update).is_err() {
            warn!(
                "Updater: context is gone, dropping update for {}",
                type_name::<T>()
            );
        }
    }
}
