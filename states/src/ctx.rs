use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, VecDeque};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use log::{debug, error, warn};
#[cfg(not(target_arch = "wasm32"))]
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::{
    Command, CommandFuture, CommandSnapshot, Compute, Error, State, StateRuntime, TaskHandle, TaskId, Updater,
};

struct Slot {
    name: &'static str,
    value: Box<dyn State>,
    revision: u64,
}

impl Slot {
    fn new<T: State>(value: T) -> Self {
        Self {
            name: type_name::<T>(),
            value: Box::new(value),
            revision: 0,
        }
    }
}

/// Owner of every state, compute and command of the application.
///
/// Lives on the UI thread. Async work only talks back through [`Updater`]s, and
/// nothing reaches the slots until [`StateCtx::sync_computes`] runs.
pub struct StateCtx {
    runtime: StateRuntime,

    states: BTreeMap<TypeId, Slot>,
    computes: BTreeMap<TypeId, Slot>,
    commands: BTreeMap<TypeId, Arc<dyn Command>>,

    queue: VecDeque<(TypeId, &'static str)>,
    running: BTreeMap<TypeId, TaskHandle>,
    generation: u64,

    #[cfg(not(target_arch = "wasm32"))]
    tasks: JoinSet<()>,
}

impl Debug for StateCtx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.values().map(|s| s.name).collect::<Vec<_>>())
            .field(
                "computes",
                &self.computes.values().map(|s| s.name).collect::<Vec<_>>(),
            )
            .field("queued", &self.queue.len())
            .field("running", &self.running.len())
            .finish_non_exhaustive()
    }
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        Self {
            runtime: StateRuntime::new(),
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: VecDeque::new(),
            running: BTreeMap::new(),
            generation: 0,
            #[cfg(not(target_arch = "wasm32"))]
            tasks: JoinSet::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Slot::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.computes.insert(TypeId::of::<T>(), Slot::new(compute));
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        self.commands.insert(TypeId::of::<C>(), Arc::new(command));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "StateCtx::state"))
    }

    /// # Panics
    /// Panics if `T` was never added with [`StateCtx::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|e| panic!("{e}"))
    }

    /// Mutable access for UI-side edits. Bumps the revision of `T`.
    ///
    /// # Panics
    /// Panics if `T` was never added with [`StateCtx::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let Some(slot) = self.states.get_mut(&TypeId::of::<T>()) else {
            panic!(
                "{}",
                Error::state_not_found(type_name::<T>(), "StateCtx::state_mut")
            );
        };
        slot.revision += 1;
        slot.value
            .as_any_mut()
            .downcast_mut::<T>()
            .unwrap_or_else(|| panic!("slot for {} holds another type", type_name::<T>()))
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
    }

    /// How many times `T` has been written. `0` for unknown types.
    pub fn revision<T: State>(&self) -> u64 {
        let id = TypeId::of::<T>();
        self.states
            .get(&id)
            .or_else(|| self.computes.get(&id))
            .map_or(0, |slot| slot.revision)
    }

    /// An unbound updater; its writes are never discarded.
    pub fn updater(&self) -> Updater {
        self.runtime.updater()
    }

    /// Applies every pending update in send order and reaps finished tasks.
    ///
    /// Returns the number of updates applied.
    pub fn sync_computes(&mut self) -> usize {
        self.reap_finished();

        let mut applied = 0;
        for update in self.runtime.drain() {
            let slot = if self.computes.contains_key(&update.id) {
                self.computes.get_mut(&update.id)
            } else {
                self.states.get_mut(&update.id)
            };

            match slot {
                Some(slot) => {
                    slot.value.assign_box(update.value);
                    slot.revision += 1;
                    applied += 1;
                }
                None => warn!("sync_computes: {} is not registered, dropped", update.name),
            }
        }
        applied
    }

    pub fn enqueue_command<C: Command>(&mut self) {
        self.queue.push_back((TypeId::of::<C>(), type_name::<C>()));
    }

    pub fn flush_commands(&mut self) {
        while let Some((id, name)) = self.queue.pop_front() {
            self.spawn_command(id, name);
        }
    }

    pub fn dispatch<C: Command>(&mut self) {
        self.enqueue_command::<C>();
        self.flush_commands();
    }

    /// Cancels the running task of `C`, if any. Returns whether one was running.
    pub fn cancel_command<C: Command>(&mut self) -> bool {
        match self.running.remove(&TypeId::of::<C>()) {
            Some(handle) if !handle.is_finished() => {
                debug!(
                    "cancel_command: cancelling {} (generation {})",
                    type_name::<C>(),
                    handle.id().generation()
                );
                handle.cancel();
                true
            }
            _ => false,
        }
    }

    /// Spawned tasks not yet reaped. Always `0` on wasm32.
    pub fn task_count(&self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.tasks.len()
        }

        #[cfg(target_arch = "wasm32")]
        {
            0
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    /// Cancels every running command and waits for the tasks to unwind.
    pub async fn shutdown(&mut self) {
        for (_, handle) in std::mem::take(&mut self.running) {
            handle.cancel();
        }
        self.queue.clear();

        #[cfg(not(target_arch = "wasm32"))]
        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                error!("shutdown: task failed: {e}");
            }
        }
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, slot) in &self.states {
            if let Some(value) = slot.value.snapshot() {
                snap.insert_state(*id, value);
            }
        }
        for (id, slot) in &self.computes {
            if let Some(value) = slot.value.snapshot() {
                snap.insert_compute(*id, value);
            }
        }
        snap
    }

    fn spawn_command(&mut self, id: TypeId, name: &'static str) {
        let Some(command) = self.commands.get(&id).map(Arc::clone) else {
            error!(
                "{}",
                Error::command_not_found(name, "StateCtx::flush_commands")
            );
            return;
        };

        if let Some(previous) = self.running.remove(&id) {
            debug!(
                "{name}: superseding generation {}",
                previous.id().generation()
            );
            previous.cancel();
        }

        self.generation += 1;
        let token = CancellationToken::new();
        let handle = TaskHandle::new(TaskId::new(id, self.generation), token.clone());
        let updater = self.runtime.updater().bound_to(token.clone());
        let guard = handle.finish_guard();
        let run = command.run(self.snapshot(), updater, token);
        let future: CommandFuture = Box::pin(async move {
            let _finished = guard;
            run.await;
        });

        debug!("{name}: spawned generation {}", self.generation);
        self.running.insert(id, handle);

        #[cfg(not(target_arch = "wasm32"))]
        self.tasks.spawn(future);

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(future);
    }

    fn reap_finished(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(e) = result {
                error!("command task failed: {e}");
            }
        }
        self.running.retain(|_, handle| !handle.is_finished());
    }
}
