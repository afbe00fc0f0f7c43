use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, Error, State};

#[derive(Default)]
struct SnapshotMap {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl SnapshotMap {
    fn get<T: Any>(&self) -> Option<&T> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }
}

/// Owned copies of the snapshot-able states and computes, taken at dispatch time.
#[derive(Default)]
pub struct CommandSnapshot {
    states: SnapshotMap,
    computes: SnapshotMap,
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_state(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.states.inner.insert(id, value);
    }

    pub(crate) fn insert_compute(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.computes.inner.insert(id, value);
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get::<T>()
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "CommandSnapshot"))
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&T, Error> {
        self.computes
            .get::<T>()
            .ok_or_else(|| Error::compute_not_found(type_name::<T>(), "CommandSnapshot"))
    }

    /// # Panics
    /// Panics if `T` was not registered or does not provide a snapshot.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|e| panic!("{e}"))
    }

    /// # Panics
    /// Panics if `T` was not registered or does not provide a snapshot.
    pub fn compute<T: Compute>(&self) -> &T {
        self.try_compute::<T>().unwrap_or_else(|e| panic!("{e}"))
    }
}
