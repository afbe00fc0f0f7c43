use std::any::{Any, type_name};

use log::error;

/// A value owned by [`crate::StateCtx`].
///
/// The UI mutates states directly through `StateCtx::state_mut`; async commands
/// only ever see the owned clone returned by [`State::snapshot`].
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Replace `self` with a boxed value of the same type sent through an `Updater`.
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);

    /// Owned copy handed to commands. `None` keeps the value out of command snapshots.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Shared `assign_box` body: downcast and overwrite, logging on type mismatch.
pub fn assign_impl<T: Any>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => error!("assign_impl: update is not a {}", type_name::<T>()),
    }
}
