use crate::State;

/// A cached result produced by commands.
///
/// Computes are read through `StateCtx::cached` and are only written through an
/// [`crate::Updater`], so a network response can never race a UI-side mutation.
pub trait Compute: State {}
