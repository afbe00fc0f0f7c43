use std::{future::Future, pin::Pin};

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Manual-only side effect (network IO and friends).
///
/// Commands never touch the context directly: they read the snapshot taken at
/// dispatch time and report back through the updater. The returned future
/// should watch `cancel` and stop without writing once it fires.
pub trait Command: Send + Sync + 'static {
    fn run(&self, snap: CommandSnapshot, updater: Updater, cancel: CancellationToken)
    -> CommandFuture;
}
