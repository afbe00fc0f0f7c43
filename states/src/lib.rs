//! Reactive state context shared by the bookshelf business layer and UI.
//!
//! - [`State`]: values the UI edits directly (`StateCtx::state_mut`).
//! - [`Compute`]: cached results, written only through an [`Updater`].
//! - [`Command`]: manual-only async side effects, dispatched with
//!   `StateCtx::dispatch` and fed a [`CommandSnapshot`].
//!
//! Updates posted by commands are applied in send order on the next
//! `StateCtx::sync_computes`.

mod command;
mod compute;
mod ctx;
mod error;
mod runtime;
mod snapshot;
mod state;
mod task;

pub use command::{Command, CommandFuture};
pub use compute::Compute;
pub use ctx::StateCtx;
pub use error::Error;
pub use runtime::{StateRuntime, Updater};
pub use snapshot::CommandSnapshot;
pub use state::{State, assign_impl};
pub use task::{TaskHandle, TaskId};
