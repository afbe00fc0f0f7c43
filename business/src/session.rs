use std::any::Any;

use bookshelf_states::{
    Command, CommandFuture, CommandSnapshot, Compute, State, StateCtx, Updater, assign_impl,
};
use log::info;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Process-wide authentication token.
///
/// Written only through an updater: by `LoginCommand` on success, by
/// `LogoutCommand`, and by the UI when restoring a persisted session.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// The current token; an empty string counts as no token.
    pub fn read(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }
}

impl State for Session {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for Session {}

/// Posts a new session value; visible after the next `sync_computes`.
pub fn write_session(ctx: &StateCtx, token: Option<String>) {
    ctx.updater().set(Session { token });
}

#[derive(Debug, Default)]
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, _cancel: CancellationToken) -> CommandFuture {
        let was_authenticated = snap
            .try_compute::<Session>()
            .is_ok_and(Session::is_authenticated);

        Box::pin(async move {
            if was_authenticated {
                info!("LogoutCommand: clearing session");
            }
            updater.set(Session::default());
        })
    }
}
