use bookshelf_business::{BusinessConfig, Session, build_state_ctx, write_session};
use bookshelf_states::StateCtx;
use log::{error, info};

/// eframe storage key of the persisted [`Session`].
pub const SESSION_KEY: &str = "bookshelf_session";

/// The main application state.
pub struct State {
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        let config = BusinessConfig::from_env().unwrap_or_else(|e| {
            error!("{e}, falling back to build defaults");
            BusinessConfig::default()
        });

        Self {
            ctx: build_state_ctx(config),
        }
    }
}

impl State {
    pub fn test(base_url: String) -> Self {
        Self {
            ctx: build_state_ctx(BusinessConfig::new(base_url)),
        }
    }

    /// Puts a session loaded from storage back into the context.
    pub fn restore_session(&mut self, session: Session) {
        if session.is_authenticated() {
            info!("restoring persisted session");
        }
        write_session(&self.ctx, session.token);
        self.ctx.sync_computes();
    }

    pub fn session(&self) -> Session {
        self.ctx.cached::<Session>().cloned().unwrap_or_default()
    }
}
