//! Keeps signed-in users off the sign-in page.
//!
//! The gate is re-evaluated only when the session or the route changed since
//! its last run, never from a timer.

use bookshelf_states::StateCtx;
use log::info;

use crate::{Route, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The route was changed; the caller must not render the old page this pass.
    Redirected(Route),
    Stay,
    /// Neither session nor route changed since the last evaluation.
    Unchanged,
}

pub fn check_and_redirect(session: &Session, route: &mut Route) -> GateOutcome {
    if *route == Route::Login && session.is_authenticated() {
        *route = Route::Library;
        return GateOutcome::Redirected(Route::Library);
    }
    GateOutcome::Stay
}

#[derive(Debug, Default)]
pub struct AuthGate {
    last_seen: Option<(u64, u64)>,
}

impl AuthGate {
    pub fn evaluate(&mut self, ctx: &mut StateCtx) -> GateOutcome {
        let key = (ctx.revision::<Session>(), ctx.revision::<Route>());
        if self.last_seen == Some(key) {
            return GateOutcome::Unchanged;
        }

        let session = ctx.cached::<Session>().cloned().unwrap_or_default();
        let mut route = *ctx.state::<Route>();
        let outcome = check_and_redirect(&session, &mut route);

        if let GateOutcome::Redirected(to) = outcome {
            info!("AuthGate: session present, redirecting to {}", to.path());
            *ctx.state_mut::<Route>() = route;
        }

        self.last_seen = Some((ctx.revision::<Session>(), ctx.revision::<Route>()));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write_session;

    fn ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Route::default());
        ctx.record_compute(Session::default());
        ctx
    }

    #[test]
    fn no_token_stays_on_login() {
        let mut route = Route::Login;
        assert_eq!(
            check_and_redirect(&Session::default(), &mut route),
            GateOutcome::Stay
        );
        assert_eq!(route, Route::Login);
    }

    #[test]
    fn empty_token_stays_on_login() {
        let mut route = Route::Login;
        assert_eq!(check_and_redirect(&Session::new(""), &mut route), GateOutcome::Stay);
    }

    #[test]
    fn token_redirects_from_login_to_library() {
        let mut route = Route::Login;
        assert_eq!(
            check_and_redirect(&Session::new("abc"), &mut route),
            GateOutcome::Redirected(Route::Library)
        );
        assert_eq!(route, Route::Library);
    }

    #[test]
    fn token_does_not_move_other_pages() {
        for start in [Route::Library, Route::Register, Route::ForgetPassword] {
            let mut route = start;
            assert_eq!(check_and_redirect(&Session::new("abc"), &mut route), GateOutcome::Stay);
            assert_eq!(route, start);
        }
    }

    #[test]
    fn evaluate_runs_once_per_transition() {
        let mut ctx = ctx();
        let mut gate = AuthGate::default();

        assert_eq!(gate.evaluate(&mut ctx), GateOutcome::Stay);
        assert_eq!(gate.evaluate(&mut ctx), GateOutcome::Unchanged);

        write_session(&ctx, Some("abc".to_string()));
        ctx.sync_computes();

        assert_eq!(gate.evaluate(&mut ctx), GateOutcome::Redirected(Route::Library));
        assert_eq!(*ctx.state::<Route>(), Route::Library);
        assert_eq!(gate.evaluate(&mut ctx), GateOutcome::Unchanged);
    }

    #[test]
    fn returning_to_login_while_signed_in_redirects_again() {
        let mut ctx = ctx();
        let mut gate = AuthGate::default();
        write_session(&ctx, Some("abc".to_string()));
        ctx.sync_computes();
        assert_eq!(gate.evaluate(&mut ctx), GateOutcome::Redirected(Route::Library));

        crate::navigate(&mut ctx, Route::Login);

        assert_eq!(gate.evaluate(&mut ctx), GateOutcome::Redirected(Route::Library));
    }
}
