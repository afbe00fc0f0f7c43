//! Landing page for signed-in readers.
//!
//! Without a session there is nothing to show here, so the page sends the
//! reader back to sign-in. "Sign Out" only clears the session; the navigation
//! follows on the pass that sees the cleared session.

use bookshelf_business::{LogoutCommand, Route, Session, navigate};
use egui::{Align, Layout, Response, RichText, Ui};

use crate::{state::State, utils::colors::COLOR_GREEN};

pub fn library_page(state: &mut State, ui: &mut Ui) -> Response {
    let signed_in = state
        .ctx
        .cached::<Session>()
        .is_some_and(Session::is_authenticated);

    if !signed_in {
        navigate(&mut state.ctx, Route::Login);
        return ui.label("Signed out");
    }

    let mut sign_out = false;
    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading("My Library");
            ui.add_space(24.0);
            ui.label(RichText::new("Signed in").color(COLOR_GREEN));
            ui.label("Welcome back to Online Library");
            ui.add_space(16.0);
            sign_out = ui.button("Sign Out").clicked();
        })
        .response;

    if sign_out {
        state.ctx.dispatch::<LogoutCommand>();
    }

    response
}

#[cfg(test)]
mod library_page_test {
    use bookshelf_business::{BusinessConfig, Route, build_state_ctx, write_session};
    use egui_kittest::Harness;
    use kittest::Queryable;

    use crate::state::State;

    fn state(token: Option<&str>) -> State {
        let ctx = build_state_ctx(BusinessConfig::new("http://127.0.0.1:9".to_string()));
        write_session(&ctx, token.map(str::to_string));
        let mut state = State { ctx };
        state.ctx.sync_computes();
        *state.ctx.state_mut::<Route>() = Route::Library;
        state
    }

    #[test]
    fn shows_welcome_and_sign_out() {
        let harness = Harness::new_ui_state(
            |ui, state: &mut State| {
                super::library_page(state, ui);
            },
            state(Some("abc")),
        );

        assert!(harness.query_by_label("My Library").is_some());
        assert!(harness.query_by_label_contains("Welcome").is_some());
        assert!(harness.query_by_label("Sign Out").is_some());
        assert_eq!(*harness.state().ctx.state::<Route>(), Route::Library);
    }

    #[test]
    fn without_session_goes_back_to_sign_in() {
        let harness = Harness::new_ui_state(
            |ui, state: &mut State| {
                super::library_page(state, ui);
            },
            state(None),
        );

        assert!(harness.query_by_label("Sign Out").is_none());
        assert_eq!(*harness.state().ctx.state::<Route>(), Route::Login);
    }
}
