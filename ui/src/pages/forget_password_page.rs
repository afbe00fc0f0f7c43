use bookshelf_business::{Route, navigate};
use egui::{Align, Layout, Response, Ui};

use crate::state::State;

/// Placeholder until password recovery exists.
pub fn forget_password_page(state: &mut State, ui: &mut Ui) -> Response {
    let mut back = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading("Forget Password");
            ui.add_space(16.0);
            ui.label("Password recovery is not available yet.");
            ui.add_space(8.0);
            back = ui.link("Back to Sign In").clicked();
        })
        .response;

    if back {
        navigate(&mut state.ctx, Route::Login);
    }

    response
}
