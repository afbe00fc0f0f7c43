use bookshelf_business::{Route, navigate};
use egui::{Align, Layout, Response, Ui};

use crate::state::State;

/// Placeholder until sign-up exists.
pub fn register_page(state: &mut State, ui: &mut Ui) -> Response {
    let mut back = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading("Join Online Library");
            ui.add_space(16.0);
            ui.label("Registration is not available yet.");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Already have an account?");
                back = ui.link("Sign In").clicked();
            });
        })
        .response;

    if back {
        navigate(&mut state.ctx, Route::Login);
    }

    response
}
