use egui::{Response, Ui};

use crate::{state::State, widgets};

pub fn login_page(state: &mut State, ui: &mut Ui) -> Response {
    widgets::login_form(&mut state.ctx, ui)
}
