use bookshelf_business::{AuthGate, GateOutcome, Route, SubmissionState, abandon_login};
use egui::Ui;

use crate::{
    pages,
    state::{SESSION_KEY, State},
};

pub struct BookshelfApp {
    state: State,
    gate: AuthGate,
    // Page rendered by the previous pass, used to notice the sign-in page going away.
    shown: Option<Route>,
}

impl BookshelfApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            gate: AuthGate::default(),
            shown: None,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// One render pass: apply command results, run the gate, then draw the current page.
    pub fn ui(&mut self, ui: &mut Ui) {
        self.state.ctx.sync_computes();

        if let GateOutcome::Redirected(to) = self.gate.evaluate(&mut self.state.ctx) {
            log::info!("redirected to {}, skipping this pass", to.path());
            ui.ctx().request_repaint();
            return;
        }

        let route = *self.state.ctx.state::<Route>();
        if self.shown == Some(Route::Login) && route != Route::Login {
            abandon_login(&mut self.state.ctx);
        }
        self.shown = Some(route);

        match route {
            Route::Login => pages::login_page(&mut self.state, ui),
            Route::Library => pages::library_page(&mut self.state, ui),
            Route::ForgetPassword => pages::forget_password_page(&mut self.state, ui),
            Route::Register => pages::register_page(&mut self.state, ui),
        };

        let loading = self
            .state
            .ctx
            .cached::<SubmissionState>()
            .is_some_and(|s| s.loading);
        if loading || self.state.ctx.task_count() > 0 {
            ui.ctx().request_repaint();
        }
    }
}

impl eframe::App for BookshelfApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| self.ui(ui));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SESSION_KEY, &self.state.session());
    }
}
