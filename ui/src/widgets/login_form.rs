//! Sign-in form.
//!
//! Renders the fields of `login_fields()` in order and forwards edits, submits
//! and link clicks to the business layer. All decisions (validation, the
//! in-flight guard, navigation targets) live there.

use bookshelf_business::{
    CredentialPayload, FieldKey, LoginForm, Route, SubmissionState, login_fields, navigate,
    submit_login_form,
};
use bookshelf_states::StateCtx;
use egui::{Align, Button, Key, Layout, Response, TextEdit, Ui};

use crate::utils::colors::COLOR_RED;

enum Action {
    Submit,
    Navigate(Route),
}

fn field_mut(payload: &mut CredentialPayload, key: FieldKey) -> &mut String {
    match key {
        FieldKey::Email => &mut payload.email,
        FieldKey::Password => &mut payload.password,
    }
}

pub fn login_form(ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let submission = ctx
        .cached::<SubmissionState>()
        .cloned()
        .unwrap_or_default();
    let form = ctx.state::<LoginForm>().clone();

    let mut edited = form.payload.clone();
    let mut action = None;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading("Sign In");
            ui.add_space(24.0);

            if let Some(error) = &submission.error {
                ui.colored_label(COLOR_RED, error);
                ui.add_space(8.0);
            }

            for field in login_fields() {
                ui.label(field.label);
                let input = ui.add(
                    TextEdit::singleline(field_mut(&mut edited, field.key))
                        .id_salt(field.id)
                        .password(field.input_type.is_masked()),
                );
                if input.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    action = Some(Action::Submit);
                }
                if let Some(error) = form.field_error(field.key) {
                    ui.colored_label(COLOR_RED, error.to_string());
                }
                ui.add_space(8.0);
            }

            if ui.link("Forget Password?").clicked() {
                action = Some(Action::Navigate(Route::ForgetPassword));
            }
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if submission.loading {
                    ui.spinner();
                }
                if ui
                    .add_enabled(!submission.loading, Button::new("Sign In"))
                    .clicked()
                {
                    action = Some(Action::Submit);
                }
            });

            ui.add_space(16.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.label("New to Online Library?");
                if ui.link("Join Now").clicked() {
                    action = Some(Action::Navigate(Route::Register));
                }
            });
        })
        .response;

    for key in FieldKey::ALL {
        if edited.get(key) != form.payload.get(key) {
            ctx.state_mut::<LoginForm>()
                .set_field(key, edited.get(key));
        }
    }

    match action {
        Some(Action::Submit) => {
            submit_login_form(ctx);
        }
        Some(Action::Navigate(route)) => navigate(ctx, route),
        None => {}
    }

    response
}
