//! Sign-in logic of the bookshelf front end, independent of any UI toolkit.

mod auth_api;
mod auth_gate;
mod config;
mod credentials;
pub mod http;
mod login_form;
mod login_state;
mod route;
mod session;
mod validation;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod test_utils;

pub use auth_api::{LoginError, login};
pub use auth_gate::{AuthGate, GateOutcome, check_and_redirect};
pub use config::{BusinessConfig, ConfigError};
pub use credentials::{
    CredentialPayload, FieldDescriptor, FieldKey, InputType, LOGIN_FIELDS, login_fields,
};
pub use login_form::{FormPhase, LoginForm, SubmitOutcome, submit_login_form};
pub use login_state::{
    LoginCommand, LoginDispatch, PendingLogin, SubmissionState, abandon_login,
    send_login_request,
};
pub use route::{Route, navigate};
pub use session::{LogoutCommand, Session, write_session};
pub use validation::{
    ValidationError, ValidationErrorKind, ValidationResult, is_valid_email, validate_credentials,
};

use bookshelf_states::StateCtx;

/// A context with every state, compute and command of the sign-in flow registered.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();

    ctx.add_state(config);
    ctx.add_state(Route::default());
    ctx.add_state(LoginForm::default());
    ctx.add_state(PendingLogin::default());

    ctx.record_compute(Session::default());
    ctx.record_compute(SubmissionState::default());

    ctx.record_command(LoginCommand);
    ctx.record_command(LogoutCommand);

    ctx
}
