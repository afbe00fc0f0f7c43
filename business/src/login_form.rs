//! Sign-in form controller.
//!
//! Validation only runs on submit. Editing a field clears the error shown for
//! that field but never re-validates it.

use std::any::Any;

use bookshelf_states::{State, StateCtx, assign_impl};
use log::{info, warn};

use crate::{
    CredentialPayload, FieldKey, LoginDispatch, SubmissionState, ValidationError,
    ValidationResult, send_login_request, validate_credentials,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Pristine,
    Editing,
    Validating,
    ValidFailed,
    ValidPassed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The payload passed validation and was handed to the submit callback.
    Forwarded,
    Invalid(ValidationResult),
    /// A submission is already in flight; nothing was validated or sent.
    Busy,
}

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    /// Current field values.
    pub payload: CredentialPayload,
    /// Where the form is in its edit/validate cycle.
    pub phase: FormPhase,
    /// Inline errors from the last submit, minus fields edited since.
    pub errors: ValidationResult,
}

impl LoginForm {
    pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>) {
        self.payload.set(key, value);
        self.errors.clear(key);
        self.phase = FormPhase::Editing;
    }

    /// Validates the current payload and forwards it to `on_valid` when clean.
    ///
    /// `on_valid` runs at most once and never sees an invalid payload.
    pub fn submit<F>(&mut self, on_valid: F) -> SubmitOutcome
    where
        F: FnOnce(CredentialPayload),
    {
        self.phase = FormPhase::Validating;
        let result = validate_credentials(&self.payload);

        if !result.is_valid() {
            self.phase = FormPhase::ValidFailed;
            self.errors = result.clone();
            return SubmitOutcome::Invalid(result);
        }

        self.phase = FormPhase::ValidPassed;
        self.errors = result;
        on_valid(self.payload.clone());
        self.phase = FormPhase::Editing;
        SubmitOutcome::Forwarded
    }

    pub fn field_error(&self, key: FieldKey) -> Option<&ValidationError> {
        self.errors.error(key)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl State for LoginForm {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Submit handler wired to the sign-in button and the Enter key.
pub fn submit_login_form(ctx: &mut StateCtx) -> SubmitOutcome {
    if ctx.cached::<SubmissionState>().is_some_and(|s| s.loading) {
        warn!("submit_login_form: submission in flight, ignoring");
        return SubmitOutcome::Busy;
    }

    let mut forwarded = None;
    let outcome = ctx
        .state_mut::<LoginForm>()
        .submit(|payload| forwarded = Some(payload));

    if let Some(payload) = forwarded {
        info!("submit_login_form: credentials valid, sending");
        if send_login_request(ctx, payload) == LoginDispatch::Ignored {
            return SubmitOutcome::Busy;
        }
    }

    outcome
}
