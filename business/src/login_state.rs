//! Submission of validated credentials.
//!
//! `send_login_request` flips `loading` on before the request task exists, and
//! `LoginCommand` writes the session before it clears `loading`, both through
//! the same ordered channel. A render can therefore never observe
//! `loading == false` while a request is still pending.

use std::any::Any;

use bookshelf_states::{
    Command, CommandFuture, CommandSnapshot, Compute, State, StateCtx, Updater, assign_impl,
};
use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

use crate::{BusinessConfig, CredentialPayload, LoginForm, Session, auth_api};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubmissionState {
    /// A sign-in request is in flight.
    pub loading: bool,
    /// Message for the error banner, from the last failed attempt.
    pub error: Option<String>,
}

impl SubmissionState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn loading() -> Self {
        Self {
            loading: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(message.into()),
        }
    }
}

impl State for SubmissionState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for SubmissionState {}

/// Payload handed to the next `LoginCommand` run.
#[derive(Debug, Default, Clone)]
pub struct PendingLogin {
    /// Set only between `send_login_request` and the command taking its snapshot.
    pub payload: Option<CredentialPayload>,
}

impl State for PendingLogin {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginDispatch {
    Sent,
    /// Another request is still in flight.
    Ignored,
}

pub fn send_login_request(ctx: &mut StateCtx, payload: CredentialPayload) -> LoginDispatch {
    if ctx.cached::<SubmissionState>().is_some_and(|s| s.loading) {
        warn!("send_login_request: request already in flight, ignoring");
        return LoginDispatch::Ignored;
    }

    ctx.updater().set(SubmissionState::loading());
    ctx.sync_computes();

    ctx.state_mut::<PendingLogin>().payload = Some(payload);
    ctx.dispatch::<LoginCommand>();
    // The running command already holds its own copy.
    ctx.state_mut::<PendingLogin>().payload = None;
    LoginDispatch::Sent
}

/// Drops whatever sign-in work belongs to a page that is no longer shown.
pub fn abandon_login(ctx: &mut StateCtx) {
    if ctx.cancel_command::<LoginCommand>() {
        info!("abandon_login: discarding in-flight sign-in");
    }
    ctx.state_mut::<PendingLogin>().payload = None;
    ctx.state_mut::<LoginForm>().reset();
    ctx.updater().set(SubmissionState::idle());
    ctx.sync_computes();
}

#[derive(Debug, Default)]
pub struct LoginCommand;

impl Command for LoginCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, cancel: CancellationToken) -> CommandFuture {
        let api_url = snap.state::<BusinessConfig>().api_url();
        let payload = snap.state::<PendingLogin>().payload.clone();

        Box::pin(async move {
            let Some(payload) = payload else {
                warn!("LoginCommand: no pending credentials");
                updater.set(SubmissionState::idle());
                return;
            };

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!("LoginCommand: cancelled, response discarded");
                    return;
                }
                result = auth_api::login(&api_url, &payload) => result,
            };

            match result {
                Ok(token) => {
                    info!("LoginCommand: signed in as {}", payload.email);
                    updater.set(Session::new(token));
                    updater.set(SubmissionState::idle());
                }
                Err(e) => {
                    error!("LoginCommand: {e}");
                    updater.set(SubmissionState::failed(e.user_message()));
                }
            }
        })
    }
}
