//! Mock-server harness for the sign-in commands.
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_login_token("abc").await;
//! send_login_request(&mut test_ctx.ctx, CredentialPayload::new("a@b.com", "secret"));
//! test_ctx.flush_and_wait().await;
//! ```

use std::time::{Duration, Instant};

use bookshelf_states::StateCtx;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{BusinessConfig, build_state_ctx};

pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let ctx = build_state_ctx(BusinessConfig::new(mock_server.uri()));
        Self { mock_server, ctx }
    }

    /// Flushes queued commands and syncs after every task that finishes.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let deadline = Instant::now() + Duration::from_secs(5);
        while self.ctx.task_count() > 0 {
            assert!(
                Instant::now() < deadline,
                "timed out with {} task(s) pending",
                self.ctx.task_count()
            );
            if tokio::time::timeout(Duration::from_secs(5), self.ctx.task_set_mut().join_next())
                .await
                .is_ok()
            {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
    }

    pub async fn mock_login(&self, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(template)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_login_token(&self, token: &str) {
        self.mock_login(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "token": token })),
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CredentialPayload, LoginDispatch, PendingLogin, Session, SubmissionState, abandon_login,
        send_login_request,
    };
    use wiremock::matchers::body_json;

    fn payload() -> CredentialPayload {
        CredentialPayload::new("a@b.com", "secret")
    }

    #[tokio::test]
    async fn loading_is_visible_before_request_completes() {
        let mut test_ctx = TestContext::new().await;
        test_ctx.mock_login_token("abc").await;

        assert_eq!(
            send_login_request(&mut test_ctx.ctx, payload()),
            LoginDispatch::Sent
        );
        assert_eq!(
            test_ctx.ctx.cached::<SubmissionState>(),
            Some(&SubmissionState::loading())
        );

        test_ctx.flush_and_wait().await;

        assert_eq!(
            test_ctx.ctx.cached::<Session>().and_then(Session::read),
            Some("abc")
        );
        assert_eq!(
            test_ctx.ctx.cached::<SubmissionState>(),
            Some(&SubmissionState::idle())
        );
    }

    #[tokio::test]
    async fn failure_keeps_session_and_reports_message() {
        let mut test_ctx = TestContext::new().await;
        test_ctx
            .mock_login(ResponseTemplate::new(500))
            .await;

        send_login_request(&mut test_ctx.ctx, payload());
        test_ctx.flush_and_wait().await;

        assert!(!test_ctx
            .ctx
            .cached::<Session>()
            .is_some_and(Session::is_authenticated));
        assert_eq!(
            test_ctx.ctx.cached::<SubmissionState>(),
            Some(&SubmissionState::failed("Server error (status 500)"))
        );
    }

    #[tokio::test]
    async fn abandoned_request_is_discarded() {
        let mut test_ctx = TestContext::new().await;
        test_ctx
            .mock_login(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "token": "late" }))
                    .set_delay(Duration::from_millis(300)),
            )
            .await;

        send_login_request(&mut test_ctx.ctx, payload());
        abandon_login(&mut test_ctx.ctx);
        test_ctx.flush_and_wait().await;

        assert_eq!(test_ctx.ctx.cached::<Session>(), Some(&Session::default()));
        assert_eq!(
            test_ctx.ctx.cached::<SubmissionState>(),
            Some(&SubmissionState::idle())
        );
    }

    #[tokio::test]
    async fn credentials_are_cleared_once_dispatched() {
        let mut test_ctx = TestContext::new().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(serde_json::json!({ "email": "a@b.com", "password": "secret" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "token": "abc" })),
            )
            .expect(1)
            .mount(&test_ctx.mock_server)
            .await;

        send_login_request(&mut test_ctx.ctx, payload());
        assert!(test_ctx.ctx.state::<PendingLogin>().payload.is_none());

        test_ctx.flush_and_wait().await;

        assert!(test_ctx.ctx.state::<PendingLogin>().payload.is_none());
        assert_eq!(
            test_ctx.ctx.cached::<Session>().and_then(Session::read),
            Some("abc")
        );
    }
}
