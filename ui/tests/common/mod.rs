use std::time::Duration;

use bookshelf_ui::BookshelfApp;
use bookshelf_ui::state::State;
use egui_kittest::Harness;
use wiremock::MockServer;

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, BookshelfApp>,
}

impl<'a> TestCtx<'a> {
    pub async fn new_app() -> Self {
        Self::new_app_with(|_| {}).await
    }

    /// Builds the app after `prepare` had a chance to seed the state.
    pub async fn new_app_with(prepare: impl FnOnce(&mut State)) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let mut state = State::test(mock_server.uri());
        prepare(&mut state);

        let app = BookshelfApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, BookshelfApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Waits for every spawned command, then renders one more pass.
    pub async fn settle(&mut self) {
        loop {
            let ctx = &mut self.harness.state_mut().state_mut().ctx;
            if ctx.task_count() == 0 {
                break;
            }
            tokio::time::timeout(Duration::from_secs(5), ctx.task_set_mut().join_next())
                .await
                .expect("command should finish");
        }
        self.harness.step();
        self.harness.step();
    }
}
