//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Spawned requests send their `TaskStarted`/`TaskCompleted` events to
//! `inbox_tx`; the runtime drains `inbox_rx` each frame and feeds the events
//! through the reducer like any terminal input.
//!
//! The event loop blocks its thread on terminal polling, so it must run inside
//! a multi-threaded tokio runtime.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clothe_core::backend::BackendClient;
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskStarted};
use crate::effects::UiEffect;
use crate::events::{CallResult, UiEvent};
use crate::navigation::ViewId;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while a request is in flight or the user is typing.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Executes reducer effects. Split from `TuiRuntime` so it can run without a
/// terminal.
struct EffectExecutor {
    client: BackendClient,
    inbox_tx: UiEventSender,
}

impl EffectExecutor {
    /// Executes one effect; returns true when the app should quit.
    fn execute(&self, effect: UiEffect) -> bool {
        match effect {
            UiEffect::Quit => return true,
            UiEffect::CancelTask { view, token } => {
                if let Some(token) = token {
                    tracing::debug!(%view, "cancel task");
                    token.cancel();
                }
            }
            UiEffect::CallBackend {
                view,
                task,
                endpoint,
                user_id,
                text,
            } => {
                let client = self.client.clone();
                self.spawn_task(view, task, move |cancel| {
                    handlers::call_backend(client, endpoint, user_id, text, cancel)
                });
            }
        }
        false
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, view: ViewId, id: TaskId, f: F)
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = CallResult> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = CancellationToken::new();
        let started = TaskStarted {
            id,
            cancel: Some(cancel.clone()),
        };
        let _ = tx.send(UiEvent::TaskStarted { view, started });
        tokio::spawn(async move {
            let result = f(cancel).await;
            let completed = TaskCompleted { id, result };
            let _ = tx.send(UiEvent::TaskCompleted { view, completed });
        });
    }
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    executor: EffectExecutor,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(state: AppState, client: BackendClient) -> Result<Self> {
        // Panic hook must exist before entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = inbox::channel();
        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            executor: EffectExecutor { client, inbox_tx },
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                dirty = true;
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.is_any_task_running() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick unless there is already work to do.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            if self.executor.execute(effect) {
                self.state.should_quit = true;
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clothe_core::backend::BackendConfig;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::state::AppOptions;

    struct Harness {
        state: AppState,
        executor: EffectExecutor,
        inbox_rx: UiEventReceiver,
    }

    impl Harness {
        fn new(base_url: &str) -> Self {
            let config = BackendConfig::new(base_url, Some(Duration::from_secs(10))).unwrap();
            let client = BackendClient::new(config).unwrap();
            let (inbox_tx, inbox_rx) = inbox::channel();
            Self {
                state: AppState::new(AppOptions::new(client.base_url())).unwrap(),
                executor: EffectExecutor { client, inbox_tx },
                inbox_rx,
            }
        }

        fn dispatch(&mut self, event: UiEvent) {
            for effect in update::update(&mut self.state, event) {
                self.executor.execute(effect);
            }
        }

        fn key(&mut self, code: KeyCode) {
            self.dispatch(UiEvent::Terminal(Event::Key(KeyEvent::new(
                code,
                KeyModifiers::NONE,
            ))));
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.key(KeyCode::Char(c));
            }
        }

        /// Feeds inbox events through the reducer until `completions` requests
        /// have finished.
        async fn pump_until_completed(&mut self, completions: usize) {
            let mut seen = 0;
            while seen < completions {
                let event = tokio::time::timeout(Duration::from_secs(5), self.inbox_rx.recv())
                    .await
                    .expect("inbox event")
                    .expect("inbox open");
                if matches!(event, UiEvent::TaskCompleted { .. }) {
                    seen += 1;
                }
                self.dispatch(event);
            }
        }
    }

    #[tokio::test]
    async fn test_request_result_reaches_screen() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/outfits/find-ideas"))
            .and(body_json(json!({"userId": "user", "text": "I have a red floral skirt"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idea": "wear a coat"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut harness = Harness::new(&server.uri());
        harness.type_text("I have a red floral skirt");
        harness.key(KeyCode::F(1));
        assert_eq!(harness.state.active_screen().output, "Finding outfit ideas...");

        harness.pump_until_completed(1).await;
        assert_eq!(harness.state.active_screen().output, "wear a coat");
        assert!(!harness.state.is_any_task_running());
    }

    #[tokio::test]
    async fn test_rapid_requests_show_only_latest() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"userId": "user", "text": "a"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"idea": "first"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_json(json!({"userId": "user", "text": "ab"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idea": "second"})))
            .mount(&server)
            .await;

        let mut harness = Harness::new(&server.uri());
        harness.type_text("a");
        harness.key(KeyCode::F(1));
        harness.type_text("b");
        harness.key(KeyCode::F(1));

        let started = Instant::now();
        harness.pump_until_completed(2).await;

        assert_eq!(harness.state.active_screen().output, "second");
        // The slow first request was cancelled instead of awaited.
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_connection_failure_is_shown_on_screen() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let mut harness = Harness::new(&base);
        harness.type_text("scarf");
        harness.key(KeyCode::F(1));
        harness.pump_until_completed(1).await;

        let output = &harness.state.active_screen().output;
        assert!(output.starts_with("Error connecting to backend:\n"), "{output}");
        assert!(output.ends_with(&format!("Make sure the backend is running at {base}")));
    }

    #[tokio::test]
    async fn test_quit_effect_reports_quit() {
        let harness = Harness::new("http://127.0.0.1:8000");
        assert!(harness.executor.execute(UiEffect::Quit));
        assert!(!harness.executor.execute(UiEffect::CancelTask {
            view: ViewId::Primary,
            token: None,
        }));
    }
}
