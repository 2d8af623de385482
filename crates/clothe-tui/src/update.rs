//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use clothe_core::backend::{self, BackendError, Endpoint};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::{TaskCompleted, TaskStarted};
use crate::effects::UiEffect;
use crate::events::{CallResult, UiEvent};
use crate::navigation::ViewId;
use crate::screens::ActionKind;
use crate::state::AppState;

const LOGIN_BLANK_MESSAGE: &str = "Please enter both username and password.";
const LOGIN_SUCCESS_MESSAGE: &str = "Login successful.";
const CANCELLED_MESSAGE: &str = "Request cancelled.";

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { view, started } => handle_task_started(app, view, started),
        UiEvent::TaskCompleted { view, completed } => {
            handle_task_completed(app, view, completed);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            app.active_screen_mut().paste(&text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if matches!(key.kind, KeyEventKind::Release) {
        return vec![];
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c' | 'q') if ctrl => quit(app),
        KeyCode::Esc => cancel_active(app),
        _ => match app.active_screen_mut().handle_key(key) {
            Some(index) => run_action(app, index),
            None => vec![],
        },
    }
}

fn quit(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects: Vec<UiEffect> = ViewId::all()
        .iter()
        .filter_map(|view| {
            app.screen_mut(*view)
                .task
                .clear()
                .map(|token| UiEffect::CancelTask {
                    view: *view,
                    token: Some(token),
                })
        })
        .collect();
    effects.push(UiEffect::Quit);
    effects
}

/// Esc cancels the active screen's in-flight request.
fn cancel_active(app: &mut AppState) -> Vec<UiEffect> {
    let view = app.navigator.active();
    let screen = app.screen_mut(view);
    if !screen.task.is_running() {
        return vec![];
    }
    let token = screen.task.clear();
    screen.set_output(CANCELLED_MESSAGE);
    tracing::info!(%view, "request cancelled by user");
    vec![UiEffect::CancelTask { view, token }]
}

fn handle_task_started(app: &mut AppState, view: ViewId, started: TaskStarted) -> Vec<UiEffect> {
    if app.screen_mut(view).task.on_started(&started) {
        return vec![];
    }
    // Superseded (or its screen was closed) before the runtime spawned it.
    tracing::debug!(%view, task = started.id.0, "cancelling stale request");
    vec![UiEffect::CancelTask {
        view,
        token: started.cancel,
    }]
}

fn handle_task_completed(app: &mut AppState, view: ViewId, completed: TaskCompleted<CallResult>) {
    let base_url = app.backend_url.clone();
    let screen = app.screen_mut(view);
    if !screen.task.finish_if_active(completed.id) {
        tracing::debug!(%view, task = completed.id.0, "dropping stale completion");
        return;
    }
    if matches!(completed.result, Err(BackendError::Cancelled)) {
        return;
    }
    screen.set_output(backend::display_text(&completed.result, &base_url));
}

/// Runs the action at `index` on the active screen.
fn run_action(app: &mut AppState, index: usize) -> Vec<UiEffect> {
    let view = app.navigator.active();
    let spec = app.screen(view).spec;
    let Some(action) = spec.actions.get(index) else {
        return vec![];
    };

    match &action.kind {
        ActionKind::Backend {
            endpoint,
            blank_message,
            working_message,
        } => start_request(app, view, *endpoint, blank_message, working_message),
        ActionKind::Navigate { to, failure_prefix } => navigate(app, to, failure_prefix),
        ActionKind::Login { to, failure_prefix } => login(app, view, to, failure_prefix),
    }
}

fn start_request(
    app: &mut AppState,
    view: ViewId,
    endpoint: Endpoint,
    blank_message: &str,
    working_message: &str,
) -> Vec<UiEffect> {
    let text = match app.screen(view).input() {
        Some(input) if !input.is_blank() => input.text().to_string(),
        _ => {
            app.screen_mut(view).set_output(blank_message);
            return vec![];
        }
    };

    let user_id = app.user_id_for(view);
    let task = app.task_seq.next_id();
    let screen = app.screen_mut(view);
    screen.set_output(working_message);

    let mut effects = Vec::new();
    if let Some(token) = screen.task.begin(task) {
        tracing::debug!(%view, "superseding in-flight request");
        effects.push(UiEffect::CancelTask {
            view,
            token: Some(token),
        });
    }
    effects.push(UiEffect::CallBackend {
        view,
        task,
        endpoint,
        user_id,
        text,
    });
    effects
}

/// Switches to the view named `to`.
///
/// The screen being left has its request cancelled and its state dropped; the
/// target screen is loaded fresh. On failure the current screen shows
/// `"{failure_prefix}: {error}"` and nothing else changes.
fn navigate(app: &mut AppState, to: &str, failure_prefix: &str) -> Vec<UiEffect> {
    let from = app.navigator.active();
    let target = match app.navigator.set_root(to) {
        Ok(view) => view,
        Err(err) => {
            tracing::warn!(%from, to, error = %err, "navigation failed");
            app.screen_mut(from).set_output(format!("{failure_prefix}: {err}"));
            return vec![];
        }
    };

    let mut effects = Vec::new();
    if let Some(token) = app.screen_mut(from).task.clear() {
        effects.push(UiEffect::CancelTask {
            view: from,
            token: Some(token),
        });
    }
    app.reset_screen(from);
    app.reset_screen(target);
    effects
}

fn login(app: &mut AppState, view: ViewId, to: &str, failure_prefix: &str) -> Vec<UiEffect> {
    let screen = app.screen_mut(view);
    let username = screen.fields.first().map(|f| f.text().trim().to_string());
    let password_blank = screen.fields.get(1).is_none_or(|f| f.is_blank());

    let username = match username {
        Some(name) if !name.is_empty() && !password_blank => name,
        _ => {
            screen.set_output(LOGIN_BLANK_MESSAGE);
            return vec![];
        }
    };
    screen.set_output(LOGIN_SUCCESS_MESSAGE);

    let effects = navigate(app, to, failure_prefix);
    if app.navigator.active() != view {
        tracing::info!(user = %username, "login accepted");
        app.session_user = Some(username);
    }
    effects
}
