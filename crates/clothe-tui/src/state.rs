//! Application state composition.
//!
//! ```text
//! AppState
//! ├── navigator: Navigator      (active view)
//! ├── screens: [FormScreen; 3]  (one per view, reset on navigation)
//! ├── task_seq: TaskSeq         (request id generator)
//! └── session_user              (name accepted by the login screen)
//! ```
//!
//! `AppState` is the single composition root: it owns navigation and every
//! screen's state, and it is only mutated by the reducer.

use crate::common::TaskSeq;
use crate::navigation::{NavigationError, Navigator, ViewId};
use crate::screens::{FormScreen, ScreenSpec};

/// Inputs needed to compose the app.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Base URL shown in connection errors and the status line.
    pub backend_url: String,
    /// Overrides every screen's own user id when set.
    pub user_id: Option<String>,
    /// View name to open first.
    pub start_view: String,
    /// Views the navigator may show.
    pub views: Vec<ViewId>,
}

impl AppOptions {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            user_id: None,
            start_view: ViewId::Primary.name().to_string(),
            views: ViewId::all().to_vec(),
        }
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub navigator: Navigator,
    screens: Vec<FormScreen>,
    pub task_seq: TaskSeq,
    pub backend_url: String,
    pub user_id: Option<String>,
    pub session_user: Option<String>,
    /// Spinner animation frame counter (advanced on Tick).
    pub spinner_frame: usize,
}

impl AppState {
    /// Composes the app and opens the start view.
    ///
    /// An invalid start view is not fatal: the app opens on `primary` and shows
    /// the navigation error there.
    ///
    /// # Errors
    /// Returns an error only if `primary` itself is not among `options.views`.
    pub fn new(options: AppOptions) -> Result<Self, NavigationError> {
        let navigator = Navigator::new(&options.views, ViewId::Primary)?;
        let screens = ViewId::all()
            .iter()
            .map(|view| FormScreen::new(ScreenSpec::for_view(*view)))
            .collect();

        let mut state = Self {
            should_quit: false,
            navigator,
            screens,
            task_seq: TaskSeq::default(),
            backend_url: options.backend_url,
            user_id: options.user_id.filter(|id| !id.trim().is_empty()),
            session_user: None,
            spinner_frame: 0,
        };

        if let Err(err) = state.navigator.set_root(&options.start_view) {
            tracing::warn!(start_view = %options.start_view, error = %err, "invalid start view");
            state
                .screen_mut(ViewId::Primary)
                .set_output(format!("Error opening start view: {err}"));
        }

        Ok(state)
    }

    pub fn screen(&self, view: ViewId) -> &FormScreen {
        &self.screens[view.index()]
    }

    pub fn screen_mut(&mut self, view: ViewId) -> &mut FormScreen {
        &mut self.screens[view.index()]
    }

    pub fn active_screen(&self) -> &FormScreen {
        self.screen(self.navigator.active())
    }

    pub fn active_screen_mut(&mut self) -> &mut FormScreen {
        self.screen_mut(self.navigator.active())
    }

    /// Replaces a screen with a freshly loaded one.
    pub fn reset_screen(&mut self, view: ViewId) {
        self.screens[view.index()] = FormScreen::new(ScreenSpec::for_view(view));
    }

    /// User id sent by requests from `view`.
    pub fn user_id_for(&self, view: ViewId) -> String {
        self.user_id
            .clone()
            .unwrap_or_else(|| ScreenSpec::for_view(view).user_id.to_string())
    }

    pub fn is_any_task_running(&self) -> bool {
        self.screens.iter().any(|s| s.task.is_running())
    }
}
