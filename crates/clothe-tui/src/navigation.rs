//! View navigation.
//!
//! One view is active at a time. The `Navigator` is owned by `AppState`; views
//! are registered once when the app is composed and switched by name.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Primary,
    Secondary,
    Login,
}

impl ViewId {
    pub fn name(self) -> &'static str {
        match self {
            ViewId::Primary => "primary",
            ViewId::Secondary => "secondary",
            ViewId::Login => "login",
        }
    }

    pub fn all() -> &'static [ViewId] {
        &[ViewId::Primary, ViewId::Secondary, ViewId::Login]
    }

    /// Position in per-view storage.
    pub(crate) fn index(self) -> usize {
        match self {
            ViewId::Primary => 0,
            ViewId::Secondary => 1,
            ViewId::Login => 2,
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewId {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::all()
            .iter()
            .copied()
            .find(|view| view.name() == s.trim())
            .ok_or_else(|| NavigationError::UnknownView(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The name does not correspond to any view.
    UnknownView(String),
    /// The view exists but was not registered with this navigator.
    NotRegistered(ViewId),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::UnknownView(name) => write!(f, "unknown view '{name}'"),
            NavigationError::NotRegistered(view) => write!(f, "view '{view}' is not available"),
        }
    }
}

impl std::error::Error for NavigationError {}

#[derive(Debug, Clone)]
pub struct Navigator {
    registered: Vec<ViewId>,
    active: ViewId,
}

impl Navigator {
    /// Creates a navigator over `registered` views, starting at `start`.
    ///
    /// # Errors
    /// Returns `NotRegistered` if `start` is not among `registered`.
    pub fn new(registered: &[ViewId], start: ViewId) -> Result<Self, NavigationError> {
        if !registered.contains(&start) {
            return Err(NavigationError::NotRegistered(start));
        }
        Ok(Self {
            registered: registered.to_vec(),
            active: start,
        })
    }

    pub fn active(&self) -> ViewId {
        self.active
    }

    pub fn is_registered(&self, view: ViewId) -> bool {
        self.registered.contains(&view)
    }

    /// Replaces the active view with the one named `name`.
    ///
    /// On failure the active view is unchanged.
    ///
    /// # Errors
    /// Returns `UnknownView` for names that do not parse and `NotRegistered` for
    /// views this navigator cannot show.
    pub fn set_root(&mut self, name: &str) -> Result<ViewId, NavigationError> {
        let view: ViewId = name.parse()?;
        if !self.is_registered(view) {
            return Err(NavigationError::NotRegistered(view));
        }
        tracing::debug!(from = %self.active, to = %view, "navigate");
        self.active = view;
        Ok(view)
    }
}
