//! Screen definitions.
//!
//! Every screen is the same `FormScreen` driven by a static `ScreenSpec`: a set
//! of input fields plus actions bound to function keys. Screen-specific behavior
//! lives entirely in its `ScreenSpec` (endpoint, messages, navigation targets).

mod form;

use clothe_core::backend::Endpoint;
pub use form::{Focus, FormScreen};

use crate::navigation::ViewId;

#[derive(Debug)]
pub struct FieldSpec {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub masked: bool,
}

#[derive(Debug)]
pub enum ActionKind {
    /// Send the first field's text to `endpoint` and show the result.
    Backend {
        endpoint: Endpoint,
        blank_message: &'static str,
        working_message: &'static str,
    },
    /// Switch to another view.
    Navigate {
        to: &'static str,
        failure_prefix: &'static str,
    },
    /// Accept any non-blank username/password and switch to `to`.
    Login {
        to: &'static str,
        failure_prefix: &'static str,
    },
}

#[derive(Debug)]
pub struct ScreenAction {
    /// Function key number (F1 = 1).
    pub shortcut: u8,
    pub label: &'static str,
    pub kind: ActionKind,
}

#[derive(Debug)]
pub struct ScreenSpec {
    pub view: ViewId,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
    pub actions: &'static [ScreenAction],
    /// User id sent with backend requests unless config overrides it.
    pub user_id: &'static str,
}

impl ScreenSpec {
    pub fn for_view(view: ViewId) -> &'static ScreenSpec {
        match view {
            ViewId::Primary => &PRIMARY,
            ViewId::Secondary => &SECONDARY,
            ViewId::Login => &LOGIN,
        }
    }

    pub fn action_for_shortcut(&self, shortcut: u8) -> Option<usize> {
        self.actions.iter().position(|a| a.shortcut == shortcut)
    }
}

const CLOTHING_PROMPT: &str = "Please enter a clothing description first.";
const GARMENT_PROMPT: &str = "Please enter a type of garment first.";

const GARMENT_FIELD: FieldSpec = FieldSpec {
    label: "Garment",
    placeholder: "e.g. I have a red floral skirt",
    masked: false,
};

pub static PRIMARY: ScreenSpec = ScreenSpec {
    view: ViewId::Primary,
    title: "Clothe AI",
    fields: &[GARMENT_FIELD],
    actions: &[
        ScreenAction {
            shortcut: 1,
            label: "Find ideas",
            kind: ActionKind::Backend {
                endpoint: Endpoint::FindIdeas,
                blank_message: CLOTHING_PROMPT,
                working_message: "Finding outfit ideas...",
            },
        },
        ScreenAction {
            shortcut: 2,
            label: "Login",
            kind: ActionKind::Navigate {
                to: "login",
                failure_prefix: "Error opening login page",
            },
        },
        ScreenAction {
            shortcut: 3,
            label: "Wardrobe",
            kind: ActionKind::Navigate {
                to: "secondary",
                failure_prefix: "Error opening wardrobe view",
            },
        },
    ],
    user_id: "user",
};

pub static SECONDARY: ScreenSpec = ScreenSpec {
    view: ViewId::Secondary,
    title: "Wardrobe",
    fields: &[GARMENT_FIELD],
    actions: &[
        ScreenAction {
            shortcut: 1,
            label: "Analyze",
            kind: ActionKind::Backend {
                endpoint: Endpoint::Analyze,
                blank_message: CLOTHING_PROMPT,
                working_message: "Analyzing...",
            },
        },
        ScreenAction {
            shortcut: 2,
            label: "Find ideas",
            kind: ActionKind::Backend {
                endpoint: Endpoint::FindIdeas,
                blank_message: CLOTHING_PROMPT,
                working_message: "Finding outfit ideas...",
            },
        },
        ScreenAction {
            shortcut: 3,
            label: "List garments",
            kind: ActionKind::Backend {
                endpoint: Endpoint::ListGarments,
                blank_message: GARMENT_PROMPT,
                working_message: "Listing garments...",
            },
        },
        ScreenAction {
            shortcut: 4,
            label: "Add garment",
            kind: ActionKind::Backend {
                endpoint: Endpoint::AddGarment,
                blank_message: GARMENT_PROMPT,
                working_message: "Adding garment...",
            },
        },
        ScreenAction {
            shortcut: 5,
            label: "Back",
            kind: ActionKind::Navigate {
                to: "primary",
                failure_prefix: "Error navigating back",
            },
        },
    ],
    user_id: "guest",
};

pub static LOGIN: ScreenSpec = ScreenSpec {
    view: ViewId::Login,
    title: "Login",
    fields: &[
        FieldSpec {
            label: "Username",
            placeholder: "",
            masked: false,
        },
        FieldSpec {
            label: "Password",
            placeholder: "",
            masked: true,
        },
    ],
    actions: &[
        ScreenAction {
            shortcut: 1,
            label: "Login",
            kind: ActionKind::Login {
                to: "primary",
                failure_prefix: "Error loading main view",
            },
        },
        ScreenAction {
            shortcut: 2,
            label: "Back",
            kind: ActionKind::Navigate {
                to: "primary",
                failure_prefix: "Error navigating back",
            },
        },
    ],
    user_id: "user",
};
