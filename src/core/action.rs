//! Actions that renderers and commands return to the app

use crate::domain::Query;
use crate::notify::ToastLevel;
use crate::router::Tab;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,

    /// Show a toast
    Notify(String, ToastLevel),

    /// Queue a collection fetch
    Fetch(Query),

    /// Open a one-line input prompt
    Prompt(PromptKind),

    /// Ask for y/n before running `then`
    Confirm { message: String, then: Box<Action> },

    /// Activate a tab (subject to authorization)
    SwitchTab(Tab),

    /// Move to the next (true) or previous permitted tab
    CycleTab(bool),

    /// Drop the session and return to the login screen
    Logout,

    /// Toggle the help popup
    Help,

    /// Request quit
    Quit,
}

/// What an input prompt feeds into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    Category,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Search => "Search",
            PromptKind::Category => "Category",
        }
    }
}
