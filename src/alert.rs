//! Alert system for displaying success and error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element by htmx and
//! dismissed automatically by `static/app.js` after [ALERT_DISMISS_MS].

use maud::{Markup, html};

/// How long an alert stays on screen, in milliseconds.
pub const ALERT_DISMISS_MS: u32 = 3000;

/// A message to show the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// The action succeeded.
    Success {
        /// The headline.
        message: String,
        /// Extra detail, may be empty.
        details: String,
    },
    /// The action failed.
    Error {
        /// The headline.
        message: String,
        /// What went wrong, may be empty.
        details: String,
    },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (style, role, message, details) = match self {
            Alert::Success { message, details } => (
                "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 shadow-lg",
                "status",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 shadow-lg",
                "alert",
                message,
                details,
            ),
        };

        html! {
            div
                class=(style)
                role=(role)
                data-auto-dismiss=(ALERT_DISMISS_MS)
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    " " (details)
                }
            }
        }
    }
}
