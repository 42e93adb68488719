//! Yes/no confirmation prompt.
//!
//! Used for destructive intents: the data browser opens one before a record
//! delete is dispatched. The prompt resolves to a [`Decision`]; a decline
//! carries no side effects of its own, and keys other than the configured
//! confirm/decline bindings leave the prompt open.

use crate::key::{Binding, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// Resolution of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The operator confirmed the action.
    Confirmed,
    /// The operator declined; the caller must treat this as a no-op.
    Declined,
}

/// Key bindings for the prompt.
#[derive(Debug, Clone)]
pub struct ConfirmKeyMap {
    /// Confirm the pending action.
    pub confirm: Binding,
    /// Decline the pending action.
    pub decline: Binding,
}

impl Default for ConfirmKeyMap {
    fn default() -> Self {
        Self {
            confirm: Binding::new(vec![KeyCode::Char('y'), KeyCode::Char('Y'), KeyCode::Enter])
                .with_help("y/enter", "confirm"),
            decline: Binding::new(vec![KeyCode::Char('n'), KeyCode::Char('N'), KeyCode::Esc])
                .with_help("n/esc", "cancel"),
        }
    }
}

impl KeyMapTrait for ConfirmKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.confirm, &self.decline]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.confirm, &self.decline]]
    }
}

/// Styles for the prompt.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for the prompt message.
    pub message: Style,
    /// Style for the key hint suffix.
    pub hint: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            message: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#B00020",
                    Dark: "#FF5F87",
                })
                .bold(true),
            hint: Style::new().foreground(AdaptiveColor {
                Light: "#9B9B9B",
                Dark: "#5C5C5C",
            }),
        }
    }
}

/// Confirmation prompt model.
#[derive(Debug, Clone)]
pub struct Model {
    /// The human-readable question, e.g. `Delete "Summer banner"?`.
    pub message: String,
    /// Key bindings.
    pub keymap: ConfirmKeyMap,
    /// Styles.
    pub styles: Styles,
}

/// Creates a prompt with the given message.
pub fn new(message: impl Into<String>) -> Model {
    Model {
        message: message.into(),
        keymap: ConfirmKeyMap::default(),
        styles: Styles::default(),
    }
}

impl Model {
    /// Resolves confirm/decline key presses; any other message keeps the
    /// prompt open.
    pub fn update(&mut self, msg: &Msg) -> Option<Decision> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.confirm.matches(key_msg) {
            Some(Decision::Confirmed)
        } else if self.keymap.decline.matches(key_msg) {
            Some(Decision::Declined)
        } else {
            None
        }
    }

    /// Renders the prompt with its key hint.
    pub fn view(&self) -> String {
        format!(
            "{} {}",
            self.styles.message.render(&self.message),
            self.styles.hint.render("(y/n)"),
        )
    }
}
