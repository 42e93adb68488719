//! Type-safe key bindings with help metadata.
//!
//! A [`Binding`] couples one or more key presses with the help text shown by
//! the help bar. Bindings can be disabled at runtime, which removes them from
//! both matching and help output — components use this to suppress affordances
//! that have no handler wired up.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code to match.
    pub code: KeyCode,
    /// Modifiers that must accompany the key. Shift is ignored for character
    /// keys since crossterm encodes it in the character itself.
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

/// Help metadata for a binding: the key label and a short action description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Display label for the key(s), e.g. `"↑/k"`.
    pub key: String,
    /// Short action description, e.g. `"up"`.
    pub desc: String,
}

/// A key binding: the key presses it responds to, its help entry, and an
/// enabled flag.
///
/// # Examples
///
/// ```rust
/// use backoffice_widgets::key::Binding;
/// use crossterm::event::KeyCode;
///
/// let confirm = Binding::new(vec![KeyCode::Enter, KeyCode::Char('y')])
///     .with_help("y/enter", "confirm");
/// assert!(confirm.enabled());
/// ```
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from key presses. `KeyCode` values convert
    /// implicitly; pass `(KeyCode, KeyModifiers)` tuples for chords.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help label and description (builder pattern).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the help entry for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns the key presses this binding responds to.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Returns whether the binding is currently enabled.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding. Disabled bindings never match and
    /// are omitted from help views.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether the given key message triggers this binding.
    ///
    /// Control and Alt must match exactly; Shift is ignored because
    /// crossterm encodes it into character key codes.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        self.keys.iter().any(|k| {
            k.code == msg.key
                && k.mods.contains(KeyModifiers::CONTROL)
                    == msg.modifiers.contains(KeyModifiers::CONTROL)
                && k.mods.contains(KeyModifiers::ALT)
                    == msg.modifiers.contains(KeyModifiers::ALT)
        })
    }
}

/// Reports whether `msg` matches any of the given bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Reports whether `msg` matches a single binding.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

/// Trait implemented by component keymaps so the help bar can render them.
pub trait KeyMap {
    /// Bindings for the compact one-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Binding columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
