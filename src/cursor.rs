//! Blinking caret for text inputs.
//!
//! The cursor is a sub-component: it is embedded by [`crate::textinput`] and
//! driven by forwarding messages to [`Model::update`]. Blink ticks carry the
//! owning cursor's id and a sequence tag so stale ticks from a previous focus
//! cycle are ignored.

use bubbletea_rs::{tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

static LAST_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    LAST_ID.fetch_add(1, Ordering::Relaxed) + 1
}

const DEFAULT_BLINK_SPEED: Duration = Duration::from_millis(530);

/// Message that toggles the cursor's blink phase.
#[derive(Debug, Clone)]
pub struct BlinkMsg {
    /// Id of the cursor instance this tick targets.
    pub id: usize,
    /// Sequence tag; ticks with a stale tag are dropped.
    pub tag: usize,
}

/// Cursor display behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The caret blinks while focused.
    Blink,
    /// The caret is always shown while focused.
    Static,
    /// The caret is never shown.
    Hidden,
}

/// Cursor model: blink state, styling, and the character underneath.
#[derive(Debug, Clone)]
pub struct Model {
    /// Delay between blink phases.
    pub blink_speed: Duration,
    /// Style when the caret block is shown.
    pub style: Style,
    /// Style for the character underneath while the caret is hidden.
    pub text_style: Style,

    ch: String,
    id: usize,
    focus: bool,
    // When true the caret block is NOT shown (off phase of the blink).
    off: bool,
    tag: usize,
    mode: Mode,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            blink_speed: DEFAULT_BLINK_SPEED,
            style: Style::new(),
            text_style: Style::new(),
            ch: " ".to_string(),
            id: next_id(),
            focus: false,
            off: true,
            tag: 0,
            mode: Mode::Blink,
        }
    }
}

/// Creates a cursor with default settings.
pub fn new() -> Model {
    Model::default()
}

impl Model {
    /// Handles blink ticks addressed to this cursor.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(blink) = msg.downcast_ref::<BlinkMsg>() {
            if self.mode != Mode::Blink || !self.focus {
                return None;
            }
            if blink.id != self.id || blink.tag != self.tag {
                return None;
            }
            self.off = !self.off;
            return self.blink_cmd();
        }
        None
    }

    /// Returns the current display mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sets the display mode, returning a tick command when blinking starts.
    pub fn set_mode(&mut self, mode: Mode) -> Option<Cmd> {
        self.mode = mode;
        self.off = mode == Mode::Hidden || !self.focus;
        if mode == Mode::Blink && self.focus {
            return self.blink_cmd();
        }
        None
    }

    fn blink_cmd(&mut self) -> Option<Cmd> {
        if self.mode != Mode::Blink {
            return None;
        }
        self.tag += 1;
        let tag = self.tag;
        let id = self.id;
        Some(tick(self.blink_speed, move |_| {
            Box::new(BlinkMsg { id, tag }) as Msg
        }))
    }

    /// Focuses the cursor; returns the first blink tick when applicable.
    pub fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.off = self.mode == Mode::Hidden;
        if self.mode == Mode::Blink {
            return self.blink_cmd();
        }
        None
    }

    /// Blurs the cursor and hides the caret.
    pub fn blur(&mut self) {
        self.focus = false;
        self.off = true;
    }

    /// Returns whether the cursor is focused.
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Sets the character the caret sits on.
    pub fn set_char(&mut self, s: &str) {
        self.ch = s.to_string();
    }

    /// Renders the caret (or the plain character while in the off phase).
    pub fn view(&self) -> String {
        if self.mode == Mode::Hidden || self.off {
            return self.text_style.clone().inline(true).render(&self.ch);
        }
        self.style
            .clone()
            .inline(true)
            .reverse(true)
            .render(&self.ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_tag_is_ignored() {
        let mut m = new();
        m.focus = true;
        let _first = m.blink_cmd().expect("tick");
        let live_tag = m.tag;
        let _second = m.blink_cmd().expect("tick");
        assert_ne!(live_tag, m.tag);

        let was_off = m.off;
        let stale: Msg = Box::new(BlinkMsg {
            id: m.id,
            tag: live_tag,
        });
        m.update(&stale);
        assert_eq!(m.off, was_off, "stale tick must not toggle the phase");
    }

    #[test]
    fn test_focus_shows_caret_and_blur_hides_it() {
        let mut m = new();
        m.focus();
        assert!(m.focused());
        assert!(!m.off);
        m.blur();
        assert!(!m.focused());
        assert!(m.off);
    }

    #[test]
    fn test_hidden_mode_never_starts_ticks() {
        let mut m = new();
        assert!(m.set_mode(Mode::Hidden).is_none());
        assert!(m.focus().is_none());
    }
}
