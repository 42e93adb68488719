//! Single-line text input component.
//!
//! Used by the data browser's search box and the form component's fields.
//! Supports a placeholder, prompt, character limit, horizontal scrolling
//! within a fixed display width, and character/word-wise movement and
//! deletion. Word boundaries are Unicode-aware.
//!
//! # Examples
//!
//! ```rust
//! use backoffice_widgets::textinput;
//! use backoffice_widgets::Component;
//!
//! let mut input = textinput::new();
//! input.set_placeholder("Search records…");
//! input.set_width(30);
//! let _cmd = input.focus();
//! assert!(input.focused());
//! ```

use crate::cursor;
use crate::key::Binding;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

/// Key bindings for editing within the input.
#[derive(Debug, Clone)]
pub struct TextInputKeyMap {
    /// Move one character left.
    pub character_backward: Binding,
    /// Move one character right.
    pub character_forward: Binding,
    /// Move to the start of the previous word.
    pub word_backward: Binding,
    /// Move past the end of the next word.
    pub word_forward: Binding,
    /// Jump to the start of the line.
    pub line_start: Binding,
    /// Jump to the end of the line.
    pub line_end: Binding,
    /// Delete the character before the cursor.
    pub delete_character_backward: Binding,
    /// Delete the character under the cursor.
    pub delete_character_forward: Binding,
    /// Delete the word before the cursor.
    pub delete_word_backward: Binding,
    /// Delete from the cursor to the end of the line.
    pub delete_after_cursor: Binding,
    /// Delete from the start of the line to the cursor.
    pub delete_before_cursor: Binding,
}

impl Default for TextInputKeyMap {
    fn default() -> Self {
        Self {
            character_backward: Binding::new(vec![
                (KeyCode::Left, KeyModifiers::NONE),
                (KeyCode::Char('b'), KeyModifiers::CONTROL),
            ])
            .with_help("←", "left"),
            character_forward: Binding::new(vec![
                (KeyCode::Right, KeyModifiers::NONE),
                (KeyCode::Char('f'), KeyModifiers::CONTROL),
            ])
            .with_help("→", "right"),
            word_backward: Binding::new(vec![(KeyCode::Char('b'), KeyModifiers::ALT)])
                .with_help("alt+b", "word left"),
            word_forward: Binding::new(vec![(KeyCode::Char('f'), KeyModifiers::ALT)])
                .with_help("alt+f", "word right"),
            line_start: Binding::new(vec![
                (KeyCode::Home, KeyModifiers::NONE),
                (KeyCode::Char('a'), KeyModifiers::CONTROL),
            ])
            .with_help("home", "start"),
            line_end: Binding::new(vec![
                (KeyCode::End, KeyModifiers::NONE),
                (KeyCode::Char('e'), KeyModifiers::CONTROL),
            ])
            .with_help("end", "end"),
            delete_character_backward: Binding::new(vec![KeyCode::Backspace])
                .with_help("backspace", "delete left"),
            delete_character_forward: Binding::new(vec![
                (KeyCode::Delete, KeyModifiers::NONE),
                (KeyCode::Char('d'), KeyModifiers::CONTROL),
            ])
            .with_help("del", "delete right"),
            delete_word_backward: Binding::new(vec![
                (KeyCode::Char('w'), KeyModifiers::CONTROL),
                (KeyCode::Backspace, KeyModifiers::ALT),
            ])
            .with_help("ctrl+w", "delete word"),
            delete_after_cursor: Binding::new(vec![(KeyCode::Char('k'), KeyModifiers::CONTROL)])
                .with_help("ctrl+k", "delete to end"),
            delete_before_cursor: Binding::new(vec![(KeyCode::Char('u'), KeyModifiers::CONTROL)])
                .with_help("ctrl+u", "delete to start"),
        }
    }
}

/// Single-line text input model.
pub struct Model {
    /// Prompt rendered before the input, e.g. `"> "`.
    pub prompt: String,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for typed text.
    pub text_style: Style,
    /// Placeholder shown while the input is empty.
    pub placeholder: String,
    /// Style for the placeholder.
    pub placeholder_style: Style,
    /// Caret sub-component.
    pub cursor: cursor::Model,
    /// Key bindings.
    pub keymap: TextInputKeyMap,

    value: Vec<char>,
    pos: usize,
    focus: bool,
    // Display width in characters; 0 means unbounded.
    width: usize,
    // Maximum number of characters accepted; 0 means no limit.
    char_limit: usize,
    // Visible window into the value when it overflows the width.
    offset: usize,
}

/// Creates a text input with default settings, unfocused.
pub fn new() -> Model {
    Model::default()
}

impl Default for Model {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            prompt_style: Style::new(),
            text_style: Style::new(),
            placeholder: String::new(),
            placeholder_style: Style::new().foreground(AdaptiveColor {
                Light: "#9B9B9B",
                Dark: "#5C5C5C",
            }),
            cursor: cursor::new(),
            keymap: TextInputKeyMap::default(),
            value: Vec::new(),
            pos: 0,
            focus: false,
            width: 0,
            char_limit: 0,
            offset: 0,
        }
    }
}

impl Model {
    /// Returns the current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        self.value = s.chars().collect();
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit);
        }
        self.pos = self.value.len();
        self.handle_overflow();
    }

    /// Clears the value and resets the cursor.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
        self.offset = 0;
    }

    /// Sets the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    /// Sets the display width in characters; 0 disables windowing.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
        self.handle_overflow();
    }

    /// Sets the maximum accepted length in characters; 0 disables the limit.
    pub fn set_char_limit(&mut self, limit: usize) {
        self.char_limit = limit;
    }

    /// Returns the cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to the start of the value.
    pub fn cursor_start(&mut self) {
        self.set_cursor(0);
    }

    /// Moves the cursor past the end of the value.
    pub fn cursor_end(&mut self) {
        self.set_cursor(self.value.len());
    }

    fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
        self.handle_overflow();
    }

    /// Handles key messages while focused. Returns any caret tick command.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_deletion_keys(key_msg);
            self.handle_movement_keys(key_msg);
            self.handle_character_input(key_msg);
            self.handle_overflow();
        }

        self.cursor.update(msg)
    }

    fn handle_deletion_keys(&mut self, key_msg: &KeyMsg) {
        if self.keymap.delete_word_backward.matches(key_msg) {
            let start = self.prev_word_start();
            self.value.drain(start..self.pos);
            self.pos = start;
        } else if self.keymap.delete_character_backward.matches(key_msg) {
            if self.pos > 0 {
                self.value.remove(self.pos - 1);
                self.pos -= 1;
            }
        } else if self.keymap.delete_character_forward.matches(key_msg) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if self.keymap.delete_after_cursor.matches(key_msg) {
            self.value.truncate(self.pos);
        } else if self.keymap.delete_before_cursor.matches(key_msg) {
            self.value.drain(..self.pos);
            self.pos = 0;
        }
    }

    fn handle_movement_keys(&mut self, key_msg: &KeyMsg) {
        if self.keymap.word_backward.matches(key_msg) {
            let target = self.prev_word_start();
            self.set_cursor(target);
        } else if self.keymap.word_forward.matches(key_msg) {
            let target = self.next_word_end();
            self.set_cursor(target);
        } else if self.keymap.character_backward.matches(key_msg) {
            if self.pos > 0 {
                self.set_cursor(self.pos - 1);
            }
        } else if self.keymap.character_forward.matches(key_msg) {
            if self.pos < self.value.len() {
                self.set_cursor(self.pos + 1);
            }
        } else if self.keymap.line_start.matches(key_msg) {
            self.cursor_start();
        } else if self.keymap.line_end.matches(key_msg) {
            self.cursor_end();
        }
    }

    fn handle_character_input(&mut self, key_msg: &KeyMsg) {
        if let KeyCode::Char(ch) = key_msg.key {
            if key_msg.modifiers.contains(KeyModifiers::CONTROL)
                || key_msg.modifiers.contains(KeyModifiers::ALT)
            {
                return;
            }
            if self.char_limit > 0 && self.value.len() >= self.char_limit {
                return;
            }
            self.value.insert(self.pos, ch);
            self.pos += 1;
        }
    }

    /// Start of the word preceding the cursor, in characters.
    fn prev_word_start(&self) -> usize {
        let before: String = self.value[..self.pos].iter().collect();
        let mut start = 0;
        for (byte_idx, seg) in before.split_word_bound_indices() {
            if !seg.trim().is_empty() {
                start = before[..byte_idx].chars().count();
            }
        }
        start
    }

    /// End of the word at or after the cursor, in characters.
    fn next_word_end(&self) -> usize {
        let after: String = self.value[self.pos..].iter().collect();
        for (byte_idx, seg) in after.split_word_bound_indices() {
            if !seg.trim().is_empty() {
                let seg_start = after[..byte_idx].chars().count();
                return self.pos + seg_start + seg.chars().count();
            }
        }
        self.value.len()
    }

    fn handle_overflow(&mut self) {
        if self.width == 0 {
            self.offset = 0;
            return;
        }
        if self.pos < self.offset {
            self.offset = self.pos;
        } else if self.pos >= self.offset + self.width {
            self.offset = self.pos + 1 - self.width;
        }
    }

    /// Renders the input in its current state.
    pub fn view(&self) -> String {
        if self.value.is_empty() && !self.placeholder.is_empty() {
            return self.placeholder_view();
        }

        let end = if self.width > 0 {
            (self.offset + self.width).min(self.value.len())
        } else {
            self.value.len()
        };
        let window: String = self.value[self.offset..end].iter().collect();
        let rel = self.pos - self.offset;

        let mut v = String::new();
        let chars: Vec<char> = window.chars().collect();
        let before: String = chars[..rel.min(chars.len())].iter().collect();
        v.push_str(&self.text_style.render(&before));

        if self.focus {
            let mut cur = self.cursor.clone();
            if rel < chars.len() {
                cur.set_char(&chars[rel].to_string());
                v.push_str(&cur.view());
                let after: String = chars[rel + 1..].iter().collect();
                v.push_str(&self.text_style.render(&after));
            } else {
                cur.set_char(" ");
                v.push_str(&cur.view());
            }
        } else if rel < chars.len() {
            let after: String = chars[rel..].iter().collect();
            v.push_str(&self.text_style.render(&after));
        }

        format!("{}{}", self.prompt_style.render(&self.prompt), v)
    }

    fn placeholder_view(&self) -> String {
        let mut v = String::new();
        let chars: Vec<char> = self.placeholder.chars().collect();
        if self.focus && !chars.is_empty() {
            let mut cur = self.cursor.clone();
            cur.set_char(&chars[0].to_string());
            v.push_str(&cur.view());
            let rest: String = chars[1..].iter().collect();
            v.push_str(&self.placeholder_style.render(&rest));
        } else {
            v.push_str(&self.placeholder_style.render(&self.placeholder));
        }
        format!("{}{}", self.prompt_style.render(&self.prompt), v)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.cursor.focus()
    }

    fn blur(&mut self) {
        self.focus = false;
        self.cursor.blur();
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut Model, code: KeyCode) {
        press_mod(input, code, KeyModifiers::NONE);
    }

    fn press_mod(input: &mut Model, code: KeyCode, modifiers: KeyModifiers) {
        let msg: Msg = Box::new(KeyMsg {
            key: code,
            modifiers,
        });
        input.update(&msg);
    }

    fn type_str(input: &mut Model, s: &str) {
        for ch in s.chars() {
            press(input, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let mut input = new();
        input.focus();
        type_str(&mut input, "news");
        assert_eq!(input.value(), "news");
        assert_eq!(input.position(), 4);
    }

    #[test]
    fn test_unfocused_input_ignores_keys() {
        let mut input = new();
        type_str(&mut input, "ignored");
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = new();
        input.focus();
        input.set_value("banner");
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "banne");
        input.cursor_start();
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "anne");
    }

    #[test]
    fn test_char_limit_blocks_input() {
        let mut input = new();
        input.focus();
        input.set_char_limit(3);
        type_str(&mut input, "gallery");
        assert_eq!(input.value(), "gal");
    }

    #[test]
    fn test_word_backward_stops_at_word_start() {
        let mut input = new();
        input.focus();
        input.set_value("site settings");
        press_mod(&mut input, KeyCode::Char('b'), KeyModifiers::ALT);
        assert_eq!(input.position(), 5);
        press_mod(&mut input, KeyCode::Char('b'), KeyModifiers::ALT);
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_word_forward_stops_past_word_end() {
        let mut input = new();
        input.focus();
        input.set_value("site settings");
        input.cursor_start();
        press_mod(&mut input, KeyCode::Char('f'), KeyModifiers::ALT);
        assert_eq!(input.position(), 4);
        press_mod(&mut input, KeyCode::Char('f'), KeyModifiers::ALT);
        assert_eq!(input.position(), 13);
    }

    #[test]
    fn test_delete_word_backward() {
        let mut input = new();
        input.focus();
        input.set_value("hero banner");
        press_mod(&mut input, KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "hero ");
    }

    #[test]
    fn test_delete_to_start_and_end() {
        let mut input = new();
        input.focus();
        input.set_value("certificates");
        input.set_cursor(5);
        press_mod(&mut input, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "ificates");
        assert_eq!(input.position(), 0);
        input.set_cursor(3);
        press_mod(&mut input, KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "ifi");
    }

    #[test]
    fn test_window_follows_cursor() {
        let mut input = new();
        input.focus();
        input.set_width(5);
        input.set_value("0123456789");
        // Cursor sits past the end; the window shows the tail.
        assert_eq!(input.position(), 10);
        assert_eq!(input.offset, 6);
        input.cursor_start();
        assert_eq!(input.offset, 0);
    }

    #[test]
    fn test_placeholder_shown_when_empty() {
        let mut input = new();
        input.set_placeholder("Search…");
        let view = input.view();
        assert!(view.contains("Search…"));
    }
}
