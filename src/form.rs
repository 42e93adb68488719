//! Record edit form with required-field validation.
//!
//! A form is a titled stack of labeled text-input fields. Submission is
//! blocked while any required field is empty: validation failures are
//! reported synchronously next to their fields and the form stays open.
//! Cancellation resolves without touching anything.
//!
//! # Examples
//!
//! ```rust
//! use backoffice_widgets::form::{self, Field};
//!
//! let mut form = form::new(
//!     "New article",
//!     vec![
//!         Field::new("title", "Title").required(),
//!         Field::new("body", "Body"),
//!     ],
//! );
//! let _cmd = form.focus_first();
//! assert!(form.view().contains("Title"));
//! ```

use crate::key::{Binding, KeyMap as KeyMapTrait};
use crate::textinput;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use thiserror::Error;

/// A synchronous input validation failure: a required field is empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{label} is required")]
pub struct ValidationError {
    /// Field key the failure belongs to.
    pub field: String,
    /// Human-readable field label used in the message.
    pub label: String,
}

/// One labeled input field.
pub struct Field {
    /// Field key reported in the submitted values.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Whether submission requires a non-blank value.
    pub required: bool,
    /// The underlying text input.
    pub input: textinput::Model,
}

impl Field {
    /// Creates an optional field.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        let mut input = textinput::new();
        input.set_placeholder(&label);
        Self {
            name: name.into(),
            label,
            required: false,
            input,
        }
    }

    /// Marks the field as required (builder pattern).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Pre-fills the field, e.g. when editing an existing record (builder
    /// pattern).
    pub fn with_value(mut self, value: &str) -> Self {
        self.input.set_value(value);
        self
    }
}

/// Resolution of a form interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult {
    /// The form validated and was submitted with these `(name, value)` pairs.
    Submitted(Vec<(String, String)>),
    /// The operator cancelled; nothing was touched.
    Cancelled,
}

/// Key bindings for form navigation and resolution.
#[derive(Debug, Clone)]
pub struct FormKeyMap {
    /// Focus the next field.
    pub next_field: Binding,
    /// Focus the previous field.
    pub prev_field: Binding,
    /// Validate and submit.
    pub submit: Binding,
    /// Cancel without submitting.
    pub cancel: Binding,
}

impl Default for FormKeyMap {
    fn default() -> Self {
        Self {
            next_field: Binding::new(vec![KeyCode::Tab, KeyCode::Down]).with_help("tab", "next"),
            prev_field: Binding::new(vec![KeyCode::BackTab, KeyCode::Up])
                .with_help("shift+tab", "previous"),
            submit: Binding::new(vec![KeyCode::Enter]).with_help("enter", "save"),
            cancel: Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        }
    }
}

impl KeyMapTrait for FormKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.next_field,
            &self.prev_field,
            &self.submit,
            &self.cancel,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.next_field, &self.prev_field],
            vec![&self.submit, &self.cancel],
        ]
    }
}

/// Styles for form elements.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for the form title.
    pub title: Style,
    /// Style for field labels.
    pub label: Style,
    /// Style for the required-field marker.
    pub required_marker: Style,
    /// Style for validation messages.
    pub error: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            label: Style::new().bold(true),
            required_marker: Style::new().foreground(AdaptiveColor {
                Light: "#B00020",
                Dark: "#FF5F87",
            }),
            error: Style::new().foreground(AdaptiveColor {
                Light: "#B00020",
                Dark: "#FF5F87",
            }),
        }
    }
}

/// Form model.
pub struct Model {
    /// Title shown above the fields.
    pub title: String,
    /// Key bindings.
    pub keymap: FormKeyMap,
    /// Styles.
    pub styles: Styles,

    fields: Vec<Field>,
    focused: usize,
    errors: Vec<ValidationError>,
}

/// Creates a form with the given title and fields.
pub fn new(title: impl Into<String>, fields: Vec<Field>) -> Model {
    Model {
        title: title.into(),
        keymap: FormKeyMap::default(),
        styles: Styles::default(),
        fields,
        focused: 0,
        errors: Vec::new(),
    }
}

impl Model {
    /// Focuses the first field; returns its caret command.
    pub fn focus_first(&mut self) -> Option<Cmd> {
        self.focused = 0;
        self.fields
            .get_mut(0)
            .and_then(|field| field.input.focus())
    }

    /// Returns the current `(name, value)` pairs in field order.
    pub fn values(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.input.value()))
            .collect()
    }

    /// Returns the outstanding validation errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Checks required fields, recording one error per blank field.
    /// Returns true when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = self
            .fields
            .iter()
            .filter(|f| f.required && f.input.value().trim().is_empty())
            .map(|f| ValidationError {
                field: f.name.clone(),
                label: f.label.clone(),
            })
            .collect();
        self.errors.is_empty()
    }

    /// Handles navigation, submission, cancellation, and typing.
    ///
    /// Returns the resolution when the form closes, plus any command from
    /// the focused input's caret.
    pub fn update(&mut self, msg: &Msg) -> (Option<FormResult>, Option<Cmd>) {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.cancel.matches(key_msg) {
                return (Some(FormResult::Cancelled), None);
            }
            if self.keymap.submit.matches(key_msg) {
                if self.validate() {
                    return (Some(FormResult::Submitted(self.values())), None);
                }
                // Validation failed: stay open with the errors displayed.
                return (None, None);
            }
            if self.keymap.next_field.matches(key_msg) {
                let cmd = self.move_focus(1);
                return (None, cmd);
            }
            if self.keymap.prev_field.matches(key_msg) {
                let cmd = self.move_focus(-1);
                return (None, cmd);
            }
        }

        let cmd = self
            .fields
            .get_mut(self.focused)
            .and_then(|field| field.input.update(msg));
        (None, cmd)
    }

    fn move_focus(&mut self, delta: isize) -> Option<Cmd> {
        if self.fields.is_empty() {
            return None;
        }
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.input.blur();
        }
        let len = self.fields.len() as isize;
        let next = (self.focused as isize + delta).rem_euclid(len) as usize;
        self.focused = next;
        self.fields[next].input.focus()
    }

    /// Index of the focused field.
    pub fn focused_field(&self) -> usize {
        self.focused
    }

    /// Renders the form.
    pub fn view(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.styles.title.render(&self.title));
        out.push('\n');

        for field in &self.fields {
            out.push('\n');
            out.push_str(&self.styles.label.render(&field.label));
            if field.required {
                out.push_str(&self.styles.required_marker.render("*"));
            }
            out.push('\n');
            out.push_str(&field.input.view());
            out.push('\n');
            if let Some(err) = self.errors.iter().find(|e| e.field == field.name) {
                out.push_str(&self.styles.error.render(&err.to_string()));
                out.push('\n');
            }
        }
        out
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.fields
            .get_mut(self.focused)
            .and_then(|field| field.input.focus())
    }

    fn blur(&mut self) {
        for field in &mut self.fields {
            field.input.blur();
        }
    }

    fn focused(&self) -> bool {
        self.fields.iter().any(|f| f.input.focused())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn news_form() -> Model {
        new(
            "New article",
            vec![
                Field::new("title", "Title").required(),
                Field::new("body", "Body"),
            ],
        )
    }

    #[test]
    fn test_submit_blocked_while_required_field_empty() {
        let mut form = news_form();
        form.focus_first();
        let (result, _cmd) = form.update(&key(KeyCode::Enter));
        assert_eq!(result, None);
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors()[0].field, "title");
        assert_eq!(form.errors()[0].to_string(), "Title is required");
    }

    #[test]
    fn test_whitespace_only_value_fails_validation() {
        let mut form = news_form();
        form.focus_first();
        for ch in "   ".chars() {
            form.update(&key(KeyCode::Char(ch)));
        }
        let (result, _cmd) = form.update(&key(KeyCode::Enter));
        assert_eq!(result, None);
        assert!(!form.errors().is_empty());
    }

    #[test]
    fn test_valid_form_submits_values_in_order() {
        let mut form = news_form();
        form.focus_first();
        for ch in "Opening night".chars() {
            form.update(&key(KeyCode::Char(ch)));
        }
        let (result, _cmd) = form.update(&key(KeyCode::Enter));
        assert_eq!(
            result,
            Some(FormResult::Submitted(vec![
                ("title".to_string(), "Opening night".to_string()),
                ("body".to_string(), String::new()),
            ]))
        );
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut form = news_form();
        form.focus_first();
        assert_eq!(form.focused_field(), 0);
        form.update(&key(KeyCode::Tab));
        assert_eq!(form.focused_field(), 1);
        form.update(&key(KeyCode::Tab));
        assert_eq!(form.focused_field(), 0);
        form.update(&key(KeyCode::BackTab));
        assert_eq!(form.focused_field(), 1);
    }

    #[test]
    fn test_cancel_resolves_without_submitting() {
        let mut form = news_form();
        form.focus_first();
        let (result, _cmd) = form.update(&key(KeyCode::Esc));
        assert_eq!(result, Some(FormResult::Cancelled));
    }

    #[test]
    fn test_prefilled_edit_form_passes_validation() {
        let mut form = new(
            "Edit article",
            vec![Field::new("title", "Title").required().with_value("Hello")],
        );
        let (result, _cmd) = form.update(&key(KeyCode::Enter));
        assert_eq!(
            result,
            Some(FormResult::Submitted(vec![(
                "title".to_string(),
                "Hello".to_string()
            )]))
        );
    }

    #[test]
    fn test_error_clears_after_fix_and_resubmit() {
        let mut form = news_form();
        form.focus_first();
        form.update(&key(KeyCode::Enter));
        assert!(!form.errors().is_empty());
        for ch in "Fixed".chars() {
            form.update(&key(KeyCode::Char(ch)));
        }
        let (result, _cmd) = form.update(&key(KeyCode::Enter));
        assert!(matches!(result, Some(FormResult::Submitted(_))));
        assert!(form.errors().is_empty());
    }
}
