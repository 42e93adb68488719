#![warn(missing_docs)]

//! # backoffice-widgets
//!
//! Reusable TUI components for building admin back-office applications with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! The centerpiece is the [`browser`]: a generic data browser that takes a
//! record set and a column schema and provides client-side search, sorting,
//! pagination, and add/edit/delete intents — the table-with-toolbar at the
//! heart of every content admin. Around it the crate carries the supporting
//! components such a screen needs (text input, paginator, spinner,
//! confirmation prompt, edit form, help bar) and, in [`backend`], trait
//! contracts for the remote services the application delegates to (data
//! store, session provider, blob store, social feed).
//!
//! Each component follows the Elm Architecture pattern with `update()` and
//! `view()` methods and composes into a host `bubbletea_rs::Model`. No
//! component performs I/O: records arrive already materialized, and record
//! intents dispatch commands the host wires up.
//!
//! ## A minimal admin screen
//!
//! ```rust
//! use backoffice_widgets::browser::{Column, Model as Browser, Record, RecordId, Value};
//!
//! #[derive(Clone)]
//! struct Article {
//!     id: i64,
//!     title: String,
//!     views: i64,
//! }
//!
//! impl Record for Article {
//!     fn id(&self) -> RecordId {
//!         RecordId::Int(self.id)
//!     }
//!     fn field(&self, key: &str) -> Value {
//!         match key {
//!             "title" => Value::Text(self.title.clone()),
//!             "views" => Value::Int(self.views),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let articles = vec![
//!     Article { id: 1, title: "Opening night".into(), views: 412 },
//!     Article { id: 2, title: "Tour dates".into(), views: 97 },
//! ];
//!
//! let browser = Browser::new(
//!     articles,
//!     vec![
//!         Column::new("title", "Title"),
//!         Column::new("views", "Views").with_width(8),
//!     ],
//! )
//! .with_title("News");
//!
//! assert_eq!(browser.visible_count(), 2);
//! let rendered = browser.view();
//! assert!(rendered.contains("Opening night"));
//! ```
//!
//! ## Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`browser`] | Searchable, sortable, paginated record table with CRUD intents |
//! | [`form`] | Labeled input fields with required-field validation |
//! | [`confirm`] | Two-step yes/no prompt for destructive actions |
//! | [`textinput`] | Single-line text input |
//! | [`paginator`] | Page state and the windowed page-number control |
//! | [`spinner`] | Loading animation |
//! | [`help`] | Contextual help bar rendered from key bindings |
//! | [`cursor`] | Blinking caret sub-component |
//!
//! ## Key bindings
//!
//! Components declare their bindings through the [`key`] module; the help
//! bar renders them automatically, and disabling a binding removes both the
//! key handling and the help entry.

pub mod backend;
pub mod browser;
pub mod confirm;
pub mod cursor;
pub mod form;
pub mod help;
pub mod key;
pub mod paginator;
pub mod spinner;
pub mod textinput;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Focused components receive keyboard input and show an active caret or
/// highlight; blurred components ignore input. `focus` may return a command
/// (typically a caret blink tick) for the runtime.
pub trait Component {
    /// Sets the component to the focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to the blurred state.
    fn blur(&mut self);

    /// Returns the current focus state.
    fn focused(&self) -> bool;
}

pub use browser::Model as Browser;
pub use confirm::Model as Confirm;
pub use cursor::Model as Cursor;
pub use form::Model as Form;
pub use help::Model as HelpModel;
pub use key::{matches, matches_binding, Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use paginator::Model as Paginator;
pub use spinner::Model as Spinner;
pub use textinput::Model as TextInput;

/// Prelude module for convenient imports.
///
/// ```rust
/// use backoffice_widgets::prelude::*;
/// ```
pub mod prelude {
    pub use crate::browser::{
        BrowserKeyMap, Column, FilterMode, Model as Browser, Record, RecordId, SearchState,
        SortDirection, Value,
    };
    pub use crate::confirm::{self, Decision, Model as Confirm};
    pub use crate::cursor::Model as Cursor;
    pub use crate::form::{self, Field, FormResult, Model as Form};
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{matches, matches_binding, Binding, KeyMap, KeyPress};
    pub use crate::paginator::Model as Paginator;
    pub use crate::spinner::{self, Model as Spinner};
    pub use crate::textinput::{self, Model as TextInput};
    pub use crate::Component;
}
