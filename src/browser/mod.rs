//! Data browser: a searchable, sortable, paginated table of records with
//! add/edit/delete intents.
//!
//! The browser is the admin back-office workhorse: give it a record set and
//! a column schema and it derives the visible rows through a fixed
//! pipeline — filter by the search query, sort by the selected column,
//! slice the current page — and renders them with a selection cursor, a
//! status line, a windowed pagination control, and contextual help.
//!
//! ## Derived pipeline
//!
//! Filtering, sorting, and pagination are pure recomputation over the
//! browser's inputs; the pure entry points live in [`pipeline`]. The
//! visible sequence is materialized once per input change and `view` only
//! slices it, so repeated renders do no redundant work.
//!
//! ## View-state rules
//!
//! - Changing the query, the sort key, the sort direction, or the page
//!   size resets the browser to page 1.
//! - Page requests are clamped into `[1, total_pages]`; an empty result
//!   set pins the browser at page 1 with the empty-state message.
//! - Page sizes are restricted to [`types::PAGE_SIZE_OPTIONS`]; anything
//!   else is ignored at the setter boundary.
//!
//! ## Record intents
//!
//! `with_on_add` / `with_on_edit` / `with_on_delete` wire intent handlers
//! that return commands for the host application to run (a modal form, a
//! backend call). An unwired intent's key binding stays disabled and out of
//! the help bar. Delete is two-step: the browser opens a confirmation
//! prompt naming the record and only dispatches the handler on an explicit
//! confirm; declining is a no-op.
//!
//! ## Searching
//!
//! `/` opens the search box; every keystroke filters live. Enter accepts
//! the query, escape cancels it, and escape again clears an applied query.

pub mod keys;
pub mod pipeline;
pub mod style;
pub mod types;

mod model;
mod rendering;

pub use keys::BrowserKeyMap;
pub use model::{AddHandler, Model, RecordHandler};
pub use style::BrowserStyles;
pub use types::{
    CellRenderer, Column, FilterMode, Record, RecordId, SearchState, SortDirection, Value,
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};

use crate::confirm::{self, Decision};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use model::PendingDelete;
use types::SearchState as State;

impl<R: Record> Model<R> {
    /// Handles a message, returning any command for the runtime.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        // Keep the spinner animating while records load.
        if self.loading {
            if let Some(cmd) = self.spinner.update(msg) {
                return Some(cmd);
            }
        }

        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            // Non-key messages can still belong to the search caret.
            return self.search_input.update(msg);
        };

        // An open delete prompt captures every key until it resolves.
        if self.pending_delete.is_some() {
            return self.resolve_pending_delete(msg);
        }

        if self.search_state == State::Editing {
            return self.update_search(msg, key_msg);
        }

        if self.keymap.search.matches(key_msg) {
            self.search_state = State::Editing;
            return self.search_input.focus();
        }
        if self.search_state == State::Applied && self.keymap.clear_search.matches(key_msg) {
            self.clear_query();
            return None;
        }

        if self.keymap.cursor_up.matches(key_msg) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if self.keymap.cursor_down.matches(key_msg) {
            let rows = self.paginator.items_on_page(self.visible.len());
            if self.cursor + 1 < rows {
                self.cursor += 1;
            }
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page();
        } else if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.go_to_start.matches(key_msg) {
            self.set_page(1);
        } else if self.keymap.go_to_end.matches(key_msg) {
            self.set_page(self.total_pages());
        } else if self.keymap.prev_column.matches(key_msg) {
            self.active_column = self.active_column.saturating_sub(1);
        } else if self.keymap.next_column.matches(key_msg) {
            if self.active_column + 1 < self.columns.len() {
                self.active_column += 1;
            }
        } else if self.keymap.sort.matches(key_msg) {
            let column = &self.columns[self.active_column];
            if column.is_sortable() {
                let key = column.key().to_string();
                self.sort_by(&key);
            }
        } else if self.keymap.cycle_page_size.matches(key_msg) {
            self.cycle_page_size();
        } else if self.keymap.add.matches(key_msg) {
            return self.on_add.as_ref().map(|handler| handler());
        } else if self.keymap.edit.matches(key_msg) {
            if let (Some(handler), Some(index)) =
                (self.on_edit.clone(), self.selected_record_index())
            {
                return Some(handler(&self.records[index]));
            }
        } else if self.keymap.delete.matches(key_msg) {
            self.request_delete();
        } else if self.keymap.show_full_help.matches(key_msg) {
            self.help.show_all = !self.help.show_all;
        }

        None
    }

    /// Index into the record set of the row under the cursor.
    fn selected_record_index(&self) -> Option<usize> {
        let (start, end) = self.paginator.slice_bounds(self.visible.len());
        self.visible[start..end].get(self.cursor).copied()
    }

    /// Opens the confirmation prompt for the selected record. Does nothing
    /// when no delete handler is wired or nothing is selected.
    fn request_delete(&mut self) {
        if self.on_delete.is_none() {
            return;
        }
        if let Some(index) = self.selected_record_index() {
            let name = self.record_display_name(&self.records[index]);
            self.pending_delete = Some(PendingDelete {
                record_index: index,
                prompt: confirm::new(format!("Delete \"{}\"?", name)),
            });
        }
    }

    fn resolve_pending_delete(&mut self, msg: &Msg) -> Option<Cmd> {
        let pending = self.pending_delete.as_mut()?;
        match pending.prompt.update(msg) {
            Some(Decision::Confirmed) => {
                let index = pending.record_index;
                self.pending_delete = None;
                let handler = self.on_delete.clone()?;
                Some(handler(&self.records[index]))
            }
            Some(Decision::Declined) => {
                self.pending_delete = None;
                None
            }
            None => None,
        }
    }

    fn update_search(&mut self, msg: &Msg, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.accept_search.matches(key_msg) {
            self.search_state = if self.query().trim().is_empty() {
                State::Idle
            } else {
                State::Applied
            };
            self.search_input.blur();
            return None;
        }
        if self.keymap.cancel_search.matches(key_msg) {
            self.search_input.blur();
            self.clear_query();
            return None;
        }

        let before = self.search_input.value();
        let cmd = self.search_input.update(msg);
        if self.search_input.value() != before {
            // Live filtering: every query change restarts at page 1.
            self.reset_to_first_page();
        }
        cmd
    }
}
