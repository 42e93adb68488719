//! Key bindings for the data browser.
//!
//! The add/edit/delete bindings start out disabled; wiring a callback with
//! `with_on_add`/`with_on_edit`/`with_on_delete` enables the matching
//! binding, so affordances without a handler never match keys and never
//! appear in help.

use crate::key::{Binding, KeyMap as KeyMapTrait};
use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings for browsing, searching, sorting, and record actions.
#[derive(Debug, Clone)]
pub struct BrowserKeyMap {
    /// Move the row cursor up.
    pub cursor_up: Binding,
    /// Move the row cursor down.
    pub cursor_down: Binding,
    /// Go to the previous page.
    pub prev_page: Binding,
    /// Go to the next page.
    pub next_page: Binding,
    /// Jump to the first page.
    pub go_to_start: Binding,
    /// Jump to the last page.
    pub go_to_end: Binding,
    /// Move the active column left.
    pub prev_column: Binding,
    /// Move the active column right.
    pub next_column: Binding,
    /// Sort by the active column (again to toggle direction).
    pub sort: Binding,
    /// Cycle through the allowed page sizes.
    pub cycle_page_size: Binding,
    /// Start typing a search query.
    pub search: Binding,
    /// Accept the query being typed.
    pub accept_search: Binding,
    /// Cancel the query being typed.
    pub cancel_search: Binding,
    /// Clear an applied query.
    pub clear_search: Binding,
    /// Create a record (disabled until a handler is wired).
    pub add: Binding,
    /// Edit the selected record (disabled until a handler is wired).
    pub edit: Binding,
    /// Delete the selected record (disabled until a handler is wired).
    pub delete: Binding,
    /// Toggle the full help view.
    pub show_full_help: Binding,
    /// Quit.
    pub quit: Binding,
    /// Force quit.
    pub force_quit: Binding,
}

impl Default for BrowserKeyMap {
    fn default() -> Self {
        let mut add = Binding::new(vec![KeyCode::Char('a')]).with_help("a", "add");
        let mut edit =
            Binding::new(vec![KeyCode::Char('e'), KeyCode::Enter]).with_help("e/enter", "edit");
        let mut delete =
            Binding::new(vec![KeyCode::Char('d'), KeyCode::Delete]).with_help("d", "delete");
        add.set_enabled(false);
        edit.set_enabled(false);
        delete.set_enabled(false);

        Self {
            cursor_up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            cursor_down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            prev_page: Binding::new(vec![KeyCode::PageUp, KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev page"),
            next_page: Binding::new(vec![KeyCode::PageDown, KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next page"),
            go_to_start: Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "first page"),
            go_to_end: Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "last page"),
            prev_column: Binding::new(vec![KeyCode::Char('[')]).with_help("[", "column left"),
            next_column: Binding::new(vec![KeyCode::Char(']')]).with_help("]", "column right"),
            sort: Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            cycle_page_size: Binding::new(vec![KeyCode::Char('z')]).with_help("z", "page size"),
            search: Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            accept_search: Binding::new(vec![KeyCode::Enter]).with_help("enter", "apply"),
            cancel_search: Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
            clear_search: Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear search"),
            add,
            edit,
            delete,
            show_full_help: Binding::new(vec![KeyCode::Char('?')]).with_help("?", "help"),
            quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            force_quit: Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
                .with_help("ctrl+c", "quit"),
        }
    }
}

impl KeyMapTrait for BrowserKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.search,
            &self.sort,
            &self.add,
            &self.edit,
            &self.delete,
            &self.show_full_help,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.prev_page,
                &self.next_page,
                &self.go_to_start,
                &self.go_to_end,
            ],
            vec![
                &self.prev_column,
                &self.next_column,
                &self.sort,
                &self.cycle_page_size,
            ],
            vec![&self.search, &self.add, &self.edit, &self.delete],
            vec![&self.show_full_help, &self.quit, &self.force_quit],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyMap;

    #[test]
    fn test_record_actions_start_disabled() {
        let km = BrowserKeyMap::default();
        assert!(!km.add.enabled());
        assert!(!km.edit.enabled());
        assert!(!km.delete.enabled());
        assert!(km.search.enabled());
    }

    #[test]
    fn test_full_help_covers_all_groups() {
        let km = BrowserKeyMap::default();
        assert_eq!(km.full_help().len(), 4);
        assert!(!km.short_help().is_empty());
    }
}
