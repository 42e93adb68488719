//! Model struct, construction, and view-state transitions for the data
//! browser.

use super::keys::BrowserKeyMap;
use super::pipeline;
use super::style::BrowserStyles;
use super::types::{
    Column, FilterMode, Record, SearchState, SortDirection, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
use crate::{confirm, help, paginator, spinner, textinput};
use bubbletea_rs::Cmd;
use std::sync::Arc;

/// Handler invoked for the add intent.
pub type AddHandler = Arc<dyn Fn() -> Cmd + Send + Sync>;

/// Handler invoked with the targeted record for edit/delete intents.
pub type RecordHandler<R> = Arc<dyn Fn(&R) -> Cmd + Send + Sync>;

pub(super) struct PendingDelete {
    /// Index into `records` of the record awaiting confirmation.
    pub(super) record_index: usize,
    pub(super) prompt: confirm::Model,
}

/// A browsable, searchable, sortable, paginated view over a record set,
/// with optional add/edit/delete intents.
///
/// The visible sequence is recomputed whenever an input changes (records,
/// query, sort state); rendering only slices the current page out of it.
/// The recomputation is pure: the same inputs always produce the same view.
///
/// # Examples
///
/// ```rust
/// use backoffice_widgets::browser::{Column, Model, Record, RecordId, Value};
///
/// #[derive(Clone)]
/// struct News {
///     id: i64,
///     title: String,
/// }
///
/// impl Record for News {
///     fn id(&self) -> RecordId {
///         RecordId::Int(self.id)
///     }
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "title" => Value::Text(self.title.clone()),
///             _ => Value::Null,
///         }
///     }
/// }
///
/// let records = vec![News { id: 1, title: "Opening night".into() }];
/// let browser = Model::new(records, vec![Column::new("title", "Title")])
///     .with_title("News");
/// assert_eq!(browser.visible_count(), 1);
/// ```
pub struct Model<R: Record> {
    pub(super) title: String,
    pub(super) records: Vec<R>,
    pub(super) columns: Vec<Column<R>>,

    // Derived visible sequence: indices into `records`, filtered and sorted.
    pub(super) visible: Vec<usize>,

    // View state.
    pub(super) search_input: textinput::Model,
    pub(super) search_state: SearchState,
    pub(super) filter_mode: FilterMode,
    pub(super) sort_key: Option<String>,
    pub(super) sort_direction: SortDirection,
    pub(super) paginator: paginator::Model,
    pub(super) page_size: usize,
    pub(super) cursor: usize,
    pub(super) active_column: usize,

    pub(super) loading: bool,
    pub(super) empty_message: String,
    pub(super) pending_delete: Option<PendingDelete>,

    // Sub-components and configuration.
    pub(super) spinner: spinner::Model,
    pub(super) help: help::Model,
    /// Key bindings.
    pub keymap: BrowserKeyMap,
    /// Styles.
    pub styles: BrowserStyles,

    pub(super) on_add: Option<AddHandler>,
    pub(super) on_edit: Option<RecordHandler<R>>,
    pub(super) on_delete: Option<RecordHandler<R>>,
}

impl<R: Record> Model<R> {
    /// Creates a browser over the given records and columns.
    pub fn new(records: Vec<R>, columns: Vec<Column<R>>) -> Self {
        let page_size = DEFAULT_PAGE_SIZE;
        let paginator = paginator::Model::new()
            .with_per_page(page_size)
            .with_total_items(records.len());

        let mut search_input = textinput::new();
        search_input.prompt = String::new();
        search_input.set_placeholder("type to search");

        let mut model = Self {
            title: "Records".to_string(),
            records,
            columns,
            visible: Vec::new(),
            search_input,
            search_state: SearchState::Idle,
            filter_mode: FilterMode::Substring,
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            paginator,
            page_size,
            cursor: 0,
            active_column: 0,
            loading: false,
            empty_message: "No records found.".to_string(),
            pending_delete: None,
            spinner: spinner::new(),
            help: help::new(),
            keymap: BrowserKeyMap::default(),
            styles: BrowserStyles::default(),
            on_add: None,
            on_edit: None,
            on_delete: None,
        };
        model.spinner.style = model.styles.spinner.clone();
        model.refresh();
        model
    }

    /// Sets the browser title (builder pattern).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the empty-state message (builder pattern).
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Sets the query matching mode (builder pattern).
    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self.refresh();
        self
    }

    /// Sets the initial page size (builder pattern). Sizes outside
    /// [`PAGE_SIZE_OPTIONS`] are ignored.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.set_page_size(size);
        self
    }

    /// Wires the add intent and enables its key binding (builder pattern).
    pub fn with_on_add<F>(mut self, handler: F) -> Self
    where
        F: Fn() -> Cmd + Send + Sync + 'static,
    {
        self.on_add = Some(Arc::new(handler));
        self.keymap.add.set_enabled(true);
        self
    }

    /// Wires the edit intent and enables its key binding (builder pattern).
    pub fn with_on_edit<F>(mut self, handler: F) -> Self
    where
        F: Fn(&R) -> Cmd + Send + Sync + 'static,
    {
        self.on_edit = Some(Arc::new(handler));
        self.keymap.edit.set_enabled(true);
        self
    }

    /// Wires the delete intent and enables its key binding (builder
    /// pattern). Deletion always goes through a confirmation prompt.
    pub fn with_on_delete<F>(mut self, handler: F) -> Self
    where
        F: Fn(&R) -> Cmd + Send + Sync + 'static,
    {
        self.on_delete = Some(Arc::new(handler));
        self.keymap.delete.set_enabled(true);
        self
    }

    /// Replaces the record set and recomputes the view.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.refresh();
    }

    /// Returns the full record set.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Returns the columns.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Number of records surviving the current query.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// The filtered, sorted sequence, in display order across all pages.
    pub fn visible_records(&self) -> Vec<&R> {
        self.visible.iter().map(|&i| &self.records[i]).collect()
    }

    /// The current page's slice of the visible sequence.
    pub fn page_records(&self) -> Vec<&R> {
        let (start, end) = self.paginator.slice_bounds(self.visible.len());
        self.visible[start..end]
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// The record under the row cursor, if any.
    pub fn selected_record(&self) -> Option<&R> {
        let (start, end) = self.paginator.slice_bounds(self.visible.len());
        self.visible[start..end]
            .get(self.cursor)
            .map(|&i| &self.records[i])
    }

    /// The current search query.
    pub fn query(&self) -> String {
        self.search_input.value()
    }

    /// Sets the search query, resetting to page 1 when it changes.
    pub fn set_query(&mut self, query: &str) {
        if self.search_input.value() == query {
            return;
        }
        self.search_input.set_value(query);
        self.search_state = if query.trim().is_empty() {
            SearchState::Idle
        } else {
            SearchState::Applied
        };
        self.reset_to_first_page();
    }

    /// Clears the search query and shows all records again.
    pub fn clear_query(&mut self) {
        self.search_input.reset();
        self.search_state = SearchState::Idle;
        self.reset_to_first_page();
    }

    /// The sorted column's key, if a sort is active.
    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    /// The current sort direction.
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Sorts by the given field key and resets to page 1.
    ///
    /// Sorting by the already-sorted key toggles the direction; a new key
    /// sorts ascending.
    pub fn sort_by(&mut self, key: &str) {
        if self.sort_key.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = Some(key.to_string());
            self.sort_direction = SortDirection::Ascending;
        }
        self.reset_to_first_page();
    }

    /// Removes the sort, restoring input order.
    pub fn clear_sort(&mut self) {
        self.sort_key = None;
        self.sort_direction = SortDirection::Ascending;
        self.reset_to_first_page();
    }

    /// The current page, 1-based.
    pub fn current_page(&self) -> usize {
        self.paginator.page
    }

    /// Total pages over the visible sequence, minimum 1.
    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages
    }

    /// Moves to the given page, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        self.paginator.set_page(page);
        self.cursor = 0;
    }

    /// Moves to the next page, stopping at the last.
    pub fn next_page(&mut self) {
        self.paginator.next_page();
        self.cursor = 0;
    }

    /// Moves to the previous page, stopping at the first.
    pub fn prev_page(&mut self) {
        self.paginator.prev_page();
        self.cursor = 0;
    }

    /// The current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sets the page size and resets to page 1.
    ///
    /// Sizes outside [`PAGE_SIZE_OPTIONS`] are a caller bug and are
    /// ignored; returns whether the size was accepted.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.paginator.set_per_page(size);
        self.reset_to_first_page();
        true
    }

    /// Advances to the next allowed page size, wrapping around.
    pub fn cycle_page_size(&mut self) {
        let at = PAGE_SIZE_OPTIONS
            .iter()
            .position(|&s| s == self.page_size)
            .unwrap_or(0);
        let next = PAGE_SIZE_OPTIONS[(at + 1) % PAGE_SIZE_OPTIONS.len()];
        self.set_page_size(next);
    }

    /// Sets the loading flag; while set, rows are replaced by a spinner.
    pub fn set_loading(&mut self, loading: bool) -> Option<Cmd> {
        self.loading = loading;
        if loading {
            Some(self.spinner.tick())
        } else {
            None
        }
    }

    /// Returns the loading flag.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Index of the keyboard-active column.
    pub fn active_column(&self) -> usize {
        self.active_column
    }

    /// True while a delete confirmation prompt is open.
    pub fn is_confirming_delete(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Recomputes the visible sequence from the current inputs and clamps
    /// dependent state. Pure over (records, columns, query, filter mode,
    /// sort key, sort direction).
    pub(super) fn refresh(&mut self) {
        self.visible = pipeline::visible_indices(
            &self.records,
            &self.columns,
            &self.search_input.value(),
            self.filter_mode,
            self.sort_key.as_deref(),
            self.sort_direction,
        );
        self.paginator.set_per_page(self.page_size);
        self.paginator.set_total_items(self.visible.len());
        self.clamp_cursor();
    }

    pub(super) fn reset_to_first_page(&mut self) {
        self.refresh();
        self.paginator.set_page(1);
        self.cursor = 0;
    }

    pub(super) fn clamp_cursor(&mut self) {
        let rows = self.paginator.items_on_page(self.visible.len());
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    /// Display text used to name a record in prompts: the first column's
    /// rendered value, falling back to the record id.
    pub(super) fn record_display_name(&self, record: &R) -> String {
        self.columns
            .first()
            .and_then(|col| {
                let value = record.field(col.key());
                col.render_cell(&value, record)
                    .or_else(|| value.display_text())
            })
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| record.id().to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::browser::types::{RecordId, Value};

    #[derive(Debug, Clone)]
    pub(crate) struct Item {
        pub id: i64,
        pub name: String,
        pub views: Option<i64>,
    }

    impl Record for Item {
        fn id(&self) -> RecordId {
            RecordId::Int(self.id)
        }

        fn field(&self, key: &str) -> Value {
            match key {
                "name" => Value::Text(self.name.clone()),
                "views" => self.views.into(),
                _ => Value::Null,
            }
        }
    }

    pub(crate) fn items(n: usize) -> Vec<Item> {
        (1..=n as i64)
            .map(|id| Item {
                id,
                name: format!("item {:02}", id),
                views: Some(id * 10),
            })
            .collect()
    }

    pub(crate) fn columns() -> Vec<Column<Item>> {
        vec![Column::new("name", "Name"), Column::new("views", "Views")]
    }

    fn browser(n: usize) -> Model<Item> {
        Model::new(items(n), columns())
    }

    #[test]
    fn test_default_page_size_is_ten() {
        let b = browser(25);
        assert_eq!(b.page_size(), 10);
        assert_eq!(b.total_pages(), 3);
        assert_eq!(b.current_page(), 1);
    }

    #[test]
    fn test_page_requests_clamp() {
        let mut b = browser(25);
        b.set_page(99);
        assert_eq!(b.current_page(), 3);
        b.set_page(0);
        assert_eq!(b.current_page(), 1);
    }

    #[test]
    fn test_short_last_page_holds_the_remainder() {
        // 11 records at page size 5: ceil(11/5) = 3 pages, and page 3
        // holds exactly one record.
        let mut b = browser(11);
        assert!(b.set_page_size(5));
        b.set_page(3);
        assert_eq!(b.total_pages(), 3);
        assert_eq!(b.page_records().len(), 1);
        assert_eq!(b.page_records()[0].id, 11);
    }

    #[test]
    fn test_invalid_page_size_is_ignored() {
        let mut b = browser(30);
        assert!(!b.set_page_size(7));
        assert_eq!(b.page_size(), 10);
        assert!(b.set_page_size(25));
        assert_eq!(b.page_size(), 25);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut b = browser(100);
        b.set_page(5);
        b.set_page_size(25);
        assert_eq!(b.current_page(), 1);
    }

    #[test]
    fn test_query_change_resets_page() {
        let mut b = browser(100);
        b.set_page(4);
        b.set_query("item");
        assert_eq!(b.current_page(), 1);
    }

    #[test]
    fn test_sort_key_and_direction_changes_reset_page() {
        let mut b = browser(100);
        b.set_page(4);
        b.sort_by("name");
        assert_eq!(b.current_page(), 1);
        assert_eq!(b.sort_direction(), SortDirection::Ascending);

        b.set_page(3);
        b.sort_by("name"); // same column: toggle direction
        assert_eq!(b.sort_direction(), SortDirection::Descending);
        assert_eq!(b.current_page(), 1);

        b.set_page(2);
        b.sort_by("views"); // new column: ascending again
        assert_eq!(b.sort_direction(), SortDirection::Ascending);
        assert_eq!(b.current_page(), 1);
    }

    #[test]
    fn test_pages_concatenate_to_visible_sequence() {
        let mut b = browser(23);
        b.sort_by("name");
        let all: Vec<i64> = b.visible_records().iter().map(|r| r.id).collect();

        let mut collected = Vec::new();
        for page in 1..=b.total_pages() {
            b.set_page(page);
            let rows = b.page_records();
            assert!(rows.len() <= b.page_size());
            collected.extend(rows.iter().map(|r| r.id));
        }
        assert_eq!(collected, all);
        assert_eq!(collected.len(), 23);
    }

    #[test]
    fn test_unmatched_query_pins_page_one() {
        let mut b = browser(20);
        b.set_query("zzz");
        assert_eq!(b.visible_count(), 0);
        assert_eq!(b.total_pages(), 1);
        assert_eq!(b.current_page(), 1);
        assert!(b.selected_record().is_none());
    }

    #[test]
    fn test_set_records_reclamps_page() {
        let mut b = browser(100);
        b.set_page(10);
        b.set_records(items(12));
        assert_eq!(b.total_pages(), 2);
        assert!(b.current_page() <= 2);
    }

    #[test]
    fn test_cursor_clamps_to_short_last_page() {
        let mut b = browser(12);
        b.cursor = 9;
        b.set_page(2);
        assert_eq!(b.cursor, 0);
        b.cursor = 5;
        b.clamp_cursor();
        assert_eq!(b.cursor, 1); // last page has rows 11 and 12
    }

    #[test]
    fn test_selected_record_follows_cursor_and_page() {
        let mut b = browser(12);
        assert_eq!(b.selected_record().unwrap().id, 1);
        b.cursor = 3;
        assert_eq!(b.selected_record().unwrap().id, 4);
        b.set_page(2);
        assert_eq!(b.selected_record().unwrap().id, 11);
    }

    #[test]
    fn test_cycle_page_size_wraps() {
        let mut b = browser(10);
        b.cycle_page_size();
        assert_eq!(b.page_size(), 25);
        b.cycle_page_size();
        b.cycle_page_size();
        assert_eq!(b.page_size(), 100);
        b.cycle_page_size();
        assert_eq!(b.page_size(), 5);
    }

    #[test]
    fn test_record_display_name_prefers_first_column() {
        let b = browser(3);
        let name = b.record_display_name(&b.records()[0]);
        assert_eq!(name, "item 01");
    }
}
