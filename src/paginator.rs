//! Pagination state and the page-number control.
//!
//! This component tracks pagination state (current page, page size, total
//! pages) and renders the pagination control itself; it does not render page
//! content. Pages are 1-based and every page request is clamped into
//! `[1, total_pages]`, so out-of-range requests can never produce an invalid
//! state. An empty data set pins `total_pages` (and the page) at 1.
//!
//! Three display modes are available:
//! - **Windowed** (default): first page, a gap ellipsis, a run of consecutive
//!   pages centered on the current one, a gap ellipsis, last page —
//!   e.g. `1 … 4 [5] 6 … 12`.
//! - **Arabic**: `5/12`.
//! - **Dots**: one dot per page with the current page highlighted.

use crate::key::{Binding, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;

/// How the pagination control is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// Windowed page numbers with gap ellipses (e.g. `1 … 4 [5] 6 … 12`).
    #[default]
    Windowed,
    /// Arabic numerals (e.g. `5/12`).
    Arabic,
    /// One dot per page (e.g. `○ ○ ● ○`).
    Dots,
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Go to the previous page.
    pub prev_page: Binding,
    /// Go to the next page.
    pub next_page: Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: Binding::new(vec![KeyCode::PageUp, KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev page"),
            next_page: Binding::new(vec![KeyCode::PageDown, KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next page"),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.prev_page, &self.next_page]]
    }
}

/// Number of consecutive pages shown by the windowed display mode.
pub const DEFAULT_WINDOW: usize = 5;

/// Paginator model.
///
/// # Examples
///
/// ```rust
/// use backoffice_widgets::paginator::Model;
///
/// let mut p = Model::new().with_per_page(2).with_total_items(5);
/// assert_eq!(p.total_pages, 3);
///
/// // Requests past the end clamp to the last page.
/// p.set_page(99);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.slice_bounds(5), (4, 5));
///
/// // Requests before the start clamp to page 1.
/// p.set_page(0);
/// assert_eq!(p.page, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Display mode for [`view`](Model::view).
    pub paginator_type: Type,
    /// The current page, 1-based, always within `[1, total_pages]`.
    pub page: usize,
    /// Items per page, minimum 1.
    pub per_page: usize,
    /// Total number of pages, minimum 1.
    pub total_pages: usize,
    /// Width of the consecutive-page run in windowed mode.
    pub window: usize,

    /// Marker for the current page in dots mode.
    pub active_dot: String,
    /// Marker for other pages in dots mode.
    pub inactive_dot: String,
    /// Format string for arabic mode; the two `%d` are current and total.
    pub arabic_format: String,

    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page: 1,
            per_page: 1,
            total_pages: 1,
            window: DEFAULT_WINDOW,
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "%d/%d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a paginator with default settings: one page, one item per
    /// page, windowed display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the items per page (builder pattern). Values below 1 clamp to 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.set_per_page(per_page);
        self
    }

    /// Sets the total number of items and derives `total_pages` (builder
    /// pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the items per page. Values below 1 clamp to 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Derives `total_pages` from an item count.
    ///
    /// Zero items still yield one page, and the current page is re-clamped
    /// when it falls past the new last page.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = if items == 0 {
            1
        } else {
            items.div_ceil(self.per_page)
        };
        self.page = self.page.clamp(1, self.total_pages);
    }

    /// Moves to the given page, clamping into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages);
    }

    /// Moves to the previous page, stopping at the first.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Moves to the next page, stopping at the last.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Returns true when the current page is the first.
    pub fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// Returns true when the current page is the last.
    pub fn on_last_page(&self) -> bool {
        self.page == self.total_pages
    }

    /// Returns `[start, end)` slice bounds for the current page over a
    /// sequence of the given length.
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Returns the number of items on the current page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.slice_bounds(total_items);
        end - start
    }

    /// Handles prev/next page key presses.
    pub fn update(&mut self, msg: &Msg) {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_page.matches(key_msg) {
                self.next_page();
            } else if self.keymap.prev_page.matches(key_msg) {
                self.prev_page();
            }
        }
    }

    /// Renders the control in the configured display mode.
    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Windowed => self.windowed_view(),
            Type::Arabic => self.arabic_view(),
            Type::Dots => self.dots_view(),
        }
    }

    fn arabic_view(&self) -> String {
        self.arabic_format
            .replacen("%d", &self.page.to_string(), 1)
            .replacen("%d", &self.total_pages.to_string(), 1)
    }

    fn dots_view(&self) -> String {
        let mut s = String::new();
        for p in 1..=self.total_pages {
            if p > 1 {
                s.push(' ');
            }
            s.push_str(if p == self.page {
                &self.active_dot
            } else {
                &self.inactive_dot
            });
        }
        s
    }

    fn windowed_view(&self) -> String {
        self.window_tokens()
            .iter()
            .map(|t| match t {
                PageToken::Page(p) if *p == self.page => format!("[{}]", p),
                PageToken::Page(p) => p.to_string(),
                PageToken::Gap => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Token sequence for the windowed display: page numbers and gap markers.
    pub fn window_tokens(&self) -> Vec<PageToken> {
        let window = self.window.max(1);
        let total = self.total_pages;
        if total <= window {
            return (1..=total).map(PageToken::Page).collect();
        }

        // A run of `window` pages centered on the current page, clamped so
        // the run never leaves [1, total].
        let half = window / 2;
        let mut start = self.page.saturating_sub(half).max(1);
        if start + window - 1 > total {
            start = total - window + 1;
        }
        let end = start + window - 1;

        let mut tokens = Vec::new();
        if start > 1 {
            tokens.push(PageToken::Page(1));
            if start > 2 {
                tokens.push(PageToken::Gap);
            }
        }
        tokens.extend((start..=end).map(PageToken::Page));
        if end < total {
            if end < total - 1 {
                tokens.push(PageToken::Gap);
            }
            tokens.push(PageToken::Page(total));
        }
        tokens
    }
}

/// One element of the windowed pagination display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A page number.
    Page(usize),
    /// A gap ellipsis between non-adjacent page numbers.
    Gap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubbletea_rs::KeyMsg;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_total_pages_rounds_up() {
        let p = Model::new().with_per_page(2).with_total_items(5);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_zero_items_pin_one_page() {
        let p = Model::new().with_per_page(10).with_total_items(0);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.items_on_page(0), 0);
    }

    #[test]
    fn test_set_page_clamps_both_ends() {
        let mut p = Model::new().with_per_page(2).with_total_items(6);
        p.set_page(99);
        assert_eq!(p.page, 3);
        p.set_page(0);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_shrinking_totals_reclamps_page() {
        let mut p = Model::new().with_per_page(10).with_total_items(100);
        p.set_page(10);
        p.set_total_items(35);
        assert_eq!(p.total_pages, 4);
        assert_eq!(p.page, 4);
    }

    #[test]
    fn test_last_page_slice_is_partial() {
        let mut p = Model::new().with_per_page(2).with_total_items(5);
        p.set_page(3);
        assert_eq!(p.slice_bounds(5), (4, 5));
        assert_eq!(p.items_on_page(5), 1);
    }

    #[test]
    fn test_prev_next_stop_at_bounds() {
        let mut p = Model::new().with_per_page(10).with_total_items(30);
        p.prev_page();
        assert_eq!(p.page, 1);
        p.set_page(3);
        p.next_page();
        assert_eq!(p.page, 3);
    }

    #[test]
    fn test_key_messages_drive_navigation() {
        let mut p = Model::new().with_per_page(10).with_total_items(30);
        let next: Msg = Box::new(KeyMsg {
            key: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
        });
        p.update(&next);
        assert_eq!(p.page, 2);
        let prev: Msg = Box::new(KeyMsg {
            key: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
        });
        p.update(&prev);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_window_shows_all_pages_when_few() {
        let p = Model::new().with_per_page(10).with_total_items(40);
        assert_eq!(p.windowed_view(), "[1] 2 3 4");
    }

    #[test]
    fn test_window_centers_on_current_page() {
        let mut p = Model::new().with_per_page(10).with_total_items(120);
        p.set_page(5);
        assert_eq!(p.windowed_view(), "1 … 3 4 [5] 6 7 … 12");
    }

    #[test]
    fn test_window_clamps_at_the_start() {
        let mut p = Model::new().with_per_page(10).with_total_items(120);
        p.set_page(2);
        assert_eq!(p.windowed_view(), "1 [2] 3 4 5 … 12");
    }

    #[test]
    fn test_window_clamps_at_the_end() {
        let mut p = Model::new().with_per_page(10).with_total_items(120);
        p.set_page(11);
        assert_eq!(p.windowed_view(), "1 … 8 9 10 [11] 12");
    }

    #[test]
    fn test_window_omits_gap_for_adjacent_edges() {
        let mut p = Model::new().with_per_page(10).with_total_items(70);
        p.set_page(4);
        // Pages 2..=6 run right up to both edges; no ellipsis needed.
        assert_eq!(p.windowed_view(), "1 2 3 [4] 5 6 7");
    }

    #[test]
    fn test_arabic_and_dots_views() {
        let mut p = Model::new().with_per_page(10).with_total_items(30);
        p.paginator_type = Type::Arabic;
        p.set_page(2);
        assert_eq!(p.view(), "2/3");
        p.paginator_type = Type::Dots;
        assert_eq!(p.view(), "○ • ○");
    }
}
