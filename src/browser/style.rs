//! Styling for the data browser.
//!
//! All defaults use adaptive colors so the browser stays readable in both
//! light and dark terminals.

use lipgloss_extras::prelude::*;

/// Ellipsis used when cell content is truncated to a column width.
pub const ELLIPSIS: &str = "…";

/// Placeholder shown for null or empty cell values.
pub const PLACEHOLDER: &str = "-";

/// Indicator suffix for the ascending sorted column.
pub const SORT_ASC: &str = "▲";

/// Indicator suffix for the descending sorted column.
pub const SORT_DESC: &str = "▼";

/// Styling configuration for every visual element of the browser.
#[derive(Debug, Clone)]
pub struct BrowserStyles {
    /// Container for the title line.
    pub title_bar: Style,
    /// The browser title text.
    pub title: Style,
    /// Header cells.
    pub header: Style,
    /// Header cell of the active (keyboard-selected) column.
    pub header_active: Style,
    /// Normal data cells.
    pub cell: Style,
    /// The selected row.
    pub selected_row: Style,
    /// The running row-index column.
    pub row_index: Style,
    /// The search prompt label.
    pub search_prompt: Style,
    /// The status bar.
    pub status_bar: Style,
    /// The empty-state message.
    pub no_records: Style,
    /// The loading indicator line.
    pub loading: Style,
    /// The spinner glyph.
    pub spinner: Style,
    /// The pagination control.
    pub pagination: Style,
    /// The help area.
    pub help: Style,
}

impl Default for BrowserStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            title_bar: Style::new().padding(0, 0, 1, 2),
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            header: Style::new().bold(true).padding(0, 1, 0, 1),
            header_active: Style::new()
                .bold(true)
                .underline(true)
                .padding(0, 1, 0, 1),
            cell: Style::new().padding(0, 1, 0, 1),
            selected_row: Style::new()
                .bold(true)
                .foreground(Color::from("212")),
            row_index: Style::new().foreground(subdued.clone()),
            search_prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            status_bar: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#A49FA5",
                    Dark: "#777777",
                })
                .padding(0, 0, 1, 2),
            no_records: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            loading: Style::new().foreground(subdued.clone()),
            spinner: Style::new().foreground(AdaptiveColor {
                Light: "#8E8E8E",
                Dark: "#747373",
            }),
            pagination: Style::new().foreground(subdued).padding_left(2),
            help: Style::new().padding(1, 0, 0, 2),
        }
    }
}
