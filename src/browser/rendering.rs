//! View rendering for the data browser.
//!
//! Layout, top to bottom: header line (title or search input), the table
//! (header row plus the current page of records, or the loading/empty
//! states), and a footer (status line, pagination control, help — or the
//! delete confirmation prompt while one is open).

use super::model::Model;
use super::style::{ELLIPSIS, PLACEHOLDER, SORT_ASC, SORT_DESC};
use super::types::{Record, SearchState, SortDirection};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pads `content` to `width` cells, truncating unstyled overflow with an
/// ellipsis. Content carrying ANSI styling is never cut mid-sequence.
fn fit(content: &str, width: usize) -> String {
    let plain = strip_ansi_escapes::strip_str(content);
    let visible = plain.width();

    if visible <= width {
        return format!("{}{}", content, " ".repeat(width - visible));
    }
    if plain != content {
        // Styled renderer output: shown verbatim rather than risking a cut
        // inside an escape sequence.
        return content.to_string();
    }

    let max_text = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in content.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_text {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(ELLIPSIS);
    format!("{}{}", out, " ".repeat(width - used - 1))
}

impl<R: Record> Model<R> {
    /// Renders the browser.
    pub fn view(&self) -> String {
        let mut out = self.view_header();
        out.push('\n');
        out.push_str(&self.view_table());
        let footer = self.view_footer();
        if !footer.is_empty() {
            out.push('\n');
            out.push_str(&footer);
        }
        out
    }

    fn view_header(&self) -> String {
        if self.search_state == SearchState::Editing {
            return format!(
                "{}{}",
                self.styles.search_prompt.render("Search: "),
                self.search_input.view()
            );
        }
        let mut header = self.title.clone();
        if self.search_state == SearchState::Applied {
            header.push_str(&format!(" (filtered: {})", self.visible.len()));
        }
        self.styles.title.render(&header)
    }

    /// Cell text for one column of one record: the custom renderer's output
    /// verbatim when present, otherwise the coerced value with null/empty
    /// shown as the placeholder dash.
    fn cell_text(&self, col_index: usize, record: &R) -> String {
        let col = &self.columns[col_index];
        let value = record.field(col.key());
        if let Some(rendered) = col.render_cell(&value, record) {
            return rendered;
        }
        match value.display_text() {
            Some(text) if !text.is_empty() => text,
            _ => PLACEHOLDER.to_string(),
        }
    }

    fn header_label(&self, col_index: usize) -> String {
        let col = &self.columns[col_index];
        let mut label = col.label().to_string();
        if self.sort_key.as_deref() == Some(col.key()) {
            label.push(' ');
            label.push_str(match self.sort_direction {
                SortDirection::Ascending => SORT_ASC,
                SortDirection::Descending => SORT_DESC,
            });
        }
        label
    }

    /// Column widths for the current page: a fixed width when the column
    /// declares one, otherwise sized to the widest of the header label and
    /// the page's cell contents.
    fn column_widths(&self, page: &[&R]) -> Vec<usize> {
        (0..self.columns.len())
            .map(|ci| {
                if let Some(fixed) = self.columns[ci].width() {
                    return fixed;
                }
                let mut w = self.header_label(ci).width();
                for record in page {
                    let text = strip_ansi_escapes::strip_str(&self.cell_text(ci, record));
                    w = w.max(text.width());
                }
                w
            })
            .collect()
    }

    fn view_table(&self) -> String {
        if self.loading {
            return format!(
                "{} {}",
                self.spinner.view(),
                self.styles.loading.render("Loading records…")
            );
        }

        let page = self.page_records();
        let (start, _) = self.paginator.slice_bounds(self.visible.len());
        let widths = self.column_widths(&page);
        // Room for the 1-based running index, sized by the last index shown.
        let index_width = (start + page.len().max(1)).to_string().len().max(1);

        let mut lines = Vec::with_capacity(page.len() + 1);

        let mut header = format!("  {:>index_width$} ", "#");
        for (ci, width) in widths.iter().enumerate() {
            let style = if ci == self.active_column {
                &self.styles.header_active
            } else {
                &self.styles.header
            };
            header.push_str(&style.render(&fit(&self.header_label(ci), *width)));
        }
        lines.push(header);

        if page.is_empty() {
            lines.push(self.styles.no_records.render(&self.empty_message));
            return lines.join("\n");
        }

        for (row, record) in page.iter().enumerate() {
            let selected = row == self.cursor;
            let marker = if selected { "> " } else { "  " };
            let index = self
                .styles
                .row_index
                .render(&format!("{:>index_width$}", start + row + 1));

            let mut line = format!("{}{} ", marker, index);
            for (ci, width) in widths.iter().enumerate() {
                line.push_str(&self.styles.cell.render(&fit(&self.cell_text(ci, record), *width)));
            }
            if selected {
                line = self.styles.selected_row.render(&line);
            }
            lines.push(line);
        }

        lines.join("\n")
    }

    fn view_footer(&self) -> String {
        if let Some(pending) = &self.pending_delete {
            return pending.prompt.view();
        }

        let total = self.visible.len();
        let (start, end) = self.paginator.slice_bounds(total);
        let status = if total == 0 {
            "0 records".to_string()
        } else {
            format!("{}–{} of {} records", start + 1, end, total)
        };

        let mut footer = self.styles.status_bar.render(&status);
        if self.paginator.total_pages > 1 {
            footer.push('\n');
            footer.push_str(&self.styles.pagination.render(&self.paginator.view()));
        }
        let help_line = self.help.view(&self.keymap);
        if !help_line.is_empty() {
            footer.push('\n');
            footer.push_str(&self.styles.help.render(&help_line));
        }
        footer
    }
}
