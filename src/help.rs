//! Contextual help bar rendered from key bindings.
//!
//! Renders the bindings exposed through [`crate::key::KeyMap`] as either a
//! compact one-line view or a multi-column full view. Disabled bindings are
//! skipped, which is how components hide affordances that have no handler.

use crate::key::{Binding, KeyMap};
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

/// Styles for help bar elements.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for key labels in the short view.
    pub short_key: Style,
    /// Style for descriptions in the short view.
    pub short_desc: Style,
    /// Style for the separator between short view entries.
    pub short_separator: Style,
    /// Style for key labels in the full view.
    pub full_key: Style,
    /// Style for descriptions in the full view.
    pub full_desc: Style,
    /// Style for the truncation ellipsis.
    pub ellipsis: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key_color = AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        };
        let desc_color = AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        };
        let sep_color = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };
        Self {
            short_key: Style::new().foreground(key_color.clone()),
            short_desc: Style::new().foreground(desc_color.clone()),
            short_separator: Style::new().foreground(sep_color.clone()),
            full_key: Style::new().foreground(key_color),
            full_desc: Style::new().foreground(desc_color),
            ellipsis: Style::new().foreground(sep_color),
        }
    }
}

/// Help bar model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Maximum rendered width in cells; 0 disables truncation.
    pub width: usize,
    /// When true, [`view`](Model::view) renders the full multi-column help.
    pub show_all: bool,
    /// Separator between entries in the short view.
    pub separator: String,
    /// Styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            width: 0,
            show_all: false,
            separator: " • ".to_string(),
            styles: Styles::default(),
        }
    }
}

/// Creates a help bar with default settings.
pub fn new() -> Model {
    Model::default()
}

fn visible_width(s: &str) -> usize {
    strip_ansi_escapes::strip_str(s).width()
}

impl Model {
    /// Renders the keymap's help in the configured mode.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(&keymap.full_help())
        } else {
            self.short_help_view(&keymap.short_help())
        }
    }

    /// Renders a one-line help view, truncating with an ellipsis when the
    /// configured width would be exceeded.
    pub fn short_help_view(&self, bindings: &[&Binding]) -> String {
        let mut out = String::new();
        let ellipsis = self.styles.ellipsis.render("…");

        for binding in bindings.iter().filter(|b| b.enabled()) {
            let sep = if out.is_empty() {
                String::new()
            } else {
                self.styles.short_separator.render(&self.separator)
            };
            let entry = format!(
                "{}{} {}",
                sep,
                self.styles.short_key.render(&binding.help().key),
                self.styles.short_desc.render(&binding.help().desc),
            );

            if self.width > 0
                && visible_width(&out) + visible_width(&entry) + visible_width(&ellipsis)
                    > self.width
            {
                out.push_str(&ellipsis);
                break;
            }
            out.push_str(&entry);
        }
        out
    }

    /// Renders the full help view: one column per binding group.
    pub fn full_help_view(&self, groups: &[Vec<&Binding>]) -> String {
        let mut columns: Vec<Vec<String>> = Vec::new();
        let mut heights = 0usize;

        for group in groups {
            let enabled: Vec<&&Binding> = group.iter().filter(|b| b.enabled()).collect();
            if enabled.is_empty() {
                continue;
            }
            let key_width = enabled
                .iter()
                .map(|b| b.help().key.width())
                .max()
                .unwrap_or(0);
            let lines: Vec<String> = enabled
                .iter()
                .map(|b| {
                    format!(
                        "{} {}",
                        self.styles
                            .full_key
                            .render(&format!("{:key_width$}", b.help().key)),
                        self.styles.full_desc.render(&b.help().desc),
                    )
                })
                .collect();
            heights = heights.max(lines.len());
            columns.push(lines);
        }

        let mut rows = Vec::with_capacity(heights);
        for row in 0..heights {
            let mut line = String::new();
            for (ci, col) in columns.iter().enumerate() {
                if ci > 0 {
                    line.push_str("    ");
                }
                line.push_str(col.get(row).map(String::as_str).unwrap_or(""));
            }
            rows.push(line.trim_end().to_string());
        }
        rows.join("\n")
    }
}
