//! Core types for the data browser: record identity, typed field values,
//! and column descriptors.
//!
//! Field access goes through [`Record::field`], which returns a typed
//! [`Value`] instead of the stringly-typed map access an admin UI usually
//! starts with. The comparison and coercion rules the browser applies to
//! these values live in [`super::pipeline`].

use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

/// Stable unique identity of a record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// Integer identity, e.g. a serial primary key.
    Int(i64),
    /// String identity, e.g. a UUID.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// A typed field value.
///
/// `Null` models an absent value: it never matches a search query and
/// always sorts after defined values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value.
    Null,
    /// Text.
    Text(String),
    /// Integer number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Calendar date.
    Date(NaiveDate),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerces the value to display text; `None` for null.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.clone()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(x) => Some(x.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text().unwrap_or_default())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// A browsable record: stable identity plus typed field access by key.
///
/// Keys the record does not carry should yield [`Value::Null`]. Duplicate
/// ids across one record set are a caller bug; the browser will still
/// render, but row identity is undefined.
pub trait Record: Clone {
    /// The record's unique identity.
    fn id(&self) -> RecordId;

    /// The value of the named field, or [`Value::Null`] when absent.
    fn field(&self, key: &str) -> Value;
}

/// Sort direction for the browser's sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// How the search query is matched against record text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Case-insensitive substring containment over every column.
    #[default]
    Substring,
    /// Fuzzy matching (SkimMatcherV2) over the same per-column text.
    Fuzzy,
}

/// State of the browser's search interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search active; all records are visible.
    #[default]
    Idle,
    /// The operator is typing a query; results filter live.
    Editing,
    /// A query has been accepted; only matches are visible.
    Applied,
}

/// Renderer for a cell: receives the field value and the whole record,
/// returns display content that is shown verbatim.
pub type CellRenderer<R> = Arc<dyn Fn(&Value, &R) -> String + Send + Sync>;

/// Column descriptor: how one record field is labeled, sorted, and
/// rendered. Columns are supplied at construction time and are immutable
/// for the lifetime of one browser.
pub struct Column<R> {
    key: String,
    label: String,
    sortable: bool,
    width: Option<usize>,
    renderer: Option<CellRenderer<R>>,
}

impl<R> Column<R> {
    /// Creates a sortable column for the given field key.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            width: None,
            renderer: None,
        }
    }

    /// Sets whether the column participates in sorting (builder pattern).
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets a fixed display width in cells (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets a custom cell renderer whose output is shown verbatim (builder
    /// pattern).
    pub fn with_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&Value, &R) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// The field key this column reads.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the column participates in sorting.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// The fixed display width, when one was set.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Runs the custom renderer, when one was set.
    pub fn render_cell(&self, value: &Value, record: &R) -> Option<String> {
        self.renderer.as_ref().map(|r| r(value, record))
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            width: self.width,
            renderer: self.renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Page sizes the browser accepts; anything else is rejected at the
/// setter boundary.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// Default page size.
pub const DEFAULT_PAGE_SIZE: usize = 10;
