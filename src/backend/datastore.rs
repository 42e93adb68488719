//! Data store contract: per-content-type CRUD against the hosted database.

use super::error::DatastoreError;
use crate::browser::pipeline;
use crate::browser::{Record, RecordId, SortDirection, Value};
use std::sync::Mutex;
use tracing::debug;

/// Server-side ordering request for [`Datastore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    /// Field to order by.
    pub field: String,
    /// Direction to order in.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Ascending order on the given field.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending order on the given field.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// CRUD access to one content type.
///
/// Implementations adapt a hosted database table (news, banners,
/// certificates, gallery entries, …). Every failure is a structured
/// [`DatastoreError`]; callers surface its message to the operator and
/// never retry automatically.
pub trait Datastore<R: Record> {
    /// Returns all records, optionally ordered by the store.
    fn list(&self, order: Option<&SortOrder>) -> Result<Vec<R>, DatastoreError>;

    /// Returns the records whose `field` equals `value`.
    fn find_eq(&self, field: &str, value: &Value) -> Result<Vec<R>, DatastoreError>;

    /// Inserts one record and returns it as stored.
    fn insert(&self, record: R) -> Result<R, DatastoreError>;

    /// Replaces the record with the given id and returns it as stored.
    fn update(&self, id: &RecordId, record: R) -> Result<R, DatastoreError>;

    /// Deletes the record with the given id.
    fn delete(&self, id: &RecordId) -> Result<(), DatastoreError>;
}

/// In-memory [`Datastore`] used by tests and demos.
pub struct MemoryDatastore<R> {
    rows: Mutex<Vec<R>>,
}

impl<R: Record> MemoryDatastore<R> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    /// Creates a store seeded with rows.
    pub fn with_rows(rows: Vec<R>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Returns true when no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: Record> Default for MemoryDatastore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Datastore<R> for MemoryDatastore<R> {
    fn list(&self, order: Option<&SortOrder>) -> Result<Vec<R>, DatastoreError> {
        let rows = self.rows.lock().unwrap();
        let mut indices: Vec<usize> = (0..rows.len()).collect();
        if let Some(order) = order {
            pipeline::sort_indices(&rows, &mut indices, &order.field, order.direction);
        }
        let result: Vec<R> = indices.into_iter().map(|i| rows[i].clone()).collect();
        debug!(count = result.len(), ordered = order.is_some(), "listed records");
        Ok(result)
    }

    fn find_eq(&self, field: &str, value: &Value) -> Result<Vec<R>, DatastoreError> {
        let rows = self.rows.lock().unwrap();
        let result: Vec<R> = rows
            .iter()
            .filter(|r| r.field(field) == *value)
            .cloned()
            .collect();
        debug!(field, count = result.len(), "equality lookup");
        Ok(result)
    }

    fn insert(&self, record: R) -> Result<R, DatastoreError> {
        let mut rows = self.rows.lock().unwrap();
        let id = record.id();
        if rows.iter().any(|r| r.id() == id) {
            return Err(DatastoreError::Conflict { id: id.to_string() });
        }
        rows.push(record.clone());
        debug!(id = %id, "inserted record");
        Ok(record)
    }

    fn update(&self, id: &RecordId, record: R) -> Result<R, DatastoreError> {
        let mut rows = self.rows.lock().unwrap();
        let at = rows
            .iter()
            .position(|r| r.id() == *id)
            .ok_or_else(|| DatastoreError::NotFound { id: id.to_string() })?;
        rows[at] = record.clone();
        debug!(id = %id, "updated record");
        Ok(record)
    }

    fn delete(&self, id: &RecordId) -> Result<(), DatastoreError> {
        let mut rows = self.rows.lock().unwrap();
        let at = rows
            .iter()
            .position(|r| r.id() == *id)
            .ok_or_else(|| DatastoreError::NotFound { id: id.to_string() })?;
        rows.remove(at);
        debug!(id = %id, "deleted record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct News {
        id: i64,
        title: String,
    }

    impl Record for News {
        fn id(&self) -> RecordId {
            RecordId::Int(self.id)
        }

        fn field(&self, key: &str) -> Value {
            match key {
                "title" => Value::Text(self.title.clone()),
                _ => Value::Null,
            }
        }
    }

    fn news(id: i64, title: &str) -> News {
        News {
            id,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_insert_then_list() {
        let store = MemoryDatastore::new();
        store.insert(news(1, "Beta")).unwrap();
        store.insert(news(2, "alpha")).unwrap();
        assert_eq!(store.len(), 2);

        let unordered = store.list(None).unwrap();
        assert_eq!(unordered[0].title, "Beta");

        let ordered = store.list(Some(&SortOrder::ascending("title"))).unwrap();
        assert_eq!(ordered[0].title, "alpha");
    }

    #[test]
    fn test_insert_duplicate_id_conflicts() {
        let store = MemoryDatastore::with_rows(vec![news(1, "a")]);
        let err = store.insert(news(1, "b")).unwrap_err();
        assert_eq!(err, DatastoreError::Conflict { id: "1".to_string() });
    }

    #[test]
    fn test_find_eq_matches_exact_values() {
        let store = MemoryDatastore::with_rows(vec![news(1, "hero"), news(2, "footer")]);
        let found = store
            .find_eq("title", &Value::Text("hero".to_string()))
            .unwrap();
        assert_eq!(found, vec![news(1, "hero")]);
        assert!(store
            .find_eq("title", &Value::Text("HERO".to_string()))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_update_replaces_by_id() {
        let store = MemoryDatastore::with_rows(vec![news(1, "old")]);
        let updated = store.update(&RecordId::Int(1), news(1, "new")).unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(store.list(None).unwrap()[0].title, "new");
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let store = MemoryDatastore::<News>::new();
        let err = store.update(&RecordId::Int(9), news(9, "x")).unwrap_err();
        assert_eq!(err, DatastoreError::NotFound { id: "9".to_string() });
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let store = MemoryDatastore::with_rows(vec![news(1, "a"), news(2, "b")]);
        store.delete(&RecordId::Int(1)).unwrap();
        assert_eq!(store.len(), 1);
        let err = store.delete(&RecordId::Int(1)).unwrap_err();
        assert_eq!(err, DatastoreError::NotFound { id: "1".to_string() });
    }
}
