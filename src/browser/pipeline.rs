//! The browser's derived pipeline: filter, then sort.
//!
//! These functions are pure over their inputs — same records, columns,
//! query, and sort state always produce the same index sequence — and never
//! fail: unmatchable queries yield an empty sequence and incomparable sort
//! values degrade to "equal" so a stable sort leaves them in input order.
//! Pagination is plain slicing and stays with the paginator.

use super::types::{Column, FilterMode, Record, SortDirection, Value};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;

/// Computes the visible sequence: indices into `records` that survive the
/// query, ordered by the sort state.
pub fn visible_indices<R: Record>(
    records: &[R],
    columns: &[Column<R>],
    query: &str,
    mode: FilterMode,
    sort_key: Option<&str>,
    direction: SortDirection,
) -> Vec<usize> {
    let mut indices = filter_indices(records, columns, query, mode);
    if let Some(key) = sort_key {
        sort_indices(records, &mut indices, key, direction);
    }
    indices
}

/// Applies the search query, returning surviving indices in input order.
///
/// A record passes when any column's value, coerced to text, matches the
/// query case-insensitively. A blank query passes everything; null values
/// never match a non-blank query.
pub fn filter_indices<R: Record>(
    records: &[R],
    columns: &[Column<R>],
    query: &str,
    mode: FilterMode,
) -> Vec<usize> {
    let needle = query.trim();
    if needle.is_empty() {
        return (0..records.len()).collect();
    }

    match mode {
        FilterMode::Substring => {
            let needle = needle.to_lowercase();
            records
                .iter()
                .enumerate()
                .filter(|(_, record)| {
                    columns.iter().any(|col| {
                        record
                            .field(col.key())
                            .display_text()
                            .map(|text| text.to_lowercase().contains(&needle))
                            .unwrap_or(false)
                    })
                })
                .map(|(index, _)| index)
                .collect()
        }
        FilterMode::Fuzzy => {
            let matcher = SkimMatcherV2::default();
            records
                .iter()
                .enumerate()
                .filter(|(_, record)| {
                    columns.iter().any(|col| {
                        record
                            .field(col.key())
                            .display_text()
                            .and_then(|text| matcher.fuzzy_match(&text, needle))
                            .is_some()
                    })
                })
                .map(|(index, _)| index)
                .collect()
        }
    }
}

/// Stable-sorts `indices` by the records' values at `key`.
///
/// Null values order after all defined values regardless of direction.
pub fn sort_indices<R: Record>(
    records: &[R],
    indices: &mut [usize],
    key: &str,
    direction: SortDirection,
) {
    indices.sort_by(|&a, &b| {
        let va = records[a].field(key);
        let vb = records[b].field(key);
        match (va.is_null(), vb.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = compare_values(&va, &vb);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
        }
    });
}

/// Compares two defined values.
///
/// Text compares case-insensitively; Int/Float pairs compare numerically
/// (cross-type through f64). Every other pairing — booleans, dates, and
/// type mismatches — is treated as equal so the stable sort keeps input
/// order.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => folded_cmp(x, y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Value::Int(x), Value::Float(y)) => {
            (*x as f64).partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Value::Float(x), Value::Int(y)) => {
            x.partial_cmp(&(*y as f64)).unwrap_or(Ordering::Equal)
        }
        _ => Ordering::Equal,
    }
}

fn folded_cmp(x: &str, y: &str) -> Ordering {
    x.chars()
        .flat_map(char::to_lowercase)
        .cmp(y.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::types::RecordId;
    use chrono::NaiveDate;

    #[derive(Debug, Clone)]
    struct Article {
        id: i64,
        name: &'static str,
        views: Option<i64>,
        published: Option<NaiveDate>,
    }

    impl Record for Article {
        fn id(&self) -> RecordId {
            RecordId::Int(self.id)
        }

        fn field(&self, key: &str) -> Value {
            match key {
                "name" => Value::from(self.name),
                "views" => self.views.into(),
                "published" => self.published.into(),
                _ => Value::Null,
            }
        }
    }

    fn columns() -> Vec<Column<Article>> {
        vec![Column::new("name", "Name"), Column::new("views", "Views")]
    }

    fn article(id: i64, name: &'static str, views: Option<i64>) -> Article {
        Article {
            id,
            name,
            views,
            published: None,
        }
    }

    #[test]
    fn test_blank_query_passes_everything() {
        let records = vec![article(1, "Beta", None), article(2, "alpha", Some(3))];
        assert_eq!(
            filter_indices(&records, &columns(), "", FilterMode::Substring),
            vec![0, 1]
        );
        assert_eq!(
            filter_indices(&records, &columns(), "   ", FilterMode::Substring),
            vec![0, 1]
        );
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let records = vec![
            article(1, "Summer banner", None),
            article(2, "Winter news", None),
            article(3, "SUMMER gala", None),
        ];
        assert_eq!(
            filter_indices(&records, &columns(), "summer", FilterMode::Substring),
            vec![0, 2]
        );
    }

    #[test]
    fn test_filter_sound_and_complete() {
        let records = vec![
            article(1, "gallery", Some(10)),
            article(2, "news", Some(210)),
            article(3, "video", None),
        ];
        let cols = columns();
        let matched = filter_indices(&records, &cols, "21", FilterMode::Substring);
        // Every match really contains the query in some column...
        for &i in &matched {
            assert!(cols.iter().any(|c| {
                records[i]
                    .field(c.key())
                    .display_text()
                    .map(|t| t.to_lowercase().contains("21"))
                    .unwrap_or(false)
            }));
        }
        // ...and nothing outside the match set does.
        for i in 0..records.len() {
            if !matched.contains(&i) {
                assert!(!cols.iter().any(|c| {
                    records[i]
                        .field(c.key())
                        .display_text()
                        .map(|t| t.to_lowercase().contains("21"))
                        .unwrap_or(false)
                }));
            }
        }
        assert_eq!(matched, vec![1]);
    }

    #[test]
    fn test_null_never_matches_a_query() {
        let records = vec![article(1, "news", None)];
        let cols = vec![
            Column::<Article>::new("views", "Views"),
            Column::new("missing", "Missing"),
        ];
        assert!(filter_indices(&records, &cols, "0", FilterMode::Substring).is_empty());
    }

    #[test]
    fn test_fuzzy_mode_matches_subsequences() {
        let records = vec![
            article(1, "certificates", None),
            article(2, "site settings", None),
        ];
        let matched = filter_indices(&records, &columns(), "crt", FilterMode::Fuzzy);
        assert_eq!(matched, vec![0]);
    }

    #[test]
    fn test_sort_is_locale_insensitive_over_case() {
        // Beta, alpha, Gamma sorts as alpha, Beta, Gamma.
        let records = vec![
            article(1, "Beta", None),
            article(2, "alpha", None),
            article(3, "Gamma", None),
        ];
        let mut indices = vec![0, 1, 2];
        sort_indices(&records, &mut indices, "name", SortDirection::Ascending);
        assert_eq!(indices, vec![1, 0, 2]);
    }

    #[test]
    fn test_sort_descending_reverses_defined_values() {
        let records = vec![
            article(1, "a", Some(5)),
            article(2, "b", Some(50)),
            article(3, "c", Some(20)),
        ];
        let mut indices = vec![0, 1, 2];
        sort_indices(&records, &mut indices, "views", SortDirection::Descending);
        assert_eq!(indices, vec![1, 2, 0]);
    }

    #[test]
    fn test_nulls_trail_in_both_directions() {
        let records = vec![
            article(1, "a", None),
            article(2, "b", Some(2)),
            article(3, "c", None),
            article(4, "d", Some(1)),
        ];
        let mut asc = vec![0, 1, 2, 3];
        sort_indices(&records, &mut asc, "views", SortDirection::Ascending);
        assert_eq!(asc, vec![3, 1, 0, 2]);

        let mut desc = vec![0, 1, 2, 3];
        sort_indices(&records, &mut desc, "views", SortDirection::Descending);
        assert_eq!(desc, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let records = vec![
            article(1, "dup", Some(1)),
            article(2, "dup", Some(2)),
            article(3, "dup", Some(3)),
        ];
        let mut indices = vec![0, 1, 2];
        sort_indices(&records, &mut indices, "name", SortDirection::Ascending);
        assert_eq!(indices, vec![0, 1, 2]);
        // Repeated application does not shuffle anything.
        sort_indices(&records, &mut indices, "name", SortDirection::Ascending);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_mixed_and_unsupported_types_compare_equal() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(
            compare_values(&Value::Bool(false), &Value::Bool(true)),
            Ordering::Equal
        );
        assert_eq!(
            compare_values(&Value::Date(date), &Value::Date(later)),
            Ordering::Equal
        );
        assert_eq!(
            compare_values(&Value::Text("9".into()), &Value::Int(10)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_numeric_cross_type_comparison() {
        assert_eq!(
            compare_values(&Value::Int(2), &Value::Float(2.5)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::Float(3.5), &Value::Int(3)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_sorting_dates_preserves_input_order() {
        // The permissive fallback: date columns do not reorder.
        let d1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let records = vec![
            Article {
                id: 1,
                name: "late",
                views: None,
                published: Some(d1),
            },
            Article {
                id: 2,
                name: "early",
                views: None,
                published: Some(d2),
            },
        ];
        let mut indices = vec![0, 1];
        sort_indices(
            &records,
            &mut indices,
            "published",
            SortDirection::Ascending,
        );
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_visible_indices_filters_then_sorts() {
        let records = vec![
            article(1, "Beta banner", Some(3)),
            article(2, "alpha banner", Some(1)),
            article(3, "unrelated", Some(2)),
            article(4, "Gamma banner", None),
        ];
        let visible = visible_indices(
            &records,
            &columns(),
            "banner",
            FilterMode::Substring,
            Some("name"),
            SortDirection::Ascending,
        );
        assert_eq!(visible, vec![1, 0, 3]);
    }
}
