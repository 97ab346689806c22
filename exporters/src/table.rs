use serde_json::Value;
use shared_types::ActivityRecord;
use std::collections::HashSet;

/// Activity records laid out as rows under a shared column list.
///
/// Columns are the union of record fields in order of first appearance.
/// Rows keep the order of the input records; nothing is dropped, merged or
/// sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ActivityTable {
    pub fn from_records(records: &[ActivityRecord]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for record in records {
            for name in record.field_names() {
                if seen.insert(name) {
                    columns.push(name.to_string());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).map(render_cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Flatten one JSON value into a cell.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ActivityRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_columns_follow_source_order() {
        let records = vec![record(json!({
            "molecule_chembl_id": "CHEMBL113081",
            "standard_value": "6.0",
            "activity_id": 31863
        }))];

        let table = ActivityTable::from_records(&records);
        assert_eq!(
            table.columns(),
            &["molecule_chembl_id", "standard_value", "activity_id"]
        );
        assert_eq!(table.rows()[0], vec!["CHEMBL113081", "6.0", "31863"]);
    }

    #[test]
    fn test_union_of_fields_and_missing_cells() {
        let records = vec![
            record(json!({"a": 1, "b": 2})),
            record(json!({"b": 3, "c": "x"})),
        ];

        let table = ActivityTable::from_records(&records);
        assert_eq!(table.columns(), &["a", "b", "c"]);
        assert_eq!(table.rows()[0], vec!["1", "2", ""]);
        assert_eq!(table.rows()[1], vec!["", "3", "x"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let row = json!({"activity_id": 1, "standard_type": "Ki"});
        let records = vec![record(row.clone()), record(row.clone()), record(row)];

        let table = ActivityTable::from_records(&records);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_render_cell() {
        assert_eq!(render_cell(&Value::Null), "");
        assert_eq!(render_cell(&json!("nM")), "nM");
        assert_eq!(render_cell(&json!(false)), "false");
        assert_eq!(render_cell(&json!(2.5)), "2.5");
        assert_eq!(
            render_cell(&json!({"units": "nM", "value": 1})),
            r#"{"units":"nM","value":1}"#
        );
        assert_eq!(render_cell(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_empty_input() {
        let table = ActivityTable::from_records(&[]);
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }
}
