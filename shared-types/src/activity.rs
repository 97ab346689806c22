use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::ExportError;

pub const DEFAULT_STANDARD_TYPE: &str = "Ki";

/// One bioactivity measurement as returned by the data source.
///
/// The schema belongs to the source, so the record is kept as an ordered
/// field map. Field order is the order the source serialized them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityRecord(Map<String, Value>);

impl ActivityRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ActivityRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Measurement-type label used to filter activities (e.g. `Ki`, `IC50`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StandardType(String);

impl StandardType {
    pub fn new(value: impl Into<String>) -> Result<Self, ExportError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ExportError::InvalidStandardType(
                "standard type must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StandardType {
    fn default() -> Self {
        Self(DEFAULT_STANDARD_TYPE.to_string())
    }
}

impl fmt::Display for StandardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StandardType {
    type Error = ExportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StandardType> for String {
    fn from(standard_type: StandardType) -> Self {
        standard_type.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_field_order() {
        let record: ActivityRecord = serde_json::from_str(
            r#"{"molecule_chembl_id": "CHEMBL1", "standard_value": "12.5", "activity_id": 31863}"#,
        )
        .unwrap();

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["molecule_chembl_id", "standard_value", "activity_id"]);
        assert_eq!(record.get("activity_id"), Some(&Value::from(31863)));
    }

    #[test]
    fn test_default_standard_type_is_ki() {
        assert_eq!(StandardType::default().as_str(), "Ki");
    }

    #[test]
    fn test_empty_standard_type_rejected() {
        assert!(matches!(
            StandardType::new(" "),
            Err(ExportError::InvalidStandardType(_))
        ));
    }
}
