use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::attribute::AttributeId;
use crate::entity::EntityId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown entity type: {0} (use 0 for state, 1 for county, 2 for city)")]
    UnknownEntityType(i64),

    #[error("Invalid request: {0}")]
    Validation(FieldErrors),

    #[error("No candidate entities have data for this query")]
    NoCandidates,

    #[error("Reference entity {entity} has no data for attribute {attribute}")]
    ReferenceUnavailable {
        entity: EntityId,
        attribute: AttributeId,
    },

    #[error("Year {0} is outside the supported range")]
    YearOutOfRange(i64),

    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidRange { start: i64, end: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: u64,
        message: String,
    },
}

/// Field-level validation failures, keyed by request field name.
///
/// Serializes as `{"field": ["reason", ...]}` so the HTTP layer can
/// return it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reason against a field. Multiple reasons per field are kept
    /// in insertion order.
    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn reasons(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, otherwise the accumulated errors.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reasons) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, reasons.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_accumulate() {
        let mut errors = FieldErrors::new();
        errors.add("year", "too early");
        errors.add("place_type", "unknown");
        errors.add("year", "too late");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.reasons("year"), &["too early".to_string(), "too late".to_string()]);
        assert!(errors.reasons("id").is_empty());
        assert_eq!(errors.to_string(), "place_type: unknown; year: too early, too late");
    }

    #[test]
    fn test_field_errors_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add("id", "Invalid place id");
        assert!(matches!(errors.into_result(), Err(Error::Validation(e)) if e.contains("id")));
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldErrors::new();
        errors.add("count", "must be at least 1");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"count": ["must be at least 1"]}));
    }
}
