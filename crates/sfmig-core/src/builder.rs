//! Fluent construction of test records.

use crate::error::Result;
use crate::record::Record;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Builds a [`Record`] field by field, in the order the fields are given.
///
/// ```
/// use sfmig_core::RecordBuilder;
///
/// let contact = RecordBuilder::new()
///     .with("FirstName", "FirstName_1")
///     .with("MailingCity", "Denver")
///     .build();
/// assert_eq!(contact.get_str("MailingCity"), Some("Denver"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing record, e.g. to derive a counterpart.
    pub fn from_record(record: Record) -> Self {
        Self { record }
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.insert(field, value);
        self
    }

    /// Sets `field` only when `value` is present.
    #[must_use]
    pub fn with_opt(self, field: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.with(field, value),
            None => self,
        }
    }

    /// Sets a date-time field, rendered as RFC 3339.
    pub fn with_date(self, field: impl Into<String>, at: OffsetDateTime) -> Result<Self> {
        let formatted = at.format(&Rfc3339)?;
        Ok(self.with(field, formatted))
    }

    pub fn build(self) -> Record {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn test_builder_keeps_insertion_order() {
        let record = RecordBuilder::new()
            .with("LastName", "Smith")
            .with("FirstName", "John")
            .with("NumberOfEmployees", 42)
            .build();

        let fields: Vec<_> = record.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(fields, vec!["LastName", "FirstName", "NumberOfEmployees"]);
        assert_eq!(record.get("NumberOfEmployees"), Some(&json!(42)));
    }

    #[test]
    fn test_with_opt_skips_missing_values() {
        let record = RecordBuilder::new()
            .with_opt("Title", Some("Dr"))
            .with_opt("Phone", None::<&str>)
            .build();
        assert_eq!(record.get_str("Title"), Some("Dr"));
        assert!(!record.contains("Phone"));
    }

    #[test]
    fn test_with_date_uses_rfc3339() {
        let record = RecordBuilder::new()
            .with_date("Birthdate", datetime!(2014-03-05 10:30:00 UTC))
            .unwrap()
            .build();
        assert_eq!(record.get_str("Birthdate"), Some("2014-03-05T10:30:00Z"));
    }

    #[test]
    fn test_from_record_overrides_fields() {
        let base = RecordBuilder::new().with("Name", "Acme").build();
        let copy = RecordBuilder::from_record(base).with("Name", "Acme 2").build();
        assert_eq!(copy.get_str("Name"), Some("Acme 2"));
        assert_eq!(copy.len(), 1);
    }
}
