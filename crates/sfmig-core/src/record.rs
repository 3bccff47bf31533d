use crate::error::{CoreError, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Field carrying a record's identity inside one sandbox.
pub const ID_FIELD: &str = "Id";

/// Insertion-ordered set of record Ids, as handed to bulk deletes.
pub type IdSet = IndexSet<String>;

/// Records created by one test or migration run, in creation order.
pub type RecordBatch = Vec<Record>;

/// The sObject types the contact-migration template moves between sandboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SObjectType {
    Contact,
    Account,
}

impl SObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::Account => "Account",
        }
    }

    /// Three-character key prefix Salesforce puts on Ids of this type.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Contact => "003",
            Self::Account => "001",
        }
    }

    /// Business-key fields used to find a record's counterpart in another sandbox.
    pub fn correlation_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Contact => &["Email"],
            Self::Account => &["Name"],
        }
    }
}

impl fmt::Display for SObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SObjectType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Contact" => Ok(Self::Contact),
            "Account" => Ok(Self::Account),
            other => Err(CoreError::invalid_object_type(other)),
        }
    }
}

/// A CRM record: an ordered map from field name to JSON value.
///
/// Dates are carried as RFC 3339 strings. A record that has been written to a
/// sandbox always has an [`ID_FIELD`]; the Id is only meaningful inside that
/// sandbox.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map.into_iter().collect())),
            other => Err(CoreError::invalid_record(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.shift_remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the record's Id, or `None` when it is absent, empty or not a string.
    pub fn id(&self) -> Option<&str> {
        self.get_str(ID_FIELD).filter(|id| !id.trim().is_empty())
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.0.insert(ID_FIELD.to_string(), Value::String(id.into()));
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id);
        self
    }

    /// Copy of this record without its Id, as sent to a create call.
    #[must_use]
    pub fn without_id(&self) -> Self {
        let mut copy = self.clone();
        copy.remove(ID_FIELD);
        copy
    }

    /// True when every correlation field of `object` is present here and equal in `other`.
    pub fn correlates_with(&self, other: &Record, object: SObjectType) -> bool {
        object.correlation_fields().iter().all(|field| {
            match (self.get(field), other.get(field)) {
                (Some(ours), Some(theirs)) => !ours.is_null() && ours == theirs,
                _ => false,
            }
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Collects the Ids of `records` in order.
///
/// Fails on the first record without a usable Id, reporting its position.
pub fn ids_of(records: &[Record]) -> Result<IdSet> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .id()
                .map(str::to_string)
                .ok_or_else(|| CoreError::missing_id(index))
        })
        .collect()
}
