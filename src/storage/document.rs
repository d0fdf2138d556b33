//! Firestore document wire model.
//!
//! Every scalar field travels wrapped in a typed envelope:
//!
//! ```json
//! { "fields": { "title": { "stringValue": "Oval Halo" },
//!               "is_the_one": { "booleanValue": false },
//!               "created_at": { "timestampValue": "2024-05-01T10:00:00Z" } } }
//! ```
//!
//! [`Value`] models the envelope as a struct of optional members rather than an
//! enum, so value kinds this crate does not use (`integerValue`, `mapValue`,
//! ...) are ignored instead of failing the whole document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to typed value.
pub type Fields = BTreeMap<String, Value>;

/// A typed field value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    /// Present for string fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    /// Present for boolean fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    /// Present for timestamp fields (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<String>,
}

impl Value {
    /// Wraps a string.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self {
            string_value: Some(s.into()),
            ..Self::default()
        }
    }

    /// Wraps a boolean.
    #[must_use]
    pub fn boolean(b: bool) -> Self {
        Self {
            boolean_value: Some(b),
            ..Self::default()
        }
    }

    /// Wraps a timestamp.
    #[must_use]
    pub fn timestamp(ts: &DateTime<Utc>) -> Self {
        Self {
            timestamp_value: Some(crate::format_timestamp(ts)),
            ..Self::default()
        }
    }

    /// Returns the string member, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    /// Returns the boolean member, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        self.boolean_value
    }

    /// Returns the timestamp member parsed, if present and well-formed.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp_value
            .as_deref()
            .and_then(crate::parse_timestamp)
    }
}

/// A stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name
    /// (`projects/{p}/databases/(default)/documents/{collection}/{id}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field values.
    #[serde(default)]
    pub fields: Fields,
    /// Server creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Server update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    /// Creates an unnamed document from fields.
    #[must_use]
    pub fn from_fields(fields: Fields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Returns the last path segment of the resource name.
    #[must_use]
    pub fn document_id(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }

    /// Reads a string field.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Reads a boolean field.
    #[must_use]
    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    /// Reads a timestamp field.
    #[must_use]
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.fields.get(key).and_then(Value::as_timestamp)
    }
}
