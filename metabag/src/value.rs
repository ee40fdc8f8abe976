//! The closed set of value kinds a bag can hold.

use chrono::{DateTime, Utc};

use crate::datetime;

/// One stored attribute value.
///
/// Multi-valued tags are still a single `String` here - their elements are
/// joined with `;` (or `,`, for GPS coordinates).
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    String(String),
    Integer(i64),
    Real(f64),
    Timestamp(DateTime<Utc>),
    Blob(Vec<u8>),
}

/// Names a [`TypedValue`] variant without its payload.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Real,
    Timestamp,
    Blob,
}

impl TypedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::String(_) => ValueKind::String,
            TypedValue::Integer(_) => ValueKind::Integer,
            TypedValue::Real(_) => ValueKind::Real,
            TypedValue::Timestamp(_) => ValueKind::Timestamp,
            TypedValue::Blob(_) => ValueKind::Blob,
        }
    }

    /// Borrows the text, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Renders scalar values as text.
    ///
    /// Blobs have no single text form (that depends on the tag), so they
    /// give `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            TypedValue::String(s) => Some(s.clone()),
            TypedValue::Integer(i) => Some(i.to_string()),
            TypedValue::Real(r) => Some(r.to_string()),
            TypedValue::Timestamp(ts) => Some(datetime::from_timestamp(ts)),
            TypedValue::Blob(_) => None,
        }
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::String(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::String(value.into())
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Integer(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Real(value)
    }
}

impl From<DateTime<Utc>> for TypedValue {
    fn from(value: DateTime<Utc>) -> Self {
        TypedValue::Timestamp(value)
    }
}

impl From<Vec<u8>> for TypedValue {
    fn from(value: Vec<u8>) -> Self {
        TypedValue::Blob(value)
    }
}
