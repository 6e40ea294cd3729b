//! Field values

use alloc::string::String;
use alloc::vec::Vec;

use crate::schema::FieldKind;

/// Value held by one message field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Raw bytes
    Bytes(Vec<u8>),
    /// UTF-8 text
    String(String),
    /// Signed 64-bit integer
    Int64(i64),
}

impl Value {
    /// Zero value for `kind`: empty bytes, empty string or 0
    #[inline]
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Bytes => Value::Bytes(Vec::new()),
            FieldKind::String => Value::String(String::new()),
            FieldKind::Int64 => Value::Int64(0),
        }
    }

    /// Kind of this value
    #[inline]
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Bytes(_) => FieldKind::Bytes,
            Value::String(_) => FieldKind::String,
            Value::Int64(_) => FieldKind::Int64,
        }
    }

    /// Whether the value equals its kind's zero value
    ///
    /// Compares by content, so any empty byte vector counts as default.
    #[inline]
    pub fn is_default(&self) -> bool {
        match self {
            Value::Bytes(b) => b.is_empty(),
            Value::String(s) => s.is_empty(),
            Value::Int64(n) => *n == 0,
        }
    }

    /// Borrow as bytes; text is returned as its UTF-8 bytes
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            Value::String(s) => Some(s.as_bytes()),
            Value::Int64(_) => None,
        }
    }

    /// Borrow as text
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(String::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}
