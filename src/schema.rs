//! Static message schemas
//!
//! A schema is a table from field number to semantic kind. The generic decode
//! and encode routines consult it, so adding a message type means adding a
//! table, not codec code.

use crate::error::{Error, Result};
use crate::wire::{WireType, MAX_FIELD_NUMBER};

/// Semantic kind of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Raw byte sequence, length-delimited
    Bytes,
    /// UTF-8 text, length-delimited
    String,
    /// Signed 64-bit integer, varint
    Int64,
}

impl FieldKind {
    /// Wire type this kind is encoded with
    #[inline]
    pub const fn wire_type(&self) -> WireType {
        match self {
            FieldKind::Bytes | FieldKind::String => WireType::LengthDelimited,
            FieldKind::Int64 => WireType::Varint,
        }
    }
}

/// One field of a message schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSchema {
    /// Field number, unique within the message
    pub number: u32,
    /// Field name, for diagnostics
    pub name: &'static str,
    /// Value kind
    pub kind: FieldKind,
}

impl FieldSchema {
    /// Create a field entry
    pub const fn new(number: u32, name: &'static str, kind: FieldKind) -> Self {
        Self { number, name, kind }
    }

    /// Wire type for this field
    #[inline]
    pub const fn wire_type(&self) -> WireType {
        self.kind.wire_type()
    }
}

/// Schema of one message type
///
/// Fields are kept in declaration order; encode emits them in this order.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MessageSchema {
    /// Fully qualified message name
    pub name: &'static str,
    /// Field table
    pub fields: &'static [FieldSchema],
}

impl MessageSchema {
    /// Create a schema from a static field table
    pub const fn new(name: &'static str, fields: &'static [FieldSchema]) -> Self {
        Self { name, fields }
    }

    /// Position of `number` in the field table
    #[inline]
    pub fn index_of(&self, number: u32) -> Option<usize> {
        self.fields.iter().position(|f| f.number == number)
    }

    /// Look up a field by number
    #[inline]
    pub fn field(&self, number: u32) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// Look up a field by name
    pub fn field_by_name(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check that field numbers are in range and unique
    pub fn validate(&self) -> Result<()> {
        for (i, field) in self.fields.iter().enumerate() {
            if field.number == 0 || field.number > MAX_FIELD_NUMBER {
                return Err(Error::InvalidFieldNumber(field.number as u64));
            }
            if self.fields[..i].iter().any(|f| f.number == field.number) {
                return Err(Error::InvalidFieldNumber(field.number as u64));
            }
        }
        Ok(())
    }
}
