//! Mutable message builders
//!
//! A [`Builder`] stages field values and unknown fields for one schema.
//! It can be filled field by field, merged from wire bytes or from another
//! message, and finalized any number of times; every [`Builder::finalize`]
//! returns an independent [`Message`].

use alloc::string::String;
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::decoder::WireReader;
use crate::error::{Error, Result};
use crate::message::{self, Message};
use crate::schema::{FieldKind, MessageSchema};
use crate::unknown::UnknownFieldSet;
use crate::value::Value;

/// Mutable staging area for a [`Message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder {
    schema: &'static MessageSchema,
    values: Vec<Value>,
    unknown_fields: UnknownFieldSet,
}

/// Field updates and unknown fields read from one buffer, applied only
/// after the whole buffer decoded cleanly
struct Staged {
    updates: Vec<(usize, Value)>,
    unknown_fields: UnknownFieldSet,
}

impl Builder {
    /// Builder with every field at its default
    pub fn new(schema: &'static MessageSchema) -> Self {
        Self {
            schema,
            values: schema
                .fields
                .iter()
                .map(|f| Value::default_for(f.kind))
                .collect(),
            unknown_fields: UnknownFieldSet::new(),
        }
    }

    /// Schema of the message being built
    #[inline]
    pub fn schema(&self) -> &'static MessageSchema {
        self.schema
    }

    /// Currently staged value of field `number`
    #[inline]
    pub fn field(&self, number: u32) -> Option<&Value> {
        self.schema.index_of(number).map(|i| &self.values[i])
    }

    /// Staged bytes or text field as bytes; empty if absent
    #[inline]
    pub fn bytes(&self, number: u32) -> &[u8] {
        self.field(number).and_then(Value::as_bytes).unwrap_or(&[])
    }

    /// Staged text field; empty if absent
    #[inline]
    pub fn string(&self, number: u32) -> &str {
        self.field(number).and_then(Value::as_str).unwrap_or("")
    }

    /// Staged integer field; zero if absent
    #[inline]
    pub fn int64(&self, number: u32) -> i64 {
        self.field(number).and_then(Value::as_i64).unwrap_or(0)
    }

    /// Set field `number`
    ///
    /// Fails with `NoSuchField` for numbers outside the schema and with
    /// `KindMismatch` when `value` is the wrong kind.
    pub fn set(&mut self, number: u32, value: impl Into<Value>) -> Result<&mut Self> {
        let value = value.into();
        let index = self.schema.index_of(number).ok_or(Error::NoSuchField(number))?;
        let expected = self.schema.fields[index].kind;
        if value.kind() != expected {
            return Err(Error::KindMismatch {
                field: number,
                expected,
            });
        }
        self.values[index] = value;
        Ok(self)
    }

    /// Set a bytes field
    pub fn set_bytes(&mut self, number: u32, value: impl Into<Vec<u8>>) -> Result<&mut Self> {
        self.set(number, Value::Bytes(value.into()))
    }

    /// Set a text field
    pub fn set_string(&mut self, number: u32, value: impl Into<String>) -> Result<&mut Self> {
        self.set(number, Value::String(value.into()))
    }

    /// Set an integer field
    pub fn set_int64(&mut self, number: u32, value: i64) -> Result<&mut Self> {
        self.set(number, Value::Int64(value))
    }

    /// Store a value the caller knows matches the schema
    ///
    /// Used by the typed bindings, whose field numbers and kinds are fixed at
    /// compile time.
    pub(crate) fn store(&mut self, number: u32, value: Value) {
        if let Some(index) = self.schema.index_of(number) {
            debug_assert_eq!(self.schema.fields[index].kind, value.kind());
            self.values[index] = value;
        }
    }

    /// Reset field `number` to its default
    pub fn clear_field(&mut self, number: u32) -> Result<&mut Self> {
        let index = self.schema.index_of(number).ok_or(Error::NoSuchField(number))?;
        self.values[index] = Value::default_for(self.schema.fields[index].kind);
        Ok(self)
    }

    /// Reset every field and drop all unknown fields
    pub fn clear(&mut self) -> &mut Self {
        for (value, field) in self.values.iter_mut().zip(self.schema.fields) {
            *value = Value::default_for(field.kind);
        }
        self.unknown_fields.clear();
        self
    }

    /// Unknown fields accumulated so far
    #[inline]
    pub fn unknown_fields(&self) -> &UnknownFieldSet {
        &self.unknown_fields
    }

    /// Replace the unknown fields
    pub fn set_unknown_fields(&mut self, unknown_fields: UnknownFieldSet) -> &mut Self {
        self.unknown_fields = unknown_fields;
        self
    }

    /// Append `unknown_fields` after the existing unknown fields
    pub fn merge_unknown_fields(&mut self, unknown_fields: &UnknownFieldSet) -> &mut Self {
        self.unknown_fields.merge(unknown_fields);
        self
    }

    /// Merge encoded fields from `bytes`
    ///
    /// Known fields overwrite staged values in wire order, so the last
    /// occurrence of a field wins, even when it carries an empty value.
    /// Unknown fields, and known numbers seen with an unexpected wire type,
    /// are appended to the unknown set. On error the builder is left
    /// exactly as it was.
    pub fn merge_from_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        let mut reader = WireReader::new(bytes);
        let staged = match self.read_fields(&mut reader) {
            Ok(staged) => staged,
            Err(error) => {
                debug!(
                    schema = self.schema.name,
                    offset = reader.position(),
                    %error,
                    "decode aborted"
                );
                return Err(error);
            }
        };

        for (index, value) in staged.updates {
            self.values[index] = value;
        }
        self.unknown_fields.merge(&staged.unknown_fields);
        Ok(self)
    }

    /// Merge one varint-length-prefixed message from the front of `bytes`
    ///
    /// Returns the number of bytes consumed, prefix included.
    pub fn merge_from_length_delimited(&mut self, bytes: &[u8]) -> Result<usize> {
        let (body, consumed) = message::read_frame(bytes)?;
        self.merge_from_bytes(body)?;
        Ok(consumed)
    }

    /// Overlay the non-default fields of `other`
    ///
    /// Fields at their default in `other` leave the staged value untouched.
    /// `other`'s unknown fields are appended after the staged ones.
    pub fn merge_from_message(&mut self, other: &Message) -> Result<&mut Self> {
        if self.schema != other.schema() {
            return Err(Error::SchemaMismatch);
        }
        self.overlay(other);
        Ok(self)
    }

    /// Overlay for a message already known to share this schema
    pub(crate) fn overlay(&mut self, other: &Message) {
        debug_assert_eq!(self.schema, other.schema());
        for (slot, (_, value)) in self.values.iter_mut().zip(other.fields()) {
            if !value.is_default() {
                *slot = value.clone();
            }
        }
        self.unknown_fields.merge(other.unknown_fields());
    }

    /// Exact encoded size of the staged message
    pub fn encoded_len(&self) -> usize {
        message::fields_len(self.schema, &self.values, &self.unknown_fields)
    }

    /// Snapshot the staged values into an immutable message
    ///
    /// The builder stays usable; later changes do not affect the returned
    /// message.
    pub fn finalize(&self) -> Message {
        Message::from_parts(self.schema, self.values.clone(), self.unknown_fields.clone())
    }

    fn read_fields(&self, reader: &mut WireReader<'_>) -> Result<Staged> {
        let mut staged = Staged {
            updates: Vec::new(),
            unknown_fields: UnknownFieldSet::new(),
        };

        while let Some(tag) = reader.read_tag()? {
            let known = self
                .schema
                .index_of(tag.field_number)
                .map(|index| (index, &self.schema.fields[index]));

            match known {
                Some((index, field)) if field.wire_type() == tag.wire_type => {
                    let value = match field.kind {
                        FieldKind::Bytes => Value::Bytes(reader.read_length_delimited()?.to_vec()),
                        FieldKind::String => {
                            let raw = reader.read_length_delimited()?;
                            let text = core::str::from_utf8(raw)
                                .map_err(|_| Error::InvalidUtf8 { field: field.number })?;
                            Value::String(String::from(text))
                        }
                        FieldKind::Int64 => Value::Int64(reader.read_varint()? as i64),
                    };
                    staged.updates.push((index, value));
                }
                Some((_, field)) => {
                    trace!(
                        schema = self.schema.name,
                        field = field.name,
                        wire_type = ?tag.wire_type,
                        "wire type mismatch, keeping as unknown field"
                    );
                    staged.unknown_fields.read_field(tag, reader)?;
                }
                None => {
                    trace!(
                        schema = self.schema.name,
                        field = tag.field_number,
                        wire_type = ?tag.wire_type,
                        "preserving unknown field"
                    );
                    staged.unknown_fields.read_field(tag, reader)?;
                }
            }
        }

        if !reader.is_at_end() {
            trace!(
                schema = self.schema.name,
                offset = reader.position(),
                "zero tag, ignoring trailing bytes"
            );
        }

        Ok(staged)
    }
}

impl From<&Message> for Builder {
    fn from(message: &Message) -> Self {
        let mut builder = Builder::new(message.schema());
        for (slot, (_, value)) in builder.values.iter_mut().zip(message.fields()) {
            *slot = value.clone();
        }
        builder.unknown_fields = message.unknown_fields().clone();
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSchema;
    use crate::unknown::UnknownField;
    use alloc::vec;

    static RECORD: MessageSchema = MessageSchema::new(
        "test.Record",
        &[
            FieldSchema::new(1, "raw", FieldKind::Bytes),
            FieldSchema::new(2, "name", FieldKind::String),
            FieldSchema::new(3, "count", FieldKind::Int64),
        ],
    );

    static OTHER: MessageSchema =
        MessageSchema::new("test.Other", &[FieldSchema::new(1, "raw", FieldKind::Bytes)]);

    #[test]
    fn test_set_and_finalize() {
        let mut builder = Builder::new(&RECORD);
        builder
            .set_bytes(1, vec![1, 2])
            .unwrap()
            .set_string(2, "n")
            .unwrap()
            .set_int64(3, -7)
            .unwrap();

        let msg = builder.finalize();
        assert_eq!(msg.bytes(1), &[1, 2]);
        assert_eq!(msg.string(2), "n");
        assert_eq!(msg.int64(3), -7);
    }

    #[test]
    fn test_set_rejects_bad_fields() {
        let mut builder = Builder::new(&RECORD);
        assert_eq!(builder.set(4, 1i64).unwrap_err(), Error::NoSuchField(4));
        assert_eq!(
            builder.set(3, "three").unwrap_err(),
            Error::KindMismatch {
                field: 3,
                expected: FieldKind::Int64
            }
        );
        assert_eq!(builder.clear_field(9).unwrap_err(), Error::NoSuchField(9));
    }

    #[test]
    fn test_finalize_snapshots_are_independent() {
        let mut builder = Builder::new(&RECORD);
        builder.set_string(2, "first").unwrap();
        let first = builder.finalize();

        builder.set_string(2, "second").unwrap();
        let second = builder.finalize();

        assert_eq!(first.string(2), "first");
        assert_eq!(second.string(2), "second");
    }

    #[test]
    fn test_merge_from_bytes_last_write_wins() {
        let bytes = [0x12, 1, b'a', 0x18, 5, 0x12, 1, b'b'];
        let mut builder = Builder::new(&RECORD);
        builder.merge_from_bytes(&bytes).unwrap();
        assert_eq!(builder.field(2), Some(&Value::from("b")));
        assert_eq!(builder.field(3), Some(&Value::Int64(5)));
    }

    #[test]
    fn test_explicit_empty_on_wire_overwrites() {
        let mut builder = Builder::new(&RECORD);
        builder.set_string(2, "keep?").unwrap();
        builder.merge_from_bytes(&[0x12, 0]).unwrap();
        assert_eq!(builder.field(2), Some(&Value::from("")));
    }

    #[test]
    fn test_wire_type_mismatch_becomes_unknown() {
        // Field 3 is an integer but arrives length-delimited.
        let bytes = [0x1A, 2, b'h', b'i'];
        let msg = Message::decode(&bytes, &RECORD).unwrap();
        assert_eq!(msg.int64(3), 0);
        assert_eq!(msg.unknown_fields().len(), 1);
        assert_eq!(msg.encode(), bytes);
    }

    #[test]
    fn test_failed_merge_leaves_builder_untouched() {
        let mut builder = Builder::new(&RECORD);
        builder.set_string(2, "stable").unwrap();
        let before = builder.clone();

        // Valid field 3, then field 1 with a missing payload.
        let bytes = [0x18, 9, 0x28, 1, 0x0A, 4, 1];
        assert_eq!(builder.merge_from_bytes(&bytes).unwrap_err(), Error::UnexpectedEof);
        assert_eq!(builder, before);
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let bytes = [0x12, 2, 0xC3, 0x28];
        assert_eq!(
            Message::decode(&bytes, &RECORD).unwrap_err(),
            Error::InvalidUtf8 { field: 2 }
        );
    }

    #[test]
    fn test_zero_tag_stops_decoding() {
        let bytes = [0x18, 1, 0x00, 0x18, 2];
        let msg = Message::decode(&bytes, &RECORD).unwrap();
        assert_eq!(msg.int64(3), 1);
    }

    #[test]
    fn test_merge_from_message_overlay() {
        let mut builder = Builder::new(&RECORD);
        builder.set_string(2, "X").unwrap();
        builder.merge_unknown_fields(&[UnknownField::varint(10, 1)].into_iter().collect());

        let mut source = Builder::new(&RECORD);
        source.set_int64(3, 42).unwrap();
        source.merge_unknown_fields(&[UnknownField::varint(11, 2)].into_iter().collect());
        let source = source.finalize();

        builder.merge_from_message(&source).unwrap();
        assert_eq!(builder.field(2), Some(&Value::from("X")));
        assert_eq!(builder.field(3), Some(&Value::Int64(42)));
        let numbers: Vec<u32> = builder.unknown_fields().iter().map(|f| f.number()).collect();
        assert_eq!(numbers, vec![10, 11]);
    }

    #[test]
    fn test_merge_from_message_schema_mismatch() {
        let other = Builder::new(&OTHER).finalize();
        let mut builder = Builder::new(&RECORD);
        assert_eq!(
            builder.merge_from_message(&other).unwrap_err(),
            Error::SchemaMismatch
        );
    }

    #[test]
    fn test_clear() {
        let mut builder = Builder::new(&RECORD);
        builder.merge_from_bytes(&[0x18, 3, 0x50, 1]).unwrap();
        builder.clear_field(3).unwrap();
        assert_eq!(builder.field(3), Some(&Value::Int64(0)));
        assert_eq!(builder.unknown_fields().len(), 1);

        builder.set_bytes(1, vec![1]).unwrap();
        builder.clear();
        assert_eq!(builder, Builder::new(&RECORD));
        assert_eq!(builder.encoded_len(), 0);
    }

    #[test]
    fn test_copy_from_message() {
        let bytes = [0x0A, 1, 7, 0x50, 1];
        let msg = Message::decode(&bytes, &RECORD).unwrap();
        let builder = Builder::from(&msg);
        assert_eq!(builder.finalize(), msg);
        assert_eq!(builder.encoded_len(), bytes.len());
    }
}
