//! Immutable message values
//!
//! A [`Message`] is a frozen snapshot produced by [`Builder::finalize`]. It
//! exposes read accessors and encoding only; to change a field, go through
//! [`Message::to_builder`].

use alloc::vec::Vec;

use crate::builder::Builder;
use crate::decoder::WireReader;
use crate::encoder::{bytes_field_len, int64_field_len, WireWriter};
use crate::error::{Error, Result};
use crate::schema::{FieldSchema, MessageSchema};
use crate::unknown::UnknownFieldSet;
use crate::value::Value;
use crate::varint;
use crate::DEFAULT_SIZE_LIMIT;

/// Finalized, hashable record of typed field values plus unknown fields
///
/// Equality and hashing cover the schema, every field value and the unknown
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    schema: &'static MessageSchema,
    values: Vec<Value>,
    unknown_fields: UnknownFieldSet,
}

impl Message {
    pub(crate) fn from_parts(
        schema: &'static MessageSchema,
        values: Vec<Value>,
        unknown_fields: UnknownFieldSet,
    ) -> Self {
        Self {
            schema,
            values,
            unknown_fields,
        }
    }

    /// Message with every field at its default and no unknown fields
    pub fn default_for(schema: &'static MessageSchema) -> Self {
        Builder::new(schema).finalize()
    }

    /// Decode `bytes` against `schema`
    pub fn decode(bytes: &[u8], schema: &'static MessageSchema) -> Result<Self> {
        let mut builder = Builder::new(schema);
        builder.merge_from_bytes(bytes)?;
        Ok(builder.finalize())
    }

    /// Decode one varint-length-prefixed message from the front of `bytes`
    ///
    /// Returns the message and the number of bytes consumed, prefix included.
    pub fn decode_length_delimited(
        bytes: &[u8],
        schema: &'static MessageSchema,
    ) -> Result<(Self, usize)> {
        let mut builder = Builder::new(schema);
        let consumed = builder.merge_from_length_delimited(bytes)?;
        Ok((builder.finalize(), consumed))
    }

    /// Schema this message was built against
    #[inline]
    pub fn schema(&self) -> &'static MessageSchema {
        self.schema
    }

    /// Value of field `number`, or `None` if the schema has no such field
    #[inline]
    pub fn field(&self, number: u32) -> Option<&Value> {
        self.schema.index_of(number).map(|i| &self.values[i])
    }

    /// Whether field `number` holds a non-default value
    #[inline]
    pub fn has_field(&self, number: u32) -> bool {
        self.field(number).is_some_and(|v| !v.is_default())
    }

    /// Bytes or text field as bytes; empty if absent
    #[inline]
    pub fn bytes(&self, number: u32) -> &[u8] {
        self.field(number).and_then(Value::as_bytes).unwrap_or(&[])
    }

    /// Text field; empty if absent
    #[inline]
    pub fn string(&self, number: u32) -> &str {
        self.field(number).and_then(Value::as_str).unwrap_or("")
    }

    /// Integer field; zero if absent
    #[inline]
    pub fn int64(&self, number: u32) -> i64 {
        self.field(number).and_then(Value::as_i64).unwrap_or(0)
    }

    /// Iterate schema fields with their values, in schema order
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSchema, &Value)> + '_ {
        self.schema.fields.iter().zip(self.values.iter())
    }

    /// Fields not recognized by the schema
    #[inline]
    pub fn unknown_fields(&self) -> &UnknownFieldSet {
        &self.unknown_fields
    }

    /// Builder seeded with this message's values
    #[inline]
    pub fn to_builder(&self) -> Builder {
        Builder::from(self)
    }

    /// Exact encoded size in bytes
    pub fn encoded_len(&self) -> usize {
        fields_len(self.schema, &self.values, &self.unknown_fields)
    }

    /// Encode to a new vector
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(self.encoded_len());
        self.write_to(&mut writer);
        writer.into_inner()
    }

    /// Append the encoding to `out`
    pub fn encode_to_vec(&self, out: &mut Vec<u8>) {
        out.reserve(self.encoded_len());
        let mut writer = WireWriter::from_vec(core::mem::take(out));
        self.write_to(&mut writer);
        *out = writer.into_inner();
    }

    /// Encode into a caller-provided buffer
    ///
    /// Returns the number of bytes written, or `ShortBuffer` if `buf` is
    /// smaller than [`Message::encoded_len`]. Nothing is written on failure.
    pub fn encode_to_slice(&self, buf: &mut [u8]) -> Result<usize> {
        let len = self.encoded_len();
        if buf.len() < len {
            return Err(Error::ShortBuffer);
        }
        let encoded = self.encode();
        buf[..len].copy_from_slice(&encoded);
        Ok(len)
    }

    /// Encode with a varint length prefix
    pub fn encode_length_delimited(&self) -> Vec<u8> {
        let len = self.encoded_len();
        let mut writer = WireWriter::with_capacity(varint::encoded_len(len as u64) + len);
        writer.put_varint(len as u64);
        self.write_to(&mut writer);
        writer.into_inner()
    }

    /// Write known fields in schema order, then unknown fields
    pub fn write_to(&self, writer: &mut WireWriter) {
        write_fields(self.schema, &self.values, &self.unknown_fields, writer);
    }
}

/// Split a length-prefixed frame off the front of `bytes`
///
/// Returns the body and the total bytes consumed.
pub(crate) fn read_frame(bytes: &[u8]) -> Result<(&[u8], usize)> {
    let mut reader = WireReader::new(bytes);
    let len = reader.read_varint()?;
    if len > DEFAULT_SIZE_LIMIT as u64 {
        return Err(Error::MessageTooLarge);
    }
    let body = reader.read_bytes(len as usize)?;
    Ok((body, reader.position()))
}

pub(crate) fn fields_len(
    schema: &MessageSchema,
    values: &[Value],
    unknown_fields: &UnknownFieldSet,
) -> usize {
    let known: usize = schema
        .fields
        .iter()
        .zip(values)
        .map(|(field, value)| match value {
            Value::Bytes(b) => bytes_field_len(field.number, b),
            Value::String(s) => bytes_field_len(field.number, s.as_bytes()),
            Value::Int64(n) => int64_field_len(field.number, *n),
        })
        .sum();
    known + unknown_fields.encoded_len()
}

pub(crate) fn write_fields(
    schema: &MessageSchema,
    values: &[Value],
    unknown_fields: &UnknownFieldSet,
    writer: &mut WireWriter,
) {
    for (field, value) in schema.fields.iter().zip(values) {
        match value {
            Value::Bytes(b) => writer.put_bytes_field(field.number, b),
            Value::String(s) => writer.put_bytes_field(field.number, s.as_bytes()),
            Value::Int64(n) => writer.put_int64_field(field.number, *n),
        }
    }
    unknown_fields.write_to(writer);
}
