//! Unknown field preservation
//!
//! Fields whose numbers are not in a message's schema are kept as raw
//! payload bytes, in the order they were read, and written back verbatim
//! after the known fields.

use alloc::vec::Vec;

use crate::decoder::WireReader;
use crate::encoder::WireWriter;
use crate::error::Result;
use crate::varint;
use crate::wire::{Tag, WireType};

/// A single unrecognized field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownField {
    number: u32,
    wire_type: WireType,
    /// Bytes that followed the tag on the wire, length prefix included
    payload: Vec<u8>,
}

impl UnknownField {
    /// Build from raw payload bytes exactly as they appear after the tag
    ///
    /// The payload is not validated against `wire_type`; decode only creates
    /// fields from payloads the reader has already parsed.
    pub fn from_raw(number: u32, wire_type: WireType, payload: Vec<u8>) -> Self {
        Self {
            number,
            wire_type,
            payload,
        }
    }

    /// Varint-typed unknown field
    pub fn varint(number: u32, value: u64) -> Self {
        let mut payload = Vec::with_capacity(varint::encoded_len(value));
        varint::put_u64(value, &mut payload);
        Self::from_raw(number, WireType::Varint, payload)
    }

    /// Length-delimited unknown field
    pub fn length_delimited(number: u32, data: &[u8]) -> Self {
        let mut writer = WireWriter::with_capacity(varint::MAX_VARINT_LEN + data.len());
        writer.put_length_delimited(data);
        Self::from_raw(number, WireType::LengthDelimited, writer.into_inner())
    }

    /// Fixed 32-bit unknown field
    pub fn fixed32(number: u32, value: u32) -> Self {
        Self::from_raw(number, WireType::Fixed32, value.to_le_bytes().to_vec())
    }

    /// Fixed 64-bit unknown field
    pub fn fixed64(number: u32, value: u64) -> Self {
        Self::from_raw(number, WireType::Fixed64, value.to_le_bytes().to_vec())
    }

    /// Field number
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Wire type from the original tag
    #[inline]
    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// Raw payload bytes
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as a varint value, if this is a varint field
    pub fn as_varint(&self) -> Option<u64> {
        match self.wire_type {
            WireType::Varint => varint::decode_u64(&self.payload).ok().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Payload data without its length prefix, if this is length-delimited
    pub fn as_length_delimited(&self) -> Option<&[u8]> {
        match self.wire_type {
            WireType::LengthDelimited => {
                WireReader::new(&self.payload).read_length_delimited().ok()
            }
            _ => None,
        }
    }

    /// Encoded size, tag included
    #[inline]
    pub fn encoded_len(&self) -> usize {
        Tag::new(self.number, self.wire_type).encoded_len() + self.payload.len()
    }

    /// Write the tag followed by the stored payload
    #[inline]
    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.put_tag(Tag::new(self.number, self.wire_type));
        writer.put_raw(&self.payload);
    }
}

/// Ordered collection of unknown fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFieldSet {
    fields: Vec<UnknownField>,
}

impl UnknownFieldSet {
    /// Create an empty set
    #[inline]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Parse every field in `bytes` as unknown
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut set = Self::new();
        let mut reader = WireReader::new(bytes);
        while let Some(tag) = reader.read_tag()? {
            set.read_field(tag, &mut reader)?;
        }
        Ok(set)
    }

    /// Consume the payload for `tag` from `reader` and append it
    pub fn read_field(&mut self, tag: Tag, reader: &mut WireReader<'_>) -> Result<()> {
        let payload = reader.read_raw_payload(tag.wire_type)?;
        self.push(UnknownField::from_raw(
            tag.field_number,
            tag.wire_type,
            payload.to_vec(),
        ));
        Ok(())
    }

    /// Append one field
    #[inline]
    pub fn push(&mut self, field: UnknownField) {
        self.fields.push(field);
    }

    /// Append all of `other`'s fields after this set's fields
    pub fn merge(&mut self, other: &UnknownFieldSet) {
        self.fields.extend_from_slice(&other.fields);
    }

    /// Number of fields
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set holds no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Remove every field
    #[inline]
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Iterate in wire order
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, UnknownField> {
        self.fields.iter()
    }

    /// Fields carrying `number`, in wire order
    pub fn with_number(&self, number: u32) -> impl Iterator<Item = &UnknownField> + '_ {
        self.fields.iter().filter(move |f| f.number == number)
    }

    /// Total encoded size
    pub fn encoded_len(&self) -> usize {
        self.fields.iter().map(UnknownField::encoded_len).sum()
    }

    /// Replay every field in order
    pub fn write_to(&self, writer: &mut WireWriter) {
        for field in &self.fields {
            field.write_to(writer);
        }
    }

    /// Encode the set on its own
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(self.encoded_len());
        self.write_to(&mut writer);
        writer.into_inner()
    }
}

impl<'a> IntoIterator for &'a UnknownFieldSet {
    type Item = &'a UnknownField;
    type IntoIter = core::slice::Iter<'a, UnknownField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<UnknownField> for UnknownFieldSet {
    fn from_iter<I: IntoIterator<Item = UnknownField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use alloc::vec;

    #[test]
    fn test_decode_reencode_is_verbatim() {
        let bytes = [
            0x28, 0x96, 0x01, // field 5 varint 150
            0x0A, 0x02, b'h', b'i', // field 1 bytes
            0x35, 1, 2, 3, 4, // field 6 fixed32
            0x29, 1, 2, 3, 4, 5, 6, 7, 8, // field 5 fixed64
            0x28, 0x01, // field 5 varint again
        ];
        let set = UnknownFieldSet::decode(&bytes).unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(set.encode(), bytes);
        assert_eq!(set.encoded_len(), bytes.len());
        assert_eq!(set.with_number(5).count(), 3);
    }

    #[test]
    fn test_non_canonical_length_is_preserved() {
        // Length 2 written with a redundant continuation byte.
        let bytes = [0x12, 0x82, 0x00, b'o', b'k'];
        let set = UnknownFieldSet::decode(&bytes).unwrap();
        assert_eq!(set.encode(), bytes);
        let field = set.iter().next().unwrap();
        assert_eq!(field.as_length_delimited(), Some(&b"ok"[..]));
    }

    #[test]
    fn test_constructors() {
        let field = UnknownField::varint(7, 300);
        assert_eq!(field.payload(), &[0xAC, 0x02]);
        assert_eq!(field.as_varint(), Some(300));
        assert_eq!(field.as_length_delimited(), None);

        let field = UnknownField::length_delimited(8, b"abc");
        assert_eq!(field.payload(), &[3, b'a', b'b', b'c']);
        assert_eq!(field.encoded_len(), 5);

        assert_eq!(UnknownField::fixed32(1, 1).payload(), &[1, 0, 0, 0]);
        assert_eq!(UnknownField::fixed64(1, 1).payload().len(), 8);
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut a: UnknownFieldSet = vec![UnknownField::varint(10, 1)].into_iter().collect();
        let b: UnknownFieldSet = vec![UnknownField::varint(11, 2), UnknownField::varint(10, 3)]
            .into_iter()
            .collect();
        a.merge(&b);

        let numbers: Vec<u32> = a.iter().map(UnknownField::number).collect();
        assert_eq!(numbers, vec![10, 11, 10]);

        a.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            UnknownFieldSet::decode(&[0x0A, 0x05, b'x']),
            Err(Error::UnexpectedEof)
        );
        assert_eq!(
            UnknownFieldSet::decode(&[0x0B]),
            Err(Error::UnknownWireType(3))
        );
    }
}
