//! Tags and wire types

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::varint;

/// Largest field number a tag can carry
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// How the payload following a tag is laid out
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// Varint value
    Varint = 0,
    /// Eight little-endian bytes
    Fixed64 = 1,
    /// Varint length followed by that many bytes
    LengthDelimited = 2,
    /// Four little-endian bytes
    Fixed32 = 5,
}

impl WireType {
    /// Map the low three bits of a tag to a wire type
    #[inline]
    pub const fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::Fixed32),
            n => Err(Error::UnknownWireType(n)),
        }
    }
}

/// Field number plus wire type, the prefix of every field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Field number (1..=MAX_FIELD_NUMBER)
    pub field_number: u32,
    /// Payload layout
    pub wire_type: WireType,
}

impl Tag {
    /// Create a new tag
    #[inline]
    pub const fn new(field_number: u32, wire_type: WireType) -> Self {
        Self {
            field_number,
            wire_type,
        }
    }

    /// Combined varint value: `field_number << 3 | wire_type`
    #[inline]
    pub const fn value(&self) -> u64 {
        ((self.field_number as u64) << 3) | self.wire_type as u64
    }

    /// Split a raw tag value into its parts
    #[inline]
    pub fn from_value(raw: u64) -> Result<Self> {
        let field_number = raw >> 3;
        if field_number == 0 || field_number > MAX_FIELD_NUMBER as u64 {
            return Err(Error::InvalidFieldNumber(field_number));
        }
        let wire_type = WireType::from_bits((raw & 0x7) as u8)?;
        Ok(Self::new(field_number as u32, wire_type))
    }

    /// Encoded size of the tag in bytes
    #[inline]
    pub const fn encoded_len(&self) -> usize {
        varint::encoded_len(self.value())
    }

    /// Append the tag varint to `out`
    #[inline]
    pub fn encode(&self, out: &mut Vec<u8>) {
        varint::put_u64(self.value(), out);
    }
}
