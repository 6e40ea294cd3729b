//! Wire writer
//!
//! The writer appends tag/value pairs to a growable buffer. Callers size the
//! buffer up front with the `*_field_len` helpers, so encoding a message
//! allocates once.

use alloc::vec::Vec;

use crate::varint;
use crate::wire::{Tag, WireType};

/// Encoded size of a length-delimited field, or 0 when `data` is empty
#[inline]
pub const fn bytes_field_len(field_number: u32, data: &[u8]) -> usize {
    if data.is_empty() {
        return 0;
    }
    Tag::new(field_number, WireType::LengthDelimited).encoded_len()
        + varint::encoded_len(data.len() as u64)
        + data.len()
}

/// Encoded size of a varint int64 field, or 0 when `value` is zero
#[inline]
pub const fn int64_field_len(field_number: u32, value: i64) -> usize {
    if value == 0 {
        return 0;
    }
    Tag::new(field_number, WireType::Varint).encoded_len() + varint::encoded_len(value as u64)
}

/// Writer that appends wire-format fields to a byte vector
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Create an empty writer
    #[inline]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create a writer whose buffer can hold `capacity` bytes without growing
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Continue writing after the existing contents of `buf`
    #[inline]
    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self { buf }
    }

    /// Write a tag
    #[inline]
    pub fn put_tag(&mut self, tag: Tag) {
        tag.encode(&mut self.buf);
    }

    /// Write a varint-encoded u64
    #[inline]
    pub fn put_varint(&mut self, value: u64) {
        varint::put_u64(value, &mut self.buf);
    }

    /// Write variable-length bytes with a varint length prefix
    #[inline]
    pub fn put_length_delimited(&mut self, bytes: &[u8]) {
        self.put_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    /// Write raw bytes without length prefix
    #[inline]
    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a little-endian u32
    #[inline]
    pub fn put_fixed32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a little-endian u64
    #[inline]
    pub fn put_fixed64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a bytes or text field, skipping it when empty
    #[inline]
    pub fn put_bytes_field(&mut self, field_number: u32, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.put_tag(Tag::new(field_number, WireType::LengthDelimited));
        self.put_length_delimited(data);
    }

    /// Write an int64 field, skipping it when zero
    ///
    /// Negative values are written as their two's-complement u64 (10 bytes).
    #[inline]
    pub fn put_int64_field(&mut self, field_number: u32, value: i64) {
        if value == 0 {
            return;
        }
        self.put_tag(Tag::new(field_number, WireType::Varint));
        self.put_varint(value as u64);
    }

    /// Get current length of the output
    #[inline]
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Get a slice of the encoded data
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Reset writer for reuse, keeping the allocation
    #[inline]
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Take the encoded bytes
    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
