//! Zero-copy wire reader
//!
//! The reader operates on a borrowed slice and hands out sub-slices of it for
//! length-delimited payloads.

use crate::error::{Error, Result};
use crate::varint;
use crate::wire::{Tag, WireType};

/// Cursor over an encoded message with position tracking
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create new reader for the given buffer
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get remaining bytes in the reader
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if the reader is at the end
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Read the next tag
    ///
    /// Returns `None` at the end of the buffer or when the tag varint is zero,
    /// which terminates the current message.
    #[inline]
    pub fn read_tag(&mut self) -> Result<Option<Tag>> {
        if self.is_at_end() {
            return Ok(None);
        }
        let raw = self.read_varint()?;
        if raw == 0 {
            return Ok(None);
        }
        Tag::from_value(raw).map(Some)
    }

    /// Read a varint-encoded u64
    #[inline]
    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, size) = varint::decode_u64(&self.buf[self.pos..])?;
        self.pos += size;
        Ok(value)
    }

    /// Read a length prefix followed by that many bytes
    ///
    /// Returns a zero-copy slice into the original buffer
    #[inline]
    pub fn read_length_delimited(&mut self) -> Result<&'a [u8]> {
        let len = self.read_varint()?;
        if len > self.remaining() as u64 {
            return Err(Error::UnexpectedEof);
        }
        self.read_bytes(len as usize)
    }

    /// Read a little-endian u32
    #[inline]
    pub fn read_fixed32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian u64
    #[inline]
    pub fn read_fixed64(&mut self) -> Result<u64> {
        let bytes = self.read_bytes(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    /// Read raw bytes without length prefix
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::UnexpectedEof);
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Consume the payload for `wire_type` and return its exact bytes
    ///
    /// For length-delimited payloads the returned slice includes the length
    /// prefix, so replaying it after the tag reproduces the input.
    #[inline]
    pub fn read_raw_payload(&mut self, wire_type: WireType) -> Result<&'a [u8]> {
        let start = self.pos;
        match wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.read_bytes(8)?;
            }
            WireType::LengthDelimited => {
                self.read_length_delimited()?;
            }
            WireType::Fixed32 => {
                self.read_bytes(4)?;
            }
        }
        Ok(&self.buf[start..self.pos])
    }

    /// Skip the payload for `wire_type`
    #[inline]
    pub fn skip(&mut self, wire_type: WireType) -> Result<()> {
        self.read_raw_payload(wire_type).map(|_| ())
    }
}
