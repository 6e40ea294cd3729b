//! Variable-length integer encoding (base-128, low group first)
//!
//! Every tag, length prefix and integer field value on the wire is a varint.
//! Each byte carries seven value bits; the high bit is set on every byte
//! except the last.

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Maximum bytes needed for a u64 varint
pub const MAX_VARINT_LEN: usize = 10;

/// Number of bytes `value` occupies when varint-encoded
#[inline]
pub const fn encoded_len(value: u64) -> usize {
    if value == 0 {
        1
    } else {
        let bits = 64 - value.leading_zeros() as usize;
        (bits + 6) / 7
    }
}

/// Encode a u64 as varint into the given buffer
///
/// Returns the number of bytes written, or Error::ShortBuffer if insufficient space.
#[inline]
pub fn encode_u64(value: u64, buf: &mut [u8]) -> Result<usize> {
    let mut value = value;
    let mut pos = 0;

    loop {
        if pos >= buf.len() {
            return Err(Error::ShortBuffer);
        }

        if value < 0x80 {
            buf[pos] = value as u8;
            return Ok(pos + 1);
        }

        buf[pos] = (value as u8) | 0x80;
        value >>= 7;
        pos += 1;
    }
}

/// Append a u64 varint to a growable buffer
#[inline]
pub fn put_u64(value: u64, out: &mut Vec<u8>) {
    let mut value = value;
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Decode a u64 varint from the given buffer
///
/// Returns (value, bytes_consumed). A tenth byte may only contribute the top
/// bit; anything above bit 63 is discarded. Input that ends before the final
/// byte, or a continuation bit on the tenth byte, is `MalformedVarint`.
#[inline]
pub fn decode_u64(buf: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0;

    for (pos, &byte) in buf.iter().take(MAX_VARINT_LEN).enumerate() {
        result |= ((byte & 0x7F) as u64) << shift;

        if byte & 0x80 == 0 {
            return Ok((result, pos + 1));
        }

        shift += 7;
    }

    Err(Error::MalformedVarint)
}
