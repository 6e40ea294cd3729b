//! txwire: byte-exact wire codec for signed transaction records
//!
//! Transaction records are hashed and signed over their encoded bytes, so the
//! encoding must be deterministic and must survive decode/re-encode without
//! losing fields this crate does not know about.
//!
//! # Wire Format
//!
//! ```text
//! +----------------------------------+---------------------------------+
//! | varint(field_number << 3 | wt)   | payload                         |
//! +----------------------------------+---------------------------------+
//! wt = 0: varint integer
//! wt = 2: varint length + raw bytes (bytes and UTF-8 text)
//! wt = 1 / 5: 8 / 4 little-endian bytes (kept only as unknown fields)
//! ```
//!
//! Fields holding their zero value are omitted. Known fields are written in
//! schema order, followed by unknown fields in the order they were read.
//!
//! # Features
//!
//! - Table-driven schemas: one generic codec serves every message type
//! - Immutable [`Message`] values and mutable [`Builder`]s with merge semantics
//! - Unknown fields preserved byte for byte
//! - Length-delimited framing for streams of messages
//! - `no_std` support with `alloc`
//!
//! # Example
//!
//! ```rust
//! use txwire::messages::cancel_order::CancelOrder;
//!
//! let order = CancelOrder::builder()
//!     .set_sender(vec![0xAB; 20])
//!     .set_symbol("BNB_USDT")
//!     .set_refid("abc123")
//!     .finalize();
//!
//! let bytes = order.encode();
//! let decoded = CancelOrder::decode(&bytes)?;
//! assert_eq!(decoded.symbol(), "BNB_USDT");
//! assert_eq!(decoded, order);
//! # Ok::<(), txwire::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod builder;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod message;
pub mod messages;
pub mod schema;
pub mod unknown;
pub mod value;
pub mod varint;
pub mod wire;

// Re-export main types
pub use builder::Builder;
pub use decoder::WireReader;
pub use encoder::WireWriter;
pub use error::{Error, Result};
pub use message::Message;
pub use schema::{FieldKind, FieldSchema, MessageSchema};
pub use unknown::{UnknownField, UnknownFieldSet};
pub use value::Value;
pub use varint::MAX_VARINT_LEN;
pub use wire::{Tag, WireType, MAX_FIELD_NUMBER};

/// Largest body accepted by length-delimited decoding (64 MiB)
pub const DEFAULT_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Decode `bytes` into a message of type `schema`
#[inline]
pub fn decode(bytes: &[u8], schema: &'static MessageSchema) -> Result<Message> {
    Message::decode(bytes, schema)
}

/// Encode `message` to wire bytes
#[inline]
pub fn encode(message: &Message) -> alloc::vec::Vec<u8> {
    message.encode()
}
