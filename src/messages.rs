//! Typed bindings for the transaction messages
//!
//! Each binding is a static schema plus thin wrappers around the generic
//! [`Message`] and [`Builder`](crate::Builder); all wire handling lives in the
//! generic code.

use alloc::string::String;
use alloc::vec::Vec;

use crate::builder::Builder as MessageBuilder;
use crate::error::{Error, Result};
use crate::message::Message;
use crate::schema::{FieldKind, FieldSchema, MessageSchema};
use crate::unknown::UnknownFieldSet;
use crate::value::Value;

/// Shared surface of a typed message and its builder
macro_rules! typed_message {
    ($msg:ident, $builder:ident, $schema:ident) => {
        impl $msg {
            /// Schema backing this message type
            #[inline]
            pub fn schema() -> &'static MessageSchema {
                &$schema
            }

            /// Start an empty builder
            #[inline]
            pub fn builder() -> $builder {
                $builder::new()
            }

            /// Decode from wire bytes
            pub fn decode(bytes: &[u8]) -> Result<Self> {
                Message::decode(bytes, &$schema).map(Self)
            }

            /// Decode one length-prefixed message; returns it and the bytes consumed
            pub fn decode_length_delimited(bytes: &[u8]) -> Result<(Self, usize)> {
                Message::decode_length_delimited(bytes, &$schema).map(|(m, n)| (Self(m), n))
            }

            /// Encode to wire bytes
            #[inline]
            pub fn encode(&self) -> Vec<u8> {
                self.0.encode()
            }

            /// Encode with a varint length prefix
            #[inline]
            pub fn encode_length_delimited(&self) -> Vec<u8> {
                self.0.encode_length_delimited()
            }

            /// Exact encoded size in bytes
            #[inline]
            pub fn encoded_len(&self) -> usize {
                self.0.encoded_len()
            }

            /// Fields not recognized by the schema
            #[inline]
            pub fn unknown_fields(&self) -> &UnknownFieldSet {
                self.0.unknown_fields()
            }

            /// Builder seeded with this message's values
            #[inline]
            pub fn to_builder(&self) -> $builder {
                $builder(self.0.to_builder())
            }

            /// Borrow the untyped message
            #[inline]
            pub fn as_message(&self) -> &Message {
                &self.0
            }

            /// Unwrap into the untyped message
            #[inline]
            pub fn into_message(self) -> Message {
                self.0
            }
        }

        impl Default for $msg {
            fn default() -> Self {
                Self(Message::default_for(&$schema))
            }
        }

        impl TryFrom<Message> for $msg {
            type Error = Error;

            fn try_from(message: Message) -> Result<Self> {
                if message.schema() != &$schema {
                    return Err(Error::SchemaMismatch);
                }
                Ok(Self(message))
            }
        }

        impl From<$msg> for Message {
            fn from(message: $msg) -> Self {
                message.0
            }
        }

        impl $builder {
            /// Builder with every field at its default
            #[inline]
            pub fn new() -> Self {
                Self(MessageBuilder::new(&$schema))
            }

            /// Merge encoded fields; on error the builder is unchanged
            pub fn merge_from_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
                self.0.merge_from_bytes(bytes)?;
                Ok(self)
            }

            /// Overlay the non-default fields and unknown fields of `other`
            pub fn merge_from(&mut self, other: &$msg) -> &mut Self {
                self.0.overlay(&other.0);
                self
            }

            /// Reset every field and drop unknown fields
            pub fn clear(&mut self) -> &mut Self {
                self.0.clear();
                self
            }

            /// Unknown fields accumulated so far
            #[inline]
            pub fn unknown_fields(&self) -> &UnknownFieldSet {
                self.0.unknown_fields()
            }

            /// Append unknown fields after the existing ones
            pub fn merge_unknown_fields(&mut self, unknown_fields: &UnknownFieldSet) -> &mut Self {
                self.0.merge_unknown_fields(unknown_fields);
                self
            }

            /// Replace the unknown fields
            pub fn set_unknown_fields(&mut self, unknown_fields: UnknownFieldSet) -> &mut Self {
                self.0.set_unknown_fields(unknown_fields);
                self
            }

            /// Snapshot into an immutable message
            #[inline]
            pub fn finalize(&self) -> $msg {
                $msg(self.0.finalize())
            }

            /// Borrow the untyped builder
            #[inline]
            pub fn as_builder(&self) -> &MessageBuilder {
                &self.0
            }

            fn reset(&mut self, number: u32, kind: FieldKind) -> &mut Self {
                self.0.store(number, Value::default_for(kind));
                self
            }
        }

        impl Default for $builder {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<&$msg> for $builder {
            fn from(message: &$msg) -> Self {
                message.to_builder()
            }
        }
    };
}

fn utf8_field(field: u32, bytes: &[u8]) -> Result<&str> {
    core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { field })
}

/// Cancel order message utilities
pub mod cancel_order {
    use super::*;

    /// Field numbers
    pub mod fields {
        /// Address of the order owner (bytes)
        pub const SENDER: u32 = 1;
        /// Trading pair symbol (text)
        pub const SYMBOL: u32 = 2;
        /// Id of the order being cancelled (text)
        pub const REFID: u32 = 3;
    }

    /// Schema of `transaction.CancelOrder`
    pub static SCHEMA: MessageSchema = MessageSchema::new(
        "transaction.CancelOrder",
        &[
            FieldSchema::new(fields::SENDER, "sender", FieldKind::Bytes),
            FieldSchema::new(fields::SYMBOL, "symbol", FieldKind::String),
            FieldSchema::new(fields::REFID, "refid", FieldKind::String),
        ],
    );

    /// Request to cancel an open order
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct CancelOrder(Message);

    /// Builder for [`CancelOrder`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Builder(MessageBuilder);

    typed_message!(CancelOrder, Builder, SCHEMA);

    impl CancelOrder {
        /// Address of the order owner
        #[inline]
        pub fn sender(&self) -> &[u8] {
            self.0.bytes(fields::SENDER)
        }

        /// Trading pair symbol, e.g. `BNB_USDT`
        #[inline]
        pub fn symbol(&self) -> &str {
            self.0.string(fields::SYMBOL)
        }

        /// Id of the order being cancelled
        #[inline]
        pub fn refid(&self) -> &str {
            self.0.string(fields::REFID)
        }
    }

    impl Builder {
        /// Staged sender
        pub fn sender(&self) -> &[u8] {
            self.0.bytes(fields::SENDER)
        }

        /// Set the sender address
        pub fn set_sender(&mut self, sender: impl Into<Vec<u8>>) -> &mut Self {
            self.0.store(fields::SENDER, Value::Bytes(sender.into()));
            self
        }

        /// Reset the sender to empty
        pub fn clear_sender(&mut self) -> &mut Self {
            self.reset(fields::SENDER, FieldKind::Bytes)
        }

        /// Staged symbol
        pub fn symbol(&self) -> &str {
            self.0.string(fields::SYMBOL)
        }

        /// Set the trading pair symbol
        pub fn set_symbol(&mut self, symbol: impl Into<String>) -> &mut Self {
            self.0.store(fields::SYMBOL, Value::String(symbol.into()));
            self
        }

        /// Set the symbol from raw bytes, which must be valid UTF-8
        pub fn set_symbol_bytes(&mut self, symbol: &[u8]) -> Result<&mut Self> {
            let symbol = utf8_field(fields::SYMBOL, symbol)?;
            Ok(self.set_symbol(symbol))
        }

        /// Reset the symbol to empty
        pub fn clear_symbol(&mut self) -> &mut Self {
            self.reset(fields::SYMBOL, FieldKind::String)
        }

        /// Staged order reference id
        pub fn refid(&self) -> &str {
            self.0.string(fields::REFID)
        }

        /// Set the id of the order to cancel
        pub fn set_refid(&mut self, refid: impl Into<String>) -> &mut Self {
            self.0.store(fields::REFID, Value::String(refid.into()));
            self
        }

        /// Set the order reference id from raw bytes, which must be valid UTF-8
        pub fn set_refid_bytes(&mut self, refid: &[u8]) -> Result<&mut Self> {
            let refid = utf8_field(fields::REFID, refid)?;
            Ok(self.set_refid(refid))
        }

        /// Reset the order reference id to empty
        pub fn clear_refid(&mut self) -> &mut Self {
            self.reset(fields::REFID, FieldKind::String)
        }
    }
}

/// Standard signature message utilities
pub mod std_signature {
    use super::*;

    /// Field numbers
    pub mod fields {
        /// Signer public key (bytes)
        pub const PUB_KEY: u32 = 1;
        /// Signature over the sign bytes (bytes)
        pub const SIGNATURE: u32 = 2;
        /// Signer account number (int64)
        pub const ACCOUNT_NUMBER: u32 = 3;
        /// Signer sequence for this transaction (int64)
        pub const SEQUENCE: u32 = 4;
    }

    /// Schema of `transaction.StdSignature`
    pub static SCHEMA: MessageSchema = MessageSchema::new(
        "transaction.StdSignature",
        &[
            FieldSchema::new(fields::PUB_KEY, "pub_key", FieldKind::Bytes),
            FieldSchema::new(fields::SIGNATURE, "signature", FieldKind::Bytes),
            FieldSchema::new(fields::ACCOUNT_NUMBER, "account_number", FieldKind::Int64),
            FieldSchema::new(fields::SEQUENCE, "sequence", FieldKind::Int64),
        ],
    );

    /// Signature attached to a transaction
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct StdSignature(Message);

    /// Builder for [`StdSignature`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Builder(MessageBuilder);

    typed_message!(StdSignature, Builder, SCHEMA);

    impl StdSignature {
        /// Signer public key
        #[inline]
        pub fn pub_key(&self) -> &[u8] {
            self.0.bytes(fields::PUB_KEY)
        }

        /// Signature bytes
        #[inline]
        pub fn signature(&self) -> &[u8] {
            self.0.bytes(fields::SIGNATURE)
        }

        /// Signer account number
        #[inline]
        pub fn account_number(&self) -> i64 {
            self.0.int64(fields::ACCOUNT_NUMBER)
        }

        /// Signer sequence number
        #[inline]
        pub fn sequence(&self) -> i64 {
            self.0.int64(fields::SEQUENCE)
        }
    }

    impl Builder {
        /// Staged public key
        pub fn pub_key(&self) -> &[u8] {
            self.0.bytes(fields::PUB_KEY)
        }

        /// Set the signer public key
        pub fn set_pub_key(&mut self, pub_key: impl Into<Vec<u8>>) -> &mut Self {
            self.0.store(fields::PUB_KEY, Value::Bytes(pub_key.into()));
            self
        }

        /// Reset the public key to empty
        pub fn clear_pub_key(&mut self) -> &mut Self {
            self.reset(fields::PUB_KEY, FieldKind::Bytes)
        }

        /// Staged signature
        pub fn signature(&self) -> &[u8] {
            self.0.bytes(fields::SIGNATURE)
        }

        /// Set the signature bytes
        pub fn set_signature(&mut self, signature: impl Into<Vec<u8>>) -> &mut Self {
            self.0.store(fields::SIGNATURE, Value::Bytes(signature.into()));
            self
        }

        /// Reset the signature to empty
        pub fn clear_signature(&mut self) -> &mut Self {
            self.reset(fields::SIGNATURE, FieldKind::Bytes)
        }

        /// Staged account number
        pub fn account_number(&self) -> i64 {
            self.0.int64(fields::ACCOUNT_NUMBER)
        }

        /// Set the signer account number
        pub fn set_account_number(&mut self, account_number: i64) -> &mut Self {
            self.0.store(fields::ACCOUNT_NUMBER, Value::Int64(account_number));
            self
        }

        /// Reset the account number to zero
        pub fn clear_account_number(&mut self) -> &mut Self {
            self.reset(fields::ACCOUNT_NUMBER, FieldKind::Int64)
        }

        /// Staged sequence number
        pub fn sequence(&self) -> i64 {
            self.0.int64(fields::SEQUENCE)
        }

        /// Set the signer sequence number
        pub fn set_sequence(&mut self, sequence: i64) -> &mut Self {
            self.0.store(fields::SEQUENCE, Value::Int64(sequence));
            self
        }

        /// Reset the sequence number to zero
        pub fn clear_sequence(&mut self) -> &mut Self {
            self.reset(fields::SEQUENCE, FieldKind::Int64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use cancel_order::CancelOrder;
    use std_signature::StdSignature;

    #[test]
    fn test_schemas_are_valid() {
        cancel_order::SCHEMA.validate().unwrap();
        std_signature::SCHEMA.validate().unwrap();
    }

    #[test]
    fn test_cancel_order_encode_decode() {
        let order = CancelOrder::builder()
            .set_sender(vec![0x11; 20])
            .set_symbol("BNB_USDT")
            .set_refid("abc123")
            .finalize();

        let bytes = order.encode();
        assert_eq!(bytes.len(), order.encoded_len());

        let decoded = CancelOrder::decode(&bytes).unwrap();
        assert_eq!(decoded.sender(), &[0x11; 20]);
        assert_eq!(decoded.symbol(), "BNB_USDT");
        assert_eq!(decoded.refid(), "abc123");
        assert!(decoded.unknown_fields().is_empty());
        assert_eq!(decoded, order);
    }

    #[test]
    fn test_std_signature_encode_decode() {
        let sig = StdSignature::builder()
            .set_pub_key(vec![2; 33])
            .set_signature(vec![3; 64])
            .set_account_number(12)
            .set_sequence(-1)
            .finalize();

        let decoded = StdSignature::decode(&sig.encode()).unwrap();
        assert_eq!(decoded.pub_key(), &[2; 33]);
        assert_eq!(decoded.signature(), &[3; 64]);
        assert_eq!(decoded.account_number(), 12);
        assert_eq!(decoded.sequence(), -1);
    }

    #[test]
    fn test_builder_getters_and_clear() {
        let mut builder = std_signature::Builder::new();
        builder.set_account_number(5).set_sequence(6);
        assert_eq!(builder.account_number(), 5);
        assert_eq!(builder.sequence(), 6);

        builder.clear_sequence();
        assert_eq!(builder.sequence(), 0);
        assert_eq!(builder.finalize().encode(), [0x18, 5]);

        builder.clear();
        assert_eq!(builder.finalize(), StdSignature::default());
    }

    #[test]
    fn test_typed_merge_from() {
        let mut builder = cancel_order::Builder::new();
        builder.set_symbol("X");

        let source = CancelOrder::builder().set_refid("r").finalize();
        builder.merge_from(&source);

        assert_eq!(builder.symbol(), "X");
        assert_eq!(builder.refid(), "r");
        assert!(builder.sender().is_empty());
    }

    #[test]
    fn test_text_setters_from_bytes() {
        let mut builder = cancel_order::Builder::new();
        builder.set_symbol_bytes(b"BNB_USDT").unwrap();
        builder.set_refid_bytes("r\u{e9}f".as_bytes()).unwrap();
        assert_eq!(builder.symbol(), "BNB_USDT");
        assert_eq!(builder.refid(), "r\u{e9}f");

        assert_eq!(
            builder.set_symbol_bytes(&[0x41, 0xFF]).unwrap_err(),
            Error::InvalidUtf8 { field: cancel_order::fields::SYMBOL }
        );
        assert_eq!(
            builder.set_refid_bytes(&[0xC3]).unwrap_err(),
            Error::InvalidUtf8 { field: cancel_order::fields::REFID }
        );
        // Rejected input leaves the staged values alone.
        assert_eq!(builder.symbol(), "BNB_USDT");
        assert_eq!(builder.refid(), "r\u{e9}f");
    }

    #[test]
    fn test_generic_builder_typed_getters() {
        let mut builder = crate::Builder::new(&std_signature::SCHEMA);
        builder.set_int64(std_signature::fields::SEQUENCE, 7).unwrap();
        builder.set_bytes(std_signature::fields::PUB_KEY, vec![1, 2]).unwrap();
        assert_eq!(builder.int64(std_signature::fields::SEQUENCE), 7);
        assert_eq!(builder.bytes(std_signature::fields::PUB_KEY), &[1, 2]);
        assert_eq!(builder.string(std_signature::fields::PUB_KEY), "");
        assert_eq!(builder.int64(99), 0);
    }

    #[test]
    fn test_try_from_checks_schema() {
        let sig = StdSignature::default().into_message();
        assert_eq!(CancelOrder::try_from(sig.clone()), Err(Error::SchemaMismatch));
        assert!(StdSignature::try_from(sig).is_ok());
    }
}
