//! Error types for the txwire codec

use thiserror::Error;

use crate::schema::FieldKind;

/// Errors that can occur while decoding, merging or encoding messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Varint longer than 10 bytes, or input ended inside a varint
    #[error("malformed varint")]
    MalformedVarint,
    /// A read would run past the end of the buffer
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// Wire type that cannot be parsed or skipped
    #[error("unknown wire type {0}")]
    UnknownWireType(u8),
    /// Tag carries field number zero or a number above the maximum
    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),
    /// Text field payload is not valid UTF-8
    #[error("invalid UTF-8 in text field {field}")]
    InvalidUtf8 {
        /// Field number of the offending field
        field: u32,
    },
    /// Field number not present in the message schema
    #[error("no field {0} in message schema")]
    NoSuchField(u32),
    /// Value kind does not match the schema's kind for the field
    #[error("field {field} expects a {expected:?} value")]
    KindMismatch {
        /// Field number being set
        field: u32,
        /// Kind declared by the schema
        expected: FieldKind,
    },
    /// Source and target messages use different schemas
    #[error("message schemas do not match")]
    SchemaMismatch,
    /// Length prefix of a framed message exceeds the size limit
    #[error("message exceeds size limit")]
    MessageTooLarge,
    /// Output buffer too small for the encoded message
    #[error("buffer too small for operation")]
    ShortBuffer,
}

impl Error {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            Error::MalformedVarint => "malformed varint",
            Error::UnexpectedEof => "unexpected end of input",
            Error::UnknownWireType(_) => "unknown wire type",
            Error::InvalidFieldNumber(_) => "invalid field number",
            Error::InvalidUtf8 { .. } => "invalid UTF-8 in text field",
            Error::NoSuchField(_) => "no such field in message schema",
            Error::KindMismatch { .. } => "value kind does not match schema",
            Error::SchemaMismatch => "message schemas do not match",
            Error::MessageTooLarge => "message exceeds size limit",
            Error::ShortBuffer => "buffer too small for operation",
        }
    }

    /// Whether the error came from malformed input bytes
    pub const fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedVarint
                | Error::UnexpectedEof
                | Error::UnknownWireType(_)
                | Error::InvalidFieldNumber(_)
                | Error::InvalidUtf8 { .. }
                | Error::MessageTooLarge
        )
    }
}

/// Result type alias for txwire operations
pub type Result<T> = core::result::Result<T, Error>;
