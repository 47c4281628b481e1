//! types.rs
//! Unified codec error.
//!
//! - One enum for every layer (escape, record, typed decoder, stream decoder).
//! - `From` impls let `?` cross the prost / serde boundaries.
//! - Messages are stable; they surface through the Python binding unchanged.

use thiserror::Error;

use crate::utils::fmt_bytes;

#[derive(Debug, Error)]
pub enum CodecError {
    /// `ESCAPE` followed by anything other than 0x01/0x02/0x03.
    /// `code` is `None` when the escape is the last byte of the line.
    #[error("invalid escape code {} at offset {offset}", fmt_code(.code))]
    Framing { offset: usize, code: Option<u8> },

    /// Bytes are not a well-formed record of the expected schema.
    #[error("parse error: {0}")]
    Parse(String),

    /// Final chunk left bytes that never formed a complete record.
    #[error("truncated stream: {} trailing bytes ({})", .leftover.len(), fmt_bytes(.leftover))]
    TruncatedStream { leftover: Vec<u8> },

    /// Payload type tag outside the fixed set.
    #[error("unsupported payload type: {raw}")]
    UnsupportedPayloadType { raw: i32 },

    /// Scalar/array misuse for a known payload type.
    #[error("payload type {ptype} does not support {what}")]
    TypeMismatch { ptype: &'static str, what: &'static str },

    /// `process()` after the final chunk was already submitted.
    #[error("stream already closed")]
    StreamClosed,

    /// Caller-provided output buffers do not match the pending samples.
    #[error("output buffer mismatch: {0}")]
    BufferMismatch(String),

    /// Output pairs cannot be concatenated.
    #[error("incompatible output: {0}")]
    IncompatibleOutput(String),

    #[error("config error: {0}")]
    Config(String),
}

fn fmt_code(code: &Option<u8>) -> String {
    match code {
        Some(c) => format!("0x{:02x}", c),
        None => "<end of line>".to_string(),
    }
}

impl From<prost::DecodeError> for CodecError {
    fn from(e: prost::DecodeError) -> Self {
        CodecError::Parse(e.to_string())
    }
}

impl From<prost::EncodeError> for CodecError {
    fn from(e: prost::EncodeError) -> Self {
        CodecError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Config(e.to_string())
    }
}

pub type Result<T, E = CodecError> = std::result::Result<T, E>;
