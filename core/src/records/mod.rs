//! records — per-payload-type encode/decode of sample and descriptor records.
//!
//! All functions here work on unescaped record bytes; framing lives in
//! `escape`.

pub mod proto;
pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::{encode_payload_info, encode_sample, encode_samples, encode_stream};
pub use decode::{decode_payload_info, decode_sample};
