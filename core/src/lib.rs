//! aastream-core
//!
//! Decoder and encoder for the archiver appliance raw retrieval stream.
//! Pure Rust. No Python, no PyO3, no I/O.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;
pub mod telemetry;

// Codec layers
pub mod escape;
pub mod records;
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::StreamConfig;
    pub use crate::escape::{join, split};
    pub use crate::records::{
        decode_payload_info, decode_sample, encode_payload_info, encode_sample, encode_samples, encode_stream,
        DecodedSample, FieldAttr, PayloadDescriptor, PayloadType, Sample, SampleValue, ValueKind,
    };
    pub use crate::stream::{DecoderState, OutputBuffers, SampleMeta, StreamDecoder, TypedDecoder, ValueBuffer};
    pub use crate::telemetry::{DecodeCounters, TelemetrySnapshot};
    pub use crate::types::{CodecError, Result};
}
