//! stream/mod.rs
//! Typed accumulation and the chunked stream state machine.
//!
//! Layers:
//! - `output`  : columnar buffers produced by a flush
//! - `typed`   : per-type sample accumulator
//! - `decoder` : descriptor/sample state machine over escaped chunks

pub mod output;
pub mod typed;
pub mod decoder;

pub use output::{FixedStr, OutputBuffers, SampleMeta, ValueBuffer};
pub use typed::TypedDecoder;
pub use decoder::{DecoderState, StreamDecoder};
