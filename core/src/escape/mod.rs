//! Escaped-line framing for the archiver wire format.
//!
//! Responsibilities:
//! - Escape raw record bytes and terminate them with a line feed
//! - Find record boundaries in a growing buffer and unescape one record
//! - Batch split / join helpers
//!
//! Non-responsibilities:
//! - Record schemas (see `records`)
//! - Decoder state (see `stream`)

pub mod encode;
pub mod decode;

pub use encode::{escape_into, escape_line, join};
pub use decode::{split, unescape_line};
