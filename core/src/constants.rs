//! constants.rs
//! Wire-level constants shared by the escape codec, record codec and decoders.
//!
//! These values are part of the contract with the archiving server and must
//! not be changed per instance.

/// Escape marker. A literal 0x1B in a record is written as `ESC 0x01`.
pub const ESCAPE: u8 = 0x1B;
/// Record terminator. A literal 0x0A in a record is written as `ESC 0x02`.
pub const LINE_FEED: u8 = 0x0A;
/// A literal 0x0D in a record is written as `ESC 0x03`.
pub const CARRIAGE_RETURN: u8 = 0x0D;

/// Escape codes following an `ESCAPE` byte.
pub mod escape_codes {
    pub const ESCAPE: u8 = 0x01;
    pub const LINE_FEED: u8 = 0x02;
    pub const CARRIAGE_RETURN: u8 = 0x03;
}

/// Fixed width (bytes) of one string / byte-string element in an output row.
pub const FIXED_STRING_WIDTH: usize = 40;

/// Field attribute carrying the epoch seconds of a disconnect.
pub const CNXLOST_ATTR: &str = "cnxlostepsecs";

/// Severity assigned to synthesized gap markers.
/// Reserved alarm code: "possible missed events due to a connection loss".
pub const GAP_SEVERITY: i32 = 3904;

/// Default flush threshold in samples (the client's historical `chunksize`).
pub const DEFAULT_THRESHOLD: usize = 256 * 1024;

/// Consolidate back-to-back runs of the same type/year by default.
pub const DEFAULT_CONSOLIDATE: bool = true;

/// Years whose Jan 1 fits in u32 epoch seconds.
pub const MIN_YEAR: i32 = 1970;
pub const MAX_YEAR: i32 = 2106;
