//! telemetry/counters.rs
//! Mutable counters collected while a stream is decoded.
//!
//! Converted into an immutable `TelemetrySnapshot` on request.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeCounters {
    pub chunks: u64,
    pub bytes_in: u64,
    /// Framed records, blank terminators included.
    pub lines: u64,
    pub descriptors: u64,
    /// Samples read off the wire (gap markers excluded).
    pub samples: u64,
    pub gap_markers: u64,
    pub flushes: u64,
    pub rows_out: u64,
}

impl DecodeCounters {
    /// Record one submitted chunk.
    pub fn add_chunk(&mut self, len: usize) {
        self.chunks += 1;
        self.bytes_in += len as u64;
    }

    /// Record one decoded sample and the markers it produced.
    pub fn add_sample(&mut self, gap_markers: usize) {
        self.samples += 1;
        self.gap_markers += gap_markers as u64;
    }

    pub fn add_flush(&mut self, rows: usize) {
        self.flushes += 1;
        self.rows_out += rows as u64;
    }

    /// Rows a flush would emit if everything pending were flushed now.
    pub fn rows_total(&self) -> u64 {
        self.samples + self.gap_markers
    }

    pub fn merge(&mut self, other: &DecodeCounters) {
        self.chunks += other.chunks;
        self.bytes_in += other.bytes_in;
        self.lines += other.lines;
        self.descriptors += other.descriptors;
        self.samples += other.samples;
        self.gap_markers += other.gap_markers;
        self.flushes += other.flushes;
        self.rows_out += other.rows_out;
    }
}

impl AddAssign for DecodeCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
