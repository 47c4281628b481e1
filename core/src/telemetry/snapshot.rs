//! telemetry/snapshot.rs
//!
//! Immutable view of a decoder's counters and timings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::DecodeCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: DecodeCounters,
    /// Rows decoded (samples plus gap markers) per second of wall time.
    pub samples_per_sec: f64,
    /// Mean escaped wire bytes per sample read.
    pub bytes_per_sample: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &DecodeCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let samples_per_sec = if elapsed.as_secs_f64() > 0.0 {
            counters.rows_total() as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let bytes_per_sample = if counters.samples > 0 {
            counters.bytes_in as f64 / counters.samples as f64
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            samples_per_sec,
            bytes_per_sample,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Internal invariants: never more rows out than decoded, stage time
    /// bounded by wall time.
    pub fn sanity_check(&self) -> bool {
        self.counters.rows_out <= self.counters.rows_total() && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> crate::types::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
