//! telemetry/timers.rs
//! Stage timers for the decode loop.

use std::collections::{hash_map, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Unescape,
    Decode,
    Flush,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Unescape => "unescape",
            Stage::Decode => "decode",
            Stage::Flush => "flush",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    times: HashMap<Stage, Duration>,
}

impl StageTimes {
    /// Add duration to a stage (accumulates if already present).
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_insert(Duration::ZERO) += dur;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or(Duration::ZERO)
    }

    pub fn get_ms(&self, stage: Stage) -> f64 {
        self.get(stage).as_secs_f64() * 1_000.0
    }

    pub fn get_us(&self, stage: Stage) -> f64 {
        self.get(stage).as_secs_f64() * 1_000_000.0
    }

    /// Sum all stage durations.
    pub fn total(&self) -> Duration {
        self.times.values().copied().sum()
    }

    /// Check if all expected stages were measured.
    pub fn has_all(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.times.contains_key(s))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Stage, &Duration)> {
        self.times.iter()
    }
}

impl<'a> IntoIterator for &'a StageTimes {
    type Item = (&'a Stage, &'a Duration);
    type IntoIter = hash_map::Iter<'a, Stage, Duration>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter()
    }
}

#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    pub start_time: Instant,
    pub end_time: Option<Instant>,
    pub stage_times: StageTimes,
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            stage_times: StageTimes::default(),
        }
    }

    pub fn finish(&mut self) {
        if self.end_time.is_none() {
            self.end_time = Some(Instant::now());
        }
    }

    pub fn add_stage_time(&mut self, stage: Stage, dur: Duration) {
        self.stage_times.add(stage, dur);
    }

    /// Run `f` and charge its wall time to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let out = f();
        self.stage_times.add(stage, t.elapsed());
        out
    }

    pub fn elapsed(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_times_accumulate() {
        let mut t = StageTimes::default();
        t.add(Stage::Decode, Duration::from_micros(300));
        t.add(Stage::Decode, Duration::from_micros(200));
        t.add(Stage::Flush, Duration::from_micros(100));
        assert_eq!(t.get(Stage::Decode), Duration::from_micros(500));
        assert_eq!(t.total(), Duration::from_micros(600));
        assert!(t.has_all(&[Stage::Decode, Stage::Flush]));
        assert!(!t.has_all(&[Stage::Unescape]));
    }

    #[test]
    fn finish_freezes_elapsed() {
        let mut timer = TelemetryTimer::new();
        timer.finish();
        let a = timer.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(timer.elapsed(), a);
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Unescape.to_string(), "unescape");
    }
}
