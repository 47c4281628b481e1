//! telemetry/mod.rs
//! Decode telemetry: counters, stage timers and immutable snapshots.
//!
//! - Counters are plain integers owned by one decoder; no atomics.
//! - Snapshots are taken on demand and never mutate decoder state.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
