//! config.rs
//! Stream decoder configuration.
//!
//! - Defaults mirror the archiver client's retrieval defaults.
//! - Missing JSON keys take defaults; unknown keys are rejected.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONSOLIDATE, DEFAULT_THRESHOLD};
use crate::types::{CodecError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamConfig {
    /// Pending sample count (gap markers included) that forces a flush.
    pub threshold: usize,
    /// Keep accumulating across back-to-back runs of the same type and year.
    pub consolidate: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            consolidate: DEFAULT_CONSOLIDATE,
        }
    }
}

impl StreamConfig {
    pub fn new(threshold: usize, consolidate: bool) -> Self {
        Self { threshold, consolidate }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_consolidate(mut self, consolidate: bool) -> Self {
        self.consolidate = consolidate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(CodecError::Config("threshold must be at least 1".into()));
        }
        Ok(())
    }

    /// Parse and validate a JSON fragment.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: StreamConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
