//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! There are deliberately no defaults: the endpoint list and the timeouts
//! are caller-supplied configuration, not baked-in values.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the submission CLI.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Candidate endpoints, tried strictly in order.
    pub endpoints: Vec<String>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeoutConfig {
    /// Per-attempt delivery timeout in milliseconds.
    pub attempt_ms: u64,

    /// Per-endpoint probe timeout in milliseconds (diagnostics).
    pub probe_ms: u64,
}

impl TimeoutConfig {
    /// Per-attempt delivery timeout as a `Duration`.
    pub fn attempt(&self) -> Duration {
        Duration::from_millis(self.attempt_ms)
    }

    /// Per-endpoint probe timeout as a `Duration`.
    pub fn probe(&self) -> Duration {
        Duration::from_millis(self.probe_ms)
    }
}
