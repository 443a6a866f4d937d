//! Configuration for Allocation Ordering Subsystem

use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;

/// Ordering configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Circuits enumerated one by one before switching to SCC analysis
    /// for the remaining cyclic vertices (anti-DoS)
    pub max_enumerated_circuits: usize,
    /// Emit per-vertex and per-edge diagnostic lines
    pub trace_graph: bool,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            max_enumerated_circuits: 100_000,
            trace_graph: true,
        }
    }
}

impl OrderingConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_ORDERING_MAX_CIRCUITS`: circuit enumeration budget (default: 100000)
    /// - `QC_ORDERING_TRACE_GRAPH`: graph construction trace lines (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_enumerated_circuits = match env::var("QC_ORDERING_MAX_CIRCUITS") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "QC_ORDERING_MAX_CIRCUITS".to_string(),
                value,
            })?,
            Err(_) => defaults.max_enumerated_circuits,
        };

        let trace_graph = env::var("QC_ORDERING_TRACE_GRAPH")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(defaults.trace_graph);

        let config = Self {
            max_enumerated_circuits,
            trace_graph,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_enumerated_circuits == 0 {
            return Err(ConfigError::Invalid(
                "max_enumerated_circuits cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_max_enumerated_circuits(mut self, max: usize) -> Self {
        self.max_enumerated_circuits = max;
        self
    }

    pub fn with_trace_graph(mut self, enabled: bool) -> Self {
        self.trace_graph = enabled;
        self
    }
}
