//! Analyzer configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for document analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum documents analyzed concurrently within one verification
    pub max_concurrent_documents: usize,
    /// Per-document analysis deadline (ms)
    pub document_timeout_ms: u64,
    /// Seed for the simulated scorer; `None` draws from entropy
    pub simulation_seed: Option<u64>,
    /// Artificial per-document latency of the simulated scorer (ms)
    pub simulated_latency_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 8,
            document_timeout_ms: 30_000,
            simulation_seed: None,
            simulated_latency_ms: 0,
        }
    }
}

impl AnalyzerConfig {
    /// Config with a fixed simulation seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            simulation_seed: Some(seed),
            ..Default::default()
        }
    }

    /// Per-document deadline as a duration.
    pub fn document_timeout(&self) -> Duration {
        Duration::from_millis(self.document_timeout_ms)
    }

    /// Simulated latency as a duration.
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
