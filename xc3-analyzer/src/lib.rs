//! XC3 Analyzer - per-document quality analysis
//!
//! Turns one uploaded project document into a [`DocumentQualityProfile`]:
//! - Declared MIME type classification against a supported allow-list
//! - Trait-based scoring backends (simulated, remote, mock)
//! - Deterministic extraction of location/methodology hints
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           DocumentAnalyzer              │
//! │  (classify, score, clamp, extract)      │
//! └────────────────┬────────────────────────┘
//!                  │
//!      ┌───────────┼───────────┐
//!      ▼           ▼           ▼
//! ┌──────────┐ ┌──────────┐ ┌──────────┐
//! │Simulated │ │ Remote   │ │  Mock    │
//! │ Scorer   │ │ Scorer   │ │ Scorer   │
//! └──────────┘ └──────────┘ └──────────┘
//! ```

pub mod analyzer;
pub mod config;
pub mod extract;
pub mod kind;
pub mod scorer;
pub mod types;

// Re-export main types for convenience
pub use analyzer::{AnalysisError, DocumentAnalyzer};
pub use config::AnalyzerConfig;
pub use extract::{extract_location, extract_methodology};
pub use kind::DocumentKind;
pub use scorer::{
    DocumentScorer, MockScorer, RemoteScorer, ScorerError, ScorerOutput, SimulatedScorer,
};
pub use types::*;
