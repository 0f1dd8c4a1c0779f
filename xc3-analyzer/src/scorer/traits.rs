//! Core traits for document scoring backends.
//!
//! This module defines the `DocumentScorer` trait - the abstraction over
//! whatever produces the four quality scores for a document.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::kind::DocumentKind;
use crate::types::{DocumentInput, ExtractedFields, QualityScores};

/// Error types for scoring operations.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    /// Backend is not available
    #[error("Scorer unavailable: {0}")]
    Unavailable(String),

    /// Request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Parsing error
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Output of a scoring backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerOutput {
    /// Quality scores (clamped by the analyzer afterwards)
    pub scores: QualityScores,
    /// Fields the backend found in the content
    #[serde(default)]
    pub extracted: ExtractedFields,
}

impl ScorerOutput {
    /// Output with scores only.
    pub fn from_scores(scores: QualityScores) -> Self {
        Self {
            scores,
            extracted: ExtractedFields::default(),
        }
    }
}

/// Core trait for document scoring backends.
///
/// Implementations must be side-effect free with respect to other
/// documents: each call sees exactly one document.
#[async_trait]
pub trait DocumentScorer: Send + Sync {
    /// Get the scorer identifier.
    fn id(&self) -> &str;

    /// Check if the scorer is currently available.
    async fn is_available(&self) -> bool;

    /// Score one document.
    async fn score(
        &self,
        document: &DocumentInput,
        kind: DocumentKind,
    ) -> Result<ScorerOutput, ScorerError>;
}
