//! Core types for project verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fraud::FraudRiskReport;
use xc3_analyzer::DocumentQualityProfile;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Project details declared at registration time.
///
/// Missing fields deserialize to empty values; they lower the metadata
/// score rather than failing the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub name: String,
    pub description: String,
    pub location: String,
    /// Crediting methodology (REDD+, CDM, VCS, Gold Standard, CAR, ACR)
    pub methodology: String,
    pub vintage_year: i32,
    /// Claimed carbon volume in tCO2e
    #[serde(rename = "estimatedTCO2e")]
    pub estimated_tco2e: f64,
}

/// Result of aggregating all document profiles for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct VerificationResult {
    /// Overall verification confidence (0.0 - 1.0)
    pub score: f64,
    /// How far the score itself can be trusted (0.0 - 0.95)
    pub confidence: f64,
    /// One-sentence summary for the score band
    pub explanation: String,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    /// Scoring logic that produced this result
    pub model_name: String,
    pub processing_time_ms: u64,
    /// CIDv1 of the canonical (metadata, profiles) tuple
    pub artifacts_hash: String,
}

/// Why a document was left out of aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// No content was uploaded
    Empty,
    /// Analysis missed its deadline
    TimedOut,
    /// Scorer failed
    Failed(String),
}

/// A document that did not contribute to the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ExcludedDocument {
    /// 1-based position in the submitted document list
    pub position: usize,
    pub file_name: String,
    pub reason: ExclusionReason,
}

impl ExcludedDocument {
    /// Issue string reported for this document.
    pub fn issue(&self) -> String {
        match &self.reason {
            ExclusionReason::Empty => format!(
                "Document {} ({}) is empty and was skipped",
                self.position, self.file_name
            ),
            ExclusionReason::TimedOut => {
                format!("Document {} could not be analyzed in time", self.position)
            }
            ExclusionReason::Failed(error) => format!(
                "Document {} could not be analyzed: {}",
                self.position, error
            ),
        }
    }
}

/// Everything one verification call produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Unique run identifier
    pub verification_id: String,
    /// When the run finished
    pub verified_at: DateTime<Utc>,
    pub result: VerificationResult,
    pub fraud: FraudRiskReport,
    /// Profiles that were aggregated
    pub profiles: Vec<DocumentQualityProfile>,
    /// Documents left out of aggregation
    pub excluded: Vec<ExcludedDocument>,
}

/// Error types for project verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// No analyzable documents
    #[error("Insufficient input: at least one analyzable document is required")]
    InsufficientInput,

    /// Malformed request at the wire boundary
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VerifyError {
    /// Message suitable for showing to the uploader.
    pub fn user_message(&self) -> String {
        match self {
            VerifyError::InsufficientInput => {
                "Please upload at least one supporting document.".to_string()
            }
            VerifyError::InvalidRequest(reason) => format!("The request could not be read: {}", reason),
            VerifyError::Config(_) => "Verification is temporarily unavailable.".to_string(),
        }
    }

    /// Whether the caller caused the error (HTTP 4xx).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, VerifyError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_wire_names() {
        let metadata: ProjectMetadata = serde_json::from_value(serde_json::json!({
            "name": "Mangrove Restoration",
            "location": "Kenya",
            "methodology": "VCS",
            "vintageYear": 2022,
            "estimatedTCO2e": 12000.5
        }))
        .unwrap();

        assert_eq!(metadata.vintage_year, 2022);
        assert_eq!(metadata.estimated_tco2e, 12000.5);
        // Missing description degrades rather than fails
        assert!(metadata.description.is_empty());

        let value = serde_json::to_value(&metadata).unwrap();
        assert!(value.get("estimatedTCO2e").is_some());
        assert!(value.get("vintageYear").is_some());
    }

    #[test]
    fn test_exclusion_issues() {
        let timed_out = ExcludedDocument {
            position: 3,
            file_name: "scan.png".to_string(),
            reason: ExclusionReason::TimedOut,
        };
        assert_eq!(timed_out.issue(), "Document 3 could not be analyzed in time");

        let empty = ExcludedDocument {
            position: 1,
            file_name: "blank.pdf".to_string(),
            reason: ExclusionReason::Empty,
        };
        assert!(empty.issue().contains("blank.pdf"));
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            VerifyError::InsufficientInput.user_message(),
            "Please upload at least one supporting document."
        );
        assert!(VerifyError::InsufficientInput.is_client_error());
        assert!(!VerifyError::Config("x".to_string()).is_client_error());
    }
}
