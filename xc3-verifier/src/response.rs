//! Outbound verification response shapes.

use serde::{Deserialize, Serialize};

use crate::fraud::RiskLevel;
use crate::types::{VerificationReport, VerifyError};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Verification response returned to the registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub verification_id: String,
    pub score: f64,
    pub confidence: f64,
    pub explanation: String,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    /// Model name of the scoring logic
    pub model: String,
    /// Milliseconds spent on the whole pipeline
    pub processing_time: u64,
    pub artifacts_hash: String,
    pub fraud: FraudSummary,
}

/// Fraud section of the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FraudSummary {
    pub risk_level: RiskLevel,
    pub flags: Vec<String>,
    pub score: f64,
}

impl VerifyResponse {
    /// Build the response for a finished verification.
    pub fn from_report(report: &VerificationReport) -> Self {
        let result = &report.result;

        Self {
            verification_id: report.verification_id.clone(),
            score: result.score,
            confidence: result.confidence,
            explanation: result.explanation.clone(),
            issues: result.issues.clone(),
            strengths: result.strengths.clone(),
            model: result.model_name.clone(),
            processing_time: result.processing_time_ms,
            artifacts_hash: result.artifacts_hash.clone(),
            fraud: FraudSummary {
                risk_level: report.fraud.risk_level,
                flags: report.fraud.flags.clone(),
                score: report.fraud.risk_score,
            },
        }
    }
}

impl From<&VerificationReport> for VerifyResponse {
    fn from(report: &VerificationReport) -> Self {
        Self::from_report(report)
    }
}

/// Error body for failed verification calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ErrorResponse {
    /// Technical description
    pub error: String,
    /// Message for the uploader
    pub message: String,
    /// Suggested HTTP status code
    pub status: u16,
}

impl From<&VerifyError> for ErrorResponse {
    fn from(error: &VerifyError) -> Self {
        Self {
            error: error.to_string(),
            message: error.user_message(),
            status: if error.is_client_error() { 400 } else { 500 },
        }
    }
}
