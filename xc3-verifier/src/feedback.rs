//! Human-readable feedback for verification scores.
//!
//! Explanations are a fixed lookup over score bands; issues and
//! strengths are keyed off the sub-scores and the document count.

use serde::{Deserialize, Serialize};

use crate::config::FeedbackTiers;

/// Sub-scores below this produce an issue.
const ISSUE_BELOW: f64 = 0.7;

/// Sub-scores at or above this produce a strength.
const STRENGTH_AT: f64 = 0.85;

const METADATA_ISSUE_BELOW: f64 = 0.85;
const METADATA_STRENGTH_AT: f64 = 0.95;

/// Fewer documents than this is reported as an issue.
const FEW_DOCUMENTS: usize = 3;

/// This many documents or more is reported as a strength.
const MANY_DOCUMENTS: usize = 4;

/// Score band of a verification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTier {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl FeedbackTier {
    /// Band for a final score.
    pub fn from_score(score: f64, tiers: &FeedbackTiers) -> Self {
        if score >= tiers.excellent {
            Self::Excellent
        } else if score >= tiers.good {
            Self::Good
        } else if score >= tiers.acceptable {
            Self::Acceptable
        } else {
            Self::Poor
        }
    }

    /// Summary sentence for this band.
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::Excellent => {
                "Excellent documentation quality with strong verification indicators across all submitted documents."
            }
            Self::Good => {
                "Good documentation quality; the project meets verification requirements with minor gaps."
            }
            Self::Acceptable => {
                "Acceptable documentation quality; additional review is recommended before approval."
            }
            Self::Poor => {
                "Documentation quality is insufficient for reliable verification and needs significant improvement."
            }
        }
    }
}

/// Intermediate values of one verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub avg_readability: f64,
    pub avg_completeness: f64,
    pub avg_authenticity: f64,
    pub avg_consistency: f64,
    pub document_score: f64,
    pub metadata_score: f64,
    pub cross_reference_score: f64,
    pub final_score: f64,
    pub document_count: usize,
    /// Documents whose type had no content model
    pub unsupported_count: usize,
}

/// Issues for a breakdown, in a fixed order.
pub fn issues(breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut issues = Vec::new();

    if breakdown.avg_readability < ISSUE_BELOW {
        issues.push("Some documents have poor readability; consider uploading higher quality scans".to_string());
    }
    if breakdown.avg_completeness < ISSUE_BELOW {
        issues.push("Documents appear incomplete; ensure all required sections are included".to_string());
    }
    if breakdown.avg_authenticity < ISSUE_BELOW {
        issues.push("Document authenticity could not be fully confirmed".to_string());
    }
    if breakdown.avg_consistency < ISSUE_BELOW {
        issues.push("Inconsistent information detected between documents".to_string());
    }
    if breakdown.metadata_score < METADATA_ISSUE_BELOW {
        issues.push("Project metadata is incomplete or missing key details".to_string());
    }
    if breakdown.document_count < FEW_DOCUMENTS {
        issues.push("Limited documentation provided; additional supporting documents are recommended".to_string());
    }
    if breakdown.unsupported_count > 0 {
        issues.push(format!(
            "{} document(s) use an unsupported format and could not be fully analyzed",
            breakdown.unsupported_count
        ));
    }

    issues
}

/// Strengths for a breakdown, in a fixed order.
pub fn strengths(breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut strengths = Vec::new();

    if breakdown.avg_readability >= STRENGTH_AT {
        strengths.push("Documents are clear and highly readable".to_string());
    }
    if breakdown.avg_completeness >= STRENGTH_AT {
        strengths.push("Comprehensive documentation covering required sections".to_string());
    }
    if breakdown.avg_authenticity >= STRENGTH_AT {
        strengths.push("Strong document authenticity indicators".to_string());
    }
    if breakdown.avg_consistency >= STRENGTH_AT {
        strengths.push("Data is consistent across documents".to_string());
    }
    if breakdown.metadata_score >= METADATA_STRENGTH_AT {
        strengths.push("Complete and well-specified project metadata".to_string());
    }
    if breakdown.cross_reference_score > crate::verifier::CROSS_REFERENCE_BASE {
        strengths.push("Documents corroborate the declared project location or methodology".to_string());
    }
    if breakdown.document_count >= MANY_DOCUMENTS {
        strengths.push("Extensive supporting documentation provided".to_string());
    }

    strengths
}
