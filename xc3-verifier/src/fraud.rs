//! Rule-based fraud risk assessment.
//!
//! Runs independently of the project verifier over the same inputs.
//! Every rule is evaluated; penalties add up to the risk score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FraudConfig;
use crate::types::ProjectMetadata;
use crate::verifier::{average, round_score};
use xc3_analyzer::types::clamp_unit;
use xc3_analyzer::DocumentQualityProfile;

#[cfg(feature = "typescript")]
use ts_rs::TS;

pub const FLAG_INSUFFICIENT_DOCUMENTATION: &str = "Insufficient documentation";
pub const FLAG_HIGH_CARBON_VOLUME: &str = "Unusually high carbon volume claimed";
pub const FLAG_LOW_AUTHENTICITY: &str = "Low document authenticity scores";
pub const FLAG_INCONSISTENT_DATA: &str = "Inconsistent data across documents";

/// Fraud risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Level for a risk score: low < medium_risk_at <= medium < high_risk_at <= high.
    pub fn from_score(score: f64, config: &FraudConfig) -> Self {
        if score >= config.high_risk_at {
            RiskLevel::High
        } else if score >= config.medium_risk_at {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Output of the fraud detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct FraudRiskReport {
    pub risk_level: RiskLevel,
    /// Triggered rules, in rule order
    pub flags: Vec<String>,
    /// Sum of penalties, rounded to 4 places and clamped to [0, 1]
    pub risk_score: f64,
}

/// Detector for suspicious project submissions.
pub struct FraudDetector {
    config: FraudConfig,
}

impl FraudDetector {
    /// Create a new detector.
    pub fn new(config: FraudConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &FraudConfig {
        &self.config
    }

    /// Assess the fraud risk of a submission.
    pub fn assess_risk(
        &self,
        metadata: &ProjectMetadata,
        profiles: &[DocumentQualityProfile],
    ) -> FraudRiskReport {
        let mut flags = Vec::new();
        let mut risk_score = 0.0;

        if profiles.len() < self.config.min_documents {
            flags.push(FLAG_INSUFFICIENT_DOCUMENTATION.to_string());
            risk_score += self.config.insufficient_documentation_penalty;
        }

        if metadata.estimated_tco2e > self.config.high_volume_tco2e {
            flags.push(FLAG_HIGH_CARBON_VOLUME.to_string());
            risk_score += self.config.high_volume_penalty;
        }

        let avg_authenticity = average(profiles, |p| p.authenticity);
        if avg_authenticity < self.config.authenticity_floor {
            flags.push(FLAG_LOW_AUTHENTICITY.to_string());
            risk_score += self.config.low_authenticity_penalty;
        }

        let avg_consistency = average(profiles, |p| p.consistency);
        if avg_consistency < self.config.consistency_floor {
            flags.push(FLAG_INCONSISTENT_DATA.to_string());
            risk_score += self.config.inconsistency_penalty;
        }

        // Rounding keeps sums like 0.2 + 0.15 + 0.25 on the right side of a cut-off
        let risk_score = clamp_unit(round_score(risk_score));
        let risk_level = RiskLevel::from_score(risk_score, &self.config);

        debug!(
            risk_score = risk_score,
            risk_level = risk_level.as_str(),
            flag_count = flags.len(),
            "Fraud risk assessed"
        );

        FraudRiskReport {
            risk_level,
            flags,
            risk_score,
        }
    }
}

impl Default for FraudDetector {
    fn default() -> Self {
        Self::new(FraudConfig::default())
    }
}
