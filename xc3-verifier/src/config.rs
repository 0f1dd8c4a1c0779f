//! Configuration for the verification pipeline.
//!
//! Feedback tiers and fraud thresholds are policy constants that have not
//! been calibrated against real fraud data, so they live here rather than
//! in the scoring code.

use serde::{Deserialize, Serialize};

use crate::types::{Result, VerifyError};
use xc3_analyzer::AnalyzerConfig;

/// Default model identifier attached to every verification result.
pub const DEFAULT_MODEL_NAME: &str = "xc3-local-verifier-v1";

/// Configuration for the whole verification pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Xc3Config {
    /// Document analysis configuration
    pub analyzer: AnalyzerConfig,
    /// Aggregate scoring configuration
    pub verifier: VerifierConfig,
    /// Fraud rule configuration
    pub fraud: FraudConfig,
}

impl Xc3Config {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Check that thresholds are ordered and in range.
    pub fn validate(&self) -> Result<()> {
        if self.analyzer.max_concurrent_documents == 0 {
            return Err(VerifyError::Config(
                "analyzer.max_concurrent_documents must be at least 1".to_string(),
            ));
        }
        if self.verifier.model_name.trim().is_empty() {
            return Err(VerifyError::Config("verifier.model_name must not be empty".to_string()));
        }
        self.verifier.tiers.validate()?;
        self.fraud.validate()
    }
}

/// Configuration for the project verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Identifies the scoring logic that produced a result
    pub model_name: String,
    /// Score bands for feedback
    pub tiers: FeedbackTiers,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            tiers: FeedbackTiers::default(),
        }
    }
}

/// Lower bounds of the feedback tiers. Scores below `acceptable` are poor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackTiers {
    pub excellent: f64,
    pub good: f64,
    pub acceptable: f64,
}

impl Default for FeedbackTiers {
    fn default() -> Self {
        Self {
            excellent: 0.85,
            good: 0.75,
            acceptable: 0.65,
        }
    }
}

impl FeedbackTiers {
    fn validate(&self) -> Result<()> {
        let ordered = 0.0 <= self.acceptable
            && self.acceptable < self.good
            && self.good < self.excellent
            && self.excellent <= 1.0;

        if ordered {
            Ok(())
        } else {
            Err(VerifyError::Config(format!(
                "feedback tiers must satisfy 0 <= acceptable < good < excellent <= 1, got {} / {} / {}",
                self.acceptable, self.good, self.excellent
            )))
        }
    }
}

/// Configuration for the fraud detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudConfig {
    /// Fewer documents than this is flagged
    pub min_documents: usize,
    pub insufficient_documentation_penalty: f64,
    /// Claims above this volume (tCO2e) are flagged
    pub high_volume_tco2e: f64,
    pub high_volume_penalty: f64,
    /// Average authenticity below this is flagged
    pub authenticity_floor: f64,
    pub low_authenticity_penalty: f64,
    /// Average consistency below this is flagged
    pub consistency_floor: f64,
    pub inconsistency_penalty: f64,
    /// Risk scores at or above this are medium
    pub medium_risk_at: f64,
    /// Risk scores at or above this are high
    pub high_risk_at: f64,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            min_documents: 2,
            insufficient_documentation_penalty: 0.20,
            high_volume_tco2e: 100_000.0,
            high_volume_penalty: 0.15,
            authenticity_floor: 0.6,
            low_authenticity_penalty: 0.25,
            consistency_floor: 0.5,
            inconsistency_penalty: 0.30,
            medium_risk_at: 0.3,
            high_risk_at: 0.6,
        }
    }
}

impl FraudConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0 < self.medium_risk_at && self.medium_risk_at < self.high_risk_at) {
            return Err(VerifyError::Config(format!(
                "fraud risk cut-offs must satisfy 0 < medium < high, got {} / {}",
                self.medium_risk_at, self.high_risk_at
            )));
        }

        let penalties = [
            self.insufficient_documentation_penalty,
            self.high_volume_penalty,
            self.low_authenticity_penalty,
            self.inconsistency_penalty,
        ];
        if penalties.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(VerifyError::Config(
                "fraud penalties must be finite and non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Xc3Config::default();
        assert_eq!(config.verifier.model_name, DEFAULT_MODEL_NAME);
        assert_eq!(config.verifier.tiers.excellent, 0.85);
        assert_eq!(config.fraud.high_risk_at, 0.6);
        assert_eq!(config.analyzer.max_concurrent_documents, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = Xc3Config::default();
        config.analyzer.simulation_seed = Some(99);
        config.verifier.model_name = "xc3-test".to_string();

        let yaml = config.to_yaml().unwrap();
        let parsed = Xc3Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.analyzer.simulation_seed, Some(99));
        assert_eq!(parsed.verifier.model_name, "xc3-test");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
fraud:
  high_volume_tco2e: 250000
verifier:
  tiers:
    excellent: 0.9
"#;
        let config = Xc3Config::from_yaml(yaml).unwrap();
        assert_eq!(config.fraud.high_volume_tco2e, 250_000.0);
        assert_eq!(config.fraud.min_documents, 2);
        assert_eq!(config.verifier.tiers.excellent, 0.9);
        assert_eq!(config.verifier.tiers.good, 0.75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_misordered_thresholds() {
        let mut config = Xc3Config::default();
        config.verifier.tiers.good = 0.9;
        assert!(matches!(config.validate(), Err(VerifyError::Config(_))));

        let mut config = Xc3Config::default();
        config.fraud.medium_risk_at = 0.7;
        assert!(matches!(config.validate(), Err(VerifyError::Config(_))));

        let mut config = Xc3Config::default();
        config.analyzer.max_concurrent_documents = 0;
        assert!(config.validate().is_err());
    }
}
