//! ProjectVerifier - aggregates document profiles into one verification result.
//!
//! `final = document * 0.6 + metadata * 0.2 + cross_reference * 0.2`
//!
//! The weights below are part of the scoring contract; changing them
//! changes every stored score.

use std::time::Instant;
use tracing::debug;

use crate::artifacts::artifacts_hash;
use crate::config::VerifierConfig;
use crate::feedback::{self, FeedbackTier, ScoreBreakdown};
use crate::types::{ProjectMetadata, Result, VerificationResult, VerifyError};
use xc3_analyzer::types::clamp_unit;
use xc3_analyzer::DocumentQualityProfile;

pub const DOCUMENT_WEIGHT: f64 = 0.6;
pub const METADATA_WEIGHT: f64 = 0.2;
pub const CROSS_REFERENCE_WEIGHT: f64 = 0.2;

pub const METADATA_BASE: f64 = 0.70;
pub const METADATA_CHECK_BONUS: f64 = 0.05;

pub const CROSS_REFERENCE_BASE: f64 = 0.80;
pub const CROSS_REFERENCE_BONUS: f64 = 0.02;

pub const CONFIDENCE_BASE: f64 = 0.70;
pub const CONFIDENCE_STEP: f64 = 0.05;
pub const CONFIDENCE_CAP: f64 = 0.95;

/// Verifier combining metadata and document profiles.
pub struct ProjectVerifier {
    config: VerifierConfig,
}

impl ProjectVerifier {
    /// Create a new verifier.
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Identifier of the scoring logic.
    pub fn model_name(&self) -> &str {
        &self.config.model_name
    }

    /// Verify a project against its document profiles.
    pub fn verify(
        &self,
        metadata: &ProjectMetadata,
        profiles: &[DocumentQualityProfile],
    ) -> Result<VerificationResult> {
        let start = Instant::now();

        let breakdown = self.score(metadata, profiles)?;
        let tier = FeedbackTier::from_score(breakdown.final_score, &self.config.tiers);

        debug!(
            final_score = breakdown.final_score,
            document_score = breakdown.document_score,
            metadata_score = breakdown.metadata_score,
            cross_reference_score = breakdown.cross_reference_score,
            tier = ?tier,
            "Project scored"
        );

        Ok(VerificationResult {
            score: breakdown.final_score,
            confidence: confidence_for(breakdown.document_count),
            explanation: tier.explanation().to_string(),
            issues: feedback::issues(&breakdown),
            strengths: feedback::strengths(&breakdown),
            model_name: self.config.model_name.clone(),
            artifacts_hash: artifacts_hash(metadata, profiles),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Compute the score breakdown without building feedback.
    pub fn score(
        &self,
        metadata: &ProjectMetadata,
        profiles: &[DocumentQualityProfile],
    ) -> Result<ScoreBreakdown> {
        if profiles.is_empty() {
            return Err(VerifyError::InsufficientInput);
        }

        let avg_readability = average(profiles, |p| p.readability);
        let avg_completeness = average(profiles, |p| p.completeness);
        let avg_authenticity = average(profiles, |p| p.authenticity);
        let avg_consistency = average(profiles, |p| p.consistency);

        let document_score = clamp_unit(round_score(
            (avg_readability + avg_completeness + avg_authenticity + avg_consistency) / 4.0,
        ));
        let metadata_score = metadata_score(metadata);
        let cross_reference_score = cross_reference_score(metadata, profiles);

        let final_score = clamp_unit(round_score(
            document_score * DOCUMENT_WEIGHT
                + metadata_score * METADATA_WEIGHT
                + cross_reference_score * CROSS_REFERENCE_WEIGHT,
        ));

        Ok(ScoreBreakdown {
            avg_readability,
            avg_completeness,
            avg_authenticity,
            avg_consistency,
            document_score,
            metadata_score,
            cross_reference_score,
            final_score,
            document_count: profiles.len(),
            unsupported_count: profiles.iter().filter(|p| !p.kind.is_supported()).count(),
        })
    }
}

impl Default for ProjectVerifier {
    fn default() -> Self {
        Self::new(VerifierConfig::default())
    }
}

/// Round to 4 decimal places so values sitting on a cut-off compare as equal.
pub(crate) fn round_score(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Mean of one field across profiles (0 for an empty slice), rounded.
pub(crate) fn average(
    profiles: &[DocumentQualityProfile],
    field: impl Fn(&DocumentQualityProfile) -> f64,
) -> f64 {
    if profiles.is_empty() {
        return 0.0;
    }
    clamp_unit(round_score(
        profiles.iter().map(field).sum::<f64>() / profiles.len() as f64,
    ))
}

/// Presence/quality score of the declared metadata.
pub fn metadata_score(metadata: &ProjectMetadata) -> f64 {
    let checks = [
        metadata.name.trim().chars().count() > 5,
        metadata.location.trim().chars().count() > 3,
        !metadata.methodology.trim().is_empty(),
        metadata.description.trim().chars().count() > 50,
        metadata.estimated_tco2e > 0.0,
        metadata.vintage_year >= 2020,
    ];

    let passed = checks.iter().filter(|passed| **passed).count();
    clamp_unit(round_score(METADATA_BASE + METADATA_CHECK_BONUS * passed as f64))
}

/// Agreement between declared metadata and what documents mention.
pub fn cross_reference_score(
    metadata: &ProjectMetadata,
    profiles: &[DocumentQualityProfile],
) -> f64 {
    let matching = profiles
        .iter()
        .filter(|profile| {
            let extracted = &profile.extracted;
            overlaps(extracted.methodology.as_deref(), &metadata.methodology)
                || overlaps(extracted.location.as_deref(), &metadata.location)
        })
        .count();

    clamp_unit(round_score(
        CROSS_REFERENCE_BASE + CROSS_REFERENCE_BONUS * matching as f64,
    ))
}

/// Confidence in a score backed by `document_count` documents.
pub fn confidence_for(document_count: usize) -> f64 {
    (CONFIDENCE_BASE + CONFIDENCE_STEP * document_count as f64).min(CONFIDENCE_CAP)
}

/// Case-insensitive substring match in either direction; blanks never match.
fn overlaps(extracted: Option<&str>, declared: &str) -> bool {
    let Some(extracted) = extracted else {
        return false;
    };

    let extracted = extracted.trim().to_lowercase();
    let declared = declared.trim().to_lowercase();
    if extracted.is_empty() || declared.is_empty() {
        return false;
    }

    extracted.contains(&declared) || declared.contains(&extracted)
}
