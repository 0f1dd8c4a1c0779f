//! Common types for the xc3-analyzer crate.

use serde::{Deserialize, Serialize};

use crate::kind::DocumentKind;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// A document handed to the analyzer for the duration of one verification call.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    /// Original file name as uploaded
    pub file_name: String,
    /// MIME type declared by the uploader (advisory)
    pub declared_mime_type: String,
    /// Raw document content
    pub raw_bytes: Vec<u8>,
}

impl DocumentInput {
    /// Create a new document input.
    pub fn new(
        file_name: impl Into<String>,
        declared_mime_type: impl Into<String>,
        raw_bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            declared_mime_type: declared_mime_type.into(),
            raw_bytes: raw_bytes.into(),
        }
    }

    /// Classified kind of this document.
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_mime(&self.declared_mime_type)
    }
}

/// The four quality dimensions every scorer produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct QualityScores {
    /// How legible the document is (0.0 - 1.0)
    pub readability: f64,
    /// How many expected sections are present (0.0 - 1.0)
    pub completeness: f64,
    /// Likelihood the document is genuine (0.0 - 1.0)
    pub authenticity: f64,
    /// Internal consistency of figures and dates (0.0 - 1.0)
    pub consistency: f64,
}

impl QualityScores {
    /// Create scores with the same value in every dimension.
    pub fn uniform(value: f64) -> Self {
        Self {
            readability: value,
            completeness: value,
            authenticity: value,
            consistency: value,
        }
    }

    /// Clamp every dimension into [0, 1]. NaN becomes 0.
    pub fn clamped(self) -> Self {
        Self {
            readability: clamp_unit(self.readability),
            completeness: clamp_unit(self.completeness),
            authenticity: clamp_unit(self.authenticity),
            consistency: clamp_unit(self.consistency),
        }
    }
}

/// Clamp a score into the unit interval.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Best-effort fields pulled out of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ExtractedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    /// Claimed carbon volume in tCO2e
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
}

impl ExtractedFields {
    /// Fill unset fields from `fallback`, keeping values already present.
    pub fn or(self, fallback: ExtractedFields) -> Self {
        Self {
            location: self.location.or(fallback.location),
            methodology: self.methodology.or(fallback.methodology),
            carbon_volume: self.carbon_volume.or(fallback.carbon_volume),
            timeframe: self.timeframe.or(fallback.timeframe),
        }
    }
}

/// Quality profile of a single analyzed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct DocumentQualityProfile {
    /// File name the profile was computed for
    pub file_name: String,
    /// Classified document kind
    pub kind: DocumentKind,
    pub readability: f64,
    pub completeness: f64,
    pub authenticity: f64,
    pub consistency: f64,
    /// Extracted project details
    pub extracted: ExtractedFields,
}

impl DocumentQualityProfile {
    /// Build a profile from scores; scores are clamped into [0, 1].
    pub fn new(
        file_name: impl Into<String>,
        kind: DocumentKind,
        scores: QualityScores,
        extracted: ExtractedFields,
    ) -> Self {
        let scores = scores.clamped();
        Self {
            file_name: file_name.into(),
            kind,
            readability: scores.readability,
            completeness: scores.completeness,
            authenticity: scores.authenticity,
            consistency: scores.consistency,
            extracted,
        }
    }

    /// The four quality dimensions of this profile.
    pub fn scores(&self) -> QualityScores {
        QualityScores {
            readability: self.readability,
            completeness: self.completeness,
            authenticity: self.authenticity,
            consistency: self.consistency,
        }
    }
}
