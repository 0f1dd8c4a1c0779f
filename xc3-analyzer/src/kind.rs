//! Document type classification.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Kind of document, derived from its declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// application/pdf
    Pdf,
    /// Legacy .doc or OOXML .docx
    Word,
    /// JPEG or PNG scan
    Image,
    /// text/plain
    Text,
    /// text/csv
    Csv,
    /// Anything outside the allow-list
    Unsupported,
}

impl DocumentKind {
    /// Classify a declared MIME type.
    ///
    /// Matching is case-insensitive and ignores parameters such as `; charset=utf-8`.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => Self::Pdf,
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Self::Word
            }
            "image/jpeg" | "image/jpg" | "image/png" => Self::Image,
            "text/plain" => Self::Text,
            "text/csv" => Self::Csv,
            _ => Self::Unsupported,
        }
    }

    /// Whether the analyzer has a content model for this kind.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Image => "image",
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Unsupported => "unsupported",
        }
    }
}
