//! DocumentAnalyzer - turns one document into a quality profile.

use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::extract::extract_from_file_name;
use crate::kind::DocumentKind;
use crate::scorer::{DocumentScorer, ScorerError, SimulatedScorer};
use crate::types::{DocumentInput, DocumentQualityProfile};

/// Error types for document analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Document has no content
    #[error("Document '{file_name}' is empty")]
    EmptyDocument { file_name: String },

    /// Analysis did not finish before the deadline
    #[error("Analysis of '{file_name}' timed out")]
    Timeout { file_name: String },

    /// Scoring backend failed
    #[error("Scorer error: {0}")]
    Scorer(#[from] ScorerError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Analyzer for individual project documents.
///
/// Holds no per-call state; one analyzer can serve any number of
/// concurrent `analyze` calls.
pub struct DocumentAnalyzer {
    /// Configuration
    config: AnalyzerConfig,
    /// Preferred scoring backends, tried in order
    scorers: Vec<Arc<dyn DocumentScorer>>,
    /// Used when no preferred backend is available
    fallback: Arc<dyn DocumentScorer>,
}

impl DocumentAnalyzer {
    /// Create an analyzer backed by the simulated scorer only.
    pub fn new(config: AnalyzerConfig) -> Self {
        let fallback = SimulatedScorer::new()
            .with_seed(config.simulation_seed)
            .with_latency(config.simulated_latency());

        Self {
            config,
            scorers: Vec::new(),
            fallback: Arc::new(fallback),
        }
    }

    /// Set preferred scoring backends.
    pub fn with_scorers(mut self, scorers: Vec<Arc<dyn DocumentScorer>>) -> Self {
        self.scorers = scorers;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one document.
    pub async fn analyze(
        &self,
        raw_bytes: &[u8],
        file_name: &str,
        declared_mime_type: &str,
    ) -> Result<DocumentQualityProfile> {
        let document = DocumentInput::new(file_name, declared_mime_type, raw_bytes);
        self.analyze_document(&document).await
    }

    /// Analyze one document already wrapped as input.
    pub async fn analyze_document(&self, document: &DocumentInput) -> Result<DocumentQualityProfile> {
        if document.raw_bytes.is_empty() {
            return Err(AnalysisError::EmptyDocument {
                file_name: document.file_name.clone(),
            });
        }

        let kind = DocumentKind::from_mime(&document.declared_mime_type);
        if !kind.is_supported() {
            warn!(
                file_name = %document.file_name,
                mime_type = %document.declared_mime_type,
                "Unsupported document type, scoring with lowered bands"
            );
        }

        let scorer = self.select_scorer().await;
        let output = scorer.score(document, kind).await?;

        let extracted = output
            .extracted
            .or(extract_from_file_name(&document.file_name));
        let profile = DocumentQualityProfile::new(&document.file_name, kind, output.scores, extracted);

        debug!(
            file_name = %document.file_name,
            kind = kind.as_str(),
            scorer = scorer.id(),
            readability = profile.readability,
            completeness = profile.completeness,
            authenticity = profile.authenticity,
            consistency = profile.consistency,
            "Document analyzed"
        );

        Ok(profile)
    }

    /// Analyze one document, giving up at the configured per-document
    /// timeout or at `deadline`, whichever comes first.
    pub async fn analyze_within(
        &self,
        document: &DocumentInput,
        deadline: Option<Instant>,
    ) -> Result<DocumentQualityProfile> {
        let mut until = Instant::now() + self.config.document_timeout();
        if let Some(deadline) = deadline {
            until = until.min(deadline);
        }

        match tokio::time::timeout_at(until, self.analyze_document(document)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(file_name = %document.file_name, "Document analysis timed out");
                Err(AnalysisError::Timeout {
                    file_name: document.file_name.clone(),
                })
            }
        }
    }

    /// Select the first available preferred scorer, or the fallback.
    async fn select_scorer(&self) -> Arc<dyn DocumentScorer> {
        for scorer in &self.scorers {
            if scorer.is_available().await {
                return Arc::clone(scorer);
            }
        }
        Arc::clone(&self.fallback)
    }
}

impl Default for DocumentAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::MockScorer;
    use crate::types::{ExtractedFields, QualityScores};
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_document_rejected() {
        let analyzer = DocumentAnalyzer::default();
        let result = analyzer.analyze(&[], "empty.pdf", "application/pdf").await;

        assert!(matches!(result, Err(AnalysisError::EmptyDocument { .. })));
    }

    #[tokio::test]
    async fn test_profile_shape() {
        let analyzer = DocumentAnalyzer::new(AnalyzerConfig::seeded(11));
        let profile = analyzer
            .analyze(&[7u8; 2048], "monitoring-report.pdf", "application/pdf")
            .await
            .unwrap();

        assert_eq!(profile.kind, DocumentKind::Pdf);
        assert_eq!(profile.file_name, "monitoring-report.pdf");
        for value in [
            profile.readability,
            profile.completeness,
            profile.authenticity,
            profile.consistency,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert!(profile.extracted.location.is_some());
        assert!(profile.extracted.methodology.is_some());
    }

    #[tokio::test]
    async fn test_unsupported_type_still_scored() {
        let analyzer = DocumentAnalyzer::new(AnalyzerConfig::seeded(5));
        let profile = analyzer
            .analyze(&[1u8; 2048], "bundle.zip", "application/zip")
            .await
            .unwrap();

        assert_eq!(profile.kind, DocumentKind::Unsupported);
        assert!(profile.readability < 0.6);
    }

    #[tokio::test]
    async fn test_preferred_scorer_and_clamping() {
        let mock = Arc::new(
            MockScorer::new(QualityScores {
                readability: 1.3,
                completeness: 0.8,
                authenticity: -0.5,
                consistency: 0.6,
            })
            .with_extracted(ExtractedFields {
                location: Some("Kenya".to_string()),
                ..Default::default()
            }),
        );
        let analyzer = DocumentAnalyzer::default().with_scorers(vec![mock.clone()]);

        let profile = analyzer
            .analyze(b"content", "site.png", "image/png")
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(profile.readability, 1.0);
        assert_eq!(profile.authenticity, 0.0);
        // Backend extraction wins, file name fills the rest
        assert_eq!(profile.extracted.location.as_deref(), Some("Kenya"));
        assert_eq!(
            profile.extracted.methodology,
            Some(crate::extract_methodology("site.png"))
        );
    }

    #[tokio::test]
    async fn test_unavailable_scorer_falls_back() {
        let mock = Arc::new(MockScorer::default().with_available(false));
        let analyzer = DocumentAnalyzer::new(AnalyzerConfig::seeded(1)).with_scorers(vec![mock.clone()]);

        let result = analyzer.analyze(b"content", "a.pdf", "application/pdf").await;

        tokio_test::assert_ok!(result);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_within_times_out() {
        let mock = Arc::new(MockScorer::default().with_delay(Duration::from_millis(500)));
        let config = AnalyzerConfig {
            document_timeout_ms: 20,
            ..Default::default()
        };
        let analyzer = DocumentAnalyzer::new(config).with_scorers(vec![mock]);
        let document = DocumentInput::new("slow.pdf", "application/pdf", b"%PDF".to_vec());

        let result = analyzer.analyze_within(&document, None).await;
        assert!(matches!(result, Err(AnalysisError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_analyze_within_respects_deadline() {
        let mock = Arc::new(MockScorer::default().with_delay(Duration::from_millis(500)));
        let analyzer = DocumentAnalyzer::default().with_scorers(vec![mock]);
        let document = DocumentInput::new("slow.pdf", "application/pdf", b"%PDF".to_vec());

        let deadline = Instant::now() + Duration::from_millis(20);
        let result = analyzer.analyze_within(&document, Some(deadline)).await;
        assert!(matches!(result, Err(AnalysisError::Timeout { .. })));
    }
}
