//! Mock scorer for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use super::traits::*;
use crate::kind::DocumentKind;
use crate::types::{DocumentInput, ExtractedFields, QualityScores};

/// Mock scorer for testing.
///
/// Returns fixed scores, optionally after a delay.
pub struct MockScorer {
    scorer_id: String,
    available: AtomicBool,
    output: ScorerOutput,
    delay: Duration,
    call_count: AtomicU32,
}

impl MockScorer {
    /// Create a mock returning `scores` for every document.
    pub fn new(scores: QualityScores) -> Self {
        Self {
            scorer_id: "mock-scorer".to_string(),
            available: AtomicBool::new(true),
            output: ScorerOutput::from_scores(scores),
            delay: Duration::ZERO,
            call_count: AtomicU32::new(0),
        }
    }

    /// Set the extracted fields returned with every score.
    pub fn with_extracted(mut self, extracted: ExtractedFields) -> Self {
        self.output.extracted = extracted;
        self
    }

    /// Delay every call (for deadline tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set availability.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Get the number of times score was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockScorer {
    fn default() -> Self {
        Self::new(QualityScores::uniform(0.9))
    }
}

#[async_trait]
impl DocumentScorer for MockScorer {
    fn id(&self) -> &str {
        &self.scorer_id
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn score(
        &self,
        document: &DocumentInput,
        _kind: DocumentKind,
    ) -> Result<ScorerOutput, ScorerError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if !self.available.load(Ordering::SeqCst) {
            return Err(ScorerError::Unavailable("Mock scorer disabled".to_string()));
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::trace!(file_name = %document.file_name, "Mock scorer returning fixed output");
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_scorer() {
        let scorer = MockScorer::new(QualityScores::uniform(0.7));
        let doc = DocumentInput::new("a.pdf", "application/pdf", b"%PDF".to_vec());

        assert!(scorer.is_available().await);
        assert_eq!(scorer.call_count(), 0);

        let output = scorer.score(&doc, DocumentKind::Pdf).await.unwrap();
        assert_eq!(output.scores, QualityScores::uniform(0.7));
        assert_eq!(scorer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_unavailable() {
        let scorer = MockScorer::default().with_available(false);
        let doc = DocumentInput::new("a.pdf", "application/pdf", b"%PDF".to_vec());

        assert!(!scorer.is_available().await);
        assert!(scorer.score(&doc, DocumentKind::Pdf).await.is_err());
    }
}
