//! VerificationService - pipeline entry point.
//!
//! Analyzes every document concurrently, then hands the completed
//! profile set to the verifier and the fraud detector.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::config::Xc3Config;
use crate::fraud::FraudDetector;
use crate::request::VerifyRequest;
use crate::response::VerifyResponse;
use crate::types::{
    ExcludedDocument, ExclusionReason, ProjectMetadata, Result, VerificationReport, VerifyError,
};
use crate::verifier::ProjectVerifier;
use xc3_analyzer::{AnalysisError, DocumentAnalyzer, DocumentInput, DocumentQualityProfile, DocumentScorer};

/// Main entry point for project verification.
pub struct VerificationService {
    /// Configuration
    config: Xc3Config,
    /// Shared by the per-document tasks
    analyzer: Arc<DocumentAnalyzer>,
    verifier: ProjectVerifier,
    fraud: FraudDetector,
}

impl VerificationService {
    /// Create a service from a validated configuration.
    pub fn new(config: Xc3Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config))
    }

    fn assemble(config: Xc3Config) -> Self {
        Self {
            analyzer: Arc::new(DocumentAnalyzer::new(config.analyzer.clone())),
            verifier: ProjectVerifier::new(config.verifier.clone()),
            fraud: FraudDetector::new(config.fraud.clone()),
            config,
        }
    }

    /// Load configuration from YAML and create a service.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config = Xc3Config::from_yaml(yaml).map_err(|e| VerifyError::Config(e.to_string()))?;
        Self::new(config)
    }

    /// Set preferred scoring backends. The simulated scorer remains the fallback.
    pub fn with_scorers(mut self, scorers: Vec<Arc<dyn DocumentScorer>>) -> Self {
        self.analyzer =
            Arc::new(DocumentAnalyzer::new(self.config.analyzer.clone()).with_scorers(scorers));
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &Xc3Config {
        &self.config
    }

    /// Verify a project and its supporting documents.
    pub async fn verify_project(
        &self,
        metadata: &ProjectMetadata,
        documents: Vec<DocumentInput>,
    ) -> Result<VerificationReport> {
        self.verify_project_until(metadata, documents, None).await
    }

    /// Verify a project, abandoning any document still running at `deadline`.
    pub async fn verify_project_until(
        &self,
        metadata: &ProjectMetadata,
        documents: Vec<DocumentInput>,
        deadline: Option<Instant>,
    ) -> Result<VerificationReport> {
        let start = std::time::Instant::now();

        if documents.is_empty() {
            return Err(VerifyError::InsufficientInput);
        }
        let submitted = documents.len();

        let (profiles, excluded) = self.analyze_documents(documents, deadline).await;
        if profiles.is_empty() {
            warn!(submitted = submitted, "No document could be analyzed");
            return Err(VerifyError::InsufficientInput);
        }

        let mut result = self.verifier.verify(metadata, &profiles)?;
        let fraud = self.fraud.assess_risk(metadata, &profiles);

        result.issues.extend(excluded.iter().map(ExcludedDocument::issue));
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            project = %metadata.name,
            score = result.score,
            confidence = result.confidence,
            risk_level = fraud.risk_level.as_str(),
            analyzed = profiles.len(),
            excluded = excluded.len(),
            duration_ms = result.processing_time_ms,
            "Project verified"
        );

        Ok(VerificationReport {
            verification_id: uuid::Uuid::new_v4().to_string(),
            verified_at: chrono::Utc::now(),
            result,
            fraud,
            profiles,
            excluded,
        })
    }

    /// Handle a wire request end to end.
    pub async fn handle(&self, request: VerifyRequest) -> Result<VerifyResponse> {
        let (metadata, documents) = request.into_inputs()?;
        let report = self.verify_project(&metadata, documents).await?;
        Ok(VerifyResponse::from_report(&report))
    }

    /// Analyze documents in parallel, keeping submission order.
    ///
    /// Returns the profiles that completed and the documents that did not.
    /// Dropping the returned future aborts every analysis still in flight.
    async fn analyze_documents(
        &self,
        documents: Vec<DocumentInput>,
        deadline: Option<Instant>,
    ) -> (Vec<DocumentQualityProfile>, Vec<ExcludedDocument>) {
        let permits = Arc::new(Semaphore::new(self.config.analyzer.max_concurrent_documents));
        let file_names: Vec<String> = documents.iter().map(|d| d.file_name.clone()).collect();

        let mut tasks = JoinSet::new();
        let mut positions = HashMap::with_capacity(documents.len());

        for (index, document) in documents.into_iter().enumerate() {
            let analyzer = Arc::clone(&self.analyzer);
            let permits = Arc::clone(&permits);

            let handle = tasks.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return Err(ExclusionReason::Failed(
                            "Failed to acquire analysis permit".to_string(),
                        ))
                    }
                };

                analyzer
                    .analyze_within(&document, deadline)
                    .await
                    .map_err(exclusion_reason)
            });
            positions.insert(handle.id(), index);
        }

        let mut outcomes: Vec<Option<std::result::Result<DocumentQualityProfile, ExclusionReason>>> =
            file_names.iter().map(|_| None).collect();

        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, outcome) = match joined {
                Ok((id, outcome)) => (id, outcome),
                Err(join_error) => (
                    join_error.id(),
                    Err(ExclusionReason::Failed(join_error.to_string())),
                ),
            };
            if let Some(&index) = positions.get(&id) {
                outcomes[index] = Some(outcome);
            }
        }

        let mut profiles = Vec::with_capacity(outcomes.len());
        let mut excluded = Vec::new();

        for (index, (file_name, outcome)) in file_names.into_iter().zip(outcomes).enumerate() {
            let reason = match outcome {
                Some(Ok(profile)) => {
                    profiles.push(profile);
                    continue;
                }
                Some(Err(reason)) => reason,
                None => ExclusionReason::Failed("Analysis task did not report".to_string()),
            };

            warn!(
                position = index + 1,
                file_name = %file_name,
                reason = ?reason,
                "Document excluded from verification"
            );
            excluded.push(ExcludedDocument {
                position: index + 1,
                file_name,
                reason,
            });
        }

        (profiles, excluded)
    }
}

impl Default for VerificationService {
    fn default() -> Self {
        Self::assemble(Xc3Config::default())
    }
}

fn exclusion_reason(error: AnalysisError) -> ExclusionReason {
    match error {
        AnalysisError::EmptyDocument { .. } => ExclusionReason::Empty,
        AnalysisError::Timeout { .. } => ExclusionReason::TimedOut,
        AnalysisError::Scorer(e) => ExclusionReason::Failed(e.to_string()),
    }
}
