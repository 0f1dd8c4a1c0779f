//! XC3 Verifier - project verification scoring and fraud risk
//!
//! Scores a carbon project's declared metadata against its supporting
//! documents and, independently, classifies the submission's fraud risk.
//!
//! # Architecture
//!
//! ```text
//! (ProjectMetadata, DocumentInput[])
//!              │
//!              ▼
//! ┌─────────────────────────────────────────┐
//! │          VerificationService            │
//! │  (bounded parallel analysis, deadlines) │
//! └────────────────┬────────────────────────┘
//!                  │ DocumentQualityProfile[]
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐ ┌───────────────┐
//! │ProjectVerifier│ │ FraudDetector │
//! └───────┬───────┘ └───────┬───────┘
//!         └────────┬────────┘
//!                  ▼
//!        VerificationReport
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use xc3_verifier::{ProjectMetadata, VerificationService, Xc3Config};
//! use xc3_analyzer::DocumentInput;
//!
//! let service = VerificationService::new(Xc3Config::default())?;
//! let report = service
//!     .verify_project(&metadata, vec![DocumentInput::new("pdd.pdf", "application/pdf", bytes)])
//!     .await?;
//! println!("{} ({:?})", report.result.score, report.fraud.risk_level);
//! ```

pub mod artifacts;
pub mod config;
pub mod feedback;
pub mod fraud;
pub mod request;
pub mod response;
pub mod service;
pub mod types;
pub mod verifier;

// Re-export main types for convenience
pub use artifacts::artifacts_hash;
pub use config::{FeedbackTiers, FraudConfig, VerifierConfig, Xc3Config, DEFAULT_MODEL_NAME};
pub use feedback::{FeedbackTier, ScoreBreakdown};
pub use fraud::{FraudDetector, FraudRiskReport, RiskLevel};
pub use request::{DocumentUpload, VerifyRequest};
pub use response::{ErrorResponse, FraudSummary, VerifyResponse};
pub use service::VerificationService;
pub use types::*;
pub use verifier::{confidence_for, ProjectVerifier};
