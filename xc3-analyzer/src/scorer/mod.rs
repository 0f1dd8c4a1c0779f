//! Document scoring backends.
//!
//! Provides a trait-based interface over document-understanding engines:
//! - Simulated heuristic scoring (default, seedable)
//! - Remote HTTP scoring service (OCR/NLP backends)
//! - Mock scorer for testing

pub mod mock;
pub mod remote;
pub mod simulated;
pub mod traits;

pub use mock::MockScorer;
pub use remote::RemoteScorer;
pub use simulated::SimulatedScorer;
pub use traits::{DocumentScorer, ScorerError, ScorerOutput};
