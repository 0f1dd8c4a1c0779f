//! Remote document-understanding backend.
//!
//! Talks to an HTTP service that runs real OCR/NLP over a document and
//! answers with the four quality scores:
//!
//! ```text
//! POST {base_url}/analyze
//! { "file_name": "...", "mime_type": "...", "content": "<base64>" }
//!
//! 200 OK
//! { "readability": 0.9, "completeness": 0.8, "authenticity": 0.85,
//!   "consistency": 0.9, "extracted": { "location": "Kenya" } }
//! ```

use async_trait::async_trait;
use base64::Engine;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use super::traits::*;
use crate::kind::DocumentKind;
use crate::types::{DocumentInput, ExtractedFields, QualityScores};

/// HTTP scoring backend.
pub struct RemoteScorer {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    scorer_id: String,
}

impl RemoteScorer {
    /// Create a new remote scorer.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            scorer_id: format!("remote:{}", base_url),
            base_url,
            api_key,
        }
    }

    fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    fn auth_header(&self) -> Option<String> {
        self.api_key.as_ref().map(|k| format!("Bearer {}", k))
    }
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    file_name: &'a str,
    mime_type: &'a str,
    kind: DocumentKind,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    readability: f64,
    completeness: f64,
    authenticity: f64,
    consistency: f64,
    #[serde(default)]
    extracted: ExtractedFields,
}

#[async_trait]
impl DocumentScorer for RemoteScorer {
    fn id(&self) -> &str {
        &self.scorer_id
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        let mut request = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(header::AUTHORIZATION, auth);
        }

        request
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    async fn score(
        &self,
        document: &DocumentInput,
        kind: DocumentKind,
    ) -> Result<ScorerOutput, ScorerError> {
        let body = AnalyzeRequest {
            file_name: &document.file_name,
            mime_type: &document.declared_mime_type,
            kind,
            content: base64::engine::general_purpose::STANDARD.encode(&document.raw_bytes),
        };

        let mut http_request = self.client.post(self.analyze_url());

        if let Some(auth) = self.auth_header() {
            http_request = http_request.header(header::AUTHORIZATION, auth);
        }

        let response = http_request
            .json(&body)
            .send()
            .await
            .map_err(|e| ScorerError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
                return Err(ScorerError::Unavailable(body));
            }

            return Err(ScorerError::RequestFailed(format!("HTTP {}: {}", status, body)));
        }

        let analysis: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::ParseError(e.to_string()))?;

        Ok(ScorerOutput {
            scores: QualityScores {
                readability: analysis.readability,
                completeness: analysis.completeness,
                authenticity: analysis.authenticity,
                consistency: analysis.consistency,
            },
            extracted: analysis.extracted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn document() -> DocumentInput {
        DocumentInput::new("pdd.pdf", "application/pdf", b"%PDF-1.7".to_vec())
    }

    #[test]
    fn test_remote_creation() {
        let scorer = RemoteScorer::new("http://localhost:9000/", None);
        assert_eq!(scorer.id(), "remote:http://localhost:9000");
        assert_eq!(scorer.analyze_url(), "http://localhost:9000/analyze");
    }

    #[tokio::test]
    async fn test_remote_score() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(header_matcher("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "readability": 0.91,
                "completeness": 0.82,
                "authenticity": 0.88,
                "consistency": 0.79,
                "extracted": { "location": "Kenya", "methodology": "VCS" }
            })))
            .mount(&server)
            .await;

        let scorer = RemoteScorer::new(server.uri(), Some("secret".to_string()));
        let output = scorer.score(&document(), DocumentKind::Pdf).await.unwrap();

        assert_eq!(output.scores.readability, 0.91);
        assert_eq!(output.scores.consistency, 0.79);
        assert_eq!(output.extracted.location.as_deref(), Some("Kenya"));
        assert!(output.extracted.carbon_volume.is_none());
    }

    #[tokio::test]
    async fn test_remote_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let scorer = RemoteScorer::new(server.uri(), None);
        let result = scorer.score(&document(), DocumentKind::Pdf).await;

        assert!(matches!(result, Err(ScorerError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_remote_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let scorer = RemoteScorer::new(server.uri(), None);
        let result = scorer.score(&document(), DocumentKind::Pdf).await;

        assert!(matches!(result, Err(ScorerError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_remote_availability() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let scorer = RemoteScorer::new(server.uri(), None);
        assert!(scorer.is_available().await);

        let offline = RemoteScorer::new("http://127.0.0.1:1", None);
        assert!(!offline.is_available().await);
    }
}
