//! Inbound verification request shape.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::types::{ProjectMetadata, Result, VerifyError};
use xc3_analyzer::DocumentInput;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Project verification request as sent by the registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub project: ProjectMetadata,
    #[serde(default)]
    pub documents: Vec<DocumentUpload>,
}

/// One uploaded supporting document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub file_name: String,
    /// Declared MIME type; blank classifies as unsupported
    #[serde(default)]
    pub mime_type: String,
    /// Base64 content, optionally as a `data:` URL
    pub content: String,
}

impl DocumentUpload {
    /// Decode the base64 content.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let payload = match self.content.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => self.content.as_str(),
        };

        general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| {
                VerifyError::InvalidRequest(format!(
                    "document '{}' is not valid base64: {}",
                    self.file_name, e
                ))
            })
    }
}

impl VerifyRequest {
    /// Split into project metadata and decoded document inputs.
    pub fn into_inputs(self) -> Result<(ProjectMetadata, Vec<DocumentInput>)> {
        let mut documents = Vec::with_capacity(self.documents.len());
        for upload in &self.documents {
            let bytes = upload.decode()?;
            documents.push(DocumentInput::new(&upload.file_name, &upload.mime_type, bytes));
        }

        Ok((self.project, documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_request() {
        let request: VerifyRequest = serde_json::from_str(
            r#"{
                "project": {
                    "name": "Wind Park",
                    "location": "Texas, USA",
                    "methodology": "CDM",
                    "vintageYear": 2024,
                    "estimatedTCO2e": 45000
                },
                "documents": [
                    { "fileName": "pdd.pdf", "mimeType": "application/pdf", "content": "JVBERi0xLjc=" }
                ]
            }"#,
        )
        .unwrap();

        let (metadata, inputs) = request.into_inputs().unwrap();
        assert_eq!(metadata.vintage_year, 2024);
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].file_name, "pdd.pdf");
        assert_eq!(inputs[0].raw_bytes, b"%PDF-1.7");
    }

    #[test]
    fn test_data_url_prefix_stripped() {
        let upload = DocumentUpload {
            file_name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
            content: "data:text/plain;base64,aGVsbG8=".to_string(),
        };
        assert_eq!(upload.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_malformed_content_rejected() {
        let request = VerifyRequest {
            project: ProjectMetadata::default(),
            documents: vec![DocumentUpload {
                file_name: "scan.png".to_string(),
                mime_type: "image/png".to_string(),
                content: "%%%".to_string(),
            }],
        };

        let error = request.into_inputs().unwrap_err();
        assert!(matches!(error, VerifyError::InvalidRequest(_)));
        assert!(error.to_string().contains("scan.png"));
    }

    #[test]
    fn test_empty_content_decodes_to_empty_document() {
        let upload = DocumentUpload {
            file_name: "blank.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            content: String::new(),
        };
        assert!(upload.decode().unwrap().is_empty());
    }
}
