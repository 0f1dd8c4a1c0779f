//! Deterministic field extraction.
//!
//! File-name extraction indexes fixed vocabularies with a stable SHA-256
//! derived value, so the same file name always yields the same fields,
//! across runs and across processes.

use sha2::{Digest, Sha256};

use crate::types::ExtractedFields;

/// Locations recognized by the extractor.
pub const LOCATIONS: &[&str] = &[
    "Brazil",
    "Indonesia",
    "Kenya",
    "India",
    "Peru",
    "California, USA",
    "Colombia",
    "Democratic Republic of the Congo",
];

/// Carbon crediting methodologies recognized by the extractor.
pub const METHODOLOGIES: &[&str] = &["REDD+", "CDM", "VCS", "Gold Standard", "CAR", "ACR"];

/// Stable 64-bit hash of a string (first 8 bytes of SHA-256, big-endian).
pub fn stable_hash(value: &str) -> u64 {
    let digest = Sha256::digest(value.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Location hint for a file name.
pub fn extract_location(file_name: &str) -> String {
    let index = (stable_hash(file_name) % LOCATIONS.len() as u64) as usize;
    LOCATIONS[index].to_string()
}

/// Methodology hint for a file name.
pub fn extract_methodology(file_name: &str) -> String {
    // Different bits than location so the two are not correlated
    let index = ((stable_hash(file_name) >> 8) % METHODOLOGIES.len() as u64) as usize;
    METHODOLOGIES[index].to_string()
}

/// All fields derivable from a file name alone.
pub fn extract_from_file_name(file_name: &str) -> ExtractedFields {
    let hash = stable_hash(file_name);
    let volume = 1_000 + (hash >> 16) % 99_000;
    let start_year = 2015 + (hash >> 32) % 10;

    ExtractedFields {
        location: Some(extract_location(file_name)),
        methodology: Some(extract_methodology(file_name)),
        carbon_volume: Some(volume as f64),
        timeframe: Some(format!("{}-{}", start_year, start_year + 10)),
    }
}

/// Scan plain text for vocabulary terms.
///
/// Only whole-term matches count, so "CAR" does not match inside "carbon".
pub fn extract_from_text(text: &str) -> ExtractedFields {
    let lower = text.to_lowercase();

    let find = |vocabulary: &[&str]| {
        vocabulary
            .iter()
            .find(|term| contains_term(&lower, &term.to_lowercase()))
            .map(|term| term.to_string())
    };

    ExtractedFields {
        location: find(LOCATIONS),
        methodology: find(METHODOLOGIES),
        carbon_volume: None,
        timeframe: None,
    }
}

fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    haystack.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
