//! Content addressing of verification inputs.
//!
//! The artifacts hash is a CIDv1 (raw codec, sha2-256 multihash) over the
//! canonical JSON form of the project metadata and document profiles.
//! Identical inputs always produce the identical identifier, which lets
//! callers deduplicate and re-check stored results.

use cid::multihash::Multihash;
use cid::Cid;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::types::ProjectMetadata;
use xc3_analyzer::DocumentQualityProfile;

/// Multicodec code for raw binary content.
const RAW_CODEC: u64 = 0x55;

/// Multihash code for sha2-256.
const SHA2_256: u64 = 0x12;

/// Version tag embedded in the canonical form.
pub const ARTIFACTS_SCHEMA: &str = "xc3-artifacts/v1";

#[derive(Serialize)]
struct CanonicalArtifacts<'a> {
    schema: &'static str,
    project: &'a ProjectMetadata,
    documents: &'a [DocumentQualityProfile],
}

/// Canonical serialization of the verification inputs.
pub fn canonical_bytes(metadata: &ProjectMetadata, profiles: &[DocumentQualityProfile]) -> Vec<u8> {
    let artifacts = CanonicalArtifacts {
        schema: ARTIFACTS_SCHEMA,
        project: metadata,
        documents: profiles,
    };
    serde_json::to_vec(&artifacts).unwrap_or_default()
}

/// Content identifier of the verification inputs.
pub fn artifacts_hash(metadata: &ProjectMetadata, profiles: &[DocumentQualityProfile]) -> String {
    let digest = Sha256::digest(canonical_bytes(metadata, profiles));
    // A 32-byte digest always fits the 64-byte multihash
    Multihash::<64>::wrap(SHA2_256, &digest)
        .map(|hash| Cid::new_v1(RAW_CODEC, hash).to_string())
        .unwrap_or_default()
}
