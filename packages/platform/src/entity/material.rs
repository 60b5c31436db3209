use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded teaching resource (slides, worksheets, reference files).
///
/// The record only carries metadata; the bytes live in the
/// [`MaterialVault`](crate::storage::MaterialVault) under `vault_key`,
/// which must be released exactly once when the material is deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingMaterial {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Name of the uploaded file as provided by the teacher.
    pub file_name: String,
    pub size_bytes: u64,
    /// Key of the staged blob backing this material.
    pub vault_key: String,
    pub uploaded_at: DateTime<Utc>,
}
