use serde::{Deserialize, Serialize};

/// Payload for registering a single student.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub username: String,
    pub password: String,
    /// Optional; empty values are stored as absent.
    #[serde(default)]
    pub student_number: Option<String>,
}

/// Partial update for an existing student.
///
/// `None` fields are left unchanged. Empty strings are ignored for
/// name, username and password (an empty password means "keep the
/// current one"), while an empty student number clears it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub student_number: Option<String>,
}
