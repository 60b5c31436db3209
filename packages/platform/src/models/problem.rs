use serde::{Deserialize, Serialize};

/// Payload for creating a teacher-authored problem.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewProblem {
    pub title: String,
    pub description: String,
    pub initial_code: String,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Partial update for an existing problem. `None` fields are left
/// unchanged; locale keys are never touched by edits, so a localized
/// catalog problem keeps following the interface language.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProblemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub initial_code: Option<String>,
    pub hint: Option<String>,
}
