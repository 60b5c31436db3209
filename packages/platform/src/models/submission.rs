use serde::{Deserialize, Serialize};

use crate::entity::TypingPoint;

/// Payload for recording a submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewSubmission {
    pub problem_id: String,
    pub student_id: String,
    pub class_id: String,
    pub final_code: String,
    #[serde(default)]
    pub typing_history: Vec<TypingPoint>,
}
