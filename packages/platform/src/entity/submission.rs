use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample of the typing activity captured while a student edits code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingPoint {
    /// Milliseconds since the first edit of the attempt.
    pub timestamp_ms: u64,
    /// Length of the editor buffer after the edit.
    pub code_length: usize,
}

/// A student's submitted solution. Immutable once recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub problem_id: String,
    pub student_id: String,
    /// Classroom the student belonged to at submission time.
    pub class_id: String,
    pub final_code: String,
    /// Typing trace recorded while the code was written.
    #[serde(default)]
    pub typing_history: Vec<TypingPoint>,
    pub submitted_at: DateTime<Utc>,
}
