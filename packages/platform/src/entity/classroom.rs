use serde::{Deserialize, Serialize};

/// A named group of students.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: String,
    pub name: String,
    /// Student ids, in enrollment order.
    pub student_ids: Vec<String>,
}

impl Classroom {
    pub fn contains(&self, student_id: &str) -> bool {
        self.student_ids.iter().any(|id| id == student_id)
    }
}
