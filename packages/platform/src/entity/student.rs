use serde::{Deserialize, Serialize};

/// A registered student. Classroom membership lives on
/// [`Classroom`](super::Classroom), not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
}
