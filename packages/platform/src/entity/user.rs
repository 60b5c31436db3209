use std::fmt;

use serde::{Deserialize, Serialize};

/// Account role. The platform knows exactly two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Teacher => write!(f, "teacher"),
            Role::Student => write!(f, "student"),
        }
    }
}

/// A loginable account, derived on every read from the fixed teacher
/// account plus one record per [`Student`](super::Student).
///
/// Never stored: student and classroom mutations are reflected on the
/// next derivation without any synchronization step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    /// `None` in the sanitized view handed out by a successful login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    /// Id of the first classroom whose membership contains this student.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
}

impl User {
    /// Copy of this user with the password stripped, for session use.
    pub fn sanitized(&self) -> User {
        User {
            password: None,
            ..self.clone()
        }
    }
}
