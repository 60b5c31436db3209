use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by store mutations and login.
///
/// Display strings double as user-facing messages, so the wording of
/// the uniqueness variants is load-bearing and covered by tests.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Username \"{0}\" already exists.")]
    UsernameExists(String),

    #[error("Student number \"{0}\" already exists.")]
    StudentNumberExists(String),

    #[error("Username \"{0}\" already exists. Batch registration cancelled.")]
    BatchUsernameExists(String),

    #[error("Student number \"{0}\" already exists. Batch registration cancelled.")]
    BatchStudentNumberExists(String),

    #[error("Username \"{0}\" is already taken.")]
    UsernameTaken(String),

    #[error("Student number \"{0}\" is already taken.")]
    StudentNumberTaken(String),

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
