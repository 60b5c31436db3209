use std::fmt;

/// Errors that can occur during persistence operations.
#[derive(Debug)]
pub enum StorageError {
    /// The requested entry or staged file was not found.
    NotFound(String),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// A stored value could not be parsed.
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "entry not found: {key}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::Corrupt(msg) => write!(f, "corrupt store data: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
