// src/error.rs
use std::fmt;
use uuid::Uuid;

#[derive(Debug)]
pub enum StorageError {
    ServerNotFound(Uuid),
    LimitReached(usize),
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServerNotFound(id) => write!(f, "Server not found: {}", id),
            Self::LimitReached(max) => {
                write!(f, "Maximum number of saved servers ({}) reached", max)
            }
            Self::Io(e) => write!(f, "Server store I/O error: {}", e),
            Self::Serialization(e) => write!(f, "Server store is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
