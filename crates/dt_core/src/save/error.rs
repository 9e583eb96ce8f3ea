use thiserror::Error;

use crate::models::RosterViolation;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("deserialization error: {0}")]
    Deserialization(serde_json::Error),

    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("roster failed validation with {} finding(s)", .violations.len())]
    Validation { violations: Vec<RosterViolation> },
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            StoreError::Deserialization(err)
        } else {
            StoreError::Serialization(err)
        }
    }
}

impl StoreError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Io(_) => true,
            StoreError::FileNotFound { .. } => true,
            StoreError::Validation { .. } => true,
            StoreError::Serialization(_) | StoreError::Deserialization(_) => false,
        }
    }
}
