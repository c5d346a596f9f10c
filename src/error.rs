//! Error types shared by the services and the HTTP layer

use crate::models::error::FieldError;

/// Failure reported by a repository implementation
#[derive(Debug, Clone, PartialEq)]
pub enum RepoError {
    /// A uniqueness or reference constraint rejected the write
    Constraint(String),
    Database(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::Constraint(msg) => write!(f, "Constraint violation: {}", msg),
            RepoError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for RepoError {}

/// Failure of a ranch operation
#[derive(Debug, Clone, PartialEq)]
pub enum RanchError {
    /// One or more input fields were rejected
    Validation(Vec<FieldError>),
    NotFound(String),
    /// The request clashes with stored state (duplicate tag, product in use, resale)
    Conflict(String),
    Storage(String),
}

impl RanchError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        RanchError::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }
}

impl std::fmt::Display for RanchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RanchError::Validation(fields) => {
                let messages: Vec<String> = fields
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Invalid data: {}", messages.join(", "))
            }
            RanchError::NotFound(msg) => write!(f, "Not found: {}", msg),
            RanchError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            RanchError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for RanchError {}

impl From<RepoError> for RanchError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => RanchError::Conflict(msg),
            RepoError::Database(msg) => RanchError::Storage(msg),
        }
    }
}
