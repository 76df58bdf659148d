use thiserror::Error;

use crate::database::DatabaseError;

/// Observer system errors
#[derive(Debug, Error)]
pub enum ObserverError {
    /// Rejected input; surfaces as 400
    #[error("{0}")]
    ValidationError(String),

    /// Addressed row does not exist; surfaces as 404
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Misconfigured chain (an observer ran without what it needs)
    #[error("Pipeline execution failed: {0}")]
    PipelineError(String),
}

impl ObserverError {
    pub fn validation(message: impl Into<String>) -> Self {
        ObserverError::ValidationError(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ObserverError::NotFound(message.into())
    }

    /// An earlier ring should have stored `what` in the context
    pub fn missing(what: &str) -> Self {
        ObserverError::PipelineError(format!("{} not prepared by an earlier ring", what))
    }
}
