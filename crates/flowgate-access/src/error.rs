use thiserror::Error;

/// Failure reported by a chain collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Script execution failed: {0}")]
    Execution(String),
}

/// Outcome of a collaborator call made on behalf of a query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("{operation} failed: {source}")]
    Failed {
        operation: &'static str,
        source: AccessError,
    },

    #[error("{operation} cancelled")]
    Cancelled { operation: &'static str },
}

impl CallError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CallError::Failed {
                source: AccessError::NotFound(_),
                ..
            }
        )
    }

    pub fn operation(&self) -> &'static str {
        match self {
            CallError::Failed { operation, .. } | CallError::Cancelled { operation } => operation,
        }
    }
}
