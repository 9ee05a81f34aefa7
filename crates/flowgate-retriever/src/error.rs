use flowgate_access::CallError;
use flowgate_core::{Failure, FixedPointError};
use flowgate_scripts::ScriptError;
use flowgate_validator::ValidatorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrieverError {
    #[error(transparent)]
    Validator(#[from] ValidatorError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    FixedPoint(#[from] FixedPointError),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error(transparent)]
    Failure(#[from] Failure),

    #[error("Malformed {operation} result: {reason}")]
    Malformed {
        operation: &'static str,
        reason: String,
    },

    #[error("Amount overflow in {0}")]
    Overflow(&'static str),
}

impl RetrieverError {
    /// The caller-correctable failure behind this error, if any
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            RetrieverError::Failure(failure) => Some(failure),
            RetrieverError::Validator(err) => err.failure(),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            RetrieverError::Call(CallError::Cancelled { .. })
                | RetrieverError::Validator(ValidatorError::Call(CallError::Cancelled { .. }))
        )
    }
}
