use flowgate_access::CallError;
use flowgate_core::Failure;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    #[error(transparent)]
    Failure(#[from] Failure),

    #[error(transparent)]
    Call(#[from] CallError),
}

impl ValidatorError {
    /// The caller-correctable failure, if this is one
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ValidatorError::Failure(failure) => Some(failure),
            ValidatorError::Call(_) => None,
        }
    }
}
