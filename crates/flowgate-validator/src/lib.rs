//! Flowgate Validator - Resolution and validation of protocol identifiers
//!
//! Partial block identifiers are resolved against the chain into a height
//! and canonical id; currency, account and transaction identifiers are
//! checked before any script runs.

pub mod error;
pub mod validator;

pub use error::ValidatorError;
pub use validator::Validator;
