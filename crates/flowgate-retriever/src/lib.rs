//! Flowgate Retriever - Balance, block and transaction queries
//!
//! Ties the validator, the script generator and the chain collaborators
//! together into the data-access operations the gateway serves.

pub mod convert;
pub mod error;
pub mod retriever;
pub mod staking;

pub use convert::{EventKind, EventLookup};
pub use error::RetrieverError;
pub use retriever::Retriever;
pub use staking::Delegation;
