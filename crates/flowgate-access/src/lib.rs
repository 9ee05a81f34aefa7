//! Flowgate Access - Contracts for the chain services the gateway consumes
//!
//! The gateway never talks to the chain directly. Block headers, script
//! execution and indexed events come from implementations of the traits
//! below, and every call a query makes goes through [`call`] so it can be
//! abandoned when the query is cancelled.

pub mod call;
pub mod error;
pub mod memory;

use async_trait::async_trait;
use flowgate_core::{Identifier, Value};

pub use call::call;
pub use error::{AccessError, CallError};
pub use memory::MemoryChain;

/// Header of a finalized block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub height: u64,
    pub id: Identifier,
    pub parent_id: Identifier,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

/// An event emitted by a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Fully qualified event type, e.g. `A.1654653399040a61.FlowToken.TokensDeposited`
    pub type_id: String,
    pub value: Value,
}

/// A transaction together with the events it emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedTransaction {
    pub id: Identifier,
    pub events: Vec<Event>,
}

/// Access to finalized block headers
#[async_trait]
pub trait ChainAccess: Send + Sync {
    /// Header of the most recent finalized block
    async fn latest_header(&self) -> Result<Header, AccessError>;

    async fn header_by_height(&self, height: u64) -> Result<Header, AccessError>;

    async fn header_by_id(&self, id: &Identifier) -> Result<Header, AccessError>;
}

/// Execution of read-only scripts against historical state
#[async_trait]
pub trait ScriptInvoker: Send + Sync {
    async fn execute(&self, script: &[u8], args: &[Value], height: u64)
        -> Result<Value, AccessError>;
}

/// Transactions and events indexed per block
#[async_trait]
pub trait EventIndex: Send + Sync {
    async fn transactions(&self, height: u64) -> Result<Vec<IndexedTransaction>, AccessError>;
}
