use async_trait::async_trait;
use flowgate_core::{Identifier, Value};
use std::collections::{BTreeMap, HashMap};

use crate::error::AccessError;
use crate::{ChainAccess, EventIndex, Header, IndexedTransaction, ScriptInvoker};

/// In-memory chain serving headers, canned script results and indexed events
///
/// Script results are keyed by the exact script bytes and the rendered
/// arguments; the execution height is not part of the key.
#[derive(Debug, Clone, Default)]
pub struct MemoryChain {
    headers: BTreeMap<u64, Header>,
    heights: HashMap<Identifier, u64>,
    scripts: HashMap<(Vec<u8>, Vec<String>), Value>,
    transactions: BTreeMap<u64, Vec<IndexedTransaction>>,
}

impl MemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain with one header for every height in `first..=last`.
    ///
    /// Ids are derived from the height, see [`MemoryChain::block_id`].
    pub fn linear(first: u64, last: u64) -> Self {
        let mut chain = MemoryChain::new();
        for height in first..=last {
            chain.push_header(Header {
                height,
                id: Self::block_id(height),
                parent_id: if height == 0 {
                    Identifier::ZERO
                } else {
                    Self::block_id(height - 1)
                },
                timestamp: 1_600_000_000_000 + height * 1_000,
            });
        }
        chain
    }

    /// Deterministic block id used by [`MemoryChain::linear`]
    pub fn block_id(height: u64) -> Identifier {
        let mut data = [0xb1u8; 32];
        data[24..].copy_from_slice(&height.to_be_bytes());
        Identifier(data)
    }

    pub fn push_header(&mut self, header: Header) {
        self.heights.insert(header.id, header.height);
        self.headers.insert(header.height, header);
    }

    /// Register the result returned for `script` called with `args`
    pub fn set_script_result(&mut self, script: &[u8], args: &[Value], result: Value) {
        self.scripts.insert(script_key(script, args), result);
    }

    pub fn add_transaction(&mut self, height: u64, transaction: IndexedTransaction) {
        self.transactions.entry(height).or_default().push(transaction);
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

fn script_key(script: &[u8], args: &[Value]) -> (Vec<u8>, Vec<String>) {
    (script.to_vec(), args.iter().map(Value::to_string).collect())
}

#[async_trait]
impl ChainAccess for MemoryChain {
    async fn latest_header(&self) -> Result<Header, AccessError> {
        self.headers
            .values()
            .next_back()
            .cloned()
            .ok_or_else(|| AccessError::Unavailable("chain has no blocks".to_string()))
    }

    async fn header_by_height(&self, height: u64) -> Result<Header, AccessError> {
        self.headers
            .get(&height)
            .cloned()
            .ok_or_else(|| AccessError::NotFound(format!("block at height {}", height)))
    }

    async fn header_by_id(&self, id: &Identifier) -> Result<Header, AccessError> {
        self.heights
            .get(id)
            .and_then(|height| self.headers.get(height))
            .cloned()
            .ok_or_else(|| AccessError::NotFound(format!("block {}", id)))
    }
}

#[async_trait]
impl ScriptInvoker for MemoryChain {
    async fn execute(
        &self,
        script: &[u8],
        args: &[Value],
        height: u64,
    ) -> Result<Value, AccessError> {
        if !self.headers.contains_key(&height) {
            return Err(AccessError::NotFound(format!("state at height {}", height)));
        }
        self.scripts.get(&script_key(script, args)).cloned().ok_or_else(|| {
            AccessError::Execution(format!("no result registered for script at height {}", height))
        })
    }
}

#[async_trait]
impl EventIndex for MemoryChain {
    async fn transactions(&self, height: u64) -> Result<Vec<IndexedTransaction>, AccessError> {
        if !self.headers.contains_key(&height) {
            return Err(AccessError::NotFound(format!("block at height {}", height)));
        }
        Ok(self.transactions.get(&height).cloned().unwrap_or_default())
    }
}
