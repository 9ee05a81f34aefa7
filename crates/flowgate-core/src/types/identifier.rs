use serde::{Deserialize, Serialize};

use crate::id::Identifier;

/// Reference to a block by index, hash, or both
///
/// An identifier with neither field refers to the latest block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl BlockIdentifier {
    /// The "latest block" identifier
    pub fn latest() -> Self {
        BlockIdentifier::default()
    }

    pub fn from_index(index: u64) -> Self {
        BlockIdentifier {
            index: Some(index),
            hash: None,
        }
    }

    pub fn from_hash(hash: impl Into<String>) -> Self {
        BlockIdentifier {
            index: None,
            hash: Some(hash.into()),
        }
    }

    /// Fully populated identifier for a resolved block
    pub fn resolved(height: u64, id: &Identifier) -> Self {
        BlockIdentifier {
            index: Some(height),
            hash: Some(id.to_hex()),
        }
    }

    /// The hash, treating an empty string like an absent one
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref().filter(|h| !h.is_empty())
    }

    pub fn is_latest(&self) -> bool {
        self.index.is_none() && self.hash().is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.index.is_some() && self.hash().is_some()
    }
}

/// Reference to a transaction by hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIdentifier {
    pub hash: String,
}

impl TransactionIdentifier {
    pub fn new(hash: impl Into<String>) -> Self {
        TransactionIdentifier { hash: hash.into() }
    }

    pub fn from_id(id: &Identifier) -> Self {
        TransactionIdentifier { hash: id.to_hex() }
    }
}

/// Currency as named by the protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub decimals: u32,
}

impl Currency {
    pub fn new(symbol: impl Into<String>, decimals: u32) -> Self {
        Currency {
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// Account reference, optionally narrowed to a sub-account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentifier {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_account: Option<String>,
}

impl AccountIdentifier {
    pub fn new(address: impl Into<String>) -> Self {
        AccountIdentifier {
            address: address.into(),
            sub_account: None,
        }
    }
}
