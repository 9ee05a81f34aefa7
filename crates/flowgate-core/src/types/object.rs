use serde::{Deserialize, Serialize};

use crate::types::identifier::{
    AccountIdentifier, BlockIdentifier, Currency, TransactionIdentifier,
};

/// Some value of a currency, in minor units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
    /// Total delegated portion of the value; only set for validators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegated_value: Option<String>,
    /// Delegators of a validator and the value each delegates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegators: Option<Vec<Delegator>>,
}

impl Amount {
    pub fn new(value: impl Into<String>, currency: Currency) -> Self {
        Amount {
            value: value.into(),
            currency,
            delegated_value: None,
            delegators: None,
        }
    }
}

/// A wallet delegating to a validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegator {
    pub address: String,
    /// Value of everything the delegator holds in the staking record
    pub value: String,
    /// Value actively delegated
    pub delegated_value: String,
}

/// Kind of balance change an operation represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Transfer,
    Deposit,
    Withdrawal,
    Reward,
}

/// Position of an operation within its transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationIdentifier {
    pub index: u64,
}

/// A single balance change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub operation_identifier: OperationIdentifier,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_operations: Vec<OperationIdentifier>,
    #[serde(rename = "type")]
    pub kind: OperationType,
    pub status: String,
    pub account: AccountIdentifier,
    pub amount: Amount,
}

impl Operation {
    pub const STATUS_COMPLETED: &'static str = "COMPLETED";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_identifier: TransactionIdentifier,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub block_identifier: BlockIdentifier,
    pub parent_block_identifier: BlockIdentifier,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
}
