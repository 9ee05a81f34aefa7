//! Caller-correctable failures with structured diagnostic context.
//!
//! Every [`Failure`] variant carries the named values needed to reproduce the
//! condition. [`Failure::kind`] gives the coarse category a transport maps to
//! protocol error codes, and [`Failure::description`] gives the fields in a
//! stable order.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Coarse failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidBlock,
    UnknownBlock,
    IncompleteBlock,
    InvalidTransaction,
    UnknownTransaction,
    InvalidAccount,
    InvalidCurrency,
    UnknownCurrency,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::InvalidBlock => "invalid block",
            FailureKind::UnknownBlock => "unknown block",
            FailureKind::IncompleteBlock => "incomplete block",
            FailureKind::InvalidTransaction => "invalid transaction",
            FailureKind::UnknownTransaction => "unknown transaction",
            FailureKind::InvalidAccount => "invalid account",
            FailureKind::InvalidCurrency => "invalid currency",
            FailureKind::UnknownCurrency => "unknown currency",
        };
        f.write_str(name)
    }
}

/// Value of a diagnostic field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Uint(u64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Uint(n) => write!(f, "{}", n),
        }
    }
}

/// Kind, message and ordered diagnostic fields of a failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub kind: FailureKind,
    pub message: String,
    pub fields: Vec<(&'static str, FieldValue)>,
}

impl Description {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("block hash is not a valid identifier: {hash}")]
    InvalidBlockHash { hash: String },

    #[error("block index {index} is below first indexed height {first}")]
    BlockTooLow { index: u64, first: u64 },

    #[error("block index {index} is above latest height {last}")]
    BlockTooHigh { index: u64, last: u64 },

    #[error("block hash {hash} is not known")]
    UnknownBlockHash { hash: String },

    #[error("block hash {hash} does not match canonical hash {want} at height {index}")]
    BlockMismatch {
        index: u64,
        hash: String,
        want: String,
    },

    #[error("block identifier needs both index and hash")]
    IncompleteBlock,

    #[error("transaction hash is not a valid identifier: {hash}")]
    InvalidTransaction { hash: String },

    #[error("transaction {hash} not found in block {index}")]
    UnknownTransaction { hash: String, index: u64 },

    #[error("account address is not valid: {address}")]
    InvalidAccount { address: String },

    #[error("currency {symbol} has {decimals} decimals, expected {want}")]
    InvalidCurrency {
        symbol: String,
        decimals: u64,
        want: u64,
    },

    #[error("currency {symbol} is not supported")]
    UnknownCurrency { symbol: String },
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::InvalidBlockHash { .. }
            | Failure::BlockTooLow { .. }
            | Failure::BlockMismatch { .. } => FailureKind::InvalidBlock,
            Failure::BlockTooHigh { .. } | Failure::UnknownBlockHash { .. } => {
                FailureKind::UnknownBlock
            }
            Failure::IncompleteBlock => FailureKind::IncompleteBlock,
            Failure::InvalidTransaction { .. } => FailureKind::InvalidTransaction,
            Failure::UnknownTransaction { .. } => FailureKind::UnknownTransaction,
            Failure::InvalidAccount { .. } => FailureKind::InvalidAccount,
            Failure::InvalidCurrency { .. } => FailureKind::InvalidCurrency,
            Failure::UnknownCurrency { .. } => FailureKind::UnknownCurrency,
        }
    }

    pub fn description(&self) -> Description {
        let s = |v: &String| FieldValue::Str(v.clone());
        let u = |v: &u64| FieldValue::Uint(*v);

        let fields = match self {
            Failure::InvalidBlockHash { hash } | Failure::UnknownBlockHash { hash } => {
                vec![("block_hash", s(hash))]
            }
            Failure::BlockTooLow { index, first } => {
                vec![("block_index", u(index)), ("first_index", u(first))]
            }
            Failure::BlockTooHigh { index, last } => {
                vec![("block_index", u(index)), ("last_index", u(last))]
            }
            Failure::BlockMismatch { index, hash, want } => vec![
                ("block_index", u(index)),
                ("block_hash", s(hash)),
                ("want_hash", s(want)),
            ],
            Failure::IncompleteBlock => vec![],
            Failure::InvalidTransaction { hash } => vec![("transaction_hash", s(hash))],
            Failure::UnknownTransaction { hash, index } => {
                vec![("transaction_hash", s(hash)), ("block_index", u(index))]
            }
            Failure::InvalidAccount { address } => vec![("address", s(address))],
            Failure::InvalidCurrency {
                symbol,
                decimals,
                want,
            } => vec![
                ("symbol", s(symbol)),
                ("decimals", u(decimals)),
                ("want_decimals", u(want)),
            ],
            Failure::UnknownCurrency { symbol } => vec![("symbol", s(symbol))],
        };

        Description {
            kind: self.kind(),
            message: self.to_string(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            Failure::BlockTooLow { index: 1, first: 5 }.kind(),
            FailureKind::InvalidBlock
        );
        assert_eq!(
            Failure::BlockTooHigh { index: 9, last: 5 }.kind(),
            FailureKind::UnknownBlock
        );
        assert_eq!(Failure::IncompleteBlock.kind(), FailureKind::IncompleteBlock);
    }

    #[test]
    fn test_description_field_order() {
        let failure = Failure::BlockMismatch {
            index: 7,
            hash: "aa".into(),
            want: "bb".into(),
        };
        let description = failure.description();
        let names: Vec<_> = description.fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["block_index", "block_hash", "want_hash"]);
        assert_eq!(description.field("want_hash"), Some(&FieldValue::Str("bb".into())));
        assert_eq!(description.kind, FailureKind::InvalidBlock);
    }

    #[test]
    fn test_description_serializes() {
        let description = Failure::BlockTooHigh { index: 9, last: 5 }.description();
        let json = serde_json::to_value(&description).unwrap();
        assert_eq!(json["kind"], "unknown_block");
        assert_eq!(json["fields"][1][0], "last_index");
        assert_eq!(json["fields"][1][1], 5);
    }
}
