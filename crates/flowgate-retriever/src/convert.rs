//! Mapping of indexed token events to protocol operations.

use flowgate_access::{Event, IndexedTransaction};
use flowgate_core::{
    flatten, parse_ufix64, AccountIdentifier, Amount, ChainParams, Currency, Flattened, Operation,
    OperationIdentifier, OperationType, Transaction, TransactionIdentifier, Value,
};
use flowgate_scripts::{Generator, ScriptError};
use std::collections::HashMap;
use tracing::debug;

use crate::error::RetrieverError;

/// What a recognized event type means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Deposit,
    Withdrawal,
    Reward,
}

/// Lookup from fully qualified event type to its meaning and token symbol
#[derive(Debug, Clone, Default)]
pub struct EventLookup {
    types: HashMap<String, (EventKind, String)>,
}

/// A token movement read from one event
#[derive(Debug, Clone, PartialEq, Eq)]
struct Movement {
    symbol: String,
    amount: u64,
    address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Reward {
    symbol: String,
    amount: u64,
    node_id: String,
    delegator_id: String,
}

impl EventLookup {
    /// Render the event types of every registered token.
    ///
    /// Reward events come from the staking table and are only registered for
    /// staking tokens.
    pub fn new(generator: &Generator) -> Result<Self, ScriptError> {
        let mut types = HashMap::new();
        for (symbol, token) in &generator.params().tokens {
            types.insert(
                generator.tokens_deposited(symbol)?,
                (EventKind::Deposit, symbol.clone()),
            );
            types.insert(
                generator.tokens_withdrawn(symbol)?,
                (EventKind::Withdrawal, symbol.clone()),
            );
            if token.staking {
                types.insert(
                    generator.delegator_rewards_paid(symbol)?,
                    (EventKind::Reward, symbol.clone()),
                );
            }
        }
        debug!("Registered {} event types", types.len());
        Ok(EventLookup { types })
    }

    pub fn get(&self, type_id: &str) -> Option<(EventKind, &str)> {
        self.types
            .get(type_id)
            .map(|(kind, symbol)| (*kind, symbol.as_str()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Convert a transaction's recognized events into operations.
    ///
    /// A lone withdrawal and a lone deposit of the same amount and token form
    /// a transfer pair. Events without an address and unrecognized events are
    /// dropped. An event missing a field or carrying a bad amount fails the
    /// whole transaction.
    pub fn transaction(
        &self,
        params: &ChainParams,
        tx: &IndexedTransaction,
    ) -> Result<Transaction, RetrieverError> {
        let mut withdrawals = Vec::new();
        let mut deposits = Vec::new();
        let mut rewards = Vec::new();

        for event in &tx.events {
            let Some((kind, symbol)) = self.get(&event.type_id) else {
                continue;
            };
            let fields = flatten(&event.value);
            match kind {
                EventKind::Withdrawal => {
                    withdrawals.extend(movement(event, &fields, symbol, "from")?);
                }
                EventKind::Deposit => {
                    deposits.extend(movement(event, &fields, symbol, "to")?);
                }
                EventKind::Reward => rewards.push(reward(event, &fields, symbol)?),
            }
        }

        let mut builder = OperationBuilder::new(params);

        let is_transfer = matches!(
            (withdrawals.as_slice(), deposits.as_slice()),
            ([from], [to]) if from.amount == to.amount && from.symbol == to.symbol
        );
        if is_transfer {
            let sender = builder.push(OperationType::Transfer, &withdrawals[0], true, None);
            let receiver = builder.push(OperationType::Transfer, &deposits[0], false, None);
            builder.relate(sender, receiver);
        } else {
            for movement in &withdrawals {
                builder.push(OperationType::Withdrawal, movement, true, None);
            }
            for movement in &deposits {
                builder.push(OperationType::Deposit, movement, false, None);
            }
        }

        for reward in rewards {
            let movement = Movement {
                symbol: reward.symbol,
                amount: reward.amount,
                address: reward.node_id,
            };
            builder.push(
                OperationType::Reward,
                &movement,
                false,
                Some(reward.delegator_id),
            );
        }

        Ok(Transaction {
            transaction_identifier: TransactionIdentifier::from_id(&tx.id),
            operations: builder.finish(),
        })
    }
}

/// Assigns dense operation indexes in insertion order
struct OperationBuilder<'a> {
    params: &'a ChainParams,
    operations: Vec<Operation>,
}

impl<'a> OperationBuilder<'a> {
    fn new(params: &'a ChainParams) -> Self {
        OperationBuilder {
            params,
            operations: Vec::new(),
        }
    }

    fn push(
        &mut self,
        kind: OperationType,
        movement: &Movement,
        negative: bool,
        sub_account: Option<String>,
    ) -> usize {
        let decimals = self
            .params
            .token(&movement.symbol)
            .map(|token| token.decimals)
            .unwrap_or_default();
        let value = if negative && movement.amount > 0 {
            format!("-{}", movement.amount)
        } else {
            movement.amount.to_string()
        };

        let index = self.operations.len();
        self.operations.push(Operation {
            operation_identifier: OperationIdentifier {
                index: index as u64,
            },
            related_operations: Vec::new(),
            kind,
            status: Operation::STATUS_COMPLETED.to_string(),
            account: AccountIdentifier {
                address: movement.address.clone(),
                sub_account,
            },
            amount: Amount::new(value, Currency::new(movement.symbol.clone(), decimals)),
        });
        index
    }

    fn relate(&mut self, a: usize, b: usize) {
        let id = |index: usize| OperationIdentifier {
            index: index as u64,
        };
        self.operations[a].related_operations.push(id(b));
        self.operations[b].related_operations.push(id(a));
    }

    fn finish(self) -> Vec<Operation> {
        self.operations
    }
}

fn movement(
    event: &Event,
    fields: &Flattened,
    symbol: &str,
    side: &str,
) -> Result<Option<Movement>, RetrieverError> {
    let address = match required(event, fields, side)? {
        Value::NIL => {
            debug!("Skipping {} event without {} address", event.type_id, side);
            return Ok(None);
        }
        address => address.to_string(),
    };
    let amount = parse_ufix64(required(event, fields, "amount")?)?;
    Ok(Some(Movement {
        symbol: symbol.to_string(),
        amount,
        address,
    }))
}

fn reward(event: &Event, fields: &Flattened, symbol: &str) -> Result<Reward, RetrieverError> {
    Ok(Reward {
        symbol: symbol.to_string(),
        amount: parse_ufix64(required(event, fields, "amount")?)?,
        node_id: required(event, fields, "nodeID")?.to_string(),
        delegator_id: required(event, fields, "delegatorID")?.to_string(),
    })
}

fn required<'a>(
    event: &Event,
    fields: &'a Flattened,
    name: &str,
) -> Result<&'a str, RetrieverError> {
    fields
        .get(name)
        .and_then(Flattened::as_text)
        .ok_or_else(|| RetrieverError::Malformed {
            operation: "events",
            reason: format!("{} event without {} field", event.type_id, name),
        })
}
