//! Delegation details extracted from the staked balance script result.

use flowgate_core::{parse_ufix64, Delegator, Flattened};

use crate::error::RetrieverError;

const OPERATION: &str = "staked_balance";

/// Delegated stake of a validator account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegation {
    /// Sum of every delegator's delegated value, in minor units
    pub delegated_value: String,
    pub delegators: Vec<Delegator>,
}

/// Read the delegation of a flattened staking result.
///
/// Returns `None` when the account does not operate a node.
pub fn delegation(info: &Flattened) -> Result<Option<Delegation>, RetrieverError> {
    match info.get("node") {
        None => return Err(malformed("missing node field")),
        Some(Flattened::Text(text)) if text == "nil" => return Ok(None),
        Some(_) => {}
    }

    let records = info
        .get("delegators")
        .and_then(Flattened::as_list)
        .ok_or_else(|| malformed("missing delegators list"))?;

    let mut total: u64 = 0;
    let mut delegators = Vec::with_capacity(records.len());
    for record in records {
        let address = text(record, "address")?;
        let committed = amount(record, "tokensCommitted")?;
        let staked = amount(record, "tokensStaked")?;
        let unstaking = amount(record, "tokensUnstaking")?;
        let unstaked = amount(record, "tokensUnstaked")?;
        let rewarded = amount(record, "tokensRewarded")?;

        let delegated = checked_sum(&[committed, staked])?;
        let value = checked_sum(&[committed, staked, unstaking, unstaked, rewarded])?;
        total = total
            .checked_add(delegated)
            .ok_or(RetrieverError::Overflow(OPERATION))?;

        delegators.push(Delegator {
            address: address.to_string(),
            value: value.to_string(),
            delegated_value: delegated.to_string(),
        });
    }

    Ok(Some(Delegation {
        delegated_value: total.to_string(),
        delegators,
    }))
}

fn checked_sum(values: &[u64]) -> Result<u64, RetrieverError> {
    values
        .iter()
        .try_fold(0u64, |acc, v| acc.checked_add(*v))
        .ok_or(RetrieverError::Overflow(OPERATION))
}

fn text<'a>(record: &'a Flattened, field: &str) -> Result<&'a str, RetrieverError> {
    record
        .get(field)
        .and_then(Flattened::as_text)
        .ok_or_else(|| malformed(&format!("delegator without {}", field)))
}

fn amount(record: &Flattened, field: &str) -> Result<u64, RetrieverError> {
    Ok(parse_ufix64(text(record, field)?)?)
}

fn malformed(reason: &str) -> RetrieverError {
    RetrieverError::Malformed {
        operation: OPERATION,
        reason: reason.to_string(),
    }
}
