use flowgate_access::{call, ChainAccess, EventIndex, ScriptInvoker};
use flowgate_core::{
    flatten, to_minor_units, AccountIdentifier, Address, Amount, Block, BlockIdentifier,
    ChainParams, Currency, Failure, Token, Transaction, TransactionIdentifier, Value,
};
use flowgate_scripts::Generator;
use flowgate_validator::Validator;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::convert::EventLookup;
use crate::error::RetrieverError;
use crate::staking::delegation;

/// Answers balance, block and transaction queries
///
/// Every query resolves its identifiers through the [`Validator`], renders the
/// scripts it needs through the [`Generator`] and runs them at the resolved
/// height. Collaborator calls are abandoned when the query's token is
/// cancelled.
pub struct Retriever<A, I, E> {
    params: Arc<ChainParams>,
    validator: Validator<A>,
    generator: Arc<Generator>,
    invoker: Arc<I>,
    index: Arc<E>,
    events: EventLookup,
}

impl<A, I, E> Retriever<A, I, E>
where
    A: ChainAccess,
    I: ScriptInvoker,
    E: EventIndex,
{
    pub fn new(
        params: Arc<ChainParams>,
        validator: Validator<A>,
        generator: Arc<Generator>,
        invoker: Arc<I>,
        index: Arc<E>,
    ) -> Result<Self, RetrieverError> {
        let events = EventLookup::new(&generator)?;
        Ok(Retriever {
            params,
            validator,
            generator,
            invoker,
            index,
            events,
        })
    }

    pub fn validator(&self) -> &Validator<A> {
        &self.validator
    }

    /// Balances of an account at a block, one amount per requested currency.
    pub async fn balance(
        &self,
        cancel: &CancellationToken,
        account: &AccountIdentifier,
        block: &BlockIdentifier,
        currencies: &[Currency],
    ) -> Result<(BlockIdentifier, Vec<Amount>), RetrieverError> {
        let address = self.validator.account(account)?;
        let tokens = currencies
            .iter()
            .map(|currency| self.validator.currency(currency))
            .collect::<Result<Vec<_>, _>>()?;

        let (height, block_id) = self.validator.block(cancel, block).await?;
        let args = [Value::address(&address)];

        let mut amounts = Vec::with_capacity(currencies.len());
        for (currency, token) in currencies.iter().zip(&tokens) {
            let mut amount = Amount::new(
                self.vault_balance(cancel, &address, token, &args, height)
                    .await?,
                currency.clone(),
            );

            if token.staking {
                let script = self.generator.get_staked_balance(&token.symbol)?;
                let result = call(
                    cancel,
                    "execute_script",
                    self.invoker.execute(&script, &args, height),
                )
                .await?;
                if let Some(delegation) = delegation(&flatten(&result))? {
                    debug!(
                        "Account {} runs a node with {} delegators",
                        address,
                        delegation.delegators.len()
                    );
                    amount.delegated_value = Some(delegation.delegated_value);
                    amount.delegators = Some(delegation.delegators);
                }
            }

            amounts.push(amount);
        }

        info!(
            "Retrieved {} balances of {} at height {}",
            amounts.len(),
            address,
            height
        );
        Ok((BlockIdentifier::resolved(height, &block_id), amounts))
    }

    /// A block with every transaction's token operations.
    pub async fn block(
        &self,
        cancel: &CancellationToken,
        block: &BlockIdentifier,
    ) -> Result<Block, RetrieverError> {
        let header = self.validator.block_header(cancel, block).await?;
        let (height, block_id) = (header.height, header.id);

        let parent_block_identifier = if height > 0 {
            BlockIdentifier::resolved(height - 1, &header.parent_id)
        } else {
            BlockIdentifier::resolved(height, &block_id)
        };

        let transactions = call(cancel, "transactions", self.index.transactions(height))
            .await?
            .iter()
            .map(|tx| self.events.transaction(&self.params, tx))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Retrieved block {} at height {} with {} transactions",
            block_id,
            height,
            transactions.len()
        );
        Ok(Block {
            block_identifier: BlockIdentifier::resolved(height, &block_id),
            parent_block_identifier,
            timestamp: header.timestamp,
            transactions,
        })
    }

    /// A single transaction of a fully identified block.
    pub async fn transaction(
        &self,
        cancel: &CancellationToken,
        block: &BlockIdentifier,
        transaction: &TransactionIdentifier,
    ) -> Result<Transaction, RetrieverError> {
        self.validator.complete_block(block)?;
        let tx_id = self.validator.transaction(transaction)?;
        let (height, _) = self.validator.block(cancel, block).await?;

        let transactions = call(cancel, "transactions", self.index.transactions(height)).await?;
        let tx = transactions
            .iter()
            .find(|tx| tx.id == tx_id)
            .ok_or_else(|| Failure::UnknownTransaction {
                hash: transaction.hash.clone(),
                index: height,
            })?;

        info!("Retrieved transaction {} at height {}", tx_id, height);
        self.events.transaction(&self.params, tx)
    }

    async fn vault_balance(
        &self,
        cancel: &CancellationToken,
        address: &Address,
        token: &Token,
        args: &[Value],
        height: u64,
    ) -> Result<String, RetrieverError> {
        let script = match self
            .generator
            .custom(&token.symbol, self.params.chain_id, address)?
        {
            Some(script) => script,
            None => self.generator.get_balance(&token.symbol)?,
        };

        let result = call(
            cancel,
            "execute_script",
            self.invoker.execute(&script, args, height),
        )
        .await?;
        let balance = result.as_scalar().ok_or_else(|| RetrieverError::Malformed {
            operation: "balance",
            reason: format!("expected a fixed-point value, got {}", result),
        })?;

        Ok(to_minor_units(balance)?)
    }
}
