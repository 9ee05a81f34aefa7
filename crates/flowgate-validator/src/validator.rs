use flowgate_access::{call, ChainAccess, Header};
use flowgate_core::{
    AccountIdentifier, Address, BlockIdentifier, ChainParams, Currency, Failure, Identifier, Token,
    TransactionIdentifier,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::ValidatorError;

/// Resolves and validates protocol identifiers against chain state
///
/// Holds no mutable state: each resolution re-fetches the headers it needs.
pub struct Validator<A> {
    access: Arc<A>,
    params: Arc<ChainParams>,
    /// Lowest height the gateway serves
    first_height: u64,
}

impl<A: ChainAccess> Validator<A> {
    pub fn new(access: Arc<A>, params: Arc<ChainParams>, first_height: u64) -> Self {
        Validator {
            access,
            params,
            first_height,
        }
    }

    pub fn access(&self) -> &Arc<A> {
        &self.access
    }

    pub fn first_height(&self) -> u64 {
        self.first_height
    }

    /// Resolve a possibly partial block identifier to its height and
    /// canonical id. An empty identifier resolves to the latest block.
    pub async fn block(
        &self,
        cancel: &CancellationToken,
        id: &BlockIdentifier,
    ) -> Result<(u64, Identifier), ValidatorError> {
        let header = self.block_header(cancel, id).await?;
        Ok((header.height, header.id))
    }

    /// Same resolution as [`Validator::block`], returning the canonical header.
    pub async fn block_header(
        &self,
        cancel: &CancellationToken,
        id: &BlockIdentifier,
    ) -> Result<Header, ValidatorError> {
        let given = match id.hash() {
            Some(hash) => Some(Identifier::from_hex(hash).map_err(|_| {
                Failure::InvalidBlockHash {
                    hash: hash.to_string(),
                }
            })?),
            None => None,
        };

        let height = match (id.index, given) {
            (Some(index), _) => {
                self.check_floor(index)?;
                let latest = self.latest(cancel).await?;
                if index > latest.height {
                    return Err(Failure::BlockTooHigh {
                        index,
                        last: latest.height,
                    }
                    .into());
                }
                index
            }
            (None, Some(block_id)) => {
                let header = call(cancel, "header_by_id", self.access.header_by_id(&block_id))
                    .await
                    .map_err(|err| {
                        if err.is_not_found() {
                            ValidatorError::from(Failure::UnknownBlockHash {
                                hash: id.hash().unwrap_or_default().to_string(),
                            })
                        } else {
                            err.into()
                        }
                    })?;
                self.check_floor(header.height)?;
                header.height
            }
            (None, None) => {
                let latest = self.latest(cancel).await?;
                debug!("Resolved latest block to {} at {}", latest.id, latest.height);
                return Ok(latest);
            }
        };

        let header = self.canonical(cancel, height).await?;
        if let Some(hash) = id.hash() {
            let want = header.id.to_hex();
            if hash != want {
                return Err(Failure::BlockMismatch {
                    index: height,
                    hash: hash.to_string(),
                    want,
                }
                .into());
            }
        }

        debug!("Resolved block identifier to {} at {}", header.id, height);
        Ok(header)
    }

    /// Require both index and hash to be present.
    pub fn complete_block(&self, id: &BlockIdentifier) -> Result<(), ValidatorError> {
        if !id.is_complete() {
            return Err(Failure::IncompleteBlock.into());
        }
        Ok(())
    }

    /// Look up the registry entry for a currency and check its precision.
    pub fn currency(&self, currency: &Currency) -> Result<Token, ValidatorError> {
        let token = self
            .params
            .token(&currency.symbol)
            .ok_or_else(|| Failure::UnknownCurrency {
                symbol: currency.symbol.clone(),
            })?;
        if token.decimals != currency.decimals {
            return Err(Failure::InvalidCurrency {
                symbol: currency.symbol.clone(),
                decimals: currency.decimals as u64,
                want: token.decimals as u64,
            }
            .into());
        }
        Ok(token.clone())
    }

    pub fn account(&self, account: &AccountIdentifier) -> Result<Address, ValidatorError> {
        Address::from_hex(&account.address).map_err(|_| {
            Failure::InvalidAccount {
                address: account.address.clone(),
            }
            .into()
        })
    }

    pub fn transaction(&self, id: &TransactionIdentifier) -> Result<Identifier, ValidatorError> {
        Identifier::from_hex(&id.hash).map_err(|_| {
            Failure::InvalidTransaction {
                hash: id.hash.clone(),
            }
            .into()
        })
    }

    fn check_floor(&self, index: u64) -> Result<(), ValidatorError> {
        if index < self.first_height {
            return Err(Failure::BlockTooLow {
                index,
                first: self.first_height,
            }
            .into());
        }
        Ok(())
    }

    async fn latest(&self, cancel: &CancellationToken) -> Result<Header, ValidatorError> {
        Ok(call(cancel, "latest_header", self.access.latest_header()).await?)
    }

    async fn canonical(
        &self,
        cancel: &CancellationToken,
        height: u64,
    ) -> Result<Header, ValidatorError> {
        match call(cancel, "header_by_height", self.access.header_by_height(height)).await {
            Ok(header) => Ok(header),
            Err(err) if err.is_not_found() => {
                let latest = self.latest(cancel).await?;
                Err(Failure::BlockTooHigh {
                    index: height,
                    last: latest.height,
                }
                .into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
