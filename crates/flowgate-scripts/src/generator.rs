use flowgate_core::{Address, ChainId, ChainParams, Token};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::error::ScriptError;
use crate::template::Template;
use crate::templates::{
    DELEGATOR_REWARDS_PAID, GET_BALANCE, GET_STAKED_BALANCE, MAINNET_OVERRIDES, TOKENS_DEPOSITED,
    TOKENS_WITHDRAWN, TRANSFER_TOKENS,
};

/// Built-in script and event templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    Balance,
    StakedBalance,
    TransferTokens,
    TokensDeposited,
    TokensWithdrawn,
    DelegatorRewardsPaid,
}

impl ScriptKind {
    pub const ALL: [ScriptKind; 6] = [
        ScriptKind::Balance,
        ScriptKind::StakedBalance,
        ScriptKind::TransferTokens,
        ScriptKind::TokensDeposited,
        ScriptKind::TokensWithdrawn,
        ScriptKind::DelegatorRewardsPaid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScriptKind::Balance => "get_balance",
            ScriptKind::StakedBalance => "get_staked_balance",
            ScriptKind::TransferTokens => "transfer_tokens",
            ScriptKind::TokensDeposited => "tokens_deposited",
            ScriptKind::TokensWithdrawn => "tokens_withdrawn",
            ScriptKind::DelegatorRewardsPaid => "delegator_rewards_paid",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            ScriptKind::Balance => GET_BALANCE,
            ScriptKind::StakedBalance => GET_STAKED_BALANCE,
            ScriptKind::TransferTokens => TRANSFER_TOKENS,
            ScriptKind::TokensDeposited => TOKENS_DEPOSITED,
            ScriptKind::TokensWithdrawn => TOKENS_WITHDRAWN,
            ScriptKind::DelegatorRewardsPaid => DELEGATOR_REWARDS_PAID,
        }
    }

    /// Whether the template renders an event type id rather than a script
    pub fn is_event(&self) -> bool {
        matches!(
            self,
            ScriptKind::TokensDeposited
                | ScriptKind::TokensWithdrawn
                | ScriptKind::DelegatorRewardsPaid
        )
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScriptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        ScriptKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| format!("unknown script kind: {}", s))
    }
}

/// Renders chain scripts and event type ids from compiled templates
///
/// All templates are compiled once at construction. Rendering binds the
/// chain parameters and the token registered under the requested symbol.
pub struct Generator {
    params: Arc<ChainParams>,
    /// Indexed by `ScriptKind` discriminant
    templates: Vec<Template>,
    custom: HashMap<ChainId, HashMap<Address, Template>>,
}

impl Generator {
    pub fn new(params: Arc<ChainParams>) -> Result<Self, ScriptError> {
        let templates = ScriptKind::ALL
            .iter()
            .map(|kind| compile_named(kind.name(), kind.source()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut mainnet = HashMap::new();
        for (address, source) in MAINNET_OVERRIDES {
            let name = format!("mainnet_{}", address.to_hex());
            mainnet.insert(*address, compile_named(&name, source)?);
        }

        let mut custom = HashMap::new();
        custom.insert(ChainId::Mainnet, mainnet);

        debug!(
            "Compiled {} templates and {} overrides for {}",
            templates.len(),
            MAINNET_OVERRIDES.len(),
            params.chain_id
        );

        Ok(Generator {
            params,
            templates,
            custom,
        })
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Render a built-in template for the token registered under `symbol`.
    pub fn render(&self, kind: ScriptKind, symbol: &str) -> Result<Vec<u8>, ScriptError> {
        self.render_with(&self.templates[kind as usize], symbol)
            .map(String::into_bytes)
    }

    /// Script reading the vault balance of an account
    pub fn get_balance(&self, symbol: &str) -> Result<Vec<u8>, ScriptError> {
        self.render(ScriptKind::Balance, symbol)
    }

    /// Script reading the vault balance together with staking totals
    pub fn get_staked_balance(&self, symbol: &str) -> Result<Vec<u8>, ScriptError> {
        self.render(ScriptKind::StakedBalance, symbol)
    }

    /// Transaction moving tokens between accounts
    pub fn transfer_tokens(&self, symbol: &str) -> Result<Vec<u8>, ScriptError> {
        self.render(ScriptKind::TransferTokens, symbol)
    }

    pub fn tokens_deposited(&self, symbol: &str) -> Result<String, ScriptError> {
        self.render_event(ScriptKind::TokensDeposited, symbol)
    }

    pub fn tokens_withdrawn(&self, symbol: &str) -> Result<String, ScriptError> {
        self.render_event(ScriptKind::TokensWithdrawn, symbol)
    }

    pub fn delegator_rewards_paid(&self, symbol: &str) -> Result<String, ScriptError> {
        self.render_event(ScriptKind::DelegatorRewardsPaid, symbol)
    }

    /// Render the override registered for `address` on `chain_id`, if any.
    pub fn custom(
        &self,
        symbol: &str,
        chain_id: ChainId,
        address: &Address,
    ) -> Result<Option<Vec<u8>>, ScriptError> {
        let Some(template) = self
            .custom
            .get(&chain_id)
            .and_then(|overrides| overrides.get(address))
        else {
            return Ok(None);
        };

        debug!("Using custom script for {} on {}", address, chain_id);
        self.render_with(template, symbol)
            .map(|script| Some(script.into_bytes()))
    }

    /// Compile and render an ad-hoc template source.
    pub fn render_source(&self, source: &str, symbol: &str) -> Result<Vec<u8>, ScriptError> {
        let template = Template::compile(source)?;
        self.render_with(&template, symbol).map(String::into_bytes)
    }

    fn render_event(&self, kind: ScriptKind, symbol: &str) -> Result<String, ScriptError> {
        self.render_with(&self.templates[kind as usize], symbol)
    }

    fn render_with(&self, template: &Template, symbol: &str) -> Result<String, ScriptError> {
        let token = self.token(symbol)?;
        Ok(template.render(&self.params, token))
    }

    fn token(&self, symbol: &str) -> Result<&Token, ScriptError> {
        self.params
            .token(symbol)
            .ok_or_else(|| ScriptError::InvalidSymbol(symbol.to_string()))
    }
}

fn compile_named(name: &str, source: &str) -> Result<Template, ScriptError> {
    Template::compile(source).map_err(|reason| ScriptError::Template {
        name: name.to_string(),
        reason,
    })
}
