use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use flowgate_access::ChainAccess;
use flowgate_core::{Address, ChainId, ChainParams, Token};
use flowgate_validator::Validator;
use serde::{Deserialize, Serialize};

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Network served
    pub chain_id: ChainId,

    /// First indexed height; lower block indexes are rejected
    #[serde(default)]
    pub root_height: u64,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Tokens registered on top of the network presets
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,
}

/// A token registry entry as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub symbol: String,
    pub decimals: u32,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Contract account, hex with or without `0x`
    pub address: String,
    pub vault: String,
    pub receiver: String,
    pub balance: String,
    #[serde(default)]
    pub staking: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            chain_id: ChainId::Mainnet,
            root_height: 0,
            log_level: default_log_level(),
            tokens: Vec::new(),
        }
    }
}

impl GatewayConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: GatewayConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Network presets with the configured tokens merged over them
    pub fn to_chain_params(&self) -> Result<ChainParams> {
        self.tokens
            .iter()
            .try_fold(ChainParams::for_chain(self.chain_id), |params, entry| {
                let address = Address::from_hex(&entry.address).map_err(|e| {
                    anyhow::anyhow!("token {} has invalid address {}: {}", entry.symbol, entry.address, e)
                })?;
                Ok::<_, anyhow::Error>(params.with_token(Token {
                    symbol: entry.symbol.clone(),
                    decimals: entry.decimals,
                    type_name: entry.type_name.clone(),
                    address,
                    vault: entry.vault.clone(),
                    receiver: entry.receiver.clone(),
                    balance: entry.balance.clone(),
                    staking: entry.staking,
                }))
            })
    }

    /// Validator over `access` for the configured network, rejecting block
    /// indexes below `root_height`
    pub fn validator<A: ChainAccess>(&self, access: Arc<A>) -> Result<Validator<A>> {
        let params = Arc::new(self.to_chain_params()?);
        Ok(Validator::new(access, params, self.root_height))
    }
}

/// Generate a sample configuration for a local emulator
pub fn generate_sample_config() -> GatewayConfig {
    GatewayConfig {
        chain_id: ChainId::Emulator,
        root_height: 0,
        log_level: default_log_level(),
        tokens: vec![TokenConfig {
            symbol: "FUSD".to_string(),
            decimals: 8,
            type_name: "FUSD".to_string(),
            address: "0xf8d6e0586b0a20c7".to_string(),
            vault: "/storage/fusdVault".to_string(),
            receiver: "/public/fusdReceiver".to_string(),
            balance: "/public/fusdBalance".to_string(),
            staking: false,
        }],
    }
}
