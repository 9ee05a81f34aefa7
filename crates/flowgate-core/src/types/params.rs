use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::id::Address;

/// Symbol of the chain's native token
pub const FLOW_SYMBOL: &str = "FLOW";

/// Decimal precision of the native token
pub const FLOW_DECIMALS: u32 = 8;

/// Network a gateway instance serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChainId {
    #[serde(rename = "flow-mainnet")]
    Mainnet,
    #[serde(rename = "flow-testnet")]
    Testnet,
    #[serde(rename = "flow-emulator")]
    Emulator,
    #[serde(rename = "flow-localnet")]
    Localnet,
}

impl ChainId {
    pub const ALL: [ChainId; 4] = [
        ChainId::Mainnet,
        ChainId::Testnet,
        ChainId::Emulator,
        ChainId::Localnet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Mainnet => "flow-mainnet",
            ChainId::Testnet => "flow-testnet",
            ChainId::Emulator => "flow-emulator",
            ChainId::Localnet => "flow-localnet",
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainId::ALL
            .into_iter()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| CoreError::UnknownChain(s.to_string()))
    }
}

/// A fungible token the gateway can report balances for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub decimals: u32,
    /// Contract name declaring the token's vault type
    #[serde(rename = "type")]
    pub type_name: String,
    /// Account the token contract is deployed to
    pub address: Address,
    /// Storage path of an owner's vault
    pub vault: String,
    /// Public path of the receiver capability
    pub receiver: String,
    /// Public path of the balance capability
    pub balance: String,
    /// Whether the token is staked through the staking table
    #[serde(default)]
    pub staking: bool,
}

impl Token {
    /// The native token deployed at `address`
    pub fn flow(address: Address) -> Self {
        Token {
            symbol: FLOW_SYMBOL.to_string(),
            decimals: FLOW_DECIMALS,
            type_name: "FlowToken".to_string(),
            address,
            vault: "/storage/flowTokenVault".to_string(),
            receiver: "/public/flowTokenReceiver".to_string(),
            balance: "/public/flowTokenBalance".to_string(),
            staking: true,
        }
    }
}

/// Process-wide chain configuration: system contracts and the token registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    pub chain_id: ChainId,
    pub fungible_token: Address,
    pub flow_fees: Address,
    pub staking_table: Address,
    pub tokens: BTreeMap<String, Token>,
}

impl ChainParams {
    /// Built-in parameters for a network
    pub fn for_chain(chain_id: ChainId) -> Self {
        let (fungible_token, flow_fees, staking_table, flow_token) = match chain_id {
            ChainId::Mainnet => (
                Address([0xf2, 0x33, 0xdc, 0xee, 0x88, 0xfe, 0x0a, 0xbe]),
                Address([0xf9, 0x19, 0xee, 0x77, 0x44, 0x7b, 0x74, 0x97]),
                Address([0x86, 0x24, 0xb5, 0x2f, 0x9d, 0xdc, 0xd0, 0x4a]),
                Address([0x16, 0x54, 0x65, 0x33, 0x99, 0x04, 0x0a, 0x61]),
            ),
            ChainId::Testnet => (
                Address([0x9a, 0x07, 0x66, 0xd9, 0x3b, 0x66, 0x08, 0xb7]),
                Address([0x91, 0x2d, 0x54, 0x40, 0xf7, 0xe3, 0x76, 0x9e]),
                Address([0x9e, 0xca, 0x2b, 0x38, 0xb1, 0x8b, 0x5d, 0xfe]),
                Address([0x7e, 0x60, 0xdf, 0x04, 0x2a, 0x9c, 0x08, 0x68]),
            ),
            ChainId::Emulator | ChainId::Localnet => (
                Address([0xee, 0x82, 0x85, 0x6b, 0xf2, 0x0e, 0x2a, 0xa6]),
                Address([0xe5, 0xa8, 0xb7, 0xf2, 0x3e, 0x8b, 0x54, 0x8f]),
                Address([0xf8, 0xd6, 0xe0, 0x58, 0x6b, 0x0a, 0x20, 0xc7]),
                Address([0x0a, 0xe5, 0x3c, 0xb6, 0xe3, 0xf4, 0x2a, 0x79]),
            ),
        };

        ChainParams {
            chain_id,
            fungible_token,
            flow_fees,
            staking_table,
            tokens: BTreeMap::new(),
        }
        .with_token(Token::flow(flow_token))
    }

    /// Add or replace a token registry entry
    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens.insert(token.symbol.clone(), token);
        self
    }

    pub fn token(&self, symbol: &str) -> Option<&Token> {
        self.tokens.get(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_names() {
        for chain in ChainId::ALL {
            assert_eq!(chain.as_str().parse::<ChainId>().unwrap(), chain);
            assert_eq!(
                serde_json::to_string(&chain).unwrap(),
                format!("\"{}\"", chain.as_str())
            );
        }
        assert!("flow-devnet".parse::<ChainId>().is_err());
    }

    #[test]
    fn test_mainnet_params() {
        let params = ChainParams::for_chain(ChainId::Mainnet);
        assert_eq!(params.fungible_token.to_hex(), "f233dcee88fe0abe");
        assert_eq!(params.staking_table.to_hex(), "8624b52f9ddcd04a");

        let flow = params.token(FLOW_SYMBOL).unwrap();
        assert_eq!(flow.address.to_hex(), "1654653399040a61");
        assert_eq!(flow.decimals, FLOW_DECIMALS);
        assert!(flow.staking);
    }

    #[test]
    fn test_with_token_replaces() {
        let mut custom = Token::flow(Address([1u8; 8]));
        custom.symbol = "FUSD".to_string();
        custom.type_name = "FUSD".to_string();
        custom.staking = false;

        let params = ChainParams::for_chain(ChainId::Testnet).with_token(custom.clone());
        assert_eq!(params.tokens.len(), 2);
        assert_eq!(params.token("FUSD"), Some(&custom));
    }
}
