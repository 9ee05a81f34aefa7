//! Minimal placeholder templates.
//!
//! A template source is split once into literal text and `{{ path }}`
//! placeholders. Paths are resolved at compile time to [`Slot`]s, so rendering
//! can only fail on inputs that compiled, never on the source itself.

use flowgate_core::{ChainParams, Token};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Unterminated placeholder at byte {0}")]
    Unterminated(usize),

    #[error("Unknown placeholder: {0}")]
    UnknownPlaceholder(String),
}

/// A value a placeholder can be bound to
///
/// Addresses render as bare hex; sources add the `0x` prefix where the
/// chain syntax needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    ChainId,
    FungibleToken,
    FlowFees,
    StakingTable,
    TokenSymbol,
    TokenType,
    TokenAddress,
    TokenVault,
    TokenReceiver,
    TokenBalance,
}

impl Slot {
    fn parse(path: &str) -> Option<Slot> {
        let slot = match path {
            "params.chain_id" => Slot::ChainId,
            "params.fungible_token" => Slot::FungibleToken,
            "params.flow_fees" => Slot::FlowFees,
            "params.staking_table" => Slot::StakingTable,
            "token.symbol" => Slot::TokenSymbol,
            "token.type" => Slot::TokenType,
            "token.address" => Slot::TokenAddress,
            "token.vault" => Slot::TokenVault,
            "token.receiver" => Slot::TokenReceiver,
            "token.balance" => Slot::TokenBalance,
            _ => return None,
        };
        Some(slot)
    }

    fn write(&self, out: &mut String, params: &ChainParams, token: &Token) {
        match self {
            Slot::ChainId => out.push_str(params.chain_id.as_str()),
            Slot::FungibleToken => out.push_str(&params.fungible_token.to_hex()),
            Slot::FlowFees => out.push_str(&params.flow_fees.to_hex()),
            Slot::StakingTable => out.push_str(&params.staking_table.to_hex()),
            Slot::TokenSymbol => out.push_str(&token.symbol),
            Slot::TokenType => out.push_str(&token.type_name),
            Slot::TokenAddress => out.push_str(&token.address.to_hex()),
            Slot::TokenVault => out.push_str(&token.vault),
            Slot::TokenReceiver => out.push_str(&token.receiver),
            Slot::TokenBalance => out.push_str(&token.balance),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Slot),
}

/// A compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn compile(source: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 2..];
            let close = after
                .find("}}")
                .ok_or(TemplateError::Unterminated(offset + open))?;
            let path = after[..close].trim();
            let slot =
                Slot::parse(path).ok_or_else(|| TemplateError::UnknownPlaceholder(path.to_string()))?;
            segments.push(Segment::Placeholder(slot));

            let consumed = open + 2 + close + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Template { segments })
    }

    pub fn render(&self, params: &ChainParams, token: &Token) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(slot) => slot.write(&mut out, params, token),
            }
        }
        out
    }

    /// Placeholders in source order
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(slot) => Some(*slot),
            Segment::Literal(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgate_core::{ChainId, FLOW_SYMBOL};

    fn mainnet() -> (ChainParams, Token) {
        let params = ChainParams::for_chain(ChainId::Mainnet);
        let token = params.token(FLOW_SYMBOL).unwrap().clone();
        (params, token)
    }

    #[test]
    fn test_render_placeholders() {
        let (params, token) = mainnet();
        let template =
            Template::compile("import {{token.type}} from 0x{{ token.address }} // {{params.chain_id}}")
                .unwrap();
        assert_eq!(
            template.render(&params, &token),
            "import FlowToken from 0x1654653399040a61 // flow-mainnet"
        );
        assert_eq!(
            template.slots().collect::<Vec<_>>(),
            vec![Slot::TokenType, Slot::TokenAddress, Slot::ChainId]
        );
    }

    #[test]
    fn test_plain_text() {
        let (params, token) = mainnet();
        let template = Template::compile("pub fun main() {}").unwrap();
        assert_eq!(template.render(&params, &token), "pub fun main() {}");
        assert_eq!(template.slots().count(), 0);
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(
            Template::compile("abc {{token.type").unwrap_err(),
            TemplateError::Unterminated(4)
        );
        assert_eq!(
            Template::compile("{{token.owner}}").unwrap_err(),
            TemplateError::UnknownPlaceholder("token.owner".to_string())
        );
    }
}
