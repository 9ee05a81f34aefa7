//! Balance scripts for mainnet accounts whose tokens live outside their vault.

use flowgate_core::Address;

/// FlowSwapPair: vault balance plus the pair's token1 pool amount
const FLOW_SWAP_PAIR: &str = r#"// Reads the vault balance of the FlowSwapPair account plus its pooled tokens

import FungibleToken from 0x{{params.fungible_token}}
import {{token.type}} from 0x{{token.address}}
import FlowSwapPair from 0xc6c77b9f5c7a378f

pub fun main(account: Address): UFix64 {

    let vaultRef = getAccount(account)
        .getCapability({{token.balance}})
        .borrow<&{{token.type}}.Vault{FungibleToken.Balance}>()
        ?? panic("Could not borrow Balance reference to the Vault")

    return vaultRef.balance + FlowSwapPair.getPoolAmounts().token1Amount
}
"#;

/// Versus: vault balance plus the unique and edition prices of every drop
const VERSUS: &str = r#"// Reads the vault balance of the Versus account plus the value held in drops

import FungibleToken from 0x{{params.fungible_token}}
import {{token.type}} from 0x{{token.address}}
import Versus from 0xd796ff17107bbff6

pub fun main(account: Address): UFix64 {

    let vaultRef = getAccount(account)
        .getCapability({{token.balance}})
        .borrow<&{{token.type}}.Vault{FungibleToken.Balance}>()
        ?? panic("Could not borrow Balance reference to the Vault")

    let publicDrop = getAccount(0xd796ff17107bbff6)
        .getCapability(Versus.CollectionPublicPath)
        .borrow<&{Versus.PublicDrop}>()
        ?? panic("Could not borrow reference to the PublicDrop")

    let allStatuses = publicDrop.getAllStatuses()

    var totalFlow = 0.0

    for dropId in allStatuses.keys {
        let dropStatus = allStatuses[dropId]
        totalFlow = totalFlow + (dropStatus?.uniquePrice ?? 0.0) + (dropStatus?.editionPrice ?? 0.0)
    }

    return totalFlow + vaultRef.balance
}
"#;

/// Override sources keyed by the account address they apply to
pub const MAINNET_OVERRIDES: &[(Address, &str)] = &[
    (Address([0xc6, 0xc7, 0x7b, 0x9f, 0x5c, 0x7a, 0x37, 0x8f]), FLOW_SWAP_PAIR),
    (Address([0xd7, 0x96, 0xff, 0x17, 0x10, 0x7b, 0xbf, 0xf6]), VERSUS),
];
