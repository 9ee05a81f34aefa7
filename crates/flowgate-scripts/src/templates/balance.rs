/// Reads the balance of an account's vault for a token
pub const GET_BALANCE: &str = r#"// Reads the balance field of an account's {{token.symbol}} vault

import FungibleToken from 0x{{params.fungible_token}}
import {{token.type}} from 0x{{token.address}}

pub fun main(account: Address): UFix64 {

    let vaultRef = getAccount(account)
        .getCapability({{token.balance}})
        .borrow<&{{token.type}}.Vault{FungibleToken.Balance}>()
        ?? panic("Could not borrow Balance reference to the Vault")

    return vaultRef.balance
}
"#;
