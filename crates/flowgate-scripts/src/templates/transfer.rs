/// Moves tokens from the signer's vault into a recipient's receiver
pub const TRANSFER_TOKENS: &str = r#"// Transfers {{token.symbol}} from the signer to a recipient

import FungibleToken from 0x{{params.fungible_token}}
import {{token.type}} from 0x{{token.address}}

transaction(amount: UFix64, to: Address) {

    let sentVault: @FungibleToken.Vault

    prepare(signer: AuthAccount) {

        let vaultRef = signer.borrow<&{{token.type}}.Vault>(from: {{token.vault}})
            ?? panic("Could not borrow reference to the owner's Vault!")

        self.sentVault <- vaultRef.withdraw(amount: amount)
    }

    execute {

        let receiverRef = getAccount(to)
            .getCapability({{token.receiver}})
            .borrow<&{FungibleToken.Receiver}>()
            ?? panic("Could not borrow receiver reference to the recipient's Vault")

        receiverRef.deposit(from: <-self.sentVault)
    }
}
"#;
