/// Reads an account's vault balance together with the staking table totals,
/// and the node and delegators the account operates if it runs a node.
///
/// Result fields: `node` (`nil` unless the account holds a node staker),
/// `delegators` (one record per delegator of that node) and `stakedBalance`
/// (vault balance plus every token recorded in the staking table).
pub const GET_STAKED_BALANCE: &str = r#"// Reads the {{token.symbol}} vault balance of an account, the total staked
// across all nodes and delegators, and the account's own node if it has one

import FungibleToken from 0x{{params.fungible_token}}
import {{token.type}} from 0x{{token.address}}
import FlowIDTableStaking from 0x{{params.staking_table}}

pub struct DelegatorStake {
    pub let address: String
    pub let nodeID: String
    pub let tokensCommitted: UFix64
    pub let tokensStaked: UFix64
    pub let tokensUnstaking: UFix64
    pub let tokensUnstaked: UFix64
    pub let tokensRewarded: UFix64
    pub let tokensRequestedToUnstake: UFix64

    init(info: FlowIDTableStaking.DelegatorInfo) {
        self.address = info.id.toString()
        self.nodeID = info.nodeID
        self.tokensCommitted = info.tokensCommitted
        self.tokensStaked = info.tokensStaked
        self.tokensUnstaking = info.tokensUnstaking
        self.tokensUnstaked = info.tokensUnstaked
        self.tokensRewarded = info.tokensRewarded
        self.tokensRequestedToUnstake = info.tokensRequestedToUnstake
    }
}

pub struct StakingInfo {
    pub let node: FlowIDTableStaking.NodeInfo?
    pub let delegators: [DelegatorStake]
    pub let stakedBalance: UFix64

    init(node: FlowIDTableStaking.NodeInfo?, delegators: [DelegatorStake], stakedBalance: UFix64) {
        self.node = node
        self.delegators = delegators
        self.stakedBalance = stakedBalance
    }
}

pub fun main(account: Address): StakingInfo {

    let vaultRef = getAccount(account)
        .getCapability({{token.balance}})
        .borrow<&{{token.type}}.Vault{FungibleToken.Balance}>()
        ?? panic("Could not borrow Balance reference to the Vault")

    let vaultBalance = vaultRef.balance

    var totalTokens: UFix64 = 0.0

    for nodeID in FlowIDTableStaking.getNodeIDs() {
        let nodeInfo = FlowIDTableStaking.NodeInfo(nodeID: nodeID)

        totalTokens = totalTokens + nodeInfo.totalTokensInRecord()

        for delegatorID in nodeInfo.delegators {
            let delegatorInfo = FlowIDTableStaking.DelegatorInfo(nodeID: nodeID, delegatorID: delegatorID)
            totalTokens = totalTokens + delegatorInfo.totalTokensInRecord()
        }
    }

    var node: FlowIDTableStaking.NodeInfo? = nil
    var delegators: [DelegatorStake] = []

    let staker = getAuthAccount(account)
        .borrow<&FlowIDTableStaking.NodeStaker>(from: FlowIDTableStaking.NodeStakerStoragePath)

    if staker != nil {
        let info = FlowIDTableStaking.NodeInfo(nodeID: staker!.id)
        for delegatorID in info.delegators {
            let delegatorInfo = FlowIDTableStaking.DelegatorInfo(nodeID: info.id, delegatorID: delegatorID)
            delegators.append(DelegatorStake(info: delegatorInfo))
        }
        node = info
    }

    return StakingInfo(node: node, delegators: delegators, stakedBalance: vaultBalance + totalTokens)
}
"#;
