//! Fully qualified event type ids matched against indexed events.

pub const TOKENS_DEPOSITED: &str = "A.{{token.address}}.{{token.type}}.TokensDeposited";

pub const TOKENS_WITHDRAWN: &str = "A.{{token.address}}.{{token.type}}.TokensWithdrawn";

pub const DELEGATOR_REWARDS_PAID: &str =
    "A.{{params.staking_table}}.FlowIDTableStaking.DelegatorRewardsPaid";
