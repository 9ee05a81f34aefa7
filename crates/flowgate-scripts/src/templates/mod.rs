pub mod balance;
pub mod events;
pub mod mainnet;
pub mod staked;
pub mod transfer;

pub use balance::GET_BALANCE;
pub use events::{DELEGATOR_REWARDS_PAID, TOKENS_DEPOSITED, TOKENS_WITHDRAWN};
pub use mainnet::MAINNET_OVERRIDES;
pub use staked::GET_STAKED_BALANCE;
pub use transfer::TRANSFER_TOKENS;
