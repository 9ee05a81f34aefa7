pub mod identifier;
pub mod object;
pub mod params;
pub mod value;

pub use identifier::{AccountIdentifier, BlockIdentifier, Currency, TransactionIdentifier};
pub use object::{
    Amount, Block, Delegator, Operation, OperationIdentifier, OperationType, Transaction,
};
pub use params::{ChainId, ChainParams, Token, FLOW_DECIMALS, FLOW_SYMBOL};
pub use value::{Field, Value};
