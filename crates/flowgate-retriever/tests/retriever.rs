use async_trait::async_trait;
use flowgate_access::{AccessError, ChainAccess, Event, Header, IndexedTransaction, MemoryChain};
use flowgate_core::{
    AccountIdentifier, Address, BlockIdentifier, ChainId, ChainParams, Currency, FailureKind,
    Field, FixedPointError, Identifier, OperationType, Token, TransactionIdentifier, Value,
    FLOW_SYMBOL,
};
use flowgate_retriever::{Retriever, RetrieverError};
use flowgate_scripts::Generator;
use flowgate_validator::Validator;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const ACCOUNT: &str = "0x0000000000000a11";
const HEAD: u64 = 40;

type MemoryRetriever = Retriever<MemoryChain, MemoryChain, MemoryChain>;

fn build(chain: MemoryChain, chain_id: ChainId) -> MemoryRetriever {
    build_with(chain, ChainParams::for_chain(chain_id))
}

fn build_with(chain: MemoryChain, params: ChainParams) -> MemoryRetriever {
    let params = Arc::new(params);
    let generator = Arc::new(Generator::new(params.clone()).unwrap());
    let chain = Arc::new(chain);
    let validator = Validator::new(chain.clone(), params.clone(), 0);
    Retriever::new(params, validator, generator, chain.clone(), chain).unwrap()
}

fn generator(chain_id: ChainId) -> Generator {
    Generator::new(Arc::new(ChainParams::for_chain(chain_id))).unwrap()
}

fn args(address: &str) -> Vec<Value> {
    vec![Value::address(&Address::from_hex(address).unwrap())]
}

fn flow() -> Currency {
    Currency::new(FLOW_SYMBOL, 8)
}

fn staking_info(node: Value, delegators: Vec<Value>) -> Value {
    Value::record(
        "s.0.StakingInfo",
        vec![
            Field::new("node", node),
            Field::new("delegators", Value::List(delegators)),
            Field::new("stakedBalance", Value::scalar("1000.00000000")),
        ],
    )
}

fn delegator_stake(id: u32, committed: &str, staked: &str, rewarded: &str) -> Value {
    Value::record(
        "s.0.DelegatorStake",
        vec![
            Field::new("address", Value::string(&id.to_string())),
            Field::new("nodeID", Value::string("node-1")),
            Field::new("tokensCommitted", Value::scalar(committed)),
            Field::new("tokensStaked", Value::scalar(staked)),
            Field::new("tokensUnstaking", Value::scalar("0.00000000")),
            Field::new("tokensUnstaked", Value::scalar("0.00000000")),
            Field::new("tokensRewarded", Value::scalar(rewarded)),
            Field::new("tokensRequestedToUnstake", Value::scalar("0.00000000")),
        ],
    )
}

/// Chain with the balance and staked scripts answered for `address`.
fn chain_with_balance(chain_id: ChainId, address: &str, balance: &str, staking: Value) -> MemoryChain {
    let generator = generator(chain_id);
    let mut chain = MemoryChain::linear(0, HEAD);
    let args = args(address);
    let script = generator
        .custom(FLOW_SYMBOL, chain_id, &Address::from_hex(address).unwrap())
        .unwrap()
        .unwrap_or_else(|| generator.get_balance(FLOW_SYMBOL).unwrap());
    chain.set_script_result(&script, &args, Value::scalar(balance));
    chain.set_script_result(
        &generator.get_staked_balance(FLOW_SYMBOL).unwrap(),
        &args,
        staking,
    );
    chain
}

#[tokio::test]
async fn test_balance_non_validator() {
    let chain = chain_with_balance(
        ChainId::Testnet,
        ACCOUNT,
        "12.34567890",
        staking_info(Value::nil(), vec![]),
    );
    let retriever = build(chain, ChainId::Testnet);

    let (block, amounts) = retriever
        .balance(
            &CancellationToken::new(),
            &AccountIdentifier::new(ACCOUNT),
            &BlockIdentifier::latest(),
            &[flow()],
        )
        .await
        .unwrap();

    assert_eq!(block, BlockIdentifier::resolved(HEAD, &MemoryChain::block_id(HEAD)));
    assert_eq!(amounts.len(), 1);
    assert_eq!(amounts[0].value, "1234567890");
    assert_eq!(amounts[0].currency, flow());
    assert_eq!(amounts[0].delegated_value, None);
    assert_eq!(amounts[0].delegators, None);

    let json = serde_json::to_value(&amounts[0]).unwrap();
    assert!(json.get("delegators").is_none());
}

#[tokio::test]
async fn test_balance_validator() {
    let node = Value::record(
        "A.9eca2b38b18b5dfe.FlowIDTableStaking.NodeInfo",
        vec![Field::new("id", Value::string("node-1"))],
    );
    let chain = chain_with_balance(
        ChainId::Testnet,
        ACCOUNT,
        "5.00000000",
        staking_info(
            node,
            vec![
                delegator_stake(1, "1.00000000", "2.00000000", "0.10000000"),
                delegator_stake(2, "0.00000000", "4.00000000", "0.00000000"),
            ],
        ),
    );
    let retriever = build(chain, ChainId::Testnet);

    let (_, amounts) = retriever
        .balance(
            &CancellationToken::new(),
            &AccountIdentifier::new(ACCOUNT),
            &BlockIdentifier::from_index(10),
            &[flow()],
        )
        .await
        .unwrap();

    let amount = &amounts[0];
    assert_eq!(amount.value, "500000000");
    assert_eq!(amount.delegated_value.as_deref(), Some("700000000"));

    let delegators = amount.delegators.as_ref().unwrap();
    assert_eq!(delegators.len(), 2);
    assert_eq!(delegators[0].address, "1");
    assert_eq!(delegators[0].value, "310000000");
    assert_eq!(delegators[0].delegated_value, "300000000");
    assert_eq!(delegators[1].value, "400000000");
}

#[tokio::test]
async fn test_balance_custom_override() {
    let swap = "0xc6c77b9f5c7a378f";
    let chain = chain_with_balance(
        ChainId::Mainnet,
        swap,
        "99.00000000",
        staking_info(Value::nil(), vec![]),
    );
    let retriever = build(chain, ChainId::Mainnet);

    let (_, amounts) = retriever
        .balance(
            &CancellationToken::new(),
            &AccountIdentifier::new(swap),
            &BlockIdentifier::latest(),
            &[flow()],
        )
        .await
        .unwrap();
    assert_eq!(amounts[0].value, "9900000000");
}

#[tokio::test]
async fn test_balance_rejects_bad_inputs() {
    let retriever = build(MemoryChain::linear(0, HEAD), ChainId::Testnet);
    let cancel = CancellationToken::new();

    let err = retriever
        .balance(&cancel, &AccountIdentifier::new("0xzz"), &BlockIdentifier::latest(), &[flow()])
        .await
        .unwrap_err();
    assert_eq!(err.failure().map(|f| f.kind()), Some(FailureKind::InvalidAccount));

    let err = retriever
        .balance(
            &cancel,
            &AccountIdentifier::new(ACCOUNT),
            &BlockIdentifier::latest(),
            &[Currency::new("USDC", 6)],
        )
        .await
        .unwrap_err();
    assert_eq!(err.failure().map(|f| f.kind()), Some(FailureKind::UnknownCurrency));

    let err = retriever
        .balance(
            &cancel,
            &AccountIdentifier::new(ACCOUNT),
            &BlockIdentifier::from_index(HEAD + 1),
            &[flow()],
        )
        .await
        .unwrap_err();
    assert_eq!(err.failure().map(|f| f.kind()), Some(FailureKind::UnknownBlock));
}

#[tokio::test]
async fn test_balance_non_scalar_result() {
    let generator = generator(ChainId::Testnet);
    let mut chain = MemoryChain::linear(0, HEAD);
    chain.set_script_result(
        &generator.get_balance(FLOW_SYMBOL).unwrap(),
        &args(ACCOUNT),
        Value::List(vec![]),
    );
    let retriever = build(chain, ChainId::Testnet);

    let err = retriever
        .balance(
            &CancellationToken::new(),
            &AccountIdentifier::new(ACCOUNT),
            &BlockIdentifier::latest(),
            &[flow()],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RetrieverError::Malformed { operation: "balance", .. }));
}

#[tokio::test]
async fn test_balance_cancelled() {
    let chain = chain_with_balance(
        ChainId::Testnet,
        ACCOUNT,
        "1.00000000",
        staking_info(Value::nil(), vec![]),
    );
    let retriever = build(chain, ChainId::Testnet);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = retriever
        .balance(&cancel, &AccountIdentifier::new(ACCOUNT), &BlockIdentifier::latest(), &[flow()])
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}

fn transfer_transaction(generator: &Generator, id: Identifier) -> IndexedTransaction {
    let event = |type_id: String, side: &str, address: &str| Event {
        value: Value::record(
            type_id.clone(),
            vec![
                Field::new("amount", Value::scalar("3.00000000")),
                Field::new(side, Value::address(&Address::from_hex(address).unwrap())),
            ],
        ),
        type_id,
    };
    IndexedTransaction {
        id,
        events: vec![
            event(generator.tokens_withdrawn(FLOW_SYMBOL).unwrap(), "from", ACCOUNT),
            event(generator.tokens_deposited(FLOW_SYMBOL).unwrap(), "to", "0x0000000000000b0b"),
        ],
    }
}

#[tokio::test]
async fn test_block() {
    let generator = generator(ChainId::Testnet);
    let mut chain = MemoryChain::linear(0, HEAD);
    chain.add_transaction(7, transfer_transaction(&generator, Identifier([1u8; 32])));
    let retriever = build(chain, ChainId::Testnet);

    let block = retriever
        .block(&CancellationToken::new(), &BlockIdentifier::from_index(7))
        .await
        .unwrap();

    assert_eq!(block.block_identifier, BlockIdentifier::resolved(7, &MemoryChain::block_id(7)));
    assert_eq!(
        block.parent_block_identifier,
        BlockIdentifier::resolved(6, &MemoryChain::block_id(6))
    );
    assert_eq!(block.timestamp, 1_600_000_007_000);
    assert_eq!(block.transactions.len(), 1);

    let ops = &block.transactions[0].operations;
    assert_eq!(ops.len(), 2);
    assert!(ops.iter().all(|op| op.kind == OperationType::Transfer));
    assert_eq!(ops[0].amount.value, "-300000000");
}

#[tokio::test]
async fn test_transaction() {
    let generator = generator(ChainId::Testnet);
    let mut chain = MemoryChain::linear(0, HEAD);
    let tx_id = Identifier([2u8; 32]);
    chain.add_transaction(9, transfer_transaction(&generator, tx_id));
    let retriever = build(chain, ChainId::Testnet);
    let cancel = CancellationToken::new();
    let block = BlockIdentifier::resolved(9, &MemoryChain::block_id(9));

    let transaction = retriever
        .transaction(&cancel, &block, &TransactionIdentifier::from_id(&tx_id))
        .await
        .unwrap();
    assert_eq!(transaction.transaction_identifier.hash, tx_id.to_hex());
    assert_eq!(transaction.operations.len(), 2);

    let err = retriever
        .transaction(&cancel, &block, &TransactionIdentifier::from_id(&Identifier([3u8; 32])))
        .await
        .unwrap_err();
    assert_eq!(err.failure().map(|f| f.kind()), Some(FailureKind::UnknownTransaction));

    let err = retriever
        .transaction(
            &cancel,
            &BlockIdentifier::from_index(9),
            &TransactionIdentifier::from_id(&tx_id),
        )
        .await
        .unwrap_err();
    assert_eq!(err.failure().map(|f| f.kind()), Some(FailureKind::IncompleteBlock));
}

fn fusd() -> Token {
    Token {
        symbol: "FUSD".to_string(),
        decimals: 8,
        type_name: "FUSD".to_string(),
        address: Address::from_hex("0xe223d8a629e49c68").unwrap(),
        vault: "/storage/fusdVault".to_string(),
        receiver: "/public/fusdReceiver".to_string(),
        balance: "/public/fusdBalance".to_string(),
        staking: false,
    }
}

#[tokio::test]
async fn test_balance_multiple_currencies() {
    let params = ChainParams::for_chain(ChainId::Testnet).with_token(fusd());
    let generator = Generator::new(Arc::new(params.clone())).unwrap();
    let node = Value::record(
        "A.9eca2b38b18b5dfe.FlowIDTableStaking.NodeInfo",
        vec![Field::new("id", Value::string("node-1"))],
    );

    let mut chain = MemoryChain::linear(0, HEAD);
    let args = args(ACCOUNT);
    chain.set_script_result(
        &generator.get_balance(FLOW_SYMBOL).unwrap(),
        &args,
        Value::scalar("2.00000000"),
    );
    chain.set_script_result(
        &generator.get_staked_balance(FLOW_SYMBOL).unwrap(),
        &args,
        staking_info(
            node,
            vec![delegator_stake(1, "0.00000000", "1.00000000", "0.00000000")],
        ),
    );
    chain.set_script_result(
        &generator.get_balance("FUSD").unwrap(),
        &args,
        Value::scalar("7.25000000"),
    );
    let retriever = build_with(chain, params);
    let fusd_currency = Currency::new("FUSD", 8);

    let (_, amounts) = retriever
        .balance(
            &CancellationToken::new(),
            &AccountIdentifier::new(ACCOUNT),
            &BlockIdentifier::latest(),
            &[fusd_currency.clone(), flow()],
        )
        .await
        .unwrap();

    assert_eq!(amounts.len(), 2);
    assert_eq!(amounts[0].currency, fusd_currency);
    assert_eq!(amounts[0].value, "725000000");
    assert_eq!(amounts[0].delegated_value, None);
    assert_eq!(amounts[0].delegators, None);

    assert_eq!(amounts[1].currency, flow());
    assert_eq!(amounts[1].value, "200000000");
    assert_eq!(amounts[1].delegated_value.as_deref(), Some("100000000"));
    assert_eq!(amounts[1].delegators.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_block_with_bad_event_amount() {
    let generator = generator(ChainId::Testnet);
    let type_id = generator.tokens_deposited(FLOW_SYMBOL).unwrap();
    let mut chain = MemoryChain::linear(0, HEAD);
    chain.add_transaction(
        5,
        IndexedTransaction {
            id: Identifier([5u8; 32]),
            events: vec![Event {
                value: Value::record(
                    type_id.clone(),
                    vec![
                        Field::new("amount", Value::scalar("1.5")),
                        Field::new("to", Value::address(&Address::from_hex(ACCOUNT).unwrap())),
                    ],
                ),
                type_id,
            }],
        },
    );
    let retriever = build(chain, ChainId::Testnet);
    let cancel = CancellationToken::new();

    let err = retriever
        .block(&cancel, &BlockIdentifier::from_index(5))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RetrieverError::FixedPoint(FixedPointError::FractionDigits { got: 1 })
    ));
    assert_eq!(err.failure(), None);

    let err = retriever
        .transaction(
            &cancel,
            &BlockIdentifier::resolved(5, &MemoryChain::block_id(5)),
            &TransactionIdentifier::from_id(&Identifier([5u8; 32])),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RetrieverError::FixedPoint(_)));
}

/// Header source that counts lookups by height
struct CountingChain {
    inner: MemoryChain,
    by_height: AtomicUsize,
}

#[async_trait]
impl ChainAccess for CountingChain {
    async fn latest_header(&self) -> Result<Header, AccessError> {
        self.inner.latest_header().await
    }

    async fn header_by_height(&self, height: u64) -> Result<Header, AccessError> {
        self.by_height.fetch_add(1, Ordering::SeqCst);
        self.inner.header_by_height(height).await
    }

    async fn header_by_id(&self, id: &Identifier) -> Result<Header, AccessError> {
        self.inner.header_by_id(id).await
    }
}

#[tokio::test]
async fn test_block_fetches_header_once() {
    let params = Arc::new(ChainParams::for_chain(ChainId::Testnet));
    let generator = Arc::new(Generator::new(params.clone()).unwrap());
    let access = Arc::new(CountingChain {
        inner: MemoryChain::linear(0, HEAD),
        by_height: AtomicUsize::new(0),
    });
    let index = Arc::new(MemoryChain::linear(0, HEAD));
    let validator = Validator::new(access.clone(), params.clone(), 0);
    let retriever = Retriever::new(params, validator, generator, index.clone(), index).unwrap();

    let block = retriever
        .block(&CancellationToken::new(), &BlockIdentifier::from_index(12))
        .await
        .unwrap();

    assert_eq!(block.timestamp, 1_600_000_012_000);
    assert_eq!(
        block.parent_block_identifier,
        BlockIdentifier::resolved(11, &MemoryChain::block_id(11))
    );
    assert_eq!(access.by_height.load(Ordering::SeqCst), 1);
}
