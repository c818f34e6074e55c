//! End-to-end flows through the public API with in-memory wallet and node doubles

use async_trait::async_trait;
use ethers::abi::{encode, Token as AbiToken};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionReceipt, TxHash, U256, U64};
use memefactory_client::{
    Catalog, ChainEndpoint, ClientConfig, ClientError, CreationAttempt, CreationState, ErrorKind,
    FactoryClient, TokenCreationForm, WalletProvider, WalletSession,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const FACTORY: &str = "0x7B79117445C57eea1CEAb4733020A55e1D503934";

/// Node double serving a fixed token list and mining everything it sees
#[derive(Default)]
struct FakeNode {
    records: Vec<AbiToken>,
    calls: AtomicUsize,
    receipt_waits: AtomicUsize,
}

impl FakeNode {
    fn with_records(records: Vec<AbiToken>) -> Self {
        Self { records, ..Default::default() }
    }
}

#[async_trait]
impl ChainEndpoint for FakeNode {
    async fn call(&self, _request: &TypedTransaction) -> Result<Bytes, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Bytes::from(encode(&[AbiToken::Array(self.records.clone())])))
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, ClientError> {
        self.receipt_waits.fetch_add(1, Ordering::SeqCst);
        Ok(Some(TransactionReceipt {
            transaction_hash: tx_hash,
            status: Some(U64::one()),
            ..Default::default()
        }))
    }
}

/// Wallet double that approves everything and remembers what it signed
#[derive(Default)]
struct FakeWallet {
    sent: Mutex<Vec<TypedTransaction>>,
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, ClientError> {
        Ok(vec![Address::repeat_byte(0x42)])
    }

    async fn send_transaction(&self, tx: TypedTransaction) -> Result<TxHash, ClientError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(tx);
        Ok(TxHash::from_low_u64_be(sent.len() as u64))
    }
}

fn record(name: &str, image_url: &str, funding_wei: u64) -> AbiToken {
    AbiToken::Tuple(vec![
        AbiToken::String(name.to_string()),
        AbiToken::String(name.to_uppercase()),
        AbiToken::String(format!("{} token", name)),
        AbiToken::String(image_url.to_string()),
        AbiToken::Uint(U256::from(funding_wei)),
        AbiToken::Address(Address::from_low_u64_be(funding_wei + 1)),
        AbiToken::Address(Address::repeat_byte(0x42)),
    ])
}

fn client(contract_address: &str, node: Arc<FakeNode>) -> FactoryClient {
    FactoryClient::with_endpoint(ClientConfig::new("http://localhost:8545", contract_address), node)
}

#[tokio::test]
async fn catalog_refresh_reports_every_token() {
    let node = Arc::new(FakeNode::with_records(vec![
        record("homer", "https://example.com/homer.png", 1_000_000_000_000_000_000),
        record("bart", "https://example.com/bart.png", 0),
    ]));
    let client = client(FACTORY, node.clone());

    let mut catalog = Catalog::new();
    let count = client.refresh_catalog(&mut catalog).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(catalog.tokens()[0].funding_raised, "1.0");
    assert_eq!(catalog.tokens()[1].funding_raised, "0.0");
    assert_eq!(node.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_second_record_leaves_catalog_empty() {
    let node = Arc::new(FakeNode::with_records(vec![
        record("homer", "https://example.com/homer.png", 1),
        record("bart", "", 1),
    ]));
    let client = client(FACTORY, node);

    let mut catalog = Catalog::new();
    let err = client.refresh_catalog(&mut catalog).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::MalformedResponse);
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn create_token_walks_every_state() {
    let node = Arc::new(FakeNode::default());
    let client = client(FACTORY, node.clone());
    let wallet = Arc::new(FakeWallet::default());

    let mut session = WalletSession::new();
    session.connect(Some(wallet.clone())).await.unwrap();

    let form = TokenCreationForm::new("Homer", "HMR", "", "https://example.com/homer.png");
    let mut attempt = CreationAttempt::new();
    let hash = client.create_token(&mut attempt, form, &session).await.unwrap();

    assert!(!hash.is_zero());
    assert_eq!(
        attempt.transitions(),
        &[
            CreationState::Idle,
            CreationState::Validating,
            CreationState::Submitting,
            CreationState::AwaitingConfirmation,
            CreationState::Confirmed,
        ]
    );
    assert_eq!(wallet.sent.lock().unwrap().len(), 1);
    assert_eq!(node.receipt_waits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn misconfigured_factory_never_reaches_the_network() {
    let node = Arc::new(FakeNode::default());
    let client = client("not-an-address", node.clone());
    let wallet = Arc::new(FakeWallet::default());

    let mut session = WalletSession::new();
    session.connect(Some(wallet.clone())).await.unwrap();

    let form = TokenCreationForm::new("Homer", "HMR", "", "https://example.com/homer.png");
    let mut attempt = CreationAttempt::new();
    let err = client.create_token(&mut attempt, form, &session).await.unwrap_err();

    assert!(matches!(
        err,
        memefactory_client::CreationError::Failed(ref e)
            if e.kind == ErrorKind::InvalidContractAddress
    ));
    assert!(wallet.sent.lock().unwrap().is_empty());
    assert_eq!(node.calls.load(Ordering::SeqCst), 0);
    assert_eq!(node.receipt_waits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn disconnected_session_cannot_submit() {
    let node = Arc::new(FakeNode::default());
    let client = client(FACTORY, node.clone());

    let form = TokenCreationForm::new("Homer", "HMR", "", "https://example.com/homer.png");
    let mut attempt = CreationAttempt::new();
    let err = client
        .create_token(&mut attempt, form, &WalletSession::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        memefactory_client::CreationError::Failed(ref e) if e.kind == ErrorKind::NotConnected
    ));
    assert_eq!(attempt.state(), CreationState::Failed);
    assert_eq!(node.receipt_waits.load(Ordering::SeqCst), 0);
}
