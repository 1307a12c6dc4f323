use super::machine::Outcome;
use super::*;
use crate::chain::{Commitment, MockNetworkClient, SignedTransaction};
use crate::error::{NetworkError, StorageError, WalletError};
use crate::model::catalog::Catalog;
use crate::model::store::MemoryStore;
use crate::notify::CollectingSink;
use async_trait::async_trait;
use rust_decimal_macros::dec;
use shared::dto::notification::NotificationKind;
use std::rc::Rc;
use tokio::sync::oneshot;

const PAYER: &str = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
const KEY: &str = "tokenBalances";

// region: --- Fixtures

#[derive(Clone, Copy)]
enum SignMode {
    Wire,
    Submitted,
    Reject,
}

struct FakeWallet {
    connected: bool,
    mode: SignMode,
    signed: RefCell<Vec<TransferTransaction>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeWallet {
    fn connected() -> Self {
        Self {
            connected: true,
            mode: SignMode::Wire,
            signed: RefCell::new(Vec::new()),
            gate: RefCell::new(None),
        }
    }

    fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::connected()
        }
    }

    fn with_mode(mode: SignMode) -> Self {
        Self {
            mode,
            ..Self::connected()
        }
    }
}

#[async_trait(?Send)]
impl WalletAdapter for FakeWallet {
    fn public_address(&self) -> Option<String> {
        self.connected.then(|| PAYER.to_string())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn connect(&self) -> std::result::Result<String, WalletError> {
        Ok(PAYER.to_string())
    }

    async fn disconnect(&self) -> std::result::Result<(), WalletError> {
        Ok(())
    }

    async fn sign_transaction(
        &self,
        transaction: &TransferTransaction,
    ) -> std::result::Result<SignedTransaction, WalletError> {
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.signed.borrow_mut().push(transaction.clone());
        match self.mode {
            SignMode::Wire => Ok(SignedTransaction::Wire("AQID".to_string())),
            SignMode::Submitted => Ok(SignedTransaction::Submitted("WalletSig".to_string())),
            SignMode::Reject => Err(WalletError::Provider("User rejected the request.".to_string())),
        }
    }
}

/// Store whose writes always fail.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
        Err(StorageError::Write("QuotaExceededError".to_string()))
    }
}

type TestOrchestrator<S> = Orchestrator<FakeWallet, MockNetworkClient, S, Rc<CollectingSink>>;

fn orchestrator<S: KeyValueStore>(
    wallet: FakeWallet,
    network: MockNetworkClient,
    store: S,
) -> (TestOrchestrator<S>, Rc<CollectingSink>) {
    let sink = Rc::new(CollectingSink::new());
    let orchestrator = Orchestrator::new(
        wallet,
        network,
        BalanceLedger::new(store, KEY),
        sink.clone(),
        Config::default(),
    );
    (orchestrator, sink)
}

/// Network that never expects a call.
fn untouched_network() -> MockNetworkClient {
    let mut network = MockNetworkClient::new();
    network.expect_latest_blockhash().never();
    network.expect_send_transaction().never();
    network.expect_confirm_transaction().never();
    network
}

/// Network that accepts and confirms everything.
fn confirming_network() -> MockNetworkClient {
    let mut network = MockNetworkClient::new();
    network
        .expect_latest_blockhash()
        .times(1)
        .returning(|| Ok("EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N".to_string()));
    network
        .expect_send_transaction()
        .withf(|wire| wire == "AQID")
        .times(1)
        .returning(|_| Ok("Sig111".to_string()));
    network
        .expect_confirm_transaction()
        .withf(|signature, commitment| signature == "Sig111" && *commitment == Commitment::Confirmed)
        .times(1)
        .returning(|_, _| Ok(ConfirmationStatus::Confirmed { slot: 42 }));
    network
}

fn default_form() -> SwapForm {
    SwapForm::default_for(Catalog::agri())
}

// endregion: --- Fixtures

#[tokio::test]
async fn test_swap_settles_counter_amount() {
    // Arrange
    let store = MemoryStore::with_entry(KEY, r#"{"USDC": 2}"#);
    let (orchestrator, sink) = orchestrator(FakeWallet::connected(), confirming_network(), store);

    // Act
    let settlement = orchestrator
        .submit_swap(&default_form(), &CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert_eq!(settlement.signature, "Sig111");
    assert_eq!(settlement.slot, 42);
    assert_eq!(settlement.symbol, "USDC");
    assert_eq!(settlement.delta, dec!(2.34));
    assert_eq!(settlement.balance, Some(dec!(4.34)));
    assert_eq!(orchestrator.ledger().balance_of("USDC"), dec!(4.34));
    assert_eq!(
        orchestrator.state(),
        OperationState::Idle(Some(Outcome::Success { signature: "Sig111".to_string() }))
    );
    assert_eq!(
        sink.kinds(),
        vec![NotificationKind::OperationStarted, NotificationKind::OperationSucceeded]
    );
}

#[tokio::test]
async fn test_swap_builds_nominal_self_transfer() {
    let (orchestrator, _sink) = orchestrator(FakeWallet::connected(), confirming_network(), MemoryStore::new());

    orchestrator
        .submit_swap(&default_form(), &CancellationToken::new())
        .await
        .unwrap();

    let signed = orchestrator.wallet().signed.borrow();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0].from, PAYER);
    assert_eq!(signed[0].to, PAYER);
    assert_eq!(signed[0].fee_payer, PAYER);
    assert_eq!(signed[0].lamports, 100);
    assert_eq!(signed[0].recent_blockhash, "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N");
}

#[tokio::test]
async fn test_disconnected_wallet_never_reaches_network() {
    // Arrange
    let store = MemoryStore::new();
    let (orchestrator, sink) = orchestrator(FakeWallet::disconnected(), untouched_network(), store.clone());

    // Act
    let err = orchestrator
        .submit_swap(&default_form(), &CancellationToken::new())
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err, SwapError::Precondition(PreconditionError::WalletNotConnected));
    assert_eq!(sink.kinds(), vec![NotificationKind::WalletNotConnected]);
    assert!(store.is_empty());
    assert_eq!(
        orchestrator.state(),
        OperationState::Idle(Some(Outcome::Rejected(PreconditionError::WalletNotConnected)))
    );
}

#[tokio::test]
async fn test_invalid_amounts_never_reach_network() {
    for input in ["", "0", "-1", "abc"] {
        let (orchestrator, sink) = orchestrator(FakeWallet::connected(), untouched_network(), MemoryStore::new());
        let mut form = default_form();
        form.set_source_amount(input);

        let err = orchestrator
            .submit_swap(&form, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(err.is_precondition(), "input {:?} gave {:?}", input, err);
        assert_eq!(sink.kinds(), vec![NotificationKind::InvalidAmount]);
        assert!(orchestrator.wallet().signed.borrow().is_empty());
    }
}

#[tokio::test]
async fn test_confirmation_error_leaves_ledger_unchanged() {
    // Arrange
    let mut network = MockNetworkClient::new();
    network
        .expect_latest_blockhash()
        .returning(|| Ok("Hash111".to_string()));
    network
        .expect_send_transaction()
        .returning(|_| Ok("Sig111".to_string()));
    network.expect_confirm_transaction().returning(|_, _| {
        Err(NetworkError::Rpc("Transaction was not confirmed in 30.00 seconds".to_string()))
    });
    let store = MemoryStore::with_entry(KEY, r#"{"USDC": 2}"#);
    let (orchestrator, sink) = orchestrator(FakeWallet::connected(), network, store.clone());

    // Act
    let err = orchestrator
        .submit_swap(&default_form(), &CancellationToken::new())
        .await
        .unwrap_err();

    // Assert
    assert_eq!(err.to_string(), "Transaction was not confirmed in 30.00 seconds");
    assert_eq!(store.get(KEY).unwrap().as_deref(), Some(r#"{"USDC": 2}"#));
    let failure = sink.last().unwrap();
    assert_eq!(failure.kind, NotificationKind::OperationFailed);
    assert_eq!(failure.title, "Swap failed");
    assert_eq!(failure.description, "Transaction was not confirmed in 30.00 seconds");
    assert!(matches!(orchestrator.state(), OperationState::Idle(Some(Outcome::Failure(_)))));
}

#[tokio::test]
async fn test_blockhash_failure_is_surfaced_verbatim() {
    let mut network = MockNetworkClient::new();
    network
        .expect_latest_blockhash()
        .times(1)
        .returning(|| Err(NetworkError::Rpc("failed to fetch".to_string())));
    network.expect_send_transaction().never();
    let (orchestrator, sink) = orchestrator(FakeWallet::connected(), network, MemoryStore::new());

    let err = orchestrator
        .submit_swap(&default_form(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err, SwapError::Network("failed to fetch".to_string()));
    assert_eq!(sink.last().unwrap().description, "failed to fetch");
    assert!(orchestrator.wallet().signed.borrow().is_empty());
}

#[tokio::test]
async fn test_failed_on_chain_status_is_a_failure() {
    let mut network = MockNetworkClient::new();
    network
        .expect_latest_blockhash()
        .returning(|| Ok("Hash111".to_string()));
    network
        .expect_send_transaction()
        .returning(|_| Ok("Sig111".to_string()));
    network.expect_confirm_transaction().returning(|_, _| {
        Ok(ConfirmationStatus::Failed {
            slot: 7,
            reason: "InsufficientFundsForRent".to_string(),
        })
    });
    let store = MemoryStore::new();
    let (orchestrator, _sink) = orchestrator(FakeWallet::connected(), network, store.clone());

    let err = orchestrator
        .submit_swap(&default_form(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Transaction failed: InsufficientFundsForRent");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_signing_rejection_is_not_sent() {
    let mut network = MockNetworkClient::new();
    network
        .expect_latest_blockhash()
        .returning(|| Ok("Hash111".to_string()));
    network.expect_send_transaction().never();
    network.expect_confirm_transaction().never();
    let (orchestrator, sink) = orchestrator(FakeWallet::with_mode(SignMode::Reject), network, MemoryStore::new());

    let err = orchestrator
        .submit_swap(&default_form(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err, SwapError::Signing("User rejected the request.".to_string()));
    assert_eq!(sink.last().unwrap().description, "User rejected the request.");
    assert!(!orchestrator.is_busy());
}

#[tokio::test]
async fn test_wallet_broadcast_skips_send() {
    let mut network = MockNetworkClient::new();
    network
        .expect_latest_blockhash()
        .returning(|| Ok("Hash111".to_string()));
    network.expect_send_transaction().never();
    network
        .expect_confirm_transaction()
        .withf(|signature, _| signature == "WalletSig")
        .returning(|_, _| Ok(ConfirmationStatus::Confirmed { slot: 3 }));
    let (orchestrator, _sink) =
        orchestrator(FakeWallet::with_mode(SignMode::Submitted), network, MemoryStore::new());

    let settlement = orchestrator
        .submit_swap(&default_form(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(settlement.signature, "WalletSig");
}

#[tokio::test]
async fn test_mint_settles_amount_and_reports_progress() {
    // Arrange
    let catalog = Catalog::agri();
    let maize = catalog.require("maize").unwrap();
    let (orchestrator, sink) = orchestrator(FakeWallet::connected(), confirming_network(), MemoryStore::new());

    // Act
    let settlement = orchestrator
        .submit_mint(maize, dec!(3), &CancellationToken::new())
        .await
        .unwrap();

    // Assert
    assert_eq!(settlement.symbol, "MAIZE");
    assert_eq!(orchestrator.ledger().balance_of("MAIZE"), dec!(3));
    assert_eq!(orchestrator.wallet().signed.borrow()[0].lamports, 1000);
    assert_eq!(
        sink.kinds(),
        vec![
            NotificationKind::OperationStarted,
            NotificationKind::TransactionSent,
            NotificationKind::OperationSucceeded,
        ]
    );
    assert_eq!(sink.events()[0].title, "Minting 3 MAIZE tokens");
}

#[tokio::test]
async fn test_mint_rejects_zero_amount() {
    let catalog = Catalog::agri();
    let soya = catalog.require("soya").unwrap();
    let (orchestrator, sink) = orchestrator(FakeWallet::connected(), untouched_network(), MemoryStore::new());

    let err = orchestrator
        .submit_mint(soya, Decimal::ZERO, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_precondition());
    assert_eq!(sink.events()[0].description, "Please enter a valid amount to mint.");
}

#[tokio::test]
async fn test_storage_failure_still_reports_success() {
    let (orchestrator, sink) = orchestrator(FakeWallet::connected(), confirming_network(), ReadOnlyStore);

    let settlement = orchestrator
        .submit_swap(&default_form(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(settlement.balance, None);
    assert_eq!(sink.last().unwrap().kind, NotificationKind::OperationSucceeded);
}

#[tokio::test]
async fn test_cancelled_before_signing() {
    let mut network = MockNetworkClient::new();
    network
        .expect_latest_blockhash()
        .returning(|| Ok("Hash111".to_string()));
    network.expect_send_transaction().never();
    let (orchestrator, sink) = orchestrator(FakeWallet::connected(), network, MemoryStore::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = orchestrator.submit_swap(&default_form(), &cancel).await.unwrap_err();

    assert_eq!(err, SwapError::Cancelled);
    assert!(orchestrator.wallet().signed.borrow().is_empty());
    assert_eq!(sink.kinds(), vec![NotificationKind::OperationStarted]);
    assert!(!orchestrator.is_busy());
}

#[tokio::test]
async fn test_cancellation_during_confirmation_skips_ledger_write() {
    // Arrange
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let mut network = MockNetworkClient::new();
    network
        .expect_latest_blockhash()
        .returning(|| Ok("Hash111".to_string()));
    network
        .expect_send_transaction()
        .returning(|_| Ok("Sig111".to_string()));
    network.expect_confirm_transaction().returning(move |_, _| {
        trigger.cancel();
        Ok(ConfirmationStatus::Confirmed { slot: 9 })
    });
    let store = MemoryStore::new();
    let (orchestrator, _sink) = orchestrator(FakeWallet::connected(), network, store.clone());

    // Act
    let err = orchestrator.submit_swap(&default_form(), &cancel).await.unwrap_err();

    // Assert
    assert_eq!(err, SwapError::Cancelled);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_second_submission_while_in_flight_is_refused() {
    // Arrange
    let (release, gate) = oneshot::channel();
    let wallet = FakeWallet::connected();
    *wallet.gate.borrow_mut() = Some(gate);
    let (orchestrator, sink) = orchestrator(wallet, confirming_network(), MemoryStore::new());
    let form = default_form();
    let cancel = CancellationToken::new();

    // Act
    let first = orchestrator.submit_swap(&form, &cancel);
    let second = async {
        // Let the first submission park inside the wallet
        tokio::task::yield_now().await;
        let result = orchestrator.submit_swap(&form, &cancel).await;
        let _ = release.send(());
        result
    };
    let (first, second) = tokio::join!(first, second);

    // Assert
    assert!(first.is_ok());
    assert_eq!(second.unwrap_err(), SwapError::InFlight);
    assert!(sink.kinds().contains(&NotificationKind::OperationBusy));
    assert_eq!(orchestrator.wallet().signed.borrow().len(), 1);
}
