//! # Swap/Mint Orchestrator
//!
//! Drives one submission at a time through [`machine::transition`]:
//! validate, fetch a blockhash, have the wallet sign the placeholder
//! self-transfer, confirm it, then settle the counter-amount into the
//! [`BalanceLedger`].
//!
//! Every step is awaited in sequence inside the caller's task. There is no
//! retry and no client-side timeout beyond the network client's own policy.
//! A [`CancellationToken`] is checked before signing and again before the
//! ledger write; network calls already in flight are never aborted.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let orchestrator = Orchestrator::new(wallet, network, ledger, sink, Config::default());
//! let form = SwapForm::default_for(Catalog::agri());
//! let settlement = orchestrator.submit_swap(&form, &CancellationToken::new()).await?;
//! ```

pub mod intent;
pub mod machine;

#[cfg(test)]
mod tests;

use crate::chain::{submit_via_wallet, ConfirmationStatus, NetworkClient, TransferTransaction, WalletAdapter};
use crate::config::Config;
use crate::error::{PreconditionError, Result, SwapError};
use crate::model::catalog::Token;
use crate::model::convert::SwapForm;
use crate::model::store::{BalanceLedger, KeyValueStore};
use crate::notify::{self, NotificationSink};
use intent::{Intent, MintIntent, OperationKind};
use machine::{transition, Event, OperationState, TransitionError};
use rust_decimal::Decimal;
use std::cell::RefCell;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of a settled operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub signature: String,
    pub slot: u64,
    pub symbol: &'static str,
    pub delta: Decimal,
    /// New ledger balance, `None` when the write did not persist.
    pub balance: Option<Decimal>,
}

pub struct Orchestrator<W, N, S, K> {
    wallet: W,
    network: N,
    ledger: BalanceLedger<S>,
    sink: K,
    config: Config,
    state: RefCell<OperationState>,
}

impl<W, N, S, K> Orchestrator<W, N, S, K>
where
    W: WalletAdapter,
    N: NetworkClient,
    S: KeyValueStore,
    K: NotificationSink,
{
    pub fn new(wallet: W, network: N, ledger: BalanceLedger<S>, sink: K, config: Config) -> Self {
        Self {
            wallet,
            network,
            ledger,
            sink,
            config,
            state: RefCell::new(OperationState::default()),
        }
    }

    pub fn state(&self) -> OperationState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    pub fn ledger(&self) -> &BalanceLedger<S> {
        &self.ledger
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Submit the swap currently shown in `form`.
    pub async fn submit_swap(&self, form: &SwapForm, cancel: &CancellationToken) -> Result<Settlement> {
        self.begin()?;

        let prepared = self
            .connected_address()
            .and_then(|address| form.intent().map(|intent| (address, Intent::Swap(intent))));
        self.run(OperationKind::Swap, prepared, self.config.swap_lamports, cancel)
            .await
    }

    /// Mint `amount` units of `token`.
    pub async fn submit_mint(&self, token: &Token, amount: Decimal, cancel: &CancellationToken) -> Result<Settlement> {
        self.begin()?;

        let prepared = self
            .connected_address()
            .and_then(|address| MintIntent::new(token, amount).map(|intent| (address, Intent::Mint(intent))));
        self.run(OperationKind::Mint, prepared, self.config.mint_lamports, cancel)
            .await
    }

    // region: --- Steps

    fn begin(&self) -> Result<()> {
        match self.apply(Event::Submit) {
            Ok(()) => Ok(()),
            Err(SwapError::InFlight) => {
                self.sink.notify(notify::operation_busy());
                Err(SwapError::InFlight)
            }
            Err(e) => Err(e),
        }
    }

    fn connected_address(&self) -> std::result::Result<String, PreconditionError> {
        match self.wallet.public_address() {
            Some(address) if self.wallet.is_connected() => Ok(address),
            _ => Err(PreconditionError::WalletNotConnected),
        }
    }

    async fn run(
        &self,
        kind: OperationKind,
        prepared: std::result::Result<(String, Intent), PreconditionError>,
        lamports: u64,
        cancel: &CancellationToken,
    ) -> Result<Settlement> {
        let (address, intent) = match prepared {
            Ok(prepared) => prepared,
            Err(reason) => {
                info!(operation = kind.verb(), %reason, "Submission rejected");
                self.sink.notify(match reason {
                    PreconditionError::WalletNotConnected => notify::wallet_not_connected(kind),
                    _ => notify::invalid_amount(kind),
                });
                self.apply(Event::Rejected(reason.clone()))?;
                return Err(reason.into());
            }
        };

        self.apply(Event::Validated)?;
        self.sink.notify(match &intent {
            Intent::Swap(swap) => notify::swap_started(swap),
            Intent::Mint(mint) => notify::mint_started(mint),
        });
        info!(operation = kind.verb(), %address, lamports, "Operation started");

        match self.execute(&intent, &address, lamports, cancel).await {
            Ok(settlement) => {
                self.apply(Event::Settled)?;
                self.sink.notify(match &intent {
                    Intent::Swap(swap) => notify::swap_succeeded(swap),
                    Intent::Mint(mint) => notify::mint_succeeded(mint),
                });
                info!(
                    operation = kind.verb(),
                    signature = %settlement.signature,
                    symbol = settlement.symbol,
                    delta = %settlement.delta,
                    "Operation settled"
                );
                Ok(settlement)
            }
            Err(err) => {
                let message = err.to_string();
                self.apply(Event::Failed(message.clone()))?;
                if err != SwapError::Cancelled {
                    self.sink.notify(notify::operation_failed(kind, &message));
                }
                warn!(operation = kind.verb(), error = %message, "Operation failed");
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        intent: &Intent,
        address: &str,
        lamports: u64,
        cancel: &CancellationToken,
    ) -> Result<Settlement> {
        let blockhash = self.network.latest_blockhash().await?;
        debug!(%blockhash, "Fetched latest blockhash");

        if cancel.is_cancelled() {
            return Err(SwapError::Cancelled);
        }

        let transaction = TransferTransaction::self_transfer(address, lamports, &blockhash);
        let signature = submit_via_wallet(&self.wallet, &self.network, &transaction).await?;
        self.apply(Event::Signed {
            signature: signature.clone(),
        })?;
        debug!(%signature, "Transaction submitted");

        if matches!(intent, Intent::Mint(_)) {
            self.sink.notify(notify::transaction_sent());
        }

        let slot = match self
            .network
            .confirm_transaction(&signature, self.config.commitment)
            .await?
        {
            ConfirmationStatus::Confirmed { slot } => slot,
            ConfirmationStatus::Failed { reason, .. } => {
                return Err(SwapError::Operation(format!("Transaction failed: {}", reason)));
            }
        };
        self.apply(Event::Confirmed)?;

        if cancel.is_cancelled() {
            return Err(SwapError::Cancelled);
        }

        let (symbol, delta) = intent.settlement();
        let balance = match self.ledger.merge(symbol, delta) {
            Ok(balance) => Some(balance),
            Err(e) => {
                warn!(%symbol, error = %e, "Settlement confirmed but ledger write did not persist");
                None
            }
        };

        Ok(Settlement {
            signature,
            slot,
            symbol,
            delta,
            balance,
        })
    }

    fn apply(&self, event: Event) -> Result<()> {
        let mut state = self.state.borrow_mut();
        match transition(&state, event) {
            Ok(next) => {
                debug!(from = state.name(), to = next.name(), "State transition");
                *state = next;
                Ok(())
            }
            Err(TransitionError::Busy(_)) => Err(SwapError::InFlight),
            Err(e) => Err(SwapError::Operation(e.to_string())),
        }
    }

    // endregion: --- Steps
}
