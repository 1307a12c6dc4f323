//! Swap/mint submission context
//!
//! Owns the one orchestrator of the app and mirrors its busy flag into a
//! signal so cards can lock their inputs. Settlements bump a revision
//! counter the balance panel listens to.

use crate::services::{BrowserWallet, JsonRpcClient, LocalStorageStore};
use crate::state::toasts::ToastContext;
use leptos::prelude::*;
use lib_core::config::core_config;
use lib_core::model::store::ledger::Balances;
use lib_core::{BalanceLedger, CancellationToken, Catalog, Orchestrator, Settlement, SwapForm, Token};
use rust_decimal::Decimal;
use std::future::Future;
use std::rc::Rc;

pub type AppOrchestrator = Orchestrator<BrowserWallet, JsonRpcClient, LocalStorageStore, ToastContext>;

#[derive(Clone, Copy)]
pub struct OperationsContext {
    orchestrator: StoredValue<Rc<AppOrchestrator>, LocalStorage>,
    catalog: StoredValue<Catalog>,
    cancel: StoredValue<Option<CancellationToken>>,
    busy: RwSignal<bool>,
    ledger_revision: RwSignal<u64>,
}

impl OperationsContext {
    pub fn new(wallet: BrowserWallet, toasts: ToastContext) -> Self {
        let config = core_config().clone();
        let ledger = BalanceLedger::new(LocalStorageStore, config.storage_key.clone());
        let network = JsonRpcClient::from_config(&config);

        Self {
            orchestrator: StoredValue::new_local(Rc::new(Orchestrator::new(wallet, network, ledger, toasts, config))),
            catalog: StoredValue::new(Catalog::agri()),
            cancel: StoredValue::new(None),
            busy: RwSignal::new(false),
            ledger_revision: RwSignal::new(0),
        }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog.get_value()
    }

    /// True while a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Changes after every settlement.
    pub fn ledger_revision(&self) -> u64 {
        self.ledger_revision.get()
    }

    pub fn ledger_balances(&self) -> Balances {
        self.orchestrator.with_value(|orchestrator| orchestrator.ledger().load())
    }

    pub fn submit_swap(&self, form: SwapForm) {
        self.launch(move |orchestrator, cancel| async move { orchestrator.submit_swap(&form, &cancel).await });
    }

    pub fn submit_mint(&self, token: Token, amount: Decimal) {
        self.launch(move |orchestrator, cancel| async move {
            orchestrator.submit_mint(&token, amount, &cancel).await
        });
    }

    /// Cancel the submission in flight, if any. It stops before signing or
    /// before settling, whichever comes next.
    pub fn cancel_pending(&self) {
        self.cancel.update_value(|cancel| {
            if let Some(token) = cancel.take() {
                token.cancel();
            }
        });
    }

    fn launch<F, Fut>(&self, operation: F)
    where
        F: FnOnce(Rc<AppOrchestrator>, CancellationToken) -> Fut + 'static,
        Fut: Future<Output = lib_core::Result<Settlement>> + 'static,
    {
        let ctx = *self;
        let orchestrator = self.orchestrator.get_value();
        let cancel = CancellationToken::new();

        // A refused submission must not replace the token of the one in flight
        if !orchestrator.is_busy() {
            self.cancel.set_value(Some(cancel.clone()));
            self.busy.set(true);
        }

        leptos::task::spawn_local(async move {
            let result = operation(orchestrator.clone(), cancel).await;
            ctx.busy.set(orchestrator.is_busy());

            match result {
                Ok(settlement) => {
                    log::info!(
                        "Settled {} {} ({}), ledger balance {:?}",
                        settlement.delta,
                        settlement.symbol,
                        settlement.signature,
                        settlement.balance
                    );
                    ctx.ledger_revision.update(|revision| *revision += 1);
                }
                Err(e) => log::warn!("Submission ended without settlement: {}", e),
            }

            if !orchestrator.is_busy() {
                ctx.cancel.set_value(None);
            }
        });
    }
}

pub fn provide_operations_context(wallet: BrowserWallet, toasts: ToastContext) -> OperationsContext {
    let context = OperationsContext::new(wallet, toasts);
    provide_context(context);
    on_cleanup(move || context.cancel_pending());
    context
}

pub fn use_operations_context() -> OperationsContext {
    expect_context::<OperationsContext>()
}
