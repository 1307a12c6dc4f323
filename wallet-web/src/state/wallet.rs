//! Wallet state management

use crate::services::wallet::{BrowserWallet, WalletProvider, WalletState};
use crate::state::toasts::ToastContext;
use leptos::prelude::*;
use lib_core::session::WalletSession;
use std::rc::Rc;

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub wallet: BrowserWallet,
    session: StoredValue<Rc<WalletSession>, LocalStorage>,
    toasts: ToastContext,
}

impl WalletContext {
    pub fn new(toasts: ToastContext) -> Self {
        Self {
            wallet: BrowserWallet::new(),
            session: StoredValue::new_local(Rc::new(WalletSession::new())),
            toasts,
        }
    }

    pub fn state(&self) -> ReadSignal<WalletState> {
        self.wallet.state()
    }

    pub fn is_connected(&self) -> bool {
        self.state().with(WalletState::is_connected)
    }

    pub fn address(&self) -> Option<String> {
        self.state().with(|state| state.address().map(str::to_string))
    }

    pub fn provider(&self) -> Option<WalletProvider> {
        self.state().with(WalletState::provider)
    }

    pub fn is_connecting(&self) -> bool {
        self.state().with(|state| matches!(state, WalletState::Connecting))
    }

    /// Feed the current state to the session so the connected toast fires
    /// once per connection.
    fn observe(&self, state: &WalletState) {
        let toasts = self.toasts;
        self.session
            .with_value(|session| session.observe(state.address(), state.is_connected(), &toasts));
    }

    /// Ask the provider to connect. Failures are logged; the menu shows the error state.
    pub fn connect(&self) {
        let ctx = *self;
        leptos::task::spawn_local(async move {
            let session = ctx.session.get_value();
            if let Err(e) = session.connect(&ctx.wallet, &ctx.toasts).await {
                log::warn!("Wallet connect failed: {}", e);
            }
        });
    }

    pub fn disconnect(&self) {
        let ctx = *self;
        leptos::task::spawn_local(async move {
            let session = ctx.session.get_value();
            if let Err(e) = session.disconnect(&ctx.wallet, &ctx.toasts).await {
                log::warn!("Wallet disconnect failed: {}", e);
            }
        });
    }
}

pub fn provide_wallet_context(toasts: ToastContext) -> WalletContext {
    let context = WalletContext::new(toasts);
    provide_context(context);

    // Announce connections (including restored ones) and re-arm on disconnect
    Effect::new(move |_| {
        let state = context.state().get();
        context.observe(&state);
    });

    let wallet = context.wallet;
    leptos::task::spawn_local(async move {
        wallet.restore().await;
    });

    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
