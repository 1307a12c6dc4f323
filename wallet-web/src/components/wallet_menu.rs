//! Wallet menu: "Connect Wallet" while disconnected, the truncated address
//! and a disconnect action once connected.

use crate::services::wallet::{detect_provider, WalletState};
use crate::state::wallet::use_wallet_context;
use crate::utils::constants::WALLET_INSTALL_URL;
use leptos::prelude::*;
use shared::utils::truncate_address;

#[component]
pub fn WalletMenu() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let (open, set_open) = signal(false);

    let on_connect = move |_| wallet_ctx.connect();
    let on_disconnect = move |_| {
        set_open.set(false);
        wallet_ctx.disconnect();
    };

    view! {
        <div class="wallet-menu">
            {move || match wallet_ctx.state().get() {
                WalletState::Connected { address, provider } => view! {
                    <div>
                        <button class="btn wallet-button" title=provider.name() on:click=move |_| set_open.update(|o| *o = !*o)>
                            {truncate_address(&address)}
                        </button>
                        <Show when=move || open.get()>
                            <div class="wallet-dropdown">
                                <button class="btn btn-secondary" on:click=on_disconnect>
                                    "Disconnect"
                                </button>
                            </div>
                        </Show>
                    </div>
                }.into_any(),
                WalletState::Connecting => view! {
                    <button class="btn wallet-button" disabled=true>"Connecting..."</button>
                }.into_any(),
                state => {
                    let error = match state {
                        WalletState::Error(message) => Some(message),
                        _ => None,
                    };
                    let installed = detect_provider().is_some();
                    view! {
                        <div>
                            {if installed {
                                view! {
                                    <button class="btn wallet-button" on:click=on_connect>"Connect Wallet"</button>
                                }.into_any()
                            } else {
                                view! {
                                    <a class="btn wallet-button" href=WALLET_INSTALL_URL target="_blank" rel="noopener">
                                        "Connect Wallet"
                                    </a>
                                }.into_any()
                            }}
                            {error.map(|message| view! { <p class="wallet-error">{message}</p> })}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
