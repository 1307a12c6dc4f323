//! Balance panel
//!
//! Native balance from the balance endpoint plus the local ledger. Hidden
//! while disconnected; refreshed on a timer, on connection change and after
//! every settlement.

use crate::services::JsonRpcClient;
use crate::state::operations::use_operations_context;
use crate::state::wallet::use_wallet_context;
use crate::utils::constants::{NATIVE_ICON, NATIVE_SYMBOL};
use crate::utils::format::balance_or_loading;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use lib_core::config::core_config;
use lib_core::model::balance::{fetch_native_balance, format_balance};
use rust_decimal::Decimal;

#[component]
pub fn TokenBalance() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let operations = use_operations_context();
    let catalog = operations.catalog();

    let (native, set_native) = signal(None::<Decimal>);
    let (ledger, set_ledger) = signal(Vec::<(String, Decimal)>::new());
    let (tick, set_tick) = signal(0u64);

    let refresh = move |address: String| {
        set_ledger.set(operations.ledger_balances().into_iter().collect());

        leptos::task::spawn_local(async move {
            let client = JsonRpcClient::balance_client(core_config());
            match fetch_native_balance(&client, &address).await {
                Ok(balance) => set_native.set(Some(balance)),
                // Keep the last known value; the next tick retries
                Err(e) => log::error!("Error fetching balances: {}", e),
            }
        });
    };

    Effect::new(move |_| {
        tick.track();
        operations.ledger_revision();
        match wallet_ctx.address() {
            Some(address) => refresh(address),
            None => set_native.set(None),
        }
    });

    // Dropped, and so cancelled, with the component
    let interval = Interval::new(core_config().balance_refresh_ms, move || set_tick.update(|t| *t += 1));
    let _interval = StoredValue::new_local(interval);

    view! {
        <Show when=move || wallet_ctx.is_connected()>
            <div class="card balance-card">
                <h2 class="card-title">"Wallet Balances"</h2>
                <div class="balance-row">
                    <span><span class="token-icon">{NATIVE_ICON}</span>{NATIVE_SYMBOL}</span>
                    <span class="balance-value">{move || balance_or_loading(native.get())}</span>
                </div>
                {
                    let catalog = catalog.clone();
                    move || {
                        let entries = ledger.get();
                        if entries.is_empty() {
                            view! { <p class="balance-empty">"No tokens in wallet yet"</p> }.into_any()
                        } else {
                            entries
                                .into_iter()
                                .map(|(symbol, balance)| {
                                    let icon = catalog.icon_for_symbol(&symbol);
                                    view! {
                                        <div class="balance-row">
                                            <span><span class="token-icon">{icon}</span>{symbol}</span>
                                            <span class="balance-value">{format_balance(balance)}</span>
                                        </div>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }
                    }
                }
            </div>
        </Show>
    }
}
