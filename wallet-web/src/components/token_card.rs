//! Mint card: one mintable token with a stepper and a mint button.

use crate::state::operations::use_operations_context;
use crate::state::wallet::use_wallet_context;
use crate::utils::format::{format_price, step_down};
use leptos::prelude::*;
use lib_core::Token;
use rust_decimal::Decimal;

#[component]
pub fn TokenCard(token: Token) -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let operations = use_operations_context();
    let (amount, set_amount) = signal(1u32);

    let busy = move || operations.is_busy();
    let price = format_price(token.unit_price);
    let (name, symbol, icon, description) = (token.name, token.symbol, token.icon, token.description);

    let on_mint = move |_| operations.submit_mint(token.clone(), Decimal::from(amount.get_untracked()));

    view! {
        <div class="card token-card">
            <div class="token-card-header">
                <div style="display: flex; align-items: center; gap: 8px;">
                    <span class="token-icon token-icon-lg">{icon}</span>
                    <div>
                        <h3 class="card-title">{name}</h3>
                        <p class="subtitle">{symbol}</p>
                    </div>
                </div>
                <span class="price-badge" title="Current market price">{price}</span>
            </div>

            <p class="token-description">{description}</p>

            <div class="stepper">
                <button class="btn btn-secondary" disabled=busy on:click=move |_| set_amount.update(|a| *a = step_down(*a))>
                    "-"
                </button>
                <span class="stepper-value">{move || amount.get()}</span>
                <button class="btn btn-secondary" disabled=busy on:click=move |_| set_amount.update(|a| *a = a.saturating_add(1))>
                    "+"
                </button>
            </div>

            <button
                class="btn btn-primary"
                style="width: 100%;"
                disabled=move || busy() || !wallet_ctx.is_connected()
                on:click=on_mint
            >
                {move || if busy() { "Minting...".to_string() } else { format!("Mint {}", symbol) }}
            </button>
        </div>
    }
}
