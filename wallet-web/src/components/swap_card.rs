//! Swap card
//!
//! Two-sided form over [`SwapForm`]: the source amount is typed, the target
//! amount is derived. Inputs lock while a submission is in flight and the
//! submit button also stays disabled while no wallet is connected.

use crate::state::operations::use_operations_context;
use crate::state::wallet::use_wallet_context;
use leptos::prelude::*;
use lib_core::model::balance::format_balance;
use lib_core::{Catalog, SwapForm};

#[component]
fn TokenSelect(
    catalog: Catalog,
    #[prop(into)] selected: Signal<&'static str>,
    #[prop(into)] disabled: Signal<bool>,
    on_select: impl Fn(String) + 'static,
) -> impl IntoView {
    view! {
        <select
            class="token-select"
            disabled=move || disabled.get()
            prop:value=move || selected.get().to_string()
            on:change=move |ev| on_select(event_target_value(&ev))
        >
            {catalog
                .iter()
                .map(|token| {
                    let id = token.id;
                    view! {
                        <option value=id selected=move || selected.get() == id>
                            {format!("{} {}", token.icon, token.symbol)}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

#[component]
pub fn SwapCard() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let operations = use_operations_context();
    let catalog = operations.catalog();

    let form = RwSignal::new(SwapForm::default_for(catalog.clone()));

    let busy = Signal::derive(move || operations.is_busy());
    let source_id = Signal::derive(move || form.with(|f| f.source_id()));
    let target_id = Signal::derive(move || form.with(|f| f.target_id()));

    let ledger_balance = move |symbol: Option<&'static str>| {
        operations.ledger_revision();
        symbol
            .and_then(|symbol| operations.ledger_balances().get(symbol).copied())
            .map(format_balance)
            .unwrap_or_else(|| "0.0000".to_string())
    };

    let select = move |source: bool, id: String| {
        form.update(|f| {
            let result = if source { f.select_source(&id) } else { f.select_target(&id) };
            if let Err(e) = result {
                log::warn!("Ignoring token selection: {}", e);
            }
        });
    };

    let on_swap = move |_| operations.submit_swap(form.get_untracked());

    view! {
        <div class="card swap-card">
            <h2 class="card-title" style="text-align: center;">"Swap Tokens"</h2>

            <div class="swap-side">
                <div class="swap-label">
                    <span>"From"</span>
                    <span>{move || format!("Balance: {}", ledger_balance(form.with(|f| f.source().map(|t| t.symbol))))}</span>
                </div>
                <div class="swap-row">
                    <input
                        type="number"
                        class="amount-input"
                        placeholder="0.0"
                        disabled=move || busy.get()
                        prop:value=move || form.with(|f| f.source_amount().to_string())
                        on:input=move |ev| form.update(|f| f.set_source_amount(&event_target_value(&ev)))
                    />
                    <TokenSelect
                        catalog=catalog.clone()
                        selected=source_id
                        disabled=busy
                        on_select=move |id| select(true, id)
                    />
                </div>
            </div>

            <div style="display: flex; justify-content: center;">
                <button
                    class="btn btn-round"
                    title="Reverse"
                    disabled=move || busy.get()
                    on:click=move |_| form.update(SwapForm::reverse)
                >
                    "↓"
                </button>
            </div>

            <div class="swap-side">
                <div class="swap-label">
                    <span>"To"</span>
                    <span>{move || format!("Balance: {}", ledger_balance(form.with(|f| f.target().map(|t| t.symbol))))}</span>
                </div>
                <div class="swap-row">
                    <input
                        type="text"
                        class="amount-input"
                        placeholder="0.0"
                        readonly=true
                        prop:value=move || form.with(SwapForm::target_amount_display)
                    />
                    <TokenSelect
                        catalog=catalog
                        selected=target_id
                        disabled=busy
                        on_select=move |id| select(false, id)
                    />
                </div>
            </div>

            {move || form.with(SwapForm::exchange_rate_line).map(|line| view! {
                <div class="exchange-rate">
                    <span>"Exchange Rate:"</span>
                    <span>{line}</span>
                </div>
            })}

            <button
                class="btn btn-primary"
                style="width: 100%;"
                disabled=move || busy.get() || !wallet_ctx.is_connected()
                on:click=on_swap
            >
                {move || if busy.get() { "Processing Swap..." } else { "Swap" }}
            </button>
        </div>
    }
}
