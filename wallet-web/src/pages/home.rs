//! Landing page

use crate::utils::constants::APP_NAME;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="content-wrapper">
            <div class="hero">
                <h1 class="main-header">{APP_NAME}</h1>
                <p class="main-subheader">"Agricultural commodity tokens on Solana devnet"</p>
                <p class="hero-text">
                    "Mint maize, soya and wheat tokens, or swap them against dollar stablecoins at catalog prices. "
                    "Every operation is recorded on devnet with a small self-transfer from your wallet."
                </p>
                <div style="display: flex; gap: 12px; justify-content: center; margin-top: 24px;">
                    <A href="/token"><span class="btn btn-primary">"Mint Tokens"</span></A>
                    <A href="/swap"><span class="btn btn-secondary">"Swap Tokens"</span></A>
                </div>
            </div>
        </div>
    }
}
