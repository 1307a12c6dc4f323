//! Mint page: one card per mintable token.

use crate::components::{TokenBalance, TokenCard};
use crate::state::operations::use_operations_context;
use leptos::prelude::*;

#[component]
pub fn TokenPage() -> impl IntoView {
    let operations = use_operations_context();
    let tokens: Vec<_> = operations.catalog().mintable().cloned().collect();

    view! {
        <div class="content-wrapper">
            <h1 class="page-title">"Agricultural Tokens"</h1>
            <p class="subtitle">"Mint tokens backed by agricultural commodities."</p>
            <div class="token-grid">
                {tokens.into_iter().map(|token| view! { <TokenCard token=token/> }).collect_view()}
            </div>
            <TokenBalance/>
        </div>
    }
}
