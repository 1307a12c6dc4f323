//! Swap page

use crate::components::{SwapCard, TokenBalance};
use leptos::prelude::*;

#[component]
pub fn SwapPage() -> impl IntoView {
    view! {
        <div class="content-wrapper swap-layout">
            <SwapCard/>
            <TokenBalance/>
        </div>
    }
}
