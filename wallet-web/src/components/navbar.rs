//! Navigation Bar Component

use crate::components::WalletMenu;
use crate::utils::constants::APP_NAME;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">{APP_NAME}</span>
                </A>
                <div style="display: flex; gap: 20px; align-items: center;">
                    <A href="/token" attr:class="nav-link">"Tokens"</A>
                    <A href="/swap" attr:class="nav-link">"Swap"</A>
                    <WalletMenu/>
                </div>
            </div>
        </nav>
    }
}
