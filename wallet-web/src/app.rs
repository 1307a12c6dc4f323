//! AgriSwap Web App - Leptos Frontend
//!
//! Wires the browser collaborators (wallet provider, JSON-RPC, localStorage,
//! toaster) into the swap core and routes between the home, mint and swap pages.

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::components::{Navbar, Toaster};
use crate::pages::{HomePage, NotFound, SwapPage, TokenPage};
use crate::state::operations::provide_operations_context;
use crate::state::toasts::provide_toast_context;
use crate::state::wallet::provide_wallet_context;

#[component]
pub fn App() -> impl IntoView {
    let toasts = provide_toast_context();
    let wallet_ctx = provide_wallet_context(toasts);
    provide_operations_context(wallet_ctx.wallet, toasts);

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/token") view=TokenPage/>
                    <Route path=path!("/swap") view=SwapPage/>
                </Routes>
                <Toaster/>
            </div>
        </Router>
    }
}
