//! AgriSwap browser client
//!
//! Swap and mint agricultural demo tokens against a Solana devnet wallet.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod pages;
pub mod services;
pub mod state;
pub mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());

    let config = lib_core::config::core_config();
    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
    }
    log::info!("AgriSwap starting (rpc: {}, commitment: {})", config.rpc_url, config.commitment);

    hide_loading_screen();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading placeholder from index.html.
fn hide_loading_screen() {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("leptos-loading"))
    else {
        return;
    };

    if let Err(e) = element.set_attribute("style", "display: none !important;") {
        log::warn!("Failed to hide loading screen: {:?}", e);
    }
}
