//! Browser Wallet Integration via wasm-bindgen
//!
//! JavaScript interop for injected Solana wallet providers (Phantom, Solflare,
//! Backpack or any provider exposing `window.solana`), and [`BrowserWallet`],
//! the [`WalletAdapter`] the orchestrator signs through.
//!
//! The self-transfer is assembled in JS with `window.solanaWeb3` so the wasm
//! build stays free of the native Solana SDK. Providers that cannot sign
//! without sending broadcast the transaction themselves and hand back only
//! the signature.

use crate::utils::js::js_error_message;
use async_trait::async_trait;
use leptos::prelude::*;
use lib_core::chain::{SignedTransaction, TransferTransaction, WalletAdapter};
use lib_core::error::WalletError;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Injected provider families we know how to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletProvider {
    Phantom,
    Solflare,
    Backpack,
    /// Some other provider behind `window.solana`.
    Injected,
}

impl WalletProvider {
    pub fn name(&self) -> &'static str {
        match self {
            WalletProvider::Phantom => "Phantom",
            WalletProvider::Solflare => "Solflare",
            WalletProvider::Backpack => "Backpack",
            WalletProvider::Injected => "Solana Wallet",
        }
    }

    /// Key understood by the JS helpers.
    pub fn as_js(&self) -> &'static str {
        match self {
            WalletProvider::Phantom => "phantom",
            WalletProvider::Solflare => "solflare",
            WalletProvider::Backpack => "backpack",
            WalletProvider::Injected => "injected",
        }
    }

    pub fn from_js(value: &str) -> Option<Self> {
        match value {
            "phantom" => Some(WalletProvider::Phantom),
            "solflare" => Some(WalletProvider::Solflare),
            "backpack" => Some(WalletProvider::Backpack),
            "injected" => Some(WalletProvider::Injected),
            _ => None,
        }
    }
}

// ============================================================================
// PROVIDER DETECTION, CONNECTION AND SIGNING (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
function getAdapter(provider) {
    switch (provider) {
        case 'phantom':
            return window.phantom?.solana ?? (window.solana?.isPhantom ? window.solana : null);
        case 'solflare':
            return window.solflare ?? (window.solana?.isSolflare ? window.solana : null);
        case 'backpack':
            return window.backpack ?? (window.solana?.isBackpack ? window.solana : null);
        default:
            return window.solana ?? null;
    }
}

function errorText(error) {
    return error instanceof Error ? error.message : String(error);
}

export function detectProvider() {
    if (window.phantom?.solana || window.solana?.isPhantom) return 'phantom';
    if (window.solflare || window.solana?.isSolflare) return 'solflare';
    if (window.backpack || window.solana?.isBackpack) return 'backpack';
    if (window.solana) return 'injected';
    return null;
}

export function getWalletAddress(provider) {
    const adapter = getAdapter(provider);
    if (!adapter || !adapter.publicKey) {
        return null;
    }
    return adapter.publicKey.toString();
}

export async function connectWallet(provider, onlyIfTrusted) {
    const adapter = getAdapter(provider);
    if (!adapter) {
        throw new Error(provider + ' wallet not found');
    }
    try {
        const response = onlyIfTrusted
            ? await adapter.connect({ onlyIfTrusted: true })
            : await adapter.connect();
        const publicKey = response?.publicKey ?? adapter.publicKey;
        if (!publicKey) {
            throw new Error('Connected but could not retrieve public key');
        }
        return publicKey.toString();
    } catch (error) {
        throw new Error(errorText(error));
    }
}

export async function disconnectWallet(provider) {
    const adapter = getAdapter(provider);
    if (!adapter || typeof adapter.disconnect !== 'function') {
        return;
    }
    try {
        await adapter.disconnect();
    } catch (error) {
        throw new Error(errorText(error));
    }
}

export async function signSelfTransfer(provider, transfer) {
    const adapter = getAdapter(provider);
    if (!adapter) {
        throw new Error('Wallet adapter not found');
    }
    const web3 = window.solanaWeb3;
    if (typeof web3 === 'undefined') {
        throw new Error('Solana Web3.js not loaded');
    }
    try {
        const tx = new web3.Transaction({
            feePayer: new web3.PublicKey(transfer.feePayer),
            recentBlockhash: transfer.recentBlockhash,
        }).add(web3.SystemProgram.transfer({
            fromPubkey: new web3.PublicKey(transfer.from),
            toPubkey: new web3.PublicKey(transfer.to),
            lamports: transfer.lamports,
        }));

        if (typeof adapter.signTransaction === 'function') {
            const signed = await adapter.signTransaction(tx);
            const bytes = signed.serialize();
            return { kind: 'wire', value: btoa(String.fromCharCode.apply(null, bytes)) };
        }

        const send = adapter.signAndSendTransaction ?? adapter.sendTransaction;
        if (typeof send === 'function') {
            const result = await send.call(adapter, tx);
            const signature = typeof result === 'string' ? result : result?.signature;
            return { kind: 'submitted', value: String(signature) };
        }

        throw new Error('Wallet does not support transaction signing');
    } catch (error) {
        throw new Error(errorText(error));
    }
}
")]
extern "C" {
    /// Key of the first injected provider found, or null.
    fn detectProvider() -> Option<String>;

    /// Public key of an already-connected provider.
    fn getWalletAddress(provider: &str) -> Option<String>;

    #[wasm_bindgen(catch)]
    async fn connectWallet(provider: &str, only_if_trusted: bool) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn disconnectWallet(provider: &str) -> Result<JsValue, JsValue>;

    /// Build, sign (and possibly send) the self-transfer; resolves to `{ kind, value }`.
    #[wasm_bindgen(catch)]
    async fn signSelfTransfer(provider: &str, transfer: JsValue) -> Result<JsValue, JsValue>;
}

/// What `signSelfTransfer` resolves to.
#[derive(Debug, Deserialize)]
struct SignOutcome {
    kind: String,
    value: String,
}

impl SignOutcome {
    fn into_signed(self) -> Result<SignedTransaction, WalletError> {
        match self.kind.as_str() {
            "wire" => Ok(SignedTransaction::Wire(self.value)),
            "submitted" if is_base58_signature(&self.value) => Ok(SignedTransaction::Submitted(self.value)),
            "submitted" => Err(WalletError::Provider(format!(
                "Wallet returned an invalid signature: {}",
                self.value
            ))),
            other => Err(WalletError::Provider(format!("Unexpected signing result: {}", other))),
        }
    }
}

/// Base58 string that decodes to a 32-byte public key.
pub fn is_base58_pubkey(value: &str) -> bool {
    decoded_len(value) == Some(32)
}

fn is_base58_signature(value: &str) -> bool {
    decoded_len(value) == Some(64)
}

fn decoded_len(value: &str) -> Option<usize> {
    bs58::decode(value).into_vec().ok().map(|bytes| bytes.len())
}

// ============================================================================
// WALLET SERVICE
// ============================================================================

/// Wallet connection state with provider information
#[derive(Clone, Debug, PartialEq)]
pub enum WalletState {
    Disconnected,
    Connecting,
    Connected { address: String, provider: WalletProvider },
    Error(String),
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletState::Connected { .. })
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            WalletState::Connected { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn provider(&self) -> Option<WalletProvider> {
        match self {
            WalletState::Connected { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}

/// Injected provider, if any.
pub fn detect_provider() -> Option<WalletProvider> {
    detectProvider().as_deref().and_then(WalletProvider::from_js)
}

/// [`WalletAdapter`] over the injected provider. The connection state lives
/// in a signal so the UI re-renders when it changes.
#[derive(Clone, Copy)]
pub struct BrowserWallet {
    state: RwSignal<WalletState>,
}

impl BrowserWallet {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(WalletState::Disconnected),
        }
    }

    /// Reactive connection state.
    pub fn state(&self) -> ReadSignal<WalletState> {
        self.state.read_only()
    }

    fn set_connected(&self, address: String, provider: WalletProvider) {
        self.state.set(WalletState::Connected { address, provider });
    }

    /// Reconnect silently if the provider already trusts this site.
    pub async fn restore(&self) {
        let Some(provider) = detect_provider() else {
            return;
        };

        if let Some(address) = getWalletAddress(provider.as_js()).filter(|a| is_base58_pubkey(a)) {
            self.set_connected(address, provider);
            return;
        }

        match connectWallet(provider.as_js(), true).await {
            Ok(value) => {
                if let Some(address) = value.as_string().filter(|a| is_base58_pubkey(a)) {
                    log::info!("Restored trusted {} session", provider.name());
                    self.set_connected(address, provider);
                }
            }
            Err(e) => log::debug!("No trusted wallet session: {}", js_error_message(&e)),
        }
    }
}

impl Default for BrowserWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl WalletAdapter for BrowserWallet {
    fn public_address(&self) -> Option<String> {
        self.state.with_untracked(|state| state.address().map(str::to_string))
    }

    fn is_connected(&self) -> bool {
        self.state.with_untracked(WalletState::is_connected)
    }

    async fn connect(&self) -> Result<String, WalletError> {
        let Some(provider) = detect_provider() else {
            let message = "No Solana wallet found. Install Phantom or Solflare.".to_string();
            self.state.set(WalletState::Error(message.clone()));
            return Err(WalletError::ProviderNotFound(message));
        };

        self.state.set(WalletState::Connecting);

        let result = connectWallet(provider.as_js(), false)
            .await
            .map_err(|e| js_error_message(&e))
            .and_then(|value| {
                value
                    .as_string()
                    .filter(|address| is_base58_pubkey(address))
                    .ok_or_else(|| "Wallet returned an invalid public key".to_string())
            });

        match result {
            Ok(address) => {
                self.set_connected(address.clone(), provider);
                Ok(address)
            }
            Err(message) => {
                self.state.set(WalletState::Error(message.clone()));
                Err(WalletError::Provider(message))
            }
        }
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        if let Some(provider) = self.state.with_untracked(WalletState::provider) {
            disconnectWallet(provider.as_js())
                .await
                .map_err(|e| WalletError::Provider(js_error_message(&e)))?;
        }
        self.state.set(WalletState::Disconnected);
        Ok(())
    }

    async fn sign_transaction(&self, transaction: &TransferTransaction) -> Result<SignedTransaction, WalletError> {
        let provider = self
            .state
            .with_untracked(WalletState::provider)
            .ok_or(WalletError::NotConnected)?;

        let transfer = serde_wasm_bindgen::to_value(transaction)
            .map_err(|e| WalletError::Provider(format!("Failed to encode transaction: {}", e)))?;

        let outcome = signSelfTransfer(provider.as_js(), transfer)
            .await
            .map_err(|e| WalletError::Provider(js_error_message(&e)))?;

        serde_wasm_bindgen::from_value::<SignOutcome>(outcome)
            .map_err(|e| WalletError::Provider(format!("Unexpected signing result: {}", e)))?
            .into_signed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";

    #[test]
    fn test_provider_keys_roundtrip() {
        for provider in [
            WalletProvider::Phantom,
            WalletProvider::Solflare,
            WalletProvider::Backpack,
            WalletProvider::Injected,
        ] {
            assert_eq!(WalletProvider::from_js(provider.as_js()), Some(provider));
        }
        assert_eq!(WalletProvider::from_js("sollet"), None);
    }

    #[test]
    fn test_pubkey_validation() {
        assert!(is_base58_pubkey(ADDRESS));
        assert!(!is_base58_pubkey("not a key"));
        assert!(!is_base58_pubkey("3yZe7d"));
    }

    #[test]
    fn test_sign_outcome_kinds() {
        let wire = SignOutcome { kind: "wire".to_string(), value: "AQID".to_string() };
        assert_eq!(wire.into_signed(), Ok(SignedTransaction::Wire("AQID".to_string())));

        let signature = bs58::encode([9u8; 64]).into_string();
        let submitted = SignOutcome { kind: "submitted".to_string(), value: signature.clone() };
        assert_eq!(submitted.into_signed(), Ok(SignedTransaction::Submitted(signature)));

        let garbage = SignOutcome { kind: "submitted".to_string(), value: "undefined".to_string() };
        assert!(garbage.into_signed().is_err());
    }

    #[test]
    fn test_wallet_state_accessors() {
        let state = WalletState::Connected {
            address: ADDRESS.to_string(),
            provider: WalletProvider::Phantom,
        };
        assert!(state.is_connected());
        assert_eq!(state.address(), Some(ADDRESS));
        assert_eq!(state.provider(), Some(WalletProvider::Phantom));
        assert_eq!(WalletState::Connecting.address(), None);
    }
}
