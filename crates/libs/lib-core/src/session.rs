//! # Wallet Session
//!
//! Per-session bookkeeping around the wallet adapter. The "connected" toast
//! is announced once per session: the flag lives here, created fresh with
//! every session instead of in a process-wide static.

use crate::chain::WalletAdapter;
use crate::error::WalletError;
use crate::notify::{self, NotificationSink};
use std::cell::Cell;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct WalletSession {
    announced: Cell<bool>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_announced(&self) -> bool {
        self.announced.get()
    }

    /// Feed the adapter's current connection state. Emits the connected
    /// toast the first time a connected address is seen; losing the address
    /// re-arms it. Returns `true` when a toast was emitted.
    pub fn observe<K>(&self, address: Option<&str>, connected: bool, sink: &K) -> bool
    where
        K: NotificationSink + ?Sized,
    {
        match address {
            Some(address) if connected && !self.announced.get() => {
                self.announced.set(true);
                info!(%address, "Wallet connected");
                sink.notify(notify::wallet_connected(address));
                true
            }
            None => {
                self.announced.set(false);
                false
            }
            Some(_) => false,
        }
    }

    /// Ask the provider to connect, then announce it.
    pub async fn connect<W, K>(&self, wallet: &W, sink: &K) -> Result<String, WalletError>
    where
        W: WalletAdapter + ?Sized,
        K: NotificationSink + ?Sized,
    {
        let address = wallet.connect().await.map_err(|e| {
            warn!(error = %e, "Wallet connect failed");
            e
        })?;
        self.observe(Some(&address), true, sink);
        Ok(address)
    }

    /// Disconnect through the adapter and report the result either way.
    pub async fn disconnect<W, K>(&self, wallet: &W, sink: &K) -> Result<(), WalletError>
    where
        W: WalletAdapter + ?Sized,
        K: NotificationSink + ?Sized,
    {
        match wallet.disconnect().await {
            Ok(()) => {
                info!("Wallet disconnected");
                sink.notify(notify::wallet_disconnected());
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Wallet disconnect failed");
                sink.notify(notify::wallet_disconnect_failed());
                Err(e)
            }
        }
    }
}
