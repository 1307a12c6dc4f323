//! # Notifications
//!
//! The sink the orchestrator and the wallet session report to, and the toast
//! texts for every event they emit.

use crate::orchestrator::intent::{MintIntent, OperationKind, SwapIntent};
use shared::dto::notification::{Notification, NotificationKind};
use shared::utils::truncate_address;
use std::cell::RefCell;
use std::rc::Rc;

/// Short-lived toasts (preconditions, wallet connected).
pub const SHORT_DURATION_MS: u32 = 3000;

/// Receives notification events. The browser renders them as toasts.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Rc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Sink that keeps every event, for native callers and tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: RefCell<Vec<Notification>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.events.borrow().iter().map(|n| n.kind).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.events.borrow().last().cloned()
    }
}

impl NotificationSink for CollectingSink {
    fn notify(&self, notification: Notification) {
        self.events.borrow_mut().push(notification);
    }
}

// region: --- Operation

pub fn wallet_not_connected(kind: OperationKind) -> Notification {
    Notification::destructive(
        NotificationKind::WalletNotConnected,
        "Wallet not connected",
        format!("Please connect your wallet to {} tokens.", kind.verb()),
    )
    .with_duration(SHORT_DURATION_MS)
}

pub fn invalid_amount(kind: OperationKind) -> Notification {
    Notification::destructive(
        NotificationKind::InvalidAmount,
        "Invalid amount",
        format!("Please enter a valid amount to {}.", kind.verb()),
    )
    .with_duration(SHORT_DURATION_MS)
}

pub fn operation_busy() -> Notification {
    Notification::info(
        NotificationKind::OperationBusy,
        "Transaction in progress",
        "Please wait for the current transaction to finish.",
    )
    .with_duration(SHORT_DURATION_MS)
}

pub fn swap_started(intent: &SwapIntent) -> Notification {
    Notification::info(
        NotificationKind::OperationStarted,
        "Swap initiated",
        format!("Swapping {}...", intent.describe()),
    )
}

pub fn swap_succeeded(intent: &SwapIntent) -> Notification {
    Notification::info(
        NotificationKind::OperationSucceeded,
        "Swap successful!",
        format!("You've successfully swapped {}.", intent.describe()),
    )
}

pub fn mint_started(intent: &MintIntent) -> Notification {
    Notification::info(
        NotificationKind::OperationStarted,
        format!("Minting {} {} tokens", intent.amount.normalize(), intent.symbol),
        "Preparing your transaction...",
    )
}

pub fn transaction_sent() -> Notification {
    Notification::info(
        NotificationKind::TransactionSent,
        "Transaction sent",
        "Waiting for confirmation...",
    )
}

pub fn mint_succeeded(intent: &MintIntent) -> Notification {
    Notification::info(
        NotificationKind::OperationSucceeded,
        "Minting successful!",
        format!("{} {} tokens have been added to your wallet.", intent.amount.normalize(), intent.symbol),
    )
}

/// Failure toast carrying the collaborator's message verbatim.
pub fn operation_failed(kind: OperationKind, message: &str) -> Notification {
    let description = if message.trim().is_empty() {
        "An unknown error occurred"
    } else {
        message
    };

    Notification::destructive(
        NotificationKind::OperationFailed,
        format!("{} failed", kind.heading()),
        description,
    )
}

// endregion: --- Operation

// region: --- Wallet

pub fn wallet_connected(address: &str) -> Notification {
    Notification::info(
        NotificationKind::WalletConnected,
        "Wallet connected successfully",
        format!("Connected to {}", truncate_address(address)),
    )
    .with_duration(SHORT_DURATION_MS)
}

pub fn wallet_disconnected() -> Notification {
    Notification::info(
        NotificationKind::WalletDisconnected,
        "Wallet disconnected",
        "Your wallet has been disconnected successfully.",
    )
}

pub fn wallet_disconnect_failed() -> Notification {
    Notification::destructive(
        NotificationKind::WalletDisconnectFailed,
        "Error",
        "Failed to disconnect wallet.",
    )
}

// endregion: --- Wallet
