use serde::{Deserialize, Serialize};

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Destructive,
}

/// Which event produced a notification.
///
/// The browser toaster only needs title/description/severity; the kind lets
/// callers and tests tell events apart without matching on copy text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    WalletNotConnected,
    InvalidAmount,
    OperationStarted,
    TransactionSent,
    OperationSucceeded,
    OperationFailed,
    OperationBusy,
    WalletConnected,
    WalletDisconnected,
    WalletDisconnectFailed,
}

/// A toast event emitted by the swap core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub duration_ms: u32,
}

impl Notification {
    /// Default lifetime for toasts that do not set one explicitly.
    pub const DEFAULT_DURATION_MS: u32 = 5000;

    pub fn info(kind: NotificationKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
            duration_ms: Self::DEFAULT_DURATION_MS,
        }
    }

    pub fn destructive(kind: NotificationKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Destructive,
            ..Self::info(kind, title, description)
        }
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}
