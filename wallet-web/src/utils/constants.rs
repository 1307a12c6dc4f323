//! Application constants

pub const APP_NAME: &str = "AgriSwap";

// Native balance row in the balance panel
pub const NATIVE_SYMBOL: &str = "SOL";
pub const NATIVE_ICON: &str = "◎";

/// Toasts kept on screen at once; older ones are dropped first.
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// Where the connect button points when no provider is injected.
pub const WALLET_INSTALL_URL: &str = "https://phantom.app/download";
