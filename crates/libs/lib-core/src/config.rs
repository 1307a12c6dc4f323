//! # Application Configuration
//!
//! Network endpoints, nominal transaction amounts, storage key and polling
//! intervals. Native callers load overrides from environment variables; the
//! browser has no environment and runs on [`Config::default`].
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config().expect("invalid SWAP_* environment");
//! let rpc = &core_config().rpc_url;
//! ```
//!
//! [`core_config()`] falls back to the defaults when [`init_config()`] was
//! never called, so library code can read it unconditionally.

use crate::chain::Commitment;
use lib_utils::envs::{get_env_or, get_env_parse_or};
use std::sync::OnceLock;

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Application configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// RPC endpoint used to build, submit and confirm transactions.
    pub rpc_url: String,

    /// RPC endpoint used for the periodic native balance refresh.
    pub balance_rpc_url: String,

    /// Commitment level awaited before settling.
    pub commitment: Commitment,

    /// `localStorage` key of the balance ledger document.
    pub storage_key: String,

    /// Nominal self-transfer carried by a swap, in lamports.
    pub swap_lamports: u64,

    /// Nominal self-transfer carried by a mint, in lamports.
    pub mint_lamports: u64,

    /// Native balance refresh interval.
    pub balance_refresh_ms: u32,

    /// Delay between signature status checks while awaiting confirmation.
    pub confirm_poll_ms: u32,

    /// Status checks before the network client gives up on a signature.
    pub confirm_max_polls: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            balance_rpc_url: "https://devnet.sonic.game".to_string(),
            commitment: Commitment::Confirmed,
            storage_key: "tokenBalances".to_string(),
            swap_lamports: 100,
            mint_lamports: 1000,
            balance_refresh_ms: 30_000,
            confirm_poll_ms: 500,
            confirm_max_polls: 120,
        }
    }
}

impl Config {
    /// Load configuration from `SWAP_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let commitment = get_env_or("SWAP_COMMITMENT", defaults.commitment.as_str())
            .parse::<Commitment>()
            .map_err(|e| format!("SWAP_COMMITMENT: {}", e))?;

        Ok(Self {
            rpc_url: get_env_or("SWAP_RPC_URL", &defaults.rpc_url),
            balance_rpc_url: get_env_or("SWAP_BALANCE_RPC_URL", &defaults.balance_rpc_url),
            commitment,
            storage_key: get_env_or("SWAP_STORAGE_KEY", &defaults.storage_key),
            swap_lamports: get_env_parse_or("SWAP_SWAP_LAMPORTS", defaults.swap_lamports)
                .map_err(|e| e.to_string())?,
            mint_lamports: get_env_parse_or("SWAP_MINT_LAMPORTS", defaults.mint_lamports)
                .map_err(|e| e.to_string())?,
            balance_refresh_ms: get_env_parse_or("SWAP_BALANCE_REFRESH_MS", defaults.balance_refresh_ms)
                .map_err(|e| e.to_string())?,
            confirm_poll_ms: get_env_parse_or("SWAP_CONFIRM_POLL_MS", defaults.confirm_poll_ms)
                .map_err(|e| e.to_string())?,
            confirm_max_polls: get_env_parse_or("SWAP_CONFIRM_MAX_POLLS", defaults.confirm_max_polls)
                .map_err(|e| e.to_string())?,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.rpc_url.trim().is_empty() || self.balance_rpc_url.trim().is_empty() {
            return Err("RPC URLs must not be empty".to_string());
        }

        if self.storage_key.trim().is_empty() {
            return Err("SWAP_STORAGE_KEY must not be empty".to_string());
        }

        // The placeholder transfer must stay a sub-unit amount
        for (name, lamports) in [("SWAP_SWAP_LAMPORTS", self.swap_lamports), ("SWAP_MINT_LAMPORTS", self.mint_lamports)] {
            if lamports == 0 || lamports >= LAMPORTS_PER_SOL {
                return Err(format!("{} must be between 1 and {} lamports", name, LAMPORTS_PER_SOL - 1));
            }
        }

        if self.balance_refresh_ms < 1000 {
            return Err("SWAP_BALANCE_REFRESH_MS must be at least 1000".to_string());
        }

        if self.confirm_poll_ms == 0 || self.confirm_max_polls == 0 {
            return Err("SWAP_CONFIRM_POLL_MS and SWAP_CONFIRM_MAX_POLLS must be positive".to_string());
        }

        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration from the environment.
///
/// # Errors
///
/// Returns an error if a variable is malformed, validation fails, or the
/// config was already initialized.
pub fn init_config() -> Result<(), String> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get the global configuration, or the defaults if it was never initialized.
pub fn core_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
