//! # Utilities Library
//!
//! Small helpers shared by the core and the native Solana adapters:
//! environment variable parsing for configuration and base64 for the
//! signed-transaction wire format.

pub mod b64;
pub mod envs;

// Re-export commonly used functions
pub use b64::{b64_decode, b64_encode};
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
