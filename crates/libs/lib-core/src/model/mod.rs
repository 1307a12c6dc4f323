//! # Domain Model
//!
//! Token catalog, amount conversion, balances and the storage they persist to.

pub mod balance;
pub mod catalog;
pub mod convert;
pub mod store;
