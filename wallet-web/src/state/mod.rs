//! Application-wide contexts

pub mod operations;
pub mod toasts;
pub mod wallet;
