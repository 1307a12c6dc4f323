//! # Formatting Utilities for Wallet Web
//!
//! Display helpers for prices and balances. Amount rounding lives in
//! [`lib_core::model::convert`] and [`lib_core::model::balance`]; these only
//! decide what the UI shows around them.
//!
//! For address formatting, use [`shared::utils::truncate_address`].

use lib_core::model::balance::format_balance;
use rust_decimal::{Decimal, RoundingStrategy};

/// Catalog unit price as dollars with two decimals (e.g. `2.34 -> "$2.34"`).
///
/// # Examples
///
/// ```rust
/// use rust_decimal::Decimal;
/// use wallet_web::utils::format::format_price;
///
/// assert_eq!(format_price(Decimal::new(234, 2)), "$2.34");
/// assert_eq!(format_price(Decimal::ONE), "$1.00");
/// ```
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

/// Native balance cell: four decimals once fetched, `"Loading..."` before.
pub fn balance_or_loading(balance: Option<Decimal>) -> String {
    balance
        .map(format_balance)
        .unwrap_or_else(|| "Loading...".to_string())
}

/// Mint stepper never goes below one.
pub fn step_down(amount: u32) -> u32 {
    amount.saturating_sub(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec!(3.12)), "$3.12");
        assert_eq!(format_price(dec!(2.675)), "$2.68");
        assert_eq!(format_price(dec!(1)), "$1.00");
    }

    #[test]
    fn test_balance_or_loading() {
        assert_eq!(balance_or_loading(None), "Loading...");
        assert_eq!(balance_or_loading(Some(dec!(1.5))), "1.5000");
    }

    #[test]
    fn test_step_down_floors_at_one() {
        assert_eq!(step_down(3), 2);
        assert_eq!(step_down(1), 1);
        assert_eq!(step_down(0), 1);
    }
}
