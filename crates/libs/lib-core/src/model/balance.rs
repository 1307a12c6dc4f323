//! Native balance snapshot. Read-only; refreshed on a timer by the UI.

use crate::chain::NetworkClient;
use crate::config::LAMPORTS_PER_SOL;
use crate::error::NetworkError;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Fractional digits shown for native and ledger balances.
pub const BALANCE_DP: u32 = 4;

pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL)
}

/// `1.2346`-style rendering used by the balance panel.
pub fn format_balance(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(BALANCE_DP, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.4}", rounded)
}

/// Fetch the native balance of `address` in whole SOL.
pub async fn fetch_native_balance<N>(network: &N, address: &str) -> Result<Decimal, NetworkError>
where
    N: NetworkClient + ?Sized,
{
    let lamports = network.get_balance(address).await?;
    debug!(%address, lamports, "Fetched native balance");
    Ok(lamports_to_sol(lamports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MockNetworkClient;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lamports_to_sol() {
        assert_eq!(lamports_to_sol(1_500_000_000), dec!(1.5));
        assert_eq!(format_balance(lamports_to_sol(123_456_789)), "0.1235");
        assert_eq!(format_balance(Decimal::ZERO), "0.0000");
    }

    #[tokio::test]
    async fn test_fetch_native_balance() {
        let mut network = MockNetworkClient::new();
        network
            .expect_get_balance()
            .withf(|address| address == "Payer111")
            .times(1)
            .returning(|_| Ok(2_000_000_000));

        let balance = fetch_native_balance(&network, "Payer111").await.unwrap();

        assert_eq!(balance, dec!(2));
    }
}
