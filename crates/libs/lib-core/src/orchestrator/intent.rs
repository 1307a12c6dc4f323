//! Transient per-operation intents, built at submission and discarded once
//! the attempt completes.

use crate::error::PreconditionError;
use crate::model::catalog::Token;
use crate::model::convert::format_amount;
use rust_decimal::Decimal;

/// Which flow an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Swap,
    Mint,
}

impl OperationKind {
    /// Verb used in prompts ("Please connect your wallet to swap tokens.").
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::Swap => "swap",
            OperationKind::Mint => "mint",
        }
    }

    /// Heading used in outcome toasts ("Swap failed", "Minting failed").
    pub fn heading(&self) -> &'static str {
        match self {
            OperationKind::Swap => "Swap",
            OperationKind::Mint => "Minting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapIntent {
    pub source_id: &'static str,
    pub source_symbol: &'static str,
    pub target_id: &'static str,
    pub target_symbol: &'static str,
    pub source_amount: Decimal,
    /// Displayed counter-amount; settled at face value.
    pub target_amount: Decimal,
}

impl SwapIntent {
    /// `1 MAIZE to 2.340000 USDC`
    pub fn describe(&self) -> String {
        format!(
            "{} {} to {} {}",
            self.source_amount.normalize(),
            self.source_symbol,
            format_amount(self.target_amount),
            self.target_symbol
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintIntent {
    pub token_id: &'static str,
    pub symbol: &'static str,
    pub amount: Decimal,
}

impl MintIntent {
    pub fn new(token: &Token, amount: Decimal) -> Result<Self, PreconditionError> {
        if amount <= Decimal::ZERO {
            return Err(PreconditionError::InvalidAmount(amount.to_string()));
        }

        Ok(Self {
            token_id: token.id,
            symbol: token.symbol,
            amount,
        })
    }
}

/// Either flow, as driven by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Swap(SwapIntent),
    Mint(MintIntent),
}

impl Intent {
    pub fn kind(&self) -> OperationKind {
        match self {
            Intent::Swap(_) => OperationKind::Swap,
            Intent::Mint(_) => OperationKind::Mint,
        }
    }

    /// Ledger symbol and delta recorded on settlement.
    pub fn settlement(&self) -> (&'static str, Decimal) {
        match self {
            Intent::Swap(swap) => (swap.target_symbol, swap.target_amount),
            Intent::Mint(mint) => (mint.symbol, mint.amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::Catalog;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mint_intent_requires_positive_amount() {
        let catalog = Catalog::agri();
        let wheat = catalog.require("wheat").unwrap();

        assert!(MintIntent::new(wheat, Decimal::ZERO).is_err());
        let intent = Intent::Mint(MintIntent::new(wheat, dec!(3)).unwrap());
        assert_eq!(intent.settlement(), ("WHEAT", dec!(3)));
        assert_eq!(intent.kind(), OperationKind::Mint);
    }
}
