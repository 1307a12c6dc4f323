//! # Token Catalog
//!
//! Fixed, insertion-ordered list of tokens with static unit prices (USD).
//! Built once at startup and never mutated.

use crate::error::CatalogError;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Icon shown for symbols the catalog does not know.
pub const FALLBACK_ICON: &str = "💎";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub unit_price: Decimal,
}

/// The agricultural demo catalog.
pub const AGRI_TOKENS: [Token; 6] = [
    Token {
        id: "maize",
        name: "Maize Token",
        symbol: "MAIZE",
        icon: "🌽",
        description: "Backed by harvested maize held in partner silos.",
        unit_price: Decimal::from_parts(234, 0, 0, false, 2),
    },
    Token {
        id: "soya",
        name: "Soya Token",
        symbol: "SOYA",
        icon: "🫘",
        description: "Tracks soybean stock from cooperative farms.",
        unit_price: Decimal::from_parts(312, 0, 0, false, 2),
    },
    Token {
        id: "wheat",
        name: "Wheat Token",
        symbol: "WHEAT",
        icon: "🌾",
        description: "Represents milling wheat stored at certified warehouses.",
        unit_price: Decimal::from_parts(267, 0, 0, false, 2),
    },
    Token {
        id: "usdc",
        name: "USD Coin",
        symbol: "USDC",
        icon: "💵",
        description: "Dollar stablecoin.",
        unit_price: Decimal::from_parts(100, 0, 0, false, 2),
    },
    Token {
        id: "usdt",
        name: "Tether",
        symbol: "USDT",
        icon: "💰",
        description: "Dollar stablecoin.",
        unit_price: Decimal::from_parts(100, 0, 0, false, 2),
    },
    Token {
        id: "dai",
        name: "Dai",
        symbol: "DAI",
        icon: "🟡",
        description: "Decentralized dollar stablecoin.",
        unit_price: Decimal::from_parts(100, 0, 0, false, 2),
    },
];

/// Ids of the commodity tokens that can be minted (the stablecoins can only be swapped into).
pub const MINTABLE_IDS: [&str; 3] = ["maize", "soya", "wheat"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tokens: Vec<Token>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and non-positive prices.
    pub fn new(tokens: Vec<Token>) -> Result<Self, CatalogError> {
        if tokens.len() < 2 {
            return Err(CatalogError::TooSmall);
        }

        let mut seen = HashSet::new();
        for token in &tokens {
            if !seen.insert(token.id) {
                return Err(CatalogError::DuplicateId(token.id.to_string()));
            }
            if token.unit_price <= Decimal::ZERO {
                return Err(CatalogError::NonPositivePrice(token.id.to_string()));
            }
        }

        Ok(Self { tokens })
    }

    /// The built-in agricultural catalog.
    pub fn agri() -> Self {
        Self { tokens: AGRI_TOKENS.to_vec() }
    }

    pub fn get(&self, id: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Token, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::UnknownToken(id.to_string()))
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    /// Icon for a ledger symbol, falling back to [`FALLBACK_ICON`].
    pub fn icon_for_symbol(&self, symbol: &str) -> &'static str {
        self.by_symbol(symbol).map(|t| t.icon).unwrap_or(FALLBACK_ICON)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn mintable(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| MINTABLE_IDS.contains(&t.id))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::agri()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_agri_catalog_order_and_prices() {
        let catalog = Catalog::agri();
        let ids: Vec<_> = catalog.iter().map(|t| t.id).collect();
        assert_eq!(ids, ["maize", "soya", "wheat", "usdc", "usdt", "dai"]);
        assert_eq!(catalog.require("maize").unwrap().unit_price, dec!(2.34));
        assert_eq!(catalog.require("soya").unwrap().unit_price, dec!(3.12));
        assert_eq!(catalog.require("dai").unwrap().unit_price, dec!(1.00));
        assert!(Catalog::new(AGRI_TOKENS.to_vec()).is_ok());
    }

    #[test]
    fn test_rejects_duplicates_and_bad_prices() {
        let mut tokens = AGRI_TOKENS.to_vec();
        tokens.push(AGRI_TOKENS[0].clone());
        assert_eq!(Catalog::new(tokens), Err(CatalogError::DuplicateId("maize".to_string())));

        let mut tokens = AGRI_TOKENS.to_vec();
        tokens[1].unit_price = Decimal::ZERO;
        assert_eq!(Catalog::new(tokens), Err(CatalogError::NonPositivePrice("soya".to_string())));
    }

    #[test]
    fn test_icon_fallback() {
        let catalog = Catalog::agri();
        assert_eq!(catalog.icon_for_symbol("WHEAT"), "🌾");
        assert_eq!(catalog.icon_for_symbol("BONK"), FALLBACK_ICON);
    }

    #[test]
    fn test_mintable_are_commodities() {
        let symbols: Vec<_> = Catalog::agri().mintable().map(|t| t.symbol).collect();
        assert_eq!(symbols, ["MAIZE", "SOYA", "WHEAT"]);
    }
}
