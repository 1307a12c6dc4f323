//! # Amount Conversion
//!
//! Price-ratio conversion between catalog tokens and the two-sided swap form
//! that keeps a source amount and its derived counter-amount in step.
//!
//! All arithmetic is done in [`Decimal`] and rounded half away from zero to
//! [`DISPLAY_DP`] fractional digits.

use crate::error::PreconditionError;
use crate::model::catalog::{Catalog, Token};
use crate::orchestrator::intent::SwapIntent;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Fractional digits of a displayed counter-amount.
pub const DISPLAY_DP: u32 = 6;

/// Parse user input as a finite decimal. Blank or non-numeric input yields `None`.
/// Digit separators (`1_000`) are not numbers.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let input = input.trim();
    if input.is_empty() || input.contains('_') {
        return None;
    }

    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .ok()
}

/// `amount * source_price / target_price`, rounded to [`DISPLAY_DP`].
///
/// A missing or zero target price counts as 1. `None` only on overflow.
pub fn convert(amount: Decimal, source_price: Decimal, target_price: Option<Decimal>) -> Option<Decimal> {
    let target_price = match target_price {
        Some(price) if !price.is_zero() => price,
        _ => Decimal::ONE,
    };

    amount
        .checked_mul(source_price)?
        .checked_div(target_price)
        .map(round_display)
}

/// Convert raw input; blank or non-numeric input gives a blank counter-amount.
pub fn convert_input(input: &str, source_price: Decimal, target_price: Option<Decimal>) -> Option<Decimal> {
    parse_amount(input).and_then(|amount| convert(amount, source_price, target_price))
}

pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed six-digit rendering, e.g. `2.340000`.
pub fn format_amount(value: Decimal) -> String {
    format!("{:.6}", round_display(value))
}

/// Two-sided swap form: source token and amount, target token, derived counter-amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapForm {
    catalog: Catalog,
    source_id: &'static str,
    target_id: &'static str,
    source_amount: String,
    target_amount: Option<Decimal>,
}

impl SwapForm {
    /// Start a form on two distinct catalog tokens.
    pub fn new(catalog: Catalog, source_id: &str, target_id: &str, source_amount: &str) -> Result<Self, crate::error::CatalogError> {
        let source_id = catalog.require(source_id)?.id;
        let target_id = catalog.require(target_id)?.id;
        if source_id == target_id {
            return Err(crate::error::CatalogError::DuplicateId(source_id.to_string()));
        }

        let mut form = Self {
            catalog,
            source_id,
            target_id,
            source_amount: source_amount.to_string(),
            target_amount: None,
        };
        form.recompute();
        Ok(form)
    }

    /// MAIZE → USDC, amount `1`, over the built-in catalog.
    pub fn default_for(catalog: Catalog) -> Self {
        let source_id = catalog.get("maize").map(|t| t.id);
        let target_id = catalog.get("usdc").map(|t| t.id);

        // Custom catalogs fall back to their first two tokens
        let (first, second) = {
            let mut ids = catalog.iter().map(|t| t.id);
            let first = ids.next().unwrap_or("maize");
            (first, ids.next().unwrap_or("usdc"))
        };

        let mut form = Self {
            source_id: source_id.unwrap_or(first),
            target_id: target_id.unwrap_or(second),
            catalog,
            source_amount: "1".to_string(),
            target_amount: None,
        };
        form.recompute();
        form
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn source(&self) -> Option<&Token> {
        self.catalog.get(self.source_id)
    }

    pub fn target(&self) -> Option<&Token> {
        self.catalog.get(self.target_id)
    }

    pub fn source_id(&self) -> &'static str {
        self.source_id
    }

    pub fn target_id(&self) -> &'static str {
        self.target_id
    }

    pub fn source_amount(&self) -> &str {
        &self.source_amount
    }

    pub fn target_amount(&self) -> Option<Decimal> {
        self.target_amount
    }

    /// Counter-amount as shown in the read-only field; blank when undefined.
    pub fn target_amount_display(&self) -> String {
        self.target_amount.map(format_amount).unwrap_or_default()
    }

    pub fn set_source_amount(&mut self, input: &str) {
        self.source_amount = input.to_string();
        self.recompute();
    }

    /// Pick the source token. Picking the current target moves the old source over.
    pub fn select_source(&mut self, id: &str) -> Result<(), crate::error::CatalogError> {
        let id = self.catalog.require(id)?.id;
        if id == self.target_id {
            self.target_id = self.source_id;
        }
        self.source_id = id;
        self.recompute();
        Ok(())
    }

    /// Pick the target token. Picking the current source moves the old target over.
    pub fn select_target(&mut self, id: &str) -> Result<(), crate::error::CatalogError> {
        let id = self.catalog.require(id)?.id;
        if id == self.source_id {
            self.source_id = self.target_id;
        }
        self.target_id = id;
        self.recompute();
        Ok(())
    }

    /// Exchange the two sides. The former counter-amount becomes the new
    /// source amount and a fresh counter-amount is derived from it.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.source_id, &mut self.target_id);
        if let Some(previous) = self.target_amount {
            self.source_amount = previous.normalize().to_string();
        }
        self.recompute();
    }

    /// Units of target per unit of source, when both amounts are present.
    pub fn exchange_rate(&self) -> Option<Decimal> {
        parse_amount(&self.source_amount)?;
        self.target_amount?;
        let source = self.source()?;
        let target = self.target()?;
        convert(Decimal::ONE, source.unit_price, Some(target.unit_price))
    }

    /// `1 MAIZE = 2.34 USDC`
    pub fn exchange_rate_line(&self) -> Option<String> {
        let rate = self.exchange_rate()?;
        let source = self.source()?;
        let target = self.target()?;
        Some(format!("1 {} = {} {}", source.symbol, rate.normalize(), target.symbol))
    }

    /// Snapshot of the form for submission.
    pub fn intent(&self) -> Result<SwapIntent, PreconditionError> {
        let amount = parse_amount(&self.source_amount)
            .filter(|a| *a > Decimal::ZERO)
            .ok_or_else(|| PreconditionError::InvalidAmount(self.source_amount.clone()))?;
        let target_amount = self
            .target_amount
            .ok_or_else(|| PreconditionError::InvalidAmount(self.source_amount.clone()))?;
        let (source, target) = match (self.source(), self.target()) {
            (Some(source), Some(target)) => (source, target),
            _ => return Err(PreconditionError::InvalidAmount(self.source_amount.clone())),
        };
        if source.id == target.id {
            return Err(PreconditionError::SameToken(source.symbol.to_string()));
        }

        Ok(SwapIntent {
            source_id: source.id,
            source_symbol: source.symbol,
            target_id: target.id,
            target_symbol: target.symbol,
            source_amount: amount,
            target_amount,
        })
    }

    fn recompute(&mut self) {
        let target_price = self.target().map(|t| t.unit_price);
        let target_amount = self
            .source()
            .and_then(|source| convert_input(&self.source_amount, source.unit_price, target_price));
        self.target_amount = target_amount;
    }
}
