use std::time::SystemTime;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Validated numeric inputs for one quote. Labels (product, client) are
/// display-only and never enter the calculation, so they stay in the form.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteInputs {
    /// Number of units in the shipment. Must be at least 1.
    pub units: u32,
    /// Purchase price per unit, in USD.
    pub price_per_unit: Decimal,
    /// Flat freight charge for the whole shipment, in USD.
    pub freight: Decimal,
    /// Duty tariff as a percentage (5 means 5%).
    pub duty_rate: Decimal,
    /// Flat customs-broker fee.
    pub brokerage: Decimal,
    /// Markup on landed cost as a percentage (50 means 50%).
    pub markup: Decimal,
}

/// Full cost derivation for one quote. Every field is determined by the
/// inputs; values carry full `Decimal` precision and are only rounded for
/// display.
#[derive(Clone, Debug, PartialEq)]
pub struct CostBreakdown {
    pub subtotal: Decimal,
    pub total_with_freight: Decimal,
    pub exchange_amount: Decimal,
    pub total_with_exchange: Decimal,
    pub duty_amount: Decimal,
    pub total_with_brokerage: Decimal,
    pub cost_each: Decimal,
    pub markup_amount: Decimal,
    pub total_selling_price: Decimal,
    pub price_each: Decimal,
}

/// Where an exchange rate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateSource {
    /// Fetched from the remote quote endpoint this session.
    Live,
    /// The hardcoded rate used when the remote lookup fails.
    Fallback,
}

/// A USD→CAD exchange rate with its provenance. The surcharge is already
/// applied; this is the rate the calculation consumes directly.
#[derive(Clone, Debug, PartialEq)]
pub struct RateQuote {
    pub rate: Decimal,
    pub source: RateSource,
    pub fetched_at: SystemTime,
}

impl RateQuote {
    pub fn is_fallback(&self) -> bool {
        self.source == RateSource::Fallback
    }
}

/// User-adjustable defaults prefilled into new quotes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteDefaults {
    pub brokerage: Decimal,
    pub markup: Decimal,
}

impl Default for QuoteDefaults {
    fn default() -> Self {
        Self {
            brokerage: dec!(130.00),
            markup: dec!(50),
        }
    }
}
