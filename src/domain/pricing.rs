//! The landed-cost derivation.
//!
//! Ten sequential steps from shipment inputs to a selling price. Each
//! percentage is applied to the running total, not the opening subtotal:
//! freight, currency conversion, duty and brokerage compound the way they do
//! on a real customs invoice. Values stay at full `Decimal` precision
//! throughout; rounding to currency precision is the display layer's job.

use rust_decimal::Decimal;
use thiserror::Error;

use super::entities::{CostBreakdown, QuoteInputs};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("units must be at least 1")]
    ZeroUnits,
    #[error("{field} cannot be negative")]
    NegativeInput { field: &'static str },
}

impl QuoteInputs {
    /// Rejects inputs the derivation is undefined for. The form validates
    /// with friendlier messages first; this is the hard guard.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.units == 0 {
            return Err(PricingError::ZeroUnits);
        }
        for (field, value) in [
            ("price per unit", self.price_per_unit),
            ("freight", self.freight),
            ("duty rate", self.duty_rate),
            ("brokerage", self.brokerage),
            ("markup", self.markup),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(PricingError::NegativeInput { field });
            }
        }
        Ok(())
    }
}

/// Derives the full cost breakdown for a quote.
///
/// Pure: the same inputs and rate always produce an identical breakdown.
/// Never panics; invalid inputs come back as [`PricingError`] before any
/// arithmetic runs.
pub fn calculate_costs(
    inputs: &QuoteInputs,
    exchange_rate: Decimal,
) -> Result<CostBreakdown, PricingError> {
    inputs.validate()?;
    let units = Decimal::from(inputs.units);

    let subtotal = units * inputs.price_per_unit;
    let total_with_freight = subtotal + inputs.freight;

    let exchange_amount = total_with_freight * (exchange_rate - Decimal::ONE);
    let total_with_exchange = total_with_freight + exchange_amount;

    let duty_amount = total_with_exchange * (inputs.duty_rate / Decimal::ONE_HUNDRED);
    let total_with_brokerage = total_with_exchange + duty_amount + inputs.brokerage;

    let cost_each = total_with_brokerage / units;
    let markup_amount = total_with_brokerage * (inputs.markup / Decimal::ONE_HUNDRED);
    let total_selling_price = total_with_brokerage + markup_amount;

    let price_each = total_selling_price / units;

    Ok(CostBreakdown {
        subtotal,
        total_with_freight,
        exchange_amount,
        total_with_exchange,
        duty_amount,
        total_with_brokerage,
        cost_each,
        markup_amount,
        total_selling_price,
        price_each,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn inputs(
        units: u32,
        price_per_unit: Decimal,
        freight: Decimal,
        duty_rate: Decimal,
        brokerage: Decimal,
        markup: Decimal,
    ) -> QuoteInputs {
        QuoteInputs {
            units,
            price_per_unit,
            freight,
            duty_rate,
            brokerage,
            markup,
        }
    }

    #[test]
    fn reference_scenario() {
        // 33 units at $10 with $50 freight, rate 1.377, 5% duty,
        // $130 brokerage, 50% markup.
        let quote = inputs(33, dec!(10.00), dec!(50.00), dec!(5), dec!(130.00), dec!(50));
        let result = calculate_costs(&quote, dec!(1.377)).unwrap();

        assert_eq!(result.subtotal, dec!(330.00));
        assert_eq!(result.total_with_freight, dec!(380.00));
        assert_eq!(result.exchange_amount, dec!(143.26));
        assert_eq!(result.total_with_exchange, dec!(523.26));
        assert_eq!(result.duty_amount, dec!(26.163));
        assert_eq!(result.total_with_brokerage, dec!(679.423));
        assert_eq!(result.markup_amount, dec!(339.7115));
        assert_eq!(result.total_selling_price, dec!(1019.1345));
        assert_eq!(result.cost_each.round_dp(3), dec!(20.589));
        assert_eq!(result.price_each.round_dp(3), dec!(30.883));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let quote = inputs(7, dec!(19.99), dec!(12.34), dec!(6.5), dec!(85.00), dec!(40));
        let first = calculate_costs(&quote, dec!(1.41)).unwrap();
        let second = calculate_costs(&quote, dec!(1.41)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn freight_adds_exactly() {
        let quote = inputs(12, dec!(3.33), dec!(17.89), dec!(0), dec!(0), dec!(0));
        let result = calculate_costs(&quote, dec!(1.377)).unwrap();
        assert_eq!(result.total_with_freight, result.subtotal + dec!(17.89));
    }

    #[test]
    fn per_unit_price_round_trips_through_units() {
        let quote = inputs(33, dec!(10.00), dec!(50.00), dec!(5), dec!(130.00), dec!(50));
        let result = calculate_costs(&quote, dec!(1.377)).unwrap();

        let recovered = result.price_each * Decimal::from(quote.units);
        assert_eq!(
            recovered.round_dp(10),
            result.total_selling_price.round_dp(10)
        );
    }

    #[test]
    fn single_unit_collapses_per_unit_fields() {
        let quote = inputs(1, dec!(250.00), dec!(20.00), dec!(8), dec!(130.00), dec!(35));
        let result = calculate_costs(&quote, dec!(1.377)).unwrap();

        assert_eq!(result.cost_each, result.total_with_brokerage);
        assert_eq!(result.price_each, result.total_selling_price);
    }

    #[test]
    fn zero_extras_leave_only_the_exchange_step() {
        let quote = inputs(10, dec!(2.50), dec!(0), dec!(0), dec!(0), dec!(0));
        let rate = dec!(1.377);
        let result = calculate_costs(&quote, rate).unwrap();

        assert_eq!(result.subtotal, dec!(25.00));
        assert_eq!(result.total_with_exchange, result.subtotal * rate);
        assert_eq!(result.total_selling_price, result.total_with_exchange);
    }

    #[test]
    fn unit_rate_means_no_exchange_amount() {
        let quote = inputs(4, dec!(9.00), dec!(10.00), dec!(0), dec!(0), dec!(0));
        let result = calculate_costs(&quote, Decimal::ONE).unwrap();

        assert_eq!(result.exchange_amount, dec!(0));
        assert_eq!(result.total_with_exchange, result.total_with_freight);
    }

    #[test]
    fn zero_units_is_rejected_before_dividing() {
        let quote = inputs(0, dec!(10.00), dec!(0), dec!(0), dec!(0), dec!(0));
        assert_eq!(
            calculate_costs(&quote, dec!(1.377)),
            Err(PricingError::ZeroUnits)
        );
    }

    #[test]
    fn negative_inputs_are_rejected() {
        let quote = inputs(5, dec!(10.00), dec!(-0.01), dec!(0), dec!(0), dec!(0));
        assert_eq!(
            calculate_costs(&quote, dec!(1.377)),
            Err(PricingError::NegativeInput { field: "freight" })
        );

        let quote = inputs(5, dec!(10.00), dec!(0), dec!(0), dec!(0), dec!(-50));
        assert_eq!(
            calculate_costs(&quote, dec!(1.377)),
            Err(PricingError::NegativeInput { field: "markup" })
        );
    }
}
