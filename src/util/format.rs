//! Display formatting. All rounding to currency precision happens here, at
//! the presentation boundary; the calculation keeps full precision.

use std::time::SystemTime;

use rust_decimal::{Decimal, RoundingStrategy};
use time::{format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Currency amount with a dollar sign: `$1,019.13`, `-$4.50`.
pub fn format_currency(value: Decimal) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${amount}"),
    }
}

/// Fixed two decimals with thousands separators, midpoint rounded away from
/// zero: `1,019.13`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Percentage for labels, trailing zeros trimmed: `5`, `37.7`.
pub fn format_percent(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Exchange rate at two decimals, no separators.
pub fn format_rate(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Today's date for the page header, local time when the platform can tell
/// us the offset.
pub fn current_date_label() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(DATE_FORMAT).unwrap_or_default()
}

/// Coarse age label for a fetch timestamp: `just now`, `12m ago`, `3h ago`.
pub fn humanize_age(time: SystemTime) -> String {
    let secs = time.elapsed().map(|elapsed| elapsed.as_secs()).unwrap_or(0);
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn amounts_round_to_two_decimals_with_separators() {
        assert_eq!(format_amount(dec!(1019.1345)), "1,019.13");
        assert_eq!(format_amount(dec!(330)), "330.00");
        assert_eq!(format_amount(dec!(1234567.895)), "1,234,567.90");
        assert_eq!(format_amount(dec!(0.005)), "0.01");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside_the_grouping() {
        assert_eq!(format_amount(dec!(-1500)), "-1,500.00");
        assert_eq!(format_currency(dec!(-1500)), "-$1,500.00");
    }

    #[test]
    fn currency_prefixes_a_dollar_sign() {
        assert_eq!(format_currency(dec!(679.423)), "$679.42");
    }

    #[test]
    fn percent_labels_trim_trailing_zeros() {
        assert_eq!(format_percent(dec!(5.0)), "5");
        assert_eq!(format_percent(dec!(37.70)), "37.7");
        assert_eq!(format_percent(dec!(0)), "0");
    }

    #[test]
    fn rates_show_two_decimals() {
        assert_eq!(format_rate(dec!(1.377)), "1.38");
        assert_eq!(format_rate(dec!(1.4)), "1.40");
    }
}
