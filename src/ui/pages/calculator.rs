use dioxus::prelude::*;
use rust_decimal::Decimal;

use crate::{
    domain::{calculate_costs, AppState, CostBreakdown, QuoteInputs},
    infra::rates::fallback_quote,
    ui::components::{
        breakdown_table::{BreakdownRow, BreakdownTable},
        kpi_card::KpiCard,
        toast::{push_toast, ToastKind, ToastMessage},
    },
    util::format::{format_currency, format_percent},
};

/// One computed quote: the inputs it was computed from, the rate that was in
/// effect, and the derived breakdown. Kept together so the rendered lines
/// can't drift from a later form edit.
#[derive(Clone, PartialEq)]
struct QuoteResult {
    inputs: QuoteInputs,
    rate: Decimal,
    breakdown: CostBreakdown,
}

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let defaults = state.with(|st| st.defaults.clone());

    let mut product_name = use_signal(String::new);
    let mut client_name = use_signal(String::new);
    let mut units_input = use_signal(|| "33".to_string());
    let mut price_input = use_signal(|| "0.00".to_string());
    let mut freight_input = use_signal(|| "0.00".to_string());
    let mut duty_input = use_signal(|| "0".to_string());
    let mut brokerage_input = use_signal(|| defaults.brokerage.to_string());
    let mut markup_input = use_signal(|| defaults.markup.to_string());

    let mut result = use_signal(|| None::<QuoteResult>);

    let on_calculate = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let parsed = parse_inputs(
                units_input(),
                price_input(),
                freight_input(),
                duty_input(),
                brokerage_input(),
                markup_input(),
            );

            match parsed {
                Ok(inputs) => {
                    let quote = state.with(|st| st.rate.clone()).unwrap_or_else(fallback_quote);
                    match calculate_costs(&inputs, quote.rate) {
                        Ok(breakdown) => result.set(Some(QuoteResult {
                            inputs,
                            rate: quote.rate,
                            breakdown,
                        })),
                        Err(error) => {
                            push_toast(toasts.clone(), ToastKind::Error, error.to_string())
                        }
                    }
                }
                Err(message) => push_toast(toasts.clone(), ToastKind::Error, message),
            }
        }
    };

    rsx! {
        div { class: "space-y-8",
            form {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                onsubmit: on_calculate,
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Shipment" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                    div { class: "space-y-4",
                        Field { label: "Product Name",
                            input {
                                class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                value: product_name(),
                                oninput: move |evt| product_name.set(evt.value()),
                            }
                        }
                        Field { label: "Units",
                            input {
                                class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                r#type: "number",
                                min: "1",
                                step: "1",
                                value: units_input(),
                                oninput: move |evt| units_input.set(evt.value()),
                            }
                        }
                        Field { label: "Price per Unit ($)",
                            input {
                                class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                r#type: "number",
                                min: "0",
                                step: "0.01",
                                value: price_input(),
                                oninput: move |evt| price_input.set(evt.value()),
                            }
                        }
                        Field { label: "Freight ($)",
                            input {
                                class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                r#type: "number",
                                min: "0",
                                step: "0.01",
                                value: freight_input(),
                                oninput: move |evt| freight_input.set(evt.value()),
                            }
                        }
                    }
                    div { class: "space-y-4",
                        Field { label: "Duty Rate (%)",
                            input {
                                class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                r#type: "number",
                                min: "0",
                                step: "0.1",
                                value: duty_input(),
                                oninput: move |evt| duty_input.set(evt.value()),
                            }
                        }
                        Field { label: "Brokerage ($)",
                            input {
                                class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                r#type: "number",
                                min: "0",
                                step: "0.01",
                                value: brokerage_input(),
                                oninput: move |evt| brokerage_input.set(evt.value()),
                            }
                        }
                        Field { label: "Markup (%)",
                            input {
                                class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                r#type: "number",
                                min: "0",
                                step: "0.1",
                                value: markup_input(),
                                oninput: move |evt| markup_input.set(evt.value()),
                            }
                        }
                        Field { label: "Client",
                            input {
                                class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                                value: client_name(),
                                oninput: move |evt| client_name.set(evt.value()),
                            }
                        }
                    }
                }
                button {
                    class: "mt-6 rounded-lg bg-indigo-500 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-white hover:bg-indigo-400",
                    r#type: "submit",
                    "Calculate"
                }
            }

            if let Some(quote) = result() {
                QuoteResultView {
                    quote,
                    product_name: product_name(),
                    client_name: client_name(),
                }
            }
        }
    }
}

#[component]
fn Field(label: &'static str, children: Element) -> Element {
    rsx! {
        div {
            label { class: "block text-xs font-semibold uppercase text-slate-500", "{label}" }
            {children}
        }
    }
}

#[component]
fn QuoteResultView(quote: QuoteResult, product_name: String, client_name: String) -> Element {
    let QuoteResult {
        inputs,
        rate,
        breakdown,
    } = quote;

    let heading = match (product_name.trim(), client_name.trim()) {
        ("", "") => "Calculation Results".to_string(),
        (product, "") => format!("Calculation Results — {product}"),
        ("", client) => format!("Calculation Results — for {client}"),
        (product, client) => format!("Calculation Results — {product} for {client}"),
    };

    let exchange_pct = format_percent((rate - Decimal::ONE) * Decimal::ONE_HUNDRED);
    let cost_rows = vec![
        BreakdownRow::charge("Subtotal", format_currency(breakdown.subtotal)),
        BreakdownRow::charge("Freight", format_currency(inputs.freight)),
        BreakdownRow::total(
            "Total w/ Freight",
            format_currency(breakdown.total_with_freight),
        ),
        BreakdownRow::charge(
            format!("Exchange ({exchange_pct}%)"),
            format_currency(breakdown.exchange_amount),
        ),
        BreakdownRow::total(
            "Total w/ Exchange",
            format_currency(breakdown.total_with_exchange),
        ),
    ];

    let landed_rows = vec![
        BreakdownRow::charge(
            format!("Duty ({}%)", format_percent(inputs.duty_rate)),
            format_currency(breakdown.duty_amount),
        ),
        BreakdownRow::charge("Brokerage", format_currency(inputs.brokerage)),
        BreakdownRow::total(
            "Total Cost w/ Brokerage",
            format_currency(breakdown.total_with_brokerage),
        ),
        BreakdownRow::total("Total Cost Each", format_currency(breakdown.cost_each)),
        BreakdownRow::charge(
            format!("Markup ({}%)", format_percent(inputs.markup)),
            format_currency(breakdown.markup_amount),
        ),
    ];

    rsx! {
        section { class: "space-y-6",
            h2 { class: "text-lg font-semibold text-slate-100", "{heading}" }
            div { class: "grid gap-6 sm:grid-cols-2",
                BreakdownTable { title: "Cost Build-Up", rows: cost_rows }
                BreakdownTable { title: "Duty, Brokerage & Markup", rows: landed_rows }
            }
            div {
                h3 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Final Pricing" }
                div { class: "mt-3 grid gap-4 sm:grid-cols-2",
                    KpiCard {
                        title: "Total Selling Price",
                        value: format_currency(breakdown.total_selling_price),
                        description: Some(format!("for {} units", inputs.units)),
                    }
                    KpiCard {
                        title: "Price Each",
                        value: format_currency(breakdown.price_each),
                        description: Some("per unit, markup included".to_string()),
                    }
                }
            }
        }
    }
}

fn parse_inputs(
    units: String,
    price_per_unit: String,
    freight: String,
    duty_rate: String,
    brokerage: String,
    markup: String,
) -> Result<QuoteInputs, String> {
    let units: u32 = units
        .trim()
        .parse()
        .map_err(|_| "Units must be a whole number".to_string())?;
    if units == 0 {
        return Err("Units must be at least 1".to_string());
    }

    Ok(QuoteInputs {
        units,
        price_per_unit: parse_money(&price_per_unit, "Price per unit")?,
        freight: parse_money(&freight, "Freight")?,
        duty_rate: parse_money(&duty_rate, "Duty rate")?,
        brokerage: parse_money(&brokerage, "Brokerage")?,
        markup: parse_money(&markup, "Markup")?,
    })
}

fn parse_money(raw: &str, field: &str) -> Result<Decimal, String> {
    let value: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| format!("{field} must be a number"))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(format!("{field} cannot be negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn raw(
        units: &str,
        price: &str,
        freight: &str,
        duty: &str,
        brokerage: &str,
        markup: &str,
    ) -> Result<QuoteInputs, String> {
        parse_inputs(
            units.to_string(),
            price.to_string(),
            freight.to_string(),
            duty.to_string(),
            brokerage.to_string(),
            markup.to_string(),
        )
    }

    #[test]
    fn parses_the_form_defaults() {
        let inputs = raw("33", "10.00", "50.00", "5", "130.00", "50").unwrap();
        assert_eq!(inputs.units, 33);
        assert_eq!(inputs.price_per_unit, dec!(10.00));
        assert_eq!(inputs.brokerage, dec!(130.00));
        assert_eq!(inputs.markup, dec!(50));
    }

    #[test]
    fn trims_whitespace() {
        let inputs = raw(" 4 ", " 2.50 ", "0", "0", "0", "0").unwrap();
        assert_eq!(inputs.units, 4);
        assert_eq!(inputs.price_per_unit, dec!(2.50));
    }

    #[test]
    fn rejects_zero_and_fractional_units() {
        assert!(raw("0", "1", "0", "0", "0", "0").is_err());
        assert!(raw("2.5", "1", "0", "0", "0", "0").is_err());
        assert!(raw("", "1", "0", "0", "0", "0").is_err());
    }

    #[test]
    fn rejects_negative_money_fields_with_the_field_name() {
        let err = raw("3", "1.00", "-5", "0", "0", "0").unwrap_err();
        assert_eq!(err, "Freight cannot be negative");
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = raw("3", "abc", "0", "0", "0", "0").unwrap_err();
        assert_eq!(err, "Price per unit must be a number");
    }
}
