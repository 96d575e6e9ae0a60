use dioxus::prelude::*;
use rust_decimal::Decimal;

use crate::{
    app::persist_user_state,
    domain::{AppState, QuoteDefaults, RateSource},
    ui::components::{
        rate_badge::RateBadge,
        toast::{push_toast, ToastKind, ToastMessage},
    },
    util::format::humanize_age,
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let rate_refresh = use_context::<Signal<u32>>();

    let initial_defaults = state.with(|st| st.defaults.clone());

    let mut brokerage_input = use_signal(|| initial_defaults.brokerage.to_string());
    let mut markup_input = use_signal(|| initial_defaults.markup.to_string());

    let quote = state.with(|st| st.rate.clone());
    let rate_caption = match &quote {
        Some(q) => {
            let age = humanize_age(q.fetched_at);
            match q.source {
                RateSource::Live => format!("Fetched from the quote source {age}."),
                RateSource::Fallback => {
                    format!("Quote source unreachable {age}; the fallback rate is in effect.")
                }
            }
        }
        None => "Fetching the current rate...".to_string(),
    };

    let on_apply = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            match parse_defaults(brokerage_input(), markup_input()) {
                Ok(defaults) => {
                    state.with_mut(|st| st.defaults = defaults);
                    persist_user_state(&state);
                    push_toast(toasts.clone(), ToastKind::Success, "Updated quote defaults.");
                }
                Err(message) => {
                    push_toast(toasts.clone(), ToastKind::Error, message);
                }
            }
        }
    };

    let on_reset = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let defaults = QuoteDefaults::default();
            brokerage_input.set(defaults.brokerage.to_string());
            markup_input.set(defaults.markup.to_string());
            state.with_mut(|st| st.defaults = defaults);
            persist_user_state(&state);
            push_toast(toasts.clone(), ToastKind::Info, "Restored default quote values.");
        }
    };

    let on_refresh_rate = {
        let mut rate_refresh = rate_refresh.clone();
        let toasts = toasts.clone();
        move |_| {
            rate_refresh.with_mut(|generation| *generation += 1);
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Fetching a fresh USD → CAD rate...",
            );
        }
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Quote Defaults" }
                p { class: "mt-2 text-sm text-slate-400", "Prefilled into every new quote. Brokerage is a flat fee; markup is a percentage of landed cost." }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2",
                    div {
                        label { class: "block text-xs font-semibold uppercase text-slate-500", "Brokerage ($)" }
                        input {
                            class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                            value: brokerage_input(),
                            oninput: move |evt| brokerage_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "block text-xs font-semibold uppercase text-slate-500", "Markup (%)" }
                        input {
                            class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                            value: markup_input(),
                            oninput: move |evt| markup_input.set(evt.value()),
                        }
                    }
                }
                div { class: "mt-4 flex gap-3",
                    button { class: "rounded-lg bg-indigo-500 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-white hover:bg-indigo-400", onclick: on_apply, "Apply" }
                    button { class: "rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800", onclick: on_reset, "Reset Defaults" }
                }
            }

            section {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Exchange Rate" }
                div { class: "mt-3 flex items-center gap-4",
                    RateBadge { quote }
                }
                p { class: "mt-2 text-sm text-slate-400", "{rate_caption}" }
                p { class: "mt-1 text-xs text-slate-500", "The quoted base rate carries a fixed 2% surcharge. When the quote source cannot be reached, the calculator falls back to 1.35 × 1.02." }
                button { class: "mt-4 rounded-lg border border-indigo-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-indigo-200 hover:bg-indigo-500/10", onclick: on_refresh_rate, "Refresh Rate" }
            }

            section {
                class: "flex flex-col items-center gap-2 rounded-xl border border-slate-800 bg-slate-900/40 p-6 text-center text-slate-400",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Data Attribution" }
                p {
                    class: "text-sm",
                    "Exchange rates provided by "
                    a {
                        href: "https://www.exchangerate-api.com",
                        target: "_blank",
                        rel: "noreferrer",
                        class: "text-indigo-300 hover:text-indigo-100",
                        "ExchangeRate-API"
                    }
                    "."
                }
                p { class: "text-xs text-slate-500", "Rates are indicative; confirm with your broker before quoting." }
            }
        }
    }
}

fn parse_defaults(brokerage: String, markup: String) -> Result<QuoteDefaults, String> {
    let brokerage: Decimal = brokerage
        .trim()
        .parse()
        .map_err(|_| "Brokerage must be numeric".to_string())?;
    if brokerage.is_sign_negative() && !brokerage.is_zero() {
        return Err("Brokerage cannot be negative".to_string());
    }
    let markup: Decimal = markup
        .trim()
        .parse()
        .map_err(|_| "Markup must be numeric".to_string())?;
    if markup.is_sign_negative() && !markup.is_zero() {
        return Err("Markup cannot be negative".to_string());
    }

    Ok(QuoteDefaults { brokerage, markup })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_defaults() {
        let defaults = parse_defaults("130.00".to_string(), "50".to_string()).unwrap();
        assert_eq!(defaults.brokerage, dec!(130.00));
        assert_eq!(defaults.markup, dec!(50));
    }

    #[test]
    fn rejects_bad_defaults() {
        assert!(parse_defaults("abc".to_string(), "50".to_string()).is_err());
        assert!(parse_defaults("130".to_string(), "-1".to_string()).is_err());
    }
}
