use dioxus::prelude::*;

use crate::domain::RateQuote;
use crate::util::format::format_rate;

/// Header badge showing the session's USD→CAD rate and where it came from.
#[component]
pub fn RateBadge(quote: Option<RateQuote>) -> Element {
    let (label, color) = match &quote {
        Some(q) if !q.is_fallback() => (
            "Live",
            "bg-emerald-500/10 text-emerald-300 border-emerald-500/40",
        ),
        Some(_) => (
            "Fallback",
            "bg-amber-500/10 text-amber-300 border-amber-500/40",
        ),
        None => (
            "Fetching",
            "bg-slate-700/40 text-slate-300 border-slate-600/60",
        ),
    };

    let rate_text = quote
        .as_ref()
        .map(|q| format!("USD → CAD {}", format_rate(q.rate)))
        .unwrap_or_else(|| "USD → CAD —".to_string());

    rsx! {
        span {
            class: "inline-flex items-center gap-2 text-sm text-slate-300",
            "{rate_text}"
            span {
                class: "inline-flex items-center rounded-full border px-2 py-0.5 text-xs font-medium {color}",
                "{label}"
            }
        }
    }
}
