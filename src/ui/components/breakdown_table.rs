use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
pub struct BreakdownRow {
    pub label: String,
    pub amount: String,
    /// Running totals render brighter than the individual charges.
    pub emphasis: bool,
}

impl BreakdownRow {
    pub fn charge(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
            emphasis: false,
        }
    }

    pub fn total(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
            emphasis: true,
        }
    }

    fn label_class(&self) -> &'static str {
        if self.emphasis {
            "font-medium text-slate-100"
        } else {
            "text-slate-400"
        }
    }

    fn amount_class(&self) -> &'static str {
        if self.emphasis {
            "font-semibold text-slate-100"
        } else {
            "text-slate-300"
        }
    }
}

#[component]
pub fn BreakdownTable(title: &'static str, rows: Vec<BreakdownRow>) -> Element {
    rsx! {
        section {
            class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
            h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "{title}" }
            ul {
                class: "mt-4 divide-y divide-slate-800 text-sm",
                for row in rows {
                    li {
                        class: "flex items-center justify-between py-2",
                        span { class: "{row.label_class()}", "{row.label}" }
                        span { class: "{row.amount_class()}", "{row.amount}" }
                    }
                }
            }
        }
    }
}
