use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::AppState;
use crate::ui::components::rate_badge::RateBadge;
use crate::util::format::current_date_label;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let quote = state.with(|st| st.rate.clone());
    let date_label = current_date_label();

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
            header {
                class: "border-b border-slate-900/60 bg-slate-950/80 backdrop-blur px-6 py-4",
                div { class: "mx-auto flex max-w-5xl flex-wrap items-center justify-between gap-4",
                    div {
                        h1 { class: "text-xl font-semibold tracking-tight", "Landed Cost Calculator" }
                        p { class: "text-xs text-slate-500", "USD purchases, priced in CAD" }
                    }
                    div { class: "flex items-center gap-4",
                        span { class: "text-xs text-slate-500", "{date_label}" }
                        RateBadge { quote }
                    }
                    nav { class: "flex gap-2 text-sm",
                        NavButton {
                            active: matches!(current_route, Route::Calculator {}),
                            onclick: move |_| { nav.push(Route::Calculator {}); },
                            label: "Calculator",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "⚙️",
                        }
                    }
                }
            }
            main { class: "mx-auto max-w-5xl px-6 py-10",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        "min-w-[5.5rem] rounded-lg border border-indigo-500/60 bg-indigo-500/15 px-4 py-2 font-semibold text-indigo-300"
    } else {
        "min-w-[5.5rem] rounded-lg border border-transparent px-4 py-2 text-slate-400 transition hover:border-slate-700 hover:bg-slate-900/80 hover:text-slate-200"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
