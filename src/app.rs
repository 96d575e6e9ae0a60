use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{AppState, RateSource},
    infra::rates::{fallback_quote, RateClient},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{CalculatorPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/calculator")]
    Calculator {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    // Bumped by the settings page to force a fresh lookup mid-session.
    let rate_refresh = use_signal(|| 0_u32);
    use_context_provider(|| rate_refresh.clone());

    let _rate = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let rate_refresh = rate_refresh.clone();
        move || async move { fetch_exchange_rate(state.clone(), toasts.clone(), rate_refresh()).await }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        println!("Failed to persist quote defaults: {err}");
    }
}

/// One lookup per session load (and one per manual refresh). The lookup is
/// total, so this always lands a usable rate in the state; a fallback only
/// gets a warning toast.
async fn fetch_exchange_rate(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    generation: u32,
) -> RateSource {
    let quote = match RateClient::new() {
        Ok(client) => client.get_exchange_rate().await,
        Err(error) => {
            println!("[rates] Failed to initialise rate client: {error}");
            fallback_quote()
        }
    };

    let source = quote.source;
    state.with_mut(|st| st.rate = Some(quote));

    if source == RateSource::Fallback {
        push_toast(
            toasts.clone(),
            ToastKind::Warning,
            "Live exchange rate unavailable; using the fallback USD→CAD rate.",
        );
    } else if generation > 0 {
        push_toast(toasts.clone(), ToastKind::Success, "Exchange rate refreshed.");
    }

    source
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
