use serde::{Deserialize, Serialize};

use super::entities::{QuoteDefaults, RateQuote};

/// Session state shared through the Dioxus context. One user, one window:
/// the current exchange rate and the quote defaults. Breakdowns are page
/// state, recomputed on demand, never stored here.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Rate for this session; `None` until the first fetch resolves.
    pub rate: Option<RateQuote>,
    pub defaults: QuoteDefaults,
}

impl AppState {
    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.defaults = persisted.defaults;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            defaults: self.defaults.clone(),
        }
    }
}

/// What survives an app restart: the quote defaults, nothing else.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub defaults: QuoteDefaults,
}
