//! Domain logic for landed-cost pricing lives here.

pub mod app_state;
pub mod entities;
pub mod pricing;

pub use app_state::{AppState, PersistedState};
pub use entities::{CostBreakdown, QuoteDefaults, QuoteInputs, RateQuote, RateSource};
pub use pricing::{calculate_costs, PricingError};
