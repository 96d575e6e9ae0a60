pub mod breakdown_table;
pub mod kpi_card;
pub mod rate_badge;
pub mod toast;
