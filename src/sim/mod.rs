pub mod engine;
/// Post-hoc aggregation of hourly results.
pub mod kpi;
pub mod modes;
/// Wet-bulb temperature approximation.
pub mod psychro;
pub mod scheduler;
pub mod selector;
pub mod types;
/// Cooling-water mass balance.
pub mod water;
pub mod wue;
