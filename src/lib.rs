//! Hourly datacenter cooling-water and carbon simulator.

/// TOML scenario configuration and preset definitions.
pub mod config;
pub mod io;
/// Synthetic environment and workload series generators.
pub mod scenario;
/// Core simulation: psychrometrics, water balance, mode selection, scheduling.
pub mod sim;
