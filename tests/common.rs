//! Shared fixtures for integration tests.

use coolsim::sim::engine::Engine;
use coolsim::sim::modes::CoolingConfig;
use coolsim::sim::selector::Weights;
use coolsim::sim::types::{EnvironmentHour, WorkloadHour};
use coolsim::sim::water::WaterSystemParams;

/// Environment series with varied conditions so different hours prefer
/// different modes and carry different marginal rates.
pub fn varied_environment(hours: usize) -> Vec<EnvironmentHour> {
    (0..hours)
        .map(|hour| EnvironmentHour {
            hour,
            dry_bulb_c: 14.0 + 1.5 * (hour % 16) as f64,
            rh_pct: 20.0 + 5.0 * (hour % 13) as f64,
            grid_water_l_per_kwh: 1.0 + 0.25 * (hour % 7) as f64,
            grid_carbon_kg_per_kwh: 0.25 + 0.05 * (hour % 9) as f64,
        })
        .collect()
}

/// Flat workload: constant base demand and flexible capacity.
pub fn flat_workload(hours: usize, base_kwh: f64, flex_capacity_kwh: f64) -> Vec<WorkloadHour> {
    (0..hours)
        .map(|hour| WorkloadHour {
            hour,
            base_kwh,
            flex_capacity_kwh,
        })
        .collect()
}

/// Engine over the varied environment with the standard three-mode
/// cooling configuration and default parameters.
pub fn standard_engine(hours: usize) -> Engine {
    Engine::new(
        varied_environment(hours),
        flat_workload(hours, 700.0, 120.0),
        CoolingConfig::standard(1.1),
        WaterSystemParams::default(),
        Weights::default(),
    )
    .expect("fixture inputs are valid")
}
