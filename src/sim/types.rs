//! Core simulation types: input records, output records, and input errors.

use std::fmt;

/// Ambient and grid conditions for one simulated hour.
///
/// Supplied externally (synthetic generator or file loader) and never
/// mutated by the core.
#[derive(Debug, Clone)]
pub struct EnvironmentHour {
    /// Hour index (0-based, contiguous).
    pub hour: usize,
    /// Dry-bulb air temperature (°C).
    pub dry_bulb_c: f64,
    /// Relative humidity (%, 0–100).
    pub rh_pct: f64,
    /// Water embedded in grid electricity (L/kWh).
    pub grid_water_l_per_kwh: f64,
    /// Carbon intensity of grid electricity (kg CO2/kWh).
    pub grid_carbon_kg_per_kwh: f64,
}

/// Server energy demand for one simulated hour.
#[derive(Debug, Clone)]
pub struct WorkloadHour {
    /// Hour index (0-based, contiguous, matching the environment series).
    pub hour: usize,
    /// Non-shiftable server energy (kWh, >= 0).
    pub base_kwh: f64,
    /// Maximum additional flexible energy schedulable this hour (kWh, >= 0).
    pub flex_capacity_kwh: f64,
}

/// Complete record of one simulated hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourResult {
    /// Hour index.
    pub hour: usize,
    /// Name of the selected cooling mode.
    pub mode: String,
    /// Server energy this hour, base plus allocated flex (kWh).
    pub server_kwh: f64,
    /// Total facility energy: `server_kwh * (base_pue + delta_pue)` (kWh).
    pub facility_kwh: f64,
    /// Water permanently lost onsite, evaporation plus drift (L).
    pub onsite_consumption_l: f64,
    /// Net blowdown discharged after recycling (L).
    pub onsite_blowdown_l: f64,
    /// Total onsite withdrawal, consumption plus blowdown (L).
    pub onsite_withdrawal_l: f64,
    /// Water embedded in the grid electricity consumed (L).
    pub offsite_water_l: f64,
    /// Carbon emitted by the grid electricity consumed (kg CO2).
    pub carbon_kg: f64,
    /// Flexible energy allocated to this hour (kWh).
    pub flex_kwh: f64,
}

impl fmt::Display for HourResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>3} | mode={:<10} | server={:>8.1} kWh (flex {:>6.1})  \
             facility={:>8.1} kWh | onsite={:>8.1} L  withdrawal={:>8.1} L  \
             offsite={:>8.1} L | carbon={:>7.1} kg",
            self.hour,
            self.mode,
            self.server_kwh,
            self.flex_kwh,
            self.facility_kwh,
            self.onsite_consumption_l,
            self.onsite_withdrawal_l,
            self.offsite_water_l,
            self.carbon_kg,
        )
    }
}

/// Invalid-input error with field path and constraint description.
///
/// Returned by the core before any simulation work starts; a non-empty
/// error list means nothing was simulated.
#[derive(Debug, Clone)]
pub struct InputError {
    /// Dotted field path (e.g., `"water_params.cycles_of_concentration"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl InputError {
    /// Creates an input error from a field path and message.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input error: {} — {}", self.field, self.message)
    }
}
