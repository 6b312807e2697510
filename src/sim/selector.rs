//! Per-hour cooling-mode selection.

use super::modes::{CoolingConfig, CoolingMode};
use super::types::EnvironmentHour;
use super::water::{WaterBalance, WaterSystemParams, water_balance};

/// Objective weights for the mode-selection score.
///
/// At least one weight must be positive, otherwise every mode ties
/// trivially; this is checked at the simulation boundary.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    /// Weight on onsite water consumption (per L).
    pub w_onsite_water: f64,
    /// Weight on grid-embedded offsite water (per L).
    pub w_offsite_water: f64,
    /// Weight on carbon emissions (per kg).
    pub w_carbon: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            w_onsite_water: 1.0,
            w_offsite_water: 0.2,
            w_carbon: 5.0,
        }
    }
}

/// Full evaluation of one cooling mode for one hour.
#[derive(Debug, Clone)]
pub struct ModeEvaluation {
    /// Name of the evaluated mode.
    pub mode: String,
    /// Facility energy under this mode (kWh).
    pub facility_kwh: f64,
    /// Water balance under this mode.
    pub water: WaterBalance,
    /// Grid carbon emitted (kg CO2).
    pub carbon_kg: f64,
    /// Weighted objective score (lower is better).
    pub objective: f64,
}

/// Evaluates a single mode at the given server energy.
pub fn evaluate_mode(
    mode: &CoolingMode,
    server_kwh: f64,
    env: &EnvironmentHour,
    base_pue: f64,
    params: &WaterSystemParams,
    weights: &Weights,
) -> ModeEvaluation {
    let facility_kwh = server_kwh * (base_pue + mode.delta_pue);
    let wue = mode.wue_l_per_kwh(env.dry_bulb_c, env.rh_pct);
    let water = water_balance(wue, facility_kwh, env.grid_water_l_per_kwh, params);
    let carbon_kg = facility_kwh * env.grid_carbon_kg_per_kwh;

    let objective = weights.w_onsite_water * water.onsite_consumption_l
        + weights.w_offsite_water * water.offsite_water_l
        + weights.w_carbon * carbon_kg;

    ModeEvaluation {
        mode: mode.name.clone(),
        facility_kwh,
        water,
        carbon_kg,
        objective,
    }
}

/// Selects the minimum-objective mode for one hour.
///
/// Modes are scanned in registry insertion order and ties keep the first
/// minimum, so the choice is deterministic for identical inputs.
///
/// # Panics
///
/// Panics if the registry is empty; the simulation boundary rejects empty
/// mode sets before any selection runs.
pub fn select_mode(
    server_kwh: f64,
    env: &EnvironmentHour,
    cooling: &CoolingConfig,
    params: &WaterSystemParams,
    weights: &Weights,
) -> ModeEvaluation {
    let mut iter = cooling.modes().iter();
    let first = iter
        .next()
        .expect("cooling config must contain at least one mode");
    let mut best = evaluate_mode(first, server_kwh, env, cooling.base_pue, params, weights);
    for mode in iter {
        let eval = evaluate_mode(mode, server_kwh, env, cooling.base_pue, params, weights);
        // Strict comparison keeps the first mode on ties.
        if eval.objective < best.objective {
            best = eval;
        }
    }
    best
}

/// Marginal objective cost per kWh of server energy for one hour.
///
/// The objective is linear in server energy, so evaluating at 1 kWh gives
/// the pure rate used to rank hours for flexible-load placement.
pub fn marginal_rate(
    env: &EnvironmentHour,
    cooling: &CoolingConfig,
    params: &WaterSystemParams,
    weights: &Weights,
) -> f64 {
    select_mode(1.0, env, cooling, params, weights).objective
}
