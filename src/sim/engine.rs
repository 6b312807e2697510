//! Hourly simulation engine: base pass, flexible allocation, re-selection.

use super::kpi::Totals;
use super::modes::CoolingConfig;
use super::scheduler::{ScheduleRequest, allocate_flex};
use super::selector::{Weights, marginal_rate, select_mode};
use super::types::{EnvironmentHour, HourResult, InputError, WorkloadHour};
use super::water::WaterSystemParams;

/// Complete simulation output.
#[derive(Debug, Clone)]
pub struct SimOutput {
    /// One result per input hour, in hour order.
    pub hours: Vec<HourResult>,
    /// Field-wise sums across all hours.
    pub totals: Totals,
    /// Flexible energy that could not be placed (kWh, 0 when fully placed).
    pub unallocated_flex_kwh: f64,
}

/// Simulation engine owning the validated input series and configuration.
///
/// Constructed through [`Engine::new`], which checks every input
/// precondition up front; a constructed engine can run any number of
/// schedule requests against the same inputs.
pub struct Engine {
    environment: Vec<EnvironmentHour>,
    workload: Vec<WorkloadHour>,
    cooling: CoolingConfig,
    water_params: WaterSystemParams,
    weights: Weights,
}

impl Engine {
    /// Creates an engine after validating all inputs.
    ///
    /// # Errors
    ///
    /// Returns every violated constraint (mismatched series lengths,
    /// non-contiguous hour indices, empty mode set, base PUE < 1,
    /// negative overheads, CoC <= 1, out-of-range fractions, negative or
    /// all-zero weights, negative energies) as a list of `InputError`s.
    pub fn new(
        environment: Vec<EnvironmentHour>,
        workload: Vec<WorkloadHour>,
        cooling: CoolingConfig,
        water_params: WaterSystemParams,
        weights: Weights,
    ) -> Result<Self, Vec<InputError>> {
        let mut errors = Vec::new();

        if environment.is_empty() {
            errors.push(InputError::new("environment", "must contain at least one hour"));
        }
        if environment.len() != workload.len() {
            errors.push(InputError::new(
                "workload",
                format!(
                    "length {} does not match environment length {}",
                    workload.len(),
                    environment.len()
                ),
            ));
        } else {
            for (t, (env, work)) in environment.iter().zip(&workload).enumerate() {
                if env.hour != t {
                    errors.push(InputError::new(
                        "environment.hour",
                        format!("index {} at position {t}, expected contiguous 0..H-1", env.hour),
                    ));
                    break;
                }
                if work.hour != t {
                    errors.push(InputError::new(
                        "workload.hour",
                        format!("index {} at position {t}, expected contiguous 0..H-1", work.hour),
                    ));
                    break;
                }
            }
            if let Some(w) = workload.iter().find(|w| w.base_kwh < 0.0) {
                errors.push(InputError::new(
                    "workload.base_kwh",
                    format!("must be >= 0, got {} at hour {}", w.base_kwh, w.hour),
                ));
            }
            if let Some(w) = workload.iter().find(|w| w.flex_capacity_kwh < 0.0) {
                errors.push(InputError::new(
                    "workload.flex_capacity_kwh",
                    format!("must be >= 0, got {} at hour {}", w.flex_capacity_kwh, w.hour),
                ));
            }
        }

        if cooling.modes().is_empty() {
            errors.push(InputError::new("cooling.modes", "must contain at least one mode"));
        }
        if cooling.base_pue < 1.0 {
            errors.push(InputError::new("cooling.base_pue", "must be >= 1.0"));
        }
        if let Some(m) = cooling.modes().iter().find(|m| m.delta_pue < 0.0) {
            errors.push(InputError::new(
                "cooling.modes.delta_pue",
                format!("must be >= 0, got {} for mode \"{}\"", m.delta_pue, m.name),
            ));
        }

        if water_params.cycles_of_concentration <= 1.0 {
            errors.push(InputError::new(
                "water_params.cycles_of_concentration",
                "must be > 1",
            ));
        }
        if !(0.0..1.0).contains(&water_params.drift_frac_of_evap) {
            errors.push(InputError::new(
                "water_params.drift_frac_of_evap",
                "must be in [0.0, 1.0)",
            ));
        }
        if !(0.0..=1.0).contains(&water_params.recycle_blowdown_frac) {
            errors.push(InputError::new(
                "water_params.recycle_blowdown_frac",
                "must be in [0.0, 1.0]",
            ));
        }

        if weights.w_onsite_water < 0.0 || weights.w_offsite_water < 0.0 || weights.w_carbon < 0.0 {
            errors.push(InputError::new("weights", "all weights must be >= 0"));
        }
        if weights.w_onsite_water == 0.0
            && weights.w_offsite_water == 0.0
            && weights.w_carbon == 0.0
        {
            errors.push(InputError::new(
                "weights",
                "at least one weight must be > 0, or every mode ties trivially",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            environment,
            workload,
            cooling,
            water_params,
            weights,
        })
    }

    /// Number of hours in the horizon.
    pub fn horizon(&self) -> usize {
        self.environment.len()
    }

    /// Validates a schedule request against this engine's horizon.
    pub fn validate_request(&self, request: &ScheduleRequest) -> Vec<InputError> {
        let mut errors = Vec::new();
        if request.total_flex_kwh < 0.0 {
            errors.push(InputError::new("request.total_flex_kwh", "must be >= 0"));
        }
        if request.deadline_hour >= self.horizon() {
            errors.push(InputError::new(
                "request.deadline_hour",
                format!(
                    "must be within the horizon [0, {}], got {}",
                    self.horizon() - 1,
                    request.deadline_hour
                ),
            ));
        }
        errors
    }

    /// Builds the result record for one hour at the given flex allocation.
    fn hour_result(&self, t: usize, flex_kwh: f64) -> HourResult {
        let server_kwh = self.workload[t].base_kwh + flex_kwh;
        let choice = select_mode(
            server_kwh,
            &self.environment[t],
            &self.cooling,
            &self.water_params,
            &self.weights,
        );
        HourResult {
            hour: t,
            mode: choice.mode,
            server_kwh,
            facility_kwh: choice.facility_kwh,
            onsite_consumption_l: choice.water.onsite_consumption_l,
            onsite_blowdown_l: choice.water.onsite_blowdown_l,
            onsite_withdrawal_l: choice.water.onsite_withdrawal_l,
            offsite_water_l: choice.water.offsite_water_l,
            carbon_kg: choice.carbon_kg,
            flex_kwh,
        }
    }

    /// Runs the mode selector over the base (non-flexible) load only.
    pub fn base_pass(&self) -> Vec<HourResult> {
        (0..self.horizon()).map(|t| self.hour_result(t, 0.0)).collect()
    }

    /// Per-hour marginal objective cost per kWh of server energy.
    pub fn marginal_rates(&self) -> Vec<f64> {
        self.environment
            .iter()
            .map(|env| marginal_rate(env, &self.cooling, &self.water_params, &self.weights))
            .collect()
    }

    /// Runs the full simulation: base pass, greedy flex allocation, and
    /// re-selection for every hour that received flexible energy.
    ///
    /// # Errors
    ///
    /// Returns `InputError`s if the request is outside the horizon or the
    /// budget is negative. A scheduling shortfall is not an error; it is
    /// reported in [`SimOutput::unallocated_flex_kwh`].
    pub fn run(&self, request: &ScheduleRequest) -> Result<SimOutput, Vec<InputError>> {
        let errors = self.validate_request(request);
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut hours = self.base_pass();
        let rates = self.marginal_rates();
        let plan = allocate_flex(&rates, &self.workload, request);

        // The added load can flip the cheapest mode, so re-select.
        for (t, &flex_kwh) in plan.per_hour_kwh.iter().enumerate() {
            if flex_kwh > 0.0 {
                hours[t] = self.hour_result(t, flex_kwh);
            }
        }

        let totals = Totals::from_results(&hours);
        Ok(SimOutput {
            hours,
            totals,
            unallocated_flex_kwh: plan.unallocated_kwh,
        })
    }
}

/// Runs a complete simulation from externally supplied inputs.
///
/// Validates every precondition, runs the base pass, places the flexible
/// budget before `deadline_hour`, and returns the per-hour records with
/// their field-wise totals.
///
/// # Errors
///
/// Returns the full list of violated input constraints; nothing is
/// simulated when the list is non-empty.
pub fn simulate(
    environment: Vec<EnvironmentHour>,
    workload: Vec<WorkloadHour>,
    cooling: CoolingConfig,
    water_params: WaterSystemParams,
    weights: Weights,
    total_flex_kwh: f64,
    deadline_hour: usize,
) -> Result<SimOutput, Vec<InputError>> {
    let engine = Engine::new(environment, workload, cooling, water_params, weights)?;
    engine.run(&ScheduleRequest {
        total_flex_kwh,
        deadline_hour,
    })
}
