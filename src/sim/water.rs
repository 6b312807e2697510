//! Cooling-water mass balance for one hour of facility operation.

/// Recirculating-water-system parameters.
#[derive(Debug, Clone, Copy)]
pub struct WaterSystemParams {
    /// Cycles of concentration (must be > 1; drives the blowdown ratio).
    pub cycles_of_concentration: f64,
    /// Drift loss as a fraction of evaporation, in [0, 1).
    pub drift_frac_of_evap: f64,
    /// Fraction of blowdown recovered by onsite recycling, in [0, 1].
    pub recycle_blowdown_frac: f64,
}

impl Default for WaterSystemParams {
    fn default() -> Self {
        Self {
            cycles_of_concentration: 5.0,
            drift_frac_of_evap: 0.002,
            recycle_blowdown_frac: 0.3,
        }
    }
}

/// Water quantities for one hour under one cooling mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterBalance {
    /// Water permanently lost onsite: evaporation plus drift (L).
    pub onsite_consumption_l: f64,
    /// Net blowdown discharged after recycling (L).
    pub onsite_blowdown_l: f64,
    /// Total onsite withdrawal: consumption plus net blowdown (L).
    pub onsite_withdrawal_l: f64,
    /// Water embedded in the grid electricity consumed (L).
    pub offsite_water_l: f64,
}

/// Computes the hourly water balance.
///
/// `wue_l_per_kwh` is the selected mode's water-usage effectiveness,
/// `facility_kwh` the total facility energy for the hour, and
/// `grid_water_l_per_kwh` the grid's embedded water intensity. The offsite
/// term depends only on energy, not on the cooling mode.
///
/// Caller guarantees `params.cycles_of_concentration > 1` (validated at
/// the simulation boundary); the blowdown ratio divides by `CoC - 1`.
pub fn water_balance(
    wue_l_per_kwh: f64,
    facility_kwh: f64,
    grid_water_l_per_kwh: f64,
    params: &WaterSystemParams,
) -> WaterBalance {
    let evaporation_l = wue_l_per_kwh * facility_kwh;
    let drift_l = params.drift_frac_of_evap * evaporation_l;
    let blowdown_gross_l = evaporation_l / (params.cycles_of_concentration - 1.0);
    let blowdown_net_l = blowdown_gross_l * (1.0 - params.recycle_blowdown_frac);

    let onsite_consumption_l = evaporation_l + drift_l;
    let onsite_withdrawal_l = onsite_consumption_l + blowdown_net_l;

    WaterBalance {
        onsite_consumption_l,
        onsite_blowdown_l: blowdown_net_l,
        onsite_withdrawal_l,
        offsite_water_l: grid_water_l_per_kwh * facility_kwh,
    }
}
