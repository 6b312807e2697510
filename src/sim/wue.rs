//! Per-mode water-usage-effectiveness models.
//!
//! Each model maps ambient conditions to liters of water per kWh of
//! facility energy, clamped into the mode's physically plausible band.
//! These are illustrative curves, not calibrated equipment models: the
//! band endpoints and monotonic direction are the contract, the
//! interpolation in between is a plain linear ramp.

use std::fmt;
use std::sync::Arc;

use super::psychro::wet_bulb_c;

/// Water-usage-effectiveness model, dispatched by variant.
#[derive(Debug, Clone)]
pub enum WueModel {
    /// Recirculating cooling tower; WUE rises with wet-bulb temperature.
    Tower(TowerWue),
    /// Evaporative air-side economizer; WUE is lowest in hot, dry air.
    EvapAir(EvapAirWue),
    /// Dry cooler; no evaporative water use at all.
    Dry(DryCoolerWue),
    /// Caller-supplied curve, clamped to non-negative.
    Custom(CustomWue),
}

impl WueModel {
    /// Evaluates the model at the given ambient conditions (L/kWh).
    pub fn evaluate(&self, temp_c: f64, rh_pct: f64) -> f64 {
        match self {
            WueModel::Tower(m) => m.evaluate(temp_c, rh_pct),
            WueModel::EvapAir(m) => m.evaluate(temp_c, rh_pct),
            WueModel::Dry(m) => m.evaluate(temp_c, rh_pct),
            WueModel::Custom(m) => m.evaluate(temp_c, rh_pct),
        }
    }
}

/// Cooling-tower WUE: linear in wet-bulb temperature.
///
/// Wet-bulb 0 °C maps to the band minimum, `wb_high_c` (default 30 °C) to
/// the band maximum; outside that range the value is clamped to the band.
/// Higher wet-bulb means less evaporative headroom, so WUE increases.
#[derive(Debug, Clone)]
pub struct TowerWue {
    /// Band minimum (L/kWh).
    pub min_l_per_kwh: f64,
    /// Band maximum (L/kWh).
    pub max_l_per_kwh: f64,
    /// Wet-bulb temperature at which the band maximum is reached (°C).
    pub wb_high_c: f64,
}

impl Default for TowerWue {
    fn default() -> Self {
        Self {
            min_l_per_kwh: 0.8,
            max_l_per_kwh: 3.5,
            wb_high_c: 30.0,
        }
    }
}

impl TowerWue {
    /// Evaluates tower WUE at the given conditions (L/kWh).
    pub fn evaluate(&self, temp_c: f64, rh_pct: f64) -> f64 {
        let wb = wet_bulb_c(temp_c, rh_pct);
        let frac = (wb / self.wb_high_c).clamp(0.0, 1.0);
        self.min_l_per_kwh + (self.max_l_per_kwh - self.min_l_per_kwh) * frac
    }
}

/// Evaporative air economizer WUE.
///
/// The curve is `max − (max − min) · hot(T) · dry(RH)` with
/// `hot = clamp((T − 15)/20, 0, 1)` and `dry = 1 − RH/100`: hot, dry air
/// is where air-side free cooling dominates and water use bottoms out.
#[derive(Debug, Clone)]
pub struct EvapAirWue {
    /// Band minimum (L/kWh).
    pub min_l_per_kwh: f64,
    /// Band maximum (L/kWh).
    pub max_l_per_kwh: f64,
}

impl Default for EvapAirWue {
    fn default() -> Self {
        Self {
            min_l_per_kwh: 0.1,
            max_l_per_kwh: 2.5,
        }
    }
}

impl EvapAirWue {
    /// Evaluates economizer WUE at the given conditions (L/kWh).
    pub fn evaluate(&self, temp_c: f64, rh_pct: f64) -> f64 {
        let hot = ((temp_c - 15.0) / 20.0).clamp(0.0, 1.0);
        let dry = 1.0 - (rh_pct.clamp(0.0, 100.0) / 100.0);
        let span = self.max_l_per_kwh - self.min_l_per_kwh;
        (self.max_l_per_kwh - span * hot * dry)
            .clamp(self.min_l_per_kwh, self.max_l_per_kwh)
    }
}

/// Dry cooler: zero evaporative water use, independent of conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryCoolerWue;

impl DryCoolerWue {
    /// Always 0 L/kWh.
    pub fn evaluate(&self, _temp_c: f64, _rh_pct: f64) -> f64 {
        0.0
    }
}

/// Caller-supplied WUE curve.
///
/// The closure's result is clamped to non-negative; band clamping beyond
/// that is the closure's own responsibility.
#[derive(Clone)]
pub struct CustomWue {
    f: Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>,
}

impl CustomWue {
    /// Wraps a `(temp_c, rh_pct) -> L/kWh` closure.
    pub fn new(f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Evaluates the wrapped curve, clamped to non-negative.
    pub fn evaluate(&self, temp_c: f64, rh_pct: f64) -> f64 {
        (self.f)(temp_c, rh_pct).max(0.0)
    }
}

impl fmt::Debug for CustomWue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomWue").finish_non_exhaustive()
    }
}
