//! Post-hoc aggregation of hourly results.

use std::fmt;

use super::types::HourResult;

/// Field-wise sums across all simulated hours.
///
/// Computed post-hoc from the complete `Vec<HourResult>` so the totals can
/// never drift from the per-hour records.
#[derive(Debug, Clone, Default)]
pub struct Totals {
    /// Total server energy (kWh).
    pub server_kwh: f64,
    /// Total facility energy (kWh).
    pub facility_kwh: f64,
    /// Total onsite water consumption (L).
    pub onsite_consumption_l: f64,
    /// Total net blowdown (L).
    pub onsite_blowdown_l: f64,
    /// Total onsite withdrawal (L).
    pub onsite_withdrawal_l: f64,
    /// Total grid-embedded water (L).
    pub offsite_water_l: f64,
    /// Total carbon emissions (kg CO2).
    pub carbon_kg: f64,
    /// Total flexible energy placed (kWh).
    pub flex_kwh: f64,
}

impl Totals {
    /// Sums every numeric field over the hour records.
    pub fn from_results(results: &[HourResult]) -> Self {
        let mut totals = Self::default();
        for r in results {
            totals.server_kwh += r.server_kwh;
            totals.facility_kwh += r.facility_kwh;
            totals.onsite_consumption_l += r.onsite_consumption_l;
            totals.onsite_blowdown_l += r.onsite_blowdown_l;
            totals.onsite_withdrawal_l += r.onsite_withdrawal_l;
            totals.offsite_water_l += r.offsite_water_l;
            totals.carbon_kg += r.carbon_kg;
            totals.flex_kwh += r.flex_kwh;
        }
        totals
    }
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Totals ---")?;
        writeln!(f, "Server energy:        {:>12.1} kWh", self.server_kwh)?;
        writeln!(f, "Facility energy:      {:>12.1} kWh", self.facility_kwh)?;
        writeln!(f, "Flex energy placed:   {:>12.1} kWh", self.flex_kwh)?;
        writeln!(f, "Onsite consumption:   {:>12.1} L", self.onsite_consumption_l)?;
        writeln!(f, "Onsite blowdown:      {:>12.1} L", self.onsite_blowdown_l)?;
        writeln!(f, "Onsite withdrawal:    {:>12.1} L", self.onsite_withdrawal_l)?;
        writeln!(f, "Offsite (grid) water: {:>12.1} L", self.offsite_water_l)?;
        write!(f, "Carbon:               {:>12.1} kg", self.carbon_kg)
    }
}

/// Hours spent in each cooling mode, in order of first appearance.
pub fn mode_usage(results: &[HourResult]) -> Vec<(String, usize)> {
    let mut usage: Vec<(String, usize)> = Vec::new();
    for r in results {
        match usage.iter_mut().find(|(name, _)| *name == r.mode) {
            Some((_, count)) => *count += 1,
            None => usage.push((r.mode.clone(), 1)),
        }
    }
    usage
}
