//! Synthetic environment and workload series for demo runs.
//!
//! Both series are diurnal sinusoids with seeded Gaussian noise, so a
//! given `(config, seed)` pair always produces the same input to the
//! core. The core itself never generates data; these builders are the
//! external collaborators that feed it.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::ScenarioConfig;
use crate::sim::types::{EnvironmentHour, WorkloadHour};

/// Seed offset for the workload RNG to avoid correlation with the
/// environment series.
const WORKLOAD_SEED_OFFSET: u64 = 131;

/// Hour of day at which temperature peaks.
const TEMP_PEAK_HOUR: f64 = 15.0;

/// Hour of day at which server demand peaks.
const DEMAND_PEAK_HOUR: f64 = 14.0;

/// Gaussian-ish noise via Box-Muller from a seeded RNG.
fn gaussian(rng: &mut StdRng, std: f64) -> f64 {
    if std <= 0.0 {
        return 0.0;
    }
    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos() * std
}

/// Diurnal cosine peaking at `peak_hour`, in [-1, 1].
fn diurnal(hour: usize, peak_hour: f64) -> f64 {
    ((hour as f64 - peak_hour) * 2.0 * PI / 24.0).cos()
}

/// Builds the hourly environment series for a scenario.
///
/// Temperature and humidity move in opposition (afternoons are hotter and
/// drier); grid water and carbon intensities follow the demand peak.
/// Humidity is clamped to [5, 100] and intensities to non-negative.
pub fn build_environment(cfg: &ScenarioConfig) -> Vec<EnvironmentHour> {
    let env = &cfg.environment;
    let mut rng = StdRng::seed_from_u64(cfg.simulation.seed);

    (0..cfg.simulation.hours)
        .map(|hour| {
            let day = diurnal(hour, TEMP_PEAK_HOUR);
            let dry_bulb_c =
                env.temp_mean_c + env.temp_amp_c * day + gaussian(&mut rng, env.temp_noise_std);
            let rh_pct = (env.rh_mean_pct - env.rh_amp_pct * day).clamp(5.0, 100.0);

            let grid = diurnal(hour, DEMAND_PEAK_HOUR);
            EnvironmentHour {
                hour,
                dry_bulb_c,
                rh_pct,
                grid_water_l_per_kwh: (env.grid_water_l_per_kwh + env.grid_water_swing * grid)
                    .max(0.0),
                grid_carbon_kg_per_kwh: (env.grid_carbon_kg_per_kwh
                    + env.grid_carbon_swing * grid)
                    .max(0.0),
            }
        })
        .collect()
}

/// Builds the hourly workload series for a scenario.
///
/// Base demand follows the diurnal demand curve with noise, clamped to
/// non-negative; flexible capacity is flat across the horizon.
pub fn build_workload(cfg: &ScenarioConfig) -> Vec<WorkloadHour> {
    let wl = &cfg.workload;
    let mut rng = StdRng::seed_from_u64(cfg.simulation.seed.wrapping_add(WORKLOAD_SEED_OFFSET));

    (0..cfg.simulation.hours)
        .map(|hour| WorkloadHour {
            hour,
            base_kwh: (wl.base_kwh
                + wl.amp_kwh * diurnal(hour, DEMAND_PEAK_HOUR)
                + gaussian(&mut rng, wl.noise_std))
            .max(0.0),
            flex_capacity_kwh: wl.flex_capacity_kwh,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_series_has_contiguous_hours() {
        let cfg = ScenarioConfig::baseline();
        let series = build_environment(&cfg);
        assert_eq!(series.len(), cfg.simulation.hours);
        for (t, e) in series.iter().enumerate() {
            assert_eq!(e.hour, t);
        }
    }

    #[test]
    fn environment_values_stay_in_physical_ranges() {
        let cfg = ScenarioConfig::desert_heat();
        for e in build_environment(&cfg) {
            assert!((5.0..=100.0).contains(&e.rh_pct), "hour {}: RH {}", e.hour, e.rh_pct);
            assert!(e.grid_water_l_per_kwh >= 0.0);
            assert!(e.grid_carbon_kg_per_kwh >= 0.0);
        }
    }

    #[test]
    fn afternoon_is_hotter_than_early_morning() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.environment.temp_noise_std = 0.0;
        let series = build_environment(&cfg);
        assert!(series[15].dry_bulb_c > series[3].dry_bulb_c);
        // Humidity moves the other way.
        assert!(series[15].rh_pct < series[3].rh_pct);
    }

    #[test]
    fn workload_is_non_negative_and_matches_horizon() {
        let cfg = ScenarioConfig::baseline();
        let series = build_workload(&cfg);
        assert_eq!(series.len(), cfg.simulation.hours);
        for w in &series {
            assert!(w.base_kwh >= 0.0);
            assert_eq!(w.flex_capacity_kwh, cfg.workload.flex_capacity_kwh);
        }
    }

    #[test]
    fn same_seed_reproduces_series() {
        let cfg = ScenarioConfig::baseline();
        let a = build_environment(&cfg);
        let b = build_environment(&cfg);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.dry_bulb_c, y.dry_bulb_c);
            assert_eq!(x.rh_pct, y.rh_pct);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let cfg = ScenarioConfig::baseline();
        let mut other = ScenarioConfig::baseline();
        other.simulation.seed = 7;
        let a = build_environment(&cfg);
        let b = build_environment(&other);
        assert!(a.iter().zip(&b).any(|(x, y)| x.dry_bulb_c != y.dry_bulb_c));
    }
}
