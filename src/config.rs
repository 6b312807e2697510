//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sim::modes::{CoolingConfig, CoolingMode};
use crate::sim::scheduler::ScheduleRequest;
use crate::sim::selector::Weights;
use crate::sim::water::WaterSystemParams;
use crate::sim::wue::{DryCoolerWue, EvapAirWue, TowerWue, WueModel};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation horizon and seed.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Synthetic environment series parameters.
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Synthetic workload series parameters.
    #[serde(default)]
    pub workload: WorkloadConfig,
    /// Cooling modes and PUE parameters.
    #[serde(default)]
    pub cooling: CoolingSection,
    /// Recirculating water-system parameters.
    #[serde(default)]
    pub water_system: WaterSystemSection,
    /// Objective weights for mode selection.
    #[serde(default)]
    pub weights: WeightsSection,
    /// Flexible workload budget and deadline.
    #[serde(default)]
    pub flex: FlexSection,
}

/// Simulation horizon and seed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of hours to simulate (must be > 0).
    pub hours: usize,
    /// Master random seed for the synthetic series.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { hours: 48, seed: 42 }
    }
}

/// Synthetic environment series parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Daily mean dry-bulb temperature (°C).
    pub temp_mean_c: f64,
    /// Amplitude of the diurnal temperature swing (°C).
    pub temp_amp_c: f64,
    /// Gaussian noise on temperature (°C, standard deviation).
    pub temp_noise_std: f64,
    /// Daily mean relative humidity (%).
    pub rh_mean_pct: f64,
    /// Amplitude of the diurnal humidity swing (%).
    pub rh_amp_pct: f64,
    /// Mean grid water intensity (L/kWh).
    pub grid_water_l_per_kwh: f64,
    /// Diurnal swing of grid water intensity (L/kWh).
    pub grid_water_swing: f64,
    /// Mean grid carbon intensity (kg/kWh).
    pub grid_carbon_kg_per_kwh: f64,
    /// Diurnal swing of grid carbon intensity (kg/kWh).
    pub grid_carbon_swing: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            temp_mean_c: 24.0,
            temp_amp_c: 8.0,
            temp_noise_std: 0.6,
            rh_mean_pct: 45.0,
            rh_amp_pct: 20.0,
            grid_water_l_per_kwh: 1.9,
            grid_water_swing: 0.4,
            grid_carbon_kg_per_kwh: 0.35,
            grid_carbon_swing: 0.15,
        }
    }
}

/// Synthetic workload series parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkloadConfig {
    /// Mean non-shiftable server energy per hour (kWh).
    pub base_kwh: f64,
    /// Amplitude of the diurnal demand swing (kWh).
    pub amp_kwh: f64,
    /// Gaussian noise on base demand (kWh, standard deviation).
    pub noise_std: f64,
    /// Flexible capacity per hour (kWh).
    pub flex_capacity_kwh: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            base_kwh: 800.0,
            amp_kwh: 150.0,
            noise_std: 20.0,
            flex_capacity_kwh: 200.0,
        }
    }
}

/// Cooling modes and PUE parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoolingSection {
    /// Facility base PUE (must be >= 1.0).
    pub base_pue: f64,
    /// PUE overhead of the cooling tower mode.
    pub tower_delta_pue: f64,
    /// PUE overhead of the evaporative air economizer mode.
    pub evap_air_delta_pue: f64,
    /// PUE overhead of the dry cooler mode.
    pub dry_delta_pue: f64,
}

impl Default for CoolingSection {
    fn default() -> Self {
        Self {
            base_pue: 1.1,
            tower_delta_pue: 0.08,
            evap_air_delta_pue: 0.03,
            dry_delta_pue: 0.18,
        }
    }
}

/// Recirculating water-system parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaterSystemSection {
    /// Cycles of concentration (must be > 1).
    pub cycles_of_concentration: f64,
    /// Drift loss as a fraction of evaporation, in [0, 1).
    pub drift_frac_of_evap: f64,
    /// Fraction of blowdown recycled onsite, in [0, 1].
    pub recycle_blowdown_frac: f64,
}

impl Default for WaterSystemSection {
    fn default() -> Self {
        Self {
            cycles_of_concentration: 5.0,
            drift_frac_of_evap: 0.002,
            recycle_blowdown_frac: 0.3,
        }
    }
}

/// Objective weights for mode selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightsSection {
    /// Weight on onsite water consumption (per L).
    pub onsite_water: f64,
    /// Weight on grid-embedded offsite water (per L).
    pub offsite_water: f64,
    /// Weight on carbon emissions (per kg).
    pub carbon: f64,
}

impl Default for WeightsSection {
    fn default() -> Self {
        Self {
            onsite_water: 1.0,
            offsite_water: 0.2,
            carbon: 5.0,
        }
    }
}

/// Flexible workload budget and deadline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlexSection {
    /// Total flexible energy to place (kWh).
    pub total_flex_kwh: f64,
    /// Last hour index (inclusive) eligible for flexible energy.
    pub deadline_hour: usize,
}

impl Default for FlexSection {
    fn default() -> Self {
        Self {
            total_flex_kwh: 1200.0,
            deadline_hour: 23,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"water_system.cycles_of_concentration"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a temperate two-day horizon.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            environment: EnvironmentConfig::default(),
            workload: WorkloadConfig::default(),
            cooling: CoolingSection::default(),
            water_system: WaterSystemSection::default(),
            weights: WeightsSection::default(),
            flex: FlexSection::default(),
        }
    }

    /// Returns the desert-heat preset: hot, dry air and a water-stressed
    /// grid, with onsite water weighted heavily.
    pub fn desert_heat() -> Self {
        Self {
            environment: EnvironmentConfig {
                temp_mean_c: 33.0,
                temp_amp_c: 10.0,
                rh_mean_pct: 18.0,
                rh_amp_pct: 8.0,
                grid_water_l_per_kwh: 3.2,
                grid_water_swing: 0.6,
                ..EnvironmentConfig::default()
            },
            weights: WeightsSection {
                onsite_water: 3.0,
                offsite_water: 0.5,
                carbon: 2.0,
            },
            water_system: WaterSystemSection {
                cycles_of_concentration: 4.0,
                ..WaterSystemSection::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the carbon-first preset: mild climate, a dirty grid, and
    /// carbon dominating the objective.
    pub fn carbon_first() -> Self {
        Self {
            environment: EnvironmentConfig {
                temp_mean_c: 16.0,
                temp_amp_c: 6.0,
                rh_mean_pct: 60.0,
                grid_carbon_kg_per_kwh: 0.55,
                grid_carbon_swing: 0.25,
                ..EnvironmentConfig::default()
            },
            weights: WeightsSection {
                onsite_water: 0.5,
                offsite_water: 0.1,
                carbon: 10.0,
            },
            flex: FlexSection {
                total_flex_kwh: 2000.0,
                deadline_hour: 35,
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "desert_heat", "carbon_first"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "desert_heat" => Ok(Self::desert_heat()),
            "carbon_first" => Ok(Self::carbon_first()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.hours == 0 {
            errors.push(ConfigError {
                field: "simulation.hours".into(),
                message: "must be > 0".into(),
            });
        }

        let env = &self.environment;
        if !(0.0..=100.0).contains(&env.rh_mean_pct) {
            errors.push(ConfigError {
                field: "environment.rh_mean_pct".into(),
                message: "must be in [0, 100]".into(),
            });
        }
        if env.grid_water_l_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "environment.grid_water_l_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if env.grid_carbon_kg_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "environment.grid_carbon_kg_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        let wl = &self.workload;
        if wl.base_kwh < 0.0 {
            errors.push(ConfigError {
                field: "workload.base_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if wl.flex_capacity_kwh < 0.0 {
            errors.push(ConfigError {
                field: "workload.flex_capacity_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        let cool = &self.cooling;
        if cool.base_pue < 1.0 {
            errors.push(ConfigError {
                field: "cooling.base_pue".into(),
                message: "must be >= 1.0".into(),
            });
        }
        for (field, delta) in [
            ("cooling.tower_delta_pue", cool.tower_delta_pue),
            ("cooling.evap_air_delta_pue", cool.evap_air_delta_pue),
            ("cooling.dry_delta_pue", cool.dry_delta_pue),
        ] {
            if delta < 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be >= 0".into(),
                });
            }
        }

        let ws = &self.water_system;
        if ws.cycles_of_concentration <= 1.0 {
            errors.push(ConfigError {
                field: "water_system.cycles_of_concentration".into(),
                message: "must be > 1".into(),
            });
        }
        if !(0.0..1.0).contains(&ws.drift_frac_of_evap) {
            errors.push(ConfigError {
                field: "water_system.drift_frac_of_evap".into(),
                message: "must be in [0.0, 1.0)".into(),
            });
        }
        if !(0.0..=1.0).contains(&ws.recycle_blowdown_frac) {
            errors.push(ConfigError {
                field: "water_system.recycle_blowdown_frac".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }

        let w = &self.weights;
        if w.onsite_water < 0.0 || w.offsite_water < 0.0 || w.carbon < 0.0 {
            errors.push(ConfigError {
                field: "weights".into(),
                message: "all weights must be >= 0".into(),
            });
        }
        if w.onsite_water == 0.0 && w.offsite_water == 0.0 && w.carbon == 0.0 {
            errors.push(ConfigError {
                field: "weights".into(),
                message: "at least one weight must be > 0".into(),
            });
        }

        if self.flex.total_flex_kwh < 0.0 {
            errors.push(ConfigError {
                field: "flex.total_flex_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if self.simulation.hours > 0 && self.flex.deadline_hour >= self.simulation.hours {
            errors.push(ConfigError {
                field: "flex.deadline_hour".into(),
                message: format!("must be < simulation.hours ({})", self.simulation.hours),
            });
        }

        errors
    }

    /// Builds the cooling-mode registry from this configuration.
    pub fn build_cooling(&self) -> CoolingConfig {
        let mut cfg = CoolingConfig::new(self.cooling.base_pue);
        // Fixed distinct names, so the inserts cannot fail.
        let _ = cfg.add_mode(CoolingMode::new(
            "tower",
            self.cooling.tower_delta_pue,
            WueModel::Tower(TowerWue::default()),
            true,
        ));
        let _ = cfg.add_mode(CoolingMode::new(
            "evap_air",
            self.cooling.evap_air_delta_pue,
            WueModel::EvapAir(EvapAirWue::default()),
            true,
        ));
        let _ = cfg.add_mode(CoolingMode::new(
            "dry",
            self.cooling.dry_delta_pue,
            WueModel::Dry(DryCoolerWue),
            false,
        ));
        cfg
    }

    /// Builds the water-system parameters from this configuration.
    pub fn build_water_params(&self) -> WaterSystemParams {
        WaterSystemParams {
            cycles_of_concentration: self.water_system.cycles_of_concentration,
            drift_frac_of_evap: self.water_system.drift_frac_of_evap,
            recycle_blowdown_frac: self.water_system.recycle_blowdown_frac,
        }
    }

    /// Builds the objective weights from this configuration.
    pub fn build_weights(&self) -> Weights {
        Weights {
            w_onsite_water: self.weights.onsite_water,
            w_offsite_water: self.weights.offsite_water,
            w_carbon: self.weights.carbon,
        }
    }

    /// Builds the flexible-workload request from this configuration.
    pub fn build_schedule_request(&self) -> ScheduleRequest {
        ScheduleRequest {
            total_flex_kwh: self.flex.total_flex_kwh,
            deadline_hour: self.flex.deadline_hour,
        }
    }
}
