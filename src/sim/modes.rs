//! Cooling modes and the mode registry.

use super::types::InputError;
use super::wue::{DryCoolerWue, EvapAirWue, TowerWue, WueModel};

/// One selectable cooling strategy.
#[derive(Debug, Clone)]
pub struct CoolingMode {
    /// Unique mode name, the registry key.
    pub name: String,
    /// PUE overhead added on top of the facility base PUE (>= 0).
    pub delta_pue: f64,
    /// WUE curve for this mode.
    pub wue: WueModel,
    /// Whether the mode consumes water evaporatively at all.
    ///
    /// A non-evaporative mode reports WUE = 0 regardless of its curve.
    pub evaporative: bool,
}

impl CoolingMode {
    /// Creates a cooling mode.
    pub fn new(name: impl Into<String>, delta_pue: f64, wue: WueModel, evaporative: bool) -> Self {
        Self {
            name: name.into(),
            delta_pue,
            wue,
            evaporative,
        }
    }

    /// Effective WUE at the given conditions (L/kWh).
    pub fn wue_l_per_kwh(&self, temp_c: f64, rh_pct: f64) -> f64 {
        if self.evaporative {
            self.wue.evaluate(temp_c, rh_pct)
        } else {
            0.0
        }
    }
}

/// Registry of cooling modes plus the facility base PUE.
///
/// Modes are kept in insertion order so that selection tie-breaks are
/// reproducible; names are unique, enforced at [`CoolingConfig::add_mode`].
#[derive(Debug, Clone)]
pub struct CoolingConfig {
    /// Facility base Power Usage Effectiveness (>= 1.0).
    pub base_pue: f64,
    modes: Vec<CoolingMode>,
}

impl CoolingConfig {
    /// Creates an empty registry with the given base PUE.
    pub fn new(base_pue: f64) -> Self {
        Self {
            base_pue,
            modes: Vec::new(),
        }
    }

    /// Standard three-mode configuration: tower, evaporative air
    /// economizer, and dry cooler, with typical PUE overheads.
    pub fn standard(base_pue: f64) -> Self {
        let mut cfg = Self::new(base_pue);
        // Names are distinct, so these inserts cannot fail.
        let _ = cfg.add_mode(CoolingMode::new(
            "tower",
            0.08,
            WueModel::Tower(TowerWue::default()),
            true,
        ));
        let _ = cfg.add_mode(CoolingMode::new(
            "evap_air",
            0.03,
            WueModel::EvapAir(EvapAirWue::default()),
            true,
        ));
        let _ = cfg.add_mode(CoolingMode::new(
            "dry",
            0.18,
            WueModel::Dry(DryCoolerWue),
            false,
        ));
        cfg
    }

    /// Registers a mode, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns an `InputError` if a mode with the same name is already
    /// registered.
    pub fn add_mode(&mut self, mode: CoolingMode) -> Result<(), InputError> {
        if self.modes.iter().any(|m| m.name == mode.name) {
            return Err(InputError::new(
                "cooling.modes",
                format!("duplicate mode name \"{}\"", mode.name),
            ));
        }
        self.modes.push(mode);
        Ok(())
    }

    /// Registered modes in insertion order.
    pub fn modes(&self) -> &[CoolingMode] {
        &self.modes
    }

    /// Looks up a mode by name.
    pub fn get(&self, name: &str) -> Option<&CoolingMode> {
        self.modes.iter().find(|m| m.name == name)
    }
}
