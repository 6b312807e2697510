//! Wet-bulb temperature from dry-bulb and relative humidity.

/// Lowest relative humidity fed to the Stull formula.
///
/// The approximation is fitted for RH >= 5%; values below (including
/// RH = 0) are clamped here rather than rejected.
const RH_MIN_PCT: f64 = 1.0;

/// Approximate wet-bulb temperature (°C) via Stull (2011).
///
/// `temp_c` is dry-bulb temperature in °C, `rh_pct` relative humidity as a
/// percentage. RH is clamped into [1, 100] before evaluation, so
/// out-of-range inputs never panic.
///
/// # Examples
///
/// ```
/// use coolsim::sim::psychro::wet_bulb_c;
///
/// // Stull's published check point: T=20 °C, RH=50% -> ~13.7 °C
/// let tw = wet_bulb_c(20.0, 50.0);
/// assert!((tw - 13.7).abs() < 0.05);
/// ```
pub fn wet_bulb_c(temp_c: f64, rh_pct: f64) -> f64 {
    let rh = rh_pct.clamp(RH_MIN_PCT, 100.0);
    temp_c * (0.151977 * (rh + 8.313659).sqrt()).atan()
        + (temp_c + rh).atan()
        - (rh - 1.676331).atan()
        + 0.00391838 * rh.powf(1.5) * (0.023101 * rh).atan()
        - 4.686035
}
