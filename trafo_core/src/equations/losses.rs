//! # Copper Mass, Resistance and Losses (stages 15-19)
//!
//! All winding quantities are per phase and multiplied by three where a
//! transformer total is wanted. Lengths come in mm, sections in mm².

/// Copper mass of one winding across all three phases
///
/// # Formula
/// M = ρ_cu × (L/1000) × N × S × 3   [kg]
///
/// with ρ_cu in kg/(m·mm²) (8.89e-3 for copper).
#[inline]
pub fn copper_mass(mean_length_mm: f64, turns: f64, section_mm2: f64, copper_density: f64) -> f64 {
    copper_density * (mean_length_mm / 1000.0) * turns * section_mm2 * 3.0
}

/// DC resistance of one phase of a winding
///
/// # Formula
/// R = ρ × (L/1000) × N / S   [Ω]
///
/// with ρ in Ω·mm²/m (0.0216 for annealed copper at the reference
/// temperature).
///
/// # Example
/// ```rust
/// use trafo_core::equations::losses::winding_resistance;
///
/// // 1000 turns of 500 mm on a 1 mm² conductor
/// let r = winding_resistance(500.0, 1000.0, 1.0, 0.0216);
/// assert!((r - 10.8).abs() < 1e-9);
/// ```
#[inline]
pub fn winding_resistance(mean_length_mm: f64, turns: f64, section_mm2: f64, resistivity: f64) -> f64 {
    resistivity * ((mean_length_mm / 1000.0) * turns) / section_mm2
}

/// Resistance corrected to the operating temperature
///
/// # Formula
/// R_corr = R × (1 + α(T_op - T_ref))
#[inline]
pub fn corrected_resistance(
    resistance_ohm: f64,
    temperature_coefficient: f64,
    operating_temperature_c: f64,
    reference_temperature_c: f64,
) -> f64 {
    resistance_ohm * (1.0 + temperature_coefficient * (operating_temperature_c - reference_temperature_c))
}

/// Total load (copper) losses of both windings
///
/// # Formula
/// We = 3 × (Rp·Ip² + Rs·Is²) + kp   [W]
#[inline]
pub fn winding_losses(
    primary_resistance_ohm: f64,
    primary_current_a: f64,
    secondary_resistance_ohm: f64,
    secondary_current_a: f64,
    stray_loss_w: f64,
) -> f64 {
    ((primary_resistance_ohm * primary_current_a.powi(2)) + (secondary_resistance_ohm * secondary_current_a.powi(2)))
        * 3.0
        + stray_loss_w
}
