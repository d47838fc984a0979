//! # Conductor and Winding Build Formulas
//!
//! Conductor sizing (stages 10-11) and layer build-up of each winding
//! (stages 12-13). Round conductors are wound in layers along the window
//! height, leaving a coil-end clearance Hc at the top and bottom.
//!
//! ```text
//!   ┬  ─────────────  ← Hc
//!   │  o o o o o o o
//!   Hj o o o o o o o  ← layers, each `hs + ε` thick
//!   │  o o o o o o o
//!   ┴  ─────────────  ← Hc
//! ```

use std::f64::consts::PI;

/// Conductor cross-section from current and current density
///
/// # Formula
/// S = I / J   [mm²]
#[inline]
pub fn conductor_section(current_a: f64, current_density_a_mm2: f64) -> f64 {
    current_a / current_density_a_mm2
}

/// Diameter of a round conductor with the given section
///
/// # Formula
/// h = √(4S / π)   [mm]
///
/// # Example
/// ```rust
/// use trafo_core::equations::conductor::conductor_diameter;
///
/// let d = conductor_diameter(std::f64::consts::PI);
/// assert!((d - 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn conductor_diameter(section_mm2: f64) -> f64 {
    ((4.0 * section_mm2) / PI).sqrt()
}

/// Turns that fit in one layer along the window height
///
/// # Formula
/// Nec = ((Hj - 2·Hc) / h) - 1
#[inline]
pub fn turns_per_layer(window_height_mm: f64, coil_end_clearance_mm: f64, conductor_diameter_mm: f64) -> f64 {
    ((window_height_mm - 2.0 * coil_end_clearance_mm) / conductor_diameter_mm) - 1.0
}

/// Number of layers: Nc = N / Nec
#[inline]
pub fn layer_count(total_turns: f64, turns_per_layer: f64) -> f64 {
    total_turns / turns_per_layer
}

/// Radial thickness of a winding
///
/// # Formula
/// d = Nc × (h + ε)   [mm]
///
/// where ε is the interlayer insulation thickness.
#[inline]
pub fn radial_thickness(layers: f64, conductor_diameter_mm: f64, layer_insulation_mm: f64) -> f64 {
    layers * (conductor_diameter_mm + layer_insulation_mm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_conductor() {
        // 45 kVA delta primary at 13.8 kV, J = 2.7 A/mm²
        let ip = 45_000.0 / (3.0 * 13_800.0);
        let sp = conductor_section(ip, 2.7);
        assert!((sp - 0.40258).abs() < 1e-5);
        assert!((conductor_diameter(sp) - 0.71594).abs() < 1e-5);
    }

    #[test]
    fn test_secondary_build() {
        let hs = 5.678156;
        let necs = turns_per_layer(1328.0183, 10.0, hs);
        assert!((necs - 229.3597).abs() < 1e-3);

        let ncs = layer_count(115.6303, necs);
        assert!((ncs - 0.50414).abs() < 1e-5);

        let ds = radial_thickness(ncs, hs, 0.20);
        assert!((ds - 2.96344).abs() < 1e-4);
    }

    #[test]
    fn test_single_layer_thickness() {
        assert!((radial_thickness(1.0, 1.0, 0.2) - 1.2).abs() < 1e-12);
    }
}
