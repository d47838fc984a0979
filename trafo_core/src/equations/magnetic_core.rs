//! # Magnetic Core Formulas
//!
//! Core cross-section, window dimensions and core mass (stages 3, 4, 6, 7,
//! 20 and 21). Step count and fill factor lookups live in [`crate::tables`].
//!
//! ## Notation
//!
//! - `Sn` = Magnetic (net iron) section, cm²
//! - `Sg` = Geometric (gross) section, cm²
//! - `ke` = Lamination stacking factor
//! - `kf` = Stepped-core fill factor
//! - `Hj`, `Lj` = Window height and width, mm

use std::f64::consts::PI;

/// Core magnetic section (stage 3)
///
/// # Formula
/// Sn = (V_esp × 10⁴) / (4.44 × Bn × f)   [cm²]
///
/// # Example
/// ```rust
/// use trafo_core::equations::magnetic_core::magnetic_section;
///
/// let sn = magnetic_section(3.2863, 1.45, 60.0);
/// assert!((sn - 85.08).abs() < 0.01);
/// ```
#[inline]
pub fn magnetic_section(volts_per_turn: f64, flux_density_t: f64, frequency_hz: f64) -> f64 {
    (volts_per_turn * 10_000.0) / (4.44 * flux_density_t * frequency_hz)
}

/// Core geometric section (stage 4): Sg = Sn / ke   [cm²]
#[inline]
pub fn geometric_section(magnetic_section_cm2: f64, stacking_factor: f64) -> f64 {
    magnetic_section_cm2 / stacking_factor
}

/// Radius of the circle with the given area: r = √(S / π)
///
/// Used for the geometric core radius (stage 4) and the radius of the
/// circle the stepped core is inscribed in (stage 6). Units follow the
/// input (cm² in, cm out).
#[inline]
pub fn circle_radius(section: f64) -> f64 {
    (section / PI).sqrt()
}

/// Section of the circle the stepped core is inscribed in (stage 6)
///
/// # Formula
/// Sg_in = Sg / kf   [cm²]
#[inline]
pub fn inscribed_section(geometric_section_cm2: f64, fill_factor: f64) -> f64 {
    geometric_section_cm2 / fill_factor
}

/// Window height (stage 7)
///
/// # Formula
/// Hj = 120 × (Pn / 3)^(1/4)   [mm]
///
/// Pn is taken in VA as-is.
#[inline]
pub fn window_height(rated_power_va: f64) -> f64 {
    120.0 * (rated_power_va / 3.0).powf(0.25)
}

/// Window width (stage 20)
///
/// ```text
///  core | dn | secondary ds | do | primary dp | ... Defa ... | dp | do | ds | dn | core
/// ```
///
/// # Formula
/// Lj = 2 × (ds + do + dp + 2·dn) + Defa   [mm]
///
/// # Arguments
/// * `secondary_thickness_mm` - ds, radial build of the secondary
/// * `winding_gap_mm` - do, gap between secondary and primary
/// * `primary_thickness_mm` - dp, radial build of the primary
/// * `core_gap_mm` - dn, gap between core and former
/// * `phase_clearance_mm` - Defa, clearance between adjacent phases
#[inline]
pub fn window_width(
    secondary_thickness_mm: f64,
    winding_gap_mm: f64,
    primary_thickness_mm: f64,
    core_gap_mm: f64,
    phase_clearance_mm: f64,
) -> f64 {
    2.0 * (secondary_thickness_mm + winding_gap_mm + primary_thickness_mm + 2.0 * core_gap_mm) + phase_clearance_mm
}

/// Core mass of a three-limb core (stage 21)
///
/// # Formula
/// Mn = ρ × Sn × (3·Hj/10 + 4·Lj/10 + 6·φn)   [kg]
///
/// Three limbs of window height, four yoke spans of window width and six
/// corner pieces of core diameter φn (cm). ρ is in kg/cm³.
#[inline]
pub fn core_mass(
    magnetic_section_cm2: f64,
    window_height_mm: f64,
    window_width_mm: f64,
    core_diameter_cm: f64,
    core_density: f64,
) -> f64 {
    core_density
        * magnetic_section_cm2
        * (3.0 * (window_height_mm / 10.0) + 4.0 * (window_width_mm / 10.0) + 6.0 * core_diameter_cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_chain() {
        let sn = magnetic_section(10.8f64.sqrt(), 1.45, 60.0);
        let sg = geometric_section(sn, 0.95);
        let r = circle_radius(sg);
        assert!((sg - 89.554).abs() < 1e-3);
        assert!((r - 5.3391).abs() < 1e-4);

        let sg_in = inscribed_section(sg, 0.84);
        assert!((sg_in - 106.612).abs() < 1e-3);
        assert!((circle_radius(sg_in) - 5.8254).abs() < 1e-4);
    }

    #[test]
    fn test_circle_radius_roundtrip() {
        let r = circle_radius(PI * 4.0);
        assert!((r - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_height_uses_va() {
        // 120 × 15000^0.25
        assert!((window_height(45_000.0) - 1328.018).abs() < 1e-3);
        assert!((window_height(3.0) - 120.0).abs() < 1e-12);
    }

    #[test]
    fn test_window_width() {
        let lj = window_width(2.9634, 16.0, 2.1064, 0.5, 10.0);
        assert!((lj - 54.1396).abs() < 1e-4);
        assert_eq!(window_width(0.0, 0.0, 0.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_core_mass() {
        let mn = core_mass(85.0765, 1328.018, 54.1397, 2.0 * 5.82544, 7.655e-3);
        assert!((mn - 319.096).abs() < 0.01);
    }
}
