//! # Design Tables
//!
//! Static reference tables used by the formula library:
//!
//! - [`current_density`] - conductor current density by rated power (exact match)
//! - [`core_loss`] - no-load core loss by rated power (exact match)
//! - [`core_step_count`] - core stepping from core diameter (ordered breakpoints)
//! - [`fill_factor`] - stacking fill factor by step count
//! - [`awg`] - AWG wire gauge table (external collaborator, injectable)
//!
//! Rated-power tables never interpolate: a power that is not tabulated is an
//! [`CalcError::UnknownRatedPower`] error. Step counts past the last fill
//! factor row are an [`CalcError::UnsupportedCoreStep`] error.

pub mod awg;

use crate::errors::{CalcError, CalcResult};
use crate::units::{Centimeters, Millimeters};

pub use awg::{AwgTable, GaugeLookup, WireGauge};

/// Current density (A/mm²) by rated power (VA)
pub const CURRENT_DENSITY_BY_POWER: [(f64, f64); 8] = [
    (5_000.0, 1.8),
    (10_000.0, 2.0),
    (15_000.0, 2.2),
    (30_000.0, 2.5),
    (45_000.0, 2.7),
    (75_000.0, 3.0),
    (112_500.0, 3.5),
    (150_000.0, 3.7),
];

/// Core loss (W) by rated power (VA)
pub const CORE_LOSS_BY_POWER: [(f64, f64); 6] = [
    (15_000.0, 440.0),
    (30_000.0, 740.0),
    (45_000.0, 1000.0),
    (75_000.0, 1470.0),
    (112_500.0, 1990.0),
    (150_000.0, 2450.0),
];

/// Upper diameter bound (mm, inclusive) for each step count.
/// Diameters above the last bound use [`MAX_CORE_STEPS`].
pub const CORE_STEP_BREAKPOINTS: [(f64, u8); 8] = [
    (50.0, 2),
    (70.0, 3),
    (100.0, 4),
    (140.0, 5),
    (200.0, 6),
    (300.0, 7),
    (400.0, 8),
    (550.0, 9),
];

/// Step count for cores wider than every breakpoint
pub const MAX_CORE_STEPS: u8 = 10;

/// Fill factor by core step count
pub const FILL_FACTOR_BY_STEPS: [(u8, f64); 7] = [
    (1, 0.64),
    (2, 0.73),
    (3, 0.79),
    (4, 0.82),
    (5, 0.84),
    (6, 0.86),
    (7, 0.87),
];

fn lookup_by_power(table: &[(f64, f64)], name: &str, rated_power_va: f64) -> CalcResult<f64> {
    table
        .iter()
        .find(|(power, _)| *power == rated_power_va)
        .map(|(_, value)| *value)
        .ok_or_else(|| CalcError::unknown_rated_power(name, rated_power_va))
}

/// Conductor current density (A/mm²) for a tabulated rated power.
///
/// # Example
/// ```rust
/// use trafo_core::tables::current_density;
///
/// assert_eq!(current_density(45_000.0).unwrap(), 2.7);
/// assert!(current_density(50_000.0).is_err());
/// ```
pub fn current_density(rated_power_va: f64) -> CalcResult<f64> {
    lookup_by_power(&CURRENT_DENSITY_BY_POWER, "current density", rated_power_va)
}

/// No-load core loss (W) for a tabulated rated power.
pub fn core_loss(rated_power_va: f64) -> CalcResult<f64> {
    lookup_by_power(&CORE_LOSS_BY_POWER, "core loss", rated_power_va)
}

/// Number of core steps for a core of the given diameter (mm).
///
/// Each breakpoint is an inclusive upper bound, so a 50 mm core has 2
/// steps and anything above 550 mm has 10.
pub fn core_step_count(diameter_mm: f64) -> u8 {
    CORE_STEP_BREAKPOINTS
        .iter()
        .find(|(max_diameter, _)| diameter_mm <= *max_diameter)
        .map(|(_, steps)| *steps)
        .unwrap_or(MAX_CORE_STEPS)
}

/// Number of core steps for a core of the given geometric radius (cm).
pub fn core_step_count_for_radius(radius_cm: f64) -> u8 {
    let diameter: Millimeters = Centimeters(2.0 * radius_cm).into();
    core_step_count(diameter.0)
}

/// Fill factor for a stepped core.
///
/// Only 1 to 7 steps are tabulated; larger cores fail with
/// [`CalcError::UnsupportedCoreStep`].
pub fn fill_factor(steps: u8) -> CalcResult<f64> {
    FILL_FACTOR_BY_STEPS
        .iter()
        .find(|(tabulated, _)| *tabulated == steps)
        .map(|(_, kf)| *kf)
        .ok_or(CalcError::UnsupportedCoreStep { steps })
}
