//! # Mean Turn Lengths (stage 14)
//!
//! The secondary is the inner winding, wound on a former around the core;
//! the primary is wound outside it after an insulating gap.
//!
//! ```text
//!        core   dn   secondary ds   do   primary dp
//!   |<-r_in->|<->|<------------>|<--->|<---------->|
//!            φ_int              φ_ext
//! ```
//!
//! Two former shapes are supported: circular (the mean turn is a circle
//! through the middle of the winding) and rectangular (the former hugs a
//! rectangular core of sides `a` × `b`).

use std::f64::consts::PI;

use crate::units::{Centimeters, Millimeters};

/// Inner diameter of the former
///
/// # Formula
/// φ_int = 2·r_in + 2·dn   [mm], with r_in given in cm
#[inline]
pub fn former_inner_diameter(inscribed_radius_cm: f64, core_gap_mm: f64) -> f64 {
    let radius: Millimeters = Centimeters(inscribed_radius_cm).into();
    2.0 * radius.0 + 2.0 * core_gap_mm
}

/// Outer diameter of the secondary winding: φ_ext = φ_int + 2·ds   [mm]
#[inline]
pub fn former_outer_diameter(former_inner_diameter_mm: f64, secondary_thickness_mm: f64) -> f64 {
    former_inner_diameter_mm + 2.0 * secondary_thickness_mm
}

/// Mean turn length of the secondary on a circular former
///
/// # Formula
/// Ls = (φ_int/2 + ds/2) × 2π   [mm]
#[inline]
pub fn secondary_mean_length_circular(former_inner_diameter_mm: f64, secondary_thickness_mm: f64) -> f64 {
    ((former_inner_diameter_mm / 2.0) + (secondary_thickness_mm / 2.0)) * 2.0 * PI
}

/// Mean turn length of the primary on a circular former
///
/// # Formula
/// Lp = (φ_ext/2 + do + dp/2) × 2π   [mm]
#[inline]
pub fn primary_mean_length_circular(
    former_outer_diameter_mm: f64,
    winding_gap_mm: f64,
    primary_thickness_mm: f64,
) -> f64 {
    ((former_outer_diameter_mm / 2.0) + winding_gap_mm + (primary_thickness_mm / 2.0)) * 2.0 * PI
}

/// Mean turn length of the secondary on a rectangular former
///
/// # Formula
/// Ls = 4·ds + 8·dn + 2(a + b)   [mm]
#[inline]
pub fn secondary_mean_length_rectangular(secondary_thickness_mm: f64, core_gap_mm: f64, a_mm: f64, b_mm: f64) -> f64 {
    4.0 * secondary_thickness_mm + 8.0 * core_gap_mm + 2.0 * (a_mm + b_mm)
}

/// Mean turn length of the primary on a rectangular former
///
/// # Formula
/// Lp = 4·dp + 8·ds + 8·do + 8·dn + 2(a + b)   [mm]
#[inline]
pub fn primary_mean_length_rectangular(
    primary_thickness_mm: f64,
    secondary_thickness_mm: f64,
    winding_gap_mm: f64,
    core_gap_mm: f64,
    a_mm: f64,
    b_mm: f64,
) -> f64 {
    4.0 * primary_thickness_mm
        + 8.0 * secondary_thickness_mm
        + 8.0 * winding_gap_mm
        + 8.0 * core_gap_mm
        + 2.0 * (a_mm + b_mm)
}
