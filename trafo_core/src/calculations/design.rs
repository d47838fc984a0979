//! # Transformer Design Pipeline
//!
//! Runs the 22 design stages in order, threading each stage's outputs into
//! the next. The first failing stage aborts the run: every later stage
//! depends on every earlier one, so there is no partial result.
//!
//! ## Assumptions
//!
//! - Primary is the outer (high-voltage) winding, secondary the inner one
//! - Round copper conductors, layer wound
//! - Three-limb core
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::calculations::design::calculate;
//! use trafo_core::config::DesignConfig;
//! use trafo_core::tables::AwgTable;
//!
//! let result = calculate(&DesignConfig::default(), AwgTable::standard()).unwrap();
//!
//! assert!((result.currents.primary_line_a - 1.883).abs() < 1e-3);
//! assert_eq!(result.stepping.steps, 5);
//! assert_eq!(result.primary_conductor.awg, "21");
//! assert_eq!(result.core_loss_w, 1000.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{DesignConfig, FormerShape};
use crate::equations::{self, Stage};
use crate::errors::CalcResult;
use crate::tables::{self, GaugeLookup};
use crate::winding::Winding;

/// Stage 1: currents of both windings (A)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currents {
    pub primary_line_a: f64,
    pub primary_phase_a: f64,
    pub secondary_line_a: f64,
    pub secondary_phase_a: f64,
}

/// Stage 2: volts per turn and per-winding turn estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnsPerVolt {
    pub volts_per_turn: f64,
    pub primary_turns: f64,
    pub secondary_turns: f64,
}

/// Stages 3-4: core cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreSection {
    /// Sn (cm²)
    pub magnetic_section_cm2: f64,
    /// Sg (cm²)
    pub geometric_section_cm2: f64,
    /// Radius of Sg (cm)
    pub geometric_radius_cm: f64,
}

/// Stage 5: core stepping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreStepping {
    /// Geometric core diameter the step table is entered with (mm)
    pub diameter_mm: f64,
    pub steps: u8,
    /// kf
    pub fill_factor: f64,
}

/// Stage 6: circle the stepped core is inscribed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InscribedCore {
    /// Sg_in (cm²)
    pub section_cm2: f64,
    /// r_in (cm), also the minimum former radius
    pub radius_cm: f64,
}

/// Stages 8-9: turn counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnCounts {
    pub secondary: f64,
    pub primary: f64,
}

/// Stages 10-11: conductor of one winding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conductor {
    /// Current the conductor is sized for (A)
    pub current_a: f64,
    /// J (A/mm²)
    pub current_density_a_mm2: f64,
    pub section_mm2: f64,
    pub diameter_mm: f64,
    /// Gauge designation from the AWG table
    pub awg: String,
}

/// Stages 12-13: layer build of one winding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindingBuild {
    pub turns_per_layer: f64,
    pub layers: f64,
    pub radial_thickness_mm: f64,
}

/// Stage 14: former and mean turn lengths (mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanLengths {
    pub former_inner_diameter_mm: f64,
    pub former_outer_diameter_mm: f64,
    pub secondary_mm: f64,
    pub primary_mm: f64,
}

/// Stages 17-18: resistance of one winding, per phase (Ω)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resistance {
    pub at_reference_ohm: f64,
    pub corrected_ohm: f64,
}

/// Every quantity produced by a design run, grouped by stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    /// Primary winding at its design tap
    pub primary: Winding,
    pub secondary: Winding,
    /// Bn used throughout (T)
    pub flux_density_t: f64,

    pub currents: Currents,
    pub turns_per_volt: TurnsPerVolt,
    pub core_section: CoreSection,
    pub stepping: CoreStepping,
    pub inscribed_core: InscribedCore,
    /// Hj (mm)
    pub window_height_mm: f64,
    pub turns: TurnCounts,
    pub primary_conductor: Conductor,
    pub secondary_conductor: Conductor,
    pub secondary_build: WindingBuild,
    pub primary_build: WindingBuild,
    pub mean_lengths: MeanLengths,
    pub primary_copper_mass_kg: f64,
    pub secondary_copper_mass_kg: f64,
    pub primary_resistance: Resistance,
    pub secondary_resistance: Resistance,
    /// We (W)
    pub winding_losses_w: f64,
    /// Lj (mm)
    pub window_width_mm: f64,
    /// Mn (kg)
    pub core_mass_kg: f64,
    /// Wn (W)
    pub core_loss_w: f64,
}

impl DesignResult {
    /// Copper plus core mass (kg)
    pub fn active_mass_kg(&self) -> f64 {
        self.primary_copper_mass_kg + self.secondary_copper_mass_kg + self.core_mass_kg
    }

    /// Winding plus core losses at rated load (W)
    pub fn total_losses_w(&self) -> f64 {
        self.winding_losses_w + self.core_loss_w
    }
}

fn stage_done(stage: Stage, values: &[(&str, f64)]) {
    debug!(stage = stage.number(), "{}", stage.title());
    for (name, value) in non_finite(values) {
        warn!(stage = stage.number(), quantity = name, value, "non-finite value");
    }
}

/// Quantities that came out NaN or infinite. Not an error, only reported.
fn non_finite<'a>(values: &[(&'a str, f64)]) -> Vec<(&'a str, f64)> {
    values.iter().copied().filter(|(_, value)| !value.is_finite()).collect()
}

fn size_conductor(current_a: f64, rated_power_va: f64, gauges: &dyn GaugeLookup) -> CalcResult<Conductor> {
    let current_density_a_mm2 = tables::current_density(rated_power_va)?;
    let section_mm2 = equations::conductor_section(current_a, current_density_a_mm2);
    let diameter_mm = equations::conductor_diameter(section_mm2);
    let awg = gauges.lookup_gauge(diameter_mm)?;
    Ok(Conductor {
        current_a,
        current_density_a_mm2,
        section_mm2,
        diameter_mm,
        awg,
    })
}

fn build_winding(
    window_height_mm: f64,
    coil_end_clearance_mm: f64,
    conductor_diameter_mm: f64,
    turns: f64,
    layer_insulation_mm: f64,
) -> WindingBuild {
    let turns_per_layer = equations::turns_per_layer(window_height_mm, coil_end_clearance_mm, conductor_diameter_mm);
    let layers = equations::layer_count(turns, turns_per_layer);
    WindingBuild {
        turns_per_layer,
        layers,
        radial_thickness_mm: equations::radial_thickness(layers, conductor_diameter_mm, layer_insulation_mm),
    }
}

/// Run the full design.
///
/// # Arguments
///
/// * `config` - Nameplate data and method constants
/// * `gauges` - AWG lookup used for conductor selection (stages 10-11)
///
/// # Returns
///
/// * `Ok(DesignResult)` - Every stage output
/// * `Err(CalcError::UnknownRatedPower)` - Rated power not tabulated (stages 10, 11, 22)
/// * `Err(CalcError::UnsupportedCoreStep)` - Core too wide for the fill factor table (stage 5)
/// * `Err(CalcError::WireGaugeNotFound)` - Conductor thicker than the AWG table (stages 10-11)
/// * `Err(CalcError::MissingField)` - No primary tap voltage
pub fn calculate(config: &DesignConfig, gauges: &dyn GaugeLookup) -> CalcResult<DesignResult> {
    config.validate()?;

    let nameplate = &config.nameplate;
    let constants = &config.constants;
    let pn = nameplate.rated_power_va;
    let f = nameplate.frequency_hz;
    let bn = nameplate.flux_density_t();
    let primary = nameplate.primary_winding()?;
    let secondary = nameplate.secondary_winding();

    // 1 - Currents
    let primary_line_a = equations::line_current(pn, primary.line_voltage);
    let secondary_line_a = equations::line_current(pn, secondary.line_voltage);
    let currents = Currents {
        primary_line_a,
        primary_phase_a: equations::phase_current(primary_line_a, primary.connection),
        secondary_line_a,
        secondary_phase_a: equations::phase_current(secondary_line_a, secondary.connection),
    };
    stage_done(Stage::Currents, &[("primary_line_a", primary_line_a), ("secondary_line_a", secondary_line_a)]);

    // 2 - Volts per turn
    let volts_per_turn = equations::volts_per_turn(pn);
    let turns_per_volt = TurnsPerVolt {
        volts_per_turn,
        primary_turns: equations::turns_for_voltage(primary.phase_voltage(), volts_per_turn),
        secondary_turns: equations::turns_for_voltage(secondary.phase_voltage(), volts_per_turn),
    };
    stage_done(Stage::TurnsPerVolt, &[("volts_per_turn", volts_per_turn)]);

    // 3 - Magnetic section
    let sn = equations::magnetic_section(volts_per_turn, bn, f);
    stage_done(Stage::MagneticSection, &[("magnetic_section_cm2", sn)]);

    // 4 - Geometric section and radius
    let sg = equations::geometric_section(sn, nameplate.stacking_factor);
    let core_section = CoreSection {
        magnetic_section_cm2: sn,
        geometric_section_cm2: sg,
        geometric_radius_cm: equations::circle_radius(sg),
    };
    stage_done(Stage::GeometricSection, &[("geometric_radius_cm", core_section.geometric_radius_cm)]);

    // 5 - Stepping
    let steps = tables::core_step_count_for_radius(core_section.geometric_radius_cm);
    let stepping = CoreStepping {
        diameter_mm: 20.0 * core_section.geometric_radius_cm,
        steps,
        fill_factor: tables::fill_factor(steps)?,
    };
    stage_done(Stage::CoreStepping, &[("fill_factor", stepping.fill_factor)]);

    // 6 - Inscribed section
    let inscribed_section = equations::inscribed_section(sg, stepping.fill_factor);
    let inscribed_core = InscribedCore {
        section_cm2: inscribed_section,
        radius_cm: equations::circle_radius(inscribed_section),
    };
    stage_done(Stage::InscribedSection, &[("inscribed_radius_cm", inscribed_core.radius_cm)]);

    // 7 - Window height
    let hj = equations::window_height(pn);
    stage_done(Stage::WindowHeight, &[("window_height_mm", hj)]);

    // 8-9 - Turns
    let vs = secondary.line_voltage;
    let vp = primary.line_voltage;
    let ns = equations::secondary_turns(vs, bn, sn, f);
    stage_done(Stage::SecondaryTurns, &[("secondary_turns", ns)]);
    let np = equations::primary_turns(vp, ns, vs);
    stage_done(Stage::PrimaryTurns, &[("primary_turns", np)]);
    let turns = TurnCounts { secondary: ns, primary: np };

    // 10-11 - Conductors
    let primary_conductor = size_conductor(currents.primary_phase_a, pn, gauges)?;
    stage_done(Stage::PrimaryConductor, &[("primary_diameter_mm", primary_conductor.diameter_mm)]);
    let secondary_conductor = size_conductor(currents.secondary_phase_a, pn, gauges)?;
    stage_done(Stage::SecondaryConductor, &[("secondary_diameter_mm", secondary_conductor.diameter_mm)]);

    // 12-13 - Winding build
    let secondary_build = build_winding(
        hj,
        constants.coil_end_clearance_mm,
        secondary_conductor.diameter_mm,
        ns,
        constants.secondary_layer_insulation_mm,
    );
    stage_done(Stage::SecondaryBuild, &[("secondary_thickness_mm", secondary_build.radial_thickness_mm)]);
    let primary_build = build_winding(
        hj,
        constants.coil_end_clearance_mm,
        primary_conductor.diameter_mm,
        np,
        constants.primary_layer_insulation_mm,
    );
    stage_done(Stage::PrimaryBuild, &[("primary_thickness_mm", primary_build.radial_thickness_mm)]);

    // 14 - Mean lengths
    let ds = secondary_build.radial_thickness_mm;
    let dp = primary_build.radial_thickness_mm;
    let dn = constants.core_gap_mm;
    let gap = constants.winding_gap_mm;
    let phi_int = equations::former_inner_diameter(inscribed_core.radius_cm, dn);
    let phi_ext = equations::former_outer_diameter(phi_int, ds);
    let (secondary_mm, primary_mm) = match config.former {
        FormerShape::Circular => (
            equations::secondary_mean_length_circular(phi_int, ds),
            equations::primary_mean_length_circular(phi_ext, gap, dp),
        ),
        FormerShape::Rectangular { a_mm, b_mm } => (
            equations::secondary_mean_length_rectangular(ds, dn, a_mm, b_mm),
            equations::primary_mean_length_rectangular(dp, ds, gap, dn, a_mm, b_mm),
        ),
    };
    let mean_lengths = MeanLengths {
        former_inner_diameter_mm: phi_int,
        former_outer_diameter_mm: phi_ext,
        secondary_mm,
        primary_mm,
    };
    stage_done(Stage::MeanLengths, &[("secondary_mm", secondary_mm), ("primary_mm", primary_mm)]);

    // 15-16 - Copper mass
    let primary_copper_mass_kg =
        equations::copper_mass(primary_mm, np, primary_conductor.section_mm2, constants.copper_density);
    stage_done(Stage::PrimaryCopperMass, &[("primary_copper_mass_kg", primary_copper_mass_kg)]);
    let secondary_copper_mass_kg =
        equations::copper_mass(secondary_mm, ns, secondary_conductor.section_mm2, constants.copper_density);
    stage_done(Stage::SecondaryCopperMass, &[("secondary_copper_mass_kg", secondary_copper_mass_kg)]);

    // 17-18 - Resistances
    let resistance = |length_mm: f64, turns: f64, section_mm2: f64| {
        let at_reference_ohm = equations::winding_resistance(length_mm, turns, section_mm2, constants.copper_resistivity);
        Resistance {
            at_reference_ohm,
            corrected_ohm: equations::corrected_resistance(
                at_reference_ohm,
                constants.temperature_coefficient,
                constants.operating_temperature_c,
                constants.reference_temperature_c,
            ),
        }
    };
    let primary_resistance = resistance(primary_mm, np, primary_conductor.section_mm2);
    stage_done(Stage::PrimaryResistance, &[("primary_corrected_ohm", primary_resistance.corrected_ohm)]);
    let secondary_resistance = resistance(secondary_mm, ns, secondary_conductor.section_mm2);
    stage_done(Stage::SecondaryResistance, &[("secondary_corrected_ohm", secondary_resistance.corrected_ohm)]);

    // 19 - Winding losses
    let winding_losses_w = equations::winding_losses(
        primary_resistance.corrected_ohm,
        primary_conductor.current_a,
        secondary_resistance.corrected_ohm,
        secondary_conductor.current_a,
        constants.stray_loss_w,
    );
    stage_done(Stage::WindingLosses, &[("winding_losses_w", winding_losses_w)]);

    // 20 - Window width
    let window_width_mm = equations::window_width(ds, gap, dp, dn, constants.phase_clearance_mm);
    stage_done(Stage::WindowWidth, &[("window_width_mm", window_width_mm)]);

    // 21 - Core mass
    let core_mass_kg = equations::core_mass(sn, hj, window_width_mm, 2.0 * inscribed_core.radius_cm, constants.core_density);
    stage_done(Stage::CoreMass, &[("core_mass_kg", core_mass_kg)]);

    // 22 - Core loss
    let core_loss_w = tables::core_loss(pn)?;
    stage_done(Stage::CoreLoss, &[("core_loss_w", core_loss_w)]);

    Ok(DesignResult {
        primary,
        secondary,
        flux_density_t: bn,
        currents,
        turns_per_volt,
        core_section,
        stepping,
        inscribed_core,
        window_height_mm: hj,
        turns,
        primary_conductor,
        secondary_conductor,
        secondary_build,
        primary_build,
        mean_lengths,
        primary_copper_mass_kg,
        secondary_copper_mass_kg,
        primary_resistance,
        secondary_resistance,
        winding_losses_w,
        window_width_mm,
        core_mass_kg,
        core_loss_w,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::tables::AwgTable;
    use crate::winding::Connection;

    fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() < tolerance
    }

    fn reference_design() -> DesignResult {
        calculate(&DesignConfig::default(), AwgTable::standard()).unwrap()
    }

    #[test]
    fn test_stage_1_and_2() {
        let result = reference_design();
        assert!(close(result.currents.primary_line_a, 45_000.0 / (3f64.sqrt() * 13_800.0), 1e-12));
        assert!(close(result.currents.secondary_line_a, 68.3704, 1e-4));
        assert!(close(result.currents.primary_phase_a, 1.08696, 1e-5));
        assert_eq!(result.currents.secondary_phase_a, result.currents.secondary_line_a);
        assert!(close(result.turns_per_volt.volts_per_turn, 3.28634, 1e-5));
        assert!(close(result.turns_per_volt.primary_turns, 4199.206, 1e-3));
        assert!(close(result.turns_per_volt.secondary_turns, 66.759, 1e-3));
    }

    #[test]
    fn test_core_stages() {
        let result = reference_design();
        assert!(close(result.core_section.magnetic_section_cm2, 85.0765, 1e-4));
        assert!(close(result.core_section.geometric_section_cm2, 89.5542, 1e-4));
        assert!(close(result.core_section.geometric_radius_cm, 5.33910, 1e-5));
        assert!(close(result.stepping.diameter_mm, 106.782, 1e-3));
        assert_eq!(result.stepping.steps, 5);
        assert_eq!(result.stepping.fill_factor, 0.84);
        assert!(close(result.inscribed_core.radius_cm, 5.82544, 1e-5));
        assert!(close(result.window_height_mm, 1328.018, 1e-3));
    }

    #[test]
    fn test_turns_and_conductors() {
        let result = reference_design();
        assert!(close(result.turns.secondary, 115.6303, 1e-4));
        assert!(close(result.turns.primary, 4199.206, 1e-3));

        assert_eq!(result.primary_conductor.current_density_a_mm2, 2.7);
        assert!(close(result.primary_conductor.section_mm2, 0.402576, 1e-6));
        assert!(close(result.primary_conductor.diameter_mm, 0.715944, 1e-6));
        assert_eq!(result.primary_conductor.awg, "21");

        assert!(close(result.secondary_conductor.section_mm2, 25.3224, 1e-4));
        assert!(close(result.secondary_conductor.diameter_mm, 5.67816, 1e-5));
        assert_eq!(result.secondary_conductor.awg, "3");
    }

    #[test]
    fn test_winding_geometry_and_losses() {
        let result = reference_design();
        assert!(close(result.secondary_build.radial_thickness_mm, 2.96344, 1e-4));
        assert!(close(result.primary_build.radial_thickness_mm, 2.10639, 1e-4));
        assert!(close(result.mean_lengths.secondary_mm, 378.474, 1e-2));
        assert!(close(result.mean_lengths.primary_mm, 494.933, 1e-2));
        assert!(close(result.primary_copper_mass_kg, 22.314, 1e-2));
        assert!(close(result.secondary_copper_mass_kg, 29.555, 1e-2));
        assert!(close(result.primary_resistance.at_reference_ohm, 111.511, 1e-2));
        assert!(close(result.primary_resistance.corrected_ohm / result.primary_resistance.at_reference_ohm, 1.1755, 1e-12));
        assert!(close(result.winding_losses_w, 1080.03, 0.1));
        assert!(close(result.window_width_mm, 54.1397, 1e-3));
        assert!(close(result.core_mass_kg, 319.096, 0.01));
        assert_eq!(result.core_loss_w, 1000.0);
        assert!(close(result.total_losses_w(), 2080.03, 0.1));
    }

    #[test]
    fn test_non_finite_detection() {
        let flagged = non_finite(&[("a", 1.0), ("b", f64::NAN), ("c", f64::INFINITY)]);
        assert_eq!(flagged.len(), 2);
        assert_eq!(flagged[0].0, "b");
        assert_eq!(flagged[1], ("c", f64::INFINITY));
    }

    #[test]
    fn test_bad_numbers_are_not_validated() {
        // NaN flows through stages 17-19; the run still succeeds
        let mut config = DesignConfig::default();
        config.constants.operating_temperature_c = f64::NAN;
        let result = calculate(&config, AwgTable::standard()).unwrap();
        assert!(result.primary_resistance.corrected_ohm.is_nan());
        assert!(result.winding_losses_w.is_nan());
        assert!(close(result.core_mass_kg, 319.096, 0.01));
    }

    #[test]
    fn test_negative_stacking_factor_reaches_table_error() {
        // sqrt of a negative section gives a NaN radius, which falls past
        // every step breakpoint
        let mut config = DesignConfig::default();
        config.nameplate.stacking_factor = -0.95;
        let err = calculate(&config, AwgTable::standard()).unwrap_err();
        assert_eq!(err, CalcError::UnsupportedCoreStep { steps: 10 });
    }

    #[test]
    fn test_rerun_is_bit_identical() {
        assert_eq!(reference_design(), reference_design());
    }

    #[test]
    fn test_unknown_rated_power_fails() {
        let mut config = DesignConfig::default();
        config.nameplate.rated_power_va = 50_000.0;
        let err = calculate(&config, AwgTable::standard()).unwrap_err();
        assert_eq!(err, CalcError::unknown_rated_power("current density", 50_000.0));
    }

    #[test]
    fn test_core_loss_table_gap_fails_last() {
        // Tabulated for current density but not for core loss
        let mut config = DesignConfig::default();
        config.nameplate.rated_power_va = 10_000.0;
        let err = calculate(&config, AwgTable::standard()).unwrap_err();
        assert_eq!(err, CalcError::unknown_rated_power("core loss", 10_000.0));
    }

    #[test]
    fn test_wide_core_fails_with_unsupported_step() {
        let mut config = DesignConfig::default();
        // Low flux density blows up the core section
        config.nameplate.flux_density.min_t = 0.05;
        config.nameplate.flux_density.max_t = 0.05;
        let err = calculate(&config, AwgTable::standard()).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_CORE_STEP");
    }

    #[test]
    fn test_missing_gauge_fails() {
        let tiny = AwgTable::from_rows(vec![tables::WireGauge::new("30", 0.2546)]).unwrap();
        let err = calculate(&DesignConfig::default(), &tiny).unwrap_err();
        assert_eq!(err.error_code(), "WIRE_GAUGE_NOT_FOUND");
    }

    #[test]
    fn test_injected_lookup() {
        let lookup = |d: f64| -> CalcResult<String> { Ok(format!("{:.2}mm", d)) };
        let result = calculate(&DesignConfig::default(), &lookup).unwrap();
        assert_eq!(result.primary_conductor.awg, "0.72mm");
        assert_eq!(result.secondary_conductor.awg, "5.68mm");
    }

    #[test]
    fn test_star_primary_uses_line_current() {
        let mut config = DesignConfig::default();
        config.nameplate.primary.connection = Connection::Star;
        let result = calculate(&config, AwgTable::standard()).unwrap();
        assert_eq!(result.currents.primary_phase_a, result.currents.primary_line_a);
    }

    #[test]
    fn test_rectangular_former() {
        let mut config = DesignConfig::default();
        config.former = FormerShape::Rectangular { a_mm: 100.0, b_mm: 80.0 };
        let result = calculate(&config, AwgTable::standard()).unwrap();
        let ds = result.secondary_build.radial_thickness_mm;
        assert!(close(result.mean_lengths.secondary_mm, 4.0 * ds + 4.0 + 360.0, 1e-9));
        // Former diameters are still reported
        assert!(close(result.mean_lengths.former_inner_diameter_mm, 117.5087, 1e-3));
    }
}
