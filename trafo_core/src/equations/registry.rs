//! # Stage Registry
//!
//! The design runs as 22 numbered stages in a fixed order. Each stage has
//! metadata (title, formula, category, implementing functions) used for
//! report section headers and for listing the method.
//!
//! ## Usage
//!
//! ```rust
//! use trafo_core::equations::registry::{Stage, ALL_STAGES};
//!
//! assert_eq!(ALL_STAGES.len(), 22);
//! assert_eq!(Stage::CoreStepping.number(), 5);
//! println!("{}", Stage::CoreStepping.metadata().formula_plain);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categories for grouping stages when listing the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageCategory {
    /// Currents, volts per turn, turn counts
    Electrical,
    /// Core section, stepping, window and core mass
    MagneticCore,
    /// Conductor sizing and wire gauge
    Conductors,
    /// Layer build and mean turn lengths
    Windings,
    /// Copper mass, resistances and losses
    Losses,
}

impl StageCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            StageCategory::Electrical => "Electrical",
            StageCategory::MagneticCore => "Magnetic Core",
            StageCategory::Conductors => "Conductors",
            StageCategory::Windings => "Windings",
            StageCategory::Losses => "Losses",
        }
    }
}

/// Metadata for one design stage.
#[derive(Debug, Clone)]
pub struct StageMetadata {
    /// Section title used in the report
    pub title: &'static str,
    /// The formula(s) in plain text
    pub formula_plain: &'static str,
    pub category: StageCategory,
    /// Source module where the formulas live
    pub source_module: &'static str,
    /// Functions implementing the stage
    pub source_functions: &'static [&'static str],
}

impl StageMetadata {
    /// Where the stage is implemented, e.g. `equations/losses.rs: copper_mass`
    pub fn source(&self) -> String {
        format!("{}: {}", self.source_module, self.source_functions.join(", "))
    }
}

/// The 22 design stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Currents,
    TurnsPerVolt,
    MagneticSection,
    GeometricSection,
    CoreStepping,
    InscribedSection,
    WindowHeight,
    SecondaryTurns,
    PrimaryTurns,
    PrimaryConductor,
    SecondaryConductor,
    SecondaryBuild,
    PrimaryBuild,
    MeanLengths,
    PrimaryCopperMass,
    SecondaryCopperMass,
    PrimaryResistance,
    SecondaryResistance,
    WindingLosses,
    WindowWidth,
    CoreMass,
    CoreLoss,
}

/// Every stage in execution order
pub static ALL_STAGES: &[Stage] = &[
    Stage::Currents,
    Stage::TurnsPerVolt,
    Stage::MagneticSection,
    Stage::GeometricSection,
    Stage::CoreStepping,
    Stage::InscribedSection,
    Stage::WindowHeight,
    Stage::SecondaryTurns,
    Stage::PrimaryTurns,
    Stage::PrimaryConductor,
    Stage::SecondaryConductor,
    Stage::SecondaryBuild,
    Stage::PrimaryBuild,
    Stage::MeanLengths,
    Stage::PrimaryCopperMass,
    Stage::SecondaryCopperMass,
    Stage::PrimaryResistance,
    Stage::SecondaryResistance,
    Stage::WindingLosses,
    Stage::WindowWidth,
    Stage::CoreMass,
    Stage::CoreLoss,
];

impl Stage {
    /// 1-based stage number
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    /// Look up a stage by its 1-based number
    pub fn from_number(number: u8) -> Option<Stage> {
        ALL_STAGES.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn title(&self) -> &'static str {
        self.metadata().title
    }

    pub fn metadata(&self) -> StageMetadata {
        match self {
            Stage::Currents => StageMetadata {
                title: "Line and phase currents of each winding",
                formula_plain: "Il = Pn / (sqrt(3) * Vl); If = Il (star), Il / sqrt(3) (delta)",
                category: StageCategory::Electrical,
                source_module: "equations/electrical.rs",
                source_functions: &["line_current", "phase_current"],
            },
            Stage::TurnsPerVolt => StageMetadata {
                title: "Volts per turn and turns per winding",
                formula_plain: "V_esp = sqrt(0.24 * Pn/1000); N = Vf / V_esp",
                category: StageCategory::Electrical,
                source_module: "equations/electrical.rs",
                source_functions: &["volts_per_turn", "turns_for_voltage"],
            },
            Stage::MagneticSection => StageMetadata {
                title: "Core magnetic section",
                formula_plain: "Sn = (V_esp * 10000) / (4.44 * Bn * f)",
                category: StageCategory::MagneticCore,
                source_module: "equations/magnetic_core.rs",
                source_functions: &["magnetic_section"],
            },
            Stage::GeometricSection => StageMetadata {
                title: "Core geometric section and radius",
                formula_plain: "Sg = Sn / ke; r = sqrt(Sg / pi)",
                category: StageCategory::MagneticCore,
                source_module: "equations/magnetic_core.rs",
                source_functions: &["geometric_section", "circle_radius"],
            },
            Stage::CoreStepping => StageMetadata {
                title: "Core stepping",
                formula_plain: "steps = table(d = 20 * r); kf = table(steps)",
                category: StageCategory::MagneticCore,
                source_module: "tables/mod.rs",
                source_functions: &["core_step_count_for_radius", "fill_factor"],
            },
            Stage::InscribedSection => StageMetadata {
                title: "Section the stepped core is inscribed in",
                formula_plain: "Sg_in = Sg / kf; r_in = sqrt(Sg_in / pi)",
                category: StageCategory::MagneticCore,
                source_module: "equations/magnetic_core.rs",
                source_functions: &["inscribed_section", "circle_radius"],
            },
            Stage::WindowHeight => StageMetadata {
                title: "Window height",
                formula_plain: "Hj = 120 * (Pn / 3)^(1/4)",
                category: StageCategory::MagneticCore,
                source_module: "equations/magnetic_core.rs",
                source_functions: &["window_height"],
            },
            Stage::SecondaryTurns => StageMetadata {
                title: "Secondary turns",
                formula_plain: "Ns = (Vs * 1e4) / (4.44 * Bn * Sn * f)",
                category: StageCategory::Electrical,
                source_module: "equations/electrical.rs",
                source_functions: &["secondary_turns"],
            },
            Stage::PrimaryTurns => StageMetadata {
                title: "Primary turns",
                formula_plain: "Np = (Vp * Ns) / Vs",
                category: StageCategory::Electrical,
                source_module: "equations/electrical.rs",
                source_functions: &["primary_turns"],
            },
            Stage::PrimaryConductor => StageMetadata {
                title: "Primary conductor gauge, section and diameter",
                formula_plain: "Jp = table(Pn); Sp = Ip / Jp; hp = sqrt(4 * Sp / pi); AWG = smallest d >= hp",
                category: StageCategory::Conductors,
                source_module: "equations/conductor.rs",
                source_functions: &["conductor_section", "conductor_diameter"],
            },
            Stage::SecondaryConductor => StageMetadata {
                title: "Secondary conductor gauge, section and diameter",
                formula_plain: "Js = table(Pn); Ss = Is / Js; hs = sqrt(4 * Ss / pi); AWG = smallest d >= hs",
                category: StageCategory::Conductors,
                source_module: "equations/conductor.rs",
                source_functions: &["conductor_section", "conductor_diameter"],
            },
            Stage::SecondaryBuild => StageMetadata {
                title: "Secondary winding build (inner coil)",
                formula_plain: "Necs = ((Hj - 2*Hc) / hs) - 1; Ncs = Ns / Necs; ds = Ncs * (hs + eps_s)",
                category: StageCategory::Windings,
                source_module: "equations/conductor.rs",
                source_functions: &["turns_per_layer", "layer_count", "radial_thickness"],
            },
            Stage::PrimaryBuild => StageMetadata {
                title: "Primary winding build (outer coil)",
                formula_plain: "Necp = ((Hj - 2*Hc) / hp) - 1; Ncp = Np / Necp; dp = Ncp * (hp + eps_p)",
                category: StageCategory::Windings,
                source_module: "equations/conductor.rs",
                source_functions: &["turns_per_layer", "layer_count", "radial_thickness"],
            },
            Stage::MeanLengths => StageMetadata {
                title: "Mean turn length of the windings",
                formula_plain: "phi_int = 2*(10*r_in) + 2*dn; Ls = (phi_int/2 + ds/2) * 2pi; phi_ext = phi_int + 2*ds; Lp = (phi_ext/2 + do + dp/2) * 2pi",
                category: StageCategory::Windings,
                source_module: "equations/winding_geometry.rs",
                source_functions: &[
                    "former_inner_diameter",
                    "former_outer_diameter",
                    "secondary_mean_length_circular",
                    "primary_mean_length_circular",
                ],
            },
            Stage::PrimaryCopperMass => StageMetadata {
                title: "Primary copper mass",
                formula_plain: "Mp = 8.89e-3 * (Lp/1000) * Np * Sp * 3",
                category: StageCategory::Losses,
                source_module: "equations/losses.rs",
                source_functions: &["copper_mass"],
            },
            Stage::SecondaryCopperMass => StageMetadata {
                title: "Secondary copper mass",
                formula_plain: "Ms = 8.89e-3 * (Ls/1000) * Ns * Ss * 3",
                category: StageCategory::Losses,
                source_module: "equations/losses.rs",
                source_functions: &["copper_mass"],
            },
            Stage::PrimaryResistance => StageMetadata {
                title: "Primary resistance",
                formula_plain: "Rp = rho * (Lp/1000) * Np / Sp; Rp_corr = Rp * (1 + alpha * (Top - Tref))",
                category: StageCategory::Losses,
                source_module: "equations/losses.rs",
                source_functions: &["winding_resistance", "corrected_resistance"],
            },
            Stage::SecondaryResistance => StageMetadata {
                title: "Secondary resistance",
                formula_plain: "Rs = rho * (Ls/1000) * Ns / Ss; Rs_corr = Rs * (1 + alpha * (Top - Tref))",
                category: StageCategory::Losses,
                source_module: "equations/losses.rs",
                source_functions: &["winding_resistance", "corrected_resistance"],
            },
            Stage::WindingLosses => StageMetadata {
                title: "Electrical losses in the windings (primary + secondary)",
                formula_plain: "We = 3 * (Rp_corr * Ip^2 + Rs_corr * Is^2) + kp",
                category: StageCategory::Losses,
                source_module: "equations/losses.rs",
                source_functions: &["winding_losses"],
            },
            Stage::WindowWidth => StageMetadata {
                title: "Core quantities: window width",
                formula_plain: "Lj = 2 * (ds + do + dp + 2*dn) + Defa",
                category: StageCategory::MagneticCore,
                source_module: "equations/magnetic_core.rs",
                source_functions: &["window_width"],
            },
            Stage::CoreMass => StageMetadata {
                title: "Core mass",
                formula_plain: "Mn = 7.655e-3 * Sn * (3*Hj/10 + 4*Lj/10 + 6*phi_n), phi_n = 2*r_in",
                category: StageCategory::MagneticCore,
                source_module: "equations/magnetic_core.rs",
                source_functions: &["core_mass"],
            },
            Stage::CoreLoss => StageMetadata {
                title: "Core losses",
                formula_plain: "Wn = table(Pn)",
                category: StageCategory::Losses,
                source_module: "tables/mod.rs",
                source_functions: &["core_loss"],
            },
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.number(), self.title())
    }
}

/// Stages grouped by category, each group in execution order
pub fn stages_by_category() -> Vec<(StageCategory, Vec<Stage>)> {
    let mut groups: Vec<(StageCategory, Vec<Stage>)> = Vec::new();
    for stage in ALL_STAGES {
        let category = stage.metadata().category;
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, stages)) => stages.push(*stage),
            None => groups.push((category, vec![*stage])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_numbers_are_contiguous() {
        for (index, stage) in ALL_STAGES.iter().enumerate() {
            assert_eq!(usize::from(stage.number()), index + 1);
            assert_eq!(Stage::from_number(stage.number()), Some(*stage));
        }
        assert_eq!(Stage::from_number(0), None);
        assert_eq!(Stage::from_number(23), None);
    }

    #[test]
    fn test_all_stages_have_metadata() {
        for stage in ALL_STAGES {
            let meta = stage.metadata();
            assert!(!meta.title.is_empty(), "{:?} has no title", stage);
            assert!(!meta.formula_plain.is_empty(), "{:?} has no formula", stage);
            assert!(!meta.source_functions.is_empty(), "{:?} has no source", stage);
        }
    }

    #[test]
    fn test_metadata_source() {
        assert_eq!(
            Stage::Currents.metadata().source(),
            "equations/electrical.rs: line_current, phase_current"
        );
        assert_eq!(Stage::CoreLoss.metadata().source(), "tables/mod.rs: core_loss");
    }

    #[test]
    fn test_former_formula_converts_radius_to_mm() {
        let formula = Stage::MeanLengths.metadata().formula_plain;
        assert!(formula.starts_with("phi_int = 2*(10*r_in) + 2*dn"));
    }

    #[test]
    fn test_display_header() {
        assert_eq!(Stage::CoreLoss.to_string(), "22 - Core losses");
        assert_eq!(Stage::Currents.to_string(), "1 - Line and phase currents of each winding");
    }

    #[test]
    fn test_stages_by_category_covers_all() {
        let groups = stages_by_category();
        let total: usize = groups.iter().map(|(_, stages)| stages.len()).sum();
        assert_eq!(total, ALL_STAGES.len());
        assert_eq!(groups[0].0, StageCategory::Electrical);
    }
}
