//! # Design Report
//!
//! Turns a [`DesignResult`] into a human-readable ledger: one labeled line
//! per quantity, grouped under the 22 numbered stage headers.
//!
//! The same report can be:
//! - rendered as plain text ([`DesignReport::to_text`])
//! - emitted through `tracing` ([`DesignReport::log`]) so the installed
//!   subscriber mirrors it to the console and the log file
//! - serialized to JSON for machine consumption
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::calculations::design::calculate;
//! use trafo_core::config::DesignConfig;
//! use trafo_core::report::DesignReport;
//! use trafo_core::tables::AwgTable;
//!
//! let config = DesignConfig::default();
//! let result = calculate(&config, AwgTable::standard()).unwrap();
//! let report = DesignReport::new(&config, &result);
//!
//! let text = report.to_text();
//! assert!(text.contains("1 - Line and phase currents of each winding"));
//! assert!(text.contains("Primary conductor gauge: 21 AWG"));
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculations::design::{Conductor, DesignResult, Resistance, WindingBuild};
use crate::config::DesignConfig;
use crate::equations::{Stage, ALL_STAGES};

/// Value of a report line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Number(f64),
    Text(String),
}

/// One labeled quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub label: String,
    pub value: ReportValue,
    /// Unit suffix; empty for dimensionless values
    pub unit: String,
    /// Decimal places when rendered
    pub precision: usize,
}

impl ReportEntry {
    pub fn number(label: impl Into<String>, value: f64, unit: impl Into<String>, precision: usize) -> Self {
        ReportEntry {
            label: label.into(),
            value: ReportValue::Number(value),
            unit: unit.into(),
            precision,
        }
    }

    pub fn text(label: impl Into<String>, value: impl Into<String>, unit: impl Into<String>) -> Self {
        ReportEntry {
            label: label.into(),
            value: ReportValue::Text(value.into()),
            unit: unit.into(),
            precision: 0,
        }
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.label)?;
        match &self.value {
            ReportValue::Number(value) => write!(f, "{:.*}", self.precision, value)?,
            ReportValue::Text(text) => f.write_str(text)?,
        }
        if !self.unit.is_empty() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

/// All lines of one stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub stage: u8,
    pub title: String,
    pub entries: Vec<ReportEntry>,
}

impl ReportSection {
    pub fn header(&self) -> String {
        format!("{} - {}", self.stage, self.title)
    }
}

/// The complete report of one design run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    /// Unique id of the run, to tell runs apart in the append-only log
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub config: DesignConfig,
    pub result: DesignResult,
    pub sections: Vec<ReportSection>,
}

impl DesignReport {
    pub fn new(config: &DesignConfig, result: &DesignResult) -> Self {
        let sections = ALL_STAGES
            .iter()
            .map(|stage| ReportSection {
                stage: stage.number(),
                title: stage.title().to_string(),
                entries: stage_entries(*stage, config, result),
            })
            .collect();

        DesignReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            config: config.clone(),
            result: result.clone(),
            sections,
        }
    }

    pub fn section(&self, stage: Stage) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.stage == stage.number())
    }

    /// Emit every header and line as `info` events.
    pub fn log(&self) {
        info!(run_id = %self.run_id, "Transformer design run {}", self.run_id);
        for section in &self.sections {
            info!(stage = section.stage, "{}", section.header());
            for entry in &section.entries {
                match &entry.value {
                    ReportValue::Number(value) => {
                        info!(stage = section.stage, label = %entry.label, value = *value, unit = %entry.unit, "{}", entry)
                    }
                    ReportValue::Text(text) => {
                        info!(stage = section.stage, label = %entry.label, value = %text, unit = %entry.unit, "{}", entry)
                    }
                }
            }
        }
    }

    /// Plain-text rendering, one line per value
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&section.header());
            out.push('\n');
            for entry in &section.entries {
                out.push_str("  ");
                out.push_str(&entry.to_string());
                out.push('\n');
            }
        }
        out
    }
}

fn conductor_entries(side: &str, conductor: &Conductor) -> Vec<ReportEntry> {
    vec![
        ReportEntry::text(format!("{} conductor gauge", side), conductor.awg.as_str(), "AWG"),
        ReportEntry::number(format!("{} current density", side), conductor.current_density_a_mm2, "A/mm2", 1),
        ReportEntry::number(format!("{} conductor section", side), conductor.section_mm2, "mm2", 3),
        ReportEntry::number(format!("{} conductor diameter", side), conductor.diameter_mm, "mm", 3),
    ]
}

fn build_entries(side: &str, build: &WindingBuild) -> Vec<ReportEntry> {
    vec![
        ReportEntry::number(format!("{} turns per layer", side), build.turns_per_layer, "", 3),
        ReportEntry::number(format!("{} layers", side), build.layers, "", 3),
        ReportEntry::number(format!("{} radial thickness", side), build.radial_thickness_mm, "mm", 3),
    ]
}

fn resistance_entries(side: &str, resistance: &Resistance) -> Vec<ReportEntry> {
    vec![
        ReportEntry::number(format!("{} resistance", side), resistance.at_reference_ohm, "ohm/phase", 3),
        ReportEntry::number(format!("{} corrected resistance", side), resistance.corrected_ohm, "ohm/phase", 3),
    ]
}

fn stage_entries(stage: Stage, config: &DesignConfig, r: &DesignResult) -> Vec<ReportEntry> {
    let constants = &config.constants;
    match stage {
        Stage::Currents => vec![
            ReportEntry::number("Primary line current", r.currents.primary_line_a, "A", 3),
            ReportEntry::number("Secondary line current", r.currents.secondary_line_a, "A", 3),
            ReportEntry::number("Primary phase current", r.currents.primary_phase_a, "A", 3),
            ReportEntry::number("Secondary phase current", r.currents.secondary_phase_a, "A", 3),
        ],
        Stage::TurnsPerVolt => vec![
            ReportEntry::number("Volts per turn", r.turns_per_volt.volts_per_turn, "V/turn", 3),
            ReportEntry::number("Primary winding turns", r.turns_per_volt.primary_turns, "", 3),
            ReportEntry::number("Secondary winding turns", r.turns_per_volt.secondary_turns, "", 3),
        ],
        Stage::MagneticSection => vec![ReportEntry::number(
            "Core magnetic section",
            r.core_section.magnetic_section_cm2,
            "cm2",
            3,
        )],
        Stage::GeometricSection => vec![
            ReportEntry::number("Core geometric section", r.core_section.geometric_section_cm2, "cm2", 3),
            ReportEntry::number("Core geometric radius", r.core_section.geometric_radius_cm, "cm", 3),
        ],
        Stage::CoreStepping => vec![
            ReportEntry::number("Core steps", f64::from(r.stepping.steps), "", 0),
            ReportEntry::number("Fill factor", r.stepping.fill_factor, "", 3),
        ],
        Stage::InscribedSection => vec![
            ReportEntry::number("Inscribed core section", r.inscribed_core.section_cm2, "cm2", 4),
            ReportEntry::number("Minimum former radius", r.inscribed_core.radius_cm, "cm", 3),
        ],
        Stage::WindowHeight => vec![ReportEntry::number("Window height", r.window_height_mm, "mm", 3)],
        Stage::SecondaryTurns => vec![ReportEntry::number("Secondary turns", r.turns.secondary, "", 3)],
        Stage::PrimaryTurns => vec![ReportEntry::number("Primary turns", r.turns.primary, "", 3)],
        Stage::PrimaryConductor => conductor_entries("Primary", &r.primary_conductor),
        Stage::SecondaryConductor => conductor_entries("Secondary", &r.secondary_conductor),
        Stage::SecondaryBuild => build_entries("Secondary", &r.secondary_build),
        Stage::PrimaryBuild => build_entries("Primary", &r.primary_build),
        Stage::MeanLengths => vec![
            ReportEntry::number("Core to former gap", constants.core_gap_mm, "mm", 3),
            ReportEntry::number("Former inner diameter", r.mean_lengths.former_inner_diameter_mm, "mm", 3),
            ReportEntry::number("Secondary mean turn length", r.mean_lengths.secondary_mm, "mm", 3),
            ReportEntry::number("Gap between windings", constants.winding_gap_mm, "mm", 3),
            ReportEntry::number("Secondary outer diameter", r.mean_lengths.former_outer_diameter_mm, "mm", 3),
            ReportEntry::number("Primary mean turn length", r.mean_lengths.primary_mm, "mm", 3),
        ],
        Stage::PrimaryCopperMass => vec![ReportEntry::number("Primary copper mass", r.primary_copper_mass_kg, "kg", 3)],
        Stage::SecondaryCopperMass => {
            vec![ReportEntry::number("Secondary copper mass", r.secondary_copper_mass_kg, "kg", 3)]
        }
        Stage::PrimaryResistance => resistance_entries("Primary", &r.primary_resistance),
        Stage::SecondaryResistance => resistance_entries("Secondary", &r.secondary_resistance),
        Stage::WindingLosses => vec![
            ReportEntry::number("Stray loss allowance", constants.stray_loss_w, "W", 3),
            ReportEntry::number("Winding losses", r.winding_losses_w, "W", 3),
        ],
        Stage::WindowWidth => vec![
            ReportEntry::number("Phase clearance", constants.phase_clearance_mm, "mm", 3),
            ReportEntry::number("Window width", r.window_width_mm, "mm", 3),
        ],
        Stage::CoreMass => vec![ReportEntry::number("Core mass", r.core_mass_kg, "kg", 3)],
        Stage::CoreLoss => vec![ReportEntry::number("Core losses", r.core_loss_w, "W", 3)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::design::calculate;
    use crate::tables::AwgTable;

    fn reference_report() -> DesignReport {
        let config = DesignConfig::default();
        let result = calculate(&config, AwgTable::standard()).unwrap();
        DesignReport::new(&config, &result)
    }

    #[test]
    fn test_one_section_per_stage() {
        let report = reference_report();
        assert_eq!(report.sections.len(), 22);
        for (index, section) in report.sections.iter().enumerate() {
            assert_eq!(usize::from(section.stage), index + 1);
            assert!(!section.entries.is_empty(), "stage {} has no lines", section.stage);
        }
    }

    #[test]
    fn test_entry_formatting() {
        assert_eq!(ReportEntry::number("Il", 1.88266, "A", 3).to_string(), "Il: 1.883 A");
        assert_eq!(ReportEntry::number("Steps", 5.0, "", 0).to_string(), "Steps: 5");
        assert_eq!(ReportEntry::text("Gauge", "4/0", "AWG").to_string(), "Gauge: 4/0 AWG");
    }

    #[test]
    fn test_text_rendering() {
        let text = reference_report().to_text();
        assert!(text.starts_with("1 - Line and phase currents of each winding\n"));
        assert!(text.contains("  Primary line current: 1.883 A\n"));
        assert!(text.contains("  Secondary line current: 68.370 A\n"));
        assert!(text.contains("  Volts per turn: 3.286 V/turn\n"));
        assert!(text.contains("  Core steps: 5\n"));
        assert!(text.contains("22 - Core losses\n  Core losses: 1000.000 W\n"));
    }

    #[test]
    fn test_section_lookup() {
        let report = reference_report();
        let section = report.section(Stage::SecondaryConductor).unwrap();
        assert_eq!(section.entries[0].value, ReportValue::Text("3".to_string()));
    }

    #[test]
    fn test_json_output() {
        let report = reference_report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"sections\""));
        assert!(json.contains("\"awg\":\"21\""));

        let roundtrip: DesignReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.run_id, report.run_id);
        assert_eq!(roundtrip.sections.len(), 22);
        assert_eq!(roundtrip.config, report.config);
    }
}
