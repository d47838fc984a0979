//! # Design Configuration
//!
//! `DesignConfig` is the immutable input to a design run: the nameplate
//! data of the transformer plus the empirical constants of the method.
//! It serializes to JSON, and every field has a default, so a config file
//! only needs the values that differ from the reference 45 kVA design.
//!
//! ## Structure
//!
//! ```text
//! DesignConfig
//! ├── nameplate: Nameplate (power, frequency, windings, Bn, ke)
//! ├── constants: DesignConstants (clearances, insulation, material data)
//! └── former: FormerShape (circular or rectangular)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::config::DesignConfig;
//!
//! let config: DesignConfig = serde_json::from_str(
//!     r#"{ "nameplate": { "rated_power_va": 75000.0 } }"#,
//! ).unwrap();
//!
//! assert_eq!(config.nameplate.rated_power_va, 75_000.0);
//! assert_eq!(config.nameplate.frequency_hz, 60.0);
//! assert_eq!(config.constants.winding_gap_mm, 16.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::winding::{Connection, Winding};

/// Complete input of a design run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    pub nameplate: Nameplate,
    pub constants: DesignConstants,
    pub former: FormerShape,
}

impl DesignConfig {
    /// Structural checks only; engineering ranges are not validated.
    pub fn validate(&self) -> CalcResult<()> {
        self.nameplate.primary_winding()?;
        Ok(())
    }
}

/// Transformer nameplate data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nameplate {
    /// Rated apparent power (VA). Must be a tabulated rating.
    pub rated_power_va: f64,
    /// Line frequency (Hz)
    pub frequency_hz: f64,
    /// High-voltage winding ("AT")
    pub primary: PrimaryTaps,
    /// Low-voltage winding ("BT")
    pub secondary: Winding,
    /// Allowed core flux density range; the design uses the mean
    pub flux_density: FluxDensityRange,
    /// Lamination stacking factor (ke)
    pub stacking_factor: f64,
}

impl Default for Nameplate {
    fn default() -> Self {
        Nameplate {
            rated_power_va: 45_000.0,
            frequency_hz: 60.0,
            primary: PrimaryTaps::default(),
            secondary: Winding::default(),
            flux_density: FluxDensityRange::default(),
            stacking_factor: 0.95,
        }
    }
}

impl Nameplate {
    /// Primary winding at its design (highest) tap voltage.
    pub fn primary_winding(&self) -> CalcResult<Winding> {
        self.primary.design_winding()
    }

    pub fn secondary_winding(&self) -> Winding {
        self.secondary
    }

    /// Design flux density Bn (T)
    pub fn flux_density_t(&self) -> f64 {
        self.flux_density.mean()
    }
}

/// Primary winding with one or more voltage taps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryTaps {
    /// Tap line voltages (V)
    pub line_voltages: Vec<f64>,
    pub connection: Connection,
}

impl Default for PrimaryTaps {
    fn default() -> Self {
        PrimaryTaps {
            line_voltages: vec![13_800.0, 13_200.0, 12_600.0],
            connection: Connection::Delta,
        }
    }
}

impl PrimaryTaps {
    /// Highest tap voltage, which the design is sized for
    pub fn design_voltage(&self) -> CalcResult<f64> {
        self.line_voltages
            .iter()
            .copied()
            .max_by(f64::total_cmp)
            .ok_or_else(|| CalcError::missing_field("nameplate.primary.line_voltages"))
    }

    pub fn design_winding(&self) -> CalcResult<Winding> {
        Ok(Winding::new(self.design_voltage()?, self.connection))
    }
}

/// Core flux density range (T)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluxDensityRange {
    pub min_t: f64,
    pub max_t: f64,
}

impl Default for FluxDensityRange {
    fn default() -> Self {
        FluxDensityRange { min_t: 1.2, max_t: 1.7 }
    }
}

impl FluxDensityRange {
    pub fn mean(&self) -> f64 {
        (self.min_t + self.max_t) / 2.0
    }
}

/// Empirical constants of the design method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConstants {
    /// Hc: clearance between winding ends and yoke (mm)
    pub coil_end_clearance_mm: f64,
    /// dn: gap between core and former (mm)
    pub core_gap_mm: f64,
    /// do: gap between secondary and primary windings (mm)
    pub winding_gap_mm: f64,
    /// εp: primary interlayer insulation (mm)
    pub primary_layer_insulation_mm: f64,
    /// εs: secondary interlayer insulation (mm)
    pub secondary_layer_insulation_mm: f64,
    /// Defa: clearance between adjacent phases (mm)
    pub phase_clearance_mm: f64,
    /// kp: stray (supplementary) loss allowance (W)
    pub stray_loss_w: f64,
    /// ρ: copper resistivity (Ω·mm²/m)
    pub copper_resistivity: f64,
    /// Copper density (kg/(m·mm²))
    pub copper_density: f64,
    /// Core steel density (kg/cm³)
    pub core_density: f64,
    /// α: copper temperature coefficient (1/°C)
    pub temperature_coefficient: f64,
    /// Top: operating temperature (°C)
    pub operating_temperature_c: f64,
    /// Tref: temperature the resistivity is given at (°C)
    pub reference_temperature_c: f64,
}

impl Default for DesignConstants {
    fn default() -> Self {
        DesignConstants {
            coil_end_clearance_mm: 10.0,
            core_gap_mm: 0.5,
            winding_gap_mm: 16.0,
            primary_layer_insulation_mm: 0.20,
            secondary_layer_insulation_mm: 0.20,
            phase_clearance_mm: 10.0,
            // Worst case
            stray_loss_w: 0.05,
            copper_resistivity: 0.0216,
            copper_density: 8.89e-3,
            core_density: 7.655e-3,
            temperature_coefficient: 3.9e-3,
            operating_temperature_c: 75.0,
            reference_temperature_c: 30.0,
        }
    }
}

/// Shape of the former the secondary is wound on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum FormerShape {
    /// Round former around the inscribed core circle
    #[default]
    Circular,
    /// Rectangular former around an `a` × `b` core (mm)
    Rectangular { a_mm: f64, b_mm: f64 },
}
