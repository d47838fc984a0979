//! # Unit Types
//!
//! Lightweight newtype wrappers for the few unit conversions the design
//! pipeline performs. Stage formulas mix centimetres (core sections and
//! radii) with millimetres (conductors, windings, window), and volt-amperes
//! with kilovolt-amperes; these wrappers keep those hand-offs explicit.
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::units::{Centimeters, Millimeters, KiloVoltAmperes, VoltAmperes};
//!
//! let radius: Millimeters = Centimeters(5.3).into();
//! assert!((radius.0 - 53.0).abs() < 1e-12);
//!
//! let power: KiloVoltAmperes = VoltAmperes(45_000.0).into();
//! assert_eq!(power.0, 45.0);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

impl From<Centimeters> for Millimeters {
    fn from(cm: Centimeters) -> Self {
        Millimeters(cm.0 * 10.0)
    }
}

impl From<Millimeters> for Centimeters {
    fn from(mm: Millimeters) -> Self {
        Centimeters(mm.0 / 10.0)
    }
}

// ============================================================================
// Apparent Power Units
// ============================================================================

/// Apparent power in volt-amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoltAmperes(pub f64);

/// Apparent power in kilovolt-amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloVoltAmperes(pub f64);

impl From<VoltAmperes> for KiloVoltAmperes {
    fn from(va: VoltAmperes) -> Self {
        KiloVoltAmperes(va.0 / 1000.0)
    }
}

impl From<KiloVoltAmperes> for VoltAmperes {
    fn from(kva: KiloVoltAmperes) -> Self {
        VoltAmperes(kva.0 * 1000.0)
    }
}
