//! # Electrical Quantities
//!
//! Currents, volts per turn and turn counts (stages 1, 2, 8 and 9).
//!
//! ## Notation
//!
//! - `Pn` = Rated (apparent) power, VA
//! - `Vl` = Line-to-line voltage, V
//! - `Il`, `If` = Line and phase current, A
//! - `V_esp` = Volts per turn
//! - `Bn` = Core flux density, T
//! - `Sn` = Core magnetic section, cm²
//! - `f` = Line frequency, Hz

use crate::units::{KiloVoltAmperes, VoltAmperes};
use crate::winding::Connection;

// =============================================================================
// STAGE 1: CURRENTS
// =============================================================================

/// Line current of a three-phase winding
///
/// # Formula
/// Il = Pn / (√3 × Vl)
///
/// # Example
/// ```rust
/// use trafo_core::equations::electrical::line_current;
///
/// let il = line_current(45_000.0, 380.0);
/// assert!((il - 68.37).abs() < 0.01);
/// ```
#[inline]
pub fn line_current(rated_power_va: f64, line_voltage: f64) -> f64 {
    rated_power_va / (3f64.sqrt() * line_voltage)
}

/// Phase current from line current
///
/// # Formula
/// - Star: If = Il
/// - Delta: If = Il / √3
#[inline]
pub fn phase_current(line_current: f64, connection: Connection) -> f64 {
    line_current / connection.current_ratio()
}

// =============================================================================
// STAGE 2: VOLTS PER TURN
// =============================================================================

/// Empirical volts per turn for a given rated power
///
/// # Formula
/// V_esp = √(0.24 × Pn[kVA])
///
/// # Example
/// ```rust
/// use trafo_core::equations::electrical::volts_per_turn;
///
/// assert!((volts_per_turn(45_000.0) - 3.286).abs() < 1e-3);
/// ```
#[inline]
pub fn volts_per_turn(rated_power_va: f64) -> f64 {
    let power: KiloVoltAmperes = VoltAmperes(rated_power_va).into();
    (0.24 * power.0).sqrt()
}

/// Turns needed to hold a phase voltage at the given volts per turn
#[inline]
pub fn turns_for_voltage(phase_voltage: f64, volts_per_turn: f64) -> f64 {
    phase_voltage / volts_per_turn
}

// =============================================================================
// STAGES 8-9: TURN COUNTS
// =============================================================================

/// Secondary turns from the transformer EMF equation
///
/// # Formula
/// Ns = (Vs × 10⁴) / (4.44 × Bn × Sn × f)
///
/// The 10⁴ factor converts the section from cm² to m².
#[inline]
pub fn secondary_turns(secondary_voltage: f64, flux_density_t: f64, magnetic_section_cm2: f64, frequency_hz: f64) -> f64 {
    (secondary_voltage * 1e4) / (4.44 * flux_density_t * magnetic_section_cm2 * frequency_hz)
}

/// Primary turns from the voltage ratio
///
/// # Formula
/// Np = (Vp × Ns) / Vs
#[inline]
pub fn primary_turns(primary_voltage: f64, secondary_turns: f64, secondary_voltage: f64) -> f64 {
    (primary_voltage * secondary_turns) / secondary_voltage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_currents() {
        // 45 kVA at 13.8 kV and 380 V
        assert!((line_current(45_000.0, 13_800.0) - 1.8827).abs() < 1e-4);
        assert!((line_current(45_000.0, 380.0) - 68.3704).abs() < 1e-4);
    }

    #[test]
    fn test_phase_current_by_connection() {
        let il = line_current(45_000.0, 13_800.0);
        assert_eq!(phase_current(il, Connection::Star), il);
        assert!((phase_current(il, Connection::Delta) - il / 3f64.sqrt()).abs() < 1e-12);
        // 45 kVA / (3 × 13.8 kV)
        assert!((phase_current(il, Connection::Delta) - 45_000.0 / (3.0 * 13_800.0)).abs() < 1e-12);
    }

    #[test]
    fn test_volts_per_turn() {
        assert!((volts_per_turn(45_000.0) - 10.8f64.sqrt()).abs() < 1e-12);
        assert!((volts_per_turn(150_000.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_turn_counts() {
        let v_esp = volts_per_turn(45_000.0);
        let sn = 85.0765;
        let ns = secondary_turns(380.0, 1.45, sn, 60.0);
        assert!((ns - 115.63).abs() < 0.01);
        // EMF equation reduces to V / V_esp
        assert!((ns - 380.0 / v_esp).abs() < 0.01);

        let np = primary_turns(13_800.0, ns, 380.0);
        assert!((np - ns * 13_800.0 / 380.0).abs() < 1e-9);
        assert!((turns_for_voltage(13_800.0, v_esp) - 4199.21).abs() < 0.01);
    }
}
