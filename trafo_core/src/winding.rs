//! # Windings
//!
//! A [`Winding`] is one three-phase coil set of the transformer: its line
//! voltage and how its three coils are connected. The connection decides
//! how line quantities map onto phase quantities:
//!
//! | Connection | Phase voltage | Phase current |
//! |------------|---------------|---------------|
//! | Star (wye) | V_line / √3   | I_line        |
//! | Delta      | V_line        | I_line / √3   |
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::winding::{Connection, Winding};
//!
//! let secondary = Winding::new(380.0, Connection::Star);
//! assert!((secondary.phase_voltage() - 219.393).abs() < 1e-3);
//!
//! // Connection names are parsed strictly
//! assert!(Winding::from_nameplate(380.0, "zigzag").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// How the three coils of a winding are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Connection {
    /// Star (wye): coils share a neutral point
    Star,
    /// Delta: coils connected end to end
    Delta,
}

impl Connection {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Connection::Star => "star",
            Connection::Delta => "delta",
        }
    }

    /// Ratio between line and phase voltage (V_line / V_phase)
    pub fn voltage_ratio(&self) -> f64 {
        match self {
            Connection::Star => 3f64.sqrt(),
            Connection::Delta => 1.0,
        }
    }

    /// Ratio between line and phase current (I_line / I_phase)
    pub fn current_ratio(&self) -> f64 {
        match self {
            Connection::Star => 1.0,
            Connection::Delta => 3f64.sqrt(),
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Connection {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "star" | "wye" | "y" | "estrela" => Ok(Connection::Star),
            "delta" | "d" | "triangle" => Ok(Connection::Delta),
            _ => Err(CalcError::invalid_connection(s)),
        }
    }
}

impl TryFrom<String> for Connection {
    type Error = CalcError;

    fn try_from(value: String) -> CalcResult<Self> {
        value.parse()
    }
}

impl From<Connection> for String {
    fn from(connection: Connection) -> Self {
        connection.as_str().to_string()
    }
}

/// One transformer winding. Immutable once constructed.
///
/// Defaults to the 380 V star low-voltage winding, so a partial JSON object
/// only needs the fields that differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Winding {
    /// Line-to-line voltage (V)
    pub line_voltage: f64,
    /// Coil connection
    pub connection: Connection,
}

impl Default for Winding {
    fn default() -> Self {
        Winding::new(380.0, Connection::Star)
    }
}

impl Winding {
    pub fn new(line_voltage: f64, connection: Connection) -> Self {
        Winding {
            line_voltage,
            connection,
        }
    }

    /// Build a winding from nameplate text, e.g. `(13800.0, "delta")`.
    ///
    /// Fails with [`CalcError::InvalidConnection`] for anything other than
    /// a star or delta connection name.
    pub fn from_nameplate(line_voltage: f64, connection: &str) -> CalcResult<Self> {
        Ok(Winding::new(line_voltage, connection.parse()?))
    }

    /// Phase voltage derived from the connection type (V)
    pub fn phase_voltage(&self) -> f64 {
        self.line_voltage / self.connection.voltage_ratio()
    }
}

impl fmt::Display for Winding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} V {}", self.line_voltage, self.connection)
    }
}
