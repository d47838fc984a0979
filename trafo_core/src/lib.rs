//! # trafo_core - Three-Phase Transformer Design Engine
//!
//! `trafo_core` turns the nameplate data of a three-phase power transformer
//! (rated power, frequency, winding voltages and connections, flux density)
//! into a physical design: currents, core section and stepping, turn
//! counts, conductor gauges, winding build, copper masses, resistances and
//! losses. The design runs as 22 fixed stages, each reading only the
//! results of the stages before it.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `calculate` is a pure function of its config and gauge table
//! - **JSON-First**: Configs, results and reports implement Serialize/Deserialize
//! - **Rich Errors**: Table misses and unknown connections are structured errors;
//!   physically meaningless numbers are not validated and flow through as NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use trafo_core::{calculate, AwgTable, DesignConfig, DesignReport};
//!
//! let config = DesignConfig::default(); // 45 kVA, 13.8 kV delta / 380 V star
//! let result = calculate(&config, AwgTable::standard())?;
//!
//! assert_eq!(result.stepping.steps, 5);
//! assert_eq!(result.primary_conductor.awg, "21");
//!
//! let report = DesignReport::new(&config, &result);
//! println!("{}", report.to_text());
//! # Ok::<(), trafo_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Nameplate data and design constants
//! - [`winding`] - Star/delta connections and per-phase quantities
//! - [`tables`] - Empirical lookup tables and the AWG wire table
//! - [`equations`] - The closed-form formulas behind each stage
//! - [`calculations`] - The 22-stage design pipeline
//! - [`report`] - Labelled stage results for logs, text and JSON
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Config files, atomic saves and the locked run log

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod report;
pub mod tables;
pub mod units;
pub mod winding;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, DesignResult};
pub use config::{DesignConfig, DesignConstants, FormerShape, Nameplate};
pub use equations::Stage;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_config, save_config, save_report, LogFile};
pub use report::DesignReport;
pub use tables::{AwgTable, GaugeLookup};
pub use winding::{Connection, Winding};
