//! # Transformer Calculations
//!
//! The design run follows the same pattern as every calculation in this
//! crate:
//!
//! - `DesignConfig` - Input parameters (JSON-serializable)
//! - `DesignResult` - Calculation results (JSON-serializable)
//! - `calculate(input, ...) -> Result<DesignResult, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`design`] - Full 22-stage three-phase transformer design

pub mod design;

pub use design::{calculate, DesignResult};
