//! # Transformer Design Equations
//!
//! The closed-form formulas of the design method, grouped by subject.
//! Every function here is pure: plain `f64` in, plain `f64` out, no
//! validation. Physically meaningless inputs (zero or negative values)
//! propagate as NaN or negative results rather than errors.
//!
//! ## Modules
//!
//! - [`electrical`] - Currents, volts per turn, turn counts
//! - [`magnetic_core`] - Core sections, window dimensions, core mass
//! - [`conductor`] - Conductor section/diameter and layer build
//! - [`winding_geometry`] - Former diameters and mean turn lengths
//! - [`losses`] - Copper mass, resistances, winding losses
//! - [`registry`] - The 22 design stages and their metadata
//!
//! ## Units
//!
//! - Core sections in cm², core radii in cm
//! - Conductor sections in mm², all other lengths in mm
//! - Power in VA, voltage in V, current in A, flux density in T

pub mod conductor;
pub mod electrical;
pub mod losses;
pub mod magnetic_core;
pub mod registry;
pub mod winding_geometry;

// Re-export commonly used items
pub use electrical::{line_current, phase_current, primary_turns, secondary_turns, turns_for_voltage, volts_per_turn};

pub use magnetic_core::{
    circle_radius,
    core_mass,
    geometric_section,
    inscribed_section,
    magnetic_section,
    window_height,
    window_width,
};

pub use conductor::{conductor_diameter, conductor_section, layer_count, radial_thickness, turns_per_layer};

pub use winding_geometry::{
    former_inner_diameter,
    former_outer_diameter,
    primary_mean_length_circular,
    primary_mean_length_rectangular,
    secondary_mean_length_circular,
    secondary_mean_length_rectangular,
};

pub use losses::{copper_mass, corrected_resistance, winding_losses, winding_resistance};

pub use registry::{Stage, StageCategory, StageMetadata, ALL_STAGES};
