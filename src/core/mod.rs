// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

// Re-export public types for convenient access via `qviz::core::TypeName`
pub use error::{QubitId, VizError};
pub use state::StateVector;

pub mod constants;
pub use constants::{AMPLITUDE_EPSILON, DEFAULT_NORM_TOLERANCE, DEFAULT_QUBITS};
