//! Error handling logic

use std::fmt;

use crate::render::font::FontError;

/// Index of a qubit within a circuit.
///
/// Qubit `k` maps to bit `k` of a basis-state index, so qubit 0 is the least
/// significant bit and is printed last in a basis label such as `|10⟩`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Errors produced while building circuits, simulating them, formatting their
/// states, or drawing frames.
#[derive(Debug, thiserror::Error)]
pub enum VizError {
    /// A state vector does not satisfy a precondition of the consumer
    /// (wrong length, empty, not a power of two).
    #[error("Invalid State: {message}")]
    InvalidState {
        /// InvalidState failure message
        message: String,
    },

    /// An operation is inconsistent with the circuit it is added to.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// An operation referenced a qubit the circuit does not have.
    #[error("Qubit Out Of Range: {qubit} (circuit has {num_qubits} qubits)")]
    QubitOutOfRange {
        /// The offending qubit
        qubit: QubitId,
        /// Number of qubits in the circuit
        num_qubits: usize,
    },

    /// The state vector norm drifted away from 1.
    #[error("Incoherence: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// The equation rasterizer could not resolve or read a font.
    #[error("Font Error: {0}")]
    Font(#[from] FontError),

    /// Drawing or presenting a frame failed.
    #[error("Display Error: {message}")]
    Display {
        /// Display failure message
        message: String,
    },
}
