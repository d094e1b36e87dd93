//! Numeric constants shared by the simulator, the validator and the formatter.

/// Amplitudes (and imaginary parts) with a magnitude below this value are
/// treated as exactly zero.
pub const AMPLITUDE_EPSILON: f64 = 1e-10;

/// Allowed deviation of `Σ|c_i|²` from 1.0 before a state counts as unnormalized.
pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Number of qubits the visualizer is built around.
pub const DEFAULT_QUBITS: usize = 2;
