// src/validation/mod.rs

//! Optional guards on simulator output.
//!
//! The formatter never calls these; it trusts its input. The visualizer runs
//! [`check_normalization`] once on the simulated state when configured to.

use crate::core::{StateVector, VizError, DEFAULT_NORM_TOLERANCE};

/// Checks that `Σ|c_i|² ≈ 1`.
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to `DEFAULT_NORM_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(VizError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), VizError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance || !norm_sq.is_finite() {
        Err(VizError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that `state` describes exactly `num_qubits` qubits and is normalized.
pub fn validate_state(
    state: &StateVector,
    num_qubits: usize,
    norm_tolerance: Option<f64>,
) -> Result<(), VizError> {
    if state.num_qubits() != num_qubits {
        return Err(VizError::InvalidState {
            message: format!(
                "Expected a {}-qubit state, got {} amplitudes",
                num_qubits,
                state.dim()
            ),
        });
    }
    check_normalization(state, norm_tolerance)
}
