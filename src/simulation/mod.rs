// src/simulation/mod.rs

//! Evaluates a [`Circuit`] into its final pure state.
//!
//! This is the only piece of quantum mechanics in the crate: a dense
//! state-vector evolution over `2^n` complex amplitudes, small enough for the
//! two-qubit circuits the visualizer draws.

pub(crate) mod engine;

use crate::circuits::Circuit;
use crate::core::{StateVector, VizError};
use engine::SimulationEngine;

/// Entry point for running circuits.
#[derive(Debug, Default)]
pub struct Simulator {}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `circuit` from `|0...0⟩` and returns the final state vector.
    ///
    /// Measurement markers are skipped; the returned vector is the pure state
    /// just before any measurement would happen.
    ///
    /// # Errors
    /// * `VizError::InvalidOperation` for a circuit over zero qubits.
    /// * Any error raised while applying an operation.
    pub fn statevector(&self, circuit: &Circuit) -> Result<StateVector, VizError> {
        let mut engine = SimulationEngine::init(circuit.num_qubits())?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        engine.state()
    }
}

#[cfg(test)]
mod tests {
    use super::engine::SimulationEngine;
    use super::*;
    use crate::core::QubitId;
    use crate::operations::{Gate, Operation};
    use num_complex::Complex;
    use num_traits::Zero;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn assert_complex_vec_approx_equal(
        actual: &[Complex<f64>],
        expected: &[Complex<f64>],
        context: &str,
    ) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < TEST_TOLERANCE * TEST_TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
                i, actual[i], expected[i], context
            );
        }
    }

    #[test]
    fn test_controlled_gate_only_acts_on_control_one_subspace() -> Result<(), VizError> {
        let mut engine = SimulationEngine::init(2)?;
        // (|00⟩ + |01⟩)/√2: qubit 0 in superposition, qubit 1 in |0⟩
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        engine.set_state(&StateVector::from_amplitudes(vec![h, h, Complex::zero(), Complex::zero()])?)?;
        engine.apply_operation(&Operation::cnot(QubitId(0), QubitId(1)))?;

        assert_complex_vec_approx_equal(
            engine.state()?.amplitudes(),
            &[h, Complex::zero(), Complex::zero(), h],
            "CNOT(0 -> 1) on (|00⟩ + |01⟩)/√2",
        );
        Ok(())
    }

    #[test]
    fn test_set_state_rejects_wrong_dimension() -> Result<(), VizError> {
        let mut engine = SimulationEngine::init(2)?;
        let err = engine.set_state(&StateVector::from_real(&[1.0, 0.0])?).unwrap_err();
        assert!(matches!(err, VizError::SimulationError { .. }));
        Ok(())
    }

    #[test]
    fn test_zero_qubit_engine_rejected() {
        assert!(matches!(
            SimulationEngine::init(0),
            Err(VizError::InvalidOperation { .. })
        ));
    }
}
