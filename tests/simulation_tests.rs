// tests/simulation_tests.rs

// Import necessary types from the qviz crate
use qviz::{
    circuits::library::{bell_pair, cnot_demo},
    Circuit, CircuitBuilder, Gate, Operation, QubitId, Simulator, VizError,
};

use num_complex::Complex;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

const TEST_TOLERANCE: f64 = 1e-9;

// Helper function to create QubitId for tests
fn qid(id: usize) -> QubitId {
    QubitId(id)
}

fn assert_complex_vec_approx_equal(actual: &[Complex<f64>], expected: &[Complex<f64>], context: &str) {
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

fn real(values: &[f64]) -> Vec<Complex<f64>> {
    values.iter().map(|&v| Complex::new(v, 0.0)).collect()
}

#[test]
fn test_empty_circuit_stays_in_ground_state() -> Result<(), VizError> {
    let state = Simulator::new().statevector(&Circuit::new(2))?;
    assert_complex_vec_approx_equal(state.amplitudes(), &real(&[1.0, 0.0, 0.0, 0.0]), "empty");
    Ok(())
}

#[test]
fn test_cnot_on_ground_state_is_identity() -> Result<(), VizError> {
    let state = Simulator::new().statevector(&cnot_demo()?)?;
    assert_complex_vec_approx_equal(state.amplitudes(), &real(&[1.0, 0.0, 0.0, 0.0]), "CNOT|00⟩");
    Ok(())
}

#[test]
fn test_cnot_flips_target_when_control_set() -> Result<(), VizError> {
    // X on q0 gives index 1 (|01⟩); CNOT(0 -> 1) then sets q1 as well: index 3 (|11⟩).
    let circuit = CircuitBuilder::new(2)
        .add_op(Operation::Gate { target: qid(0), gate: Gate::X })
        .add_op(Operation::cnot(qid(0), qid(1)))
        .build()?;
    let state = Simulator::new().statevector(&circuit)?;
    assert_complex_vec_approx_equal(state.amplitudes(), &real(&[0.0, 0.0, 0.0, 1.0]), "X0 CX01");
    Ok(())
}

#[test]
fn test_cnot_leaves_target_when_control_clear() -> Result<(), VizError> {
    // X on q1 only: index 2, and the control q0 stays |0⟩.
    let circuit = CircuitBuilder::new(2)
        .add_op(Operation::Gate { target: qid(1), gate: Gate::X })
        .add_op(Operation::cnot(qid(0), qid(1)))
        .build()?;
    let state = Simulator::new().statevector(&circuit)?;
    assert_complex_vec_approx_equal(state.amplitudes(), &real(&[0.0, 0.0, 1.0, 0.0]), "X1 CX01");
    Ok(())
}

#[test]
fn test_bell_pair_amplitudes() -> Result<(), VizError> {
    let state = Simulator::new().statevector(&bell_pair()?)?;
    let h = FRAC_1_SQRT_2;
    assert_complex_vec_approx_equal(state.amplitudes(), &real(&[h, 0.0, 0.0, h]), "Bell");
    let probs = state.probabilities();
    assert!((probs[0] - 0.5).abs() < TEST_TOLERANCE);
    assert!((probs[3] - 0.5).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_phase_gates_produce_complex_amplitudes() -> Result<(), VizError> {
    // H then S on q0: (|0⟩ + i|1⟩)/√2.
    let circuit = CircuitBuilder::new(1)
        .add_op(Operation::Gate { target: qid(0), gate: Gate::H })
        .add_op(Operation::Gate { target: qid(0), gate: Gate::S })
        .build()?;
    let state = Simulator::new().statevector(&circuit)?;
    let h = FRAC_1_SQRT_2;
    assert_complex_vec_approx_equal(
        state.amplitudes(),
        &[Complex::new(h, 0.0), Complex::new(0.0, h)],
        "H S",
    );

    // Phase(π) is Z.
    let circuit = CircuitBuilder::new(1)
        .add_op(Operation::Gate { target: qid(0), gate: Gate::X })
        .add_op(Operation::Gate { target: qid(0), gate: Gate::Phase(PI) })
        .build()?;
    let state = Simulator::new().statevector(&circuit)?;
    assert_complex_vec_approx_equal(state.amplitudes(), &real(&[0.0, -1.0]), "X P(π)");
    Ok(())
}

#[test]
fn test_measure_does_not_collapse_statevector() -> Result<(), VizError> {
    let circuit = CircuitBuilder::new(2)
        .add_op(Operation::Gate { target: qid(0), gate: Gate::H })
        .add_op(Operation::cnot(qid(0), qid(1)))
        .add_op(Operation::Measure { targets: vec![qid(0), qid(1)] })
        .build()?;
    let state = Simulator::new().statevector(&circuit)?;
    let h = FRAC_1_SQRT_2;
    assert_complex_vec_approx_equal(state.amplitudes(), &real(&[h, 0.0, 0.0, h]), "Bell + M");
    Ok(())
}

#[test]
fn test_zero_qubit_circuit_rejected() {
    assert!(Simulator::new().statevector(&Circuit::new(0)).is_err());
}

#[test]
fn test_invalid_circuits_rejected_at_build() {
    assert!(matches!(
        CircuitBuilder::new(2).add_op(Operation::cnot(qid(0), qid(2))).build(),
        Err(VizError::QubitOutOfRange { .. })
    ));
    assert!(matches!(
        CircuitBuilder::new(2).add_op(Operation::cnot(qid(1), qid(1))).build(),
        Err(VizError::InvalidOperation { .. })
    ));
}
