// src/lib.rs

//! `qviz` - A two-qubit circuit visualizer
//!
//! Simulates a small quantum circuit, formats its final state vector as the
//! equation `|ψ⟩ = ...`, and shows the circuit diagram with that equation in
//! a window.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod format;
pub mod render;
pub mod visualizer;

// Re-export the most common types for easier top-level use
pub use core::{QubitId, StateVector, VizError};
pub use operations::{Gate, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::Simulator;
pub use validation::{check_normalization, validate_state};
pub use format::{format_state, EquationFormatter, Notation};
pub use visualizer::{QuantumVisualizer, VisualizerConfig};

/// Opens the visualizer window on the two-qubit CNOT circuit with default
/// settings and blocks until it is closed.
pub fn run_app() -> anyhow::Result<()> {
    let circuit = circuits::library::cnot_demo()?;
    visualizer::run(circuit, VisualizerConfig::default())
}

// Example 1: The CNOT demo
// A CNOT on |00⟩ leaves the register untouched, so the equation is just the
// first basis ket.
/// ```
/// use qviz::{format_state, Simulator, VizError};
/// use qviz::circuits::library::cnot_demo;
///
/// let circuit = cnot_demo()?;
/// println!("{}", circuit);
///
/// let state = Simulator::new().statevector(&circuit)?;
/// assert_eq!(format_state(state.amplitudes())?, "|ψ⟩ = |00⟩");
/// # Ok::<(), VizError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Entangling before the CNOT
// Flipping the control first sends |00⟩ to |11⟩; a Hadamard instead gives the
// Bell state with both coefficients rounded to two decimals.
/// ```
/// use qviz::{CircuitBuilder, EquationFormatter, Gate, Operation, QubitId, Simulator, VizError};
///
/// let flip_then_cnot = CircuitBuilder::new(2)
///     .add_op(Operation::Gate { target: QubitId(0), gate: Gate::X })
///     .add_op(Operation::cnot(QubitId(0), QubitId(1)))
///     .build()?;
/// let bell = CircuitBuilder::new(2)
///     .add_op(Operation::Gate { target: QubitId(0), gate: Gate::H })
///     .add_op(Operation::cnot(QubitId(0), QubitId(1)))
///     .build()?;
///
/// let simulator = Simulator::new();
/// let formatter = EquationFormatter::new(2);
/// assert_eq!(
///     formatter.format_state_vector(&simulator.statevector(&flip_then_cnot)?)?,
///     "|ψ⟩ = |11⟩"
/// );
/// assert_eq!(
///     formatter.format_state_vector(&simulator.statevector(&bell)?)?,
///     "|ψ⟩ = 0.71|00⟩ + 0.71|11⟩"
/// );
/// # Ok::<(), VizError>(())
/// ```
#[doc(hidden)]
const _: () = ();
