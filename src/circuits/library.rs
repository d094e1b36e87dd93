//! Ready-made circuits.

use super::{Circuit, CircuitBuilder};
use crate::core::{QubitId, VizError};
use crate::operations::{Gate, Operation};

/// The visualizer's circuit: two qubits in `|00⟩` and a single CNOT with
/// qubit 0 as control and qubit 1 as target.
pub fn cnot_demo() -> Result<Circuit, VizError> {
    CircuitBuilder::new(2)
        .add_op(Operation::cnot(QubitId(0), QubitId(1)))
        .build()
}

/// Hadamard on qubit 0 followed by CNOT(0 -> 1): `(|00⟩ + |11⟩)/√2`.
pub fn bell_pair() -> Result<Circuit, VizError> {
    CircuitBuilder::new(2)
        .add_op(Operation::Gate { target: QubitId(0), gate: Gate::H })
        .add_op(Operation::cnot(QubitId(0), QubitId(1)))
        .build()
}
