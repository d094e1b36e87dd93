// src/simulation/engine.rs
use crate::core::{QubitId, StateVector, VizError};
use crate::operations::{Matrix2, Operation};
use num_complex::Complex;

/// Owns the amplitude buffer while a circuit is evolved.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// `2^n` amplitudes; qubit `k` is bit `k` of the index.
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Starts the register in `|0...0⟩`.
    pub(crate) fn init(num_qubits: usize) -> Result<Self, VizError> {
        if num_qubits == 0 {
            return Err(VizError::InvalidOperation {
                message: "Cannot initialize simulation engine with zero qubits".to_string(),
            });
        }
        let initial = StateVector::zero_state(num_qubits)?;
        Ok(Self {
            amplitudes: initial.amplitudes().to_vec(),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: &StateVector) -> Result<(), VizError> {
        if state.dim() != self.amplitudes.len() {
            return Err(VizError::SimulationError {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.amplitudes.len()
                ),
            });
        }
        self.amplitudes = state.amplitudes().to_vec();
        Ok(())
    }

    /// Applies one unitary operation. `Measure` is a no-op for the pure state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), VizError> {
        match op {
            Operation::Gate { target, gate } => {
                let bit = self.bit_of(target)?;
                self.apply_single_qubit_gate(bit, &gate.matrix(), None);
            }
            Operation::Controlled { control, target, gate } => {
                let control_bit = self.bit_of(control)?;
                let target_bit = self.bit_of(target)?;
                if control_bit == target_bit {
                    return Err(VizError::InvalidOperation {
                        message: "Control and target qubits cannot be the same for controlled operation"
                            .to_string(),
                    });
                }
                self.apply_single_qubit_gate(target_bit, &gate.matrix(), Some(control_bit));
            }
            Operation::Measure { .. } => {}
        }
        Ok(())
    }

    /// Snapshot of the current amplitudes.
    pub(crate) fn state(&self) -> Result<StateVector, VizError> {
        StateVector::from_amplitudes(self.amplitudes.clone())
    }

    fn bit_of(&self, qubit: &QubitId) -> Result<usize, VizError> {
        if qubit.0 < self.num_qubits {
            Ok(qubit.0)
        } else {
            Err(VizError::QubitOutOfRange {
                qubit: *qubit,
                num_qubits: self.num_qubits,
            })
        }
    }

    /// Applies a 2x2 matrix to the qubit at bit position `k`, optionally only
    /// on the subspace where bit `control` is set.
    fn apply_single_qubit_gate(&mut self, k: usize, matrix: &Matrix2, control: Option<usize>) {
        let k_mask = 1usize << k;
        let dim = self.amplitudes.len();

        // Visit each pair (|...0_k...⟩, |...1_k...⟩) once via its 0-member.
        for i0 in (0..dim).filter(|i| i & k_mask == 0) {
            if let Some(c) = control {
                if i0 & (1 << c) == 0 {
                    continue;
                }
            }
            let i1 = i0 | k_mask;
            let psi_0 = self.amplitudes[i0];
            let psi_1 = self.amplitudes[i1];
            self.amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            self.amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }
}
