// src/operations/mod.rs

//! Gates and the operations that place them on qubits.
//!
//! The gate set is deliberately closed: the standard single-qubit Clifford+T
//! gates, a parameterised phase, and their singly-controlled forms (the CNOT
//! being `Controlled` with [`Gate::X`]).

use num_complex::Complex;
use num_traits::Zero;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use crate::core::QubitId;

/// A 2x2 unitary in row-major order.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

/// A single-qubit gate.
#[derive(Debug, Clone, Copy, PartialEq)] // f64 in Phase rules out Eq
pub enum Gate {
    /// No-op.
    Identity,
    /// Pauli X (bit flip).
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z (phase flip).
    Z,
    /// Hadamard.
    H,
    /// Phase π/2.
    S,
    /// Phase π/4.
    T,
    /// Phase `e^(iθ)` on `|1⟩`, `θ` in radians.
    Phase(f64),
}

impl Gate {
    /// The gate's unitary on the `{|0⟩, |1⟩}` basis.
    pub fn matrix(&self) -> Matrix2 {
        let one = Complex::new(1.0, 0.0);
        let zero = Complex::zero();
        let i = Complex::i();
        match self {
            Gate::Identity => [[one, zero], [zero, one]],
            Gate::X => [[zero, one], [one, zero]],
            Gate::Y => [[zero, -i], [i, zero]],
            Gate::Z => [[one, zero], [zero, -one]],
            Gate::H => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            Gate::S => [[one, zero], [zero, i]],
            // e^(iπ/4) = (1+i)/√2
            Gate::T => [[one, zero], [zero, Complex::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]],
            Gate::Phase(theta) => [[one, zero], [zero, Complex::new(theta.cos(), theta.sin())]],
        }
    }

    /// Short label used in circuit diagrams.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::Identity => "I",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::T => "T",
            Gate::Phase(_) => "P",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Phase(theta) => write!(f, "P({:.4})", theta),
            other => f.write_str(other.symbol()),
        }
    }
}

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Applies `gate` to `target`.
    Gate {
        /// The qubit the gate acts on.
        target: QubitId,
        /// The gate to apply.
        gate: Gate,
    },

    /// Applies `gate` to `target` when `control` is `|1⟩`.
    Controlled {
        /// The qubit whose `|1⟩` component enables the gate.
        control: QubitId,
        /// The qubit the gate acts on.
        target: QubitId,
        /// The gate to apply.
        gate: Gate,
    },

    /// Marks qubits for measurement.
    ///
    /// The pure-state simulator ignores it; it only affects sampling and the
    /// diagram.
    Measure {
        /// The qubits to measure.
        targets: Vec<QubitId>,
    },
}

impl Operation {
    /// A controlled-NOT.
    pub fn cnot(control: QubitId, target: QubitId) -> Self {
        Operation::Controlled { control, target, gate: Gate::X }
    }

    /// Returns every qubit the operation mentions, controls first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate { target, .. } => vec![*target],
            Operation::Controlled { control, target, .. } => vec![*control, *target],
            Operation::Measure { targets } => targets.clone(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate { target, gate } => write!(f, "{} {}", gate, target),
            Operation::Controlled { control, target, gate: Gate::X } => {
                write!(f, "CX {} -> {}", control, target)
            }
            Operation::Controlled { control, target, gate } => {
                write!(f, "C{} {} -> {}", gate, control, target)
            }
            Operation::Measure { targets } => {
                write!(f, "M")?;
                for t in targets {
                    write!(f, " {}", t)?;
                }
                Ok(())
            }
        }
    }
}
