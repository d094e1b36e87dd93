// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`qviz::operations::Operation`) on a fixed-size qubit register.
//!
//! Analogy: a trimmed-down `qiskit.QuantumCircuit(n)`: a qubit count plus an
//! ordered gate list, nothing else.

pub mod library;

use crate::core::{QubitId, VizError};
use crate::operations::{Gate, Operation};
use std::fmt;

/// An ordered sequence of operations applied to `num_qubits` qubits.
///
/// Every operation is checked on insertion: qubit indices must be below
/// `num_qubits` and a controlled gate needs distinct control and target.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    /// The order is the application order.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
        }
    }

    /// Appends a single operation after validating the qubits it touches.
    ///
    /// # Errors
    /// * `VizError::QubitOutOfRange` if a qubit index is `>= num_qubits`.
    /// * `VizError::InvalidOperation` if control and target coincide or a
    ///   measurement lists no qubits.
    pub fn add_operation(&mut self, op: Operation) -> Result<(), VizError> {
        for qubit in op.involved_qubits() {
            if qubit.0 >= self.num_qubits {
                return Err(VizError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        match &op {
            Operation::Controlled { control, target, .. } if control == target => {
                return Err(VizError::InvalidOperation {
                    message: format!("Control and target cannot both be {}", control),
                });
            }
            Operation::Measure { targets } if targets.is_empty() => {
                return Err(VizError::InvalidOperation {
                    message: "Measurement without targets".to_string(),
                });
            }
            _ => {}
        }
        self.operations.push(op);
        Ok(())
    }

    /// Appends multiple operations, stopping at the first invalid one.
    pub fn add_operations<I>(&mut self, ops: I) -> Result<(), VizError>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op)?;
        }
        Ok(())
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
///
/// Validation is deferred to [`CircuitBuilder::build`] so the chain stays infallible.
pub struct CircuitBuilder {
    num_qubits: usize,
    pending: Vec<Operation>,
}

impl CircuitBuilder {
    /// Creates a builder for a circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            pending: Vec::new(),
        }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.pending.push(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.pending.extend(ops);
        self
    }

    /// Validates every queued operation and returns the finished `Circuit`.
    pub fn build(self) -> Result<Circuit, VizError> {
        let mut circuit = Circuit::new(self.num_qubits);
        circuit.add_operations(self.pending)?;
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_qubits = self.num_qubits;
        let ops = &self.operations;
        let num_ops = ops.len();
        writeln!(f, "qviz::Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        if num_qubits == 0 {
            return Ok(());
        }

        const GATE_WIDTH: usize = 7; // e.g. "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the cell text; v_connect[row][time] the
        // connector drawn below that row.
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total = GATE_WIDTH - slen;
                let pre = total / 2;
                let post = total - pre;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre),
                    symbol,
                    H_WIRE.to_string().repeat(post)
                )
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Gate { target, gate } => {
                    if *gate != Gate::Identity {
                        op_grid[target.0][t] = format_gate(gate.symbol());
                    }
                }
                Operation::Controlled { control, target, gate } => {
                    let target_symbol = match gate {
                        Gate::X => "⊕",
                        other => other.symbol(),
                    };
                    op_grid[control.0][t] = format_gate("●");
                    op_grid[target.0][t] = format_gate(target_symbol);
                    let r_min = control.0.min(target.0);
                    let r_max = control.0.max(target.0);
                    for row in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row[t] = V_WIRE;
                    }
                    // Rows strictly between control and target get crossed.
                    for row in op_grid.iter_mut().take(r_max).skip(r_min + 1) {
                        row[t] = format_gate("┼");
                    }
                }
                Operation::Measure { targets } => {
                    for target in targets {
                        op_grid[target.0][t] = format_gate("M");
                    }
                }
            }
        }

        let labels: Vec<String> = (0..num_qubits).map(|r| format!("{}: ", QubitId(r))).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        for r in 0..num_qubits {
            write!(f, "{:<width$}", labels[r], width = label_width)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r + 1 < num_qubits {
                write!(f, "{}", " ".repeat(label_width))?;
                for t in 0..num_ops {
                    let pad = GATE_WIDTH - 1;
                    let pre = pad / 2;
                    write!(f, "{}{}{}", " ".repeat(pre), v_connect[r][t], " ".repeat(pad - pre))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
