// src/format/mod.rs

//! Turns a state vector into the equation shown above the circuit.
//!
//! The output reads `|ψ⟩ = c₀|00⟩ + c₁|01⟩ + ...` with:
//! - amplitudes of magnitude below [`AMPLITUDE_EPSILON`] dropped entirely,
//! - real coefficients printed with at most two decimals and no trailing zeros,
//! - complex coefficients printed as `(re+imi)` / `(re-imi)`,
//! - a real coefficient printing as exactly `1` elided,
//! - terms joined by `" + "` in basis order,
//! - `|ψ⟩ = 0` when nothing survives.
//!
//! Formatting is a pure function of its input.

use num_complex::Complex;

use crate::core::{StateVector, VizError, AMPLITUDE_EPSILON, DEFAULT_QUBITS};

/// Glyph set used for the state name and the basis kets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// `|ψ⟩`, `|01⟩`
    #[default]
    Unicode,
    /// `|\psi\rangle`, `|01\rangle`
    Latex,
}

impl Notation {
    fn ket(&self, inner: &str) -> String {
        match self {
            Notation::Unicode => format!("|{}⟩", inner),
            Notation::Latex => format!("|{}\\rangle", inner),
        }
    }

    fn psi(&self) -> &'static str {
        match self {
            Notation::Unicode => "ψ",
            Notation::Latex => "\\psi",
        }
    }
}

/// Binary spelling of `index`, zero-padded to `qubits` digits.
pub fn basis_bits(index: usize, qubits: usize) -> String {
    format!("{:0width$b}", index, width = qubits)
}

/// The ket for basis state `index` of a `qubits`-qubit register, e.g. `|10⟩`.
pub fn basis_label(index: usize, qubits: usize, notation: Notation) -> String {
    notation.ket(&basis_bits(index, qubits))
}

/// Formats one real number: two decimals, then trailing zeros and a trailing
/// point removed. The sign is kept, so `-0.001` prints as `-0`.
fn format_part(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Formats a single amplitude as an equation coefficient.
///
/// Returns `None` for amplitudes treated as numerical noise. The elision of a
/// unit coefficient happens at term assembly, not here, so `1` is returned as
/// `"1"`.
pub fn format_coefficient(amplitude: Complex<f64>) -> Option<String> {
    if amplitude.norm() < AMPLITUDE_EPSILON {
        return None;
    }
    if amplitude.im.abs() < AMPLITUDE_EPSILON {
        return Some(format_part(amplitude.re));
    }
    let re = format_part(amplitude.re);
    let im = format_part(amplitude.im);
    // A negative imaginary part carries its own minus sign.
    let sign = if amplitude.im >= 0.0 { "+" } else { "" };
    Some(format!("({}{}{}i)", re, sign, im))
}

/// Configurable equation formatter.
///
/// The default formats two-qubit states in Unicode notation, which is what
/// [`format_state`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquationFormatter {
    qubits: usize,
    notation: Notation,
}

impl Default for EquationFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_QUBITS)
    }
}

impl EquationFormatter {
    /// A formatter for `qubits`-qubit states (`2^qubits` amplitudes).
    pub fn new(qubits: usize) -> Self {
        Self {
            qubits,
            notation: Notation::default(),
        }
    }

    /// Switches the output notation.
    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    /// Number of qubits this formatter expects.
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Formats raw amplitudes.
    ///
    /// # Errors
    /// `VizError::InvalidState` unless `amplitudes.len() == 2^qubits`.
    pub fn format(&self, amplitudes: &[Complex<f64>]) -> Result<String, VizError> {
        let expected = u32::try_from(self.qubits)
            .ok()
            .and_then(|q| 1usize.checked_shl(q))
            .filter(|_| self.qubits > 0);
        if expected != Some(amplitudes.len()) {
            return Err(VizError::InvalidState {
                message: format!(
                    "Expected 2^{} amplitudes for a {}-qubit equation, got {}",
                    self.qubits,
                    self.qubits,
                    amplitudes.len()
                ),
            });
        }

        let terms: Vec<String> = amplitudes
            .iter()
            .enumerate()
            .filter_map(|(index, amp)| {
                let coeff = format_coefficient(*amp)?;
                let label = basis_label(index, self.qubits, self.notation);
                Some(if coeff == "1" { label } else { format!("{}{}", coeff, label) })
            })
            .collect();

        let lhs = self.notation.ket(self.notation.psi());
        if terms.is_empty() {
            return Ok(format!("{} = 0", lhs));
        }
        Ok(format!("{} = {}", lhs, terms.join(" + ")))
    }

    /// Formats a simulator state.
    pub fn format_state_vector(&self, state: &StateVector) -> Result<String, VizError> {
        self.format(state.amplitudes())
    }
}

/// Formats a two-qubit state (exactly four amplitudes) in Unicode notation.
pub fn format_state(amplitudes: &[Complex<f64>]) -> Result<String, VizError> {
    EquationFormatter::default().format(amplitudes)
}
