// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

use super::error::VizError;

/// The pure state of an n-qubit register.
///
/// Holds `2^n` complex amplitudes. Index `i` is the computational basis state
/// whose label is the binary spelling of `i`, most significant qubit first, so
/// for two qubits the order is `|00⟩, |01⟩, |10⟩, |11⟩`.
///
/// A `StateVector` is never mutated after the simulator hands it out. Unit
/// norm is expected but not enforced here; see
/// [`check_normalization`](crate::validation::check_normalization).
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Builds a state from raw amplitudes.
    ///
    /// # Errors
    /// `VizError::InvalidState` if the length is zero or not a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Result<Self, VizError> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(VizError::InvalidState {
                message: format!("State vector length {} is not a non-zero power of two", len),
            });
        }
        Ok(Self {
            num_qubits: len.trailing_zeros() as usize,
            amplitudes,
        })
    }

    /// Convenience for real-valued states, mostly used in tests and examples.
    pub fn from_real(values: &[f64]) -> Result<Self, VizError> {
        Self::from_amplitudes(values.iter().map(|&re| Complex::new(re, 0.0)).collect())
    }

    /// The all-zero basis state `|0...0⟩`.
    pub fn zero_state(num_qubits: usize) -> Result<Self, VizError> {
        let dim = u32::try_from(num_qubits)
            .ok()
            .and_then(|q| 1usize.checked_shl(q))
            .ok_or_else(|| VizError::InvalidState {
                message: format!("{} qubits overflow the state vector dimension", num_qubits),
            })?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self { amplitudes, num_qubits })
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Number of qubits (`log2(dim)`).
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Squared magnitude of every amplitude, in basis order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// `Σ|c_i|²`
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_power_of_two() {
        let err = StateVector::from_real(&[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, VizError::InvalidState { .. }));
        assert!(StateVector::from_amplitudes(Vec::new()).is_err());
    }

    #[test]
    fn test_zero_state_layout() -> Result<(), VizError> {
        let state = StateVector::zero_state(2)?;
        assert_eq!(state.dim(), 4);
        assert_eq!(state.num_qubits(), 2);
        assert_eq!(state.amplitudes()[0], Complex::new(1.0, 0.0));
        assert!(state.amplitudes()[1..].iter().all(|c| c.is_zero()));
        Ok(())
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_zero_state_rejects_overflowing_width() {
        // Truncating 2^32 + 1 to u32 would silently build a one-qubit state.
        assert!(matches!(
            StateVector::zero_state((1u64 << 32) as usize + 1),
            Err(VizError::InvalidState { .. })
        ));
        assert!(StateVector::zero_state(usize::BITS as usize).is_err());
    }

    #[test]
    fn test_probabilities_and_norm() -> Result<(), VizError> {
        let state = StateVector::from_amplitudes(vec![
            Complex::new(0.6, 0.0),
            Complex::new(0.0, 0.8),
        ])?;
        let probs = state.probabilities();
        assert!((probs[0] - 0.36).abs() < 1e-12);
        assert!((probs[1] - 0.64).abs() < 1e-12);
        assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
        assert_eq!(state.num_qubits(), 1);
        Ok(())
    }
}
