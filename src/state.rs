use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{Result, SimError};
use crate::index::parse_basis;

/// Largest register the simulator will allocate (16 bytes per amplitude).
///
/// Capped below the pointer width so `1 << n` stays addressable.
pub const MAX_QUBITS: usize = if usize::BITS > 32 { 32 } else { usize::BITS as usize - 1 };

/// Tolerance used for normalization checks and basis-state detection.
pub const NORM_TOLERANCE: f64 = 1e-10;

/// State vector of a qubit register.
///
/// Amplitude `i` belongs to the basis state whose qubit `q` is bit `q` of `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    num_qubits: usize,
    data: Array1<Complex64>,
}

fn check_qubit_count(num_qubits: usize) -> Result<()> {
    if num_qubits == 0 || num_qubits > MAX_QUBITS {
        return Err(SimError::InvalidQubitCount {
            num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

impl State {
    /// Creates |0,0,...,0> state (first basis element = 1, rest = 0)
    pub fn zero_state(num_qubits: usize) -> Result<Self> {
        Self::basis_state(num_qubits, 0)
    }

    /// Creates the computational basis state `index`.
    pub fn basis_state(num_qubits: usize, index: usize) -> Result<Self> {
        check_qubit_count(num_qubits)?;
        let total = 1usize << num_qubits;
        if index >= total {
            return Err(SimError::out_of_range(index, total));
        }
        let mut data = Array1::zeros(total);
        data[index] = Complex64::new(1.0, 0.0);
        Ok(State { num_qubits, data })
    }

    /// Creates the basis state named by a binary label, qubit 0 rightmost.
    ///
    /// # Example
    /// ```
    /// use svsim_rs::State;
    /// let state = State::from_bitstring("0110").unwrap();
    /// assert_eq!(state.num_qubits(), 4);
    /// assert_eq!(state.get(6).unwrap().re, 1.0);
    /// ```
    pub fn from_bitstring(label: &str) -> Result<Self> {
        let (index, num_qubits) = parse_basis(label)?;
        Self::basis_state(num_qubits, index)
    }

    /// Creates a state from raw amplitudes, normalizing them if needed.
    ///
    /// The length must be a power of two (at least 2) and every amplitude
    /// finite.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Result<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::NotPowerOfTwo { len });
        }
        let num_qubits = len.trailing_zeros() as usize;
        check_qubit_count(num_qubits)?;

        let mut data = Array1::from(amplitudes);
        let norm = data.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
        if !norm.is_finite() {
            return Err(SimError::NonFiniteAmplitude);
        }
        if norm == 0.0 {
            return Err(SimError::ZeroNorm);
        }
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            data.mapv_inplace(|c| c / norm);
        }
        Ok(State { num_qubits, data })
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Length of the data vector (`2^n`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a register holds at least one qubit.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Amplitude of basis state `index`.
    pub fn get(&self, index: usize) -> Result<Complex64> {
        self.data
            .get(index)
            .copied()
            .ok_or_else(|| SimError::out_of_range(index, self.len()))
    }

    /// Overwrites the amplitude of basis state `index`. No renormalization.
    pub fn set(&mut self, index: usize, value: Complex64) -> Result<()> {
        let len = self.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or_else(|| SimError::out_of_range(index, len))?;
        *slot = value;
        Ok(())
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        self.data
            .as_slice()
            .expect("state vector is allocated in standard layout")
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        self.data
            .as_slice_mut()
            .expect("state vector is allocated in standard layout")
    }

    /// The amplitudes as an ndarray.
    pub fn data(&self) -> &Array1<Complex64> {
        &self.data
    }

    /// L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt()
    }

    /// Whether the norm is 1 within `tol`.
    pub fn is_normalized(&self, tol: f64) -> bool {
        (self.norm() - 1.0).abs() <= tol
    }

    /// Probability of every basis state.
    pub fn probs(&self) -> Vec<f64> {
        self.data.iter().map(|c| c.norm_sqr()).collect()
    }

    /// The basis index carrying all of the probability, if the state is a
    /// computational basis state up to a global phase.
    pub fn basis_outcome(&self, tol: f64) -> Option<usize> {
        let mut found = None;
        for (i, amp) in self.data.iter().enumerate() {
            let p = amp.norm_sqr();
            if (p - 1.0).abs() <= tol {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            } else if p > tol {
                return None;
            }
        }
        found
    }
}
