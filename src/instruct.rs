//! Primitive amplitude operations for state vector simulation.
//!
//! These kernels touch the amplitude slice directly and do not validate
//! qubit indices; [`crate::apply`] checks them before dispatching here.

use num_complex::Complex64;

use crate::gate::Matrix2;
use crate::index::FixedBitRange;

/// Apply a 2x2 unitary gate to a pair of amplitudes at indices i and j.
///
/// The gate matrix is [[a, b], [c, d]] and transforms:
/// - new_i = a * state[i] + b * state[j]
/// - new_j = c * state[i] + d * state[j]
///
/// # Example
/// ```
/// use num_complex::Complex64;
/// use svsim_rs::gate::PAULI_X;
/// use svsim_rs::instruct::u1rows;
///
/// let mut state = vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
/// u1rows(&mut state, 0, 1, &PAULI_X);
/// // Now state is |1⟩
/// assert!((state[0].norm() - 0.0).abs() < 1e-10);
/// assert!((state[1].norm() - 1.0).abs() < 1e-10);
/// ```
#[inline]
pub fn u1rows(state: &mut [Complex64], i: usize, j: usize, gate: &Matrix2) {
    let old_i = state[i];
    let old_j = state[j];

    state[i] = gate[0][0] * old_i + gate[0][1] * old_j;
    state[j] = gate[1][0] * old_i + gate[1][1] * old_j;
}

/// Multiply an amplitude at index i by a scalar factor.
#[inline]
pub fn mulrow(state: &mut [Complex64], i: usize, factor: Complex64) {
    state[i] *= factor;
}

/// Representative indices for a gate on `loc` under `ctrl_mask`: target bit
/// clear, every control bit set.
fn pair_range(num_qubits: usize, loc: usize, ctrl_mask: usize) -> FixedBitRange {
    FixedBitRange::new(num_qubits, ctrl_mask | (1usize << loc), ctrl_mask)
}

/// Apply a general 2x2 gate to qubit `loc`, conditioned on every qubit in
/// `ctrl_mask` being |1⟩.
///
/// Visits `2^(n-1-k)` amplitude pairs for `k` distinct controls; every other
/// amplitude is left as is.
///
/// # Example
/// ```
/// use num_complex::Complex64;
/// use svsim_rs::gate::HADAMARD;
/// use svsim_rs::instruct::instruct_single;
///
/// // H on qubit 1 of |00⟩ gives (|00⟩ + |10⟩)/√2: indices 0 and 2
/// let mut state = vec![Complex64::new(0.0, 0.0); 4];
/// state[0] = Complex64::new(1.0, 0.0);
/// instruct_single(&mut state, 2, &HADAMARD, 1, 0);
/// assert!((state[0].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// assert!((state[2].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// ```
pub fn instruct_single(
    state: &mut [Complex64],
    num_qubits: usize,
    gate: &Matrix2,
    loc: usize,
    ctrl_mask: usize,
) {
    debug_assert_eq!(state.len(), 1usize << num_qubits);
    let step = 1usize << loc;
    for i in pair_range(num_qubits, loc, ctrl_mask) {
        u1rows(state, i, i | step, gate);
    }
}

/// Apply Pauli-X to qubit `loc` by swapping each amplitude pair.
pub fn instruct_flip(state: &mut [Complex64], num_qubits: usize, loc: usize, ctrl_mask: usize) {
    debug_assert_eq!(state.len(), 1usize << num_qubits);
    let step = 1usize << loc;
    for i in pair_range(num_qubits, loc, ctrl_mask) {
        state.swap(i, i | step);
    }
}

/// Apply a diagonal gate diag(phases[0], phases[1]) to qubit `loc`.
///
/// Factors equal to 1 are skipped, so Z, S, T and Phase only touch the
/// |1⟩ half of each pair.
pub fn instruct_diagonal(
    state: &mut [Complex64],
    num_qubits: usize,
    phases: [Complex64; 2],
    loc: usize,
    ctrl_mask: usize,
) {
    debug_assert_eq!(state.len(), 1usize << num_qubits);
    let one = Complex64::new(1.0, 0.0);
    let step = 1usize << loc;
    let [p0, p1] = phases;
    for i in pair_range(num_qubits, loc, ctrl_mask) {
        if p0 != one {
            mulrow(state, i, p0);
        }
        if p1 != one {
            mulrow(state, i | step, p1);
        }
    }
}
