//! Probability views of a state vector.
//!
//! - [`probs`] - probability distribution over the computational basis,
//!   optionally marginalized onto a subset of qubits
//! - [`counts`] - labelled table of the outcomes with non-zero probability
//!
//! Nothing here samples or collapses the state.

use std::collections::BTreeMap;

use crate::error::{Result, SimError};
use crate::index::{extract_bits, format_basis};
use crate::state::State;

/// Probabilities below this are reported as absent by [`counts`].
const COUNT_CUTOFF: f64 = 1e-12;

/// Compute probability distribution over computational basis.
///
/// If `locs` is `None`, returns probabilities for all qubits.
/// If `locs` is `Some(&[...])`, returns marginal probabilities for the
/// specified qubits; bit `k` of the marginal index is qubit `locs[k]`.
/// `locs` may repeat a qubit but may not be longer than the register.
///
/// # Example
/// ```
/// use svsim_rs::{Circuit, probs::probs};
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.h(1).unwrap();
/// let state = circuit.run().unwrap();
/// let p = probs(&state, Some(&[1])).unwrap();
/// assert!((p[0] - 0.5).abs() < 1e-10);
/// assert!((p[1] - 0.5).abs() < 1e-10);
/// ```
pub fn probs(state: &State, locs: Option<&[usize]>) -> Result<Vec<f64>> {
    match locs {
        None => Ok(state.probs()),
        Some(locs) => marginal_probs(state, locs),
    }
}

fn check_locs(state: &State, locs: &[usize]) -> Result<()> {
    // repeats are allowed, but the marginal has 2^len entries
    if locs.len() > state.num_qubits() {
        return Err(SimError::TooManyLocations {
            count: locs.len(),
            num_qubits: state.num_qubits(),
        });
    }
    match locs.iter().find(|&&loc| loc >= state.num_qubits()) {
        Some(&loc) => Err(SimError::invalid_qubit(loc, state.num_qubits())),
        None => Ok(()),
    }
}

/// Compute marginal probabilities for a subset of qubits.
fn marginal_probs(state: &State, locs: &[usize]) -> Result<Vec<f64>> {
    check_locs(state, locs)?;
    let mut prob_vec = vec![0.0; 1usize << locs.len()];
    for (flat_idx, amp) in state.amplitudes().iter().enumerate() {
        prob_vec[extract_bits(flat_idx, locs)] += amp.norm_sqr();
    }
    Ok(prob_vec)
}

/// Outcomes with non-zero probability, keyed by basis label.
///
/// With `locs == None` the labels cover every qubit; otherwise they cover
/// `locs` only, with `locs[0]` as the rightmost character.
///
/// # Example
/// ```
/// use svsim_rs::{Circuit, probs::counts};
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.h(0).unwrap().cx(0, 1).unwrap();
/// let table = counts(&circuit.run().unwrap(), None).unwrap();
/// assert_eq!(table.keys().collect::<Vec<_>>(), vec!["00", "11"]);
/// ```
pub fn counts(state: &State, locs: Option<&[usize]>) -> Result<BTreeMap<String, f64>> {
    let width = locs.map_or(state.num_qubits(), <[usize]>::len);
    let distribution = probs(state, locs)?;
    Ok(distribution
        .into_iter()
        .enumerate()
        .filter(|&(_, p)| p > COUNT_CUTOFF)
        .map(|(idx, p)| (format_basis(idx, width), p))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_marginal_rejects_bad_loc() {
        let state = State::zero_state(2).unwrap();
        assert_eq!(
            probs(&state, Some(&[0, 2])),
            Err(SimError::invalid_qubit(2, 2))
        );
    }

    #[test]
    fn test_marginal_empty_locs() {
        let state = State::zero_state(3).unwrap();
        assert_eq!(probs(&state, Some(&[])).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_counts_skips_zero_outcomes() {
        let state = State::from_amplitudes(vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        ])
        .unwrap();
        let table = counts(&state, None).unwrap();
        assert_eq!(table.len(), 2);
        assert!((table["01"] - 0.5).abs() < 1e-12);
        assert!((table["11"] - 0.5).abs() < 1e-12);

        // qubit 0 is always 1
        let table = counts(&state, Some(&[0])).unwrap();
        assert_eq!(table.len(), 1);
        assert!((table["1"] - 1.0).abs() < 1e-12);
    }
}
