mod common;

use approx::assert_abs_diff_eq;
use num_complex::Complex64;

use common::c;
use svsim_rs::state::{State, MAX_QUBITS};
use svsim_rs::SimError;

#[test]
fn test_zero_state() {
    for n in 1..6 {
        let state = State::zero_state(n).unwrap();
        assert_eq!(state.num_qubits(), n);
        assert_eq!(state.len(), 1 << n);
        assert_eq!(state.get(0).unwrap(), c(1.0, 0.0));
        for i in 1..state.len() {
            assert_eq!(state.get(i).unwrap(), c(0.0, 0.0));
        }
        assert_abs_diff_eq!(state.norm(), 1.0, epsilon = 1e-15);
    }
}

#[test]
fn test_zero_state_invalid_count() {
    assert_eq!(
        State::zero_state(0),
        Err(SimError::InvalidQubitCount { num_qubits: 0, max: MAX_QUBITS })
    );
    assert!(matches!(
        State::zero_state(MAX_QUBITS + 1),
        Err(SimError::InvalidQubitCount { .. })
    ));
}

#[test]
fn test_basis_state() {
    let state = State::basis_state(3, 5).unwrap();
    assert_eq!(state.get(5).unwrap(), c(1.0, 0.0));
    assert_eq!(state.basis_outcome(1e-10), Some(5));
    assert_eq!(
        State::basis_state(2, 4),
        Err(SimError::IndexOutOfRange { index: 4, len: 4 })
    );
}

#[test]
fn test_get_set_bounds() {
    let mut state = State::zero_state(2).unwrap();
    assert_eq!(state.get(4), Err(SimError::IndexOutOfRange { index: 4, len: 4 }));
    assert_eq!(
        state.set(7, c(1.0, 0.0)),
        Err(SimError::IndexOutOfRange { index: 7, len: 4 })
    );

    state.set(3, c(0.0, 1.0)).unwrap();
    assert_eq!(state.get(3).unwrap(), c(0.0, 1.0));
    // no implicit normalization
    assert_abs_diff_eq!(state.norm(), 2.0f64.sqrt(), epsilon = 1e-12);
    assert!(!state.is_normalized(1e-10));
}

#[test]
fn test_from_bitstring() {
    let state = State::from_bitstring("000").unwrap();
    assert_eq!(state.num_qubits(), 3);
    assert_eq!(state.basis_outcome(1e-10), Some(0));

    // "0110" is index 6: qubits 1 and 2 set
    let state = State::from_bitstring("0110").unwrap();
    assert_eq!(state.num_qubits(), 4);
    assert_eq!(state.basis_outcome(1e-10), Some(6));

    // qubit 0 is the rightmost character
    let state = State::from_bitstring("01").unwrap();
    assert_eq!(state.basis_outcome(1e-10), Some(1));
}

#[test]
fn test_from_bitstring_invalid() {
    let err = State::from_bitstring("non valid string").unwrap_err();
    assert_eq!(err, SimError::InvalidBitString("non valid string".to_string()));
    assert!(err.to_string().contains("received 'non valid string'"));
}

#[test]
fn test_from_amplitudes_deterministic() {
    let state = State::from_amplitudes(vec![c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)]).unwrap();
    assert_eq!(state.num_qubits(), 2);
    assert_eq!(state.basis_outcome(1e-10), Some(1));
}

#[test]
fn test_from_amplitudes_normalizes() {
    let raw: Vec<Complex64> = [1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]
        .iter()
        .map(|&x| c(x, 0.0))
        .collect();
    let state = State::from_amplitudes(raw).unwrap();
    assert_eq!(state.num_qubits(), 3);
    for i in 0..4 {
        assert_abs_diff_eq!(state.get(i).unwrap().re, 0.5, epsilon = 1e-12);
    }
    assert!(state.is_normalized(1e-12));
    assert_eq!(state.basis_outcome(1e-10), None);
}

#[test]
fn test_from_amplitudes_invalid() {
    assert_eq!(
        State::from_amplitudes(vec![c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)]),
        Err(SimError::NotPowerOfTwo { len: 3 })
    );
    assert_eq!(State::from_amplitudes(vec![]), Err(SimError::NotPowerOfTwo { len: 0 }));
    assert_eq!(State::from_amplitudes(vec![c(1.0, 0.0)]), Err(SimError::NotPowerOfTwo { len: 1 }));
    assert_eq!(State::from_amplitudes(vec![c(0.0, 0.0); 4]), Err(SimError::ZeroNorm));
}

#[test]
fn test_probs_and_basis_outcome_with_phase() {
    let state = State::from_amplitudes(vec![c(0.0, 0.0), c(0.0, -1.0)]).unwrap();
    assert_eq!(state.probs(), vec![0.0, 1.0]);
    // a global phase does not hide the outcome
    assert_eq!(state.basis_outcome(1e-10), Some(1));
}

#[test]
fn test_from_amplitudes_non_finite() {
    assert_eq!(
        State::from_amplitudes(vec![c(f64::NAN, 0.0), c(1.0, 0.0)]),
        Err(SimError::NonFiniteAmplitude)
    );
    assert_eq!(
        State::from_amplitudes(vec![c(0.0, 0.0), c(0.0, f64::INFINITY)]),
        Err(SimError::NonFiniteAmplitude)
    );
}

#[test]
fn test_max_qubits_fits_pointer_width() {
    assert!(MAX_QUBITS < usize::BITS as usize);
    assert!(State::zero_state(MAX_QUBITS + 1).is_err());
}
