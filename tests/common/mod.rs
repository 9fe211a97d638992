//! Shared test utilities for svsim-rs integration tests.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::Rng;

use svsim_rs::gate::Gate;
use svsim_rs::index::bit_at;
use svsim_rs::state::State;

#[allow(dead_code)]
pub const ATOL: f64 = 1e-10;

/// Route `tracing` output through the test harness. Safe to call repeatedly.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

#[allow(dead_code)]
pub fn assert_state_approx(result: &State, expected: &[Complex64]) {
    assert_eq!(result.len(), expected.len());
    for (i, (r, e)) in result.amplitudes().iter().zip(expected.iter()).enumerate() {
        assert!(
            (r - e).norm() < ATOL,
            "State mismatch at index {}: got {:?}, expected {:?}",
            i,
            r,
            e
        );
    }
}

#[allow(dead_code)]
pub fn assert_states_close(a: &State, b: &State) {
    assert_state_approx(a, b.amplitudes());
}

/// Normalized state with uniformly drawn real and imaginary parts.
#[allow(dead_code)]
pub fn random_state(n: usize, rng: &mut StdRng) -> State {
    let amplitudes = (0..1usize << n)
        .map(|_| c(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();
    State::from_amplitudes(amplitudes).unwrap()
}

/// Catalog gate drawn at random, with a random angle for parameterized ones.
#[allow(dead_code)]
pub fn random_gate(rng: &mut StdRng) -> Gate {
    let theta = rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI);
    match rng.gen_range(0..11) {
        0 => Gate::I,
        1 => Gate::X,
        2 => Gate::Y,
        3 => Gate::Z,
        4 => Gate::H,
        5 => Gate::S,
        6 => Gate::T,
        7 => Gate::Phase(theta),
        8 => Gate::Rx(theta),
        9 => Gate::Ry(theta),
        _ => Gate::Rz(theta),
    }
}

/// Full `2^n × 2^n` operator of a controlled single-qubit gate.
///
/// Reference for the bit-masked engine: entry (row, col) is non-zero only
/// when row and col agree outside the target bit.
#[allow(dead_code)]
pub fn dense_operator(n: usize, gate: &Gate, target: usize, controls: &[usize]) -> Array2<Complex64> {
    let m = gate.matrix();
    let total = 1usize << n;
    let target_mask = 1usize << target;
    Array2::from_shape_fn((total, total), |(row, col)| {
        if (row ^ col) & !target_mask != 0 {
            return c(0.0, 0.0);
        }
        let active = controls.iter().all(|&q| bit_at(col, q));
        if active {
            m[[usize::from(bit_at(row, target)), usize::from(bit_at(col, target))]]
        } else if row == col {
            c(1.0, 0.0)
        } else {
            c(0.0, 0.0)
        }
    })
}

/// Apply a gate through the dense reference operator.
#[allow(dead_code)]
pub fn dense_apply(state: &State, gate: &Gate, target: usize, controls: &[usize]) -> Vec<Complex64> {
    let op = dense_operator(state.num_qubits(), gate, target, controls);
    let v: Array1<Complex64> = state.data().clone();
    op.dot(&v).to_vec()
}
