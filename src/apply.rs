use tracing::{debug, trace};

use crate::circuit::{Circuit, CircuitElement};
use crate::error::{Result, SimError};
use crate::gate::Gate;
use crate::index::qubit_mask;
use crate::instruct::{instruct_diagonal, instruct_flip, instruct_single};
use crate::state::State;

/// Check a target and its controls against a register of `num_qubits`.
///
/// # Errors
/// - [`SimError::InvalidQubitIndex`] if any index is `>= num_qubits`
/// - [`SimError::ConflictingQubitRole`] if the target is also a control
pub fn check_locs(num_qubits: usize, target: usize, controls: &[usize]) -> Result<()> {
    for &loc in std::iter::once(&target).chain(controls) {
        if loc >= num_qubits {
            return Err(SimError::invalid_qubit(loc, num_qubits));
        }
    }
    if controls.contains(&target) {
        return Err(SimError::ConflictingQubitRole { qubit: target });
    }
    Ok(())
}

/// Apply `gate` to qubit `target` of `state`, conditioned on every qubit in
/// `controls` being |1⟩.
///
/// Indices are validated before the state is touched, so on error the state
/// is unchanged.
///
/// # Example
/// ```
/// use svsim_rs::{apply_gate, Gate, State};
///
/// let mut state = State::zero_state(2).unwrap();
/// apply_gate(&mut state, &Gate::H, 0, &[]).unwrap();
/// apply_gate(&mut state, &Gate::X, 1, &[0]).unwrap();
/// // Bell state (|00⟩ + |11⟩)/√2
/// assert!((state.get(0).unwrap().re - 0.5f64.sqrt()).abs() < 1e-12);
/// assert!((state.get(3).unwrap().re - 0.5f64.sqrt()).abs() < 1e-12);
/// ```
pub fn apply_gate(state: &mut State, gate: &Gate, target: usize, controls: &[usize]) -> Result<()> {
    let num_qubits = state.num_qubits();
    check_locs(num_qubits, target, controls)?;
    trace!(%gate, target, ?controls, "apply gate");

    let ctrl_mask = qubit_mask(controls);
    let amplitudes = state.amplitudes_mut();
    match gate {
        Gate::I => {}
        Gate::X => instruct_flip(amplitudes, num_qubits, target, ctrl_mask),
        g if g.is_diagonal() => {
            let m = g.matrix2();
            instruct_diagonal(amplitudes, num_qubits, [m[0][0], m[1][1]], target, ctrl_mask);
        }
        g => instruct_single(amplitudes, num_qubits, &g.matrix2(), target, ctrl_mask),
    }
    Ok(())
}

/// Apply every element of `circuit` to `state` in order. Barriers are skipped.
///
/// # Errors
/// Returns [`SimError::QubitCountMismatch`] if the state and the circuit act
/// on different registers.
pub fn apply_inplace(circuit: &Circuit, state: &mut State) -> Result<()> {
    if state.num_qubits() != circuit.num_qubits() {
        return Err(SimError::QubitCountMismatch {
            expected: circuit.num_qubits(),
            actual: state.num_qubits(),
        });
    }
    debug!(
        num_qubits = circuit.num_qubits(),
        elements = circuit.len(),
        "applying circuit"
    );
    for element in circuit.elements() {
        match element {
            CircuitElement::Gate(pg) => apply_gate(state, &pg.gate, pg.target, &pg.controls)?,
            CircuitElement::Barrier(_) => {}
        }
    }
    Ok(())
}

/// Apply a circuit to a copy of `state` and return the result.
pub fn apply(circuit: &Circuit, state: &State) -> Result<State> {
    let mut result = state.clone();
    apply_inplace(circuit, &mut result)?;
    Ok(result)
}
