//! Prebuilt circuits: entangled states and small reversible arithmetic.
//!
//! Registers are little-endian throughout: bit `i` of an input number sits on
//! the `i`-th qubit of its register.

use crate::apply::check_locs;
use crate::circuit::Circuit;
use crate::error::{Result, SimError};
use crate::index::bit_at;
use crate::state::{State, NORM_TOLERANCE};

// =============================================================================
// Entangled states
// =============================================================================

/// The four maximally entangled two-qubit states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BellState {
    /// (|00⟩ + |11⟩)/√2
    PhiPlus,
    /// (|00⟩ - |11⟩)/√2
    PhiMinus,
    /// (|01⟩ + |10⟩)/√2
    PsiPlus,
    /// (|01⟩ - |10⟩)/√2
    PsiMinus,
}

/// Entangle `q1` and `q2`: H on `q1`, then CX from `q1` to `q2`.
pub fn bell_pair(circuit: &mut Circuit, q1: usize, q2: usize) -> Result<&mut Circuit> {
    check_locs(circuit.num_qubits(), q2, &[q1])?;
    circuit.h(q1)?.cx(q1, q2)
}

/// Two-qubit circuit preparing one of the Bell states from |00⟩.
pub fn bell_circuit(kind: BellState) -> Result<Circuit> {
    let mut circuit = Circuit::new(2)?;
    if matches!(kind, BellState::PsiPlus | BellState::PsiMinus) {
        circuit.x(1)?;
    }
    bell_pair(&mut circuit, 0, 1)?;
    // the minus variants carry a relative sign on the terms where qubit 1 is set
    if matches!(kind, BellState::PhiMinus | BellState::PsiMinus) {
        circuit.z(1)?;
    }
    Ok(circuit)
}

/// n-qubit GHZ state (|0...0⟩ + |1...1⟩)/√2.
pub fn ghz_circuit(n: usize) -> Result<Circuit> {
    let mut circuit = Circuit::new(n)?;
    circuit.h(0)?;
    for i in 0..n - 1 {
        circuit.cx(i, i + 1)?;
    }
    Ok(circuit)
}

/// H on every qubit: equal probability for all `2^n` outcomes.
pub fn uniform_superposition(n: usize) -> Result<Circuit> {
    let mut circuit = Circuit::new(n)?;
    for q in 0..n {
        circuit.h(q)?;
    }
    Ok(circuit)
}

// =============================================================================
// Reversible arithmetic
// =============================================================================

/// Number of bits needed to write `value` (at least one).
fn bit_len(value: usize) -> usize {
    (usize::BITS - value.leading_zeros()).max(1) as usize
}

/// Basis index of a deterministic result.
fn certain_outcome(state: &State) -> Result<usize> {
    state
        .basis_outcome(NORM_TOLERANCE)
        .ok_or(SimError::IndeterminateOutcome)
}

/// Loads `value` into the register starting at qubit `offset`.
fn load(circuit: &mut Circuit, value: usize, offset: usize, len: usize) -> Result<()> {
    for i in (0..len).filter(|&i| bit_at(value, i)) {
        circuit.x(offset + i)?;
    }
    Ok(())
}

/// Half adder on qubits `a = 0`, `b = 1`, `sum = 2`, `carry = 3`.
///
/// | a | b | sum | carry |
/// |:-:|:-:|:---:|:-----:|
/// | 0 | 0 |  0  |   0   |
/// | 0 | 1 |  1  |   0   |
/// | 1 | 0 |  1  |   0   |
/// | 1 | 1 |  0  |   1   |
pub fn half_adder_circuit(a: bool, b: bool) -> Result<Circuit> {
    let mut circuit = Circuit::new(4)?;
    load(&mut circuit, usize::from(a) | usize::from(b) << 1, 0, 2)?;
    circuit.barrier()?;
    // xor between a and b
    circuit.cx(0, 2)?.cx(1, 2)?;
    // and between a and b
    circuit.ccx(0, 1, 3)?;
    Ok(circuit)
}

/// Runs the half adder and returns `(sum, carry)`.
pub fn half_adder(a: bool, b: bool) -> Result<(bool, bool)> {
    let outcome = certain_outcome(&half_adder_circuit(a, b)?.run()?)?;
    Ok((bit_at(outcome, 2), bit_at(outcome, 3)))
}

/// Register layout of [`adder_circuit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdderLayout {
    pub a_len: usize,
    pub b_len: usize,
    pub result_len: usize,
}

impl AdderLayout {
    fn new(a: usize, b: usize) -> Self {
        let a_len = bit_len(a);
        let b_len = bit_len(b);
        AdderLayout {
            a_len,
            b_len,
            result_len: a_len.max(b_len) + 1,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.a_len + self.b_len + self.result_len
    }

    /// First qubit of the result register.
    pub fn result_offset(&self) -> usize {
        self.a_len + self.b_len
    }
}

/// Ripple-carry adder on registers `a | b | result`.
///
/// Each result qubit enters its step holding the incoming carry; the step
/// XORs the majority of (a, b, carry) into the next result qubit and then
/// XORs a and b into the current one.
pub fn adder_circuit(a: usize, b: usize) -> Result<(Circuit, AdderLayout)> {
    let layout = AdderLayout::new(a, b);
    let mut circuit = Circuit::new(layout.num_qubits())?;
    load(&mut circuit, a, 0, layout.a_len)?;
    load(&mut circuit, b, layout.a_len, layout.b_len)?;
    circuit.barrier()?;

    for i in 0..layout.result_len - 1 {
        let a_bit = (i < layout.a_len).then_some(i);
        let b_bit = (i < layout.b_len).then_some(layout.a_len + i);
        let r = layout.result_offset() + i;
        let carry = r + 1;

        // carry = ab ^ ac ^ bc, with c still held in r
        if let Some(qa) = a_bit {
            circuit.ccx(qa, r, carry)?;
        }
        if let Some(qb) = b_bit {
            circuit.ccx(qb, r, carry)?;
        }
        if let (Some(qa), Some(qb)) = (a_bit, b_bit) {
            circuit.ccx(qa, qb, carry)?;
        }
        // r = a ^ b ^ c
        if let Some(qa) = a_bit {
            circuit.cx(qa, r)?;
        }
        if let Some(qb) = b_bit {
            circuit.cx(qb, r)?;
        }
    }
    Ok((circuit, layout))
}

/// Adds two numbers with [`adder_circuit`].
///
/// # Example
/// ```
/// use svsim_rs::easybuild::add;
/// assert_eq!(add(5, 3).unwrap(), 8);
/// ```
pub fn add(a: usize, b: usize) -> Result<usize> {
    let (circuit, layout) = adder_circuit(a, b)?;
    let outcome = certain_outcome(&circuit.run()?)?;
    Ok(outcome >> layout.result_offset())
}

/// Boolean inner product `(a_0 & b_0) ^ (a_1 & b_1) ^ ...`.
///
/// Qubits: `a` register, `b` register, then one result qubit.
pub fn inner_product_circuit(a: usize, b: usize) -> Result<Circuit> {
    let a_len = bit_len(a);
    let b_len = bit_len(b);
    let result = a_len + b_len;
    let mut circuit = Circuit::new(result + 1)?;
    load(&mut circuit, a, 0, a_len)?;
    load(&mut circuit, b, a_len, b_len)?;
    circuit.barrier()?;
    for i in 0..a_len.min(b_len) {
        circuit.ccx(i, a_len + i, result)?;
    }
    Ok(circuit)
}

/// Runs [`inner_product_circuit`] and reads the result qubit.
pub fn boolean_inner_product(a: usize, b: usize) -> Result<bool> {
    let circuit = inner_product_circuit(a, b)?;
    let result = circuit.num_qubits() - 1;
    let outcome = certain_outcome(&circuit.run()?)?;
    Ok(bit_at(outcome, result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_len() {
        assert_eq!(bit_len(0), 1);
        assert_eq!(bit_len(1), 1);
        assert_eq!(bit_len(2), 2);
        assert_eq!(bit_len(255), 8);
    }

    #[test]
    fn test_adder_layout() {
        let layout = AdderLayout::new(5, 1);
        assert_eq!(layout, AdderLayout { a_len: 3, b_len: 1, result_len: 4 });
        assert_eq!(layout.num_qubits(), 8);
        assert_eq!(layout.result_offset(), 4);
    }

    #[test]
    fn test_certain_outcome_rejects_superposition() {
        let state = uniform_superposition(1).unwrap().run().unwrap();
        assert_eq!(certain_outcome(&state), Err(SimError::IndeterminateOutcome));
    }
}
