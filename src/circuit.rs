use std::fmt;

use tracing::{debug, trace};

use crate::apply::{apply_inplace, check_locs};
use crate::error::{Result, SimError};
use crate::gate::Gate;
use crate::state::State;

/// A gate placed on a target qubit, conditioned on zero or more controls.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedGate {
    pub gate: Gate,
    pub target: usize,
    pub controls: Vec<usize>,
}

impl PositionedGate {
    /// Creates a new PositionedGate.
    pub fn new(gate: Gate, target: usize, controls: Vec<usize>) -> Self {
        PositionedGate {
            gate,
            target,
            controls,
        }
    }

    /// Returns all locations (control locations followed by the target).
    pub fn all_locs(&self) -> Vec<usize> {
        let mut locs = self.controls.clone();
        locs.push(self.target);
        locs
    }
}

/// A synchronization marker with no computational effect.
///
/// An empty qubit list spans the whole register.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Barrier {
    pub qubits: Vec<usize>,
}

/// Elements that can appear in a circuit sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitElement {
    Gate(PositionedGate),
    Barrier(Barrier),
}

/// Place a gate on a target qubit (no controls).
///
/// # Example
/// ```
/// use svsim_rs::circuit::{put, CircuitElement};
/// use svsim_rs::gate::Gate;
/// let elem = put(0, Gate::H);
/// if let CircuitElement::Gate(pg) = elem {
///     assert_eq!(pg.target, 0);
///     assert!(pg.controls.is_empty());
/// }
/// ```
pub fn put(target: usize, gate: Gate) -> CircuitElement {
    CircuitElement::Gate(PositionedGate::new(gate, target, vec![]))
}

/// Place a gate that fires only when every control qubit is |1⟩.
///
/// # Example
/// ```
/// use svsim_rs::circuit::{control, CircuitElement};
/// use svsim_rs::gate::Gate;
/// let elem = control(vec![0], 1, Gate::X);
/// if let CircuitElement::Gate(cnot) = elem {
///     assert_eq!(cnot.controls, vec![0]);
///     assert_eq!(cnot.target, 1);
/// }
/// ```
pub fn control(controls: Vec<usize>, target: usize, gate: Gate) -> CircuitElement {
    CircuitElement::Gate(PositionedGate::new(gate, target, controls))
}

/// Place a barrier across `qubits` (all qubits when empty).
pub fn barrier(qubits: Vec<usize>) -> CircuitElement {
    CircuitElement::Barrier(Barrier { qubits })
}

/// A quantum circuit: an append-only log of gates and barriers on a qubit
/// register, plus the state every run starts from.
///
/// `run` borrows the circuit immutably, so the log cannot change while a run
/// is in progress and every run starts over from the initial state.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    initial: State,
    elements: Vec<CircuitElement>,
}

impl Circuit {
    /// Creates an empty circuit whose runs start from |0...0⟩.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidQubitCount`] for `num_qubits == 0` or a
    /// register too large to allocate.
    pub fn new(num_qubits: usize) -> Result<Self> {
        Ok(Self::from_state(State::zero_state(num_qubits)?))
    }

    /// Creates an empty circuit whose runs start from `initial`.
    pub fn from_state(initial: State) -> Self {
        Circuit {
            num_qubits: initial.num_qubits(),
            initial,
            elements: Vec::new(),
        }
    }

    /// Creates an empty circuit starting from the basis state named by
    /// `label` (qubit 0 rightmost).
    pub fn from_bitstring(label: &str) -> Result<Self> {
        Ok(Self::from_state(State::from_bitstring(label)?))
    }

    /// Creates a circuit from a list of elements, validating each of them.
    pub fn with_elements(num_qubits: usize, elements: Vec<CircuitElement>) -> Result<Self> {
        let mut circuit = Self::new(num_qubits)?;
        for element in elements {
            circuit.append(element)?;
        }
        Ok(circuit)
    }

    /// Returns the number of qubits in the circuit.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns the number of recorded elements (gates and barriers).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no element has been recorded.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of recorded gates, barriers excluded.
    pub fn gate_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, CircuitElement::Gate(_)))
            .count()
    }

    /// The recorded elements, in application order.
    pub fn elements(&self) -> &[CircuitElement] {
        &self.elements
    }

    /// The state every run starts from.
    pub fn initial_state(&self) -> &State {
        &self.initial
    }

    /// Removes every recorded element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    fn check_qubit(&self, loc: usize) -> Result<()> {
        if loc >= self.num_qubits {
            return Err(SimError::invalid_qubit(loc, self.num_qubits));
        }
        Ok(())
    }

    fn check_element(&self, element: &CircuitElement) -> Result<()> {
        match element {
            CircuitElement::Gate(pg) => check_locs(self.num_qubits, pg.target, &pg.controls),
            CircuitElement::Barrier(b) => b.qubits.iter().try_for_each(|&q| self.check_qubit(q)),
        }
    }

    /// Validates `element` and appends it to the log.
    ///
    /// # Errors
    /// - [`SimError::InvalidQubitIndex`] if any qubit is out of range
    /// - [`SimError::ConflictingQubitRole`] if the target is also a control
    ///
    /// The log is left untouched on error.
    pub fn append(&mut self, element: CircuitElement) -> Result<&mut Self> {
        self.check_element(&element)?;
        trace!(?element, "append");
        self.elements.push(element);
        Ok(self)
    }

    /// Appends `gate` on `target` with no controls.
    pub fn put(&mut self, gate: Gate, target: usize) -> Result<&mut Self> {
        self.append(put(target, gate))
    }

    /// Appends `gate` on `target`, conditioned on every control being |1⟩.
    pub fn control(&mut self, gate: Gate, controls: &[usize], target: usize) -> Result<&mut Self> {
        self.append(control(controls.to_vec(), target, gate))
    }

    /// Identity, recorded but a no-op when run.
    pub fn i(&mut self, target: usize) -> Result<&mut Self> {
        self.put(Gate::I, target)
    }

    /// Bit flip.
    pub fn x(&mut self, target: usize) -> Result<&mut Self> {
        self.put(Gate::X, target)
    }

    /// Pauli-Y.
    pub fn y(&mut self, target: usize) -> Result<&mut Self> {
        self.put(Gate::Y, target)
    }

    /// Phase flip.
    pub fn z(&mut self, target: usize) -> Result<&mut Self> {
        self.put(Gate::Z, target)
    }

    /// Hadamard.
    pub fn h(&mut self, target: usize) -> Result<&mut Self> {
        self.put(Gate::H, target)
    }

    /// S gate: diag(1, i).
    pub fn s(&mut self, target: usize) -> Result<&mut Self> {
        self.put(Gate::S, target)
    }

    /// T gate: diag(1, e^(iπ/4)).
    pub fn t(&mut self, target: usize) -> Result<&mut Self> {
        self.put(Gate::T, target)
    }

    /// Phase gate diag(1, e^(iθ)).
    pub fn phase(&mut self, theta: f64, target: usize) -> Result<&mut Self> {
        self.put(Gate::Phase(theta), target)
    }

    /// Rotation by `theta` about the X axis.
    pub fn rx(&mut self, theta: f64, target: usize) -> Result<&mut Self> {
        self.put(Gate::Rx(theta), target)
    }

    /// Rotation by `theta` about the Y axis.
    pub fn ry(&mut self, theta: f64, target: usize) -> Result<&mut Self> {
        self.put(Gate::Ry(theta), target)
    }

    /// Rotation by `theta` about the Z axis.
    pub fn rz(&mut self, theta: f64, target: usize) -> Result<&mut Self> {
        self.put(Gate::Rz(theta), target)
    }

    /// Controlled-X: flips `target` when `control` is |1⟩.
    ///
    /// | c | t | t' |
    /// |:-:|:-:|:--:|
    /// | 0 | 0 | 0  |
    /// | 0 | 1 | 1  |
    /// | 1 | 0 | 1  |
    /// | 1 | 1 | 0  |
    pub fn cx(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.control(Gate::X, &[control], target)
    }

    /// Controlled-Z.
    pub fn cz(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.control(Gate::Z, &[control], target)
    }

    /// Toffoli: flips `target` when both controls are |1⟩.
    pub fn ccx(&mut self, c1: usize, c2: usize, target: usize) -> Result<&mut Self> {
        self.control(Gate::X, &[c1, c2], target)
    }

    /// Multi-controlled X.
    pub fn mcx(&mut self, controls: &[usize], target: usize) -> Result<&mut Self> {
        self.control(Gate::X, controls, target)
    }

    /// Barrier across the whole register.
    pub fn barrier(&mut self) -> Result<&mut Self> {
        self.append(barrier(vec![]))
    }

    /// Barrier across the given qubits.
    pub fn barrier_on(&mut self, qubits: &[usize]) -> Result<&mut Self> {
        self.append(barrier(qubits.to_vec()))
    }

    /// Exchanges qubits `a` and `b` with three controlled-X gates.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        check_locs(self.num_qubits, b, &[a])?;
        self.cx(a, b)?.cx(b, a)?.cx(a, b)
    }

    /// Stores `q1 OR q2` into `target` (XOR-ed onto its current value).
    ///
    /// | q1 | q2 | OR |
    /// |:--:|:--:|:--:|
    /// | 0  | 0  | 0  |
    /// | 0  | 1  | 1  |
    /// | 1  | 0  | 1  |
    /// | 1  | 1  | 1  |
    pub fn or(&mut self, q1: usize, q2: usize, target: usize) -> Result<&mut Self> {
        check_locs(self.num_qubits, target, &[q1, q2])?;
        self.cx(q1, target)?.cx(q2, target)?.ccx(q1, q2, target)
    }

    /// Appends the gates that turn |0...0⟩ into the pattern's state.
    ///
    /// `pattern` has one character per qubit, qubit 0 rightmost: `0` leaves
    /// the qubit alone, `1` applies X, `h` applies H. X gates come first.
    ///
    /// The gates go after any already recorded elements and act on the
    /// circuit's initial state; neither is reset. Call on an empty circuit
    /// built with [`Circuit::new`] to get exactly the pattern's state.
    ///
    /// # Errors
    /// - [`SimError::InvalidBasisPattern`] for characters outside `[01h]`
    /// - [`SimError::LengthMismatch`] if the length differs from the qubit count
    pub fn prepare(&mut self, pattern: &str) -> Result<&mut Self> {
        if pattern.is_empty() || !pattern.bytes().all(|b| matches!(b, b'0' | b'1' | b'h')) {
            return Err(SimError::InvalidBasisPattern(pattern.to_string()));
        }
        if pattern.len() != self.num_qubits {
            return Err(SimError::LengthMismatch {
                expected: self.num_qubits,
                actual: pattern.len(),
            });
        }
        let qubits_with = |symbol: u8| -> Vec<usize> {
            pattern
                .bytes()
                .rev()
                .enumerate()
                .filter(|&(_, b)| b == symbol)
                .map(|(q, _)| q)
                .collect()
        };
        for q in qubits_with(b'1') {
            self.x(q)?;
        }
        for q in qubits_with(b'h') {
            self.h(q)?;
        }
        Ok(self)
    }

    /// Runs the circuit from its initial state and returns the final state.
    ///
    /// The log is not modified; running again recomputes the same result.
    ///
    /// # Example
    /// ```
    /// use svsim_rs::Circuit;
    ///
    /// let mut circuit = Circuit::new(2).unwrap();
    /// circuit.h(0).unwrap().cx(0, 1).unwrap();
    /// let state = circuit.run().unwrap();
    /// let p = state.probs();
    /// assert!((p[0] - 0.5).abs() < 1e-12);
    /// assert!((p[3] - 0.5).abs() < 1e-12);
    /// ```
    pub fn run(&self) -> Result<State> {
        let mut state = self.initial.clone();
        apply_inplace(self, &mut state)?;
        debug!(num_qubits = self.num_qubits, norm = state.norm(), "circuit run complete");
        Ok(state)
    }

    /// Return the adjoint circuit U†.
    ///
    /// The dagger of a circuit has:
    /// - Elements in reverse order
    /// - Each gate replaced with its adjoint
    /// - Barriers preserved as-is
    ///
    /// The initial state is kept.
    pub fn dagger(&self) -> Self {
        let elements = self
            .elements
            .iter()
            .rev()
            .map(|element| match element {
                CircuitElement::Gate(pg) => CircuitElement::Gate(PositionedGate {
                    gate: pg.gate.dagger(),
                    target: pg.target,
                    controls: pg.controls.clone(),
                }),
                CircuitElement::Barrier(b) => CircuitElement::Barrier(b.clone()),
            })
            .collect();
        Circuit {
            num_qubits: self.num_qubits,
            initial: self.initial.clone(),
            elements,
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nqubits: {}", self.num_qubits)?;
        for element in &self.elements {
            match element {
                CircuitElement::Gate(pg) if pg.controls.is_empty() => {
                    writeln!(f, "  {} @ q[{}]", pg.gate, pg.target)?;
                }
                CircuitElement::Gate(pg) => {
                    writeln!(
                        f,
                        "  C(q[{}]) {} @ q[{}]",
                        format_locs(&pg.controls),
                        pg.gate,
                        pg.target
                    )?;
                }
                CircuitElement::Barrier(b) if b.qubits.is_empty() => writeln!(f, "  barrier")?,
                CircuitElement::Barrier(b) => writeln!(f, "  barrier @ q[{}]", format_locs(&b.qubits))?,
            }
        }
        Ok(())
    }
}

fn format_locs(locs: &[usize]) -> String {
    locs.iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
