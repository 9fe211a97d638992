//! Error types for circuit construction and state-vector simulation.
//!
//! Every error here signals misuse detected synchronously at the call site
//! (a bad qubit index at append time, a bad qubit count at construction
//! time). None of them are transient.

use thiserror::Error;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised by the simulator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Register size is zero or too large to address.
    #[error("invalid qubit count {num_qubits} (must be between 1 and {max})")]
    InvalidQubitCount {
        /// Requested number of qubits.
        num_qubits: usize,
        /// Largest supported register.
        max: usize,
    },

    /// A qubit index is outside `0..num_qubits`.
    #[error("qubit index {index} is out of range (num_qubits = {num_qubits})")]
    InvalidQubitIndex {
        /// Offending qubit index.
        index: usize,
        /// Size of the register.
        num_qubits: usize,
    },

    /// The same qubit is used as target and control of one gate.
    #[error("qubit {qubit} is used both as target and as control")]
    ConflictingQubitRole {
        /// Qubit listed in both roles.
        qubit: usize,
    },

    /// An amplitude index is outside `0..2^n`.
    #[error("amplitude index {index} is out of range (len = {len})")]
    IndexOutOfRange {
        /// Offending amplitude index.
        index: usize,
        /// Length of the state vector.
        len: usize,
    },

    /// A circuit was applied to a state of a different register size.
    #[error("circuit acts on {expected} qubits but the state has {actual}")]
    QubitCountMismatch {
        /// Qubits in the circuit.
        expected: usize,
        /// Qubits in the state.
        actual: usize,
    },

    /// A basis label contains characters other than `0` and `1`.
    #[error("expected a binary string, received '{0}'")]
    InvalidBitString(String),

    /// A preparation pattern contains characters other than `0`, `1` and `h`.
    #[error("expected a pattern over '0', '1' and 'h', received '{0}'")]
    InvalidBasisPattern(String),

    /// A pattern does not have one character per qubit.
    #[error("expected length {expected}, received length {actual}")]
    LengthMismatch {
        /// Required length.
        expected: usize,
        /// Provided length.
        actual: usize,
    },

    /// An amplitude list does not have a power-of-two length.
    #[error("expected a vector with a length of a power of two, received {len}")]
    NotPowerOfTwo {
        /// Provided length.
        len: usize,
    },

    /// An amplitude list has zero norm and cannot be normalized.
    #[error("cannot normalize a zero vector")]
    ZeroNorm,

    /// An amplitude list contains NaN or infinite values.
    #[error("amplitudes must be finite")]
    NonFiniteAmplitude,

    /// More marginal locations than qubits in the register.
    #[error("{count} qubit locations requested on a register of {num_qubits} qubits")]
    TooManyLocations {
        /// Number of locations passed.
        count: usize,
        /// Size of the register.
        num_qubits: usize,
    },

    /// A result was expected to be a single basis state but is a superposition.
    #[error("state is not a computational basis state")]
    IndeterminateOutcome,
}

impl SimError {
    /// Create an invalid qubit index error.
    pub fn invalid_qubit(index: usize, num_qubits: usize) -> Self {
        Self::InvalidQubitIndex { index, num_qubits }
    }

    /// Create an index out of range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
