//! State-vector quantum circuit simulator.
//!
//! A register of `n` qubits is a vector of `2^n` complex amplitudes. Gates are
//! applied in place by pairing amplitudes that differ only in the target
//! bit, so no `2^n × 2^n` operator is ever built. Qubit `q` is bit `1 << q` of
//! a basis index.
//!
//! ```
//! use svsim_rs::Circuit;
//!
//! let mut circuit = Circuit::new(2)?;
//! circuit.h(0)?.cx(0, 1)?;
//! let state = circuit.run()?;
//! assert!((state.get(0)?.re - 0.5f64.sqrt()).abs() < 1e-12);
//! assert!((state.get(3)?.re - 0.5f64.sqrt()).abs() < 1e-12);
//! # Ok::<(), svsim_rs::SimError>(())
//! ```

pub mod apply;
pub mod circuit;
pub mod easybuild;
pub mod error;
pub mod gate;
pub mod index;
pub mod instruct;
pub mod probs;
pub mod state;

pub use apply::{apply, apply_gate, apply_inplace};
pub use circuit::{control, put, Circuit, CircuitElement, PositionedGate};
pub use error::{Result, SimError};
pub use gate::Gate;
pub use state::State;
