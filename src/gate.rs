use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

/// A 2x2 complex matrix in row-major order: `m[row][col]`.
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);
const IM: Complex64 = Complex64::new(0.0, 1.0);
const NEG_IM: Complex64 = Complex64::new(0.0, -1.0);
const SQRT_HALF: Complex64 = Complex64::new(FRAC_1_SQRT_2, 0.0);
const NEG_SQRT_HALF: Complex64 = Complex64::new(-FRAC_1_SQRT_2, 0.0);

/// No-op.
pub const IDENTITY: Matrix2 = [[ONE, ZERO], [ZERO, ONE]];
/// Bit flip.
pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];
/// Bit and phase flip.
pub const PAULI_Y: Matrix2 = [[ZERO, NEG_IM], [IM, ZERO]];
/// Phase flip.
pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, NEG_ONE]];
/// Maps |0⟩ and |1⟩ to the equal superpositions (|0⟩ ± |1⟩)/√2.
pub const HADAMARD: Matrix2 = [[SQRT_HALF, SQRT_HALF], [SQRT_HALF, NEG_SQRT_HALF]];
/// diag(1, i)
pub const S_MATRIX: Matrix2 = [[ONE, ZERO], [ZERO, IM]];
/// diag(1, e^(iπ/4))
pub const T_MATRIX: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]];

/// Single-qubit gates known to the simulator.
///
/// Multi-qubit operations such as CNOT or Toffoli are a catalog gate plus
/// control qubits; the conditioning lives in the application engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    T,
    /// Phase gate: diag(1, e^(iθ)).
    Phase(f64),
    Rx(f64),
    Ry(f64),
    Rz(f64),
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::Phase(theta) => write!(f, "Phase({:.4})", theta),
            Gate::Rx(theta) => write!(f, "Rx({:.4})", theta),
            Gate::Ry(theta) => write!(f, "Ry({:.4})", theta),
            Gate::Rz(theta) => write!(f, "Rz({:.4})", theta),
            _ => f.write_str(self.name()),
        }
    }
}

impl Gate {
    /// The parameter-free gates of the catalog.
    pub const FIXED: [Gate; 7] = [Gate::I, Gate::X, Gate::Y, Gate::Z, Gate::H, Gate::S, Gate::T];

    /// Short name of the gate, without parameters.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "I",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::T => "T",
            Gate::Phase(_) => "Phase",
            Gate::Rx(_) => "Rx",
            Gate::Ry(_) => "Ry",
            Gate::Rz(_) => "Rz",
        }
    }

    /// The 2x2 matrix of the gate.
    pub fn matrix2(&self) -> Matrix2 {
        match self {
            Gate::I => IDENTITY,
            Gate::X => PAULI_X,
            Gate::Y => PAULI_Y,
            Gate::Z => PAULI_Z,
            Gate::H => HADAMARD,
            Gate::S => S_MATRIX,
            Gate::T => T_MATRIX,
            Gate::Phase(theta) => [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, *theta)]],
            Gate::Rx(theta) => {
                let cos = Complex64::new((theta / 2.0).cos(), 0.0);
                let neg_i_sin = Complex64::new(0.0, -(theta / 2.0).sin());
                [[cos, neg_i_sin], [neg_i_sin, cos]]
            }
            Gate::Ry(theta) => {
                let cos = Complex64::new((theta / 2.0).cos(), 0.0);
                let sin = Complex64::new((theta / 2.0).sin(), 0.0);
                [[cos, -sin], [sin, cos]]
            }
            Gate::Rz(theta) => {
                let phase_neg = Complex64::from_polar(1.0, -theta / 2.0);
                let phase_pos = Complex64::from_polar(1.0, theta / 2.0);
                [[phase_neg, ZERO], [ZERO, phase_pos]]
            }
        }
    }

    /// Returns the matrix representation of the gate as an ndarray.
    pub fn matrix(&self) -> Array2<Complex64> {
        let m = self.matrix2();
        Array2::from_shape_fn((2, 2), |(row, col)| m[row][col])
    }

    /// Returns whether the gate is diagonal.
    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            Gate::I | Gate::Z | Gate::S | Gate::T | Gate::Phase(_) | Gate::Rz(_)
        )
    }

    /// Return the adjoint (conjugate transpose) of this gate.
    ///
    /// For unitary gates, the adjoint is also the inverse: U† U = I.
    pub fn dagger(&self) -> Self {
        match self {
            Gate::I | Gate::X | Gate::Y | Gate::Z | Gate::H => *self,
            Gate::S => Gate::Phase(-FRAC_PI_2),
            Gate::T => Gate::Phase(-FRAC_PI_4),
            Gate::Phase(theta) => Gate::Phase(-theta),
            Gate::Rx(theta) => Gate::Rx(-theta),
            Gate::Ry(theta) => Gate::Ry(-theta),
            Gate::Rz(theta) => Gate::Rz(-theta),
        }
    }
}

/// Product of two 2x2 matrices.
pub fn matmul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[ZERO; 2]; 2];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, entry) in out_row.iter_mut().enumerate() {
            *entry = a[row][0] * b[0][col] + a[row][1] * b[1][col];
        }
    }
    out
}

/// Conjugate transpose of a 2x2 matrix.
pub fn conjugate_transpose(m: &Matrix2) -> Matrix2 {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

/// Checks U·U† = I entry by entry within `tol`.
pub fn is_unitary(m: &Matrix2, tol: f64) -> bool {
    let product = matmul(m, &conjugate_transpose(m));
    product
        .iter()
        .flatten()
        .zip(IDENTITY.iter().flatten())
        .all(|(p, e)| (p - e).norm() <= tol)
}
