//! Bit-level indexing utilities for qubit registers.
//!
//! Qubit `q` is bit `1 << q` of a basis index, so qubit 0 is the
//! least-significant bit. Basis labels are the binary representation of the
//! index, most-significant bit first: qubit 0 is the rightmost character.

use crate::error::{Result, SimError};

/// Mask with one bit set per location.
///
/// Repeated locations set the same bit.
///
/// # Example
/// ```
/// use svsim_rs::index::qubit_mask;
/// assert_eq!(qubit_mask(&[0, 2]), 0b101);
/// assert_eq!(qubit_mask(&[]), 0);
/// ```
pub fn qubit_mask(locs: &[usize]) -> usize {
    locs.iter().fold(0usize, |mask, &loc| mask | (1usize << loc))
}

/// Value of qubit `loc` in basis index `index`.
pub fn bit_at(index: usize, loc: usize) -> bool {
    (index >> loc) & 1 == 1
}

/// Gather the bits at `locs` into a new index: bit `k` of the result is
/// qubit `locs[k]` of `index`.
///
/// # Example
/// ```
/// use svsim_rs::index::extract_bits;
/// // index 0b1011: qubits 0, 1 and 3 are set
/// assert_eq!(extract_bits(0b1011, &[1, 2, 3]), 0b101);
/// assert_eq!(extract_bits(0b1011, &[3, 1, 1]), 0b111);
/// ```
pub fn extract_bits(index: usize, locs: &[usize]) -> usize {
    locs.iter()
        .enumerate()
        .fold(0usize, |acc, (k, &loc)| acc | (((index >> loc) & 1) << k))
}

/// Basis label of `index` on a register of `num_qubits` qubits.
///
/// # Example
/// ```
/// use svsim_rs::index::format_basis;
/// assert_eq!(format_basis(1, 3), "001");
/// assert_eq!(format_basis(6, 3), "110");
/// ```
pub fn format_basis(index: usize, num_qubits: usize) -> String {
    format!("{:0width$b}", index, width = num_qubits)
}

/// Parse a basis label into `(index, num_qubits)`.
///
/// # Errors
/// Returns [`SimError::InvalidBitString`] unless the label matches `[01]+`.
///
/// # Example
/// ```
/// use svsim_rs::index::parse_basis;
/// assert_eq!(parse_basis("0110").unwrap(), (6, 4));
/// assert!(parse_basis("01a").is_err());
/// ```
pub fn parse_basis(label: &str) -> Result<(usize, usize)> {
    if label.is_empty() || !label.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(SimError::InvalidBitString(label.to_string()));
    }
    if label.len() >= usize::BITS as usize {
        return Err(SimError::InvalidBitString(label.to_string()));
    }
    let index = label
        .bytes()
        .fold(0usize, |acc, b| (acc << 1) | usize::from(b == b'1'));
    Ok((index, label.len()))
}

/// Iterator over the basis indices whose bits under `fixed_mask` equal the
/// corresponding bits of `fixed_vals`.
///
/// Only matching indices are generated: the counter runs over the free bits
/// and steps with `((i | fixed_mask) + 1) & !fixed_mask`, so a carry skips
/// across the fixed positions. Indices come out in increasing order.
#[derive(Debug, Clone)]
pub struct FixedBitRange {
    cursor: usize,
    fixed_mask: usize,
    fixed_vals: usize,
    remaining: usize,
}

impl FixedBitRange {
    /// Creates the range over a register of `num_qubits` qubits.
    pub fn new(num_qubits: usize, fixed_mask: usize, fixed_vals: usize) -> Self {
        debug_assert_eq!(fixed_vals & !fixed_mask, 0, "fixed_vals must lie inside fixed_mask");
        debug_assert!(fixed_mask >> num_qubits == 0, "fixed_mask exceeds the register");
        let free = num_qubits - fixed_mask.count_ones() as usize;
        FixedBitRange {
            cursor: 0,
            fixed_mask,
            fixed_vals,
            remaining: 1usize << free,
        }
    }
}

impl Iterator for FixedBitRange {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.cursor | self.fixed_vals;
        self.cursor = (self.cursor | self.fixed_mask).wrapping_add(1) & !self.fixed_mask;
        self.remaining -= 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for FixedBitRange {}

/// Iterate over basis states with fixed values at certain qubits.
///
/// Used for controlled gates: only indices where every control reads `1`
/// (and the target reads `0`) are visited.
///
/// # Example
/// ```
/// use svsim_rs::index::iter_basis_fixed;
/// // 2 qubits, fix qubit 0 to 1: |01> and |11> (indices 1 and 3)
/// let indices: Vec<_> = iter_basis_fixed(2, &[0], &[true]).collect();
/// assert_eq!(indices, vec![1, 3]);
/// ```
pub fn iter_basis_fixed(num_qubits: usize, fixed_locs: &[usize], fixed_vals: &[bool]) -> FixedBitRange {
    debug_assert_eq!(fixed_locs.len(), fixed_vals.len(), "fixed_locs and fixed_vals must have the same length");
    let mask = qubit_mask(fixed_locs);
    let vals = fixed_locs
        .iter()
        .zip(fixed_vals)
        .filter(|&(_, &v)| v)
        .fold(0usize, |acc, (&loc, _)| acc | (1usize << loc));
    FixedBitRange::new(num_qubits, mask, vals)
}
