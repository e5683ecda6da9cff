//! Read-only square matrix of `f32`, stored row-major.

use std::fmt;
use std::ops::Index;

use rand::Rng;

use crate::error::{Result, ShortcutError};
use crate::matrix::naive::shortcut_baseline;
use crate::matrix::transpose::transpose;
use crate::threaded::parallel::shortcut_parallel;

/// An n×n matrix with n ≥ 1.
///
/// Every constructor checks the shape, so a `SquareMatrix` always holds
/// exactly `size * size` entries. Nothing mutates a matrix after it is
/// built; both engines borrow it and return a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    data: Vec<f32>,
    size: usize,
}

impl SquareMatrix {
    /// Build a matrix from `n * n` row-major entries.
    ///
    /// ```
    /// use shortcut::SquareMatrix;
    ///
    /// let m = SquareMatrix::from_vec(2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
    /// assert_eq!(m.size(), 2);
    /// assert_eq!(m.get(0, 1), Some(1.0));
    /// ```
    pub fn from_vec(n: usize, data: Vec<f32>) -> Result<Self> {
        let len = checked_len(n)?;
        if data.len() != len {
            return Err(ShortcutError::LengthMismatch {
                expected: len,
                found: data.len(),
            });
        }
        Ok(Self { data, size: n })
    }

    /// Build a matrix from nested rows, rejecting ragged or non-square input.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(checked_len(n)?);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(ShortcutError::NotSquare {
                    row,
                    expected: n,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self { data, size: n })
    }

    /// Random n×n matrix: zero diagonal, off-diagonal entries in [0.0, 1.0).
    pub fn random(n: usize) -> Result<Self> {
        Self::random_with_rng(n, &mut rand::thread_rng())
    }

    /// Same as [`SquareMatrix::random`] with a caller-supplied RNG, so runs
    /// can be reproduced from a seed.
    pub fn random_with_rng<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        let len = checked_len(n)?;
        let data = (0..len)
            .map(|idx| {
                if idx / n == idx % n {
                    0.0
                } else {
                    rng.gen_range(0.0f32..1.0)
                }
            })
            .collect();
        Ok(Self { data, size: n })
    }

    /// Wrap a buffer the engines filled themselves. Shape is the caller's
    /// responsibility, hence crate-private.
    pub(crate) fn from_parts(size: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), size * size);
        Self { data, size }
    }

    /// Matrix dimension n.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry (row, col), or `None` if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.size && col < self.size {
            Some(self.data[row * self.size + col])
        } else {
            None
        }
    }

    /// Entry (row, col), or [`ShortcutError::OutOfBounds`].
    pub fn entry(&self, row: usize, col: usize) -> Result<f32> {
        self.get(row, col).ok_or(ShortcutError::OutOfBounds {
            row,
            col,
            size: self.size,
        })
    }

    /// Row `row` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= size`.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.size;
        &self.data[start..start + self.size]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f32]> {
        (0..self.size).map(|i| self.row(i))
    }

    /// Row-major backing data.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// True if no entry is negative (or NaN). This is what makes stopping a
    /// k-scan at 0.0 safe.
    pub fn is_non_negative(&self) -> bool {
        self.data.iter().all(|&x| x >= 0.0)
    }

    /// Transposed copy: entry (j, i) of the result is entry (i, j) of `self`.
    pub fn transpose(&self) -> SquareMatrix {
        let mut t = vec![0.0; self.data.len()];
        transpose(&self.data, &mut t, self.size, self.size);
        Self::from_parts(self.size, t)
    }

    /// Shortcut matrix via the single-threaded triple loop.
    pub fn shortcut_baseline(&self) -> SquareMatrix {
        shortcut_baseline(self)
    }

    /// Shortcut matrix via the multi-threaded engine with default settings.
    pub fn shortcut_parallel(&self) -> Result<SquareMatrix> {
        shortcut_parallel(self)
    }
}

/// Number of entries in an n×n matrix, rejecting n = 0 and overflow.
fn checked_len(n: usize) -> Result<usize> {
    if n == 0 {
        return Err(ShortcutError::Empty);
    }
    n.checked_mul(n).ok_or(ShortcutError::TooLarge { size: n })
}

impl TryFrom<Vec<Vec<f32>>> for SquareMatrix {
    type Error = ShortcutError;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl Index<(usize, usize)> for SquareMatrix {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(
            row < self.size && col < self.size,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.size,
            self.size
        );
        &self.data[row * self.size + col]
    }
}

impl fmt::Display for SquareMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for value in row {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{:.3}", value)?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_has_zero_diagonal_and_unit_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = SquareMatrix::random_with_rng(16, &mut rng).unwrap();

        for i in 0..16 {
            assert_eq!(m[(i, i)], 0.0);
            for j in 0..16 {
                let x = m[(i, j)];
                assert!((0.0..1.0).contains(&x), "entry ({}, {}) = {}", i, j, x);
            }
        }
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let a = SquareMatrix::random_with_rng(8, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = SquareMatrix::random_with_rng(8, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_transpose_swaps_entries() {
        let m = SquareMatrix::from_vec(3, (0..9).map(|i| i as f32).collect()).unwrap();
        let t = m.transpose();

        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(t[(j, i)], m[(i, j)]);
            }
        }
    }

    #[test]
    fn test_size_overflow_is_an_error() {
        let huge = 1usize << (usize::BITS / 2);
        assert!(matches!(
            SquareMatrix::from_vec(huge, Vec::new()),
            Err(ShortcutError::TooLarge { size }) if size == huge
        ));
        assert!(matches!(
            SquareMatrix::random(usize::MAX),
            Err(ShortcutError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_rows_are_slices_of_data() {
        let m = SquareMatrix::from_vec(3, (0..9).map(|i| i as f32).collect()).unwrap();

        assert_eq!(m.row(1), &[3.0, 4.0, 5.0]);
        assert_eq!(m.rows().len(), 3);
        assert_eq!(m.rows().last(), Some(&[6.0, 7.0, 8.0][..]));
    }

    #[test]
    fn test_display_one_row_per_line() {
        let m = SquareMatrix::from_vec(2, vec![0.0, 1.5, 2.0, 0.0]).unwrap();
        assert_eq!(m.to_string(), "0.000 1.500\n2.000 0.000\n");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_range_panics() {
        let m = SquareMatrix::from_vec(1, vec![5.0]).unwrap();
        let _ = m[(0, 1)];
    }
}
