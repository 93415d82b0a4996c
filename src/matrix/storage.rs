//! Compressed-row capability traits
//!
//! Every algorithm in this crate is written against [`CsrStorage`] rather than
//! a concrete matrix type. Anything that can hand out a row-pointer array of
//! length `rows + 1`, a column-index array and a value array can be passed to
//! `transpose`, `product`, `inverse` or `diagonal` without being copied first.

use std::fmt::Debug;
use std::ops::Range;

use num_traits::{PrimInt, Zero};

use crate::error::{Result, SpmatError};

/// Integer type used for row pointers and column indices.
pub trait CsrIndex: PrimInt + Default + Debug + Send + Sync + 'static {
    /// Converts to `usize` for slice indexing.
    ///
    /// Only meaningful for non-negative values; structures handed to the
    /// algorithms are checked by [`check_structure`] when they are built.
    fn index(self) -> usize;

    /// Converts from `usize`, truncating. Callers range-check first.
    fn from_usize(i: usize) -> Self;

    /// Checked conversion from `usize`.
    fn try_from_usize(i: usize) -> Option<Self>;
}

macro_rules! impl_csr_index {
    ($($t:ty),*) => {
        $(
            impl CsrIndex for $t {
                #[inline(always)]
                fn index(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn from_usize(i: usize) -> Self {
                    i as $t
                }

                #[inline]
                fn try_from_usize(i: usize) -> Option<Self> {
                    <$t>::try_from(i).ok()
                }
            }
        )*
    };
}

impl_csr_index!(usize, u32, u64, i32, i64);

/// Converts `value` to the index type, failing with `IndexOverflow`.
pub(crate) fn checked_index<I: CsrIndex>(value: usize) -> Result<I> {
    I::try_from_usize(value).ok_or(SpmatError::IndexOverflow { value })
}

/// Read access to a matrix in compressed-row form.
pub trait CsrStorage {
    /// Row pointer and column index type.
    type Index: CsrIndex;
    /// Stored value type.
    type Value: Copy;

    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Row pointer array of length `rows() + 1`.
    fn outer_index(&self) -> &[Self::Index];

    /// Column index of every stored entry.
    fn inner_index(&self) -> &[Self::Index];

    /// Value of every stored entry, aligned with `inner_index`.
    fn values(&self) -> &[Self::Value];

    /// Number of stored entries, always read from the row pointer.
    fn nonzeros(&self) -> usize {
        self.outer_index()[self.rows()].index()
    }

    /// Storage range of row `i`.
    #[inline]
    fn row_range(&self, i: usize) -> Range<usize> {
        let outer = self.outer_index();
        outer[i].index()..outer[i + 1].index()
    }

    /// Iterates the `(column, value)` pairs of row `i` in storage order.
    fn row(&self, i: usize) -> RowIter<'_, Self::Index, Self::Value> {
        let range = self.row_range(i);
        RowIter {
            cols: self.inner_index()[range.clone()].iter(),
            vals: self.values()[range].iter(),
        }
    }
}

/// Mutable access to a matrix in compressed-row form.
pub trait CsrStorageMut: CsrStorage {
    fn outer_index_mut(&mut self) -> &mut [Self::Index];

    fn inner_index_mut(&mut self) -> &mut [Self::Index];

    fn values_mut(&mut self) -> &mut [Self::Value];

    /// Splits the storage into the row pointer and mutable column/value arrays.
    fn parts_mut(&mut self) -> (&[Self::Index], &mut [Self::Index], &mut [Self::Value]);
}

impl<S: CsrStorage + ?Sized> CsrStorage for &S {
    type Index = S::Index;
    type Value = S::Value;

    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn outer_index(&self) -> &[Self::Index] {
        (**self).outer_index()
    }

    fn inner_index(&self) -> &[Self::Index] {
        (**self).inner_index()
    }

    fn values(&self) -> &[Self::Value] {
        (**self).values()
    }
}

/// Iterator over the entries of a single row.
pub struct RowIter<'a, I, T> {
    cols: std::slice::Iter<'a, I>,
    vals: std::slice::Iter<'a, T>,
}

impl<'a, I: CsrIndex, T> Iterator for RowIter<'a, I, T> {
    type Item = (usize, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let col = self.cols.next()?;
        let val = self.vals.next()?;
        Some((col.index(), val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cols.size_hint()
    }
}

impl<I: CsrIndex, T> ExactSizeIterator for RowIter<'_, I, T> {}

/// Validates the compressed-row invariants of `a`.
///
/// Checks that the row pointer has `rows + 1` entries, starts at zero and never
/// decreases, that the column and value arrays hold at least `nnz` entries, and
/// that every column index lies in `[0, cols)`.
pub fn check_structure<S: CsrStorage + ?Sized>(a: &S) -> Result<()> {
    let rows = a.rows();
    let cols = a.cols();
    let outer = a.outer_index();

    if outer.len() != rows + 1 {
        return Err(SpmatError::InvalidStructure(format!(
            "row pointer has {} entries, expected {}",
            outer.len(),
            rows + 1
        )));
    }

    if outer[0] != S::Index::zero() {
        return Err(SpmatError::InvalidStructure(format!(
            "row pointer starts at {:?}, expected 0",
            outer[0]
        )));
    }

    if let Some(i) = outer.windows(2).position(|w| w[1] < w[0]) {
        return Err(SpmatError::InvalidStructure(format!(
            "row pointer decreases at row {}",
            i
        )));
    }

    let nnz = outer[rows].index();

    if a.inner_index().len() < nnz {
        return Err(SpmatError::InvalidStructure(format!(
            "column index array has {} entries, row pointer claims {}",
            a.inner_index().len(),
            nnz
        )));
    }

    if a.values().len() < nnz {
        return Err(SpmatError::InvalidStructure(format!(
            "value array has {} entries, row pointer claims {}",
            a.values().len(),
            nnz
        )));
    }

    for (pos, &col) in a.inner_index()[..nnz].iter().enumerate() {
        if col < S::Index::zero() || col.index() >= cols {
            return Err(SpmatError::InvalidStructure(format!(
                "column index {:?} at position {} out of bounds (cols = {})",
                col, pos, cols
            )));
        }
    }

    Ok(())
}

/// Sorts the entries of every row by column index, in place.
pub fn sort_rows<S: CsrStorageMut + ?Sized>(a: &mut S) {
    let rows = a.rows();
    let (outer, inner, values) = a.parts_mut();

    let mut scratch: Vec<(S::Index, S::Value)> = Vec::new();

    for i in 0..rows {
        let range = outer[i].index()..outer[i + 1].index();

        scratch.clear();
        scratch.extend(
            inner[range.clone()]
                .iter()
                .copied()
                .zip(values[range.clone()].iter().copied()),
        );
        scratch.sort_by_key(|&(col, _)| col);

        for (pos, &(col, val)) in range.zip(scratch.iter()) {
            inner[pos] = col;
            values[pos] = val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CsrView;

    #[test]
    fn test_index_conversions() {
        assert_eq!(CsrIndex::index(7u32), 7);
        assert_eq!(<i32 as CsrIndex>::from_usize(5), 5i32);
        assert_eq!(<u32 as CsrIndex>::try_from_usize(u32::MAX as usize + 1), None);
        assert_eq!(<i64 as CsrIndex>::try_from_usize(42), Some(42i64));
    }

    #[test]
    fn test_check_structure_rejects_decreasing_row_pointer() {
        let row = [0usize, 2, 1];
        let col = [0usize, 1];
        let val = [1.0f64, 2.0];

        let err = CsrView::new(2, 2, &row, &col, &val).unwrap_err();
        assert!(matches!(err, SpmatError::InvalidStructure(_)));
    }

    #[test]
    fn test_check_structure_rejects_negative_column() {
        let row = [0i32, 1];
        let col = [-1i32];
        let val = [1.0f64];

        let err = CsrView::new(1, 3, &row, &col, &val).unwrap_err();
        assert!(matches!(err, SpmatError::InvalidStructure(_)));
    }

    #[test]
    fn test_row_iter() {
        let row = [0u32, 2, 2, 3];
        let col = [2u32, 0, 1];
        let val = [1, 2, 3];

        let view = CsrView::new(3, 3, &row, &col, &val).unwrap();

        assert_eq!(view.row(0).collect::<Vec<_>>(), vec![(2, &1), (0, &2)]);
        assert_eq!(view.row(1).len(), 0);
        assert_eq!(view.row(2).collect::<Vec<_>>(), vec![(1, &3)]);
        assert_eq!(view.nonzeros(), 3);
    }
}
