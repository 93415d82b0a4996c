//! Structural transpose of a compressed-row matrix

use num_traits::Zero;
use tracing::debug;

use crate::error::Result;
use crate::matrix::storage::{checked_index, CsrIndex, CsrStorage};
use crate::matrix::CsrMatrix;

/// Computes `Aᵗ` as a new owning matrix
///
/// Values are copied verbatim (no conjugation). Runs in O(n + m + nnz) time on
/// a single thread. Within each output row, entries appear in increasing order
/// of their source row.
///
/// # Errors
///
/// Returns `IndexOverflow` if `rows(A)` does not fit the index type, since the
/// source rows become the column indices of the result.
///
/// # Examples
///
/// ```
/// use spmat::{CsrMatrix, transpose};
///
/// // [1 2]
/// // [0 3]
/// let a = CsrMatrix::new(2, 2, vec![0usize, 2, 3], vec![0, 1, 1], vec![1.0, 2.0, 3.0]).unwrap();
/// let t = transpose(&a).unwrap();
///
/// assert_eq!(t.row_ptr, vec![0, 1, 3]);
/// assert_eq!(t.col_idx, vec![0, 0, 1]);
/// assert_eq!(t.values, vec![1.0, 2.0, 3.0]);
/// ```
pub fn transpose<S>(a: &S) -> Result<CsrMatrix<S::Value, S::Index>>
where
    S: CsrStorage + ?Sized,
{
    let n = a.rows();
    let m = a.cols();
    checked_index::<S::Index>(n)?;
    let nnz = a.nonzeros();

    debug!(rows = n, cols = m, nnz, "transpose");

    let a_row = a.outer_index();
    let a_col = a.inner_index();
    let a_val = a.values();

    // Count entries per column of A, shifted by one
    let mut row_ptr = vec![0usize; m + 1];
    for &col in &a_col[..nnz] {
        row_ptr[col.index() + 1] += 1;
    }

    // Row starts of T
    for i in 1..=m {
        row_ptr[i] += row_ptr[i - 1];
    }

    let mut col_idx = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);

    if nnz > 0 {
        col_idx.resize(nnz, S::Index::zero());
        values.resize(nnz, a_val[0]);
    }

    // Scatter, advancing each row's cursor past its last entry
    for i in 0..n {
        let src = S::Index::from_usize(i);

        for j in a_row[i].index()..a_row[i + 1].index() {
            let cursor = &mut row_ptr[a_col[j].index()];
            col_idx[*cursor] = src;
            values[*cursor] = a_val[j];
            *cursor += 1;
        }
    }

    // Every cursor now holds its row's end; shift right to restore the starts
    row_ptr.copy_within(0..m, 1);
    row_ptr[0] = 0;

    Ok(CsrMatrix {
        n_rows: m,
        n_cols: n,
        row_ptr: row_ptr.into_iter().map(S::Index::from_usize).collect(),
        col_idx,
        values,
    })
}
