//! Dense inversion by Gauss-Jordan elimination with full pivoting
//!
//! Meant for small blocks (coarsest-level systems, local blocks); the sparse
//! input is scattered into a dense n × n buffer and the result is returned in
//! compressed-row form with every row fully populated.

use ndarray::Array2;
use num_traits::Zero;
use tracing::{debug, trace};

use crate::error::{Result, SpmatError};
use crate::matrix::scalar::Scalar;
use crate::matrix::storage::{checked_index, CsrIndex, CsrStorage};
use crate::matrix::CsrMatrix;

/// Inverts the dense matrix `a` in place
///
/// Each step picks the largest-magnitude entry among the rows and columns not
/// yet used as a pivot, moves it onto the diagonal with a row swap, normalizes
/// the pivot row and clears the pivot column in every other row. The column
/// permutations implied by the row swaps are undone at the end.
///
/// # Errors
///
/// Returns `SingularMatrix` as soon as a step finds no nonzero pivot. The
/// buffer is left partially eliminated in that case.
pub fn gauss_jordan<T: Scalar>(a: &mut Array2<T>) -> Result<()> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(SpmatError::NotSquare {
            rows: n,
            cols: a.ncols(),
        });
    }

    let mut idxr = vec![0usize; n];
    let mut idxc = vec![0usize; n];
    let mut used = vec![false; n];

    for step in 0..n {
        let mut big = T::Real::zero();
        let mut pivot = None;

        for j in (0..n).filter(|&j| !used[j]) {
            for k in (0..n).filter(|&k| !used[k]) {
                let magnitude = a[[j, k]].modulus();
                if magnitude > big {
                    big = magnitude;
                    pivot = Some((j, k));
                }
            }
        }

        let (irow, icol) = pivot.ok_or(SpmatError::SingularMatrix { step })?;
        trace!(step, row = irow, col = icol, "pivot");

        used[icol] = true;

        if irow != icol {
            for k in 0..n {
                a.swap([irow, k], [icol, k]);
            }
        }

        idxr[step] = irow;
        idxc[step] = icol;

        if a[[icol, icol]].is_zero() {
            return Err(SpmatError::SingularMatrix { step });
        }

        let pivinv = T::one() / a[[icol, icol]];
        a[[icol, icol]] = T::one();
        a.row_mut(icol).mapv_inplace(|e| e * pivinv);

        let pivot_row = a.row(icol).to_owned();

        for k in (0..n).filter(|&k| k != icol) {
            let dum = a[[k, icol]];
            a[[k, icol]] = T::zero();
            a.row_mut(k)
                .zip_mut_with(&pivot_row, |v, &p| *v = *v - p * dum);
        }
    }

    for step in (0..n).rev() {
        if idxr[step] != idxc[step] {
            for j in 0..n {
                a.swap([j, idxr[step]], [j, idxc[step]]);
            }
        }
    }

    Ok(())
}

/// Computes `A⁻¹` for a small square matrix
///
/// The result is dense: row `i` holds columns `0..n` in ascending order.
///
/// # Errors
///
/// * `NotSquare` if `rows(A) != cols(A)`
/// * `SingularMatrix` if elimination hits a zero pivot
/// * `IndexOverflow` if `n * n` does not fit the index type
pub fn inverse<S>(a: &S) -> Result<CsrMatrix<S::Value, S::Index>>
where
    S: CsrStorage + ?Sized,
    S::Value: Scalar,
{
    let n = a.rows();
    if n != a.cols() {
        return Err(SpmatError::NotSquare {
            rows: n,
            cols: a.cols(),
        });
    }

    let total = n
        .checked_mul(n)
        .ok_or(SpmatError::IndexOverflow { value: usize::MAX })?;
    checked_index::<S::Index>(total)?;

    debug!(n, nnz = a.nonzeros(), "dense inverse");

    let mut dense = Array2::<S::Value>::zeros((n, n));
    for i in 0..n {
        for (col, &val) in a.row(i) {
            dense[[i, col]] = val;
        }
    }

    gauss_jordan(&mut dense)?;

    let row_ptr = (0..=n).map(|i| S::Index::from_usize(i * n)).collect();
    let col_idx = (0..n)
        .flat_map(|_| (0..n).map(S::Index::from_usize))
        .collect();
    let values = dense.iter().copied().collect();

    Ok(CsrMatrix {
        n_rows: n,
        n_cols: n,
        row_ptr,
        col_idx,
        values,
    })
}
