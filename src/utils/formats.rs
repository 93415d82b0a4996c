//! Utilities for converting between our matrix format and external libraries

use ndarray::Array2;
use num_traits::Num;
use sprs::CsMat;

use crate::error::Result;
use crate::matrix::storage::{checked_index, CsrIndex, CsrStorage};
use crate::matrix::{CsrMatrix, Scalar};

/// Converts a CSR matrix to sprs CsMat format
///
/// sprs requires sorted rows, so the entries are sorted on the way out. The
/// input must not hold two entries at the same (row, column). Only the leading
/// `nnz` column and value entries are exported; spare capacity left by
/// `with_capacity` or `reserve` is dropped.
pub fn to_sprs_csr<T>(matrix: &CsrMatrix<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    let mut sorted = CsrMatrix::from_storage(matrix);
    sorted.sort_rows();

    CsMat::new(
        (sorted.n_rows, sorted.n_cols),
        sorted.row_ptr,
        sorted.col_idx,
        sorted.values,
    )
}

/// Converts sprs CsMat (either storage order) to our CSR format
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> Result<CsrMatrix<T>>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    CsrMatrix::new(shape.0, shape.1, indptr, indices, data)
}

/// Scatters any compressed-row matrix into a dense array
///
/// Repeated (row, column) entries are summed.
pub fn to_dense<S>(a: &S) -> Array2<S::Value>
where
    S: CsrStorage + ?Sized,
    S::Value: Scalar,
{
    let mut dense = Array2::zeros((a.rows(), a.cols()));

    for i in 0..a.rows() {
        for (j, &val) in a.row(i) {
            dense[[i, j]] += val;
        }
    }

    dense
}

/// Builds a CSR matrix holding the nonzero entries of a dense array
///
/// # Errors
///
/// Returns `IndexOverflow` if the column count or the number of nonzeros does
/// not fit the index type.
pub fn from_dense<T, I>(dense: &Array2<T>) -> Result<CsrMatrix<T, I>>
where
    T: Scalar,
    I: CsrIndex,
{
    let (n_rows, n_cols) = dense.dim();
    checked_index::<I>(n_cols)?;

    let mut row_ptr = Vec::with_capacity(n_rows + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();

    row_ptr.push(I::zero());

    for row in dense.rows() {
        for (j, &val) in row.iter().enumerate() {
            if !val.is_zero() {
                col_idx.push(I::from_usize(j));
                values.push(val);
            }
        }
        row_ptr.push(checked_index(col_idx.len())?);
    }

    Ok(CsrMatrix {
        n_rows,
        n_cols,
        row_ptr,
        col_idx,
        values,
    })
}
