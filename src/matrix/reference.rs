//! Reference implementation of the sparse product
//!
//! A simple sequential row-by-row product with a hash-map accumulator. It is
//! not tuned for speed; it provides a correct baseline for tests and benches.

use std::collections::HashMap;

use num_traits::Zero;

use crate::error::{Result, SpmatError};
use crate::matrix::scalar::Scalar;
use crate::matrix::storage::{CsrIndex, CsrStorage};
use crate::matrix::CsrMatrix;

/// Performs `C = A·B` with a hash-map accumulator per row
///
/// Rows of the result are sorted by column. Entries that cancel to zero are
/// kept, so the sparsity pattern matches the parallel product.
pub fn reference_product<SA, SB>(a: &SA, b: &SB) -> Result<CsrMatrix<SA::Value, SA::Index>>
where
    SA: CsrStorage + ?Sized,
    SB: CsrStorage<Value = SA::Value> + ?Sized,
    SA::Value: Scalar,
{
    if a.cols() != b.rows() {
        return Err(SpmatError::DimensionMismatch {
            left_cols: a.cols(),
            right_rows: b.rows(),
        });
    }

    let n_rows = a.rows();
    let n_cols = b.cols();

    // Prepare output CSR data structures
    let mut row_ptr = Vec::with_capacity(n_rows + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();

    row_ptr.push(SA::Index::zero());

    for i in 0..n_rows {
        let mut accum: HashMap<usize, SA::Value> = HashMap::new();

        for (k, &a_val) in a.row(i) {
            for (j, &b_val) in b.row(k) {
                *accum.entry(j).or_insert_with(SA::Value::zero) += a_val * b_val;
            }
        }

        // Convert hashmap to sorted (col_idx, values) pairs
        let mut row_entries: Vec<_> = accum.into_iter().collect();
        row_entries.sort_by_key(|&(col, _)| col);

        for (j, val) in row_entries {
            col_idx.push(SA::Index::from_usize(j));
            values.push(val);
        }

        row_ptr.push(SA::Index::from_usize(col_idx.len()));
    }

    Ok(CsrMatrix {
        n_rows,
        n_cols,
        row_ptr,
        col_idx,
        values,
    })
}
