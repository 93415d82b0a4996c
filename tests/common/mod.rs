// Shared helpers for the integration tests

#![allow(dead_code)]

use spmat::{CsrMatrix, CsrStorage};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Installs a subscriber for the current test thread only.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .set_default()
}

/// Row `i` of `a` as (column, value) pairs sorted by column
pub fn sorted_row<S>(a: &S, i: usize) -> Vec<(usize, S::Value)>
where
    S: CsrStorage,
{
    let mut entries: Vec<_> = a.row(i).map(|(col, &val)| (col, val)).collect();
    entries.sort_by_key(|&(col, _)| col);
    entries
}

/// Compares two matrices entry by entry, ignoring the order within rows
pub fn matrices_approximately_equal<A, B>(a: &A, b: &B, epsilon: f64) -> bool
where
    A: CsrStorage<Value = f64>,
    B: CsrStorage<Value = f64>,
{
    if a.rows() != b.rows() || a.cols() != b.cols() {
        return false;
    }

    for i in 0..a.rows() {
        let a_entries = sorted_row(a, i);
        let b_entries = sorted_row(b, i);

        if a_entries.len() != b_entries.len() {
            return false;
        }

        for (a_entry, b_entry) in a_entries.iter().zip(b_entries.iter()) {
            if a_entry.0 != b_entry.0 || (a_entry.1 - b_entry.1).abs() > epsilon {
                return false;
            }
        }
    }

    true
}

/// Deterministic pseudo-random sparse matrix with `per_row` entries per row
///
/// Column indices within a row are distinct and deliberately unsorted.
pub fn patterned_matrix(n_rows: usize, n_cols: usize, per_row: usize, seed: usize) -> CsrMatrix<f64> {
    let per_row = per_row.min(n_cols);

    let mut row_ptr = Vec::with_capacity(n_rows + 1);
    let mut col_idx = Vec::with_capacity(n_rows * per_row);
    let mut values = Vec::with_capacity(n_rows * per_row);

    row_ptr.push(0);

    for i in 0..n_rows {
        let start = (i * 7 + seed * 13) % n_cols.max(1);
        for k in 0..per_row {
            // Stride 1 keeps the columns of a row distinct
            col_idx.push((start + n_cols - k) % n_cols);
            values.push(((i + 3 * k + seed) % 11) as f64 - 5.0);
        }
        row_ptr.push(col_idx.len());
    }

    CsrMatrix::new(n_rows, n_cols, row_ptr, col_idx, values).unwrap()
}
