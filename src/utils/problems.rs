//! Sample problems: finite-difference Poisson matrices

use crate::matrix::storage::CsrIndex;
use crate::matrix::CsrMatrix;

/// 1D Poisson matrix `tridiag(-1, 2, -1)` of size n × n
pub fn poisson_1d<I: CsrIndex>(n: usize) -> CsrMatrix<f64, I> {
    let mut row_ptr = Vec::with_capacity(n + 1);
    let mut col_idx = Vec::with_capacity(3 * n);
    let mut values = Vec::with_capacity(3 * n);

    row_ptr.push(I::zero());

    for i in 0..n {
        if i > 0 {
            col_idx.push(I::from_usize(i - 1));
            values.push(-1.0);
        }

        col_idx.push(I::from_usize(i));
        values.push(2.0);

        if i + 1 < n {
            col_idx.push(I::from_usize(i + 1));
            values.push(-1.0);
        }

        row_ptr.push(I::from_usize(col_idx.len()));
    }

    CsrMatrix {
        n_rows: n,
        n_cols: n,
        row_ptr,
        col_idx,
        values,
    }
}

/// 2D Poisson matrix on an n × n grid (5-point stencil), size n² × n²
///
/// Unknowns are numbered row by row. Each row stores its diagonal first,
/// followed by the neighbours, so rows are deliberately not column-sorted.
pub fn poisson_2d<I: CsrIndex>(n: usize) -> CsrMatrix<f64, I> {
    let n2 = n * n;

    let mut row_ptr = Vec::with_capacity(n2 + 1);
    let mut col_idx = Vec::with_capacity(5 * n2);
    let mut values = Vec::with_capacity(5 * n2);

    row_ptr.push(I::zero());

    for j in 0..n {
        for i in 0..n {
            let idx = j * n + i;

            col_idx.push(I::from_usize(idx));
            values.push(4.0);

            if j > 0 {
                col_idx.push(I::from_usize(idx - n));
                values.push(-1.0);
            }
            if i > 0 {
                col_idx.push(I::from_usize(idx - 1));
                values.push(-1.0);
            }
            if i + 1 < n {
                col_idx.push(I::from_usize(idx + 1));
                values.push(-1.0);
            }
            if j + 1 < n {
                col_idx.push(I::from_usize(idx + n));
                values.push(-1.0);
            }

            row_ptr.push(I::from_usize(col_idx.len()));
        }
    }

    CsrMatrix {
        n_rows: n2,
        n_cols: n2,
        row_ptr,
        col_idx,
        values,
    }
}
