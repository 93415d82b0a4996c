//! # Parallel sparse matrix-matrix product
//!
//! Two-phase SpGEMM over a fixed partition of A's rows:
//!
//! 1. **Symbolic**: every worker counts the distinct output columns of the
//!    rows it owns, using a private marker array of width `cols(B)`.
//! 2. Between the phases, on one thread: the counts are prefix-summed into the
//!    row pointer and the column/value storage is allocated once, at its final
//!    size.
//! 3. **Numeric**: every worker fills the output slice of its own rows. The
//!    marker array now maps a column to its slot in the current row.
//!
//! Rows are split into contiguous, ceiling-divided chunks, one per worker, so
//! each worker writes a disjoint part of the row pointer and a disjoint slice
//! of the output. The result does not depend on the number of workers: every
//! output row is computed by exactly one worker, in the same order.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, SpmatError};
use crate::matrix::config::SpmatConfig;
use crate::matrix::storage::{checked_index, CsrIndex, CsrStorage};
use crate::matrix::{CsrMatrix, CsrView, Scalar};
use crate::utils::{chunk_ranges, inclusive_scan_in_place};

/// Marker value for "column not seen yet".
const UNSET: usize = usize::MAX;

/// Creates a dedicated rayon pool with `n_threads` workers.
pub fn create_thread_pool(n_threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build()
        .map_err(|err| SpmatError::ThreadPool(err.to_string()))
}

/// Computes `C = A·B` on the current rayon pool
///
/// Uses one row chunk per thread of the pool the call runs in (the global
/// pool unless called from inside `ThreadPool::install`).
///
/// # Errors
///
/// Returns `DimensionMismatch` if `cols(A) != rows(B)`, before any work is
/// done, and `IndexOverflow` if `cols(B)` or the output nnz does not fit A's
/// index type.
///
/// # Examples
///
/// ```
/// use spmat::{CsrMatrix, product};
///
/// let a = CsrMatrix::<f64>::identity(2);
/// let b = CsrMatrix::new(2, 2, vec![0usize, 1, 2], vec![1, 0], vec![2.0, 3.0]).unwrap();
///
/// let c = product(&a, &b).unwrap();
///
/// assert_eq!(c.col_idx, vec![1, 0]);
/// assert_eq!(c.values, vec![2.0, 3.0]);
/// ```
pub fn product<SA, SB>(a: &SA, b: &SB) -> Result<CsrMatrix<SA::Value, SA::Index>>
where
    SA: CsrStorage + ?Sized,
    SB: CsrStorage<Value = SA::Value> + ?Sized,
    SA::Value: Scalar,
{
    spgemm(borrow(a), borrow(b), rayon::current_num_threads())
}

/// Computes `C = A·B` on a dedicated pool of `config.n_threads` workers
///
/// A's rows are split into `config.n_threads` chunks. Output is identical for
/// any worker count.
///
/// # Errors
///
/// As [`product`], plus `ThreadPool` if the pool cannot be built.
pub fn product_with_config<SA, SB>(
    a: &SA,
    b: &SB,
    config: &SpmatConfig,
) -> Result<CsrMatrix<SA::Value, SA::Index>>
where
    SA: CsrStorage + ?Sized,
    SB: CsrStorage<Value = SA::Value> + ?Sized,
    SA::Value: Scalar,
{
    check_dimensions(a, b)?;

    let a = borrow(a);
    let b = borrow(b);
    let workers = config.n_threads.max(1);

    let pool = create_thread_pool(workers)?;
    pool.install(move || spgemm(a, b, workers))
}

fn borrow<S: CsrStorage + ?Sized>(a: &S) -> CsrView<'_, S::Value, S::Index> {
    CsrView::from_parts(
        a.rows(),
        a.cols(),
        a.outer_index(),
        a.inner_index(),
        a.values(),
    )
}

fn check_dimensions<SA, SB>(a: &SA, b: &SB) -> Result<()>
where
    SA: CsrStorage + ?Sized,
    SB: CsrStorage + ?Sized,
{
    if a.cols() != b.rows() {
        return Err(SpmatError::DimensionMismatch {
            left_cols: a.cols(),
            right_rows: b.rows(),
        });
    }
    Ok(())
}

/// Splits `rest` into consecutive mutable slices of the given lengths.
fn split_by_lengths<X>(mut rest: &mut [X], lengths: impl IntoIterator<Item = usize>) -> Vec<&mut [X]> {
    let mut parts = Vec::new();
    for len in lengths {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
        parts.push(head);
        rest = tail;
    }
    parts
}

fn spgemm<T, IA, IB>(
    a: CsrView<'_, T, IA>,
    b: CsrView<'_, T, IB>,
    workers: usize,
) -> Result<CsrMatrix<T, IA>>
where
    T: Scalar,
    IA: CsrIndex,
    IB: CsrIndex,
{
    check_dimensions(&a, &b)?;

    let n = a.rows();
    let m = b.cols();
    checked_index::<IA>(m)?;

    let a_row = a.outer_index();
    let a_col = a.inner_index();
    let a_val = a.values();

    let b_row = b.outer_index();
    let b_col = b.inner_index();
    let b_val = b.values();

    let ranges = chunk_ranges(n, workers);

    debug!(rows = n, cols = m, chunks = ranges.len(), "spgemm symbolic phase");

    // Symbolic phase: row_ptr[ia + 1] receives the size of output row ia
    let mut row_ptr = vec![0usize; n + 1];
    {
        let counts = split_by_lengths(&mut row_ptr[1..], ranges.iter().map(|r| r.len()));

        ranges
            .par_iter()
            .zip(counts.into_par_iter())
            .for_each(|(range, counts)| {
                // Last row that touched each column
                let mut marker = vec![UNSET; m];

                for (ia, count) in range.clone().zip(counts.iter_mut()) {
                    for ja in a_row[ia].index()..a_row[ia + 1].index() {
                        let ca = a_col[ja].index();

                        for jb in b_row[ca].index()..b_row[ca + 1].index() {
                            let cb = b_col[jb].index();

                            if marker[cb] != ia {
                                marker[cb] = ia;
                                *count += 1;
                            }
                        }
                    }
                }
            });
    }

    // Single allocation point, once all row sizes are known
    inclusive_scan_in_place(&mut row_ptr);
    let nnz = row_ptr[n];
    checked_index::<IA>(nnz)?;

    let mut col_idx = vec![IA::zero(); nnz];
    let mut values = vec![T::zero(); nnz];

    debug!(nnz, "spgemm numeric phase");

    {
        let lengths: Vec<usize> = ranges
            .iter()
            .map(|r| row_ptr[r.end] - row_ptr[r.start])
            .collect();
        let col_parts = split_by_lengths(&mut col_idx, lengths.iter().copied());
        let val_parts = split_by_lengths(&mut values, lengths.iter().copied());
        let row_ptr = &row_ptr;

        ranges
            .par_iter()
            .zip(col_parts.into_par_iter())
            .zip(val_parts.into_par_iter())
            .for_each(|((range, cols), vals)| {
                let base = row_ptr[range.start];

                // Output slot of each column within the current row
                let mut slot = vec![UNSET; m];

                for ia in range.clone() {
                    let row_beg = row_ptr[ia] - base;
                    let mut row_end = row_beg;

                    for ja in a_row[ia].index()..a_row[ia + 1].index() {
                        let ca = a_col[ja].index();
                        let va = a_val[ja];

                        for jb in b_row[ca].index()..b_row[ca + 1].index() {
                            let cb = b_col[jb].index();
                            let vb = b_val[jb];

                            // Slots below row_beg belong to earlier rows
                            let s = slot[cb];
                            if s == UNSET || s < row_beg {
                                slot[cb] = row_end;
                                cols[row_end] = IA::from_usize(cb);
                                vals[row_end] = va * vb;
                                row_end += 1;
                            } else {
                                vals[s] += va * vb;
                            }
                        }
                    }

                    debug_assert_eq!(row_end, row_ptr[ia + 1] - base);
                }
            });
    }

    Ok(CsrMatrix {
        n_rows: n,
        n_cols: m,
        row_ptr: row_ptr.into_iter().map(IA::from_usize).collect(),
        col_idx,
        values,
    })
}
