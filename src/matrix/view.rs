//! Non-owning views over externally owned compressed-row buffers
//!
//! A view lets matrix assembly code, a distributed layer or an FFI caller hand
//! its own row-pointer, column-index and value arrays to the algorithms in
//! this crate without copying them.

use crate::error::{Result, SpmatError};
use crate::matrix::storage::{check_structure, CsrIndex, CsrStorage, CsrStorageMut};

/// Read-only view over borrowed CSR buffers
#[derive(Debug, Clone, Copy)]
pub struct CsrView<'a, T, I = usize> {
    n_rows: usize,
    n_cols: usize,
    row_ptr: &'a [I],
    col_idx: &'a [I],
    values: &'a [T],
}

impl<'a, T: Copy, I: CsrIndex> CsrView<'a, T, I> {
    /// Wraps the given buffers after validating their structure
    ///
    /// The column and value buffers may be longer than `row_ptr[n_rows]`; only
    /// the leading `nnz` entries are part of the matrix.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: &'a [I],
        col_idx: &'a [I],
        values: &'a [T],
    ) -> Result<Self> {
        let view = Self::from_parts(n_rows, n_cols, row_ptr, col_idx, values);
        check_structure(&view)?;
        Ok(view)
    }

    /// Builds a view over raw pointers handed in by foreign code
    ///
    /// # Safety
    ///
    /// `row_ptr` must point to `n_rows + 1` initialized indices forming a
    /// valid row pointer, and `col_idx` and `values` must each point to at
    /// least `row_ptr[n_rows]` initialized elements. All three buffers must
    /// stay alive and unmodified for the whole lifetime `'a`.
    ///
    /// A negative `row_ptr[n_rows]` is rejected with `InvalidStructure`
    /// before the column and value buffers are touched.
    pub unsafe fn from_raw_parts(
        n_rows: usize,
        n_cols: usize,
        row_ptr: *const I,
        col_idx: *const I,
        values: *const T,
    ) -> Result<Self> {
        let row_ptr = std::slice::from_raw_parts(row_ptr, n_rows + 1);
        let last = row_ptr[n_rows];
        if last < I::zero() {
            return Err(SpmatError::InvalidStructure(format!(
                "row pointer ends at {:?}, expected a non-negative count",
                last
            )));
        }
        let nnz = last.index();
        let col_idx = std::slice::from_raw_parts(col_idx, nnz);
        let values = std::slice::from_raw_parts(values, nnz);

        Self::new(n_rows, n_cols, row_ptr, col_idx, values)
    }

    pub(crate) fn from_parts(
        n_rows: usize,
        n_cols: usize,
        row_ptr: &'a [I],
        col_idx: &'a [I],
        values: &'a [T],
    ) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }
}

/// Shorthand for [`CsrView::new`].
pub fn map<'a, T: Copy, I: CsrIndex>(
    n_rows: usize,
    n_cols: usize,
    row_ptr: &'a [I],
    col_idx: &'a [I],
    values: &'a [T],
) -> Result<CsrView<'a, T, I>> {
    CsrView::new(n_rows, n_cols, row_ptr, col_idx, values)
}

impl<T: Copy, I: CsrIndex> CsrStorage for CsrView<'_, T, I> {
    type Index = I;
    type Value = T;

    fn rows(&self) -> usize {
        self.n_rows
    }

    fn cols(&self) -> usize {
        self.n_cols
    }

    fn outer_index(&self) -> &[I] {
        self.row_ptr
    }

    fn inner_index(&self) -> &[I] {
        self.col_idx
    }

    fn values(&self) -> &[T] {
        self.values
    }
}

/// Mutable view over borrowed CSR buffers
///
/// Only the column and value arrays can be modified through the view; the row
/// pointer is borrowed mutably so the adapter's mutable accessor is available,
/// but algorithms in this crate never rewrite it.
#[derive(Debug)]
pub struct CsrViewMut<'a, T, I = usize> {
    n_rows: usize,
    n_cols: usize,
    row_ptr: &'a mut [I],
    col_idx: &'a mut [I],
    values: &'a mut [T],
}

impl<'a, T: Copy, I: CsrIndex> CsrViewMut<'a, T, I> {
    /// Wraps the given buffers after validating their structure
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: &'a mut [I],
        col_idx: &'a mut [I],
        values: &'a mut [T],
    ) -> Result<Self> {
        let view = Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        };
        check_structure(&view)?;
        Ok(view)
    }

    /// Reborrows as a read-only view
    pub fn as_view(&self) -> CsrView<'_, T, I> {
        CsrView::from_parts(
            self.n_rows,
            self.n_cols,
            &*self.row_ptr,
            &*self.col_idx,
            &*self.values,
        )
    }
}

impl<T: Copy, I: CsrIndex> CsrStorage for CsrViewMut<'_, T, I> {
    type Index = I;
    type Value = T;

    fn rows(&self) -> usize {
        self.n_rows
    }

    fn cols(&self) -> usize {
        self.n_cols
    }

    fn outer_index(&self) -> &[I] {
        &*self.row_ptr
    }

    fn inner_index(&self) -> &[I] {
        &*self.col_idx
    }

    fn values(&self) -> &[T] {
        &*self.values
    }
}

impl<T: Copy, I: CsrIndex> CsrStorageMut for CsrViewMut<'_, T, I> {
    fn outer_index_mut(&mut self) -> &mut [I] {
        &mut *self.row_ptr
    }

    fn inner_index_mut(&mut self) -> &mut [I] {
        &mut *self.col_idx
    }

    fn values_mut(&mut self) -> &mut [T] {
        &mut *self.values
    }

    fn parts_mut(&mut self) -> (&[I], &mut [I], &mut [T]) {
        (&*self.row_ptr, &mut *self.col_idx, &mut *self.values)
    }
}
