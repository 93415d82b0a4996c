//! Owning Compressed Sparse Row (CSR) matrix

use std::fmt;

use num_traits::{One, Zero};

use crate::error::{Result, SpmatError};
use crate::matrix::storage::{self, check_structure, CsrIndex, CsrStorage, CsrStorageMut, RowIter};
use crate::matrix::view::CsrView;

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// The number of stored entries is always `row_ptr[n_rows]`; it is never kept
/// separately. Column indices within a row need not be sorted.
#[derive(Clone, PartialEq)]
pub struct CsrMatrix<T, I = usize> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub row_ptr: Vec<I>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<I>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,
}

impl<T: Copy, I: CsrIndex> CsrMatrix<T, I> {
    /// Creates a new CSR matrix with the given dimensions and data
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_ptr` - Row pointers
    /// * `col_idx` - Column indices
    /// * `values` - Non-zero values
    ///
    /// # Errors
    ///
    /// Returns `InvalidStructure` if the arrays are inconsistent:
    /// - row_ptr.len() must be n_rows + 1, start at 0 and never decrease
    /// - col_idx.len() and values.len() must both equal row_ptr[n_rows]
    /// - every column index must be smaller than n_cols
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<I>,
        col_idx: Vec<I>,
        values: Vec<T>,
    ) -> Result<Self> {
        let matrix = Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        };

        check_structure(&matrix)?;

        let nnz = matrix.nnz();
        if matrix.col_idx.len() != nnz || matrix.values.len() != nnz {
            return Err(SpmatError::InvalidStructure(format!(
                "col_idx.len() = {} and values.len() = {} must both equal row_ptr[n_rows] = {}",
                matrix.col_idx.len(),
                matrix.values.len(),
                nnz
            )));
        }

        Ok(matrix)
    }

    /// Creates an empty 0 × 0 matrix
    pub fn empty() -> Self {
        Self {
            n_rows: 0,
            n_cols: 0,
            row_ptr: vec![I::zero()],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Deep-copies any compressed-row source into an owning matrix
    ///
    /// Exactly `nonzeros(a)` entries are copied, even if the source buffers
    /// are longer.
    pub fn from_storage<S>(a: &S) -> Self
    where
        S: CsrStorage<Index = I, Value = T> + ?Sized,
    {
        let nnz = a.nonzeros();

        Self {
            n_rows: a.rows(),
            n_cols: a.cols(),
            row_ptr: a.outer_index()[..=a.rows()].to_vec(),
            col_idx: a.inner_index()[..nnz].to_vec(),
            values: a.values()[..nnz].to_vec(),
        }
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![I::zero(); n_rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.row_ptr[self.n_rows].index()
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> RowIter<'_, I, T> {
        assert!(i < self.n_rows, "Row index out of bounds");
        self.row(i)
    }

    /// Borrows the matrix as a non-owning view
    pub fn view(&self) -> CsrView<'_, T, I> {
        CsrView::from_parts(
            self.n_rows,
            self.n_cols,
            &self.row_ptr,
            &self.col_idx,
            &self.values,
        )
    }

    /// Sorts every row by column index
    pub fn sort_rows(&mut self) {
        storage::sort_rows(self);
    }

    /// Releases all storage and resets the dimensions to zero
    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}

impl<T: Copy + Default, I: CsrIndex> CsrMatrix<T, I> {
    /// Creates a matrix with a zeroed row pointer and room for `nnz` entries
    ///
    /// The column and value arrays are sized (not just reserved) to `nnz`, so
    /// the caller can fill them by index before writing the row pointer.
    pub fn with_capacity(n_rows: usize, n_cols: usize, nnz: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![I::zero(); n_rows + 1],
            col_idx: vec![I::zero(); nnz],
            values: vec![T::default(); nnz],
        }
    }

    /// Resizes the column and value storage to hold `nnz` entries
    pub fn reserve(&mut self, nnz: usize) {
        self.col_idx.resize(nnz, I::zero());
        self.values.resize(nnz, T::default());
    }
}

impl<T: Copy + Zero + One, I: CsrIndex> CsrMatrix<T, I> {
    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            row_ptr: (0..=n).map(I::from_usize).collect(),
            col_idx: (0..n).map(I::from_usize).collect(),
            values: vec![T::one(); n],
        }
    }
}

impl<T: Copy, I: CsrIndex> Default for CsrMatrix<T, I> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Copy, I: CsrIndex> CsrStorage for CsrMatrix<T, I> {
    type Index = I;
    type Value = T;

    fn rows(&self) -> usize {
        self.n_rows
    }

    fn cols(&self) -> usize {
        self.n_cols
    }

    fn outer_index(&self) -> &[I] {
        &self.row_ptr
    }

    fn inner_index(&self) -> &[I] {
        &self.col_idx
    }

    fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: Copy, I: CsrIndex> CsrStorageMut for CsrMatrix<T, I> {
    fn outer_index_mut(&mut self) -> &mut [I] {
        &mut self.row_ptr
    }

    fn inner_index_mut(&mut self) -> &mut [I] {
        &mut self.col_idx
    }

    fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    fn parts_mut(&mut self) -> (&[I], &mut [I], &mut [T]) {
        (&self.row_ptr, &mut self.col_idx, &mut self.values)
    }
}

impl<T: fmt::Debug + Copy, I: CsrIndex> fmt::Debug for CsrMatrix<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CsrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let len = self.row(i).len();

                if len == 0 {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(len);

                    for (col, val) in self.row(i).take(max_elements) {
                        write!(f, "({}, {:?}) ", col, val)?;
                    }

                    if len > max_elements {
                        write!(f, "... ({} more)", len - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix() {
        let matrix = CsrMatrix::new(
            3,
            3,
            vec![0usize, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        )
        .unwrap();

        assert_eq!(matrix.n_rows, 3);
        assert_eq!(matrix.n_cols, 3);
        assert_eq!(matrix.nnz(), 5);
    }

    #[test]
    fn test_row_iter() {
        let matrix = CsrMatrix::new(
            3,
            3,
            vec![0usize, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        )
        .unwrap();

        let row0: Vec<_> = matrix.row_iter(0).collect();
        assert_eq!(row0, vec![(0, &1), (1, &2)]);

        let row1: Vec<_> = matrix.row_iter(1).collect();
        assert_eq!(row1, vec![(1, &3)]);

        let row2: Vec<_> = matrix.row_iter(2).collect();
        assert_eq!(row2, vec![(0, &4), (2, &5)]);
    }

    #[test]
    fn test_identity() {
        let identity = CsrMatrix::<i32>::identity(3);

        assert_eq!(identity.n_rows, 3);
        assert_eq!(identity.n_cols, 3);
        assert_eq!(identity.nnz(), 3);

        assert_eq!(identity.row_ptr, vec![0, 1, 2, 3]);
        assert_eq!(identity.col_idx, vec![0, 1, 2]);
        assert_eq!(identity.values, vec![1, 1, 1]);
    }

    #[test]
    fn test_invalid_row_ptr() {
        let err = CsrMatrix::new(
            3,
            3,
            vec![0usize, 2, 3], // Missing last element
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        )
        .unwrap_err();

        assert!(matches!(err, SpmatError::InvalidStructure(_)));
    }

    #[test]
    fn test_inconsistent_lengths() {
        let err = CsrMatrix::new(
            3,
            3,
            vec![0usize, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4], // Missing last element
        )
        .unwrap_err();

        assert!(matches!(err, SpmatError::InvalidStructure(_)));
    }

    #[test]
    fn test_column_out_of_bounds() {
        let err = CsrMatrix::new(2, 2, vec![0u32, 1, 2], vec![0, 2], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SpmatError::InvalidStructure(_)));
    }

    #[test]
    fn test_with_capacity_and_reserve() {
        let mut matrix = CsrMatrix::<f64, i64>::with_capacity(4, 3, 6);

        assert_eq!(matrix.row_ptr, vec![0; 5]);
        assert_eq!(matrix.col_idx.len(), 6);
        assert_eq!(matrix.values.len(), 6);
        // Nothing has been written to the row pointer yet
        assert_eq!(matrix.nnz(), 0);

        matrix.reserve(10);
        assert_eq!(matrix.col_idx.len(), 10);
        assert_eq!(matrix.values.len(), 10);
    }

    #[test]
    fn test_clear() {
        let mut matrix = CsrMatrix::<f64>::identity(4);
        matrix.clear();

        assert_eq!(matrix.n_rows, 0);
        assert_eq!(matrix.n_cols, 0);
        assert_eq!(matrix.nnz(), 0);
        assert!(matrix.col_idx.is_empty());
        assert!(matrix.values.is_empty());
        assert_eq!(matrix, CsrMatrix::default());
    }

    #[test]
    fn test_from_storage_copies_exact_nnz() {
        // Buffers longer than the row pointer says
        let row = [0u32, 1, 2];
        let col = [1u32, 0, 7, 7];
        let val = [3.0f64, 4.0, 9.0, 9.0];

        let view = CsrView::new(2, 2, &row, &col, &val).unwrap();
        let owned = CsrMatrix::from_storage(&view);

        assert_eq!(owned.col_idx, vec![1, 0]);
        assert_eq!(owned.values, vec![3.0, 4.0]);
        assert_eq!(owned.nnz(), 2);
    }

    #[test]
    fn test_sort_rows() {
        let mut matrix = CsrMatrix::new(
            2,
            3,
            vec![0usize, 3, 4],
            vec![2, 0, 1, 1],
            vec![30, 10, 20, 40],
        )
        .unwrap();

        matrix.sort_rows();

        assert_eq!(matrix.col_idx, vec![0, 1, 2, 1]);
        assert_eq!(matrix.values, vec![10, 20, 30, 40]);
    }
}
