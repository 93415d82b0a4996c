//! Basic tests for the owning matrix, views and diagonal extraction

use spmat::{diagonal, map, CsrMatrix, CsrStorage, CsrView, SpmatError};

#[test]
fn test_matrix_creation_csr() {
    let matrix = CsrMatrix::new(
        3,
        3,
        vec![0usize, 2, 3, 5],
        vec![0, 1, 1, 0, 2],
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
    )
    .unwrap();

    assert_eq!(matrix.n_rows, 3);
    assert_eq!(matrix.n_cols, 3);
    assert_eq!(matrix.nnz(), 5);
    assert_eq!(matrix.nonzeros(), matrix.row_ptr[3]);

    // Check first row
    let first_row: Vec<_> = matrix.row_iter(0).collect();
    assert_eq!(first_row, vec![(0, &1.0), (1, &2.0)]);

    // Check third row
    let third_row: Vec<_> = matrix.row_iter(2).collect();
    assert_eq!(third_row, vec![(0, &4.0), (2, &5.0)]);
}

#[test]
fn test_copy_is_deep() {
    let original = CsrMatrix::<f64>::identity(3);
    let mut copy = original.clone();

    copy.values[1] = 7.0;

    assert_eq!(original.values, vec![1.0, 1.0, 1.0]);
    assert_eq!(copy.values, vec![1.0, 7.0, 1.0]);
}

#[test]
fn test_owning_matrix_from_foreign_buffers() {
    let ptr: Vec<i64> = vec![0, 1, 3];
    let col: Vec<i64> = vec![1, 0, 1];
    let val: Vec<f64> = vec![2.0, 3.0, 4.0];

    let view = map(2, 2, &ptr, &col, &val).unwrap();
    let owned = CsrMatrix::from_storage(&view);

    assert_eq!(owned.row_ptr, ptr);
    assert_eq!(owned.col_idx, col);
    assert_eq!(owned.values, val);

    // The copy outlives the buffers it came from
    drop(view);
    drop(ptr);
    assert_eq!(owned.nnz(), 3);
}

#[test]
fn test_view_of_owning_matrix() {
    let matrix = CsrMatrix::<f64, u32>::identity(4);
    let view = matrix.view();

    assert_eq!(view.rows(), 4);
    assert_eq!(view.cols(), 4);
    assert_eq!(view.nonzeros(), 4);
    assert_eq!(view.outer_index(), matrix.row_ptr.as_slice());
}

#[test]
fn test_invalid_view() {
    let ptr = [0usize, 2, 1];
    let col = [0usize, 1];
    let val = [1.0f64, 2.0];

    assert!(matches!(
        CsrView::new(2, 2, &ptr, &col, &val),
        Err(SpmatError::InvalidStructure(_))
    ));
}

#[test]
fn test_diagonal_extraction() {
    // [ 4 -1  0  0]
    // [-1  4 -1  0]
    // [ 0  0  0  0]   (no stored diagonal)
    // [ 0  0 -1  9]
    // Diagonals are stored last in their rows
    let a = CsrMatrix::new(
        4,
        4,
        vec![0usize, 2, 5, 5, 7],
        vec![1, 0, 0, 2, 1, 2, 3],
        vec![-1.0, 4.0, -1.0, -1.0, 4.0, -1.0, 9.0],
    )
    .unwrap();

    assert_eq!(diagonal(&a).unwrap(), vec![4.0, 4.0, 0.0, 9.0]);
}

#[test]
fn test_diagonal_of_empty_matrix() {
    let a = CsrMatrix::<f64>::empty();
    assert!(diagonal(&a).unwrap().is_empty());
}
