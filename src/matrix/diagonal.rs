//! Diagonal extraction

use num_traits::Zero;

use crate::error::{Result, SpmatError};
use crate::matrix::storage::CsrStorage;

/// Returns the main diagonal of a square matrix as a dense vector
///
/// Rows are not assumed sorted; the first entry with column `i` found while
/// scanning row `i` wins. Missing diagonal entries are zero.
pub fn diagonal<S>(a: &S) -> Result<Vec<S::Value>>
where
    S: CsrStorage + ?Sized,
    S::Value: Zero,
{
    let n = a.rows();
    if n != a.cols() {
        return Err(SpmatError::NotSquare {
            rows: n,
            cols: a.cols(),
        });
    }

    let diag = (0..n)
        .map(|i| {
            a.row(i)
                .find(|&(col, _)| col == i)
                .map_or_else(S::Value::zero, |(_, &val)| val)
        })
        .collect();

    Ok(diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CsrMatrix;

    #[test]
    fn test_diagonal_with_missing_entry() {
        // [1 2 0]
        // [3 0 4]
        // [0 5 6]
        let a = CsrMatrix::new(
            3,
            3,
            vec![0usize, 2, 4, 6],
            vec![1, 0, 0, 2, 2, 1],
            vec![2.0, 1.0, 3.0, 4.0, 6.0, 5.0],
        )
        .unwrap();

        assert_eq!(diagonal(&a).unwrap(), vec![1.0, 0.0, 6.0]);
    }

    #[test]
    fn test_diagonal_first_match_wins() {
        let a = CsrMatrix::new(1, 1, vec![0usize, 2], vec![0, 0], vec![7, 9]).unwrap();
        assert_eq!(diagonal(&a).unwrap(), vec![7]);
    }

    #[test]
    fn test_diagonal_not_square() {
        let a = CsrMatrix::<f64>::zeros(3, 2);
        assert!(matches!(
            diagonal(&a),
            Err(SpmatError::NotSquare { rows: 3, cols: 2 })
        ));
    }
}
