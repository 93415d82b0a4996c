//! # spmat: sparse matrix kernel for algebraic multigrid
//!
//! The compressed-row algebra that an AMG setup phase is built on: transpose,
//! sparse matrix-matrix product, dense inversion of small blocks and diagonal
//! extraction.
//!
//! ## Overview
//!
//! - [`CsrStorage`] is the one interface every algorithm reads. It is
//!   implemented by the owning [`CsrMatrix`], by the borrowing [`CsrView`] and
//!   [`CsrViewMut`], and can be implemented by any other CRS-shaped type, so
//!   externally assembled matrices are used in place without copying.
//! - Every algorithm returns a freshly allocated [`CsrMatrix`].
//! - [`product`] is the only parallel kernel: a two-phase symbolic/numeric
//!   SpGEMM over a static row partition, deterministic for any worker count.
//! - [`inverse`] is Gauss-Jordan elimination with full pivoting on a dense
//!   scratch buffer, a fallback for small coarse-level blocks.
//!
//! ## Usage
//!
//! ```
//! use spmat::{map, product, transpose, inverse, diagonal};
//!
//! // 1D Poisson, n = 3, held in caller-owned buffers
//! let ptr = [0i32, 2, 5, 7];
//! let col = [0i32, 1, 0, 1, 2, 1, 2];
//! let val = [2.0f64, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0];
//!
//! let a = map(3, 3, &ptr, &col, &val).unwrap();
//!
//! let t = transpose(&a).unwrap();
//! let inv = inverse(&a).unwrap();
//! let c = product(&a, &inv).unwrap();
//!
//! assert_eq!(t.nnz(), 7);
//! assert_eq!(diagonal(&a).unwrap(), vec![2.0, 2.0, 2.0]);
//! assert!((inv.values[0] - 0.75).abs() < 1e-12);
//! assert!((c.values[0] - 1.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod matrix;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use error::{Result, SpmatError};
pub use matrix::{
    check_structure, diagonal, gauss_jordan, inverse, map, reference_product, sort_rows,
    transpose,
};
pub use matrix::{CsrIndex, CsrMatrix, CsrStorage, CsrStorageMut, CsrView, CsrViewMut, Scalar};
pub use matrix::SpmatConfig;
pub use parallel::{create_thread_pool, product, product_with_config};
pub use utils::{from_dense, from_sprs_csr, poisson_1d, poisson_2d, to_dense, to_sprs_csr};

/// Version information for the spmat library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
