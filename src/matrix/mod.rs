// Matrix data structures and operations

pub mod config;
pub mod csr;
pub mod diagonal;
pub mod inverse;
pub mod reference;
pub mod scalar;
pub mod storage;
pub mod transpose;
pub mod view;

pub use config::SpmatConfig;
pub use csr::CsrMatrix;
pub use diagonal::diagonal;
pub use inverse::{gauss_jordan, inverse};
pub use reference::reference_product;
pub use scalar::Scalar;
pub use storage::{check_structure, sort_rows, CsrIndex, CsrStorage, CsrStorageMut, RowIter};
pub use transpose::transpose;
pub use view::{map, CsrView, CsrViewMut};
