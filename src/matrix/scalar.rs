//! Value types supported by the arithmetic kernels

use std::fmt::Debug;
use std::ops::AddAssign;

use num_complex::Complex;
use num_traits::{Float, Num, NumAssign};

/// A matrix entry type.
///
/// `modulus` is the magnitude used by full pivoting: the absolute value for
/// reals and the complex modulus for complex numbers.
pub trait Scalar: Copy + Num + AddAssign + Send + Sync + Debug + 'static {
    /// Real type of the magnitude.
    type Real: Float + Debug;

    fn modulus(self) -> Self::Real;
}

impl Scalar for f32 {
    type Real = f32;

    #[inline]
    fn modulus(self) -> f32 {
        self.abs()
    }
}

impl Scalar for f64 {
    type Real = f64;

    #[inline]
    fn modulus(self) -> f64 {
        self.abs()
    }
}

impl<R> Scalar for Complex<R>
where
    R: Float + NumAssign + Send + Sync + Debug + 'static,
{
    type Real = R;

    #[inline]
    fn modulus(self) -> R {
        self.norm()
    }
}
