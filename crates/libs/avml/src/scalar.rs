//! Scalar types the kernel is defined over.

use crate::backend::{active, generic};
use bytemuck::Pod;
use num_traits::{Float, Num, NumCast};
use std::{
    fmt::{Debug, Display},
    ops::Neg,
};

mod sealed {
    pub trait Sealed {}
}

/// Element type of every aggregate: `f32`, `f64` or `i32`.
///
/// The reductions and products that dominate the algebra are routed through
/// the backend selected at build time, so every aggregate computes them the
/// same way regardless of which type wraps the data.
pub trait Scalar:
    Pod
    + Default
    + Debug
    + Display
    + PartialOrd
    + Num
    + NumCast
    + Neg<Output = Self>
    + Send
    + Sync
    + sealed::Sealed
{
    /// Sum of the componentwise products, accumulated from zero in index
    /// order.
    fn dot<const N: usize>(a: &[Self; N], b: &[Self; N]) -> Self;

    /// Cross product of two 3-component tuples.
    fn cross(a: &[Self; 3], b: &[Self; 3]) -> [Self; 3];

    /// Product of two row-major matrices; every element accumulates from
    /// zero in `k` order.
    fn mul_rows<const R: usize, const K: usize, const C: usize>(
        a: &[[Self; K]; R],
        b: &[[Self; C]; K],
    ) -> [[Self; C]; R];
}

/// Floating point scalar.
pub trait Real: Scalar + Float {}

impl<T: Scalar + Float> Real for T {}

macro_rules! impl_scalar {
    ($($t:ty => $dot:path, $cross:path, $mul_rows:path);* $(;)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                #[inline]
                fn dot<const N: usize>(a: &[Self; N], b: &[Self; N]) -> Self { $dot(a, b) }

                #[inline]
                fn cross(a: &[Self; 3], b: &[Self; 3]) -> [Self; 3] { $cross(a, b) }

                #[inline]
                fn mul_rows<const R: usize, const K: usize, const C: usize>(
                    a: &[[Self; K]; R],
                    b: &[[Self; C]; K],
                ) -> [[Self; C]; R] {
                    $mul_rows(a, b)
                }
            }
        )*
    };
}

impl_scalar! {
    f32 => active::dot_f32, active::cross_f32, active::mul_rows_f32;
    f64 => active::dot_f64, active::cross_f64, active::mul_rows_f64;
    i32 => generic::dot, generic::cross, generic::mul_rows;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_reductions() {
        assert_eq!(i32::dot(&[1, 2, 3], &[4, 5, 6]), 32);
        assert_eq!(i32::cross(&[1, 0, 0], &[0, 1, 0]), [0, 0, 1]);
        assert_eq!(
            i32::mul_rows(&[[1, 2], [3, 4]], &[[5, 6], [7, 8]]),
            [[19, 22], [43, 50]]
        );
    }

    #[test]
    fn float_reductions() {
        assert_eq!(f32::dot(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
        assert_eq!(f64::dot(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0, 1.0, 1.0]), 10.0);
        assert_eq!(
            f32::cross(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]),
            [1.0, 0.0, 0.0]
        );
    }
}
