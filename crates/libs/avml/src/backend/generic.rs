//! Portable implementation family.
//!
//! Also the reference the vectorized families are checked against: they
//! must perform the same operations in the same order.

use crate::scalar::Scalar;

/// Sum of the componentwise products, accumulated from zero in index order.
#[inline]
pub fn dot<T: Scalar, const N: usize>(a: &[T; N], b: &[T; N]) -> T {
    let mut acc = T::zero();
    for i in 0..N {
        acc = acc + a[i] * b[i];
    }
    acc
}

/// Cross product of two 3-component tuples.
#[inline]
pub fn cross<T: Scalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Row-major matrix product, each element accumulated from zero in `k`
/// order.
#[inline]
pub fn mul_rows<T: Scalar, const R: usize, const K: usize, const C: usize>(
    a: &[[T; K]; R],
    b: &[[T; C]; K],
) -> [[T; C]; R] {
    let mut out = [[T::zero(); C]; R];
    for i in 0..R {
        for k in 0..K {
            for j in 0..C {
                out[i][j] = out[i][j] + a[i][k] * b[k][j];
            }
        }
    }
    out
}

macro_rules! monomorphic {
    ($($t:ty => $dot:ident, $cross:ident, $mul_rows:ident);*) => {
        $(
            #[inline]
            pub fn $dot<const N: usize>(a: &[$t; N], b: &[$t; N]) -> $t { dot(a, b) }

            #[inline]
            pub fn $cross(a: &[$t; 3], b: &[$t; 3]) -> [$t; 3] { cross(a, b) }

            #[inline]
            pub fn $mul_rows<const R: usize, const K: usize, const C: usize>(
                a: &[[$t; K]; R],
                b: &[[$t; C]; K],
            ) -> [[$t; C]; R] {
                mul_rows(a, b)
            }
        )*
    };
}

monomorphic! {
    f32 => dot_f32, cross_f32, mul_rows_f32;
    f64 => dot_f64, cross_f64, mul_rows_f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_accumulates_from_zero() {
        assert_eq!(dot(&[1.0f32, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        // -0 + 0 products end at +0.
        assert!(dot(&[-0.0f32, -0.0], &[1.0, 1.0]).is_sign_positive());
    }

    #[test]
    fn mul_rows_rectangular() {
        let a = [[1, 2, 3], [4, 5, 6]];
        let b = [[7, 8], [9, 10], [11, 12]];
        assert_eq!(mul_rows(&a, &b), [[58, 64], [139, 154]]);
    }
}
