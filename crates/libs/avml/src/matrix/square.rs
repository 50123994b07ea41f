//! Determinant and inverse of 2x2, 3x3 and 4x4 matrices.
//!
//! Each size has one closed-form expansion producing both the determinant
//! and the adjugate: direct for 2x2, cross products of rows for 3x3 and
//! 2x2 sub-determinants for 4x4.
//!
//! A matrix is treated as singular when `|det| <= N * eps * Π‖row_i‖₂`.
//! By Hadamard's inequality the ratio `|det| / Π‖row_i‖₂` lies in `[0, 1]`
//! and does not change when a row is rescaled, so homogeneous matrices with
//! a fixed `0 0 0 1` row are judged like any other. Inverting a singular
//! matrix yields a matrix filled with NaN.

use super::Matrix;
use crate::{
    layout::Lanes,
    scalar::{Real, Scalar},
    vector::Vector,
};

/// Square matrices with a closed-form determinant and inverse.
pub trait SquareMatrix<T: Scalar>: Copy {
    /// Determinant.
    fn determinant(&self) -> T;

    /// Inverse, or `None` if the matrix is singular.
    fn try_inverse(&self) -> Option<Self>
    where
        T: Real;

    /// Inverse; every element is NaN if the matrix is singular.
    fn inverse(&self) -> Self
    where
        T: Real;

    /// Whether [`try_inverse`](Self::try_inverse) succeeds.
    fn is_invertible(&self) -> bool
    where
        T: Real,
    {
        self.try_inverse().is_some()
    }
}

/// Determinant of `m`.
#[inline]
pub fn determinant<T: Scalar, M: SquareMatrix<T>>(m: &M) -> T { m.determinant() }

/// Inverse of `m`, NaN-filled if `m` is singular.
#[inline]
pub fn inverse<T: Real, M: SquareMatrix<T>>(m: &M) -> M { m.inverse() }

impl<T: Lanes<N> + Real, const N: usize> Matrix<T, N, N> {
    /// Divides the adjugate by the determinant unless the determinant is
    /// negligible next to the Hadamard bound of the matrix.
    fn finish_inverse(&self, adjugate: Self, det: T) -> Option<Self> {
        let n = (0..N).fold(T::zero(), |acc, _| acc + T::one());
        let threshold = n * T::epsilon();
        // Dividing row by row keeps the ratio clear of overflow and underflow.
        let ratio = self
            .rows()
            .iter()
            .fold(det.abs(), |acc, row| acc / row.length());
        // Negated so that a NaN ratio (zero row or NaN input) counts as singular.
        if !(ratio > threshold) {
            log::trace!(
                "singular {N}x{N} matrix: |det| = {det}, hadamard ratio {ratio} <= {threshold}"
            );
            return None;
        }
        Some(adjugate / det)
    }
}

fn adjugate2<T: Lanes<2>>(m: &Matrix<T, 2, 2>) -> (Matrix<T, 2, 2>, T) {
    let [[a, b], [c, d]] = m.to_array();
    (Matrix::new([[d, -b], [-c, a]]), a * d - b * c)
}

fn adjugate3<T: Lanes<3>>(m: &Matrix<T, 3, 3>) -> (Matrix<T, 3, 3>, T) {
    let [r0, r1, r2] = *m.rows();
    let c0 = r1.cross(r2);
    let c1 = r2.cross(r0);
    let c2 = r0.cross(r1);
    (Matrix::from_columns([c0, c1, c2]), r0.dot(c0))
}

fn adjugate4<T: Lanes<4>>(m: &Matrix<T, 4, 4>) -> (Matrix<T, 4, 4>, T) {
    let [
        [a00, a01, a02, a03],
        [a10, a11, a12, a13],
        [a20, a21, a22, a23],
        [a30, a31, a32, a33],
    ] = m.to_array();

    // 2x2 determinants of the top two rows and of the bottom two rows.
    let s0 = a00 * a11 - a10 * a01;
    let s1 = a00 * a12 - a10 * a02;
    let s2 = a00 * a13 - a10 * a03;
    let s3 = a01 * a12 - a11 * a02;
    let s4 = a01 * a13 - a11 * a03;
    let s5 = a02 * a13 - a12 * a03;

    let c0 = a20 * a31 - a30 * a21;
    let c1 = a20 * a32 - a30 * a22;
    let c2 = a20 * a33 - a30 * a23;
    let c3 = a21 * a32 - a31 * a22;
    let c4 = a21 * a33 - a31 * a23;
    let c5 = a22 * a33 - a32 * a23;

    let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
    let adjugate = Matrix::new([
        [
            a11 * c5 - a12 * c4 + a13 * c3,
            -a01 * c5 + a02 * c4 - a03 * c3,
            a31 * s5 - a32 * s4 + a33 * s3,
            -a21 * s5 + a22 * s4 - a23 * s3,
        ],
        [
            -a10 * c5 + a12 * c2 - a13 * c1,
            a00 * c5 - a02 * c2 + a03 * c1,
            -a30 * s5 + a32 * s2 - a33 * s1,
            a20 * s5 - a22 * s2 + a23 * s1,
        ],
        [
            a10 * c4 - a11 * c2 + a13 * c0,
            -a00 * c4 + a01 * c2 - a03 * c0,
            a30 * s4 - a31 * s2 + a33 * s0,
            -a20 * s4 + a21 * s2 - a23 * s0,
        ],
        [
            -a10 * c3 + a11 * c1 - a12 * c0,
            a00 * c3 - a01 * c1 + a02 * c0,
            -a30 * s3 + a31 * s1 - a32 * s0,
            a20 * s3 - a21 * s1 + a22 * s0,
        ],
    ]);
    (adjugate, det)
}

fn determinant2<T: Lanes<2>>(m: &Matrix<T, 2, 2>) -> T { adjugate2(m).1 }

fn determinant3<T: Lanes<3>>(m: &Matrix<T, 3, 3>) -> T {
    let [r0, r1, r2] = *m.rows();
    r0.dot(r1.cross(r2))
}

fn determinant4<T: Lanes<4>>(m: &Matrix<T, 4, 4>) -> T { adjugate4(m).1 }

macro_rules! impl_square_matrix {
    ($($n:literal => $det:path, $adjugate:path);*) => {
        $(
            impl<T: Lanes<$n>> SquareMatrix<T> for Matrix<T, $n, $n> {
                #[inline]
                fn determinant(&self) -> T { $det(self) }

                fn try_inverse(&self) -> Option<Self>
                where
                    T: Real,
                {
                    let (adjugate, det) = $adjugate(self);
                    self.finish_inverse(adjugate, det)
                }

                fn inverse(&self) -> Self
                where
                    T: Real,
                {
                    self.try_inverse()
                        .unwrap_or_else(|| Self::from_rows([Vector::splat(T::nan()); $n]))
                }
            }
        )*
    };
}

impl_square_matrix! {
    2 => determinant2, adjugate2;
    3 => determinant3, adjugate3;
    4 => determinant4, adjugate4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mat2d, Mat2f, Mat2i, Mat3d, Mat3f, Mat3i, Mat4d, Mat4f, Mat4i};
    use approx::{assert_relative_eq, assert_ulps_eq};
    use proptest::{array, prelude::*};

    fn all_nan<const N: usize>(m: &Matrix<f64, N, N>) -> bool
    where
        f64: Lanes<N>,
    {
        m.as_slice().iter().all(|x| x.is_nan())
    }

    #[test]
    fn determinants() {
        assert_eq!(Mat2i::new([[1, 2], [3, 4]]).determinant(), -2);
        assert_eq!(Mat3i::new([[1, 2, 3], [0, 1, 4], [5, 6, 0]]).determinant(), 1);
        assert_eq!(
            Mat4i::new([[1, 0, 2, -1], [3, 0, 0, 5], [2, 1, 4, -3], [1, 0, 5, 0]]).determinant(),
            30
        );
        assert_eq!(determinant(&Mat4f::identity()), 1.0);
        assert_eq!(determinant(&Mat3f::from_diagonal(2.0)), 8.0);
    }

    #[test]
    fn known_inverses() {
        let m = Mat2d::new([[4.0, 7.0], [2.0, 6.0]]);
        assert_relative_eq!(m.inverse(), Mat2d::new([[0.6, -0.7], [-0.2, 0.4]]), epsilon = 1.0e-12);

        let m = Mat3d::new([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        let expected = Mat3d::new([[-24.0, 18.0, 5.0], [20.0, -15.0, -4.0], [-5.0, 4.0, 1.0]]);
        assert_eq!(m.inverse(), expected);

        let scale = Mat4d::from_diagonal(4.0);
        assert_ulps_eq!(inverse(&scale), Mat4d::from_diagonal(0.25));
    }

    #[test]
    fn singular_matrices_invert_to_nan() {
        assert!(all_nan(&Mat2d::zero().inverse()));
        let repeated = Mat3d::new([[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert!(all_nan(&repeated.inverse()));
        assert!(all_nan(&Mat4d::new([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [1.0, 2.0, 3.0, 4.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
        .inverse()));
        let dependent = Mat3f::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert!(dependent.try_inverse().is_none());
        assert!(!Mat2f::zero().is_invertible());
        assert!(Mat2f::identity().is_invertible());
    }

    #[test]
    fn singularity_is_scale_invariant() {
        let tiny = Mat3d::from_diagonal(1.0e-30);
        assert!(tiny.is_invertible());
        assert_relative_eq!(tiny.inverse(), Mat3d::from_diagonal(1.0e30), max_relative = 1.0e-12);
        let nearly = Mat2d::new([[1.0, 1.0], [1.0, 1.0 + f64::EPSILON]]);
        assert!(!nearly.is_invertible());
    }

    #[test]
    fn homogeneous_matrices_are_invertible() {
        let shift = Mat4f::new([
            [1.0, 0.0, 0.0, 100.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!(shift.is_invertible());
        let back = shift.inverse();
        assert_eq!(back.row(0).to_array(), [1.0, 0.0, 0.0, -100.0]);
        assert_eq!(back * shift, Mat4f::identity());

        let far = Mat4d::new([
            [1.0, 0.0, 0.0, 1.0e4],
            [0.0, 1.0, 0.0, -2.0e4],
            [0.0, 0.0, 1.0, 3.0e4],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_relative_eq!(far.inverse() * far, Mat4d::identity(), epsilon = 1.0e-12);

        let shrink = Mat4f::new([
            [1.0e-3, 0.0, 0.0, 0.0],
            [0.0, 1.0e-3, 0.0, 0.0],
            [0.0, 0.0, 1.0e-3, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!(shrink.is_invertible());
        assert_relative_eq!(shrink.inverse() * shrink, Mat4f::identity(), epsilon = 1.0e-5);
    }

    #[test]
    fn singular_input_is_traced() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert!(Mat4f::zero().try_inverse().is_none());
    }

    proptest! {
        #[test]
        fn inverse_round_trip_4x4(rows in array::uniform4(array::uniform4(-10.0f64..10.0))) {
            let m = Mat4d::new(rows) + Mat4d::from_diagonal(50.0);
            let inv = m.inverse();
            prop_assert!(approx::abs_diff_eq!(inv * m, Mat4d::identity(), epsilon = 1.0e-9));
            prop_assert!(approx::abs_diff_eq!(m * inv, Mat4d::identity(), epsilon = 1.0e-9));
        }

        #[test]
        fn inverse_round_trip_3x3(rows in array::uniform3(array::uniform3(-10.0f64..10.0))) {
            let m = Mat3d::new(rows) + Mat3d::from_diagonal(40.0);
            let round_trip = m.inverse() * m;
            prop_assert!(approx::abs_diff_eq!(round_trip, Mat3d::identity(), epsilon = 1.0e-9));
        }

        #[test]
        fn determinant_of_product(
            a in array::uniform3(array::uniform3(-4i32..4)),
            b in array::uniform3(array::uniform3(-4i32..4)),
        ) {
            let (a, b) = (Mat3i::new(a), Mat3i::new(b));
            prop_assert_eq!((a * b).determinant(), a.determinant() * b.determinant());
        }

        #[test]
        fn determinant_of_transpose(rows in array::uniform4(array::uniform4(-5i32..5))) {
            let m = Mat4i::new(rows);
            prop_assert_eq!(m.transpose().determinant(), m.determinant());
        }
    }
}
