//! Rigid and affine transforms.
//!
//! Every transform converts to a homogeneous matrix (`3x3` in 2D, `4x4` in
//! 3D) and can also be applied directly, which is cheaper than going through
//! the matrix: a translation is a vector add, a scaling a componentwise
//! product.
//!
//! [`Affine3D`] and [`Affine2D`] own a composed matrix. Composition follows
//! the column vector convention: `affine3d![a, b, c]` holds `A · B · C`, so
//! the **last** transform is applied first.
//!
//! ```
//! use avml::{affine3d, Pnt3d, Scaling3D, Transform3D, Translation3D};
//!
//! let t = Translation3D::new(1.0, 1.0, 1.0);
//! let s = Scaling3D::uniform(2.0);
//! // Scale first, then translate.
//! assert_eq!(affine3d![t, s].transform_point(Pnt3d::origin()), Pnt3d::new(1.0, 1.0, 1.0));
//! // Translate first, then scale.
//! assert_eq!(affine3d![s, t].transform_point(Pnt3d::origin()), Pnt3d::new(2.0, 2.0, 2.0));
//! ```

use crate::{
    algebra,
    layout::Lanes,
    matrix::{Matrix, SquareMatrix},
    point::Point,
    scalar::Real,
    unit::UnitVector,
    vector::Vector,
};
use std::ops::Mul;

/// Transform of the plane.
pub trait Transform2D<T>
where
    T: Real + Lanes<2> + Lanes<3>,
{
    /// Homogeneous matrix of the transform.
    fn as_matrix(&self) -> Matrix<T, 3, 3>;

    /// Transforms a point (`w = 1`).
    fn transform_point(&self, p: Point<T, 2>) -> Point<T, 2> {
        Point::from_vector((self.as_matrix() * p.to_vector().extend(T::one())).truncate())
    }

    /// Transforms a vector (`w = 0`); translations leave it unchanged.
    fn transform_vector(&self, v: Vector<T, 2>) -> Vector<T, 2> {
        (self.as_matrix() * v.extend(T::zero())).truncate()
    }
}

/// Transform of space.
pub trait Transform3D<T>
where
    T: Real + Lanes<3> + Lanes<4>,
{
    /// Homogeneous matrix of the transform.
    fn as_matrix(&self) -> Matrix<T, 4, 4>;

    /// Transforms a point (`w = 1`).
    fn transform_point(&self, p: Point<T, 3>) -> Point<T, 3> {
        Point::from_vector((self.as_matrix() * p.to_vector().extend(T::one())).truncate())
    }

    /// Transforms a vector (`w = 0`); translations leave it unchanged.
    fn transform_vector(&self, v: Vector<T, 3>) -> Vector<T, 3> {
        (self.as_matrix() * v.extend(T::zero())).truncate()
    }
}

/// Homogeneous 2D translation matrix.
pub fn translation_matrix<T: Real + Lanes<2> + Lanes<3>>(
    offset: Vector<T, 2>,
) -> Matrix<T, 3, 3> {
    let (o, l) = (T::zero(), T::one());
    let [x, y] = offset.to_array();
    Matrix::new([[l, o, x], [o, l, y], [o, o, l]])
}

/// Homogeneous 2D scaling matrix.
pub fn scaling_matrix<T: Real + Lanes<2> + Lanes<3>>(
    factors: Vector<T, 2>,
) -> Matrix<T, 3, 3> {
    let mut m = Matrix::identity();
    for (i, k) in factors.to_array().into_iter().enumerate() {
        m[i][i] = k;
    }
    m
}

/// Homogeneous 2D counterclockwise rotation matrix.
pub fn rotation_matrix<T: Real + Lanes<3>>(angle: T) -> Matrix<T, 3, 3> {
    let (s, c) = angle.sin_cos();
    let (o, l) = (T::zero(), T::one());
    Matrix::new([[c, -s, o], [s, c, o], [o, o, l]])
}

/// Homogeneous 3D translation matrix.
pub fn translation_matrix3<T: Real + Lanes<3> + Lanes<4>>(
    offset: Vector<T, 3>,
) -> Matrix<T, 4, 4> {
    let (o, l) = (T::zero(), T::one());
    let [x, y, z] = offset.to_array();
    Matrix::new([[l, o, o, x], [o, l, o, y], [o, o, l, z], [o, o, o, l]])
}

/// Homogeneous 3D scaling matrix.
pub fn scaling_matrix3<T: Real + Lanes<3> + Lanes<4>>(
    factors: Vector<T, 3>,
) -> Matrix<T, 4, 4> {
    let mut m = Matrix::identity();
    for (i, k) in factors.to_array().into_iter().enumerate() {
        m[i][i] = k;
    }
    m
}

/// Homogeneous matrix of the rotation by `angle` radians about the x axis.
pub fn x_rotation_matrix<T: Real + Lanes<3> + Lanes<4>>(angle: T) -> Matrix<T, 4, 4> {
    let (s, c) = angle.sin_cos();
    let (o, l) = (T::zero(), T::one());
    embed(Matrix::new([[l, o, o], [o, c, -s], [o, s, c]]))
}

/// Homogeneous matrix of the rotation by `angle` radians about the y axis.
pub fn y_rotation_matrix<T: Real + Lanes<3> + Lanes<4>>(angle: T) -> Matrix<T, 4, 4> {
    let (s, c) = angle.sin_cos();
    let (o, l) = (T::zero(), T::one());
    embed(Matrix::new([[c, o, s], [o, l, o], [-s, o, c]]))
}

/// Homogeneous matrix of the rotation by `angle` radians about the z axis.
pub fn z_rotation_matrix<T: Real + Lanes<3> + Lanes<4>>(angle: T) -> Matrix<T, 4, 4> {
    let (s, c) = angle.sin_cos();
    let (o, l) = (T::zero(), T::one());
    embed(Matrix::new([[c, -s, o], [s, c, o], [o, o, l]]))
}

/// Homogeneous matrix of the rotation by `angle` radians about `axis`.
pub fn axis_rotation_matrix<T: Real + Lanes<3> + Lanes<4>>(
    angle: T,
    axis: UnitVector<T, 3>,
) -> Matrix<T, 4, 4> {
    embed(rodrigues(angle, axis))
}

fn rodrigues<T: Real + Lanes<3>>(angle: T, axis: UnitVector<T, 3>) -> Matrix<T, 3, 3> {
    let (s, c) = angle.sin_cos();
    let t = T::one() - c;
    let [x, y, z] = axis.to_array();
    Matrix::new([
        [c + x * x * t, x * y * t - z * s, x * z * t + y * s],
        [x * y * t + z * s, c + y * y * t, y * z * t - x * s],
        [x * z * t - y * s, y * z * t + x * s, c + z * z * t],
    ])
}

/// Places a linear map in the upper-left block of a homogeneous matrix.
fn embed<T: Real + Lanes<3> + Lanes<4>>(linear: Matrix<T, 3, 3>) -> Matrix<T, 4, 4> {
    let mut m = Matrix::identity();
    for i in 0..3 {
        for j in 0..3 {
            m[i][j] = linear[i][j];
        }
    }
    m
}

/// Translation of the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation2D<T: Lanes<2>>(pub Vector<T, 2>);

impl<T: Real + Lanes<2> + Lanes<3>> Translation2D<T> {
    /// Translation by `(x, y)`.
    pub fn new(x: T, y: T) -> Self { Self(Vector::<T, 2>::new(x, y)) }
}

impl<T: Real + Lanes<2> + Lanes<3>> Transform2D<T> for Translation2D<T> {
    fn as_matrix(&self) -> Matrix<T, 3, 3> { translation_matrix(self.0) }

    #[inline]
    fn transform_point(&self, p: Point<T, 2>) -> Point<T, 2> { p + self.0 }

    #[inline]
    fn transform_vector(&self, v: Vector<T, 2>) -> Vector<T, 2> { v }
}

/// Scaling of the plane along its axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling2D<T: Lanes<2>>(pub Vector<T, 2>);

impl<T: Real + Lanes<2> + Lanes<3>> Scaling2D<T> {
    /// Scaling by `x` and `y` along the axes.
    pub fn new(x: T, y: T) -> Self { Self(Vector::<T, 2>::new(x, y)) }

    /// Scaling by `k` along every axis.
    pub fn uniform(k: T) -> Self { Self(Vector::splat(k)) }
}

impl<T: Real + Lanes<2> + Lanes<3>> Transform2D<T> for Scaling2D<T> {
    fn as_matrix(&self) -> Matrix<T, 3, 3> { scaling_matrix(self.0) }

    #[inline]
    fn transform_point(&self, p: Point<T, 2>) -> Point<T, 2> {
        Point::from_vector(p.to_vector() * self.0)
    }

    #[inline]
    fn transform_vector(&self, v: Vector<T, 2>) -> Vector<T, 2> { v * self.0 }
}

/// Counterclockwise rotation of the plane about the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation2D<T> {
    /// Angle in radians.
    pub angle: T,
}

impl<T: Real + Lanes<2> + Lanes<3>> Rotation2D<T> {
    /// Rotation by `angle` radians.
    pub fn new(angle: T) -> Self { Self { angle } }

    /// Rotates a unit vector.
    #[inline]
    pub fn transform_unit(&self, n: UnitVector<T, 2>) -> UnitVector<T, 2> { n.rotate(self.angle) }
}

impl<T: Real + Lanes<2> + Lanes<3>> Transform2D<T> for Rotation2D<T> {
    fn as_matrix(&self) -> Matrix<T, 3, 3> { rotation_matrix(self.angle) }

    #[inline]
    fn transform_point(&self, p: Point<T, 2>) -> Point<T, 2> {
        Point::from_vector(algebra::rotate(p.to_vector(), self.angle))
    }

    #[inline]
    fn transform_vector(&self, v: Vector<T, 2>) -> Vector<T, 2> { algebra::rotate(v, self.angle) }
}

/// Translation of space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation3D<T: Lanes<3>>(pub Vector<T, 3>);

impl<T: Real + Lanes<3> + Lanes<4>> Translation3D<T> {
    /// Translation by `(x, y, z)`.
    pub fn new(x: T, y: T, z: T) -> Self { Self(Vector::<T, 3>::new(x, y, z)) }
}

impl<T: Real + Lanes<3> + Lanes<4>> Transform3D<T> for Translation3D<T> {
    fn as_matrix(&self) -> Matrix<T, 4, 4> { translation_matrix3(self.0) }

    #[inline]
    fn transform_point(&self, p: Point<T, 3>) -> Point<T, 3> { p + self.0 }

    #[inline]
    fn transform_vector(&self, v: Vector<T, 3>) -> Vector<T, 3> { v }
}

/// Scaling of space along its axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling3D<T: Lanes<3>>(pub Vector<T, 3>);

impl<T: Real + Lanes<3> + Lanes<4>> Scaling3D<T> {
    /// Scaling by `x`, `y` and `z` along the axes.
    pub fn new(x: T, y: T, z: T) -> Self { Self(Vector::<T, 3>::new(x, y, z)) }

    /// Scaling by `k` along every axis.
    pub fn uniform(k: T) -> Self { Self(Vector::splat(k)) }
}

impl<T: Real + Lanes<3> + Lanes<4>> Transform3D<T> for Scaling3D<T> {
    fn as_matrix(&self) -> Matrix<T, 4, 4> { scaling_matrix3(self.0) }

    #[inline]
    fn transform_point(&self, p: Point<T, 3>) -> Point<T, 3> {
        Point::from_vector(p.to_vector() * self.0)
    }

    #[inline]
    fn transform_vector(&self, v: Vector<T, 3>) -> Vector<T, 3> { v * self.0 }
}

macro_rules! axis_rotation {
    ($($(#[$doc:meta])* $name:ident => $rotate:ident, $matrix:ident);* $(;)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq)]
            pub struct $name<T> {
                /// Angle in radians.
                pub angle: T,
            }

            impl<T: Real + Lanes<3> + Lanes<4>> $name<T> {
                /// Rotation by `angle` radians.
                pub fn new(angle: T) -> Self { Self { angle } }

                /// Rotates a unit vector.
                #[inline]
                pub fn transform_unit(&self, n: UnitVector<T, 3>) -> UnitVector<T, 3> {
                    n.$rotate(self.angle)
                }
            }

            impl<T: Real + Lanes<3> + Lanes<4>> Transform3D<T> for $name<T> {
                fn as_matrix(&self) -> Matrix<T, 4, 4> { $matrix(self.angle) }

                #[inline]
                fn transform_point(&self, p: Point<T, 3>) -> Point<T, 3> {
                    Point::from_vector(algebra::$rotate(p.to_vector(), self.angle))
                }

                #[inline]
                fn transform_vector(&self, v: Vector<T, 3>) -> Vector<T, 3> {
                    algebra::$rotate(v, self.angle)
                }
            }
        )*
    };
}

axis_rotation! {
    /// Rotation about the x axis.
    XRotation => rotate_x, x_rotation_matrix;
    /// Rotation about the y axis.
    YRotation => rotate_y, y_rotation_matrix;
    /// Rotation about the z axis.
    ZRotation => rotate_z, z_rotation_matrix;
}

/// Rotation about an arbitrary axis through the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRotation<T: Lanes<3>> {
    /// Angle in radians.
    pub angle: T,
    /// Axis of rotation.
    pub axis: UnitVector<T, 3>,
}

impl<T: Real + Lanes<3> + Lanes<4>> AxisRotation<T> {
    /// Rotation by `angle` radians about `axis`.
    pub fn new(angle: T, axis: UnitVector<T, 3>) -> Self { Self { angle, axis } }

    /// Rotates a unit vector.
    #[inline]
    pub fn transform_unit(&self, n: UnitVector<T, 3>) -> UnitVector<T, 3> {
        n.rotate_about(self.angle, self.axis)
    }
}

impl<T: Real + Lanes<3> + Lanes<4>> Transform3D<T> for AxisRotation<T> {
    fn as_matrix(&self) -> Matrix<T, 4, 4> { axis_rotation_matrix(self.angle, self.axis) }

    #[inline]
    fn transform_point(&self, p: Point<T, 3>) -> Point<T, 3> {
        Point::from_vector(algebra::rotate_about(p.to_vector(), self.angle, self.axis))
    }

    #[inline]
    fn transform_vector(&self, v: Vector<T, 3>) -> Vector<T, 3> {
        algebra::rotate_about(v, self.angle, self.axis)
    }
}

/// Rotation stored as its `3x3` matrix.
///
/// Built from any other rotation; composing rotations this way skips the
/// homogeneous row and column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation3D<T: Lanes<3>>(Matrix<T, 3, 3>);

impl<T: Real + Lanes<3> + Lanes<4>> Rotation3D<T> {
    /// Wraps a rotation matrix. The matrix is assumed orthonormal.
    pub fn from_matrix(m: Matrix<T, 3, 3>) -> Self { Self(m) }

    /// Extracts the linear part of a rotation transform.
    pub fn from_rotation<R: Transform3D<T>>(rotation: &R) -> Self {
        Self(rotation.as_matrix().extract::<0, 0, 3, 3>())
    }

    /// The rotation matrix.
    pub fn matrix(&self) -> &Matrix<T, 3, 3> { &self.0 }

    /// Inverse rotation, the transpose of the matrix.
    pub fn inverse(&self) -> Self { Self(self.0.transpose()) }

    /// Rotates a unit vector.
    #[inline]
    pub fn transform_unit(&self, n: UnitVector<T, 3>) -> UnitVector<T, 3> {
        UnitVector::assume_normalized(self.0 * n.to_vector())
    }
}

impl<T: Real + Lanes<3> + Lanes<4>> Transform3D<T> for Rotation3D<T> {
    fn as_matrix(&self) -> Matrix<T, 4, 4> { embed(self.0) }

    #[inline]
    fn transform_point(&self, p: Point<T, 3>) -> Point<T, 3> {
        Point::from_vector(self.0 * p.to_vector())
    }

    #[inline]
    fn transform_vector(&self, v: Vector<T, 3>) -> Vector<T, 3> { self.0 * v }
}

impl<T: Real + Lanes<3> + Lanes<4>> Mul for Rotation3D<T> {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self { Self(self.0 * other.0) }
}

macro_rules! rotation3d_from {
    ($($src:ident),*) => {
        $(
            impl<T: Real + Lanes<3> + Lanes<4>> From<$src<T>> for Rotation3D<T> {
                fn from(rotation: $src<T>) -> Self { Self::from_rotation(&rotation) }
            }
        )*
    };
}

rotation3d_from!(XRotation, YRotation, ZRotation, AxisRotation);

macro_rules! affine {
    (
        $(#[$doc:meta])*
        $name:ident, $transform:ident, $n:literal, $dim:literal
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name<T: Lanes<$n>>(Matrix<T, $n, $n>);

        impl<T: Real + Lanes<$dim> + Lanes<$n>> $name<T> {
            /// Transform leaving everything in place.
            pub fn identity() -> Self { Self(Matrix::identity()) }

            /// Wraps a homogeneous matrix.
            pub fn from_matrix(m: Matrix<T, $n, $n>) -> Self { Self(m) }

            /// Composes `M0 · M1 · … · Mk`; the last matrix is applied
            /// first.
            pub fn from_matrices<I>(matrices: I) -> Self
            where
                I: IntoIterator<Item = Matrix<T, $n, $n>>,
            {
                Self(matrices.into_iter().fold(Matrix::identity(), |acc, m| acc * m))
            }

            /// Composed homogeneous matrix.
            pub fn matrix(&self) -> &Matrix<T, $n, $n> { &self.0 }

            /// Appends `next`, applied after the transforms already composed.
            pub fn then<X: $transform<T>>(self, next: &X) -> Self {
                Self(next.as_matrix() * self.0)
            }

            /// Inverse transform; every element is NaN if the composed
            /// matrix is singular.
            pub fn inverse(&self) -> Self { Self(self.0.inverse()) }

            /// Inverse transform, or `None` if the composed matrix is
            /// singular.
            pub fn try_inverse(&self) -> Option<Self> { self.0.try_inverse().map(Self) }
        }

        impl<T: Real + Lanes<$dim> + Lanes<$n>> Default for $name<T> {
            fn default() -> Self { Self::identity() }
        }

        impl<T: Real + Lanes<$dim> + Lanes<$n>> $transform<T> for $name<T> {
            fn as_matrix(&self) -> Matrix<T, $n, $n> { self.0 }
        }

        /// `a * b` applies `b` first.
        impl<T: Real + Lanes<$dim> + Lanes<$n>> Mul for $name<T> {
            type Output = Self;

            #[inline]
            fn mul(self, other: Self) -> Self { Self(self.0 * other.0) }
        }
    };
}

affine! {
    /// Composed transform of the plane.
    Affine2D, Transform2D, 3, 2
}

affine! {
    /// Composed transform of space.
    Affine3D, Transform3D, 4, 3
}

/// Composes 3D transforms into an [`Affine3D`](crate::Affine3D); the last
/// one is applied first.
#[macro_export]
macro_rules! affine3d {
    ($($t:expr),+ $(,)?) => {
        $crate::Affine3D::from_matrices([$($crate::Transform3D::as_matrix(&$t)),+])
    };
}

/// Composes 2D transforms into an [`Affine2D`](crate::Affine2D); the last
/// one is applied first.
#[macro_export]
macro_rules! affine2d {
    ($($t:expr),+ $(,)?) => {
        $crate::Affine2D::from_matrices([$($crate::Transform2D::as_matrix(&$t)),+])
    };
}
