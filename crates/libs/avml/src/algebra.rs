//! Dimension-generic vector and point algebra.
//!
//! Every function here is written against the public container interface;
//! the reductions it relies on (`dot`, `cross`) are the only parts that the
//! active backend accelerates.

use crate::{layout::Lanes, point::Point, scalar::Real, unit::UnitVector, vector::Vector};
use num_traits::Signed;

/// Dot product.
#[inline]
pub fn dot<T: Lanes<N>, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) -> T { a.dot(b) }

/// Cross product.
#[inline]
pub fn cross<T: Lanes<3>>(a: Vector<T, 3>, b: Vector<T, 3>) -> Vector<T, 3> { a.cross(b) }

/// Euclidean length.
#[inline]
pub fn length<T: Lanes<N> + Real, const N: usize>(v: Vector<T, N>) -> T { v.length() }

/// Squared Euclidean length.
#[inline]
pub fn length2<T: Lanes<N>, const N: usize>(v: Vector<T, N>) -> T { v.length2() }

/// Divides `v` by its length. A zero vector yields NaN components.
#[inline]
pub fn normalize<T: Lanes<N> + Real, const N: usize>(v: Vector<T, N>) -> UnitVector<T, N> {
    v.normalize()
}

/// Marks `v` as normalized without checking it.
#[inline]
pub fn assume_normalized<T: Lanes<N>, const N: usize>(v: Vector<T, N>) -> UnitVector<T, N> {
    UnitVector::assume_normalized(v)
}

/// Direction a vector can be projected onto.
///
/// The formula depends on the target: a general vector divides by its
/// squared length, a unit vector does not need to.
pub trait ProjectionTarget<T: Lanes<N>, const N: usize>: Copy {
    /// Component of `v` along `self`.
    fn project(self, v: Vector<T, N>) -> Vector<T, N>;
}

impl<T: Lanes<N> + Real, const N: usize> ProjectionTarget<T, N> for Vector<T, N> {
    #[inline]
    fn project(self, v: Vector<T, N>) -> Vector<T, N> { self * (v.dot(self) / self.dot(self)) }
}

impl<T: Lanes<N> + Real, const N: usize> ProjectionTarget<T, N> for UnitVector<T, N> {
    #[inline]
    fn project(self, v: Vector<T, N>) -> Vector<T, N> { self * v.dot(*self) }
}

/// Projects `v` onto the line spanned by `onto`.
#[inline]
pub fn project<T, const N: usize, P>(v: Vector<T, N>, onto: P) -> Vector<T, N>
where
    T: Lanes<N>,
    P: ProjectionTarget<T, N>,
{
    onto.project(v)
}

/// Removes from `v` its component along `normal`.
#[inline]
pub fn project_onto_plane<T, const N: usize, P>(v: Vector<T, N>, normal: P) -> Vector<T, N>
where
    T: Lanes<N>,
    P: ProjectionTarget<T, N>,
{
    v - normal.project(v)
}

/// Rotates a 2D vector counterclockwise by `angle` radians.
#[inline]
pub fn rotate<T: Lanes<2> + Real>(v: Vector<T, 2>, angle: T) -> Vector<T, 2> {
    let (s, c) = angle.sin_cos();
    let [x, y] = v.to_array();
    Vector::<T, 2>::new(x * c - y * s, x * s + y * c)
}

/// Rotates a 3D vector by `angle` radians about `axis` (Rodrigues' formula).
#[inline]
pub fn rotate_about<T: Lanes<3> + Real>(
    v: Vector<T, 3>,
    angle: T,
    axis: UnitVector<T, 3>,
) -> Vector<T, 3> {
    let (s, c) = angle.sin_cos();
    let k = axis.to_vector();
    v * c + k.cross(v) * s + k * (k.dot(v) * (T::one() - c))
}

/// Rotates a 3D vector by `angle` radians about the x axis.
#[inline]
pub fn rotate_x<T: Lanes<3> + Real>(v: Vector<T, 3>, angle: T) -> Vector<T, 3> {
    let (s, c) = angle.sin_cos();
    let [x, y, z] = v.to_array();
    Vector::<T, 3>::new(x, y * c - z * s, y * s + z * c)
}

/// Rotates a 3D vector by `angle` radians about the y axis.
#[inline]
pub fn rotate_y<T: Lanes<3> + Real>(v: Vector<T, 3>, angle: T) -> Vector<T, 3> {
    let (s, c) = angle.sin_cos();
    let [x, y, z] = v.to_array();
    Vector::<T, 3>::new(x * c + z * s, y, z * c - x * s)
}

/// Rotates a 3D vector by `angle` radians about the z axis.
#[inline]
pub fn rotate_z<T: Lanes<3> + Real>(v: Vector<T, 3>, angle: T) -> Vector<T, 3> {
    let (s, c) = angle.sin_cos();
    let [x, y, z] = v.to_array();
    Vector::<T, 3>::new(x * c - y * s, x * s + y * c, z)
}

/// Mirrors `v` about the line of `n`: `2·dot(v, n)·n − v`.
///
/// `n` is expected to have unit length.
#[inline]
pub fn reflect<T, const N: usize>(v: Vector<T, N>, n: impl Into<Vector<T, N>>) -> Vector<T, N>
where
    T: Lanes<N>,
{
    let n = n.into();
    let two = T::one() + T::one();
    n * (two * v.dot(n)) - v
}

/// Componentwise absolute value.
#[inline]
pub fn abs<T: Lanes<N> + Signed, const N: usize>(v: Vector<T, N>) -> Vector<T, N> { v.abs() }

/// Componentwise minimum.
#[inline]
pub fn min<T: Lanes<N>, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) -> Vector<T, N> {
    a.min(b)
}

/// Componentwise maximum.
#[inline]
pub fn max<T: Lanes<N>, const N: usize>(a: Vector<T, N>, b: Vector<T, N>) -> Vector<T, N> {
    a.max(b)
}

/// Euclidean distance between two points.
#[inline]
pub fn distance<T: Lanes<N> + Real, const N: usize>(a: Point<T, N>, b: Point<T, N>) -> T {
    a.distance(b)
}

/// Point halfway between `a` and `b`.
#[inline]
pub fn midpoint<T: Lanes<N> + Real, const N: usize>(a: Point<T, N>, b: Point<T, N>) -> Point<T, N> {
    a.midpoint(b)
}

impl<T: Lanes<N> + Real, const N: usize> Vector<T, N> {
    /// See [`project`].
    #[inline]
    pub fn project<P: ProjectionTarget<T, N>>(self, onto: P) -> Self { onto.project(self) }

    /// See [`project_onto_plane`].
    #[inline]
    pub fn project_onto_plane<P: ProjectionTarget<T, N>>(self, normal: P) -> Self {
        project_onto_plane(self, normal)
    }

    /// See [`reflect`].
    #[inline]
    pub fn reflect(self, n: impl Into<Self>) -> Self { reflect(self, n) }
}

impl<T: Lanes<2> + Real> Vector<T, 2> {
    /// See [`rotate`].
    #[inline]
    pub fn rotate(self, angle: T) -> Self { rotate(self, angle) }
}

impl<T: Lanes<3> + Real> Vector<T, 3> {
    /// See [`rotate_about`].
    #[inline]
    pub fn rotate_about(self, angle: T, axis: UnitVector<T, 3>) -> Self {
        rotate_about(self, angle, axis)
    }

    /// See [`rotate_x`].
    #[inline]
    pub fn rotate_x(self, angle: T) -> Self { rotate_x(self, angle) }

    /// See [`rotate_y`].
    #[inline]
    pub fn rotate_y(self, angle: T) -> Self { rotate_y(self, angle) }

    /// See [`rotate_z`].
    #[inline]
    pub fn rotate_z(self, angle: T) -> Self { rotate_z(self, angle) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pnt2d, Unit2d, Unit3d, Vec2d, Vec2i, Vec3d, Vec3f};
    use approx::{assert_relative_eq, assert_ulps_eq};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn free_functions_mirror_methods() {
        let a = Vec3d::new(1.0, 2.0, 3.0);
        let b = Vec3d::new(-2.0, 0.5, 4.0);
        assert_eq!(dot(a, b), a.dot(b));
        assert_eq!(cross(a, b), a.cross(b));
        assert_eq!(length2(a), 14.0);
        assert_eq!(length(Vec2d::new(3.0, 4.0)), 5.0);
        assert_eq!(normalize(a), a.normalize());
        assert_eq!(assume_normalized(a).to_vector(), a);
        assert_eq!(min(a, b), Vec3d::new(-2.0, 0.5, 3.0));
        assert_eq!(max(a, b), Vec3d::new(1.0, 2.0, 4.0));
        assert_eq!(abs(Vec2i::new(-1, 2)), Vec2i::new(1, 2));
    }

    #[test]
    fn projections() {
        let v = Vec2d::new(2.0, 3.0);
        assert_eq!(project(v, Vec2d::new(4.0, 0.0)), Vec2d::new(2.0, 0.0));
        assert_eq!(project(v, Unit2d::new(0.0, 1.0)), Vec2d::new(0.0, 3.0));
        assert_eq!(v.project(Unit2d::new(0.0, 1.0)), Vec2d::new(0.0, 3.0));
        assert_eq!(project_onto_plane(v, Unit2d::new(0.0, 1.0)), Vec2d::new(2.0, 0.0));
        assert_eq!(v.project_onto_plane(Vec2d::new(5.0, 0.0)), Vec2d::new(0.0, 3.0));
    }

    #[test]
    fn rotation_2d() {
        let turned = rotate(Vec2d::new(1.0, 0.0), FRAC_PI_2);
        assert_relative_eq!(turned, Vec2d::new(0.0, 1.0), epsilon = 1.0e-12);
        let half = Vec2d::new(1.0, 1.0).rotate(PI);
        assert_relative_eq!(half, Vec2d::new(-1.0, -1.0), epsilon = 1.0e-12);
    }

    #[test]
    fn rotation_3d() {
        let v = Vec3d::new(1.0, 2.0, 3.0);
        let z = Unit3d::new(0.0, 0.0, 1.0);
        assert_relative_eq!(rotate_about(v, 0.7, z), rotate_z(v, 0.7), epsilon = 1.0e-12);
        assert_relative_eq!(
            v.rotate_about(0.7, Unit3d::new(1.0, 0.0, 0.0)),
            v.rotate_x(0.7),
            epsilon = 1.0e-12
        );
        assert_relative_eq!(
            v.rotate_about(0.7, Unit3d::new(0.0, 1.0, 0.0)),
            v.rotate_y(0.7),
            epsilon = 1.0e-12
        );
        assert_relative_eq!(
            rotate_y(Vec3d::new(0.0, 0.0, 1.0), FRAC_PI_2),
            Vec3d::new(1.0, 0.0, 0.0),
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn reflection() {
        let v = Vec2d::new(1.0, 2.0);
        assert_eq!(reflect(v, Vec2d::new(1.0, 0.0)), Vec2d::new(1.0, -2.0));
        assert_eq!(v.reflect(Unit2d::new(0.0, 1.0)), Vec2d::new(-1.0, 2.0));
    }

    #[test]
    fn point_helpers() {
        let a = Pnt2d::new(0.0, 0.0);
        let b = Pnt2d::new(6.0, 8.0);
        assert_eq!(distance(a, b), 10.0);
        assert_ulps_eq!(midpoint(a, b).to_vector(), Vec2d::new(3.0, 4.0));
    }

    proptest! {
        #[test]
        fn rotation_preserves_length(
            x in -1.0e2f64..1.0e2,
            y in -1.0e2f64..1.0e2,
            z in -1.0e2f64..1.0e2,
            angle in -6.3f64..6.3,
        ) {
            let v = Vec3d::new(x, y, z);
            let axis = Unit3d::new(1.0, 2.0, -0.5);
            let r = v.rotate_about(angle, axis);
            prop_assert!((r.length() - v.length()).abs() <= 1.0e-9 * (1.0 + v.length()));
        }

        #[test]
        fn plane_projection_is_orthogonal(
            x in -1.0e2f32..1.0e2,
            y in -1.0e2f32..1.0e2,
            z in -1.0e2f32..1.0e2,
        ) {
            let n = Vec3f::new(0.3, -0.4, 0.866).normalize();
            let p = Vec3f::new(x, y, z).project_onto_plane(n);
            prop_assert!(p.dot(*n).abs() <= 1.0e-3);
        }
    }
}
