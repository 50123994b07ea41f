//! Positions.

use crate::{
    array::{impl_container_mut, Array},
    layout::Lanes,
    math,
    scalar::Real,
    vector::Vector,
};
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Point of `N` coordinates.
///
/// Points are displaced by vectors and their differences are vectors. They
/// cannot be scaled or added to each other.
#[repr(transparent)]
pub struct Point<T: Lanes<N>, const N: usize>(Array<T, N>);

impl<T: Lanes<N>, const N: usize> Point<T, N> {
    /// Creates a point from its coordinates.
    #[inline(always)]
    pub fn from_array(elems: [T; N]) -> Self { Self(Array::from_array(elems)) }

    /// Returns the coordinates as a fixed-size array.
    #[inline(always)]
    pub const fn as_array(&self) -> &[T; N] { self.0.as_array() }

    /// Returns the coordinates as a mutable fixed-size array.
    #[inline(always)]
    pub fn as_mut_array(&mut self) -> &mut [T; N] { self.0.as_mut_array() }

    /// Point with every coordinate set to zero.
    #[inline(always)]
    pub fn origin() -> Self { Self::splat(T::zero()) }

    /// Position vector of the point.
    #[inline(always)]
    pub fn to_vector(self) -> Vector<T, N> { Vector::from_array(self.to_array()) }

    /// Point at the tip of `v` when its tail sits at the origin.
    #[inline(always)]
    pub fn from_vector(v: Vector<T, N>) -> Self { Self::from_array(v.to_array()) }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance2(self, other: Self) -> T { (other - self).length2() }
}

impl<T: Lanes<N> + Real, const N: usize> Point<T, N> {
    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Self) -> T { (other - self).length() }

    /// Point halfway between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        let (a, b) = (self.as_array(), other.as_array());
        Self::from_array(std::array::from_fn(|i| math::average(a[i], b[i])))
    }
}

impl_container_mut!(Point);

unsafe impl<T: Lanes<N>, const N: usize> Zeroable for Point<T, N> {}

unsafe impl<T: Lanes<N>, const N: usize> Pod for Point<T, N> {}

impl<T: Lanes<N>, const N: usize> Add<Vector<T, N>> for Point<T, N> {
    type Output = Self;

    #[inline]
    fn add(self, v: Vector<T, N>) -> Self { Self::from_vector(self.to_vector() + v) }
}

impl<T: Lanes<N>, const N: usize> Add<Point<T, N>> for Vector<T, N> {
    type Output = Point<T, N>;

    #[inline]
    fn add(self, p: Point<T, N>) -> Point<T, N> { p + self }
}

impl<T: Lanes<N>, const N: usize> Sub<Vector<T, N>> for Point<T, N> {
    type Output = Self;

    #[inline]
    fn sub(self, v: Vector<T, N>) -> Self { Self::from_vector(self.to_vector() - v) }
}

impl<T: Lanes<N>, const N: usize> Sub for Point<T, N> {
    type Output = Vector<T, N>;

    #[inline]
    fn sub(self, other: Self) -> Vector<T, N> { self.to_vector() - other.to_vector() }
}

impl<T: Lanes<N>, const N: usize> AddAssign<Vector<T, N>> for Point<T, N> {
    #[inline]
    fn add_assign(&mut self, v: Vector<T, N>) { *self = *self + v }
}

impl<T: Lanes<N>, const N: usize> SubAssign<Vector<T, N>> for Point<T, N> {
    #[inline]
    fn sub_assign(&mut self, v: Vector<T, N>) { *self = *self - v }
}

#[cfg(test)]
mod tests {
    use crate::{Pnt2i, Pnt3d, Pnt3f, Vec2i, Vec3d, Vec3f};
    use approx::assert_ulps_eq;

    #[test]
    fn displacement() {
        let p = Pnt3f::new(1.0, 2.0, 3.0);
        let v = Vec3f::new(1.0, 1.0, 1.0);
        assert_eq!(p + v, Pnt3f::new(2.0, 3.0, 4.0));
        assert_eq!(v + p, Pnt3f::new(2.0, 3.0, 4.0));
        assert_eq!(p - v, Pnt3f::new(0.0, 1.0, 2.0));
        assert_eq!(Pnt3f::new(2.0, 3.0, 4.0) - p, v);

        let mut q = Pnt2i::origin();
        q += Vec2i::new(2, 3);
        q -= Vec2i::new(1, 1);
        assert_eq!(q, Pnt2i::new(1, 2));
    }

    #[test]
    fn distances() {
        let a = Pnt3d::new(1.0, 1.0, 1.0);
        let b = Pnt3d::new(4.0, 5.0, 1.0);
        assert_eq!(a.distance2(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(Pnt2i::new(0, 0).distance2(Pnt2i::new(3, 4)), 25);
    }

    #[test]
    fn midpoint() {
        let m = Pnt3d::new(0.0, 2.0, -4.0).midpoint(Pnt3d::new(2.0, 4.0, 4.0));
        assert_ulps_eq!(m.to_vector(), Vec3d::new(1.0, 3.0, 0.0));
    }

    #[test]
    fn point_display() {
        let p = Pnt2i::new(1, 2);
        assert_eq!(format!("{:?}", p), "Point([1, 2])");
        assert_eq!(format!("{}", p), "[1, 2]");
        assert_eq!(p[2], 1);
    }
}
