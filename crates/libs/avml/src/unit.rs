//! Normalized directions.
//!
//! A [`UnitVector`] can only be obtained by normalizing, or through one of
//! the `unchecked`/`assume_normalized` entry points that trust the caller.
//! Elements are read-only so the unit length cannot be broken afterwards.

use crate::{
    algebra,
    array::{impl_container_ref, read_ptr, read_slice},
    layout::Lanes,
    scalar::Real,
    vector::Vector,
    Error,
};
use std::ops::{Deref, Mul, Neg};

/// Vector of unit length.
#[repr(transparent)]
pub struct UnitVector<T: Lanes<N>, const N: usize>(Vector<T, N>);

impl<T: Lanes<N>, const N: usize> UnitVector<T, N> {
    /// Wraps `v` without normalizing it.
    ///
    /// The caller guarantees that `v` has unit length; nothing checks it.
    #[inline(always)]
    pub const fn assume_normalized(v: Vector<T, N>) -> Self { Self(v) }

    /// Copies the first `N` scalars of `src` without normalizing them.
    pub fn from_slice_unchecked(src: &[T]) -> Result<Self, Error> {
        read_slice(src).map(|elems| Self(Vector::from_array(elems)))
    }

    /// Copies `N` scalars starting at `src` without normalizing them.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading `N` scalars which form a vector of
    /// unit length.
    #[inline]
    pub unsafe fn read_unchecked(src: *const T) -> Self { Self(Vector::from_array(read_ptr(src))) }

    /// Copies `N` scalars starting at `src` without normalizing them.
    ///
    /// # Safety
    ///
    /// Same as [`read_unchecked`](Self::read_unchecked); `src` must also be
    /// aligned like `Vector<T, N>`.
    #[inline]
    pub unsafe fn read_aligned_unchecked(src: *const T) -> Self { Self(Vector::read_aligned(src)) }

    /// Returns the components as a fixed-size array.
    #[inline(always)]
    pub const fn as_array(&self) -> &[T; N] { self.0.as_array() }

    /// Returns the underlying vector.
    #[inline(always)]
    pub const fn as_vector(&self) -> &Vector<T, N> { &self.0 }

    /// Converts into a plain vector, dropping the unit length guarantee.
    #[inline(always)]
    pub fn to_vector(self) -> Vector<T, N> { self.0 }
}

impl<T: Lanes<N> + Real, const N: usize> UnitVector<T, N> {
    /// Normalizes `v`.
    ///
    /// A zero vector yields NaN components.
    #[inline]
    pub fn from_vector(v: Vector<T, N>) -> Self { v.normalize() }

    /// Copies and normalizes the first `N` scalars of `src`.
    pub fn from_slice(src: &[T]) -> Result<Self, Error> {
        Vector::from_slice(src).map(Vector::normalize)
    }

    /// Normalizes again, pulling a vector that drifted after repeated
    /// arithmetic back onto the unit sphere.
    #[inline]
    pub fn renormalize(self) -> Self { self.0.normalize() }

    /// Componentwise absolute value.
    #[inline]
    pub fn abs(self) -> Self { Self(self.0.map(T::abs)) }

    /// Reflects the direction about the normal `n`.
    #[inline]
    pub fn reflect(self, n: Self) -> Self { Self(algebra::reflect(self.0, n)) }
}

impl<T: Lanes<2> + Real> UnitVector<T, 2> {
    /// Normalizes `(x, y)`.
    #[inline]
    pub fn new(x: T, y: T) -> Self { Vector::<T, 2>::new(x, y).normalize() }

    /// Rotates counterclockwise by `angle` radians.
    #[inline]
    pub fn rotate(self, angle: T) -> Self { Self(algebra::rotate(self.0, angle)) }
}

impl<T: Lanes<3> + Real> UnitVector<T, 3> {
    /// Normalizes `(x, y, z)`.
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self { Vector::<T, 3>::new(x, y, z).normalize() }

    /// Rotates by `angle` radians about `axis`.
    #[inline]
    pub fn rotate_about(self, angle: T, axis: Self) -> Self {
        Self(algebra::rotate_about(self.0, angle, axis))
    }

    /// Rotates by `angle` radians about the x axis.
    #[inline]
    pub fn rotate_x(self, angle: T) -> Self { Self(algebra::rotate_x(self.0, angle)) }

    /// Rotates by `angle` radians about the y axis.
    #[inline]
    pub fn rotate_y(self, angle: T) -> Self { Self(algebra::rotate_y(self.0, angle)) }

    /// Rotates by `angle` radians about the z axis.
    #[inline]
    pub fn rotate_z(self, angle: T) -> Self { Self(algebra::rotate_z(self.0, angle)) }
}

impl<T: Lanes<4> + Real> UnitVector<T, 4> {
    /// Normalizes `(x, y, z, w)`.
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self { Vector::<T, 4>::new(x, y, z, w).normalize() }
}

impl_container_ref!(UnitVector);

/// The first basis vector.
impl<T: Lanes<N> + Real, const N: usize> Default for UnitVector<T, N> {
    fn default() -> Self {
        let mut v = Vector::zero();
        v[0] = T::one();
        Self(v)
    }
}

impl<T: Lanes<N>, const N: usize> Deref for UnitVector<T, N> {
    type Target = Vector<T, N>;

    #[inline(always)]
    fn deref(&self) -> &Vector<T, N> { &self.0 }
}

impl<T: Lanes<N>, const N: usize> From<UnitVector<T, N>> for Vector<T, N> {
    fn from(n: UnitVector<T, N>) -> Self { n.0 }
}

impl<T: Lanes<N>, const N: usize> Neg for UnitVector<T, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self { Self(-self.0) }
}

impl<T: Lanes<N>, const N: usize> Mul<T> for UnitVector<T, N> {
    type Output = Vector<T, N>;

    #[inline]
    fn mul(self, k: T) -> Vector<T, N> { self.0 * k }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Unit2d, Unit3f, Vec2d, Vec3f};
    use approx::{assert_relative_eq, assert_ulps_eq};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn constructors_normalize() {
        let n = Unit2d::new(3.0, 4.0);
        assert_ulps_eq!(n.to_vector(), Vec2d::new(0.6, 0.8));
        let m = UnitVector::<f32, 3>::from_slice(&[0.0, 0.0, 5.0, 1.0]).unwrap();
        assert_eq!(m.to_array(), [0.0, 0.0, 1.0]);
        assert_ulps_eq!(Unit3f::from_vector(Vec3f::new(2.0, 0.0, 0.0)).length(), 1.0);
    }

    #[test]
    fn unchecked_entry_points_keep_components() {
        let raw = [2.0f32, 0.0, 0.0];
        let n = UnitVector::<f32, 3>::from_slice_unchecked(&raw).unwrap();
        assert_eq!(n.to_array(), raw);
        let m = unsafe { UnitVector::<f32, 3>::read_unchecked(raw.as_ptr()) };
        assert_eq!(n, m);
        let a = Vec3f::new(0.0, 1.0, 0.0);
        let p = unsafe { UnitVector::<f32, 3>::read_aligned_unchecked(a.data()) };
        assert_eq!(p.to_vector(), a);
        assert_eq!(
            UnitVector::<f32, 3>::from_slice_unchecked(&raw[..1]),
            Err(Error::SliceTooShort {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn default_is_first_basis_vector() {
        assert_eq!(Unit3f::default().to_array(), [1.0, 0.0, 0.0]);
        assert_eq!(Unit2d::default().to_array(), [1.0, 0.0]);
    }

    #[test]
    fn negation_and_scaling() {
        let n = Unit3f::new(0.0, 0.0, 1.0);
        assert_eq!((-n).to_array(), [0.0, 0.0, -1.0]);
        assert_eq!(n * 2.0, Vec3f::new(0.0, 0.0, 2.0));
        assert_eq!(n[5], 1.0);
    }

    #[test]
    fn renormalize_fixes_drift() {
        let drifted = UnitVector::assume_normalized(Vec3f::new(1.001, 0.0, 0.0));
        assert_ulps_eq!(drifted.renormalize().to_vector(), Vec3f::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rotations_stay_unit() {
        let n = Unit2d::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert_relative_eq!(n.to_vector(), Vec2d::new(0.0, 1.0), epsilon = 1.0e-12);
        let x = Unit3f::new(1.0, 0.0, 0.0);
        let y = x.rotate_about(std::f32::consts::FRAC_PI_2, Unit3f::new(0.0, 0.0, 1.0));
        assert_relative_eq!(y.to_vector(), Vec3f::new(0.0, 1.0, 0.0), epsilon = 1.0e-6);
        let turned = x.rotate_z(std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(turned.to_vector(), y.to_vector(), epsilon = 1.0e-6);
    }

    #[test]
    fn reflection_and_abs() {
        let d = Unit2d::new(1.0, -1.0);
        let r = d.reflect(Unit2d::new(0.0, 1.0));
        assert_relative_eq!(r.to_vector(), Unit2d::new(-1.0, -1.0).to_vector(), epsilon = 1.0e-12);
        assert_eq!(d.abs().to_array(), Unit2d::new(1.0, 1.0).to_array());
    }
}
