//! Displacements and directions.

use crate::{
    array::{impl_container_mut, Array},
    layout::Lanes,
    scalar::Real,
    unit::UnitVector,
};
use bytemuck::{Pod, Zeroable};
use num_traits::{NumCast, Signed};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Vector of `N` scalars.
///
/// Arithmetic between vectors is componentwise; a vector can also be scaled
/// by a scalar from either side.
#[repr(transparent)]
pub struct Vector<T: Lanes<N>, const N: usize>(Array<T, N>);

impl<T: Lanes<N>, const N: usize> Vector<T, N> {
    /// Creates a vector from its components.
    #[inline(always)]
    pub fn from_array(elems: [T; N]) -> Self { Self(Array::from_array(elems)) }

    /// Returns the components as a fixed-size array.
    #[inline(always)]
    pub const fn as_array(&self) -> &[T; N] { self.0.as_array() }

    /// Returns the components as a mutable fixed-size array.
    #[inline(always)]
    pub fn as_mut_array(&mut self) -> &mut [T; N] { self.0.as_mut_array() }

    /// Vector with every component set to zero.
    #[inline(always)]
    pub fn zero() -> Self { Self::splat(T::zero()) }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> T { T::dot(self.as_array(), other.as_array()) }

    /// Squared Euclidean length.
    #[inline]
    pub fn length2(self) -> T { self.dot(self) }

    /// Componentwise minimum, `other` winning only when strictly smaller.
    #[inline]
    pub fn min(self, other: Self) -> Self { self.zip_map(other, |a, b| if b < a { b } else { a }) }

    /// Componentwise maximum, `other` winning only when strictly greater.
    #[inline]
    pub fn max(self, other: Self) -> Self { self.zip_map(other, |a, b| if a < b { b } else { a }) }

    /// Componentwise absolute value.
    #[inline]
    pub fn abs(self) -> Self
    where
        T: Signed,
    {
        self.map(|x| Signed::abs(&x))
    }

    /// Converts every component to another scalar type, or `None` if one of
    /// them is not representable.
    pub fn cast<U: Lanes<N>>(self) -> Option<Vector<U, N>> {
        let src = self.as_array();
        let mut out = [U::zero(); N];
        for (dst, x) in out.iter_mut().zip(src) {
            *dst = <U as NumCast>::from(*x)?;
        }
        Some(Vector::from_array(out))
    }
}

impl<T: Lanes<N> + Real, const N: usize> Vector<T, N> {
    /// Euclidean length.
    #[inline]
    pub fn length(self) -> T { self.length2().sqrt() }

    /// Divides the vector by its length.
    ///
    /// The length is not checked: a zero vector yields NaN components.
    #[inline]
    pub fn normalize(self) -> UnitVector<T, N> {
        UnitVector::assume_normalized(self / self.length())
    }
}

impl<T: Lanes<3>> Vector<T, 3> {
    /// Cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::from_array(T::cross(self.as_array(), other.as_array()))
    }
}

impl<T: Lanes<2> + Lanes<3>> Vector<T, 2> {
    /// Appends a third component.
    #[inline]
    pub fn extend(self, z: T) -> Vector<T, 3> {
        let [x, y] = self.to_array();
        Vector::<T, 3>::new(x, y, z)
    }
}

impl<T: Lanes<3> + Lanes<4>> Vector<T, 3> {
    /// Appends a fourth component.
    #[inline]
    pub fn extend(self, w: T) -> Vector<T, 4> {
        let [x, y, z] = self.to_array();
        Vector::<T, 4>::new(x, y, z, w)
    }
}

impl<T: Lanes<2> + Lanes<3>> Vector<T, 3> {
    /// Drops the last component.
    #[inline]
    pub fn truncate(self) -> Vector<T, 2> {
        let [x, y, _] = self.to_array();
        Vector::<T, 2>::new(x, y)
    }
}

impl<T: Lanes<3> + Lanes<4>> Vector<T, 4> {
    /// Drops the last component.
    #[inline]
    pub fn truncate(self) -> Vector<T, 3> {
        let [x, y, z, _] = self.to_array();
        Vector::<T, 3>::new(x, y, z)
    }
}

impl_container_mut!(Vector);

unsafe impl<T: Lanes<N>, const N: usize> Zeroable for Vector<T, N> {}

unsafe impl<T: Lanes<N>, const N: usize> Pod for Vector<T, N> {}

impl<T: Lanes<N>, const N: usize> From<Array<T, N>> for Vector<T, N> {
    fn from(array: Array<T, N>) -> Self { Self(array) }
}

impl<T: Lanes<N>, const N: usize> From<Vector<T, N>> for Array<T, N> {
    fn from(vector: Vector<T, N>) -> Self { vector.0 }
}

macro_rules! impl_ops {
    ($($trait:ident, $op:ident, $assign_trait:ident, $assign_op:ident);*) => {
        $(
            impl<T: Lanes<N>, const N: usize> $trait for Vector<T, N> {
                type Output = Self;

                #[inline]
                fn $op(self, other: Self) -> Self { self.zip_map(other, |a, b| a.$op(b)) }
            }

            impl<T: Lanes<N>, const N: usize> $trait<T> for Vector<T, N> {
                type Output = Self;

                #[inline]
                fn $op(self, other: T) -> Self { self.map(|a| a.$op(other)) }
            }

            impl<T: Lanes<N>, const N: usize> $assign_trait for Vector<T, N> {
                #[inline]
                fn $assign_op(&mut self, other: Self) { *self = (*self).$op(other) }
            }

            impl<T: Lanes<N>, const N: usize> $assign_trait<T> for Vector<T, N> {
                #[inline]
                fn $assign_op(&mut self, other: T) { *self = (*self).$op(other) }
            }
        )*
    };
}

impl_ops! {
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign
}

impl<T: Lanes<N>, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self { self.map(|a| -a) }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {
        $(
            impl<const N: usize> Mul<Vector<$t, N>> for $t
            where
                $t: Lanes<N>,
            {
                type Output = Vector<$t, N>;

                #[inline]
                fn mul(self, other: Vector<$t, N>) -> Vector<$t, N> { other.map(|a| self * a) }
            }
        )*
    };
}

impl_scalar_lhs_mul!(f32, f64, i32);
