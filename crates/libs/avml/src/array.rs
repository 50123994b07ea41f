//! Fixed-width storage shared by every aggregate.
//!
//! [`Array`] is a plain tuple of `N` scalars with no algebra of its own.
//! [`Vector`](crate::Vector), [`Point`](crate::Point) and
//! [`UnitVector`](crate::UnitVector) wrap it transparently and get the
//! container plumbing (construction, raw access, wraparound indexing,
//! comparison, formatting) from the macros of this module.

use crate::{
    error::{check_alignment, check_len, Error},
    layout::Lanes,
};
use bytemuck::{Pod, Zeroable};
use std::fmt::{Formatter, Write};

/// Tuple of `N` scalars laid out contiguously and aligned according to
/// [`alignment`](crate::layout::alignment).
#[repr(C)]
pub struct Array<T: Lanes<N>, const N: usize> {
    elems: [T; N],
    _align: <T as Lanes<N>>::Align,
}

impl<T: Lanes<N>, const N: usize> Array<T, N> {
    /// Creates an array from its elements.
    #[inline(always)]
    pub fn from_array(elems: [T; N]) -> Self {
        Self {
            elems,
            _align: Default::default(),
        }
    }

    /// Returns the elements as a fixed-size array.
    #[inline(always)]
    pub const fn as_array(&self) -> &[T; N] { &self.elems }

    /// Returns the elements as a mutable fixed-size array.
    #[inline(always)]
    pub fn as_mut_array(&mut self) -> &mut [T; N] { &mut self.elems }
}

unsafe impl<T: Lanes<N>, const N: usize> Zeroable for Array<T, N> {}

// No padding: the alignment marker is zero-sized and divides N * size_of::<T>().
unsafe impl<T: Lanes<N>, const N: usize> Pod for Array<T, N> {}

pub(crate) fn print_slice<A>(f: &mut Formatter<'_>, seq: &[A]) -> std::fmt::Result
where
    A: std::fmt::Display,
{
    f.write_char('[')?;
    for (i, x) in seq.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", x)?;
    }
    f.write_char(']')
}

/// Implements the read-only container plumbing for a type exposing
/// `as_array`.
macro_rules! impl_container_ref {
    ($ty:ident) => {
        impl<T: $crate::layout::Lanes<N>, const N: usize> $ty<T, N> {
            /// Number of elements.
            #[inline(always)]
            pub const fn len(&self) -> usize { N }

            /// Always false; aggregates hold at least two elements.
            #[inline(always)]
            pub const fn is_empty(&self) -> bool { false }

            /// Returns a copy of the elements.
            #[inline(always)]
            pub fn to_array(self) -> [T; N] { *self.as_array() }

            /// Returns the elements as a slice.
            #[inline(always)]
            pub fn as_slice(&self) -> &[T] { self.as_array() }

            /// Pointer to the first element; the elements are contiguous.
            #[inline(always)]
            pub fn data(&self) -> *const T { self.as_array().as_ptr() }
        }

        impl<T: $crate::layout::Lanes<N>, const N: usize> Clone for $ty<T, N> {
            fn clone(&self) -> Self { *self }
        }

        impl<T: $crate::layout::Lanes<N>, const N: usize> Copy for $ty<T, N> {}

        impl<T: $crate::layout::Lanes<N>, const N: usize> PartialEq for $ty<T, N> {
            fn eq(&self, other: &Self) -> bool { self.as_array() == other.as_array() }
        }

        impl<T: $crate::layout::Lanes<N> + Eq, const N: usize> Eq for $ty<T, N> {}

        /// Indices wrap around: `a[i]` is `a[i % N]`.
        impl<T: $crate::layout::Lanes<N>, const N: usize> std::ops::Index<usize> for $ty<T, N> {
            type Output = T;

            #[inline(always)]
            fn index(&self, index: usize) -> &T { &self.as_array()[index % N] }
        }

        impl<T: $crate::layout::Lanes<N>, const N: usize> std::fmt::Debug for $ty<T, N> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_fmt(format_args!("{}({:?})", stringify!($ty), self.as_array()))
            }
        }

        impl<T: $crate::layout::Lanes<N>, const N: usize> std::fmt::Display for $ty<T, N> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                $crate::array::print_slice(f, self.as_array())
            }
        }

        impl<T, const N: usize> approx::AbsDiffEq for $ty<T, N>
        where
            T: $crate::layout::Lanes<N> + approx::AbsDiffEq<Epsilon = T>,
        {
            type Epsilon = T;

            fn default_epsilon() -> T { T::default_epsilon() }

            fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array())
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
        }

        impl<T, const N: usize> approx::RelativeEq for $ty<T, N>
        where
            T: $crate::layout::Lanes<N> + approx::RelativeEq<Epsilon = T>,
        {
            fn default_max_relative() -> T { T::default_max_relative() }

            fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array())
                    .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
            }
        }

        impl<T, const N: usize> approx::UlpsEq for $ty<T, N>
        where
            T: $crate::layout::Lanes<N> + approx::UlpsEq<Epsilon = T>,
        {
            fn default_max_ulps() -> u32 { T::default_max_ulps() }

            fn ulps_eq(&self, other: &Self, epsilon: T, max_ulps: u32) -> bool {
                self.as_array()
                    .iter()
                    .zip(other.as_array())
                    .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
            }
        }
    };
}

/// Implements the mutable container plumbing for a type exposing
/// `from_array`, `as_array` and `as_mut_array`.
macro_rules! impl_container_mut {
    ($ty:ident) => {
        $crate::array::impl_container_ref!($ty);

        impl<T: $crate::layout::Lanes<N>, const N: usize> $ty<T, N> {
            /// Creates a value with every element set to `value`.
            #[inline(always)]
            pub fn splat(value: T) -> Self { Self::from_array([value; N]) }

            /// Copies the first `N` scalars of `src`.
            pub fn from_slice(src: &[T]) -> Result<Self, $crate::Error> {
                $crate::array::read_slice(src).map(Self::from_array)
            }

            /// Copies the first `N` scalars of `src`, which must be aligned
            /// like `Self`.
            pub fn from_slice_aligned(src: &[T]) -> Result<Self, $crate::Error> {
                $crate::array::read_slice_aligned::<T, N>(src, std::mem::align_of::<Self>())
                    .map(Self::from_array)
            }

            /// Copies `N` scalars starting at `src`.
            ///
            /// # Safety
            ///
            /// `src` must be valid for reading `N` scalars. No alignment
            /// beyond the scalar's is required.
            #[inline]
            pub unsafe fn read(src: *const T) -> Self {
                Self::from_array($crate::array::read_ptr(src))
            }

            /// Copies `N` scalars starting at `src`.
            ///
            /// # Safety
            ///
            /// `src` must be valid for reading `N` scalars and aligned like
            /// `Self`.
            #[inline]
            pub unsafe fn read_aligned(src: *const T) -> Self {
                debug_assert_eq!(src as usize % std::mem::align_of::<Self>(), 0);
                src.cast::<Self>().read()
            }

            /// Returns the elements as a mutable slice.
            #[inline(always)]
            pub fn as_mut_slice(&mut self) -> &mut [T] { self.as_mut_array() }

            /// Mutable pointer to the first element.
            #[inline(always)]
            pub fn data_mut(&mut self) -> *mut T { self.as_mut_array().as_mut_ptr() }

            /// Applies `f` to every element.
            #[inline]
            pub fn map<F: FnMut(T) -> T>(self, f: F) -> Self {
                Self::from_array(self.to_array().map(f))
            }

            /// Combines the elements of `self` and `other` pairwise.
            #[inline]
            pub fn zip_map<F: FnMut(T, T) -> T>(self, other: Self, mut f: F) -> Self {
                let (a, b) = (self.as_array(), other.as_array());
                Self::from_array(std::array::from_fn(|i| f(a[i], b[i])))
            }
        }

        impl<T: $crate::layout::Lanes<2>> $ty<T, 2> {
            /// Creates a value from its two elements.
            #[inline(always)]
            pub fn new(x: T, y: T) -> Self { Self::from_array([x, y]) }
        }

        impl<T: $crate::layout::Lanes<3>> $ty<T, 3> {
            /// Creates a value from its three elements.
            #[inline(always)]
            pub fn new(x: T, y: T, z: T) -> Self { Self::from_array([x, y, z]) }
        }

        impl<T: $crate::layout::Lanes<4>> $ty<T, 4> {
            /// Creates a value from its four elements.
            #[inline(always)]
            pub fn new(x: T, y: T, z: T, w: T) -> Self { Self::from_array([x, y, z, w]) }
        }

        impl<T: $crate::layout::Lanes<N>, const N: usize> Default for $ty<T, N> {
            fn default() -> Self { Self::splat(T::zero()) }
        }

        /// Indices wrap around: `a[i]` is `a[i % N]`.
        impl<T: $crate::layout::Lanes<N>, const N: usize> std::ops::IndexMut<usize> for $ty<T, N> {
            #[inline(always)]
            fn index_mut(&mut self, index: usize) -> &mut T { &mut self.as_mut_array()[index % N] }
        }

        impl<T: $crate::layout::Lanes<N>, const N: usize> From<[T; N]> for $ty<T, N> {
            fn from(elems: [T; N]) -> Self { Self::from_array(elems) }
        }

        impl<T: $crate::layout::Lanes<N>, const N: usize> TryFrom<&[T]> for $ty<T, N> {
            type Error = $crate::Error;

            fn try_from(src: &[T]) -> Result<Self, Self::Error> { Self::from_slice(src) }
        }
    };
}

pub(crate) use impl_container_mut;
pub(crate) use impl_container_ref;

pub(crate) fn read_slice<T: Lanes<N>, const N: usize>(src: &[T]) -> Result<[T; N], Error> {
    check_len(src, N)?;
    let mut elems = [T::zero(); N];
    elems.copy_from_slice(&src[..N]);
    Ok(elems)
}

pub(crate) fn read_slice_aligned<T: Lanes<N>, const N: usize>(
    src: &[T],
    alignment: usize,
) -> Result<[T; N], Error> {
    check_alignment(src, alignment)?;
    read_slice(src)
}

/// # Safety
///
/// `src` must be valid for reading `N` scalars.
#[inline(always)]
pub(crate) unsafe fn read_ptr<T: Lanes<N>, const N: usize>(src: *const T) -> [T; N] {
    src.cast::<[T; N]>().read_unaligned()
}

impl_container_mut!(Array);
