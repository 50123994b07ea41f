//! Memory layout of the fixed-width aggregates.
//!
//! Every aggregate of `N` scalars is laid out as exactly `N` contiguous
//! scalars. Its alignment is looked up from its byte width with
//! [`alignment`]; power-of-two widths get register alignment, 3-wide
//! aggregates keep the alignment of their scalar so that arrays of them (and
//! the rows of a matrix) stay tightly packed.

use crate::scalar::Scalar;
use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;
use std::{
    fmt::Debug,
    hash::Hash,
    mem::{align_of, size_of},
};

const_assert_eq!(u8::BITS, 8);
const_assert_eq!(size_of::<f32>(), 4);
const_assert_eq!(size_of::<f64>(), 8);
const_assert_eq!(size_of::<i32>(), 4);
const_assert_eq!(f32::RADIX, 2);
const_assert_eq!(f32::MANTISSA_DIGITS, 24);
const_assert_eq!(f64::MANTISSA_DIGITS, 53);

/// Alignment in bytes of an aggregate `bytes` wide whose scalar is aligned
/// to `natural` bytes.
pub const fn alignment(bytes: usize, natural: usize) -> usize {
    match bytes {
        4 => 4,
        8 => 8,
        16 => 16,
        32 => 32,
        // 12 and 24 bytes: 3-wide aggregates.
        _ => natural,
    }
}

macro_rules! align_markers {
    ($($name:ident => $n:literal),* $(,)?) => {
        $(
            #[doc = concat!("Zero-sized field aligning its container to ", $n, " bytes.")]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            #[repr(C, align($n))]
            pub struct $name;

            unsafe impl Zeroable for $name {}
            unsafe impl Pod for $name {}
        )*
    };
}

align_markers!(Align4 => 4, Align8 => 8, Align16 => 16, Align32 => 32);

/// Scalars that can form an aggregate of `N` lanes.
///
/// Only implemented for `N` in `2..=4`, so aggregates of any other width are
/// rejected at compile time.
///
/// # Safety
///
/// `Align` must be a zero-sized type aligned to
/// `alignment(N * size_of::<Self>(), align_of::<Self>())`, which must divide
/// `N * size_of::<Self>()`.
pub unsafe trait Lanes<const N: usize>: Scalar {
    /// Marker selecting the alignment of the aggregate.
    type Align: Pod + Default + Debug + PartialEq + Eq + Hash + Send + Sync;
}

macro_rules! impl_lanes {
    ($($t:ty: $($n:literal => $align:ty),+);* $(;)?) => {
        $($(
            unsafe impl Lanes<$n> for $t {
                type Align = $align;
            }

            const_assert_eq!(size_of::<$align>(), 0);
            const_assert_eq!(
                align_of::<$align>(),
                alignment($n * size_of::<$t>(), align_of::<$t>())
            );
            const_assert_eq!(($n * size_of::<$t>()) % align_of::<$align>(), 0);
        )+)*
    };
}

impl_lanes! {
    f32: 2 => Align8, 3 => Align4, 4 => Align16;
    f64: 2 => Align16, 3 => Align8, 4 => Align32;
    i32: 2 => Align8, 3 => Align4, 4 => Align16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_table() {
        assert_eq!(alignment(4, 4), 4);
        assert_eq!(alignment(8, 4), 8);
        assert_eq!(alignment(12, 4), 4);
        assert_eq!(alignment(16, 4), 16);
        assert_eq!(alignment(16, 8), 16);
        assert_eq!(alignment(24, 8), 8);
        assert_eq!(alignment(32, 8), 32);
        assert_eq!(alignment(20, 4), 4);
    }

    #[test]
    fn markers_are_zero_sized() {
        assert_eq!(size_of::<Align4>(), 0);
        assert_eq!(align_of::<Align4>(), 4);
        assert_eq!(align_of::<Align8>(), 8);
        assert_eq!(align_of::<Align16>(), 16);
        assert_eq!(align_of::<Align32>(), 32);
    }
}
