//! Scalar math utilities.

use crate::scalar::Real;

/// Fused multiply-add: `m * x + b` rounded once.
#[inline(always)]
pub fn fmadd<T: Real>(m: T, x: T, b: T) -> T { m.mul_add(x, b) }

/// Fused negated multiply-add: `-(m * x) + b` rounded once.
#[inline(always)]
pub fn fmnadd<T: Real>(m: T, x: T, b: T) -> T { (-m).mul_add(x, b) }

/// Fused multiply-subtract: `m * x - b` rounded once.
#[inline(always)]
pub fn fmsub<T: Real>(m: T, x: T, b: T) -> T { m.mul_add(x, -b) }

/// Fused negated multiply-subtract: `-(m * x) - b` rounded once.
#[inline(always)]
pub fn fmnsub<T: Real>(m: T, x: T, b: T) -> T { (-m).mul_add(x, -b) }

/// Fractional part of `x`, `x - floor(x)`.
#[inline]
pub fn fract<T: Real>(x: T) -> T { x - x.floor() }

/// Restricts `x` to `[lo, hi]`.
///
/// Behaves as `min(max(x, lo), hi)` built from `<` comparisons only, so a NaN
/// `x` comes back unchanged.
#[inline]
pub fn clamp<T: PartialOrd>(x: T, lo: T, hi: T) -> T {
    let x = if x < lo { lo } else { x };
    if hi < x {
        hi
    } else {
        x
    }
}

/// Midpoint of `x` and `y` computed as `x - x/2 + y/2`, which cannot overflow
/// for finite inputs.
#[inline]
pub fn average<T: Real>(x: T, y: T) -> T {
    let half = T::one() / (T::one() + T::one());
    (x - x * half) + y * half
}

/// Distance between floating point numbers in units in the last place.
pub trait Ulps: Real {
    /// Unsigned integer wide enough to count the representable values of
    /// `Self`.
    type Distance: Copy + Ord;

    /// Number of representable steps from `self` to `other`, or `None` if
    /// either is NaN.
    ///
    /// Across the sign boundary the distance is the sum of both distances to
    /// zero; `+0` and `-0` are 0 apart.
    fn ulps_between(self, other: Self) -> Option<Self::Distance>;
}

macro_rules! impl_ulps {
    ($($t:ty => $bits:ty),*) => {
        $(
            impl Ulps for $t {
                type Distance = $bits;

                fn ulps_between(self, other: Self) -> Option<$bits> {
                    const SIGN: $bits = 1 << (<$bits>::BITS - 1);
                    if self.is_nan() || other.is_nan() {
                        return None;
                    }
                    let (a, b) = (self.to_bits(), other.to_bits());
                    let (ma, mb) = (a & !SIGN, b & !SIGN);
                    if (a ^ b) & SIGN == 0 {
                        Some(ma.abs_diff(mb))
                    } else {
                        Some(ma.saturating_add(mb))
                    }
                }
            }
        )*
    };
}

impl_ulps!(f32 => u32, f64 => u64);

/// Returns true if fewer than `margin` ULPs separate `x` and `y`.
///
/// NaN never compares equal.
#[inline]
pub fn compare_equal<T: Ulps>(x: T, y: T, margin: T::Distance) -> bool {
    matches!(x.ulps_between(y), Some(distance) if distance < margin)
}
