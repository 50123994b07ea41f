//! AArch64 NEON implementation family.
//!
//! Same contract as the x86 family: packed products, sequential reductions
//! from zero. 3-wide data is moved as one 8-byte move plus a single-lane
//! move so nothing past the third scalar is touched.

use super::generic;
use std::arch::aarch64::*;

pub use generic::{cross_f32, cross_f64, dot_f64, mul_rows_f64};

/// Loads two `f32` into the low lanes; the high lanes are zeroed.
///
/// # Safety
///
/// `src` must be valid for reading two `f32`.
#[inline]
#[target_feature(enable = "neon")]
pub unsafe fn load2f(src: *const f32) -> float32x4_t {
    vcombine_f32(vld1_f32(src), vdup_n_f32(0.0))
}

/// Loads three `f32` into the low lanes; the last lane is zeroed.
///
/// # Safety
///
/// `src` must be valid for reading three `f32`.
#[inline]
#[target_feature(enable = "neon")]
pub unsafe fn load3f(src: *const f32) -> float32x4_t {
    vld1q_lane_f32::<2>(src.add(2), load2f(src))
}

/// Loads four `f32`.
///
/// # Safety
///
/// `src` must be valid for reading four `f32`.
#[inline]
#[target_feature(enable = "neon")]
pub unsafe fn load4f(src: *const f32) -> float32x4_t { vld1q_f32(src) }

/// Stores the two low lanes.
///
/// # Safety
///
/// `dst` must be valid for writing two `f32`.
#[inline]
#[target_feature(enable = "neon")]
pub unsafe fn store2f(dst: *mut f32, v: float32x4_t) { vst1_f32(dst, vget_low_f32(v)) }

/// Stores the three low lanes.
///
/// # Safety
///
/// `dst` must be valid for writing three `f32`.
#[inline]
#[target_feature(enable = "neon")]
pub unsafe fn store3f(dst: *mut f32, v: float32x4_t) {
    store2f(dst, v);
    vst1q_lane_f32::<2>(dst.add(2), v);
}

/// Stores all four lanes.
///
/// # Safety
///
/// `dst` must be valid for writing four `f32`.
#[inline]
#[target_feature(enable = "neon")]
pub unsafe fn store4f(dst: *mut f32, v: float32x4_t) { vst1q_f32(dst, v) }

#[inline(always)]
unsafe fn load<const N: usize>(src: *const f32) -> float32x4_t {
    match N {
        2 => load2f(src),
        3 => load3f(src),
        _ => load4f(src),
    }
}

#[inline(always)]
unsafe fn store<const N: usize>(dst: *mut f32, v: float32x4_t) {
    match N {
        2 => store2f(dst, v),
        3 => store3f(dst, v),
        _ => store4f(dst, v),
    }
}

const fn is_packed(n: usize) -> bool { n >= 2 && n <= 4 }

/// Dot product of `f32` tuples.
#[inline]
pub fn dot_f32<const N: usize>(a: &[f32; N], b: &[f32; N]) -> f32 {
    if !is_packed(N) {
        return generic::dot(a, b);
    }
    let mut products = [0.0f32; 4];
    // SAFETY: the build targets NEON and both tuples hold N lanes.
    unsafe {
        vst1q_f32(
            products.as_mut_ptr(),
            vmulq_f32(load::<N>(a.as_ptr()), load::<N>(b.as_ptr())),
        );
    }
    let mut acc = 0.0;
    for p in &products[..N] {
        acc += *p;
    }
    acc
}

/// Row-major product of `f32` matrices.
#[inline]
pub fn mul_rows_f32<const R: usize, const K: usize, const C: usize>(
    a: &[[f32; K]; R],
    b: &[[f32; C]; K],
) -> [[f32; C]; R] {
    if !is_packed(C) {
        return generic::mul_rows(a, b);
    }
    let mut out = [[0.0f32; C]; R];
    // SAFETY: the build targets NEON; every row holds C lanes.
    unsafe {
        for (row, lhs) in out.iter_mut().zip(a.iter()) {
            let mut acc = vdupq_n_f32(0.0);
            for (k, rhs) in b.iter().enumerate() {
                acc = vaddq_f32(acc, vmulq_f32(vdupq_n_f32(lhs[k]), load::<C>(rhs.as_ptr())));
            }
            store::<C>(row.as_mut_ptr(), acc);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{array, prelude::*};

    #[test]
    fn lane_moves() {
        let src = [0.5f32, 1.0, 2.0, 3.0, 4.0];
        let mut dst = [9.0f32; 5];
        unsafe {
            store3f(dst.as_mut_ptr().add(1), load3f(src.as_ptr().add(1)));
        }
        assert_eq!(dst, [9.0, 1.0, 2.0, 3.0, 9.0]);
        let mut lanes = [f32::NAN; 4];
        unsafe { vst1q_f32(lanes.as_mut_ptr(), load2f(src.as_ptr())) };
        assert_eq!(lanes, [0.5, 1.0, 0.0, 0.0]);
    }

    proptest! {
        #[test]
        fn dot_matches_generic(
            a in array::uniform4(-1.0e3f32..1.0e3),
            b in array::uniform4(-1.0e3f32..1.0e3),
        ) {
            prop_assert_eq!(dot_f32(&a, &b).to_bits(), generic::dot(&a, &b).to_bits());
        }

        #[test]
        fn mul_rows_matches_generic(
            a in array::uniform3(array::uniform3(-1.0e3f32..1.0e3)),
            b in array::uniform3(array::uniform3(-1.0e3f32..1.0e3)),
        ) {
            let simd = mul_rows_f32(&a, &b).map(|row| row.map(f32::to_bits));
            let scalar = generic::mul_rows(&a, &b).map(|row| row.map(f32::to_bits));
            prop_assert_eq!(simd, scalar);
        }
    }
}
