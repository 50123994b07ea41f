//! AVX masked moves (`vmaskmovps`), used from the AVX2 tier on.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Loads two `f32` into the low lanes; the high lanes are zeroed.
///
/// # Safety
///
/// The processor must support AVX and `src` must be valid for reading two
/// `f32`.
#[inline]
#[target_feature(enable = "avx")]
pub unsafe fn load2f(src: *const f32) -> __m128 {
    _mm_maskload_ps(src, _mm_setr_epi32(-1, -1, 0, 0))
}

/// Loads three `f32` into the low lanes; the last lane is zeroed.
///
/// # Safety
///
/// The processor must support AVX and `src` must be valid for reading three
/// `f32`.
#[inline]
#[target_feature(enable = "avx")]
pub unsafe fn load3f(src: *const f32) -> __m128 {
    _mm_maskload_ps(src, _mm_setr_epi32(-1, -1, -1, 0))
}

/// Loads four `f32`.
///
/// # Safety
///
/// The processor must support AVX and `src` must be valid for reading four
/// `f32`.
#[inline]
#[target_feature(enable = "avx")]
pub unsafe fn load4f(src: *const f32) -> __m128 { _mm_loadu_ps(src) }

/// Stores the two low lanes.
///
/// # Safety
///
/// The processor must support AVX and `dst` must be valid for writing two
/// `f32`.
#[inline]
#[target_feature(enable = "avx")]
pub unsafe fn store2f(dst: *mut f32, v: __m128) {
    _mm_maskstore_ps(dst, _mm_setr_epi32(-1, -1, 0, 0), v)
}

/// Stores the three low lanes.
///
/// # Safety
///
/// The processor must support AVX and `dst` must be valid for writing three
/// `f32`.
#[inline]
#[target_feature(enable = "avx")]
pub unsafe fn store3f(dst: *mut f32, v: __m128) {
    _mm_maskstore_ps(dst, _mm_setr_epi32(-1, -1, -1, 0), v)
}

/// Stores all four lanes.
///
/// # Safety
///
/// The processor must support AVX and `dst` must be valid for writing four
/// `f32`.
#[inline]
#[target_feature(enable = "avx")]
pub unsafe fn store4f(dst: *mut f32, v: __m128) { _mm_storeu_ps(dst, v) }
