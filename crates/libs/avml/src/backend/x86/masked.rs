//! AVX-512VL single-instruction masked moves on 128-bit registers.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Loads two `f32` into the low lanes; the high lanes are zeroed.
///
/// # Safety
///
/// The processor must support AVX-512F and AVX-512VL and `src` must be valid
/// for reading two `f32`.
#[inline]
#[target_feature(enable = "avx512f,avx512vl")]
pub unsafe fn load2f(src: *const f32) -> __m128 { _mm_maskz_loadu_ps(0b0011, src) }

/// Loads three `f32` into the low lanes; the last lane is zeroed.
///
/// # Safety
///
/// The processor must support AVX-512F and AVX-512VL and `src` must be valid
/// for reading three `f32`.
#[inline]
#[target_feature(enable = "avx512f,avx512vl")]
pub unsafe fn load3f(src: *const f32) -> __m128 { _mm_maskz_loadu_ps(0b0111, src) }

/// Loads four `f32`.
///
/// # Safety
///
/// The processor must support AVX-512F and AVX-512VL and `src` must be valid
/// for reading four `f32`.
#[inline]
#[target_feature(enable = "avx512f,avx512vl")]
pub unsafe fn load4f(src: *const f32) -> __m128 { _mm_loadu_ps(src) }

/// Stores the two low lanes.
///
/// # Safety
///
/// The processor must support AVX-512F and AVX-512VL and `dst` must be valid
/// for writing two `f32`.
#[inline]
#[target_feature(enable = "avx512f,avx512vl")]
pub unsafe fn store2f(dst: *mut f32, v: __m128) { _mm_mask_storeu_ps(dst, 0b0011, v) }

/// Stores the three low lanes.
///
/// # Safety
///
/// The processor must support AVX-512F and AVX-512VL and `dst` must be valid
/// for writing three `f32`.
#[inline]
#[target_feature(enable = "avx512f,avx512vl")]
pub unsafe fn store3f(dst: *mut f32, v: __m128) { _mm_mask_storeu_ps(dst, 0b0111, v) }

/// Stores all four lanes.
///
/// # Safety
///
/// The processor must support AVX-512F and AVX-512VL and `dst` must be valid
/// for writing four `f32`.
#[inline]
#[target_feature(enable = "avx512f,avx512vl")]
pub unsafe fn store4f(dst: *mut f32, v: __m128) { _mm_storeu_ps(dst, v) }
