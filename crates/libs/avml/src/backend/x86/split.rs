//! Two-part moves: an 8-byte move for the first two lanes and a 4-byte (or
//! second 8-byte) move for the rest.
//!
//! Works on every SSE2 processor and only requires the natural alignment of
//! the scalar, which makes it the fallback for 3-wide data straddling an
//! 8-byte boundary.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Loads two `f32` into the low lanes; the high lanes are zeroed.
///
/// # Safety
///
/// `src` must be valid for reading two `f32`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn load2f(src: *const f32) -> __m128 {
    _mm_castsi128_ps(_mm_loadl_epi64(src.cast::<__m128i>()))
}

/// Loads three `f32` into the low lanes; the last lane is zeroed.
///
/// # Safety
///
/// `src` must be valid for reading three `f32`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn load3f(src: *const f32) -> __m128 {
    _mm_movelh_ps(load2f(src), _mm_load_ss(src.add(2)))
}

/// Loads four `f32`.
///
/// # Safety
///
/// `src` must be valid for reading four `f32`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn load4f(src: *const f32) -> __m128 { _mm_loadu_ps(src) }

/// Stores the two low lanes.
///
/// # Safety
///
/// `dst` must be valid for writing two `f32`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn store2f(dst: *mut f32, v: __m128) {
    _mm_storel_epi64(dst.cast::<__m128i>(), _mm_castps_si128(v))
}

/// Stores the three low lanes.
///
/// # Safety
///
/// `dst` must be valid for writing three `f32`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn store3f(dst: *mut f32, v: __m128) {
    store2f(dst, v);
    _mm_store_ss(dst.add(2), _mm_movehl_ps(v, v));
}

/// Stores all four lanes.
///
/// # Safety
///
/// `dst` must be valid for writing four `f32`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn store4f(dst: *mut f32, v: __m128) { _mm_storeu_ps(dst, v) }

/// Loads two `f64`; the second register is zeroed.
///
/// # Safety
///
/// `src` must be valid for reading two `f64`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn load2d(src: *const f64) -> [__m128d; 2] { [_mm_loadu_pd(src), _mm_setzero_pd()] }

/// Loads three `f64`; the last lane of the second register is zeroed.
///
/// # Safety
///
/// `src` must be valid for reading three `f64` and aligned to 8 bytes.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn load3d(src: *const f64) -> [__m128d; 2] {
    [_mm_loadu_pd(src), _mm_load_sd(src.add(2))]
}

/// Loads four `f64`.
///
/// # Safety
///
/// `src` must be valid for reading four `f64`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn load4d(src: *const f64) -> [__m128d; 2] {
    [_mm_loadu_pd(src), _mm_loadu_pd(src.add(2))]
}

/// Stores the two lanes of the first register.
///
/// # Safety
///
/// `dst` must be valid for writing two `f64`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn store2d(dst: *mut f64, v: [__m128d; 2]) { _mm_storeu_pd(dst, v[0]) }

/// Stores three lanes.
///
/// # Safety
///
/// `dst` must be valid for writing three `f64` and aligned to 8 bytes.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn store3d(dst: *mut f64, v: [__m128d; 2]) {
    _mm_storeu_pd(dst, v[0]);
    _mm_store_sd(dst.add(2), v[1]);
}

/// Stores four lanes.
///
/// # Safety
///
/// `dst` must be valid for writing four `f64`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn store4d(dst: *mut f64, v: [__m128d; 2]) {
    _mm_storeu_pd(dst, v[0]);
    _mm_storeu_pd(dst.add(2), v[1]);
}
