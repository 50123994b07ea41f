//! x86 implementation family, compiled from the SSE2 tier on.
//!
//! Products are computed on packed registers; reductions are finished
//! sequentially from zero so the results match [`super::generic`] bit for
//! bit. How 2-, 3- and 4-wide data enters and leaves the registers depends on
//! the tier:
//!
//! | tier            | strategy     |
//! |-----------------|--------------|
//! | AVX-512VL       | [`masked`]   |
//! | AVX2, AVX-512F  | [`maskload`] |
//! | SSE2 ... AVX    | [`split`]    |
//!
//! `f64` always moves through [`split`].

use super::generic;
use cfg_if::cfg_if;

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(avml_avx512vl)]
pub mod masked;
pub mod maskload;
pub mod split;

cfg_if! {
    if #[cfg(avml_avx512vl)] {
        use self::masked as lanes;
    } else if #[cfg(avml_avx2)] {
        use self::maskload as lanes;
    } else {
        use self::split as lanes;
    }
}

pub use generic::cross_f64;

#[inline(always)]
unsafe fn load<const N: usize>(src: *const f32) -> __m128 {
    match N {
        2 => lanes::load2f(src),
        3 => lanes::load3f(src),
        _ => lanes::load4f(src),
    }
}

#[inline(always)]
unsafe fn store<const N: usize>(dst: *mut f32, v: __m128) {
    match N {
        2 => lanes::store2f(dst, v),
        3 => lanes::store3f(dst, v),
        _ => lanes::store4f(dst, v),
    }
}

#[inline(always)]
unsafe fn load_pd<const N: usize>(src: *const f64) -> [__m128d; 2] {
    match N {
        2 => split::load2d(src),
        3 => split::load3d(src),
        _ => split::load4d(src),
    }
}

#[inline(always)]
unsafe fn store_pd<const N: usize>(dst: *mut f64, v: [__m128d; 2]) {
    match N {
        2 => split::store2d(dst, v),
        3 => split::store3d(dst, v),
        _ => split::store4d(dst, v),
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
    // SAFETY: the build targets SSE2 or higher and both tuples hold N lanes.
    unsafe {
        let p = _mm_mul_ps(load::<N>(a.as_ptr()), load::<N>(b.as_ptr()));
        _mm_storeu_ps(products.as_mut_ptr(), p);
    }
    let mut acc = 0.0;
    for p in &products[..N] {
        acc += *p;
    }
    acc
}

/// Cross product of `f32` triples.
#[inline]
pub fn cross_f32(a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
    let mut out = [0.0f32; 3];
    // SAFETY: the build targets SSE2 or higher; all pointers cover 3 lanes.
    unsafe {
        let a = lanes::load3f(a.as_ptr());
        let b = lanes::load3f(b.as_ptr());
        // (y, z, x, w) and (z, x, y, w)
        let a_yzx = _mm_shuffle_ps::<0b11_00_10_01>(a, a);
        let a_zxy = _mm_shuffle_ps::<0b11_01_00_10>(a, a);
        let b_yzx = _mm_shuffle_ps::<0b11_00_10_01>(b, b);
        let b_zxy = _mm_shuffle_ps::<0b11_01_00_10>(b, b);
        let c = _mm_sub_ps(_mm_mul_ps(a_yzx, b_zxy), _mm_mul_ps(a_zxy, b_yzx));
        lanes::store3f(out.as_mut_ptr(), c);
    }
    out
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
    // SAFETY: the build targets SSE2 or higher; every row holds C lanes.
    unsafe {
        for (row, lhs) in out.iter_mut().zip(a.iter()) {
            let mut acc = _mm_setzero_ps();
            for (k, rhs) in b.iter().enumerate() {
                acc = _mm_add_ps(acc, _mm_mul_ps(_mm_set1_ps(lhs[k]), load::<C>(rhs.as_ptr())));
            }
            store::<C>(row.as_mut_ptr(), acc);
        }
    }
    out
}

/// Dot product of `f64` tuples.
#[inline]
pub fn dot_f64<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    if !is_packed(N) {
        return generic::dot(a, b);
    }
    let mut products = [0.0f64; 4];
    // SAFETY: the build targets SSE2 or higher and both tuples hold N lanes.
    unsafe {
        let a = load_pd::<N>(a.as_ptr());
        let b = load_pd::<N>(b.as_ptr());
        _mm_storeu_pd(products.as_mut_ptr(), _mm_mul_pd(a[0], b[0]));
        _mm_storeu_pd(products.as_mut_ptr().add(2), _mm_mul_pd(a[1], b[1]));
    }
    let mut acc = 0.0;
    for p in &products[..N] {
        acc += *p;
    }
    acc
}

/// Row-major product of `f64` matrices.
#[inline]
pub fn mul_rows_f64<const R: usize, const K: usize, const C: usize>(
    a: &[[f64; K]; R],
    b: &[[f64; C]; K],
) -> [[f64; C]; R] {
    if !is_packed(C) {
        return generic::mul_rows(a, b);
    }
    let mut out = [[0.0f64; C]; R];
    // SAFETY: the build targets SSE2 or higher; every row holds C lanes.
    unsafe {
        for (row, lhs) in out.iter_mut().zip(a.iter()) {
            let mut acc = [_mm_setzero_pd(); 2];
            for (k, rhs) in b.iter().enumerate() {
                let s = _mm_set1_pd(lhs[k]);
                let r = load_pd::<C>(rhs.as_ptr());
                acc[0] = _mm_add_pd(acc[0], _mm_mul_pd(s, r[0]));
                acc[1] = _mm_add_pd(acc[1], _mm_mul_pd(s, r[1]));
            }
            store_pd::<C>(row.as_mut_ptr(), acc);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{array, prelude::*};

    type Load = unsafe fn(*const f32) -> __m128;
    type Store = unsafe fn(*mut f32, __m128);

    fn lanes_of(v: __m128) -> [f32; 4] {
        let mut out = [f32::NAN; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), v) };
        out
    }

    /// Loads from and stores to an address that is only 4-byte aligned and
    /// checks that no lane outside the aggregate is read or written.
    fn check_strategy(loads: [Load; 3], stores: [Store; 3]) {
        let src = [0.5f32, 1.0, 2.0, 3.0, 4.0, 5.0];
        unsafe {
            assert_eq!(lanes_of(loads[0](src.as_ptr().add(1))), [1.0, 2.0, 0.0, 0.0]);
            assert_eq!(lanes_of(loads[1](src.as_ptr().add(1))), [1.0, 2.0, 3.0, 0.0]);
            assert_eq!(lanes_of(loads[2](src.as_ptr().add(1))), [1.0, 2.0, 3.0, 4.0]);

            let v = _mm_setr_ps(1.0, 2.0, 3.0, 4.0);
            for (n, store) in stores.into_iter().enumerate() {
                let mut dst = [9.0f32; 6];
                store(dst.as_mut_ptr().add(1), v);
                let width = n + 2;
                assert_eq!(dst[0], 9.0);
                assert_eq!(&dst[1..1 + width], &[1.0, 2.0, 3.0, 4.0][..width]);
                assert!(dst[1 + width..].iter().all(|x| *x == 9.0));
            }
        }
    }

    #[test]
    fn split_strategy() {
        check_strategy(
            [split::load2f, split::load3f, split::load4f],
            [split::store2f, split::store3f, split::store4f],
        );
    }

    #[test]
    fn maskload_strategy() {
        if !is_x86_feature_detected!("avx") {
            return;
        }
        check_strategy(
            [maskload::load2f, maskload::load3f, maskload::load4f],
            [maskload::store2f, maskload::store3f, maskload::store4f],
        );
    }

    #[cfg(avml_avx512vl)]
    #[test]
    fn masked_strategy() {
        if !is_x86_feature_detected!("avx512vl") {
            return;
        }
        check_strategy(
            [masked::load2f, masked::load3f, masked::load4f],
            [masked::store2f, masked::store3f, masked::store4f],
        );
    }

    #[test]
    fn split_f64_moves() {
        let src = [1.0f64, 2.0, 3.0, 4.0];
        let mut dst = [9.0f64; 5];
        unsafe {
            split::store3d(dst.as_mut_ptr(), split::load3d(src.as_ptr()));
        }
        assert_eq!(dst, [1.0, 2.0, 3.0, 9.0, 9.0]);
        unsafe {
            split::store2d(dst.as_mut_ptr().add(3), split::load2d(src.as_ptr()));
        }
        assert_eq!(dst, [1.0, 2.0, 3.0, 1.0, 2.0]);
    }

    fn finite_f32() -> impl Strategy<Value = f32> { -1.0e3f32..1.0e3 }

    fn finite_f64() -> impl Strategy<Value = f64> { -1.0e3f64..1.0e3 }

    proptest! {
        #[test]
        fn dot_matches_generic(
            a in array::uniform4(finite_f32()),
            b in array::uniform4(finite_f32()),
        ) {
            prop_assert_eq!(dot_f32(&a, &b).to_bits(), generic::dot(&a, &b).to_bits());
            let (a3, b3) = ([a[0], a[1], a[2]], [b[0], b[1], b[2]]);
            prop_assert_eq!(dot_f32(&a3, &b3).to_bits(), generic::dot(&a3, &b3).to_bits());
            let (a2, b2) = ([a[0], a[1]], [b[0], b[1]]);
            prop_assert_eq!(dot_f32(&a2, &b2).to_bits(), generic::dot(&a2, &b2).to_bits());
        }

        #[test]
        fn dot_f64_matches_generic(
            a in array::uniform4(finite_f64()),
            b in array::uniform4(finite_f64()),
        ) {
            prop_assert_eq!(dot_f64(&a, &b).to_bits(), generic::dot(&a, &b).to_bits());
            let (a3, b3) = ([a[0], a[1], a[2]], [b[0], b[1], b[2]]);
            prop_assert_eq!(dot_f64(&a3, &b3).to_bits(), generic::dot(&a3, &b3).to_bits());
        }

        #[test]
        fn cross_matches_generic(
            a in array::uniform3(finite_f32()),
            b in array::uniform3(finite_f32()),
        ) {
            let simd = cross_f32(&a, &b).map(f32::to_bits);
            let scalar = generic::cross(&a, &b).map(f32::to_bits);
            prop_assert_eq!(simd, scalar);
        }

        #[test]
        fn mul_rows_matches_generic(
            a in array::uniform4(array::uniform4(finite_f32())),
            b in array::uniform4(array::uniform4(finite_f32())),
            c in array::uniform3(array::uniform3(finite_f64())),
            d in array::uniform3(array::uniform3(finite_f64())),
        ) {
            let simd = mul_rows_f32(&a, &b).map(|row| row.map(f32::to_bits));
            let scalar = generic::mul_rows(&a, &b).map(|row| row.map(f32::to_bits));
            prop_assert_eq!(simd, scalar);

            let simd = mul_rows_f64(&c, &d).map(|row| row.map(f64::to_bits));
            let scalar = generic::mul_rows(&c, &d).map(|row| row.map(f64::to_bits));
            prop_assert_eq!(simd, scalar);
        }

        #[test]
        fn rectangular_mul_rows_matches_generic(
            a in array::uniform2(array::uniform3(finite_f32())),
            b in array::uniform3(array::uniform2(finite_f32())),
        ) {
            let simd = mul_rows_f32(&a, &b).map(|row| row.map(f32::to_bits));
            let scalar = generic::mul_rows(&a, &b).map(|row| row.map(f32::to_bits));
            prop_assert_eq!(simd, scalar);
        }
    }
}
