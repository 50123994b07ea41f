//! Row-major matrices.
//!
//! A [`Matrix<T, R, C>`] is stored as `R` row vectors of `C` scalars, so its
//! memory is `R * C` contiguous scalars in row-major order. Vectors are
//! columns multiplied on the right: `m * v`.
//!
//! Square matrices of size 2, 3 and 4 additionally implement
//! [`SquareMatrix`] (determinant and inverse).

use crate::{
    array::print_slice,
    error::{check_alignment, check_len},
    layout::Lanes,
    vector::Vector,
    Error,
};
use bytemuck::{Pod, Zeroable};
use std::{
    fmt::{Debug, Display, Formatter},
    mem::{align_of, size_of},
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

mod square;

pub use square::{determinant, inverse, SquareMatrix};

/// Matrix of `R` rows and `C` columns.
#[repr(C)]
pub struct Matrix<T: Lanes<C>, const R: usize, const C: usize> {
    rows: [Vector<T, C>; R],
}

struct BlockInBounds<
    const I: usize,
    const J: usize,
    const R2: usize,
    const C2: usize,
    const R: usize,
    const C: usize,
>;

impl<
        const I: usize,
        const J: usize,
        const R2: usize,
        const C2: usize,
        const R: usize,
        const C: usize,
    > BlockInBounds<I, J, R2, C2, R, C>
{
    const OK: () = assert!(I + R2 <= R && J + C2 <= C, "sub-matrix out of range");
}

impl<T: Lanes<C>, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Creates a matrix from its elements, row by row.
    #[inline]
    pub fn new(elems: [[T; C]; R]) -> Self { Self::from_rows(elems.map(Vector::from_array)) }

    /// Creates a matrix from its row vectors.
    #[inline(always)]
    pub const fn from_rows(rows: [Vector<T, C>; R]) -> Self { Self { rows } }

    /// Creates a matrix from its column vectors.
    #[inline]
    pub fn from_columns(columns: [Vector<T, R>; C]) -> Self
    where
        T: Lanes<R>,
    {
        Self::new(std::array::from_fn(|i| std::array::from_fn(|j| columns[j][i])))
    }

    /// Matrix with every element set to zero.
    #[inline]
    pub fn zero() -> Self { Self::from_rows([Vector::zero(); R]) }

    /// Copies the first `R * C` scalars of `src`, row by row.
    pub fn from_slice(src: &[T]) -> Result<Self, Error> {
        check_len(src, R * C)?;
        let mut m = Self::zero();
        for (row, chunk) in m.rows.iter_mut().zip(src.chunks_exact(C)) {
            row.as_mut_slice().copy_from_slice(chunk);
        }
        Ok(m)
    }

    /// Copies the first `R * C` scalars of `src`, which must be aligned
    /// like `Self`.
    pub fn from_slice_aligned(src: &[T]) -> Result<Self, Error> {
        check_alignment(src, align_of::<Self>())?;
        Self::from_slice(src)
    }

    /// Copies `R * C` scalars starting at `src`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading `R * C` scalars. No alignment beyond
    /// the scalar's is required.
    #[inline]
    pub unsafe fn read(src: *const T) -> Self { src.cast::<Self>().read_unaligned() }

    /// Copies `R * C` scalars starting at `src`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading `R * C` scalars and aligned like
    /// `Self`.
    #[inline]
    pub unsafe fn read_aligned(src: *const T) -> Self {
        debug_assert_eq!(src as usize % align_of::<Self>(), 0);
        src.cast::<Self>().read()
    }

    /// Row vectors.
    #[inline(always)]
    pub const fn rows(&self) -> &[Vector<T, C>; R] { &self.rows }

    /// Elements row by row.
    #[inline]
    pub fn to_array(self) -> [[T; C]; R] { self.rows.map(Vector::to_array) }

    /// Elements as one slice, row by row.
    #[inline]
    pub fn as_slice(&self) -> &[T] { bytemuck::cast_slice(&self.rows[..]) }

    /// Elements as one mutable slice, row by row.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] { bytemuck::cast_slice_mut(&mut self.rows[..]) }

    /// Pointer to the first element.
    #[inline(always)]
    pub fn data(&self) -> *const T { self.rows.as_ptr().cast() }

    /// Mutable pointer to the first element.
    #[inline(always)]
    pub fn data_mut(&mut self) -> *mut T { self.rows.as_mut_ptr().cast() }

    /// Row `i`, wrapping around like indexing.
    #[inline]
    pub fn row(&self, i: usize) -> Vector<T, C> { self[i] }

    /// Column `j`, wrapping around like indexing.
    #[inline]
    pub fn column(&self, j: usize) -> Vector<T, R>
    where
        T: Lanes<R>,
    {
        Vector::from_array(std::array::from_fn(|i| self.rows[i][j]))
    }

    /// Element at row `i` and column `j`, or `None` if out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        self.rows.get(i).and_then(|row| row.as_slice().get(j)).copied()
    }

    /// Swaps rows and columns.
    #[inline]
    pub fn transpose(&self) -> Matrix<T, C, R>
    where
        T: Lanes<R>,
    {
        Matrix::from_rows(std::array::from_fn(|j| self.column(j)))
    }

    /// The `R2 x C2` block whose top-left element is at row `I`, column
    /// `J`. The block must fit inside the matrix.
    #[inline]
    pub fn extract<const I: usize, const J: usize, const R2: usize, const C2: usize>(
        &self,
    ) -> Matrix<T, R2, C2>
    where
        T: Lanes<C2>,
    {
        #[allow(clippy::let_unit_value)]
        let () = BlockInBounds::<I, J, R2, C2, R, C>::OK;
        Matrix::new(std::array::from_fn(|i| std::array::from_fn(|j| self.rows[I + i][J + j])))
    }

    /// Applies `f` to every element.
    #[inline]
    pub fn map<F: FnMut(T) -> T>(self, mut f: F) -> Self {
        Self::from_rows(self.rows.map(|row| row.map(&mut f)))
    }

    /// Combines the elements of `self` and `other` pairwise.
    #[inline]
    pub fn zip_map<F: FnMut(T, T) -> T>(self, other: Self, mut f: F) -> Self {
        Self::from_rows(std::array::from_fn(|i| self.rows[i].zip_map(other.rows[i], &mut f)))
    }

    /// Maximum absolute row sum.
    pub fn norm_inf(&self) -> T {
        let mut norm = T::zero();
        for row in &self.rows {
            let sum = row
                .as_slice()
                .iter()
                .fold(T::zero(), |acc, &x| acc + if x < T::zero() { -x } else { x });
            if norm < sum {
                norm = sum;
            }
        }
        norm
    }
}

impl<T: Lanes<N>, const N: usize> Matrix<T, N, N> {
    /// Diagonal matrix with `k` on the diagonal.
    #[inline]
    pub fn from_diagonal(k: T) -> Self {
        let mut m = Self::zero();
        for (i, row) in m.rows.iter_mut().enumerate() {
            row[i] = k;
        }
        m
    }

    /// Identity matrix.
    #[inline]
    pub fn identity() -> Self { Self::from_diagonal(T::one()) }

    /// Raises the matrix to an integer power by repeated squaring;
    /// `pow(0)` is the identity.
    pub fn pow(self, mut exponent: u32) -> Self {
        let mut acc = Self::identity();
        let mut base = self;
        while exponent > 0 {
            if exponent & 1 == 1 {
                acc = acc * base;
            }
            exponent >>= 1;
            if exponent > 0 {
                base = base * base;
            }
        }
        acc
    }

    /// Sum of the diagonal.
    #[inline]
    pub fn trace(&self) -> T { (0..N).fold(T::zero(), |acc, i| acc + self.rows[i][i]) }
}

impl<T: Lanes<C>, const R: usize, const C: usize> Clone for Matrix<T, R, C> {
    fn clone(&self) -> Self { *self }
}

impl<T: Lanes<C>, const R: usize, const C: usize> Copy for Matrix<T, R, C> {}

unsafe impl<T: Lanes<C>, const R: usize, const C: usize> Zeroable for Matrix<T, R, C> {}

// Rows are padding-free and their size is a multiple of their alignment.
unsafe impl<T: Lanes<C>, const R: usize, const C: usize> Pod for Matrix<T, R, C> {}

impl<T: Lanes<C>, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self { Self::zero() }
}

impl<T: Lanes<C>, const R: usize, const C: usize> PartialEq for Matrix<T, R, C> {
    fn eq(&self, other: &Self) -> bool { self.rows == other.rows }
}

impl<T: Lanes<C> + Eq, const R: usize, const C: usize> Eq for Matrix<T, R, C> {}

/// Row indices wrap around: `m[i]` is `m[i % R]`.
impl<T: Lanes<C>, const R: usize, const C: usize> Index<usize> for Matrix<T, R, C> {
    type Output = Vector<T, C>;

    #[inline(always)]
    fn index(&self, index: usize) -> &Vector<T, C> { &self.rows[index % R] }
}

impl<T: Lanes<C>, const R: usize, const C: usize> IndexMut<usize> for Matrix<T, R, C> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Vector<T, C> { &mut self.rows[index % R] }
}

impl<T: Lanes<C>, const R: usize, const C: usize> Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("Matrix({:?})", self.to_array()))
    }
}

impl<T: Lanes<C>, const R: usize, const C: usize> Display for Matrix<T, R, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            print_slice(f, row.as_slice())?;
        }
        f.write_str("]")
    }
}

impl<T, const R: usize, const C: usize> approx::AbsDiffEq for Matrix<T, R, C>
where
    T: Lanes<C> + approx::AbsDiffEq<Epsilon = T>,
{
    type Epsilon = T;

    fn default_epsilon() -> T { T::default_epsilon() }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.rows.iter().zip(&other.rows).all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T, const R: usize, const C: usize> approx::RelativeEq for Matrix<T, R, C>
where
    T: Lanes<C> + approx::RelativeEq<Epsilon = T>,
{
    fn default_max_relative() -> T { T::default_max_relative() }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.rows
            .iter()
            .zip(&other.rows)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T, const R: usize, const C: usize> approx::UlpsEq for Matrix<T, R, C>
where
    T: Lanes<C> + approx::UlpsEq<Epsilon = T>,
{
    fn default_max_ulps() -> u32 { T::default_max_ulps() }

    fn ulps_eq(&self, other: &Self, epsilon: T, max_ulps: u32) -> bool {
        self.rows.iter().zip(&other.rows).all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

macro_rules! impl_elementwise_ops {
    ($($trait:ident, $op:ident, $assign_trait:ident, $assign_op:ident);*) => {
        $(
            impl<T: Lanes<C>, const R: usize, const C: usize> $trait for Matrix<T, R, C> {
                type Output = Self;

                #[inline]
                fn $op(self, other: Self) -> Self { self.zip_map(other, |a, b| a.$op(b)) }
            }

            impl<T: Lanes<C>, const R: usize, const C: usize> $assign_trait for Matrix<T, R, C> {
                #[inline]
                fn $assign_op(&mut self, other: Self) { *self = (*self).$op(other) }
            }
        )*
    };
}

impl_elementwise_ops! {
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign
}

macro_rules! impl_scalar_ops {
    ($($trait:ident, $op:ident, $assign_trait:ident, $assign_op:ident);*) => {
        $(
            impl<T: Lanes<C>, const R: usize, const C: usize> $trait<T> for Matrix<T, R, C> {
                type Output = Self;

                #[inline]
                fn $op(self, k: T) -> Self { self.map(|a| a.$op(k)) }
            }

            impl<T: Lanes<C>, const R: usize, const C: usize> $assign_trait<T> for Matrix<T, R, C> {
                #[inline]
                fn $assign_op(&mut self, k: T) { *self = (*self).$op(k) }
            }
        )*
    };
}

impl_scalar_ops! {
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign
}

impl<T: Lanes<C>, const R: usize, const C: usize> Neg for Matrix<T, R, C> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self { self.map(|a| -a) }
}

/// `result[i][j] = Σ_k a[i][k] * b[k][j]`, accumulated from zero in `k`
/// order by the active backend.
impl<T, const R: usize, const K: usize, const C: usize> Mul<Matrix<T, K, C>> for Matrix<T, R, K>
where
    T: Lanes<K> + Lanes<C>,
{
    type Output = Matrix<T, R, C>;

    #[inline]
    fn mul(self, other: Matrix<T, K, C>) -> Matrix<T, R, C> {
        Matrix::new(T::mul_rows(&self.to_array(), &other.to_array()))
    }
}

impl<T: Lanes<N>, const N: usize> MulAssign for Matrix<T, N, N> {
    #[inline]
    fn mul_assign(&mut self, other: Self) { *self = *self * other }
}

impl<T, const R: usize, const C: usize> Mul<Vector<T, C>> for Matrix<T, R, C>
where
    T: Lanes<R> + Lanes<C>,
{
    type Output = Vector<T, R>;

    #[inline]
    fn mul(self, v: Vector<T, C>) -> Vector<T, R> {
        Vector::from_array(std::array::from_fn(|i| self.rows[i].dot(v)))
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {
        $(
            impl<const R: usize, const C: usize> Mul<Matrix<$t, R, C>> for $t
            where
                $t: Lanes<C>,
            {
                type Output = Matrix<$t, R, C>;

                #[inline]
                fn mul(self, m: Matrix<$t, R, C>) -> Matrix<$t, R, C> { m.map(|a| self * a) }
            }
        )*
    };
}

impl_scalar_lhs_mul!(f32, f64, i32);

impl<T: Lanes<C>, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, R, C> {
    fn from(elems: [[T; C]; R]) -> Self { Self::new(elems) }
}

impl<T: Lanes<C>, const R: usize, const C: usize> TryFrom<&[T]> for Matrix<T, R, C> {
    type Error = Error;

    fn try_from(src: &[T]) -> Result<Self, Error> { Self::from_slice(src) }
}

macro_rules! assert_matrix_layout {
    ($($t:ty: $($n:literal),+);*) => {
        $($(
            static_assertions::const_assert_eq!(
                size_of::<Matrix<$t, $n, $n>>(),
                $n * $n * size_of::<$t>()
            );
            static_assertions::const_assert_eq!(
                align_of::<Matrix<$t, $n, $n>>(),
                align_of::<Vector<$t, $n>>()
            );
        )+)*
    };
}

assert_matrix_layout! {
    f32: 2, 3, 4;
    f64: 2, 3, 4;
    i32: 2, 3, 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mat2i, Mat3f, Mat4d, Mat4f, Vec2i, Vec3f, Vec3i, Vec4d};
    use approx::assert_ulps_eq;

    #[test]
    fn construction() {
        let m = Mat2i::new([[1, 2], [3, 4]]);
        assert_eq!(m.rows(), &[Vec2i::new(1, 2), Vec2i::new(3, 4)]);
        assert_eq!(Mat2i::from_columns([Vec2i::new(1, 3), Vec2i::new(2, 4)]), m);
        assert_eq!(Mat2i::from_rows([Vec2i::new(1, 2), Vec2i::new(3, 4)]), m);
        assert_eq!(Mat2i::default(), Mat2i::new([[0, 0], [0, 0]]));
        assert_eq!(
            Mat3f::from_diagonal(2.0).to_array(),
            [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]
        );
        assert_eq!(Mat3f::identity().trace(), 3.0);
    }

    #[test]
    fn rows_and_columns() {
        let m = Matrix::<i32, 2, 3>::new([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.row(1), Vec3i::new(4, 5, 6));
        assert_eq!(m.column(2), Vec2i::new(3, 6));
        assert_eq!(m.get(1, 2), Some(6));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m[3], m[1]);
        assert_eq!(m[2][4], 2);
        let t = m.transpose();
        assert_eq!(t.to_array(), [[1, 4], [2, 5], [3, 6]]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn extract_block() {
        let m = Mat4f::new([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        let b = m.extract::<1, 2, 2, 2>();
        assert_eq!(b.to_array(), [[7.0, 8.0], [11.0, 12.0]]);
        let upper = m.extract::<0, 0, 3, 3>();
        assert_eq!(upper.row(2), Vec3f::new(9.0, 10.0, 11.0));
    }

    #[test]
    fn elementwise_arithmetic() {
        let a = Mat2i::new([[1, 2], [3, 4]]);
        let b = Mat2i::new([[4, 3], [2, 1]]);
        assert_eq!(a + b, Mat2i::new([[5, 5], [5, 5]]));
        assert_eq!(a - b, Mat2i::new([[-3, -1], [1, 3]]));
        assert_eq!(-a, Mat2i::new([[-1, -2], [-3, -4]]));
        assert_eq!(a * 2, Mat2i::new([[2, 4], [6, 8]]));
        assert_eq!(2 * a, a * 2);
        assert_eq!((a * 2) / 2, a);
        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
        c *= 3;
        c /= 3;
        assert_eq!(c, b);
    }

    #[test]
    fn products() {
        let a = Mat2i::new([[1, 2], [3, 4]]);
        let b = Mat2i::new([[5, 6], [7, 8]]);
        assert_eq!(a * b, Mat2i::new([[19, 22], [43, 50]]));
        assert_eq!(a * Vec2i::new(1, 1), Vec2i::new(3, 7));

        let r = Matrix::<i32, 2, 3>::new([[1, 0, 2], [0, 1, 0]]);
        let s = Matrix::<i32, 3, 2>::new([[1, 2], [3, 4], [5, 6]]);
        assert_eq!(r * s, Mat2i::new([[11, 14], [3, 4]]));
        assert_eq!(r * Vec3i::new(1, 2, 3), Vec2i::new(7, 2));

        let mut m = a;
        m *= Mat2i::identity();
        assert_eq!(m, a);
    }

    #[test]
    fn powers() {
        let m = Mat2i::new([[1, 1], [1, 0]]);
        assert_eq!(m.pow(0), Mat2i::identity());
        assert_eq!(m.pow(1), m);
        assert_eq!(m.pow(10), Mat2i::new([[89, 55], [55, 34]]));
        assert_eq!(m.pow(5), m * m * m * m * m);
    }

    #[test]
    fn slice_and_pointer_reads() {
        let data: Vec<f64> = (0..17).map(f64::from).collect();
        let m = Mat4d::from_slice(&data[1..]).unwrap();
        assert_eq!(m.row(0), Vec4d::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(m.as_slice(), &data[1..]);
        assert_eq!(
            Mat4d::try_from(&data[..3]),
            Err(Error::SliceTooShort {
                expected: 16,
                actual: 3
            })
        );
        let p = unsafe { Mat4d::read(data.as_ptr().add(1)) };
        assert_eq!(p, m);
        let q = unsafe { Mat4d::read_aligned(m.data()) };
        assert_eq!(q, m);
        assert_eq!(Mat4d::from_slice_aligned(m.as_slice()), Ok(m));
    }

    #[test]
    fn matrix_display() {
        let m = Mat2i::new([[1, 2], [3, 4]]);
        assert_eq!(format!("{}", m), "[[1, 2], [3, 4]]");
        assert_eq!(format!("{:?}", m), "Matrix([[1, 2], [3, 4]])");
    }

    #[test]
    fn infinity_norm() {
        let m = Mat3f::new([[1.0, -2.0, 0.0], [0.5, 0.5, 0.5], [-4.0, 0.0, 0.0]]);
        assert_ulps_eq!(m.norm_inf(), 4.0);
    }

    #[test]
    fn bulk_cast() {
        let m = Mat3f::identity();
        let raw: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&m));
        assert_eq!(raw.len(), 9);
        assert_eq!(raw[4], 1.0);
        let mut w = m;
        w.as_mut_slice()[1] = 5.0;
        assert_eq!(w[0][1], 5.0);
        unsafe { *w.data_mut().add(2) = 6.0 };
        assert_eq!(w.get(0, 2), Some(6.0));
    }
}
