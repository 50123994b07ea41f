//! Small-dimension linear algebra kernel.
//!
//! Vectors, unit vectors, points and matrices of 2 to 4 components over
//! `f32`, `f64` and `i32`, plus composable rigid and affine transforms.
//!
//! The reductions and products at the heart of the algebra are implemented
//! twice: a portable family and a vectorized family for the instruction set
//! tier selected at build time (see [`capability`]). Both produce the same
//! results bit for bit, and the memory layout of every type is independent of
//! the tier.

pub mod algebra;
pub mod array;
pub mod backend;
pub mod capability;
mod error;
pub mod layout;
pub mod math;
pub mod matrix;
pub mod point;
pub mod scalar;
pub mod swizzle;
pub mod transform;
pub mod unit;
pub mod vector;

pub use algebra::*;
pub use array::Array;
pub use capability::{Isa, IsaFamily, LaneStrategy};
pub use error::Error;
pub use layout::Lanes;
pub use matrix::{determinant, inverse, Matrix, SquareMatrix};
pub use point::Point;
pub use scalar::{Real, Scalar};
pub use transform::*;
pub use unit::UnitVector;
pub use vector::Vector;

macro_rules! aliases {
    ($($t:ty => $suffix:ident),*) => {
        paste::paste! {
            $(
                #[doc = concat!("Array of two `", stringify!($t), "`.")]
                pub type [<Arr2 $suffix>] = Array<$t, 2>;
                #[doc = concat!("Array of three `", stringify!($t), "`.")]
                pub type [<Arr3 $suffix>] = Array<$t, 3>;
                #[doc = concat!("Array of four `", stringify!($t), "`.")]
                pub type [<Arr4 $suffix>] = Array<$t, 4>;
                #[doc = concat!("2D vector of `", stringify!($t), "`.")]
                pub type [<Vec2 $suffix>] = Vector<$t, 2>;
                #[doc = concat!("3D vector of `", stringify!($t), "`.")]
                pub type [<Vec3 $suffix>] = Vector<$t, 3>;
                #[doc = concat!("4D vector of `", stringify!($t), "`.")]
                pub type [<Vec4 $suffix>] = Vector<$t, 4>;
                #[doc = concat!("2D point of `", stringify!($t), "`.")]
                pub type [<Pnt2 $suffix>] = Point<$t, 2>;
                #[doc = concat!("3D point of `", stringify!($t), "`.")]
                pub type [<Pnt3 $suffix>] = Point<$t, 3>;
                #[doc = concat!("4D point of `", stringify!($t), "`.")]
                pub type [<Pnt4 $suffix>] = Point<$t, 4>;
                #[doc = concat!("2x2 matrix of `", stringify!($t), "`.")]
                pub type [<Mat2 $suffix>] = Matrix<$t, 2, 2>;
                #[doc = concat!("3x3 matrix of `", stringify!($t), "`.")]
                pub type [<Mat3 $suffix>] = Matrix<$t, 3, 3>;
                #[doc = concat!("4x4 matrix of `", stringify!($t), "`.")]
                pub type [<Mat4 $suffix>] = Matrix<$t, 4, 4>;
            )*
        }
    };
}

aliases!(f32 => f, f64 => d, i32 => i);

macro_rules! unit_aliases {
    ($($t:ty => $suffix:ident),*) => {
        paste::paste! {
            $(
                #[doc = concat!("2D unit vector of `", stringify!($t), "`.")]
                pub type [<Unit2 $suffix>] = UnitVector<$t, 2>;
                #[doc = concat!("3D unit vector of `", stringify!($t), "`.")]
                pub type [<Unit3 $suffix>] = UnitVector<$t, 3>;
                #[doc = concat!("4D unit vector of `", stringify!($t), "`.")]
                pub type [<Unit4 $suffix>] = UnitVector<$t, 4>;
            )*
        }
    };
}

unit_aliases!(f32 => f, f64 => d);
