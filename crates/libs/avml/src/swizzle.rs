//! Component reordering.
//!
//! `v.swizzle3::<2, 1, 0>()` returns a vector whose component `k` is the
//! component of `v` named by the `k`-th index. Every index is checked
//! against `N` when the call is instantiated; an out of range index fails
//! to compile. The named accessors (`xy`, `zyx`, `wzyx`, ...) are shorthands
//! for the same reorderings.

use crate::{layout::Lanes, point::Point, vector::Vector};

struct InBounds<const I: usize, const N: usize>;

impl<const I: usize, const N: usize> InBounds<I, N> {
    const OK: () = assert!(I < N, "swizzle index out of range");
}

macro_rules! impl_swizzle {
    ($ty:ident) => {
        impl<T: Lanes<N>, const N: usize> $ty<T, N> {
            /// Component `I`, checked against `N` at compile time.
            #[inline(always)]
            pub fn get<const I: usize>(&self) -> T {
                #[allow(clippy::let_unit_value)]
                let () = InBounds::<I, N>::OK;
                self.as_array()[I]
            }

            /// Reorders into two components.
            #[inline]
            pub fn swizzle2<const I: usize, const J: usize>(&self) -> $ty<T, 2>
            where
                T: Lanes<2>,
            {
                $ty::<T, 2>::new(self.get::<I>(), self.get::<J>())
            }

            /// Reorders into three components.
            #[inline]
            pub fn swizzle3<const I: usize, const J: usize, const K: usize>(&self) -> $ty<T, 3>
            where
                T: Lanes<3>,
            {
                $ty::<T, 3>::new(self.get::<I>(), self.get::<J>(), self.get::<K>())
            }

            /// Reorders into four components.
            #[inline]
            pub fn swizzle4<const I: usize, const J: usize, const K: usize, const L: usize>(
                &self,
            ) -> $ty<T, 4>
            where
                T: Lanes<4>,
            {
                $ty::<T, 4>::new(self.get::<I>(), self.get::<J>(), self.get::<K>(), self.get::<L>())
            }
        }

        impl_swizzle!(@named $ty;
            x => 0, y => 1, z => 2, w => 3;
            xy => 2: 0, 1; yx => 2: 1, 0; xz => 2: 0, 2; zx => 2: 2, 0;
            yz => 2: 1, 2; zy => 2: 2, 1; xw => 2: 0, 3; zw => 2: 2, 3;
            xyz => 3: 0, 1, 2; xzy => 3: 0, 2, 1; yxz => 3: 1, 0, 2;
            yzx => 3: 1, 2, 0; zxy => 3: 2, 0, 1; zyx => 3: 2, 1, 0;
            xyzw => 4: 0, 1, 2, 3; wzyx => 4: 3, 2, 1, 0; wxyz => 4: 3, 0, 1, 2
        );
    };
    (@named $ty:ident;
        $($one:ident => $i:literal),*;
        $($many:ident => $m:literal: $($j:literal),+);*
    ) => {
        paste::paste! {
            impl<T: Lanes<N>, const N: usize> $ty<T, N> {
                $(
                    #[doc = concat!("Component ", stringify!($one), ".")]
                    #[inline(always)]
                    pub fn $one(&self) -> T { self.get::<$i>() }
                )*

                $(
                    #[doc = concat!("Components ", stringify!($many), ".")]
                    #[inline(always)]
                    pub fn $many(&self) -> $ty<T, $m>
                    where
                        T: Lanes<$m>,
                    {
                        self.[<swizzle $m>]::<$($j),+>()
                    }
                )*
            }
        }
    };
}

impl_swizzle!(Vector);
impl_swizzle!(Point);

#[cfg(test)]
mod tests {
    use crate::{Pnt3f, Vec2i, Vec3i, Vec4f, Vec4i};

    #[test]
    fn reorders_components() {
        let v = Vec4i::new(1, 2, 3, 4);
        assert_eq!(v.swizzle2::<3, 0>(), Vec2i::new(4, 1));
        assert_eq!(v.swizzle3::<1, 1, 2>(), Vec3i::new(2, 2, 3));
        assert_eq!(v.swizzle4::<0, 0, 3, 3>(), Vec4i::new(1, 1, 4, 4));
    }

    #[test]
    fn named_accessors() {
        let v = Vec4f::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));
        assert_eq!(v.wzyx(), Vec4f::new(4.0, 3.0, 2.0, 1.0));
        assert_eq!(v.zw().to_array(), [3.0, 4.0]);
        let u = Vec3i::new(1, 2, 3);
        assert_eq!(u.zyx(), Vec3i::new(3, 2, 1));
        assert_eq!(u.xy(), Vec2i::new(1, 2));
        assert_eq!(u.yzx().xyz(), Vec3i::new(2, 3, 1));
    }

    #[test]
    fn widening_swizzle() {
        let v = Vec2i::new(7, 8);
        assert_eq!(v.swizzle4::<0, 1, 1, 0>(), Vec4i::new(7, 8, 8, 7));
    }

    #[test]
    fn point_swizzle() {
        let p = Pnt3f::new(1.0, 2.0, 3.0);
        assert_eq!(p.zyx(), Pnt3f::new(3.0, 2.0, 1.0));
        assert_eq!(p.xz().to_array(), [1.0, 3.0]);
    }
}
