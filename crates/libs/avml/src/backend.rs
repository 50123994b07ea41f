//! Implementation families of the reductions and products.
//!
//! Every family exposes the same functions (`dot_f32`, `cross_f32`,
//! `mul_rows_f32` and their `f64` twins); `active` names the family selected
//! at build time. Integers always go through [`generic`].

use cfg_if::cfg_if;

pub mod generic;

cfg_if! {
    if #[cfg(avml_sse2)] {
        pub mod x86;
        pub(crate) use self::x86 as active;
    } else if #[cfg(avml_neon)] {
        pub mod neon;
        pub(crate) use self::neon as active;
    } else {
        pub(crate) use self::generic as active;
    }
}
