//! Instruction set capability layer.
//!
//! The tier the kernel is compiled for is resolved at build time (see the
//! crate's build script) from the crate features and the target features of
//! the compilation. Every tier implies the lower tiers of its family, and a
//! build can only target a single family.

use crate::error::Error;
use cfg_if::cfg_if;
use std::fmt::{Display, Formatter};

#[cfg(all(avml_x86, avml_arm))]
compile_error!("instruction set extensions of both the x86 and the ARM family are enabled");

/// Family of an instruction set tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsaFamily {
    /// Plain scalar code, available everywhere.
    Portable,
    /// x86 and x86_64 SIMD extensions.
    X86,
    /// AArch64 SIMD extensions.
    Arm,
}

/// Instruction set tier.
///
/// Within a family, tiers are totally ordered: a tier implies every tier of
/// the same family that precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Isa {
    /// No SIMD extension.
    Scalar,
    /// SSE.
    Sse,
    /// SSE2.
    Sse2,
    /// SSE3.
    Sse3,
    /// Supplemental SSE3.
    Ssse3,
    /// SSE4.1.
    Sse41,
    /// SSE4.2.
    Sse42,
    /// AVX.
    Avx,
    /// AVX2.
    Avx2,
    /// AVX-512 foundation.
    Avx512f,
    /// AVX-512 vector length extensions.
    Avx512vl,
    /// Advanced SIMD.
    Neon,
    /// Scalable vector extension.
    Sve,
    /// Scalable vector extension 2.
    Sve2,
}

const X86_CHAIN: [Isa; 10] = [
    Isa::Sse,
    Isa::Sse2,
    Isa::Sse3,
    Isa::Ssse3,
    Isa::Sse41,
    Isa::Sse42,
    Isa::Avx,
    Isa::Avx2,
    Isa::Avx512f,
    Isa::Avx512vl,
];

const ARM_CHAIN: [Isa; 3] = [Isa::Neon, Isa::Sve, Isa::Sve2];

cfg_if! {
    if #[cfg(avml_avx512vl)] {
        const ACTIVE: Isa = Isa::Avx512vl;
    } else if #[cfg(avml_avx512f)] {
        const ACTIVE: Isa = Isa::Avx512f;
    } else if #[cfg(avml_avx2)] {
        const ACTIVE: Isa = Isa::Avx2;
    } else if #[cfg(avml_avx)] {
        const ACTIVE: Isa = Isa::Avx;
    } else if #[cfg(avml_sse42)] {
        const ACTIVE: Isa = Isa::Sse42;
    } else if #[cfg(avml_sse41)] {
        const ACTIVE: Isa = Isa::Sse41;
    } else if #[cfg(avml_ssse3)] {
        const ACTIVE: Isa = Isa::Ssse3;
    } else if #[cfg(avml_sse3)] {
        const ACTIVE: Isa = Isa::Sse3;
    } else if #[cfg(avml_sse2)] {
        const ACTIVE: Isa = Isa::Sse2;
    } else if #[cfg(avml_sse)] {
        const ACTIVE: Isa = Isa::Sse;
    } else if #[cfg(avml_sve2)] {
        const ACTIVE: Isa = Isa::Sve2;
    } else if #[cfg(avml_sve)] {
        const ACTIVE: Isa = Isa::Sve;
    } else if #[cfg(avml_neon)] {
        const ACTIVE: Isa = Isa::Neon;
    } else {
        const ACTIVE: Isa = Isa::Scalar;
    }
}

impl Isa {
    /// Tier the kernel has been compiled for.
    pub const ACTIVE: Isa = ACTIVE;

    /// Family the tier belongs to.
    pub const fn family(self) -> IsaFamily {
        match self {
            Isa::Scalar => IsaFamily::Portable,
            Isa::Neon | Isa::Sve | Isa::Sve2 => IsaFamily::Arm,
            _ => IsaFamily::X86,
        }
    }

    /// Position of the tier in its family's chain, `Scalar` being 0.
    pub const fn rank(self) -> u8 {
        match self {
            Isa::Scalar => 0,
            Isa::Sse | Isa::Neon => 1,
            Isa::Sse2 | Isa::Sve => 2,
            Isa::Sse3 | Isa::Sve2 => 3,
            Isa::Ssse3 => 4,
            Isa::Sse41 => 5,
            Isa::Sse42 => 6,
            Isa::Avx => 7,
            Isa::Avx2 => 8,
            Isa::Avx512f => 9,
            Isa::Avx512vl => 10,
        }
    }

    /// Returns true if enabling `self` also enables `other`.
    pub fn implies(self, other: Isa) -> bool {
        other == Isa::Scalar || (self.family() == other.family() && self.rank() >= other.rank())
    }

    /// Tiers implied by `self`, lowest first, excluding `Scalar`.
    pub fn implied(self) -> impl Iterator<Item = Isa> {
        let chain: &'static [Isa] = match self.family() {
            IsaFamily::Portable => &[],
            IsaFamily::X86 => &X86_CHAIN,
            IsaFamily::Arm => &ARM_CHAIN,
        };
        chain.iter().copied().filter(move |isa| self.implies(*isa))
    }

    /// Lowercase name of the tier.
    pub const fn name(self) -> &'static str {
        match self {
            Isa::Scalar => "scalar",
            Isa::Sse => "sse",
            Isa::Sse2 => "sse2",
            Isa::Sse3 => "sse3",
            Isa::Ssse3 => "ssse3",
            Isa::Sse41 => "sse4.1",
            Isa::Sse42 => "sse4.2",
            Isa::Avx => "avx",
            Isa::Avx2 => "avx2",
            Isa::Avx512f => "avx512f",
            Isa::Avx512vl => "avx512vl",
            Isa::Neon => "neon",
            Isa::Sve => "sve",
            Isa::Sve2 => "sve2",
        }
    }

    /// Checks at runtime whether the host processor supports the tier.
    pub fn is_supported(self) -> bool { host_supports(self) }

    /// Detects the highest tier the host processor supports.
    pub fn detect() -> Isa {
        let highest = |chain: &[Isa]| {
            chain
                .iter()
                .copied()
                .take_while(|isa| isa.is_supported())
                .last()
        };
        highest(&X86_CHAIN)
            .or_else(|| highest(&ARM_CHAIN))
            .unwrap_or(Isa::Scalar)
    }
}

cfg_if! {
    if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
        fn host_supports(isa: Isa) -> bool {
            match isa {
                Isa::Scalar => true,
                Isa::Sse => is_x86_feature_detected!("sse"),
                Isa::Sse2 => is_x86_feature_detected!("sse2"),
                Isa::Sse3 => is_x86_feature_detected!("sse3"),
                Isa::Ssse3 => is_x86_feature_detected!("ssse3"),
                Isa::Sse41 => is_x86_feature_detected!("sse4.1"),
                Isa::Sse42 => is_x86_feature_detected!("sse4.2"),
                Isa::Avx => is_x86_feature_detected!("avx"),
                Isa::Avx2 => is_x86_feature_detected!("avx2"),
                Isa::Avx512f => is_x86_feature_detected!("avx512f"),
                Isa::Avx512vl => is_x86_feature_detected!("avx512vl"),
                Isa::Neon | Isa::Sve | Isa::Sve2 => false,
            }
        }
    } else if #[cfg(target_arch = "aarch64")] {
        fn host_supports(isa: Isa) -> bool {
            match isa {
                Isa::Scalar => true,
                Isa::Neon => std::arch::is_aarch64_feature_detected!("neon"),
                Isa::Sve => std::arch::is_aarch64_feature_detected!("sve"),
                Isa::Sve2 => std::arch::is_aarch64_feature_detected!("sve2"),
                _ => false,
            }
        }
    } else {
        fn host_supports(isa: Isa) -> bool { isa == Isa::Scalar }
    }
}

impl Default for Isa {
    fn default() -> Self { Isa::ACTIVE }
}

impl Display for Isa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

/// How the vectorized backend moves 2-, 3- and 4-wide data in and out of
/// registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneStrategy {
    /// No vectorized backend; plain scalar loops.
    Portable,
    /// 8-byte and 4-byte moves combined into one register (SSE2 and up).
    Split,
    /// AVX masked moves with a lane mask held in a register (AVX2 tier).
    MaskLoad,
    /// AVX-512VL single-instruction masked moves.
    Masked,
    /// NEON whole-register and single-lane moves.
    Neon,
}

impl LaneStrategy {
    /// Strategy the kernel has been compiled with.
    pub const ACTIVE: LaneStrategy = if cfg!(avml_avx512vl) {
        LaneStrategy::Masked
    } else if cfg!(avml_avx2) {
        LaneStrategy::MaskLoad
    } else if cfg!(avml_sse2) {
        LaneStrategy::Split
    } else if cfg!(avml_neon) {
        LaneStrategy::Neon
    } else {
        LaneStrategy::Portable
    };
}

impl Display for LaneStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LaneStrategy::Portable => "portable",
            LaneStrategy::Split => "split 8+4 byte moves",
            LaneStrategy::MaskLoad => "avx masked moves",
            LaneStrategy::Masked => "avx-512vl masked moves",
            LaneStrategy::Neon => "neon lane moves",
        })
    }
}

/// Checks that the host supports every tier the kernel was compiled for.
///
/// Returns the active tier, or the lowest missing tier as an error.
pub fn verify() -> Result<Isa, Error> {
    if let Some(missing) = Isa::ACTIVE.implied().find(|isa| !isa.is_supported()) {
        log::error!(
            "avml was built for {} but the processor lacks {}",
            Isa::ACTIVE,
            missing
        );
        return Err(Error::UnsupportedIsa(missing));
    }
    log::info!(
        "avml instruction set: {}, lane strategy: {}",
        Isa::ACTIVE,
        LaneStrategy::ACTIVE
    );
    Ok(Isa::ACTIVE)
}
