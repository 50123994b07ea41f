//! Resolves the instruction set tier the kernel is compiled for.
//!
//! A tier is enabled either by the crate feature of the same name or by the
//! target feature the compiler already targets (e.g. `-C target-cpu=native`).
//! The union is closed under implication and emitted as one `avml_<tier>` cfg
//! per enabled tier, plus `avml_x86` / `avml_arm` for the family.

use std::env;

struct Tier {
    /// Name of the crate feature, as seen in `CARGO_FEATURE_*`.
    feature: &'static str,
    /// Name of the matching `target_feature`.
    target: &'static str,
    /// Name of the emitted cfg.
    cfg: &'static str,
}

const X86_TIERS: [Tier; 10] = [
    Tier { feature: "SSE", target: "sse", cfg: "avml_sse" },
    Tier { feature: "SSE2", target: "sse2", cfg: "avml_sse2" },
    Tier { feature: "SSE3", target: "sse3", cfg: "avml_sse3" },
    Tier { feature: "SSSE3", target: "ssse3", cfg: "avml_ssse3" },
    Tier { feature: "SSE41", target: "sse4.1", cfg: "avml_sse41" },
    Tier { feature: "SSE42", target: "sse4.2", cfg: "avml_sse42" },
    Tier { feature: "AVX", target: "avx", cfg: "avml_avx" },
    Tier { feature: "AVX2", target: "avx2", cfg: "avml_avx2" },
    Tier { feature: "AVX512F", target: "avx512f", cfg: "avml_avx512f" },
    Tier { feature: "AVX512VL", target: "avx512vl", cfg: "avml_avx512vl" },
];

const ARM_TIERS: [Tier; 3] = [
    Tier { feature: "NEON", target: "neon", cfg: "avml_neon" },
    Tier { feature: "SVE", target: "sve", cfg: "avml_sve" },
    Tier { feature: "SVE2", target: "sve2", cfg: "avml_sve2" },
];

/// Highest tier requested through crate features.
fn requested(tiers: &[Tier]) -> Option<usize> {
    tiers
        .iter()
        .rposition(|tier| env::var_os(format!("CARGO_FEATURE_{}", tier.feature)).is_some())
}

/// Highest tier whose target feature the compiler already targets.
fn targeted(tiers: &[Tier], target_features: &[&str]) -> Option<usize> {
    tiers
        .iter()
        .rposition(|tier| target_features.contains(&tier.target))
}

/// Emits the cfgs of the resolved tier and warns about requested tiers the
/// compiler does not target.
fn resolve(tiers: &[Tier], family: &str, target_features: &[&str]) {
    let requested = requested(tiers);
    let targeted = targeted(tiers, target_features);
    let highest = match (requested, targeted) {
        (Some(a), Some(b)) => a.max(b),
        (a, b) => match a.or(b) {
            Some(highest) => highest,
            None => return,
        },
    };

    println!("cargo:rustc-cfg={family}");
    for tier in &tiers[..=highest] {
        println!("cargo:rustc-cfg={}", tier.cfg);
        if requested.is_some() && !target_features.contains(&tier.target) {
            println!(
                "cargo:warning=`{}` is enabled but the target does not enable `{}`; \
                 call `avml::capability::verify()` before using the kernel",
                tier.feature.to_lowercase(),
                tier.target
            );
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    for tier in X86_TIERS.iter().chain(ARM_TIERS.iter()) {
        println!("cargo:rustc-check-cfg=cfg({})", tier.cfg);
    }
    println!("cargo:rustc-check-cfg=cfg(avml_x86)");
    println!("cargo:rustc-check-cfg=cfg(avml_arm)");

    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let target_features = features.split(',').collect::<Vec<_>>();
    let is_x86 = arch == "x86" || arch == "x86_64";
    let is_arm = arch == "aarch64";

    let wants_x86 = requested(&X86_TIERS).is_some();
    let wants_arm = requested(&ARM_TIERS).is_some();

    if wants_x86 && wants_arm {
        panic!("instruction set extensions of both the x86 and the ARM family are enabled");
    }
    if wants_x86 && !is_x86 {
        panic!("x86 instruction set extensions are enabled for the `{arch}` target");
    }
    if wants_arm && !is_arm {
        panic!("ARM instruction set extensions are enabled for the `{arch}` target");
    }

    if is_x86 {
        resolve(&X86_TIERS, "avml_x86", &target_features);
    } else if is_arm {
        resolve(&ARM_TIERS, "avml_arm", &target_features);
    }
}
