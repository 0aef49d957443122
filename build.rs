use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(&rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "rustc (unknown version)".to_string());
    println!("cargo:rustc-env=FFTCMP_RUSTC_VERSION={}", version);

    // PROFILE is "release" or "debug"; benches and `--release` runs report the former.
    let profile = env::var("PROFILE").unwrap_or_default();
    println!("cargo:rustc-env=FFTCMP_BUILD_PROFILE={}", profile);

    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let target_features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let simd: Vec<&str> = target_features
        .split(',')
        .filter(|f| matches!(*f, "sse4.1" | "avx" | "avx2" | "fma" | "avx512f" | "neon" | "simd128"))
        .collect();
    let simd = if simd.is_empty() {
        "baseline".to_string()
    } else {
        simd.join("+")
    };
    println!(
        "cargo:rustc-env=FFTCMP_TARGET_FEATURES={}:{}",
        target_arch, simd
    );
}
