//! Host and build identification for the report banner.
//!
//! Probing is best effort: anything that cannot be determined is reported
//! as [`UNKNOWN`] with a warning instead of aborting the benchmark.

use log::warn;
use serde::Serialize;

pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub cpu: String,
    pub arch: String,
    pub os: String,
    pub logical_cpus: usize,
    /// `rustc --version` of the compiler that built this binary.
    pub rustc: String,
    pub profile: String,
    /// Target arch and the SIMD target features enabled at compile time.
    pub target_features: String,
}

impl SystemInfo {
    pub fn probe() -> Self {
        let cpu = cpu_model().unwrap_or_else(|| {
            warn!("could not determine CPU model; banner shows `{}`", UNKNOWN);
            UNKNOWN.to_string()
        });
        Self {
            cpu,
            arch: std::env::consts::ARCH.to_string(),
            os: std::env::consts::OS.to_string(),
            logical_cpus: num_cpus::get(),
            rustc: env!("FFTCMP_RUSTC_VERSION").to_string(),
            profile: env!("FFTCMP_BUILD_PROFILE").to_string(),
            target_features: env!("FFTCMP_TARGET_FEATURES").to_string(),
        }
    }

    /// One line compiler identifier, e.g. `rustc 1.80.0 (release)`.
    pub fn compiler(&self) -> String {
        if self.profile.is_empty() {
            self.rustc.clone()
        } else {
            format!("{} ({})", self.rustc, self.profile)
        }
    }
}

#[cfg(target_os = "linux")]
fn cpu_model() -> Option<String> {
    match procfs::CpuInfo::new() {
        Ok(info) => info
            .model_name(0)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty()),
        Err(err) => {
            warn!("reading /proc/cpuinfo failed: {}", err);
            None
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn cpu_model() -> Option<String> {
    None
}
