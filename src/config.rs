//! Run configuration: kernel sizes, measurement floor and transform kinds.
//!
//! Values come from command-line flags first, then `FFTCMP_*` environment
//! variables, then the defaults below.

use std::env;
use std::time::Duration;

use crate::error::BenchError;
use crate::unit::TransformKind;

/// Kernel sizes used when nothing else is configured.
pub const DEFAULT_SIZES: [usize; 7] = [128, 256, 512, 1024, 2048, 4096, 8192];

/// Default measurement floor per unit.
pub const DEFAULT_MIN_DURATION_MS: u64 = 100;

/// Largest accepted power of two for `--powers` / `FFTCMP_BENCH_POWERS`.
pub const MAX_POWER: u32 = 30;

pub const ENV_SIZES: &str = "FFTCMP_SIZES";
pub const ENV_POWERS: &str = "FFTCMP_BENCH_POWERS";
pub const ENV_MIN_DURATION_MS: &str = "FFTCMP_MIN_DURATION_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    pub min_duration: Duration,
    pub kinds: Vec<TransformKind>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            min_duration: Duration::from_millis(DEFAULT_MIN_DURATION_MS),
            kinds: TransformKind::ALL.to_vec(),
        }
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub sizes: Option<Vec<usize>>,
    pub powers: Option<Vec<u32>>,
    pub min_duration_ms: Option<u64>,
    pub kinds: Vec<TransformKind>,
}

impl BenchConfig {
    /// Resolve a configuration from CLI overrides and the process environment.
    pub fn resolve(overrides: Overrides) -> Result<Self, BenchError> {
        Self::resolve_with(overrides, |key| env::var(key).ok())
    }

    /// Like [`resolve`](Self::resolve) with an explicit environment lookup.
    pub fn resolve_with(
        overrides: Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, BenchError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let sizes = if let Some(sizes) = overrides.sizes {
            validate_sizes(sizes)?
        } else if let Some(powers) = overrides.powers {
            sizes_from_powers(&powers)?
        } else if let Some(raw) = non_blank(ENV_SIZES) {
            parse_sizes(&raw)?
        } else if let Some(raw) = non_blank(ENV_POWERS) {
            parse_powers(&raw)?
        } else {
            DEFAULT_SIZES.to_vec()
        };

        let min_ms = match overrides.min_duration_ms {
            Some(ms) => ms,
            None => match non_blank(ENV_MIN_DURATION_MS) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    BenchError::InvalidConfig(format!(
                        "{} must be a whole number of milliseconds, got `{}`",
                        ENV_MIN_DURATION_MS, raw
                    ))
                })?,
                None => DEFAULT_MIN_DURATION_MS,
            },
        };
        if min_ms == 0 {
            return Err(BenchError::InvalidConfig(
                "minimum duration must be at least 1 ms".into(),
            ));
        }

        let mut kinds = Vec::new();
        for kind in overrides.kinds {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            kinds = TransformKind::ALL.to_vec();
        }

        Ok(Self {
            sizes,
            min_duration: Duration::from_millis(min_ms),
            kinds,
        })
    }
}

/// Parse a comma separated list of kernel sizes, e.g. `128,1024`.
pub fn parse_sizes(raw: &str) -> Result<Vec<usize>, BenchError> {
    let sizes = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| BenchError::InvalidConfig(format!("invalid size `{}`", s)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_sizes(sizes)
}

/// Parse a comma separated list of powers of two, e.g. `7,10` for 128 and 1024.
pub fn parse_powers(raw: &str) -> Result<Vec<usize>, BenchError> {
    let powers = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| BenchError::InvalidConfig(format!("invalid power `{}`", s)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    sizes_from_powers(&powers)
}

fn sizes_from_powers(powers: &[u32]) -> Result<Vec<usize>, BenchError> {
    let sizes = powers
        .iter()
        .map(|&p| {
            if p > MAX_POWER {
                Err(BenchError::InvalidConfig(format!(
                    "power {} exceeds the maximum of {}",
                    p, MAX_POWER
                )))
            } else {
                Ok(1usize << p)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_sizes(sizes)
}

fn validate_sizes(sizes: Vec<usize>) -> Result<Vec<usize>, BenchError> {
    if sizes.is_empty() {
        return Err(BenchError::InvalidConfig("no kernel sizes given".into()));
    }
    if sizes.contains(&0) {
        return Err(BenchError::InvalidConfig(
            "kernel sizes must be non-zero".into(),
        ));
    }
    Ok(sizes)
}
