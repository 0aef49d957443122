//! Library bindings.
//!
//! Each binding maps `(size, kind)` to a boxed [`BenchmarkUnit`]. Bindings
//! other than the baseline are behind cargo features and registered by
//! [`Catalog::builtin`](crate::catalog::Catalog::builtin).

pub mod complex;
#[cfg(feature = "kofft")]
pub mod kofft_fft;
pub mod real;

use crate::unit::{BenchmarkUnit, TransformKind};
use complex::{ComplexFftUnit, PlannerChoice};
use real::RealFftUnit;

pub const RUSTFFT: &str = "rustfft";
#[cfg(feature = "single-precision")]
pub const RUSTFFT_F32: &str = "rustfft-f32";
#[cfg(feature = "scalar")]
pub const RUSTFFT_SCALAR: &str = "rustfft-scalar";
#[cfg(feature = "kofft")]
pub const KOFFT: &str = "kofft";

/// Baseline: RustFFT/realfft in double precision with runtime SIMD dispatch.
pub fn rustfft_unit(size: usize, kind: TransformKind) -> Box<dyn BenchmarkUnit> {
    match kind {
        TransformKind::Complex => Box::new(ComplexFftUnit::<f64>::new(
            RUSTFFT,
            size,
            PlannerChoice::Auto,
        )),
        TransformKind::Real => Box::new(RealFftUnit::<f64>::new(RUSTFFT, size)),
    }
}

#[cfg(feature = "single-precision")]
pub fn rustfft_f32_unit(size: usize, kind: TransformKind) -> Box<dyn BenchmarkUnit> {
    match kind {
        TransformKind::Complex => Box::new(ComplexFftUnit::<f32>::new(
            RUSTFFT_F32,
            size,
            PlannerChoice::Auto,
        )),
        TransformKind::Real => Box::new(RealFftUnit::<f32>::new(RUSTFFT_F32, size)),
    }
}

#[cfg(feature = "scalar")]
pub fn rustfft_scalar_unit(size: usize, kind: TransformKind) -> Box<dyn BenchmarkUnit> {
    match kind {
        TransformKind::Complex => Box::new(ComplexFftUnit::<f64>::new(
            RUSTFFT_SCALAR,
            size,
            PlannerChoice::Scalar,
        )),
        TransformKind::Real => Box::new(ComplexFftUnit::<f64>::promoted_real(
            RUSTFFT_SCALAR,
            size,
            PlannerChoice::Scalar,
        )),
    }
}

/// kofft's scalar planner at f32. Real sizes must be even.
#[cfg(feature = "kofft")]
pub fn kofft_unit(size: usize, kind: TransformKind) -> Box<dyn BenchmarkUnit> {
    match kind {
        TransformKind::Complex => Box::new(kofft_fft::KofftComplexUnit::new(KOFFT, size)),
        TransformKind::Real => Box::new(kofft_fft::KofftRealUnit::new(KOFFT, size)),
    }
}
