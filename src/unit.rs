//! The benchmark unit contract.
//!
//! A [`BenchmarkUnit`] wraps one library's forward transform for one size and
//! one [`TransformKind`]. The [timing driver](crate::driver) calls
//! [`prepare`](BenchmarkUnit::prepare) once outside the timed region, then
//! [`execute_once`](BenchmarkUnit::execute_once) until the duration floor is
//! reached, then [`release`](BenchmarkUnit::release).

use std::f64::consts::PI;
use std::fmt;

use clap::ValueEnum;
use rustfft::num_complex::Complex;
use rustfft::FftNum;
use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// Input/output shape of the timed transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Complex-to-complex forward FFT.
    Complex,
    /// Real-to-complex forward FFT.
    Real,
}

impl TransformKind {
    /// Complex first, then real: the order report sections are printed in.
    pub const ALL: [TransformKind; 2] = [TransformKind::Complex, TransformKind::Real];

    pub fn as_str(self) -> &'static str {
        match self {
            TransformKind::Complex => "complex",
            TransformKind::Real => "real",
        }
    }

    /// Row label used in the text table.
    pub fn label(self) -> &'static str {
        match self {
            TransformKind::Complex => "Complex FFT",
            TransformKind::Real => "Real FFT",
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A self-contained measurable task with a prepare/measure/release lifecycle.
pub trait BenchmarkUnit {
    /// Library identifier, as registered in the catalog.
    fn name(&self) -> &str;

    /// Kernel size N.
    fn size(&self) -> usize;

    fn kind(&self) -> TransformKind;

    /// Allocate buffers and build any plan. Never timed.
    fn prepare(&mut self) -> Result<(), UnitError>;

    /// Run exactly one forward transform on the prepared buffers.
    ///
    /// Must be repeatable without another `prepare`. Output correctness after
    /// the first call is not required.
    fn execute_once(&mut self) -> Result<(), UnitError>;

    /// Free everything acquired in `prepare`. Safe to call when `prepare`
    /// was never called or failed.
    fn release(&mut self);
}

impl<U: BenchmarkUnit + ?Sized> BenchmarkUnit for Box<U> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn kind(&self) -> TransformKind {
        (**self).kind()
    }

    fn prepare(&mut self) -> Result<(), UnitError> {
        (**self).prepare()
    }

    fn execute_once(&mut self) -> Result<(), UnitError> {
        (**self).execute_once()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Sample `i` of the real test signal `sin(t) + 0.5 sin(5t)`, `t = 2πi/N`.
pub fn signal_sample(i: usize, n: usize) -> f64 {
    let t = 2.0 * PI * i as f64 / n as f64;
    t.sin() + 0.5 * (5.0 * t).sin()
}

/// Sample `i` of the complex test signal; the imaginary part is `0.5 cos(3t)`.
pub fn complex_signal_sample(i: usize, n: usize) -> (f64, f64) {
    let t = 2.0 * PI * i as f64 / n as f64;
    (signal_sample(i, n), 0.5 * (3.0 * t).cos())
}

fn cast<T: FftNum>(v: f64) -> T {
    T::from_f64(v).unwrap_or_else(T::zero)
}

/// Fallibly allocate `len` elements produced by `fill`.
pub(crate) fn try_alloc_with<T>(
    len: usize,
    fill: impl FnMut(usize) -> T,
) -> Result<Vec<T>, UnitError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| UnitError::allocation(len, e))?;
    buf.extend((0..len).map(fill));
    Ok(buf)
}

pub(crate) fn real_signal<T: FftNum>(n: usize) -> Result<Vec<T>, UnitError> {
    try_alloc_with(n, |i| cast(signal_sample(i, n)))
}

pub(crate) fn complex_signal<T: FftNum>(n: usize) -> Result<Vec<Complex<T>>, UnitError> {
    try_alloc_with(n, |i| {
        let (re, im) = complex_signal_sample(i, n);
        Complex::new(cast(re), cast(im))
    })
}

/// Real signal promoted to complex with a zero imaginary part.
pub(crate) fn promoted_real_signal<T: FftNum>(n: usize) -> Result<Vec<Complex<T>>, UnitError> {
    try_alloc_with(n, |i| Complex::new(cast(signal_sample(i, n)), T::zero()))
}

pub(crate) fn zeroed<T: Clone>(len: usize, zero: T) -> Result<Vec<T>, UnitError> {
    try_alloc_with(len, |_| zero.clone())
}
