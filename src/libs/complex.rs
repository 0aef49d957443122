//! Units driven by a RustFFT complex plan.
//!
//! The same unit serves the complex kernel of every RustFFT binding and the
//! real kernel of the scalar binding, which has no dedicated real-input
//! planner and transforms the real signal promoted to complex instead.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{Fft, FftNum, FftPlanner, FftPlannerScalar};

use crate::error::UnitError;
use crate::unit::{
    complex_signal, promoted_real_signal, zeroed, BenchmarkUnit, TransformKind,
};

/// Which RustFFT planner builds the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerChoice {
    /// `FftPlanner`: picks AVX, SSE, NEON or WASM SIMD at runtime.
    Auto,
    /// `FftPlannerScalar`: portable code only.
    Scalar,
}

impl PlannerChoice {
    fn plan<T: FftNum>(self, len: usize) -> Arc<dyn Fft<T>> {
        match self {
            PlannerChoice::Auto => FftPlanner::<T>::new().plan_fft_forward(len),
            PlannerChoice::Scalar => FftPlannerScalar::<T>::new().plan_fft_forward(len),
        }
    }
}

/// Out-of-place complex forward FFT.
///
/// `execute_once` uses `process_immutable_with_scratch`, so the input is
/// never clobbered and every call transforms the same signal.
pub struct ComplexFftUnit<T: FftNum> {
    name: &'static str,
    size: usize,
    kind: TransformKind,
    planner: PlannerChoice,
    plan: Option<Arc<dyn Fft<T>>>,
    input: Vec<Complex<T>>,
    output: Vec<Complex<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T: FftNum> ComplexFftUnit<T> {
    pub fn new(name: &'static str, size: usize, planner: PlannerChoice) -> Self {
        Self::with_kind(name, size, TransformKind::Complex, planner)
    }

    /// Times a real-input transform by promoting the signal to complex.
    pub fn promoted_real(name: &'static str, size: usize, planner: PlannerChoice) -> Self {
        Self::with_kind(name, size, TransformKind::Real, planner)
    }

    fn with_kind(
        name: &'static str,
        size: usize,
        kind: TransformKind,
        planner: PlannerChoice,
    ) -> Self {
        Self {
            name,
            size,
            kind,
            planner,
            plan: None,
            input: Vec::new(),
            output: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn is_prepared(&self) -> bool {
        self.plan.is_some()
    }
}

impl<T: FftNum> BenchmarkUnit for ComplexFftUnit<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn size(&self) -> usize {
        self.size
    }

    fn kind(&self) -> TransformKind {
        self.kind
    }

    fn prepare(&mut self) -> Result<(), UnitError> {
        if self.size == 0 {
            return Err(UnitError::ZeroLength);
        }
        self.input = match self.kind {
            TransformKind::Complex => complex_signal(self.size)?,
            TransformKind::Real => promoted_real_signal(self.size)?,
        };
        self.output = zeroed(self.size, Complex::zero())?;
        let plan = self.planner.plan::<T>(self.size);
        self.scratch = zeroed(plan.get_immutable_scratch_len(), Complex::zero())?;
        self.plan = Some(plan);
        Ok(())
    }

    fn execute_once(&mut self) -> Result<(), UnitError> {
        let plan = self.plan.as_ref().ok_or(UnitError::NotPrepared)?;
        plan.process_immutable_with_scratch(&self.input, &mut self.output, &mut self.scratch);
        Ok(())
    }

    fn release(&mut self) {
        self.plan = None;
        self.input = Vec::new();
        self.output = Vec::new();
        self.scratch = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_before_prepare_is_rejected() {
        let mut unit = ComplexFftUnit::<f64>::new("rustfft", 64, PlannerChoice::Auto);
        assert_eq!(unit.execute_once(), Err(UnitError::NotPrepared));
    }

    #[test]
    fn zero_size_fails_to_prepare() {
        let mut unit = ComplexFftUnit::<f32>::new("rustfft-f32", 0, PlannerChoice::Auto);
        assert_eq!(unit.prepare(), Err(UnitError::ZeroLength));
        assert!(!unit.is_prepared());
        unit.release();
    }

    #[test]
    fn transform_finds_the_fundamental() {
        let n = 64;
        let mut unit = ComplexFftUnit::<f64>::promoted_real("rustfft-scalar", n, PlannerChoice::Scalar);
        unit.prepare().unwrap();
        unit.execute_once().unwrap();
        // sin(t) puts -n/2 i in bin 1; 0.5 sin(5t) puts -n/4 i in bin 5.
        assert!((unit.output[1].im + n as f64 / 2.0).abs() < 1e-9);
        assert!((unit.output[5].im + n as f64 / 4.0).abs() < 1e-9);
        assert!(unit.output[2].norm() < 1e-9);
        unit.release();
        assert!(!unit.is_prepared());
    }

    #[test]
    fn repeated_calls_see_the_same_input() {
        let mut unit = ComplexFftUnit::<f64>::new("rustfft", 32, PlannerChoice::Auto);
        unit.prepare().unwrap();
        unit.execute_once().unwrap();
        let first = unit.output.clone();
        for _ in 0..10 {
            unit.execute_once().unwrap();
        }
        assert_eq!(first, unit.output);
    }

    #[test]
    fn release_without_prepare_is_a_no_op() {
        let mut unit = ComplexFftUnit::<f64>::new("rustfft", 16, PlannerChoice::Scalar);
        unit.release();
        unit.release();
        assert_eq!(unit.kind(), TransformKind::Complex);
        assert_eq!(unit.size(), 16);
    }
}
