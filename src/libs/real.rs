//! Units driven by a realfft real-to-complex plan.

use std::sync::Arc;

use realfft::{RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::FftNum;

use crate::error::UnitError;
use crate::unit::{real_signal, zeroed, BenchmarkUnit, TransformKind};

/// Real-input forward FFT producing `N/2 + 1` bins.
///
/// realfft uses the input buffer as scratch space, so after the first call
/// the input holds garbage. Only call cost is measured.
pub struct RealFftUnit<T: FftNum> {
    name: &'static str,
    size: usize,
    plan: Option<Arc<dyn RealToComplex<T>>>,
    input: Vec<T>,
    output: Vec<Complex<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T: FftNum> RealFftUnit<T> {
    pub fn new(name: &'static str, size: usize) -> Self {
        Self {
            name,
            size,
            plan: None,
            input: Vec::new(),
            output: Vec::new(),
            scratch: Vec::new(),
        }
    }
}

impl<T: FftNum> BenchmarkUnit for RealFftUnit<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn size(&self) -> usize {
        self.size
    }

    fn kind(&self) -> TransformKind {
        TransformKind::Real
    }

    fn prepare(&mut self) -> Result<(), UnitError> {
        if self.size == 0 {
            return Err(UnitError::ZeroLength);
        }
        let plan = RealFftPlanner::<T>::new().plan_fft_forward(self.size);
        self.input = real_signal(self.size)?;
        self.output = zeroed(plan.complex_len(), Complex::zero())?;
        self.scratch = zeroed(plan.get_scratch_len(), Complex::zero())?;
        self.plan = Some(plan);
        Ok(())
    }

    fn execute_once(&mut self) -> Result<(), UnitError> {
        let plan = self.plan.as_ref().ok_or(UnitError::NotPrepared)?;
        plan.process_with_scratch(&mut self.input, &mut self.output, &mut self.scratch)
            .map_err(|e| UnitError::Transform(e.to_string()))
    }

    fn release(&mut self) {
        self.plan = None;
        self.input = Vec::new();
        self.output = Vec::new();
        self.scratch = Vec::new();
    }
}
