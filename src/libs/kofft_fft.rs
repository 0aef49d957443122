//! Units driven by kofft's scalar FFT at single precision.
//!
//! kofft has no immutable transform: both kernels work in place on the
//! buffers they are handed. The complex unit goes through
//! `fft_out_of_place`, which copies the input into the output before
//! transforming it. The real unit copies the pristine signal into a work
//! buffer on every call because `rfft_with_scratch` clobbers its input. Both
//! copies are part of the timed call.

use kofft::fft::{Complex32, FftError, FftImpl, FftPlanner, ScalarFftImpl};
use kofft::rfft::RealFftImpl;

use crate::error::UnitError;
use crate::unit::{complex_signal_sample, signal_sample, try_alloc_with, zeroed};
use crate::unit::{BenchmarkUnit, TransformKind};

fn transform_error(e: FftError) -> UnitError {
    UnitError::Transform(format!("kofft: {:?}", e))
}

fn planned() -> ScalarFftImpl<f32> {
    ScalarFftImpl::with_planner(FftPlanner::<f32>::new())
}

pub struct KofftComplexUnit {
    name: &'static str,
    size: usize,
    fft: Option<ScalarFftImpl<f32>>,
    input: Vec<Complex32>,
    output: Vec<Complex32>,
}

impl KofftComplexUnit {
    pub fn new(name: &'static str, size: usize) -> Self {
        Self {
            name,
            size,
            fft: None,
            input: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl BenchmarkUnit for KofftComplexUnit {
    fn name(&self) -> &str {
        self.name
    }

    fn size(&self) -> usize {
        self.size
    }

    fn kind(&self) -> TransformKind {
        TransformKind::Complex
    }

    fn prepare(&mut self) -> Result<(), UnitError> {
        if self.size == 0 {
            return Err(UnitError::ZeroLength);
        }
        let n = self.size;
        self.input = try_alloc_with(n, |i| {
            let (re, im) = complex_signal_sample(i, n);
            Complex32::new(re as f32, im as f32)
        })?;
        self.output = zeroed(n, Complex32::zero())?;
        let fft = planned();
        // The planner caches twiddles on first use; keep that out of the timed calls.
        fft.fft_out_of_place(&self.input, &mut self.output)
            .map_err(|e| UnitError::Plan(format!("kofft: {:?}", e)))?;
        self.fft = Some(fft);
        Ok(())
    }

    fn execute_once(&mut self) -> Result<(), UnitError> {
        let fft = self.fft.as_ref().ok_or(UnitError::NotPrepared)?;
        fft.fft_out_of_place(&self.input, &mut self.output)
            .map_err(transform_error)
    }

    fn release(&mut self) {
        self.fft = None;
        self.input = Vec::new();
        self.output = Vec::new();
    }
}

/// Real-input forward FFT producing `N/2 + 1` bins. Even sizes only.
pub struct KofftRealUnit {
    name: &'static str,
    size: usize,
    fft: Option<ScalarFftImpl<f32>>,
    signal: Vec<f32>,
    work: Vec<f32>,
    output: Vec<Complex32>,
    scratch: Vec<Complex32>,
}

impl KofftRealUnit {
    pub fn new(name: &'static str, size: usize) -> Self {
        Self {
            name,
            size,
            fft: None,
            signal: Vec::new(),
            work: Vec::new(),
            output: Vec::new(),
            scratch: Vec::new(),
        }
    }
}

fn real_forward(
    fft: &ScalarFftImpl<f32>,
    signal: &[f32],
    work: &mut [f32],
    output: &mut [Complex32],
    scratch: &mut [Complex32],
) -> Result<(), FftError> {
    work.copy_from_slice(signal);
    fft.rfft_with_scratch(work, output, scratch)
}

impl BenchmarkUnit for KofftRealUnit {
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
        let n = self.size;
        if n == 0 {
            return Err(UnitError::ZeroLength);
        }
        if n % 2 != 0 {
            return Err(UnitError::Plan(format!(
                "kofft real FFT needs an even length, got {}",
                n
            )));
        }
        self.signal = try_alloc_with(n, |i| signal_sample(i, n) as f32)?;
        self.work = zeroed(n, 0.0f32)?;
        self.output = zeroed(n / 2 + 1, Complex32::zero())?;
        self.scratch = zeroed(n / 2, Complex32::zero())?;
        let fft = planned();
        real_forward(
            &fft,
            &self.signal,
            &mut self.work,
            &mut self.output,
            &mut self.scratch,
        )
        .map_err(|e| UnitError::Plan(format!("kofft: {:?}", e)))?;
        self.fft = Some(fft);
        Ok(())
    }

    fn execute_once(&mut self) -> Result<(), UnitError> {
        let fft = self.fft.as_ref().ok_or(UnitError::NotPrepared)?;
        real_forward(
            fft,
            &self.signal,
            &mut self.work,
            &mut self.output,
            &mut self.scratch,
        )
        .map_err(transform_error)
    }

    fn release(&mut self) {
        self.fft = None;
        self.signal = Vec::new();
        self.work = Vec::new();
        self.output = Vec::new();
        self.scratch = Vec::new();
    }
}
