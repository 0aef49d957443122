//! Adaptive timing loop.
//!
//! [`run`] prepares a unit, calls `execute_once` until at least
//! `min_duration` of wall time has passed, releases the unit and returns the
//! mean time per call. The iteration count calibrates itself to the kernel
//! size, so tiny kernels amortise clock reads and large kernels do not run
//! for an unbounded number of fixed iterations.

use std::time::{Duration, Instant};

use log::debug;

use crate::error::BenchError;
use crate::unit::BenchmarkUnit;

/// Outcome of timing one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Completed `execute_once` calls. Always at least one.
    pub iterations: u64,
    /// Wall time covering exactly those calls.
    pub elapsed: Duration,
}

impl Measurement {
    /// Mean microseconds per call.
    pub fn mean_us(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e6 / self.iterations as f64
    }
}

/// Time `unit` with a minimum measurement window of `min_duration`.
///
/// The clock is read after every call and the loop ends on the first read at
/// or past the floor, so the interval includes the call that crossed it.
///
/// # Errors
///
/// * [`BenchError::InvalidConfig`] if `min_duration` is zero.
/// * [`BenchError::Setup`] if `prepare` fails. Nothing is timed.
/// * [`BenchError::Measurement`] if any `execute_once` fails. The unit is
///   released before the error is returned.
pub fn run<U: BenchmarkUnit + ?Sized>(
    unit: &mut U,
    min_duration: Duration,
) -> Result<Measurement, BenchError> {
    if min_duration.is_zero() {
        return Err(BenchError::InvalidConfig(
            "minimum measurement duration must be non-zero".into(),
        ));
    }

    if let Err(source) = unit.prepare() {
        unit.release();
        return Err(BenchError::Setup {
            library: unit.name().to_string(),
            size: unit.size(),
            kind: unit.kind(),
            source,
        });
    }

    let mut iterations: u64 = 0;
    let start = Instant::now();
    let elapsed = loop {
        if let Err(source) = unit.execute_once() {
            unit.release();
            return Err(BenchError::Measurement {
                library: unit.name().to_string(),
                size: unit.size(),
                kind: unit.kind(),
                source,
            });
        }
        iterations += 1;
        let elapsed = start.elapsed();
        if elapsed >= min_duration {
            break elapsed;
        }
    };

    unit.release();

    let measurement = Measurement {
        iterations,
        elapsed,
    };
    debug!(
        "{} {} n={}: {} iterations in {:?} ({:.3} us/call)",
        unit.name(),
        unit.kind(),
        unit.size(),
        iterations,
        elapsed,
        measurement.mean_us()
    );
    Ok(measurement)
}
