//! Timing driver behaviour against scripted fake units.

mod common;

use std::rc::Rc;
use std::time::Duration;

use common::{Counters, FakeUnit, Script};
use fftcmp::driver;
use fftcmp::{BenchError, TransformKind, UnitError};

fn unit(script: Script) -> (FakeUnit, Rc<Counters>) {
    let counters = Rc::new(Counters::default());
    let unit = FakeUnit::new(
        "fake",
        256,
        TransformKind::Complex,
        script,
        Rc::clone(&counters),
    );
    (unit, counters)
}

#[test]
fn mean_is_positive_and_window_is_respected() {
    let min = Duration::from_millis(5);
    let (mut u, counters) = unit(Script::working(Duration::from_micros(50)));
    let m = driver::run(&mut u, min).unwrap();
    assert!(m.iterations >= 1);
    assert!(m.elapsed >= min);
    assert!(m.mean_us().is_finite());
    assert!(m.mean_us() > 0.0);
    assert_eq!(counters.executed.get(), m.iterations);
    assert_eq!(counters.prepared.get(), 1);
    assert_eq!(counters.released.get(), 1);
}

#[test]
fn slow_kernel_still_runs_once() {
    // One call already exceeds the window.
    let (mut u, _) = unit(Script::working(Duration::from_millis(3)));
    let m = driver::run(&mut u, Duration::from_millis(1)).unwrap();
    assert_eq!(m.iterations, 1);
    assert!(m.elapsed >= Duration::from_millis(3));
}

#[test]
fn zero_duration_is_rejected() {
    let (mut u, counters) = unit(Script::default());
    let err = driver::run(&mut u, Duration::ZERO).unwrap_err();
    assert!(matches!(err, BenchError::InvalidConfig(_)));
    assert_eq!(counters.prepared.get(), 0);
}

#[test]
fn prepare_failure_is_a_setup_error() {
    let (mut u, counters) = unit(Script {
        fail_prepare: vec![256],
        ..Default::default()
    });
    let err = driver::run(&mut u, Duration::from_millis(1)).unwrap_err();
    assert!(err.is_setup());
    match err {
        BenchError::Setup { size, source, .. } => {
            assert_eq!(size, 256);
            assert!(matches!(source, UnitError::Plan(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(counters.executed.get(), 0);
}

#[test]
fn execute_failure_releases_and_aborts() {
    let (mut u, counters) = unit(Script {
        work: Duration::from_micros(10),
        fail_execute_on: Some(3),
        ..Default::default()
    });
    let err = driver::run(&mut u, Duration::from_secs(10)).unwrap_err();
    assert!(matches!(
        err,
        BenchError::Measurement {
            source: UnitError::Transform(_),
            ..
        }
    ));
    assert_eq!(counters.executed.get(), 2);
    assert_eq!(counters.released.get(), 1);
}
