//! Every compiled-in binding runs through the real driver.

use std::time::Duration;

use fftcmp::driver;
use fftcmp::{BenchmarkUnit, Catalog, Harness, RowCell, RowOutcome, TransformKind, UnitError};

#[test]
fn every_unit_measures_each_kind() {
    let catalog = Catalog::builtin();
    for kind in TransformKind::ALL {
        for size in [16, 100, 1024] {
            for mut unit in catalog.build(size, kind) {
                let m = driver::run(&mut unit, Duration::from_millis(1)).unwrap();
                assert!(m.iterations >= 1, "{} {} n={}", unit.name(), kind, size);
                assert!(m.mean_us() > 0.0);
            }
        }
    }
}

#[test]
fn zero_size_is_a_setup_failure() {
    let catalog = Catalog::builtin();
    for mut unit in catalog.build(0, TransformKind::Real) {
        assert_eq!(unit.prepare(), Err(UnitError::ZeroLength));
        unit.release();
    }
}

#[test]
fn units_refuse_to_execute_unprepared() {
    let catalog = Catalog::builtin();
    for mut unit in catalog.build(64, TransformKind::Complex) {
        assert_eq!(unit.execute_once(), Err(UnitError::NotPrepared));
    }
}

#[test]
fn builtin_row_has_every_library() {
    let catalog = Catalog::builtin();
    let config = fftcmp::BenchConfig {
        sizes: vec![256],
        min_duration: Duration::from_millis(1),
        kinds: vec![TransformKind::Real],
    };
    match Harness::new(&catalog, &config)
        .measure_row(256, TransformKind::Real)
        .unwrap()
    {
        RowOutcome::Measured(row) => {
            assert_eq!(
                row.libraries().collect::<Vec<_>>(),
                catalog.ids().collect::<Vec<_>>()
            );
            assert!(row.cells.iter().all(|c| c.result().is_some()));
        }
        RowOutcome::Skipped(s) => panic!("row skipped: {}", s.reason),
    }
}

#[cfg(feature = "kofft")]
#[test]
fn kofft_runs_alongside_the_baseline() {
    let catalog = Catalog::builtin();
    assert!(catalog.ids().any(|id| id == fftcmp::libs::KOFFT));
    let config = fftcmp::BenchConfig {
        sizes: vec![96],
        min_duration: Duration::from_millis(1),
        kinds: TransformKind::ALL.to_vec(),
    };
    let harness = Harness::new(&catalog, &config);
    for kind in TransformKind::ALL {
        let row = match harness.measure_row(96, kind).unwrap() {
            RowOutcome::Measured(row) => row,
            RowOutcome::Skipped(s) => panic!("row skipped: {}", s.reason),
        };
        let cell = row
            .cells
            .iter()
            .find(|c| c.library() == fftcmp::libs::KOFFT)
            .unwrap();
        let result = cell.result().unwrap();
        assert!(result.iterations >= 1);
        assert!(result.ratio > 0.0 && result.ratio.is_finite());
    }
}

#[cfg(feature = "kofft")]
#[test]
fn kofft_odd_real_size_is_not_available() {
    let catalog = Catalog::builtin();
    let config = fftcmp::BenchConfig {
        sizes: vec![15],
        min_duration: Duration::from_millis(1),
        kinds: vec![TransformKind::Real],
    };
    let row = match Harness::new(&catalog, &config)
        .measure_row(15, TransformKind::Real)
        .unwrap()
    {
        RowOutcome::Measured(row) => row,
        RowOutcome::Skipped(s) => panic!("row skipped: {}", s.reason),
    };
    assert!(row.baseline().is_some());
    let cell = row
        .cells
        .iter()
        .find(|c| c.library() == fftcmp::libs::KOFFT)
        .unwrap();
    match cell {
        RowCell::Unavailable { reason, .. } => assert!(reason.contains("even"), "{}", reason),
        RowCell::Timed(_) => panic!("odd real size should not be timed"),
    }
}
