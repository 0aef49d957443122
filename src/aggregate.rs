//! Baseline normalisation of measured times.

use serde::Serialize;

use crate::unit::TransformKind;

/// Mean time of one library for one row, relative to the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingResult {
    pub library: String,
    pub mean_us: f64,
    /// `mean_us / baseline mean_us`. Exactly `1.0` for the baseline.
    pub ratio: f64,
    pub iterations: u64,
}

impl TimingResult {
    /// Result for the baseline itself. No division happens.
    pub fn baseline(library: impl Into<String>, mean_us: f64, iterations: u64) -> Self {
        Self {
            library: library.into(),
            mean_us,
            ratio: 1.0,
            iterations,
        }
    }
}

/// Normalise `measured_us` (averaged over `iterations` calls) against `baseline_us`.
pub fn aggregate(
    library: &str,
    measured_us: f64,
    iterations: u64,
    baseline_us: f64,
) -> TimingResult {
    TimingResult {
        library: library.to_string(),
        mean_us: measured_us,
        ratio: measured_us / baseline_us,
        iterations,
    }
}

/// Raw per-library outcome collected by the harness before normalisation.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    Timed { mean_us: f64, iterations: u64 },
    Unavailable { reason: String },
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowCell {
    Timed(TimingResult),
    Unavailable { library: String, reason: String },
}

impl RowCell {
    pub fn library(&self) -> &str {
        match self {
            RowCell::Timed(r) => &r.library,
            RowCell::Unavailable { library, .. } => library,
        }
    }

    pub fn result(&self) -> Option<&TimingResult> {
        match self {
            RowCell::Timed(r) => Some(r),
            RowCell::Unavailable { .. } => None,
        }
    }
}

/// One report row: a size, a kind and one cell per library in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRow {
    pub size: usize,
    pub kind: TransformKind,
    pub cells: Vec<RowCell>,
}

impl BenchmarkRow {
    /// Normalise `samples` (catalog order, baseline first) into a row.
    ///
    /// Returns `None` when the baseline has no time: ratios are undefined and
    /// the row must not be rendered.
    pub fn assemble(
        size: usize,
        kind: TransformKind,
        samples: Vec<(String, Sample)>,
    ) -> Option<Self> {
        let mut samples = samples.into_iter();
        let (baseline_name, baseline) = samples.next()?;
        let (baseline_us, baseline_iters) = match baseline {
            Sample::Timed {
                mean_us,
                iterations,
            } => (mean_us, iterations),
            Sample::Unavailable { .. } => return None,
        };

        let mut cells = vec![RowCell::Timed(TimingResult::baseline(
            baseline_name,
            baseline_us,
            baseline_iters,
        ))];
        cells.extend(samples.map(|(library, sample)| match sample {
            Sample::Timed {
                mean_us,
                iterations,
            } => RowCell::Timed(aggregate(&library, mean_us, iterations, baseline_us)),
            Sample::Unavailable { reason } => RowCell::Unavailable { library, reason },
        }));
        Some(Self { size, kind, cells })
    }

    /// The baseline result. `Some` for every row built by [`assemble`](Self::assemble).
    pub fn baseline(&self) -> Option<&TimingResult> {
        self.cells.first().and_then(RowCell::result)
    }

    pub fn libraries(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.library())
    }
}
