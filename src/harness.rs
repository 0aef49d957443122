//! Drives catalog, timing driver, aggregator and reporter for a whole run.

use std::io::Write;

use log::{info, warn};
use serde::Serialize;

use crate::aggregate::{BenchmarkRow, Sample};
use crate::catalog::Catalog;
use crate::config::BenchConfig;
use crate::driver;
use crate::error::BenchError;
use crate::report::Reporter;
use crate::sysinfo::SystemInfo;
use crate::unit::TransformKind;

/// A row that could not be normalised because the baseline was unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub kind: TransformKind,
    pub size: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Measured(BenchmarkRow),
    Skipped(SkippedRow),
}

/// Everything measured for one transform kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionResult {
    pub kind: TransformKind,
    pub rows: Vec<BenchmarkRow>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub sections: Vec<SectionResult>,
}

pub struct Harness<'a> {
    catalog: &'a Catalog,
    config: &'a BenchConfig,
}

impl<'a> Harness<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a BenchConfig) -> Self {
        Self { catalog, config }
    }

    /// Build fresh units for `size` and time each one in catalog order.
    ///
    /// A setup failure marks that library unavailable; a baseline setup
    /// failure skips the row without timing the remaining units.
    /// Measurement failures are returned as errors.
    pub fn measure_row(&self, size: usize, kind: TransformKind) -> Result<RowOutcome, BenchError> {
        let units = self.catalog.build(size, kind);
        let mut samples = Vec::with_capacity(units.len());

        for (idx, (entry, mut unit)) in self.catalog.entries().iter().zip(units).enumerate() {
            match driver::run(unit.as_mut(), self.config.min_duration) {
                Ok(m) => samples.push((
                    entry.id().to_string(),
                    Sample::Timed {
                        mean_us: m.mean_us(),
                        iterations: m.iterations,
                    },
                )),
                Err(err) if err.is_setup() => {
                    if idx == 0 {
                        warn!(
                            "skipping {} row for size {}: baseline unavailable ({})",
                            kind, size, err
                        );
                        return Ok(RowOutcome::Skipped(SkippedRow {
                            kind,
                            size,
                            reason: err.to_string(),
                        }));
                    }
                    warn!("{}", err);
                    samples.push((
                        entry.id().to_string(),
                        Sample::Unavailable {
                            reason: err.to_string(),
                        },
                    ));
                }
                Err(err) => return Err(err),
            }
        }

        Ok(match BenchmarkRow::assemble(size, kind, samples) {
            Some(row) => RowOutcome::Measured(row),
            None => RowOutcome::Skipped(SkippedRow {
                kind,
                size,
                reason: "baseline produced no time".into(),
            }),
        })
    }

    /// Print the section header for `kind`, then one row per configured size.
    pub fn run_section<W: Write>(
        &self,
        kind: TransformKind,
        reporter: &mut Reporter<W>,
    ) -> Result<SectionResult, BenchError> {
        info!(
            "{} section: {} sizes x {} libraries",
            kind,
            self.config.sizes.len(),
            self.catalog.len()
        );
        reporter.section(kind)?;
        let mut section = SectionResult {
            kind,
            rows: Vec::new(),
            skipped: Vec::new(),
        };
        for &size in &self.config.sizes {
            match self.measure_row(size, kind)? {
                RowOutcome::Measured(row) => {
                    reporter.row(&row)?;
                    section.rows.push(row);
                }
                RowOutcome::Skipped(skipped) => section.skipped.push(skipped),
            }
        }
        Ok(section)
    }

    /// Banner, every configured section, footer.
    pub fn run<W: Write>(
        &self,
        info: &SystemInfo,
        reporter: &mut Reporter<W>,
    ) -> Result<RunSummary, BenchError> {
        reporter.banner(info, self.config.min_duration)?;
        let mut sections = Vec::with_capacity(self.config.kinds.len());
        for &kind in &self.config.kinds {
            sections.push(self.run_section(kind, reporter)?);
        }
        reporter.footer()?;
        Ok(RunSummary { sections })
    }
}
