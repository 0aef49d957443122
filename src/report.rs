//! Text report: banner, one table per transform kind, footer.
//!
//! Every field has a fixed width. The table width follows from the number of
//! libraries in the catalog, and every separator line (banner, section,
//! header rule, footer) is drawn at exactly that width.

use std::io::Write;
use std::time::Duration;

use crate::aggregate::{BenchmarkRow, RowCell};
use crate::catalog::Catalog;
use crate::error::BenchError;
use crate::sysinfo::SystemInfo;
use crate::unit::TransformKind;

pub const LABEL_WIDTH: usize = 15;
pub const SIZE_WIDTH: usize = 6;
pub const TIME_WIDTH: usize = 10;
/// Ratio cell including the trailing `x`.
pub const RATIO_WIDTH: usize = 7;
const SEP: &str = " |";
const NOT_AVAILABLE: &str = "N/A";

pub const TITLE: &str = "FFT Performance Comparison Benchmark";

/// Column layout for one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    columns: Vec<String>,
}

impl TableLayout {
    /// Layout from column headers in catalog order; the first is the baseline.
    /// Headers longer than a time column are truncated.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = columns
            .into_iter()
            .map(|c| c.as_ref().chars().take(TIME_WIDTH).collect())
            .collect();
        Self { columns }
    }

    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.entries().iter().map(|e| e.column()))
    }

    /// Number of time columns.
    pub fn libraries(&self) -> usize {
        self.columns.len()
    }

    /// Number of ratio columns: one per non-baseline library.
    pub fn ratio_columns(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    /// Total line width for this many libraries.
    pub fn width(&self) -> usize {
        LABEL_WIDTH
            + SIZE_WIDTH
            + SEP.len()
            + TIME_WIDTH
            + self.ratio_columns() * (SEP.len() + TIME_WIDTH + SEP.len() + RATIO_WIDTH)
    }

    pub fn separator(&self, fill: char) -> String {
        std::iter::repeat(fill).take(self.width()).collect()
    }

    pub fn header(&self) -> String {
        let mut line = format!(
            "{:<lw$}{:>sw$}{}",
            "Test Type",
            "Size",
            SEP,
            lw = LABEL_WIDTH,
            sw = SIZE_WIDTH
        );
        for (i, column) in self.columns.iter().enumerate() {
            if i == 0 {
                line.push_str(&format!("{:>tw$}", column, tw = TIME_WIDTH));
            } else {
                line.push_str(&format!(
                    "{}{:>tw$}{}{:>rw$}",
                    SEP,
                    column,
                    SEP,
                    "Ratio",
                    tw = TIME_WIDTH,
                    rw = RATIO_WIDTH
                ));
            }
        }
        line
    }

    /// Render one row. Unavailable cells print `N/A` in both columns.
    pub fn row(&self, row: &BenchmarkRow) -> String {
        let mut line = format!(
            "{:<lw$}{:>sw$}{}",
            row.kind.label(),
            row.size,
            SEP,
            lw = LABEL_WIDTH,
            sw = SIZE_WIDTH
        );
        for (i, cell) in row.cells.iter().enumerate() {
            let (time, ratio) = match cell {
                RowCell::Timed(r) => (
                    format!("{:>tw$.2}", r.mean_us, tw = TIME_WIDTH),
                    format!("{:>rw$.2}x", r.ratio, rw = RATIO_WIDTH - 1),
                ),
                RowCell::Unavailable { .. } => (
                    format!("{:>tw$}", NOT_AVAILABLE, tw = TIME_WIDTH),
                    format!("{:>rw$}", NOT_AVAILABLE, rw = RATIO_WIDTH),
                ),
            };
            if i == 0 {
                line.push_str(&time);
            } else {
                line.push_str(SEP);
                line.push_str(&time);
                line.push_str(SEP);
                line.push_str(&ratio);
            }
        }
        line
    }

    /// `===== COMPLEX FFT TESTS =====` padded to the table width.
    pub fn section_title(&self, kind: TransformKind) -> String {
        let title = format!(" {} FFT TESTS ", kind.as_str().to_uppercase());
        format!("{:=^w$}", title, w = self.width())
    }
}

/// Where the reporter is in its output sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    Idle,
    BannerPrinted,
    HeaderPrinted(TransformKind),
    RowPrinted(TransformKind),
    FooterPrinted,
}

impl ReportState {
    fn name(self) -> &'static str {
        match self {
            ReportState::Idle => "idle",
            ReportState::BannerPrinted => "after the banner",
            ReportState::HeaderPrinted(_) => "after a section header",
            ReportState::RowPrinted(_) => "printing rows",
            ReportState::FooterPrinted => "finished",
        }
    }
}

/// Writes the text report to `out`, enforcing banner, sections, footer order.
pub struct Reporter<W: Write> {
    out: W,
    layout: TableLayout,
    libraries: Vec<String>,
    baseline: String,
    state: ReportState,
    sections: Vec<TransformKind>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, catalog: &Catalog) -> Self {
        Self {
            out,
            layout: TableLayout::for_catalog(catalog),
            libraries: catalog.ids().map(str::to_string).collect(),
            baseline: catalog.baseline().id().to_string(),
            state: ReportState::Idle,
            sections: Vec::new(),
        }
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn state(&self) -> ReportState {
        self.state
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn out_of_order(&self, action: &'static str) -> BenchError {
        BenchError::OutOfOrder {
            state: self.state.name(),
            action,
        }
    }

    /// Print the run banner. Allowed once, before anything else.
    pub fn banner(&mut self, info: &SystemInfo, min_duration: Duration) -> Result<(), BenchError> {
        if self.state != ReportState::Idle {
            return Err(self.out_of_order("print the banner"));
        }
        let rule = self.layout.separator('=');
        let title = format!("{:^w$}", TITLE, w = self.layout.width());
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "{}", title.trim_end())?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "Compiler: {}", info.compiler())?;
        writeln!(self.out, "Target: {}", info.target_features)?;
        writeln!(self.out, "Comparing: {}", self.libraries.join(" | "))?;
        writeln!(
            self.out,
            "CPU: {} ({} logical CPUs)",
            info.cpu, info.logical_cpus
        )?;
        writeln!(self.out, "Platform: {}/{}", info.os, info.arch)?;
        writeln!(
            self.out,
            "Minimum test duration: {} ms per library and size",
            min_duration.as_millis()
        )?;
        writeln!(self.out, "Times shown in microseconds (us)")?;
        writeln!(self.out, "{}", rule)?;
        self.state = ReportState::BannerPrinted;
        Ok(())
    }

    /// Start the table for `kind`. Each kind gets one section.
    pub fn section(&mut self, kind: TransformKind) -> Result<(), BenchError> {
        match self.state {
            ReportState::BannerPrinted
            | ReportState::HeaderPrinted(_)
            | ReportState::RowPrinted(_) => {}
            _ => return Err(self.out_of_order("start a section")),
        }
        if self.sections.contains(&kind) {
            return Err(self.out_of_order("repeat a section"));
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.layout.section_title(kind))?;
        writeln!(self.out, "{}", self.layout.header())?;
        writeln!(self.out, "{}", self.layout.separator('-'))?;
        self.sections.push(kind);
        self.state = ReportState::HeaderPrinted(kind);
        Ok(())
    }

    /// Print one row of the current section.
    pub fn row(&mut self, row: &BenchmarkRow) -> Result<(), BenchError> {
        match self.state {
            ReportState::HeaderPrinted(k) | ReportState::RowPrinted(k) if k == row.kind => {}
            _ => return Err(self.out_of_order("print a row")),
        }
        if row.cells.len() != self.layout.libraries() {
            return Err(BenchError::InvalidConfig(format!(
                "row has {} cells but the table has {} libraries",
                row.cells.len(),
                self.layout.libraries()
            )));
        }
        writeln!(self.out, "{}", self.layout.row(row))?;
        self.state = ReportState::RowPrinted(row.kind);
        Ok(())
    }

    /// Close the report and name the baseline.
    pub fn footer(&mut self) -> Result<(), BenchError> {
        match self.state {
            ReportState::BannerPrinted
            | ReportState::HeaderPrinted(_)
            | ReportState::RowPrinted(_) => {}
            _ => return Err(self.out_of_order("print the footer")),
        }
        let rule = self.layout.separator('=');
        writeln!(self.out)?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "Benchmark completed!")?;
        writeln!(
            self.out,
            "Note: Ratio = library time / {} time (above 1.00x means {} is faster)",
            self.baseline, self.baseline
        )?;
        writeln!(self.out, "{}", rule)?;
        self.out.flush()?;
        self.state = ReportState::FooterPrinted;
        Ok(())
    }
}
