//! # fftcmp - FFT library comparison benchmark
//!
//! Times forward FFTs from several library bindings across a range of kernel
//! sizes and prints one fixed-width table per transform kind, with every
//! library's time expressed as a ratio against a baseline.
//!
//! ## Pipeline
//!
//! - [`catalog`]: the libraries compiled into this build, baseline first
//! - [`unit`]: the prepare / execute / release contract every binding implements
//! - [`driver`]: adaptive timing loop with a minimum measurement window
//! - [`aggregate`]: baseline normalisation into report rows
//! - [`report`]: banner, section tables and footer
//! - [`harness`]: runs the whole sequence
//! - [`export`]: optional JSON record of a run
//!
//! ## Cargo Features
//!
//! - `single-precision` (default): add the RustFFT `f32` binding
//! - `scalar` (default): add the RustFFT scalar-planner binding
//! - `kofft` (default): add the kofft `f32` binding (even real sizes only)
//!
//! ## Example
//!
//! ```no_run
//! use fftcmp::{BenchConfig, Catalog, Harness, Overrides, Reporter, SystemInfo};
//!
//! # fn main() -> Result<(), fftcmp::BenchError> {
//! let catalog = Catalog::builtin();
//! let config = BenchConfig::resolve(Overrides::default())?;
//! let stdout = std::io::stdout();
//! let mut reporter = Reporter::new(stdout.lock(), &catalog);
//! Harness::new(&catalog, &config).run(&SystemInfo::probe(), &mut reporter)?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod driver;
pub mod error;
pub mod export;
pub mod harness;
/// Library bindings.
pub mod libs;
pub mod report;
pub mod sysinfo;
pub mod unit;

pub use aggregate::{aggregate, BenchmarkRow, RowCell, Sample, TimingResult};
pub use catalog::{Catalog, LibraryEntry};
pub use config::{BenchConfig, Overrides};
pub use driver::Measurement;
pub use error::{BenchError, UnitError};
pub use export::RunRecord;
pub use harness::{Harness, RowOutcome, RunSummary, SectionResult, SkippedRow};
pub use report::{Reporter, TableLayout};
pub use sysinfo::SystemInfo;
pub use unit::{BenchmarkUnit, TransformKind};
