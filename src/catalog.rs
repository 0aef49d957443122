//! Registry of the FFT libraries compiled into this build.
//!
//! A [`Catalog`] is an ordered list of [`LibraryEntry`] values. The first
//! entry is the baseline every ratio is computed against. The catalog is
//! built once per run and passed to the harness; it is the only place that
//! changes when a library binding is added.

use std::fmt;

use crate::error::BenchError;
use crate::libs;
use crate::unit::{BenchmarkUnit, TransformKind};

/// Builds a fresh, unprepared unit for one size and transform kind.
pub type UnitConstructor = Box<dyn Fn(usize, TransformKind) -> Box<dyn BenchmarkUnit>>;

/// One library binding.
pub struct LibraryEntry {
    id: String,
    column: String,
    description: String,
    constructor: UnitConstructor,
}

impl LibraryEntry {
    pub fn new(
        id: impl Into<String>,
        column: impl Into<String>,
        description: impl Into<String>,
        constructor: impl Fn(usize, TransformKind) -> Box<dyn BenchmarkUnit> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            description: description.into(),
            constructor: Box::new(constructor),
        }
    }

    /// Catalog identifier, e.g. `rustfft-f32`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Short header shown above the time column.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn build(&self, size: usize, kind: TransformKind) -> Box<dyn BenchmarkUnit> {
        (self.constructor)(size, kind)
    }
}

impl fmt::Debug for LibraryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryEntry")
            .field("id", &self.id)
            .field("column", &self.column)
            .finish()
    }
}

#[derive(Debug)]
pub struct Catalog {
    entries: Vec<LibraryEntry>,
}

impl Catalog {
    /// Catalog with every binding enabled by cargo features, baseline first.
    pub fn builtin() -> Self {
        #[allow(unused_mut)]
        let mut entries = vec![LibraryEntry::new(
            libs::RUSTFFT,
            "RustFFT",
            "RustFFT/realfft f64, runtime SIMD dispatch",
            libs::rustfft_unit,
        )];
        #[cfg(feature = "single-precision")]
        entries.push(LibraryEntry::new(
            libs::RUSTFFT_F32,
            "f32",
            "RustFFT/realfft f32, runtime SIMD dispatch",
            libs::rustfft_f32_unit,
        ));
        #[cfg(feature = "scalar")]
        entries.push(LibraryEntry::new(
            libs::RUSTFFT_SCALAR,
            "Scalar",
            "RustFFT f64 scalar planner, real input promoted to complex",
            libs::rustfft_scalar_unit,
        ));
        #[cfg(feature = "kofft")]
        entries.push(LibraryEntry::new(
            libs::KOFFT,
            "kofft",
            "kofft f32 scalar planner, even real sizes only",
            libs::kofft_unit,
        ));
        Self { entries }
    }

    /// Catalog over arbitrary entries. The first entry is the baseline.
    pub fn from_entries(entries: Vec<LibraryEntry>) -> Result<Self, BenchError> {
        if entries.is_empty() {
            return Err(BenchError::InvalidConfig(
                "catalog needs at least one library".into(),
            ));
        }
        for (i, e) in entries.iter().enumerate() {
            if entries[..i].iter().any(|prev| prev.id == e.id) {
                return Err(BenchError::InvalidConfig(format!(
                    "library `{}` registered twice",
                    e.id
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn baseline(&self) -> &LibraryEntry {
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id())
    }

    /// Fresh units for one row, in catalog order.
    pub fn build(&self, size: usize, kind: TransformKind) -> Vec<Box<dyn BenchmarkUnit>> {
        self.entries.iter().map(|e| e.build(size, kind)).collect()
    }
}
