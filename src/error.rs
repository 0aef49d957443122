//! Error types for benchmark units and the harness.

use std::collections::TryReserveError;
use std::fmt;
use std::io;

use crate::unit::TransformKind;

/// Errors raised by a [`BenchmarkUnit`](crate::unit::BenchmarkUnit) during
/// `prepare` or `execute_once`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The requested kernel size was zero.
    ZeroLength,
    /// A buffer of `elements` items could not be allocated.
    Allocation { elements: usize, reason: String },
    /// The library refused to construct a plan for this size.
    Plan(String),
    /// `execute_once` was called without a successful `prepare`.
    NotPrepared,
    /// The library reported an error from its transform call.
    Transform(String),
}

impl UnitError {
    pub(crate) fn allocation(elements: usize, err: TryReserveError) -> Self {
        UnitError::Allocation {
            elements,
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::ZeroLength => write!(f, "kernel size must be non-zero"),
            UnitError::Allocation { elements, reason } => {
                write!(f, "failed to allocate {} elements: {}", elements, reason)
            }
            UnitError::Plan(msg) => write!(f, "plan construction failed: {}", msg),
            UnitError::NotPrepared => write!(f, "unit executed before prepare"),
            UnitError::Transform(msg) => write!(f, "transform failed: {}", msg),
        }
    }
}

impl std::error::Error for UnitError {}

/// Errors produced by the timing driver, the harness and the report writer.
#[derive(Debug)]
pub enum BenchError {
    /// `prepare` failed; the library is unavailable for this size.
    Setup {
        library: String,
        size: usize,
        kind: TransformKind,
        source: UnitError,
    },
    /// `execute_once` failed mid-loop. The mean is invalid and the run aborts.
    Measurement {
        library: String,
        size: usize,
        kind: TransformKind,
        source: UnitError,
    },
    /// Bad sizes, durations or catalog contents.
    InvalidConfig(String),
    /// A report section was written out of order.
    OutOfOrder {
        state: &'static str,
        action: &'static str,
    },
    Io(io::Error),
    Json(serde_json::Error),
}

impl BenchError {
    /// True for failures that only make one cell (or one row) unavailable.
    pub fn is_setup(&self) -> bool {
        matches!(self, BenchError::Setup { .. })
    }
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Setup {
                library,
                size,
                kind,
                source,
            } => write!(
                f,
                "{} {} setup failed for size {}: {}",
                library, kind, size, source
            ),
            BenchError::Measurement {
                library,
                size,
                kind,
                source,
            } => write!(
                f,
                "{} {} measurement failed for size {}: {}",
                library, kind, size, source
            ),
            BenchError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            BenchError::OutOfOrder { state, action } => {
                write!(f, "cannot {} while report is {}", action, state)
            }
            BenchError::Io(err) => write!(f, "i/o error: {}", err),
            BenchError::Json(err) => write!(f, "json error: {}", err),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Setup { source, .. } | BenchError::Measurement { source, .. } => {
                Some(source)
            }
            BenchError::Io(err) => Some(err),
            BenchError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for BenchError {
    fn from(err: io::Error) -> Self {
        BenchError::Io(err)
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Json(err)
    }
}
