//! JSON record of a run.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::harness::{RunSummary, SectionResult};
use crate::sysinfo::SystemInfo;

#[derive(Debug, Serialize)]
pub struct LibraryRecord<'a> {
    pub id: &'a str,
    pub column: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RunRecord<'a> {
    /// RFC 3339 UTC timestamp.
    pub date: String,
    pub env: &'a SystemInfo,
    pub baseline: &'a str,
    pub libraries: Vec<LibraryRecord<'a>>,
    pub min_duration_ms: u64,
    pub sizes: &'a [usize],
    pub sections: &'a [SectionResult],
}

impl<'a> RunRecord<'a> {
    pub fn new(
        catalog: &'a Catalog,
        config: &'a BenchConfig,
        env: &'a SystemInfo,
        summary: &'a RunSummary,
    ) -> Self {
        Self {
            date: chrono::Utc::now().to_rfc3339(),
            env,
            baseline: catalog.baseline().id(),
            libraries: catalog
                .entries()
                .iter()
                .map(|e| LibraryRecord {
                    id: e.id(),
                    column: e.column(),
                    description: e.description(),
                })
                .collect(),
            min_duration_ms: u64::try_from(config.min_duration.as_millis()).unwrap_or(u64::MAX),
            sizes: &config.sizes,
            sections: &summary.sections,
        }
    }

    pub fn to_json(&self) -> Result<String, BenchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the record to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), BenchError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
