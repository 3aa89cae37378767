//! Machine-readable summary of an extraction run.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One page that failed to render or parse during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFailure {
    /// Path of the page file.
    pub path: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Aggregate counters and failures for one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Name the host was catalogued under.
    pub system: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: Option<DateTime<Utc>>,
    /// Manual-page files visited.
    pub pages_seen: usize,
    /// Commands written to the catalogue from manual pages.
    pub commands_recorded: usize,
    /// Commands seeded without documentation.
    pub bare_commands_seeded: usize,
    /// Commands probed via `--help`.
    pub help_probes: usize,
    /// Pages that failed and were skipped.
    pub failures: Vec<PageFailure>,
}

impl RunReport {
    /// Starts a report for the named system, timestamped now.
    pub fn begin(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            started_at: Utc::now(),
            finished_at: None,
            pages_seen: 0,
            commands_recorded: 0,
            bare_commands_seeded: 0,
            help_probes: 0,
            failures: Vec::new(),
        }
    }

    /// Records a skipped page.
    pub fn record_failure(&mut self, path: &Path, reason: impl Into<String>) {
        self.failures.push(PageFailure {
            path: path.display().to_string(),
            reason: reason.into(),
        });
    }

    /// Stamps the finish time.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Serializes the report as pretty-printed JSON to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
