use std::path::PathBuf;

use chrono::{Duration, NaiveDateTime};

/// One raw input handed to the extractor by artifact discovery.
///
/// The core makes no assumption about on-disk layout: discovery owns the
/// directory walk and delivers category/group attribution along with the
/// bytes and the file's own modification time.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub category: String,
    pub group_key: String,
    pub path: PathBuf,
    pub text: String,
    /// Last-modified time of the file, captured at discovery. Staleness
    /// classification compares this against the run's single "now", never
    /// against a per-worker clock.
    pub last_modified: NaiveDateTime,
}

/// Extraction tunables threaded in explicitly, not read from globals.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Maximum artifact age for an endless stage to still count as
    /// RUNNING rather than UNKNOWN. The boundary is inclusive: an
    /// artifact exactly this old is still running.
    pub staleness: Duration,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            staleness: Duration::minutes(5),
        }
    }
}
