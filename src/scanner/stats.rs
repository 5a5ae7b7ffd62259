//! Aggregate statistics over a scan

use super::file_info::{DecisionKind, FileInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_files: usize,
    pub included: usize,
    pub skipped: usize,
    /// Skipped files per decision kind; kinds with no files are absent
    pub skipped_by_kind: BTreeMap<DecisionKind, usize>,
    pub bytes_included: u64,
    pub bytes_skipped: u64,
}

impl Stats {
    pub fn skipped_of(&self, kind: DecisionKind) -> usize {
        self.skipped_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Reduce the scan output to counts and byte totals
pub fn summarize(infos: &[FileInfo]) -> Stats {
    infos.iter().fold(Stats::default(), |mut stats, info| {
        stats.total_files += 1;
        if info.is_included() {
            stats.included += 1;
            stats.bytes_included += info.size_bytes;
        } else {
            stats.skipped += 1;
            stats.bytes_skipped += info.size_bytes;
            *stats
                .skipped_by_kind
                .entry(info.decision().kind())
                .or_insert(0) += 1;
        }
        stats
    })
}
