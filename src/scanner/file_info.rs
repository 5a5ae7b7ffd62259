//! Per-file scan results and inclusion decisions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file that looked like a candidate was treated as binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryCause {
    /// The leading sample contained a NUL byte
    NullByte,
    /// The leading sample is not valid UTF-8
    InvalidUtf8,
    /// The file could not be stat'ed or read
    Unreadable(String),
}

/// Classification outcome for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InclusionDecision {
    Included,
    SkippedBinary { cause: BinaryCause },
    SkippedTooLarge { size: u64, max: u64 },
    SkippedExcludedPath { rule: String },
}

/// Fieldless form of [`InclusionDecision`], used as a statistics key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Included,
    SkippedBinary,
    SkippedTooLarge,
    SkippedExcludedPath,
}

impl InclusionDecision {
    pub fn kind(&self) -> DecisionKind {
        match self {
            InclusionDecision::Included => DecisionKind::Included,
            InclusionDecision::SkippedBinary { .. } => DecisionKind::SkippedBinary,
            InclusionDecision::SkippedTooLarge { .. } => DecisionKind::SkippedTooLarge,
            InclusionDecision::SkippedExcludedPath { .. } => DecisionKind::SkippedExcludedPath,
        }
    }

    pub fn is_included(&self) -> bool {
        matches!(self, InclusionDecision::Included)
    }

    /// Human-readable reason shown next to the file in the sidebar
    pub fn reason(&self) -> String {
        match self {
            InclusionDecision::Included => "included".to_string(),
            InclusionDecision::SkippedBinary { cause } => match cause {
                BinaryCause::NullByte => "binary (contains NUL bytes)".to_string(),
                BinaryCause::InvalidUtf8 => "binary (not valid UTF-8)".to_string(),
                BinaryCause::Unreadable(msg) => format!("unreadable: {}", msg),
            },
            InclusionDecision::SkippedTooLarge { size, max } => {
                format!("too large ({} bytes > {} byte limit)", size, max)
            }
            InclusionDecision::SkippedExcludedPath { rule } => format!("excluded by {}", rule),
        }
    }
}

impl fmt::Display for InclusionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

impl DecisionKind {
    /// Section label used by the renderers
    pub fn label(&self) -> &'static str {
        match self {
            DecisionKind::Included => "Included",
            DecisionKind::SkippedBinary => "Skipped (binary)",
            DecisionKind::SkippedTooLarge => "Skipped (too large)",
            DecisionKind::SkippedExcludedPath => "Skipped (excluded)",
        }
    }
}

/// Information about a discovered file
///
/// `content` is only ever `Some` for included files, so the decision and the
/// content are set together through the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Path relative to the checkout root
    pub path: PathBuf,
    /// Location on disk; only valid while the checkout exists
    pub absolute_path: PathBuf,
    /// On-disk size, recorded whatever the decision
    pub size_bytes: u64,
    decision: InclusionDecision,
    content: Option<String>,
}

impl FileInfo {
    pub fn included(
        path: impl Into<PathBuf>,
        absolute_path: impl Into<PathBuf>,
        size_bytes: u64,
        content: String,
    ) -> Self {
        Self {
            path: path.into(),
            absolute_path: absolute_path.into(),
            size_bytes,
            decision: InclusionDecision::Included,
            content: Some(content),
        }
    }

    /// Build a skipped entry. Passing `Included` here is a logic error and is
    /// downgraded to an unreadable skip so the content law still holds.
    pub fn skipped(
        path: impl Into<PathBuf>,
        absolute_path: impl Into<PathBuf>,
        size_bytes: u64,
        decision: InclusionDecision,
    ) -> Self {
        let decision = if decision.is_included() {
            InclusionDecision::SkippedBinary {
                cause: BinaryCause::Unreadable("content missing".to_string()),
            }
        } else {
            decision
        };
        Self {
            path: path.into(),
            absolute_path: absolute_path.into(),
            size_bytes,
            decision,
            content: None,
        }
    }

    pub fn decision(&self) -> &InclusionDecision {
        &self.decision
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn is_included(&self) -> bool {
        self.decision.is_included()
    }

    /// Relative path joined with `/` regardless of platform
    pub fn display_path(&self) -> String {
        display_path(&self.path)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Join path segments with `/`
pub fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
