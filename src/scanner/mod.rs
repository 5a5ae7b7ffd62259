//! File collection and inclusion decisions
//!
//! Walks a checkout, prunes excluded directories, classifies every remaining
//! file and summarizes the outcome for the renderers.

mod classifier;
mod file_info;
mod inspector;
mod stats;
mod walker;

pub use classifier::{PathClassifier, SNIFF_BYTES, looks_binary, sniff_binary};
pub use file_info::{BinaryCause, DecisionKind, FileInfo, InclusionDecision, display_path};
pub use inspector::{FileInspector, FileSystem, OsFileSystem, inspect};
pub use stats::{Stats, summarize};
pub use walker::{TreeWalker, collect_files};
