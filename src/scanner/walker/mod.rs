//! Directory traversal producing one `FileInfo` per regular file

use super::classifier::PathClassifier;
use super::file_info::FileInfo;
use super::inspector::{FileInspector, FileSystem, OsFileSystem};
use crate::config::ScanConfig;
use crate::error::{ScanError, ValidationError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

pub struct TreeWalker {
    pub(crate) root: PathBuf,
    pub(crate) max_bytes: u64,
    pub(crate) classifier: PathClassifier,
    pub(crate) parallel: bool,
    fs: Arc<dyn FileSystem>,
}

impl TreeWalker {
    pub fn new(root: impl AsRef<Path>, max_bytes: u64) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_bytes,
            classifier: PathClassifier::default(),
            parallel: false,
            fs: Arc::new(OsFileSystem),
        }
    }

    /// Build a walker from the scan section of the configuration
    pub fn from_config(root: impl AsRef<Path>, config: &ScanConfig) -> Result<Self, ValidationError> {
        Ok(Self::new(root, config.max_bytes)
            .with_classifier(PathClassifier::new(config)?)
            .with_parallel(config.parallel))
    }

    pub fn with_classifier(mut self, classifier: PathClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Inspect files on the rayon pool. Output is identical either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Walk the checkout and decide every file, sorted by path
    ///
    /// Only a missing root or a root that is not a directory is an error.
    pub fn walk(&self) -> Result<Vec<FileInfo>, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound(self.root.display().to_string()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.display().to_string()));
        }

        let candidates = self.candidates();
        let inspector = FileInspector::new(&self.classifier, self.fs.as_ref(), self.max_bytes);

        let mut files: Vec<FileInfo> = if self.parallel {
            candidates
                .par_iter()
                .map(|(rel, abs)| inspector.inspect(rel, abs))
                .collect()
        } else {
            candidates
                .iter()
                .map(|(rel, abs)| inspector.inspect(rel, abs))
                .collect()
        };

        files.sort_by(|a, b| a.path.cmp(&b.path));

        tracing::info!(
            "Scanned {} files ({} included) under {:?}",
            files.len(),
            files.iter().filter(|f| f.is_included()).count(),
            self.root
        );
        Ok(files)
    }

    /// Enumerate (relative, absolute) paths of regular files, pruning
    /// excluded directories before they are descended
    fn candidates(&self) -> Vec<(PathBuf, PathBuf)> {
        let classifier = &self.classifier;
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                if classifier.is_excluded_directory(&name) {
                    tracing::debug!("Pruning excluded directory: {:?}", entry.path());
                    return false;
                }
                true
            });

        let mut candidates = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_symlink() {
                tracing::debug!("Not following symlink: {:?}", entry.path());
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let absolute = entry.path().to_path_buf();
            let relative = match absolute.strip_prefix(&self.root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => continue,
            };
            candidates.push((relative, absolute));
        }
        candidates
    }
}

/// Collect and decide every file under `root` with the default rules
pub fn collect_files(root: impl AsRef<Path>, max_bytes: u64) -> Result<Vec<FileInfo>, ScanError> {
    TreeWalker::new(root, max_bytes).walk()
}
