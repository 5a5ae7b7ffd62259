//! Single-file inspection: size, exclusion, binary sniffing and content

use super::classifier::{PathClassifier, SNIFF_BYTES, sniff_binary};
use super::file_info::{BinaryCause, FileInfo, InclusionDecision};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Filesystem reads needed by the inspector
///
/// The walker only enumerates directories itself; every file read goes through
/// this trait so reads can be observed in tests.
pub trait FileSystem: Send + Sync {
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Read at most `limit` bytes from the start of the file
    fn read_prefix(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>>;

    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(std::fs::metadata(path)?.len())
    }

    fn read_prefix(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(limit.min(SNIFF_BYTES));
        File::open(path)?.take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Decides inclusion for one file at a time
pub struct FileInspector<'a> {
    classifier: &'a PathClassifier,
    fs: &'a dyn FileSystem,
    max_bytes: u64,
}

impl<'a> FileInspector<'a> {
    pub fn new(classifier: &'a PathClassifier, fs: &'a dyn FileSystem, max_bytes: u64) -> Self {
        Self {
            classifier,
            fs,
            max_bytes,
        }
    }

    /// Inspect one file. Never fails: read errors become an unreadable skip.
    ///
    /// Checks run cheapest first: path rules, then size, then a bounded sample,
    /// and only then the full read.
    pub fn inspect(&self, path: &Path, absolute_path: &Path) -> FileInfo {
        let size_bytes = match self.fs.file_size(absolute_path) {
            Ok(size) => size,
            Err(e) => {
                tracing::warn!("Cannot stat {:?}: {}", absolute_path, e);
                return unreadable(path, absolute_path, 0, &e);
            }
        };

        if let Some(rule) = self.classifier.excluded_file_rule(path) {
            tracing::debug!("Skipping excluded file {:?} ({})", path, rule);
            return FileInfo::skipped(
                path,
                absolute_path,
                size_bytes,
                InclusionDecision::SkippedExcludedPath { rule },
            );
        }

        if size_bytes > self.max_bytes {
            tracing::debug!("Skipping large file: {:?}", path);
            return FileInfo::skipped(
                path,
                absolute_path,
                size_bytes,
                InclusionDecision::SkippedTooLarge {
                    size: size_bytes,
                    max: self.max_bytes,
                },
            );
        }

        let sample = match self.fs.read_prefix(absolute_path, SNIFF_BYTES) {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!("Cannot read {:?}: {}", absolute_path, e);
                return unreadable(path, absolute_path, size_bytes, &e);
            }
        };

        let more_follows = size_bytes > sample.len() as u64;
        if let Some(cause) = sniff_binary(&sample, more_follows) {
            tracing::debug!("Skipping binary file: {:?}", path);
            return FileInfo::skipped(
                path,
                absolute_path,
                size_bytes,
                InclusionDecision::SkippedBinary { cause },
            );
        }

        // The sample already holds the whole file when it came back short
        let bytes = if sample.len() < SNIFF_BYTES {
            sample
        } else {
            match self.fs.read_all(absolute_path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Cannot read {:?}: {}", absolute_path, e);
                    return unreadable(path, absolute_path, size_bytes, &e);
                }
            }
        };

        let content = String::from_utf8_lossy(&bytes).into_owned();
        FileInfo::included(path, absolute_path, size_bytes, content)
    }
}

fn unreadable(path: &Path, absolute_path: &Path, size_bytes: u64, err: &io::Error) -> FileInfo {
    FileInfo::skipped(
        path,
        absolute_path,
        size_bytes,
        InclusionDecision::SkippedBinary {
            cause: BinaryCause::Unreadable(err.to_string()),
        },
    )
}

/// Inspect one file on the real filesystem with the default exclusion rules
pub fn inspect(path: &Path, absolute_path: &Path, max_bytes: u64) -> FileInfo {
    let classifier = PathClassifier::default();
    FileInspector::new(&classifier, &OsFileSystem, max_bytes).inspect(path, absolute_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::file_info::DecisionKind;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_inspect_text_file() {
        let dir = TempDir::new().unwrap();
        let abs = write(&dir, "a.txt", b"hello text");

        let info = inspect(Path::new("a.txt"), &abs, 1024);
        assert!(info.is_included());
        assert_eq!(info.size_bytes, 10);
        assert_eq!(info.content(), Some("hello text"));
    }

    #[test]
    fn test_inspect_empty_file() {
        let dir = TempDir::new().unwrap();
        let abs = write(&dir, "empty.txt", b"");

        let info = inspect(Path::new("empty.txt"), &abs, 1024);
        assert!(info.is_included());
        assert_eq!(info.content(), Some(""));
    }

    #[test]
    fn test_inspect_size_boundary() {
        let dir = TempDir::new().unwrap();
        let exact = write(&dir, "exact.txt", &[b'a'; 100]);
        let over = write(&dir, "over.txt", &[b'a'; 101]);

        assert!(inspect(Path::new("exact.txt"), &exact, 100).is_included());

        let info = inspect(Path::new("over.txt"), &over, 100);
        assert_eq!(
            info.decision(),
            &InclusionDecision::SkippedTooLarge { size: 101, max: 100 }
        );
        assert_eq!(info.size_bytes, 101);
    }

    #[test]
    fn test_inspect_binary_file() {
        let dir = TempDir::new().unwrap();
        let abs = write(&dir, "b.png", &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0]);

        let info = inspect(Path::new("b.png"), &abs, 1024);
        assert_eq!(info.decision().kind(), DecisionKind::SkippedBinary);
        assert!(info.content().is_none());
        assert_eq!(info.size_bytes, 9);
    }

    #[test]
    fn test_inspect_excluded_file_keeps_size() {
        let dir = TempDir::new().unwrap();
        let abs = write(&dir, "Cargo.lock", b"# lock");

        let info = inspect(Path::new("Cargo.lock"), &abs, 1024);
        assert_eq!(info.decision().kind(), DecisionKind::SkippedExcludedPath);
        assert_eq!(info.size_bytes, 6);
    }

    #[test]
    fn test_inspect_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let abs = dir.path().join("vanished.txt");

        let info = inspect(Path::new("vanished.txt"), &abs, 1024);
        assert!(matches!(
            info.decision(),
            InclusionDecision::SkippedBinary {
                cause: BinaryCause::Unreadable(_)
            }
        ));
        assert!(info.decision().reason().starts_with("unreadable"));
        assert_eq!(info.size_bytes, 0);
    }

    #[test]
    fn test_inspect_large_text_past_sample_is_read_fully() {
        let dir = TempDir::new().unwrap();
        let body = "x".repeat(SNIFF_BYTES * 2);
        let abs = write(&dir, "long.txt", body.as_bytes());

        let info = inspect(Path::new("long.txt"), &abs, (SNIFF_BYTES * 4) as u64);
        assert_eq!(info.content().map(str::len), Some(SNIFF_BYTES * 2));
    }

    #[test]
    fn test_inspect_invalid_utf8_after_sample_is_lossy() {
        let dir = TempDir::new().unwrap();
        let mut bytes = vec![b'a'; SNIFF_BYTES];
        bytes.extend_from_slice(&[0xff, b'z']);
        let abs = write(&dir, "late.txt", &bytes);

        let info = inspect(Path::new("late.txt"), &abs, (SNIFF_BYTES * 2) as u64);
        assert!(info.is_included());
        assert!(info.content().unwrap().ends_with("\u{fffd}z"));
    }

    #[test]
    fn test_inspect_short_file_ending_mid_character_is_binary() {
        let dir = TempDir::new().unwrap();
        let abs = write(&dir, "cut.txt", &[b'a', b'b', b'c', 0xe2, 0x82]);

        let info = inspect(Path::new("cut.txt"), &abs, 1024);
        assert_eq!(
            info.decision(),
            &InclusionDecision::SkippedBinary {
                cause: BinaryCause::InvalidUtf8
            }
        );
        assert!(info.content().is_none());
    }

    #[test]
    fn test_inspect_sample_sized_file_ending_mid_character_is_binary() {
        let dir = TempDir::new().unwrap();
        let mut bytes = vec![b'a'; SNIFF_BYTES - 2];
        bytes.extend_from_slice(&[0xe2, 0x82]);
        let abs = write(&dir, "exact.txt", &bytes);

        let info = inspect(Path::new("exact.txt"), &abs, (SNIFF_BYTES * 2) as u64);
        assert_eq!(info.decision().kind(), DecisionKind::SkippedBinary);
    }

    #[test]
    fn test_inspect_character_split_by_sample_boundary_is_text() {
        let dir = TempDir::new().unwrap();
        let mut bytes = vec![b'a'; SNIFF_BYTES - 2];
        bytes.extend_from_slice("\u{20ac}".as_bytes());
        let abs = write(&dir, "split.txt", &bytes);

        let info = inspect(Path::new("split.txt"), &abs, (SNIFF_BYTES * 2) as u64);
        assert!(info.is_included());
        assert!(info.content().unwrap().ends_with('\u{20ac}'));
    }
}
