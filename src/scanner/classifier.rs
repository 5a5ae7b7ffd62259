//! Path and byte-sample classification
//!
//! Everything here is a pure function of a path segment, a relative path or a
//! byte slice. No filesystem access happens in this module.

use super::file_info::BinaryCause;
use crate::config::ScanConfig;
use crate::error::ValidationError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;

/// Number of leading bytes sampled for binary detection
pub const SNIFF_BYTES: usize = 8192;

/// Compiled exclusion rules
#[derive(Debug, Clone)]
pub struct PathClassifier {
    excluded_dirs: HashSet<String>,
    exclude_hidden_dirs: bool,
    excluded_filenames: HashSet<String>,
    excluded_extensions: HashSet<String>,
    glob_patterns: Vec<String>,
    globs: GlobSet,
}

impl PathClassifier {
    pub fn new(config: &ScanConfig) -> Result<Self, ValidationError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.excluded_globs {
            let glob = Glob::new(pattern)
                .map_err(|e| ValidationError::InvalidPattern(format!("{}: {}", pattern, e)))?;
            builder.add(glob);
        }
        let globs = builder
            .build()
            .map_err(|e| ValidationError::InvalidPattern(e.to_string()))?;

        Ok(Self::with_globs(config, config.excluded_globs.clone(), globs))
    }

    fn with_globs(config: &ScanConfig, glob_patterns: Vec<String>, globs: GlobSet) -> Self {
        Self {
            excluded_dirs: config.excluded_dirs.iter().cloned().collect(),
            exclude_hidden_dirs: config.exclude_hidden_dirs,
            excluded_filenames: config.excluded_filenames.iter().cloned().collect(),
            excluded_extensions: config
                .excluded_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            glob_patterns,
            globs,
        }
    }

    /// True if a directory with this name must not be descended into
    pub fn is_excluded_directory(&self, segment: &str) -> bool {
        if self.excluded_dirs.contains(segment) {
            return true;
        }
        self.exclude_hidden_dirs && segment.starts_with('.') && segment != "." && segment != ".."
    }

    pub fn is_excluded_file(&self, path: &Path) -> bool {
        self.excluded_file_rule(path).is_some()
    }

    /// Describe the rule that excludes this file, if any
    pub fn excluded_file_rule(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_string_lossy().into_owned();

        if self.excluded_filenames.contains(name.as_str()) {
            return Some(format!("filename {}", name));
        }

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            let ext = ext.to_lowercase();
            if self.excluded_extensions.contains(&ext) {
                return Some(format!("extension .{}", ext));
            }
        }

        self.globs
            .matches(name.as_str())
            .first()
            .map(|&idx| format!("pattern {}", self.glob_patterns[idx]))
    }
}

impl Default for PathClassifier {
    fn default() -> Self {
        let config = ScanConfig::default();
        Self::new(&config).unwrap_or_else(|e| {
            tracing::warn!("Default exclusion globs failed to compile: {}", e);
            Self::with_globs(&config, Vec::new(), GlobSet::empty())
        })
    }
}

/// Sniff a leading byte sample and report why it looks binary
///
/// `more_follows` is true when the sample is a strict prefix of the file. Only
/// then may a multi-byte UTF-8 sequence cut off at the end of the sample pass,
/// since the rest of the character is still on disk.
pub fn sniff_binary(sample: &[u8], more_follows: bool) -> Option<BinaryCause> {
    if sample.contains(&0) {
        return Some(BinaryCause::NullByte);
    }
    match std::str::from_utf8(sample) {
        Ok(_) => None,
        Err(e) if more_follows && e.error_len().is_none() => None,
        Err(_) => Some(BinaryCause::InvalidUtf8),
    }
}

/// Sniff a complete file's bytes
pub fn looks_binary(bytes: &[u8]) -> bool {
    sniff_binary(bytes, false).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_directory_exact_match() {
        let classifier = PathClassifier::default();
        assert!(classifier.is_excluded_directory("node_modules"));
        assert!(classifier.is_excluded_directory("vendor"));
        assert!(classifier.is_excluded_directory(".git"));
        assert!(!classifier.is_excluded_directory("src"));
    }

    #[test]
    fn test_excluded_directory_is_case_sensitive() {
        let classifier = PathClassifier::default();
        assert!(!classifier.is_excluded_directory("Vendor"));
        assert!(!classifier.is_excluded_directory("NODE_MODULES"));
    }

    #[test]
    fn test_hidden_directories() {
        let classifier = PathClassifier::default();
        assert!(classifier.is_excluded_directory(".github"));
        assert!(classifier.is_excluded_directory(".cache"));
        assert!(!classifier.is_excluded_directory("."));

        let config = ScanConfig {
            exclude_hidden_dirs: false,
            ..ScanConfig::default()
        };
        let classifier = PathClassifier::new(&config).unwrap();
        assert!(!classifier.is_excluded_directory(".github"));
        // Still listed explicitly
        assert!(classifier.is_excluded_directory(".git"));
    }

    #[test]
    fn test_excluded_lock_files() {
        let classifier = PathClassifier::default();
        assert!(classifier.is_excluded_file(Path::new("package-lock.json")));
        assert!(classifier.is_excluded_file(Path::new("sub/yarn.lock")));
        assert_eq!(
            classifier.excluded_file_rule(Path::new("Cargo.lock")),
            Some("filename Cargo.lock".to_string())
        );
        assert!(!classifier.is_excluded_file(Path::new("Cargo.toml")));
    }

    #[test]
    fn test_excluded_artifact_extensions() {
        let classifier = PathClassifier::default();
        assert!(classifier.is_excluded_file(Path::new("bin/tool.exe")));
        assert!(classifier.is_excluded_file(Path::new("Main.CLASS")));
        assert_eq!(
            classifier.excluded_file_rule(Path::new("lib/native.so")),
            Some("extension .so".to_string())
        );
        assert!(!classifier.is_excluded_file(Path::new("src/main.rs")));
    }

    #[test]
    fn test_images_are_left_to_sniffing() {
        let classifier = PathClassifier::default();
        assert!(!classifier.is_excluded_file(Path::new("logo.png")));
    }

    #[test]
    fn test_generated_file_patterns() {
        let classifier = PathClassifier::default();
        assert_eq!(
            classifier.excluded_file_rule(Path::new("static/app.min.js")),
            Some("pattern *.min.js".to_string())
        );
        assert_eq!(
            classifier.excluded_file_rule(Path::new("dist/bundle.js.map")),
            Some("pattern *.map".to_string())
        );
        assert_eq!(
            classifier.excluded_file_rule(Path::new("css/site.css.map")),
            Some("pattern *.map".to_string())
        );
        assert!(classifier.is_excluded_file(Path::new("proto/api.pb.go")));
        assert!(!classifier.is_excluded_file(Path::new("static/app.js")));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let config = ScanConfig {
            excluded_globs: vec!["[".to_string()],
            ..ScanConfig::default()
        };
        assert!(PathClassifier::new(&config).is_err());
    }

    #[test]
    fn test_looks_binary_text() {
        assert!(!looks_binary(b"fn main() {}\n"));
        assert!(!looks_binary("héllo wörld".as_bytes()));
        assert!(!looks_binary(b""));
    }

    #[test]
    fn test_looks_binary_null_byte() {
        assert_eq!(sniff_binary(b"abc\0def", true), Some(BinaryCause::NullByte));
    }

    #[test]
    fn test_looks_binary_png_header() {
        let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0x0d];
        assert!(looks_binary(&png));
    }

    #[test]
    fn test_looks_binary_invalid_utf8() {
        assert_eq!(
            sniff_binary(&[b'a', 0xff, 0xfe, b'b'], true),
            Some(BinaryCause::InvalidUtf8)
        );
    }

    #[test]
    fn test_truncated_multibyte_at_sample_end_is_text() {
        let mut sample = b"abc".to_vec();
        // First two bytes of the three-byte encoding of U+20AC
        sample.extend_from_slice(&[0xe2, 0x82]);
        assert_eq!(sniff_binary(&sample, true), None);
    }

    #[test]
    fn test_truncated_multibyte_at_end_of_file_is_binary() {
        let bytes = [b'a', b'b', b'c', 0xe2, 0x82];
        assert_eq!(sniff_binary(&bytes, false), Some(BinaryCause::InvalidUtf8));
        assert!(looks_binary(&bytes));
    }
}
