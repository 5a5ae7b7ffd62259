/// Configuration system for repo-render
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::error::{ConfigError, RenderError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default per-file size limit (50 KiB)
pub const MAX_DEFAULT_BYTES: u64 = 51_200;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// File collection and inclusion rules
    #[serde(default)]
    pub scan: ScanConfig,

    /// Output rendering options
    #[serde(default)]
    pub render: RenderConfig,

    /// Rendered page cache policy
    #[serde(default)]
    pub cache: CacheConfig,
}

/// File collection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// Files larger than this many bytes are skipped
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Directory names pruned from the walk (exact, case-sensitive match)
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,

    /// Prune every directory whose name starts with `.`
    #[serde(default = "default_true")]
    pub exclude_hidden_dirs: bool,

    /// Full file names that are never rendered (lock files and the like)
    #[serde(default = "default_excluded_filenames")]
    pub excluded_filenames: Vec<String>,

    /// Extensions of compiled artifacts, matched case-insensitively, without the dot
    #[serde(default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,

    /// Glob patterns for generated files, matched against the file name
    #[serde(default = "default_excluded_globs")]
    pub excluded_globs: Vec<String>,

    /// Inspect files on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

/// Output rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Prefix of the HTML document title
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,

    /// Render Markdown files to HTML instead of showing their source
    #[serde(default = "default_true")]
    pub render_markdown: bool,

    /// Include an indented directory tree in the human view
    #[serde(default = "default_true")]
    pub include_directory_tree: bool,
}

/// Render cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of rendered repositories kept
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,

    /// Seconds after insertion before an entry expires
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_max_bytes() -> u64 {
    MAX_DEFAULT_BYTES
}

fn default_true() -> bool {
    true
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_dirs() -> Vec<String> {
    to_strings(&[
        ".git",
        ".hg",
        ".svn",
        "node_modules",
        "bower_components",
        "vendor",
        "__pycache__",
        "venv",
        ".venv",
        "target",
        "dist",
        "build",
        "out",
        ".next",
        ".tox",
    ])
}

fn default_excluded_filenames() -> Vec<String> {
    to_strings(&[
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "bun.lockb",
        "Cargo.lock",
        "poetry.lock",
        "Pipfile.lock",
        "Gemfile.lock",
        "composer.lock",
        "go.sum",
        ".DS_Store",
    ])
}

fn default_excluded_extensions() -> Vec<String> {
    to_strings(&[
        "exe", "dll", "so", "dylib", "o", "a", "obj", "lib", "class", "jar", "pyc", "pyo", "wasm",
    ])
}

fn default_excluded_globs() -> Vec<String> {
    to_strings(&[
        "*.min.js",
        "*.min.css",
        "*.map",
        "*.pb.go",
        "*_pb2.py",
    ])
}

fn default_title_prefix() -> String {
    "Flattened repo".to_string()
}

fn default_cache_max_entries() -> usize {
    64
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            excluded_dirs: default_excluded_dirs(),
            exclude_hidden_dirs: true,
            excluded_filenames: default_excluded_filenames(),
            excluded_extensions: default_excluded_extensions(),
            excluded_globs: default_excluded_globs(),
            parallel: false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title_prefix: default_title_prefix(),
            render_markdown: true,
            include_directory_tree: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_max_entries(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, RenderError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.scan.max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "scan.max_bytes".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if let Some(dir) = self
            .scan
            .excluded_dirs
            .iter()
            .find(|d| d.is_empty() || d.contains('/') || d.contains('\\'))
        {
            return Err(ConfigError::InvalidValue {
                key: "scan.excluded_dirs".to_string(),
                reason: format!("'{}' must be a single path segment", dir),
            }
            .into());
        }

        for pattern in &self.scan.excluded_globs {
            if let Err(e) = globset::Glob::new(pattern) {
                return Err(ConfigError::InvalidValue {
                    key: "scan.excluded_globs".to_string(),
                    reason: format!("invalid glob '{}': {}", pattern, e),
                }
                .into());
            }
        }

        if self.cache.max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                key: "cache.max_entries".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "cache.ttl_secs".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Some(bytes) = env_value("REPO_RENDER_MAX_BYTES") {
            self.scan.max_bytes = bytes;
        }

        if let Some(flag) = env_value("REPO_RENDER_PARALLEL") {
            self.scan.parallel = flag;
        }

        if let Some(secs) = env_value("REPO_RENDER_CACHE_TTL") {
            self.cache.ttl_secs = secs;
        }
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, RenderError> {
        let mut config = Self::load_or_default()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

/// Parse an override from the environment; unparsable values are logged and ignored
fn env_value<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
