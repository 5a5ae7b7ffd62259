/// Location of the configuration file
///
/// `REPO_RENDER_CONFIG` wins when set; otherwise the platform config directory
/// is used (XDG Base Directory rules on Linux).
use std::path::PathBuf;

const APP_DIR: &str = "repo-render";
const CONFIG_FILE: &str = "config.toml";

pub struct PlatformPaths;

impl PlatformPaths {
    /// - Windows: %APPDATA%
    /// - macOS: ~/Library/Application Support
    /// - Linux/Unix: $XDG_CONFIG_HOME or ~/.config
    pub fn config_dir() -> PathBuf {
        config_dir_for(std::env::consts::OS, |key| std::env::var(key).ok())
    }

    /// Returns: {config_dir}/repo-render
    pub fn project_config_dir() -> PathBuf {
        Self::config_dir().join(APP_DIR)
    }

    /// Returns: $REPO_RENDER_CONFIG or {config_dir}/repo-render/config.toml
    pub fn default_config_path() -> PathBuf {
        match std::env::var("REPO_RENDER_CONFIG") {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::project_config_dir().join(CONFIG_FILE),
        }
    }
}

/// Resolve the base config directory for `os` using `env` for lookups.
/// Falls back to the current directory when nothing usable is set.
fn config_dir_for(os: &str, env: impl Fn(&str) -> Option<String>) -> PathBuf {
    let home = || env("HOME").filter(|h| !h.is_empty()).map(PathBuf::from);
    let dir = match os {
        "windows" => env("APPDATA").map(PathBuf::from),
        "macos" => home().map(|h| h.join("Library/Application Support")),
        _ => env("XDG_CONFIG_HOME")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .or_else(|| home().map(|h| h.join(".config"))),
    };
    dir.unwrap_or_else(|| PathBuf::from("."))
}
