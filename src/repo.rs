//! Repository identity and small formatting helpers

use crate::error::ValidationError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const GITHUB_PREFIX: &str = "https://github.com/";

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self, ValidationError> {
        let owner = owner.into();
        let repo = repo.into();
        if owner.is_empty() || repo.is_empty() || owner.contains('/') || repo.contains('/') {
            return Err(ValidationError::InvalidRepoPath(format!("{}/{}", owner, repo)));
        }
        Ok(Self { owner, repo })
    }

    /// Parse `https://github.com/<owner>/<repo>`, tolerating a trailing slash
    /// and a `.git` suffix. Extra path segments after the repo are ignored.
    pub fn parse_github_url(url: &str) -> Result<Self, ValidationError> {
        let trimmed = url.trim().trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

        let path = trimmed
            .strip_prefix(GITHUB_PREFIX)
            .ok_or_else(|| ValidationError::InvalidGithubUrl(url.to_string()))?;

        let mut parts = path.split('/');
        match (parts.next(), parts.next()) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                Self::new(owner, repo)
            }
            _ => Err(ValidationError::InvalidGithubUrl(url.to_string())),
        }
    }

    /// Key used by the render cache: `owner_repo`
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.owner, self.repo)
    }

    /// Clean URL path: `owner/repo`
    pub fn url_path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn github_url(&self) -> String {
        format!("{}{}/{}", GITHUB_PREFIX, self.owner, self.repo)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

pub fn validate_github_url(url: &str) -> bool {
    RepoId::parse_github_url(url).is_ok()
}

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("static regex is valid"));

/// Replace characters unsafe in file names and cap the length at 100,
/// keeping the extension when the name has to be cut
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(filename, "_").into_owned();
    if cleaned.chars().count() <= 100 {
        return cleaned;
    }

    match cleaned.rsplit_once('.') {
        Some((name, ext)) => {
            let name: String = name.chars().take(90).collect();
            if ext.is_empty() {
                name
            } else {
                format!("{}.{}", name, ext)
            }
        }
        None => cleaned.chars().take(90).collect(),
    }
}

/// Human readable size: `0 B`, `512 B`, `1.5 KB`, `2.0 MB`
pub fn format_file_size(size_bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if size_bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = size_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", size_bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Marker used when the commit of a checkout cannot be determined
pub const UNKNOWN_COMMIT: &str = "(unknown)";

/// First 8 characters of a commit hash; the unknown marker is left alone
pub fn truncate_commit(commit: &str) -> &str {
    if commit == UNKNOWN_COMMIT {
        return commit;
    }
    match commit.char_indices().nth(8) {
        Some((idx, _)) => &commit[..idx],
        None => commit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let id = RepoId::parse_github_url("https://github.com/karpathy/nanoGPT").unwrap();
        assert_eq!(id.owner, "karpathy");
        assert_eq!(id.repo, "nanoGPT");
    }

    #[test]
    fn test_parse_github_url_suffixes() {
        for url in [
            "https://github.com/owner/repo/",
            "https://github.com/owner/repo.git",
            "https://github.com/owner/repo/tree/main/src",
        ] {
            let id = RepoId::parse_github_url(url).unwrap();
            assert_eq!(id.url_path(), "owner/repo", "{}", url);
        }
    }

    #[test]
    fn test_parse_github_url_rejects_other_hosts() {
        assert!(RepoId::parse_github_url("https://gitlab.com/owner/repo").is_err());
        assert!(RepoId::parse_github_url("http://github.com/owner/repo").is_err());
        assert!(RepoId::parse_github_url("https://github.com/owner").is_err());
        assert!(!validate_github_url("not a url"));
        assert!(validate_github_url("https://github.com/a/b"));
    }

    #[test]
    fn test_repo_id_keys() {
        let id = RepoId::new("owner", "repo").unwrap();
        assert_eq!(id.cache_key(), "owner_repo");
        assert_eq!(id.url_path(), "owner/repo");
        assert_eq!(id.github_url(), "https://github.com/owner/repo");
        assert_eq!(id.to_string(), "owner/repo");
    }

    #[test]
    fn test_repo_id_rejects_slashes() {
        assert!(RepoId::new("a/b", "c").is_err());
        assert!(RepoId::new("", "c").is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a<b>:c?.txt"), "a_b__c_.txt");
        assert_eq!(sanitize_filename("plain.rs"), "plain.rs");
    }

    #[test]
    fn test_sanitize_long_filename_keeps_extension() {
        let long = format!("{}.html", "x".repeat(150));
        let cleaned = sanitize_filename(&long);
        assert_eq!(cleaned, format!("{}.html", "x".repeat(90)));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120.0 GB");
    }

    #[test]
    fn test_truncate_commit() {
        assert_eq!(truncate_commit("0123456789abcdef"), "01234567");
        assert_eq!(truncate_commit("abc"), "abc");
        assert_eq!(truncate_commit(UNKNOWN_COMMIT), UNKNOWN_COMMIT);
    }
}
