//! One full render of a checkout: collect, summarize, build both views

use crate::cache::CachedRender;
use crate::config::Config;
use crate::error::RenderError;
use crate::render::{HtmlOptions, Highlighter, RepoSnapshot, build_flattened, build_html};
use crate::repo::{RepoId, UNKNOWN_COMMIT};
use crate::scanner::{Stats, TreeWalker, summarize};
use chrono::{DateTime, Utc};
use git2::Repository;
use std::path::{Path, PathBuf};

/// A materialized repository snapshot handed over by the fetch step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub root: PathBuf,
    pub commit: String,
}

impl Checkout {
    pub fn new(root: impl Into<PathBuf>, commit: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            commit: commit.into(),
        }
    }

    /// A local directory; the commit is read from its git HEAD when there is one
    pub fn local(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let commit = resolve_commit(&root).unwrap_or_else(|| UNKNOWN_COMMIT.to_string());
        Self { root, commit }
    }
}

/// Full hash of HEAD if `root` is the top of a git work tree
pub fn resolve_commit(root: &Path) -> Option<String> {
    let repo = match Repository::open(root) {
        Ok(repo) => repo,
        Err(e) => {
            tracing::debug!("No git repository at {:?}: {}", root, e);
            return None;
        }
    };
    let commit = repo.head().ok()?.peel_to_commit().ok()?;
    Some(commit.id().to_string())
}

/// Output of one render
#[derive(Debug, Clone)]
pub struct RenderedRepo {
    pub repo_url: String,
    pub commit: String,
    pub html: String,
    pub flattened: String,
    pub stats: Stats,
    pub rendered_at: DateTime<Utc>,
}

impl RenderedRepo {
    pub fn into_cached(self) -> CachedRender {
        CachedRender {
            repo_url: self.repo_url,
            commit: self.commit,
            html: self.html,
            flattened: self.flattened,
            stats: self.stats,
        }
    }
}

/// Scan the checkout and build the human and flattened views
///
/// The file list lives only for the duration of this call.
pub fn render_checkout(
    checkout: &Checkout,
    repo_url: &str,
    config: &Config,
    highlighter: &dyn Highlighter,
) -> Result<RenderedRepo, RenderError> {
    tracing::info!("Scanning files in {:?}", checkout.root);
    let files = TreeWalker::from_config(&checkout.root, &config.scan)?.walk()?;
    let stats = summarize(&files);

    let root_name = RepoId::parse_github_url(repo_url)
        .map(|id| id.repo)
        .ok()
        .or_else(|| {
            checkout
                .root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "repo".to_string());

    tracing::info!("Generating HTML");
    let snapshot = RepoSnapshot {
        repo_url,
        commit: &checkout.commit,
        files: &files,
        stats: &stats,
    };
    let options = HtmlOptions::from_config(&config.render, root_name);
    let html = build_html(&snapshot, highlighter, &options);
    let flattened = build_flattened(&files);

    Ok(RenderedRepo {
        repo_url: repo_url.to_string(),
        commit: checkout.commit.clone(),
        html,
        flattened,
        stats,
        rendered_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::render::PlainHighlighter;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_checkout_local_without_git() {
        let dir = TempDir::new().unwrap();
        let checkout = Checkout::local(dir.path());
        assert_eq!(checkout.commit, UNKNOWN_COMMIT);
    }

    #[test]
    fn test_resolve_commit_from_git_head() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("a.txt")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
            .unwrap();

        assert_eq!(resolve_commit(dir.path()), Some(oid.to_string()));

        // .git is pruned from the render
        let checkout = Checkout::local(dir.path());
        let rendered = render_checkout(
            &checkout,
            "https://github.com/owner/repo",
            &Config::default(),
            &PlainHighlighter,
        )
        .unwrap();
        assert_eq!(rendered.stats.total_files, 1);
        assert_eq!(rendered.commit, oid.to_string());
    }

    #[test]
    fn test_render_checkout_builds_both_views() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "print('hi')\n").unwrap();
        fs::write(dir.path().join("blob.bin"), [0u8, 159, 146, 150]).unwrap();

        let checkout = Checkout::new(dir.path(), "0123456789abcdef");
        let rendered = render_checkout(
            &checkout,
            "https://github.com/owner/repo",
            &Config::default(),
            &PlainHighlighter,
        )
        .unwrap();

        assert_eq!(rendered.stats.total_files, 2);
        assert_eq!(rendered.stats.included, 1);
        assert!(rendered.html.contains("print(&#39;hi&#39;)"));
        assert!(rendered.flattened.contains("<source>main.py</source>"));
        assert!(!rendered.flattened.contains("blob.bin"));

        let cached = rendered.into_cached();
        assert_eq!(cached.commit, "0123456789abcdef");
    }

    #[test]
    fn test_render_missing_checkout_is_terminal_error() {
        let checkout = Checkout::new("/nonexistent/checkout/123", "abc");
        let err = render_checkout(&checkout, "local", &Config::default(), &PlainHighlighter)
            .unwrap_err();
        assert!(matches!(err, RenderError::Scan(ScanError::RootNotFound(_))));
    }
}
