//! Output views built from a finished scan
//!
//! Renderers only read `FileInfo` and `Stats`; none of them re-classify files.

pub mod flatten;
pub mod html;
pub mod language;
pub mod tree;

pub use flatten::build_flattened;
pub use html::{HtmlOptions, build_html};
pub use tree::directory_tree;

use crate::scanner::{FileInfo, Stats};

/// Everything a renderer needs about one repository snapshot
#[derive(Debug, Clone, Copy)]
pub struct RepoSnapshot<'a> {
    pub repo_url: &'a str,
    pub commit: &'a str,
    pub files: &'a [FileInfo],
    pub stats: &'a Stats,
}

/// Turns file text into HTML markup for the human view
///
/// Implementations must escape the text themselves.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, text: &str, path: &str, language: Option<&str>) -> String;

    /// Extra CSS emitted once in the document head
    fn stylesheet(&self) -> String {
        String::new()
    }
}

/// Escapes the text and tags the block with its language class so a
/// client-side highlighter can pick it up
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, text: &str, _path: &str, language: Option<&str>) -> String {
        match language {
            Some(lang) => format!(
                "<pre class=\"highlight\"><code class=\"language-{}\">{}</code></pre>",
                lang,
                html_escape(text)
            ),
            None => format!(
                "<pre class=\"highlight\"><code>{}</code></pre>",
                html_escape(text)
            ),
        }
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Anchor id for a file section; distinct paths give distinct ids
pub fn anchor_id(path: &str) -> String {
    let mut id = String::from("file-");
    for byte in path.bytes() {
        if byte.is_ascii_alphanumeric() {
            id.push(byte as char);
        } else {
            id.push_str(&format!("_{:02x}", byte));
        }
    }
    id
}
