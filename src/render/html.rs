//! Human view: one HTML page with a sidebar, every included file and the
//! flattened view embedded behind a toggle

use super::flatten::build_flattened;
use super::language::{is_markdown, language_tag};
use super::tree::directory_tree;
use super::{Highlighter, RepoSnapshot, anchor_id, html_escape};
use crate::config::RenderConfig;
use crate::repo::{format_file_size, truncate_commit};
use crate::scanner::{DecisionKind, FileInfo};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};

const SKIPPED_KINDS: [DecisionKind; 3] = [
    DecisionKind::SkippedBinary,
    DecisionKind::SkippedTooLarge,
    DecisionKind::SkippedExcludedPath,
];

/// Page-level rendering switches
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub title_prefix: String,
    pub render_markdown: bool,
    pub include_directory_tree: bool,
    /// Name shown at the top of the directory tree
    pub root_name: String,
}

impl HtmlOptions {
    pub fn from_config(config: &RenderConfig, root_name: impl Into<String>) -> Self {
        Self {
            title_prefix: config.title_prefix.clone(),
            render_markdown: config.render_markdown,
            include_directory_tree: config.include_directory_tree,
            root_name: root_name.into(),
        }
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default(), "repo")
    }
}

/// Build the complete HTML document
pub fn build_html(
    snapshot: &RepoSnapshot<'_>,
    highlighter: &dyn Highlighter,
    options: &HtmlOptions,
) -> String {
    let repo_url = html_escape(snapshot.repo_url);
    let title = html_escape(&format!("{} – {}", options.title_prefix, snapshot.repo_url));

    let mut body = String::new();
    body.push_str(&nav_bar(&repo_url));
    body.push_str("<div class=\"page\">\n");
    body.push_str(&sidebar(snapshot.files));
    body.push_str("<main>\n");
    body.push_str(&header(snapshot, &repo_url));
    body.push_str(VIEW_TOGGLE);

    body.push_str("<div id=\"human-view\">\n");
    if options.include_directory_tree {
        body.push_str(&format!(
            "<section class=\"tree\"><h2>Directory tree</h2><pre>{}</pre></section>\n",
            html_escape(&directory_tree(&options.root_name, snapshot.files))
        ));
    }
    body.push_str(&skipped_sections(snapshot.files));
    for file in snapshot.files {
        if let Some(content) = file.content() {
            body.push_str(&file_section(file, content, highlighter, options));
        }
    }
    body.push_str("</div>\n");

    body.push_str(&format!(
        "<div id=\"llm-view\" hidden>\n<p>Copy the text below into an LLM context window.</p>\n\
         <button type=\"button\" onclick=\"copyFlattened()\">Copy</button>\n\
         <textarea id=\"llm-text\" readonly>{}</textarea>\n</div>\n",
        html_escape(&build_flattened(snapshot.files))
    ));

    body.push_str("</main>\n</div>\n");

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}{}</style>\n</head>\n<body>\n{}<script>{}</script>\n</body>\n</html>\n",
        title,
        BASE_STYLES,
        highlighter.stylesheet(),
        body,
        VIEW_SCRIPT
    )
}

fn nav_bar(repo_url: &str) -> String {
    format!(
        "<nav class=\"top-nav\">\n<a href=\"/\" class=\"nav-brand\">GitRender</a>\n\
         <div class=\"nav-actions\">\n\
         <a href=\"{}\" class=\"nav-btn\" target=\"_blank\" rel=\"noopener\">View on GitHub</a>\n\
         <a href=\"/\" class=\"nav-btn primary\">Home</a>\n</div>\n</nav>\n",
        repo_url
    )
}

fn sidebar(files: &[FileInfo]) -> String {
    let mut out = String::from("<aside id=\"sidebar\">\n<h2>Files</h2>\n<ul>\n");
    for file in files.iter().filter(|f| f.is_included()) {
        let path = file.display_path();
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a> <span class=\"size\">({})</span></li>\n",
            anchor_id(&path),
            html_escape(&path),
            format_file_size(file.size_bytes)
        ));
    }
    out.push_str("</ul>\n</aside>\n");
    out
}

fn header(snapshot: &RepoSnapshot<'_>, repo_url: &str) -> String {
    let stats = snapshot.stats;
    format!(
        "<header id=\"top\">\n<h1><a href=\"{url}\">{url}</a></h1>\n\
         <p class=\"meta\">Commit <code>{commit}</code> · {total} files · \
         {included} rendered ({included_size}) · {skipped} skipped ({skipped_size})</p>\n</header>\n",
        url = repo_url,
        commit = html_escape(truncate_commit(snapshot.commit)),
        total = stats.total_files,
        included = stats.included,
        included_size = format_file_size(stats.bytes_included),
        skipped = stats.skipped,
        skipped_size = format_file_size(stats.bytes_skipped),
    )
}

fn skipped_sections(files: &[FileInfo]) -> String {
    let mut out = String::new();
    for kind in SKIPPED_KINDS {
        let skipped: Vec<&FileInfo> = files
            .iter()
            .filter(|f| f.decision().kind() == kind)
            .collect();
        if skipped.is_empty() {
            continue;
        }

        out.push_str(&format!(
            "<details class=\"skipped\"><summary>{} – {}</summary>\n<ul>\n",
            kind.label(),
            skipped.len()
        ));
        for file in skipped {
            out.push_str(&format!(
                "<li><code>{}</code> <span class=\"size\">({})</span> – {}</li>\n",
                html_escape(&file.display_path()),
                format_file_size(file.size_bytes),
                html_escape(&file.decision().reason())
            ));
        }
        out.push_str("</ul>\n</details>\n");
    }
    out
}

fn file_section(
    file: &FileInfo,
    content: &str,
    highlighter: &dyn Highlighter,
    options: &HtmlOptions,
) -> String {
    let path = file.display_path();
    let rendered = if options.render_markdown && is_markdown(&file.path) {
        format!("<div class=\"markdown\">{}</div>", render_markdown(content))
    } else {
        highlighter.highlight(content, &path, language_tag(&file.path))
    };

    format!(
        "<section class=\"file\" id=\"{}\">\n<h2>{} <span class=\"size\">({})</span></h2>\n{}\n\
         <p class=\"back-top\"><a href=\"#top\">back to top</a></p>\n</section>\n",
        anchor_id(&path),
        html_escape(&path),
        format_file_size(file.size_bytes),
        rendered
    )
}

/// Markdown to HTML; raw HTML from the repository is shown as text and
/// links or images with a scheme other than http, https or mailto point at `#`
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::Start(Tag::Link(kind, dest, title)) => {
            Event::Start(Tag::Link(kind, safe_destination(dest), title))
        }
        Event::Start(Tag::Image(kind, dest, title)) => {
            Event::Start(Tag::Image(kind, safe_destination(dest), title))
        }
        other => other,
    });

    let mut out = String::new();
    pulldown_cmark::html::push_html(&mut out, parser);
    out
}

fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    if is_allowed_destination(&dest) {
        dest
    } else {
        tracing::debug!("Neutralizing markdown link to {:?}", dest.as_ref());
        CowStr::Borrowed("#")
    }
}

/// Relative references and http, https or mailto URLs
fn is_allowed_destination(dest: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme
    let cleaned: String = dest
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    let scheme_end = cleaned.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(idx) if cleaned[idx..].starts_with(':') => {
            let scheme = cleaned[..idx].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    }
}

const VIEW_TOGGLE: &str = "<div class=\"view-toggle\">\n\
<button type=\"button\" id=\"show-human\" class=\"active\" onclick=\"showView('human')\">Human</button>\n\
<button type=\"button\" id=\"show-llm\" onclick=\"showView('llm')\">LLM</button>\n</div>\n";

const VIEW_SCRIPT: &str = r#"
function showView(which) {
  document.getElementById('human-view').hidden = which !== 'human';
  document.getElementById('llm-view').hidden = which !== 'llm';
  document.getElementById('show-human').classList.toggle('active', which === 'human');
  document.getElementById('show-llm').classList.toggle('active', which === 'llm');
}
function copyFlattened() {
  const text = document.getElementById('llm-text');
  text.select();
  navigator.clipboard.writeText(text.value);
}
"#;

const BASE_STYLES: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; padding-top: 56px; color: #24292f; background: #f6f8fa; font-size: 14px; }
.top-nav { position: fixed; top: 0; left: 0; right: 0; height: 56px; display: flex; align-items: center; padding: 0 24px; background: #fff; border-bottom: 1px solid #d0d7de; z-index: 10; }
.nav-brand { font-weight: 600; color: inherit; text-decoration: none; }
.nav-actions { margin-left: auto; display: flex; gap: 12px; }
.nav-btn { padding: 6px 12px; border: 1px solid #d0d7de; border-radius: 6px; color: inherit; text-decoration: none; }
.nav-btn.primary { background: #667eea; border-color: transparent; color: #fff; }
.page { display: grid; grid-template-columns: 300px minmax(0, 1fr); }
#sidebar { position: sticky; top: 56px; height: calc(100vh - 56px); overflow: auto; padding: 12px; background: #fff; border-right: 1px solid #d0d7de; }
#sidebar ul { list-style: none; padding: 0; margin: 0; }
#sidebar li { white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
main { padding: 16px 24px; min-width: 0; }
.size { color: #656d76; font-size: 0.85em; }
.view-toggle button.active { font-weight: 600; }
section.file { background: #fff; border: 1px solid #d0d7de; border-radius: 6px; margin: 16px 0; padding: 8px 16px; }
pre { overflow: auto; background: #f6f8fa; padding: 12px; border-radius: 6px; }
#llm-text { width: 100%; height: 70vh; font-family: ui-monospace, monospace; }
@media (max-width: 768px) { .page { grid-template-columns: 1fr; } #sidebar { position: static; height: auto; } }
"#;
