//! Flattened view for pasting into an LLM context window

use crate::scanner::FileInfo;

/// Concatenate included files in path order as CXML documents
///
/// Content is emitted verbatim; only included files appear and they are
/// numbered from 1.
pub fn build_flattened(files: &[FileInfo]) -> String {
    let mut lines = vec!["<documents>".to_string()];

    let included = files
        .iter()
        .filter_map(|f| f.content().map(|content| (f, content)));

    for (index, (file, content)) in included.enumerate() {
        lines.push(format!("<document index=\"{}\">", index + 1));
        lines.push(format!("<source>{}</source>", file.display_path()));
        lines.push("<document_content>".to_string());
        lines.push(content.to_string());
        lines.push("</document_content>".to_string());
        lines.push("</document>".to_string());
    }

    lines.push("</documents>".to_string());
    lines.join("\n")
}
