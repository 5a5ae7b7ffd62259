//! Language tags for syntax highlighting, guessed from file names

use std::path::Path;

/// Highlighting tag for a file extension (lowercase identifiers such as `rust`)
pub fn tag_for_extension(extension: &str) -> Option<&'static str> {
    let tag = match extension.to_lowercase().as_str() {
        // Programming languages
        "rs" => "rust",
        "py" | "pyi" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" | "mts" | "cts" => "typescript",
        "jsx" => "jsx",
        "tsx" => "tsx",
        "java" => "java",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" => "cpp",
        "c" | "h" => "c",
        "cs" => "csharp",
        "go" => "go",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "kt" | "kts" => "kotlin",
        "scala" => "scala",
        "lua" => "lua",
        "sh" | "bash" | "zsh" => "bash",
        "ps1" => "powershell",
        "sql" => "sql",

        // Web technologies
        "html" | "htm" => "html",
        "css" => "css",
        "scss" | "sass" => "scss",
        "vue" => "vue",
        "svg" => "xml",

        // Data formats and config files
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        "ini" | "cfg" | "conf" => "ini",
        "proto" => "protobuf",

        // Documentation formats
        "md" | "markdown" => "markdown",
        "rst" => "rst",
        "tex" => "latex",
        "txt" => "text",

        _ => return None,
    };

    Some(tag)
}

/// Highlighting tag for a file path, covering well-known extensionless names
pub fn language_tag(path: &Path) -> Option<&'static str> {
    let name = path.file_name().and_then(|n| n.to_str())?;
    match name {
        "Dockerfile" | "Containerfile" => return Some("dockerfile"),
        "Makefile" | "GNUmakefile" | "makefile" => return Some("makefile"),
        "CMakeLists.txt" => return Some("cmake"),
        _ => {}
    }
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(tag_for_extension)
}

pub fn is_markdown(path: &Path) -> bool {
    language_tag(path) == Some("markdown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_for_common_languages() {
        assert_eq!(tag_for_extension("rs"), Some("rust"));
        assert_eq!(tag_for_extension("py"), Some("python"));
        assert_eq!(tag_for_extension("mjs"), Some("javascript"));
        assert_eq!(tag_for_extension("tsx"), Some("tsx"));
        assert_eq!(tag_for_extension("h"), Some("c"));
        assert_eq!(tag_for_extension("hpp"), Some("cpp"));
    }

    #[test]
    fn test_tag_for_data_formats() {
        assert_eq!(tag_for_extension("yml"), Some("yaml"));
        assert_eq!(tag_for_extension("toml"), Some("toml"));
        assert_eq!(tag_for_extension("conf"), Some("ini"));
    }

    #[test]
    fn test_tag_case_insensitive() {
        assert_eq!(tag_for_extension("RS"), Some("rust"));
        assert_eq!(tag_for_extension("Md"), Some("markdown"));
    }

    #[test]
    fn test_tag_unknown() {
        assert_eq!(tag_for_extension("xyz"), None);
        assert_eq!(tag_for_extension(""), None);
    }

    #[test]
    fn test_language_tag_special_filenames() {
        assert_eq!(language_tag(Path::new("docker/Dockerfile")), Some("dockerfile"));
        assert_eq!(language_tag(Path::new("Makefile")), Some("makefile"));
        assert_eq!(language_tag(Path::new("CMakeLists.txt")), Some("cmake"));
        assert_eq!(language_tag(Path::new("LICENSE")), None);
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("docs/README.md")));
        assert!(!is_markdown(Path::new("src/main.rs")));
    }
}
