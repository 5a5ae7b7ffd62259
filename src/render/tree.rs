//! Text rendering of the collected paths as a directory tree

use crate::scanner::FileInfo;
use std::collections::BTreeMap;

#[derive(Default)]
struct Node {
    children: BTreeMap<String, Node>,
}

/// Render every collected path (included or not) as an indented tree
pub fn directory_tree(root_name: &str, files: &[FileInfo]) -> String {
    let mut root = Node::default();
    for file in files {
        let mut node = &mut root;
        for segment in file.path.components() {
            node = node
                .children
                .entry(segment.as_os_str().to_string_lossy().into_owned())
                .or_default();
        }
    }

    let mut out = format!("{}/\n", root_name);
    write_children(&root, "", &mut out);
    out
}

fn write_children(node: &Node, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { "└── " } else { "├── " };
        let suffix = if child.children.is_empty() { "" } else { "/" };
        out.push_str(&format!("{}{}{}{}\n", prefix, branch, name, suffix));

        if !child.children.is_empty() {
            let extension = if last { "    " } else { "│   " };
            write_children(child, &format!("{}{}", prefix, extension), out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> FileInfo {
        FileInfo::included(path, format!("/r/{}", path), 0, String::new())
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(directory_tree("repo", &[]), "repo/\n");
    }

    #[test]
    fn test_nested_tree() {
        let files = vec![
            file("README.md"),
            file("src/lib.rs"),
            file("src/scanner/mod.rs"),
            file("tests/it.rs"),
        ];
        let expected = "\
repo/
├── README.md
├── src/
│   ├── lib.rs
│   └── scanner/
│       └── mod.rs
└── tests/
    └── it.rs
";
        assert_eq!(directory_tree("repo", &files), expected);
    }
}
