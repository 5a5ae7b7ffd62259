use std::process::Command;

/// Abbreviated HEAD of the checkout this binary is built from
fn source_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    Some(rev.trim().to_string()).filter(|r| !r.is_empty())
}

fn main() {
    // Both values end up in `repo-render --version`
    let built_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", built_at);
    println!(
        "cargo:rustc-env=GIT_COMMIT_HASH={}",
        source_revision().unwrap_or_else(|| "unknown".to_string())
    );

    for watched in [".git/HEAD", ".git/refs/heads"] {
        println!("cargo:rerun-if-changed={}", watched);
    }
}
