//! # repo-render - a repository on a single page
//!
//! Turns a checked-out repository into one navigable HTML document with a
//! sidebar of files and syntax-highlighting hooks, plus a flattened CXML
//! concatenation of the same files for pasting into an LLM context window.
//!
//! ## Overview
//!
//! The heart of the crate is the file collection engine in [`scanner`]. It
//! walks the checkout, prunes excluded directories before descending into
//! them, and records one explainable [`scanner::InclusionDecision`] per file.
//! The renderers in [`render`] only consume that output.
//!
//! ```text
//! PathClassifier -> FileInspector -> TreeWalker -> summarize -> render::{html, flatten}
//! ```
//!
//! ## Resource limits
//!
//! `max_bytes` caps the size of each rendered file, but nothing caps the
//! total. A repository with many files just under the limit produces a large
//! page; callers rendering untrusted repositories should bound the checkout
//! size before scanning. The walk has no internal cancellation point either,
//! so time limits must be imposed from outside.
//!
//! ## Usage Example
//!
//! ```no_run
//! use repo_render::config::Config;
//! use repo_render::pipeline::{Checkout, render_checkout};
//! use repo_render::render::PlainHighlighter;
//!
//! fn main() -> anyhow::Result<()> {
//!     let checkout = Checkout::local("/tmp/checkout");
//!     let rendered = render_checkout(
//!         &checkout,
//!         "https://github.com/owner/repo",
//!         &Config::default(),
//!         &PlainHighlighter,
//!     )?;
//!     std::fs::write("repo.html", rendered.html)?;
//!     Ok(())
//! }
//! ```

/// Bounded, expiring store of rendered repositories
pub mod cache;

/// Configuration management with environment variable overrides
pub mod config;

/// Error types
pub mod error;

/// Platform config file location
pub mod paths;

/// Scan-and-render orchestration for one checkout
pub mod pipeline;

/// HTML and flattened views
pub mod render;

/// Repository identity and formatting helpers
pub mod repo;

/// File walking, classification and statistics
pub mod scanner;
