//! CLI output formatting.
//!
//! Output is **information-centric, not file-centric**: each digest is shown
//! by position and title, with its source file and excerpt as indented
//! context lines. This reads as a content inventory while still letting
//! authors trace every entry back to a file.
//!
//! # Output Format
//!
//! ## Load (`check`, and the first half of `build`)
//!
//! ```text
//! Digests
//! 001 News Digest - June 7, 2025 (June 7, 2025)
//!     Source: 2025-06-07.md
//!     Excerpt: A surprise acquisition topped a busy Saturday...
//! 002 News Digest - June 6, 2025 (June 6, 2025)
//!     Source: 2025-06-06.md
//!     Excerpt: Two labs shipped new models while policy news...
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 News Digest - June 7, 2025 → digests/2025-06-07/index.html
//! 002 News Digest - June 6, 2025 → digests/2025-06-06/index.html
//!
//! Generated 2 digest pages, 1 asset
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::content::Manifest;
use crate::dates::format_pub_date;
use crate::excerpt;
use crate::generate::{GenerateReport, sorted_by_date};
use std::path::Path;

const EXCERPT_PREVIEW_CHARS: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

pub fn format_load_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Digests".to_string()];

    if manifest.digests.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }

    for (idx, digest) in sorted_by_date(&manifest.digests).iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(idx + 1),
            digest.title,
            format_pub_date(&digest.pub_date)
        ));
        lines.push(format!("{}Source: {}", indent(1), digest.source_path));

        let preview = excerpt::extract(&digest.body);
        if !preview.is_empty() {
            let single_line = preview.split_whitespace().collect::<Vec<_>>().join(" ");
            lines.push(format!(
                "{}Excerpt: {}",
                indent(1),
                truncate_desc(&single_line, EXCERPT_PREVIEW_CHARS)
            ));
        }
    }

    let has_config = source_root.join("config.toml").exists();
    if has_config || manifest.assets_dir.is_some() {
        lines.push(String::new());
        lines.push("Config".to_string());
        if has_config {
            lines.push(format!("{}config.toml", indent(1)));
        }
        if manifest.assets_dir.is_some() {
            lines.push(format!("{}assets/", indent(1)));
        }
    }

    lines
}

pub fn print_load_output(manifest: &Manifest, source_root: &Path) {
    for line in format_load_output(manifest, source_root) {
        println!("{}", line);
    }
}

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pages = report.pages.iter();

    if let Some(home) = pages.next() {
        lines.push(format!("Home → {}", home.file));
    }
    let mut digest_pages = 0;
    for (idx, page) in pages.enumerate() {
        lines.push(format!("{} {} → {}", format_index(idx + 1), page.title, page.file));
        digest_pages += 1;
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(digest_pages, "digest page"),
        plural(report.assets_copied, "asset")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}
