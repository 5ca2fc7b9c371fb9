//! `new` command: start a digest file for a given day.
//!
//! Writes `content/YYYY-MM-DD.md` with valid frontmatter and the section
//! skeleton the listing page expects, so the author only fills in prose:
//!
//! ```markdown
//! ---
//! title: "News Digest - June 7, 2025"
//! pubDate: "2025-06-07"
//! description: "Daily AI news digest for June 7, 2025."
//! ---
//!
//! # News Digest - June 7, 2025
//!
//! ## 🧠 Summary
//!
//! ...
//! ```

use crate::dates::format_long;
use crate::excerpt::SUMMARY_MARKER;
use crate::naming::digest_file_name;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Digest already exists: {0} (use --force to overwrite)")]
    AlreadyExists(PathBuf),
    #[error("Invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parse a `--date` argument.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, ScaffoldError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ScaffoldError::InvalidDate(value.to_string()))
}

/// Markdown source of a fresh digest for `date`.
pub fn digest_template(date: NaiveDate) -> String {
    let long = format_long(date);
    format!(
        "---\n\
         title: \"News Digest - {long}\"\n\
         pubDate: \"{iso}\"\n\
         description: \"Daily AI news digest for {long}.\"\n\
         ---\n\
         \n\
         # News Digest - {long}\n\
         \n\
         {SUMMARY_MARKER}\n\
         \n\
         One-sentence overview of the day.\n\
         \n\
         ## Top stories\n\
         \n\
         ### Headline\n\
         \n\
         Summary of the story.\n",
        iso = date.format("%Y-%m-%d"),
    )
}

/// Create the digest file for `date` under `root`.
///
/// Creates `root` if needed. An existing file is left alone unless `force`.
pub fn new_digest(root: &Path, date: NaiveDate, force: bool) -> Result<PathBuf, ScaffoldError> {
    fs::create_dir_all(root)?;
    let path = root.join(digest_file_name(date));
    if path.exists() && !force {
        return Err(ScaffoldError::AlreadyExists(path));
    }
    fs::write(&path, digest_template(date))?;
    log::info!("created {}", path.display());
    Ok(path)
}
