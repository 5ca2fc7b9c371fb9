//! Frontmatter schema for digest documents.
//!
//! Every digest carries three frontmatter keys:
//!
//! ```yaml
//! ---
//! title: "News Digest - June 7, 2025"
//! pubDate: "2025-06-07"
//! description: "Top AI stories of the day."
//! ---
//! ```
//!
//! [`validate`] turns the deserialized [`RawFrontmatter`] into a checked
//! [`Frontmatter`] or reports the first field that breaks a rule. Lengths are
//! counted in characters, not bytes, so titles with non-ASCII text get the
//! same budget as plain ones.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Which constraint a frontmatter field violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaRule {
    Empty,
    TooLong { max: usize },
    MalformedDate,
}

impl fmt::Display for SchemaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaRule::Empty => write!(f, "must not be empty"),
            SchemaRule::TooLong { max } => write!(f, "must be at most {max} characters"),
            SchemaRule::MalformedDate => write!(f, "must be a date in YYYY-MM-DD format"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{field}` {rule}")]
pub struct SchemaValidationError {
    /// Frontmatter key as authors write it (`title`, `pubDate`, `description`).
    pub field: &'static str,
    pub rule: SchemaRule,
}

impl SchemaValidationError {
    fn new(field: &'static str, rule: SchemaRule) -> Self {
        Self { field, rule }
    }
}

/// Frontmatter exactly as it appears in the file. Extra keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFrontmatter {
    pub title: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub description: String,
}

/// Frontmatter that passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: String,
    pub pub_date: String,
    pub description: String,
}

/// Check a raw frontmatter record against the digest schema.
///
/// Fields are checked in document order (`title`, `pubDate`, `description`)
/// and the first violation wins. Accepted values are returned as-is.
pub fn validate(raw: RawFrontmatter) -> Result<Frontmatter, SchemaValidationError> {
    check_text("title", &raw.title, TITLE_MAX_CHARS)?;
    if !is_iso_date(&raw.pub_date) {
        return Err(SchemaValidationError::new(
            "pubDate",
            SchemaRule::MalformedDate,
        ));
    }
    check_text("description", &raw.description, DESCRIPTION_MAX_CHARS)?;

    Ok(Frontmatter {
        title: raw.title,
        pub_date: raw.pub_date,
        description: raw.description,
    })
}

fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), SchemaValidationError> {
    if value.trim().is_empty() {
        return Err(SchemaValidationError::new(field, SchemaRule::Empty));
    }
    if value.chars().count() > max {
        return Err(SchemaValidationError::new(field, SchemaRule::TooLong { max }));
    }
    Ok(())
}

/// Lexical `YYYY-MM-DD` check. Calendar validity is left to date formatting.
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
