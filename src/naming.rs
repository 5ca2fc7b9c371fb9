//! Slugs, content filenames and site URLs.
//!
//! Digest files are named after their publish date (`2025-06-07.md`), so the
//! slug is almost always the date itself. Files named any other way are
//! still accepted; their stem is slugified:
//!
//! - `2025-06-07.md` → `2025-06-07`
//! - `Weekly Wrap_Up.md` → `weekly-wrap_up`
//! - `AI & Robots!.md` → `ai-robots`

use chrono::NaiveDate;

/// Convert text to a URL-safe slug.
///
/// Lowercases, drops everything except word characters, whitespace and
/// dashes, then collapses runs of whitespace/dashes into a single `-`.
/// Leading and trailing dashes are removed.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for c in lowered.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_dash = true;
        }
    }
    slug
}

/// Content filename for a digest published on `date`.
pub fn digest_file_name(date: NaiveDate) -> String {
    format!("{}.md", date.format("%Y-%m-%d"))
}

/// Site-relative URL of a digest's detail page.
pub fn digest_url(slug: &str) -> String {
    format!("/digests/{slug}/")
}
