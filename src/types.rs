//! Shared types passed from the loader to the renderer.

use crate::schema::Frontmatter;

/// One validated digest document.
///
/// Built only by [`crate::content::load`], after its frontmatter passed
/// [`crate::schema::validate`]. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    /// URL slug (slugified file stem), unique within a site
    pub slug: String,
    pub title: String,
    /// `YYYY-MM-DD`; sorts chronologically as a plain string
    pub pub_date: String,
    pub description: String,
    /// Raw markdown after the frontmatter block
    pub body: String,
    /// Path relative to the content root, for messages
    pub source_path: String,
}

impl Digest {
    pub fn new(slug: String, frontmatter: Frontmatter, body: String, source_path: String) -> Self {
        Self {
            slug,
            title: frontmatter.title,
            pub_date: frontmatter.pub_date,
            description: frontmatter.description,
            body,
            source_path,
        }
    }
}
