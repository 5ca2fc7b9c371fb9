//! Shared test utilities for the digest-press test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = load(tmp.path()).unwrap();
//!
//! let digest = find_digest(&manifest, "2025-06-07");
//! assert_eq!(digest.pub_date, "2025-06-07");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::Manifest;
use crate::schema::Frontmatter;
use crate::types::Digest;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups and builders
// =========================================================================

/// Find a digest by slug. Panics if not found.
pub fn find_digest<'a>(manifest: &'a Manifest, slug: &str) -> &'a Digest {
    manifest
        .digests
        .iter()
        .find(|d| d.slug == slug)
        .unwrap_or_else(|| panic!("digest '{slug}' not found. Available: {:?}", slugs(manifest)))
}

/// Slugs in manifest order.
pub fn slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.digests.iter().map(|d| d.slug.as_str()).collect()
}

/// A digest built in memory, slug doubling as source file stem.
pub fn digest(slug: &str, title: &str, pub_date: &str, body: &str) -> Digest {
    Digest::new(
        slug.to_string(),
        Frontmatter {
            title: title.to_string(),
            pub_date: pub_date.to_string(),
            description: format!("About {title}"),
        },
        body.to_string(),
        format!("{slug}.md"),
    )
}
