//! Content loading.
//!
//! First stage of the build. Walks the content directory, splits each
//! markdown file into YAML frontmatter and body, validates the frontmatter
//! and produces a [`Manifest`] the renderer consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                     # Content root
//! ├── config.toml              # Site configuration (optional)
//! ├── assets/                  # Copied to the output root (optional)
//! │   └── og-image.png
//! ├── 2025-06-06.md            # One digest per file
//! ├── 2025-06-07.md
//! └── archive/
//!     └── 2024-12-31.md        # Subdirectories are fine; slug is the stem
//! ```
//!
//! ## Validation
//!
//! Loading is all-or-nothing. Any of these aborts the build before a single
//! page is written:
//! - a file without a `---` frontmatter block
//! - frontmatter that is not YAML or lacks `title`/`pubDate`/`description`
//! - frontmatter that breaks the [`schema`](crate::schema) rules
//! - two files that slugify to the same slug, or a stem with no usable slug

use crate::config::{self, SiteConfig};
use crate::naming;
use crate::schema::{self, RawFrontmatter, SchemaValidationError};
use crate::types::Digest;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("No frontmatter block in {0}")]
    MissingFrontmatter(PathBuf),
    #[error("Invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Schema violation in {path}: {source}")]
    Schema {
        path: PathBuf,
        source: SchemaValidationError,
    },
    #[error("Cannot derive a slug from {0}")]
    EmptySlug(PathBuf),
    #[error("Duplicate slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Everything the renderer needs.
#[derive(Debug)]
pub struct Manifest {
    /// Digests in load order (sorted relative path)
    pub digests: Vec<Digest>,
    pub config: SiteConfig,
    /// `assets/` under the content root, if present
    pub assets_dir: Option<PathBuf>,
}

const ASSETS_DIR: &str = "assets";

pub fn load(root: &Path) -> Result<Manifest, ContentError> {
    let config = config::load_config(root)?;
    let digests = load_digests(root)?;

    let assets = root.join(ASSETS_DIR);
    let assets_dir = assets.is_dir().then_some(assets);

    log::info!("loaded {} digests from {}", digests.len(), root.display());
    Ok(Manifest {
        digests,
        config,
        assets_dir,
    })
}

fn load_digests(root: &Path) -> Result<Vec<Digest>, ContentError> {
    let mut digests = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e.path(), root));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let digest = load_digest(path, &rel_path)?;

        if let Some(first) = seen.get(&digest.slug) {
            return Err(ContentError::DuplicateSlug {
                slug: digest.slug,
                first: first.clone(),
                second: rel_path,
            });
        }
        seen.insert(digest.slug.clone(), rel_path);

        log::debug!("loaded {} as /{}", digest.source_path, digest.slug);
        digests.push(digest);
    }

    Ok(digests)
}

/// Read and validate a single digest file.
fn load_digest(path: &Path, rel_path: &Path) -> Result<Digest, ContentError> {
    let content = fs::read_to_string(path)?;
    let (frontmatter, body) = split_frontmatter(&content)
        .ok_or_else(|| ContentError::MissingFrontmatter(rel_path.to_path_buf()))?;

    let raw: RawFrontmatter =
        serde_yaml::from_str(frontmatter).map_err(|source| ContentError::Frontmatter {
            path: rel_path.to_path_buf(),
            source,
        })?;
    let frontmatter = schema::validate(raw).map_err(|source| ContentError::Schema {
        path: rel_path.to_path_buf(),
        source,
    })?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let slug = naming::slugify(&stem);
    if slug.is_empty() {
        return Err(ContentError::EmptySlug(rel_path.to_path_buf()));
    }

    Ok(Digest::new(
        slug,
        frontmatter,
        body.to_string(),
        rel_path.to_string_lossy().to_string(),
    ))
}

/// Split `---`-delimited frontmatter from the body.
///
/// The opening delimiter must be the first line. Returns `None` when the
/// file does not start with one or it is never closed.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    if lines.next()?.trim_end() != "---" {
        return None;
    }

    let fm_start = content.find('\n')? + 1;
    let mut offset = fm_start;
    for line in lines {
        if line.trim_end() == "---" {
            let frontmatter = &content[fm_start..offset];
            let body = &content[offset + line.len()..];
            return Some((frontmatter, body));
        }
        offset += line.len();
    }
    None
}

/// Hidden entries and the assets directory are not content.
fn is_skipped(path: &Path, root: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.starts_with('.') || path == root.join(ASSETS_DIR)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}
