//! # digest-press
//!
//! A minimal static site generator for daily news digests. Each markdown
//! file in the content directory is one digest; the site is a listing page
//! plus one page per digest.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Load      content/  →  Manifest   (files → validated digests + config)
//! 2. Generate  Manifest  →  dist/      (final HTML site)
//! ```
//!
//! Loading is all-or-nothing: every digest's frontmatter is validated
//! against the [`schema`] before generation starts, so a bad file never
//! produces a half-written site.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Stage 1 — walks the content directory, splits frontmatter, validates |
//! | [`generate`] | Stage 2 — renders the listing and digest pages using Maud |
//! | [`schema`] | Frontmatter rules: title, `pubDate`, description |
//! | [`excerpt`] | Listing-card preview text from a digest body |
//! | [`theme`] | Light/dark toggle state and the browser script that implements it |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`dates`] | `Month D, YYYY` formatting |
//! | [`naming`] | Slugs, digest filenames, page URLs |
//! | [`scaffold`] | `new` command — creates a digest file for a day |
//! | [`types`] | The [`types::Digest`] record shared by both stages |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `env_logger` setup |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error, interpolation is escaped by default, and there is no
//! template directory to ship.
//!
//! ## Date-Named Files
//!
//! One digest per day, named `YYYY-MM-DD.md`. The file stem is the slug, so
//! URLs are stable and predictable (`/digests/2025-06-07/`).
//!
//! ## No Runtime Beyond the Toggle
//!
//! The published site is plain HTML with inline CSS. The only JavaScript is
//! the dark-mode toggle, a few lines that remember the visitor's choice.

pub mod config;
pub mod content;
pub mod dates;
pub mod excerpt;
pub mod generate;
pub mod logging;
pub mod naming;
pub mod output;
pub mod scaffold;
pub mod schema;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
