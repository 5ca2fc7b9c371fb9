//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root next to the digests and is entirely optional:
//!
//! ```text
//! content/
//! ├── config.toml          # Site config (optional)
//! ├── assets/              # Copied verbatim to the output root
//! ├── 2025-06-06.md
//! └── 2025-06-07.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Daily AI News Digest"
//! description = "AI-generated summaries of the day's most important stories."
//! base_url = "https://example.com"
//!
//! [colors.light]
//! background = "#f8fafc"
//! text = "#0f172a"
//! text_muted = "#64748b"    # Dates, footer, "read more" links
//! border = "#e2e8f0"
//! link = "#2563eb"
//! link_hover = "#1d4ed8"
//! card_background = "#ffffff"
//!
//! [colors.dark]
//! background = "#0f172a"
//! text = "#e2e8f0"
//! text_muted = "#94a3b8"
//! border = "#1e293b"
//! link = "#60a5fa"
//! link_hover = "#93c5fd"
//! card_background = "#1e293b"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used in page heads, header and footer.
    pub site: SiteMeta,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are usable for rendering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        let url = &self.site.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Shown in the header and appended to every page title.
    pub title: String,
    /// Meta description of the listing page.
    pub description: String,
    /// Absolute origin used for canonical and Open Graph URLs.
    pub base_url: String,
}

impl SiteMeta {
    /// Absolute URL for a site-relative path (`/digests/x/`).
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Daily AI News Digest".to_string(),
            description: "AI-generated summaries of the day's most important stories."
                .to_string(),
            base_url: "https://example.com".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text (dates, footer, "read more" links).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Background of digest cards on the listing page.
    pub card_background: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            link: "#2563eb".to_string(),
            link_hover: "#1d4ed8".to_string(),
            card_background: "#ffffff".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0f172a".to_string(),
            text: "#e2e8f0".to_string(),
            text_muted: "#94a3b8".to_string(),
            border: "#1e293b".to_string(),
            link: "#60a5fa".to_string(),
            link_hover: "#93c5fd".to_string(),
            card_background: "#1e293b".to_string(),
        }
    }

    fn css_variables(&self) -> String {
        format!(
            "--color-bg: {};\n    --color-text: {};\n    --color-text-muted: {};\n    \
             --color-border: {};\n    --color-link: {};\n    --color-link-hover: {};\n    \
             --color-card-bg: {};",
            self.background,
            self.text,
            self.text_muted,
            self.border,
            self.link,
            self.link_hover,
            self.card_background,
        )
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. The merge is required: `ColorScheme` has one
/// `Default` (light), so deserializing a sparse `[colors.dark]` table
/// directly would fill its missing keys with light colors.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    log::debug!("loaded site config for {:?}", config.site.title);
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# digest-press configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the root of the content directory (content/config.toml).
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Shown in the header, the footer, and after " | " in every page title.
title = "Daily AI News Digest"

# Meta/Open Graph description of the listing page.
description = "AI-generated summaries of the day's most important stories."

# Absolute origin for canonical and Open Graph URLs.
base_url = "https://example.com"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
text = "#0f172a"
text_muted = "#64748b"    # Dates, footer, "read more" links
border = "#e2e8f0"
link = "#2563eb"
link_hover = "#1d4ed8"
card_background = "#ffffff"

# ---------------------------------------------------------------------------
# Colors - Dark mode (toggled by the header button, defaults to the system
# preference)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0f172a"
text = "#e2e8f0"
text_muted = "#94a3b8"
border = "#1e293b"
link = "#60a5fa"
link_hover = "#93c5fd"
card_background = "#1e293b"
"##
}

/// Generate CSS custom properties from color config.
///
/// Light colors sit on `:root`; dark colors apply when the theme script puts
/// `dark_class` on `<html>`.
pub fn generate_color_css(colors: &ColorConfig, dark_class: &str) -> String {
    format!(
        ":root {{\n    {light}\n}}\n\nhtml.{dark_class} {{\n    {dark}\n    color-scheme: dark;\n}}",
        light = colors.light.css_variables(),
        dark = colors.dark.css_variables(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_site_identity() {
        let config = SiteConfig::default();
        assert_eq!(config.site.title, "Daily AI News Digest");
        assert_eq!(config.site.base_url, "https://example.com");
    }

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#f8fafc");
        assert_eq!(config.colors.dark.background, "#0f172a");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.light.background, "#fafafa");
        assert_eq!(config.colors.light.text, "#0f172a");
        assert_eq!(config.site.title, "Daily AI News Digest");
    }

    #[test]
    fn absolute_url_joins_without_double_slash() {
        let mut site = SiteMeta::default();
        site.base_url = "https://news.example.org/".to_string();
        assert_eq!(
            site.absolute_url("/digests/2025-06-07/"),
            "https://news.example.org/digests/2025-06-07/"
        );
        assert_eq!(site.absolute_url("/"), "https://news.example.org/");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors, "dark");
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
        assert!(css.contains("html.dark {"));
        assert!(css.contains("--color-card-bg:"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Daily AI News Digest");
        assert_eq!(config.colors.dark.background, "#0f172a");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[site]
title = "Morning Brief"
base_url = "https://brief.example.org"

[colors.dark]
link = "#ff00ff"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Morning Brief");
        assert_eq!(config.site.base_url, "https://brief.example.org");
        assert_eq!(config.colors.dark.link, "#ff00ff");
        // Unspecified values stay at their defaults
        assert_eq!(
            config.site.description,
            "AI-generated summaries of the day's most important stories."
        );
        assert_eq!(config.colors.dark.text, "#e2e8f0");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site\ntitle = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\ntitel = \"typo\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[images]\nquality = 90\n");
        assert!(result.is_err());
    }

    #[test]
    fn sparse_dark_table_keeps_dark_defaults() {
        let sparse = "[colors.dark]\nlink = \"#ff00ff\"\n";

        // Direct deserialization falls back to the light scheme
        let direct: SiteConfig = toml::from_str(sparse).unwrap();
        assert_eq!(direct.colors.dark.background, "#f8fafc");

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), sparse).unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.colors.dark.link, "#ff00ff");
        assert_eq!(config.colors.dark.background, "#0f172a");
        assert_eq!(config.colors.dark.card_background, "#1e293b");
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_tables() {
        let base: toml::Value =
            toml::from_str("[colors.light]\ntext = \"#000\"\nlink = \"#00f\"").unwrap();
        let overlay: toml::Value = toml::from_str("[colors.light]\nlink = \"#f00\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["colors"]["light"]["text"].as_str(), Some("#000"));
        assert_eq!(merged["colors"]["light"]["link"].as_str(), Some("#f00"));
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_title() {
        let mut config = SiteConfig::default();
        config.site.title = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_relative_base_url() {
        let mut config = SiteConfig::default();
        config.site.base_url = "example.com".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config.site.title, SiteConfig::default().site.title);
        assert_eq!(config.colors.dark.card_background, "#1e293b");
    }
}
