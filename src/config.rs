//! Site configuration module.
//!
//! Handles loading, validating, and merging `docsite.toml`. The file lives in
//! the documentation root and is layered on top of stock defaults, so it only
//! needs the keys it wants to set.
//!
//! ## Configuration Options
//!
//! ```toml
//! base = "/"                  # Public path the site is served under
//! title = ""                  # Site title
//! description = ""            # Meta description
//! plugins = []                # Plugin names, passed to the renderer as-is
//!
//! [[head]]                    # Extra tags injected into <head>
//! tag = "meta"
//! attrs = { name = "theme-color", content = "#3eaf7c" }
//!
//! [theme]
//! edit_links = false
//! edit_link_text = ""
//! last_updated = false
//!
//! [[theme.nav]]               # Top navigation links
//! text = "Guide"
//! link = "/guide/"            # Internal path or absolute URL
//!
//! [[theme.sidebar]]           # One entry per route prefix
//! route = "/guide/"
//! sections = [
//!     { folder = "guide", title = "Getting Started" },
//!     { folder = "guide/advanced", title = "Advanced" },
//! ]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::sidebar::SidebarSection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the documentation root.
pub const CONFIG_FILE: &str = "docsite.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `docsite.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public path the site is deployed under. Starts and ends with `/`.
    pub base: String,
    pub title: String,
    pub description: String,
    /// Extra tags injected into every page's `<head>`.
    pub head: Vec<HeadTag>,
    pub theme: ThemeConfig,
    /// Renderer plugin names.
    pub plugins: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            title: String::new(),
            description: String::new(),
            head: Vec::new(),
            theme: ThemeConfig::default(),
            plugins: Vec::new(),
        }
    }
}

/// A `<head>` tag: element name plus attributes in written order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadTag {
    pub tag: String,
    #[serde(default)]
    pub attrs: IndexMap<String, String>,
}

/// Theme settings and navigation data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub edit_links: bool,
    pub edit_link_text: String,
    pub last_updated: bool,
    pub nav: Vec<NavLink>,
    pub sidebar: Vec<SidebarRoute>,
}

/// Top navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub text: String,
    /// Internal path (`/guide/`) or absolute URL.
    pub link: String,
}

impl NavLink {
    /// Whether the link carries a URI scheme (`https:`, `mailto:`, `tel:`, ...).
    pub fn is_external(&self) -> bool {
        has_uri_scheme(&self.link)
    }
}

/// `scheme ":" ...` where scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn has_uri_scheme(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Sidebar sections shown under one route prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarRoute {
    /// Route prefix, e.g. `/resources/`.
    pub route: String,
    /// Folders to scan, in display order.
    #[serde(default)]
    pub sections: Vec<SidebarSection>,
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_slash_delimited(&self.base) {
            return Err(ConfigError::Validation(format!(
                "base must start and end with '/': {:?}",
                self.base
            )));
        }
        for tag in &self.head {
            if tag.tag.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "head tag name must not be empty".into(),
                ));
            }
        }
        for nav in &self.theme.nav {
            validate_nav_link(nav)?;
        }
        let mut routes = HashSet::new();
        for route in &self.theme.sidebar {
            if !is_slash_delimited(&route.route) {
                return Err(ConfigError::Validation(format!(
                    "sidebar route must start and end with '/': {:?}",
                    route.route
                )));
            }
            if !routes.insert(route.route.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate sidebar route {:?}",
                    route.route
                )));
            }
            for section in &route.sections {
                validate_folder(&section.folder)?;
            }
        }
        Ok(())
    }
}

fn is_slash_delimited(s: &str) -> bool {
    s.starts_with('/') && s.ends_with('/')
}

fn validate_nav_link(nav: &NavLink) -> Result<(), ConfigError> {
    if nav.text.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "nav link text must not be empty (link {:?})",
            nav.link
        )));
    }
    if !nav.is_external() && !nav.link.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "nav link {:?} must be an absolute URL or start with '/'",
            nav.link
        )));
    }
    Ok(())
}

/// A section folder is a relative `/`-separated path with no empty, `.` or
/// `..` segments. The last segment becomes the page prefix, so a trailing
/// `/` would silently turn a nested folder into a top-level one.
fn validate_folder(folder: &str) -> Result<(), ConfigError> {
    let bad = folder.is_empty()
        || folder
            .split('/')
            .any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if bad {
        return Err(ConfigError::Validation(format!(
            "sidebar folder must be a relative path without empty, '.' or '..' segments: {folder:?}"
        )));
    }
    Ok(())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
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

/// Load `docsite.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `docsite.toml` in the documentation root.
///
/// Uses stock defaults when the file is absent.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(root)?;
    if overlay.is_none() {
        tracing::debug!(root = %root.display(), file = CONFIG_FILE, "No config file, using defaults");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `docsite.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docsite configuration
# ======================
# Place this file in the documentation root as docsite.toml.
# All settings are optional; unknown keys cause an error.

# Public path the site is served under. Must start and end with "/".
base = "/vue-3-guide/"

title = "Codeworks Download"
description = "Learn Vue 3 with Auth0"

# Renderer plugins, passed through unchanged.
plugins = [
    "@vuepress/plugin-back-to-top",
    "@vuepress/plugin-medium-zoom",
    "@vuepress/nprogress",
]

# ---------------------------------------------------------------------------
# Extra tags injected into every page's <head>
# ---------------------------------------------------------------------------
[[head]]
tag = "meta"
attrs = { name = "theme-color", content = "#3eaf7c" }

[[head]]
tag = "meta"
attrs = { name = "apple-mobile-web-app-capable", content = "yes" }

[[head]]
tag = "meta"
attrs = { name = "apple-mobile-web-app-status-bar-style", content = "black" }

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
edit_links = false
edit_link_text = ""
last_updated = false

# Top navigation. Links are internal paths or absolute URLs.
[[theme.nav]]
text = "Resources"
link = "/resources/"

[[theme.nav]]
text = "Codeworks"
link = "https://boisecodeworks.com"

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
# Each section folder (relative to the documentation root) becomes one
# sidebar group listing its .md files, README.md excluded. A top-level
# folder also links its own index page. Pages keep directory listing order.
[[theme.sidebar]]
route = "/resources/"
sections = [
    { folder = "resources", title = "Getting Started" },
    { folder = "resources/01-changes", title = "Vue 3 Breaking Changes" },
    { folder = "resources/02-new", title = "Vue 3 Whats New?" },
    { folder = "resources/03-auth0", title = "Auth0 Identity" },
    { folder = "resources/04-demo", title = "Demo" },
]
"##
}
