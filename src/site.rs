//! Site configuration assembly.
//!
//! Combines the static values from [`SiteConfig`] with sidebar groups built
//! from disk into the [`Manifest`] handed to the documentation renderer.
//! Static values are copied verbatim. Each sidebar route's sections are run
//! through one [`SidebarBuilder`], in declared order, and the first failing
//! folder aborts the whole assembly.
//!
//! ## Output Shape
//!
//! ```json
//! {
//!   "base": "/vue-3-guide/",
//!   "title": "Codeworks Download",
//!   "description": "Learn Vue 3 with Auth0",
//!   "head": [["meta", { "name": "theme-color", "content": "#3eaf7c" }]],
//!   "themeConfig": {
//!     "editLinks": false,
//!     "editLinkText": "",
//!     "lastUpdated": false,
//!     "nav": [{ "text": "Resources", "link": "/resources/" }],
//!     "sidebar": {
//!       "/resources/": [
//!         { "title": "Getting Started", "children": ["", "intro.md"] }
//!       ]
//!     }
//!   },
//!   "plugins": ["@vuepress/plugin-back-to-top"]
//! }
//! ```
//!
//! Sidebar routes are emitted in config order, not sorted.

use crate::config::{self, ConfigError, HeadTag, NavLink, SiteConfig};
use crate::listing::DirectoryLister;
use crate::sidebar::{SectionError, SidebarBuilder, SidebarGroup};
use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Sidebar {route}: {source}")]
    Sidebar {
        route: String,
        #[source]
        source: SectionError,
    },
}

/// The assembled configuration object consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub base: String,
    pub title: String,
    pub description: String,
    pub head: Vec<HeadEntry>,
    #[serde(rename = "themeConfig")]
    pub theme_config: ThemeManifest,
    pub plugins: Vec<String>,
}

/// A head tag as `[tag, attrs]`, attributes in config order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadEntry(pub String, pub IndexMap<String, String>);

impl From<&HeadTag> for HeadEntry {
    fn from(tag: &HeadTag) -> Self {
        Self(tag.tag.clone(), tag.attrs.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeManifest {
    pub edit_links: bool,
    pub edit_link_text: String,
    pub last_updated: bool,
    pub nav: Vec<NavLink>,
    pub sidebar: Sidebar,
}

/// Route prefix → sidebar groups, in config order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sidebar {
    routes: Vec<(String, Vec<SidebarGroup>)>,
}

impl Sidebar {
    pub fn get(&self, route: &str) -> Option<&[SidebarGroup]> {
        self.routes
            .iter()
            .find(|(r, _)| r == route)
            .map(|(_, groups)| groups.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarGroup])> {
        self.routes
            .iter()
            .map(|(r, groups)| (r.as_str(), groups.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Serialize for Sidebar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.routes.len()))?;
        for (route, groups) in &self.routes {
            map.serialize_entry(route, groups)?;
        }
        map.end()
    }
}

/// Load `docsite.toml` from `root` and assemble the site against it.
pub fn load(root: &Path) -> Result<Manifest, SiteError> {
    let config = config::load_config(root)?;
    assemble(root, &config)
}

/// Assemble the site, scanning sidebar folders under `root`.
pub fn assemble(root: &Path, config: &SiteConfig) -> Result<Manifest, SiteError> {
    assemble_with(&SidebarBuilder::new(root), config)
}

/// Assemble the site using an existing builder.
pub fn assemble_with<L: DirectoryLister>(
    builder: &SidebarBuilder<L>,
    config: &SiteConfig,
) -> Result<Manifest, SiteError> {
    let routes = config
        .theme
        .sidebar
        .iter()
        .map(|route| -> Result<(String, Vec<SidebarGroup>), SiteError> {
            let groups = builder
                .build_all(&route.sections)
                .map_err(|source| SiteError::Sidebar {
                    route: route.route.clone(),
                    source,
                })?;
            Ok((route.route.clone(), groups))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        root = %builder.docs_root().display(),
        routes = routes.len(),
        "Assembled site sidebar"
    );

    Ok(Manifest {
        base: config.base.clone(),
        title: config.title.clone(),
        description: config.description.clone(),
        head: config.head.iter().map(HeadEntry::from).collect(),
        theme_config: ThemeManifest {
            edit_links: config.theme.edit_links,
            edit_link_text: config.theme.edit_link_text.clone(),
            last_updated: config.theme.last_updated,
            nav: config.theme.nav.clone(),
            sidebar: Sidebar { routes },
        },
        plugins: config.plugins.clone(),
    })
}
