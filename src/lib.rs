//! # docsite
//!
//! Assembles the configuration object of a static documentation site. Site
//! metadata, head tags, navigation links and plugins come straight from
//! `docsite.toml`; the sidebar is generated by scanning folders of markdown
//! files on disk.
//!
//! ```text
//! docs/docsite.toml  ──load──▶  SiteConfig  ──assemble──▶  Manifest  ──▶  config.json
//!                                   │                          ▲
//!                                   └── sidebar sections ──────┘
//!                                       (one folder scan each)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sidebar`] | Turns one markdown folder into a [`sidebar::SidebarGroup`] |
//! | [`listing`] | Directory listing backend used by the sidebar builder |
//! | [`config`] | `docsite.toml` loading, merging onto defaults, validation |
//! | [`site`] | Builds the renderer-facing [`site::Manifest`] |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Filesystem Orders the Sidebar
//!
//! Pages within a group appear in directory listing order. Nothing is sorted,
//! so two machines can produce different orders for the same tree. Name files
//! with numeric prefixes and keep to filesystems that list alphabetically if
//! order matters.
//!
//! ## README Is the Index
//!
//! `README.md` (any case) is never a child page. A top-level section links to
//! it through the empty-string entry that starts its group; nested sections
//! do not link it at all.
//!
//! ## No Hidden State
//!
//! [`sidebar::SidebarBuilder`] takes the documentation root as a value and
//! reads the directory on every call. Nothing is cached between calls.

pub mod config;
pub mod listing;
pub mod output;
pub mod sidebar;
pub mod site;

#[cfg(test)]
pub(crate) mod test_helpers;
