//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Site
//!     Title: Codeworks Download
//!     Base: /vue-3-guide/
//!
//! Nav
//! 001 Resources → /resources/
//! 002 Codeworks → https://boisecodeworks.com (external)
//!
//! Sidebar /resources/
//! 001 Getting Started (1 page)
//!     (index)
//!     intro.md
//! 002 Vue 3 Breaking Changes (2 pages)
//!     01-changes/01-filters.md
//!     01-changes/02-v-model.md
//!
//! Plugins
//!     @vuepress/nprogress
//!
//! 1 route, 5 groups, 9 pages
//! ```
//!
//! Format functions return `Vec<String>` and do no I/O. The `print_*`
//! wrappers write to stdout.

use crate::sidebar::SidebarGroup;
use crate::site::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format one sidebar group: header line plus one line per child.
///
/// ```text
/// 001 Getting Started (1 page)
///     (index)
///     intro.md
/// ```
pub fn format_group(index: usize, group: &SidebarGroup) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} ({})",
        format_index(index),
        group.title,
        plural(group.pages().count(), "page")
    )];
    if group.has_index() {
        lines.push(format!("{}(index)", indent(1)));
    }
    for page in group.pages() {
        lines.push(format!("{}{}", indent(1), page));
    }
    lines
}

/// Format the assembled site as a content inventory.
pub fn format_site_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Site".to_string()];
    if !manifest.title.is_empty() {
        lines.push(format!("{}Title: {}", indent(1), manifest.title));
    }
    lines.push(format!("{}Base: {}", indent(1), manifest.base));

    let nav = &manifest.theme_config.nav;
    if !nav.is_empty() {
        lines.push(String::new());
        lines.push("Nav".to_string());
        for (i, link) in nav.iter().enumerate() {
            let suffix = if link.is_external() { " (external)" } else { "" };
            lines.push(format!(
                "{} {} → {}{}",
                format_index(i + 1),
                link.text,
                link.link,
                suffix
            ));
        }
    }

    let mut group_count = 0;
    let mut page_count = 0;
    for (route, groups) in manifest.theme_config.sidebar.iter() {
        lines.push(String::new());
        lines.push(format!("Sidebar {route}"));
        for (i, group) in groups.iter().enumerate() {
            lines.extend(format_group(i + 1, group));
            group_count += 1;
            page_count += group.pages().count();
        }
    }

    if !manifest.plugins.is_empty() {
        lines.push(String::new());
        lines.push("Plugins".to_string());
        for plugin in &manifest.plugins {
            lines.push(format!("{}{}", indent(1), plugin));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}, {}",
        plural(manifest.theme_config.sidebar.len(), "route"),
        plural(group_count, "group"),
        plural(page_count, "page")
    ));
    lines
}

pub fn print_site_output(manifest: &Manifest) {
    for line in format_site_output(manifest) {
        println!("{}", line);
    }
}
