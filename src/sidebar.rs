//! Sidebar group generation from markdown folders.
//!
//! Each documentation section is a folder of markdown files under the
//! documentation root. [`SidebarBuilder::build`] turns one such folder into a
//! [`SidebarGroup`]: a title plus the ordered list of page paths the theme
//! should link to.
//!
//! ## Entry Rules
//!
//! A directory entry becomes a sidebar page when:
//! - its name is not `readme.md` (compared case-insensitively; the readme is
//!   the section's index page, not a child page)
//! - it is a regular file (symlinks are followed, subdirectories are skipped)
//! - its extension is exactly `md` (`notes.MD` does not qualify)
//!
//! ## Paths
//!
//! ```text
//! docs/
//! ├── resources/               build("resources", ..)
//! │   ├── README.md            → ""           (index sentinel)
//! │   ├── intro.md             → "intro.md"
//! │   └── 01-changes/          build("resources/01-changes", ..)
//! │       ├── README.md        → (skipped)
//! │       └── filters.md       → "01-changes/filters.md"
//! ```
//!
//! A folder without `/` is a top-level section: its pages are listed by bare
//! filename and the group starts with the empty-string index entry. A nested
//! folder prefixes each page with its last path segment and has no index
//! entry.
//!
//! A name that is not valid UTF-8 cannot be written into the sidebar, so it
//! fails the build like an unreadable entry would.
//!
//! ## Ordering
//!
//! Pages appear in the order the directory listing returns them. No sort is
//! applied, so the order is whatever the filesystem yields.

use crate::listing::{DirectoryLister, FsLister};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Child entry that links to the section's own index page.
pub const INDEX_ENTRY: &str = "";

const README: &str = "readme.md";
const MARKDOWN_EXTENSION: &str = "md";

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("Cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("File name is not valid UTF-8: {}", .path.display())]
    NonUtf8Name { path: PathBuf },
}

/// A [`SidebarError`] tagged with the section that raised it.
#[derive(Error, Debug)]
#[error("section {:?} ({}): {source}", .section.title, .section.folder)]
pub struct SectionError {
    pub section: SidebarSection,
    #[source]
    pub source: SidebarError,
}

/// One declared sidebar section: the folder to scan and its display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarSection {
    /// Folder relative to the documentation root, `/`-separated.
    pub folder: String,
    pub title: String,
}

impl SidebarSection {
    pub fn new(folder: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            title: title.into(),
        }
    }
}

/// A titled, ordered list of pages shown in the theme's sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
    pub title: String,
    /// Page paths relative to the sidebar route. May start with
    /// [`INDEX_ENTRY`].
    pub children: Vec<String>,
}

impl SidebarGroup {
    /// Whether the group links to its section's index page.
    pub fn has_index(&self) -> bool {
        self.children.first().is_some_and(|c| c == INDEX_ENTRY)
    }

    /// Child pages, excluding the index entry.
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .map(String::as_str)
            .filter(|c| *c != INDEX_ENTRY)
    }
}

/// Builds sidebar groups from folders under a documentation root.
///
/// Holds no state besides the root and the lister: every call reads the
/// directory afresh.
#[derive(Debug, Clone)]
pub struct SidebarBuilder<L = FsLister> {
    docs_root: PathBuf,
    lister: L,
}

impl SidebarBuilder<FsLister> {
    pub fn new(docs_root: impl Into<PathBuf>) -> Self {
        Self::with_lister(docs_root, FsLister)
    }
}

impl<L: DirectoryLister> SidebarBuilder<L> {
    pub fn with_lister(docs_root: impl Into<PathBuf>, lister: L) -> Self {
        Self {
            docs_root: docs_root.into(),
            lister,
        }
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    /// Scan `folder` and return its sidebar group titled `title`.
    ///
    /// Fails if the folder cannot be listed or a candidate entry cannot be
    /// stat'ed. A folder with no qualifying pages is not an error.
    pub fn build(&self, folder: &str, title: &str) -> Result<SidebarGroup, SidebarError> {
        let dir = self.docs_root.join(folder);
        let prefix = section_prefix(folder);

        let names = self
            .lister
            .list(&dir)
            .map_err(|source| SidebarError::ReadDir {
                path: dir.clone(),
                source,
            })?;

        let mut children = Vec::with_capacity(names.len() + 1);
        if prefix.is_empty() {
            children.push(INDEX_ENTRY.to_string());
        }

        for name in &names {
            let Some(name) = name.to_str() else {
                return Err(SidebarError::NonUtf8Name {
                    path: dir.join(name),
                });
            };
            if is_readme(name) {
                continue;
            }
            let path = dir.join(name);
            let is_file = self
                .lister
                .is_file(&path)
                .map_err(|source| SidebarError::Stat { path, source })?;
            if is_file && has_markdown_extension(name) {
                children.push(entry_path(prefix, name));
            }
        }

        tracing::debug!(
            folder,
            listed = names.len(),
            children = children.len(),
            "Built sidebar group"
        );

        Ok(SidebarGroup {
            title: title.to_string(),
            children,
        })
    }

    /// Build one group per section, in order. Stops at the first failure.
    pub fn build_all<'a, I>(&self, sections: I) -> Result<Vec<SidebarGroup>, SectionError>
    where
        I: IntoIterator<Item = &'a SidebarSection>,
    {
        sections
            .into_iter()
            .map(|s| {
                self.build(&s.folder, &s.title)
                    .map_err(|source| SectionError {
                        section: s.clone(),
                        source,
                    })
            })
            .collect()
    }
}

/// Last path segment of `folder`, or `""` for a top-level folder.
///
/// - `"resources"` → `""`
/// - `"resources/01-changes"` → `"01-changes"`
/// - `"a/b/c"` → `"c"`
pub fn section_prefix(folder: &str) -> &str {
    folder.rfind('/').map_or("", |i| &folder[i + 1..])
}

fn is_readme(name: &str) -> bool {
    name.to_lowercase() == README
}

fn has_markdown_extension(name: &str) -> bool {
    Path::new(name).extension() == Some(OsStr::new(MARKDOWN_EXTENSION))
}

fn entry_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::tests::{EntryKind, MemoryLister};
    use crate::test_helpers::{docs_tree, listing_order};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use std::fs;
    use EntryKind::{Broken, Dir, File};

    fn memory_builder(dirs: &[(&str, &[(&str, EntryKind)])]) -> SidebarBuilder<MemoryLister> {
        let lister = dirs
            .iter()
            .fold(MemoryLister::new(), |l, (dir, entries)| {
                l.with_dir(Path::new("/docs").join(dir), entries)
            });
        SidebarBuilder::with_lister("/docs", lister)
    }

    // =========================================================================
    // Prefix and name rules
    // =========================================================================

    #[test]
    fn prefix_empty_for_top_level_folder() {
        assert_eq!(section_prefix("resources"), "");
    }

    #[test]
    fn prefix_is_last_segment() {
        assert_eq!(section_prefix("resources/01-changes"), "01-changes");
        assert_eq!(section_prefix("a/b/c"), "c");
    }

    #[test]
    fn readme_match_ignores_case() {
        assert!(is_readme("readme.md"));
        assert!(is_readme("README.md"));
        assert!(is_readme("README.MD"));
        assert!(!is_readme("readme.markdown"));
        assert!(!is_readme("my-readme.md"));
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert!(has_markdown_extension("intro.md"));
        assert!(has_markdown_extension("a..md"));
        assert!(!has_markdown_extension("intro.MD"));
        assert!(!has_markdown_extension("intro.markdown"));
        assert!(!has_markdown_extension("intro.md.bak"));
        assert!(!has_markdown_extension(".md"));
        assert!(!has_markdown_extension("intro"));
    }

    // =========================================================================
    // Group building (in-memory listings, exact order)
    // =========================================================================

    #[test]
    fn nested_folder_prefixes_entries_without_index() {
        let builder = memory_builder(&[(
            "a/b",
            &[("x.md", File), ("readme.md", File), ("y.md", File)],
        )]);

        let group = builder.build("a/b", "Nested").unwrap();
        assert_eq!(
            group,
            SidebarGroup {
                title: "Nested".to_string(),
                children: vec!["b/x.md".to_string(), "b/y.md".to_string()],
            }
        );
        assert!(!group.has_index());
    }

    #[test]
    fn top_level_folder_starts_with_index_entry() {
        let builder = memory_builder(&[("resources", &[("intro.md", File), ("readme.md", File)])]);

        let group = builder.build("resources", "Getting Started").unwrap();
        assert_eq!(group.children, vec!["", "intro.md"]);
        assert!(group.has_index());
        assert_eq!(group.pages().collect::<Vec<_>>(), vec!["intro.md"]);
    }

    #[test]
    fn listing_order_is_preserved() {
        let builder = memory_builder(&[(
            "guide",
            &[("zeta.md", File), ("alpha.md", File), ("mid.md", File)],
        )]);

        let group = builder.build("guide", "Guide").unwrap();
        assert_eq!(group.children, vec!["", "zeta.md", "alpha.md", "mid.md"]);
    }

    #[test]
    fn readme_only_top_level_yields_index_only() {
        let builder = memory_builder(&[("docs", &[("README.md", File)])]);
        let group = builder.build("docs", "Docs").unwrap();
        assert_eq!(group.children, vec![INDEX_ENTRY]);
    }

    #[test]
    fn readme_only_nested_yields_nothing() {
        let builder = memory_builder(&[("docs/inner", &[("ReadMe.Md", File)])]);
        let group = builder.build("docs/inner", "Inner").unwrap();
        assert!(group.children.is_empty());
    }

    #[test]
    fn non_markdown_and_directories_filtered() {
        let builder = memory_builder(&[(
            "guide/setup",
            &[
                ("install.md", File),
                ("notes.txt", File),
                ("shout.MD", File),
                ("images", Dir),
                ("chapter.md", Dir),
                ("usage.md", File),
            ],
        )]);

        let group = builder.build("guide/setup", "Setup").unwrap();
        assert_eq!(group.children, vec!["setup/install.md", "setup/usage.md"]);
    }

    #[test]
    fn readme_is_never_stat_ed() {
        let builder = memory_builder(&[("guide", &[("README.md", Broken), ("a.md", File)])]);

        let group = builder.build("guide", "Guide").unwrap();
        assert_eq!(group.children, vec!["", "a.md"]);
        assert_eq!(
            builder.lister.stat_calls(),
            vec![PathBuf::from("/docs/guide/a.md")]
        );
    }

    #[test]
    fn failed_stat_is_error() {
        let builder = memory_builder(&[("guide", &[("a.md", File), ("broken.txt", Broken)])]);

        let err = builder.build("guide", "Guide").unwrap_err();
        assert!(
            matches!(&err, SidebarError::Stat { path, .. } if path == Path::new("/docs/guide/broken.txt"))
        );
    }

    #[test]
    fn missing_folder_is_error() {
        let builder = memory_builder(&[]);
        let err = builder.build("nowhere", "Nowhere").unwrap_err();
        assert!(
            matches!(&err, SidebarError::ReadDir { path, .. } if path == Path::new("/docs/nowhere"))
        );
    }

    #[test]
    fn title_passed_through_verbatim() {
        let builder = memory_builder(&[("a/b", &[])]);
        let group = builder.build("a/b", "  Vue 3: What's New?  ").unwrap();
        assert_eq!(group.title, "  Vue 3: What's New?  ");
    }

    #[test]
    fn build_all_keeps_section_order() {
        let builder = memory_builder(&[
            ("resources", &[("intro.md", File)]),
            ("resources/02-new", &[("teleport.md", File)]),
            ("resources/01-changes", &[("filters.md", File)]),
        ]);
        let sections = vec![
            SidebarSection::new("resources", "Getting Started"),
            SidebarSection::new("resources/02-new", "New"),
            SidebarSection::new("resources/01-changes", "Changes"),
        ];

        let groups = builder.build_all(&sections).unwrap();
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Getting Started", "New", "Changes"]);
        assert_eq!(groups[1].children, vec!["02-new/teleport.md"]);
    }

    #[test]
    fn build_all_stops_at_first_failure() {
        let builder = memory_builder(&[("resources", &[("intro.md", File)])]);
        let sections = vec![
            SidebarSection::new("resources", "Getting Started"),
            SidebarSection::new("resources/missing", "Missing"),
            SidebarSection::new("resources/also-missing", "Also Missing"),
        ];

        let err = builder.build_all(&sections).unwrap_err();
        assert_eq!(err.section, sections[1]);
        assert!(matches!(err.source, SidebarError::ReadDir { .. }));
        assert!(err.to_string().contains("\"Missing\" (resources/missing)"));
    }

    // =========================================================================
    // Real filesystem
    // =========================================================================

    #[test]
    fn scans_real_directory() {
        let tmp = docs_tree(&[
            "resources/README.md",
            "resources/intro.md",
            "resources/setup.md",
            "resources/logo.png",
            "resources/01-changes/README.md",
            "resources/01-changes/filters.md",
        ]);
        let builder = SidebarBuilder::new(tmp.path());

        let group = builder.build("resources", "Getting Started").unwrap();
        assert_eq!(group.children[0], INDEX_ENTRY);

        // Order follows the filesystem; compare against what it actually yields.
        let expected: Vec<String> = listing_order(&tmp.path().join("resources"))
            .into_iter()
            .filter(|n| n == "intro.md" || n == "setup.md")
            .collect();
        assert_eq!(group.pages().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn subdirectories_never_listed() {
        let tmp = docs_tree(&[
            "guide/a/b.md",
            "guide/folder.md/inner.md",
            "guide/top.md",
        ]);
        let group = SidebarBuilder::new(tmp.path()).build("guide", "Guide").unwrap();
        assert_eq!(group.children, vec!["", "top.md"]);
    }

    #[test]
    fn empty_directory_is_not_error() {
        let tmp = docs_tree(&[]);
        fs::create_dir_all(tmp.path().join("section/empty")).unwrap();

        let builder = SidebarBuilder::new(tmp.path());
        assert!(builder.build("section/empty", "Empty").unwrap().children.is_empty());
        assert_eq!(builder.build("section", "Section").unwrap().children, vec![""]);
    }

    #[test]
    fn missing_real_directory_is_error() {
        let tmp = docs_tree(&[]);
        let result = SidebarBuilder::new(tmp.path()).build("nope", "Nope");
        assert!(matches!(result, Err(SidebarError::ReadDir { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_name_is_error() {
        use std::os::unix::ffi::OsStrExt;

        let tmp = docs_tree(&["guide/ok.md"]);
        let bad = OsStr::from_bytes(b"bad\xff.md");
        fs::write(tmp.path().join("guide").join(bad), "# Bad").unwrap();

        let err = SidebarBuilder::new(tmp.path())
            .build("guide", "Guide")
            .unwrap_err();
        assert!(
            matches!(&err, SidebarError::NonUtf8Name { path } if path.file_name() == Some(bad))
        );
    }

    #[test]
    fn rebuild_is_idempotent() {
        let tmp = docs_tree(&["s/t/one.md", "s/t/two.md", "s/t/three.md", "s/t/README.md"]);
        let builder = SidebarBuilder::new(tmp.path());

        let first = builder.build("s/t", "T").unwrap();
        let second = builder.build("s/t", "T").unwrap();
        assert_eq!(first, second);

        let names: BTreeSet<&str> = first.children.iter().map(String::as_str).collect();
        assert_eq!(
            names,
            BTreeSet::from(["t/one.md", "t/three.md", "t/two.md"])
        );
    }

    #[test]
    fn group_serializes_as_title_and_children() {
        let group = SidebarGroup {
            title: "Demo".to_string(),
            children: vec!["".to_string(), "demo.md".to_string()],
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "Demo", "children": ["", "demo.md"] })
        );
    }
}
