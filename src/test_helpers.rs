//! Shared test utilities for the docsite test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = docs_tree(&["guide/README.md", "guide/intro.md"]);
//! let group = SidebarBuilder::new(tmp.path()).build("guide", "Guide").unwrap();
//! assert_eq!(group.children, vec!["", "intro.md"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::sidebar::SidebarGroup;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/docs/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/docs");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Create a temp documentation root containing `files` (`/`-separated,
/// relative). Parent directories are created as needed. Each markdown file
/// gets a heading derived from its name.
pub fn docs_tree(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        let path = tmp.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let name = path.file_stem().unwrap().to_string_lossy();
        fs::write(&path, format!("# {name}\n")).unwrap();
    }
    tmp
}

/// Entry names of `dir` in the order the filesystem lists them.
pub fn listing_order(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect()
}

// =========================================================================
// Extractors
// =========================================================================

/// Group titles in order.
pub fn group_titles(groups: &[SidebarGroup]) -> Vec<&str> {
    groups.iter().map(|g| g.title.as_str()).collect()
}
