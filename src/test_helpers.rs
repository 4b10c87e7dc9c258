//! Shared test utilities for the autonav test suite.
//!
//! Provides fixture setup, page lookups, and navigation tree assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let nav = generate::build(tmp.path(), &NavConfig::default()).unwrap();
//!
//! assert_eq!(find_page(&nav.pages, "about.md").title, "About");
//! assert_nav_shape(&nav.tree, &[
//!     ("About", &[]),
//!     ("guides", &["Work in progress", "Guides", "setup"]),
//!     ("Welcome", &[]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::nav::{NavList, NavTree};
use crate::types::{NavNode, PageDescriptor};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can write output into without touching
/// the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
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

/// Create a temp site from `(relative path, contents)` pairs.
pub fn write_site(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, contents) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
    }
    tmp
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a page by source path. Panics if not found.
pub fn find_page<'a>(pages: &'a [PageDescriptor], source: &str) -> &'a PageDescriptor {
    pages.iter().find(|p| p.source == source).unwrap_or_else(|| {
        let sources: Vec<&str> = pages.iter().map(|p| p.source.as_str()).collect();
        panic!("page '{source}' not found. Available: {sources:?}")
    })
}

/// Follow a chain of branch titles from the root. Panics on a miss.
pub fn find_branch<'a>(tree: &'a NavTree, path: &[&str]) -> &'a NavList {
    let mut current = tree.roots();
    for title in path {
        current = current.branch(title).unwrap_or_else(|| {
            let titles = titles_of(current);
            panic!("branch '{title}' not found in {path:?}. Available: {titles:?}")
        });
    }
    current
}

// =========================================================================
// Navigation helpers
// =========================================================================

/// Titles of a sibling list in order.
pub fn titles_of(list: &NavList) -> Vec<&str> {
    list.iter().map(NavNode::title).collect()
}

/// Top-level navigation titles in order.
pub fn nav_titles(tree: &NavTree) -> Vec<&str> {
    titles_of(tree.roots())
}

/// Assert that the top two levels of the tree match an expected shape.
///
/// Each entry is `(title, children)`. Use `&[]` for leaves.
pub fn assert_nav_shape(tree: &NavTree, expected: &[(&str, &[&str])]) {
    let actual = nav_titles(tree);
    let expected_titles: Vec<&str> = expected.iter().map(|(t, _)| *t).collect();
    assert_eq!(actual, expected_titles, "nav top-level titles mismatch");

    for (node, (title, children)) in tree.roots().iter().zip(expected) {
        let actual_children = node.children().map(titles_of).unwrap_or_default();
        assert_eq!(
            actual_children,
            children.to_vec(),
            "nav children of '{title}' mismatch"
        );
    }
}
