//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Tree
//!
//! Each node leads with its 1-based position among its siblings. Leaves show
//! the URL they link to; branches list their children one level deeper.
//!
//! ```text
//! Navigation
//! 001 About → /about.html
//! 002 guides
//!     001 Work in progress → /guides/_drafts/wip.html
//!     002 Guides → /guides/
//!     003 setup
//!         001 Setup → /guides/setup/
//!         002 Installing → /guides/setup/install.html
//! 003 Welcome → /
//! ```
//!
//! ## Pages
//!
//! ```text
//! Pages
//!     001 About
//!         Source: about.md
//! ```
//!
//! ## Summary
//!
//! ```text
//! Generated 3 top-level items (6 pages) → _data/navigation.yml (yaml)
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{Generated, Navigation};
use crate::nav::NavList;
use crate::types::{NavNode, PageDescriptor};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format one node header: index + title, with the URL for leaves.
fn node_line(index: usize, node: &NavNode) -> String {
    match node.url() {
        Some(url) => format!("{} {} → {}", format_index(index), node.title(), url),
        None => format!("{} {}", format_index(index), node.title()),
    }
}

fn walk_nav_list(list: &NavList, depth: usize, lines: &mut Vec<String>) {
    for (i, node) in list.iter().enumerate() {
        lines.push(format!("{}{}", indent(depth), node_line(i + 1, node)));
        if let Some(children) = node.children() {
            walk_nav_list(children, depth + 1, lines);
        }
    }
}

/// Format the navigation tree.
pub fn format_nav_tree(navigation: &Navigation) -> Vec<String> {
    let mut lines = vec!["Navigation".to_string()];
    if navigation.tree.is_empty() {
        lines.push("    (no pages found)".to_string());
        return lines;
    }
    walk_nav_list(navigation.tree.roots(), 0, &mut lines);
    lines
}

/// Format the page inventory: title plus source file, in listing order.
pub fn format_pages(pages: &[PageDescriptor]) -> Vec<String> {
    if pages.is_empty() {
        return Vec::new();
    }
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), page.title));
        lines.push(format!("        Source: {}", page.source));
    }
    lines
}

/// Format the `check` command output: tree, then pages.
pub fn format_check_output(navigation: &Navigation) -> Vec<String> {
    let mut lines = format_nav_tree(navigation);
    let pages = format_pages(&navigation.pages);
    if !pages.is_empty() {
        lines.push(String::new());
        lines.extend(pages);
    }
    lines
}

/// Format the `generate` command output: tree and a summary line.
///
/// The output path is shown relative to `root` when it lives inside it.
pub fn format_generate_output(result: &Generated, root: &Path) -> Vec<String> {
    let mut lines = format_nav_tree(&result.navigation);
    let shown = result
        .output_path
        .strip_prefix(root)
        .unwrap_or(&result.output_path);
    lines.push(String::new());
    lines.push(format!(
        "Generated {} top-level items ({} pages) → {} ({})",
        result.navigation.tree.len(),
        result.navigation.pages.len(),
        shown.display(),
        result.format.name()
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(navigation: &Navigation) {
    for line in format_check_output(navigation) {
        println!("{}", line);
    }
}

/// Print generate output to stdout.
pub fn print_generate_output(result: &Generated, root: &Path) {
    for line in format_generate_output(result, root) {
        println!("{}", line);
    }
}
