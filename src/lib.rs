//! # autonav
//!
//! Generates a site navigation file from a directory of markdown pages.
//! The directory layout is the navigation: every directory becomes a branch,
//! every page becomes a leaf titled after its first `# ` heading, and the
//! result is written as a data file a site template can iterate over.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      site/        →  relative paths        (filtering policy)
//! 2. Describe  paths        →  PageDescriptor list   (title, URL, branch path)
//! 3. Generate  descriptors  →  _data/navigation.yml  (tree insertion + write)
//! ```
//!
//! The describe and tree stages never look at filtering rules, and the tree
//! stage never touches the filesystem, so the interesting logic is testable
//! on plain strings.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the site root, skips hidden, reserved and non-content entries |
//! | [`page`] | Stage 2: title extraction, URL derivation, branch paths |
//! | [`nav`] | Tree insertion: find-or-create branches by title, append leaves |
//! | [`generate`] | Stage 3: runs the pipeline, renders YAML/JSON, writes atomically |
//! | [`config`] | `autonav.toml` loading, merging over defaults, validation |
//! | [`types`] | Types shared between stages (`PageDescriptor`, `NavNode`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## First Seen Wins
//!
//! Siblings appear in the order they are first inserted and are never
//! re-sorted. Listing is in file-name order, so a rerun over an unchanged
//! site writes a byte-identical file.
//!
//! ## Branches Keyed by Title
//!
//! A branch is found by its title alone. Reserved segments are dropped from
//! the branch path, so `a/_x/b/f.md` and `a/b/g.md` share the `a → b`
//! branch even though they live in different directories.
//!
//! ## Parallel Reads, Sequential Inserts
//!
//! Files are read and titled on the rayon pool. Results are collected back
//! in listing order before the tree is built, so parallelism never changes
//! the output.

pub mod config;
pub mod generate;
pub mod nav;
pub mod output;
pub mod page;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
