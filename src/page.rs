//! Page descriptors: title, URL and branch path for one content file.
//!
//! Stage 2 of the pipeline. Everything except [`describe`] and
//! [`describe_all`] is a pure function of the relative path and file text,
//! so the rules can be tested without a filesystem.
//!
//! ## Titles
//!
//! The first line starting with `# ` wins, marker stripped and trimmed.
//! Without one, the file stem is used with its first character upper-cased
//! and nothing else touched: `my-page.md` → `My-page`.
//!
//! ## URLs
//!
//! | Path | URL |
//! |------|-----|
//! | `index.md` | `/` |
//! | `guides/setup/index.md` | `/guides/setup/` |
//! | `guides/setup/install.md` | `/guides/setup/install.html` |
//!
//! ## Branch Paths
//!
//! The file's own segment is dropped, then any directory segment carrying
//! the reserved prefix: `guides/_drafts/wip.md` → `["guides"]`.

use crate::config::{NavConfig, ReadErrorPolicy};
use crate::types::PageDescriptor;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Text of the first `# ` heading line, trimmed.
pub fn extract_title(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|heading| heading.trim().to_string())
}

/// Filename-derived title: the stem with its first character upper-cased.
///
/// Never fails; an empty stem gives an empty title.
pub fn fallback_title(rel_path: &str) -> String {
    let stem = file_stem(rel_path);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Public URL for a relative content path.
///
/// A file whose stem equals `index_name` maps to its directory with a
/// trailing `/`; anything else maps to `<dir>/<stem>.html`. The result always
/// starts with `/` and never contains `//`.
pub fn derive_url(rel_path: &str, index_name: &str) -> String {
    let dir = rel_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    let stem = file_stem(rel_path);
    let url = if stem == index_name {
        format!("/{dir}/")
    } else {
        format!("/{dir}/{stem}.html")
    };
    collapse_slashes(&url)
}

/// Directory segments a page is placed under in the navigation tree.
pub fn branch_path(rel_path: &str, reserved_prefix: &str) -> Vec<String> {
    let mut segments: Vec<&str> = rel_path.split('/').collect();
    segments.pop();
    segments
        .into_iter()
        .filter(|s| !s.is_empty() && *s != "." && !s.starts_with(reserved_prefix))
        .map(str::to_string)
        .collect()
}

/// Build a descriptor from already-loaded text.
///
/// `content` is `None` when the file couldn't be read, which falls back to
/// the filename title.
pub fn describe_content(
    rel_path: &str,
    content: Option<&str>,
    config: &NavConfig,
) -> PageDescriptor {
    let title = content
        .and_then(extract_title)
        .unwrap_or_else(|| fallback_title(rel_path));
    PageDescriptor {
        source: rel_path.to_string(),
        segments: branch_path(rel_path, &config.reserved_prefix),
        title,
        url: derive_url(rel_path, &config.index_name),
    }
}

/// Read one content file under `root` and describe it.
///
/// Read failures follow [`NavConfig::read_errors`]: abort returns the error,
/// fallback logs a warning and uses the filename title.
pub fn describe(
    root: &Path,
    rel_path: &str,
    config: &NavConfig,
) -> Result<PageDescriptor, PageError> {
    match fs::read(root.join(rel_path)) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            Ok(describe_content(rel_path, Some(&text), config))
        }
        Err(source) => match config.read_errors {
            ReadErrorPolicy::Abort => Err(PageError::Read {
                path: rel_path.to_string(),
                source,
            }),
            ReadErrorPolicy::Fallback => {
                warn!(path = %rel_path, error = %source, "unreadable page, using filename title");
                Ok(describe_content(rel_path, None, config))
            }
        },
    }
}

/// Describe every candidate, in parallel, keeping listing order.
///
/// When several files fail, the error reported is the first in listing
/// order, whichever thread hit it.
pub fn describe_all(
    root: &Path,
    candidates: &[String],
    config: &NavConfig,
) -> Result<Vec<PageDescriptor>, PageError> {
    let results: Vec<Result<PageDescriptor, PageError>> = candidates
        .par_iter()
        .map(|rel_path| describe(root, rel_path, config))
        .collect();
    results.into_iter().collect()
}

/// Last path segment with its final extension removed.
fn file_stem(rel_path: &str) -> &str {
    let name = rel_path.rsplit('/').next().unwrap_or(rel_path);
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

fn collapse_slashes(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}
