//! Candidate listing.
//!
//! Stage 1 of the pipeline. Walks the site root and returns the relative
//! paths of every content file that should appear in navigation. All
//! filtering policy lives here, so the page and tree stages can work on a
//! plain list of paths without touching the filesystem rules.
//!
//! ## What Gets Listed
//!
//! ```text
//! site/
//! ├── .git/                # hidden: pruned at any depth
//! ├── _data/               # reserved top-level dir: pruned
//! ├── _layouts/            # reserved top-level dir: pruned
//! ├── index.md             # listed
//! ├── notes.txt            # not a content extension: skipped
//! └── guides/
//!     ├── _partial.md      # reserved file name: skipped
//!     ├── _drafts/
//!     │   └── wip.md       # listed (segment dropped later from the branch path)
//!     └── setup/
//!         └── install.md   # listed
//! ```
//!
//! Entries are visited in file-name order, so the listing is stable from
//! run to run and the resulting navigation is reproducible.

use crate::config::NavConfig;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },
}

/// List content files under `root` as `/`-separated relative paths.
///
/// A root with no matching files yields an empty list.
pub fn list_candidates(root: &Path, config: &NavConfig) -> Result<Vec<String>, ScanError> {
    let mut candidates = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, config));

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: source
                .path()
                .unwrap_or(root)
                .to_string_lossy()
                .to_string(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if config.is_reserved(&name) || !has_content_extension(entry.path(), config) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let Some(rel) = to_slash_path(rel) else {
            warn!(path = %entry.path().display(), "skipping file with a non-UTF-8 path");
            continue;
        };
        debug!(path = %rel, "candidate");
        candidates.push(rel);
    }

    Ok(candidates)
}

/// Hidden entries anywhere and reserved entries directly under the root
/// are skipped along with everything below them.
fn is_pruned(entry: &DirEntry, config: &NavConfig) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.depth() == 1 && config.is_reserved(&name))
}

fn has_content_extension(path: &Path, config: &NavConfig) -> bool {
    path.extension()
        .map(|ext| config.is_content_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

/// Join path components with `/` regardless of platform.
///
/// `None` when a component isn't valid UTF-8: such a path can't be read
/// back from its display form, nor turned into a URL.
fn to_slash_path(rel: &Path) -> Option<String> {
    rel.components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.join("/"))
}
