//! Navigation file generation.
//!
//! Stage 3 of the pipeline, and the entry point tying the stages together:
//!
//! ```text
//! list_candidates ──► describe_all ──► NavTree::from_descriptors ──► render ──► write
//!   (walkdir)          (rayon, ordered)     (sequential)              (yaml/json)  (atomic)
//! ```
//!
//! Descriptors are computed in parallel but inserted one at a time in
//! listing order, since sibling order in the tree is the order in which
//! pages are first seen.
//!
//! Every run starts from an empty tree and fully replaces the output file.
//! The document is written to a temp file next to the target and renamed
//! over it, so readers never see a half-written file.

use crate::config::{NavConfig, OutputFormat};
use crate::nav::NavTree;
use crate::page::{self, PageError};
use crate::scan::{self, ScanError};
use crate::types::PageDescriptor;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to replace output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Pages and tree built from one scan of the site.
#[derive(Debug)]
pub struct Navigation {
    /// Descriptors in listing order
    pub pages: Vec<PageDescriptor>,
    pub tree: NavTree,
}

/// Result of a full generation run.
#[derive(Debug)]
pub struct Generated {
    pub navigation: Navigation,
    /// Where the document was written
    pub output_path: PathBuf,
    pub format: OutputFormat,
}

/// Scan the site and build the navigation tree without writing anything.
pub fn build(root: &Path, config: &NavConfig) -> Result<Navigation, GenerateError> {
    let candidates = scan::list_candidates(root, config)?;
    let pages = page::describe_all(root, &candidates, config)?;
    let tree = NavTree::from_descriptors(&pages);
    Ok(Navigation { pages, tree })
}

/// Serialize the tree in the given format.
pub fn render(tree: &NavTree, format: OutputFormat) -> Result<String, GenerateError> {
    let document = match format {
        OutputFormat::Yaml => serde_yaml_ng::to_string(tree)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(tree)?;
            json.push('\n');
            json
        }
    };
    Ok(document)
}

/// Atomically replace `path` with `contents`, creating parent directories.
///
/// The replacement keeps the permissions of the file it overwrites. A new
/// file gets the same mode a plain create would give it under the process
/// umask, not the owner-only mode of a temp file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Resolve the configured output path against the site root.
pub fn output_path(root: &Path, config: &NavConfig) -> PathBuf {
    root.join(&config.output)
}

/// Run the whole pipeline and write the navigation file.
pub fn generate(root: &Path, config: &NavConfig) -> Result<Generated, GenerateError> {
    let navigation = build(root, config)?;
    let document = render(&navigation.tree, config.format)?;
    let output_path = output_path(root, config);
    write_atomic(&output_path, &document)?;

    info!(
        top_level = navigation.tree.len(),
        pages = navigation.pages.len(),
        path = %output_path.display(),
        "generated navigation with {} top-level items",
        navigation.tree.len()
    );

    Ok(Generated {
        navigation,
        output_path,
        format: config.format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn fixture_tree_shape() {
        let tmp = setup_fixtures();
        let nav = build(tmp.path(), &NavConfig::default()).unwrap();

        assert_nav_shape(
            &nav.tree,
            &[
                ("About", &[]),
                ("guides", &["Work in progress", "Guides", "setup"]),
                ("Welcome", &[]),
            ],
        );
        let setup = find_branch(&nav.tree, &["guides", "setup"]);
        assert_eq!(titles_of(setup), vec!["Setup", "Installing"]);
    }

    #[test]
    fn fixture_urls() {
        let tmp = setup_fixtures();
        let nav = build(tmp.path(), &NavConfig::default()).unwrap();

        assert_eq!(find_page(&nav.pages, "index.md").url, "/");
        assert_eq!(find_page(&nav.pages, "about.md").url, "/about.html");
        assert_eq!(find_page(&nav.pages, "guides/index.md").url, "/guides/");
        assert_eq!(
            find_page(&nav.pages, "guides/setup/install.md").url,
            "/guides/setup/install.html"
        );
    }

    #[test]
    fn fixture_titles_from_headings_and_filenames() {
        let tmp = setup_fixtures();
        let nav = build(tmp.path(), &NavConfig::default()).unwrap();

        // install.md has a later `# ` heading that must be ignored
        assert_eq!(
            find_page(&nav.pages, "guides/setup/install.md").title,
            "Installing"
        );
        // about.md has no heading
        assert_eq!(find_page(&nav.pages, "about.md").title, "About");
    }

    #[test]
    fn generate_writes_yaml_by_default() {
        let tmp = setup_fixtures();
        let result = generate(tmp.path(), &NavConfig::default()).unwrap();

        assert_eq!(result.output_path, tmp.path().join("_data/navigation.yml"));
        let written = fs::read_to_string(&result.output_path).unwrap();
        assert!(written.contains("title: Welcome"));
        assert!(written.contains("url: /guides/setup/install.html"));
        assert!(written.contains("children:"));
    }

    #[test]
    fn generate_writes_json_when_configured() {
        let tmp = setup_fixtures();
        let config = NavConfig {
            output: "nav/navigation.json".to_string(),
            format: OutputFormat::Json,
            ..NavConfig::default()
        };
        let result = generate(tmp.path(), &config).unwrap();

        let written = fs::read_to_string(tmp.path().join("nav/navigation.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        let roots = value.as_array().unwrap();
        assert_eq!(roots.len(), result.navigation.tree.len());
        assert_eq!(roots[0]["title"], "About");
        assert_eq!(roots[1]["children"][1]["url"], "/guides/");
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn output_fully_replaced() {
        let tmp = write_site(&[("a.md", "# A"), ("_data/navigation.yml", "stale: true\n")]);
        generate(tmp.path(), &NavConfig::default()).unwrap();

        let written = fs::read_to_string(tmp.path().join("_data/navigation.yml")).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.contains("title: A"));
    }

    #[test]
    fn empty_site_writes_empty_forest() {
        let tmp = TempDir::new().unwrap();
        let config = NavConfig {
            format: OutputFormat::Json,
            ..NavConfig::default()
        };
        let result = generate(tmp.path(), &config).unwrap();

        assert!(result.navigation.tree.is_empty());
        let written = fs::read_to_string(&result.output_path).unwrap();
        assert_eq!(written.trim(), "[]");
    }

    #[test]
    fn render_yaml_matches_tree() {
        let tmp = write_site(&[("a/x.md", "# X"), ("a/y.md", ""), ("b/z.md", "# Z")]);
        let nav = build(tmp.path(), &NavConfig::default()).unwrap();
        let yaml = render(&nav.tree, OutputFormat::Yaml).unwrap();

        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();
        let roots = value.as_sequence().unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0]["title"].as_str(), Some("a"));
        assert_eq!(roots[0]["children"][1]["title"].as_str(), Some("Y"));
        assert_eq!(roots[1]["children"][0]["url"].as_str(), Some("/b/z.html"));
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = write_site(&[("a.md", "# A"), ("_data/navigation.yml", "old\n")]);
        let target = tmp.path().join("_data/navigation.yml");
        for mode in [0o644, 0o640] {
            fs::set_permissions(&target, fs::Permissions::from_mode(mode)).unwrap();
            generate(tmp.path(), &NavConfig::default()).unwrap();

            let after = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
            assert_eq!(after, mode);
        }
    }

    #[cfg(unix)]
    #[test]
    fn new_output_gets_plain_create_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = write_site(&[("a.md", "# A"), ("_data/reference.txt", "")]);
        generate(tmp.path(), &NavConfig::default()).unwrap();

        let mode = |rel: &str| {
            fs::metadata(tmp.path().join(rel)).unwrap().permissions().mode() & 0o777
        };
        assert_eq!(mode("_data/navigation.yml"), mode("_data/reference.txt"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_file_name_does_not_fail_the_run() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = write_site(&[("a.md", "# A")]);
        fs::write(tmp.path().join(OsStr::from_bytes(b"caf\xe9.md")), "# Cafe").unwrap();

        let nav = build(tmp.path(), &NavConfig::default()).unwrap();
        assert_eq!(nav_titles(&nav.tree), vec!["A"]);
    }

    #[test]
    fn unwritable_output_is_error() {
        let tmp = write_site(&[("a.md", "# A"), ("blocker", "not a directory")]);
        let config = NavConfig {
            output: "blocker/navigation.yml".to_string(),
            ..NavConfig::default()
        };
        assert!(generate(tmp.path(), &config).is_err());
    }
}
