//! Shared types passed between the pipeline stages.
//!
//! [`PageDescriptor`] is what the page stage hands to the tree builder;
//! [`NavNode`] is what ends up serialized in the navigation file.

use crate::nav::NavList;
use serde::Serialize;

/// Everything the tree builder needs to know about one content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    /// Relative source path, `/`-separated (e.g. `guides/setup/install.md`)
    pub source: String,
    /// Directory segments the leaf is placed under. Empty means forest root.
    pub segments: Vec<String>,
    /// First `# ` heading, or the capitalized file stem
    pub title: String,
    /// Public URL, always starting with `/`
    pub url: String,
}

/// One entry of the navigation forest.
///
/// Serialized untagged, so a branch reads as `{title, children}` and a
/// leaf as `{title, url}`, which is the shape site templates iterate over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavNode {
    /// A directory level. Has no URL.
    Branch { title: String, children: NavList },
    /// A single page. Has no children.
    Leaf { title: String, url: String },
}

impl NavNode {
    pub fn title(&self) -> &str {
        match self {
            NavNode::Branch { title, .. } | NavNode::Leaf { title, .. } => title,
        }
    }

    /// Children of a branch; `None` for a leaf.
    pub fn children(&self) -> Option<&NavList> {
        match self {
            NavNode::Branch { children, .. } => Some(children),
            NavNode::Leaf { .. } => None,
        }
    }

    /// URL of a leaf; `None` for a branch.
    pub fn url(&self) -> Option<&str> {
        match self {
            NavNode::Branch { .. } => None,
            NavNode::Leaf { url, .. } => Some(url),
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, NavNode::Branch { .. })
    }
}
