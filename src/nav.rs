//! Navigation tree construction.
//!
//! Pages are inserted one at a time, in listing order. Each insertion walks
//! the page's branch path from the forest root, reusing the branch whose
//! title equals the segment or appending a new one, and finally appends the
//! page as a leaf of the innermost list reached.
//!
//! ```text
//! a/x.md, a/y.md, b/z.md   →   - a
//!                                - x
//!                                - y
//!                              - b
//!                                - z
//! ```
//!
//! ## Ordering
//!
//! Siblings keep the order in which they were first inserted. Nothing is
//! sorted or pruned once insertion is done, so the same input order always
//! produces the same tree.
//!
//! ## Merging by title
//!
//! Branches are addressed by title alone. Two different directories whose
//! surviving segment chains are equal (`a/_x/b/` and `a/b/` once reserved
//! segments are dropped) end up in the same branch. Only branches take part
//! in the lookup: a leaf titled `setup` never absorbs a `setup/` directory.

use crate::types::{NavNode, PageDescriptor};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// An ordered list of sibling nodes with a title index over its branches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavList {
    nodes: Vec<NavNode>,
    /// Branch title → position in `nodes`
    branches: HashMap<String, usize>,
}

impl NavList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NavNode> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[NavNode] {
        &self.nodes
    }

    /// The branch titled `title` at this level, if one exists.
    pub fn branch(&self, title: &str) -> Option<&NavList> {
        self.branches
            .get(title)
            .and_then(|&pos| self.nodes[pos].children())
    }

    fn push_leaf(&mut self, title: String, url: String) {
        self.nodes.push(NavNode::Leaf { title, url });
    }

    /// Descend into the branch titled `title`, creating it at the end of
    /// the list if it doesn't exist yet.
    fn branch_mut(&mut self, title: &str) -> &mut NavList {
        let pos = match self.branches.get(title) {
            Some(&pos) => pos,
            None => {
                self.nodes.push(NavNode::Branch {
                    title: title.to_string(),
                    children: NavList::new(),
                });
                let pos = self.nodes.len() - 1;
                self.branches.insert(title.to_string(), pos);
                pos
            }
        };
        match &mut self.nodes[pos] {
            NavNode::Branch { children, .. } => children,
            NavNode::Leaf { .. } => unreachable!("branch index points at a leaf"),
        }
    }
}

impl Serialize for NavList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.nodes.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a NavList {
    type Item = &'a NavNode;
    type IntoIter = std::slice::Iter<'a, NavNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The navigation forest: an ordered list of top-level nodes with no
/// implicit root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavTree {
    roots: NavList,
}

impl NavTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting every descriptor in iteration order.
    pub fn from_descriptors<'a, I>(pages: I) -> Self
    where
        I: IntoIterator<Item = &'a PageDescriptor>,
    {
        let mut tree = Self::new();
        for page in pages {
            tree.insert_page(page);
        }
        tree
    }

    /// Insert a leaf under `branch_path`, creating missing branches.
    ///
    /// An empty `branch_path` appends the leaf at the forest root.
    pub fn insert<S: AsRef<str>>(&mut self, branch_path: &[S], title: &str, url: &str) {
        let mut current = &mut self.roots;
        for segment in branch_path {
            current = current.branch_mut(segment.as_ref());
        }
        current.push_leaf(title.to_string(), url.to_string());
    }

    pub fn insert_page(&mut self, page: &PageDescriptor) {
        self.insert(&page.segments, &page.title, &page.url);
    }

    /// Top-level nodes in insertion order.
    pub fn roots(&self) -> &NavList {
        &self.roots
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of leaves at any depth.
    pub fn leaf_count(&self) -> usize {
        fn count(list: &NavList) -> usize {
            list.iter()
                .map(|node| match node.children() {
                    Some(children) => count(children),
                    None => 1,
                })
                .sum()
        }
        count(&self.roots)
    }
}
