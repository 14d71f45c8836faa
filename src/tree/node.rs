//! In-memory shape of the output document

use crate::tree::assembler;
use crate::tree::path::PathKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Children of a directory node, keyed by entry key
pub type Directory = BTreeMap<String, TreeNode>;

/// A node of the document: a directory mapping or a leaf holding file content
///
/// Serializes untagged, so a leaf is a JSON string and a directory a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf(String),
    Directory(Directory),
}

impl TreeNode {
    pub fn empty_directory() -> Self {
        TreeNode::Directory(Directory::new())
    }

    /// Decode raw file content into a leaf
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD.
    pub fn leaf_from_bytes(bytes: Vec<u8>) -> Self {
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        TreeNode::Leaf(text)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            TreeNode::Leaf(text) => Some(text),
            TreeNode::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            TreeNode::Directory(children) => Some(children),
            TreeNode::Leaf(_) => None,
        }
    }
}

/// The root directory being built for a single conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    root: Directory,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` at `key`, creating intermediate directories as needed
    ///
    /// Returns the value displaced by the insert, if any.
    pub fn insert(&mut self, key: &PathKey, value: TreeNode) -> Option<TreeNode> {
        assembler::insert(&mut self.root, key, value)
    }

    /// Look up the node at `key`; the root key has no node of its own
    pub fn get(&self, key: &PathKey) -> Option<&TreeNode> {
        let (last, parents) = key.segments().split_last()?;
        let mut directory = &self.root;
        for segment in parents {
            directory = directory.get(segment)?.as_directory()?;
        }
        directory.get(last)
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

impl From<Directory> for Document {
    fn from(root: Directory) -> Self {
        Self { root }
    }
}
