//! Document assembly: place values at path keys inside a directory tree

use crate::tree::node::{Directory, TreeNode};
use crate::tree::path::PathKey;
use std::collections::btree_map::Entry;

/// Insert `value` at `key` below `directory`
///
/// Intermediate segments are created as empty directories when absent and left
/// alone when they already are directories, so inserts for different leaves never
/// clobber each other's siblings. A leaf sitting on an intermediate segment is
/// replaced by a directory. At the final segment a directory value is merged into
/// an existing directory; any other combination replaces the existing node.
///
/// An empty key addresses `directory` itself: a directory value is merged into
/// it, a leaf value cannot be placed and is handed back.
///
/// Returns the first node displaced by the insert, if any.
pub fn insert(directory: &mut Directory, key: &PathKey, value: TreeNode) -> Option<TreeNode> {
    let Some((last, parents)) = key.segments().split_last() else {
        return match value {
            TreeNode::Directory(children) => merge(directory, children),
            leaf @ TreeNode::Leaf(_) => Some(leaf),
        };
    };

    let mut displaced = None;
    let mut current = directory;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(TreeNode::empty_directory);
        if let TreeNode::Leaf(_) = slot {
            let leaf = std::mem::replace(slot, TreeNode::empty_directory());
            displaced = displaced.or(Some(leaf));
        }
        let TreeNode::Directory(children) = slot else {
            return displaced.or(Some(value));
        };
        current = children;
    }

    displaced.or(place(current, last.clone(), value))
}

/// Merge `incoming` into `target`, entry by entry
pub fn merge(target: &mut Directory, incoming: Directory) -> Option<TreeNode> {
    let mut displaced = None;
    for (name, node) in incoming {
        let replaced = place(target, name, node);
        displaced = displaced.or(replaced);
    }
    displaced
}

fn place(directory: &mut Directory, name: String, value: TreeNode) -> Option<TreeNode> {
    match directory.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            None
        }
        Entry::Occupied(mut slot) => match (slot.get_mut(), value) {
            (TreeNode::Directory(existing), TreeNode::Directory(children)) => {
                merge(existing, children)
            }
            (existing, value) => Some(std::mem::replace(existing, value)),
        },
    }
}
