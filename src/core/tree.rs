//! The `InputTree` is one rooted, ordered, labeled tree from the database.
//!
//! Nodes live in a single arena per tree, and because the parser builds a
//! node's entire subtree before moving on to its next sibling, the arena is
//! always populated in the tree's own pre-order: arena index `i` is node
//! `pos = i + 1`. Input trees are immutable after [`InputTree::parse`]
//! returns, so this coincidence never needs to be maintained under mutation
//! the way the pattern tree's arena does (see [`crate::core::pattern`]).

use std::collections::BTreeMap;

use crate::error::Error;

pub type Label = u32;
pub type TreeId = u32;

#[derive(Debug, Clone)]
struct InputNode {
    label: Label,
    pos: usize,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// One tree of the mining database. Built once by [`InputTree::parse`] and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct InputTree {
    id: TreeId,
    arena: Vec<InputNode>,
}

impl InputTree {
    /// Builds a tree from an integer token stream using the grammar: a
    /// non-negative integer opens a node, `-1` closes the node most recently
    /// opened.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if `tokens` is empty, begins with
    /// `-1`, is truncated before the outer node closes, or has tokens left
    /// over after the outer node closes.
    pub fn parse(id: TreeId, tokens: &[i64]) -> Result<Self, Error> {
        if tokens.is_empty() {
            return Err(Error::MalformedInput {
                line: id as usize,
                reason: "empty tree".to_string(),
            });
        }
        if tokens[0] < 0 {
            return Err(Error::MalformedInput {
                line: id as usize,
                reason: "tree begins with a close marker".to_string(),
            });
        }

        let mut arena = Vec::with_capacity(tokens.len() / 2);
        let consumed = Self::parse_node(tokens, 0, None, 1, id, &mut arena)?;
        if consumed != tokens.len() {
            return Err(Error::MalformedInput {
                line: id as usize,
                reason: format!(
                    "{} trailing token(s) after the outer node closed",
                    tokens.len() - consumed
                ),
            });
        }

        Ok(InputTree { id, arena })
    }

    /// Parses one node (and its whole subtree) starting at `tokens[start]`.
    /// Returns the number of tokens consumed, i.e. the index just past the
    /// node's own close marker.
    fn parse_node(
        tokens: &[i64],
        start: usize,
        parent: Option<usize>,
        pos: usize,
        tree_id: TreeId,
        arena: &mut Vec<InputNode>,
    ) -> Result<usize, Error> {
        let label = tokens[start];
        if label < 0 {
            return Err(Error::MalformedInput {
                line: tree_id as usize,
                reason: "unexpected close marker where a label was expected".to_string(),
            });
        }
        let label = label as Label;

        let idx = arena.len();
        arena.push(InputNode {
            label,
            pos,
            parent,
            children: Vec::new(),
        });

        let mut cursor = start + 1;
        let mut subnode_count = 0usize;
        loop {
            if cursor >= tokens.len() {
                return Err(Error::MalformedInput {
                    line: tree_id as usize,
                    reason: "subtree truncated before it closed".to_string(),
                });
            }
            if tokens[cursor] == -1 {
                cursor += 1;
                break;
            }
            let child_pos = pos + subnode_count + 1;
            let child_idx = arena.len();
            let consumed = Self::parse_node(tokens, cursor, Some(idx), child_pos, tree_id, arena)?;
            arena[idx].children.push(child_idx);
            // each node occupies exactly two tokens (its label and its close
            // marker), so the subtree's node count is half its token span.
            subnode_count += (consumed - cursor) / 2;
            cursor = consumed;
        }

        Ok(cursor)
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn root(&self) -> InputNodeRef<'_> {
        InputNodeRef { tree: self, idx: 0 }
    }

    /// Serializes back to the prefix/close grammar. Round-trips through
    /// [`InputTree::parse`] to the same structure (labels and child order),
    /// though `pos` is re-derived rather than compared literally.
    pub fn to_vector(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.arena.len() * 2);
        self.write_node(0, &mut out);
        out
    }

    fn write_node(&self, idx: usize, out: &mut Vec<i64>) {
        let node = &self.arena[idx];
        out.push(node.label as i64);
        for &child in &node.children {
            self.write_node(child, out);
        }
        out.push(-1);
    }

    /// For each label occurring in the tree, the ordered (pre-order) list of
    /// nodes bearing it.
    pub fn label_map(&self) -> BTreeMap<Label, Vec<InputNodeRef<'_>>> {
        let mut map: BTreeMap<Label, Vec<InputNodeRef<'_>>> = BTreeMap::new();
        for idx in 0..self.arena.len() {
            map.entry(self.arena[idx].label)
                .or_default()
                .push(InputNodeRef { tree: self, idx });
        }
        map
    }

    /// As [`InputTree::label_map`], restricted to one label.
    pub fn label_nodes(&self, label: Label) -> Vec<InputNodeRef<'_>> {
        (0..self.arena.len())
            .filter(|&idx| self.arena[idx].label == label)
            .map(|idx| InputNodeRef { tree: self, idx })
            .collect()
    }
}

/// A lightweight, `Copy` reference to one node of an [`InputTree`].
#[derive(Debug, Clone, Copy)]
pub struct InputNodeRef<'d> {
    tree: &'d InputTree,
    idx: usize,
}

impl<'d> PartialEq for InputNodeRef<'d> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.idx == other.idx
    }
}
impl<'d> Eq for InputNodeRef<'d> {}

impl<'d> InputNodeRef<'d> {
    pub fn tree_id(&self) -> TreeId {
        self.tree.id
    }

    pub fn label(&self) -> Label {
        self.tree.arena[self.idx].label
    }

    pub fn pos(&self) -> usize {
        self.tree.arena[self.idx].pos
    }

    pub fn parent(&self) -> Option<InputNodeRef<'d>> {
        self.tree.arena[self.idx].parent.map(|idx| InputNodeRef { tree: self.tree, idx })
    }

    pub fn children(&self) -> impl Iterator<Item = InputNodeRef<'d>> + '_ {
        self.tree.arena[self.idx]
            .children
            .iter()
            .map(move |&idx| InputNodeRef { tree: self.tree, idx })
    }

    pub fn has_children(&self) -> bool {
        !self.tree.arena[self.idx].children.is_empty()
    }

    /// The multiset of labels in this node's subtree, in pre-order,
    /// including this node's own label. Used only to seed growth-element
    /// candidates, so duplicates are left in rather than paying for a
    /// dedup pass the caller doesn't need.
    pub fn labels_in_subtree(&self) -> Vec<Label> {
        let mut out = Vec::new();
        self.collect_labels(&mut out);
        out
    }

    fn collect_labels(&self, out: &mut Vec<Label>) {
        out.push(self.label());
        for child in self.children() {
            child.collect_labels(out);
        }
    }

    /// Every descendant of this node (including itself) carrying `label`,
    /// in pre-order.
    pub fn descendants_with_label(&self, label: Label) -> Vec<InputNodeRef<'d>> {
        let mut out = Vec::new();
        self.collect_with_label(label, &mut out);
        out
    }

    fn collect_with_label(&self, label: Label, out: &mut Vec<InputNodeRef<'d>>) {
        if self.label() == label {
            out.push(*self);
        }
        for child in self.children() {
            child.collect_with_label(label, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_tree() {
        let tokens = vec![1, 2, -1, 3, -1, -1];
        let tree = InputTree::parse(1, &tokens).unwrap();
        assert_eq!(tree.root().label(), 1);
        let children: Vec<_> = tree.root().children().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].label(), 2);
        assert_eq!(children[1].label(), 3);
    }

    #[test]
    fn round_trips_through_to_vector() {
        let tokens = vec![2, 1, 3, 5, -1, -1, -1, 1, 2, -1, 4, -1, -1, -1];
        let tree = InputTree::parse(1, &tokens).unwrap();
        assert_eq!(tree.to_vector(), tokens);
    }

    #[test]
    fn assigns_preorder_positions() {
        let tokens = vec![1, 2, -1, 3, 4, -1, -1, -1];
        let tree = InputTree::parse(1, &tokens).unwrap();
        let root = tree.root();
        assert_eq!(root.pos(), 1);
        let children: Vec<_> = root.children().collect();
        assert_eq!(children[0].pos(), 2);
        assert_eq!(children[1].pos(), 3);
        let grandchildren: Vec<_> = children[1].children().collect();
        assert_eq!(grandchildren[0].pos(), 4);
    }

    #[test]
    fn rejects_empty_input() {
        let err = InputTree::parse(1, &[]).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn rejects_leading_close_marker() {
        let err = InputTree::parse(1, &[-1, 1, -1]).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn rejects_truncated_subtree() {
        let err = InputTree::parse(1, &[1, 2, -1]).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn rejects_trailing_tokens() {
        let err = InputTree::parse(1, &[1, -1, 2, -1]).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn label_map_is_preorder_per_label() {
        let tokens = vec![1, 1, -1, 2, 1, -1, -1, -1];
        let tree = InputTree::parse(1, &tokens).unwrap();
        let map = tree.label_map();
        let ones = &map[&1];
        assert_eq!(ones.len(), 3);
        assert_eq!(ones.iter().map(|n| n.pos()).collect::<Vec<_>>(), vec![1, 2, 4]);
    }
}
