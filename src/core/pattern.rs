//! The `PatternTree` is the single mutable tree grown and backtracked by the
//! enumeration driver.
//!
//! Because growth is strictly depth-first — every `push_child` at a given
//! recursion frame is matched by a `pop_child` before that frame returns —
//! the set of live nodes at any instant is always a prefix of creation
//! order. `push_child` appends to the end of the arena; `pop_child` asserts
//! (debug builds only) that it is popping the arena's last node and then
//! truncates by one, reclaiming the slot. This is the direct analogue of
//! the reference implementation's `new`/`delete` pair on raw pointers.

use super::tree::Label;

pub type PatternNodeId = usize;

#[derive(Debug, Clone)]
pub struct PatternNode {
    label: Label,
    pos: usize,
    parent: Option<PatternNodeId>,
    children: Vec<PatternNodeId>,
    subnode_count: usize,
}

impl PatternNode {
    pub fn label(&self) -> Label {
        self.label
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn parent(&self) -> Option<PatternNodeId> {
        self.parent
    }

    pub fn children(&self) -> &[PatternNodeId] {
        &self.children
    }

    pub fn subnode_count(&self) -> usize {
        self.subnode_count
    }
}

#[derive(Debug)]
pub struct PatternTree {
    arena: Vec<PatternNode>,
}

impl PatternTree {
    /// Starts a new single-node pattern tree rooted at `label`.
    pub fn new_root(label: Label) -> Self {
        PatternTree {
            arena: vec![PatternNode {
                label,
                pos: 1,
                parent: None,
                children: Vec::new(),
                subnode_count: 0,
            }],
        }
    }

    pub fn root(&self) -> PatternNodeId {
        0
    }

    pub fn node(&self, id: PatternNodeId) -> &PatternNode {
        &self.arena[id]
    }

    /// Total node count of the pattern: `root.subnode_count + 1`.
    pub fn size(&self) -> usize {
        self.arena[0].subnode_count + 1
    }

    /// Appends a new child with label `label` beneath `attachment`,
    /// incrementing `subnode_count` on `attachment` and every one of its
    /// ancestors. Returns the new child's id.
    pub fn push_child(&mut self, attachment: PatternNodeId, label: Label) -> PatternNodeId {
        let pos = {
            let a = &self.arena[attachment];
            a.pos + a.subnode_count + 1
        };

        let new_id = self.arena.len();
        self.arena.push(PatternNode {
            label,
            pos,
            parent: Some(attachment),
            children: Vec::new(),
            subnode_count: 0,
        });
        self.arena[attachment].children.push(new_id);

        let mut cur = Some(attachment);
        while let Some(c) = cur {
            self.arena[c].subnode_count += 1;
            cur = self.arena[c].parent;
        }

        new_id
    }

    /// Removes `attachment`'s last child, decrementing `subnode_count` back
    /// down. `expected` must be the node most recently returned by
    /// `push_child(attachment, ..)` — in debug builds this is checked and a
    /// mismatch panics (`StackMisuse`, an implementation bug rather than a
    /// user-facing error).
    pub fn pop_child(&mut self, attachment: PatternNodeId, expected: PatternNodeId) {
        debug_assert_eq!(
            self.arena.len(),
            expected + 1,
            "StackMisuse: popped node {expected} is not the most recently pushed pattern node"
        );
        debug_assert_eq!(
            self.arena[attachment].children.last().copied(),
            Some(expected),
            "StackMisuse: popped node {expected} is not attachment {attachment}'s last child"
        );

        self.arena[attachment].children.pop();

        let mut cur = Some(attachment);
        while let Some(c) = cur {
            self.arena[c].subnode_count -= 1;
            cur = self.arena[c].parent;
        }

        self.arena.pop();
    }

    /// Serializes the whole pattern (from the root) using the prefix/close
    /// grammar, matching `InputTree::to_vector`'s shape.
    pub fn to_vector(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.arena.len() * 2);
        self.write_node(self.root(), &mut out);
        out
    }

    fn write_node(&self, id: PatternNodeId, out: &mut Vec<i64>) {
        let node = &self.arena[id];
        out.push(node.label as i64);
        for &child in &node.children {
            self.write_node(child, out);
        }
        out.push(-1);
    }
}
