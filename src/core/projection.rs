//! One occurrence of the current pattern inside one input tree, and the
//! database of all such occurrences at a given point in the search.

use std::collections::BTreeMap;

use super::pattern::{PatternNodeId, PatternTree};
use super::tree::{InputNodeRef, TreeId};

/// One embedding of the current pattern in one input tree, recorded as
/// residual work at each attachment point. An attachment point is present
/// only while it still has unexplored residual subtrees.
#[derive(Debug, Clone)]
pub struct ProjectedInstance<'d> {
    tree_id: TreeId,
    attachments: BTreeMap<PatternNodeId, Vec<InputNodeRef<'d>>>,
}

/// The ordered sequence of projected instances at a given recursion level.
/// Multiple instances may share a `tree_id` when one input tree contains
/// several embeddings of the current pattern.
pub type ProDB<'d> = Vec<ProjectedInstance<'d>>;

impl<'d> ProjectedInstance<'d> {
    /// Maps an occurrence node to the pattern node it realizes. If `occ` has
    /// children, they become `mapped`'s residual work; otherwise this
    /// instance starts out with no attachment points at all.
    pub fn seed(occ: InputNodeRef<'d>, mapped: PatternNodeId) -> Self {
        let mut attachments = BTreeMap::new();
        if occ.has_children() {
            attachments.insert(mapped, occ.children().collect());
        }
        ProjectedInstance {
            tree_id: occ.tree_id(),
            attachments,
        }
    }

    pub fn tree_id(&self) -> TreeId {
        self.tree_id
    }

    pub fn attachments(&self) -> &BTreeMap<PatternNodeId, Vec<InputNodeRef<'d>>> {
        &self.attachments
    }

    /// Given that the pattern has just been extended by `mapped` (whose
    /// label is `L` and whose parent is the attachment point `A`), produces
    /// the new projected instances this embedding contributes.
    ///
    /// Returns an empty list if `A` has no residual work recorded for this
    /// embedding. Otherwise, for each residual subtree `R` at `A` and each
    /// descendant `core` of `R` (including `R` itself) labeled `L`: `core`'s
    /// own children become `mapped`'s residual work, the siblings to the
    /// right of each node on the walk from `core` up to (excluding) `R`
    /// become additional residual work at `A`, and every residual node to
    /// the right of `core` at every existing attachment point (including
    /// `A`) survives into the new instance. This is the right-of-extension
    /// rule that makes enumeration canonical: each embedded occurrence is
    /// produced exactly once.
    pub fn split(&self, pattern: &PatternTree, mapped: PatternNodeId) -> Vec<ProjectedInstance<'d>> {
        let mapped_node = pattern.node(mapped);
        let label = mapped_node.label();
        debug_assert!(
            mapped_node.parent().is_some(),
            "split: a pushed pattern node always has a parent attachment point"
        );
        let attached = mapped_node.parent().unwrap();

        let Some(residuals) = self.attachments.get(&attached) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for &r in residuals {
            for core in r.descendants_with_label(label) {
                let mut new_instance = ProjectedInstance::seed(core, mapped);

                let mut cur = core;
                while cur != r {
                    let parent = cur
                        .parent()
                        .expect("split: walk from core to r must stay within r's subtree");
                    for sibling in parent.children() {
                        if sibling.pos() > cur.pos() {
                            new_instance.attachments.entry(attached).or_default().push(sibling);
                        }
                    }
                    cur = parent;
                }

                for (&x, old_residuals) in &self.attachments {
                    for &s in old_residuals {
                        if s.pos() > core.pos() {
                            new_instance.attachments.entry(x).or_default().push(s);
                        }
                    }
                }

                out.push(new_instance);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::InputTree;

    #[test]
    fn seed_has_no_attachments_for_a_leaf_occurrence() {
        let tree = InputTree::parse(1, &[1, 2, -1, -1]).unwrap();
        let leaf = tree.root().children().next().unwrap();
        let pattern = PatternTree::new_root(2);
        let inst = ProjectedInstance::seed(leaf, pattern.root());
        assert!(inst.attachments().is_empty());
    }

    #[test]
    fn split_returns_empty_when_attachment_has_no_work() {
        let tree = InputTree::parse(1, &[1, -1]).unwrap();
        let mut pattern = PatternTree::new_root(1);
        let inst = ProjectedInstance::seed(tree.root(), pattern.root());
        let new_node = pattern.push_child(pattern.root(), 2);
        assert!(inst.split(&pattern, new_node).is_empty());
    }

    #[test]
    fn split_finds_descendant_matches_and_preserves_right_siblings() {
        // root(1) -> [a(2), b(2) -> [c(2)]]
        let tree = InputTree::parse(1, &[1, 2, -1, 2, 2, -1, -1, -1]).unwrap();
        let mut pattern = PatternTree::new_root(1);
        let inst = ProjectedInstance::seed(tree.root(), pattern.root());
        let mapped = pattern.push_child(pattern.root(), 2);

        let splits = inst.split(&pattern, mapped);
        // three occurrences of label 2 reachable from the root's residuals:
        // `a` itself, `b` itself, and `b`'s child `c`.
        assert_eq!(splits.len(), 3);
    }
}
