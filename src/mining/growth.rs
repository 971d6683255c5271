//! Scans a projected database for candidate single-node extensions that
//! meet the support threshold.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::pattern::{PatternNodeId, PatternTree};
use crate::core::projection::ProDB;
use crate::core::tree::{Label, TreeId};

/// A candidate single-node extension: attach a new child labeled `label`
/// beneath pattern node `attachment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthElement {
    pub label: Label,
    pub attachment: PatternNodeId,
}

/// Every `(label, attachment)` pair whose support — the number of distinct
/// tree ids among projected instances that have `attachment` as a key and
/// contain at least one descendant (including the residual root itself)
/// labeled `label` — is at least `min_sup`.
///
/// The result is sorted by `(label, attachment.pos())`, giving a
/// deterministic order across runs without a separate hash-then-sort pass:
/// aggregation already goes through a `BTreeMap`/`BTreeSet`.
pub fn growth_elements(prodb: &ProDB<'_>, pattern: &PatternTree, min_sup: usize) -> Vec<GrowthElement> {
    let mut candidates: BTreeMap<(Label, PatternNodeId), BTreeSet<TreeId>> = BTreeMap::new();

    for instance in prodb {
        for (&attachment, residuals) in instance.attachments() {
            for residual in residuals {
                for label in residual.labels_in_subtree() {
                    candidates
                        .entry((label, attachment))
                        .or_default()
                        .insert(instance.tree_id());
                }
            }
        }
    }

    let mut elements: Vec<GrowthElement> = candidates
        .into_iter()
        .filter(|(_, tree_ids)| tree_ids.len() >= min_sup)
        .map(|((label, attachment), _)| GrowthElement { label, attachment })
        .collect();

    elements.sort_by_key(|ge| (ge.label, pattern.node(ge.attachment).pos()));
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projection::ProjectedInstance;
    use crate::core::tree::InputTree;

    #[test]
    fn counts_distinct_trees_not_occurrences() {
        // Two occurrences of label 2 under the root, but within one tree:
        // support for (2, root) should still be 1, below a min_sup of 2.
        let tree = InputTree::parse(1, &[1, 2, -1, 2, -1, -1]).unwrap();
        let pattern = PatternTree::new_root(1);
        let prodb = vec![ProjectedInstance::seed(tree.root(), pattern.root())];

        let elements = growth_elements(&prodb, &pattern, 2);
        assert!(elements.is_empty());

        let elements = growth_elements(&prodb, &pattern, 1);
        assert_eq!(elements, vec![GrowthElement { label: 2, attachment: pattern.root() }]);
    }

    #[test]
    fn aggregates_across_multiple_trees() {
        let t1 = InputTree::parse(1, &[1, 2, -1, -1]).unwrap();
        let t2 = InputTree::parse(2, &[1, 2, -1, -1]).unwrap();
        let pattern = PatternTree::new_root(1);
        let prodb = vec![
            ProjectedInstance::seed(t1.root(), pattern.root()),
            ProjectedInstance::seed(t2.root(), pattern.root()),
        ];

        let elements = growth_elements(&prodb, &pattern, 2);
        assert_eq!(elements, vec![GrowthElement { label: 2, attachment: pattern.root() }]);
    }
}
