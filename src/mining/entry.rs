//! `PrefixESpan`: seeds the enumeration driver with every frequent
//! single-node pattern and folds the results of each seed's search into one
//! running total.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::pattern::PatternTree;
use crate::core::projection::ProjectedInstance;
use crate::core::tree::{InputTree, Label, TreeId};

use super::driver::{fre, MiningStats};

/// Mines `database` for every embedded ordered subtree occurring in at
/// least `min_sup` distinct trees, calling `on_emit` once per discovered
/// pattern (including each frequent single-node seed), and returns the
/// total pattern count and the largest pattern's node count.
pub fn prefix_espan(
    database: &[InputTree],
    min_sup: usize,
    on_emit: &mut dyn FnMut(&PatternTree),
) -> MiningStats {
    let mut stats = MiningStats::default();

    let mut occurrences: BTreeMap<Label, Vec<_>> = BTreeMap::new();
    let mut support: BTreeMap<Label, BTreeSet<TreeId>> = BTreeMap::new();
    for tree in database {
        for (label, nodes) in tree.label_map() {
            support.entry(label).or_default().insert(tree.id());
            occurrences.entry(label).or_default().extend(nodes);
        }
    }

    for (label, occs) in occurrences {
        let tree_count = support[&label].len();
        if tree_count < min_sup {
            continue;
        }
        log::debug!("seed label={} support={}", label, tree_count);

        let mut pattern = PatternTree::new_root(label);
        let root = pattern.root();
        let prodb = occs.iter().map(|&occ| ProjectedInstance::seed(occ, root)).collect::<Vec<_>>();

        stats.pattern_count += 1;
        stats.max_size = stats.max_size.max(pattern.size());
        on_emit(&pattern);

        fre(&mut pattern, &prodb, min_sup, &mut stats, on_emit);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tree_seeds_every_distinct_label() {
        let trees = vec![InputTree::parse(1, &[1, 2, -1, 3, -1, -1]).unwrap()];
        let mut count = 0;
        let stats = prefix_espan(&trees, 1, &mut |_| count += 1);
        // labels 1, 2, 3 are each frequent at min_sup 1; no multi-node
        // pattern reaches support 1 twice over since there is only one tree.
        assert_eq!(stats.pattern_count, 3);
        assert_eq!(count, 3);
    }

    #[test]
    fn raising_min_sup_drops_rare_labels() {
        let trees = vec![
            InputTree::parse(1, &[1, 2, -1, -1]).unwrap(),
            InputTree::parse(2, &[1, -1]).unwrap(),
        ];
        let mut emitted = Vec::new();
        let stats = prefix_espan(&trees, 2, &mut |p| emitted.push(p.to_vector()));
        // label 1 is frequent (both trees), label 2 is not (only tree 1)
        assert_eq!(stats.pattern_count, 1);
        assert_eq!(emitted, vec![vec![1, -1]]);
    }

    #[test]
    fn finds_a_two_node_embedded_pattern_across_both_trees() {
        // root(1) -> a(2), and root(1) -> x(9) -> a(2): both embed 1/2.
        let trees = vec![
            InputTree::parse(1, &[1, 2, -1, -1]).unwrap(),
            InputTree::parse(2, &[1, 9, 2, -1, -1, -1]).unwrap(),
        ];
        let mut emitted = Vec::new();
        let stats = prefix_espan(&trees, 2, &mut |p| emitted.push(p.to_vector()));
        assert!(emitted.contains(&vec![1, 2, -1, -1]));
        assert_eq!(stats.max_size, 2);
    }
}
