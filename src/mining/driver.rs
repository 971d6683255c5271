//! The depth-first enumeration driver: grow the pattern tree one node at a
//! time, re-project, recurse, then undo.

use std::collections::BTreeSet;

use crate::core::pattern::PatternTree;
use crate::core::projection::ProDB;

use super::growth::growth_elements;

/// Running totals accumulated as patterns are discovered.
#[derive(Debug, Default, Clone, Copy)]
pub struct MiningStats {
    pub pattern_count: usize,
    pub max_size: usize,
}

impl MiningStats {
    fn record(&mut self, size: usize) {
        self.pattern_count += 1;
        self.max_size = self.max_size.max(size);
    }
}

/// Extends `pattern` at every legal attachment point meeting `min_sup`,
/// emitting and recursing into each extension before reverting it.
///
/// `on_emit` is called once per discovered pattern, with the pattern tree
/// in the state it held at the moment of discovery (the extension is still
/// live on the arena; it is undone only after the call returns).
pub fn fre(
    pattern: &mut PatternTree,
    prodb: &ProDB<'_>,
    min_sup: usize,
    stats: &mut MiningStats,
    on_emit: &mut dyn FnMut(&PatternTree),
) {
    let elements = growth_elements(prodb, pattern, min_sup);
    log::debug!("pattern size {}: {} growth element(s) to try", pattern.size(), elements.len());

    for ge in elements {
        let child = pattern.push_child(ge.attachment, ge.label);

        let mut new_prodb = Vec::new();
        for instance in prodb {
            new_prodb.extend(instance.split(pattern, child));
        }

        let support = new_prodb.iter().map(|i| i.tree_id()).collect::<BTreeSet<_>>().len();
        log::trace!(
            "extended label={} attachment={} support={}",
            ge.label,
            ge.attachment,
            support
        );

        stats.record(pattern.size());
        on_emit(pattern);

        fre(pattern, &new_prodb, min_sup, stats, on_emit);

        pattern.pop_child(ge.attachment, child);
    }
}
