/*!

  Dominator analysis: iterative fixed-point set intersection (Muchnick 7.3),
  and derivation of the immediate-dominator tree from the resulting sets.

  There is no direct ancestor of this module in the rest of this lineage;
  it is grounded instead on the `Analysis/dominance.h`/`.cpp` pairing this
  crate's IR model is itself descended from.

*/

use crate::core::graph::Graph;
use std::collections::{HashMap, HashSet};

/// `Dom[n]` for every node `n` reachable from the root. Unreachable nodes do
/// not appear in the map.
pub type DominatorMap = HashMap<usize, HashSet<usize>>;

fn update_dominators(dom: &mut DominatorMap, predecessor: usize, cfg: &Graph) -> bool {
    let mut changed = false;
    for &succ in cfg.successors(predecessor) {
        let mut allowed = dom[&predecessor].clone();
        allowed.insert(succ);
        let before = dom[&succ].len();
        dom.get_mut(&succ).unwrap().retain(|n| allowed.contains(n));
        if dom[&succ].len() != before {
            changed = true;
        }
    }
    changed
}

/// Compute the dominator sets of every node reachable from the root of `cfg`.
pub fn dominators_slow(cfg: &Graph) -> DominatorMap {
    let nodes = cfg.dfs_order();
    let universe: HashSet<usize> = nodes.iter().copied().collect();

    let mut dom = DominatorMap::new();
    for &n in &nodes {
        if n == 0 {
            dom.insert(n, HashSet::from([0]));
        } else {
            dom.insert(n, universe.clone());
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for &node in &nodes {
            changed |= update_dominators(&mut dom, node, cfg);
        }
    }
    dom
}

/// Derive the immediate-dominator tree from `cfg`'s dominator sets: for every
/// non-root reachable node `n`, find the dominator `d` with
/// `|Dom[d]| + 1 == |Dom[n]|` and emit the arc `d -> n`.
pub fn build_dominator_tree(cfg: &Graph) -> Graph {
    let dom = dominators_slow(cfg);
    let mut tree = Graph::new();
    let mut nodes: Vec<usize> = dom.keys().copied().collect();
    nodes.sort_unstable();
    for n in nodes {
        if n == 0 {
            continue;
        }
        let n_dom = &dom[&n];
        let idom = n_dom
            .iter()
            .find(|&&d| d != n && dom[&d].len() + 1 == n_dom.len())
            .copied()
            .expect("every non-root reachable node has exactly one immediate dominator");
        tree.add_arc(idom, n);
    }
    tree
}
