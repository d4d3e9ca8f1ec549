use fixedbitset::FixedBitSet;

use crate::cfg::{CfgBlock, ControlFlowGraph};
use crate::domtree::DominatorTree;

/// Returns the back edges of the graph as (source, target) pairs: the
/// edges whose target dominates their source. Only edges between blocks
/// reachable from the entry are considered. The edges are ordered by
/// decreasing discovery time of their target.
pub fn back_edges<Cfg: ControlFlowGraph>(cfg: &Cfg, doms: &DominatorTree) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for &block in doms.dfs().preorder().iter().rev() {
        for &pred in cfg.blocks()[block].predecessors() {
            if doms.dfs().is_reachable(pred) && doms.dominates(block, pred) {
                edges.push((pred, block));
            }
        }
    }
    edges
}

/// The distinct targets of back edges. On a reducible graph these are
/// exactly the loop headers, each one counted once no matter how many back
/// edges it receives.
pub fn loop_headers<Cfg: ControlFlowGraph>(cfg: &Cfg, doms: &DominatorTree) -> Vec<usize> {
    let mut seen = FixedBitSet::with_capacity(cfg.blocks().len());
    let mut headers = Vec::new();
    for (_, header) in back_edges(cfg, doms) {
        if !seen.contains(header) {
            seen.insert(header);
            headers.push(header);
        }
    }
    headers
}

/// The number of natural loops in the graph, i.e., the number of distinct
/// loop headers.
pub fn count_natural_loops<Cfg: ControlFlowGraph>(cfg: &Cfg, doms: &DominatorTree) -> usize {
    loop_headers(cfg, doms).len()
}
