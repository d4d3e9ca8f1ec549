use analysis::cfg::ControlFlowGraph;
use analysis::domtree::DominatorTree;
use analysis::loops;

use crate::ir::{CmdId, FlowGraph, Instruction};

/// Runs the full pipeline over a program: builds the flow graph, numbers
/// it depth-first, constructs the dominator tree and counts the distinct
/// natural loop headers. An empty program has no loops.
pub fn count_natural_loops(program: &[Instruction]) -> usize {
    let graph = FlowGraph::build(program);
    if graph.blocks().is_empty() {
        return 0;
    }
    let doms = DominatorTree::new(&graph);
    loops::count_natural_loops(&graph, &doms)
}

/// The external ids of the loop header commands, in decreasing discovery
/// time order of the headers.
pub fn loop_header_ids(graph: &FlowGraph) -> Vec<CmdId> {
    if graph.blocks().is_empty() {
        return Vec::new();
    }
    let doms = DominatorTree::new(graph);
    loops::loop_headers(graph, &doms)
        .into_iter()
        .map(|block| graph.command_id(block))
        .collect()
}
