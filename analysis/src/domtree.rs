use crate::cfg::{CfgBlock, ControlFlowGraph};

/// The depth-first spanning tree of a control flow graph. Every block
/// reachable from the entry gets a unique discovery time starting from 1,
/// in the order a preorder walk first sees it; unreachable blocks keep the
/// time 0 and are excluded from all dominator related queries.
#[derive(Clone, Debug)]
pub struct DfsTree {
    discovery: Vec<usize>,
    parent: Vec<Option<usize>>,
    preorder: Vec<usize>,
}

impl DfsTree {
    /// Number the blocks of `cfg` starting from block 0. The traversal uses
    /// an explicit stack, so arbitrarily long instruction chains cannot
    /// exhaust the call stack. Successors are tried in their stored order,
    /// which makes the numbering deterministic.
    pub fn new<Cfg: ControlFlowGraph>(cfg: &Cfg) -> Self {
        let node_num = cfg.blocks().len();
        let mut discovery = vec![0_usize; node_num];
        let mut parent = vec![None; node_num];
        let mut preorder = Vec::with_capacity(node_num);

        if node_num > 0 {
            discovery[0] = 1;
            preorder.push(0);

            // Each frame remembers which successor to try next, so a block
            // stays on the stack until its whole subtree is numbered.
            let mut stack = vec![(0_usize, 0_usize)];
            while let Some(frame) = stack.last_mut() {
                let (block, succ_idx) = *frame;
                let succs = cfg.blocks()[block].successors();
                if succ_idx == succs.len() {
                    stack.pop();
                    continue;
                }
                frame.1 += 1;

                let next = succs[succ_idx];
                if discovery[next] == 0 {
                    discovery[next] = preorder.len() + 1;
                    parent[next] = Some(block);
                    preorder.push(next);
                    stack.push((next, 0));
                }
            }
        }

        Self {
            discovery,
            parent,
            preorder,
        }
    }

    /// The discovery time of a block; 0 means the block is not reachable
    /// from the entry.
    pub fn discovery_time(&self, block: usize) -> usize {
        self.discovery[block]
    }

    pub fn is_reachable(&self, block: usize) -> bool {
        self.discovery[block] != 0
    }

    /// The block that first discovered `block` during the traversal, i.e.,
    /// its parent in the spanning tree. `None` for the entry and for
    /// unreachable blocks.
    pub fn parent(&self, block: usize) -> Option<usize> {
        self.parent[block]
    }

    /// Reachable blocks in increasing discovery time order.
    pub fn preorder(&self) -> &[usize] {
        &self.preorder
    }
}

/// The link-eval forest of the Lengauer-Tarjan algorithm. It answers
/// "which node on the path to the forest root has the semidominator with
/// the smallest discovery time" while compressing the queried paths.
/// This is the path-compression-only variant without union by rank, so the
/// worst case bound is weaker than the full algorithm's; on the DFS tree
/// shapes produced by real programs the difference does not show.
struct LinkEvalForest {
    ancestor: Vec<Option<usize>>,
    label: Vec<usize>,
}

impl LinkEvalForest {
    fn new(node_num: usize) -> Self {
        Self {
            ancestor: vec![None; node_num],
            label: (0..node_num).collect(),
        }
    }

    /// Grafts `node` into the forest under its DFS tree parent.
    fn link(&mut self, node: usize, parent: usize) {
        self.ancestor[node] = Some(parent);
    }

    /// Returns the node with the minimal-discovery-time semidominator on
    /// the path from `node` to its forest root. A node that was never
    /// linked evaluates to itself.
    fn eval(&mut self, node: usize, sdom: &[usize], dfs: &DfsTree) -> usize {
        let Some(mut up) = self.ancestor[node] else {
            return self.label[node];
        };

        // Collect the chain of ancestors, the forest root excluded. The
        // labels are then fixed up from the root downwards, which matches
        // the order the recursive formulation compresses in: every node
        // sees the already-final label of its original ancestor.
        let mut path = vec![node];
        while let Some(next) = self.ancestor[up] {
            path.push(up);
            up = next;
        }
        let root = up;

        let mut above = root;
        for &current in path.iter().rev() {
            debug_assert!(dfs.is_reachable(current));
            if dfs.discovery_time(sdom[self.label[above]])
                < dfs.discovery_time(sdom[self.label[current]])
            {
                self.label[current] = self.label[above];
            }
            self.ancestor[current] = Some(root);
            above = current;
        }

        self.label[node]
    }
}

/// The dominator tree of a control flow graph, built with the simplified
/// Lengauer-Tarjan algorithm. The construction assumes nothing about the
/// graph, but the natural loop queries downstream are only meaningful on
/// reducible graphs, where every loop has a single header dominating the
/// whole loop body.
#[derive(Clone, Debug)]
pub struct DominatorTree {
    dfs: DfsTree,
    sdom: Vec<usize>,
    idom: Vec<usize>,
}

impl DominatorTree {
    pub fn new<Cfg: ControlFlowGraph>(cfg: &Cfg) -> Self {
        let dfs = DfsTree::new(cfg);
        let node_num = cfg.blocks().len();
        let mut sdom: Vec<usize> = (0..node_num).collect();
        let mut idom: Vec<usize> = vec![0; node_num];
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); node_num];
        let mut forest = LinkEvalForest::new(node_num);

        // Process everything but the entry in decreasing discovery time
        // order. By the time a block is processed, all blocks discovered
        // after it already have their semidominator.
        for &current in dfs.preorder().iter().skip(1).rev() {
            for &pred in cfg.blocks()[current].predecessors() {
                if !dfs.is_reachable(pred) {
                    continue;
                }
                let min = forest.eval(pred, &sdom, &dfs);
                if dfs.discovery_time(sdom[min]) < dfs.discovery_time(sdom[current]) {
                    sdom[current] = sdom[min];
                }
            }

            let parent = dfs
                .parent(current)
                .expect("Non-entry reachable block without a DFS parent.");
            forest.link(current, parent);
            buckets[sdom[current]].push(current);

            // Blocks whose semidominator is the parent can be resolved now:
            // either the semidominator is the immediate dominator, or the
            // immediate dominator is shared with a node on the path and
            // gets patched in the forward pass below.
            for node in std::mem::take(&mut buckets[parent]) {
                assert!(
                    dfs.is_reachable(node),
                    "Unreachable block in a dominator bucket."
                );
                let min = forest.eval(node, &sdom, &dfs);
                idom[node] = if sdom[min] == sdom[node] {
                    sdom[node]
                } else {
                    min
                };
            }
        }

        // Forward pass in increasing discovery time order chases the
        // provisional links to the final dominators.
        for &current in dfs.preorder().iter().skip(1) {
            if idom[current] != sdom[current] {
                idom[current] = idom[idom[current]];
            }
        }

        Self { dfs, sdom, idom }
    }

    pub fn dfs(&self) -> &DfsTree {
        &self.dfs
    }

    /// The immediate dominator of a block; `None` for the entry and for
    /// unreachable blocks.
    pub fn immediate_dominator(&self, block: usize) -> Option<usize> {
        if self.dfs.discovery_time(block) <= 1 {
            return None;
        }
        Some(self.idom[block])
    }

    /// The semidominator of a block; `None` for the entry and for
    /// unreachable blocks.
    pub fn semidominator(&self, block: usize) -> Option<usize> {
        if self.dfs.discovery_time(block) <= 1 {
            return None;
        }
        Some(self.sdom[block])
    }

    /// Whether `dom` dominates `block`, i.e., every path from the entry to
    /// `block` goes through `dom`. The relation is reflexive. Unreachable
    /// blocks dominate nothing and are dominated by nothing.
    pub fn dominates(&self, dom: usize, block: usize) -> bool {
        if !self.dfs.is_reachable(dom) || !self.dfs.is_reachable(block) {
            return false;
        }
        let mut current = block;
        loop {
            if current == dom {
                return true;
            }
            match self.immediate_dominator(current) {
                Some(next) => current = next,
                None => return false,
            }
        }
    }
}
