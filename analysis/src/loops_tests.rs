use itertools::Itertools;

use super::cfg_tests::TestCfg;
use super::domtree::DominatorTree;
use super::loops::{back_edges, count_natural_loops, loop_headers};

fn count(cfg: &TestCfg) -> usize {
    let doms = DominatorTree::new(cfg);
    count_natural_loops(cfg, &doms)
}

#[test]
fn test_no_loops() {
    let mut cfg = TestCfg::new(4);
    cfg.add_edge(0, 1).add_edge(1, 2).add_edge(2, 3);
    assert_eq!(count(&cfg), 0);

    //     0
    //    / \
    //   1   2
    //    \ /
    //     3
    let mut cfg = TestCfg::new(4);
    cfg.add_edge(0, 1)
        .add_edge(0, 2)
        .add_edge(1, 3)
        .add_edge(2, 3);
    assert_eq!(count(&cfg), 0);
}

#[test]
fn test_self_loop() {
    let mut cfg = TestCfg::new(2);
    cfg.add_edge(0, 1).add_edge(1, 1);

    let doms = DominatorTree::new(&cfg);
    assert_eq!(back_edges(&cfg, &doms), vec![(1, 1)]);
    assert_eq!(loop_headers(&cfg, &doms), vec![1]);
}

#[test]
fn test_simple_loop() {
    // 0 <-> 1
    let mut cfg = TestCfg::new(2);
    cfg.add_edge(0, 1).add_edge(1, 0);

    let doms = DominatorTree::new(&cfg);
    assert_eq!(back_edges(&cfg, &doms), vec![(1, 0)]);
    assert_eq!(loop_headers(&cfg, &doms), vec![0]);
}

#[test]
fn test_nested_loops() {
    // 0 -> 1 -> 2 -> 3, the inner back edge 3 -> 2, the outer 3 -> 1.
    let mut cfg = TestCfg::new(4);
    cfg.add_edge(0, 1)
        .add_edge(1, 2)
        .add_edge(2, 3)
        .add_edge(3, 2)
        .add_edge(3, 1);

    let doms = DominatorTree::new(&cfg);
    assert_eq!(loop_headers(&cfg, &doms), vec![2, 1]);
    assert_eq!(count(&cfg), 2);
}

#[test]
fn test_multiple_back_edges_one_header() {
    // Two back edges targeting the same header count as one loop.
    let mut cfg = TestCfg::new(4);
    cfg.add_edge(0, 1)
        .add_edge(1, 2)
        .add_edge(1, 3)
        .add_edge(2, 1)
        .add_edge(3, 1);

    let doms = DominatorTree::new(&cfg);
    assert_eq!(back_edges(&cfg, &doms).len(), 2);
    assert_eq!(loop_headers(&cfg, &doms), vec![1]);
}

#[test]
fn test_disjoint_loops() {
    // Two independent cycles reachable from the entry.
    let mut cfg = TestCfg::new(5);
    cfg.add_edge(0, 1)
        .add_edge(1, 2)
        .add_edge(2, 1)
        .add_edge(2, 3)
        .add_edge(3, 4)
        .add_edge(4, 3);
    assert_eq!(count(&cfg), 2);

    // The same shape wired in the opposite input order.
    let mut cfg = TestCfg::new(5);
    cfg.add_edge(0, 3)
        .add_edge(3, 4)
        .add_edge(4, 3)
        .add_edge(4, 1)
        .add_edge(1, 2)
        .add_edge(2, 1);
    assert_eq!(count(&cfg), 2);
}

#[test]
fn test_unreachable_cycle_ignored() {
    // Blocks 2 and 3 form a cycle no path from the entry enters.
    let mut cfg = TestCfg::new(4);
    cfg.add_edge(0, 1).add_edge(2, 3).add_edge(3, 2);
    assert_eq!(count(&cfg), 0);

    // An unreachable edge into a reachable block is not a back edge.
    let mut cfg = TestCfg::new(3);
    cfg.add_edge(0, 1).add_edge(2, 0);
    assert_eq!(count(&cfg), 0);
}

#[test]
fn test_forward_edge_is_not_a_back_edge() {
    // 1 -> 3 skips ahead; 3 does not dominate 1 and 1 does not loop.
    let mut cfg = TestCfg::new(4);
    cfg.add_edge(0, 1)
        .add_edge(1, 2)
        .add_edge(2, 3)
        .add_edge(1, 3);
    assert_eq!(count(&cfg), 0);
}

#[test]
fn test_loop_with_branches_inside() {
    //       0
    //       |
    //  +--> 1
    //  |   / \
    //  |  2   3
    //  |   \ /
    //  +--- 4 --> 5
    let mut cfg = TestCfg::new(6);
    cfg.add_edge(0, 1)
        .add_edge(1, 2)
        .add_edge(1, 3)
        .add_edge(2, 4)
        .add_edge(3, 4)
        .add_edge(4, 1)
        .add_edge(4, 5);

    let doms = DominatorTree::new(&cfg);
    assert_eq!(back_edges(&cfg, &doms), vec![(4, 1)]);
    assert_eq!(loop_headers(&cfg, &doms), vec![1]);
}

#[test]
fn test_headers_sorted_by_discovery() {
    // Headers come out in decreasing discovery time order; sorting them
    // makes the expectation independent of the traversal.
    let mut cfg = TestCfg::new(7);
    cfg.add_edge(0, 1)
        .add_edge(1, 2)
        .add_edge(2, 1)
        .add_edge(1, 3)
        .add_edge(3, 4)
        .add_edge(4, 3)
        .add_edge(4, 5)
        .add_edge(5, 6)
        .add_edge(6, 5);

    let doms = DominatorTree::new(&cfg);
    let headers: Vec<_> = loop_headers(&cfg, &doms).into_iter().sorted().collect();
    assert_eq!(headers, vec![1, 3, 5]);
}
