//! This crate contains helpers to analyze the shape of
//! [control flow graphs](https://en.wikipedia.org/wiki/Control-flow_graph).
//! The algorithms only depend on the successor/predecessor edges of the
//! blocks, never on the operations inside them, so they work on any type
//! implementing the [`cfg::ControlFlowGraph`] trait. The centerpiece is the
//! [Lengauer-Tarjan](https://doi.org/10.1145/357062.357071) dominator tree
//! construction in [`domtree`], with natural loop recognition built on top
//! of it in [`loops`].
//!
//! Look at the lir-lib crate for an example how to connect an instruction
//! representation to these analyses.

/// Traits for defining a control flow graph and a graphviz printer for
/// debugging them.
pub mod cfg;

/// Depth-first numbering of a control flow graph and dominator tree
/// construction using the Lengauer-Tarjan algorithm.
pub mod domtree;

/// Back edge and natural loop recognition based on the dominator tree.
pub mod loops;



#[cfg(test)]
mod loops_tests;
