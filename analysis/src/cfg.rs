use std::fmt::Write;

pub trait CfgBlock {
    type Element;

    fn operations(&self) -> &[Self::Element];
    fn successors(&self) -> &[usize];
    fn predecessors(&self) -> &[usize];
}

/// Blocks are addressed by their index in the slice returned by
/// [`ControlFlowGraph::blocks`]. The block with index 0 is the entry.
pub trait ControlFlowGraph {
    type Block: CfgBlock;
    fn blocks(&self) -> &[Self::Block];
}

/// Renders a control flow graph in graphviz format. The caller provides
/// the way individual operations are printed.
pub fn print<Cfg, OpPrinter>(cfg: &Cfg, printer: OpPrinter) -> String
where
    Cfg: ControlFlowGraph,
    OpPrinter: Fn(&<<Cfg as ControlFlowGraph>::Block as CfgBlock>::Element) -> String,
{
    let mut output = "digraph CFG {\n".to_owned();
    for (id, block) in cfg.blocks().iter().enumerate() {
        let text: Vec<_> = block.operations().iter().map(&printer).collect();
        writeln!(output, "  Node_{id}[label=\"{}\"]", text.join("\\n")).unwrap();
    }
    output.push('\n');
    for (id, block) in cfg.blocks().iter().enumerate() {
        for next in block.successors() {
            writeln!(output, "  Node_{id} -> Node_{next}").unwrap();
        }
    }
    output.push_str("}\n");
    output
}
