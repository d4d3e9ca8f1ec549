use core::fmt::Display;
use std::collections::HashMap;

use analysis::cfg::{CfgBlock, ControlFlowGraph};
use itertools::Itertools;

/// Externally supplied identifier of an instruction. Ids only have to be
/// unique, they do not have to be contiguous or ordered.
pub type CmdId = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Falls through to the next instruction of the program.
    Action(CmdId),
    /// Transfers control to the target or falls through to the next
    /// instruction.
    Branch(CmdId, CmdId),
    /// Unconditionally transfers control to the target.
    Jump(CmdId, CmdId),
}

impl Instruction {
    pub fn id(&self) -> CmdId {
        match *self {
            Instruction::Action(id) | Instruction::Branch(id, _) | Instruction::Jump(id, _) => id,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Instruction::Action(id) => write!(f, "{id} ACTION"),
            Instruction::Branch(id, target) => write!(f, "{id} BRANCH {target}"),
            Instruction::Jump(id, target) => write!(f, "{id} JUMP {target}"),
        }
    }
}

/// One node of the flow graph. A command is created for every instruction
/// id the program mentions, including ids that only ever appear as branch
/// or jump targets.
#[derive(Clone, Debug)]
pub struct Command {
    id: CmdId,
    succs: Vec<usize>,
    preds: Vec<usize>,
}

impl Command {
    pub fn id(&self) -> CmdId {
        self.id
    }
}

impl CfgBlock for Command {
    type Element = CmdId;

    fn operations(&self) -> &[Self::Element] {
        core::slice::from_ref(&self.id)
    }

    fn successors(&self) -> &[usize] {
        &self.succs
    }

    fn predecessors(&self) -> &[usize] {
        &self.preds
    }
}

/// The control flow graph of an instruction list. Commands live in a flat
/// vector and refer to each other by index; the entry is the command of
/// the first instruction, at index 0. Edges keep the order the input
/// wired them in, so every analysis downstream is deterministic.
#[derive(Clone, Debug, Default)]
pub struct FlowGraph {
    commands: Vec<Command>,
    // Only used to find nodes by their external id; all iteration is over
    // the commands vector.
    index: HashMap<CmdId, usize>,
}

impl ControlFlowGraph for FlowGraph {
    type Block = Command;

    fn blocks(&self) -> &[Self::Block] {
        &self.commands
    }
}

impl FlowGraph {
    /// Wires the successor/predecessor edges of a program. An `Action`
    /// falls through to the instruction after it, a `Branch` both falls
    /// through and edges to its target, a `Jump` only edges to its target.
    /// Targets that never appear as instructions become commands with no
    /// outgoing edges; whether they are meaningful is not validated here.
    pub fn build(program: &[Instruction]) -> Self {
        let mut graph = FlowGraph::default();
        let mut prev = None;
        for instruction in program {
            let current = graph.get_or_create(instruction.id());
            if let Some(prev) = prev {
                graph.add_edge(prev, current);
            }

            match *instruction {
                Instruction::Action(_) => prev = Some(current),
                Instruction::Branch(_, target) => {
                    let target = graph.get_or_create(target);
                    graph.add_edge(current, target);
                    prev = Some(current);
                }
                Instruction::Jump(_, target) => {
                    let target = graph.get_or_create(target);
                    graph.add_edge(current, target);
                    prev = None;
                }
            }
        }
        graph
    }

    pub fn command_id(&self, block: usize) -> CmdId {
        self.commands[block].id
    }

    pub fn lookup(&self, id: CmdId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn get_or_create(&mut self, id: CmdId) -> usize {
        if let Some(&block) = self.index.get(&id) {
            return block;
        }
        self.commands.push(Command {
            id,
            succs: Vec::new(),
            preds: Vec::new(),
        });
        let block = self.commands.len() - 1;
        self.index.insert(id, block);
        block
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        self.commands[from].succs.push(to);
        self.commands[to].preds.push(from);
    }
}

/// Prints a program in the input format: the instruction count followed by
/// one instruction per line.
pub fn print(program: &[Instruction]) -> String {
    if program.is_empty() {
        return "0\n".to_owned();
    }
    format!(
        "{}\n{}\n",
        program.len(),
        program.iter().map(Instruction::to_string).join("\n")
    )
}

/// Renders the flow graph in graphviz format, labelling every node with
/// its command id.
pub fn print_dot(graph: &FlowGraph) -> String {
    analysis::cfg::print(graph, |id| format!("{id}"))
}
