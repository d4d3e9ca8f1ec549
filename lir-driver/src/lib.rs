use clap::Parser as CommandLineParser;
use lir_lib::{
    analysis::count_natural_loops,
    ir::{self, FlowGraph},
    parser::Parser,
};
use utils::DiagnosticEmitter;

#[derive(Debug, CommandLineParser, Default)]
#[command(name = "lir", version, about = "Count the natural loops of an instruction list.")]
pub struct Opt {
    /// Dump the control flow graph representation of the program in
    /// graphviz format.
    #[arg(long)]
    pub dump_cfg: bool,

    /// File containing the instruction list; '-' reads standard input.
    pub filename: String,
}

pub fn process_source(src: &str, diag: &mut DiagnosticEmitter, opts: &Opt) -> Option<()> {
    let parser = Parser::new(src, diag);
    let program = parser.parse()?;

    if opts.dump_cfg {
        diag.out_ln(&ir::print_dot(&FlowGraph::build(&program)));
    }

    diag.out_ln(&count_natural_loops(&program).to_string());
    Some(())
}
