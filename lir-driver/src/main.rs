use std::process::ExitCode;

use clap::Parser;
use lir_driver::Opt;
use utils::DiagnosticEmitter;

fn main() -> ExitCode {
    let opts = Opt::parse();

    let mut diag = DiagnosticEmitter::new(Box::new(std::io::stdout()), Box::new(std::io::stderr()));
    let contents = if opts.filename == "-" {
        std::io::read_to_string(std::io::stdin()).expect("Failed to read standard input.")
    } else {
        std::fs::read_to_string(&opts.filename).expect("Failed to read input file.")
    };

    if lir_driver::process_source(&contents, &mut diag, &opts).is_none() {
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}
