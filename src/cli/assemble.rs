use std::path::PathBuf;

use clap::Args;

use super::{exit_with_errors, load_units, write_output};

#[derive(Args)]
pub struct AssembleArgs {
    /// Input .asm file
    pub input: PathBuf,
    /// Output .hack file (default: <input>.hack)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn cmd_assemble(args: AssembleArgs) {
    let mut total = 0;
    for unit in load_units(&args.input, "asm") {
        let program = match jackc::assemble(&unit.source, &unit.filename) {
            Ok(program) => program,
            Err(diags) => exit_with_errors(diags.len()),
        };
        let out_path = args
            .output
            .clone()
            .unwrap_or_else(|| jackc::pipeline::unit_output(&unit, "hack"));
        write_output(&out_path, &program.to_hack());
        total += program.words.len();
        eprintln!("Assembled {} -> {}", unit.name, out_path.display());
    }
    tracing::debug!(words = total, "assembled");
}
