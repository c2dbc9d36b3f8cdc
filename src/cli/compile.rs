use std::path::PathBuf;

use clap::Args;

use super::{exit_with_errors, load_units, write_output};

#[derive(Args)]
pub struct CompileArgs {
    /// Input .jack file or directory of classes
    pub input: PathBuf,
}

pub fn cmd_compile(args: CompileArgs) {
    let units = load_units(&args.input, "jack");
    let options = jackc::CompileOptions::default();
    let results = jackc::compile_units(&units, &options);

    let mut failed = 0;
    for (unit, result) in units.iter().zip(results) {
        match result {
            Ok(vm) => {
                let out_path = jackc::pipeline::unit_output(unit, "vm");
                write_output(&out_path, &vm);
                eprintln!("Compiled {} -> {}", unit.name, out_path.display());
            }
            Err(diags) => failed += diags.len(),
        }
    }
    if failed > 0 {
        exit_with_errors(failed);
    }
}
