use std::path::PathBuf;

use clap::Args;

use super::{exit_with_errors, load_units, write_output};

#[derive(Args)]
pub struct TranslateArgs {
    /// Input .vm file or directory of .vm files
    pub input: PathBuf,
    /// Output .asm file (default: <input>.asm, or <dir>/<dir>.asm)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Emit the bootstrap (default for directories)
    #[arg(long, conflicts_with = "no_bootstrap")]
    pub bootstrap: bool,
    /// Omit the bootstrap and end with a halt loop (default for files)
    #[arg(long)]
    pub no_bootstrap: bool,
    /// Precede each translated command with a `// <command>` line
    #[arg(long)]
    pub comments: bool,
}

pub fn cmd_translate(args: TranslateArgs) {
    let units = load_units(&args.input, "vm");
    let bootstrap = if args.bootstrap {
        true
    } else if args.no_bootstrap {
        false
    } else {
        args.input.is_dir()
    };
    let options = jackc::CompileOptions {
        bootstrap,
        comments: args.comments,
        ..jackc::CompileOptions::default()
    };

    let asm = match jackc::translate_vm(&units, &options) {
        Ok(asm) => asm,
        Err(diags) => exit_with_errors(diags.len()),
    };
    let out_path = args
        .output
        .unwrap_or_else(|| jackc::pipeline::default_output(&args.input, "asm"));
    write_output(&out_path, &asm);
    eprintln!("Translated {} unit(s) -> {}", units.len(), out_path.display());
}
