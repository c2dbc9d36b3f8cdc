use std::path::{Path, PathBuf};
use std::process;

use clap::Args;

use jackc::project::Project;

use super::{exit_with_errors, load_units, write_output};

#[derive(Args)]
pub struct BuildArgs {
    /// Input .jack file, directory of classes, or directory with jack.toml
    pub input: PathBuf,
    /// Output .asm file (default: from jack.toml, else <input>.asm)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Also assemble the program to .hack
    #[arg(long)]
    pub hack: bool,
}

fn resolve_project(input: &Path) -> Option<Project> {
    let start = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or(Path::new("."))
    };
    let toml_path = Project::find(start)?;
    match Project::load(&toml_path) {
        Ok(project) => Some(project),
        Err(e) => {
            eprintln!("error: {}", e.message);
            process::exit(1);
        }
    }
}

pub fn cmd_build(args: BuildArgs) {
    let project = resolve_project(&args.input);

    let (units, options, default_output) = match &project {
        // A single file compiles alone even inside a project.
        Some(project) if args.input.is_dir() => (
            load_units(&project.source_dir, "jack"),
            jackc::CompileOptions::from_project(project),
            project.output.clone(),
        ),
        _ => (
            load_units(&args.input, "jack"),
            jackc::CompileOptions::default(),
            jackc::pipeline::default_output(&args.input, "asm"),
        ),
    };
    tracing::debug!(units = units.len(), bootstrap = options.bootstrap, "building");

    let asm = match jackc::build_program(&units, &options) {
        Ok(asm) => asm,
        Err(diags) => exit_with_errors(diags.len()),
    };
    let out_path = args.output.unwrap_or(default_output);
    write_output(&out_path, &asm);
    eprintln!("Built {} class(es) -> {}", units.len(), out_path.display());

    if args.hack {
        let filename = out_path.display().to_string();
        let program = match jackc::assemble(&asm, &filename) {
            Ok(program) => program,
            Err(diags) => exit_with_errors(diags.len()),
        };
        let hack_path = out_path.with_extension("hack");
        write_output(&hack_path, &program.to_hack());
        eprintln!("Assembled -> {}", hack_path.display());
    }
}
