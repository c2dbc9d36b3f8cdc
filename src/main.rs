use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(
    name = "jackc",
    version,
    about = "Jack compiler: Jack classes to stack-VM code to Hack assembly"
)]
struct Cli {
    /// Log per-unit progress (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile .jack classes to .vm files, one per class
    Compile(cli::compile::CompileArgs),
    /// Translate .vm files into one .asm program
    Translate(cli::translate::TranslateArgs),
    /// Compile a Jack program (or jack.toml project) straight to .asm
    Build(cli::build::BuildArgs),
    /// Assemble a .asm file into .hack machine code
    Assemble(cli::assemble::AssembleArgs),
    /// Assemble and execute a program on the CPU emulator
    Run(cli::run::RunArgs),
}

fn main() {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    match cli.command {
        Command::Compile(args) => cli::compile::cmd_compile(args),
        Command::Translate(args) => cli::translate::cmd_translate(args),
        Command::Build(args) => cli::build::cmd_build(args),
        Command::Assemble(args) => cli::assemble::cmd_assemble(args),
        Command::Run(args) => cli::run::cmd_run(args),
    }
}
