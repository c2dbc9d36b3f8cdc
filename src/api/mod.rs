//! Public entry points.
//!
//! Single-unit functions render their diagnostics and return them, like
//! the rest of the crate. Multi-unit functions work on independent units
//! in parallel and report every failing unit, in input order.

pub mod pipeline;

use rayon::prelude::*;

use crate::asm::{self, Program};
use crate::codegen;
use crate::config::{MachineConfig, Project, RuntimeNames};
use crate::diagnostic::{render_diagnostics, Diagnostic};
use crate::error::CompileResult;
use crate::lower::{HackLowering, Lowering};
use crate::span::Spanned;
use crate::syntax::parse_class;
use crate::vm::{self, VmCommand};

/// Options shared by both stages.
#[derive(Clone, Debug)]
pub struct CompileOptions {
    pub machine: MachineConfig,
    pub runtime: RuntimeNames,
    /// Prefix the program with the stack/`Sys.init` bootstrap. Without
    /// it, the program ends in a terminal loop instead.
    pub bootstrap: bool,
    /// Annotate assembly with the VM command each block came from.
    pub comments: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            machine: MachineConfig::default(),
            runtime: RuntimeNames::default(),
            bootstrap: true,
            comments: false,
        }
    }
}

impl CompileOptions {
    pub fn from_project(project: &Project) -> Self {
        Self {
            machine: project.machine.clone(),
            runtime: project.runtime.clone(),
            bootstrap: project.bootstrap,
            comments: project.comments,
        }
    }

    fn lowering(&self) -> HackLowering {
        HackLowering::new(self.machine.clone()).with_comments(self.comments)
    }
}

/// One compilation unit: a `.jack` class or a `.vm` file.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    /// Namespace: the class name / file stem.
    pub name: String,
    /// Used when rendering diagnostics.
    pub filename: String,
    pub source: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            filename: name.clone(),
            name,
            source: source.into(),
        }
    }

    fn report(&self, err: Spanned<crate::error::CompileError>) -> Vec<Diagnostic> {
        let diags = vec![Diagnostic::from(err)];
        render_diagnostics(&diags, &self.filename, &self.source);
        diags
    }
}

// ─── Stage 1 ──────────────────────────────────────────────────────

fn jack_to_vm(source: &str, runtime: &RuntimeNames) -> CompileResult<Vec<VmCommand>> {
    let class = parse_class(source)?;
    codegen::compile_class(&class, runtime)
}

/// Compile one Jack class to stack-VM text.
pub fn compile_jack(source: &str, filename: &str) -> Result<String, Vec<Diagnostic>> {
    compile_jack_with_options(source, filename, &CompileOptions::default())
}

pub fn compile_jack_with_options(
    source: &str,
    filename: &str,
    options: &CompileOptions,
) -> Result<String, Vec<Diagnostic>> {
    match jack_to_vm(source, &options.runtime) {
        Ok(cmds) => Ok(vm::render(&cmds)),
        Err(err) => {
            let diags = vec![Diagnostic::from(err)];
            render_diagnostics(&diags, filename, source);
            Err(diags)
        }
    }
}

/// Compile every class independently; one result per unit, in order.
/// Callers decide what to do with the units that succeeded.
pub fn compile_units(
    units: &[SourceUnit],
    options: &CompileOptions,
) -> Vec<Result<String, Vec<Diagnostic>>> {
    let results: Vec<CompileResult<Vec<VmCommand>>> = units
        .par_iter()
        .map(|unit| jack_to_vm(&unit.source, &options.runtime))
        .collect();

    units
        .iter()
        .zip(results)
        .map(|(unit, result)| match result {
            Ok(cmds) => Ok(vm::render(&cmds)),
            Err(err) => Err(unit.report(err)),
        })
        .collect()
}

// ─── Stage 2 ──────────────────────────────────────────────────────

/// Translate stack-VM units into one assembly program.
pub fn translate_vm(
    units: &[SourceUnit],
    options: &CompileOptions,
) -> Result<String, Vec<Diagnostic>> {
    let lowering = options.lowering();
    let results: Vec<CompileResult<Vec<String>>> = units
        .par_iter()
        .map(|unit| {
            let cmds = vm::parse_program(&unit.source)?;
            lowering.lower(&unit.name, &cmds)
        })
        .collect();
    link(units, results, &lowering, options)
}

/// Jack classes straight to one assembly program.
pub fn build_program(
    units: &[SourceUnit],
    options: &CompileOptions,
) -> Result<String, Vec<Diagnostic>> {
    let lowering = options.lowering();
    let results: Vec<CompileResult<Vec<String>>> = units
        .par_iter()
        .map(|unit| {
            let cmds: Vec<Spanned<VmCommand>> = jack_to_vm(&unit.source, &options.runtime)?
                .into_iter()
                .map(Spanned::dummy)
                .collect();
            lowering.lower(&unit.name, &cmds)
        })
        .collect();
    link(units, results, &lowering, options)
}

/// Concatenate unit outputs in input order, framed by bootstrap or halt.
fn link(
    units: &[SourceUnit],
    results: Vec<CompileResult<Vec<String>>>,
    lowering: &HackLowering,
    options: &CompileOptions,
) -> Result<String, Vec<Diagnostic>> {
    let mut lines = Vec::new();
    let mut errors = Vec::new();

    if options.bootstrap {
        lines.extend(lowering.bootstrap());
    }
    for (unit, result) in units.iter().zip(results) {
        match result {
            Ok(unit_lines) => lines.extend(unit_lines),
            Err(err) => errors.extend(unit.report(err)),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    if !options.bootstrap {
        lines.extend(lowering.halt());
    }

    tracing::debug!(units = units.len(), lines = lines.len(), "linked program");
    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

// ─── Assembler ────────────────────────────────────────────────────

pub fn assemble(source: &str, filename: &str) -> Result<Program, Vec<Diagnostic>> {
    asm::assemble(source).map_err(|err| {
        let diags = vec![Diagnostic::from(err)];
        render_diagnostics(&diags, filename, source);
        diags
    })
}
