use std::path::{Path, PathBuf};

use crate::diagnostic::Diagnostic;
use crate::span::Span;

use super::{parse_bool, parse_u32, MachineConfig, RuntimeNames};

pub const PROJECT_FILE: &str = "jack.toml";

/// Project configuration from jack.toml.
#[derive(Clone, Debug)]
pub struct Project {
    pub name: String,
    pub root_dir: PathBuf,
    /// Directory holding the `.jack` classes (default: the project root).
    pub source_dir: PathBuf,
    /// Assembly output path (default: `<root>/<name>.asm`).
    pub output: PathBuf,
    /// Emit the stack-pointer/`Sys.init` bootstrap (default: true).
    pub bootstrap: bool,
    /// Annotate each translated command with a `// vm` comment.
    pub comments: bool,
    pub runtime: RuntimeNames,
    pub machine: MachineConfig,
}

impl Project {
    /// Load project from a jack.toml file.
    pub fn load(toml_path: &Path) -> Result<Project, Diagnostic> {
        let content = std::fs::read_to_string(toml_path).map_err(|e| {
            Diagnostic::error(
                format!("cannot read '{}': {}", toml_path.display(), e),
                Span::dummy(),
            )
        })?;
        let root_dir = toml_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Self::parse(&content, root_dir)
    }

    /// Parse jack.toml text. Paths are resolved against `root_dir`.
    pub fn parse(content: &str, root_dir: PathBuf) -> Result<Project, Diagnostic> {
        let err = |msg: String| Diagnostic::error(format!("jack.toml: {}", msg), Span::dummy());

        // Section-aware minimal TOML parsing
        let mut name = String::new();
        let mut source = String::new();
        let mut output = String::new();
        let mut bootstrap = true;
        let mut comments = false;
        let mut runtime = RuntimeNames::default();
        let mut machine = MachineConfig::default();
        let mut current_section = String::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.is_empty() {
                continue;
            }
            // Section headers: [project], [build], ...
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                current_section = trimmed[1..trimmed.len() - 1].trim().to_string();
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(err(format!("expected `key = value`, found '{}'", trimmed)));
            };
            let key = key.trim().trim_matches('"');
            let raw = value.trim();
            let text = raw.trim_matches('"').to_string();
            let number = |what: &str| {
                parse_u32(raw).ok_or_else(|| err(format!("'{}' must be a number, found {}", what, raw)))
            };
            let flag = |what: &str| {
                parse_bool(raw)
                    .ok_or_else(|| err(format!("'{}' must be true or false, found {}", what, raw)))
            };

            match current_section.as_str() {
                "project" => match key {
                    "name" => name = text,
                    "source" => source = text,
                    "output" => output = text,
                    _ => {}
                },
                "build" => match key {
                    "bootstrap" => bootstrap = flag(key)?,
                    "comments" => comments = flag(key)?,
                    _ => {}
                },
                "runtime" => match key {
                    "alloc" => runtime.alloc = text,
                    "string_new" => runtime.string_new = text,
                    "string_append" => runtime.string_append = text,
                    "multiply" => runtime.multiply = text,
                    "divide" => runtime.divide = text,
                    _ => {}
                },
                "machine" => match key {
                    "stack_base" => machine.stack_base = number(key)?,
                    "temp_base" => machine.temp_base = number(key)?,
                    "temp_size" => machine.temp_size = number(key)?,
                    "entry" => machine.entry = text,
                    _ => {}
                },
                _ => {}
            }
        }

        if name.is_empty() {
            return Err(err("missing 'name' in [project]".to_string()));
        }

        let source_dir = if source.is_empty() {
            root_dir.clone()
        } else {
            root_dir.join(&source)
        };
        let output = if output.is_empty() {
            root_dir.join(format!("{}.asm", name))
        } else {
            root_dir.join(&output)
        };

        Ok(Project {
            name,
            root_dir,
            source_dir,
            output,
            bootstrap,
            comments,
            runtime,
            machine,
        })
    }

    /// Try to find a jack.toml in the given directory or its ancestors.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(PROJECT_FILE);
            if candidate.exists() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }
}
