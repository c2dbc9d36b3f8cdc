//! File and directory handling around the API.

use std::path::{Path, PathBuf};

use crate::diagnostic::Diagnostic;
use crate::span::Span;

use super::SourceUnit;

fn io_error(action: &str, path: &Path, err: std::io::Error) -> Diagnostic {
    Diagnostic::error(
        format!("cannot {} '{}': {}", action, path.display(), err),
        Span::dummy(),
    )
}

/// Load `path` as units: a single file, or every `*.{extension}` file in
/// a directory sorted by name.
pub fn load_units(path: &Path, extension: &str) -> Result<Vec<SourceUnit>, Diagnostic> {
    let files = if path.is_dir() {
        let entries = std::fs::read_dir(path).map_err(|e| io_error("read directory", path, e))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == extension))
            .collect();
        files.sort();
        if files.is_empty() {
            return Err(Diagnostic::error(
                format!("no .{} files in '{}'", extension, path.display()),
                Span::dummy(),
            ));
        }
        files
    } else {
        if !path.extension().is_some_and(|ext| ext == extension) {
            return Err(Diagnostic::error(
                format!("expected a .{} file, got '{}'", extension, path.display()),
                Span::dummy(),
            ));
        }
        vec![path.to_path_buf()]
    };

    files.iter().map(|file| load_unit(file)).collect()
}

fn load_unit(file: &Path) -> Result<SourceUnit, Diagnostic> {
    let source = std::fs::read_to_string(file).map_err(|e| io_error("read", file, e))?;
    let name = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SourceUnit {
        name,
        filename: file.display().to_string(),
        source,
    })
}

/// Where a program built from `input` goes by default: `Foo.vm` →
/// `Foo.asm`, directory `Foo/` → `Foo/Foo.asm`.
pub fn default_output(input: &Path, extension: &str) -> PathBuf {
    if input.is_dir() {
        let stem = input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "out".to_string());
        input.join(format!("{}.{}", stem, extension))
    } else {
        input.with_extension(extension)
    }
}

/// `Main.jack` → `Main.vm` next to it.
pub fn unit_output(unit: &SourceUnit, extension: &str) -> PathBuf {
    Path::new(&unit.filename).with_extension(extension)
}

pub fn write_output(path: &Path, contents: &str) -> Result<(), Diagnostic> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create directory", parent, e))?;
        }
    }
    std::fs::write(path, contents).map_err(|e| io_error("write", path, e))
}
