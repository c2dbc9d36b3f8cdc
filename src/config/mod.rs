//! Configuration: target memory map, runtime routine names, and the
//! `jack.toml` project file.

pub mod machine;
pub mod project;
pub mod runtime;

#[cfg(test)]
mod tests;

pub use machine::MachineConfig;
pub use project::Project;
pub use runtime::RuntimeNames;

/// Parse a `key = value` number, accepting `_` separators.
pub(crate) fn parse_u32(value: &str) -> Option<u32> {
    value.trim().replace('_', "").parse().ok()
}

/// Parse a TOML boolean.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
