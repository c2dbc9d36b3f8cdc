use crate::config::MachineConfig;
use crate::error::CompileError;
use crate::vm::{Segment, VmCommand};

use super::Translator;

/// Where a `(segment, index)` pair lives on the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// `RAM[RAM[base] + offset]`.
    Indirect { base: &'static str, offset: u32 },
    /// A fixed cell, named by address or symbol.
    Direct(String),
    /// An immediate value; only readable.
    Constant(u32),
}

/// Maps logical segments onto the machine's memory map.
pub struct SegmentResolver<'a> {
    namespace: &'a str,
    machine: &'a MachineConfig,
}

impl<'a> SegmentResolver<'a> {
    pub fn new(namespace: &'a str, machine: &'a MachineConfig) -> Self {
        Self { namespace, machine }
    }

    /// Resolve `segment index`; `instruction` is quoted in errors.
    pub fn resolve(
        &self,
        segment: Segment,
        index: u32,
        instruction: &VmCommand,
    ) -> Result<Location, CompileError> {
        let invalid = || CompileError::InvalidSegmentIndex {
            segment: segment.as_str().to_string(),
            index,
            instruction: instruction.to_string(),
        };

        // Offsets travel as `@offset`, so they share the literal range.
        let indirect = |base: &'static str| {
            if index > self.machine.max_constant {
                Err(invalid())
            } else {
                Ok(Location::Indirect {
                    base,
                    offset: index,
                })
            }
        };

        let location = match segment {
            Segment::Local => indirect("LCL")?,
            Segment::Argument => indirect("ARG")?,
            Segment::This => indirect("THIS")?,
            Segment::That => indirect("THAT")?,
            Segment::Constant => {
                if index > self.machine.max_constant {
                    return Err(invalid());
                }
                Location::Constant(index)
            }
            // Same index in different units is distinct storage.
            Segment::Static => Location::Direct(format!("{}.{}", self.namespace, index)),
            Segment::Temp => {
                if index >= self.machine.temp_size {
                    return Err(invalid());
                }
                Location::Direct((self.machine.temp_base + index).to_string())
            }
            Segment::Pointer => match index {
                0 => Location::Direct("THIS".to_string()),
                1 => Location::Direct("THAT".to_string()),
                _ => return Err(invalid()),
            },
        };
        Ok(location)
    }
}

impl Translator<'_> {
    pub(super) fn push(
        &mut self,
        segment: Segment,
        index: u32,
        cmd: &VmCommand,
    ) -> Result<(), CompileError> {
        let location =
            SegmentResolver::new(self.namespace, self.machine).resolve(segment, index, cmd)?;
        match location {
            Location::Constant(value) => {
                self.emit_at(&value.to_string());
                self.emit("D=A");
            }
            Location::Direct(symbol) => {
                self.emit_at(&symbol);
                self.emit("D=M");
            }
            Location::Indirect { base, offset } => {
                self.emit_at(&offset.to_string());
                self.emit("D=A");
                self.emit_at(base);
                self.emit("A=D+M");
                self.emit("D=M");
            }
        }
        self.push_d();
        Ok(())
    }

    pub(super) fn pop(
        &mut self,
        segment: Segment,
        index: u32,
        cmd: &VmCommand,
    ) -> Result<(), CompileError> {
        let location =
            SegmentResolver::new(self.namespace, self.machine).resolve(segment, index, cmd)?;
        match location {
            Location::Constant(_) => return Err(CompileError::unsupported(cmd)),
            Location::Direct(symbol) => {
                self.pop_d();
                self.emit_at(&symbol);
                self.emit("M=D");
            }
            Location::Indirect { base, offset } => {
                // Park the target address; popping clobbers A and D.
                let scratch = self.machine.frame_register.clone();
                self.emit_at(&offset.to_string());
                self.emit("D=A");
                self.emit_at(base);
                self.emit("D=D+M");
                self.emit_at(&scratch);
                self.emit("M=D");
                self.pop_d();
                self.emit_at(&scratch);
                self.emit("A=M");
                self.emit("M=D");
            }
        }
        Ok(())
    }
}
