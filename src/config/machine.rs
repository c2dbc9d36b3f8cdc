/// Memory map of the target register/memory machine.
///
/// Stack pointer and the four segment-base registers live at the fixed
/// addresses 0..=4 (`SP LCL ARG THIS THAT`); everything else that stage 2
/// depends on is configurable here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// Initial stack pointer written by the bootstrap.
    pub stack_base: u32,
    /// First RAM cell of the temp segment.
    pub temp_base: u32,
    /// Number of temp cells.
    pub temp_size: u32,
    /// Scratch register holding the frame pointer during `return`,
    /// and the target address during `pop`.
    pub frame_register: String,
    /// Scratch register holding the return address during `return`.
    pub return_register: String,
    /// Largest value `push constant` can load in one A-instruction.
    pub max_constant: u32,
    /// Routine the bootstrap calls.
    pub entry: String,
}

impl MachineConfig {
    /// The standard Hack platform layout.
    pub fn hack() -> Self {
        Self {
            stack_base: 256,
            temp_base: 5,
            temp_size: 8,
            frame_register: "R13".to_string(),
            return_register: "R14".to_string(),
            max_constant: 32767,
            entry: "Sys.init".to_string(),
        }
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::hack()
    }
}
