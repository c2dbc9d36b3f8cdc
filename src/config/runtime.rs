/// Qualified names of the runtime routines that generated code calls.
///
/// Stage 1 only assumes their calling contracts: `alloc(size)` returns
/// a base address, `string_new(len)` returns a string object,
/// `string_append(s, c)` returns `s`, and `multiply`/`divide` take two
/// words and return one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeNames {
    pub alloc: String,
    pub string_new: String,
    pub string_append: String,
    pub multiply: String,
    pub divide: String,
}

impl RuntimeNames {
    /// The Jack OS routines.
    pub fn jack_os() -> Self {
        Self {
            alloc: "Memory.alloc".to_string(),
            string_new: "String.new".to_string(),
            string_append: "String.appendChar".to_string(),
            multiply: "Math.multiply".to_string(),
            divide: "Math.divide".to_string(),
        }
    }
}

impl Default for RuntimeNames {
    fn default() -> Self {
        Self::jack_os()
    }
}
