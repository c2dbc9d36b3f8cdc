use std::collections::HashMap;

/// First RAM address handed out to `@variable` symbols.
pub const VARIABLE_BASE: u16 = 16;

/// Symbol table seeded with the platform's predefined names.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, u16>,
    next_variable: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut symbols = HashMap::new();
        for (name, addr) in [
            ("SP", 0),
            ("LCL", 1),
            ("ARG", 2),
            ("THIS", 3),
            ("THAT", 4),
            ("SCREEN", 16384),
            ("KBD", 24576),
        ] {
            symbols.insert(name.to_string(), addr);
        }
        for r in 0..16u16 {
            symbols.insert(format!("R{}", r), r);
        }
        Self {
            symbols,
            next_variable: VARIABLE_BASE,
        }
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn insert(&mut self, name: String, addr: u16) {
        self.symbols.insert(name, addr);
    }

    /// Resolve `name`, allocating the next free RAM cell on first use.
    pub fn resolve_or_allocate(&mut self, name: &str) -> u16 {
        if let Some(addr) = self.get(name) {
            return addr;
        }
        let addr = self.next_variable;
        self.next_variable += 1;
        self.symbols.insert(name.to_string(), addr);
        addr
    }

    pub fn into_map(self) -> HashMap<String, u16> {
        self.symbols
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
