//! C-instruction field tables.

/// `comp` mnemonic → (a bit, c1..c6).
pub(crate) fn comp_bits(comp: &str) -> Option<u16> {
    // Forms over A; the same forms over M set the a bit.
    let (a, over_a) = if comp.contains('M') {
        (1u16, comp.replace('M', "A"))
    } else {
        (0u16, comp.to_string())
    };
    let c = match over_a.as_str() {
        "0" => 0b101010,
        "1" => 0b111111,
        "-1" => 0b111010,
        "D" => 0b001100,
        "A" => 0b110000,
        "!D" => 0b001101,
        "!A" => 0b110001,
        "-D" => 0b001111,
        "-A" => 0b110011,
        "D+1" | "1+D" => 0b011111,
        "A+1" | "1+A" => 0b110111,
        "D-1" => 0b001110,
        "A-1" => 0b110010,
        "D+A" | "A+D" => 0b000010,
        "D-A" => 0b010011,
        "A-D" => 0b000111,
        "D&A" | "A&D" => 0b000000,
        "D|A" | "A|D" => 0b010101,
        _ => return None,
    };
    // `A` and `M` together (e.g. `A+M`) is not encodable.
    if a == 1 && comp.contains('A') {
        return None;
    }
    Some(a << 6 | c)
}

/// `dest` mnemonic → d1 d2 d3 (A D M). Letter order is free.
pub(crate) fn dest_bits(dest: &str) -> Option<u16> {
    let mut bits = 0u16;
    for ch in dest.chars() {
        let bit = match ch {
            'A' => 0b100,
            'D' => 0b010,
            'M' => 0b001,
            _ => return None,
        };
        if bits & bit != 0 {
            return None;
        }
        bits |= bit;
    }
    Some(bits)
}

pub(crate) fn jump_bits(jump: &str) -> Option<u16> {
    let bits = match jump {
        "" => 0b000,
        "JGT" => 0b001,
        "JEQ" => 0b010,
        "JGE" => 0b011,
        "JLT" => 0b100,
        "JNE" => 0b101,
        "JLE" => 0b110,
        "JMP" => 0b111,
        _ => return None,
    };
    Some(bits)
}

/// Assemble the 16-bit word `111a cccc ccdd djjj`.
pub(crate) fn encode_c(comp: u16, dest: u16, jump: u16) -> u16 {
    0b111 << 13 | comp << 6 | dest << 3 | jump
}
