//! # Opcode Table
//!
//! Static mapping from mnemonic to `(byte opcode, instruction format)`,
//! plus the directive vocabulary and register name table. Kept as a
//! `match` rather than a runtime-built hash map: the table is small and
//! fixed, and a `match` compiles to a dense jump table.

/// Instruction format a mnemonic's base opcode belongs to. Format 4 is
/// not a variant here — it is signalled per-use by a `+` prefix on the
/// mnemonic, not a property of the opcode itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    One,
    Two,
    Three,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub byte: u8,
    pub format: Format,
}

/// Look up a mnemonic's opcode descriptor. `mnemonic` must already be
/// upper-cased and must NOT include a leading `+` (strip that first).
pub fn lookup(mnemonic: &str) -> Option<OpcodeInfo> {
    use Format::*;
    let (byte, format) = match mnemonic {
        "ADD" => (0x18, Three),
        "ADDF" => (0x58, Three),
        "ADDR" => (0x90, Two),
        "AND" => (0x40, Three),
        "CLEAR" => (0xB4, Two),
        "COMP" => (0x28, Three),
        "COMPF" => (0x88, Three),
        "COMPR" => (0xA0, Two),
        "DIV" => (0x24, Three),
        "DIVF" => (0x64, Three),
        "DIVR" => (0x9C, Two),
        "J" => (0x3C, Three),
        "JEQ" => (0x30, Three),
        "JGT" => (0x34, Three),
        "JLT" => (0x38, Three),
        "JSUB" => (0x48, Three),
        "LDA" => (0x00, Three),
        "LDB" => (0x68, Three),
        "LDCH" => (0x50, Three),
        "LDF" => (0x70, Three),
        "LDL" => (0x08, Three),
        "LDS" => (0x6C, Three),
        "LDT" => (0x74, Three),
        "LDX" => (0x04, Three),
        "MUL" => (0x20, Three),
        "MULF" => (0x60, Three),
        "MULR" => (0x98, Two),
        "OR" => (0x44, Three),
        "RD" => (0xD8, Three),
        "RMO" => (0xAC, Two),
        "RSUB" => (0x4C, Three),
        "SHIFTL" => (0xA4, Two),
        "SHIFTR" => (0xA8, Two),
        "STA" => (0x0C, Three),
        "STB" => (0x78, Three),
        "STCH" => (0x54, Three),
        "STF" => (0x80, Three),
        "STI" => (0xD4, Three),
        "STL" => (0x14, Three),
        "STS" => (0x7C, Three),
        "STSW" => (0xE8, Three),
        "STT" => (0x84, Three),
        "STX" => (0x10, Three),
        "SUB" => (0x1C, Three),
        "SUBF" => (0x5C, Three),
        "SUBR" => (0x94, Two),
        "SVC" => (0xB0, Two),
        "TD" => (0xE0, Three),
        "TIX" => (0x2C, Three),
        "TIXR" => (0xB8, Two),
        "WD" => (0xDC, Three),

        "FIX" => (0xC4, One),
        "FLOAT" => (0xC0, One),
        "HIO" => (0xF4, One),
        "NORM" => (0xC8, One),
        "SIO" => (0xF0, One),
        "TIO" => (0xF8, One),

        _ => return None,
    };
    Some(OpcodeInfo { byte, format })
}

const DIRECTIVES: &[&str] = &[
    "START", "END", "BYTE", "WORD", "RESB", "RESW", "BASE", "NOBASE",
];

/// Is `word` (already upper-cased) one of the assembler directives?
pub fn is_directive(word: &str) -> bool {
    DIRECTIVES.contains(&word)
}

/// Register name → machine register number.
pub fn lookup_register(name: &str) -> Option<u8> {
    match name {
        "A" => Some(0),
        "X" => Some(1),
        "L" => Some(2),
        "B" => Some(3),
        "S" => Some(4),
        "T" => Some(5),
        "F" => Some(6),
        "PC" => Some(8),
        "SW" => Some(9),
        _ => None,
    }
}

/// Is `word` (already upper-cased, without a leading `+`) a known
/// mnemonic or directive? Used by the line parser's label/opcode
/// disambiguation rule.
pub fn is_opcode_or_directive(word: &str) -> bool {
    lookup(word).is_some() || is_directive(word)
}
