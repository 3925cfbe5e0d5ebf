//! # Listing / Output Writers
//!
//! Pure string-formatting functions for the five artifacts this
//! assembler produces. None of these touch the filesystem; the CLI
//! shell writes their output verbatim to the corresponding path under
//! the output directory.

use crate::first_pass::symbol_table::SymbolTable;
use crate::records::{self, ModRecord, TextRecord};

pub fn write_intermediate(lines: &[String]) -> String {
    lines.join("\n")
}

pub fn write_pass1_listing(entries: &[(u32, String)]) -> String {
    entries
        .iter()
        .map(|(addr, text)| format!("{addr:04X} {text}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn write_symbol_table(table: &SymbolTable) -> String {
    let mut out = String::from("Symbol Table:\nName\tAddress\n----\t-------\n");
    for (name, addr) in table.sorted() {
        out.push_str(&format!("{name}\t{addr:04X}\n"));
    }
    out.trim_end().to_string()
}

pub fn write_pass2_listing(entries: &[(u32, String, Vec<u8>)]) -> String {
    entries
        .iter()
        .map(|(addr, text, bytes)| {
            let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
            format!("{addr:04X} {text:<30} {hex}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn write_htme(header: &str, texts: &[TextRecord], mods: &[ModRecord], end: &str) -> String {
    let mut lines = vec![header.to_string()];
    lines.extend(texts.iter().map(records::format_text));
    lines.extend(mods.iter().map(records::format_modification));
    lines.push(end.to_string());
    lines.join("\n")
}
