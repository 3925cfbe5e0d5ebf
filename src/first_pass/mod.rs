//! # Pass 1 — Address Assigner
//!
//! Walks the parsed lines once, maintaining a location counter. Builds
//! the symbol table, emits a location-annotated listing, and determines
//! the program's start address and total length.
//!
//! Returns on the first fatal error rather than accumulating a list:
//! a SIC/XE line's displacement and base-relative choices downstream
//! depend on cumulative symbol state, so continuing past a broken
//! label or opcode just produces more noise, not more signal.

pub mod symbol_table;


use crate::error::AsmError;
use crate::opcodes::{self, Format};
use crate::parser::ast::ParsedLine;
use crate::parser::operand;
use symbol_table::SymbolTable;

pub struct Pass1Output {
    pub symbol_table: SymbolTable,
    /// `(LOCCTR at line start, line)`, truncated at `END` inclusive.
    pub listing: Vec<(u32, ParsedLine)>,
    pub start_addr: u32,
    pub program_name: String,
    pub length: u32,
}

pub fn first_pass(lines: &[ParsedLine]) -> Result<Pass1Output, AsmError> {
    let mut symbol_table = SymbolTable::new();
    let mut locctr: u32 = 0;
    let mut start_addr: u32 = 0;
    let mut program_name = String::new();
    let mut listing = Vec::new();

    for line in lines {
        let opcode = line.opcode.as_deref();

        if opcode == Some("START") {
            let value = match line.operand.as_deref() {
                Some(operand) => u32::from_str_radix(operand, 16).map_err(|_| {
                    AsmError::invalid_directive_operand("START", operand, line.line_no)
                })?,
                None => 0,
            };
            log::debug!("START sets LOCCTR to {value:06X} at line {}", line.line_no);
            start_addr = value;
            locctr = value;
            program_name = line.label.clone().unwrap_or_default();
            listing.push((locctr, line.clone()));
            continue;
        }

        let locctr_before = locctr;

        if let Some(label) = &line.label {
            if symbol_table.define(label, locctr_before) {
                return Err(AsmError::duplicate_symbol(label.clone(), line.line_no));
            }
        }

        match opcode {
            Some("END") => {
                listing.push((locctr_before, line.clone()));
                break;
            }
            Some("WORD") => locctr += 3,
            Some("RESW") => locctr += 3 * parse_count(line, "RESW")?,
            Some("RESB") => locctr += parse_count(line, "RESB")?,
            Some("BYTE") => {
                let raw = line.operand.as_deref().unwrap_or("");
                let bytes = operand::decode_byte_literal(raw).ok_or_else(|| {
                    AsmError::invalid_directive_operand("BYTE", raw, line.line_no)
                })?;
                locctr += bytes.len() as u32;
            }
            Some("BASE") | Some("NOBASE") => {}
            Some(mnemonic) => {
                locctr += instruction_size(mnemonic, line)?;
            }
            None => {}
        }

        listing.push((locctr_before, line.clone()));
    }

    Ok(Pass1Output {
        length: locctr.saturating_sub(start_addr),
        symbol_table,
        listing,
        start_addr,
        program_name,
    })
}

fn instruction_size(mnemonic: &str, line: &ParsedLine) -> Result<u32, AsmError> {
    let info = opcodes::lookup(mnemonic)
        .ok_or_else(|| AsmError::unknown_opcode(mnemonic, line.line_no))?;
    if line.extended {
        return Ok(4);
    }
    Ok(match info.format {
        Format::One => 1,
        Format::Two => 2,
        Format::Three => 3,
    })
}

fn parse_count(line: &ParsedLine, directive: &str) -> Result<u32, AsmError> {
    let raw = line.operand.as_deref().unwrap_or("");
    operand::parse_number(raw)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| AsmError::invalid_directive_operand(directive, raw, line.line_no))
}
