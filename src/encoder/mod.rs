//! # Pass 2 — Encoder
//!
//! Re-walks the lines Pass 1 already addressed, this time emitting
//! object bytes. Dispatches to a per-format encode function for
//! instructions and a small set of directive handlers, threading
//! `LOCCTR` and the current `BASE` value through an `Encoder` that
//! accumulates bytes into a [`RecordBuilder`](crate::records::RecordBuilder)
//! and collects non-fatal displacement warnings alongside its output.

#[cfg(test)]
mod tests;

use crate::error::{AsmError, Warning};
use crate::opcodes::{self, Format};
use crate::parser::ast::ParsedLine;
use crate::parser::operand::{self, Mode, Payload};
use crate::records::{ModRecord, RecordBuilder, TextRecord};
use crate::first_pass::symbol_table::SymbolTable;

/// One line's Pass 2 outcome, for the `out_pass2.txt` listing.
pub struct EmittedLine {
    pub address: u32,
    pub text: String,
    pub bytes: Vec<u8>,
}

pub struct Pass2Output {
    pub lines: Vec<EmittedLine>,
    pub text_records: Vec<TextRecord>,
    pub modifications: Vec<ModRecord>,
    pub entry_point: u32,
    pub warnings: Vec<Warning>,
}

pub fn second_pass(
    lines: &[ParsedLine],
    symbol_table: &SymbolTable,
    start_addr: u32,
) -> Result<Pass2Output, AsmError> {
    let mut enc = Encoder::new(symbol_table, start_addr);

    for line in lines {
        enc.encode_line(line)?;
        if enc.done {
            break;
        }
    }

    enc.builder.flush();
    Ok(Pass2Output {
        lines: enc.emitted,
        text_records: enc.builder.finish(),
        modifications: enc.modifications,
        entry_point: enc.entry_point,
        warnings: enc.warnings,
    })
}

struct Encoder<'a> {
    symbol_table: &'a SymbolTable,
    locctr: u32,
    base: Option<u32>,
    builder: RecordBuilder,
    modifications: Vec<ModRecord>,
    warnings: Vec<Warning>,
    emitted: Vec<EmittedLine>,
    entry_point: u32,
    done: bool,
}

impl<'a> Encoder<'a> {
    fn new(symbol_table: &'a SymbolTable, start_addr: u32) -> Self {
        Self {
            symbol_table,
            locctr: start_addr,
            base: None,
            builder: RecordBuilder::new(),
            modifications: Vec::new(),
            warnings: Vec::new(),
            emitted: Vec::new(),
            entry_point: start_addr,
            done: false,
        }
    }

    fn encode_line(&mut self, line: &ParsedLine) -> Result<(), AsmError> {
        let opcode = line.opcode.as_deref();

        if opcode == Some("START") {
            self.push_listing(self.locctr, line, Vec::new());
            return Ok(());
        }

        let addr = self.locctr;

        let bytes = match opcode {
            Some("END") => {
                if let Some(raw) = line.operand.as_deref() {
                    self.entry_point = self.resolve_value(raw, line.line_no)?;
                }
                self.done = true;
                Vec::new()
            }
            Some("WORD") => {
                let n = parse_count_signed(line, "WORD")?;
                self.locctr += 3;
                word_bytes(n)
            }
            Some("RESW") => {
                let n = parse_count(line, "RESW")?;
                self.locctr += 3 * n;
                self.builder.flush();
                Vec::new()
            }
            Some("RESB") => {
                let n = parse_count(line, "RESB")?;
                self.locctr += n;
                self.builder.flush();
                Vec::new()
            }
            Some("BYTE") => {
                let raw = line.operand.as_deref().unwrap_or("");
                let bytes = operand::decode_byte_literal(raw).ok_or_else(|| {
                    AsmError::invalid_directive_operand("BYTE", raw, line.line_no)
                })?;
                self.locctr += bytes.len() as u32;
                bytes
            }
            Some("BASE") => {
                let raw = line.operand.as_deref().unwrap_or("");
                self.base = Some(self.resolve_value(raw, line.line_no)?);
                Vec::new()
            }
            Some("NOBASE") => {
                self.base = None;
                Vec::new()
            }
            Some(mnemonic) => self.encode_instruction(mnemonic, line)?,
            None => Vec::new(),
        };

        self.push_listing(addr, line, bytes);
        Ok(())
    }

    fn push_listing(&mut self, addr: u32, line: &ParsedLine, bytes: Vec<u8>) {
        if !bytes.is_empty() {
            self.builder.push(addr, bytes.clone());
        }
        self.emitted.push(EmittedLine {
            address: addr,
            text: line.text.clone(),
            bytes,
        });
    }

    fn resolve_value(&self, raw: &str, line_no: usize) -> Result<u32, AsmError> {
        if let Some(n) = operand::parse_number(raw) {
            return Ok(n as u32);
        }
        self.symbol_table
            .get(raw)
            .ok_or_else(|| AsmError::undefined_symbol(raw, line_no))
    }

    fn encode_instruction(&mut self, mnemonic: &str, line: &ParsedLine) -> Result<Vec<u8>, AsmError> {
        let info = opcodes::lookup(mnemonic)
            .ok_or_else(|| AsmError::unknown_opcode(mnemonic, line.line_no))?;

        if line.extended {
            self.locctr += 4;
            return self.encode_format4(info.byte, line);
        }

        match info.format {
            Format::One => {
                self.locctr += 1;
                Ok(vec![info.byte])
            }
            Format::Two => {
                self.locctr += 2;
                encode_format2(info.byte, line)
            }
            Format::Three => {
                self.locctr += 3;
                self.encode_format3(info.byte, line)
            }
        }
    }

    fn encode_format3(&mut self, opcode_byte: u8, line: &ParsedLine) -> Result<Vec<u8>, AsmError> {
        let op = instruction_operand(line)?;
        let (n, i) = flag_bits(op.mode);
        let x: u8 = op.indexed.into();

        let pc = self.locctr;
        let (disp, b, p) = match &op.payload {
            Payload::Number(v) => ((*v as u32) & 0xFFF, 0u8, 0u8),
            Payload::Symbol(sym) => {
                let ta = self
                    .symbol_table
                    .get(sym)
                    .ok_or_else(|| AsmError::undefined_symbol(sym.clone(), line.line_no))?;
                self.select_displacement(ta, pc, sym, line.line_no)
            }
        };

        let byte0 = opcode_byte | (n << 1) | i;
        let nibble = (x << 3) | (b << 2) | (p << 1);
        let byte1 = (nibble << 4) | (((disp >> 8) & 0xF) as u8);
        let byte2 = (disp & 0xFF) as u8;
        Ok(vec![byte0, byte1, byte2])
    }

    /// PC-relative first, then base-relative, then a direct fallback
    /// that does not abort but is reported as a [`Warning`].
    ///
    /// `pc` is the address of the instruction immediately following
    /// this one (`LOCCTR` at the start of this line, plus its length).
    fn select_displacement(&mut self, ta: u32, pc: u32, symbol: &str, line_no: usize) -> (u32, u8, u8) {
        let pc_disp = ta as i64 - pc as i64;
        if (-2048..=2047).contains(&pc_disp) {
            return ((pc_disp & 0xFFF) as u32, 0, 1);
        }
        if let Some(base) = self.base {
            let base_disp = ta as i64 - base as i64;
            if (0..=4095).contains(&base_disp) {
                return (base_disp as u32, 1, 0);
            }
        }
        let warning = Warning::displacement_out_of_range(symbol, line_no);
        log::warn!("{warning}");
        self.warnings.push(warning);
        (ta & 0xFFF, 0, 0)
    }

    fn encode_format4(&mut self, opcode_byte: u8, line: &ParsedLine) -> Result<Vec<u8>, AsmError> {
        let op = instruction_operand(line)?;
        let (n, i) = flag_bits(op.mode);
        let x: u8 = op.indexed.into();

        let (ta, needs_modification) = match &op.payload {
            Payload::Number(v) => (*v as u32, false),
            Payload::Symbol(sym) => {
                let addr = self
                    .symbol_table
                    .get(sym)
                    .ok_or_else(|| AsmError::undefined_symbol(sym.clone(), line.line_no))?;
                (addr, !matches!(op.mode, Mode::Immediate))
            }
        };

        if needs_modification {
            self.modifications.push(ModRecord {
                address: self.locctr - 4 + 1,
                half_bytes: 5,
            });
        }

        let byte0 = opcode_byte | (n << 1) | i;
        let nibble = (x << 3) | 1; // b=0, p=0, e=1
        let byte1 = (nibble << 4) | (((ta >> 16) & 0xF) as u8);
        let byte2 = ((ta >> 8) & 0xFF) as u8;
        let byte3 = (ta & 0xFF) as u8;
        Ok(vec![byte0, byte1, byte2, byte3])
    }
}

/// Format-3/4 mnemonics without an operand (bare `RSUB`) address a
/// zero-valued absolute target rather than failing to parse.
fn instruction_operand(line: &ParsedLine) -> Result<operand::Operand, AsmError> {
    match line.operand.as_deref() {
        None | Some("") => Ok(operand::Operand {
            mode: Mode::Simple,
            indexed: false,
            payload: Payload::Number(0),
        }),
        Some(raw) => operand::parse_operand(raw, line.line_no),
    }
}

fn flag_bits(mode: Mode) -> (u8, u8) {
    match mode {
        Mode::Simple => (1, 1),
        Mode::Immediate => (0, 1),
        Mode::Indirect => (1, 0),
    }
}

fn encode_format2(opcode_byte: u8, line: &ParsedLine) -> Result<Vec<u8>, AsmError> {
    let raw = line.operand.as_deref().unwrap_or("");
    let mut regs = raw.split(',').map(str::trim);
    let r1_name = regs.next().unwrap_or("");
    let r1 = opcodes::lookup_register(r1_name)
        .ok_or_else(|| AsmError::invalid_register(r1_name, line.line_no))?;
    let r2 = match regs.next() {
        Some(name) if !name.is_empty() => {
            opcodes::lookup_register(name).ok_or_else(|| AsmError::invalid_register(name, line.line_no))?
        }
        _ => 0,
    };
    Ok(vec![opcode_byte, (r1 << 4) | r2])
}

fn word_bytes(n: i64) -> Vec<u8> {
    let bytes = (n as i32).to_be_bytes();
    vec![bytes[1], bytes[2], bytes[3]]
}

fn parse_count(line: &ParsedLine, directive: &str) -> Result<u32, AsmError> {
    let raw = line.operand.as_deref().unwrap_or("");
    operand::parse_number(raw)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| AsmError::invalid_directive_operand(directive, raw, line.line_no))
}

fn parse_count_signed(line: &ParsedLine, directive: &str) -> Result<i64, AsmError> {
    let raw = line.operand.as_deref().unwrap_or("");
    operand::parse_number(raw)
        .ok_or_else(|| AsmError::invalid_directive_operand(directive, raw, line.line_no))
}
