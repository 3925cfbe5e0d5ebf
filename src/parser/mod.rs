//! # Line Parser
//!
//! Decomposes one already-preprocessed logical line into an optional
//! label, an optional opcode (mnemonic or directive, `+` stripped and
//! recorded as `extended`), and an optional operand string.
//!
//! ## Label/opcode disambiguation
//!
//! Applied to the first field `t0`:
//!
//! 1. Uppercase `t0`. If it names a known mnemonic or directive, or is
//!    `+mnemonic` for a known mnemonic, it is the opcode and there is
//!    no label.
//! 2. Otherwise `t0` is the label. If a second field exists, it becomes
//!    the opcode (uppercased), validated later by the caller.

pub mod ast;
pub mod operand;


use crate::error::AsmError;
use crate::lexer::cursor::split_fields;
use crate::opcodes;
use ast::ParsedLine;

fn normalize_operand(raw: &str) -> String {
    let mut s = raw.to_string();
    loop {
        let replaced = s.replace(" ,", ",").replace(", ", ",");
        if replaced == s {
            break;
        }
        s = replaced;
    }
    s
}

/// Parse one preprocessed, non-empty logical line.
pub fn parse_line(text: &str, line_no: usize) -> Result<ParsedLine, AsmError> {
    let fields = split_fields(text, line_no)?;

    if fields.is_empty() {
        return Ok(ParsedLine {
            label: None,
            opcode: None,
            extended: false,
            operand: None,
            line_no,
            text: text.to_string(),
        });
    }

    let t0 = &fields[0];
    let t0_upper = t0.to_uppercase();

    let (label, opcode_field) = if let Some(rest) = t0_upper.strip_prefix('+') {
        if opcodes::lookup(rest).is_some() {
            (None, Some(0))
        } else {
            return Err(AsmError::unknown_opcode(t0.clone(), line_no));
        }
    } else if opcodes::is_opcode_or_directive(&t0_upper) {
        (None, Some(0))
    } else if fields.len() > 1 {
        (Some(t0.clone()), Some(1))
    } else {
        (Some(t0.clone()), None)
    };

    let (opcode, extended) = match opcode_field {
        Some(idx) => {
            let raw_upper = fields[idx].to_uppercase();
            match raw_upper.strip_prefix('+') {
                Some(rest) => (Some(rest.to_string()), true),
                None => (Some(raw_upper), false),
            }
        }
        None => (None, false),
    };

    let operand_start = opcode_field.map(|idx| idx + 1).unwrap_or(fields.len());
    let operand = if operand_start < fields.len() {
        Some(normalize_operand(&fields[operand_start..].join(" ")))
    } else {
        None
    };

    Ok(ParsedLine {
        label,
        opcode,
        extended,
        operand,
        line_no,
        text: text.to_string(),
    })
}
