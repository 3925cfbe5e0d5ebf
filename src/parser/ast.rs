//! # Parsed Line
//!
//! The data model a logical line is reduced to: an optional label, an
//! optional opcode (mnemonic or directive, with its format-4 `+` flag
//! stripped and recorded separately), and an optional operand string
//! left for the operand parser.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub label: Option<String>,
    pub opcode: Option<String>,
    pub extended: bool,
    pub operand: Option<String>,
    pub line_no: usize,
    /// The preprocessed line text, kept for the Pass 1/Pass 2 listings.
    pub text: String,
}
