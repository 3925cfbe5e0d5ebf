//! # sicxe-asm
//!
//! A two-pass assembler for the SIC/XE educational computer architecture.
//!
//! ## Pipeline
//!
//! Source text moves through six stages:
//!
//! 1. **Preprocessor** ([`lexer`]) — strips line numbers and comments
//! 2. **Line parser** ([`parser`]) — splits each line into label/opcode/operand
//! 3. **Pass 1** ([`first_pass`]) — assigns addresses, builds the symbol table
//! 4. **Pass 2** ([`encoder`]) — encodes object bytes, resolves displacements
//! 5. **Record builder** ([`records`]) — packs bytes into Text/Modification records
//! 6. **Output writers** ([`output`]) — formats the five listing/object artifacts
//!
//! [`assemble`] runs all six stages and returns everything the CLI needs
//! to write to disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! let source = std::fs::read_to_string("program.asm").unwrap();
//! let out = sicxe_asm::assemble(&source).unwrap();
//! println!("{}", out.htme);
//! ```

pub mod encoder;
pub mod error;
pub mod first_pass;
pub mod lexer;
pub mod opcodes;
pub mod output;
pub mod parser;
pub mod records;

use error::{AsmError, Warning};

/// Everything produced by a full run of the pipeline: the five listing
/// artifacts plus any non-fatal warnings raised along the way.
pub struct AssembleOutput {
    pub intermediate: String,
    pub pass1_listing: String,
    pub symbol_table_listing: String,
    pub pass2_listing: String,
    pub htme: String,
    pub warnings: Vec<Warning>,
}

/// Run the full pipeline over one source file's text.
///
/// Returns on the first fatal [`AsmError`]; non-fatal issues (displacement
/// fallbacks) are collected into `warnings` instead of aborting.
pub fn assemble(source: &str) -> Result<AssembleOutput, AsmError> {
    let preprocessed = lexer::preprocess(source);

    let lines: Vec<parser::ast::ParsedLine> = preprocessed
        .iter()
        .map(|line| parser::parse_line(&line.text, line.line_no))
        .collect::<Result<_, _>>()?;

    let p1 = first_pass::first_pass(&lines)?;
    let p2 = encoder::second_pass(&lines, &p1.symbol_table, p1.start_addr)?;

    let intermediate = output::write_intermediate(
        &preprocessed.iter().map(|l| l.text.clone()).collect::<Vec<_>>(),
    );

    let pass1_listing = output::write_pass1_listing(
        &p1.listing
            .iter()
            .map(|(addr, line)| (*addr, line.text.clone()))
            .collect::<Vec<_>>(),
    );

    let symbol_table_listing = output::write_symbol_table(&p1.symbol_table);

    let pass2_listing = output::write_pass2_listing(
        &p2.lines
            .iter()
            .map(|l| (l.address, l.text.clone(), l.bytes.clone()))
            .collect::<Vec<_>>(),
    );

    let header = records::format_header(&p1.program_name, p1.start_addr, p1.length);
    let end = records::format_end(p2.entry_point);
    let htme = output::write_htme(&header, &p2.text_records, &p2.modifications, &end);

    Ok(AssembleOutput {
        intermediate,
        pass1_listing,
        symbol_table_listing,
        pass2_listing,
        htme,
        warnings: p2.warnings,
    })
}
