use std::fs;

use sicxe_asm::error::ErrorKind;

fn run(path: &str) -> sicxe_asm::AssembleOutput {
    let source = fs::read_to_string(path).expect("failed to read test program");
    sicxe_asm::assemble(&source).unwrap_or_else(|e| panic!("assembly of {path} failed: {e}"))
}

#[test]
fn minimal_program_produces_all_five_artifacts() {
    let out = run("tests/test_programs/minimal.asm");
    assert!(out.intermediate.contains("RSUB"));
    assert!(out.pass1_listing.contains("1000"));
    assert!(out.pass2_listing.contains("010005"));
    assert!(out.htme.starts_with("H^COPY"));
    assert!(out.htme.contains("T^001000"));
    assert!(out.htme.contains("E^001000"));
    assert!(out.warnings.is_empty());
}

#[test]
fn pc_relative_program_resolves_without_warnings() {
    let out = run("tests/test_programs/pc_relative.asm");
    assert!(out.symbol_table_listing.contains("LBL"));
    assert!(out.warnings.is_empty());
    assert!(out.htme.contains("T^000000"));
}

#[test]
fn format4_program_emits_a_modification_record() {
    let out = run("tests/test_programs/format4.asm");
    assert!(out.htme.lines().any(|l| l.starts_with("M^")));
    let mod_line = out.htme.lines().find(|l| l.starts_with("M^")).unwrap();
    assert_eq!(mod_line, "M^000101^05");
}

#[test]
fn directives_program_resolves_symbols_and_base_relative_addressing() {
    let out = run("tests/test_programs/directives.asm");
    for sym in ["MSG", "HEX", "RESERVE", "WORDS", "TAB"] {
        assert!(
            out.symbol_table_listing.contains(sym),
            "expected {sym} in symbol table listing:\n{}",
            out.symbol_table_listing
        );
    }
    assert!(out.warnings.is_empty());
}

#[test]
fn undefined_symbol_is_a_fatal_error() {
    let source = fs::read_to_string("tests/test_programs/errors_undefined_symbol.asm").unwrap();
    let err = sicxe_asm::assemble(&source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UndefinedSymbol(_)));
}

#[test]
fn duplicate_symbol_is_a_fatal_error() {
    let source = fs::read_to_string("tests/test_programs/errors_duplicate_symbol.asm").unwrap();
    let err = sicxe_asm::assemble(&source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateSymbol(_)));
}
