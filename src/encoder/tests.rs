use super::*;
use crate::first_pass::first_pass;
use crate::parser::parse_line;

fn run(src: &[&str]) -> Pass2Output {
    let lines: Vec<ParsedLine> = src
        .iter()
        .enumerate()
        .map(|(i, line)| parse_line(line, i + 1).unwrap())
        .collect();
    let p1 = first_pass(&lines).unwrap();
    second_pass(&lines, &p1.symbol_table, p1.start_addr).unwrap()
}

fn all_bytes(out: &Pass2Output) -> Vec<u8> {
    out.lines.iter().flat_map(|l| l.bytes.clone()).collect()
}

#[test]
fn minimal_program_encodes_to_spec_bytes() {
    let out = run(&["COPY START 1000", "LDA #5", "RSUB", "END"]);
    assert_eq!(all_bytes(&out), vec![0x01, 0x00, 0x05, 0x4F, 0x00, 0x00]);
    assert_eq!(out.text_records.len(), 1);
    assert_eq!(out.text_records[0].start, 0x1000);
    assert_eq!(out.entry_point, 0x1000);
}

#[test]
fn pc_relative_zero_displacement() {
    let out = run(&["START 0", "LDA LBL", "LBL WORD 7", "END"]);
    assert_eq!(all_bytes(&out), vec![0x03, 0x20, 0x00, 0x00, 0x00, 0x07]);
    assert!(out.warnings.is_empty());
}

#[test]
fn format4_emits_modification_record() {
    let out = run(&["PRG START 100", "+LDA BUF", "BUF RESW 1", "END"]);
    assert_eq!(out.modifications.len(), 1);
    assert_eq!(out.modifications[0].address, 0x101);
    assert_eq!(out.modifications[0].half_bytes, 5);
}

#[test]
fn base_relative_fallback_when_pc_relative_out_of_range() {
    // The gap between `LDA TAB` and `TAB` is past the +2047
    // PC-relative ceiling; `BASE` is `TAB` itself so the base-relative
    // displacement resolves to exactly 0.
    let src = vec![
        "START 0".to_string(),
        "BASE TAB".to_string(),
        "LDA TAB".to_string(),
        "RESB 2200".to_string(),
        "TAB WORD 0".to_string(),
        "END".to_string(),
    ];
    let src_refs: Vec<&str> = src.iter().map(|s| s.as_str()).collect();
    let out = run(&src_refs);
    assert!(out.warnings.is_empty());
    let lda_bytes = &out.lines.iter().find(|l| l.text == "LDA TAB").unwrap().bytes;
    assert_eq!(lda_bytes, &vec![0x03, 0x40, 0x00]);
}

#[test]
fn displacement_out_of_both_ranges_falls_back_to_direct_with_warning() {
    let src = vec![
        "START 0".to_string(),
        "LDA TAB".to_string(),
        "RESB 5000".to_string(),
        "TAB WORD 0".to_string(),
        "END".to_string(),
    ];
    let src_refs: Vec<&str> = src.iter().map(|s| s.as_str()).collect();
    let out = run(&src_refs);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn byte_directive_hex_odd_length_padded() {
    let out = run(&["START 0", "X BYTE X'F'", "END"]);
    assert_eq!(all_bytes(&out), vec![0xF0]);
}

#[test]
fn format2_single_operand_zero_fills_r2() {
    let out = run(&["START 0", "CLEAR A", "END"]);
    assert_eq!(all_bytes(&out), vec![0xB4, 0x00]);
}

#[test]
fn sixty_two_contiguous_bytes_split_into_three_text_records() {
    let mut src = vec!["START 0".to_string()];
    for _ in 0..20 {
        src.push("WORD 1".to_string());
    }
    src.push("X BYTE C'AB'".to_string());
    src.push("END".to_string());
    let src_refs: Vec<&str> = src.iter().map(|s| s.as_str()).collect();
    let out = run(&src_refs);
    let lengths: Vec<usize> = out.text_records.iter().map(|r| r.bytes.len()).collect();
    assert_eq!(lengths, vec![30, 30, 2]);
}
