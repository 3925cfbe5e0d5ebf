//! # Preprocessor
//!
//! Strips line-number prefixes and comments from source text, emitting
//! a sequence of non-blank logical lines in source order.
//!
//! ## Pipeline
//!
//! The preprocessor is the first of four stages:
//!
//! 1. **Preprocessor** (this module) — strips line numbers/comments
//! 2. **Line parser** — decomposes a line into label/opcode/operand
//! 3. **Pass 1** — assigns addresses, builds the symbol table
//! 4. **Pass 2** — encodes object bytes and streams object records

pub mod cursor;

#[cfg(test)]
mod tests;

/// One non-blank logical line surviving preprocessing, tagged with its
/// original 1-indexed position in the source file (for diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessedLine {
    pub text: String,
    pub line_no: usize,
}

/// Strip a leading run of decimal digits followed by whitespace (an
/// optional line-number prefix), truncate at the first `;`, and trim.
fn preprocess_line(raw: &str) -> String {
    let without_line_number = strip_line_number(raw);
    let without_comment = match without_line_number.find(';') {
        Some(idx) => &without_line_number[..idx],
        None => without_line_number,
    };
    without_comment.trim().to_string()
}

fn strip_line_number(line: &str) -> &str {
    let digit_end = line
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, c)| i + c.len_utf8());

    match digit_end {
        Some(end) if line[end..].starts_with(|c: char| c.is_whitespace()) => {
            line[end..].trim_start()
        }
        _ => line,
    }
}

/// Run the preprocessor over a full source file, dropping now-empty
/// lines and preserving source order and original line numbers.
#[must_use]
pub fn preprocess(source: &str) -> Vec<PreprocessedLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let text = preprocess_line(raw);
            if text.is_empty() {
                None
            } else {
                Some(PreprocessedLine {
                    text,
                    line_no: idx + 1,
                })
            }
        })
        .collect()
}
