use super::*;

#[test]
fn drops_blank_and_comment_only_lines() {
    let src = "10 LABEL LDA VALUE\n\n; a full line comment\n20 LDB OTHER ; trailing\n";
    let lines = preprocess(src);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "LABEL LDA VALUE");
    assert_eq!(lines[0].line_no, 1);
    assert_eq!(lines[1].text, "LDB OTHER");
    assert_eq!(lines[1].line_no, 4);
}

#[test]
fn strips_line_number_prefix_only_when_followed_by_whitespace() {
    assert_eq!(strip_line_number("100 START 1000"), "START 1000");
    assert_eq!(strip_line_number("BYTE100 C'X'"), "BYTE100 C'X'");
}

#[test]
fn keeps_line_with_no_prefix_or_comment() {
    let src = "FIRST STL RETADR";
    let lines = preprocess(src);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "FIRST STL RETADR");
}
