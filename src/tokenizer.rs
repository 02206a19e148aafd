//! Line-level CSV tokenization.
//!
//! The scanner is a two-state finite-state machine (`Unquoted`, `Quoted`)
//! over a character cursor. It is total: any byte sequence tokenizes into at
//! least one field. Quoting rules:
//!
//! - A `"` opens quoted mode only when it is the first character of a field.
//! - Inside quoted mode, `""` is an escaped literal quote; the field is
//!   flagged and the collapse to `"` happens once, non-recursively, when the
//!   field is emitted.
//! - A backslash is an ordinary character and passes through verbatim.
//! - Leading and trailing ASCII spaces (`0x20` only, never tab) are trimmed
//!   from every emitted field, after quote resolution.

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Unquoted,
    Quoted,
}

/// Splits one line of text into fields.
///
/// The line is expected to arrive with its trailing carriage-return,
/// line-feed, and space sequence already stripped by the line source. An
/// empty line yields a single empty field, never zero fields.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut escaped_quote = false;
    let mut at_field_start = true;
    let mut state = ScanState::Unquoted;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            ScanState::Unquoted => match ch {
                ',' => {
                    emit_field(&mut fields, &mut field, &mut escaped_quote);
                    at_field_start = true;
                }
                '"' if at_field_start => {
                    state = ScanState::Quoted;
                    at_field_start = false;
                }
                other => {
                    field.push(other);
                    at_field_start = false;
                }
            },
            ScanState::Quoted => {
                if ch == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push_str("\"\"");
                        escaped_quote = true;
                    } else {
                        state = ScanState::Unquoted;
                    }
                } else {
                    field.push(ch);
                }
            }
        }
    }

    emit_field(&mut fields, &mut field, &mut escaped_quote);
    fields
}

fn emit_field(fields: &mut Vec<String>, field: &mut String, escaped_quote: &mut bool) {
    let mut value = std::mem::take(field);
    if *escaped_quote {
        value = value.replace("\"\"", "\"");
        *escaped_quote = false;
    }
    fields.push(value.trim_matches(' ').to_string());
}

/// Reports whether the scanner would finish the line inside an open quoted
/// field. The document parser uses this to join logical rows that span
/// physical lines through an embedded quoted newline.
pub(crate) fn line_leaves_quote_open(line: &str) -> bool {
    let mut state = ScanState::Unquoted;
    let mut at_field_start = true;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match state {
            ScanState::Unquoted => match ch {
                ',' => at_field_start = true,
                '"' if at_field_start => {
                    state = ScanState::Quoted;
                    at_field_start = false;
                }
                _ => at_field_start = false,
            },
            ScanState::Quoted => {
                if ch == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                    } else {
                        state = ScanState::Unquoted;
                    }
                }
            }
        }
    }
    state == ScanState::Quoted
}

/// Truncates or pads `row` to exactly `target_width` fields.
///
/// Padding uses empty strings. Never fails; a width mismatch is always
/// resolved, never reported.
pub fn fix_column_count(target_width: usize, mut row: Vec<String>) -> Vec<String> {
    row.truncate(target_width);
    row.resize(target_width, String::new());
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(line: &str) -> Vec<String> {
        tokenize_line(line)
    }

    #[test]
    fn empty_line_yields_single_empty_field() {
        assert_eq!(fields(""), vec![""]);
    }

    #[test]
    fn plain_fields_split_on_comma() {
        assert_eq!(fields("a,b"), vec!["a", "b"]);
        assert_eq!(fields(","), vec!["", ""]);
        assert_eq!(fields("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn doubled_quotes_collapse_once() {
        assert_eq!(fields("\"a\"\"b\",\"c\"\"\""), vec!["a\"b", "c\""]);
        // Four quotes inside a quoted field collapse to two, not one.
        assert_eq!(fields("\"a\"\"\"\"b\""), vec!["a\"\"b"]);
    }

    #[test]
    fn edge_spaces_trimmed_interior_preserved() {
        assert_eq!(fields(" a , b "), vec!["a", "b"]);
        assert_eq!(fields("\" a b \""), vec!["a b"]);
        assert_eq!(fields("a  b"), vec!["a  b"]);
    }

    #[test]
    fn tabs_are_not_trimmed() {
        assert_eq!(fields("\ta\t,b"), vec!["\ta\t", "b"]);
    }

    #[test]
    fn quoted_comma_does_not_split() {
        assert_eq!(fields("\"a,b\",c"), vec!["a,b", "c"]);
    }

    #[test]
    fn quoted_newline_content_survives_edge_trim() {
        assert_eq!(fields("\" b \r\nbb\""), vec!["b \r\nbb"]);
    }

    #[test]
    fn backslash_passes_through_verbatim() {
        assert_eq!(fields("a\\nb,\"c\\\""), vec!["a\\nb", "c\\"]);
    }

    #[test]
    fn quote_not_at_field_start_is_literal() {
        assert_eq!(fields("a\"b,c"), vec!["a\"b", "c"]);
        assert_eq!(fields(" \"a\",b"), vec!["\"a\"", "b"]);
    }

    #[test]
    fn text_after_closing_quote_extends_field() {
        assert_eq!(fields("\"a\"b,c"), vec!["ab", "c"]);
    }

    #[test]
    fn unterminated_quote_consumes_rest_of_line() {
        assert_eq!(fields("\"a,b"), vec!["a,b"]);
    }

    #[test]
    fn open_quote_detection_tracks_state() {
        assert!(line_leaves_quote_open("\"a"));
        assert!(line_leaves_quote_open("x,\"a\"\""));
        assert!(!line_leaves_quote_open("\"a\",b"));
        assert!(!line_leaves_quote_open("a\"b"));
    }

    #[test]
    fn fix_column_count_pads_and_truncates() {
        let short = vec!["a".to_string(), "b".to_string()];
        assert_eq!(fix_column_count(3, short), vec!["a", "b", ""]);

        let long = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(fix_column_count(2, long), vec!["a", "b"]);

        assert_eq!(
            fix_column_count(0, vec!["a".to_string()]),
            Vec::<String>::new()
        );
    }
}
