//! Tokenizer property tests.

use csv_sift::tokenizer::{fix_column_count, tokenize_line};
use proptest::prelude::*;

proptest! {
    // Tokenization is total: any line yields at least one field.
    #[test]
    fn tokenize_never_fails(line in "\\PC*") {
        let fields = tokenize_line(&line);
        prop_assert!(!fields.is_empty());
    }

    // Unquoted, unspaced content splits on commas and nothing else.
    #[test]
    fn plain_content_round_trips(parts in prop::collection::vec("[a-z0-9]{0,8}", 1..6)) {
        let line = parts.join(",");
        prop_assert_eq!(tokenize_line(&line), parts);
    }

    // Emitted fields never carry edge spaces.
    #[test]
    fn fields_are_edge_trimmed(line in "[ a-z,]*") {
        for field in tokenize_line(&line) {
            prop_assert!(!field.starts_with(' '));
            prop_assert!(!field.ends_with(' '));
        }
    }

    #[test]
    fn fixed_rows_have_exact_width(
        row in prop::collection::vec("[a-z]{0,4}", 0..6),
        width in 0usize..8,
    ) {
        prop_assert_eq!(fix_column_count(width, row).len(), width);
    }
}
