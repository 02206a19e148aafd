//! Document-level parsing: drives the line tokenizer over a line source.
//!
//! Logical rows may span physical lines when a quoted field embeds a
//! newline; the driver joins those lines before tokenizing. Read failures
//! abort the whole parse with the 1-based physical line number attached —
//! no partial row set is ever returned.

use std::io::BufRead;

use thiserror::Error;

use crate::tokenizer::{line_leaves_quote_open, tokenize_line};

/// Terminal failure of a document parse.
#[derive(Debug, Error)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    pub line: usize,
    pub reason: String,
}

/// Parses an entire document into rows of raw field strings.
///
/// The line source must already have stripped any encoding preamble (see
/// [`crate::io_utils::open_line_source`]). Each physical line is counted
/// 1-based; trailing carriage-return/line-feed/space sequences are stripped
/// before tokenization, except inside an open quoted field where the line
/// ending is part of the field content.
pub fn parse_document<R: BufRead>(mut source: R) -> Result<Vec<Vec<String>>, ParseError> {
    let mut rows = Vec::new();
    let mut pending = String::new();
    let mut line_number = 0usize;
    let mut physical = String::new();

    loop {
        physical.clear();
        let read = source.read_line(&mut physical).map_err(|err| ParseError {
            line: line_number + 1,
            reason: err.to_string(),
        })?;
        if read == 0 {
            break;
        }
        line_number += 1;
        pending.push_str(&physical);
        let logical = pending.trim_end_matches([' ', '\r', '\n']);
        if line_leaves_quote_open(logical) {
            // Embedded quoted newline: keep the raw ending and join the next
            // physical line into the same logical row.
            continue;
        }
        rows.push(tokenize_line(logical));
        pending.clear();
    }

    if !pending.is_empty() {
        // Unterminated quote at end of input still tokenizes; the scan is
        // total.
        let logical = pending.trim_end_matches([' ', '\r', '\n']);
        rows.push(tokenize_line(logical));
    }

    Ok(rows)
}
