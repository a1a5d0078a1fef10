//! Pre-parse validation.
//!
//! Parentheses are balance-checked first. Then, on a scratch copy of
//! the expression, every recognized lexeme class is blanked out in
//! turn: numbers, function names, plain identifiers, operator names,
//! punctuation. Identifiers go before operators so an operator name
//! occurring inside an identifier cannot be mis-blanked. Whatever is
//! left over is an unknown symbol.

use std::ops::Range;

use mex_core::scan::{
    backward_paren_match, find_function, find_name, find_number, forward_paren_match, NumberScan,
};

use crate::error::ParseError;
use crate::operator::OpTable;

pub(crate) fn validate(expr: &str, ops: &OpTable) -> Result<(), ParseError> {
    let bytes = expr.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'(' && forward_paren_match(bytes, i).is_none() {
            return Err(ParseError::UnmatchedOpeningParen(expr[..=i].to_string()));
        }
        if b == b')' && backward_paren_match(bytes, i).is_none() {
            return Err(ParseError::UnmatchedClosingParen(expr[..=i].to_string()));
        }
    }

    let mut scratch = expr.to_string();

    loop {
        match find_number(&scratch, 0) {
            NumberScan::None => break,
            NumberScan::Number(r) => blank(&mut scratch, r),
            NumberScan::InvalidName(r) => {
                return Err(ParseError::InvalidName(scratch[r].to_string()));
            }
        }
    }

    while let Some(m) = find_function(&scratch, 0, |s| ops.contains(s)) {
        blank(&mut scratch, m.start..m.open);
    }

    while let Some(r) = find_name(&scratch, 0, |s| ops.contains(s)) {
        blank(&mut scratch, r);
    }

    for op in ops.iter() {
        while let Some(pos) = scratch.find(&op.name) {
            blank(&mut scratch, pos..pos + op.name.len());
        }
    }

    let leftover: String = scratch
        .chars()
        .filter(|&c| !matches!(c, '(' | ')' | ',' | ' '))
        .collect();
    if !leftover.is_empty() {
        return Err(ParseError::UnknownSymbol(leftover));
    }
    Ok(())
}

fn blank(scratch: &mut String, r: Range<usize>) {
    let blanks = " ".repeat(r.len());
    scratch.replace_range(r, &blanks);
}
