//! Atom wrapping.
//!
//! Every number, identifier, and function call is parenthesized unless
//! it already sits in one of the enclosed positions `(atom)`, `(atom,`
//! or `,atom)`. Atoms at the very start or end of the expression are
//! wrapped unconditionally. After this pass, every operator operand is
//! a single parenthesized group whose bounds a matching-paren scan can
//! find.

use std::ops::Range;

use mex_core::scan::{find_function, find_name, find_number, NumberScan};

use crate::error::ParseError;
use crate::operator::OpTable;

pub(crate) fn wrap(expr: &mut String, ops: &OpTable) -> Result<(), ParseError> {
    wrap_numbers(expr)?;
    wrap_names(expr, ops);
    wrap_functions(expr, ops);
    Ok(())
}

/// Is the range already sitting between parentheses or tuple commas?
fn enclosed(bytes: &[u8], start: usize, end: usize) -> bool {
    let before = bytes[start - 1];
    let after = bytes[end];
    (before == b'(' && after == b')')
        || (before == b'(' && after == b',')
        || (before == b',' && after == b')')
}

/// Wrap `expr[r]` in parentheses; returns the offset just past the
/// inserted closing parenthesis.
fn add_parens(expr: &mut String, r: Range<usize>) -> usize {
    expr.insert(r.start, '(');
    expr.insert(r.end + 1, ')');
    r.end + 2
}

fn wrap_numbers(expr: &mut String) -> Result<(), ParseError> {
    let mut from = 0;
    loop {
        let r = match find_number(expr, from) {
            NumberScan::None => break,
            NumberScan::InvalidName(r) => {
                return Err(ParseError::InvalidName(expr[r].to_string()));
            }
            NumberScan::Number(r) => r,
        };
        if r.start == 0 || r.end == expr.len() {
            from = add_parens(expr, r);
        } else if enclosed(expr.as_bytes(), r.start, r.end) {
            from = r.end + 1;
        } else {
            from = add_parens(expr, r);
        }
    }
    Ok(())
}

fn wrap_names(expr: &mut String, ops: &OpTable) {
    let mut from = 0;
    while let Some(r) = find_name(expr, from, |s| ops.contains(s)) {
        if r.start == 0 || r.end == expr.len() {
            from = add_parens(expr, r);
        } else if enclosed(expr.as_bytes(), r.start, r.end) {
            from = r.end + 1;
        } else {
            from = add_parens(expr, r);
        }
    }
}

fn wrap_functions(expr: &mut String, ops: &OpTable) {
    let mut from = 0;
    while let Some(m) = find_function(expr, from, |s| ops.contains(s)) {
        if m.start == 0 || m.end == expr.len() {
            add_parens(expr, m.start..m.end);
            from = 0;
        } else if enclosed(expr.as_bytes(), m.start, m.end) {
            // Already grouped; keep scanning inside the argument list
            // for nested calls.
            from = m.open;
        } else {
            add_parens(expr, m.start..m.end);
            from = 0;
        }
    }
}
