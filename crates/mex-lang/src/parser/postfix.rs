//! Postfix rewriting of operators and function calls.
//!
//! Operators are visited in table order (earlier entries bind first);
//! each occurrence with matching operand groups is rewritten into a
//! parenthesized postfix group. Function calls are rewritten afterwards,
//! so their argument lists already carry operator annotations.

use mex_core::scan::{
    backward_paren_match, count_top_level_commas, find_function, forward_paren_match,
    split_top_level,
};

use crate::error::ParseError;
use crate::operator::OpTable;

pub(crate) fn postfix_operators(
    expr: &mut String,
    ops: &OpTable,
    count_args: bool,
) -> Result<(), ParseError> {
    for op in ops.iter() {
        let mut search_from = 0;
        loop {
            let Some(pos) = find_at(expr, &op.name, search_from) else {
                break;
            };
            let op_end = pos + op.name.len();
            if op_end >= expr.len() {
                break;
            }
            search_from = op_end;
            let bytes = expr.as_bytes();
            let after = bytes[op_end];
            // Already rewritten or annotated occurrences.
            if after == b')' || after == b'[' {
                continue;
            }

            let left = if pos > 0 && bytes[pos - 1] == b')' {
                backward_paren_match(bytes, pos - 1).map(|open| open..pos)
            } else {
                None
            };
            let right = if after == b'(' {
                forward_paren_match(bytes, op_end).map(|close| op_end..close + 1)
            } else {
                None
            };

            let argc = left.is_some() as usize + right.is_some() as usize;
            if argc != op.operands {
                continue;
            }

            let left_str = left
                .clone()
                .map(|r| expr[r].to_string())
                .unwrap_or_default();
            let right_str = right
                .clone()
                .map(|r| expr[r].to_string())
                .unwrap_or_default();

            let op_text = if count_args {
                let largs = if left_str.is_empty() {
                    0
                } else {
                    operand_arity(&left_str)
                };
                let rargs = if right_str.is_empty() {
                    0
                } else {
                    operand_arity(&right_str)
                };
                let resolved =
                    ops.resolve(&op.name, largs, rargs)
                        .ok_or_else(|| ParseError::OperatorNotFound {
                            name: op.name.clone(),
                            largs,
                            rargs,
                        })?;
                format!("{}[{} {} {}]", op.name, largs, rargs, resolved.outvals)
            } else {
                op.name.clone()
            };

            let replacement = if op.swap {
                format!("({},{} {})", right_str, left_str, op_text)
            } else {
                format!("({},{} {})", left_str, right_str, op_text)
            };
            let span_start = left.map(|r| r.start).unwrap_or(pos);
            let span_end = right.map(|r| r.end).unwrap_or(op_end);
            expr.replace_range(span_start..span_end, &replacement);
            // search_from keeps its pre-replacement value; anything it
            // re-finds inside the replacement is skipped above.
        }
    }
    Ok(())
}

pub(crate) fn postfix_functions(
    expr: &mut String,
    ops: &OpTable,
    swap_args: bool,
    count_args: bool,
) {
    while let Some(m) = find_function(expr, 0, |s| ops.contains(s)) {
        let mut call_args = expr[m.open..m.end].to_string();
        if swap_args {
            call_args = reverse_args(&call_args);
        }
        let name = &expr[m.start..m.open];
        let mut fun = format!("{}{}", call_args, name);
        if count_args {
            let args = if m.end - m.open > 2 {
                match annotation_outs(&expr[m.open..m.end]) {
                    Some(outs) => outs,
                    None => count_top_level_commas(&expr[m.open + 1..m.end - 1]) + 1,
                }
            } else {
                0
            };
            fun.push_str(&format!("[{}]", args));
        }
        expr.replace_range(m.start..m.end, &fun);
    }
}

/// Stack arity of a parenthesized operand group.
///
/// An already-rewritten group reports its annotation; otherwise the
/// group's top-level elements are summed, recursing into nested tuples
/// so `((1,0,0),(0,1,0))` counts 6 scalar slots.
pub(crate) fn operand_arity(group: &str) -> usize {
    if let Some(outs) = annotation_outs(group) {
        return outs;
    }
    count_values(&group[1..group.len() - 1])
}

fn count_values(interior: &str) -> usize {
    split_top_level(interior)
        .iter()
        .map(|e| element_values(e.trim()))
        .sum()
}

fn element_values(elem: &str) -> usize {
    if elem.is_empty() {
        return 0;
    }
    if let Some(outs) = annotation_outs(elem) {
        return outs;
    }
    let bytes = elem.as_bytes();
    if bytes[0] == b'(' && forward_paren_match(bytes, 0) == Some(elem.len() - 1) {
        return count_values(&elem[1..elem.len() - 1]);
    }
    1
}

/// Output count of a trailing `[...]` annotation, looking through any
/// run of closing parentheses: `((1),(2) +[1 1 1])` yields 1.
pub(crate) fn annotation_outs(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut end = text.len();
    while end > 0 && bytes[end - 1] == b')' {
        end -= 1;
    }
    if end == 0 || bytes[end - 1] != b']' {
        return None;
    }
    let open = text[..end].rfind('[')?;
    text[open + 1..end - 1]
        .split_whitespace()
        .last()?
        .parse()
        .ok()
}

/// Reverse a parenthesized argument list, recursing into nested lists.
fn reverse_args(list: &str) -> String {
    let bytes = list.as_bytes();
    if list.len() >= 2 && bytes[0] == b'(' && forward_paren_match(bytes, 0) == Some(list.len() - 1)
    {
        return format!("({})", reverse_args(&list[1..list.len() - 1]));
    }
    let parts = split_top_level(list);
    if parts.len() < 2 {
        return list.to_string();
    }
    parts
        .iter()
        .rev()
        .map(|p| reverse_args(p))
        .collect::<Vec<_>>()
        .join(",")
}

fn find_at(expr: &str, needle: &str, from: usize) -> Option<usize> {
    expr[from..].find(needle).map(|i| i + from)
}
