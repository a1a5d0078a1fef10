//! RPN flattening and token classification.

use mex_core::scan::{is_name, is_number};

use crate::operator::OpTable;
use crate::token::Token;

/// Collapse a fully rewritten expression into a space separated RPN
/// stream: parentheses and commas become spaces, runs of spaces fold.
pub(crate) fn flatten(expr: &str) -> String {
    let spaced: String = expr
        .chars()
        .map(|c| match c {
            '(' | ')' | ',' => ' ',
            c => c,
        })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split an RPN stream on whitespace and classify each chunk.
///
/// Operator annotations contain spaces (`+[1 1 1]`), so a chunk that
/// opens an annotation without closing it is glued to the following
/// chunks until one ends in `]`.
pub fn tokenize_rpn(rpn: &str, ops: &OpTable, count_args: bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chunks = rpn.split_whitespace();
    while let Some(chunk) = chunks.next() {
        let mut text = chunk.to_string();
        if count_args && text.contains('[') && !text.ends_with(']') {
            for next in chunks.by_ref() {
                text.push(' ');
                text.push_str(next);
                if next.ends_with(']') {
                    break;
                }
            }
        }
        tokens.push(classify(&text, ops, count_args));
    }
    tokens
}

fn classify(text: &str, ops: &OpTable, count_args: bool) -> Token {
    if count_args {
        if let Some(open) = text.find('[') {
            if !text.ends_with(']') {
                return Token::Unknown(text.to_string());
            }
            let name = &text[..open];
            let mut counts = Vec::with_capacity(3);
            for part in text[open + 1..text.len() - 1].split_whitespace() {
                match part.parse::<usize>() {
                    Ok(n) => counts.push(n),
                    Err(_) => return Token::Unknown(text.to_string()),
                }
            }
            return match counts.as_slice() {
                [args] => Token::Function {
                    name: name.to_string(),
                    args_in: *args,
                    args_out: None,
                },
                [args, out] => Token::Function {
                    name: name.to_string(),
                    args_in: *args,
                    args_out: Some(*out),
                },
                [lvalues, rvalues, outs] => Token::Operator {
                    name: name.to_string(),
                    sig: Some((*lvalues, *rvalues, *outs)),
                },
                _ => Token::Unknown(text.to_string()),
            };
        }
    } else if ops.contains(text) {
        // Bare operator names only appear when counting is off; they
        // match neither the number nor the name shape below.
        return Token::Operator {
            name: text.to_string(),
            sig: None,
        };
    }
    if is_number(text) {
        return Token::Value(text.to_string());
    }
    if is_name(text) {
        return Token::Name(text.to_string());
    }
    Token::Unknown(text.to_string())
}
