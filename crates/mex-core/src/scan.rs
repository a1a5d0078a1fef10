//! Range finders for numbers, names, function calls, and parentheses.
//!
//! The expression surface is ASCII, so the scanners work on bytes. All
//! ranges are half-open (`start..end`) byte offsets into the scanned text.

use std::ops::Range;

const OPEN: u8 = b'(';
const CLOSE: u8 = b')';
const SEPARATOR: u8 = b',';

/// Result of scanning for a numeric literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumberScan {
    /// No literal found in the remainder of the text.
    None,
    /// A literal occupying the given range.
    Number(Range<usize>),
    /// A literal immediately followed by an identifier, e.g. `2x`.
    /// The range covers both the literal and the identifier.
    InvalidName(Range<usize>),
}

/// A function call `name(...)` located in the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionMatch {
    /// First byte of the name.
    pub start: usize,
    /// Offset of the opening parenthesis.
    pub open: usize,
    /// One past the matching closing parenthesis.
    pub end: usize,
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_number_char(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

/// Can an identifier start at `pos`?
///
/// An `E`/`e` does not start an identifier when either of the two
/// preceding characters belongs to a number; that keeps the exponent of
/// `1E2` out of the identifier scanner while still accepting names like
/// `x_Ex`.
fn name_starts_at(bytes: &[u8], pos: usize) -> bool {
    if !is_name_start(bytes[pos]) {
        return false;
    }
    if bytes[pos] == b'E' || bytes[pos] == b'e' {
        let prev1 = pos.checked_sub(1).map(|i| bytes[i]);
        let prev2 = pos.checked_sub(2).map(|i| bytes[i]);
        if prev1.is_some_and(is_number_char) || prev2.is_some_and(is_number_char) {
            return false;
        }
    }
    true
}

/// Longest run starting at `start` that the number grammar accepts.
///
/// Grammar: `D+ ('.' D*)? (E [+-]? D+)?` and `.D*`, with at most one dot,
/// at most one exponent, no dot after the exponent, no leading exponent,
/// and a sign only directly after the exponent. The run may end in a
/// dangling `E` or `E±`; callers trim that back (see [`find_number`]).
fn match_number_run(bytes: &[u8], start: usize) -> usize {
    let mut dot_seen = false;
    let mut e_at: Option<usize> = None;
    let mut i = start;
    while i < bytes.len() {
        let b = bytes[i];
        let accept = if b.is_ascii_digit() {
            true
        } else if b == b'.' {
            if dot_seen || e_at.is_some() {
                false
            } else {
                dot_seen = true;
                true
            }
        } else if b == b'E' || b == b'e' {
            if i == start || e_at.is_some() {
                false
            } else {
                e_at = Some(i);
                true
            }
        } else if b == b'+' || b == b'-' {
            e_at == Some(i.wrapping_sub(1))
        } else {
            false
        };
        if !accept {
            break;
        }
        i += 1;
    }
    i
}

/// Find the next numeric literal at or after `from`.
///
/// Digits that continue an identifier (`x2`, `x2y`) are skipped. An
/// identifier starting immediately after a literal (`2x`) is reported as
/// [`NumberScan::InvalidName`].
pub fn find_number(text: &str, from: usize) -> NumberScan {
    let bytes = text.as_bytes();
    let mut from = from;
    loop {
        let mut start = from;
        while start < bytes.len() && match_number_run(bytes, start) == start {
            start += 1;
        }
        if start >= bytes.len() {
            return NumberScan::None;
        }
        let raw_end = match_number_run(bytes, start);

        // Part of an identifier, not a literal.
        if start > 0 && is_name_char(bytes[start - 1]) {
            from = raw_end;
            continue;
        }

        // An identifier may not ride on the tail of a literal.
        if raw_end < bytes.len() && name_starts_at(bytes, raw_end) {
            let mut name_end = raw_end + 1;
            while name_end < bytes.len() && is_name_char(bytes[name_end]) {
                name_end += 1;
            }
            return NumberScan::InvalidName(start..name_end);
        }

        // Trim a dangling exponent: `1.2E` and `1.2E-` end at the `2`.
        let mut end = raw_end;
        while end > start && !bytes[end - 1].is_ascii_digit() && bytes[end - 1] != b'.' {
            end -= 1;
        }
        return NumberScan::Number(start..end);
    }
}

/// Find the next plain identifier at or after `from`.
///
/// Identifiers immediately followed by `(` are calls and are skipped, as
/// are identifiers for which `is_op` reports an operator name.
pub fn find_name<F>(text: &str, from: usize, is_op: F) -> Option<Range<usize>>
where
    F: Fn(&str) -> bool,
{
    let bytes = text.as_bytes();
    let mut from = from;
    loop {
        let mut start = from;
        while start < bytes.len() && !name_starts_at(bytes, start) {
            start += 1;
        }
        if start >= bytes.len() {
            return None;
        }
        let mut end = start + 1;
        while end < bytes.len() && is_name_char(bytes[end]) {
            end += 1;
        }
        if end < bytes.len() && bytes[end] == OPEN {
            from = end;
            continue;
        }
        if is_op(&text[start..end]) {
            from = end;
            continue;
        }
        return Some(start..end);
    }
}

/// Find the next function call `name(...)` at or after `from`.
///
/// Operator-named calls (e.g. a `cross3(...)` registered as an operator)
/// are skipped; the scan continues inside their argument list.
pub fn find_function<F>(text: &str, from: usize, is_op: F) -> Option<FunctionMatch>
where
    F: Fn(&str) -> bool,
{
    let bytes = text.as_bytes();
    let mut from = from;
    loop {
        let mut start = from;
        while start < bytes.len() && !name_starts_at(bytes, start) {
            start += 1;
        }
        if start >= bytes.len() {
            return None;
        }
        let mut end = start + 1;
        while end < bytes.len() && is_name_char(bytes[end]) {
            end += 1;
        }
        if end >= bytes.len() || bytes[end] != OPEN {
            from = end;
            continue;
        }
        if is_op(&text[start..end]) {
            from = end;
            continue;
        }
        let close = forward_paren_match(bytes, end)?;
        return Some(FunctionMatch {
            start,
            open: end,
            end: close + 1,
        });
    }
}

/// Offset of the `)` matching the `(` at `pos`, or `None`.
pub fn forward_paren_match(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut depth = 0i32;
    let mut i = pos;
    while i < bytes.len() {
        match bytes[i] {
            OPEN => depth += 1,
            CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Offset of the `(` matching the `)` at `pos`, or `None`.
pub fn backward_paren_match(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut depth = 0i32;
    let mut i = pos;
    loop {
        match bytes[i] {
            CLOSE => depth += 1,
            OPEN => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        if i == 0 {
            return None;
        }
        i -= 1;
    }
}

/// Number of commas at parenthesis depth zero.
pub fn count_top_level_commas(text: &str) -> usize {
    let mut depth = 0i32;
    let mut count = 0;
    for &b in text.as_bytes() {
        match b {
            OPEN => depth += 1,
            CLOSE => depth -= 1,
            SEPARATOR if depth == 0 => count += 1,
            _ => {}
        }
    }
    count
}

/// Split on commas at parenthesis depth zero.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            OPEN => depth += 1,
            CLOSE => depth -= 1,
            SEPARATOR if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Does the whole of `text` form one numeric literal?
pub fn is_number(text: &str) -> bool {
    matches!(find_number(text, 0), NumberScan::Number(r) if r == (0..text.len()))
}

/// Does the whole of `text` form one identifier?
pub fn is_name(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.is_empty() || !is_name_start(bytes[0]) {
        return false;
    }
    bytes.iter().all(|&b| is_name_char(b))
}
