//! Core text scanners for the mex expression language.
//!
//! Everything here operates on plain byte offsets into the expression
//! string and traverses strictly left to right, one pass per call. The
//! parser builds its rewriting passes on top of these primitives.

pub mod scan;

pub use scan::{
    backward_paren_match, count_top_level_commas, find_function, find_name, find_number,
    forward_paren_match, is_name, is_number, split_top_level, FunctionMatch, NumberScan,
};
