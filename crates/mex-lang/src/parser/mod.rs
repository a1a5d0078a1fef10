//! The infix → RPN parser.
//!
//! `parse` runs a fixed pipeline of string-rewriting passes over the
//! expression: validate, wrap atoms, strip blanks, postfix operators,
//! postfix functions, flatten to RPN, tokenize. Each pass is an
//! iterate-until-stable scan over the buffer; none of them recurse over
//! the expression.

mod postfix;
mod tokenize;
mod validate;
mod wrap;

pub use tokenize::tokenize_rpn;

use crate::error::ParseError;
use crate::operator::OpTable;
use crate::token::Token;

/// Parser for infix expressions over a fixed operator table.
pub struct Parser {
    ops: OpTable,
    swap_args: bool,
    count_args: bool,
    debug: bool,
    trace: Vec<String>,
}

impl Parser {
    /// Create a parser. Argument counting defaults to on, argument
    /// swapping and debug tracing to off.
    pub fn new(ops: OpTable) -> Self {
        Self {
            ops,
            swap_args: false,
            count_args: true,
            debug: false,
            trace: Vec::new(),
        }
    }

    /// The operator table.
    pub fn ops(&self) -> &OpTable {
        &self.ops
    }

    /// Reverse function argument order during postfix emission?
    pub fn swap_args(&self) -> bool {
        self.swap_args
    }

    /// Set the argument swapping flag.
    pub fn set_swap_args(&mut self, swap: bool) {
        self.swap_args = swap;
    }

    /// Annotate emitted operators and functions with arities?
    pub fn count_args(&self) -> bool {
        self.count_args
    }

    /// Set the argument counting flag.
    pub fn set_count_args(&mut self, count: bool) {
        self.count_args = count;
    }

    /// Record intermediate pipeline forms?
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Set the debug tracing flag.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Intermediate forms recorded by the last `parse`, one entry per
    /// pipeline pass. Empty unless debug tracing is on.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// Parse an infix expression into an RPN token stream.
    pub fn parse(&mut self, expr: &str) -> Result<Vec<Token>, ParseError> {
        self.trace.clear();
        let mut text = expr.to_string();

        validate::validate(&text, &self.ops)?;
        wrap::wrap(&mut text, &self.ops)?;
        text.retain(|c| c != ' ');
        self.note("wrap", &text);

        postfix::postfix_operators(&mut text, &self.ops, self.count_args)?;
        self.note("postfix operators", &text);
        postfix::postfix_functions(&mut text, &self.ops, self.swap_args, self.count_args);
        self.note("postfix functions", &text);

        let rpn = tokenize::flatten(&text);
        self.note("rpn", &rpn);

        Ok(tokenize::tokenize_rpn(&rpn, &self.ops, self.count_args))
    }

    fn note(&mut self, pass: &str, text: &str) {
        if self.debug {
            self.trace.push(format!("{}: {}", pass, text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::OpDef;
    use crate::token::render_tokens;

    fn default_ops() -> OpTable {
        OpTable::new(vec![
            OpDef::new("cross3", 1, 0, 6, 3),
            OpDef::binary("^"),
            OpDef::new("*", 2, 3, 3, 1),
            OpDef::binary("*"),
            OpDef::binary("/"),
            OpDef::new("-", 1, 0, 1, 1),
            OpDef::binary("-"),
            OpDef::new("-", 2, 3, 3, 3),
            OpDef::new("+", 2, 3, 3, 3),
            OpDef::binary("+"),
            OpDef::binary("%"),
            OpDef::new("=", 2, 1, 1, 1).with_swap(),
            OpDef::new("=", 2, 2, 2, 2).with_swap(),
            OpDef::new("=", 2, 3, 3, 3).with_swap(),
            OpDef::new("=", 2, 4, 4, 4).with_swap(),
        ])
    }

    fn rpn_of(expr: &str) -> String {
        let mut parser = Parser::new(default_ops());
        render_tokens(&parser.parse(expr).unwrap())
    }

    #[test]
    fn scalar_arithmetic() {
        assert_eq!(rpn_of("1 + 2 * 3"), "1 2 3 *[1 1 1] +[1 1 1]");
    }

    #[test]
    fn assignment_places_destination_before_equals() {
        assert_eq!(rpn_of("x = 2 + 3"), "2 3 +[1 1 1] x =[1 1 1]");
    }

    #[test]
    fn vector_assignment() {
        assert_eq!(rpn_of("(x,y,z)=(1,2,3)"), "1 2 3 x y z =[3 3 3]");
    }

    #[test]
    fn function_call() {
        assert_eq!(rpn_of("atan2(1, 1)"), "1 1 atan2[2]");
    }

    #[test]
    fn vector_operators() {
        assert_eq!(rpn_of("(1,2,3)+(4,5,6)"), "1 2 3 4 5 6 +[3 3 3]");
        assert_eq!(
            rpn_of("cross3((1,0,0),(0,1,0))"),
            "1 0 0 0 1 0 cross3[0 6 3]"
        );
        assert_eq!(rpn_of("(1,2,3)*(4,5,6)"), "1 2 3 4 5 6 *[3 3 1]");
    }

    #[test]
    fn unary_and_binary_minus() {
        assert_eq!(rpn_of("-2"), "2 -[0 1 1]");
        assert_eq!(rpn_of("1-2"), "1 2 -[1 1 1]");
        assert_eq!(rpn_of("2*(-3)"), "2 3 -[0 1 1] *[1 1 1]");
    }

    #[test]
    fn scientific_literals_pass_through() {
        assert_eq!(rpn_of("x + 1.E-3"), "x 1.E-3 +[1 1 1]");
    }

    #[test]
    fn nested_calls() {
        assert_eq!(rpn_of("sin(cos(x))"), "x cos[1] sin[1]");
        assert_eq!(rpn_of("atan2(sin(x), 1)"), "x sin[1] 1 atan2[2]");
    }

    #[test]
    fn without_counting_emits_bare_names() {
        let mut parser = Parser::new(default_ops());
        parser.set_count_args(false);
        let tokens = parser.parse("1 + 2").unwrap();
        assert_eq!(render_tokens(&tokens), "1 2 +");
    }

    #[test]
    fn tokenizing_rendered_rpn_is_stable() {
        let mut parser = Parser::new(default_ops());
        let tokens = parser.parse("x = atan2(1, 2) + 3 * 4").unwrap();
        let rendered = render_tokens(&tokens);
        let again = tokenize_rpn(&rendered, parser.ops(), parser.count_args());
        assert_eq!(tokens, again);
    }

    #[test]
    fn trace_records_passes_when_debugging() {
        let mut parser = Parser::new(default_ops());
        parser.set_debug(true);
        parser.parse("1 + 2").unwrap();
        let trace = parser.trace();
        assert_eq!(trace.len(), 4);
        assert!(trace[0].starts_with("wrap: "));
        assert!(trace[3].starts_with("rpn: 1 2 +[1 1 1]"));
        // A later parse clears the previous trace.
        parser.set_debug(false);
        parser.parse("3").unwrap();
        assert!(parser.trace().is_empty());
    }

    #[test]
    fn parse_errors_surface() {
        let mut parser = Parser::new(default_ops());
        assert!(matches!(
            parser.parse("(1 + 2"),
            Err(ParseError::UnmatchedOpeningParen(_))
        ));
        assert!(matches!(
            parser.parse("2x + 1"),
            Err(ParseError::InvalidName(_))
        ));
        assert!(matches!(
            parser.parse("1 ? 2"),
            Err(ParseError::UnknownSymbol(_))
        ));
        assert!(matches!(
            parser.parse("(1,2)+(1,2,3)"),
            Err(ParseError::OperatorNotFound { .. })
        ));
    }
}
