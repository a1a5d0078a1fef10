use thiserror::Error;

/// Errors raised while turning infix text into tokens.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An opening parenthesis with no partner; carries the expression
    /// prefix up to and including the offender.
    #[error("unmatched opening parenthesis: {0}")]
    UnmatchedOpeningParen(String),
    /// A closing parenthesis with no partner.
    #[error("unmatched closing parenthesis: {0}")]
    UnmatchedClosingParen(String),
    /// Characters left over after every known lexeme was accounted for.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
    /// An identifier riding on a numeric literal, e.g. `2x`.
    #[error("invalid name: {0}")]
    InvalidName(String),
    /// No operator overload matches the observed operand arities.
    #[error("operator {name}[{largs} {rargs} ?] not found")]
    OperatorNotFound {
        name: String,
        largs: usize,
        rargs: usize,
    },
}

/// Errors raised while lowering tokens to instructions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    /// No callable, variable, or constant matches the token.
    #[error("unknown token: {0}")]
    UnknownToken(String),
    /// A value token that does not parse as a number.
    #[error("invalid numeric literal: {0}")]
    InvalidNumber(String),
}
