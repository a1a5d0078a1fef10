//! Error-path tests across the pipeline.

use mex::{CompileError, Engine, EvalError, ParseError};

#[test]
fn unmatched_opening_paren() {
    let mut engine = Engine::new();
    assert!(matches!(
        engine.eval("(1 + 2"),
        Err(EvalError::Parse(ParseError::UnmatchedOpeningParen(_)))
    ));
}

#[test]
fn unmatched_closing_paren() {
    let mut engine = Engine::new();
    assert!(matches!(
        engine.eval("1 + 2)"),
        Err(EvalError::Parse(ParseError::UnmatchedClosingParen(_)))
    ));
}

#[test]
fn unknown_symbol() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.eval("1 $ 2"),
        Err(EvalError::Parse(ParseError::UnknownSymbol("$".into())))
    );
}

#[test]
fn digit_adjacent_identifier() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.eval("2x + 1"),
        Err(EvalError::Parse(ParseError::InvalidName("2x".into())))
    );
}

#[test]
fn dangling_exponent_rejected() {
    let mut engine = Engine::new();
    assert!(engine.eval("1.2E + 1").is_err());
}

#[test]
fn operator_overload_not_found() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.eval("(1,2)+(1,2,3)"),
        Err(EvalError::Parse(ParseError::OperatorNotFound {
            name: "+".into(),
            largs: 2,
            rargs: 3
        }))
    );
}

#[test]
fn unknown_identifier_without_auto_create() {
    let mut engine = Engine::new();
    engine.compiler_mut().set_create_vars(false);
    assert_eq!(
        engine.eval("foo + 1"),
        Err(EvalError::Compile(CompileError::UnknownToken("foo".into())))
    );
}

#[test]
fn unknown_function_arity() {
    let mut engine = Engine::new();
    // sin exists, but not with two arguments.
    assert_eq!(
        engine.eval("sin(1, 2)"),
        Err(EvalError::Compile(CompileError::UnknownToken("sin".into())))
    );
}

#[test]
fn errors_do_not_poison_the_engine() {
    let mut engine = Engine::new();
    assert!(engine.eval("(1").is_err());
    assert_eq!(engine.eval("1 + 1").unwrap(), vec![2.0]);
}
