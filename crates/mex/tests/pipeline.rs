//! End-to-end pipeline tests: seed the default environment, parse,
//! compile, run, and assert the exact stack contents in order.

use mex::Engine;

fn eval(engine: &mut Engine, expr: &str) -> Vec<f64> {
    engine.eval(expr).unwrap()
}

#[test]
fn scalar_arithmetic() {
    let mut engine = Engine::new();
    assert_eq!(engine.rpn("1 + 2 * 3").unwrap(), "1 2 3 *[1 1 1] +[1 1 1]");
    assert_eq!(eval(&mut engine, "1 + 2 * 3"), vec![7.0]);
}

#[test]
fn assignment_returns_value_and_persists() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.rpn("x = 2 + 3").unwrap(),
        "2 3 +[1 1 1] x =[1 1 1]"
    );
    assert_eq!(eval(&mut engine, "x = 2 + 3"), vec![5.0]);
    assert_eq!(eval(&mut engine, "x"), vec![5.0]);
}

#[test]
fn function_call() {
    let mut engine = Engine::new();
    assert_eq!(engine.rpn("atan2(1, 1)").unwrap(), "1 1 atan2[2]");
    let result = eval(&mut engine, "atan2(1, 1)");
    assert_eq!(result.len(), 1);
    assert!((result[0] - std::f64::consts::FRAC_PI_4).abs() < 1e-15);
}

#[test]
fn vector_cross_product() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "cross3((1,0,0),(0,1,0))"), vec![0.0, 0.0, 1.0]);
}

#[test]
fn component_wise_vector_add() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.rpn("(1,2,3)+(4,5,6)").unwrap(),
        "1 2 3 4 5 6 +[3 3 3]"
    );
    assert_eq!(eval(&mut engine, "(1,2,3)+(4,5,6)"), vec![5.0, 7.0, 9.0]);
}

#[test]
fn component_wise_vector_sub() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "(5,7,9)-(1,2,3)"), vec![4.0, 5.0, 6.0]);
}

#[test]
fn dot_product() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "(1,2,3)*(4,5,6)"), vec![32.0]);
}

#[test]
fn vector_assignment() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.rpn("(x,y,z)=(1,2,3)").unwrap(),
        "1 2 3 x y z =[3 3 3]"
    );
    assert_eq!(eval(&mut engine, "(x,y,z)=(1,2,3)"), vec![1.0, 2.0, 3.0]);
    assert_eq!(eval(&mut engine, "x"), vec![1.0]);
    assert_eq!(eval(&mut engine, "y"), vec![2.0]);
    assert_eq!(eval(&mut engine, "z"), vec![3.0]);
}

#[test]
fn two_wide_and_four_wide_assignment() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "(x,y)=(8,9)"), vec![8.0, 9.0]);
    assert_eq!(eval(&mut engine, "(x,y,z,w)=(1,2,3,4)"), vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(eval(&mut engine, "w"), vec![4.0]);
}

#[test]
fn unary_minus() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "-2"), vec![-2.0]);
    assert_eq!(eval(&mut engine, "1 - 2"), vec![-1.0]);
    assert_eq!(eval(&mut engine, "2*(-3)"), vec![-6.0]);
}

#[test]
fn constants_resolve() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "Pi"), vec![std::f64::consts::PI]);
    let result = eval(&mut engine, "cos(Pi)");
    assert!((result[0] + 1.0).abs() < 1e-12);
}

#[test]
fn named_binary_functions() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "add(2, 3)"), vec![5.0]);
    assert_eq!(eval(&mut engine, "pow(2, 10)"), vec![1024.0]);
    assert_eq!(eval(&mut engine, "sub(2, 3)"), vec![-1.0]);
}

#[test]
fn power_and_modulo() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "2^10"), vec![1024.0]);
    assert_eq!(eval(&mut engine, "7 % 3"), vec![1.0]);
}

#[test]
fn scientific_notation() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "1.5E2"), vec![150.0]);
    assert_eq!(eval(&mut engine, "1E-2 * 100"), vec![1.0]);
    assert_eq!(eval(&mut engine, "x + 1.E-3"), vec![0.001]);
}

#[test]
fn nested_expression() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "sqrt(3*3 + 4*4)"), vec![5.0]);
    assert_eq!(eval(&mut engine, "sin(cos(0) * 0)"), vec![0.0]);
}

#[test]
fn assignment_feeds_followup_expressions() {
    let mut engine = Engine::new();
    eval(&mut engine, "x = 3");
    eval(&mut engine, "y = 4");
    assert_eq!(eval(&mut engine, "sqrt(x*x + y*y)"), vec![5.0]);
}

#[test]
fn stack_depth_matches_net_output_arity() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "1 + 1").len(), 1);
    assert_eq!(eval(&mut engine, "(1,2,3)+(4,5,6)").len(), 3);
    assert_eq!(eval(&mut engine, "cross3((1,0,0),(0,1,0))").len(), 3);
}

#[test]
fn token_stream_arity_balances() {
    let mut engine = Engine::new();
    for expr in ["1 + 2 * 3", "(1,2,3)+(4,5,6)", "x = atan2(1, 2)"] {
        let tokens = engine.parser_mut().parse(expr).unwrap();
        let mut depth: i64 = 0;
        for token in &tokens {
            let (consumed, produced) = token.arity().unwrap();
            depth -= consumed as i64;
            assert!(depth >= 0, "token stream underflows in {expr}");
            depth += produced as i64;
        }
        let result = engine.eval(expr).unwrap();
        assert_eq!(depth as usize, result.len(), "arity mismatch in {expr}");
    }
}

#[test]
fn empty_argument_list_has_arity_zero() {
    let mut engine = Engine::new();
    // No zero-argument callable is registered, so the lookup fails,
    // but the parsed arity is visible in the RPN.
    assert_eq!(engine.rpn("f()").unwrap(), "f[0]");
}

#[test]
fn whitespace_is_insignificant() {
    let mut engine = Engine::new();
    assert_eq!(eval(&mut engine, "  1+2   *   3 "), vec![7.0]);
}
