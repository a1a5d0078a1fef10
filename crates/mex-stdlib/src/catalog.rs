//! Default catalog: functions, operators, constants, variables.

use std::sync::Arc;

use mex_lang::{OpDef, OpTable};
use mex_vm::{Callable, Rte, Value};

use crate::adapt::{BinaryFn, Broadcast, UnaryFn};
use crate::assign::{ScalarAssign, VectorAssign};
use crate::vectors::{Cross3, Dot3};

fn neg(v: f64) -> f64 {
    -v
}

fn inv(v: f64) -> f64 {
    1.0 / v
}

const UNARY: &[(&str, fn(f64) -> f64)] = &[
    ("abs", f64::abs),
    ("acos", f64::acos),
    ("asin", f64::asin),
    ("atan", f64::atan),
    ("ceil", f64::ceil),
    ("cos", f64::cos),
    ("cosh", f64::cosh),
    ("exp", f64::exp),
    ("floor", f64::floor),
    ("log", f64::ln),
    ("log10", f64::log10),
    ("sin", f64::sin),
    ("sinh", f64::sinh),
    ("sqrt", f64::sqrt),
    ("tan", f64::tan),
    ("inv", inv),
];

fn add(a: f64, b: f64) -> f64 {
    a + b
}

fn sub(a: f64, b: f64) -> f64 {
    a - b
}

fn mul(a: f64, b: f64) -> f64 {
    a * b
}

fn div(a: f64, b: f64) -> f64 {
    a / b
}

fn rem(a: f64, b: f64) -> f64 {
    a % b
}

/// Infix binary scalars, also the set broadcast over 3-tuples.
const BINARY_INFIX: &[(&str, fn(f64, f64) -> f64)] = &[
    ("^", f64::powf),
    ("*", mul),
    ("/", div),
    ("+", add),
    ("-", sub),
    ("%", rem),
];

/// Named two-argument functions.
const BINARY_NAMED: &[(&str, fn(f64, f64) -> f64)] = &[
    ("add", add),
    ("sub", sub),
    ("div", div),
    ("mul", mul),
    ("pow", f64::powf),
    ("atan2", f64::atan2),
];

/// Default callable table.
///
/// Registration order is load-bearing: lookups take the first match, so
/// the dot product precedes the element-wise `*` broadcast, and scalar
/// assignment comes after the vector assignment forms.
pub fn default_functions() -> Vec<Arc<dyn Callable>> {
    let mut functions: Vec<Arc<dyn Callable>> = Vec::new();
    for &(name, f) in UNARY {
        functions.push(Arc::new(UnaryFn::new(name, f)));
    }
    // Unary minus: operand on the right, `[0 1 1]`.
    functions.push(Arc::new(UnaryFn::new("-", neg)));
    for &(name, f) in BINARY_INFIX {
        functions.push(Arc::new(BinaryFn::infix(name, f)));
    }
    for &(name, f) in BINARY_NAMED {
        functions.push(Arc::new(BinaryFn::named(name, f)));
    }
    functions.push(Arc::new(VectorAssign::new(4)));
    functions.push(Arc::new(VectorAssign::new(3)));
    functions.push(Arc::new(VectorAssign::new(2)));
    functions.push(Arc::new(Cross3));
    functions.push(Arc::new(Dot3));
    for &(name, f) in BINARY_INFIX {
        let scalar: Arc<dyn Callable> = Arc::new(BinaryFn::infix(name, f));
        let broadcast = Broadcast::new(scalar, 3).expect("infix binaries broadcast");
        functions.push(Arc::new(broadcast));
    }
    functions.push(Arc::new(ScalarAssign));
    functions
}

/// Default constant table.
pub fn default_constants() -> Vec<Value> {
    vec![
        Value::new("e", 2.71828182845904523536),
        Value::new("log2e", 1.44269504088896340736),
        Value::new("Pi", 3.14159265358979323846),
    ]
}

/// Default variable table: `x y z w`, all zero.
pub fn default_variables() -> Vec<Value> {
    ["x", "y", "z", "w"].iter().map(|&n| Value::zero(n)).collect()
}

/// Default run-time environment.
pub fn default_env() -> Rte {
    Rte::new(default_functions(), default_variables(), default_constants())
}

/// Default operator table for the parser.
///
/// Earlier entries bind first, so this order doubles as precedence;
/// the dot product entry shadows any element-wise `*` for 3-tuples,
/// and assignment comes last.
pub fn default_operators() -> OpTable {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_overloads_resolve() {
        let rte = default_env();
        assert!(rte.function("sin", Some((0, 1))).is_some());
        assert!(rte.function("atan2", Some((0, 2))).is_some());
        assert!(rte.function("+", Some((1, 1))).is_some());
        assert!(rte.function("%", Some((1, 1))).is_some());
    }

    #[test]
    fn unary_minus_distinct_from_binary() {
        let rte = default_env();
        let unary = rte.function("-", Some((0, 1))).unwrap();
        let binary = rte.function("-", Some((1, 1))).unwrap();
        assert_ne!(unary, binary);
    }

    #[test]
    fn dot_product_shadows_broadcast_multiply() {
        let rte = default_env();
        let id = rte.function("*", Some((3, 3))).unwrap();
        let f = rte.function_by_id(id).unwrap();
        // The dot product produces one value, the broadcast three.
        assert_eq!(f.values_out(), 1);
    }

    #[test]
    fn assignment_overloads() {
        let rte = default_env();
        for n in [1, 2, 3, 4] {
            let id = rte.function("=", Some((n, n))).unwrap();
            let f = rte.function_by_id(id).unwrap();
            assert_eq!(f.values_in(), 2 * n);
            assert_eq!(f.values_out(), n);
        }
    }

    #[test]
    fn broadcast_overloads_exist_for_all_infix_binaries() {
        let rte = default_env();
        for name in ["^", "/", "+", "-", "%"] {
            let id = rte.function(name, Some((3, 3))).unwrap();
            assert_eq!(rte.function_by_id(id).unwrap().values_out(), 3);
        }
    }

    #[test]
    fn default_values() {
        let rte = default_env();
        assert!(rte.variable("x").is_some());
        assert!(rte.variable("w").is_some());
        assert!(rte.constant("Pi").is_some());
        assert!(rte.constant("e").is_some());
        assert!(rte.constant("x").is_none());
    }

    #[test]
    fn operator_table_covers_default_set() {
        let ops = default_operators();
        for name in ["^", "*", "/", "+", "-", "%", "=", "cross3"] {
            assert!(ops.contains(name), "missing operator {}", name);
        }
        assert!(ops.resolve("=", 1, 1).unwrap().swap);
        assert_eq!(ops.resolve("*", 3, 3).unwrap().outvals, 1);
        assert_eq!(ops.resolve("-", 0, 1).unwrap().operands, 1);
    }
}
