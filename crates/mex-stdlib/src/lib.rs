//! Standard callables and the default catalog.
//!
//! Adapters turn plain `f64` functions into [`mex_vm::Callable`]s:
//! unary and binary scalars, element-wise broadcasts over tuples, the
//! dot and cross products, the look-back assignment forms, and
//! procedures (compiled programs exposed as callables). The catalog
//! assembles the default run-time environment and operator table used
//! by the reference runtime.

mod adapt;
mod assign;
mod catalog;
mod procedure;
mod vectors;

pub use adapt::{AdaptError, BinaryFn, Broadcast, UnaryFn};
pub use assign::{ScalarAssign, VectorAssign};
pub use catalog::{
    default_constants, default_env, default_functions, default_operators, default_variables,
};
pub use procedure::Procedure;
pub use vectors::{Cross3, Dot3};
