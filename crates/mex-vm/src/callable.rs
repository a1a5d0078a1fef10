use crate::env::Rte;
use crate::error::ExecError;

/// Anything invocable from a program: native functions, operators,
/// vector adapters, compiled procedures.
///
/// Inputs are read from the top of the value stack with the rightmost
/// argument on top; outputs are pushed back. For infix operators,
/// `lvalues_in` says how many of the inputs came from the syntactic left
/// operand; plain functions leave it at 0. Overload identity is
/// `(name, lvalues_in, rvalues_in)` for operators and
/// `(name, values_in)` for functions.
pub trait Callable: Send + Sync {
    /// Name used for lookup, e.g. `+` or `atan2`.
    fn name(&self) -> &str;

    /// Total stack values consumed.
    fn values_in(&self) -> usize;

    /// Total stack values produced.
    fn values_out(&self) -> usize;

    /// Of the inputs, how many belong to the left operand.
    fn lvalues_in(&self) -> usize {
        0
    }

    /// Of the inputs, how many belong to the right operand.
    fn rvalues_in(&self) -> usize {
        self.values_in() - self.lvalues_in()
    }

    /// Perform the invocation against the current environment.
    fn call(&self, rte: &mut Rte) -> Result<(), ExecError>;
}
