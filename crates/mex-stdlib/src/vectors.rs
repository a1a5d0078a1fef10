//! Fixed 3-component vector products.

use mex_vm::{Callable, ExecError, Rte};

/// Dot product `*[3 3 1]` over two 3-tuples.
pub struct Dot3;

impl Callable for Dot3 {
    fn name(&self) -> &str {
        "*"
    }
    fn values_in(&self) -> usize {
        6
    }
    fn values_out(&self) -> usize {
        1
    }
    fn lvalues_in(&self) -> usize {
        3
    }
    fn call(&self, rte: &mut Rte) -> Result<(), ExecError> {
        let z2 = rte.stack.pop()?;
        let y2 = rte.stack.pop()?;
        let x2 = rte.stack.pop()?;
        let z1 = rte.stack.pop()?;
        let y1 = rte.stack.pop()?;
        let x1 = rte.stack.pop()?;
        rte.stack.push(x1 * x2 + y1 * y2 + z1 * z2);
        Ok(())
    }
}

/// Cross product `cross3[0 6 3]`: one syntactic operand carrying six
/// scalars, three results.
pub struct Cross3;

impl Callable for Cross3 {
    fn name(&self) -> &str {
        "cross3"
    }
    fn values_in(&self) -> usize {
        6
    }
    fn values_out(&self) -> usize {
        3
    }
    fn call(&self, rte: &mut Rte) -> Result<(), ExecError> {
        let z2 = rte.stack.pop()?;
        let y2 = rte.stack.pop()?;
        let x2 = rte.stack.pop()?;
        let z1 = rte.stack.pop()?;
        let y1 = rte.stack.pop()?;
        let x1 = rte.stack.pop()?;
        rte.stack.push(y1 * z2 - y2 * z1);
        rte.stack.push(x2 * z1 - x1 * z2);
        rte.stack.push(x1 * y2 - x2 * y1);
        Ok(())
    }
}
