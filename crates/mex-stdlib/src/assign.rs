//! Assignment callables.
//!
//! The parser emits assignment with swapped operands so the destination
//! loads sit directly before the `=` call; at run time the callable
//! reaches back through the program to find them. The value stays on
//! the stack, so assignment yields what it stored.

use smallvec::SmallVec;

use mex_vm::{Callable, ExecError, Instr, Rte, VarId};

/// `=[1 1 1]`: store the top of stack into the variable loaded by the
/// preceding instruction.
pub struct ScalarAssign;

impl Callable for ScalarAssign {
    fn name(&self) -> &str {
        "="
    }
    fn values_in(&self) -> usize {
        2
    }
    fn values_out(&self) -> usize {
        1
    }
    fn lvalues_in(&self) -> usize {
        1
    }
    fn call(&self, rte: &mut Rte) -> Result<(), ExecError> {
        // Drop the destination's loaded value; the instruction that
        // pushed it tells us where to store.
        rte.stack.pop()?;
        let target = lookback_var(rte, 1)?;
        let v = rte.stack.top()?;
        rte.var_mut(target).val = v;
        Ok(())
    }
}

/// `=[N N N]`: store N values into the N variables loaded by the
/// preceding N instructions, then leave the values on the stack in
/// their original order.
pub struct VectorAssign {
    n: usize,
}

impl VectorAssign {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Callable for VectorAssign {
    fn name(&self) -> &str {
        "="
    }
    fn values_in(&self) -> usize {
        2 * self.n
    }
    fn values_out(&self) -> usize {
        self.n
    }
    fn lvalues_in(&self) -> usize {
        self.n
    }
    fn call(&self, rte: &mut Rte) -> Result<(), ExecError> {
        // Drop the destination echoes.
        for _ in 0..self.n {
            rte.stack.pop()?;
        }
        // Walk destinations nearest-first: the last-loaded variable
        // pairs with the topmost source value.
        let mut stored: SmallVec<[f64; 4]> = SmallVec::with_capacity(self.n);
        for i in 0..self.n {
            let target = lookback_var(rte, 1 + i)?;
            let v = rte.stack.pop()?;
            rte.var_mut(target).val = v;
            stored.push(v);
        }
        for &v in stored.iter().rev() {
            rte.stack.push(v);
        }
        Ok(())
    }
}

fn lookback_var(rte: &Rte, back: usize) -> Result<VarId, ExecError> {
    match rte.prev_instr(back) {
        Some(Instr::LoadVar(id)) => Ok(id),
        _ => Err(ExecError::InvalidAssign),
    }
}
