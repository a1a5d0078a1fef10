use std::sync::Arc;

/// Index into the environment's variable pool.
pub type VarId = usize;

/// Index into the environment's function table.
pub type FunId = usize;

/// One executable step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instr {
    /// Push a literal.
    LoadConst(f64),
    /// Push the current value of a pooled variable.
    LoadVar(VarId),
    /// Invoke a registered callable.
    Call(FunId),
}

/// A compiled instruction sequence, cheaply shareable between the
/// environment, procedures, and callers that re-run it.
pub type Program = Arc<[Instr]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_is_shareable() {
        let prog: Program = vec![Instr::LoadConst(1.0), Instr::Call(0)].into();
        let other = prog.clone();
        assert_eq!(prog.len(), 2);
        assert_eq!(prog[0], other[0]);
    }
}
