//! Compiled programs as callables.

use std::sync::Mutex;

use mex_vm::{Callable, ExecError, Program, Rte, Vm};

/// A user-defined function: a compiled program running against its own
/// nested environment.
///
/// The nested environment's variable pool doubles as the parameter
/// list: on each call the procedure pops `values_in` scalars off the
/// caller's stack and binds them so that source-order arguments land in
/// declaration-order parameters. After the inner program runs,
/// `values_out` results move to the caller's stack with their order
/// preserved.
pub struct Procedure {
    name: String,
    values_in: usize,
    values_out: usize,
    lvalues_in: usize,
    vm: Mutex<Vm>,
}

impl Procedure {
    /// Wrap a compiled program and its environment as a callable.
    pub fn new(
        name: impl Into<String>,
        program: Program,
        rte: Rte,
        values_in: usize,
        values_out: usize,
    ) -> Self {
        let mut vm = Vm::new(rte);
        vm.load(program);
        Self {
            name: name.into(),
            values_in,
            values_out,
            lvalues_in: 0,
            vm: Mutex::new(vm),
        }
    }

    /// Declare left-operand values, for procedures registered as infix
    /// operators.
    pub fn with_lvalues(mut self, lvalues: usize) -> Self {
        self.lvalues_in = lvalues;
        self
    }
}

impl Callable for Procedure {
    fn name(&self) -> &str {
        &self.name
    }
    fn values_in(&self) -> usize {
        self.values_in
    }
    fn values_out(&self) -> usize {
        self.values_out
    }
    fn lvalues_in(&self) -> usize {
        self.lvalues_in
    }
    fn call(&self, rte: &mut Rte) -> Result<(), ExecError> {
        let mut vm = self.vm.lock().map_err(|_| ExecError::Callable {
            name: self.name.clone(),
            message: "procedure state poisoned".into(),
        })?;

        // Bind arguments: the topmost value is the rightmost argument,
        // so fill parameter slots back to front.
        let bound = self.values_in.min(vm.rte().var_count());
        for slot in (0..bound).rev() {
            let v = rte.stack.pop()?;
            vm.rte_mut().var_mut(slot).val = v;
        }

        vm.run().map_err(|e| ExecError::Callable {
            name: self.name.clone(),
            message: e.to_string(),
        })?;

        let results = vm.rte_mut().stack.split_off_top(self.values_out)?;
        for v in results {
            rte.stack.push(v);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapt::BinaryFn;
    use mex_vm::{Instr, Value};
    use std::sync::Arc;

    /// Builds `hyp2(a, b) = a*a + b*b` by hand.
    fn hyp2() -> Procedure {
        let mut rte = Rte::default();
        let mul = rte.register_function(Arc::new(BinaryFn::infix("*", |a, b| a * b)));
        let add = rte.register_function(Arc::new(BinaryFn::infix("+", |a, b| a + b)));
        let a = rte.register_variable(Value::zero("a"));
        let b = rte.register_variable(Value::zero("b"));
        let program: Program = vec![
            Instr::LoadVar(a),
            Instr::LoadVar(a),
            Instr::Call(mul),
            Instr::LoadVar(b),
            Instr::LoadVar(b),
            Instr::Call(mul),
            Instr::Call(add),
        ]
        .into();
        Procedure::new("hyp2", program, rte, 2, 1)
    }

    #[test]
    fn binds_arguments_in_source_order() {
        let p = hyp2();
        let mut rte = Rte::default();
        rte.stack.push(3.0);
        rte.stack.push(4.0);
        p.call(&mut rte).unwrap();
        assert_eq!(rte.stack.as_slice(), &[25.0]);
    }

    #[test]
    fn reruns_with_fresh_arguments() {
        let p = hyp2();
        let mut rte = Rte::default();
        rte.stack.push(1.0);
        rte.stack.push(1.0);
        p.call(&mut rte).unwrap();
        assert_eq!(rte.stack.pop(), Ok(2.0));

        rte.stack.push(6.0);
        rte.stack.push(8.0);
        p.call(&mut rte).unwrap();
        assert_eq!(rte.stack.pop(), Ok(100.0));
    }

    #[test]
    fn multi_output_preserves_order() {
        // Pushes its two arguments back in order.
        let mut inner = Rte::default();
        let a = inner.register_variable(Value::zero("a"));
        let b = inner.register_variable(Value::zero("b"));
        let program: Program = vec![Instr::LoadVar(a), Instr::LoadVar(b)].into();
        let p = Procedure::new("pair", program, inner, 2, 2);

        let mut rte = Rte::default();
        rte.stack.push(7.0);
        rte.stack.push(9.0);
        p.call(&mut rte).unwrap();
        assert_eq!(rte.stack.as_slice(), &[7.0, 9.0]);
    }

    #[test]
    fn missing_arguments_underflow() {
        let p = hyp2();
        let mut rte = Rte::default();
        rte.stack.push(3.0);
        assert!(p.call(&mut rte).is_err());
    }

    #[test]
    fn inner_failure_carries_procedure_name() {
        let mut inner = Rte::default();
        let div = inner.register_function(Arc::new(BinaryFn::infix("/", |a, b| a / b)));
        // Program pops two values that are never pushed.
        let program: Program = vec![Instr::Call(div)].into();
        let p = Procedure::new("broken", program, inner, 0, 0);
        let mut rte = Rte::default();
        let err = p.call(&mut rte).unwrap_err();
        match err {
            ExecError::Callable { name, .. } => assert_eq!(name, "broken"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
