use crate::callable::Callable;
use crate::env::Rte;
use crate::error::ExecError;
use crate::program::{Instr, Program};

/// The virtual machine: drives an instruction pointer over the loaded
/// program.
///
/// Execution is a straight line; there are no branches and the loop
/// terminates by exhausting the program. A callable that fails aborts
/// the run and the error propagates to the caller. The final stack
/// contents are the program's result.
pub struct Vm {
    rte: Rte,
}

impl Vm {
    /// Create a VM over an environment.
    pub fn new(rte: Rte) -> Self {
        Self { rte }
    }

    /// The environment.
    pub fn rte(&self) -> &Rte {
        &self.rte
    }

    /// The environment, mutably.
    pub fn rte_mut(&mut self) -> &mut Rte {
        &mut self.rte
    }

    /// Load a program for the next run.
    pub fn load(&mut self, program: Program) {
        self.rte.program = program;
    }

    /// Run the loaded program from instruction 0.
    pub fn run(&mut self) -> Result<(), ExecError> {
        self.run_from(0)
    }

    /// Run the loaded program from the given entry point.
    ///
    /// The instruction pointer is advanced past each instruction before
    /// it executes, so a callable inspecting `rte.ip` sees the index of
    /// the next instruction.
    pub fn run_from(&mut self, start: usize) -> Result<(), ExecError> {
        let program = self.rte.program.clone();
        self.rte.ip = start;
        while self.rte.ip < program.len() {
            let instr = program[self.rte.ip];
            self.rte.ip += 1;
            match instr {
                Instr::LoadConst(v) => self.rte.stack.push(v),
                Instr::LoadVar(id) => {
                    let v = self.rte.var(id).val;
                    self.rte.stack.push(v);
                }
                Instr::Call(id) => {
                    let f = self
                        .rte
                        .function_by_id(id)
                        .ok_or(ExecError::UnknownFunction(id))?
                        .clone();
                    f.call(&mut self.rte)?;
                }
            }
        }
        Ok(())
    }
}
