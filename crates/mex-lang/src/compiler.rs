use mex_vm::{Instr, Program, Rte, Value};

use crate::error::CompileError;
use crate::token::Token;

/// Lowers an RPN token stream to a program against an environment.
///
/// With `count_args` on, function tokens resolve by `(name, arity)` and
/// bare names never resolve to functions; with it off, functions
/// resolve by name alone. With `create_vars` on, an unresolved name
/// becomes a fresh zero-valued variable in the environment.
pub struct Compiler {
    count_args: bool,
    create_vars: bool,
}

impl Compiler {
    /// Create a compiler with the given lookup policy.
    pub fn new(count_args: bool, create_vars: bool) -> Self {
        Self {
            count_args,
            create_vars,
        }
    }

    /// Resolve functions by `(name, arity)`?
    pub fn count_args(&self) -> bool {
        self.count_args
    }

    /// Set the arity-lookup flag.
    pub fn set_count_args(&mut self, count: bool) {
        self.count_args = count;
    }

    /// Auto-create variables for unresolved names?
    pub fn create_vars(&self) -> bool {
        self.create_vars
    }

    /// Set the auto-create flag.
    pub fn set_create_vars(&mut self, create: bool) {
        self.create_vars = create;
    }

    /// Compile a token stream into a program.
    pub fn compile(&self, tokens: &[Token], rte: &mut Rte) -> Result<Program, CompileError> {
        let mut program = Vec::with_capacity(tokens.len());
        for token in tokens {
            program.push(self.instruction(token, rte)?);
        }
        Ok(program.into())
    }

    fn instruction(&self, token: &Token, rte: &mut Rte) -> Result<Instr, CompileError> {
        match token {
            Token::Value(text) => {
                let v: f64 = text
                    .parse()
                    .map_err(|_| CompileError::InvalidNumber(text.clone()))?;
                Ok(Instr::LoadConst(v))
            }
            Token::Function { name, args_in, .. } => {
                let sig = self.count_args.then_some((0, *args_in));
                rte.function(name, sig)
                    .map(Instr::Call)
                    .ok_or_else(|| CompileError::UnknownToken(name.clone()))
            }
            Token::Operator { name, sig } => {
                let sig = sig.map(|(lvalues, rvalues, _)| (lvalues, rvalues));
                rte.function(name, sig)
                    .map(Instr::Call)
                    .ok_or_else(|| CompileError::UnknownToken(name.clone()))
            }
            Token::Name(name) => {
                if let Some(c) = rte.constant(name) {
                    return Ok(Instr::LoadConst(c.val));
                }
                if let Some(id) = rte.variable(name) {
                    return Ok(Instr::LoadVar(id));
                }
                if !self.count_args {
                    if let Some(id) = rte.function(name, None) {
                        return Ok(Instr::Call(id));
                    }
                }
                if self.create_vars {
                    let id = rte.register_variable(Value::zero(name.clone()));
                    return Ok(Instr::LoadVar(id));
                }
                Err(CompileError::UnknownToken(name.clone()))
            }
            Token::Unknown(text) => Err(CompileError::UnknownToken(text.clone())),
        }
    }
}
