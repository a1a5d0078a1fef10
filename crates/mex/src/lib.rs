//! mex: a run-time math expression engine.
//!
//! Evaluates infix expressions like `sin(x) + 2*(y-z)` against a
//! run-time environment of functions, operators, variables, and
//! constants, with vector forms such as `(a,b,c)*(d,e,f)` and
//! assignment into environment variables.
//!
//! # Architecture
//!
//! ```text
//! text → Parser → RPN tokens → Compiler(+Rte) → Program → Vm(+Rte)
//! ```
//!
//! The parser normalizes and rewrites the expression text into an
//! annotated RPN stream; the compiler resolves each token against the
//! environment; the VM executes the resulting program against the
//! value stack. [`Engine`] bundles the pieces with the default catalog.
//!
//! # Example
//!
//! ```
//! use mex::Engine;
//!
//! let mut engine = Engine::new();
//! assert_eq!(engine.eval("1 + 2 * 3").unwrap(), vec![7.0]);
//! engine.eval("x = 10").unwrap();
//! assert_eq!(engine.eval("x / 4").unwrap(), vec![2.5]);
//! ```

use std::sync::Arc;

use thiserror::Error;

pub use mex_lang::{
    render_tokens, CompileError, Compiler, OpDef, OpTable, ParseError, Parser, Token,
};
pub use mex_stdlib::{
    default_constants, default_env, default_functions, default_operators, default_variables,
    Procedure,
};
pub use mex_vm::{Callable, ExecError, Instr, Program, Rte, Value, Vm};

/// Any failure along the parse → compile → execute pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Parser, compiler, and VM over the default catalog.
///
/// The engine keeps one environment across evaluations, so assignments
/// and auto-created variables persist from one expression to the next.
pub struct Engine {
    parser: Parser,
    compiler: Compiler,
    vm: Vm,
}

impl Engine {
    /// Engine over the default environment and operator table, with
    /// argument counting and variable auto-creation on.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(default_operators()),
            compiler: Compiler::new(true, true),
            vm: Vm::new(default_env()),
        }
    }

    /// The parser (flags, operator table, debug trace).
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// The parser, mutably.
    pub fn parser_mut(&mut self) -> &mut Parser {
        &mut self.parser
    }

    /// The compiler (lookup policy flags).
    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// The compiler, mutably.
    pub fn compiler_mut(&mut self) -> &mut Compiler {
        &mut self.compiler
    }

    /// The environment the engine evaluates against.
    pub fn rte(&self) -> &Rte {
        self.vm.rte()
    }

    /// The environment, mutably.
    pub fn rte_mut(&mut self) -> &mut Rte {
        self.vm.rte_mut()
    }

    /// Parse, compile, and run one expression; returns the final stack
    /// bottom to top.
    pub fn eval(&mut self, expr: &str) -> Result<Vec<f64>, EvalError> {
        let tokens = self.parser.parse(expr)?;
        let program = self.compiler.compile(&tokens, self.vm.rte_mut())?;
        self.vm.rte_mut().stack.clear();
        self.vm.load(program);
        self.vm.run()?;
        Ok(self.vm.rte().stack.as_slice().to_vec())
    }

    /// Parse one expression and return its rendered RPN form.
    pub fn rpn(&mut self, expr: &str) -> Result<String, EvalError> {
        Ok(render_tokens(&self.parser.parse(expr)?))
    }

    /// Compile `body` as a user-defined function and register it.
    ///
    /// The function gets its own nested environment: a snapshot of the
    /// engine's current callables (so earlier definitions stay
    /// callable), the default constants, and one variable per
    /// parameter, in declaration order. Unknown names in the body
    /// become local variables. The registered callable pops one value
    /// per parameter and pushes `values_out` results.
    pub fn define_function(
        &mut self,
        name: &str,
        params: &[String],
        values_out: usize,
        body: &str,
    ) -> Result<(), EvalError> {
        for param in params {
            if !mex_core::scan::is_name(param) {
                return Err(ParseError::InvalidName(param.clone()).into());
            }
        }
        let variables = params.iter().map(|p| Value::zero(p.clone())).collect();
        let functions = self.vm.rte().functions().to_vec();
        let mut rte = Rte::new(functions, variables, default_constants());

        let tokens = self.parser.parse(body)?;
        // Name-only lookup lets tuple-valued arguments through; unknown
        // names become the procedure's locals.
        let compiler = Compiler::new(false, true);
        let program = compiler.compile(&tokens, &mut rte)?;

        let procedure = Procedure::new(name, program, rte, params.len(), values_out);
        self.vm.rte_mut().register_function(Arc::new(procedure));
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
