use std::sync::Arc;

use crate::callable::Callable;
use crate::program::{FunId, Instr, Program, VarId};
use crate::stack::Stack;
use crate::value::Value;

/// Run-time environment: the tables a program executes against.
///
/// Holds the combined function/operator table, the mutable variable
/// pool, the constant pool, the program currently being executed, the
/// value stack, and the instruction pointer. The compiler resolves names
/// against the same tables the VM later reads, so ids handed out at
/// compile time stay valid: all three tables are append-only.
pub struct Rte {
    functions: Vec<Arc<dyn Callable>>,
    variables: Vec<Value>,
    constants: Vec<Value>,
    /// Program currently loaded for execution.
    pub program: Program,
    /// Value stack.
    pub stack: Stack,
    /// Instruction pointer; points one past the instruction being
    /// executed while a callable runs.
    pub ip: usize,
}

impl Default for Rte {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }
}

impl Rte {
    /// Create an environment from pre-built tables.
    pub fn new(
        functions: Vec<Arc<dyn Callable>>,
        variables: Vec<Value>,
        constants: Vec<Value>,
    ) -> Self {
        Self {
            functions,
            variables,
            constants,
            program: Arc::from([] as [Instr; 0]),
            stack: Stack::new(),
            ip: 0,
        }
    }

    /// Look up a callable.
    ///
    /// With `sig` of `None` the first callable with a matching name
    /// wins. With `Some((lvalues, rvalues))` the left/right input counts
    /// must match as well, which is how operator overloads and
    /// arity-counted functions are told apart. First match wins in
    /// registration order.
    pub fn function(&self, name: &str, sig: Option<(usize, usize)>) -> Option<FunId> {
        match sig {
            None => self.functions.iter().position(|f| f.name() == name),
            Some((lvalues, rvalues)) => self.functions.iter().position(|f| {
                f.name() == name && f.lvalues_in() == lvalues && f.rvalues_in() == rvalues
            }),
        }
    }

    /// Callable registered under `id`.
    pub fn function_by_id(&self, id: FunId) -> Option<&Arc<dyn Callable>> {
        self.functions.get(id)
    }

    /// First variable with the given name.
    pub fn variable(&self, name: &str) -> Option<VarId> {
        self.variables.iter().position(|v| v.name == name)
    }

    /// First constant with the given name.
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.iter().find(|v| v.name == name)
    }

    /// Append a callable; returns its id.
    pub fn register_function(&mut self, f: Arc<dyn Callable>) -> FunId {
        self.functions.push(f);
        self.functions.len() - 1
    }

    /// Append a variable; returns its id.
    pub fn register_variable(&mut self, v: Value) -> VarId {
        self.variables.push(v);
        self.variables.len() - 1
    }

    /// Append a constant.
    pub fn register_constant(&mut self, v: Value) {
        self.constants.push(v);
    }

    /// Variable slot by id. Panics on a foreign id; ids come from this
    /// environment's own lookups and registrations.
    pub fn var(&self, id: VarId) -> &Value {
        &self.variables[id]
    }

    /// Mutable variable slot by id.
    pub fn var_mut(&mut self, id: VarId) -> &mut Value {
        &mut self.variables[id]
    }

    /// Number of variables in the pool.
    pub fn var_count(&self) -> usize {
        self.variables.len()
    }

    /// All variables, registration order.
    pub fn variables(&self) -> &[Value] {
        &self.variables
    }

    /// All constants, registration order.
    pub fn constants(&self) -> &[Value] {
        &self.constants
    }

    /// All callables, registration order.
    pub fn functions(&self) -> &[Arc<dyn Callable>] {
        &self.functions
    }

    /// Instruction `back` steps before the one currently executing.
    ///
    /// While a callable runs, `ip` points one past its `Call`, so
    /// `prev_instr(1)` is the instruction emitted directly before the
    /// call. Assignment uses this to find its destination loads.
    pub fn prev_instr(&self, back: usize) -> Option<Instr> {
        self.ip
            .checked_sub(1 + back)
            .and_then(|i| self.program.get(i).copied())
    }
}
