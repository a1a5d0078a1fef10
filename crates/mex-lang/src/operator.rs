/// Parser-side operator descriptor.
///
/// `operands` is the number of syntactic operand groups (1 for prefix
/// forms, 2 for infix); `largs`/`rargs`/`outvals` are the stack arities
/// used for overload resolution and annotation. `swap` asks the postfix
/// pass to emit the operand groups in swapped order, which is how
/// assignment places the destination loads directly before the `=`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpDef {
    pub name: String,
    pub operands: usize,
    pub largs: usize,
    pub rargs: usize,
    pub outvals: usize,
    pub swap: bool,
}

impl OpDef {
    /// Descriptor with explicit arities.
    pub fn new(
        name: impl Into<String>,
        operands: usize,
        largs: usize,
        rargs: usize,
        outvals: usize,
    ) -> Self {
        Self {
            name: name.into(),
            operands,
            largs,
            rargs,
            outvals,
            swap: false,
        }
    }

    /// A plain scalar infix operator: two operands, one value each side,
    /// one result.
    pub fn binary(name: impl Into<String>) -> Self {
        Self::new(name, 2, 1, 1, 1)
    }

    /// Request swapped operand emission.
    pub fn with_swap(mut self) -> Self {
        self.swap = true;
        self
    }
}

/// Ordered operator table.
///
/// Order is meaningful twice over: the postfix pass visits entries in
/// table order (earlier entries bind first, which is how precedence is
/// expressed), and overload resolution returns the first entry whose
/// name and operand arities match.
#[derive(Clone, Debug, Default)]
pub struct OpTable {
    ops: Vec<OpDef>,
}

impl OpTable {
    /// Build a table; the given order is the resolution order.
    pub fn new(ops: Vec<OpDef>) -> Self {
        Self { ops }
    }

    /// Is any entry registered under this name?
    pub fn contains(&self, name: &str) -> bool {
        self.ops.iter().any(|op| op.name == name)
    }

    /// Entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &OpDef> {
        self.ops.iter()
    }

    /// First entry matching name and observed operand arities.
    pub fn resolve(&self, name: &str, largs: usize, rargs: usize) -> Option<&OpDef> {
        self.ops
            .iter()
            .find(|op| op.name == name && op.largs == largs && op.rargs == rargs)
    }
}
