//! Adapters from plain scalar functions to callables.

use std::sync::Arc;

use smallvec::SmallVec;

use mex_vm::{Callable, ExecError, Rte};

/// Error constructing an adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdaptError {
    /// Broadcast requires a binary scalar with one operand on each side.
    NotBinary(String),
}

impl std::fmt::Display for AdaptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdaptError::NotBinary(name) => {
                write!(f, "cannot broadcast non-binary callable: {}", name)
            }
        }
    }
}

impl std::error::Error for AdaptError {}

/// `f64 -> f64` as a callable: replaces the top of stack.
pub struct UnaryFn {
    name: String,
    f: fn(f64) -> f64,
}

impl UnaryFn {
    pub fn new(name: impl Into<String>, f: fn(f64) -> f64) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl Callable for UnaryFn {
    fn name(&self) -> &str {
        &self.name
    }
    fn values_in(&self) -> usize {
        1
    }
    fn values_out(&self) -> usize {
        1
    }
    fn call(&self, rte: &mut Rte) -> Result<(), ExecError> {
        let top = rte.stack.top_mut()?;
        *top = (self.f)(*top);
        Ok(())
    }
}

/// `(f64, f64) -> f64` as a callable.
///
/// The right operand is on top of the stack. Infix registrations carry
/// one left value so operator lookup `(name, 1, 1)` finds them; named
/// registrations (`add`, `atan2`, ...) carry none and resolve as
/// two-argument functions.
pub struct BinaryFn {
    name: String,
    f: fn(f64, f64) -> f64,
    lvalues: usize,
}

impl BinaryFn {
    /// Register as an infix operator shape `[1 1 1]`.
    pub fn infix(name: impl Into<String>, f: fn(f64, f64) -> f64) -> Self {
        Self {
            name: name.into(),
            f,
            lvalues: 1,
        }
    }

    /// Register as a plain two-argument function.
    pub fn named(name: impl Into<String>, f: fn(f64, f64) -> f64) -> Self {
        Self {
            name: name.into(),
            f,
            lvalues: 0,
        }
    }
}

impl Callable for BinaryFn {
    fn name(&self) -> &str {
        &self.name
    }
    fn values_in(&self) -> usize {
        2
    }
    fn values_out(&self) -> usize {
        1
    }
    fn lvalues_in(&self) -> usize {
        self.lvalues
    }
    fn call(&self, rte: &mut Rte) -> Result<(), ExecError> {
        let b = rte.stack.pop()?;
        let a = rte.stack.top_mut()?;
        *a = (self.f)(*a, b);
        Ok(())
    }
}

/// Applies a binary scalar callable element-wise over `n`-tuples,
/// giving it the operator shape `[n n n]`.
pub struct Broadcast {
    inner: Arc<dyn Callable>,
    n: usize,
}

impl std::fmt::Debug for Broadcast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcast")
            .field("inner", &self.inner.name())
            .field("n", &self.n)
            .finish()
    }
}

impl Broadcast {
    /// Wrap a binary scalar. Fails unless the inner callable takes
    /// exactly one value on each side.
    pub fn new(inner: Arc<dyn Callable>, n: usize) -> Result<Self, AdaptError> {
        if inner.lvalues_in() != 1 || inner.rvalues_in() != 1 {
            return Err(AdaptError::NotBinary(inner.name().to_string()));
        }
        Ok(Self { inner, n })
    }
}

impl Callable for Broadcast {
    fn name(&self) -> &str {
        self.inner.name()
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
        let n = self.n;
        let mut right: SmallVec<[f64; 4]> = SmallVec::with_capacity(n);
        for _ in 0..n {
            right.push(rte.stack.pop()?);
        }
        let mut left: SmallVec<[f64; 4]> = SmallVec::with_capacity(n);
        for _ in 0..n {
            left.push(rte.stack.pop()?);
        }
        // Both buffers hold their operand back to front, so index i
        // pairs matching components.
        let mut out: SmallVec<[f64; 4]> = SmallVec::with_capacity(n);
        for i in 0..n {
            rte.stack.push(left[i]);
            rte.stack.push(right[i]);
            self.inner.call(rte)?;
            out.push(rte.stack.pop()?);
        }
        for &v in out.iter().rev() {
            rte.stack.push(v);
        }
        Ok(())
    }
}
