use crate::stack::StackError;

/// Runtime error during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecError {
    /// Stack underflow inside an instruction or callable.
    Stack(StackError),
    /// The instruction before an assignment was not a variable load.
    InvalidAssign,
    /// A `Call` referenced a function id outside the environment's table.
    UnknownFunction(usize),
    /// A callable reported a failure of its own.
    Callable { name: String, message: String },
}

impl std::fmt::Display for ExecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecError::Stack(e) => write!(f, "{}", e),
            ExecError::InvalidAssign => write!(f, "invalid assignment"),
            ExecError::UnknownFunction(id) => write!(f, "unknown function id: {}", id),
            ExecError::Callable { name, message } => write!(f, "{}: {}", name, message),
        }
    }
}

impl std::error::Error for ExecError {}

impl From<StackError> for ExecError {
    fn from(e: StackError) -> Self {
        ExecError::Stack(e)
    }
}
