/// A named scalar slot.
///
/// Variables and constants share this shape; mutability is a property of
/// the table they live in, not of the value itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    /// Unique name, `[A-Za-z_][A-Za-z0-9_]*`.
    pub name: String,
    /// Current contents.
    pub val: f64,
}

impl Value {
    /// Create a named value.
    pub fn new(name: impl Into<String>, val: f64) -> Self {
        Self {
            name: name.into(),
            val,
        }
    }

    /// Create a zero-initialized value.
    pub fn zero(name: impl Into<String>) -> Self {
        Self::new(name, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_constructors() {
        let v = Value::new("x", 1.5);
        assert_eq!(v.name, "x");
        assert_eq!(v.val, 1.5);
        assert_eq!(Value::zero("y"), Value::new("y", 0.0));
    }
}
