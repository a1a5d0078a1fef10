/// One element of the parser's RPN output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Numeric literal, verbatim text (e.g. `1.2E-3`).
    Value(String),
    /// Bare identifier: a variable, constant, or (when the compiler
    /// resolves by name only) a function.
    Name(String),
    /// Function call. `args_out` is only present when the annotation
    /// carried an output count.
    Function {
        name: String,
        args_in: usize,
        args_out: Option<usize>,
    },
    /// Operator. `sig` is `(lvalues, rvalues, outvalues)`; absent when
    /// the parser ran without argument counting.
    Operator {
        name: String,
        sig: Option<(usize, usize, usize)>,
    },
    /// Anything the classifier could not place.
    Unknown(String),
}

impl Token {
    /// Stack effect `(consumed, produced)`, when known.
    pub fn arity(&self) -> Option<(usize, usize)> {
        match self {
            Token::Value(_) | Token::Name(_) => Some((0, 1)),
            Token::Function {
                args_in, args_out, ..
            } => Some((*args_in, args_out.unwrap_or(1))),
            Token::Operator { sig, .. } => {
                sig.map(|(lvalues, rvalues, outs)| (lvalues + rvalues, outs))
            }
            Token::Unknown(_) => None,
        }
    }

    /// Render back to the RPN surface form.
    pub fn render(&self) -> String {
        match self {
            Token::Value(s) | Token::Name(s) | Token::Unknown(s) => s.clone(),
            Token::Function {
                name,
                args_in,
                args_out: None,
            } => format!("{}[{}]", name, args_in),
            Token::Function {
                name,
                args_in,
                args_out: Some(out),
            } => format!("{}[{} {}]", name, args_in, out),
            Token::Operator { name, sig: None } => name.clone(),
            Token::Operator {
                name,
                sig: Some((lvalues, rvalues, outs)),
            } => format!("{}[{} {} {}]", name, lvalues, rvalues, outs),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Render a token stream the way the parser's RPN pass prints it.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::render)
        .collect::<Vec<_>>()
        .join(" ")
}
