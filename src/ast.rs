//! The expression tree produced by the reader.
//!
//! Nodes are plain data: an atom (integer, float, string literal, or bare
//! symbol) or an ordered list of child nodes. The tree is built once by
//! [`crate::syntax::reader`] and never mutated afterwards; the evaluator
//! dispatches purely on node shape.

use std::fmt;

use serde::Serialize;

/// One node of the expression tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Int(i64),
    Float(f64),
    /// A string literal; surrounding quotes are stripped at read time.
    Str(String),
    Symbol(String),
    List(Vec<Expr>),
}

impl Expr {
    /// Returns the symbol name if this node is a bare symbol.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// True when this node is the given symbol.
    pub fn is_symbol(&self, name: &str) -> bool {
        self.symbol() == Some(name)
    }

    /// Canonical printed form. Re-reading the output of `pretty` yields an
    /// equal tree: floats always carry a decimal point so they do not
    /// collapse into integers, and string literals are re-quoted.
    pub fn pretty(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(n) => write!(f, "{}", n),
            Expr::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{:.1}", x),
            Expr::Float(x) => write!(f, "{}", x),
            Expr::Str(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
