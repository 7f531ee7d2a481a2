//! Unified diagnostics for the braq engine.
//!
//! Every failure mode in the crate is represented by [`BraqError`], a single
//! `thiserror` enum implementing [`miette::Diagnostic`] with stable error
//! codes. There is no internal recovery: errors propagate unchanged except at
//! the function-application boundary, where the evaluator wraps the cause in
//! a [`BraqError::Expression`] carrying the offending expression's printed
//! form. The outermost caller therefore sees one error chain ending at the
//! deepest failing sub-expression.

use miette::Diagnostic;
use thiserror::Error;

use crate::runtime::value::Value;

/// The single error type for tokenizing, reading, and evaluation.
#[derive(Debug, Error, Diagnostic)]
pub enum BraqError {
    /// Lookup walked the whole environment chain without finding the name.
    #[error("undefined symbol '{name}'")]
    #[diagnostic(
        code(braq::eval::undefined_symbol),
        help("symbols are resolved against the current frame and its outer frames; bind one with [{name} := ...]")
    )]
    UndefinedSymbol { name: String },

    /// A callable received more arguments than its declared arity allows.
    #[error("'{callable}' expects {expected} arguments, got {received}")]
    #[diagnostic(
        code(braq::eval::arity_mismatch),
        help("supplying fewer arguments than the arity returns a partial application; supplying more is always an error")
    )]
    ArityMismatch {
        callable: String,
        expected: usize,
        received: usize,
    },

    /// An operation was applied to a value of the wrong kind.
    #[error("{operation} expects {expected}, got {found}")]
    #[diagnostic(code(braq::eval::type_mismatch))]
    TypeMismatch {
        operation: String,
        expected: String,
        found: String,
    },

    #[error("division by zero")]
    #[diagnostic(code(braq::eval::division_by_zero))]
    DivisionByZero,

    #[error("recursion limit exceeded")]
    #[diagnostic(
        code(braq::eval::recursion_limit),
        help("the evaluator performs no tail-call optimization; deep recursion needs a larger depth limit")
    )]
    RecursionLimit,

    /// An expression had a shape no evaluation rule accepts.
    #[error("{message}")]
    #[diagnostic(code(braq::eval::invalid_operation))]
    InvalidOperation { message: String },

    #[error("cannot evaluate an empty expression")]
    #[diagnostic(code(braq::eval::empty_expression))]
    EmptyExpression,

    /// Context wrapper added at the function-application boundary only.
    #[error("error evaluating '{expr}'")]
    #[diagnostic(code(braq::eval::expression))]
    Expression {
        expr: String,
        #[source]
        cause: Box<BraqError>,
    },

    /// Structural problems the lenient pipeline tolerates but the strict
    /// `check` path reports: unbalanced brackets, unterminated strings.
    #[error("malformed input: {message}")]
    #[diagnostic(code(braq::syntax::malformed_input))]
    MalformedInput { message: String },
}

impl BraqError {
    /// Walks the `Expression` wrapper chain down to the original failure.
    pub fn root_cause(&self) -> &BraqError {
        match self {
            BraqError::Expression { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

/// Shorthand for the pervasive type-mismatch case where the offending value
/// is at hand and only its type name matters.
pub fn type_mismatch(operation: &str, expected: &str, found: &Value) -> BraqError {
    BraqError::TypeMismatch {
        operation: operation.to_string(),
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

pub fn invalid_operation(message: impl Into<String>) -> BraqError {
    BraqError::InvalidOperation {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_wrapper_chains_to_root_cause() {
        let inner = BraqError::UndefinedSymbol {
            name: "y".to_string(),
        };
        let wrapped = BraqError::Expression {
            expr: "[f y]".to_string(),
            cause: Box::new(BraqError::Expression {
                expr: "f".to_string(),
                cause: Box::new(inner),
            }),
        };
        assert!(matches!(
            wrapped.root_cause(),
            BraqError::UndefinedSymbol { name } if name == "y"
        ));
    }

    #[test]
    fn errors_render_their_message() {
        let err = BraqError::ArityMismatch {
            callable: "+".to_string(),
            expected: 2,
            received: 3,
        };
        assert_eq!(err.to_string(), "'+' expects 2 arguments, got 3");
    }
}
