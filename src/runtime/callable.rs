//! Callable values: natives, closures, partial applications, pipelines.
//!
//! Every native operation declares its arity as a plain integer at
//! registration; the call machinery in [`crate::runtime::eval`] relies on
//! that declaration instead of inspecting anything at runtime. Closures
//! get the same treatment: their arity is the parameter count, so the
//! currying rules apply uniformly to everything invocable.

use std::fmt;
use std::rc::Rc;

use crate::ast::Expr;
use crate::diagnostics::BraqError;
use crate::runtime::env::EnvRef;
use crate::runtime::eval::EvalContext;
use crate::runtime::value::Value;

/// Signature of every native operation. The context carries the output
/// sink and the recursion guard, and lets natives such as `map` invoke
/// callable arguments.
pub type NativeFn = fn(&[Value], &mut EvalContext) -> Result<Value, BraqError>;

/// A native operation with its registered name and declared arity.
#[derive(Clone, Copy)]
pub struct Native {
    pub name: &'static str,
    pub arity: usize,
    pub run: NativeFn,
}

/// A user-defined function: parameter names, an unevaluated body, and the
/// environment captured where the function literal was evaluated. That
/// environment is the lifetime-owning parent of the frame built on each
/// call.
pub struct Closure {
    pub params: Vec<String>,
    pub body: Expr,
    pub env: EnvRef,
}

/// Which side of future arguments the already-supplied ones attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindSide {
    Left,
    Right,
}

/// A callable produced by supplying fewer arguments than the target's
/// arity. Itself a callable of the remaining arity.
pub struct Partial {
    pub target: Callable,
    pub supplied: Vec<Value>,
    pub side: BindSide,
}

#[derive(Clone)]
pub enum Callable {
    Native(Native),
    Closure(Rc<Closure>),
    Partial(Rc<Partial>),
    /// Ordered stages; the first receives the call arguments, each later
    /// stage receives the previous stage's single result.
    Pipeline(Rc<Vec<Callable>>),
    /// Applies every member to one argument, collecting the results.
    Fanout(Rc<Vec<Callable>>),
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Native(native) => native.arity,
            Callable::Closure(closure) => closure.params.len(),
            Callable::Partial(partial) => {
                partial.target.arity().saturating_sub(partial.supplied.len())
            }
            Callable::Pipeline(stages) => stages.first().map_or(0, Callable::arity),
            Callable::Fanout(_) => 1,
        }
    }

    /// Name used in error messages.
    pub fn name(&self) -> String {
        match self {
            Callable::Native(native) => native.name.to_string(),
            Callable::Closure(_) => "closure".to_string(),
            Callable::Partial(partial) => partial.target.name(),
            Callable::Pipeline(_) => "pipeline".to_string(),
            Callable::Fanout(_) => "fanout".to_string(),
        }
    }

    /// Identity comparison; callables have no structural equality.
    pub fn same(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => {
                a.name == b.name && a.arity == b.arity
            }
            (Callable::Closure(a), Callable::Closure(b)) => Rc::ptr_eq(a, b),
            (Callable::Partial(a), Callable::Partial(b)) => Rc::ptr_eq(a, b),
            (Callable::Pipeline(a), Callable::Pipeline(b)) => Rc::ptr_eq(a, b),
            (Callable::Fanout(a), Callable::Fanout(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Hand-written: a closure's environment links back to frames that may hold
// the closure itself, so a derived Debug would recurse forever.
impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(native) => write!(f, "<native {}/{}>", native.name, native.arity),
            Callable::Closure(closure) => write!(f, "<fn/{}>", closure.params.len()),
            Callable::Partial(partial) => {
                write!(f, "<partial {}/{}>", partial.target.name(), self.arity())
            }
            Callable::Pipeline(stages) => write!(f, "<pipeline of {}>", stages.len()),
            Callable::Fanout(members) => write!(f, "<fanout of {}>", members.len()),
        }
    }
}
