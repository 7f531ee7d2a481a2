//! Runtime half of the engine: values, environments, callables, and the
//! tree-walking evaluator.

pub mod callable;
pub mod env;
pub mod eval;
pub mod value;

pub use callable::{BindSide, Callable, Closure, Native, NativeFn, Partial};
pub use env::{Env, EnvRef};
pub use eval::{call, evaluate, EvalContext};
pub use value::{MapKey, Value};
