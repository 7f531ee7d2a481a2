//! The built-in library: native operations and the registry that carries
//! them.
//!
//! The registry is an explicit configuration object. Nothing here is
//! process-global: each engine owns its registry and each run installs it
//! into a fresh root environment, so independent program runs cannot
//! interfere.
//!
//! ## Module structure
//!
//! - **`math`** - arithmetic (`+`, `-`, `*`, `/`, `%`)
//! - **`logic`** - comparisons, boolean combinators, predicates
//! - **`collections`** - sequence/mapping accessors and transforms
//! - **`execution`** - `apply`, explicit binds, fanout
//! - **`external`** - `print` and string conversion

use std::collections::HashMap;

use crate::diagnostics::{type_mismatch, BraqError};
use crate::runtime::callable::{Callable, Native, NativeFn};
use crate::runtime::env::{Env, EnvRef};
use crate::runtime::value::Value;

pub mod collections;
pub mod execution;
pub mod external;
pub mod logic;
pub mod math;

/// Destination for `print` output, injectable so evaluation is testable.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// Swallows all output; for running without side effects.
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _text: &str) {}
}

/// The table of native operations available as initial global bindings.
/// Every entry carries an explicit declared arity so the currying
/// machinery treats natives and closures uniformly.
#[derive(Default)]
pub struct Registry {
    natives: HashMap<&'static str, Native>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// The full standard table.
    pub fn standard() -> Registry {
        let mut registry = Registry::new();
        math::register(&mut registry);
        logic::register(&mut registry);
        collections::register(&mut registry);
        execution::register(&mut registry);
        external::register(&mut registry);
        registry
    }

    pub fn register(&mut self, name: &'static str, arity: usize, run: NativeFn) {
        self.natives.insert(name, Native { name, arity, run });
    }

    pub fn get(&self, name: &str) -> Option<&Native> {
        self.natives.get(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.natives.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.natives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.natives.is_empty()
    }
}

/// Builds a root environment from a registry: one binding per native plus
/// the constants `True` and `False`.
pub fn build_root_env(registry: &Registry) -> EnvRef {
    let env = Env::root();
    {
        let mut frame = env.borrow_mut();
        for native in registry.natives.values() {
            frame.define(native.name, Value::Callable(Callable::Native(*native)));
        }
        frame.define("True", Value::Bool(true));
        frame.define("False", Value::Bool(false));
    }
    env
}

// --- Shared argument extraction ---
//
// The call dispatcher guarantees natives receive exactly their declared
// arity, so these extractors only ever fail on type, not on count.

pub(crate) fn expect_int(operation: &str, value: &Value) -> Result<i64, BraqError> {
    value
        .as_int()
        .ok_or_else(|| type_mismatch(operation, "an integer", value))
}

pub(crate) fn expect_number(operation: &str, value: &Value) -> Result<f64, BraqError> {
    value
        .as_number()
        .ok_or_else(|| type_mismatch(operation, "a number", value))
}

pub(crate) fn expect_str<'v>(operation: &str, value: &'v Value) -> Result<&'v str, BraqError> {
    value
        .as_str()
        .ok_or_else(|| type_mismatch(operation, "a string", value))
}

pub(crate) fn expect_list<'v>(operation: &str, value: &'v Value) -> Result<&'v [Value], BraqError> {
    value
        .as_list()
        .ok_or_else(|| type_mismatch(operation, "a sequence", value))
}

pub(crate) fn expect_callable(operation: &str, value: &Value) -> Result<Callable, BraqError> {
    value
        .as_callable()
        .ok_or_else(|| type_mismatch(operation, "a callable", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_the_documented_table() {
        let registry = Registry::standard();
        for name in [
            "+", "-", "*", "/", "%", "==", "!=", "<", "<=", ">", ">=", "&&", "||", "null?",
            "and", "or", "len", "first", "second", "head", "tail", "cons", "map", "filter",
            "take", "drop", "take_while", "drop_while", "for_each", "zip", "enumerate",
            "flatten", "fold_left", "fold_right", "join", "@", "in", "apply", "bind_lt",
            "bind_rt", "ap", "print", "str",
        ] {
            assert!(registry.get(name).is_some(), "missing native '{}'", name);
        }
    }

    #[test]
    fn root_env_binds_natives_and_constants() {
        let env = build_root_env(&Registry::standard());
        assert_eq!(env.borrow().lookup("True"), Some(Value::Bool(true)));
        assert!(matches!(
            env.borrow().lookup("+"),
            Some(Value::Callable(Callable::Native(n))) if n.arity == 2
        ));
    }
}
