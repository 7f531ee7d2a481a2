//! Chained lexical environments.
//!
//! A frame maps names to values and optionally links to an outer frame.
//! Lookup walks innermost to outermost; definition always writes into the
//! receiver frame, shadowing any outer binding of the same name for the
//! rest of this frame's lifetime. There is no operation that mutates an
//! ancestor frame. Frames are shared (`Rc<RefCell<_>>`) because every
//! closure created in a scope keeps that scope's frame alive.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::runtime::value::Value;

pub type EnvRef = Rc<RefCell<Env>>;

#[derive(Default)]
pub struct Env {
    vars: HashMap<String, Value>,
    outer: Option<EnvRef>,
}

impl Env {
    /// A fresh frame with no outer link.
    pub fn root() -> EnvRef {
        Rc::new(RefCell::new(Env::default()))
    }

    /// A fresh frame whose lookups fall through to `outer`.
    pub fn child_of(outer: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Env {
            vars: HashMap::new(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Walks the chain from this frame outward.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.vars.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().lookup(name))
    }

    /// Binds `name` in this frame only and returns the stored value;
    /// assignment is an expression.
    pub fn define(&mut self, name: impl Into<String>, value: Value) -> Value {
        let stored = value.clone();
        self.vars.insert(name.into(), value);
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let root = Env::root();
        root.borrow_mut().define("x", Value::Int(1));
        let child = Env::child_of(&root);
        assert_eq!(child.borrow().lookup("x"), Some(Value::Int(1)));
        assert_eq!(child.borrow().lookup("y"), None);
    }

    #[test]
    fn definition_shadows_without_touching_the_outer_frame() {
        let root = Env::root();
        root.borrow_mut().define("x", Value::Int(1));
        let child = Env::child_of(&root);
        child.borrow_mut().define("x", Value::Int(2));
        assert_eq!(child.borrow().lookup("x"), Some(Value::Int(2)));
        assert_eq!(root.borrow().lookup("x"), Some(Value::Int(1)));
    }
}
