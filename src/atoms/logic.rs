//! Comparison and boolean natives.

use std::cmp::Ordering;

use crate::atoms::{expect_callable, expect_list, Registry};
use crate::diagnostics::BraqError;
use crate::runtime::callable::NativeFn;
use crate::runtime::eval::call;
use crate::runtime::value::{compare, Value};

pub fn register(registry: &mut Registry) {
    registry.register("==", 2, NATIVE_EQ);
    registry.register("!=", 2, NATIVE_NE);
    registry.register("<", 2, NATIVE_LT);
    registry.register("<=", 2, NATIVE_LE);
    registry.register(">", 2, NATIVE_GT);
    registry.register(">=", 2, NATIVE_GE);
    registry.register("&&", 2, NATIVE_AND);
    registry.register("||", 2, NATIVE_OR);
    registry.register("null?", 1, NATIVE_NULLP);
    registry.register("and", 2, NATIVE_ALL_OF);
    registry.register("or", 2, NATIVE_ANY_OF);
}

pub const NATIVE_EQ: NativeFn = |args, _ctx| Ok(Value::Bool(args[0] == args[1]));

pub const NATIVE_NE: NativeFn = |args, _ctx| Ok(Value::Bool(args[0] != args[1]));

fn ordered(op: &str, args: &[Value], accept: fn(Ordering) -> bool) -> Result<Value, BraqError> {
    let order = compare(&args[0], &args[1]).ok_or_else(|| BraqError::TypeMismatch {
        operation: format!("'{}'", op),
        expected: "two numbers or two strings".to_string(),
        found: format!("{} and {}", args[0].type_name(), args[1].type_name()),
    })?;
    Ok(Value::Bool(accept(order)))
}

pub const NATIVE_LT: NativeFn = |args, _ctx| ordered("<", args, |o| o == Ordering::Less);
pub const NATIVE_LE: NativeFn = |args, _ctx| ordered("<=", args, |o| o != Ordering::Greater);
pub const NATIVE_GT: NativeFn = |args, _ctx| ordered(">", args, |o| o == Ordering::Greater);
pub const NATIVE_GE: NativeFn = |args, _ctx| ordered(">=", args, |o| o != Ordering::Less);

pub const NATIVE_AND: NativeFn =
    |args, _ctx| Ok(Value::Bool(args[0].is_truthy() && args[1].is_truthy()));

pub const NATIVE_OR: NativeFn =
    |args, _ctx| Ok(Value::Bool(args[0].is_truthy() || args[1].is_truthy()));

pub const NATIVE_NULLP: NativeFn = |args, _ctx| Ok(Value::Bool(!args[0].is_truthy()));

/// `[and value predicates]` - true when every predicate accepts the value.
/// Short-circuits on the first rejection.
pub const NATIVE_ALL_OF: NativeFn = |args, ctx| {
    let preds = expect_list("'and'", &args[1])?;
    for pred in preds {
        let pred = expect_callable("'and'", pred)?;
        if !call(&pred, vec![args[0].clone()], ctx)?.is_truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
};

/// `[or value predicates]` - true when any predicate accepts the value.
pub const NATIVE_ANY_OF: NativeFn = |args, ctx| {
    let preds = expect_list("'or'", &args[1])?;
    for pred in preds {
        let pred = expect_callable("'or'", pred)?;
        if call(&pred, vec![args[0].clone()], ctx)?.is_truthy() {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
};
