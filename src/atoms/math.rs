//! Arithmetic natives.
//!
//! Integer pairs stay integral (with overflow reported, never wrapped);
//! mixed operands widen to float. Division always yields a float, and
//! division or modulo by zero is an error. `+` doubles as concatenation
//! for string pairs and list pairs.

use crate::atoms::{expect_number, Registry};
use crate::diagnostics::{invalid_operation, BraqError};
use crate::runtime::callable::NativeFn;
use crate::runtime::value::Value;

pub fn register(registry: &mut Registry) {
    registry.register("+", 2, NATIVE_ADD);
    registry.register("-", 2, NATIVE_SUB);
    registry.register("*", 2, NATIVE_MUL);
    registry.register("/", 2, NATIVE_DIV);
    registry.register("%", 2, NATIVE_MOD);
}

fn overflow(op: &str) -> BraqError {
    invalid_operation(format!("integer overflow in '{}'", op))
}

fn mismatch(op: &str, expected: &str, a: &Value, b: &Value) -> BraqError {
    BraqError::TypeMismatch {
        operation: format!("'{}'", op),
        expected: expected.to_string(),
        found: format!("{} and {}", a.type_name(), b.type_name()),
    }
}

pub const NATIVE_ADD: NativeFn = |args, _ctx| match (&args[0], &args[1]) {
    (Value::Int(a), Value::Int(b)) => {
        a.checked_add(*b).map(Value::Int).ok_or_else(|| overflow("+"))
    }
    (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
    (Value::List(a), Value::List(b)) => {
        let mut joined = a.clone();
        joined.extend(b.iter().cloned());
        Ok(Value::List(joined))
    }
    (a, b) => match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => Ok(Value::Float(x + y)),
        _ => Err(mismatch("+", "two numbers, two strings, or two sequences", a, b)),
    },
};

pub const NATIVE_SUB: NativeFn = |args, _ctx| match (&args[0], &args[1]) {
    (Value::Int(a), Value::Int(b)) => {
        a.checked_sub(*b).map(Value::Int).ok_or_else(|| overflow("-"))
    }
    (a, b) => match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => Ok(Value::Float(x - y)),
        _ => Err(mismatch("-", "two numbers", a, b)),
    },
};

pub const NATIVE_MUL: NativeFn = |args, _ctx| match (&args[0], &args[1]) {
    (Value::Int(a), Value::Int(b)) => {
        a.checked_mul(*b).map(Value::Int).ok_or_else(|| overflow("*"))
    }
    (a, b) => match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => Ok(Value::Float(x * y)),
        _ => Err(mismatch("*", "two numbers", a, b)),
    },
};

/// True division: the quotient is a float even for integer operands.
pub const NATIVE_DIV: NativeFn = |args, _ctx| {
    let a = expect_number("'/'", &args[0])?;
    let b = expect_number("'/'", &args[1])?;
    if b == 0.0 {
        return Err(BraqError::DivisionByZero);
    }
    Ok(Value::Float(a / b))
};

/// Remainder with the sign of the divisor (floored modulo), for floats as
/// well as integers.
pub const NATIVE_MOD: NativeFn = |args, _ctx| match (&args[0], &args[1]) {
    (Value::Int(a), Value::Int(b)) => {
        if *b == 0 {
            return Err(BraqError::DivisionByZero);
        }
        let r = a.checked_rem(*b).ok_or_else(|| overflow("%"))?;
        let adjusted = if r != 0 && (r < 0) != (*b < 0) { r + b } else { r };
        Ok(Value::Int(adjusted))
    }
    (a, b) => {
        let x = expect_number("'%'", a)?;
        let y = expect_number("'%'", b)?;
        if y == 0.0 {
            return Err(BraqError::DivisionByZero);
        }
        Ok(Value::Float(x - y * (x / y).floor()))
    }
};
