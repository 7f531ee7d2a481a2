//! Natives touching the outside world: output and string conversion.

use crate::atoms::Registry;
use crate::runtime::callable::NativeFn;
use crate::runtime::value::Value;

pub fn register(registry: &mut Registry) {
    registry.register("print", 1, NATIVE_PRINT);
    registry.register("str", 1, NATIVE_STR);
}

/// Writes the value's display form to the context's output sink.
pub const NATIVE_PRINT: NativeFn = |args, ctx| {
    ctx.output.emit(&args[0].to_string());
    Ok(Value::Nil)
};

pub const NATIVE_STR: NativeFn = |args, _ctx| Ok(Value::Str(args[0].to_string()));
