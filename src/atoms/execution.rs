//! Application helpers: spreading, explicit binds, fanout.

use std::rc::Rc;

use crate::atoms::{expect_callable, expect_list, Registry};
use crate::runtime::callable::{BindSide, Callable, NativeFn, Partial};
use crate::runtime::eval::call;
use crate::runtime::value::Value;

pub fn register(registry: &mut Registry) {
    registry.register("apply", 2, NATIVE_APPLY);
    registry.register("bind_lt", 2, NATIVE_BIND_LEFT);
    registry.register("bind_rt", 2, NATIVE_BIND_RIGHT);
    registry.register("ap", 1, NATIVE_AP);
}

/// `[apply f args]` - invokes `f` with the sequence's elements as its
/// argument list, currying rules included.
pub const NATIVE_APPLY: NativeFn = |args, ctx| {
    let func = expect_callable("'apply'", &args[0])?;
    let call_args = expect_list("'apply'", &args[1])?.to_vec();
    call(&func, call_args, ctx)
};

fn bind(args: &[Value], side: BindSide) -> Result<Value, crate::diagnostics::BraqError> {
    let op = match side {
        BindSide::Left => "'bind_lt'",
        BindSide::Right => "'bind_rt'",
    };
    let target = expect_callable(op, &args[0])?;
    Ok(Value::Callable(Callable::Partial(Rc::new(Partial {
        target,
        supplied: vec![args[1].clone()],
        side,
    }))))
}

/// `[bind_lt f x]` - a partial whose bound argument precedes future ones.
pub const NATIVE_BIND_LEFT: NativeFn = |args, _ctx| bind(args, BindSide::Left);

/// `[bind_rt f x]` - a partial whose bound argument follows future ones.
pub const NATIVE_BIND_RIGHT: NativeFn = |args, _ctx| bind(args, BindSide::Right);

/// `[ap fs]` - a callable that applies every member of `fs` to one
/// argument and collects the results in order.
pub const NATIVE_AP: NativeFn = |args, _ctx| {
    let members = expect_list("'ap'", &args[0])?
        .iter()
        .map(|member| expect_callable("'ap'", member))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Callable(Callable::Fanout(Rc::new(members))))
};
