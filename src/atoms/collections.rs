//! Sequence and mapping natives: accessors, transforms, membership.

use crate::atoms::{expect_callable, expect_int, expect_list, expect_str, Registry};
use crate::diagnostics::{invalid_operation, type_mismatch, BraqError};
use crate::runtime::callable::NativeFn;
use crate::runtime::eval::call;
use crate::runtime::value::{MapKey, Value};

pub fn register(registry: &mut Registry) {
    registry.register("len", 1, NATIVE_LEN);
    registry.register("first", 1, NATIVE_FIRST);
    registry.register("second", 1, NATIVE_SECOND);
    registry.register("head", 1, NATIVE_FIRST);
    registry.register("tail", 1, NATIVE_TAIL);
    registry.register("cons", 2, NATIVE_CONS);
    registry.register("map", 2, NATIVE_MAP);
    registry.register("filter", 2, NATIVE_FILTER);
    registry.register("take", 2, NATIVE_TAKE);
    registry.register("drop", 2, NATIVE_DROP);
    registry.register("take_while", 2, NATIVE_TAKE_WHILE);
    registry.register("drop_while", 2, NATIVE_DROP_WHILE);
    registry.register("for_each", 2, NATIVE_FOR_EACH);
    registry.register("zip", 2, NATIVE_ZIP);
    registry.register("enumerate", 1, NATIVE_ENUMERATE);
    registry.register("flatten", 1, NATIVE_FLATTEN);
    registry.register("fold_left", 3, NATIVE_FOLD_LEFT);
    registry.register("fold_right", 3, NATIVE_FOLD_RIGHT);
    registry.register("join", 2, NATIVE_JOIN);
    registry.register("@", 2, NATIVE_AT);
    registry.register("in", 2, NATIVE_IN);
}

pub const NATIVE_LEN: NativeFn = |args, _ctx| match &args[0] {
    Value::List(items) => Ok(Value::Int(items.len() as i64)),
    Value::Map(map) => Ok(Value::Int(map.len() as i64)),
    Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
    other => Err(type_mismatch("'len'", "a sequence, map, or string", other)),
};

fn element_at(op: &str, value: &Value, index: usize) -> Result<Value, BraqError> {
    match value {
        Value::List(items) => items.get(index).cloned().ok_or_else(|| {
            invalid_operation(format!(
                "'{}' needs at least {} elements, sequence has {}",
                op,
                index + 1,
                items.len()
            ))
        }),
        Value::Str(s) => s
            .chars()
            .nth(index)
            .map(|ch| Value::Str(ch.to_string()))
            .ok_or_else(|| invalid_operation(format!("'{}' ran past the end of the string", op))),
        other => Err(type_mismatch(&format!("'{}'", op), "a sequence or string", other)),
    }
}

pub const NATIVE_FIRST: NativeFn = |args, _ctx| element_at("first", &args[0], 0);

pub const NATIVE_SECOND: NativeFn = |args, _ctx| element_at("second", &args[0], 1);

/// Everything after the first element; empty input yields empty.
pub const NATIVE_TAIL: NativeFn = |args, _ctx| match &args[0] {
    Value::List(items) => Ok(Value::List(items.iter().skip(1).cloned().collect())),
    Value::Str(s) => Ok(Value::Str(s.chars().skip(1).collect())),
    other => Err(type_mismatch("'tail'", "a sequence or string", other)),
};

pub const NATIVE_CONS: NativeFn = |args, _ctx| {
    let rest = expect_list("'cons'", &args[1])?;
    let mut items = Vec::with_capacity(rest.len() + 1);
    items.push(args[0].clone());
    items.extend(rest.iter().cloned());
    Ok(Value::List(items))
};

pub const NATIVE_MAP: NativeFn = |args, ctx| {
    let items = expect_list("'map'", &args[0])?;
    let func = expect_callable("'map'", &args[1])?;
    let mapped = items
        .iter()
        .map(|item| call(&func, vec![item.clone()], ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::List(mapped))
};

pub const NATIVE_FILTER: NativeFn = |args, ctx| {
    let items = expect_list("'filter'", &args[0])?;
    let pred = expect_callable("'filter'", &args[1])?;
    let mut kept = Vec::new();
    for item in items {
        if call(&pred, vec![item.clone()], ctx)?.is_truthy() {
            kept.push(item.clone());
        }
    }
    Ok(Value::List(kept))
};

fn expect_count(op: &str, value: &Value) -> Result<usize, BraqError> {
    let n = expect_int(op, value)?;
    usize::try_from(n)
        .map_err(|_| invalid_operation(format!("{} expects a non-negative count, got {}", op, n)))
}

pub const NATIVE_TAKE: NativeFn = |args, _ctx| {
    let items = expect_list("'take'", &args[0])?;
    let count = expect_count("'take'", &args[1])?;
    Ok(Value::List(items.iter().take(count).cloned().collect()))
};

pub const NATIVE_DROP: NativeFn = |args, _ctx| {
    let items = expect_list("'drop'", &args[0])?;
    let count = expect_count("'drop'", &args[1])?;
    Ok(Value::List(items.iter().skip(count).cloned().collect()))
};

pub const NATIVE_TAKE_WHILE: NativeFn = |args, ctx| {
    let items = expect_list("'take_while'", &args[0])?;
    let pred = expect_callable("'take_while'", &args[1])?;
    let mut kept = Vec::new();
    for item in items {
        if !call(&pred, vec![item.clone()], ctx)?.is_truthy() {
            break;
        }
        kept.push(item.clone());
    }
    Ok(Value::List(kept))
};

pub const NATIVE_DROP_WHILE: NativeFn = |args, ctx| {
    let items = expect_list("'drop_while'", &args[0])?;
    let pred = expect_callable("'drop_while'", &args[1])?;
    let mut index = 0;
    while index < items.len() {
        if !call(&pred, vec![items[index].clone()], ctx)?.is_truthy() {
            break;
        }
        index += 1;
    }
    Ok(Value::List(items[index..].to_vec()))
};

pub const NATIVE_FOR_EACH: NativeFn = |args, ctx| {
    let items = expect_list("'for_each'", &args[0])?;
    let func = expect_callable("'for_each'", &args[1])?;
    for item in items {
        call(&func, vec![item.clone()], ctx)?;
    }
    Ok(Value::Nil)
};

/// Pairs elements positionally, stopping at the shorter input.
pub const NATIVE_ZIP: NativeFn = |args, _ctx| {
    let left = expect_list("'zip'", &args[0])?;
    let right = expect_list("'zip'", &args[1])?;
    let pairs = left
        .iter()
        .zip(right)
        .map(|(l, r)| Value::List(vec![l.clone(), r.clone()]))
        .collect();
    Ok(Value::List(pairs))
};

pub const NATIVE_ENUMERATE: NativeFn = |args, _ctx| {
    let items = expect_list("'enumerate'", &args[0])?;
    let indexed = items
        .iter()
        .enumerate()
        .map(|(i, item)| Value::List(vec![Value::Int(i as i64), item.clone()]))
        .collect();
    Ok(Value::List(indexed))
};

/// One level of flattening; every element must itself be a sequence.
pub const NATIVE_FLATTEN: NativeFn = |args, _ctx| {
    let items = expect_list("'flatten'", &args[0])?;
    let mut flat = Vec::new();
    for item in items {
        flat.extend(expect_list("'flatten'", item)?.iter().cloned());
    }
    Ok(Value::List(flat))
};

pub const NATIVE_FOLD_LEFT: NativeFn = |args, ctx| {
    let items = expect_list("'fold_left'", &args[0])?;
    let func = expect_callable("'fold_left'", &args[1])?;
    let mut acc = args[2].clone();
    for item in items {
        acc = call(&func, vec![acc, item.clone()], ctx)?;
    }
    Ok(acc)
};

/// Folds from the right: the combining function receives the element
/// first and the accumulator second.
pub const NATIVE_FOLD_RIGHT: NativeFn = |args, ctx| {
    let items = expect_list("'fold_right'", &args[0])?;
    let func = expect_callable("'fold_right'", &args[1])?;
    let mut acc = args[2].clone();
    for item in items.iter().rev() {
        acc = call(&func, vec![item.clone(), acc], ctx)?;
    }
    Ok(acc)
};

pub const NATIVE_JOIN: NativeFn = |args, _ctx| {
    let items = expect_list("'join'", &args[0])?;
    let separator = expect_str("'join'", &args[1])?;
    let joined = items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator);
    Ok(Value::Str(joined))
};

/// `[@ collection key]` - indexed or keyed lookup. Sequence and string
/// indices may be negative to count from the end.
pub const NATIVE_AT: NativeFn = |args, _ctx| match &args[0] {
    Value::List(items) => {
        let index = resolve_index("'@'", &args[1], items.len())?;
        Ok(items[index].clone())
    }
    Value::Str(s) => {
        let chars: Vec<char> = s.chars().collect();
        let index = resolve_index("'@'", &args[1], chars.len())?;
        Ok(Value::Str(chars[index].to_string()))
    }
    Value::Map(map) => {
        let key = MapKey::try_from(&args[1])?;
        map.get(&key)
            .cloned()
            .ok_or_else(|| invalid_operation(format!("key '{}' not found", key)))
    }
    other => Err(type_mismatch("'@'", "a sequence, string, or map", other)),
};

fn resolve_index(op: &str, value: &Value, len: usize) -> Result<usize, BraqError> {
    let raw = expect_int(op, value)?;
    let index = if raw < 0 {
        raw as i128 + len as i128
    } else {
        raw as i128
    };
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(|| {
            invalid_operation(format!("index {} out of range for length {}", raw, len))
        })
}

/// `[in collection key]` - membership: value in sequence, key in map,
/// substring in string.
pub const NATIVE_IN: NativeFn = |args, _ctx| match &args[0] {
    Value::List(items) => Ok(Value::Bool(items.contains(&args[1]))),
    Value::Map(map) => {
        let key = MapKey::try_from(&args[1])?;
        Ok(Value::Bool(map.contains_key(&key)))
    }
    Value::Str(s) => {
        let needle = expect_str("'in'", &args[1])?;
        Ok(Value::Bool(s.contains(needle)))
    }
    other => Err(type_mismatch("'in'", "a sequence, string, or map", other)),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::NullSink;
    use crate::runtime::eval::EvalContext;

    fn ints(values: &[i64]) -> Value {
        Value::List(values.iter().copied().map(Value::Int).collect())
    }

    fn run(native: NativeFn, args: &[Value]) -> Result<Value, BraqError> {
        let mut sink = NullSink;
        let mut ctx = EvalContext::new(&mut sink, 16);
        native(args, &mut ctx)
    }

    #[test]
    fn accessors_index_from_the_front() {
        let seq = ints(&[10, 20, 30]);
        assert_eq!(run(NATIVE_FIRST, &[seq.clone()]).unwrap(), Value::Int(10));
        assert_eq!(run(NATIVE_SECOND, &[seq.clone()]).unwrap(), Value::Int(20));
        assert_eq!(run(NATIVE_TAIL, &[seq]).unwrap(), ints(&[20, 30]));
        assert_eq!(run(NATIVE_TAIL, &[ints(&[])]).unwrap(), ints(&[]));
        assert!(run(NATIVE_FIRST, &[ints(&[])]).is_err());
    }

    #[test]
    fn take_and_drop_clamp_to_length() {
        let seq = ints(&[1, 2, 3]);
        assert_eq!(run(NATIVE_TAKE, &[seq.clone(), Value::Int(5)]).unwrap(), ints(&[1, 2, 3]));
        assert_eq!(run(NATIVE_DROP, &[seq.clone(), Value::Int(5)]).unwrap(), ints(&[]));
        assert!(run(NATIVE_TAKE, &[seq, Value::Int(-1)]).is_err());
    }

    #[test]
    fn zip_stops_at_the_shorter_side() {
        let pairs = run(NATIVE_ZIP, &[ints(&[1, 2, 3]), ints(&[4, 5])]).unwrap();
        assert_eq!(
            pairs,
            Value::List(vec![
                Value::List(vec![Value::Int(1), Value::Int(4)]),
                Value::List(vec![Value::Int(2), Value::Int(5)]),
            ])
        );
    }

    #[test]
    fn lookup_supports_negative_indices() {
        let seq = ints(&[1, 2, 3]);
        assert_eq!(run(NATIVE_AT, &[seq.clone(), Value::Int(-1)]).unwrap(), Value::Int(3));
        assert!(run(NATIVE_AT, &[seq, Value::Int(3)]).is_err());
    }

    #[test]
    fn membership_covers_all_three_collection_kinds() {
        assert_eq!(
            run(NATIVE_IN, &[ints(&[1, 2]), Value::Int(2)]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            run(NATIVE_IN, &[Value::Str("hello".into()), Value::Str("ell".into())]).unwrap(),
            Value::Bool(true)
        );
        let map = Value::Map(im::HashMap::unit(MapKey::Str("k".into()), Value::Int(1)));
        assert_eq!(
            run(NATIVE_IN, &[map, Value::Str("k".into())]).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn flatten_removes_exactly_one_level() {
        let nested = Value::List(vec![ints(&[1, 2]), ints(&[3])]);
        assert_eq!(run(NATIVE_FLATTEN, &[nested]).unwrap(), ints(&[1, 2, 3]));
        assert!(run(NATIVE_FLATTEN, &[ints(&[1])]).is_err());
    }
}
