//! The tree-walking evaluator.
//!
//! `evaluate` dispatches purely on node shape. List forms are tried in one
//! fixed priority order: `quote`, `begin`, the range operator `..`, the
//! assignment operator `:=`, the closure arrow `->`, `if`, composition
//! `>>`, apply-pipe `|>`, sequence literals `| ... |`, mapping literals
//! `{ ... }`, and finally function application. Only the application arm
//! adds error context: any failure there is wrapped with the printed form
//! of the expression being applied and re-raised, so the outermost caller
//! sees one chain ending at the deepest failing sub-expression.

use std::rc::Rc;

use crate::ast::Expr;
use crate::atoms::OutputSink;
use crate::diagnostics::{invalid_operation, type_mismatch, BraqError};
use crate::runtime::callable::{BindSide, Callable, Closure, Partial};
use crate::runtime::env::{Env, EnvRef};
use crate::runtime::value::{MapKey, Value};

/// Per-run evaluation state: the output sink `print` writes to and the
/// recursion guard. Natives receive it so they can invoke callable
/// arguments.
pub struct EvalContext<'o> {
    pub output: &'o mut dyn OutputSink,
    max_depth: usize,
    depth: usize,
}

impl<'o> EvalContext<'o> {
    pub fn new(output: &'o mut dyn OutputSink, max_depth: usize) -> EvalContext<'o> {
        EvalContext {
            output,
            max_depth,
            depth: 0,
        }
    }
}

/// Evaluates one expression in the given environment.
pub fn evaluate(expr: &Expr, env: &EnvRef, ctx: &mut EvalContext) -> Result<Value, BraqError> {
    match expr {
        Expr::Int(n) => Ok(Value::Int(*n)),
        Expr::Float(x) => Ok(Value::Float(*x)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Symbol(name) => {
            env.borrow()
                .lookup(name)
                .ok_or_else(|| BraqError::UndefinedSymbol { name: name.clone() })
        }
        Expr::List(items) => {
            if ctx.depth >= ctx.max_depth {
                return Err(BraqError::RecursionLimit);
            }
            ctx.depth += 1;
            let result = evaluate_list(items, env, ctx);
            ctx.depth -= 1;
            result
        }
    }
}

fn evaluate_list(items: &[Expr], env: &EnvRef, ctx: &mut EvalContext) -> Result<Value, BraqError> {
    if let Some(head) = items.first() {
        if head.is_symbol("quote") {
            return evaluate_quote(items);
        }
        if head.is_symbol("begin") {
            return evaluate_begin(&items[1..], env, ctx);
        }
    }
    if items.len() >= 2 {
        if items[1].is_symbol("..") {
            return evaluate_range(items, env, ctx);
        }
        if items[1].is_symbol(":=") {
            return evaluate_assignment(items, env, ctx);
        }
        if items[1].is_symbol("->") {
            return evaluate_closure_literal(items, env);
        }
        if items[0].is_symbol("if") {
            return evaluate_if(items, env, ctx);
        }
        if let Some(stages) = delimited_by(">>", items) {
            return Ok(Value::Callable(build_pipeline(&stages, env, ctx)?));
        }
        if let Some(parts) = delimited_by("|>", items) {
            return evaluate_apply_pipe(&parts, env, ctx);
        }
        if items[0].is_symbol("|") && items[items.len() - 1].is_symbol("|") {
            return evaluate_sequence_literal(&items[1..items.len() - 1], env, ctx);
        }
        if items[0].is_symbol("{") && items[items.len() - 1].is_symbol("}") {
            return evaluate_mapping_literal(&items[1..items.len() - 1], env, ctx);
        }
    }
    evaluate_application(items, env, ctx)
}

// --- Special forms ---

/// Returns the operand verbatim, converted to a value without evaluation;
/// symbols become their names as strings.
fn evaluate_quote(items: &[Expr]) -> Result<Value, BraqError> {
    let operand = items
        .get(1)
        .ok_or_else(|| invalid_operation("'quote' expects an operand"))?;
    Ok(quote_value(operand))
}

pub fn quote_value(expr: &Expr) -> Value {
    match expr {
        Expr::Int(n) => Value::Int(*n),
        Expr::Float(x) => Value::Float(*x),
        Expr::Str(s) => Value::Str(s.clone()),
        Expr::Symbol(name) => Value::Str(name.clone()),
        Expr::List(items) => Value::List(items.iter().map(quote_value).collect()),
    }
}

/// Sequential evaluation; earlier results are discarded but their side
/// effects (assignments, output) persist.
fn evaluate_begin(body: &[Expr], env: &EnvRef, ctx: &mut EvalContext) -> Result<Value, BraqError> {
    let mut last = Value::Nil;
    for expr in body {
        last = evaluate(expr, env, ctx)?;
    }
    Ok(last)
}

/// `[a .. b]` - the inclusive integer sequence from `a` through `b`;
/// empty when `a > b`.
fn evaluate_range(items: &[Expr], env: &EnvRef, ctx: &mut EvalContext) -> Result<Value, BraqError> {
    let upper_expr = items
        .get(2)
        .ok_or_else(|| invalid_operation("'..' expects a lower and an upper bound"))?;
    let lower = expect_int_operand("'..'", &evaluate(&items[0], env, ctx)?)?;
    let upper = expect_int_operand("'..'", &evaluate(upper_expr, env, ctx)?)?;
    Ok(Value::List((lower..=upper).map(Value::Int).collect()))
}

fn expect_int_operand(operation: &str, value: &Value) -> Result<i64, BraqError> {
    value
        .as_int()
        .ok_or_else(|| type_mismatch(operation, "integer bounds", value))
}

/// `[name := expr]` - binds into the receiver frame and yields the bound
/// value.
fn evaluate_assignment(
    items: &[Expr],
    env: &EnvRef,
    ctx: &mut EvalContext,
) -> Result<Value, BraqError> {
    let name = items[0].symbol().ok_or_else(|| {
        invalid_operation(format!(
            "':=' needs a symbol on the left-hand side, got '{}'",
            items[0]
        ))
    })?;
    let value_expr = items
        .get(2)
        .ok_or_else(|| invalid_operation("':=' expects a value on the right-hand side"))?;
    let value = evaluate(value_expr, env, ctx)?;
    Ok(env.borrow_mut().define(name, value))
}

/// `[[params] -> body]` - builds a closure capturing the defining
/// environment.
fn evaluate_closure_literal(items: &[Expr], env: &EnvRef) -> Result<Value, BraqError> {
    let Expr::List(param_exprs) = &items[0] else {
        return Err(invalid_operation(
            "'->' expects a parameter sequence on its left",
        ));
    };
    let params = param_exprs
        .iter()
        .map(|p| {
            p.symbol().map(str::to_string).ok_or_else(|| {
                invalid_operation(format!("'->' parameters must be symbols, got '{}'", p))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let body = items
        .get(2)
        .cloned()
        .ok_or_else(|| invalid_operation("'->' expects a body expression"))?;
    Ok(Value::Callable(Callable::Closure(Rc::new(Closure {
        params,
        body,
        env: Rc::clone(env),
    }))))
}

/// Only the taken branch is evaluated.
fn evaluate_if(items: &[Expr], env: &EnvRef, ctx: &mut EvalContext) -> Result<Value, BraqError> {
    let condition = evaluate(&items[1], env, ctx)?;
    let branch = if condition.is_truthy() {
        items.get(2)
    } else {
        items.get(3)
    };
    let branch =
        branch.ok_or_else(|| invalid_operation("'if' is missing the branch it selected"))?;
    evaluate(branch, env, ctx)
}

/// Matches an alternating `expr OP expr OP expr` shape: every odd position
/// must be the separator symbol. Returns the even-position expressions.
fn delimited_by<'e>(separator: &str, items: &'e [Expr]) -> Option<Vec<&'e Expr>> {
    if items.iter().skip(1).step_by(2).all(|e| e.is_symbol(separator)) {
        Some(items.iter().step_by(2).collect())
    } else {
        None
    }
}

fn build_pipeline(
    stages: &[&Expr],
    env: &EnvRef,
    ctx: &mut EvalContext,
) -> Result<Callable, BraqError> {
    let callables = stages
        .iter()
        .map(|stage| {
            let value = evaluate(stage, env, ctx)?;
            value
                .as_callable()
                .ok_or_else(|| type_mismatch("'>>' composition", "callable stages", &value))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Callable::Pipeline(Rc::new(callables)))
}

/// `[value |> f |> g]` - builds the pipeline from the trailing stages and
/// immediately invokes it on the leading value.
fn evaluate_apply_pipe(
    parts: &[&Expr],
    env: &EnvRef,
    ctx: &mut EvalContext,
) -> Result<Value, BraqError> {
    let pipeline = build_pipeline(&parts[1..], env, ctx)?;
    let input = evaluate(parts[0], env, ctx)?;
    call(&pipeline, vec![input], ctx)
}

/// `[| a b c |]` - evaluates the elements strictly between the delimiters.
fn evaluate_sequence_literal(
    inner: &[Expr],
    env: &EnvRef,
    ctx: &mut EvalContext,
) -> Result<Value, BraqError> {
    let items = inner
        .iter()
        .map(|e| evaluate(e, env, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::List(items))
}

/// `[{ k v k v }]` - pairwise keys and values; later duplicate keys
/// overwrite earlier ones. A trailing unpaired element is ignored.
fn evaluate_mapping_literal(
    inner: &[Expr],
    env: &EnvRef,
    ctx: &mut EvalContext,
) -> Result<Value, BraqError> {
    let mut map = im::HashMap::new();
    for pair in inner.chunks_exact(2) {
        let key_value = evaluate(&pair[0], env, ctx)?;
        let key = MapKey::try_from(&key_value)?;
        let value = evaluate(&pair[1], env, ctx)?;
        map.insert(key, value);
    }
    Ok(Value::Map(map))
}

// --- Function application and currying ---

fn evaluate_application(
    items: &[Expr],
    env: &EnvRef,
    ctx: &mut EvalContext,
) -> Result<Value, BraqError> {
    let Some(head) = items.first() else {
        return Err(BraqError::EmptyExpression);
    };
    apply_call(items, env, ctx).map_err(|cause| BraqError::Expression {
        expr: head.pretty(),
        cause: Box::new(cause),
    })
}

fn apply_call(items: &[Expr], env: &EnvRef, ctx: &mut EvalContext) -> Result<Value, BraqError> {
    let target = evaluate(&items[0], env, ctx)?;
    let callable = target
        .as_callable()
        .ok_or_else(|| type_mismatch("function application", "a callable value", &target))?;
    let args = items[1..]
        .iter()
        .map(|arg| evaluate(arg, env, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    call(&callable, args, ctx)
}

/// Invokes a callable with the currying rules: exact arity executes,
/// under-supply returns a partial application of the remaining arity
/// (supplied arguments bind on the trailing side of future ones),
/// over-supply is an arity error.
pub fn call(callable: &Callable, args: Vec<Value>, ctx: &mut EvalContext) -> Result<Value, BraqError> {
    match callable {
        Callable::Pipeline(stages) => {
            let Some((first, rest)) = stages.split_first() else {
                return Err(invalid_operation("cannot invoke an empty pipeline"));
            };
            let mut value = call(first, args, ctx)?;
            for stage in rest {
                value = call(stage, vec![value], ctx)?;
            }
            Ok(value)
        }
        Callable::Fanout(members) => {
            if args.len() != 1 {
                return Err(BraqError::ArityMismatch {
                    callable: callable.name(),
                    expected: 1,
                    received: args.len(),
                });
            }
            let results = members
                .iter()
                .map(|member| call(member, vec![args[0].clone()], ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(results))
        }
        _ => {
            let arity = callable.arity();
            match args.len().cmp(&arity) {
                std::cmp::Ordering::Equal => invoke_exact(callable, args, ctx),
                std::cmp::Ordering::Less => {
                    Ok(Value::Callable(Callable::Partial(Rc::new(Partial {
                        target: callable.clone(),
                        supplied: args,
                        side: BindSide::Right,
                    }))))
                }
                std::cmp::Ordering::Greater => Err(BraqError::ArityMismatch {
                    callable: callable.name(),
                    expected: arity,
                    received: args.len(),
                }),
            }
        }
    }
}

fn invoke_exact(
    callable: &Callable,
    args: Vec<Value>,
    ctx: &mut EvalContext,
) -> Result<Value, BraqError> {
    match callable {
        Callable::Native(native) => (native.run)(&args, ctx),
        Callable::Closure(closure) => {
            let frame = Env::child_of(&closure.env);
            {
                let mut bindings = frame.borrow_mut();
                for (param, arg) in closure.params.iter().zip(args) {
                    bindings.define(param.clone(), arg);
                }
            }
            evaluate(&closure.body, &frame, ctx)
        }
        Callable::Partial(partial) => {
            let mut full = Vec::with_capacity(partial.supplied.len() + args.len());
            match partial.side {
                BindSide::Left => {
                    full.extend(partial.supplied.iter().cloned());
                    full.extend(args);
                }
                BindSide::Right => {
                    full.extend(args);
                    full.extend(partial.supplied.iter().cloned());
                }
            }
            call(&partial.target, full, ctx)
        }
        // Handled in `call`; neither participates in arity dispatch.
        Callable::Pipeline(_) | Callable::Fanout(_) => call(callable, args, ctx),
    }
}
