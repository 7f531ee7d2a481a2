//! Closures, currying, explicit binds, composition, and the sequence
//! transforms that exercise them.

use braq::cli::output::OutputBuffer;
use braq::engine::Engine;
use braq::runtime::value::Value;
use braq::BraqError;

fn run_expr(source: &str) -> Result<Value, BraqError> {
    let mut sink = OutputBuffer::new();
    Engine::default().run(source, &mut sink)
}

fn ints(values: &[i64]) -> Value {
    Value::List(values.iter().copied().map(Value::Int).collect())
}

// ---
// Closures
// ---

#[test]
fn closures_apply_their_body_over_bound_parameters() {
    assert_eq!(run_expr("[[[x] -> [* x x]] 6]").unwrap(), Value::Int(36));
    assert_eq!(run_expr("[[[a b] -> [- a b]] 10 3]").unwrap(), Value::Int(7));
}

#[test]
fn closures_capture_the_definition_environment() {
    let source = "[begin
        [y := 10]
        [f := [[x] -> [+ x y]]]
        [g := [[y] -> [f 1]]]
        [g 999]]";
    // Free `y` in f's body resolves to the definition site's 10, not g's 999.
    assert_eq!(run_expr(source).unwrap(), Value::Int(11));
}

#[test]
fn a_free_variable_missing_at_the_definition_site_is_undefined() {
    let source = "[begin
        [f := [[x] -> [+ x nowhere]]]
        [g := [[nowhere] -> [f 1]]]
        [g 5]]";
    assert!(matches!(
        run_expr(source).unwrap_err().root_cause(),
        BraqError::UndefinedSymbol { name } if name == "nowhere"
    ));
}

#[test]
fn closure_factories_nest() {
    let source = "[begin
        [make_adder := [[y] -> [[x] -> [+ x y]]]]
        [add5 := [make_adder 5]]
        [add5 3]]";
    assert_eq!(run_expr(source).unwrap(), Value::Int(8));
}

#[test]
fn recursive_factorial_through_self_reference() {
    let source = "[begin
        [fact := [[n] -> [if [== n 0] 1 [* n [fact [- n 1]]]]]]
        [fact 5]]";
    assert_eq!(run_expr(source).unwrap(), Value::Int(120));
}

// ---
// Currying
// ---

#[test]
fn under_supplying_returns_a_callable_of_the_remaining_arity() {
    assert_eq!(run_expr("[[+ 3] 4]").unwrap(), Value::Int(7));
    // Closures curry too.
    assert_eq!(run_expr("[[[[a b] -> [+ a b]] 1] 2]").unwrap(), Value::Int(3));
}

#[test]
fn default_currying_binds_supplied_arguments_on_the_trailing_side() {
    // [- 10] waits for the minuend: the supplied 10 follows the future 3.
    assert_eq!(run_expr("[[- 10] 3]").unwrap(), Value::Int(-7));
}

#[test]
fn over_supplying_a_partial_is_an_arity_error() {
    let err = run_expr("[[+ 3] 4 5]").unwrap_err();
    let BraqError::ArityMismatch { expected, received, .. } = err.root_cause() else {
        panic!("expected an arity mismatch, got {:?}", err);
    };
    assert_eq!(*expected, 1);
    assert_eq!(*received, 2);
}

#[test]
fn explicit_binds_pick_their_side() {
    assert_eq!(run_expr("[[bind_lt - 10] 3]").unwrap(), Value::Int(7));
    assert_eq!(run_expr("[[bind_rt - 10] 3]").unwrap(), Value::Int(-7));
}

#[test]
fn binds_chain_one_argument_at_a_time() {
    assert_eq!(run_expr("[[bind_lt [bind_lt - 10] 4] ]").unwrap(), Value::Int(6));
}

#[test]
fn apply_spreads_a_sequence_as_arguments() {
    assert_eq!(run_expr("[apply + [| 2 3 |]]").unwrap(), Value::Int(5));
}

// ---
// Pipelines and fanout
// ---

#[test]
fn composition_builds_a_callable_pipeline() {
    let source = "[begin
        [double := [[x] -> [* x 2]]]
        [inc := [[x] -> [+ x 1]]]
        [[double >> inc] 5]]";
    assert_eq!(run_expr(source).unwrap(), Value::Int(11));
}

#[test]
fn pipeline_threads_left_to_right() {
    let source = "[begin
        [f := [[x] -> [+ x 1]]]
        [g := [[x] -> [* x 2]]]
        [h := [[x] -> [- x 3]]]
        [[f >> g >> h] 10]]";
    // h(g(f(10))) = ((10 + 1) * 2) - 3
    assert_eq!(run_expr(source).unwrap(), Value::Int(19));
}

#[test]
fn apply_pipe_feeds_the_leading_value_through() {
    assert_eq!(run_expr("[5 |> [[x] -> [* x x]]]").unwrap(), Value::Int(25));
    let source = "[[| 1 2 3 |] |> [map [[x] -> [* x x]]] |> [fold_left + 0]]";
    // Curried natives slot into pipelines: [map f] and [fold_left + 0]
    // each wait for the sequence argument.
    assert_eq!(run_expr(source).unwrap(), Value::Int(14));
}

#[test]
fn fanout_applies_every_member_to_one_argument() {
    assert_eq!(run_expr("[[ap [| [+ 1] [* 2] |]] 10]").unwrap(), ints(&[11, 20]));
}

// ---
// Sequence transforms over callables
// ---

#[test]
fn map_filter_and_folds() {
    assert_eq!(
        run_expr("[map [1 .. 4] [[x] -> [* x x]]]").unwrap(),
        ints(&[1, 4, 9, 16])
    );
    assert_eq!(
        run_expr("[filter [1 .. 6] [[x] -> [== [% x 2] 0]]]").unwrap(),
        ints(&[2, 4, 6])
    );
    assert_eq!(run_expr("[fold_left [1 .. 4] + 0]").unwrap(), Value::Int(10));
    assert_eq!(
        run_expr(r#"[fold_right [| "a" "b" |] + ""]"#).unwrap(),
        Value::Str("ab".to_string())
    );
}

#[test]
fn take_drop_and_their_while_variants() {
    assert_eq!(run_expr("[take [1 .. 5] 2]").unwrap(), ints(&[1, 2]));
    assert_eq!(run_expr("[drop [1 .. 5] 2]").unwrap(), ints(&[3, 4, 5]));
    // [< 5] waits for its left operand: x < 5.
    assert_eq!(
        run_expr("[take_while [| 1 2 9 1 |] [< 5]]").unwrap(),
        ints(&[1, 2])
    );
    assert_eq!(
        run_expr("[drop_while [| 1 2 9 1 |] [< 5]]").unwrap(),
        ints(&[9, 1])
    );
}

#[test]
fn zip_enumerate_and_flatten() {
    assert_eq!(
        run_expr("[zip [| 1 2 |] [| 3 4 |]]").unwrap(),
        Value::List(vec![ints(&[1, 3]), ints(&[2, 4])])
    );
    assert_eq!(
        run_expr(r#"[enumerate [| "a" "b" |]]"#).unwrap(),
        Value::List(vec![
            Value::List(vec![Value::Int(0), Value::Str("a".to_string())]),
            Value::List(vec![Value::Int(1), Value::Str("b".to_string())]),
        ])
    );
    assert_eq!(
        run_expr("[flatten [| [| 1 2 |] [| 3 |] |]]").unwrap(),
        ints(&[1, 2, 3])
    );
}

#[test]
fn predicate_combinators_over_one_value() {
    assert_eq!(
        run_expr("[and 4 [| [> 3] [< 10] |]]").unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        run_expr("[and 4 [| [> 3] [< 2] |]]").unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        run_expr("[or 4 [| [> 100] [< 10] |]]").unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn for_each_drives_side_effects_and_returns_nil() {
    let mut sink = OutputBuffer::new();
    let result = Engine::default()
        .run("[for_each [1 .. 3] print]", &mut sink)
        .unwrap();
    assert_eq!(result, Value::Nil);
    assert_eq!(sink.buffer, "1\n2\n3");
}
