use seec::{
    DiagnosticKind, SeeError, Session, Variant,
    value::{Value, ValueKind},
};

fn eval(source: &str) -> Value {
    let mut session = Session::create_default();
    session
        .eval_source(source)
        .expect("evaluation should succeed")
}

fn eval_error(session: &mut Session, source: &str) -> DiagnosticKind {
    match session.eval_source(source) {
        Ok(value) => panic!("expected error, received value {value}"),
        Err(SeeError::Diagnostic(diag)) => diag.kind,
        Err(other) => panic!("expected diagnostic, received {other}"),
    }
}

fn expect_int(value: &Value) -> i64 {
    match value.kind() {
        ValueKind::Int(n) => *n,
        _ => panic!("expected Int, found {}", value.type_name()),
    }
}

fn expect_float(value: &Value) -> f64 {
    match value.kind() {
        ValueKind::Float(n) => *n,
        _ => panic!("expected Float, found {}", value.type_name()),
    }
}

#[test]
fn evaluates_arithmetic_with_precedence() {
    assert_eq!(expect_int(&eval("1 + 2 * 3")), 7);
    assert_eq!(expect_int(&eval("(1 + 2) * 3")), 9);
    assert_eq!(expect_int(&eval("2 ^ 3 ^ 2")), 512);
    assert_eq!(expect_int(&eval("-2 ^ 2")), -4);
    assert_eq!(expect_int(&eval("7 % 3")), 1);
}

#[test]
fn inexact_integer_division_yields_float() {
    assert_eq!(expect_int(&eval("6 / 2")), 3);
    assert_eq!(expect_float(&eval("7 / 2")), 3.5);
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let mut session = Session::create_default();
    assert_eq!(eval_error(&mut session, "1 / 0"), DiagnosticKind::Runtime);
    assert_eq!(eval_error(&mut session, "1 % 0"), DiagnosticKind::Runtime);
}

#[test]
fn bindings_persist_across_statements() {
    let mut session = Session::create_default();
    session.eval_source("x = 4").expect("assignment");
    let doubled = session.eval_source("x * 2").expect("read back");
    assert_eq!(expect_int(&doubled), 8);
    assert_eq!(expect_int(&session.get("x").expect("x is bound")), 4);
}

#[test]
fn last_expression_is_the_result() {
    assert_eq!(expect_int(&eval("a = 40; b = 2; a + b")), 42);
    assert_eq!(expect_int(&eval("a = 40\nb = 2\na + b\n")), 42);
}

#[test]
fn unbound_names_read_as_none() {
    let mut session = Session::create_default();
    let value = session.eval_source("y").expect("reading y");
    assert!(matches!(value.kind(), ValueKind::None));
    assert!(session.get("y").is_none());
}

#[test]
fn empty_input_evaluates_to_none() {
    assert!(matches!(eval("").kind(), ValueKind::None));
    assert!(matches!(eval("\n\n;").kind(), ValueKind::None));
}

#[test]
fn incomplete_assignment_fails_to_parse() {
    let session = Session::create_default();
    let err = session.parse("x=").expect_err("missing right-hand side");
    assert!(matches!(
        err,
        SeeError::Diagnostic(ref diag) if diag.kind == DiagnosticKind::Parser
    ));
}

#[test]
fn unterminated_string_is_a_lexer_error() {
    let mut session = Session::create_default();
    assert_eq!(eval_error(&mut session, "\"abc"), DiagnosticKind::Lexer);
}

#[test]
fn const_session_rejects_assignment() {
    let mut session = Session::create_const();
    assert_eq!(session.variant(), Variant::Const);
    assert_eq!(eval_error(&mut session, "x = 1"), DiagnosticKind::Parser);
    assert!(session.get("x").is_none());

    let value = session.eval_source("pi > 3").expect("reads are allowed");
    assert!(value.is_truthy());
}

#[test]
fn builtins_cannot_be_reassigned() {
    let mut session = Session::create_default();
    assert_eq!(eval_error(&mut session, "pi = 3"), DiagnosticKind::Runtime);
}

#[test]
fn calls_prelude_functions() {
    assert_eq!(expect_float(&eval("sqrt(16)")), 4.0);
    assert_eq!(expect_int(&eval("max(1, 5, 3)")), 5);
    assert_eq!(expect_int(&eval("min(4, -2)")), -2);
    assert_eq!(expect_int(&eval("len([1, 2, 3])")), 3);
    assert_eq!(expect_int(&eval("floor(2.7)")), 2);
    assert_eq!(eval("str(12) + \"!\"").to_string(), "12!");
}

#[test]
fn wrong_arity_and_bad_callee_fail() {
    let mut session = Session::create_default();
    assert_eq!(eval_error(&mut session, "abs()"), DiagnosticKind::Runtime);
    assert_eq!(eval_error(&mut session, "3(1)"), DiagnosticKind::Runtime);
}

#[test]
fn indexes_arrays_and_strings() {
    assert_eq!(expect_int(&eval("[10, 20, 30][1]")), 20);
    assert_eq!(eval("\"see\"[0]").to_string(), "s");

    let mut session = Session::create_default();
    assert_eq!(eval_error(&mut session, "[1][5]"), DiagnosticKind::Runtime);
    assert_eq!(eval_error(&mut session, "[1][-1]"), DiagnosticKind::Runtime);
}

#[test]
fn logical_operators_short_circuit() {
    // The right-hand side would fail if it were evaluated.
    assert!(!eval("false && 1 / 0").is_truthy());
    assert!(eval("true || 1 / 0").is_truthy());
}

#[test]
fn skips_comments() {
    assert_eq!(expect_int(&eval("1 + /* two */ 2 // trailing")), 3);
}

#[test]
fn parsed_form_is_fully_parenthesised() {
    let session = Session::create_default();
    let node = session.parse("x = 1 + 2 * 3; f(x, [1, 2])[0]").expect("parse");
    assert_eq!(node.to_string(), "(x = (1 + (2 * 3))); f(x, [1, 2])[0]");

    let node = session.parse("-2 ^ 2").expect("parse");
    assert_eq!(node.to_string(), "(-(2 ^ 2))");
}

#[test]
fn dump_is_type_tagged() {
    let value = eval("[1, \"a\", 2.5, none]");
    assert_eq!(
        value.dump().as_deref(),
        Some("Array[Int(1), String(\"a\"), Float(2.5), None]")
    );

    let session = Session::create_default();
    let sqrt = session.get("sqrt").expect("prelude function");
    assert!(sqrt.dump().is_none());
    assert_eq!(sqrt.to_string(), "<builtin sqrt>");
}

#[test]
fn describes_user_bindings_in_definition_order() {
    let mut session = Session::create_default();
    assert_eq!(session.to_string(), "{}");
    session.eval_source("b = \"hi\"; a = 1").expect("assignments");
    assert_eq!(session.to_string(), "{b = String(\"hi\"), a = Int(1)}");
}

#[test]
fn deeply_nested_input_is_rejected_by_the_parser() {
    let mut session = Session::create_default();
    let negations = format!("{}1", "-".repeat(10_000));
    assert_eq!(eval_error(&mut session, &negations), DiagnosticKind::Parser);

    let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(eval_error(&mut session, &parens), DiagnosticKind::Parser);

    let arrays = format!("{}{}", "[".repeat(10_000), "]".repeat(10_000));
    assert_eq!(eval_error(&mut session, &arrays), DiagnosticKind::Parser);

    let chain = vec!["1"; 10_000].join("+");
    assert_eq!(eval_error(&mut session, &chain), DiagnosticKind::Parser);

    let err = session.parse(&negations).expect_err("too deep");
    assert!(err.to_string().contains("expression nested too deeply"));
}

#[test]
fn moderate_nesting_still_evaluates() {
    let parens = format!("{}7{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(expect_int(&eval(&parens)), 7);
    assert_eq!(expect_int(&eval(&format!("{}5", "-".repeat(50)))), 5);
    assert_eq!(expect_int(&eval(&vec!["1"; 60].join(" + "))), 60);
}
