//! # 语言行为测试
//!
//! 通过 [`Session`] 运行完整源码，检查输出与错误。

use lox_runtime::{LoxError, RuntimeError, Session, Value};

/// 运行源码，返回输出和可能的错误
fn run(source: &str) -> (String, Option<LoxError>) {
    let mut session = Session::new(Vec::new());
    let result = session.run(source);
    let output = String::from_utf8(session.into_output()).unwrap();
    (output, result.err())
}

fn output_of(source: &str) -> String {
    let (output, err) = run(source);
    assert!(err.is_none(), "unexpected error: {}", err.unwrap());
    output
}

fn runtime_error_of(source: &str) -> (String, RuntimeError) {
    match run(source) {
        (output, Some(LoxError::Runtime(e))) => (output, e),
        other => panic!("expected runtime error, got {:?}", other),
    }
}

// -------------------------------------------------------------------------
// 表达式
// -------------------------------------------------------------------------

#[test]
fn test_arithmetic() {
    assert_eq!(output_of("print 1 + 2;"), "3\n");
    assert_eq!(output_of("print 1 + 2 * 3 - 4 / 2;"), "5\n");
    assert_eq!(output_of("print (1 + 2) * 3;"), "9\n");
    assert_eq!(output_of("print 10 - 2 - 3;"), "5\n");
    assert_eq!(output_of("print 7 / 2;"), "3.5\n");
    assert_eq!(output_of("print -(-3);"), "3\n");
}

#[test]
fn test_number_display() {
    insta::assert_snapshot!(output_of("print 1.0; print 0.1 + 0.2; print 1 / 0; print -1 / 0; print 0 / 0;"), @r"
    1
    0.30000000000000004
    Infinity
    -Infinity
    NaN
    ");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(output_of("print \"foo\" + \"bar\";"), "foobar\n");
    assert_eq!(output_of("var s = \"a\"; s = s + s; print s;"), "aa\n");
}

#[test]
fn test_truthiness_and_equality() {
    insta::assert_snapshot!(output_of(r#"
print !nil;
print !0;
print !"";
print nil == nil;
print nil == false;
print 1 == 1;
print "a" == "a";
print 1 == "1";
print 3 != 4;
print 0 / 0 == 0 / 0;
"#), @r"
    true
    false
    false
    true
    false
    true
    true
    false
    true
    false
    ");
}

#[test]
fn test_comparison() {
    assert_eq!(
        output_of("print 1 < 2; print 2 <= 2; print 3 > 4; print 4 >= 5;"),
        "true\ntrue\nfalse\nfalse\n"
    );
}

#[test]
fn test_print_nil_and_booleans() {
    assert_eq!(
        output_of("print nil; print true; print false;"),
        "nil\ntrue\nfalse\n"
    );
}

// -------------------------------------------------------------------------
// 变量与作用域
// -------------------------------------------------------------------------

#[test]
fn test_block_scoping() {
    assert_eq!(
        output_of("var a = 1; { var a = 2; print a; } print a;"),
        "2\n1\n"
    );
}

#[test]
fn test_nested_scopes_and_assignment() {
    insta::assert_snapshot!(output_of(r#"
var a = "global a";
var b = "global b";
var c = "global c";
{
  var a = "outer a";
  var b = "outer b";
  {
    var a = "inner a";
    print a;
    print b;
    print c;
  }
  print a;
  print b;
  print c;
}
print a;
print b;
print c;
"#), @r"
    inner a
    outer b
    global c
    outer a
    outer b
    global c
    global a
    global b
    global c
    ");
}

#[test]
fn test_assignment_reaches_enclosing_scope() {
    assert_eq!(output_of("var a = 1; { a = 2; } print a;"), "2\n");
}

#[test]
fn test_uninitialized_variable_is_nil() {
    assert_eq!(output_of("var a; print a;"), "nil\n");
}

#[test]
fn test_redefinition_overwrites() {
    assert_eq!(
        output_of("var a = \"before\"; var a = \"after\"; print a;"),
        "after\n"
    );
}

#[test]
fn test_assignment_is_an_expression() {
    assert_eq!(output_of("var a = 1; print a = 2; print a;"), "2\n2\n");
    assert_eq!(
        output_of("var a; var b; a = b = 3; print a; print b;"),
        "3\n3\n"
    );
}

#[test]
fn test_initializer_sees_outer_binding() {
    assert_eq!(output_of("var a = 1; { var a = a + 1; print a; }"), "2\n");
}

// -------------------------------------------------------------------------
// 运行时错误
// -------------------------------------------------------------------------

#[test]
fn test_undefined_variable() {
    let (output, err) = runtime_error_of("print 1;\nprint missing;\nprint 2;");
    assert_eq!(output, "1\n");
    assert_eq!(err.report(), "Undefined variable 'missing'.\n[line 2]");
}

#[test]
fn test_assignment_to_undefined() {
    let (_, err) = runtime_error_of("x = 1;");
    assert_eq!(err.to_string(), "Undefined variable 'x'.");
}

#[test]
fn test_type_errors() {
    let (_, err) = runtime_error_of("print -\"a\";");
    assert_eq!(err.to_string(), "Operand must be a number.");

    let (_, err) = runtime_error_of("print 1 < \"2\";");
    assert_eq!(err.to_string(), "Operands must be numbers.");

    let (_, err) = runtime_error_of("print 1 + \"a\";");
    assert_eq!(
        err.to_string(),
        "Operands must be two numbers or two strings."
    );

    let (_, err) = runtime_error_of("print nil * 2;");
    assert_eq!(err.to_string(), "Operands must be numbers.");
}

#[test]
fn test_runtime_error_inside_block_keeps_globals() {
    let mut session = Session::new(Vec::new());
    assert!(session.run("var a = 1; { var a = 2; print b; }").is_err());
    assert!(session.had_runtime_error());

    // 出错的块已退出，后续运行看到的是全局 `a`
    session.run("print a;").unwrap();
    let output = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(output, "1\n");
}

// -------------------------------------------------------------------------
// 静态错误
// -------------------------------------------------------------------------

#[test]
fn test_syntax_error_prevents_execution() {
    let (output, err) = run("print 1;\n(1 + 2");
    assert_eq!(output, "");
    match err {
        Some(LoxError::Static(d)) => {
            insta::assert_snapshot!(d.to_string(), @"[line 2] Error at end: Expect ')' after expression.");
        }
        other => panic!("expected static error, got {:?}", other),
    }
}

#[test]
fn test_all_independent_errors_reported() {
    let (output, err) = run("print 1 +;\nvar = 2;\nprint \"ok\";\n{ print 3;");
    assert_eq!(output, "");
    let Some(LoxError::Static(d)) = err else {
        panic!("expected static error");
    };
    insta::assert_snapshot!(d.to_string(), @r"
    [line 1] Error at ';': Expected expression.
    [line 2] Error at '=': Expect variable name.
    [line 4] Error at end: Expect '}' after block.
    ");
}

#[test]
fn test_lexical_and_syntax_errors_together() {
    let (_, err) = run("print \"open;\nvar x = ;");
    let Some(LoxError::Static(d)) = err else {
        panic!("expected static error");
    };
    assert!(d.iter().any(|e| e.message == "Unterminated string."));
}

// -------------------------------------------------------------------------
// 会话
// -------------------------------------------------------------------------

#[test]
fn test_running_twice_is_idempotent_for_output() {
    let source = "var a = 1; { var b = a + 1; print b; } print a;";
    assert_eq!(output_of(source), output_of(source));

    let mut session = Session::new(Vec::new());
    session.run(source).unwrap();
    session.run(source).unwrap();
    let output = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(output, "2\n1\n2\n1\n");
}

#[test]
fn test_repl_state_persists_across_lines() {
    let mut session = Session::new(Vec::new());
    assert_eq!(
        session.run_repl_line("var greeting = \"hi\";").unwrap(),
        None
    );
    assert!(session.run_repl_line("greeting = ;").is_err());
    assert!(session.had_error());
    session.reset_error();

    assert_eq!(
        session.run_repl_line("greeting + \"!\"").unwrap(),
        Some(Value::from("hi!"))
    );
    assert_eq!(session.run_repl_line("print greeting;").unwrap(), None);
    assert!(!session.had_error());

    let output = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(output, "hi\n");
}
