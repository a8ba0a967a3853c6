use pretty_assertions::assert_eq;
use sable_ir::{Position, TokenKind};

use super::{error, parse_with};
use crate::{ErrorKind, ParseOptions};

fn kind(source: &str) -> ErrorKind {
    error(source).kind()
}

#[test]
fn missing_semicolon_reports_the_token() {
    let err = error("a b");
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert_eq!(err.position(), Position::new(2, 1, 2));
    assert_eq!(
        err.token().map(|t| &t.kind),
        Some(&TokenKind::Ident("b".into()))
    );
    assert_eq!(
        err.to_string(),
        "unexpected token: unexpected identifier `b`, expected `;` at 1:2"
    );
}

#[test]
fn premature_end_of_input() {
    let err = error("(1 + 2");
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert!(err.token().is_none());
    assert_eq!(err.message, "unexpected end of input, expected `)`");

    assert_eq!(error("a +").message, "unexpected end of input, expected an expression");
    assert_eq!(error("{ a").message, "unexpected end of input, expected `}`");
    assert_eq!(
        error("try {}").message,
        "unexpected end of input, expected `catch` or `finally`"
    );
}

#[test]
fn misplaced_tokens() {
    assert_eq!(kind("}"), ErrorKind::Unexpected);
    assert_eq!(kind("var 1"), ErrorKind::Unexpected);
    assert_eq!(kind("a.1"), ErrorKind::Unexpected);
    assert_eq!(kind("f(a b)"), ErrorKind::Unexpected);
    assert_eq!(kind("[a b]"), ErrorKind::Unexpected);
    assert_eq!(kind("({a 1})"), ErrorKind::Unexpected);
    assert_eq!(kind("switch (x) { a }"), ErrorKind::Unexpected);
    assert_eq!(kind("debugger"), ErrorKind::Unexpected);
}

#[test]
fn parenthesized_identifier_is_not_a_label() {
    assert_eq!(error("(a): b").message, "unexpected `:`, expected `;`");
}

#[test]
fn unsupported_constructs_are_not_allowed() {
    for source in [
        "class A {}",
        "x => x",
        "function* g() {}",
        "x = function* () {}",
        "({ get x() {} })",
        "({ f() {} })",
        "yield x",
        "super.x",
        "import a",
    ] {
        assert_eq!(kind(source), ErrorKind::NotAllowed, "{source}");
    }
}

#[test]
fn restricted_productions() {
    assert_eq!(kind("switch (x) { default: default: }"), ErrorKind::NotAllowed);
    assert_eq!(kind("throw\nx"), ErrorKind::NotAllowed);
    assert_eq!(kind("for (var a, b in o) {}"), ErrorKind::NotAllowed);
    assert_eq!(kind("for (let a = 1, b of o) {}"), ErrorKind::NotAllowed);
}

#[test]
fn tokenizer_errors() {
    assert_eq!(kind("'abc"), ErrorKind::BadToken);
    assert_eq!(kind("1.2.3"), ErrorKind::BadToken);
    assert_eq!(kind(r"'\u0041'"), ErrorKind::BadToken);
    assert_eq!(kind("a # b"), ErrorKind::BadToken);
    assert_eq!(kind("x = /a/gg"), ErrorKind::NotAllowed);
}

#[test]
fn node_pool_limit() {
    let source = "a;".repeat(100);
    let options = ParseOptions::default().with_node_arena_limit(Some(1));
    let response = parse_with(&source, &options);
    let error = response.error().cloned().unwrap();
    assert_eq!(error.kind(), ErrorKind::OutOfMemory);
    // The 65th node is the identifier of the 33rd statement, at offset 64.
    assert_eq!(error.position().line, 1);
    assert!(error.position().offset >= 64, "{:?}", error.position());

    let report = response.free();
    assert_eq!(report.released, 0);
    assert_eq!(report.leaked, report.capacity);
}

#[test]
fn token_pool_limit() {
    let options = ParseOptions::default().with_token_arena_limit(Some(0));
    let response = parse_with("a", &options);
    assert_eq!(response.error().map(|e| e.kind()), Some(ErrorKind::OutOfMemory));
}

#[test]
fn render_matches_display() {
    let err = error("var = 1");
    let mut buf = [0u8; 128];
    let n = err.render(&mut buf);
    assert_eq!(&buf[..n], err.to_string().as_bytes());
}
