use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{parse_with, program, sexpr};
use crate::ParseOptions;

#[test]
fn empty_input() {
    assert_eq!(program(""), "(program)");
    assert_eq!(program("  // only a comment\n"), "(program)");
    assert_eq!(program(";;"), "(program empty empty)");
}

#[test]
fn variable_declarations() {
    assert_eq!(program("var a = 1, b;"), "(program (var (decl a 1) (decl b)))");
    assert_eq!(program("let x = [y]"), "(program (let (decl x (array y))))");
    assert_eq!(program("const k = a, m = b"), "(program (const (decl k a) (decl m b)))");
}

#[test]
fn if_else() {
    assert_eq!(program("if (a) b; else c;"), "(program (if a (expr b) (expr c)))");
    assert_eq!(
        program("if (a) if (b) c; else d"),
        "(program (if a (if b (expr c) (expr d))))"
    );
}

#[test]
fn three_clause_for() {
    assert_eq!(
        program("for (var i = 0; i < n; i++) {}"),
        "(program (for (var (decl i 0)) (< i n) (post++ i) (block)))"
    );
    assert_eq!(program("for (;;) {}"), "(program (for (block)))");
    assert_eq!(
        program("for (i = 0, j = 1; ; ) x;"),
        "(program (for (, (= i 0) (= j 1)) (expr x)))"
    );
}

#[test]
fn for_in_and_of() {
    assert_eq!(
        program("for (var k in o) f(k);"),
        "(program (for-in (var (decl k)) o (expr (call f k))))"
    );
    assert_eq!(program("for (k in o);"), "(program (for-in k o empty))");
    assert_eq!(program("for (a.b in c) {}"), "(program (for-in (. a b) c (block)))");
    assert_eq!(
        program("for (const v of list) {}"),
        "(program (for-of (const (decl v)) list (block)))"
    );
}

#[test]
fn in_is_an_operator_inside_brackets_of_a_for_head() {
    assert_eq!(
        program("for (var x = (a in b); x; ) {}"),
        "(program (for (var (decl x (in a b))) x (block)))"
    );
    assert_eq!(
        program("for (f(a in b); ; ) {}"),
        "(program (for (call f (in a b)) (block)))"
    );
    assert_eq!(
        program("for (x = function () { a in b }; ; ) {}"),
        "(program (for (= x (function (block (expr (in a b))))) (block)))"
    );
}

#[test]
fn while_and_do() {
    assert_eq!(program("while (a) a--"), "(program (while a (expr (post-- a))))");
    assert_eq!(
        program("do x++; while (x < 3)"),
        "(program (do (expr (post++ x)) (< x 3)))"
    );
    assert_eq!(
        program("do {} while (a); b"),
        "(program (do (block) a) (expr b))"
    );
}

#[test]
fn labels_and_jumps() {
    assert_eq!(
        program("outer: for (;;) { break outer; continue }"),
        "(program (label:outer (for (block break:outer continue))))"
    );
    assert_eq!(
        program("a: { break\na }"),
        "(program (label:a (block break (expr a))))"
    );
}

#[test]
fn return_before_a_line_break_has_no_argument() {
    assert_eq!(
        program("function f() { return\n42 }"),
        "(program (function-decl f (block (return) (expr 42))))"
    );
    assert_eq!(
        program("function f() { return 42 }"),
        "(program (function-decl f (block (return 42))))"
    );
    assert_eq!(
        program("function f() { return; }"),
        "(program (function-decl f (block (return))))"
    );
}

#[test]
fn throw_and_try() {
    assert_eq!(
        program("throw new Error('x')"),
        "(program (throw (new Error 'x')))"
    );
    assert_eq!(
        program("try { a } catch (e) { b } finally { c }"),
        "(program (try (block (expr a)) (catch e (block (expr b))) (block (expr c))))"
    );
    assert_eq!(
        program("try {} finally {}"),
        "(program (try (block) (block)))"
    );
}

#[test]
fn switch_clauses() {
    assert_eq!(
        program("switch (x) { case 1: a; break; default: b }"),
        "(program (switch x (case 1 (expr a) break) (default (expr b))))"
    );
    assert_eq!(
        program("switch (x) { case 1: case 2: }"),
        "(program (switch x (case 1) (case 2)))"
    );
}

#[test]
fn with_statement() {
    assert_eq!(program("with (o) f()"), "(program (with o (expr (call f))))");
}

#[test]
fn function_declarations() {
    assert_eq!(
        program("function add(a, b) { var c = a + b; return c }"),
        "(program (function-decl add a b (block (var (decl c (+ a b))) (return c))))"
    );
}

#[test]
fn automatic_semicolons() {
    assert_eq!(program("a\nb"), "(program (expr a) (expr b))");
    assert_eq!(program("{ a } b"), "(program (block (expr a)) (expr b))");
    assert_eq!(program("a = 1 /* c */ ; b"), "(program (expr (= a 1)) (expr b))");
}

#[test]
fn a_block_comment_with_a_newline_is_not_a_line_break() {
    // Only whitespace tokens carry the line-break flag.
    let response = super::parse_str("a /*\n*/ b");
    assert!(response.error().is_some());
}

const CORPUS: &str = "\
var s = 'it\\'s', n = 0x1F + 3.14e2;
function f(a, b) {
  // sum
  if (a > b) return a / 2 / b;
  for (var k in b) { s += k }
  return /ab+c/g.test(s) ? [a,, b] : { a: a, b };
}
outer: while (n--) { switch (n) { case 1: continue outer; default: break } }
";

fn corpus_tree(chunk_size: usize) -> String {
    let response = parse_with(CORPUS, &ParseOptions::default().with_chunk_size(chunk_size));
    if let Some(error) = response.error() {
        panic!("chunk size {chunk_size}: {error}");
    }
    sexpr(&response, response.root().unwrap())
}

#[test]
fn single_byte_chunks_give_the_same_tree() {
    assert_eq!(corpus_tree(1), corpus_tree(ParseOptions::default().chunk_size));
}

proptest! {
    #[test]
    fn tree_does_not_depend_on_chunk_size(chunk_size in 1usize..64) {
        prop_assert_eq!(corpus_tree(chunk_size), corpus_tree(4096));
    }
}
