use pretty_assertions::assert_eq;

use super::{expr, program};

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(expr("a + b * c"), "(+ a (* b c))");
    assert_eq!(expr("a * b + c"), "(+ (* a b) c)");
    assert_eq!(expr("a - b - c"), "(- (- a b) c)");
    assert_eq!(expr("a == b + c"), "(== a (+ b c))");
    assert_eq!(expr("a < b == c"), "(== (< a b) c)");
}

#[test]
fn assignment_and_logical_associate_right() {
    assert_eq!(expr("a = b = c"), "(= a (= b c))");
    assert_eq!(expr("a += b -= 1"), "(+= a (-= b 1))");
    assert_eq!(expr("a || b || c"), "(|| a (|| b c))");
    assert_eq!(expr("a && b || c"), "(&& a (|| b c))");
    assert_eq!(expr("x = a || b"), "(= x (|| a b))");
}

#[test]
fn conditional() {
    assert_eq!(expr("a ? b : c"), "(? a b c)");
    assert_eq!(expr("a ? b : c ? d : e"), "(? a b (? c d e))");
    assert_eq!(expr("x = a ? b : c"), "(= x (? a b c))");
    assert_eq!(expr("a ? b = 1 : c"), "(? a (= b 1) c)");
    assert_eq!(expr("a || b ? c : d"), "(? (|| a b) c d)");
}

#[test]
fn prefix_operators() {
    assert_eq!(expr("-a + b"), "(- (+ a b))");
    assert_eq!(expr("-a * b"), "(- (* a b))");
    assert_eq!(expr("!a.b"), "(! (. a b))");
    assert_eq!(expr("typeof a + 1"), "(typeof (+ a 1))");
    assert_eq!(expr("!a && b"), "(! (&& a b))");
    assert_eq!(expr("-a = b"), "(- (= a b))");
    assert_eq!(expr("delete o[k]"), "(delete ([] o k))");
    assert_eq!(expr("void 0"), "(void 0)");
    assert_eq!(expr("~-x"), "(~ (- x))");
}

#[test]
fn update_operators() {
    assert_eq!(expr("++a"), "(pre++ a)");
    assert_eq!(expr("a--"), "(post-- a)");
    assert_eq!(expr("-a++"), "(- (post++ a))");
    assert_eq!(expr("a++ + ++b"), "(+ (post++ a) (pre++ b))");
    assert_eq!(expr("++a + b"), "(pre++ (+ a b))");
}

#[test]
fn postfix_after_line_break_starts_a_new_statement() {
    assert_eq!(program("a\n++b"), "(program (expr a) (expr (pre++ b)))");
}

#[test]
fn calls_and_members() {
    assert_eq!(expr("f()"), "(call f)");
    assert_eq!(expr("f(a, b = 1)"), "(call f a (= b 1))");
    assert_eq!(expr("a.b(c)[d]"), "([] (call (. a b) c) d)");
    assert_eq!(expr("a.default.if"), "(. (. a default) if)");
    assert_eq!(expr("a[b, c]"), "([] a (, b c))");
}

#[test]
fn new_takes_the_first_argument_list() {
    assert_eq!(expr("new A"), "(new A)");
    assert_eq!(expr("new A.B(x)"), "(new (. A B) x)");
    assert_eq!(expr("new A().b"), "(. (new A) b)");
    assert_eq!(expr("new A(1)(2)"), "(call (new A 1) 2)");
}

#[test]
fn slash_after_an_operand_is_division() {
    assert_eq!(expr("a / b / c"), "(/ (/ a b) c)");
    assert_eq!(expr("(a) / 2 / i"), "(/ (/ a 2) i)");
    assert_eq!(expr("a /= 2"), "(/= a 2)");
    assert_eq!(expr("f() / g()"), "(/ (call f) (call g))");
}

#[test]
fn slash_in_value_position_is_a_regexp() {
    assert_eq!(expr("x = /ab+c/gi"), "(= x /ab+c/gi)");
    assert_eq!(expr("/=/.test(s)"), "(call (. /=/ test) s)");
    assert_eq!(expr(r"f(/a\/b/, 1 / 2)"), r"(call f /a\/b/ (/ 1 2))");
    assert_eq!(expr("a ? /x/ : /y/m"), "(? a /x/ /y/m)");
}

#[test]
fn comma_makes_a_sequence() {
    assert_eq!(expr("a, b, c"), "(, a b c)");
    assert_eq!(expr("(a, b)"), "(, a b)");
    assert_eq!(expr("a = 1, b = 2"), "(, (= a 1) (= b 2))");
}

#[test]
fn literals() {
    assert_eq!(expr("0x1F"), "31");
    assert_eq!(expr("3.14e2"), "314.0");
    assert_eq!(expr("'it'"), "'it'");
    assert_eq!(expr("this"), "this");
    assert_eq!(expr("true"), "true");
}

#[test]
fn arrays_keep_holes() {
    assert_eq!(expr("[]"), "(array)");
    assert_eq!(expr("[1,,2]"), "(array 1 _ 2)");
    assert_eq!(expr("[1, 2,]"), "(array 1 2)");
    assert_eq!(expr("[,]"), "(array _)");
    assert_eq!(expr("[[a], b in c]"), "(array (array a) (in b c))");
}

#[test]
fn object_literals() {
    assert_eq!(expr("({})"), "(object)");
    assert_eq!(
        expr("({a: 1, 'b': 2, 3: c, [d]: 4, e, if: 5,})"),
        "(object (prop a 1) (prop 'b' 2) (prop 3 c) (prop[] d 4) (shorthand e e) (prop if 5))"
    );
    assert_eq!(expr("({get: 1, set})"), "(object (prop get 1) (shorthand set set))");
}

#[test]
fn function_expressions() {
    assert_eq!(expr("x = function () {}"), "(= x (function (block)))");
    assert_eq!(
        expr("(function f(a, b) { return a + b })"),
        "(function f a b (block (return (+ a b))))"
    );
}
