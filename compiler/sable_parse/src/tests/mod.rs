//! Parser tests.
//!
//! Trees are compared as s-expressions: leaves print as their name or
//! value, everything else as `(head children...)` in traversal order.
//! Array holes print as `_`.
//!
//! - `expressions`: precedence, associativity, regexp/division, literals
//! - `statements`: every statement form, ASI and chunking
//! - `errors`: error kinds and messages
//! - `teardown`: traversal and pool accounting

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod errors;
mod expressions;
mod statements;
mod teardown;

use sable_ir::{LiteralValue, Node, NodeId, NodeKind, PropertyFlags};
use sable_lexer::SliceSource;

use crate::{parse, ParseError, ParseOptions, ParseResponse};

fn parse_with(source: &str, options: &ParseOptions) -> ParseResponse {
    let mut bytes = SliceSource::new(source.as_bytes());
    parse(&mut bytes, options)
}

fn parse_str(source: &str) -> ParseResponse {
    parse_with(source, &ParseOptions::default())
}

/// The whole program as an s-expression.
fn program(source: &str) -> String {
    let response = parse_str(source);
    if let Some(error) = response.error() {
        panic!("{source:?} failed: {error}");
    }
    sexpr(&response, response.root().unwrap())
}

/// The expression of a single expression statement.
fn expr(source: &str) -> String {
    let response = parse_str(source);
    if let Some(error) = response.error() {
        panic!("{source:?} failed: {error}");
    }
    let root = response.node(response.root().unwrap()).unwrap();
    let NodeKind::Program { body } = &root.kind else {
        panic!("root is {}", root.kind.name());
    };
    assert_eq!(body.len(), 1, "{source:?} has {} statements", body.len());
    match &response.node(body[0]).unwrap().kind {
        NodeKind::Expression { expression } => sexpr(&response, *expression),
        other => panic!("{source:?} is a {} statement", other.name()),
    }
}

fn error(source: &str) -> ParseError {
    let response = parse_str(source);
    assert!(response.root().is_none());
    response
        .error()
        .cloned()
        .unwrap_or_else(|| panic!("{source:?} parsed"))
}

fn sexpr(response: &ParseResponse, id: NodeId) -> String {
    let node = response.node(id).expect("dangling node");
    let head = head(node);
    match &node.kind {
        NodeKind::Identifier { .. }
        | NodeKind::This
        | NodeKind::Literal { .. }
        | NodeKind::Empty
        | NodeKind::Break { .. }
        | NodeKind::Continue { .. } => return head,
        _ => {}
    }

    let children: Vec<String> = match &node.kind {
        NodeKind::Array { elements } => elements
            .iter()
            .map(|e| e.map_or_else(|| "_".to_string(), |id| sexpr(response, id)))
            .collect(),
        _ => node
            .children()
            .iter()
            .map(|&(_, child)| sexpr(response, child))
            .collect(),
    };
    if children.is_empty() {
        format!("({head})")
    } else {
        format!("({head} {})", children.join(" "))
    }
}

fn head(node: &Node) -> String {
    let with_label = |name: &str, label: &Option<sable_ir::SmallStr>| match label {
        Some(label) => format!("{name}:{label}"),
        None => name.to_string(),
    };
    match &node.kind {
        NodeKind::Identifier { name } => name.to_string(),
        NodeKind::This => "this".into(),
        NodeKind::Literal { value } => match value {
            LiteralValue::String { value, .. } => format!("'{value}'"),
            LiteralValue::Number(number) => number.value.to_string(),
            LiteralValue::Regexp { body, flags } => format!("/{body}/{flags}"),
        },
        NodeKind::Empty => "empty".into(),
        NodeKind::Break { label } => with_label("break", label),
        NodeKind::Continue { label } => with_label("continue", label),
        NodeKind::Labeled { label, .. } => format!("label:{label}"),
        NodeKind::Program { .. } => "program".into(),
        NodeKind::Block { .. } => "block".into(),
        NodeKind::Expression { .. } => "expr".into(),
        NodeKind::If { .. } => "if".into(),
        NodeKind::With { .. } => "with".into(),
        NodeKind::Switch { .. } => "switch".into(),
        NodeKind::CaseClause { test, .. } => {
            if test.is_some() { "case" } else { "default" }.into()
        }
        NodeKind::Return { .. } => "return".into(),
        NodeKind::Throw { .. } => "throw".into(),
        NodeKind::Try { .. } => "try".into(),
        NodeKind::CatchClause { .. } => "catch".into(),
        NodeKind::While { .. } => "while".into(),
        NodeKind::DoWhile { .. } => "do".into(),
        NodeKind::For { .. } => "for".into(),
        NodeKind::ForIn { .. } => "for-in".into(),
        NodeKind::ForOf { .. } => "for-of".into(),
        NodeKind::FunctionDecl { .. } => "function-decl".into(),
        NodeKind::Function { .. } => "function".into(),
        NodeKind::Arrow { .. } => "arrow".into(),
        NodeKind::VarDecl { kind, .. } => kind.as_str().into(),
        NodeKind::VarDeclarator { .. } => "decl".into(),
        NodeKind::Array { .. } => "array".into(),
        NodeKind::Object { .. } => "object".into(),
        NodeKind::Property { flags, .. } => {
            if flags.contains(PropertyFlags::COMPUTED) {
                "prop[]".into()
            } else if flags.contains(PropertyFlags::SHORTHAND) {
                "shorthand".into()
            } else {
                "prop".into()
            }
        }
        NodeKind::Sequence { .. } => ",".into(),
        NodeKind::Unary { op, .. } => op.as_symbol().into(),
        NodeKind::Binary { op, .. } => op.as_symbol().into(),
        NodeKind::Logical { op, .. } => op.as_symbol().into(),
        NodeKind::Assignment { op, .. } => op.as_symbol().into(),
        NodeKind::Update { op, prefix, .. } => {
            format!("{}{}", if *prefix { "pre" } else { "post" }, op.as_symbol())
        }
        NodeKind::Conditional { .. } => "?".into(),
        NodeKind::New { .. } => "new".into(),
        NodeKind::Call { .. } => "call".into(),
        NodeKind::Member { computed, .. } => if *computed { "[]" } else { "." }.into(),
        NodeKind::Yield { .. } => "yield".into(),
    }
}
