use pretty_assertions::assert_eq;
use sable_ir::{NodeKind, Relation, Visit, VisitFlow, Visitor};

use super::{parse_str, parse_with};
use crate::ParseOptions;

#[derive(Default)]
struct Counter {
    entered: usize,
    exited: usize,
    relations: Vec<Relation>,
    max_depth: usize,
}

impl Visitor for Counter {
    fn enter(&mut self, visit: Visit<'_>) -> VisitFlow {
        self.entered += 1;
        self.relations.push(visit.relation);
        self.max_depth = self.max_depth.max(visit.depth);
        VisitFlow::Continue
    }

    fn exit(&mut self, _visit: Visit<'_>) -> VisitFlow {
        self.exited += 1;
        VisitFlow::Continue
    }
}

#[test]
fn traversal_reports_relations_in_child_order() {
    let response = parse_str("if (a) b; else c");
    let mut counter = Counter::default();
    assert_eq!(response.traverse(&mut counter), Ok(VisitFlow::Continue));
    assert_eq!(
        counter.relations,
        [
            Relation::None,
            Relation::Body,
            Relation::Test,
            Relation::Consequent,
            Relation::Expression,
            Relation::Alternate,
            Relation::Expression,
        ]
    );
    assert_eq!(counter.entered, counter.exited);
    assert_eq!(counter.max_depth, 3);
}

#[test]
fn visitor_can_stop_early() {
    struct FirstIdentifier(Option<String>);

    impl Visitor for FirstIdentifier {
        fn enter(&mut self, visit: Visit<'_>) -> VisitFlow {
            if let NodeKind::Identifier { name } = &visit.node.kind {
                self.0 = Some(name.to_string());
                return VisitFlow::Stop;
            }
            VisitFlow::Continue
        }
    }

    let response = parse_str("f(x + y)");
    let mut first = FirstIdentifier(None);
    assert_eq!(response.traverse(&mut first), Ok(VisitFlow::Stop));
    assert_eq!(first.0.as_deref(), Some("f"));
}

#[test]
fn failed_parse_has_nothing_to_walk() {
    let response = parse_str("a +");
    let mut counter = Counter::default();
    assert_eq!(response.traverse(&mut counter), Ok(VisitFlow::Continue));
    assert_eq!(counter.entered, 0);
}

#[test]
fn free_releases_every_node() {
    let response = parse_str("var a = [1, 2, {b: c}];\nfunction f(x) { return x ? a : /r/ }");
    let mut counter = Counter::default();
    response.traverse(&mut counter).unwrap();
    let live = response.nodes().live();
    assert_eq!(counter.entered, live);

    let report = response.free();
    assert_eq!(report.released, live);
    assert_eq!(report.leaked, 0);
    assert_eq!(report.free_slots, report.capacity);
}

#[test]
fn free_counts_fragments_of_a_failed_parse() {
    let response = parse_str("var a = [1, 2,");
    assert!(response.root().is_none());
    let report = response.free();
    assert_eq!(report.released, 0);
    // `a`, `1` and `2` were built before the error.
    assert_eq!(report.leaked, 3);
}

#[test]
fn labels_do_not_leave_their_identifier_behind() {
    let report = parse_str("here: for (;;) break here").free();
    assert_eq!(report.leaked, 0);
}

#[test]
fn deep_nesting_parses_and_frees() {
    const DEPTH: usize = 10_000;
    let source = format!("{}{}", "[".repeat(DEPTH), "]".repeat(DEPTH));
    let response = parse_with(&source, &ParseOptions::default());
    assert!(response.is_ok(), "{:?}", response.error());

    let mut counter = Counter::default();
    response.traverse(&mut counter).unwrap();
    // Program, expression statement, then the arrays.
    assert_eq!(counter.max_depth, DEPTH + 1);

    let report = response.free();
    assert_eq!(report.released, DEPTH + 2);
    assert_eq!(report.leaked, 0);
}
