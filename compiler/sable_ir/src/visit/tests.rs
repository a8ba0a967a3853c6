#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use sable_pool::Pool;

use super::*;
use crate::{NodeKind, SmallStr};

fn ident(pool: &mut Pool<Node>, name: &str) -> NodeId {
    pool.attain(Node::new(NodeKind::Identifier {
        name: SmallStr::from(name),
    }))
    .unwrap()
}

fn add(pool: &mut Pool<Node>, kind: NodeKind) -> NodeId {
    pool.attain(Node::new(kind)).unwrap()
}

/// Records `enter`/`exit` events as `(event, relation, kind, depth)`.
#[derive(Default)]
struct Recorder {
    events: Vec<(&'static str, Relation, &'static str, usize)>,
    stop_at: Option<&'static str>,
}

impl Visitor for Recorder {
    fn enter(&mut self, visit: Visit<'_>) -> VisitFlow {
        let name = visit.node.kind.name();
        self.events.push(("enter", visit.relation, name, visit.depth));
        if self.stop_at == Some(name) {
            VisitFlow::Stop
        } else {
            VisitFlow::Continue
        }
    }

    fn exit(&mut self, visit: Visit<'_>) -> VisitFlow {
        self.events
            .push(("exit", visit.relation, visit.node.kind.name(), visit.depth));
        VisitFlow::Continue
    }
}

#[test]
fn if_visits_test_consequent_alternate() {
    let mut pool = Pool::new();
    let test = ident(&mut pool, "c");
    let consequent = add(&mut pool, NodeKind::Empty);
    let alternate = add(&mut pool, NodeKind::This);
    let root = add(
        &mut pool,
        NodeKind::If {
            test,
            consequent,
            alternate: Some(alternate),
        },
    );

    let mut recorder = Recorder::default();
    let flow = traverse(&pool, root, &mut recorder).unwrap();

    assert_eq!(flow, VisitFlow::Continue);
    assert_eq!(
        recorder.events,
        vec![
            ("enter", Relation::None, "If", 0),
            ("enter", Relation::Test, "Identifier", 1),
            ("exit", Relation::Test, "Identifier", 1),
            ("enter", Relation::Consequent, "Empty", 1),
            ("exit", Relation::Consequent, "Empty", 1),
            ("enter", Relation::Alternate, "This", 1),
            ("exit", Relation::Alternate, "This", 1),
            ("exit", Relation::None, "If", 0),
        ]
    );
}

#[test]
fn array_holes_are_skipped() {
    let mut pool = Pool::new();
    let a = ident(&mut pool, "a");
    let b = ident(&mut pool, "b");
    let root = add(
        &mut pool,
        NodeKind::Array {
            elements: vec![Some(a), None, Some(b)],
        },
    );

    let node = pool.get(root).unwrap();
    let children: Vec<_> = node.children().into_iter().collect();
    assert_eq!(children, vec![(Relation::Elements, a), (Relation::Elements, b)]);
}

#[test]
fn parent_is_reported() {
    struct Parents(Vec<Option<NodeId>>);
    impl Visitor for Parents {
        fn enter(&mut self, visit: Visit<'_>) -> VisitFlow {
            self.0.push(visit.parent);
            VisitFlow::Continue
        }
    }

    let mut pool = Pool::new();
    let callee = ident(&mut pool, "f");
    let arg = ident(&mut pool, "x");
    let root = add(
        &mut pool,
        NodeKind::Call {
            callee,
            arguments: vec![arg],
        },
    );

    let mut parents = Parents(Vec::new());
    traverse(&pool, root, &mut parents).unwrap();
    assert_eq!(parents.0, vec![None, Some(root), Some(root)]);
}

#[test]
fn stop_ends_walk_early() {
    let mut pool = Pool::new();
    let left = add(&mut pool, NodeKind::This);
    let right = ident(&mut pool, "r");
    let root = add(
        &mut pool,
        NodeKind::Logical {
            op: crate::LogicalOp::And,
            left,
            right,
        },
    );

    let mut recorder = Recorder {
        stop_at: Some("This"),
        ..Recorder::default()
    };
    let flow = traverse(&pool, root, &mut recorder).unwrap();

    assert_eq!(flow, VisitFlow::Stop);
    assert_eq!(recorder.events.len(), 2);
}

#[test]
fn reserved_kinds_are_walked() {
    let mut pool = Pool::new();
    let param = ident(&mut pool, "x");
    let arg = ident(&mut pool, "x");
    let yielded = add(&mut pool, NodeKind::Yield { argument: Some(arg) });
    let root = add(
        &mut pool,
        NodeKind::Arrow {
            params: vec![param],
            body: yielded,
        },
    );

    let mut recorder = Recorder::default();
    traverse(&pool, root, &mut recorder).unwrap();
    let entered: Vec<_> = recorder
        .events
        .iter()
        .filter(|e| e.0 == "enter")
        .map(|e| (e.1, e.2))
        .collect();
    assert_eq!(
        entered,
        vec![
            (Relation::None, "Arrow"),
            (Relation::Params, "Identifier"),
            (Relation::Body, "Yield"),
            (Relation::Argument, "Identifier"),
        ]
    );
}

#[test]
fn dangling_child_is_an_error() {
    let mut pool = Pool::new();
    let gone = ident(&mut pool, "gone");
    pool.release(gone).unwrap();
    let root = add(&mut pool, NodeKind::Expression { expression: gone });

    let mut recorder = Recorder::default();
    assert_eq!(
        traverse(&pool, root, &mut recorder),
        Err(DanglingNode(gone))
    );
}

#[test]
fn deep_chains_do_not_overflow() {
    let mut pool = Pool::new();
    let mut id = add(&mut pool, NodeKind::This);
    for _ in 0..50_000 {
        id = add(
            &mut pool,
            NodeKind::Unary {
                op: crate::UnaryOp::Not,
                argument: id,
            },
        );
    }

    struct Count(usize);
    impl Visitor for Count {
        fn exit(&mut self, _: Visit<'_>) -> VisitFlow {
            self.0 += 1;
            VisitFlow::Continue
        }
    }
    let mut count = Count(0);
    traverse(&pool, id, &mut count).unwrap();
    assert_eq!(count.0, 50_001);
}
