//! Depth-first tree traversal.
//!
//! [`traverse`] walks a pooled tree in the child order defined by
//! [`Node::children`], calling [`Visitor::enter`] before a node's children
//! and [`Visitor::exit`] after them. Each call says which role the node
//! plays in its parent, so consumers do not need to know field layouts.
//!
//! Both callbacks default to no-ops; either can return [`VisitFlow::Stop`]
//! to end the walk.

use sable_pool::Pool;
use sable_stack::with_stack_guard;

use crate::{Node, NodeId};

/// Role of a node within its parent.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Relation {
    /// The root of the walk.
    None,
    Alternate,
    Argument,
    Arguments,
    Block,
    Body,
    Callee,
    Cases,
    Consequent,
    Declarations,
    Discriminant,
    Elements,
    Expression,
    Expressions,
    Finalizer,
    Handler,
    Id,
    Init,
    Key,
    Left,
    Object,
    Param,
    Params,
    Properties,
    Property,
    Right,
    Test,
    Update,
    Value,
}

impl Relation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "root",
            Self::Alternate => "alternate",
            Self::Argument => "argument",
            Self::Arguments => "arguments",
            Self::Block => "block",
            Self::Body => "body",
            Self::Callee => "callee",
            Self::Cases => "cases",
            Self::Consequent => "consequent",
            Self::Declarations => "declarations",
            Self::Discriminant => "discriminant",
            Self::Elements => "elements",
            Self::Expression => "expression",
            Self::Expressions => "expressions",
            Self::Finalizer => "finalizer",
            Self::Handler => "handler",
            Self::Id => "id",
            Self::Init => "init",
            Self::Key => "key",
            Self::Left => "left",
            Self::Object => "object",
            Self::Param => "param",
            Self::Params => "params",
            Self::Properties => "properties",
            Self::Property => "property",
            Self::Right => "right",
            Self::Test => "test",
            Self::Update => "update",
            Self::Value => "value",
        }
    }
}

/// Whether to keep walking.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum VisitFlow {
    Continue,
    Stop,
}

/// What a visitor sees at each node.
#[derive(Clone, Copy, Debug)]
pub struct Visit<'a> {
    pub id: NodeId,
    pub node: &'a Node,
    pub relation: Relation,
    pub parent: Option<NodeId>,
    /// Distance from the root of the walk.
    pub depth: usize,
}

/// Callbacks for [`traverse`].
pub trait Visitor {
    fn enter(&mut self, visit: Visit<'_>) -> VisitFlow {
        let _ = visit;
        VisitFlow::Continue
    }

    fn exit(&mut self, visit: Visit<'_>) -> VisitFlow {
        let _ = visit;
        VisitFlow::Continue
    }
}

/// A child handle did not resolve in the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("node {0:?} is not live in the pool")]
pub struct DanglingNode(pub NodeId);

/// Walk the tree under `root`, visiting every node exactly once.
///
/// Returns [`VisitFlow::Stop`] if a callback stopped the walk early.
pub fn traverse<V: Visitor + ?Sized>(
    pool: &Pool<Node>,
    root: NodeId,
    visitor: &mut V,
) -> Result<VisitFlow, DanglingNode> {
    walk_node(pool, root, Relation::None, None, 0, visitor)
}

fn walk_node<V: Visitor + ?Sized>(
    pool: &Pool<Node>,
    id: NodeId,
    relation: Relation,
    parent: Option<NodeId>,
    depth: usize,
    visitor: &mut V,
) -> Result<VisitFlow, DanglingNode> {
    with_stack_guard(|| {
        let node = pool.get(id).ok_or(DanglingNode(id))?;
        let visit = Visit {
            id,
            node,
            relation,
            parent,
            depth,
        };
        if visitor.enter(visit) == VisitFlow::Stop {
            return Ok(VisitFlow::Stop);
        }
        for (child_relation, child) in node.children() {
            if walk_node(pool, child, child_relation, Some(id), depth + 1, visitor)?
                == VisitFlow::Stop
            {
                return Ok(VisitFlow::Stop);
            }
        }
        Ok(visitor.exit(visit))
    })
}

#[cfg(test)]
mod tests;
