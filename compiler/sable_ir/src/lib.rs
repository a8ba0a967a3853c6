//! Sable IR - shared vocabulary of the front end.
//!
//! This crate holds the types the tokenizer and the parser exchange:
//! - [`Position`] for source locations
//! - [`Token`] and its payloads, the closed [`Operator`] and [`Keyword`] sets
//! - the syntax tree ([`Node`], [`NodeKind`]) stored in a [`Pool`]
//! - the [`visit`] module that walks a tree in a fixed per-kind order
//!
//! # Design
//!
//! - **Pool-owned tree**: nodes live in a `Pool<Node>` and refer to their
//!   children through [`NodeId`] handles. Every handle appears under exactly
//!   one parent.
//! - **Closed sets**: operators, keywords, node kinds and child relations are
//!   plain enums; tables are `match`es, not maps.

pub mod ast;
mod keyword;
mod operator;
mod position;
mod token;
pub mod visit;

pub use ast::{
    AssignOp, BinaryOp, LiteralValue, LogicalOp, Node, NodeId, NodeKind, PropertyFlags, UnaryOp,
    UpdateOp, VarKind,
};
pub use keyword::Keyword;
pub use operator::Operator;
pub use position::Position;
pub use token::{CommentStyle, Number, NumberRepr, NumberValue, Quote, RegexpFlags, Token, TokenKind};
pub use visit::{traverse, DanglingNode, Relation, Visit, VisitFlow, Visitor};

pub use sable_pool::{Handle, Pool, PoolError};
pub use sable_str::{AllocError, SmallStr};
