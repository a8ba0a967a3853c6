//! Syntax tree.
//!
//! Every node lives in a `Pool<Node>` and names its children by [`NodeId`].
//! The tree is strict: a handle is stored under exactly one parent and
//! nothing points back up. Child sequences are plain `Vec`s owned by the
//! parent and dropped when the parent is released.

mod operators;

use bitflags::bitflags;
use sable_pool::Handle;
use sable_str::SmallStr;
use smallvec::SmallVec;

use crate::visit::Relation;
use crate::{Number, Quote, RegexpFlags};

pub use operators::{AssignOp, BinaryOp, LogicalOp, UnaryOp, UpdateOp};

/// Handle to a node in the node pool.
pub type NodeId = Handle<Node>;

/// A syntax node.
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// Set when the expression was written inside grouping parentheses.
    pub parenthesized: bool,
}

impl Node {
    #[inline]
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            parenthesized: false,
        }
    }

    /// Children in traversal order, each tagged with its role.
    ///
    /// Optional children that are absent and array holes are skipped.
    pub fn children(&self) -> SmallVec<[(Relation, NodeId); 4]> {
        let mut out = SmallVec::new();
        let mut one = |relation: Relation, id: NodeId| out.push((relation, id));
        match &self.kind {
            NodeKind::Program { body } | NodeKind::Block { body } => {
                body.iter().for_each(|&id| one(Relation::Body, id));
            }
            NodeKind::Empty
            | NodeKind::Break { .. }
            | NodeKind::Continue { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::This
            | NodeKind::Literal { .. } => {}
            NodeKind::Expression { expression } => one(Relation::Expression, *expression),
            NodeKind::If {
                test,
                consequent,
                alternate,
            } => {
                one(Relation::Test, *test);
                one(Relation::Consequent, *consequent);
                if let Some(alternate) = alternate {
                    one(Relation::Alternate, *alternate);
                }
            }
            NodeKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                one(Relation::Test, *test);
                one(Relation::Consequent, *consequent);
                one(Relation::Alternate, *alternate);
            }
            NodeKind::Labeled { body, .. } => one(Relation::Body, *body),
            NodeKind::With { object, body } => {
                one(Relation::Object, *object);
                one(Relation::Body, *body);
            }
            NodeKind::Switch {
                discriminant,
                cases,
            } => {
                one(Relation::Discriminant, *discriminant);
                cases.iter().for_each(|&id| one(Relation::Cases, id));
            }
            NodeKind::CaseClause { test, consequent } => {
                if let Some(test) = test {
                    one(Relation::Test, *test);
                }
                consequent
                    .iter()
                    .for_each(|&id| one(Relation::Consequent, id));
            }
            NodeKind::Return { argument } | NodeKind::Yield { argument } => {
                if let Some(argument) = argument {
                    one(Relation::Argument, *argument);
                }
            }
            NodeKind::Throw { argument }
            | NodeKind::Unary { argument, .. }
            | NodeKind::Update { argument, .. } => one(Relation::Argument, *argument),
            NodeKind::Try {
                block,
                handler,
                finalizer,
            } => {
                one(Relation::Block, *block);
                if let Some(handler) = handler {
                    one(Relation::Handler, *handler);
                }
                if let Some(finalizer) = finalizer {
                    one(Relation::Finalizer, *finalizer);
                }
            }
            NodeKind::CatchClause { param, body } => {
                one(Relation::Param, *param);
                one(Relation::Body, *body);
            }
            NodeKind::While { test, body } => {
                one(Relation::Test, *test);
                one(Relation::Body, *body);
            }
            NodeKind::DoWhile { body, test } => {
                one(Relation::Body, *body);
                one(Relation::Test, *test);
            }
            NodeKind::For {
                init,
                test,
                update,
                body,
            } => {
                if let Some(init) = init {
                    one(Relation::Init, *init);
                }
                if let Some(test) = test {
                    one(Relation::Test, *test);
                }
                if let Some(update) = update {
                    one(Relation::Update, *update);
                }
                one(Relation::Body, *body);
            }
            NodeKind::ForIn { left, right, body } | NodeKind::ForOf { left, right, body } => {
                one(Relation::Left, *left);
                one(Relation::Right, *right);
                one(Relation::Body, *body);
            }
            NodeKind::FunctionDecl { id, params, body } => {
                one(Relation::Id, *id);
                params.iter().for_each(|&p| one(Relation::Params, p));
                one(Relation::Body, *body);
            }
            NodeKind::Function { id, params, body } => {
                if let Some(id) = id {
                    one(Relation::Id, *id);
                }
                params.iter().for_each(|&p| one(Relation::Params, p));
                one(Relation::Body, *body);
            }
            NodeKind::Arrow { params, body } => {
                params.iter().for_each(|&p| one(Relation::Params, p));
                one(Relation::Body, *body);
            }
            NodeKind::VarDecl { declarations, .. } => {
                declarations
                    .iter()
                    .for_each(|&d| one(Relation::Declarations, d));
            }
            NodeKind::VarDeclarator { id, init } => {
                one(Relation::Id, *id);
                if let Some(init) = init {
                    one(Relation::Init, *init);
                }
            }
            NodeKind::Array { elements } => {
                elements
                    .iter()
                    .flatten()
                    .for_each(|&e| one(Relation::Elements, e));
            }
            NodeKind::Object { properties } => {
                properties
                    .iter()
                    .for_each(|&p| one(Relation::Properties, p));
            }
            NodeKind::Property { key, value, .. } => {
                one(Relation::Key, *key);
                one(Relation::Value, *value);
            }
            NodeKind::Sequence { expressions } => {
                expressions
                    .iter()
                    .for_each(|&e| one(Relation::Expressions, e));
            }
            NodeKind::Binary { left, right, .. }
            | NodeKind::Logical { left, right, .. }
            | NodeKind::Assignment { left, right, .. } => {
                one(Relation::Left, *left);
                one(Relation::Right, *right);
            }
            NodeKind::New { callee, arguments } | NodeKind::Call { callee, arguments } => {
                one(Relation::Callee, *callee);
                arguments
                    .iter()
                    .for_each(|&a| one(Relation::Arguments, a));
            }
            NodeKind::Member {
                object, property, ..
            } => {
                one(Relation::Object, *object);
                one(Relation::Property, *property);
            }
        }
        out
    }
}

/// Node kinds and their fields.
#[derive(Debug)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },

    // Statements
    Block {
        body: Vec<NodeId>,
    },
    Empty,
    /// Expression statement.
    Expression {
        expression: NodeId,
    },
    If {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    Labeled {
        label: SmallStr,
        body: NodeId,
    },
    Break {
        label: Option<SmallStr>,
    },
    Continue {
        label: Option<SmallStr>,
    },
    With {
        object: NodeId,
        body: NodeId,
    },
    Switch {
        discriminant: NodeId,
        cases: Vec<NodeId>,
    },
    Return {
        argument: Option<NodeId>,
    },
    Throw {
        argument: NodeId,
    },
    Try {
        block: NodeId,
        handler: Option<NodeId>,
        finalizer: Option<NodeId>,
    },
    CatchClause {
        param: NodeId,
        body: NodeId,
    },
    /// `case test:` or, with no test, `default:`.
    CaseClause {
        test: Option<NodeId>,
        consequent: Vec<NodeId>,
    },
    While {
        test: NodeId,
        body: NodeId,
    },
    DoWhile {
        body: NodeId,
        test: NodeId,
    },
    For {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    ForIn {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },
    ForOf {
        left: NodeId,
        right: NodeId,
        body: NodeId,
    },

    // Declarations
    FunctionDecl {
        id: NodeId,
        params: Vec<NodeId>,
        body: NodeId,
    },
    VarDecl {
        kind: VarKind,
        declarations: Vec<NodeId>,
    },
    VarDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },

    // Expressions
    Identifier {
        name: SmallStr,
    },
    This,
    /// `None` entries are elisions (`[a, , b]`).
    Array {
        elements: Vec<Option<NodeId>>,
    },
    Object {
        properties: Vec<NodeId>,
    },
    Property {
        key: NodeId,
        value: NodeId,
        flags: PropertyFlags,
    },
    Function {
        id: Option<NodeId>,
        params: Vec<NodeId>,
        body: NodeId,
    },
    /// Never produced by the parser; arrow functions are rejected.
    Arrow {
        params: Vec<NodeId>,
        body: NodeId,
    },
    Sequence {
        expressions: Vec<NodeId>,
    },
    Unary {
        op: UnaryOp,
        argument: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Assignment {
        op: AssignOp,
        left: NodeId,
        right: NodeId,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        argument: NodeId,
    },
    Literal {
        value: LiteralValue,
    },
    Logical {
        op: LogicalOp,
        left: NodeId,
        right: NodeId,
    },
    Conditional {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    New {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    Call {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    /// `object.property` or, when `computed`, `object[property]`.
    Member {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
    /// Never produced by the parser; generators are rejected.
    Yield {
        argument: Option<NodeId>,
    },
}

impl NodeKind {
    /// Kind name, for dumps and diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::Block { .. } => "Block",
            NodeKind::Empty => "Empty",
            NodeKind::Expression { .. } => "ExpressionStatement",
            NodeKind::If { .. } => "If",
            NodeKind::Labeled { .. } => "Labeled",
            NodeKind::Break { .. } => "Break",
            NodeKind::Continue { .. } => "Continue",
            NodeKind::With { .. } => "With",
            NodeKind::Switch { .. } => "Switch",
            NodeKind::Return { .. } => "Return",
            NodeKind::Throw { .. } => "Throw",
            NodeKind::Try { .. } => "Try",
            NodeKind::CatchClause { .. } => "CatchClause",
            NodeKind::CaseClause { .. } => "CaseClause",
            NodeKind::While { .. } => "While",
            NodeKind::DoWhile { .. } => "DoWhile",
            NodeKind::For { .. } => "For",
            NodeKind::ForIn { .. } => "ForIn",
            NodeKind::ForOf { .. } => "ForOf",
            NodeKind::FunctionDecl { .. } => "FunctionDecl",
            NodeKind::VarDecl { .. } => "VarDecl",
            NodeKind::VarDeclarator { .. } => "VarDeclarator",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::This => "This",
            NodeKind::Array { .. } => "Array",
            NodeKind::Object { .. } => "Object",
            NodeKind::Property { .. } => "Property",
            NodeKind::Function { .. } => "Function",
            NodeKind::Arrow { .. } => "Arrow",
            NodeKind::Sequence { .. } => "Sequence",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::Update { .. } => "Update",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::Logical { .. } => "Logical",
            NodeKind::Conditional { .. } => "Conditional",
            NodeKind::New { .. } => "New",
            NodeKind::Call { .. } => "Call",
            NodeKind::Member { .. } => "Member",
            NodeKind::Yield { .. } => "Yield",
        }
    }
}

/// `var`, `let` or `const`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

bitflags! {
    /// How an object literal property was written.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// `[expr]: value`
        const COMPUTED = 1;
        /// `{ name }`
        const SHORTHAND = 1 << 1;
    }
}

/// Payload of a `Literal` node, moved out of the token that produced it.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    String { quote: Quote, value: SmallStr },
    Number(Number),
    Regexp { body: SmallStr, flags: RegexpFlags },
}
