//! Statements and declarations.
//!
//! A statement starting with a token that has a `std` handler is dispatched
//! to it with that token already consumed. Everything else is an expression
//! statement, or a labeled statement when the expression is a bare
//! identifier followed by `:`.

use sable_ir::{Keyword, Node, NodeId, NodeKind, Operator, SmallStr, Token, TokenKind, VarKind};
use sable_lexer::DisambiguationMode;
use sable_stack::with_stack_guard;
use tracing::trace;

use crate::error::ParseError;
use crate::parser::{PResult, Parser};

impl Parser<'_> {
    /// The whole input as a `Program` node.
    pub(crate) fn program(&mut self) -> PResult<NodeId> {
        self.fill(DisambiguationMode::None)?;
        let mut body = Vec::new();
        while !self.at_eof() {
            body.push(self.statement()?);
        }
        self.node(NodeKind::Program { body })
    }

    pub(crate) fn statement(&mut self) -> PResult<NodeId> {
        with_stack_guard(|| {
            trace!(at = %self.position(), "statement");
            if let Some(std) = self.symbol().std {
                let token = self.bump()?;
                return std(self, token);
            }
            self.expression_statement()
        })
    }

    fn expression_statement(&mut self) -> PResult<NodeId> {
        let expression = self.sequence()?;
        let bare_identifier = matches!(
            self.node_ref(expression),
            Some(Node {
                kind: NodeKind::Identifier { .. },
                parenthesized: false,
            })
        );
        if bare_identifier && self.at_op(Operator::Colon) {
            self.bump()?;
            if let Some(Node {
                kind: NodeKind::Identifier { name },
                ..
            }) = self.unlink(expression)
            {
                let body = self.statement()?;
                return self.node(NodeKind::Labeled { label: name, body });
            }
        }
        self.semicolon()?;
        self.node(NodeKind::Expression { expression })
    }

    /// Statements up to and including the closing `}`.
    fn statements_until_brace(&mut self) -> PResult<Vec<NodeId>> {
        let mut body = Vec::new();
        while !self.eat_op(Operator::RBrace)? {
            if self.at_eof() {
                return Err(self.unexpected("`}`"));
            }
            body.push(self.statement()?);
        }
        Ok(body)
    }

    /// Block after its `{`.
    pub(crate) fn block_rest(&mut self) -> PResult<NodeId> {
        let body = self.statements_until_brace()?;
        self.node(NodeKind::Block { body })
    }

    fn block(&mut self) -> PResult<NodeId> {
        self.expect_op(Operator::LBrace)?;
        self.block_rest()
    }

    /// `( expression )` of `if`, `while`, `switch` and `with`.
    fn parenthesized(&mut self) -> PResult<NodeId> {
        self.expect_op(Operator::LParen)?;
        let expression = self.allow_in(Parser::sequence)?;
        self.expect_op(Operator::RParen)?;
        Ok(expression)
    }

    /// Declarators after `var`, `let` or `const`.
    fn var_declaration(&mut self, kind: VarKind) -> PResult<NodeId> {
        let mut declarations = Vec::new();
        loop {
            let name = self.expect_ident("a variable name")?;
            let id = self.identifier(name)?;
            let init = if self.eat_op(Operator::Assign)? {
                Some(self.assignment()?)
            } else {
                None
            };
            declarations.push(self.node(NodeKind::VarDeclarator { id, init })?);
            if !self.eat_op(Operator::Comma)? {
                break;
            }
        }
        self.node(NodeKind::VarDecl { kind, declarations })
    }

    fn declarator_count(&self, id: NodeId) -> usize {
        match self.node_ref(id).map(|n| &n.kind) {
            Some(NodeKind::VarDecl { declarations, .. }) => declarations.len(),
            _ => 0,
        }
    }

    fn optional_label(&mut self) -> PResult<Option<SmallStr>> {
        if self.newline_before() || !self.at_ident() {
            return Ok(None);
        }
        self.expect_ident("a label").map(Some)
    }

    fn at_statement_end(&self) -> bool {
        self.newline_before()
            || self.at_eof()
            || self.at_op(Operator::Semicolon)
            || self.at_op(Operator::RBrace)
    }
}

fn var_kind(token: &Token) -> PResult<VarKind> {
    match token.kind {
        TokenKind::Keyword(Keyword::Var) => Ok(VarKind::Var),
        TokenKind::Keyword(Keyword::Let) => Ok(VarKind::Let),
        TokenKind::Keyword(Keyword::Const) => Ok(VarKind::Const),
        _ => Err(ParseError::unexpected(token.clone(), "`var`, `let` or `const`")),
    }
}

fn at_var_keyword(p: &Parser<'_>) -> bool {
    p.at_kw(Keyword::Var) || p.at_kw(Keyword::Let) || p.at_kw(Keyword::Const)
}

pub(crate) fn std_block(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    p.block_rest()
}

pub(crate) fn std_empty(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    p.node(NodeKind::Empty)
}

pub(crate) fn std_var(p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    let kind = var_kind(&token)?;
    let declaration = p.var_declaration(kind)?;
    p.semicolon()?;
    Ok(declaration)
}

pub(crate) fn std_if(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    let test = p.parenthesized()?;
    let consequent = p.statement()?;
    let alternate = if p.eat_kw(Keyword::Else)? {
        Some(p.statement()?)
    } else {
        None
    };
    p.node(NodeKind::If {
        test,
        consequent,
        alternate,
    })
}

/// `for (init; test; update)`, `for (left in right)` and
/// `for (left of right)`.
///
/// The head is parsed with `in` masked so `for (x in o)` does not read as
/// the expression `x in o`.
pub(crate) fn std_for(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    p.expect_op(Operator::LParen)?;
    let init = if p.at_op(Operator::Semicolon) {
        None
    } else if at_var_keyword(p) {
        let keyword = p.bump()?;
        let kind = var_kind(&keyword)?;
        Some(p.mask_in(|p| p.var_declaration(kind))?)
    } else {
        Some(p.mask_in(Parser::sequence)?)
    };

    if let Some(left) = init {
        let iterate = if p.at_kw(Keyword::In) {
            Some(true)
        } else if p.at_kw(Keyword::Of) {
            Some(false)
        } else {
            None
        };
        if let Some(is_in) = iterate {
            let head = p.bump()?;
            if p.declarator_count(left) > 1 {
                let what = if is_in {
                    "more than one declarator in a `for-in` head"
                } else {
                    "more than one declarator in a `for-of` head"
                };
                return Err(ParseError::not_allowed(head, what));
            }
            let right = if is_in {
                p.sequence()?
            } else {
                p.assignment()?
            };
            p.expect_op(Operator::RParen)?;
            let body = p.statement()?;
            return p.node(if is_in {
                NodeKind::ForIn { left, right, body }
            } else {
                NodeKind::ForOf { left, right, body }
            });
        }
    }

    p.expect_op(Operator::Semicolon)?;
    let test = if p.at_op(Operator::Semicolon) {
        None
    } else {
        Some(p.sequence()?)
    };
    p.expect_op(Operator::Semicolon)?;
    let update = if p.at_op(Operator::RParen) {
        None
    } else {
        Some(p.sequence()?)
    };
    p.expect_op(Operator::RParen)?;
    let body = p.statement()?;
    p.node(NodeKind::For {
        init,
        test,
        update,
        body,
    })
}

pub(crate) fn std_while(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    let test = p.parenthesized()?;
    let body = p.statement()?;
    p.node(NodeKind::While { test, body })
}

/// `do body while (test)`; the trailing `;` is optional.
pub(crate) fn std_do(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    let body = p.statement()?;
    p.expect_kw(Keyword::While)?;
    let test = p.parenthesized()?;
    p.eat_op(Operator::Semicolon)?;
    p.node(NodeKind::DoWhile { body, test })
}

/// `break` and `continue`, with an optional label on the same line.
pub(crate) fn std_jump(p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    let label = p.optional_label()?;
    p.semicolon()?;
    if token.kind.is_keyword(Keyword::Break) {
        p.node(NodeKind::Break { label })
    } else {
        p.node(NodeKind::Continue { label })
    }
}

/// A line break after `return` ends the statement.
pub(crate) fn std_return(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    let argument = if p.at_statement_end() {
        None
    } else {
        Some(p.sequence()?)
    };
    p.semicolon()?;
    p.node(NodeKind::Return { argument })
}

pub(crate) fn std_throw(p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    if p.newline_before() {
        return Err(ParseError::not_allowed(token, "a line break after `throw`"));
    }
    let argument = p.sequence()?;
    p.semicolon()?;
    p.node(NodeKind::Throw { argument })
}

pub(crate) fn std_try(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    let block = p.block()?;
    let handler = if p.eat_kw(Keyword::Catch)? {
        p.expect_op(Operator::LParen)?;
        let name = p.expect_ident("a catch parameter")?;
        let param = p.identifier(name)?;
        p.expect_op(Operator::RParen)?;
        let body = p.block()?;
        Some(p.node(NodeKind::CatchClause { param, body })?)
    } else {
        None
    };
    let finalizer = if p.eat_kw(Keyword::Finally)? {
        Some(p.block()?)
    } else {
        None
    };
    if handler.is_none() && finalizer.is_none() {
        return Err(p.unexpected("`catch` or `finally`"));
    }
    p.node(NodeKind::Try {
        block,
        handler,
        finalizer,
    })
}

pub(crate) fn std_switch(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    let discriminant = p.parenthesized()?;
    p.expect_op(Operator::LBrace)?;
    let mut cases = Vec::new();
    let mut seen_default = false;
    while !p.eat_op(Operator::RBrace)? {
        let test = if p.eat_kw(Keyword::Case)? {
            Some(p.sequence()?)
        } else if p.at_kw(Keyword::Default) {
            let token = p.bump()?;
            if seen_default {
                return Err(ParseError::not_allowed(token, "a second `default` clause"));
            }
            seen_default = true;
            None
        } else {
            return Err(p.unexpected("`case`, `default` or `}`"));
        };
        p.expect_op(Operator::Colon)?;

        let mut consequent = Vec::new();
        while !(p.at_eof()
            || p.at_kw(Keyword::Case)
            || p.at_kw(Keyword::Default)
            || p.at_op(Operator::RBrace))
        {
            consequent.push(p.statement()?);
        }
        cases.push(p.node(NodeKind::CaseClause { test, consequent })?);
    }
    p.node(NodeKind::Switch {
        discriminant,
        cases,
    })
}

pub(crate) fn std_with(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    let object = p.parenthesized()?;
    let body = p.statement()?;
    p.node(NodeKind::With { object, body })
}

/// Function declaration; unlike the expression form the name is required.
pub(crate) fn std_function(p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    if p.at_op(Operator::Star) {
        return Err(ParseError::not_allowed(token, "generator function"));
    }
    let name = p.expect_ident("a function name")?;
    let id = p.identifier(name)?;
    let (params, body) = p.function_rest()?;
    p.node(NodeKind::FunctionDecl { id, params, body })
}
