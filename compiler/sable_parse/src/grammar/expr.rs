//! Expressions.
//!
//! [`Parser::expression`] is the Pratt loop: run the `nud` of the token in
//! value position, then keep applying the `led` of the next token while it
//! binds tighter than the caller's right binding power.
//!
//! A `/` or `/=` in value position cannot be division, so the token after
//! it is requested as a regexp body and the `/` nud wraps it in a literal.

use sable_ir::{LiteralValue, NodeId, NodeKind, Operator, SmallStr, Token, TokenKind};
use sable_lexer::DisambiguationMode;
use sable_stack::with_stack_guard;

use super::operators::{
    match_assign_op, match_binary_op, match_logical_op, match_unary_op, match_update_op,
};
use crate::error::ParseError;
use crate::parser::{PResult, Parser};
use crate::symbols::{self, ASSIGN_BP, LOGICAL_BP, PREFIX_BP, TERNARY_BP};

impl Parser<'_> {
    /// Parse an expression whose operators bind tighter than `rbp`.
    pub(crate) fn expression(&mut self, rbp: u8) -> PResult<NodeId> {
        with_stack_guard(|| self.expression_inner(rbp))
    }

    fn expression_inner(&mut self, rbp: u8) -> PResult<NodeId> {
        let Some(nud) = self.symbol().nud else {
            return Err(self.unexpected("an expression"));
        };
        let mode = if self.at_op(Operator::Slash) {
            DisambiguationMode::RegexpAllowed
        } else if self.at_op(Operator::SlashEq) {
            DisambiguationMode::RegexpAllowedWithLeadingEquals
        } else {
            DisambiguationMode::None
        };
        let token = self.bump_with(mode)?;
        let mut left = nud(self, token)?;

        while rbp < self.lbp() {
            // `a\n++b` is `a; ++b`.
            if self.newline_before()
                && (self.at_op(Operator::PlusPlus) || self.at_op(Operator::MinusMinus))
            {
                break;
            }
            let Some(led) = self.symbol().led else {
                break;
            };
            let token = self.bump()?;
            left = led(self, token, left)?;
        }
        Ok(left)
    }

    /// A single assignment expression: everything but the comma operator.
    #[inline]
    pub(crate) fn assignment(&mut self) -> PResult<NodeId> {
        self.expression(0)
    }

    /// Comma-separated expressions; two or more make a `Sequence`.
    pub(crate) fn sequence(&mut self) -> PResult<NodeId> {
        let first = self.assignment()?;
        if !self.at_op(Operator::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat_op(Operator::Comma)? {
            expressions.push(self.assignment()?);
        }
        self.node(NodeKind::Sequence { expressions })
    }

    /// Call arguments after the opening `(`, through the closing `)`.
    pub(crate) fn arguments(&mut self) -> PResult<Vec<NodeId>> {
        self.allow_in(|p| {
            let mut arguments = Vec::new();
            if p.eat_op(Operator::RParen)? {
                return Ok(arguments);
            }
            loop {
                arguments.push(p.assignment()?);
                if p.eat_op(Operator::RParen)? {
                    return Ok(arguments);
                }
                if !p.eat_op(Operator::Comma)? {
                    return Err(p.unexpected("`,` or `)`"));
                }
            }
        })
    }

    /// The callee of `new`: a primary expression followed only by member
    /// accesses, so the first argument list belongs to `new`.
    fn new_callee(&mut self) -> PResult<NodeId> {
        with_stack_guard(|| {
            let Some(nud) = self.symbol().nud else {
                return Err(self.unexpected("a constructor"));
            };
            let token = self.bump()?;
            let mut callee = nud(self, token)?;
            loop {
                if self.at_op(Operator::Dot) {
                    let token = self.bump()?;
                    callee = led_member(self, token, callee)?;
                } else if self.at_op(Operator::LBracket) {
                    let token = self.bump()?;
                    callee = led_index(self, token, callee)?;
                } else {
                    return Ok(callee);
                }
            }
        })
    }

    /// A property name after `.`; keywords are allowed.
    fn property_name(&mut self) -> PResult<NodeId> {
        match self.peek_kind() {
            Some(TokenKind::Ident(_)) => {
                let name = self.expect_ident("a property name")?;
                self.identifier(name)
            }
            Some(TokenKind::Keyword(kw)) => {
                let name = SmallStr::from(kw.as_str());
                self.bump()?;
                self.identifier(name)
            }
            _ => Err(self.unexpected("a property name")),
        }
    }
}

// ─── Value position ───

pub(crate) fn nud_ident(p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    match token.kind {
        TokenKind::Ident(name) => p.identifier(name),
        kind => Err(ParseError::unexpected(
            Token::new(kind, token.start, token.end),
            "an identifier",
        )),
    }
}

pub(crate) fn nud_literal(p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    let value = match token.kind {
        TokenKind::String { quote, value } => LiteralValue::String { quote, value },
        TokenKind::Number(number) => LiteralValue::Number(number),
        TokenKind::Regexp { body, flags } => LiteralValue::Regexp { body, flags },
        kind => {
            return Err(ParseError::unexpected(
                Token::new(kind, token.start, token.end),
                "a literal",
            ))
        }
    };
    p.node(NodeKind::Literal { value })
}

/// `/` or `/=` in value position: the current token is the regexp body.
pub(crate) fn nud_regexp(p: &mut Parser<'_>, _slash: Token) -> PResult<NodeId> {
    if !matches!(p.peek_kind(), Some(TokenKind::Regexp { .. })) {
        return Err(p.unexpected("a regular expression"));
    }
    let token = p.bump()?;
    nud_literal(p, token)
}

pub(crate) fn nud_this(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    p.node(NodeKind::This)
}

pub(crate) fn nud_unary(p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    let Some(op) = match_unary_op(&token.kind) else {
        return Err(ParseError::unexpected(token, "a prefix operator"));
    };
    let argument = p.expression(PREFIX_BP)?;
    p.node(NodeKind::Unary { op, argument })
}

/// Prefix `++` / `--`.
pub(crate) fn nud_update(p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    let Some(op) = match_update_op(&token.kind) else {
        return Err(ParseError::unexpected(token, "`++` or `--`"));
    };
    let argument = p.expression(PREFIX_BP)?;
    p.node(NodeKind::Update {
        op,
        prefix: true,
        argument,
    })
}

/// Grouping parentheses.
pub(crate) fn nud_paren(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    let inner = p.allow_in(Parser::sequence)?;
    p.expect_op(Operator::RParen)?;
    p.mark_parenthesized(inner);
    Ok(inner)
}

pub(crate) fn nud_new(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    let callee = p.new_callee()?;
    let arguments = if p.eat_op(Operator::LParen)? {
        p.arguments()?
    } else {
        Vec::new()
    };
    p.node(NodeKind::New { callee, arguments })
}

/// Reserved words for constructs outside the supported language.
pub(crate) fn nud_not_allowed(_p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    let what = token.kind.to_string();
    Err(ParseError::not_allowed(token, &what))
}

// ─── After an operand ───

pub(crate) fn led_binary(p: &mut Parser<'_>, token: Token, left: NodeId) -> PResult<NodeId> {
    let Some(op) = match_binary_op(&token.kind) else {
        return Err(ParseError::unexpected(token, "a binary operator"));
    };
    let right = p.expression(symbols::lookup(&token.kind).lbp)?;
    p.node(NodeKind::Binary { op, left, right })
}

/// `&&`, `||` and `^^` associate to the right.
pub(crate) fn led_logical(p: &mut Parser<'_>, token: Token, left: NodeId) -> PResult<NodeId> {
    let Some(op) = match_logical_op(&token.kind) else {
        return Err(ParseError::unexpected(token, "a logical operator"));
    };
    let right = p.expression(LOGICAL_BP - 1)?;
    p.node(NodeKind::Logical { op, left, right })
}

pub(crate) fn led_assign(p: &mut Parser<'_>, token: Token, left: NodeId) -> PResult<NodeId> {
    let Some(op) = match_assign_op(&token.kind) else {
        return Err(ParseError::unexpected(token, "an assignment operator"));
    };
    let right = p.expression(ASSIGN_BP - 1)?;
    p.node(NodeKind::Assignment { op, left, right })
}

pub(crate) fn led_arrow(_p: &mut Parser<'_>, token: Token, _left: NodeId) -> PResult<NodeId> {
    Err(ParseError::not_allowed(token, "arrow function"))
}

pub(crate) fn led_ternary(p: &mut Parser<'_>, _token: Token, test: NodeId) -> PResult<NodeId> {
    let consequent = p.allow_in(|p| p.expression(ASSIGN_BP - 1))?;
    p.expect_op(Operator::Colon)?;
    let alternate = p.expression(TERNARY_BP - 1)?;
    p.node(NodeKind::Conditional {
        test,
        consequent,
        alternate,
    })
}

/// Postfix `++` / `--`.
pub(crate) fn led_postfix(p: &mut Parser<'_>, token: Token, argument: NodeId) -> PResult<NodeId> {
    let Some(op) = match_update_op(&token.kind) else {
        return Err(ParseError::unexpected(token, "`++` or `--`"));
    };
    p.node(NodeKind::Update {
        op,
        prefix: false,
        argument,
    })
}

pub(crate) fn led_call(p: &mut Parser<'_>, _token: Token, callee: NodeId) -> PResult<NodeId> {
    let arguments = p.arguments()?;
    p.node(NodeKind::Call { callee, arguments })
}

pub(crate) fn led_member(p: &mut Parser<'_>, _token: Token, object: NodeId) -> PResult<NodeId> {
    let property = p.property_name()?;
    p.node(NodeKind::Member {
        object,
        property,
        computed: false,
    })
}

pub(crate) fn led_index(p: &mut Parser<'_>, _token: Token, object: NodeId) -> PResult<NodeId> {
    let property = p.allow_in(Parser::sequence)?;
    p.expect_op(Operator::RBracket)?;
    p.node(NodeKind::Member {
        object,
        property,
        computed: true,
    })
}
