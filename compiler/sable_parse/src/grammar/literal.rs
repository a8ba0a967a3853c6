//! Array, object and function literals.

use sable_ir::{
    LiteralValue, NodeId, NodeKind, Operator, PropertyFlags, SmallStr, Token, TokenKind,
};

use crate::error::ParseError;
use crate::parser::{PResult, Parser};

impl Parser<'_> {
    /// One `key: value` entry of an object literal.
    fn property(&mut self) -> PResult<NodeId> {
        if self.eat_op(Operator::LBracket)? {
            let key = self.allow_in(Parser::assignment)?;
            self.expect_op(Operator::RBracket)?;
            return self.property_value(key, PropertyFlags::COMPUTED);
        }
        if self.at_eof() {
            return Err(self.unexpected("a property name"));
        }

        let token = self.bump()?;
        if let TokenKind::Ident(name) = &token.kind {
            if self.at_op(Operator::Comma) || self.at_op(Operator::RBrace) {
                return self.shorthand(token);
            }
            if (name == "get" || name == "set") && self.at_property_name() {
                return Err(ParseError::not_allowed(token, "accessor property"));
            }
        }
        if self.at_op(Operator::LParen) {
            return Err(ParseError::not_allowed(token, "method shorthand"));
        }
        let key = self.property_key(token)?;
        self.property_value(key, PropertyFlags::empty())
    }

    fn at_property_name(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(
                TokenKind::Ident(_)
                    | TokenKind::Keyword(_)
                    | TokenKind::String { .. }
                    | TokenKind::Number(_)
            )
        )
    }

    /// `{ name }` stands for `{ name: name }`.
    fn shorthand(&mut self, token: Token) -> PResult<NodeId> {
        let TokenKind::Ident(name) = token.kind else {
            return Err(self.unexpected("an identifier"));
        };
        let key = self.identifier(name.clone())?;
        let value = self.identifier(name)?;
        self.node(NodeKind::Property {
            key,
            value,
            flags: PropertyFlags::SHORTHAND,
        })
    }

    fn property_key(&mut self, token: Token) -> PResult<NodeId> {
        match token.kind {
            TokenKind::Ident(name) => self.identifier(name),
            TokenKind::Keyword(kw) => self.identifier(SmallStr::from(kw.as_str())),
            TokenKind::String { quote, value } => self.node(NodeKind::Literal {
                value: LiteralValue::String { quote, value },
            }),
            TokenKind::Number(number) => self.node(NodeKind::Literal {
                value: LiteralValue::Number(number),
            }),
            kind => Err(ParseError::unexpected(
                Token::new(kind, token.start, token.end),
                "a property name",
            )),
        }
    }

    fn property_value(&mut self, key: NodeId, flags: PropertyFlags) -> PResult<NodeId> {
        self.expect_op(Operator::Colon)?;
        let value = self.assignment()?;
        self.node(NodeKind::Property { key, value, flags })
    }

    /// Parameter list and body, starting at the `(`.
    pub(crate) fn function_rest(&mut self) -> PResult<(Vec<NodeId>, NodeId)> {
        self.expect_op(Operator::LParen)?;
        let mut params = Vec::new();
        if !self.eat_op(Operator::RParen)? {
            loop {
                let name = self.expect_ident("a parameter name")?;
                params.push(self.identifier(name)?);
                if self.eat_op(Operator::RParen)? {
                    break;
                }
                if !self.eat_op(Operator::Comma)? {
                    return Err(self.unexpected("`,` or `)`"));
                }
            }
        }
        self.expect_op(Operator::LBrace)?;
        let body = self.allow_in(Parser::block_rest)?;
        Ok((params, body))
    }
}

/// Array literal after the `[`. Elisions become holes; a trailing comma
/// adds none.
pub(crate) fn nud_array(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    p.allow_in(|p| {
        let mut elements = Vec::new();
        loop {
            if p.eat_op(Operator::RBracket)? {
                break;
            }
            if p.eat_op(Operator::Comma)? {
                elements.push(None);
                continue;
            }
            elements.push(Some(p.assignment()?));
            if p.eat_op(Operator::RBracket)? {
                break;
            }
            if !p.eat_op(Operator::Comma)? {
                return Err(p.unexpected("`,` or `]`"));
            }
        }
        p.node(NodeKind::Array { elements })
    })
}

/// Object literal after the `{`.
pub(crate) fn nud_object(p: &mut Parser<'_>, _token: Token) -> PResult<NodeId> {
    p.allow_in(|p| {
        let mut properties = Vec::new();
        while !p.eat_op(Operator::RBrace)? {
            properties.push(p.property()?);
            if p.eat_op(Operator::RBrace)? {
                break;
            }
            if !p.eat_op(Operator::Comma)? {
                return Err(p.unexpected("`,` or `}`"));
            }
        }
        p.node(NodeKind::Object { properties })
    })
}

/// Function expression; the name is optional.
pub(crate) fn nud_function(p: &mut Parser<'_>, token: Token) -> PResult<NodeId> {
    if p.at_op(Operator::Star) {
        return Err(ParseError::not_allowed(token, "generator function"));
    }
    let id = if p.at_ident() {
        let name = p.expect_ident("a function name")?;
        Some(p.identifier(name)?)
    } else {
        None
    };
    let (params, body) = p.function_rest()?;
    p.node(NodeKind::Function { id, params, body })
}
