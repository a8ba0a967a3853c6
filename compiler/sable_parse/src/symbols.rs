//! Symbol table.
//!
//! Each token kind maps to a static [`Symbol`]: its left binding power and
//! the handlers that apply in value position (`nud`), after a left operand
//! (`led`) and at the start of a statement (`std`). Operators and keywords
//! are looked up by their dense index; identifiers and literals share one
//! entry each.
//!
//! | lbp | symbols |
//! |----:|---------|
//! | 10  | assignment operators, `=>` |
//! | 20  | `?` |
//! | 30  | `\|\|` `&&` `^^` |
//! | 40  | equality, relational, bitwise and shift operators, `in`, `instanceof` |
//! | 50  | `+` `-` |
//! | 60  | `*` `/` `%` |
//! | 80  | call `(`, member `.` and `[` |
//! | 150 | postfix `++` `--` |

use sable_ir::{Keyword, NodeId, Operator, Token, TokenKind};

use crate::grammar::{expr, literal, stmt};
use crate::parser::{PResult, Parser};

/// Handler for a token in value position.
pub(crate) type NudFn = fn(&mut Parser<'_>, Token) -> PResult<NodeId>;
/// Handler for a token following a complete left operand.
pub(crate) type LedFn = fn(&mut Parser<'_>, Token, NodeId) -> PResult<NodeId>;
/// Handler for a token starting a statement.
pub(crate) type StdFn = fn(&mut Parser<'_>, Token) -> PResult<NodeId>;

pub(crate) const ASSIGN_BP: u8 = 10;
pub(crate) const TERNARY_BP: u8 = 20;
pub(crate) const LOGICAL_BP: u8 = 30;
pub(crate) const COMPARE_BP: u8 = 40;
pub(crate) const ADDITIVE_BP: u8 = 50;
pub(crate) const MULTIPLICATIVE_BP: u8 = 60;
/// Operand power of prefix operators. The operand runs through every binary
/// operator, so `-a + b` negates the sum.
pub(crate) const PREFIX_BP: u8 = 0;
pub(crate) const CALL_BP: u8 = 80;
pub(crate) const POSTFIX_BP: u8 = 150;

#[derive(Clone, Copy)]
pub(crate) struct Symbol {
    pub(crate) lbp: u8,
    pub(crate) nud: Option<NudFn>,
    pub(crate) led: Option<LedFn>,
    pub(crate) std: Option<StdFn>,
}

impl Symbol {
    const EMPTY: Symbol = Symbol {
        lbp: 0,
        nud: None,
        led: None,
        std: None,
    };

    const fn prefix(nud: NudFn) -> Symbol {
        Symbol {
            nud: Some(nud),
            ..Self::EMPTY
        }
    }

    const fn infix(lbp: u8, led: LedFn) -> Symbol {
        Symbol {
            lbp,
            led: Some(led),
            ..Self::EMPTY
        }
    }

    const fn statement(std: StdFn) -> Symbol {
        Symbol {
            std: Some(std),
            ..Self::EMPTY
        }
    }

    const fn with_nud(self, nud: NudFn) -> Symbol {
        Symbol {
            nud: Some(nud),
            ..self
        }
    }

    const fn with_std(self, std: StdFn) -> Symbol {
        Symbol {
            std: Some(std),
            ..self
        }
    }
}

/// Symbol of tokens with no role in the grammar (and of end of input).
pub(crate) static NONE: Symbol = Symbol::EMPTY;

static IDENT: Symbol = Symbol::prefix(expr::nud_ident);

static LITERAL: Symbol = Symbol::prefix(expr::nud_literal);

static OPERATORS: [Symbol; Operator::COUNT] = {
    let mut table = [Symbol::EMPTY; Operator::COUNT];
    let mut i = 0;
    while i < Operator::COUNT {
        let op = Operator::ALL[i];
        table[op.index()] = operator_symbol(op);
        i += 1;
    }
    table
};

static KEYWORDS: [Symbol; Keyword::COUNT] = {
    let mut table = [Symbol::EMPTY; Keyword::COUNT];
    let mut i = 0;
    while i < Keyword::COUNT {
        let kw = Keyword::ALL[i];
        table[kw.index()] = keyword_symbol(kw);
        i += 1;
    }
    table
};

const fn operator_symbol(op: Operator) -> Symbol {
    use Operator as O;
    match op {
        O::Assign
        | O::PlusEq
        | O::MinusEq
        | O::StarEq
        | O::PercentEq
        | O::AmpEq
        | O::PipeEq
        | O::CaretEq
        | O::ShlEq
        | O::ShrEq
        | O::UShrEq => Symbol::infix(ASSIGN_BP, expr::led_assign),
        O::SlashEq => Symbol::infix(ASSIGN_BP, expr::led_assign).with_nud(expr::nud_regexp),
        O::FatArrow => Symbol::infix(ASSIGN_BP, expr::led_arrow),
        O::Question => Symbol::infix(TERNARY_BP, expr::led_ternary),
        O::PipePipe | O::AmpAmp | O::CaretCaret => Symbol::infix(LOGICAL_BP, expr::led_logical),
        O::EqEq
        | O::BangEq
        | O::EqEqEq
        | O::BangEqEq
        | O::Lt
        | O::Gt
        | O::LtEq
        | O::GtEq
        | O::Amp
        | O::Pipe
        | O::Caret
        | O::Shl
        | O::Shr
        | O::UShr => Symbol::infix(COMPARE_BP, expr::led_binary),
        O::Plus | O::Minus => Symbol::infix(ADDITIVE_BP, expr::led_binary).with_nud(expr::nud_unary),
        O::Star | O::Percent => Symbol::infix(MULTIPLICATIVE_BP, expr::led_binary),
        O::Slash => Symbol::infix(MULTIPLICATIVE_BP, expr::led_binary).with_nud(expr::nud_regexp),
        O::Bang | O::Tilde => Symbol::prefix(expr::nud_unary),
        O::PlusPlus | O::MinusMinus => {
            Symbol::infix(POSTFIX_BP, expr::led_postfix).with_nud(expr::nud_update)
        }
        O::LParen => Symbol::infix(CALL_BP, expr::led_call).with_nud(expr::nud_paren),
        O::Dot => Symbol::infix(CALL_BP, expr::led_member),
        O::LBracket => Symbol::infix(CALL_BP, expr::led_index).with_nud(literal::nud_array),
        O::LBrace => Symbol::prefix(literal::nud_object).with_std(stmt::std_block),
        O::Semicolon => Symbol::statement(stmt::std_empty),
        O::RParen | O::Comma | O::Colon | O::RBrace | O::RBracket => Symbol::EMPTY,
    }
}

const fn keyword_symbol(kw: Keyword) -> Symbol {
    use Keyword as K;
    match kw {
        K::In | K::Instanceof => Symbol::infix(COMPARE_BP, expr::led_binary),
        K::Typeof | K::Void | K::Delete => Symbol::prefix(expr::nud_unary),
        K::New => Symbol::prefix(expr::nud_new),
        K::This => Symbol::prefix(expr::nud_this),
        K::Function => Symbol::prefix(literal::nud_function).with_std(stmt::std_function),
        K::Class | K::Super | K::Yield | K::Import | K::Export => {
            Symbol::prefix(expr::nud_not_allowed)
        }
        K::Var | K::Let | K::Const => Symbol::statement(stmt::std_var),
        K::If => Symbol::statement(stmt::std_if),
        K::For => Symbol::statement(stmt::std_for),
        K::While => Symbol::statement(stmt::std_while),
        K::Do => Symbol::statement(stmt::std_do),
        K::Break | K::Continue => Symbol::statement(stmt::std_jump),
        K::Return => Symbol::statement(stmt::std_return),
        K::Throw => Symbol::statement(stmt::std_throw),
        K::Try => Symbol::statement(stmt::std_try),
        K::Switch => Symbol::statement(stmt::std_switch),
        K::With => Symbol::statement(stmt::std_with),
        K::Of
        | K::Case
        | K::Else
        | K::Catch
        | K::Default
        | K::Extends
        | K::Finally
        | K::Debugger => Symbol::EMPTY,
    }
}

/// The symbol for a token kind.
pub(crate) fn lookup(kind: &TokenKind) -> &'static Symbol {
    match kind {
        TokenKind::Operator(op) => &OPERATORS[op.index()],
        TokenKind::Keyword(kw) => &KEYWORDS[kw.index()],
        TokenKind::Ident(_) => &IDENT,
        TokenKind::String { .. } | TokenKind::Number(_) | TokenKind::Regexp { .. } => &LITERAL,
        TokenKind::Comment { .. } | TokenKind::Whitespace { .. } => &NONE,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn binding_powers() {
        let lbp = |op| lookup(&TokenKind::Operator(op)).lbp;
        assert_eq!(lbp(Operator::Assign), 10);
        assert_eq!(lbp(Operator::UShrEq), 10);
        assert_eq!(lbp(Operator::Question), 20);
        assert_eq!(lbp(Operator::AmpAmp), 30);
        assert_eq!(lbp(Operator::EqEqEq), 40);
        assert_eq!(lbp(Operator::Minus), 50);
        assert_eq!(lbp(Operator::Slash), 60);
        assert_eq!(lbp(Operator::Dot), 80);
        assert_eq!(lbp(Operator::MinusMinus), 150);
        assert_eq!(lbp(Operator::Bang), 0);
        assert_eq!(lookup(&TokenKind::Keyword(Keyword::Instanceof)).lbp, 40);
    }

    #[test]
    fn value_position_handlers() {
        for op in [Operator::Slash, Operator::SlashEq, Operator::LBrace, Operator::Tilde] {
            assert!(lookup(&TokenKind::Operator(op)).nud.is_some(), "{op}");
        }
        for op in [Operator::RParen, Operator::Star, Operator::Colon] {
            assert!(lookup(&TokenKind::Operator(op)).nud.is_none(), "{op}");
        }
    }

    #[test]
    fn statement_handlers() {
        for kw in [Keyword::Var, Keyword::Let, Keyword::Function, Keyword::Switch] {
            assert!(lookup(&TokenKind::Keyword(kw)).std.is_some(), "{kw}");
        }
        assert!(lookup(&TokenKind::Keyword(Keyword::Else)).std.is_none());
        assert!(lookup(&TokenKind::Operator(Operator::LBrace)).std.is_some());
    }
}
