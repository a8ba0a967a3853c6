//! Operator matching helpers.
//!
//! Map a consumed operator token to the operator stored in its node.

use sable_ir::{AssignOp, BinaryOp, Keyword, LogicalOp, Operator, TokenKind, UnaryOp, UpdateOp};

pub(super) fn match_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Keyword(Keyword::In) => BinaryOp::In,
        TokenKind::Keyword(Keyword::Instanceof) => BinaryOp::Instanceof,
        TokenKind::Operator(op) => match op {
            Operator::Plus => BinaryOp::Add,
            Operator::Minus => BinaryOp::Sub,
            Operator::Star => BinaryOp::Mul,
            Operator::Slash => BinaryOp::Div,
            Operator::Percent => BinaryOp::Mod,
            Operator::EqEq => BinaryOp::Eq,
            Operator::BangEq => BinaryOp::NotEq,
            Operator::EqEqEq => BinaryOp::StrictEq,
            Operator::BangEqEq => BinaryOp::StrictNotEq,
            Operator::Lt => BinaryOp::Lt,
            Operator::Gt => BinaryOp::Gt,
            Operator::LtEq => BinaryOp::LtEq,
            Operator::GtEq => BinaryOp::GtEq,
            Operator::Amp => BinaryOp::BitAnd,
            Operator::Pipe => BinaryOp::BitOr,
            Operator::Caret => BinaryOp::BitXor,
            Operator::Shl => BinaryOp::Shl,
            Operator::Shr => BinaryOp::Shr,
            Operator::UShr => BinaryOp::UShr,
            _ => return None,
        },
        _ => return None,
    };
    Some(op)
}

pub(super) fn match_logical_op(kind: &TokenKind) -> Option<LogicalOp> {
    match kind {
        TokenKind::Operator(Operator::AmpAmp) => Some(LogicalOp::And),
        TokenKind::Operator(Operator::PipePipe) => Some(LogicalOp::Or),
        TokenKind::Operator(Operator::CaretCaret) => Some(LogicalOp::Xor),
        _ => None,
    }
}

pub(super) fn match_assign_op(kind: &TokenKind) -> Option<AssignOp> {
    let TokenKind::Operator(op) = kind else {
        return None;
    };
    let op = match op {
        Operator::Assign => AssignOp::Assign,
        Operator::PlusEq => AssignOp::Add,
        Operator::MinusEq => AssignOp::Sub,
        Operator::StarEq => AssignOp::Mul,
        Operator::SlashEq => AssignOp::Div,
        Operator::PercentEq => AssignOp::Mod,
        Operator::AmpEq => AssignOp::BitAnd,
        Operator::PipeEq => AssignOp::BitOr,
        Operator::CaretEq => AssignOp::BitXor,
        Operator::ShlEq => AssignOp::Shl,
        Operator::ShrEq => AssignOp::Shr,
        Operator::UShrEq => AssignOp::UShr,
        _ => return None,
    };
    Some(op)
}

pub(super) fn match_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Operator(Operator::Bang) => Some(UnaryOp::Not),
        TokenKind::Operator(Operator::Tilde) => Some(UnaryOp::BitNot),
        TokenKind::Operator(Operator::Plus) => Some(UnaryOp::Plus),
        TokenKind::Operator(Operator::Minus) => Some(UnaryOp::Neg),
        TokenKind::Keyword(Keyword::Typeof) => Some(UnaryOp::Typeof),
        TokenKind::Keyword(Keyword::Void) => Some(UnaryOp::Void),
        TokenKind::Keyword(Keyword::Delete) => Some(UnaryOp::Delete),
        _ => None,
    }
}

pub(super) fn match_update_op(kind: &TokenKind) -> Option<UpdateOp> {
    match kind {
        TokenKind::Operator(Operator::PlusPlus) => Some(UpdateOp::Increment),
        TokenKind::Operator(Operator::MinusMinus) => Some(UpdateOp::Decrement),
        _ => None,
    }
}
