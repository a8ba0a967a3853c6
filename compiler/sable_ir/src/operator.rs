//! The closed operator set.
//!
//! Operators are one to four bytes long and every prefix of an operator is
//! itself an operator, so longest match is a matter of extending the
//! candidate one byte at a time while [`Operator::from_bytes`] still
//! recognizes it.

use std::fmt;

/// Punctuators and operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Operator {
    // Single byte
    Assign,
    Plus,
    Minus,
    Bang,
    Amp,
    Star,
    Slash,
    LParen,
    RParen,
    Dot,
    Comma,
    Question,
    Tilde,
    Colon,
    Semicolon,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Lt,
    Pipe,
    Caret,
    Percent,
    Gt,

    // Two bytes
    EqEq,
    PlusEq,
    PlusPlus,
    MinusEq,
    MinusMinus,
    BangEq,
    AmpEq,
    AmpAmp,
    PipeEq,
    PipePipe,
    CaretEq,
    CaretCaret,
    PercentEq,
    SlashEq,
    StarEq,
    LtEq,
    Shl,
    GtEq,
    Shr,
    FatArrow,

    // Three bytes
    ShlEq,
    EqEqEq,
    BangEqEq,
    ShrEq,
    UShr,

    // Four bytes
    UShrEq,
}

impl Operator {
    /// Number of operators.
    pub const COUNT: usize = Self::ALL.len();

    /// Every operator, in declaration order.
    pub const ALL: [Operator; 50] = [
        Self::Assign,
        Self::Plus,
        Self::Minus,
        Self::Bang,
        Self::Amp,
        Self::Star,
        Self::Slash,
        Self::LParen,
        Self::RParen,
        Self::Dot,
        Self::Comma,
        Self::Question,
        Self::Tilde,
        Self::Colon,
        Self::Semicolon,
        Self::LBrace,
        Self::RBrace,
        Self::LBracket,
        Self::RBracket,
        Self::Lt,
        Self::Pipe,
        Self::Caret,
        Self::Percent,
        Self::Gt,
        Self::EqEq,
        Self::PlusEq,
        Self::PlusPlus,
        Self::MinusEq,
        Self::MinusMinus,
        Self::BangEq,
        Self::AmpEq,
        Self::AmpAmp,
        Self::PipeEq,
        Self::PipePipe,
        Self::CaretEq,
        Self::CaretCaret,
        Self::PercentEq,
        Self::SlashEq,
        Self::StarEq,
        Self::LtEq,
        Self::Shl,
        Self::GtEq,
        Self::Shr,
        Self::FatArrow,
        Self::ShlEq,
        Self::EqEqEq,
        Self::BangEqEq,
        Self::ShrEq,
        Self::UShr,
        Self::UShrEq,
    ];

    /// Dense index in `0..COUNT`, for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Source text of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Bang => "!",
            Self::Amp => "&",
            Self::Star => "*",
            Self::Slash => "/",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Question => "?",
            Self::Tilde => "~",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Lt => "<",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Percent => "%",
            Self::Gt => ">",
            Self::EqEq => "==",
            Self::PlusEq => "+=",
            Self::PlusPlus => "++",
            Self::MinusEq => "-=",
            Self::MinusMinus => "--",
            Self::BangEq => "!=",
            Self::AmpEq => "&=",
            Self::AmpAmp => "&&",
            Self::PipeEq => "|=",
            Self::PipePipe => "||",
            Self::CaretEq => "^=",
            Self::CaretCaret => "^^",
            Self::PercentEq => "%=",
            Self::SlashEq => "/=",
            Self::StarEq => "*=",
            Self::LtEq => "<=",
            Self::Shl => "<<",
            Self::GtEq => ">=",
            Self::Shr => ">>",
            Self::FatArrow => "=>",
            Self::ShlEq => "<<=",
            Self::EqEqEq => "===",
            Self::BangEqEq => "!==",
            Self::ShrEq => ">>=",
            Self::UShr => ">>>",
            Self::UShrEq => ">>>=",
        }
    }

    /// Recognize a complete operator.
    pub fn from_bytes(bytes: &[u8]) -> Option<Operator> {
        let op = match bytes {
            b"=" => Self::Assign,
            b"+" => Self::Plus,
            b"-" => Self::Minus,
            b"!" => Self::Bang,
            b"&" => Self::Amp,
            b"*" => Self::Star,
            b"/" => Self::Slash,
            b"(" => Self::LParen,
            b")" => Self::RParen,
            b"." => Self::Dot,
            b"," => Self::Comma,
            b"?" => Self::Question,
            b"~" => Self::Tilde,
            b":" => Self::Colon,
            b";" => Self::Semicolon,
            b"{" => Self::LBrace,
            b"}" => Self::RBrace,
            b"[" => Self::LBracket,
            b"]" => Self::RBracket,
            b"<" => Self::Lt,
            b"|" => Self::Pipe,
            b"^" => Self::Caret,
            b"%" => Self::Percent,
            b">" => Self::Gt,
            b"==" => Self::EqEq,
            b"+=" => Self::PlusEq,
            b"++" => Self::PlusPlus,
            b"-=" => Self::MinusEq,
            b"--" => Self::MinusMinus,
            b"!=" => Self::BangEq,
            b"&=" => Self::AmpEq,
            b"&&" => Self::AmpAmp,
            b"|=" => Self::PipeEq,
            b"||" => Self::PipePipe,
            b"^=" => Self::CaretEq,
            b"^^" => Self::CaretCaret,
            b"%=" => Self::PercentEq,
            b"/=" => Self::SlashEq,
            b"*=" => Self::StarEq,
            b"<=" => Self::LtEq,
            b"<<" => Self::Shl,
            b">=" => Self::GtEq,
            b">>" => Self::Shr,
            b"=>" => Self::FatArrow,
            b"<<=" => Self::ShlEq,
            b"===" => Self::EqEqEq,
            b"!==" => Self::BangEqEq,
            b">>=" => Self::ShrEq,
            b">>>" => Self::UShr,
            b">>>=" => Self::UShrEq,
            _ => return None,
        };
        Some(op)
    }

    /// Whether some longer operator starts with this one.
    ///
    /// The scanner finalizes an operator the moment this is false, without
    /// waiting for the next byte.
    pub const fn is_extendable(self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::Plus
                | Self::Minus
                | Self::Bang
                | Self::Amp
                | Self::Star
                | Self::Slash
                | Self::Lt
                | Self::Pipe
                | Self::Caret
                | Self::Percent
                | Self::Gt
                | Self::EqEq
                | Self::BangEq
                | Self::Shl
                | Self::Shr
                | Self::UShr
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_round_trips_through_table() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_bytes(op.as_str().as_bytes()), Some(op));
        }
    }

    #[test]
    fn indices_are_dense() {
        for (i, op) in Operator::ALL.iter().enumerate() {
            assert_eq!(op.index(), i);
        }
    }

    #[test]
    fn every_prefix_is_an_operator() {
        for op in Operator::ALL {
            let text = op.as_str().as_bytes();
            for end in 1..text.len() {
                assert!(
                    Operator::from_bytes(&text[..end]).is_some(),
                    "prefix of {op} is not an operator"
                );
            }
        }
    }

    #[test]
    fn extendable_matches_table() {
        for op in Operator::ALL {
            let text = op.as_str();
            let longer = Operator::ALL
                .iter()
                .any(|other| other.as_str().len() > text.len() && other.as_str().starts_with(text));
            assert_eq!(op.is_extendable(), longer, "{op}");
        }
    }
}
