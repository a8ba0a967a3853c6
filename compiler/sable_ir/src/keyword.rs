//! Reserved words.

use std::fmt;

/// Reserved words recognized by the tokenizer.
///
/// `true`, `false` and `null` are not keywords; they scan as identifiers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Keyword {
    Do,
    In,
    Of,
    If,
    For,
    Let,
    New,
    Try,
    Var,
    Void,
    With,
    This,
    Case,
    Else,
    Break,
    Catch,
    Class,
    Const,
    Super,
    Throw,
    While,
    Yield,
    Delete,
    Export,
    Import,
    Return,
    Switch,
    Typeof,
    Default,
    Extends,
    Finally,
    Function,
    Continue,
    Debugger,
    Instanceof,
}

impl Keyword {
    pub const COUNT: usize = Self::ALL.len();

    /// Every keyword, in declaration order.
    pub const ALL: [Keyword; 35] = [
        Self::Do,
        Self::In,
        Self::Of,
        Self::If,
        Self::For,
        Self::Let,
        Self::New,
        Self::Try,
        Self::Var,
        Self::Void,
        Self::With,
        Self::This,
        Self::Case,
        Self::Else,
        Self::Break,
        Self::Catch,
        Self::Class,
        Self::Const,
        Self::Super,
        Self::Throw,
        Self::While,
        Self::Yield,
        Self::Delete,
        Self::Export,
        Self::Import,
        Self::Return,
        Self::Switch,
        Self::Typeof,
        Self::Default,
        Self::Extends,
        Self::Finally,
        Self::Function,
        Self::Continue,
        Self::Debugger,
        Self::Instanceof,
    ];

    /// Dense index in `0..COUNT`, for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Do => "do",
            Self::In => "in",
            Self::Of => "of",
            Self::If => "if",
            Self::For => "for",
            Self::Let => "let",
            Self::New => "new",
            Self::Try => "try",
            Self::Var => "var",
            Self::Void => "void",
            Self::With => "with",
            Self::This => "this",
            Self::Case => "case",
            Self::Else => "else",
            Self::Break => "break",
            Self::Catch => "catch",
            Self::Class => "class",
            Self::Const => "const",
            Self::Super => "super",
            Self::Throw => "throw",
            Self::While => "while",
            Self::Yield => "yield",
            Self::Delete => "delete",
            Self::Export => "export",
            Self::Import => "import",
            Self::Return => "return",
            Self::Switch => "switch",
            Self::Typeof => "typeof",
            Self::Default => "default",
            Self::Extends => "extends",
            Self::Finally => "finally",
            Self::Function => "function",
            Self::Continue => "continue",
            Self::Debugger => "debugger",
            Self::Instanceof => "instanceof",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
