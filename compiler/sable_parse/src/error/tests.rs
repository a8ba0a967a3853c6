#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use sable_ir::{Keyword, Operator, Position, Token, TokenKind};
use sable_lexer::{LexError, LexErrorKind};

use super::{ErrorKind, ParseError};

fn token(kind: TokenKind) -> Token {
    Token::new(kind, Position::new(4, 1, 4), Position::new(5, 1, 5))
}

#[test]
fn unexpected_names_the_token() {
    let err = ParseError::unexpected(token(TokenKind::Operator(Operator::RParen)), "an expression");
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert_eq!(err.position(), Position::new(4, 1, 4));
    assert_eq!(
        err.to_string(),
        "unexpected token: unexpected `)`, expected an expression at 1:4"
    );
}

#[test]
fn not_allowed_keeps_the_token() {
    let err = ParseError::not_allowed(token(TokenKind::Keyword(Keyword::Class)), "`class`");
    assert_eq!(err.kind(), ErrorKind::NotAllowed);
    assert!(err.token().unwrap().kind.is_keyword(Keyword::Class));
}

#[test]
fn lex_errors_map_to_kinds() {
    let at = Position::new(1, 1, 1);
    let cases = [
        (LexErrorKind::UnterminatedString, ErrorKind::BadToken),
        (LexErrorKind::DuplicateRegexpFlag('g'), ErrorKind::NotAllowed),
        (LexErrorKind::OutOfMemory, ErrorKind::OutOfMemory),
        (LexErrorKind::IntegerOverflow, ErrorKind::BadToken),
    ];
    for (lex, expected) in cases {
        let err = ParseError::from(LexError::new(lex, at));
        assert_eq!(err.kind(), expected, "{lex:?}");
        assert_eq!(err.position(), at);
        assert!(err.token().is_none());
    }
}

#[test]
fn render_truncates() {
    let err = ParseError::unexpected_eof(Position::new(9, 2, 3), "`}`");
    let full = err.to_string();

    let mut big = [0u8; 256];
    let n = err.render(&mut big);
    assert_eq!(&big[..n], full.as_bytes());

    let mut small = [0u8; 10];
    assert_eq!(err.render(&mut small), 10);
    assert_eq!(&small, &full.as_bytes()[..10]);

    assert_eq!(err.render(&mut []), 0);
}
