//! Resumable scanner.
//!
//! [`Tokenizer`] is a byte-at-a-time state machine. Everything a partially
//! scanned token needs (the state, the lexeme accumulated so far, number and
//! regexp flags, the cursor) lives in the tokenizer itself, so scanning can
//! stop at any chunk boundary and pick up with the next chunk without
//! looking at a byte twice. A token's value does not depend on how the input
//! was split.
//!
//! Bytes are consumed only once a state has decided what they belong to.
//! The one byte of lookahead a state needs to finish a token (the byte after
//! an identifier, a number, an operator prefix) stays in the buffer for the
//! next token.

use memchr::{memchr, memchr3};
use sable_ir::{
    CommentStyle, Handle, Number, NumberRepr, NumberValue, Operator, Pool, Position, Quote,
    RegexpFlags, SmallStr, Token, TokenKind,
};
use tracing::trace;

use crate::keywords;
use crate::lex_error::{LexError, LexErrorKind, NumberProblem};
use crate::source::ByteSource;
use crate::LexOptions;

/// How to read a `/` at the start of the next token.
///
/// Only the grammar knows whether a value or an operator comes next, so the
/// parser passes this on every request. It only matters when a new token
/// starts; a token already in progress ignores it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DisambiguationMode {
    /// `/` and `/=` are operators.
    #[default]
    None,
    /// The previous token was a `/` in value position: the next token is a
    /// regexp body.
    RegexpAllowed,
    /// The previous token was a `/=` in value position: the next token is a
    /// regexp body whose first byte, `=`, was already consumed.
    RegexpAllowedWithLeadingEquals,
}

/// Result of one scan request.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Scan {
    /// A finished token, stored in the token pool.
    Token(Handle<Token>),
    /// End of input.
    Eof,
    /// The buffered input ran out mid-scan; supply more bytes and call again.
    NeedMore,
}

/// Progress of a numeric literal.
#[derive(Copy, Clone, Debug, Default)]
struct NumberScan {
    repr: NumberRepr,
    last: u8,
    hex_digits: bool,
    exp_digits: bool,
}

/// Scanner states.
#[derive(Copy, Clone, Debug)]
enum State {
    Default,
    Whitespace { newline: bool },
    String { quote: Quote },
    StringEscape { quote: Quote },
    StringUnicodeEscape,
    StringHexEscape,
    Number(NumberScan),
    Identifier,
    /// Longest operator matched so far.
    Operator(Operator),
    CommentLine,
    /// `star` means the previous byte was a `*` that may close the comment.
    CommentBlock { star: bool },
    RegexpBody { escaped: bool },
    RegexpFlags(RegexpFlags),
    Done,
    Error(LexError),
}

/// What a state handler achieved.
enum Step {
    /// Moved to another state; keep going.
    Continue,
    /// Token complete.
    Emit(TokenKind),
    /// Buffer exhausted before the token completed.
    NeedMore,
    /// No more tokens.
    Eof,
}

/// Resumable tokenizer.
///
/// Owns the token pool, the chunk buffer and all in-progress scan state.
pub struct Tokenizer {
    state: State,
    chunk: Vec<u8>,
    pos: usize,
    eof: bool,
    chunk_size: usize,
    cursor: Position,
    start: Position,
    lexeme: SmallStr,
    tokens: Pool<Token>,
}

impl Tokenizer {
    pub fn new(options: &LexOptions) -> Self {
        let tokens = match options.arena_limit {
            Some(limit) => Pool::with_arena_limit(limit),
            None => Pool::new(),
        };
        Tokenizer {
            state: State::Default,
            chunk: Vec::new(),
            pos: 0,
            eof: false,
            chunk_size: options.chunk_size.max(1),
            cursor: Position::START,
            start: Position::START,
            lexeme: SmallStr::new(),
            tokens,
        }
    }

    /// Scan the next token, pulling chunks from `source` as needed.
    ///
    /// Never returns [`Scan::NeedMore`].
    pub fn scan<S>(&mut self, source: &mut S, mode: DisambiguationMode) -> Result<Scan, LexError>
    where
        S: ByteSource + ?Sized,
    {
        loop {
            match self.next_token(mode)? {
                Scan::NeedMore => self.refill(source),
                scan => return Ok(scan),
            }
        }
    }

    /// Scan the next token from buffered input only.
    ///
    /// Returns [`Scan::NeedMore`] when the buffer runs dry before a token
    /// completes and end of input has not been signalled. After an error
    /// every call reports the same error.
    pub fn next_token(&mut self, mode: DisambiguationMode) -> Result<Scan, LexError> {
        match self.run(mode) {
            Ok(scan) => Ok(scan),
            Err(error) => {
                self.state = State::Error(error);
                self.lexeme.release();
                Err(error)
            }
        }
    }

    /// Pull one chunk of at most `chunk_size` bytes from `source`.
    ///
    /// A read of zero bytes marks end of input.
    pub fn refill<S>(&mut self, source: &mut S)
    where
        S: ByteSource + ?Sized,
    {
        self.compact();
        let kept = self.chunk.len();
        self.chunk.resize(kept + self.chunk_size, 0);
        let read = source.read(&mut self.chunk[kept..]).min(self.chunk_size);
        self.chunk.truncate(kept + read);
        if read == 0 {
            self.eof = true;
        }
        trace!(bytes = read, offset = self.cursor.offset, "refilled chunk");
    }

    /// Append bytes to the buffered input.
    pub fn supply(&mut self, bytes: &[u8]) {
        self.compact();
        self.chunk.extend_from_slice(bytes);
    }

    /// Signal that no more input follows the buffered bytes.
    pub fn finish(&mut self) {
        self.eof = true;
    }

    /// Current cursor.
    pub fn position(&self) -> Position {
        self.cursor
    }

    /// Borrow a token from the pool.
    pub fn token(&self, handle: Handle<Token>) -> Option<&Token> {
        self.tokens.get(handle)
    }

    /// Remove a token from the pool, returning its slot for reuse.
    pub fn take_token(&mut self, handle: Handle<Token>) -> Option<Token> {
        self.tokens.release(handle).ok()
    }

    pub fn tokens(&self) -> &Pool<Token> {
        &self.tokens
    }

    /// Give up the token pool, for teardown.
    pub fn into_pool(self) -> Pool<Token> {
        self.tokens
    }

    fn compact(&mut self) {
        if self.pos > 0 {
            self.chunk.drain(..self.pos);
            self.pos = 0;
        }
    }

    fn run(&mut self, mode: DisambiguationMode) -> Result<Scan, LexError> {
        if matches!(self.state, State::Default) && mode != DisambiguationMode::None {
            self.start = self.cursor;
            if mode == DisambiguationMode::RegexpAllowedWithLeadingEquals {
                self.push_lexeme(b"=")?;
            }
            self.state = State::RegexpBody { escaped: false };
        }

        loop {
            let step = match self.state {
                State::Default => self.scan_default()?,
                State::Whitespace { newline } => self.scan_whitespace(newline),
                State::String { quote } => self.scan_string(quote)?,
                State::StringEscape { quote } => self.scan_escape(quote)?,
                State::StringUnicodeEscape => {
                    return Err(self.error(LexErrorKind::UnsupportedEscape('u')));
                }
                State::StringHexEscape => {
                    return Err(self.error(LexErrorKind::UnsupportedEscape('x')));
                }
                State::Number(number) => self.scan_number(number)?,
                State::Identifier => self.scan_identifier()?,
                State::Operator(op) => self.scan_operator(op),
                State::CommentLine => self.scan_line_comment()?,
                State::CommentBlock { star } => self.scan_block_comment(star)?,
                State::RegexpBody { escaped } => self.scan_regexp_body(escaped)?,
                State::RegexpFlags(flags) => self.scan_regexp_flags(flags)?,
                State::Done => Step::Eof,
                State::Error(error) => return Err(error),
            };
            match step {
                Step::Continue => {}
                Step::Emit(kind) => return self.emit(kind).map(Scan::Token),
                Step::NeedMore => return Ok(Scan::NeedMore),
                Step::Eof => return Ok(Scan::Eof),
            }
        }
    }

    // ─── Cursor ───

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.chunk.get(self.pos).copied()
    }

    #[inline]
    fn bump(&mut self, byte: u8) {
        self.pos += 1;
        self.cursor.advance(byte);
    }

    /// Consume `count` buffered bytes that contain no `\n`.
    #[inline]
    fn bump_run(&mut self, count: usize) {
        self.pos += count;
        self.cursor.advance_columns(count);
    }

    /// The unconsumed part of the chunk.
    #[inline]
    fn rest(&self) -> &[u8] {
        &self.chunk[self.pos..]
    }

    /// `NeedMore` while input may still arrive, otherwise `at_eof`.
    #[inline]
    fn exhausted(&self, at_eof: Result<Step, LexError>) -> Result<Step, LexError> {
        if self.eof {
            at_eof
        } else {
            Ok(Step::NeedMore)
        }
    }

    #[inline]
    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.cursor)
    }

    fn push_lexeme(&mut self, bytes: &[u8]) -> Result<(), LexError> {
        let at = self.cursor;
        self.lexeme
            .push_slice(bytes)
            .map_err(|_| LexError::new(LexErrorKind::OutOfMemory, at))
    }

    /// Copy the next `count` buffered bytes into the lexeme and consume them.
    fn take_run(&mut self, count: usize) -> Result<(), LexError> {
        let at = self.cursor;
        let run = &self.chunk[self.pos..self.pos + count];
        self.lexeme
            .push_slice(run)
            .map_err(|_| LexError::new(LexErrorKind::OutOfMemory, at))?;
        self.bump_run(count);
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind) -> Result<Handle<Token>, LexError> {
        self.state = State::Default;
        let token = Token::new(kind, self.start, self.cursor);
        trace!(kind = ?token.kind, start = %token.start, end = %token.end, "token");
        self.tokens
            .attain(token)
            .map_err(|_| self.error(LexErrorKind::OutOfMemory))
    }

    // ─── Dispatch ───

    fn scan_default(&mut self) -> Result<Step, LexError> {
        let Some(byte) = self.peek() else {
            if !self.eof {
                return Ok(Step::NeedMore);
            }
            self.state = State::Done;
            return Ok(Step::Eof);
        };
        self.start = self.cursor;

        if is_whitespace(byte) {
            self.state = State::Whitespace { newline: false };
        } else if let Some(quote) = Quote::from_byte(byte) {
            self.bump(byte);
            self.state = State::String { quote };
        } else if byte.is_ascii_digit() {
            self.state = State::Number(NumberScan::default());
        } else if is_ident_start(byte) {
            self.state = State::Identifier;
        } else if let Some(op) = Operator::from_bytes(&[byte]) {
            self.bump(byte);
            if !op.is_extendable() {
                return Ok(Step::Emit(TokenKind::Operator(op)));
            }
            self.state = State::Operator(op);
        } else {
            return Err(self.error(LexErrorKind::UnexpectedByte(byte)));
        }
        Ok(Step::Continue)
    }

    // ─── Whitespace ───

    fn scan_whitespace(&mut self, mut newline: bool) -> Step {
        while let Some(byte) = self.peek() {
            if !is_whitespace(byte) {
                return Step::Emit(TokenKind::Whitespace { newline });
            }
            self.bump(byte);
            newline |= byte == b'\n';
        }
        if self.eof {
            Step::Emit(TokenKind::Whitespace { newline })
        } else {
            self.state = State::Whitespace { newline };
            Step::NeedMore
        }
    }

    // ─── Strings ───

    fn scan_string(&mut self, quote: Quote) -> Result<Step, LexError> {
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return self.exhausted(Err(self.error(LexErrorKind::UnterminatedString)));
            }
            let Some(stop) = memchr3(quote.as_byte(), b'\\', b'\n', rest) else {
                let len = rest.len();
                self.take_run(len)?;
                continue;
            };
            let byte = rest[stop];
            self.take_run(stop)?;
            return match byte {
                b'\n' => Err(self.error(LexErrorKind::NewlineInString)),
                b'\\' => {
                    self.bump(byte);
                    self.state = State::StringEscape { quote };
                    Ok(Step::Continue)
                }
                _ => {
                    self.bump(byte);
                    Ok(Step::Emit(TokenKind::String {
                        quote,
                        value: self.lexeme.take(),
                    }))
                }
            };
        }
    }

    fn scan_escape(&mut self, quote: Quote) -> Result<Step, LexError> {
        let Some(byte) = self.peek() else {
            return self.exhausted(Err(self.error(LexErrorKind::UnterminatedString)));
        };
        let decoded = match byte {
            b'\\' | b'"' | b'\'' => byte,
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'v' => 0x0b,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'0' => 0,
            b'u' | b'U' => {
                self.bump(byte);
                self.state = State::StringUnicodeEscape;
                return Ok(Step::Continue);
            }
            b'x' | b'X' => {
                self.bump(byte);
                self.state = State::StringHexEscape;
                return Ok(Step::Continue);
            }
            b'\n' => return Err(self.error(LexErrorKind::NewlineInString)),
            _ => return Err(self.error(LexErrorKind::UnknownEscape(char::from(byte)))),
        };
        self.bump(byte);
        self.push_lexeme(&[decoded])?;
        self.state = State::String { quote };
        Ok(Step::Continue)
    }

    // ─── Numbers ───

    fn scan_number(&mut self, mut number: NumberScan) -> Result<Step, LexError> {
        while let Some(byte) = self.peek() {
            let accept = match byte {
                b'0'..=b'9' => {
                    if number.repr.contains(NumberRepr::HEX) {
                        number.hex_digits = true;
                    } else if number.repr.intersects(NumberRepr::EXP) {
                        number.exp_digits = true;
                    }
                    true
                }
                b'.' => {
                    if number
                        .repr
                        .intersects(NumberRepr::DOT | NumberRepr::HEX | NumberRepr::EXP)
                    {
                        return Err(self.number_error(NumberProblem::UnexpectedDot));
                    }
                    number.repr |= NumberRepr::DOT;
                    true
                }
                b'e' | b'E' if !number.repr.contains(NumberRepr::HEX) => {
                    if number.repr.intersects(NumberRepr::EXP) {
                        return Err(self.number_error(NumberProblem::SecondExponent));
                    }
                    number.repr |= if byte == b'e' {
                        NumberRepr::EXP_LOWER
                    } else {
                        NumberRepr::EXP_UPPER
                    };
                    true
                }
                b'+' | b'-' => matches!(number.last, b'e' | b'E')
                    && number.repr.intersects(NumberRepr::EXP)
                    && !number.exp_digits,
                b'x' | b'X' => {
                    if number.last != b'0' || self.lexeme.len() != 1 || !number.repr.is_empty() {
                        return Err(self.number_error(NumberProblem::MisplacedHexPrefix));
                    }
                    number.repr |= NumberRepr::HEX;
                    true
                }
                b'a'..=b'f' | b'A'..=b'F' => {
                    if !number.repr.contains(NumberRepr::HEX) {
                        return Err(self.number_error(NumberProblem::HexDigitOutsideHex));
                    }
                    number.hex_digits = true;
                    true
                }
                _ if is_ident_part(byte) => {
                    return Err(self.number_error(NumberProblem::TrailingIdentifier));
                }
                _ => false,
            };
            if !accept {
                return self.finish_number(number).map(Step::Emit);
            }
            self.push_lexeme(&[byte])?;
            self.bump(byte);
            number.last = byte;
        }
        if self.eof {
            self.finish_number(number).map(Step::Emit)
        } else {
            self.state = State::Number(number);
            Ok(Step::NeedMore)
        }
    }

    fn number_error(&self, problem: NumberProblem) -> LexError {
        self.error(LexErrorKind::MalformedNumber(problem))
    }

    /// Validate and decode the accumulated literal.
    fn finish_number(&mut self, number: NumberScan) -> Result<TokenKind, LexError> {
        let mut repr = number.repr;
        if repr.contains(NumberRepr::HEX) && !number.hex_digits {
            return Err(self.number_error(NumberProblem::MissingHexDigits));
        }
        if repr.intersects(NumberRepr::EXP) && !number.exp_digits {
            return Err(self.number_error(NumberProblem::EmptyExponent));
        }

        let lexeme = self.lexeme.take();
        // Only ASCII digits, letters, `.`, `+` and `-` were accepted.
        let text = lexeme.as_str().unwrap_or_default();
        let value = if repr.is_float() {
            repr |= NumberRepr::FLOAT;
            text.parse::<f64>()
                .map(NumberValue::Float)
                .map_err(|_| self.number_error(NumberProblem::UnexpectedDot))?
        } else if repr.contains(NumberRepr::HEX) {
            u64::from_str_radix(&text[2..], 16)
                .map(NumberValue::Int)
                .map_err(|_| self.error(LexErrorKind::IntegerOverflow))?
        } else {
            text.parse::<u64>()
                .map(NumberValue::Int)
                .map_err(|_| self.error(LexErrorKind::IntegerOverflow))?
        };
        Ok(TokenKind::Number(Number { repr, value }))
    }

    // ─── Identifiers ───

    fn scan_identifier(&mut self) -> Result<Step, LexError> {
        loop {
            let rest = self.rest();
            let available = rest.len();
            match rest.iter().position(|&b| !is_ident_part(b)) {
                Some(len) => {
                    self.take_run(len)?;
                    return Ok(Step::Emit(self.finish_identifier()));
                }
                None if available == 0 => {
                    if self.eof {
                        return Ok(Step::Emit(self.finish_identifier()));
                    }
                    return Ok(Step::NeedMore);
                }
                None => self.take_run(available)?,
            }
        }
    }

    fn finish_identifier(&mut self) -> TokenKind {
        match keywords::lookup(self.lexeme.as_bytes()) {
            Some(keyword) => {
                self.lexeme.release();
                TokenKind::Keyword(keyword)
            }
            None => TokenKind::Ident(self.lexeme.take()),
        }
    }

    // ─── Operators ───

    fn scan_operator(&mut self, op: Operator) -> Step {
        let Some(byte) = self.peek() else {
            if self.eof {
                return Step::Emit(TokenKind::Operator(op));
            }
            return Step::NeedMore;
        };

        if op == Operator::Slash && byte == b'/' {
            self.bump(byte);
            self.state = State::CommentLine;
            return Step::Continue;
        }
        if op == Operator::Slash && byte == b'*' {
            self.bump(byte);
            self.state = State::CommentBlock { star: false };
            return Step::Continue;
        }

        let text = op.as_str().as_bytes();
        let mut candidate = [0u8; 4];
        candidate[..text.len()].copy_from_slice(text);
        candidate[text.len()] = byte;
        match Operator::from_bytes(&candidate[..=text.len()]) {
            Some(longer) => {
                self.bump(byte);
                if longer.is_extendable() {
                    self.state = State::Operator(longer);
                    Step::Continue
                } else {
                    Step::Emit(TokenKind::Operator(longer))
                }
            }
            None => Step::Emit(TokenKind::Operator(op)),
        }
    }

    // ─── Comments ───

    fn scan_line_comment(&mut self) -> Result<Step, LexError> {
        loop {
            let rest = self.rest();
            let available = rest.len();
            if available == 0 {
                return Ok(if self.eof {
                    self.emit_comment(CommentStyle::Line)
                } else {
                    Step::NeedMore
                });
            }
            match memchr(b'\n', rest) {
                Some(end) => {
                    self.take_run(end)?;
                    return Ok(self.emit_comment(CommentStyle::Line));
                }
                None => self.take_run(available)?,
            }
        }
    }

    fn scan_block_comment(&mut self, mut star: bool) -> Result<Step, LexError> {
        while let Some(byte) = self.peek() {
            self.bump(byte);
            if star {
                if byte == b'/' {
                    return Ok(self.emit_comment(CommentStyle::Block));
                }
                self.push_lexeme(b"*")?;
            }
            star = byte == b'*';
            if !star {
                self.push_lexeme(&[byte])?;
            }
        }
        if self.eof {
            return Err(self.error(LexErrorKind::UnterminatedComment));
        }
        self.state = State::CommentBlock { star };
        Ok(Step::NeedMore)
    }

    fn emit_comment(&mut self, style: CommentStyle) -> Step {
        Step::Emit(TokenKind::Comment {
            style,
            text: self.lexeme.take(),
        })
    }

    // ─── Regular expressions ───

    fn scan_regexp_body(&mut self, mut escaped: bool) -> Result<Step, LexError> {
        while let Some(byte) = self.peek() {
            if byte == b'\n' {
                return Err(self.error(LexErrorKind::UnterminatedRegexp));
            }
            self.bump(byte);
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'/' {
                self.state = State::RegexpFlags(RegexpFlags::empty());
                return Ok(Step::Continue);
            }
            self.push_lexeme(&[byte])?;
        }
        if self.eof {
            return Err(self.error(LexErrorKind::UnterminatedRegexp));
        }
        self.state = State::RegexpBody { escaped };
        Ok(Step::NeedMore)
    }

    fn scan_regexp_flags(&mut self, mut flags: RegexpFlags) -> Result<Step, LexError> {
        while let Some(byte) = self.peek() {
            let Some(flag) = RegexpFlags::from_byte(byte) else {
                return Ok(self.emit_regexp(flags));
            };
            flags.toggle(flag);
            if !flags.contains(flag) {
                return Err(self.error(LexErrorKind::DuplicateRegexpFlag(char::from(byte))));
            }
            self.bump(byte);
        }
        if self.eof {
            return Ok(self.emit_regexp(flags));
        }
        self.state = State::RegexpFlags(flags);
        Ok(Step::NeedMore)
    }

    fn emit_regexp(&mut self, flags: RegexpFlags) -> Step {
        Step::Emit(TokenKind::Regexp {
            body: self.lexeme.take(),
            flags,
        })
    }
}

#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

#[inline]
fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

#[inline]
fn is_ident_part(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}
