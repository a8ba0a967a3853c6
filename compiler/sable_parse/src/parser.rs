//! Parser state and token cursor.
//!
//! The parser holds exactly one significant token of lookahead. Trivia is
//! skipped (and its slots returned to the token pool) while the next token
//! is fetched; whitespace containing a line break is remembered for ASI.
//!
//! Consuming the current token takes it out of the tokenizer's pool, so the
//! grammar owns every token it has consumed and moves payloads straight into
//! nodes.

use sable_ir::{
    Handle, Keyword, Node, NodeId, NodeKind, Operator, Pool, Position, SmallStr, Token,
    TokenKind,
};
use sable_lexer::{ByteSource, DisambiguationMode, Scan, Tokenizer};
use tracing::trace;

use crate::error::ParseError;
use crate::symbols::{self, Symbol};
use crate::ParseOptions;

pub(crate) type PResult<T> = Result<T, ParseError>;

pub(crate) struct Parser<'src> {
    tokenizer: Tokenizer,
    source: &'src mut dyn ByteSource,
    nodes: Pool<Node>,
    /// Lookahead; `None` at end of input.
    current: Option<Handle<Token>>,
    /// A line break separates the previous token from `current`.
    newline_before: bool,
    /// `in` is not an operator (the head of a `for`).
    no_in: bool,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src mut dyn ByteSource, options: &ParseOptions) -> Self {
        let nodes = match options.node_arena_limit {
            Some(limit) => Pool::with_arena_limit(limit),
            None => Pool::new(),
        };
        Parser {
            tokenizer: Tokenizer::new(&options.lex_options()),
            source,
            nodes,
            current: None,
            newline_before: false,
            no_in: false,
        }
    }

    /// Give up both pools.
    pub(crate) fn into_pools(self) -> (Pool<Node>, Pool<Token>) {
        (self.nodes, self.tokenizer.into_pool())
    }

    // ─── Lookahead ───

    /// Fetch the next significant token into `current`.
    ///
    /// The current token must already have been consumed.
    pub(crate) fn fill(&mut self, mode: DisambiguationMode) -> PResult<()> {
        self.newline_before = false;
        loop {
            let handle = match self.tokenizer.scan(&mut *self.source, mode)? {
                Scan::Token(handle) => handle,
                Scan::Eof | Scan::NeedMore => {
                    self.current = None;
                    trace!(at = %self.tokenizer.position(), "end of input");
                    return Ok(());
                }
            };
            let newline = match self.tokenizer.token(handle).map(|t| &t.kind) {
                Some(TokenKind::Whitespace { newline }) => *newline,
                Some(TokenKind::Comment { .. }) => false,
                _ => {
                    self.current = Some(handle);
                    if let Some(token) = self.tokenizer.token(handle) {
                        trace!(token = %token, at = %token.start, "advance");
                    }
                    return Ok(());
                }
            };
            self.newline_before |= newline;
            self.tokenizer.take_token(handle);
        }
    }

    /// Consume the current token and fetch the next one under `mode`.
    pub(crate) fn bump_with(&mut self, mode: DisambiguationMode) -> PResult<Token> {
        let token = self
            .current
            .take()
            .and_then(|handle| self.tokenizer.take_token(handle));
        let Some(token) = token else {
            return Err(self.unexpected("more input"));
        };
        self.fill(mode)?;
        Ok(token)
    }

    #[inline]
    pub(crate) fn bump(&mut self) -> PResult<Token> {
        self.bump_with(DisambiguationMode::None)
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.current.and_then(|handle| self.tokenizer.token(handle))
    }

    #[inline]
    pub(crate) fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    pub(crate) fn at_op(&self, op: Operator) -> bool {
        self.peek_kind().is_some_and(|k| k.is_operator(op))
    }

    #[inline]
    pub(crate) fn at_kw(&self, kw: Keyword) -> bool {
        self.peek_kind().is_some_and(|k| k.is_keyword(kw))
    }

    #[inline]
    pub(crate) fn at_ident(&self) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Ident(_)))
    }

    #[inline]
    pub(crate) fn newline_before(&self) -> bool {
        self.newline_before
    }

    /// Where the current token starts, or the end of input.
    pub(crate) fn position(&self) -> Position {
        self.peek()
            .map_or_else(|| self.tokenizer.position(), |t| t.start)
    }

    /// Symbol of the current token.
    pub(crate) fn symbol(&self) -> &'static Symbol {
        self.peek_kind().map_or(&symbols::NONE, symbols::lookup)
    }

    /// Left binding power of the current token, honoring the `in` mask.
    pub(crate) fn lbp(&self) -> u8 {
        if self.no_in && self.at_kw(Keyword::In) {
            return 0;
        }
        self.symbol().lbp
    }

    // ─── Expectations ───

    /// Error for the current token (or end of input) not being `expected`.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::unexpected(token.clone(), expected),
            None => ParseError::unexpected_eof(self.tokenizer.position(), expected),
        }
    }

    pub(crate) fn eat_op(&mut self, op: Operator) -> PResult<bool> {
        if self.at_op(op) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn eat_kw(&mut self, kw: Keyword) -> PResult<bool> {
        if self.at_kw(kw) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn expect_op(&mut self, op: Operator) -> PResult<Token> {
        if self.at_op(op) {
            return self.bump();
        }
        Err(self.unexpected(&format!("`{op}`")))
    }

    pub(crate) fn expect_kw(&mut self, kw: Keyword) -> PResult<Token> {
        if self.at_kw(kw) {
            return self.bump();
        }
        Err(self.unexpected(&format!("`{kw}`")))
    }

    /// Consume an identifier and return its name.
    pub(crate) fn expect_ident(&mut self, what: &str) -> PResult<SmallStr> {
        if !self.at_ident() {
            return Err(self.unexpected(what));
        }
        match self.bump()?.kind {
            TokenKind::Ident(name) => Ok(name),
            _ => Err(self.unexpected(what)),
        }
    }

    /// Finish a statement: an explicit `;`, or an inserted one before a line
    /// break, a `}` or the end of input.
    pub(crate) fn semicolon(&mut self) -> PResult<()> {
        if self.eat_op(Operator::Semicolon)? {
            return Ok(());
        }
        if self.newline_before || self.at_op(Operator::RBrace) || self.at_eof() {
            return Ok(());
        }
        Err(self.unexpected("`;`"))
    }

    // ─── Nodes ───

    pub(crate) fn node(&mut self, kind: NodeKind) -> PResult<NodeId> {
        let at = self.position();
        self.nodes
            .attain(Node::new(kind))
            .map_err(|_| ParseError::out_of_memory(at))
    }

    pub(crate) fn identifier(&mut self, name: SmallStr) -> PResult<NodeId> {
        self.node(NodeKind::Identifier { name })
    }

    #[inline]
    pub(crate) fn node_ref(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Take a node back out of the pool.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.release(id).ok()
    }

    pub(crate) fn mark_parenthesized(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.parenthesized = true;
        }
    }

    // ─── `in` masking ───

    /// Run `f` with `in` treated as an operator.
    pub(crate) fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.with_no_in(false, f)
    }

    /// Run `f` with `in` masked, for the head of a `for`.
    pub(crate) fn mask_in<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.with_no_in(true, f)
    }

    fn with_no_in<T>(
        &mut self,
        no_in: bool,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let saved = std::mem::replace(&mut self.no_in, no_in);
        let result = f(self);
        self.no_in = saved;
        result
    }
}
