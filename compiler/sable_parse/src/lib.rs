//! Pratt parser for the sable front end.
//!
//! [`parse`] pulls tokens from a [`sable_lexer::Tokenizer`] one at a time and
//! builds a tree of [`Node`]s in a [`Pool`]. Binding powers and handlers come
//! from a static symbol table keyed by token kind.
//!
//! # Design
//!
//! - **One token of lookahead**: the grammar never needs more, so the parser
//!   drives the tokenizer directly and a source of any length can be parsed
//!   with a bounded token pool.
//! - **Regexp protocol**: `/` is always scanned as an operator. When it turns
//!   up in value position the parser asks for the following token in a
//!   regexp mode; see [`sable_lexer::DisambiguationMode`].
//! - **Fail fast**: the first error ends the parse. Nodes built so far stay
//!   in the pool and are reclaimed by [`ParseResponse::free`].

mod error;
mod grammar;
mod parser;
mod symbols;
mod teardown;

use sable_ir::{traverse, DanglingNode, Node, NodeId, Pool, Token, VisitFlow, Visitor};
use sable_lexer::{ByteSource, LexOptions, DEFAULT_CHUNK_SIZE};
use tracing::debug;

pub use error::{ErrorKind, ParseError};
pub use teardown::TeardownReport;

use parser::Parser;

/// Parser configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Bytes pulled from the source per refill.
    pub chunk_size: usize,
    /// Maximum number of arenas in the token pool; `None` is unbounded.
    pub token_arena_limit: Option<usize>,
    /// Maximum number of arenas in the node pool; `None` is unbounded.
    pub node_arena_limit: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            chunk_size: DEFAULT_CHUNK_SIZE,
            token_arena_limit: None,
            node_arena_limit: None,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_token_arena_limit(mut self, limit: Option<usize>) -> Self {
        self.token_arena_limit = limit;
        self
    }

    #[must_use]
    pub fn with_node_arena_limit(mut self, limit: Option<usize>) -> Self {
        self.node_arena_limit = limit;
        self
    }

    /// Options for the tokenizer the parser drives.
    pub fn lex_options(&self) -> LexOptions {
        LexOptions::default()
            .with_chunk_size(self.chunk_size)
            .with_arena_limit(self.token_arena_limit)
    }
}

/// Outcome of [`parse`]: the tree (or the error) plus the pools that hold it.
///
/// Exactly one of [`root`](Self::root) and [`error`](Self::error) is set.
#[derive(Debug)]
pub struct ParseResponse {
    root: Option<NodeId>,
    error: Option<ParseError>,
    nodes: Pool<Node>,
    tokens: Pool<Token>,
}

impl ParseResponse {
    /// The `Program` node, when parsing succeeded.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn nodes(&self) -> &Pool<Node> {
        &self.nodes
    }

    /// Walk the tree; a failed parse has nothing to walk.
    pub fn traverse<V: Visitor + ?Sized>(
        &self,
        visitor: &mut V,
    ) -> Result<VisitFlow, DanglingNode> {
        match self.root {
            Some(root) => traverse(&self.nodes, root, visitor),
            None => Ok(VisitFlow::Continue),
        }
    }

    /// Release every node and destroy both pools.
    pub fn free(self) -> TeardownReport {
        teardown::free(self.root, self.nodes, self.tokens)
    }
}

/// Parse a whole program from `source`.
pub fn parse(source: &mut dyn ByteSource, options: &ParseOptions) -> ParseResponse {
    debug!(chunk_size = options.chunk_size, "parse start");
    let mut parser = Parser::new(source, options);
    let result = parser.program();
    let (nodes, tokens) = parser.into_pools();

    let (root, error) = match result {
        Ok(root) => (Some(root), None),
        Err(error) => (None, Some(error)),
    };
    debug!(
        ok = error.is_none(),
        nodes = nodes.live(),
        node_arenas = nodes.arena_count(),
        tokens = tokens.live(),
        "parse finished"
    );
    ParseResponse {
        root,
        error,
        nodes,
        tokens,
    }
}

#[cfg(test)]
mod tests;
