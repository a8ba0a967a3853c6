//! `sable lex`: dump the token stream.

use std::io::Write;

use sable_ir::{Operator, TokenKind};
use sable_lexer::{DisambiguationMode, Scan, Tokenizer};
use tracing::debug;

use super::{check_read, open, CliOptions};
use crate::CliError;

/// Print `start-end kind` for every token of `path`, trivia included.
pub fn lex_file(path: &str, options: &CliOptions, out: &mut dyn Write) -> Result<(), CliError> {
    let mut source = open(path)?;
    let mut tokenizer = Tokenizer::new(&options.lex_options());
    let mut mode = DisambiguationMode::None;
    let mut count = 0usize;

    loop {
        let scan = tokenizer.scan(&mut source, mode);
        check_read(&mut source, path)?;
        let Scan::Token(handle) = scan? else {
            break;
        };
        let Some(token) = tokenizer.take_token(handle) else {
            continue;
        };
        if !token.is_trivia() {
            mode = next_mode(&token.kind, options.regexp);
        }
        writeln!(out, "{}-{} {}", token.start, token.end, token.kind)?;
        count += 1;
    }

    debug!(path, tokens = count, "lexed");
    Ok(())
}

/// Without a parser to say what is in value position, `--mode=regexp`
/// treats every slash as the start of a regexp.
fn next_mode(kind: &TokenKind, regexp: bool) -> DisambiguationMode {
    if !regexp {
        return DisambiguationMode::None;
    }
    if kind.is_operator(Operator::Slash) {
        DisambiguationMode::RegexpAllowed
    } else if kind.is_operator(Operator::SlashEq) {
        DisambiguationMode::RegexpAllowedWithLeadingEquals
    } else {
        DisambiguationMode::None
    }
}
