//! Command dispatch and option parsing.

mod lex;
mod parse;

use std::fs::File;
use std::io::{BufReader, Write};

use sable_lexer::{LexOptions, ReadSource, DEFAULT_CHUNK_SIZE};
use sable_parse::ParseOptions;

use crate::CliError;

pub use lex::lex_file;
pub use parse::parse_file;

/// Flags shared by `lex` and `parse`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub chunk_size: usize,
    /// Arena limit applied to the token and node pools.
    pub arena_limit: Option<usize>,
    /// `parse`: print the tree.
    pub tree: bool,
    /// `lex`: scan the token after every `/` or `/=` as a regexp body.
    pub regexp: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            chunk_size: DEFAULT_CHUNK_SIZE,
            arena_limit: None,
            tree: false,
            regexp: false,
        }
    }
}

impl CliOptions {
    pub fn lex_options(&self) -> LexOptions {
        LexOptions::default()
            .with_chunk_size(self.chunk_size)
            .with_arena_limit(self.arena_limit)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_chunk_size(self.chunk_size)
            .with_token_arena_limit(self.arena_limit)
            .with_node_arena_limit(self.arena_limit)
    }
}

/// Split `args` (after the command name) into a file path and options.
pub fn parse_args(args: &[String]) -> Result<(String, CliOptions), CliError> {
    let mut options = CliOptions::default();
    let mut path = None;

    for arg in args {
        if let Some(value) = arg.strip_prefix("--chunk-size=") {
            let size = parse_count("--chunk-size", value)?;
            if size == 0 {
                return Err(CliError::Usage("--chunk-size must be at least 1".into()));
            }
            options.chunk_size = size;
        } else if let Some(value) = arg.strip_prefix("--arena-limit=") {
            options.arena_limit = Some(parse_count("--arena-limit", value)?);
        } else if let Some(value) = arg.strip_prefix("--mode=") {
            options.regexp = match value {
                "regexp" => true,
                "plain" => false,
                _ => return Err(CliError::Usage(format!("unknown mode '{value}'"))),
            };
        } else if arg == "--tree" {
            options.tree = true;
        } else if arg.starts_with('-') {
            return Err(CliError::Usage(format!("unknown option '{arg}'")));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(CliError::Usage(format!("unexpected argument '{arg}'")));
        }
    }

    let path = path.ok_or_else(|| CliError::Usage("missing file path".into()))?;
    Ok((path, options))
}

fn parse_count(flag: &str, value: &str) -> Result<usize, CliError> {
    value
        .parse()
        .map_err(|_| CliError::Usage(format!("{flag} expects a number, got '{value}'")))
}

/// Open `path` as a byte source.
pub(crate) fn open(path: &str) -> Result<ReadSource<BufReader<File>>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })?;
    Ok(ReadSource::new(BufReader::new(file)))
}

/// Fail with the I/O error that cut the input short, if there was one.
pub(crate) fn check_read(
    source: &mut ReadSource<BufReader<File>>,
    path: &str,
) -> Result<(), CliError> {
    match source.take_error() {
        Some(source) => Err(CliError::Read {
            path: path.to_string(),
            source,
        }),
        None => Ok(()),
    }
}

/// Run the command named by `args[0]`.
pub fn run(args: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let Some((command, rest)) = args.split_first() else {
        print_usage(out)?;
        return Ok(());
    };

    match command.as_str() {
        "lex" => {
            let (path, options) = parse_args(rest)?;
            lex_file(&path, &options, out)
        }
        "parse" => {
            let (path, options) = parse_args(rest)?;
            parse_file(&path, &options, out)
        }
        "help" | "--help" | "-h" => {
            print_usage(out)?;
            Ok(())
        }
        "--version" | "-V" => {
            writeln!(out, "sable {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => Err(CliError::Usage(format!("unknown command '{other}'"))),
    }
}

fn print_usage(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "sable - streaming lexer and parser for a JavaScript subset")?;
    writeln!(out)?;
    writeln!(out, "Usage: sable <command> <file> [options]")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  lex <file>       Print one line per token")?;
    writeln!(out, "  parse <file>     Parse and print 'ok' or the first error")?;
    writeln!(out, "  help             Show this message")?;
    writeln!(out)?;
    writeln!(out, "Options:")?;
    writeln!(out, "  --chunk-size=N   Bytes read per refill (default {DEFAULT_CHUNK_SIZE})")?;
    writeln!(out, "  --arena-limit=N  Maximum arenas per pool")?;
    writeln!(out, "  --tree           parse: print the syntax tree")?;
    writeln!(out, "  --mode=regexp    lex: scan after every '/' as a regexp")?;
    writeln!(out, "  --version        Print the version")?;
    writeln!(out)?;
    writeln!(out, "Set RUST_LOG (e.g. RUST_LOG=sable_parse=trace) for tracing output.")
}
