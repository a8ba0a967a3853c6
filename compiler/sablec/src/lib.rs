//! Command-line driver for the sable front end.
//!
//! The binary is a thin shell over [`run`]: commands write their normal
//! output to a caller-supplied writer and report failures as [`CliError`],
//! whose [`exit_code`](CliError::exit_code) the binary returns.

pub mod commands;

use std::io::{self, Write};
use std::sync::Once;

use sable_ir::DanglingNode;
use sable_lexer::LexError;
use sable_parse::ParseError;

pub use commands::{run, CliOptions};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, once.
///
/// Does nothing unless `RUST_LOG` is set, so normal runs pay nothing for
/// the instrumentation in the library crates.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

/// Why a command failed.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output: {0}")]
    Write(#[from] io::Error),

    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("{0}")]
    Syntax(#[from] ParseError),

    #[error(transparent)]
    Tree(#[from] DanglingNode),
}

impl CliError {
    /// 1 for usage and I/O problems, 2 for bad input.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_)
            | CliError::Read { .. }
            | CliError::Write(_)
            | CliError::Tree(_) => 1,
            CliError::Lex(_) | CliError::Syntax(_) => 2,
        }
    }
}

/// Write `error` for a human. Syntax errors go through their fixed-size
/// rendering.
pub fn report(error: &CliError, out: &mut dyn Write) -> io::Result<()> {
    if let CliError::Syntax(error) = error {
        let mut buf = [0u8; 512];
        let n = error.render(&mut buf);
        out.write_all(b"error: ")?;
        out.write_all(&buf[..n])?;
        return writeln!(out);
    }
    writeln!(out, "error: {error}")?;
    if let CliError::Usage(_) = error {
        writeln!(out, "run 'sable help' for usage")?;
    }
    Ok(())
}
