//! `sable parse`: parse a file, optionally printing the tree.

use std::io::{self, Write};

use sable_ir::{LiteralValue, NodeKind, Visit, VisitFlow, Visitor};
use tracing::debug;

use super::{check_read, open, CliOptions};
use crate::CliError;

/// Parse `path` and print `ok`, followed by the tree with `--tree`.
///
/// The parse result is freed on every path.
pub fn parse_file(path: &str, options: &CliOptions, out: &mut dyn Write) -> Result<(), CliError> {
    let mut source = open(path)?;
    let response = sable_parse::parse(&mut source, &options.parse_options());

    if let Err(err) = check_read(&mut source, path) {
        response.free();
        return Err(err);
    }
    if let Some(error) = response.error().cloned() {
        let report = response.free();
        debug!(?report, "freed after error");
        return Err(CliError::Syntax(error));
    }

    let printed = print(&response, options.tree, out);
    let report = response.free();
    debug!(?report, "freed");
    printed
}

fn print(
    response: &sable_parse::ParseResponse,
    tree: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    writeln!(out, "ok")?;
    if tree {
        let mut printer = TreePrinter { out, error: None };
        response.traverse(&mut printer)?;
        if let Some(error) = printer.error {
            return Err(CliError::Write(error));
        }
    }
    Ok(())
}

/// One line per node: `relation: Kind detail`, indented by depth.
struct TreePrinter<'w> {
    out: &'w mut dyn Write,
    error: Option<io::Error>,
}

impl Visitor for TreePrinter<'_> {
    fn enter(&mut self, visit: Visit<'_>) -> VisitFlow {
        let indent = visit.depth * 2;
        let written = writeln!(
            self.out,
            "{:indent$}{}: {}{}",
            "",
            visit.relation.as_str(),
            visit.node.kind.name(),
            detail(&visit.node.kind),
        );
        match written {
            Ok(()) => VisitFlow::Continue,
            Err(error) => {
                self.error = Some(error);
                VisitFlow::Stop
            }
        }
    }
}

fn detail(kind: &NodeKind) -> String {
    match kind {
        NodeKind::Identifier { name } => format!(" {name}"),
        NodeKind::Literal { value } => match value {
            LiteralValue::String { quote, value } => {
                let q = quote.as_char();
                format!(" {q}{value}{q}")
            }
            LiteralValue::Number(number) => format!(" {}", number.value),
            LiteralValue::Regexp { body, flags } => format!(" /{body}/{flags}"),
        },
        NodeKind::Unary { op, .. } => format!(" {op}"),
        NodeKind::Binary { op, .. } => format!(" {op}"),
        NodeKind::Logical { op, .. } => format!(" {op}"),
        NodeKind::Assignment { op, .. } => format!(" {op}"),
        NodeKind::Update { op, prefix, .. } => {
            if *prefix {
                format!(" {op}x")
            } else {
                format!(" x{op}")
            }
        }
        NodeKind::VarDecl { kind, .. } => format!(" {}", kind.as_str()),
        NodeKind::Labeled { label, .. }
        | NodeKind::Break {
            label: Some(label),
        }
        | NodeKind::Continue {
            label: Some(label),
        } => format!(" {label}"),
        NodeKind::Member { computed: true, .. } => " []".to_string(),
        _ => String::new(),
    }
}
