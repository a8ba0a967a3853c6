//! Grammar.
//!
//! - `expr.rs`: the Pratt loop plus the expression `nud`/`led` handlers
//! - `literal.rs`: array, object and function literals
//! - `stmt.rs`: statements, ASI and the `std` handlers
//! - `operators.rs`: token-to-operator mapping

pub(crate) mod expr;
pub(crate) mod literal;
mod operators;
pub(crate) mod stmt;
