//! Sandboxed rule-expression language.
//!
//! A deliberately small grammar: comparisons, boolean connectives, literals,
//! payload identifiers, and four allow-listed builtins. No attribute access, no
//! arbitrary calls, no loops, so evaluation is intrinsically bounded. The host
//! language's evaluator is never involved; expressions are parsed into a typed
//! AST by a recursive-descent parser and interpreted against a typed binding map.
//!
//! Any failure here (parse error, unknown identifier, type mismatch) is an
//! [`ExprError`]; the engine converts it into a rule failure, never a fault and
//! never a silent pass.

mod ast;
mod eval;
mod lexer;
mod parser;

pub use ast::{BinOp, Builtin, Expr, Literal};
pub use eval::{evaluate, evaluate_parsed, ExprValue};
pub use parser::parse;

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExprError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("expression nesting exceeds depth limit")]
    TooDeep,

    #[error("unknown identifier '{0}' (payload has no such key)")]
    UnknownIdentifier(String),

    #[error("unknown function '{0}' (allowed: regex_match, parse_date, today, len)")]
    UnknownFunction(String),

    #[error("{func}() expects {expected} argument(s), got {got}")]
    Arity {
        func: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid regex pattern '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("cannot parse '{0}' as a date (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("type error: {0}")]
    Type(String),
}
