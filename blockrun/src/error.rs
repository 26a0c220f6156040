//! Error types for lowering and running programs.

use crate::tree::Tag;
use crate::value::Integer;
use thiserror::Error;

/// Errors that abort a run.
///
/// None of these are recovered internally. Each one carries the construct
/// that caused it so the caller can report what went wrong and where.
#[derive(Debug, Error)]
pub enum InterpError {
    /// A node's tag or children do not match what the consuming construct requires.
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        context: String,
        expected: String,
        found: String,
    },

    /// An operator symbol missing from the unary or binary table.
    #[error("unknown {} operator `{symbol}`", arity_name(.arity))]
    UnknownOperator { symbol: String, arity: usize },

    /// An expression node whose operand count is neither 1 nor 2.
    #[error("expression has {count} operands, expected 1 or 2")]
    ArityError { count: usize },

    #[error("no basic block is labelled `{0}`")]
    UnresolvedLabel(String),

    #[error("variable `{0}` is not defined")]
    UndefinedVariable(String),

    #[error("division by zero in `{left} {op} 0`")]
    DivisionByZero { op: &'static str, left: Integer },

    /// `**` with a negative exponent or one too large to evaluate.
    #[error("invalid exponent in `{base} ** {exponent}`")]
    InvalidExponent { base: Integer, exponent: Integer },

    #[error("cannot read input `{name}`: {reason}")]
    Input { name: String, reason: String },

    #[error("cannot write result: {0}")]
    Output(#[source] std::io::Error),

    #[error("step limit of {0} basic blocks exceeded")]
    StepLimitExceeded(u64),
}

impl InterpError {
    pub(crate) fn shape(
        context: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        InterpError::ShapeMismatch {
            context: context.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub(crate) fn unexpected_tag(context: impl Into<String>, expected: &str, found: Tag) -> Self {
        Self::shape(context, expected, format!("{found:?} node"))
    }
}

fn arity_name(arity: &usize) -> &'static str {
    match *arity {
        1 => "unary",
        2 => "binary",
        _ => "n-ary",
    }
}

pub type Result<T, E = InterpError> = std::result::Result<T, E>;
