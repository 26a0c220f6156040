use crate::error::{InterpError, Result};
use crate::ir::{BinOp, Expr, UnaryOp};
use crate::store::VariableStore;
use crate::value::Integer;
use tracing::trace;

/// Computes the value of an expression against the current variables.
///
/// # Arguments
/// * `expr` - The expression to evaluate (constant, variable, unary or binary)
/// * `store` - Variables visible to the expression
///
/// # Returns
/// * `Ok(Integer)` - The computed value
/// * `Err(InterpError)` - `UndefinedVariable`, `DivisionByZero` or `InvalidExponent`
pub fn evaluate(expr: &Expr, store: &VariableStore) -> Result<Integer> {
    let value = match expr {
        Expr::Constant(value) => value.clone(),
        Expr::Var(name) => store.get(name)?.clone(),
        Expr::Unary(op, operand) => {
            let operand = evaluate(operand, store)?;
            op.eval(&operand)?
        }
        Expr::Binary(op, left, right) => {
            let left = evaluate(left, store)?;
            let right = evaluate(right, store)?;
            op.eval(&left, &right)?
        }
    };
    trace!("Evaluated {} to {}", expr, value);
    Ok(value)
}

/// Trait for evaluating binary operations on values.
pub trait BinaryEval {
    /// Evaluates a binary operation on two values.
    ///
    /// # Arguments
    /// * `left` - Left operand value
    /// * `right` - Right operand value
    ///
    /// # Returns
    /// * `Ok(Integer)` - Result of the operation
    /// * `Err(InterpError)` - If the operation is undefined for these operands
    fn eval(&self, left: &Integer, right: &Integer) -> Result<Integer>;
}

/// Trait for evaluating unary operations on values.
pub trait UnaryEval {
    /// Evaluates a unary operation on a value.
    fn eval(&self, operand: &Integer) -> Result<Integer>;
}

impl BinaryEval for BinOp {
    fn eval(&self, left: &Integer, right: &Integer) -> Result<Integer> {
        let division_by_zero = || InterpError::DivisionByZero {
            op: self.symbol(),
            left: left.clone(),
        };

        let value = match self {
            BinOp::Add => left + right,
            BinOp::Sub => left - right,
            BinOp::Mul => left * right,
            BinOp::Div => left.checked_div_floor(right).ok_or_else(division_by_zero)?,
            BinOp::Rem => left.checked_mod_floor(right).ok_or_else(division_by_zero)?,
            BinOp::Pow => left
                .checked_pow(right)
                .ok_or_else(|| InterpError::InvalidExponent {
                    base: left.clone(),
                    exponent: right.clone(),
                })?,
            BinOp::BitAnd => left & right,
            BinOp::BitOr => left | right,
            BinOp::BitXor => left ^ right,
            BinOp::Eq => Integer::from_bool(left == right),
            BinOp::Ne => Integer::from_bool(left != right),
            BinOp::Gt => Integer::from_bool(left > right),
            BinOp::Lt => Integer::from_bool(left < right),
        };
        Ok(value)
    }
}

impl UnaryEval for UnaryOp {
    fn eval(&self, operand: &Integer) -> Result<Integer> {
        Ok(match self {
            UnaryOp::Neg => -operand,
            UnaryOp::Not => !operand,
        })
    }
}
