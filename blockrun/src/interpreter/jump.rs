//! Control transfer between basic blocks.

use super::executor::{ControlFlow, RunFrame};
use super::expr::evaluate;
use crate::error::{InterpError, Result};
use crate::io::ResultSink;
use crate::ir::{BasicBlock, Expr, Jump, Program};
use crate::store::VariableStore;
use tracing::{debug, info};

impl<'p> RunFrame<'p> {
    /// Executes a block's jump and returns what runs next.
    pub(super) fn execute_jump(
        &self,
        jump: &'p Jump,
        output: &mut dyn ResultSink,
    ) -> Result<ControlFlow<'p>> {
        match jump {
            Jump::Goto(label) => resolve_goto(self.program, label).map(ControlFlow::Continue),
            Jump::If {
                condition,
                then_label,
                else_label,
            } => resolve_if(self.program, condition, then_label, else_label, &self.store)
                .map(ControlFlow::Continue),
            Jump::Return(value) => resolve_return(value, &self.store, output),
        }
    }
}

/// Finds the block a `goto` targets.
///
/// The first block in declaration order whose label matches wins; duplicate
/// labels are not rejected.
pub fn resolve_goto<'p>(program: &'p Program, label: &str) -> Result<&'p BasicBlock> {
    let block = program
        .block(label)
        .ok_or_else(|| InterpError::UnresolvedLabel(label.to_string()))?;
    debug!("Jumping to block `{}`", label);
    Ok(block)
}

/// Picks the branch of an `if`.
///
/// Only a condition equal to exactly `1` takes `then_label`. Every other value,
/// including negatives and values greater than one, takes `else_label`.
pub fn resolve_if<'p>(
    program: &'p Program,
    condition: &Expr,
    then_label: &str,
    else_label: &str,
    store: &VariableStore,
) -> Result<&'p BasicBlock> {
    let value = evaluate(condition, store)?;
    let taken = if value.is_one() { then_label } else { else_label };
    debug!("Condition {} evaluated to {}, taking `{}`", condition, value, taken);
    resolve_goto(program, taken)
}

/// Evaluates a `return`, hands the value to `output` and ends the run.
pub fn resolve_return<'p>(
    value: &Expr,
    store: &VariableStore,
    output: &mut dyn ResultSink,
) -> Result<ControlFlow<'p>> {
    let value = evaluate(value, store)?;
    output.write(&value)?;
    info!("Program returned {}", value);
    Ok(ControlFlow::Halt(value))
}
