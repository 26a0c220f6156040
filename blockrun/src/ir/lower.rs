//! Lowering from the generic tree to the typed program.
//!
//! This is where the grammar is enforced. Any tree that does not follow it is
//! rejected before a single block runs.

use super::{Assignment, BasicBlock, BinOp, Expr, Jump, Program, UnaryOp};
use crate::error::{InterpError, Result};
use crate::tree::{Node, Tag};
use smallvec::SmallVec;
use tracing::debug;

impl Program {
    /// Lowers a `Program` tree.
    ///
    /// # Returns
    /// * `Ok(Program)` - The tree follows the grammar
    /// * `Err(InterpError)` - `ShapeMismatch`, `ArityError` or `UnknownOperator`
    ///   for the first malformed construct found
    pub fn from_tree(root: &Node) -> Result<Program> {
        root.expect_tag(Tag::Program, "program root")?;

        let mut inputs = Vec::new();
        let mut blocks = Vec::new();
        for child in &root.children {
            match child.tag {
                Tag::Var if blocks.is_empty() => inputs.push(child.ident()?.to_string()),
                Tag::Var => {
                    return Err(InterpError::shape(
                        "program",
                        "input declarations before basic blocks",
                        format!("input `{}` after a basic block", child.ident()?),
                    ));
                }
                Tag::BasicBlock => blocks.push(lower_block(child)?),
                other => {
                    return Err(InterpError::unexpected_tag("program", "Var or BasicBlock", other));
                }
            }
        }

        if blocks.is_empty() {
            return Err(InterpError::shape("program", "at least one BasicBlock", "none"));
        }

        debug!(
            "Lowered program with {} inputs and {} basic blocks",
            inputs.len(),
            blocks.len()
        );
        Ok(Program { inputs, blocks })
    }
}

impl TryFrom<&Node> for Program {
    type Error = InterpError;

    fn try_from(root: &Node) -> Result<Self> {
        Program::from_tree(root)
    }
}

fn lower_block(node: &Node) -> Result<BasicBlock> {
    let label = node.label_child()?.ident()?.to_string();
    let assignments = node
        .assignment_children()?
        .iter()
        .map(lower_assignment)
        .collect::<Result<Vec<_>>>()?;
    let jump = lower_jump(node.jump_child()?, &label)?;
    Ok(BasicBlock {
        label,
        assignments,
        jump,
    })
}

fn lower_assignment(node: &Node) -> Result<Assignment> {
    match node.children.as_slice() {
        [target, value] => {
            target.expect_tag(Tag::Var, "assignment target")?;
            Ok(Assignment {
                target: target.ident()?.to_string(),
                value: lower_expr(value)?,
            })
        }
        children => Err(InterpError::shape(
            "assignment",
            "a Var and an expression",
            format!("{} children", children.len()),
        )),
    }
}

fn lower_jump(node: &Node, block: &str) -> Result<Jump> {
    let context = format!("jump of block `{block}`");
    match (node.symbol_literal()?, node.children.as_slice()) {
        ("goto", [target]) => Ok(Jump::Goto(label_name(target, &context)?)),
        ("if", [condition, then_label, else_label]) => Ok(Jump::If {
            condition: lower_expr(condition)?,
            then_label: label_name(then_label, &context)?,
            else_label: label_name(else_label, &context)?,
        }),
        ("return", [value]) => Ok(Jump::Return(lower_expr(value)?)),
        (kind @ ("goto" | "if" | "return"), children) => {
            let expected = match kind {
                "goto" => "a target Label",
                "if" => "a condition and two Labels",
                _ => "a return value",
            };
            Err(InterpError::shape(
                context,
                expected,
                format!("{} children", children.len()),
            ))
        }
        (kind, _) => Err(InterpError::shape(
            context,
            "goto, if or return",
            format!("`{kind}`"),
        )),
    }
}

fn label_name(node: &Node, context: &str) -> Result<String> {
    node.expect_tag(Tag::Label, context)?;
    Ok(node.ident()?.to_string())
}

/// Lowers anything in expression position: `Constant`, `Var` or `Expr`.
pub(crate) fn lower_expr(node: &Node) -> Result<Expr> {
    match node.tag {
        Tag::Constant => Ok(Expr::Constant(node.int_literal()?.clone())),
        Tag::Var => Ok(Expr::Var(node.ident()?.to_string())),
        Tag::Expr => lower_operation(node),
        other => Err(InterpError::unexpected_tag(
            "expression",
            "Expr, Var or Constant",
            other,
        )),
    }
}

fn lower_operation(node: &Node) -> Result<Expr> {
    if let Some(stray) = node
        .children
        .iter()
        .find(|child| child.tag != Tag::Op && !child.tag.is_expression())
    {
        return Err(InterpError::unexpected_tag(
            "expression",
            "Op or operand",
            stray.tag,
        ));
    }

    let operands: SmallVec<[&Node; 2]> = node.children_tagged(&Tag::EXPRESSION).collect();
    let mut ops = node.children_tagged(&[Tag::Op]);
    let symbol = match (ops.next(), ops.next()) {
        (Some(op), None) => op.symbol_literal()?,
        // An `Expr` without an operator only wraps its single operand.
        (None, _) if operands.len() == 1 => return lower_expr(operands[0]),
        (None, _) => return Err(InterpError::shape("expression", "an Op child", "none")),
        (Some(_), Some(_)) => {
            return Err(InterpError::shape(
                "expression",
                "one Op child",
                "several Op children",
            ));
        }
    };

    match operands.as_slice() {
        [operand] => {
            let op = UnaryOp::from_symbol(symbol).ok_or_else(|| InterpError::UnknownOperator {
                symbol: symbol.to_string(),
                arity: 1,
            })?;
            Ok(Expr::unary(op, lower_expr(operand)?))
        }
        [left, right] => {
            let op = BinOp::from_symbol(symbol).ok_or_else(|| InterpError::UnknownOperator {
                symbol: symbol.to_string(),
                arity: 2,
            })?;
            Ok(Expr::binary(op, lower_expr(left)?, lower_expr(right)?))
        }
        _ => Err(InterpError::ArityError {
            count: operands.len(),
        }),
    }
}
