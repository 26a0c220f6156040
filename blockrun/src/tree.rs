//! Generic syntax tree.
//!
//! A program arrives as an ordered n-ary tree of tagged [`Node`]s. Children
//! keep source order, left to right. This module only knows the container and
//! the grammar's child accessors; [`crate::ir`] turns a tree into the typed
//! program the interpreter runs.
//!
//! Trees can be exchanged as JSON:
//!
//! ```json
//! {"tag": "Assignment", "children": [
//!     {"tag": "Var", "ident": "x"},
//!     {"tag": "Constant", "literal": {"int": "42"}}
//! ]}
//! ```

use crate::error::{InterpError, Result};
use crate::value::Integer;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Node kinds of the closed grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Program,
    BasicBlock,
    Assignment,
    Var,
    Constant,
    Jump,
    Expr,
    Label,
    Op,
    /// Reserved for the termination marker. Never valid inside a program tree.
    Return,
}

impl Tag {
    /// Tags that may stand in an expression position.
    pub const EXPRESSION: [Tag; 3] = [Tag::Expr, Tag::Var, Tag::Constant];

    pub fn is_expression(self) -> bool {
        Self::EXPRESSION.contains(&self)
    }
}

/// Literal payload of a node: an integer for `Constant`, a symbol for `Op`
/// and for `Jump` (`goto`, `if`, `return`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Literal {
    Int(Integer),
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub tag: Tag,
    /// Name of a `Var` or `Label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ident: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<Literal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            ident: None,
            literal: None,
            children: Vec::new(),
        }
    }

    pub fn with_ident(mut self, ident: impl Into<String>) -> Self {
        self.ident = Some(ident.into());
        self
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(Tag::Var).with_ident(name)
    }

    pub fn label(name: impl Into<String>) -> Self {
        Self::new(Tag::Label).with_ident(name)
    }

    pub fn constant(value: impl Into<Integer>) -> Self {
        Self::new(Tag::Constant).with_literal(Literal::Int(value.into()))
    }

    pub fn op(symbol: impl Into<String>) -> Self {
        Self::new(Tag::Op).with_literal(Literal::Symbol(symbol.into()))
    }

    pub fn unary(symbol: &str, operand: Node) -> Self {
        Self::new(Tag::Expr)
            .with_child(Self::op(symbol))
            .with_child(operand)
    }

    pub fn binary(symbol: &str, left: Node, right: Node) -> Self {
        Self::new(Tag::Expr)
            .with_child(left)
            .with_child(Self::op(symbol))
            .with_child(right)
    }

    pub fn assign(target: impl Into<String>, value: Node) -> Self {
        Self::new(Tag::Assignment)
            .with_child(Self::var(target))
            .with_child(value)
    }

    fn jump(kind: &str) -> Self {
        Self::new(Tag::Jump).with_literal(Literal::Symbol(kind.to_string()))
    }

    pub fn goto(target: impl Into<String>) -> Self {
        Self::jump("goto").with_child(Self::label(target))
    }

    pub fn branch(
        condition: Node,
        then_label: impl Into<String>,
        else_label: impl Into<String>,
    ) -> Self {
        Self::jump("if")
            .with_child(condition)
            .with_child(Self::label(then_label))
            .with_child(Self::label(else_label))
    }

    pub fn ret(value: Node) -> Self {
        Self::jump("return").with_child(value)
    }

    pub fn block(
        label: impl Into<String>,
        assignments: impl IntoIterator<Item = Node>,
        jump: Node,
    ) -> Self {
        Self::new(Tag::BasicBlock)
            .with_child(Self::label(label))
            .with_children(assignments)
            .with_child(jump)
    }

    pub fn program<'a>(
        inputs: impl IntoIterator<Item = &'a str>,
        blocks: impl IntoIterator<Item = Node>,
    ) -> Self {
        Self::new(Tag::Program)
            .with_children(inputs.into_iter().map(Self::var))
            .with_children(blocks)
    }

    /// Parses a tree from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Fails unless this node carries `tag`.
    pub fn expect_tag(&self, tag: Tag, context: &str) -> Result<()> {
        if self.tag == tag {
            Ok(())
        } else {
            Err(InterpError::unexpected_tag(context, &format!("{tag:?}"), self.tag))
        }
    }

    /// Children carrying one of `tags`, in source order.
    pub fn children_tagged<'a>(&'a self, tags: &'a [Tag]) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |child| tags.contains(&child.tag))
    }

    /// Identifier of a `Var` or `Label` node.
    pub fn ident(&self) -> Result<&str> {
        self.ident
            .as_deref()
            .ok_or_else(|| InterpError::shape(format!("{:?} node", self.tag), "an identifier", "none"))
    }

    /// Integer literal of a `Constant` node.
    pub fn int_literal(&self) -> Result<&Integer> {
        match &self.literal {
            Some(Literal::Int(value)) => Ok(value),
            other => Err(literal_mismatch(self.tag, "an integer literal", other)),
        }
    }

    /// Symbol literal of an `Op` or `Jump` node.
    pub fn symbol_literal(&self) -> Result<&str> {
        match &self.literal {
            Some(Literal::Symbol(symbol)) => Ok(symbol),
            other => Err(literal_mismatch(self.tag, "a symbol literal", other)),
        }
    }

    /// The leading `Label` of a basic block.
    pub fn label_child(&self) -> Result<&Node> {
        self.expect_tag(Tag::BasicBlock, "basic block")?;
        let first = self
            .children
            .first()
            .ok_or_else(|| InterpError::shape("basic block", "a Label child", "no children"))?;
        first.expect_tag(Tag::Label, "basic block")?;
        Ok(first)
    }

    /// The trailing `Jump` of a basic block.
    pub fn jump_child(&self) -> Result<&Node> {
        self.expect_tag(Tag::BasicBlock, "basic block")?;
        let last = self
            .children
            .last()
            .ok_or_else(|| InterpError::shape("basic block", "a Jump child", "no children"))?;
        last.expect_tag(Tag::Jump, "basic block")?;
        Ok(last)
    }

    /// The `Assignment` children between a block's label and its jump.
    pub fn assignment_children(&self) -> Result<&[Node]> {
        self.label_child()?;
        self.jump_child()?;
        let body = &self.children[1..self.children.len() - 1];
        if let Some(stray) = body.iter().find(|child| child.tag != Tag::Assignment) {
            return Err(InterpError::unexpected_tag(
                format!("basic block `{}`", self.label_child()?.ident()?),
                "Assignment",
                stray.tag,
            ));
        }
        Ok(body)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }
}

fn literal_mismatch(tag: Tag, expected: &str, found: &Option<Literal>) -> InterpError {
    let found = match found {
        Some(Literal::Int(value)) => format!("integer literal {value}"),
        Some(Literal::Symbol(symbol)) => format!("symbol literal `{symbol}`"),
        None => "no literal".to_string(),
    };
    InterpError::shape(format!("{tag:?} node"), expected, found)
}

/// Reads a JSON program tree from `path`.
pub fn load(path: &Path) -> anyhow::Result<Node> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read program tree from {}", path.display()))?;
    Node::from_json(&text)
        .with_context(|| format!("Failed to parse program tree in {}", path.display()))
}
