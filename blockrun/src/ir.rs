//! Typed program representation.
//!
//! The interpreter never walks raw [`Node`](crate::tree::Node)s. A tree is
//! lowered once by [`Program::from_tree`], which checks the grammar and
//! resolves operator symbols, so every later step works on the exact node
//! kind it expects.

mod lower;

use crate::value::Integer;
use std::fmt;

/// A whole program: declared inputs followed by basic blocks, both in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub inputs: Vec<String>,
    pub blocks: Vec<BasicBlock>,
}

impl Program {
    /// The first declared block, where execution starts.
    pub fn entry(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    /// Finds the block labelled `label`.
    ///
    /// Labels are not checked for uniqueness. With duplicates, the first block
    /// in declaration order wins.
    pub fn block(&self, label: &str) -> Option<&BasicBlock> {
        self.blocks.iter().find(|block| block.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    pub label: String,
    pub assignments: Vec<Assignment>,
    pub jump: Jump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Constant(Integer),
    Var(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{value}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Unary(op, operand) => write!(f, "{op}{operand}"),
            Expr::Binary(op, left, right) => write!(f, "({left} {op} {right})"),
        }
    }
}

/// Control transfer at the end of a basic block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Jump {
    Goto(String),
    If {
        condition: Expr,
        then_label: String,
        else_label: String,
    },
    Return(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `~`
    Not,
}

impl UnaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(UnaryOp::Neg),
            "~" => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    /// Floor division.
    Div,
    /// Modulo consistent with floor division.
    Rem,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Eq,
    /// Written `~` in binary position.
    Ne,
    Gt,
    Lt,
}

impl BinOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "%" => BinOp::Rem,
            "**" => BinOp::Pow,
            "&" => BinOp::BitAnd,
            "|" => BinOp::BitOr,
            "^" => BinOp::BitXor,
            "=" => BinOp::Eq,
            "~" => BinOp::Ne,
            ">" => BinOp::Gt,
            "<" => BinOp::Lt,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Pow => "**",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::Eq => "=",
            BinOp::Ne => "~",
            BinOp::Gt => ">",
            BinOp::Lt => "<",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_tables_round_trip() {
        for op in [UnaryOp::Neg, UnaryOp::Not] {
            assert_eq!(UnaryOp::from_symbol(op.symbol()), Some(op));
        }
        for symbol in ["+", "-", "*", "/", "%", "**", "&", "|", "^", "=", "~", ">", "<"] {
            assert_eq!(BinOp::from_symbol(symbol).map(BinOp::symbol), Some(symbol));
        }
    }

    #[test]
    fn test_tilde_is_both_unary_and_binary() {
        assert_eq!(UnaryOp::from_symbol("~"), Some(UnaryOp::Not));
        assert_eq!(BinOp::from_symbol("~"), Some(BinOp::Ne));
        assert_eq!(UnaryOp::from_symbol("+"), None);
        assert_eq!(BinOp::from_symbol(">="), None);
    }

    #[test]
    fn test_first_duplicate_label_wins() {
        let block = |label: &str, value: i64| BasicBlock {
            label: label.to_string(),
            assignments: vec![],
            jump: Jump::Return(Expr::Constant(Integer::from(value))),
        };
        let program = Program {
            inputs: vec![],
            blocks: vec![block("a", 1), block("b", 2), block("b", 3)],
        };
        assert_eq!(program.entry().map(|b| b.label.as_str()), Some("a"));
        assert_eq!(
            program.block("b").map(|b| &b.jump),
            Some(&Jump::Return(Expr::Constant(Integer::from(2))))
        );
        assert!(program.block("c").is_none());
    }

    #[test]
    fn test_expr_display() {
        let expr = Expr::binary(
            BinOp::Add,
            Expr::Var("x".to_string()),
            Expr::unary(UnaryOp::Neg, Expr::Constant(Integer::from(2))),
        );
        assert_eq!(expr.to_string(), "(x + -2)");
    }
}
