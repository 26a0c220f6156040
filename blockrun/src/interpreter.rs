//! Core interpretation logic.
//!
//! A run walks the program's basic blocks: each block's assignments are
//! applied in order, then its jump picks the next block or ends the run with
//! a returned value. Expression evaluation lives in `expr`, control transfer
//! in `jump`, and the scheduling loop in `executor`.

pub mod executor;
mod expr;
mod jump;

pub use executor::{ControlFlow, Interpreter, RunOutcome};
pub use expr::{BinaryEval, UnaryEval, evaluate};
pub use jump::{resolve_goto, resolve_if, resolve_return};
