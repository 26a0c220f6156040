//! Blockrun Interpreter Library
//!
//! Runs programs made of basic blocks: straight-line integer assignments, each
//! block ending in an explicit `goto`, `if` or `return`.
//!
//! A program arrives as a generic [`tree::Node`] tree (usually loaded from
//! JSON), is lowered into a typed [`ir::Program`], and is then executed by an
//! [`interpreter::Interpreter`] that reads inputs from a [`io::VariableSource`]
//! and writes the returned value to a [`io::ResultSink`].
//!
//! ```
//! use blockrun::io::{CollectSink, MapSource};
//! use blockrun::tree::Node;
//!
//! let tree = Node::program(
//!     ["x"],
//!     [Node::block("entry", [], Node::ret(Node::binary("*", Node::var("x"), Node::constant(2))))],
//! );
//! let mut sink = CollectSink::new();
//! let outcome = blockrun::run_tree(
//!     &tree,
//!     &mut MapSource::new().with_value("x", 21),
//!     &mut sink,
//!     blockrun::config::RunConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(outcome.value.to_string(), "42");
//! ```

pub mod config;
pub mod error;
pub mod interpreter;
pub mod io;
pub mod ir;
pub mod store;
pub mod tree;
pub mod value;

use crate::config::RunConfig;
use crate::interpreter::{Interpreter, RunOutcome};
use crate::io::{ResultSink, VariableSource};
use crate::ir::Program;
use crate::tree::Node;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Lowers `tree` and runs it.
///
/// # Returns
/// * `Ok(RunOutcome)` - The program returned a value, already written to `output`
/// * `Err(InterpError)` - The tree is malformed or the run failed
pub fn run_tree(
    tree: &Node,
    input: &mut dyn VariableSource,
    output: &mut dyn ResultSink,
    config: RunConfig,
) -> error::Result<RunOutcome> {
    let program = Program::from_tree(tree)?;
    Interpreter::new(config).run(&program, input, output)
}

/// Loads a JSON program tree from `path` and runs it.
///
/// # Examples
/// ```ignore
/// let outcome = run_file(Path::new("countdown.json"), &mut source, &mut sink, config)?;
/// ```
pub fn run_file(
    path: &Path,
    input: &mut dyn VariableSource,
    output: &mut dyn ResultSink,
    config: RunConfig,
) -> Result<RunOutcome> {
    let tree = tree::load(path)?;
    info!("Loaded program tree with {} nodes", tree.size());

    let program = Program::from_tree(&tree)
        .with_context(|| format!("Malformed program in {}", path.display()))?;
    let outcome = Interpreter::new(config)
        .run(&program, input, output)
        .with_context(|| format!("Failed to run {}", path.display()))?;
    Ok(outcome)
}
