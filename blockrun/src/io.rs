//! Input and output boundaries of a run.
//!
//! A run reads one integer per declared input through a [`VariableSource`]
//! before any block executes, and writes exactly one integer to a
//! [`ResultSink`] when a `return` is reached.

use crate::error::{InterpError, Result};
use crate::value::Integer;
use std::collections::HashMap;
use std::io::{BufRead, Write};

/// Supplies initial values for a program's declared inputs.
pub trait VariableSource {
    /// Reads the value for input `name`. Called once per input, in
    /// declaration order.
    fn read(&mut self, name: &str) -> Result<Integer>;
}

/// Receives the value of the program's `return`.
pub trait ResultSink {
    fn write(&mut self, value: &Integer) -> Result<()>;
}

/// Inputs known ahead of time, optionally backed by another source for the
/// names it does not know.
#[derive(Default)]
pub struct MapSource {
    values: HashMap<String, Integer>,
    fallback: Option<Box<dyn VariableSource>>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Integer>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn with_fallback(mut self, fallback: impl VariableSource + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }
}

impl<S: Into<String>> FromIterator<(S, Integer)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (S, Integer)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
            fallback: None,
        }
    }
}

impl VariableSource for MapSource {
    fn read(&mut self, name: &str) -> Result<Integer> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }
        match &mut self.fallback {
            Some(fallback) => fallback.read(name),
            None => Err(InterpError::Input {
                name: name.to_string(),
                reason: "no value provided".to_string(),
            }),
        }
    }
}

/// Reads one value per line, printing `name :=` before each read.
pub struct PromptSource<R, W> {
    reader: R,
    prompt: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(reader: R, prompt: W) -> Self {
        Self { reader, prompt }
    }
}

impl PromptSource<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> VariableSource for PromptSource<R, W> {
    fn read(&mut self, name: &str) -> Result<Integer> {
        let input_error = |reason: String| InterpError::Input {
            name: name.to_string(),
            reason,
        };

        write!(self.prompt, "{name} :=")
            .and_then(|_| self.prompt.flush())
            .map_err(|e| input_error(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| input_error(e.to_string()))?;
        if read == 0 {
            return Err(input_error("unexpected end of input".to_string()));
        }

        line.trim()
            .parse()
            .map_err(|_| input_error(format!("`{}` is not an integer", line.trim())))
    }
}

/// Keeps every written value in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectSink {
    pub values: Vec<Integer>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for CollectSink {
    fn write(&mut self, value: &Integer) -> Result<()> {
        self.values.push(value.clone());
        Ok(())
    }
}

/// Writes each value as a decimal line.
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for WriterSink<W> {
    fn write(&mut self, value: &Integer) -> Result<()> {
        writeln!(self.writer, "{value}")
            .and_then(|_| self.writer.flush())
            .map_err(InterpError::Output)
    }
}
