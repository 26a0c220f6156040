//! Variable storage for a single run.

use crate::error::{InterpError, Result};
use crate::value::Integer;
use std::collections::HashMap;

/// Maps variable names to their current values.
///
/// A store lives exactly as long as one run. It is filled from the program's
/// inputs, updated by assignments, and cleared when the run terminates.
#[derive(Debug, Default, Clone)]
pub struct VariableStore {
    vars: HashMap<String, Integer>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a variable, failing with `UndefinedVariable` if it was never set.
    pub fn get(&self, name: &str) -> Result<&Integer> {
        self.vars
            .get(name)
            .ok_or_else(|| InterpError::UndefinedVariable(name.to_string()))
    }

    /// Sets a variable, returning its previous value.
    pub fn set(&mut self, name: &str, value: Integer) -> Option<Integer> {
        self.vars.insert(name.to_string(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Integer)> {
        self.vars.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<S: Into<String>> FromIterator<(S, Integer)> for VariableStore {
    fn from_iter<I: IntoIterator<Item = (S, Integer)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
