//! Run configuration.

use crate::error::{InterpError, Result};

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Upper bound on executed basic blocks. `None` runs until a return,
    /// however long that takes.
    pub max_steps: Option<u64>,
}

impl RunConfig {
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Fails with `StepLimitExceeded` once `steps` executed blocks exceed the budget.
    pub fn check_steps(&self, steps: u64) -> Result<()> {
        match self.max_steps {
            Some(max) if steps > max => Err(InterpError::StepLimitExceeded(max)),
            _ => Ok(()),
        }
    }
}
