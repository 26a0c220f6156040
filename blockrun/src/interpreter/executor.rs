use super::expr::evaluate;
use crate::config::RunConfig;
use crate::error::{InterpError, Result};
use crate::io::{ResultSink, VariableSource};
use crate::ir::{Assignment, BasicBlock, Program};
use crate::store::VariableStore;
use crate::value::Integer;
use std::collections::VecDeque;
use tracing::{debug, info};

/// Runs lowered programs.
///
/// The interpreter itself holds no run state, so one instance can run any
/// number of programs one after another without them seeing each other's
/// variables.
#[derive(Debug, Default, Clone)]
pub struct Interpreter {
    config: RunConfig,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// The value written to the result sink.
    pub value: Integer,
    /// Number of basic blocks executed.
    pub steps: u64,
}

/// Entry of the pending list: a block to execute, or the termination marker
/// carrying the returned value.
#[derive(Debug)]
pub enum ControlFlow<'p> {
    Continue(&'p BasicBlock),
    Halt(Integer),
}

impl Interpreter {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs `program` to completion.
    ///
    /// Reads every declared input from `input` first, then executes blocks
    /// starting from the first one until a `return` writes its value to
    /// `output`.
    ///
    /// # Returns
    /// * `Ok(RunOutcome)` - The program returned
    /// * `Err(InterpError)` - Evaluation or control transfer failed. Nothing is
    ///   written to `output` in that case.
    pub fn run(
        &self,
        program: &Program,
        input: &mut dyn VariableSource,
        output: &mut dyn ResultSink,
    ) -> Result<RunOutcome> {
        info!(
            "Starting run with {} inputs and {} basic blocks",
            program.inputs.len(),
            program.blocks.len()
        );

        let mut frame = RunFrame::new(program, self.config);
        let result = frame
            .load_inputs(input)
            .and_then(|_| frame.execute(output));
        frame.finish();

        match &result {
            Ok(outcome) => info!("Run finished after {} steps", outcome.steps),
            Err(e) => debug!("Run aborted after {} steps: {}", frame.steps, e),
        }
        result
    }
}

/// State owned by a single run.
#[derive(Debug)]
pub(super) struct RunFrame<'p> {
    pub(super) program: &'p Program,
    pub(super) store: VariableStore,
    config: RunConfig,
    steps: u64,
}

impl<'p> RunFrame<'p> {
    fn new(program: &'p Program, config: RunConfig) -> Self {
        Self {
            program,
            store: VariableStore::new(),
            config,
            steps: 0,
        }
    }

    fn load_inputs(&mut self, input: &mut dyn VariableSource) -> Result<()> {
        for name in &self.program.inputs {
            let value = input.read(name)?;
            debug!("Input {} = {}", name, value);
            self.store.set(name, value);
        }
        Ok(())
    }

    /// The scheduling loop.
    ///
    /// The pending list starts with every block in declaration order. Each
    /// resolved jump is pushed to the front, so it runs next, and the loop
    /// stops when it pops the termination marker. Since every iteration
    /// pushes exactly one entry, the seeded blocks behind the first are never
    /// reached.
    fn execute(&mut self, output: &mut dyn ResultSink) -> Result<RunOutcome> {
        let mut pending: VecDeque<ControlFlow<'p>> = self
            .program
            .blocks
            .iter()
            .map(ControlFlow::Continue)
            .collect();

        while let Some(next) = pending.pop_front() {
            let block = match next {
                ControlFlow::Continue(block) => block,
                ControlFlow::Halt(value) => {
                    return Ok(RunOutcome {
                        value,
                        steps: self.steps,
                    });
                }
            };

            self.steps += 1;
            self.config.check_steps(self.steps)?;
            debug!("Executing block `{}`", block.label);

            for assignment in &block.assignments {
                self.execute_assignment(assignment)?;
            }

            let next = self.execute_jump(&block.jump, output)?;
            pending.push_front(next);
        }

        // Lowering rejects programs without blocks, so this only happens
        // for a hand-built empty `Program`.
        Err(InterpError::shape("program", "at least one BasicBlock", "none"))
    }

    fn execute_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        let value = evaluate(&assignment.value, &self.store)?;
        debug!("Assigning {} to {}", value, assignment.target);
        self.store.set(&assignment.target, value);
        Ok(())
    }

    /// Drops all variables of the run.
    fn finish(&mut self) {
        debug!("Clearing {} variables", self.store.len());
        self.store.clear();
    }
}
