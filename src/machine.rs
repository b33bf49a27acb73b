//! The Picobot execution loop.
//!
//! Each step reads the agent's neighbourhood, picks the first rule that
//! fires for the agent's state and applies it. A run ends when no rule fires
//! or a terminate rule is applied. Nothing bounds [`StateMachine::run`]; a rule
//! set that cycles will loop forever, so use [`StateMachine::run_for`] or
//! drive [`StateMachine::step`] yourself when that matters.

use crate::agent::Agent;
use crate::error::Error;
use crate::grid::Grid;
use crate::rule::Action;
use crate::rule_set::RuleSet;
use crate::step_log::StepLog;
use tracing::{debug, info, warn};

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A move rule was applied
    Moved,
    /// A terminate rule was applied; the agent is now done
    Finished,
    /// No rule fired (or the agent was already done); nothing changed
    Halted,
}

impl StepOutcome {
    /// Whether another step could make progress
    pub fn is_progress(self) -> bool {
        self == StepOutcome::Moved
    }
}

/// Summary of a bounded run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Rules applied during this call
    pub steps: usize,
    /// True if the run stopped on its own rather than on the step budget
    pub halted: bool,
    /// Whether the arena is fully covered at the end
    pub finished: bool,
}

/// Owns the arena, rules and agent for one simulation
pub struct StateMachine {
    grid: Grid,
    rules: RuleSet,
    agent: Agent,
    log: Option<StepLog>,
    steps: usize,
}

impl StateMachine {
    pub fn new(grid: Grid, rules: RuleSet, agent: Agent, log_enabled: bool) -> Self {
        StateMachine {
            grid,
            rules,
            agent,
            log: log_enabled.then(StepLog::new),
            steps: 0,
        }
    }

    /// Parse `rules` and place a default-state agent at (start_x, start_y)
    pub fn from_text(grid: Grid, rules: &str, start_x: i32, start_y: i32, log_enabled: bool) -> Result<Self, Error> {
        let rules = RuleSet::parse(rules)?;
        let agent = Agent::new(&grid, start_x, start_y)?;
        Ok(Self::new(grid, rules, agent, log_enabled))
    }

    /// Apply the first matching rule, if any
    pub fn step(&mut self) -> Result<StepOutcome, Error> {
        if self.agent.is_done() {
            return Ok(StepOutcome::Halted);
        }

        let (x, y) = self.agent.position();
        let state = self.agent.state();
        let pattern = self.grid.local_pattern(x, y)?;

        let Some(rule) = self.rules.first_match(state, &pattern) else {
            debug!(x, y, state, %pattern, "no rule matches");
            return Ok(StepOutcome::Halted);
        };

        debug!(step = self.steps, x, y, state, %pattern, %rule, "applying rule");
        // Only steps that took effect are logged
        rule.apply(&mut self.agent, &mut self.grid)?;
        if let Some(log) = self.log.as_mut() {
            log.record((x, y), state, pattern, rule);
        }
        self.steps += 1;

        Ok(match rule.action {
            Action::Done => StepOutcome::Finished,
            Action::Move(_) => StepOutcome::Moved,
        })
    }

    /// Step until no further progress is possible
    pub fn run(&mut self) -> Result<(), Error> {
        while self.step()?.is_progress() {}
        self.log_stop();
        Ok(())
    }

    /// Step at most `max_steps` times
    pub fn run_for(&mut self, max_steps: usize) -> Result<RunReport, Error> {
        let mut steps = 0;
        let mut halted = false;
        while steps < max_steps {
            let outcome = self.step()?;
            if outcome != StepOutcome::Halted {
                steps += 1;
            }
            if !outcome.is_progress() {
                halted = true;
                break;
            }
        }

        if halted {
            self.log_stop();
        } else {
            warn!(max_steps, x = self.agent.x(), y = self.agent.y(), "step budget exhausted");
        }

        Ok(RunReport {
            steps,
            halted,
            finished: self.grid.finished(),
        })
    }

    fn log_stop(&self) {
        let (covered, total) = self.grid.coverage();
        info!(
            steps = self.steps,
            x = self.agent.x(),
            y = self.agent.y(),
            state = self.agent.state(),
            done = self.agent.is_done(),
            covered,
            total,
            "run stopped"
        );
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The step log, if logging was enabled
    pub fn log(&self) -> Option<&StepLog> {
        self.log.as_ref()
    }

    /// Total rules applied so far
    pub fn steps(&self) -> usize {
        self.steps
    }
}
