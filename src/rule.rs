//! A single Picobot rule and its textual form.
//!
//! Grammar, one rule per line:
//! ```text
//! <state> <N><E><W><S> -> <ACTION> <end_state>
//! ```
//! Each pattern slot holds its own direction letter (must be blocked), `x`
//! (must be open) or `*` (don't care). `ACTION` is a direction letter or `X`
//! for terminate. For example `0 *x** -> E 0` means "in state 0, if east is
//! open, move east and stay in state 0".

use crate::agent::Agent;
use crate::direction::{Direction, LocalPattern};
use crate::error::{Error, GridError, RuleError};
use crate::grid::Grid;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*) ([x*N][x*E][x*W][x*S]) -> ([NEWSX]) (0|[1-9][0-9]*)$").unwrap()
});

/// Requirement a rule places on one neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Blocked,
    Open,
    Any,
}

impl Condition {
    /// Whether an observed blocked flag satisfies this condition
    pub fn accepts(self, blocked: bool) -> bool {
        match self {
            Condition::Any => true,
            Condition::Blocked => blocked,
            Condition::Open => !blocked,
        }
    }

    /// Whether some observation could satisfy both conditions at once
    pub fn compatible(self, other: Condition) -> bool {
        match (self, other) {
            (Condition::Any, _) | (_, Condition::Any) => true,
            (Condition::Blocked, Condition::Blocked) => true,
            (Condition::Open, Condition::Open) => true,
            (Condition::Blocked, Condition::Open) | (Condition::Open, Condition::Blocked) => false,
        }
    }

    fn from_char(slot: Direction, c: char) -> Option<Self> {
        match c {
            'x' => Some(Condition::Open),
            '*' => Some(Condition::Any),
            c if c == slot.letter() => Some(Condition::Blocked),
            _ => None,
        }
    }

    fn to_char(self, slot: Direction) -> char {
        match self {
            Condition::Blocked => slot.letter(),
            Condition::Open => 'x',
            Condition::Any => '*',
        }
    }
}

/// What the agent does when a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Direction),
    Done,
}

impl Action {
    fn letter(self) -> char {
        match self {
            Action::Move(dir) => dir.letter(),
            Action::Done => 'X',
        }
    }
}

/// A (state, pattern) -> (action, next state) mapping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub start_state: u32,
    /// Indexed by [`Direction::index`]
    pub conditions: [Condition; 4],
    pub action: Action,
    /// Ignored at run time when the action is [`Action::Done`]
    pub end_state: u32,
}

impl Rule {
    pub fn new(start_state: u32, conditions: [Condition; 4], action: Action, end_state: u32) -> Self {
        Rule {
            start_state,
            conditions,
            action,
            end_state,
        }
    }

    /// Parse a single rule line. A trailing newline is tolerated.
    pub fn parse(line: &str) -> Result<Self, RuleError> {
        Self::parse_numbered(line, 0)
    }

    pub(crate) fn parse_numbered(line: &str, line_number: usize) -> Result<Self, RuleError> {
        let line = line.trim_end_matches(&['\n', '\r'][..]);
        let invalid = || RuleError::InvalidRule {
            line_number,
            line: line.to_string(),
        };

        let caps = RULE_RE.captures(line).ok_or_else(invalid)?;
        let start_state: u32 = caps[1].parse().map_err(|_| invalid())?;
        let end_state: u32 = caps[4].parse().map_err(|_| invalid())?;

        let mut conditions = [Condition::Any; 4];
        for (slot, c) in Direction::ALL.iter().zip(caps[2].chars()) {
            conditions[slot.index()] = Condition::from_char(*slot, c).ok_or_else(invalid)?;
        }

        let action = match caps[3].chars().next() {
            Some('X') => Action::Done,
            Some(c) => Action::Move(Direction::from_letter(c).ok_or_else(invalid)?),
            None => return Err(invalid()),
        };

        Ok(Rule::new(start_state, conditions, action, end_state))
    }

    pub fn condition(&self, dir: Direction) -> Condition {
        self.conditions[dir.index()]
    }

    /// True if this rule fires for an agent in `state` seeing `pattern`
    pub fn matches(&self, state: u32, pattern: &LocalPattern) -> bool {
        self.start_state == state
            && pattern
                .iter()
                .all(|(dir, blocked)| self.condition(dir).accepts(blocked))
    }

    /// True if both rules could fire for the same observation
    pub fn conflicts_with(&self, other: &Rule) -> bool {
        self.start_state == other.start_state
            && self
                .conditions
                .iter()
                .zip(other.conditions.iter())
                .all(|(a, b)| a.compatible(*b))
    }

    /// Carry out the rule's action on `agent`, touching the cell it moves into.
    ///
    /// The target cell is checked before the agent moves, so a failed apply
    /// leaves both the agent and the grid unchanged.
    pub fn apply(&self, agent: &mut Agent, grid: &mut Grid) -> Result<(), Error> {
        let dir = match self.action {
            Action::Done => {
                agent.finish();
                return Ok(());
            }
            Action::Move(dir) => dir,
        };

        let (tx, ty) = dir.step_from(agent.x(), agent.y()).ok_or(GridError::OutOfBounds {
            x: agent.x(),
            y: agent.y(),
            max_x: grid.max_x(),
            max_y: grid.max_y(),
        })?;
        if grid.blocked(tx, ty)? {
            return Err(GridError::BlockedCell { x: tx, y: ty }.into());
        }
        agent.move_to(tx, ty)?;
        grid.touch(tx, ty)?;
        agent.set_state(self.end_state);
        Ok(())
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::parse(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern: String = Direction::ALL
            .iter()
            .map(|&dir| self.condition(dir).to_char(dir))
            .collect();
        write!(
            f,
            "{} {} -> {} {}",
            self.start_state,
            pattern,
            self.action.letter(),
            self.end_state
        )
    }
}
