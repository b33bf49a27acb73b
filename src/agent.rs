use crate::error::AgentError;
use crate::Grid;

/// The robot: a cell position plus its finite-state-machine state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    x: i32,
    y: i32,
    state: u32,
    done: bool,
}

impl Agent {
    /// State an agent starts in unless told otherwise
    pub const DEFAULT_STATE: u32 = 0;

    /// Place a new agent at (x, y) in [`Agent::DEFAULT_STATE`].
    ///
    /// The start cell is not touched; coverage only counts cells moved into.
    pub fn new(grid: &Grid, x: i32, y: i32) -> Result<Self, AgentError> {
        Self::with_state(grid, x, y, Self::DEFAULT_STATE)
    }

    pub fn with_state(grid: &Grid, x: i32, y: i32, state: u32) -> Result<Self, AgentError> {
        if !grid.include(x, y) {
            return Err(AgentError::OutOfBounds { x, y });
        }
        Ok(Agent {
            x,
            y,
            state,
            done: false,
        })
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Relocate the agent. Bounds are the caller's job; see [`crate::Rule::apply`].
    pub(crate) fn move_to(&mut self, x: i32, y: i32) -> Result<(), AgentError> {
        if self.done {
            return Err(AgentError::AlreadyDone);
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    pub(crate) fn set_state(&mut self, state: u32) {
        self.state = state;
    }

    pub(crate) fn finish(&mut self) {
        self.done = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_position() {
        let grid = Grid::new(5, 10).unwrap();
        let agent = Agent::new(&grid, 2, 3).unwrap();
        assert_eq!(agent.x(), 2);
        assert_eq!(agent.y(), 3);
        assert_eq!(agent.position(), (2, 3));
    }

    #[test]
    fn test_agent_defaults() {
        let grid = Grid::new(5, 10).unwrap();
        let agent = Agent::new(&grid, 2, 3).unwrap();
        assert!(!agent.is_done());
        assert_eq!(agent.state(), 0);
        assert_eq!(grid.touched(2, 3), Ok(false));
    }

    #[test]
    fn test_agent_custom_state() {
        let grid = Grid::new(5, 10).unwrap();
        let agent = Agent::with_state(&grid, 0, 0, 7).unwrap();
        assert_eq!(agent.state(), 7);
    }

    #[test]
    fn test_agent_out_of_bounds() {
        let grid = Grid::new(5, 10).unwrap();
        assert_eq!(Agent::new(&grid, 6, 0), Err(AgentError::OutOfBounds { x: 6, y: 0 }));
        assert_eq!(Agent::new(&grid, 0, -1), Err(AgentError::OutOfBounds { x: 0, y: -1 }));
    }

    #[test]
    fn test_agent_move() {
        let grid = Grid::new(5, 10).unwrap();
        let mut agent = Agent::new(&grid, 2, 4).unwrap();
        agent.move_to(2, 3).unwrap();
        assert_eq!(agent.position(), (2, 3));
    }

    #[test]
    fn test_done_agent_refuses_moves() {
        let grid = Grid::new(5, 10).unwrap();
        let mut agent = Agent::new(&grid, 2, 4).unwrap();
        agent.finish();
        assert_eq!(agent.move_to(2, 3), Err(AgentError::AlreadyDone));
        assert_eq!(agent.position(), (2, 4));
    }
}
