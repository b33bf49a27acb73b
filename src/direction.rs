use std::fmt;
use std::ops::Index;

/// One of the four compass moves available to the agent.
///
/// The declaration order is the canonical N, E, W, S order used by rule text
/// and by every per-direction array in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    West,
    South,
}

impl Direction {
    /// All directions in canonical order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::West,
        Direction::South,
    ];

    /// Unit displacement (dx, dy); y grows southwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
        }
    }

    /// Position in the canonical order, usable as an array index
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::West => 2,
            Direction::South => 3,
        }
    }

    /// Uppercase letter used in rule text
    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::West => 'W',
            Direction::South => 'S',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            'S' => Some(Direction::South),
            _ => None,
        }
    }

    /// Cell reached from (x, y) by one step in this direction, `None` on overflow
    pub fn step_from(self, x: i32, y: i32) -> Option<(i32, i32)> {
        let (dx, dy) = self.delta();
        Some((x.checked_add(dx)?, y.checked_add(dy)?))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Blocked/open snapshot of the four neighbours of a cell.
///
/// `true` means the neighbour is a wall, an obstacle or off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LocalPattern {
    blocked: [bool; 4],
}

impl LocalPattern {
    pub fn new(north: bool, east: bool, west: bool, south: bool) -> Self {
        LocalPattern {
            blocked: [north, east, west, south],
        }
    }

    pub fn is_blocked(&self, dir: Direction) -> bool {
        self.blocked[dir.index()]
    }

    /// Iterate (direction, blocked) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, bool)> + '_ {
        Direction::ALL.iter().map(move |&d| (d, self.is_blocked(d)))
    }
}

impl Index<Direction> for LocalPattern {
    type Output = bool;

    fn index(&self, dir: Direction) -> &bool {
        &self.blocked[dir.index()]
    }
}

/// Same notation as a fully specified rule pattern, e.g. `NxWS`
impl fmt::Display for LocalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (dir, blocked) in self.iter() {
            if blocked {
                write!(f, "{}", dir.letter())?;
            } else {
                write!(f, "x")?;
            }
        }
        Ok(())
    }
}
