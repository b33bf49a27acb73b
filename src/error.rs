//! Error types for grid, rule, agent and configuration failures.
//!
//! None of these are recoverable where they are raised: malformed rule text,
//! ambiguous rule sets and out-of-range coordinates are content errors and go
//! straight back to the caller.

use thiserror::Error;

/// Top-level error for anything the crate can fail on.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Failures raised by [`crate::Grid`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the arena [0, {max_x}] x [0, {max_y}]")]
    OutOfBounds { x: i32, y: i32, max_x: i32, max_y: i32 },

    #[error("cell ({x}, {y}) is blocked and cannot be visited")]
    BlockedCell { x: i32, y: i32 },

    #[error("invalid arena dimensions: max_x={max_x}, max_y={max_y}")]
    InvalidDimensions { max_x: i32, max_y: i32 },
}

/// Failures raised while parsing or validating rule text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// `line_number` is 1-based, or 0 when a single line was parsed on its own.
    #[error("invalid rule on line {line_number}: {line:?}")]
    InvalidRule { line_number: usize, line: String },

    #[error("rule \"{first}\" conflicts with rule \"{second}\"")]
    RuleConflict { first: String, second: String },
}

/// Failures raised by [`crate::Agent`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("agent start position ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    #[error("agent has already terminated and cannot move")]
    AlreadyDone,
}

/// Failures raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
