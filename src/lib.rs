pub mod agent;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod logging;
pub mod machine;
pub mod rule;
pub mod rule_set;
pub mod step_log;

pub use agent::Agent;
pub use config::Config;
pub use direction::{Direction, LocalPattern};
pub use error::{AgentError, ConfigError, Error, GridError, RuleError};
pub use grid::{CellStatus, Grid};
pub use machine::{RunReport, StateMachine, StepOutcome};
pub use rule::{Action, Condition, Rule};
pub use rule_set::RuleSet;
pub use step_log::{StepLog, StepRecord};
