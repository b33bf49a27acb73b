use crate::error::{ConfigError, Error};
use crate::{Agent, Grid};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub run: RunConfig,
    /// Inline rule text; a rules file given to the driver takes precedence
    #[serde(default)]
    pub rules: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_max_x")]
    pub max_x: i32,
    #[serde(default = "default_max_y")]
    pub max_y: i32,
    /// Obstacle cells as `[x, y]` pairs
    #[serde(default)]
    pub blocked: Vec<(i32, i32)>,
}

#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub start_x: i32,
    #[serde(default)]
    pub start_y: i32,
    #[serde(default = "default_initial_state")]
    pub initial_state: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunConfig {
    /// Step budget; unbounded when absent
    #[serde(default)]
    pub max_steps: Option<usize>,
    #[serde(default)]
    pub log_steps: bool,
    /// Where to write the step log as JSON
    #[serde(default)]
    pub log_path: Option<String>,
}

// Default values
fn default_max_x() -> i32 { 9 }
fn default_max_y() -> i32 { 9 }
fn default_initial_state() -> u32 { Agent::DEFAULT_STATE }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_x: default_max_x(),
            max_y: default_max_y(),
            blocked: Vec::new(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start_x: 0,
            start_y: 0,
            initial_state: default_initial_state(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            agent: AgentConfig::default(),
            run: RunConfig::default(),
            rules: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or use defaults if the file doesn't exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml_str(&contents)?;
                tracing::info!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file found, using defaults");
                Ok(Config::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Arena described by the `[grid]` section
    pub fn build_grid(&self) -> Result<Grid, Error> {
        Ok(Grid::with_blocked(self.grid.max_x, self.grid.max_y, &self.grid.blocked)?)
    }

    /// Agent described by the `[agent]` section, placed on `grid`
    pub fn build_agent(&self, grid: &Grid) -> Result<Agent, Error> {
        Ok(Agent::with_state(
            grid,
            self.agent.start_x,
            self.agent.start_y,
            self.agent.initial_state,
        )?)
    }
}
